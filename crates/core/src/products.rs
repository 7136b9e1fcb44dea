//! Products

use std::{borrow::Borrow, fmt};

use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::pricing;

/// Backend identifier of a product.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Wraps a backend identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as sent over the wire.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ProductId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Borrow<str> for ProductId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Product image URLs, in display order. The admin console uploads at most four.
pub type ProductImages = SmallVec<[String; 4]>;

/// Product as returned by the catalog endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Product identifier
    #[serde(rename = "_id")]
    pub id: ProductId,

    /// Product name
    pub name: String,

    /// Product description
    #[serde(default)]
    pub description: String,

    /// Unit price in the shop currency
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,

    /// Top-level category
    #[serde(default)]
    pub category: String,

    /// Sub-category within the category
    #[serde(default)]
    pub sub_category: String,

    /// Brand name
    #[serde(default)]
    pub brand: String,

    /// Colour
    #[serde(default)]
    pub color: String,

    /// Image URLs
    #[serde(rename = "image", default)]
    pub images: ProductImages,

    /// Whether the product is featured as a bestseller
    #[serde(default)]
    pub bestseller: bool,
}

impl Product {
    /// Unit price as money in the shop currency.
    pub fn unit_price(&self) -> Money<'static, Currency> {
        pricing::money(self.price)
    }

    /// First image, used for thumbnails and order lines.
    pub fn thumbnail(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }
}
