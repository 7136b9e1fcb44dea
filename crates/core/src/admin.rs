//! Admin product drafts.
//!
//! Form state of the console's "add product" and "edit product" screens.

use std::{fmt, path::Path};

use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

use crate::products::{Product, ProductImages};

/// Number of image upload slots on the product form.
pub const IMAGE_SLOTS: usize = 4;

/// Default category of a new product.
pub const DEFAULT_CATEGORY: &str = "Headphones";

/// Default sub-category of a new product.
pub const DEFAULT_SUB_CATEGORY: &str = "High-end";

/// Reasons a product form is not submitted.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DraftError {
    /// The product name is blank.
    #[error("product name is required")]
    MissingName,

    /// The description is blank.
    #[error("product description is required")]
    MissingDescription,

    /// The price is not a non-negative number.
    #[error("price `{0}` is not a valid amount")]
    InvalidPrice(String),

    /// Slot index outside `0..IMAGE_SLOTS`.
    #[error("image slot {0} does not exist; slots are numbered 1 to {IMAGE_SLOTS}")]
    NoSuchSlot(usize),
}

/// Parses a price typed into a form field.
///
/// # Errors
///
/// Returns [`DraftError::InvalidPrice`] if the text is not a number or is
/// negative.
pub fn parse_price(text: &str) -> Result<Decimal, DraftError> {
    text.trim()
        .parse::<Decimal>()
        .ok()
        .filter(|price| !price.is_sign_negative())
        .ok_or_else(|| DraftError::InvalidPrice(text.to_owned()))
}

/// An image file selected for upload.
#[derive(Clone, PartialEq, Eq)]
pub struct ImageUpload {
    /// File name sent with the multipart part
    pub file_name: String,

    /// File contents
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    /// Creates an upload from a name and contents.
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }

    /// MIME type guessed from the file extension.
    pub fn mime_type(&self) -> &'static str {
        let extension = Path::new(&self.file_name)
            .extension()
            .and_then(|extension| extension.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("png") => "image/png",
            Some("jpg" | "jpeg") => "image/jpeg",
            Some("gif") => "image/gif",
            Some("webp") => "image/webp",
            Some("svg") => "image/svg+xml",
            _ => "application/octet-stream",
        }
    }
}

impl fmt::Debug for ImageUpload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageUpload")
            .field("file_name", &self.file_name)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Fixed image slots, addressed by zero-based index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageSlots {
    slots: [Option<ImageUpload>; IMAGE_SLOTS],
}

impl ImageSlots {
    /// Multipart field name of a slot: `image1` to `image4`.
    pub fn field_name(index: usize) -> Option<&'static str> {
        const NAMES: [&str; IMAGE_SLOTS] = ["image1", "image2", "image3", "image4"];

        NAMES.get(index).copied()
    }

    /// Image in a slot, if any.
    pub fn get(&self, index: usize) -> Option<&ImageUpload> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    /// Places an image in a slot, returning the image it replaces.
    ///
    /// # Errors
    ///
    /// Returns [`DraftError::NoSuchSlot`] if `index` is out of range.
    pub fn set(
        &mut self,
        index: usize,
        image: ImageUpload,
    ) -> Result<Option<ImageUpload>, DraftError> {
        let slot = self
            .slots
            .get_mut(index)
            .ok_or(DraftError::NoSuchSlot(index))?;

        Ok(slot.replace(image))
    }

    /// Empties a slot, returning its image.
    pub fn take(&mut self, index: usize) -> Option<ImageUpload> {
        self.slots.get_mut(index).and_then(Option::take)
    }

    /// Empties every slot.
    pub fn clear(&mut self) {
        self.slots = Default::default();
    }

    /// Filled slots with their multipart field names, in slot order.
    pub fn filled(&self) -> impl Iterator<Item = (&'static str, &ImageUpload)> {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            Some((Self::field_name(index)?, slot.as_ref()?))
        })
    }
}

/// Form state of the "add product" screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductDraft {
    /// Product name
    pub name: String,

    /// Product description
    pub description: String,

    /// Price as typed
    pub price: String,

    /// Category
    pub category: String,

    /// Sub-category
    pub sub_category: String,

    /// Brand
    pub brand: String,

    /// Colour
    pub color: String,

    /// Featured as bestseller
    pub bestseller: bool,

    /// Image uploads
    pub images: ImageSlots,
}

impl Default for ProductDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            price: String::new(),
            category: DEFAULT_CATEGORY.to_owned(),
            sub_category: DEFAULT_SUB_CATEGORY.to_owned(),
            brand: String::new(),
            color: String::new(),
            bestseller: false,
            images: ImageSlots::default(),
        }
    }
}

impl ProductDraft {
    /// Checks the required fields.
    ///
    /// # Errors
    ///
    /// Returns the first [`DraftError`] found.
    pub fn validate(&self) -> Result<Decimal, DraftError> {
        if self.name.trim().is_empty() {
            return Err(DraftError::MissingName);
        }

        if self.description.trim().is_empty() {
            return Err(DraftError::MissingDescription);
        }

        parse_price(&self.price)
    }

    /// Text fields of the multipart body, in submission order.
    ///
    /// # Errors
    ///
    /// Returns the first [`DraftError`] found.
    pub fn text_fields(&self) -> Result<Vec<(&'static str, String)>, DraftError> {
        let price = self.validate()?;

        Ok(vec![
            ("name", self.name.trim().to_owned()),
            ("description", self.description.trim().to_owned()),
            ("price", price.to_string()),
            ("category", self.category.clone()),
            ("subCategory", self.sub_category.clone()),
            ("brand", self.brand.trim().to_owned()),
            ("color", self.color.trim().to_owned()),
            ("bestseller", self.bestseller.to_string()),
        ])
    }

    /// Resets the form after a successful submission. Category choices and
    /// the bestseller flag are kept.
    pub fn reset(&mut self) {
        let category = std::mem::take(&mut self.category);
        let sub_category = std::mem::take(&mut self.sub_category);

        *self = Self {
            category,
            sub_category,
            bestseller: self.bestseller,
            ..Self::default()
        };
    }
}

/// Payload of `PUT /api/product/update/:id`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductUpdate {
    /// Product name
    pub name: String,

    /// Product description
    pub description: String,

    /// Unit price
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,

    /// Category
    pub category: String,

    /// Image URLs, kept as they are
    #[serde(rename = "image")]
    pub images: ProductImages,
}

impl ProductUpdate {
    /// Pre-fills the edit form from a fetched product.
    pub fn from_product(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price,
            category: product.category.clone(),
            images: product.images.clone(),
        }
    }

    /// Checks the required fields.
    ///
    /// # Errors
    ///
    /// Returns the first [`DraftError`] found.
    pub fn validate(&self) -> Result<(), DraftError> {
        if self.name.trim().is_empty() {
            return Err(DraftError::MissingName);
        }

        if self.description.trim().is_empty() {
            return Err(DraftError::MissingDescription);
        }

        if self.price.is_sign_negative() {
            return Err(DraftError::InvalidPrice(self.price.to_string()));
        }

        Ok(())
    }
}
