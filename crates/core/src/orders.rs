//! Orders
//!
//! Orders are owned by the backend; the client mirrors what it returns and
//! never recomputes canonical totals.

use std::{fmt, str::FromStr};

use jiff::Timestamp;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use crate::products::ProductId;

/// Backend identifier of an order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(String);

impl OrderId {
    /// Wraps a backend identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as sent over the wire.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Fulfilment status.
///
/// Decoding is case-insensitive. A name the client does not know is kept
/// verbatim as [`OrderStatus::Other`] so one odd order never hides the rest.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum OrderStatus {
    /// Placed, not yet handled.
    Pending,

    /// Being prepared.
    Processing,

    /// Handed to the carrier.
    Shipped,

    /// Received by the customer.
    Delivered,

    /// Cancelled.
    Cancelled,

    /// Any other status reported by the backend.
    Other(String),
}

impl OrderStatus {
    /// Every known status, in fulfilment order.
    pub const ALL: [Self; 5] = [
        Self::Pending,
        Self::Processing,
        Self::Shipped,
        Self::Delivered,
        Self::Cancelled,
    ];

    /// Maps a backend status name, keeping unknown names as they came.
    pub fn from_wire(value: &str) -> Self {
        value
            .parse()
            .unwrap_or_else(|_: UnknownStatus| Self::Other(value.to_owned()))
    }

    /// Wire name.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Shipped => "shipped",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
            Self::Other(name) => name,
        }
    }

    /// Human-readable label. Unknown statuses show the raw name.
    pub fn label(&self) -> &str {
        match self {
            Self::Pending => "Pending",
            Self::Processing => "Processing",
            Self::Shipped => "Shipped",
            Self::Delivered => "Delivered",
            Self::Cancelled => "Cancelled",
            Self::Other(name) => name,
        }
    }

    /// Whether the customer may still change the shipping address.
    pub fn is_editable(&self) -> bool {
        matches!(self, Self::Pending | Self::Processing | Self::Cancelled)
    }

    /// Whether the customer may still cancel the order.
    pub fn is_cancellable(&self) -> bool {
        matches!(self, Self::Pending)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for OrderStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for OrderStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;

        Ok(Self::from_wire(&name))
    }
}

/// Unknown order status name.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown order status `{0}`")]
pub struct UnknownStatus(String);

impl FromStr for OrderStatus {
    type Err = UnknownStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| UnknownStatus(value.to_owned()))
    }
}

/// Status filter of the order console.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum StatusFilter {
    /// Every order.
    #[default]
    All,

    /// Orders in one status.
    Only(OrderStatus),
}

impl StatusFilter {
    /// Whether an order passes the filter.
    pub fn matches(&self, order: &Order) -> bool {
        match self {
            Self::All => true,
            Self::Only(status) => order.status == *status,
        }
    }

    /// Orders passing the filter, in input order.
    pub fn apply<'o>(&self, orders: &'o [Order]) -> Vec<&'o Order> {
        orders.iter().filter(|order| self.matches(order)).collect()
    }
}

impl FromStr for StatusFilter {
    type Err = UnknownStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if value.trim().eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }

        value.parse().map(Self::Only)
    }
}

/// One purchased line, as recorded by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    /// Product identifier
    pub product_id: ProductId,

    /// Product name at purchase time
    pub name: String,

    /// Unit price at purchase time
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,

    /// Units purchased
    pub quantity: u32,

    /// Thumbnail URL
    #[serde(default)]
    pub image: Option<String>,
}

/// Order as returned by the order endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Order identifier
    #[serde(rename = "_id")]
    pub id: OrderId,

    /// Purchased lines
    #[serde(default)]
    pub items: Vec<OrderItem>,

    /// Amount charged, delivery included
    #[serde(with = "rust_decimal::serde::float")]
    pub total_amount: Decimal,

    /// Single-line shipping address
    #[serde(default)]
    pub shipping_address: String,

    /// Payment method name
    #[serde(default)]
    pub payment_method: String,

    /// Fulfilment status
    pub status: OrderStatus,

    /// Placement time
    #[serde(default, deserialize_with = "deserialize_order_date")]
    pub date: Option<Timestamp>,
}

/// Accepts epoch milliseconds or an RFC 3339 string.
fn deserialize_order_date<'de, D>(deserializer: D) -> Result<Option<Timestamp>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawDate {
        Millis(i64),
        Text(String),
    }

    match Option::<RawDate>::deserialize(deserializer)? {
        None => Ok(None),
        Some(RawDate::Millis(millis)) => Timestamp::from_millisecond(millis)
            .map(Some)
            .map_err(serde::de::Error::custom),
        Some(RawDate::Text(text)) => text
            .parse::<Timestamp>()
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}
