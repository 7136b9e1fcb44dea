//! Response envelopes.
//!
//! Every endpoint answers `{ "success": bool, "message"?: string, ... }` with
//! the payload under an endpoint-specific key.

use serde::{Deserialize, de::DeserializeOwned};
use serde_json::Value;
use storefront::{orders::Order, products::Product, profile::UserProfile};

use super::ApiError;

#[derive(Debug, Deserialize)]
struct Outcome {
    #[serde(default)]
    success: bool,

    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct ProductsBody {
    pub(super) products: Vec<Product>,
}

#[derive(Debug, Deserialize)]
pub(super) struct ProductBody {
    pub(super) product: Product,
}

#[derive(Debug, Deserialize)]
pub(super) struct OrdersBody {
    pub(super) orders: Vec<Order>,
}

#[derive(Debug, Deserialize)]
pub(super) struct UserBody {
    pub(super) user: UserProfile,
}

/// Checks the envelope and returns the backend message.
pub(super) fn acknowledge(status: u16, body: &[u8]) -> Result<Option<String>, ApiError> {
    let (outcome, _) = open(status, body)?;

    Ok(outcome.message)
}

/// Checks the envelope and decodes its payload.
pub(super) fn payload<T: DeserializeOwned>(status: u16, body: &[u8]) -> Result<T, ApiError> {
    let (_, value) = open(status, body)?;

    T::deserialize(value).map_err(ApiError::Decode)
}

fn open(status: u16, body: &[u8]) -> Result<(Outcome, Value), ApiError> {
    let success_status = (200..300).contains(&status);

    let value: Value = match serde_json::from_slice(body) {
        Ok(value) => value,
        Err(source) if success_status => return Err(ApiError::Decode(source)),
        Err(_) => {
            return Err(ApiError::Rejected {
                status,
                message: None,
            });
        }
    };

    let outcome = Outcome::deserialize(&value).map_err(ApiError::Decode)?;

    if success_status && outcome.success {
        Ok((outcome, value))
    } else {
        Err(ApiError::Rejected {
            status,
            message: outcome.message,
        })
    }
}
