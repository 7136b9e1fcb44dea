//! Workflow errors.

use storefront::{
    admin::DraftError,
    checkout::CheckoutError,
    orders::{OrderId, OrderStatus},
    products::ProductId,
};
use thiserror::Error;

use crate::{api::ApiError, notify::Notifier};

/// Errors surfaced by the shop and console workflows.
///
/// The display text is what the user is shown.
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// The action needs a session token.
    #[error("please log in to continue")]
    NotLoggedIn,

    /// Checkout validation failed; nothing was sent.
    #[error(transparent)]
    Checkout(#[from] CheckoutError),

    /// The product form is incomplete; nothing was sent.
    #[error(transparent)]
    Draft(#[from] DraftError),

    /// The product is not in the catalog snapshot.
    #[error("product {0} is not available")]
    ProductUnavailable(ProductId),

    /// The new shipping address is blank.
    #[error("please enter a shipping address")]
    MissingAddress,

    /// The order is not among the listed orders.
    #[error("order {0} not found")]
    OrderNotFound(OrderId),

    /// The order status no longer allows the change.
    #[error("order {id} is {} and can no longer be changed", .status.as_str())]
    OrderLocked {
        /// Order identifier
        id: OrderId,

        /// Current status
        status: OrderStatus,
    },

    /// The backend call failed.
    #[error("{}", .source.message_or(.fallback))]
    Api {
        /// Message shown when the backend sent none
        fallback: &'static str,

        /// Underlying failure
        source: ApiError,
    },
}

impl WorkflowError {
    /// Wraps an [`ApiError`] with the message shown when the backend sent
    /// none. Meant for `map_err`.
    pub fn api(fallback: &'static str) -> impl FnOnce(ApiError) -> Self {
        move |source| Self::Api { fallback, source }
    }
}

/// Shows the error of a failed workflow, passing the result through.
pub(crate) fn report<T>(
    notifier: &dyn Notifier,
    result: Result<T, WorkflowError>,
) -> Result<T, WorkflowError> {
    if let Err(error) = &result {
        notifier.error(&error.to_string());
    }

    result
}

/// Shows the backend confirmation, or `default` when it sent none.
pub(crate) fn confirm(notifier: &dyn Notifier, message: Option<String>, default: &str) {
    match message.filter(|message| !message.trim().is_empty()) {
        Some(message) => notifier.success(&message),
        None => notifier.success(default),
    }
}
