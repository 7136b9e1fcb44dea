//! Place-order workflow.

use storefront::{
    checkout::{CheckoutError, NewOrder, PaymentMethod, ShippingForm},
    storage::KeyValueStore,
};
use tracing::info;

use crate::{
    api::StorefrontApi,
    errors::{WorkflowError, confirm, report},
    session::Session,
};

/// Shown when the backend rejects the order without a message.
pub const ORDER_FAILED: &str = "Failed to place the order";

/// Shown when the backend accepts the order without a message.
pub const ORDER_PLACED: &str = "Order placed successfully";

/// Validates the checkout, sends the order and clears the cart on success.
///
/// Nothing is sent unless a token is present, the cart is non-empty and
/// every shipping field is filled. The cart is kept when the order fails.
///
/// # Errors
///
/// Returns [`WorkflowError::Checkout`] for local validation failures and
/// [`WorkflowError::Api`] when the backend call fails.
pub async fn place_order<S: KeyValueStore>(
    session: &mut Session<S>,
    api: &dyn StorefrontApi,
    form: &ShippingForm,
    payment_method: PaymentMethod,
) -> Result<(), WorkflowError> {
    let result = submit(session, api, form, payment_method).await;

    report(session.notifier(), result)
}

async fn submit<S: KeyValueStore>(
    session: &mut Session<S>,
    api: &dyn StorefrontApi,
    form: &ShippingForm,
    payment_method: PaymentMethod,
) -> Result<(), WorkflowError> {
    let token = session.token().cloned().ok_or(CheckoutError::NotLoggedIn)?;
    let order = NewOrder::from_cart(session.cart(), session.catalog(), form, payment_method)?;

    let message = api
        .create_order(&token, &order)
        .await
        .map_err(WorkflowError::api(ORDER_FAILED))?;

    info!(
        lines = order.items.len(),
        total = %order.total_amount,
        "order placed"
    );

    confirm(session.notifier(), message, ORDER_PLACED);
    session.clear();

    Ok(())
}
