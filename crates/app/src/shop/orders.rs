//! Customer order history.

use storefront::{
    orders::{Order, OrderId},
    storage::KeyValueStore,
};
use tracing::info;

use crate::{
    api::StorefrontApi,
    errors::{WorkflowError, confirm, report},
    session::Session,
    shop::require_token,
};

/// Shown when the order list cannot be loaded.
pub const ORDERS_UNAVAILABLE: &str = "Failed to load your orders";

/// Shown when the address change fails without a message.
pub const ADDRESS_FAILED: &str = "Failed to update the shipping address";

/// Shown when the address change succeeds without a message.
pub const ADDRESS_UPDATED: &str = "Shipping address updated";

/// Shown when the cancellation fails without a message.
pub const CANCEL_FAILED: &str = "Failed to cancel the order";

/// Shown when the cancellation succeeds without a message.
pub const ORDER_CANCELLED: &str = "Order cancelled";

/// Orders of the logged-in customer.
///
/// # Errors
///
/// Returns [`WorkflowError::NotLoggedIn`] without a token, or
/// [`WorkflowError::Api`] when the backend call fails.
pub async fn list_orders<S: KeyValueStore>(
    session: &Session<S>,
    api: &dyn StorefrontApi,
) -> Result<Vec<Order>, WorkflowError> {
    let result = fetch(session, api).await;

    report(session.notifier(), result)
}

/// Replaces the shipping address of an order that has not shipped yet.
///
/// # Errors
///
/// Fails when not logged in, when the order is unknown or already shipped,
/// when `shipping_address` is blank, or when the backend call fails.
pub async fn edit_address<S: KeyValueStore>(
    session: &Session<S>,
    api: &dyn StorefrontApi,
    id: &OrderId,
    shipping_address: &str,
) -> Result<(), WorkflowError> {
    let result = async {
        let shipping_address = shipping_address.trim();

        if shipping_address.is_empty() {
            return Err(WorkflowError::MissingAddress);
        }

        let token = require_token(session)?;
        let order = find(fetch(session, api).await?, id)?;

        if !order.status.is_editable() {
            return Err(WorkflowError::OrderLocked {
                id: order.id,
                status: order.status,
            });
        }

        let message = api
            .update_order_address(&token, id, shipping_address)
            .await
            .map_err(WorkflowError::api(ADDRESS_FAILED))?;

        info!(order = %id, "shipping address updated");
        confirm(session.notifier(), message, ADDRESS_UPDATED);

        Ok(())
    }
    .await;

    report(session.notifier(), result)
}

/// Cancels a pending order and returns the refreshed order list.
///
/// # Errors
///
/// Fails when not logged in, when the order is unknown or no longer pending,
/// or when a backend call fails.
pub async fn cancel_order<S: KeyValueStore>(
    session: &Session<S>,
    api: &dyn StorefrontApi,
    id: &OrderId,
) -> Result<Vec<Order>, WorkflowError> {
    let result = async {
        let token = require_token(session)?;
        let order = find(fetch(session, api).await?, id)?;

        if !order.status.is_cancellable() {
            return Err(WorkflowError::OrderLocked {
                id: order.id,
                status: order.status,
            });
        }

        let message = api
            .delete_order(&token, id)
            .await
            .map_err(WorkflowError::api(CANCEL_FAILED))?;

        info!(order = %id, "order cancelled");
        confirm(session.notifier(), message, ORDER_CANCELLED);

        fetch(session, api).await
    }
    .await;

    report(session.notifier(), result)
}

async fn fetch<S: KeyValueStore>(
    session: &Session<S>,
    api: &dyn StorefrontApi,
) -> Result<Vec<Order>, WorkflowError> {
    let token = require_token(session)?;

    api.list_user_orders(&token)
        .await
        .map_err(WorkflowError::api(ORDERS_UNAVAILABLE))
}

fn find(orders: Vec<Order>, id: &OrderId) -> Result<Order, WorkflowError> {
    orders
        .into_iter()
        .find(|order| order.id == *id)
        .ok_or_else(|| WorkflowError::OrderNotFound(id.clone()))
}
