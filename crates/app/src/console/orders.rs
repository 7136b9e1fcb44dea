//! Order management.

use storefront::{
    orders::{Order, OrderId, OrderStatus, StatusFilter},
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
pub const ORDERS_UNAVAILABLE: &str = "Failed to load orders";

/// Shown when the status change fails without a message.
pub const STATUS_FAILED: &str = "Failed to update the order status";

/// Shown when the status change succeeds without a message.
pub const STATUS_UPDATED: &str = "Order status updated";

/// Shown when deletion fails without a message.
pub const DELETE_FAILED: &str = "Failed to delete the order";

/// Shown when deletion succeeds without a message.
pub const ORDER_DELETED: &str = "Order deleted";

/// Every order matching `filter`, in backend order.
///
/// # Errors
///
/// Returns [`WorkflowError::NotLoggedIn`] without a token, or
/// [`WorkflowError::Api`] when the backend call fails.
pub async fn list_orders<S: KeyValueStore>(
    session: &Session<S>,
    api: &dyn StorefrontApi,
    filter: StatusFilter,
) -> Result<Vec<Order>, WorkflowError> {
    let result = fetch(session, api).await.map(|orders| {
        orders
            .into_iter()
            .filter(|order| filter.matches(order))
            .collect()
    });

    report(session.notifier(), result)
}

/// Moves an order to `status`.
///
/// # Errors
///
/// Returns [`WorkflowError::NotLoggedIn`] without a token, or
/// [`WorkflowError::Api`] when the backend call fails.
pub async fn set_status<S: KeyValueStore>(
    session: &Session<S>,
    api: &dyn StorefrontApi,
    id: &OrderId,
    status: &OrderStatus,
) -> Result<(), WorkflowError> {
    let result = async {
        let token = require_token(session)?;

        let message = api
            .update_order_status(&token, id, status)
            .await
            .map_err(WorkflowError::api(STATUS_FAILED))?;

        info!(order = %id, status = status.as_str(), "order status updated");
        confirm(session.notifier(), message, STATUS_UPDATED);

        Ok(())
    }
    .await;

    report(session.notifier(), result)
}

/// Deletes an order and returns the refreshed list.
///
/// # Errors
///
/// Returns [`WorkflowError::NotLoggedIn`] without a token, or
/// [`WorkflowError::Api`] when a backend call fails.
pub async fn delete_order<S: KeyValueStore>(
    session: &Session<S>,
    api: &dyn StorefrontApi,
    id: &OrderId,
) -> Result<Vec<Order>, WorkflowError> {
    let result = async {
        let token = require_token(session)?;

        let message = api
            .delete_order(&token, id)
            .await
            .map_err(WorkflowError::api(DELETE_FAILED))?;

        info!(order = %id, "order deleted");
        confirm(session.notifier(), message, ORDER_DELETED);

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

    api.list_all_orders(&token)
        .await
        .map_err(WorkflowError::api(ORDERS_UNAVAILABLE))
}
