//! Product management.

use storefront::{
    admin::{ProductDraft, ProductUpdate},
    products::{Product, ProductId},
    storage::KeyValueStore,
};
use tracing::info;

use crate::{
    api::StorefrontApi,
    errors::{WorkflowError, confirm, report},
    session::Session,
    shop::require_token,
};

/// Shown when the product list cannot be loaded.
pub const PRODUCTS_UNAVAILABLE: &str = "Failed to fetch product list. Please try again later.";

/// Shown when a single product cannot be loaded.
pub const PRODUCT_UNAVAILABLE: &str = "Product not found";

/// Shown when adding fails without a message.
pub const ADD_FAILED: &str = "Failed to add the product";

/// Shown when adding succeeds without a message.
pub const PRODUCT_ADDED: &str = "Product added";

/// Shown when the update fails without a message.
pub const UPDATE_FAILED: &str = "Failed to update the product";

/// Shown when the update succeeds without a message.
pub const PRODUCT_UPDATED: &str = "Product updated";

/// Shown when removal fails without a message.
pub const REMOVE_FAILED: &str = "Failed to remove the product";

/// Shown when removal succeeds without a message.
pub const PRODUCT_REMOVED: &str = "Product removed";

/// Every product, as the backend lists them.
///
/// # Errors
///
/// Returns [`WorkflowError::Api`] when the backend call fails.
pub async fn list_products<S: KeyValueStore>(
    session: &Session<S>,
    api: &dyn StorefrontApi,
) -> Result<Vec<Product>, WorkflowError> {
    let result = api
        .list_products()
        .await
        .map_err(WorkflowError::api(PRODUCTS_UNAVAILABLE));

    report(session.notifier(), result)
}

/// Loads a product into the edit form.
///
/// # Errors
///
/// Returns [`WorkflowError::Api`] when the product cannot be fetched.
pub async fn edit_form<S: KeyValueStore>(
    session: &Session<S>,
    api: &dyn StorefrontApi,
    id: &ProductId,
) -> Result<ProductUpdate, WorkflowError> {
    let result = api
        .get_product(id)
        .await
        .map(|product| ProductUpdate::from_product(&product))
        .map_err(WorkflowError::api(PRODUCT_UNAVAILABLE));

    report(session.notifier(), result)
}

/// Uploads a new product. The form is reset on success, keeping its category
/// choices.
///
/// # Errors
///
/// Returns [`WorkflowError::Draft`] when a required field is missing,
/// [`WorkflowError::NotLoggedIn`] without a token, or [`WorkflowError::Api`]
/// when the upload fails.
pub async fn add_product<S: KeyValueStore>(
    session: &Session<S>,
    api: &dyn StorefrontApi,
    draft: &mut ProductDraft,
) -> Result<(), WorkflowError> {
    let result = async {
        let token = require_token(session)?;
        draft.validate()?;

        api.add_product(&token, draft)
            .await
            .map_err(WorkflowError::api(ADD_FAILED))
    }
    .await;

    let result = result.map(|message| {
        info!(name = %draft.name.trim(), images = draft.images.filled().count(), "product added");

        confirm(session.notifier(), message, PRODUCT_ADDED);
        draft.reset();
    });

    report(session.notifier(), result)
}

/// Saves the edit form.
///
/// # Errors
///
/// Returns [`WorkflowError::Draft`] when a required field is missing,
/// [`WorkflowError::NotLoggedIn`] without a token, or [`WorkflowError::Api`]
/// when the update fails.
pub async fn update_product<S: KeyValueStore>(
    session: &Session<S>,
    api: &dyn StorefrontApi,
    id: &ProductId,
    update: &ProductUpdate,
) -> Result<(), WorkflowError> {
    let result = async {
        let token = require_token(session)?;
        update.validate()?;

        let message = api
            .update_product(&token, id, update)
            .await
            .map_err(WorkflowError::api(UPDATE_FAILED))?;

        info!(product = %id, "product updated");
        confirm(session.notifier(), message, PRODUCT_UPDATED);

        Ok(())
    }
    .await;

    report(session.notifier(), result)
}

/// Removes a product and returns the refreshed list.
///
/// # Errors
///
/// Returns [`WorkflowError::NotLoggedIn`] without a token, or
/// [`WorkflowError::Api`] when a backend call fails.
pub async fn remove_product<S: KeyValueStore>(
    session: &Session<S>,
    api: &dyn StorefrontApi,
    id: &ProductId,
) -> Result<Vec<Product>, WorkflowError> {
    let result = async {
        let token = require_token(session)?;

        let message = api
            .remove_product(&token, id)
            .await
            .map_err(WorkflowError::api(REMOVE_FAILED))?;

        info!(product = %id, "product removed");
        confirm(session.notifier(), message, PRODUCT_REMOVED);

        api.list_products()
            .await
            .map_err(WorkflowError::api(PRODUCTS_UNAVAILABLE))
    }
    .await;

    report(session.notifier(), result)
}
