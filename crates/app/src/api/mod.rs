//! Storefront backend API.

use async_trait::async_trait;
use mockall::automock;
use storefront::{
    admin::{ProductDraft, ProductUpdate},
    checkout::NewOrder,
    orders::{Order, OrderId, OrderStatus},
    products::{Product, ProductId},
    profile::UserProfile,
    token::SessionToken,
};

pub mod errors;
mod http;
mod responses;

pub use errors::ApiError;
pub use http::HttpStorefrontApi;

/// Calls exposed by the storefront REST backend.
///
/// Mutations resolve to the backend's confirmation message, when it sent one.
#[automock]
#[async_trait]
pub trait StorefrontApi: Send + Sync {
    /// `GET /api/product/list`
    async fn list_products(&self) -> Result<Vec<Product>, ApiError>;

    /// `GET /api/product/:id`
    async fn get_product(&self, id: &ProductId) -> Result<Product, ApiError>;

    /// `POST /api/product/add` (multipart)
    async fn add_product(
        &self,
        token: &SessionToken,
        draft: &ProductDraft,
    ) -> Result<Option<String>, ApiError>;

    /// `PUT /api/product/update/:id`
    async fn update_product(
        &self,
        token: &SessionToken,
        id: &ProductId,
        update: &ProductUpdate,
    ) -> Result<Option<String>, ApiError>;

    /// `POST /api/product/remove`
    async fn remove_product(
        &self,
        token: &SessionToken,
        id: &ProductId,
    ) -> Result<Option<String>, ApiError>;

    /// `GET /api/user/profile`
    async fn get_profile(&self, token: &SessionToken) -> Result<UserProfile, ApiError>;

    /// `PUT /api/user/profile`
    async fn update_profile(
        &self,
        token: &SessionToken,
        profile: &UserProfile,
    ) -> Result<Option<String>, ApiError>;

    /// `GET /api/orders/user`
    async fn list_user_orders(&self, token: &SessionToken) -> Result<Vec<Order>, ApiError>;

    /// `GET /api/orders/all`
    async fn list_all_orders(&self, token: &SessionToken) -> Result<Vec<Order>, ApiError>;

    /// `POST /api/orders/create`
    async fn create_order(
        &self,
        token: &SessionToken,
        order: &NewOrder,
    ) -> Result<Option<String>, ApiError>;

    /// `PUT /api/orders/status`
    async fn update_order_status(
        &self,
        token: &SessionToken,
        id: &OrderId,
        status: &OrderStatus,
    ) -> Result<Option<String>, ApiError>;

    /// `PUT /api/orders/address`
    async fn update_order_address(
        &self,
        token: &SessionToken,
        id: &OrderId,
        shipping_address: &str,
    ) -> Result<Option<String>, ApiError>;

    /// `DELETE /api/orders/:id`
    async fn delete_order(
        &self,
        token: &SessionToken,
        id: &OrderId,
    ) -> Result<Option<String>, ApiError>;
}
