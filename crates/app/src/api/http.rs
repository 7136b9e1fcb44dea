//! `reqwest`-backed storefront client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{
    Client, Method, RequestBuilder,
    multipart::{Form, Part},
};
use serde_json::json;
use storefront::{
    admin::{ProductDraft, ProductUpdate},
    checkout::NewOrder,
    orders::{Order, OrderId, OrderStatus},
    products::{Product, ProductId},
    profile::UserProfile,
    token::SessionToken,
};
use tracing::debug;

use super::{
    ApiError, StorefrontApi,
    responses::{OrdersBody, ProductBody, ProductsBody, UserBody, acknowledge, payload},
};

/// Header carrying the session token on authenticated calls.
const TOKEN_HEADER: &str = "token";

/// HTTP client for the storefront backend.
#[derive(Debug, Clone)]
pub struct HttpStorefrontApi {
    base_url: String,
    http: Client,
}

impl HttpStorefrontApi {
    /// Create a client rooted at `base_url`, e.g. `"http://localhost:4000"`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ApiError> {
        let base_url = base_url.into().trim_end_matches('/').to_owned();
        let http = Client::builder().timeout(timeout).build()?;

        Ok(Self { base_url, http })
    }

    /// Backend root this client talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        debug!(%method, path, "backend request");

        self.http.request(method, format!("{}{path}", self.base_url))
    }

    fn authorized(&self, method: Method, path: &str, token: &SessionToken) -> RequestBuilder {
        self.request(method, path).header(TOKEN_HEADER, token.expose())
    }

    async fn send(request: RequestBuilder) -> Result<(u16, Vec<u8>), ApiError> {
        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?.to_vec();

        debug!(status, len = body.len(), "backend response");

        Ok((status, body))
    }

    async fn fetch<T: serde::de::DeserializeOwned>(request: RequestBuilder) -> Result<T, ApiError> {
        let (status, body) = Self::send(request).await?;

        payload(status, &body)
    }

    async fn mutate(request: RequestBuilder) -> Result<Option<String>, ApiError> {
        let (status, body) = Self::send(request).await?;

        acknowledge(status, &body)
    }
}

fn product_form(draft: &ProductDraft) -> Result<Form, ApiError> {
    let mut form = Form::new();

    for (name, value) in draft.text_fields()? {
        form = form.text(name, value);
    }

    for (field, image) in draft.images.filled() {
        let part = Part::bytes(image.bytes.clone())
            .file_name(image.file_name.clone())
            .mime_str(image.mime_type())?;

        form = form.part(field, part);
    }

    Ok(form)
}

#[async_trait]
impl StorefrontApi for HttpStorefrontApi {
    async fn list_products(&self) -> Result<Vec<Product>, ApiError> {
        let body: ProductsBody = Self::fetch(self.request(Method::GET, "/api/product/list")).await?;

        Ok(body.products)
    }

    async fn get_product(&self, id: &ProductId) -> Result<Product, ApiError> {
        let path = format!("/api/product/{id}");
        let body: ProductBody = Self::fetch(self.request(Method::GET, &path)).await?;

        Ok(body.product)
    }

    async fn add_product(
        &self,
        token: &SessionToken,
        draft: &ProductDraft,
    ) -> Result<Option<String>, ApiError> {
        let form = product_form(draft)?;

        Self::mutate(
            self.authorized(Method::POST, "/api/product/add", token)
                .multipart(form),
        )
        .await
    }

    async fn update_product(
        &self,
        token: &SessionToken,
        id: &ProductId,
        update: &ProductUpdate,
    ) -> Result<Option<String>, ApiError> {
        let path = format!("/api/product/update/{id}");

        Self::mutate(self.authorized(Method::PUT, &path, token).json(update)).await
    }

    async fn remove_product(
        &self,
        token: &SessionToken,
        id: &ProductId,
    ) -> Result<Option<String>, ApiError> {
        Self::mutate(
            self.authorized(Method::POST, "/api/product/remove", token)
                .json(&json!({ "id": id })),
        )
        .await
    }

    async fn get_profile(&self, token: &SessionToken) -> Result<UserProfile, ApiError> {
        let body: UserBody =
            Self::fetch(self.authorized(Method::GET, "/api/user/profile", token)).await?;

        Ok(body.user)
    }

    async fn update_profile(
        &self,
        token: &SessionToken,
        profile: &UserProfile,
    ) -> Result<Option<String>, ApiError> {
        Self::mutate(
            self.authorized(Method::PUT, "/api/user/profile", token)
                .json(profile),
        )
        .await
    }

    async fn list_user_orders(&self, token: &SessionToken) -> Result<Vec<Order>, ApiError> {
        let body: OrdersBody =
            Self::fetch(self.authorized(Method::GET, "/api/orders/user", token)).await?;

        Ok(body.orders)
    }

    async fn list_all_orders(&self, token: &SessionToken) -> Result<Vec<Order>, ApiError> {
        let body: OrdersBody =
            Self::fetch(self.authorized(Method::GET, "/api/orders/all", token)).await?;

        Ok(body.orders)
    }

    async fn create_order(
        &self,
        token: &SessionToken,
        order: &NewOrder,
    ) -> Result<Option<String>, ApiError> {
        Self::mutate(
            self.authorized(Method::POST, "/api/orders/create", token)
                .json(order),
        )
        .await
    }

    async fn update_order_status(
        &self,
        token: &SessionToken,
        id: &OrderId,
        status: &OrderStatus,
    ) -> Result<Option<String>, ApiError> {
        Self::mutate(
            self.authorized(Method::PUT, "/api/orders/status", token)
                .json(&json!({ "orderId": id, "status": status })),
        )
        .await
    }

    async fn update_order_address(
        &self,
        token: &SessionToken,
        id: &OrderId,
        shipping_address: &str,
    ) -> Result<Option<String>, ApiError> {
        Self::mutate(
            self.authorized(Method::PUT, "/api/orders/address", token)
                .json(&json!({ "orderId": id, "shippingAddress": shipping_address })),
        )
        .await
    }

    async fn delete_order(
        &self,
        token: &SessionToken,
        id: &OrderId,
    ) -> Result<Option<String>, ApiError> {
        let path = format!("/api/orders/{id}");

        Self::mutate(self.authorized(Method::DELETE, &path, token)).await
    }
}
