//! Session state container.
//!
//! One [`Session`] is created at startup and passed by reference to every
//! workflow. It owns the catalog snapshot, the cart, the session token and the
//! cached profile, and mirrors the cart and token to a [`KeyValueStore`] after
//! every mutation.

use std::sync::Arc;

use rusty_money::{Money, iso::Currency};
use storefront::{
    cart::{Cart, Quantity},
    catalog::CatalogSnapshot,
    pricing::CartSummary,
    products::{Product, ProductId},
    profile::UserProfile,
    storage::{CART_KEY, KeyValueStore, load_cart, load_token, save_cart, save_token},
    token::SessionToken,
};
use tracing::{debug, info, warn};

use crate::{
    api::{ApiError, StorefrontApi},
    notify::Notifier,
};

/// Shown when the product list cannot be loaded.
pub const CATALOG_UNAVAILABLE: &str = "Failed to load products. Please try again.";

/// Shown after a product is added to the cart.
pub const ADDED_TO_CART: &str = "Product added to cart";

/// Client-side session state.
pub struct Session<S> {
    store: S,
    notifier: Arc<dyn Notifier>,
    catalog: CatalogSnapshot,
    cart: Cart,
    token: Option<SessionToken>,
    profile: Option<UserProfile>,
    search: String,
    selected_category: Option<String>,
}

impl<S: KeyValueStore> Session<S> {
    /// Rehydrates the cart and token from `store`.
    ///
    /// An unreadable or corrupt entry is logged and treated as absent.
    pub fn restore(store: S, notifier: Arc<dyn Notifier>) -> Self {
        let cart = load_cart(&store).unwrap_or_else(|error| {
            warn!(%error, "discarding stored cart");

            Cart::new()
        });

        let token = load_token(&store).unwrap_or_else(|error| {
            warn!(%error, "discarding stored token");

            None
        });

        debug!(lines = cart.len(), logged_in = token.is_some(), "session restored");

        Self {
            store,
            notifier,
            catalog: CatalogSnapshot::default(),
            cart,
            token,
            profile: None,
            search: String::new(),
            selected_category: None,
        }
    }

    /// Adds one unit of `product`, returning the new quantity.
    pub fn add_line(&mut self, product: ProductId) -> Quantity {
        let quantity = self.cart.add_line(product);

        self.persist_cart();
        self.notifier.success(ADDED_TO_CART);

        quantity
    }

    /// Sets the quantity of `product`; zero or less removes the line.
    pub fn set_quantity(&mut self, product: ProductId, quantity: i64) {
        self.cart.set_quantity(product, quantity);
        self.persist_cart();
    }

    /// Removes the line for `product`, if any.
    pub fn remove_line(&mut self, product: &str) {
        self.cart.remove_line(product);
        self.persist_cart();
    }

    /// Empties the cart and deletes its stored copy.
    pub fn clear(&mut self) {
        self.cart.clear();

        if let Err(error) = self.store.remove(CART_KEY) {
            warn!(%error, "failed to remove stored cart");
        }
    }

    /// Total number of units in the cart.
    pub fn line_count(&self) -> u64 {
        self.cart.line_count()
    }

    /// Cart value at snapshot prices. Lines missing from the snapshot are
    /// skipped.
    pub fn cart_total(&self) -> Money<'static, Currency> {
        self.cart.total(&self.catalog)
    }

    /// Subtotal, delivery fee and total of the cart.
    pub fn cart_summary(&self) -> CartSummary {
        self.cart.summary(&self.catalog)
    }

    /// Current cart.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Current catalog snapshot.
    pub fn catalog(&self) -> &CatalogSnapshot {
        &self.catalog
    }

    /// Looks a product up in the snapshot.
    pub fn product(&self, id: &str) -> Option<&Product> {
        self.catalog.get(id)
    }

    /// Replaces the catalog snapshot.
    pub fn replace_catalog(&mut self, products: Vec<Product>) {
        info!(products = products.len(), "catalog refreshed");

        self.catalog = CatalogSnapshot::new(products);
    }

    /// Applies the outcome of a catalog fetch.
    ///
    /// On failure the previous snapshot is kept and an error is shown.
    pub fn apply_catalog(&mut self, result: Result<Vec<Product>, ApiError>) {
        match result {
            Ok(products) => self.replace_catalog(products),
            Err(error) => {
                warn!(%error, "catalog refresh failed; keeping previous snapshot");

                self.notifier.error(CATALOG_UNAVAILABLE);
            }
        }
    }

    /// Fetches the product list and replaces the snapshot.
    pub async fn refresh_catalog(&mut self, api: &dyn StorefrontApi) {
        let result = api.list_products().await;

        self.apply_catalog(result);
    }

    /// Stores the session token.
    pub fn set_token(&mut self, token: SessionToken) {
        info!("logged in");

        if let Err(error) = save_token(&mut self.store, Some(&token)) {
            warn!(%error, "failed to store session token");
        }

        self.token = Some(token);
    }

    /// Session token, if logged in.
    pub fn token(&self) -> Option<&SessionToken> {
        self.token.as_ref()
    }

    /// Whether a session token is present.
    pub fn is_logged_in(&self) -> bool {
        self.token.is_some()
    }

    /// Drops the token, the cart and the cached profile, in memory and in
    /// storage.
    pub fn logout(&mut self) {
        info!("logged out");

        self.token = None;
        self.profile = None;

        if let Err(error) = save_token(&mut self.store, None) {
            warn!(%error, "failed to remove stored session token");
        }

        self.clear();
    }

    /// Current search text.
    pub fn search(&self) -> &str {
        &self.search
    }

    /// Sets the search text.
    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
    }

    /// Picks a category for the collection view to start from.
    pub fn select_category(&mut self, category: impl Into<String>) {
        self.selected_category = Some(category.into());
    }

    /// Hands the selected category over to the collection view, once.
    pub fn take_selected_category(&mut self) -> Option<String> {
        self.selected_category.take()
    }

    /// Cached profile, if loaded.
    pub fn profile(&self) -> Option<&UserProfile> {
        self.profile.as_ref()
    }

    /// Caches the profile.
    pub fn set_profile(&mut self, profile: UserProfile) {
        self.profile = Some(profile);
    }

    /// Notification sink.
    pub fn notifier(&self) -> &dyn Notifier {
        self.notifier.as_ref()
    }

    /// Backing store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Gives the backing store back.
    pub fn into_store(self) -> S {
        self.store
    }

    fn persist_cart(&mut self) {
        if let Err(error) = save_cart(&mut self.store, &self.cart) {
            warn!(%error, "failed to store cart");
        }
    }
}

impl<S> std::fmt::Debug for Session<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("products", &self.catalog.len())
            .field("cart", &self.cart)
            .field("logged_in", &self.token.is_some())
            .finish_non_exhaustive()
    }
}
