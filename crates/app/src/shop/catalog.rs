//! Catalog views: collection, product detail, refresh.

use std::sync::Arc;

use storefront::{
    catalog::CollectionQuery,
    products::{Product, ProductId},
    storage::KeyValueStore,
};

use crate::{
    api::{ApiError, StorefrontApi},
    errors::{WorkflowError, report},
    scope::ViewScope,
    session::Session,
};

/// Outcome of a background catalog fetch.
pub type CatalogFetch = Result<Vec<Product>, ApiError>;

/// Number of products in the "latest collection" strip.
pub const LATEST_LIMIT: usize = 10;

/// Number of products in the "best sellers" strip.
pub const BESTSELLER_LIMIT: usize = 5;

/// Number of products suggested under a product page.
pub const RELATED_LIMIT: usize = 5;

/// Starts a catalog fetch owned by `scope`.
pub fn spawn_refresh(scope: &mut ViewScope<CatalogFetch>, api: Arc<dyn StorefrontApi>) {
    scope.spawn(async move { api.list_products().await });
}

/// Waits for the scope's next catalog fetch and applies it. Returns `false`
/// when nothing was pending.
pub async fn apply_next<S: KeyValueStore>(
    session: &mut Session<S>,
    scope: &mut ViewScope<CatalogFetch>,
) -> bool {
    match scope.next().await {
        Some(fetch) => {
            session.apply_catalog(fetch);
            true
        }
        None => false,
    }
}

/// Products shown by the collection view.
///
/// A category picked elsewhere is consumed and added to the filter, and the
/// session search text applies when the query has none.
pub fn collection<S: KeyValueStore>(
    session: &mut Session<S>,
    mut query: CollectionQuery,
) -> Vec<&Product> {
    if let Some(category) = session.take_selected_category() {
        query = query.with_category(category);
    }

    if query.search().is_empty() && !session.search().is_empty() {
        query = query.with_search(session.search());
    }

    session.catalog().query(&query)
}

/// Product page: the product and related suggestions.
///
/// # Errors
///
/// Returns [`WorkflowError::ProductUnavailable`] if the product is not in the
/// snapshot.
pub fn product_page<'s, S: KeyValueStore>(
    session: &'s Session<S>,
    id: &ProductId,
) -> Result<(&'s Product, Vec<&'s Product>), WorkflowError> {
    let product = session
        .product(id.as_str())
        .ok_or_else(|| WorkflowError::ProductUnavailable(id.clone()))?;

    Ok((product, session.catalog().related(product, RELATED_LIMIT)))
}

/// Adds the product to the cart on behalf of a logged-in customer, ready for
/// checkout.
///
/// # Errors
///
/// Returns [`WorkflowError::NotLoggedIn`] without a session token, or
/// [`WorkflowError::ProductUnavailable`] if the product is not in the snapshot.
pub fn buy_now<S: KeyValueStore>(
    session: &mut Session<S>,
    id: &ProductId,
) -> Result<(), WorkflowError> {
    let result = if session.token().is_none() {
        Err(WorkflowError::NotLoggedIn)
    } else if session.product(id.as_str()).is_none() {
        Err(WorkflowError::ProductUnavailable(id.clone()))
    } else {
        session.add_line(id.clone());
        Ok(())
    };

    report(session.notifier(), result)
}

#[cfg(test)]
mod tests {
    use std::{
        sync::atomic::{AtomicUsize, Ordering},
        time::Duration,
    };

    use async_trait::async_trait;
    use rust_decimal::Decimal;
    use storefront::{
        admin::{ProductDraft, ProductUpdate},
        checkout::NewOrder,
        orders::{Order, OrderId, OrderStatus},
        products::ProductImages,
        profile::UserProfile,
        storage::MemoryStore,
        token::SessionToken,
    };
    use testresult::TestResult;

    use crate::{api::MockStorefrontApi, notify::Toasts};

    use super::*;

    fn product(id: &str, category: &str) -> Product {
        Product {
            id: ProductId::from(id),
            name: format!("{id} headphones"),
            description: String::new(),
            price: Decimal::new(4_999, 2),
            category: category.to_owned(),
            sub_category: "High-end".to_owned(),
            brand: String::new(),
            color: String::new(),
            images: ProductImages::new(),
            bestseller: false,
        }
    }

    fn session() -> (Session<MemoryStore>, Arc<Toasts>) {
        let toasts = Arc::new(Toasts::new());

        (Session::restore(MemoryStore::new(), toasts.clone()), toasts)
    }

    /// Backend whose product list never arrives.
    #[derive(Debug, Default)]
    struct StalledApi {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl StorefrontApi for StalledApi {
        async fn list_products(&self) -> Result<Vec<Product>, ApiError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_secs(3600)).await;

            Ok(vec![product("late", "Headphones")])
        }

        async fn get_product(&self, _: &ProductId) -> Result<Product, ApiError> {
            Err(ApiError::Rejected {
                status: 404,
                message: None,
            })
        }

        async fn add_product(
            &self,
            _: &SessionToken,
            _: &ProductDraft,
        ) -> Result<Option<String>, ApiError> {
            Ok(None)
        }

        async fn update_product(
            &self,
            _: &SessionToken,
            _: &ProductId,
            _: &ProductUpdate,
        ) -> Result<Option<String>, ApiError> {
            Ok(None)
        }

        async fn remove_product(
            &self,
            _: &SessionToken,
            _: &ProductId,
        ) -> Result<Option<String>, ApiError> {
            Ok(None)
        }

        async fn get_profile(&self, _: &SessionToken) -> Result<UserProfile, ApiError> {
            Ok(UserProfile::default())
        }

        async fn update_profile(
            &self,
            _: &SessionToken,
            _: &UserProfile,
        ) -> Result<Option<String>, ApiError> {
            Ok(None)
        }

        async fn list_user_orders(&self, _: &SessionToken) -> Result<Vec<Order>, ApiError> {
            Ok(Vec::new())
        }

        async fn list_all_orders(&self, _: &SessionToken) -> Result<Vec<Order>, ApiError> {
            Ok(Vec::new())
        }

        async fn create_order(
            &self,
            _: &SessionToken,
            _: &NewOrder,
        ) -> Result<Option<String>, ApiError> {
            Ok(None)
        }

        async fn update_order_status(
            &self,
            _: &SessionToken,
            _: &OrderId,
            _: &OrderStatus,
        ) -> Result<Option<String>, ApiError> {
            Ok(None)
        }

        async fn update_order_address(
            &self,
            _: &SessionToken,
            _: &OrderId,
            _: &str,
        ) -> Result<Option<String>, ApiError> {
            Ok(None)
        }

        async fn delete_order(
            &self,
            _: &SessionToken,
            _: &OrderId,
        ) -> Result<Option<String>, ApiError> {
            Ok(None)
        }
    }

    #[tokio::test]
    async fn scoped_refresh_is_applied() {
        let (mut session, _) = session();

        let mut api = MockStorefrontApi::new();
        api.expect_list_products()
            .times(1)
            .returning(|| Ok(vec![product("a", "Headphones")]));

        let mut scope = ViewScope::new("collection");
        spawn_refresh(&mut scope, Arc::new(api));

        assert!(apply_next(&mut session, &mut scope).await);
        assert!(session.product("a").is_some());
        assert!(!apply_next(&mut session, &mut scope).await);
    }

    #[tokio::test]
    async fn dropped_scope_discards_in_flight_refresh() {
        let (mut session, toasts) = session();
        session.replace_catalog(vec![product("a", "Headphones")]);

        let api = Arc::new(StalledApi::default());

        let mut scope = ViewScope::new("collection");
        spawn_refresh(&mut scope, api.clone());

        while api.calls.load(Ordering::SeqCst) == 0 {
            tokio::task::yield_now().await;
        }

        drop(scope);

        for _ in 0..100 {
            if Arc::strong_count(&api) == 1 {
                break;
            }

            tokio::task::yield_now().await;
        }

        assert_eq!(Arc::strong_count(&api), 1);
        assert!(session.product("a").is_some());
        assert!(session.product("late").is_none());
        assert!(toasts.drain().is_empty());
    }

    #[test]
    fn selected_category_filters_collection_once() {
        let (mut session, _) = session();
        session.replace_catalog(vec![product("a", "Headphones"), product("b", "Earbuds")]);
        session.select_category("Earbuds");

        let first: Vec<_> = collection(&mut session, CollectionQuery::new())
            .into_iter()
            .map(|product| product.id.as_str().to_owned())
            .collect();

        assert_eq!(first, vec!["b"]);
        assert_eq!(collection(&mut session, CollectionQuery::new()).len(), 2);
    }

    #[test]
    fn session_search_applies_to_collection() {
        let (mut session, _) = session();
        session.replace_catalog(vec![
            product("alpha", "Headphones"),
            product("beta", "Headphones"),
        ]);
        session.set_search("ALP");

        assert_eq!(collection(&mut session, CollectionQuery::new()).len(), 1);
    }

    #[test]
    fn buy_now_requires_login() {
        let (mut session, toasts) = session();
        session.replace_catalog(vec![product("a", "Headphones")]);

        let result = buy_now(&mut session, &ProductId::from("a"));

        assert!(matches!(result, Err(WorkflowError::NotLoggedIn)));
        assert!(session.cart().is_empty());
        assert_eq!(toasts.drain().len(), 1);
    }

    #[test]
    fn buy_now_adds_available_product() -> TestResult {
        let (mut session, _) = session();
        session.replace_catalog(vec![product("a", "Headphones")]);
        session.set_token(SessionToken::new("tok").ok_or("Expected a token")?);

        buy_now(&mut session, &ProductId::from("a"))?;

        assert_eq!(session.line_count(), 1);

        Ok(())
    }

    #[test]
    fn product_page_lists_related_products() -> TestResult {
        let (mut session, _) = session();
        session.replace_catalog(vec![
            product("a", "Headphones"),
            product("b", "Headphones"),
            product("c", "Earbuds"),
        ]);

        let (found, related) = product_page(&session, &ProductId::from("a"))?;

        assert_eq!(found.id.as_str(), "a");
        assert_eq!(related.len(), 1);

        Ok(())
    }
}
