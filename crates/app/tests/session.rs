//! Session behaviour over on-disk storage.

use std::sync::Arc;

use rust_decimal::Decimal;
use rusty_money::{Money, iso::USD};
use storefront::{
    products::{Product, ProductId, ProductImages},
    storage::{CART_KEY, FileStore, KeyValueStore, TOKEN_KEY},
    token::SessionToken,
};
use storefront_app::{
    api::{ApiError, MockStorefrontApi},
    notify::{ToastKind, Toasts},
    scope::ViewScope,
    session::Session,
    shop::catalog::{apply_next, spawn_refresh},
};
use testresult::TestResult;

fn product(id: &str, price: Decimal) -> Product {
    Product {
        id: ProductId::from(id),
        name: id.to_owned(),
        description: String::new(),
        price,
        category: "Headphones".to_owned(),
        sub_category: "High-end".to_owned(),
        brand: String::new(),
        color: String::new(),
        images: ProductImages::new(),
        bestseller: false,
    }
}

#[test]
fn cart_rehydrates_after_restart() -> TestResult {
    let dir = tempfile::tempdir()?;

    {
        let mut session = Session::restore(FileStore::open(dir.path())?, Arc::new(Toasts::new()));

        session.add_line(ProductId::from("A"));
        session.add_line(ProductId::from("A"));
        session.add_line(ProductId::from("B"));
    }

    let session = Session::restore(FileStore::open(dir.path())?, Arc::new(Toasts::new()));

    assert_eq!(session.line_count(), 3);
    assert_eq!(
        session.cart().quantity("A").map(|quantity| quantity.get()),
        Some(2)
    );

    Ok(())
}

#[test]
fn logout_wipes_stored_state() -> TestResult {
    let dir = tempfile::tempdir()?;
    let mut session = Session::restore(FileStore::open(dir.path())?, Arc::new(Toasts::new()));

    session.set_token(SessionToken::new("tok123").ok_or("Expected a token")?);
    session.add_line(ProductId::from("A"));
    session.logout();

    let store = FileStore::open(dir.path())?;

    assert!(store.get(TOKEN_KEY)?.is_none());
    assert!(store.get(CART_KEY)?.is_none());

    let restored = Session::restore(store, Arc::new(Toasts::new()));

    assert!(!restored.is_logged_in());
    assert_eq!(restored.line_count(), 0);

    Ok(())
}

#[test]
fn corrupt_stored_cart_starts_empty() -> TestResult {
    let dir = tempfile::tempdir()?;
    let mut store = FileStore::open(dir.path())?;

    store.set(CART_KEY, "[1, 2")?;

    let session = Session::restore(store, Arc::new(Toasts::new()));

    assert!(session.cart().is_empty());

    Ok(())
}

#[tokio::test]
async fn stale_snapshot_prices_cart_after_failed_refresh() -> TestResult {
    let dir = tempfile::tempdir()?;
    let toasts = Arc::new(Toasts::new());
    let mut session = Session::restore(FileStore::open(dir.path())?, toasts.clone());

    let mut api = MockStorefrontApi::new();
    let mut calls = 0;
    api.expect_list_products().times(2).returning(move || {
        calls += 1;

        if calls == 1 {
            Ok(vec![product("A", Decimal::new(999, 2))])
        } else {
            Err(ApiError::Rejected {
                status: 503,
                message: None,
            })
        }
    });

    let api = Arc::new(api);

    let mut scope = ViewScope::new("home");
    spawn_refresh(&mut scope, api.clone());
    apply_next(&mut session, &mut scope).await;

    session.set_quantity(ProductId::from("A"), 3);

    spawn_refresh(&mut scope, api.clone());
    apply_next(&mut session, &mut scope).await;

    let summary = session.cart_summary();

    assert_eq!(session.catalog().len(), 1);
    assert_eq!(summary.subtotal, Money::from_minor(2_997, USD));
    assert_eq!(summary.total, Money::from_minor(3_997, USD));

    let kinds: Vec<_> = toasts.drain().into_iter().map(|toast| toast.kind).collect();

    assert_eq!(kinds, vec![ToastKind::Error]);

    Ok(())
}
