//! Test fixtures

use rust_decimal::Decimal;

use crate::{
    catalog::CatalogSnapshot,
    products::{Product, ProductId},
};

/// Product with the given identifier and price and placeholder details.
pub(crate) fn product(id: &str, price: Decimal) -> Product {
    Product {
        id: ProductId::new(id),
        name: format!("Product {id}"),
        description: String::new(),
        price,
        category: "Headphones".to_owned(),
        sub_category: "High-end".to_owned(),
        brand: String::new(),
        color: String::new(),
        images: [format!("https://cdn.example/{id}.png")].into_iter().collect(),
        bestseller: false,
    }
}

/// Unit-priced product in the given category and sub-category.
pub(crate) fn product_in(id: &str, category: &str, sub_category: &str) -> Product {
    Product {
        category: category.to_owned(),
        sub_category: sub_category.to_owned(),
        ..product(id, Decimal::ONE)
    }
}

/// Snapshot over the given products.
pub(crate) fn catalog(products: Vec<Product>) -> CatalogSnapshot {
    CatalogSnapshot::new(products)
}
