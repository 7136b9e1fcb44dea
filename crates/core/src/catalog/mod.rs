//! Catalog snapshot.
//!
//! The most recently fetched copy of the product list. It is used for price
//! and name lookups only and is never treated as authoritative inventory.

use rustc_hash::FxHashMap;

use crate::products::{Product, ProductId};

pub mod query;

pub use query::{CollectionQuery, SortOrder};

/// In-memory product list with an identifier index.
#[derive(Debug, Clone, Default)]
pub struct CatalogSnapshot {
    products: Vec<Product>,
    index: FxHashMap<ProductId, usize>,
}

impl CatalogSnapshot {
    /// Builds a snapshot, keeping backend order. When an identifier repeats,
    /// lookups resolve to its last occurrence.
    pub fn new(products: Vec<Product>) -> Self {
        let index = products
            .iter()
            .enumerate()
            .map(|(position, product)| (product.id.clone(), position))
            .collect();

        Self { products, index }
    }

    /// Looks a product up by identifier.
    pub fn get(&self, id: &str) -> Option<&Product> {
        self.index
            .get(id)
            .and_then(|position| self.products.get(*position))
    }

    /// All products in backend order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Number of products.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Check if the snapshot holds no products.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Products matching a collection query, in the query's sort order.
    pub fn query<'c>(&'c self, query: &CollectionQuery) -> Vec<&'c Product> {
        query.apply(&self.products)
    }

    /// Bestseller products in backend order.
    pub fn bestsellers(&self, limit: usize) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|product| product.bestseller)
            .take(limit)
            .collect()
    }

    /// Most recently added products, newest first.
    pub fn latest(&self, limit: usize) -> Vec<&Product> {
        self.products.iter().rev().take(limit).collect()
    }

    /// Products sharing the category and sub-category of `product`, excluding
    /// `product` itself.
    pub fn related(&self, product: &Product, limit: usize) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|candidate| {
                candidate.id != product.id
                    && candidate.category == product.category
                    && candidate.sub_category == product.sub_category
            })
            .take(limit)
            .collect()
    }
}

impl From<Vec<Product>> for CatalogSnapshot {
    fn from(products: Vec<Product>) -> Self {
        Self::new(products)
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use crate::fixtures::{product, product_in};

    use super::*;

    fn ids<'p>(products: &[&'p Product]) -> Vec<&'p str> {
        products.iter().map(|product| product.id.as_str()).collect()
    }

    #[test]
    fn get_finds_by_identifier() {
        let snapshot = CatalogSnapshot::new(vec![
            product("a", Decimal::ONE),
            product("b", Decimal::TWO),
        ]);

        assert_eq!(snapshot.get("b").map(|p| p.price), Some(Decimal::TWO));
        assert!(snapshot.get("zzz").is_none());
    }

    #[test]
    fn bestsellers_keep_backend_order() {
        let mut first = product("a", Decimal::ONE);
        first.bestseller = true;
        let mut third = product("c", Decimal::ONE);
        third.bestseller = true;
        let snapshot = CatalogSnapshot::new(vec![first, product("b", Decimal::ONE), third]);

        assert_eq!(ids(&snapshot.bestsellers(5)), vec!["a", "c"]);
        assert_eq!(ids(&snapshot.bestsellers(1)), vec!["a"]);
    }

    #[test]
    fn latest_is_newest_first() {
        let snapshot = CatalogSnapshot::new(vec![
            product("a", Decimal::ONE),
            product("b", Decimal::ONE),
            product("c", Decimal::ONE),
        ]);

        assert_eq!(ids(&snapshot.latest(2)), vec!["c", "b"]);
    }

    #[test]
    fn related_matches_category_and_sub_category() {
        let base = product_in("a", "Headphones", "High-end");
        let snapshot = CatalogSnapshot::new(vec![
            base.clone(),
            product_in("b", "Headphones", "High-end"),
            product_in("c", "Headphones", "Budget"),
            product_in("d", "Speakers", "High-end"),
            product_in("e", "Headphones", "High-end"),
        ]);

        assert_eq!(ids(&snapshot.related(&base, 4)), vec!["b", "e"]);
    }
}
