//! Collection queries

use std::{cmp::Reverse, str::FromStr};

use rustc_hash::FxHashSet;
use thiserror::Error;

use crate::products::Product;

/// Ordering of a product collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    /// Backend order.
    #[default]
    Relevant,

    /// Cheapest first.
    PriceLowHigh,

    /// Most expensive first.
    PriceHighLow,
}

/// Unknown sort order name.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown sort order `{0}`; expected relevant, low-high or high-low")]
pub struct UnknownSortOrder(String);

impl FromStr for SortOrder {
    type Err = UnknownSortOrder;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "relevant" => Ok(Self::Relevant),
            "low-high" => Ok(Self::PriceLowHigh),
            "high-low" => Ok(Self::PriceHighLow),
            other => Err(UnknownSortOrder(other.to_owned())),
        }
    }
}

/// Filter and sort settings of the collection view.
///
/// Empty category sets and an empty search place no constraint.
#[derive(Debug, Clone, Default)]
pub struct CollectionQuery {
    search: String,
    categories: FxHashSet<String>,
    sub_categories: FxHashSet<String>,
    sort: SortOrder,
}

impl CollectionQuery {
    /// Creates a query matching every product.
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalised search text; empty when unset.
    pub fn search(&self) -> &str {
        &self.search
    }

    /// Sets the case-insensitive name search.
    #[must_use]
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into().trim().to_lowercase();
        self
    }

    /// Adds an accepted category.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.categories.insert(category.into());
        self
    }

    /// Adds an accepted sub-category.
    #[must_use]
    pub fn with_sub_category(mut self, sub_category: impl Into<String>) -> Self {
        self.sub_categories.insert(sub_category.into());
        self
    }

    /// Sets the sort order.
    #[must_use]
    pub fn sorted(mut self, sort: SortOrder) -> Self {
        self.sort = sort;
        self
    }

    /// Toggles a category checkbox: removes it when present, adds it otherwise.
    pub fn toggle_category(&mut self, category: &str) {
        if !self.categories.remove(category) {
            self.categories.insert(category.to_owned());
        }
    }

    /// Toggles a sub-category checkbox.
    pub fn toggle_sub_category(&mut self, sub_category: &str) {
        if !self.sub_categories.remove(sub_category) {
            self.sub_categories.insert(sub_category.to_owned());
        }
    }

    /// Whether a product passes the search and category filters.
    pub fn matches(&self, product: &Product) -> bool {
        (self.search.is_empty() || product.name.to_lowercase().contains(&self.search))
            && (self.categories.is_empty() || self.categories.contains(&product.category))
            && (self.sub_categories.is_empty()
                || self.sub_categories.contains(&product.sub_category))
    }

    pub(crate) fn apply<'p>(&self, products: &'p [Product]) -> Vec<&'p Product> {
        let mut matching: Vec<&Product> = products
            .iter()
            .filter(|product| self.matches(product))
            .collect();

        match self.sort {
            SortOrder::Relevant => {}
            SortOrder::PriceLowHigh => matching.sort_by_key(|product| product.price),
            SortOrder::PriceHighLow => matching.sort_by_key(|product| Reverse(product.price)),
        }

        matching
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use crate::{catalog::CatalogSnapshot, fixtures::product};

    use super::*;

    fn snapshot() -> CatalogSnapshot {
        let mut wired = product("wired", Decimal::new(2_000, 2));
        wired.name = "Wired Earbuds".to_owned();
        wired.category = "Headphones".to_owned();
        wired.sub_category = "Budget".to_owned();

        let mut studio = product("studio", Decimal::new(14_999, 2));
        studio.name = "Studio Headphones".to_owned();
        studio.category = "Headphones".to_owned();
        studio.sub_category = "High-end".to_owned();

        let mut tower = product("tower", Decimal::new(9_900, 2));
        tower.name = "Tower Speaker".to_owned();
        tower.category = "Speakers".to_owned();
        tower.sub_category = "High-end".to_owned();

        CatalogSnapshot::new(vec![wired, studio, tower])
    }

    fn ids(products: &[&Product]) -> Vec<String> {
        products.iter().map(|product| product.id.to_string()).collect()
    }

    #[test]
    fn empty_query_returns_everything_in_order() {
        let snapshot = snapshot();

        assert_eq!(
            ids(&snapshot.query(&CollectionQuery::new())),
            vec!["wired", "studio", "tower"]
        );
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let snapshot = snapshot();
        let query = CollectionQuery::new().with_search("  HEAD ");

        assert_eq!(ids(&snapshot.query(&query)), vec!["studio"]);
    }

    #[test]
    fn categories_and_sub_categories_intersect() {
        let snapshot = snapshot();
        let query = CollectionQuery::new()
            .with_category("Headphones")
            .with_sub_category("High-end");

        assert_eq!(ids(&snapshot.query(&query)), vec!["studio"]);
    }

    #[test]
    fn toggling_a_category_twice_clears_it() {
        let snapshot = snapshot();
        let mut query = CollectionQuery::new();

        query.toggle_category("Speakers");
        assert_eq!(ids(&snapshot.query(&query)), vec!["tower"]);

        query.toggle_category("Speakers");
        assert_eq!(snapshot.query(&query).len(), 3);
    }

    #[test]
    fn sorts_by_price() {
        let snapshot = snapshot();

        let ascending = CollectionQuery::new().sorted(SortOrder::PriceLowHigh);
        let descending = CollectionQuery::new().sorted(SortOrder::PriceHighLow);

        assert_eq!(
            ids(&snapshot.query(&ascending)),
            vec!["wired", "tower", "studio"]
        );
        assert_eq!(
            ids(&snapshot.query(&descending)),
            vec!["studio", "tower", "wired"]
        );
    }

    #[test]
    fn parses_sort_order_names() {
        assert_eq!("low-high".parse(), Ok(SortOrder::PriceLowHigh));
        assert_eq!("high-low".parse(), Ok(SortOrder::PriceHighLow));
        assert_eq!("relevant".parse(), Ok(SortOrder::Relevant));
        assert!("cheapest".parse::<SortOrder>().is_err());
    }
}
