//! Cart

use std::{collections::BTreeMap, num::NonZeroU32};

use rusty_money::{Money, iso::Currency};
use serde::{Deserialize, Serialize};

use crate::{
    catalog::CatalogSnapshot,
    pricing::{self, CartSummary},
    products::ProductId,
};

/// Quantity of a cart line. Zero is unrepresentable: a line either exists with
/// a positive quantity or is absent.
pub type Quantity = NonZeroU32;

/// Shopping cart: product identifier to quantity.
///
/// Serializes as a flat JSON object, e.g. `{"p1": 2, "p2": 1}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    lines: BTreeMap<ProductId, Quantity>,
}

impl Cart {
    /// Creates an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one unit of a product, inserting the line when absent.
    ///
    /// Returns the new quantity.
    pub fn add_line(&mut self, product: ProductId) -> Quantity {
        let quantity = self
            .lines
            .entry(product)
            .and_modify(|quantity| *quantity = quantity.saturating_add(1))
            .or_insert(NonZeroU32::MIN);

        *quantity
    }

    /// Sets the quantity of a line. Any value below one removes the line.
    ///
    /// Values above `u32::MAX` are clamped.
    pub fn set_quantity(&mut self, product: ProductId, quantity: i64) {
        let clamped = u32::try_from(quantity.max(0)).unwrap_or(u32::MAX);

        match NonZeroU32::new(clamped) {
            Some(quantity) => {
                self.lines.insert(product, quantity);
            }
            None => {
                self.lines.remove(&product);
            }
        }
    }

    /// Removes a line. Removing an absent line is a no-op.
    pub fn remove_line(&mut self, product: &str) {
        self.lines.remove(product);
    }

    /// Empties the cart.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Quantity of a product, if it is in the cart.
    pub fn quantity(&self, product: &str) -> Option<Quantity> {
        self.lines.get(product).copied()
    }

    /// Sum of all quantities (the cart badge).
    pub fn line_count(&self) -> u64 {
        self.lines.values().map(|quantity| u64::from(quantity.get())).sum()
    }

    /// Number of distinct products in the cart.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Iterates over lines in product identifier order.
    pub fn lines(&self) -> impl Iterator<Item = (&ProductId, Quantity)> {
        self.lines.iter().map(|(product, quantity)| (product, *quantity))
    }

    /// Lines whose product is missing from the snapshot.
    pub fn unpriced_lines<'c>(
        &'c self,
        catalog: &'c CatalogSnapshot,
    ) -> impl Iterator<Item = &'c ProductId> {
        self.lines
            .keys()
            .filter(move |product| catalog.get(product.as_str()).is_none())
    }

    /// Subtotal in minor units over lines found in the snapshot. Lines for
    /// products missing from the snapshot contribute nothing.
    pub fn subtotal_minor(&self, catalog: &CatalogSnapshot) -> i64 {
        self.lines
            .iter()
            .filter_map(|(product, quantity)| {
                let product = catalog.get(product.as_str())?;

                Some(pricing::line_minor_units(product.price, quantity.get()))
            })
            .fold(0_i64, i64::saturating_add)
    }

    /// Total of the priced lines.
    pub fn total(&self, catalog: &CatalogSnapshot) -> Money<'static, Currency> {
        Money::from_minor(self.subtotal_minor(catalog), pricing::currency())
    }

    /// Subtotal, delivery fee and amount due.
    pub fn summary(&self, catalog: &CatalogSnapshot) -> CartSummary {
        CartSummary::from_subtotal_minor(self.subtotal_minor(catalog))
    }
}

impl FromIterator<(ProductId, Quantity)> for Cart {
    fn from_iter<I: IntoIterator<Item = (ProductId, Quantity)>>(iter: I) -> Self {
        Self {
            lines: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use crate::fixtures::{catalog, product};

    use super::*;

    fn qty(value: u32) -> Option<Quantity> {
        NonZeroU32::new(value)
    }

    #[test]
    fn add_line_inserts_then_increments() {
        let mut cart = Cart::new();

        assert_eq!(cart.add_line("a".into()).get(), 1);
        assert_eq!(cart.add_line("a".into()).get(), 2);
        assert_eq!(cart.quantity("a"), qty(2));
    }

    #[test]
    fn set_quantity_zero_matches_remove_line() {
        let mut removed = Cart::new();
        removed.add_line("a".into());
        removed.add_line("b".into());
        let mut zeroed = removed.clone();

        removed.remove_line("a");
        zeroed.set_quantity("a".into(), 0);

        assert_eq!(removed, zeroed);
        assert_eq!(zeroed.quantity("a"), None);
    }

    #[test]
    fn negative_quantity_removes_line() {
        let mut cart = Cart::new();
        cart.set_quantity("a".into(), 4);
        cart.set_quantity("a".into(), -3);

        assert!(cart.is_empty());
    }

    #[test]
    fn remove_absent_line_is_noop() {
        let mut cart = Cart::new();
        cart.add_line("a".into());

        cart.remove_line("missing");

        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn mixed_mutations_never_leave_non_positive_lines() {
        let mut cart = Cart::new();
        let operations: [(&str, i64); 8] = [
            ("a", 3),
            ("b", -1),
            ("a", 0),
            ("c", 1),
            ("c", i64::MIN),
            ("d", i64::MAX),
            ("e", 2),
            ("e", -2),
        ];

        for (product, quantity) in operations {
            cart.add_line(product.into());
            cart.set_quantity(product.into(), quantity);
        }

        assert!(cart.lines().all(|(_, quantity)| quantity.get() > 0));
        assert_eq!(cart.quantity("d"), qty(u32::MAX));
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn line_count_sums_quantities() {
        let mut cart = Cart::new();
        cart.set_quantity("a".into(), 2);
        cart.set_quantity("b".into(), 5);

        assert_eq!(cart.line_count(), 7);

        cart.clear();

        assert_eq!(cart.line_count(), 0);
    }

    #[test]
    fn empty_cart_total_is_zero() {
        let cart = Cart::new();

        assert_eq!(
            cart.total(&catalog(vec![])),
            Money::from_minor(0, pricing::currency())
        );
    }

    #[test]
    fn total_multiplies_price_by_quantity() {
        let snapshot = catalog(vec![product("a", Decimal::new(999, 2))]);
        let mut cart = Cart::new();
        cart.set_quantity("a".into(), 3);

        assert_eq!(
            cart.total(&snapshot),
            Money::from_minor(2_997, pricing::currency())
        );
    }

    #[test]
    fn total_skips_products_missing_from_snapshot() {
        let snapshot = catalog(vec![product("a", Decimal::new(250, 2))]);
        let mut cart = Cart::new();
        cart.set_quantity("a".into(), 2);
        cart.set_quantity("deleted".into(), 7);

        assert_eq!(
            cart.total(&snapshot),
            Money::from_minor(500, pricing::currency())
        );
        assert_eq!(
            cart.unpriced_lines(&snapshot).collect::<Vec<_>>(),
            vec![&ProductId::new("deleted")]
        );
    }

    #[test]
    fn huge_line_total_saturates() {
        let snapshot = catalog(vec![
            product("a", Decimal::from(10_i64.pow(18))),
            product("b", Decimal::ONE),
        ]);
        let mut cart = Cart::new();
        cart.set_quantity("a".into(), i64::from(u32::MAX));
        cart.set_quantity("b".into(), 1);

        assert_eq!(cart.subtotal_minor(&snapshot), i64::MAX);
        assert_eq!(
            cart.summary(&snapshot).total,
            Money::from_minor(i64::MAX, pricing::currency())
        );
    }

    #[test]
    fn serializes_as_flat_object() -> TestResult {
        let mut cart = Cart::new();
        cart.set_quantity("A".into(), 2);
        cart.set_quantity("B".into(), 1);

        let json = serde_json::to_string(&cart)?;

        assert_eq!(json, r#"{"A":2,"B":1}"#);
        assert_eq!(serde_json::from_str::<Cart>(&json)?, cart);

        Ok(())
    }

    #[test]
    fn zero_quantity_in_json_is_rejected() {
        let result = serde_json::from_str::<Cart>(r#"{"A":0}"#);

        assert!(result.is_err(), "zero quantities must not deserialize");
    }
}
