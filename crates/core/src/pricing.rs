//! Pricing

use num_traits::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use rusty_money::{
    Money,
    iso::{self, Currency},
};

/// Currency every price in the shop is expressed in.
pub fn currency() -> &'static Currency {
    iso::USD
}

/// Symbol shown next to amounts.
pub const CURRENCY_SYMBOL: &str = "$";

/// Flat delivery fee, in minor units.
pub const DELIVERY_FEE_MINOR: i64 = 1_000;

/// Converts a decimal amount into money, rounding half-away-from-zero to the
/// currency's minor unit.
pub fn money(amount: Decimal) -> Money<'static, Currency> {
    Money::from_minor(minor_units(amount), currency())
}

/// Converts a decimal amount into minor units of [`currency`], saturating at
/// the bounds of `i64`.
pub fn minor_units(amount: Decimal) -> i64 {
    let scale = Decimal::from(10_i64.pow(currency().exponent));

    amount
        .checked_mul(scale)
        .and_then(|scaled| {
            scaled
                .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
                .to_i64()
        })
        .unwrap_or_else(|| saturated(amount))
}

/// Minor units of `quantity` items at `price` each, saturating like
/// [`minor_units`].
pub fn line_minor_units(price: Decimal, quantity: u32) -> i64 {
    price
        .checked_mul(Decimal::from(quantity))
        .map_or_else(|| saturated(price), minor_units)
}

fn saturated(amount: Decimal) -> i64 {
    if amount.is_sign_negative() {
        i64::MIN
    } else {
        i64::MAX
    }
}

/// Flat delivery fee as money.
pub fn delivery_fee() -> Money<'static, Currency> {
    Money::from_minor(DELIVERY_FEE_MINOR, currency())
}

/// Totals shown in the cart summary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CartSummary {
    /// Sum of the priced cart lines
    pub subtotal: Money<'static, Currency>,

    /// Delivery fee
    pub delivery_fee: Money<'static, Currency>,

    /// Amount due; zero while the cart has no priced lines
    pub total: Money<'static, Currency>,
}

impl CartSummary {
    /// Builds the summary for a subtotal given in minor units.
    pub fn from_subtotal_minor(subtotal: i64) -> Self {
        let total = if subtotal == 0 {
            0
        } else {
            subtotal.saturating_add(DELIVERY_FEE_MINOR)
        };

        Self {
            subtotal: Money::from_minor(subtotal, currency()),
            delivery_fee: delivery_fee(),
            total: Money::from_minor(total, currency()),
        }
    }
}
