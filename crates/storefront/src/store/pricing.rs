//! Cart total computation.

use cart_sidebar_core::{CartItem, Money, TaxedMoney};
use rust_decimal::Decimal;

use crate::config::PricingConfig;

/// Aggregate prices of a cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartTotals {
    /// Sum of line totals.
    pub subtotal: TaxedMoney,
    /// Shipping charge. `None` for an empty cart.
    pub shipping: Option<TaxedMoney>,
    /// Promotion (negative amount). `None` when no promotion applies.
    pub discount: Option<TaxedMoney>,
    /// Subtotal plus shipping plus discount.
    pub total: TaxedMoney,
}

/// Summarize a cart under the given pricing rules.
///
/// Lines without a resolved total contribute nothing to the subtotal.
#[must_use]
pub fn summarize(rules: &PricingConfig, items: &[CartItem]) -> CartTotals {
    let zero = TaxedMoney::untaxed(Money::zero(rules.currency));

    let subtotal = items
        .iter()
        .filter_map(|item| item.total_price.as_ref())
        .fold(zero, |acc, line| add(rules, &acc, line));

    if items.is_empty() {
        return CartTotals {
            subtotal,
            shipping: None,
            discount: None,
            total: subtotal,
        };
    }

    let free_shipping = rules
        .free_shipping_threshold
        .is_some_and(|threshold| subtotal.gross.amount >= threshold);
    let shipping_amount = if free_shipping {
        Decimal::ZERO
    } else {
        rules.shipping_flat_rate
    };
    let shipping = TaxedMoney::untaxed(Money::new(shipping_amount, rules.currency));

    let discount = rules
        .discount_percent
        .filter(|percent| percent.is_sign_positive() && !percent.is_zero())
        .map(|percent| {
            let amount = (subtotal.gross.amount * percent / Decimal::ONE_HUNDRED).round_dp(2);
            TaxedMoney::untaxed(Money::new(-amount, rules.currency))
        });

    let mut total = add(rules, &subtotal, &shipping);
    if let Some(discount) = &discount {
        total = add(rules, &total, discount);
    }

    CartTotals {
        subtotal,
        shipping: Some(shipping),
        discount,
        total,
    }
}

/// Add two taxed amounts in the cart currency.
fn add(rules: &PricingConfig, a: &TaxedMoney, b: &TaxedMoney) -> TaxedMoney {
    TaxedMoney::new(
        Money::new(a.gross.amount + b.gross.amount, rules.currency),
        Money::new(a.net.amount + b.net.amount, rules.currency),
    )
}

#[cfg(test)]
mod tests {
    use cart_sidebar_core::CurrencyCode;

    use super::*;

    fn line(cents: i64) -> CartItem {
        CartItem {
            id: None,
            variant: None,
            quantity: 1,
            total_price: Some(TaxedMoney::untaxed(Money::from_cents(
                cents,
                CurrencyCode::USD,
            ))),
        }
    }

    fn gross(totals: Option<&TaxedMoney>) -> Option<Decimal> {
        totals.map(|t| t.gross.amount)
    }

    #[test]
    fn test_empty_cart_has_no_shipping() {
        let rules = PricingConfig {
            shipping_flat_rate: Decimal::from(5),
            ..PricingConfig::default()
        };
        let totals = summarize(&rules, &[]);
        assert!(totals.subtotal.is_zero());
        assert!(totals.shipping.is_none());
        assert!(totals.total.is_zero());
    }

    #[test]
    fn test_flat_shipping() {
        let rules = PricingConfig {
            shipping_flat_rate: Decimal::new(499, 2),
            ..PricingConfig::default()
        };
        let totals = summarize(&rules, &[line(1000), line(2550)]);
        assert_eq!(totals.subtotal.gross.amount, Decimal::new(3550, 2));
        assert_eq!(gross(totals.shipping.as_ref()), Some(Decimal::new(499, 2)));
        assert_eq!(totals.total.gross.amount, Decimal::new(4049, 2));
        assert!(totals.discount.is_none());
    }

    #[test]
    fn test_free_shipping_threshold() {
        let rules = PricingConfig {
            shipping_flat_rate: Decimal::from(5),
            free_shipping_threshold: Some(Decimal::from(30)),
            ..PricingConfig::default()
        };
        let totals = summarize(&rules, &[line(3000)]);
        assert!(totals.shipping.is_some_and(|s| s.is_zero()));
        assert_eq!(totals.total.gross.amount, Decimal::from(30));
    }

    #[test]
    fn test_percent_discount_is_negative() {
        let rules = PricingConfig {
            discount_percent: Some(Decimal::from(10)),
            ..PricingConfig::default()
        };
        let totals = summarize(&rules, &[line(4000)]);
        assert_eq!(gross(totals.discount.as_ref()), Some(Decimal::from(-4)));
        assert_eq!(totals.total.gross.amount, Decimal::from(36));
    }

    #[test]
    fn test_unresolved_lines_are_skipped() {
        let mut unresolved = line(1000);
        unresolved.total_price = None;
        let totals = summarize(&PricingConfig::default(), &[line(1000), unresolved]);
        assert_eq!(totals.subtotal.gross.amount, Decimal::from(10));
    }
}
