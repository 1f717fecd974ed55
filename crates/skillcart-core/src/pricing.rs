//! # Pricing Module
//!
//! The pricing engine: subtotal, tax, discount, total.
//!
//! ## Computation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      price_cart()                                       │
//! │                                                                         │
//! │  line items ──► validate ──► items_price = Σ unit_price                 │
//! │                                   │                                     │
//! │                                   ├──► tax_price = round(items × rate)  │
//! │                                   │                                     │
//! │  discount ──► resolve(now) ───────┤                                     │
//! │    │                              ▼                                     │
//! │    │   Absent     ──► 0      discount_amount                            │
//! │    │   Expired    ──► 0           │                                     │
//! │    │   Percentage ──► round(items × pct)                                │
//! │    │   Fixed      ──► min(amount, items_price)                          │
//! │    │                              │                                     │
//! │    │                              ▼                                     │
//! │    │         total_price = max(0, items + tax − discount)               │
//! │    │                              │                                     │
//! │    └──────────────────────────────▼                                     │
//! │                            PriceBreakdown                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Purity Contract
//! `price_cart` performs no I/O and reads no clock: the caller resolves the
//! cart and discount beforehand and injects `now`. Two calls with identical
//! inputs return identical output, which is what lets the checkout layer
//! recompute and re-verify a total immediately before charging.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::discount::{Discount, DiscountKind};
use crate::error::CoreResult;
use crate::money::{Money, TaxRate};
use crate::types::LineItem;
use crate::validation::{validate_percentage_bps, validate_price_cents, validate_tax_rate_bps};

// =============================================================================
// Price Breakdown
// =============================================================================

/// The four display values of a priced cart.
///
/// All amounts are non-negative; `total_price` is the amount the payment
/// collaborator charges, and must never be recomputed from anything but the
/// same inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PriceBreakdown {
    /// Sum of line-item prices before tax and discount.
    pub items_price: Money,

    /// Tax on the item subtotal.
    pub tax_price: Money,

    /// Amount subtracted by the applied discount (0 when absent/expired).
    pub discount_amount: Money,

    /// `max(0, items_price + tax_price - discount_amount)`.
    pub total_price: Money,
}

impl PriceBreakdown {
    /// An all-zero breakdown, the result of pricing an empty cart with no
    /// discount.
    pub fn zero() -> Self {
        PriceBreakdown {
            items_price: Money::zero(),
            tax_price: Money::zero(),
            discount_amount: Money::zero(),
            total_price: Money::zero(),
        }
    }
}

// =============================================================================
// Discount Resolution
// =============================================================================

/// What the optional discount resolved to at pricing time.
///
/// The match in [`price_cart`] is total over these four cases; a falsy-value
/// check cannot silently skip one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ResolvedDiscount {
    /// No discount was submitted.
    Absent,
    /// A discount was submitted but `valid_until <= now`.
    Expired,
    /// Active percentage discount, in basis points.
    Percentage { basis_points: u32 },
    /// Active fixed-amount discount.
    Fixed { amount: Money },
}

/// Classifies the optional discount at the injected instant.
///
/// Expiry is checked before anything else: an expired discount is inert
/// regardless of its kind or amount, so a stale code can never block a
/// checkout even if its stored data is out of range.
fn resolve_discount(discount: Option<&Discount>, now: DateTime<Utc>) -> ResolvedDiscount {
    match discount {
        None => ResolvedDiscount::Absent,
        Some(d) if d.is_expired(now) => ResolvedDiscount::Expired,
        Some(d) => match d.kind {
            DiscountKind::Percentage { basis_points } => {
                ResolvedDiscount::Percentage { basis_points }
            }
            DiscountKind::Fixed { amount } => ResolvedDiscount::Fixed { amount },
        },
    }
}

// =============================================================================
// The Pricing Engine
// =============================================================================

/// Computes the price breakdown for a cart's line items and at most one
/// discount.
///
/// ## Contract
/// - `items_price` = Σ `unit_price`; empty slice → 0
/// - `tax_price` = `items_price × tax_rate`, rounded half-up on the half
///   cent
/// - Discount: absent/expired → 0; percentage → `items_price × pct`,
///   rounded half-up; fixed → `min(amount, items_price)`, floored at 0
/// - `total_price` = `max(0, items_price + tax_price − discount_amount)`.
///   No valid input combination produces a negative total; the floor guards
///   against discount misconfiguration.
///
/// ## Errors
/// Fails with [`CoreError::InvalidInput`] and no partial result when:
/// - any `unit_price` is negative
/// - `tax_rate` exceeds 100% (10000 bps)
/// - an unexpired percentage discount is outside (0, 100]
///
/// Expired discounts, unknown codes (the caller passes `None`), and empty
/// carts are normal inputs, not errors.
///
/// ## Example
/// ```rust
/// use chrono::{Duration, Utc};
/// use skillcart_core::discount::{Discount, DiscountCode, DiscountKind};
/// use skillcart_core::money::{Money, TaxRate};
/// use skillcart_core::pricing::price_cart;
/// use skillcart_core::types::{CourseId, LineItem};
///
/// let now = Utc::now();
/// let items = vec![
///     LineItem::new(CourseId::new(), "Rust in Practice", Money::from_cents(12_000)),
///     LineItem::new(CourseId::new(), "Async Deep Dive", Money::from_cents(8_000)),
/// ];
/// let save10 = Discount::new(
///     DiscountCode::parse("SAVE10").unwrap(),
///     DiscountKind::Percentage { basis_points: 1000 },
///     now + Duration::days(30),
/// );
///
/// let b = price_cart(&items, Some(&save10), TaxRate::from_bps(500), now).unwrap();
/// assert_eq!(b.items_price.cents(), 20_000);    // $200.00
/// assert_eq!(b.tax_price.cents(), 1_000);       // $10.00
/// assert_eq!(b.discount_amount.cents(), 2_000); // $20.00
/// assert_eq!(b.total_price.cents(), 19_000);    // $190.00
/// ```
///
/// [`CoreError::InvalidInput`]: crate::error::CoreError::InvalidInput
pub fn price_cart(
    items: &[LineItem],
    discount: Option<&Discount>,
    tax_rate: TaxRate,
    now: DateTime<Utc>,
) -> CoreResult<PriceBreakdown> {
    // Validate before computing anything: no partial results
    for item in items {
        validate_price_cents(item.unit_price_cents)?;
    }
    validate_tax_rate_bps(tax_rate.bps())?;

    let items_price: Money = items.iter().map(|i| i.unit_price()).sum();
    let tax_price = items_price.calculate_tax(tax_rate);

    let discount_amount = match resolve_discount(discount, now) {
        ResolvedDiscount::Absent | ResolvedDiscount::Expired => Money::zero(),
        ResolvedDiscount::Percentage { basis_points } => {
            validate_percentage_bps(basis_points)?;
            items_price.rate_portion(basis_points)
        }
        // A fixed discount never drives the subtotal negative
        ResolvedDiscount::Fixed { amount } => amount.floor_at_zero().min(items_price),
    };

    let total_price = (items_price + tax_price - discount_amount).floor_at_zero();

    Ok(PriceBreakdown {
        items_price,
        tax_price,
        discount_amount,
        total_price,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discount::DiscountCode;
    use crate::error::CoreError;
    use crate::types::CourseId;
    use chrono::Duration;

    fn items(prices: &[i64]) -> Vec<LineItem> {
        prices
            .iter()
            .enumerate()
            .map(|(n, cents)| {
                LineItem::new(
                    CourseId::new(),
                    format!("Course {}", n),
                    Money::from_cents(*cents),
                )
            })
            .collect()
    }

    fn percentage(bps: u32, valid_until: DateTime<Utc>) -> Discount {
        Discount::new(
            DiscountCode::parse("SAVE10").unwrap(),
            DiscountKind::Percentage { basis_points: bps },
            valid_until,
        )
    }

    fn fixed(cents: i64, valid_until: DateTime<Utc>) -> Discount {
        Discount::new(
            DiscountCode::parse("FLAT").unwrap(),
            DiscountKind::Fixed {
                amount: Money::from_cents(cents),
            },
            valid_until,
        )
    }

    #[test]
    fn test_empty_cart_is_all_zero() {
        let b = price_cart(&[], None, TaxRate::from_bps(500), Utc::now()).unwrap();
        assert_eq!(b, PriceBreakdown::zero());
    }

    #[test]
    fn test_subtotal_is_exact_sum() {
        let b = price_cart(&items(&[12_000, 8_000, 1]), None, TaxRate::zero(), Utc::now())
            .unwrap();
        assert_eq!(b.items_price.cents(), 20_001);
        assert_eq!(b.tax_price, Money::zero());
        assert_eq!(b.total_price.cents(), 20_001);
    }

    #[test]
    fn test_no_discount_example() {
        // $120.00 + $80.00 at 5% tax, unknown code resolved to None upstream
        let b = price_cart(&items(&[12_000, 8_000]), None, TaxRate::from_bps(500), Utc::now())
            .unwrap();
        assert_eq!(b.items_price.cents(), 20_000);
        assert_eq!(b.tax_price.cents(), 1_000);
        assert_eq!(b.discount_amount, Money::zero());
        assert_eq!(b.total_price.cents(), 21_000);
    }

    #[test]
    fn test_percentage_discount_example() {
        // SAVE10: 10% off $200.00 at 5% tax → total $190.00
        let now = Utc::now();
        let d = percentage(1000, now + Duration::days(30));

        let b = price_cart(&items(&[12_000, 8_000]), Some(&d), TaxRate::from_bps(500), now)
            .unwrap();
        assert_eq!(b.discount_amount.cents(), 2_000);
        assert_eq!(b.total_price.cents(), 19_000);
    }

    #[test]
    fn test_full_percentage_discount_leaves_tax() {
        // 100% off zeroes the subtotal but not the tax
        let now = Utc::now();
        let d = percentage(10_000, now + Duration::days(1));

        let b = price_cart(&items(&[20_000]), Some(&d), TaxRate::from_bps(500), now).unwrap();
        assert_eq!(b.discount_amount.cents(), 20_000);
        assert_eq!(b.tax_price.cents(), 1_000);
        assert_eq!(b.total_price.cents(), 1_000);
    }

    #[test]
    fn test_fixed_discount_is_capped_at_subtotal() {
        // $150.00 fixed off a $100.00 cart: discount caps at $100.00,
        // total is exactly the tax
        let now = Utc::now();
        let d = fixed(15_000, now + Duration::days(1));

        let b = price_cart(&items(&[10_000]), Some(&d), TaxRate::from_bps(500), now).unwrap();
        assert_eq!(b.discount_amount.cents(), 10_000);
        assert_eq!(b.total_price.cents(), 500);
    }

    #[test]
    fn test_fixed_discount_below_subtotal() {
        let now = Utc::now();
        let d = fixed(2_500, now + Duration::days(1));

        let b = price_cart(&items(&[10_000]), Some(&d), TaxRate::from_bps(500), now).unwrap();
        assert_eq!(b.discount_amount.cents(), 2_500);
        assert_eq!(b.total_price.cents(), 8_000);
    }

    #[test]
    fn test_expired_discount_is_ignored() {
        let now = Utc::now();

        for d in [
            percentage(1000, now - Duration::seconds(1)),
            fixed(5_000, now - Duration::days(365)),
            // Out-of-range amount on an expired code must not error either
            percentage(50_000, now - Duration::seconds(1)),
        ] {
            let b = price_cart(&items(&[20_000]), Some(&d), TaxRate::from_bps(500), now)
                .unwrap();
            assert_eq!(b.discount_amount, Money::zero());
            assert_eq!(b.total_price.cents(), 21_000);
        }
    }

    #[test]
    fn test_expiry_boundary_is_inclusive() {
        // valid_until == now counts as expired
        let now = Utc::now();
        let d = percentage(1000, now);

        let b = price_cart(&items(&[20_000]), Some(&d), TaxRate::from_bps(500), now).unwrap();
        assert_eq!(b.discount_amount, Money::zero());
    }

    #[test]
    fn test_negative_unit_price_rejected() {
        let bad = items(&[12_000, -500]);
        let result = price_cart(&bad, None, TaxRate::from_bps(500), Utc::now());
        assert!(matches!(result, Err(CoreError::InvalidInput(_))));
    }

    #[test]
    fn test_tax_rate_above_100_percent_rejected() {
        let result = price_cart(&items(&[10_000]), None, TaxRate::from_bps(10_001), Utc::now());
        assert!(matches!(result, Err(CoreError::InvalidInput(_))));
    }

    #[test]
    fn test_active_percentage_out_of_range_rejected() {
        let now = Utc::now();

        for bps in [0, 10_001] {
            let d = percentage(bps, now + Duration::days(1));
            let result = price_cart(&items(&[10_000]), Some(&d), TaxRate::from_bps(500), now);
            assert!(matches!(result, Err(CoreError::InvalidInput(_))));
        }
    }

    #[test]
    fn test_idempotence() {
        let now = Utc::now();
        let cart = items(&[12_000, 8_000, 999]);
        let d = percentage(1000, now + Duration::days(30));

        let first = price_cart(&cart, Some(&d), TaxRate::from_bps(500), now).unwrap();
        let second = price_cart(&cart, Some(&d), TaxRate::from_bps(500), now).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_tax_monotone_in_subtotal() {
        let rate = TaxRate::from_bps(825);
        let now = Utc::now();

        let mut last_tax = Money::zero();
        for cents in [0, 1, 99, 100, 1_000, 10_000, 100_000] {
            let b = price_cart(&items(&[cents]), None, rate, now).unwrap();
            assert!(b.tax_price >= last_tax);
            last_tax = b.tax_price;
        }
    }

    #[test]
    fn test_free_cart_with_fixed_discount() {
        // All-free courses: fixed discount caps at 0, total stays 0
        let now = Utc::now();
        let d = fixed(5_000, now + Duration::days(1));

        let b = price_cart(&items(&[0, 0]), Some(&d), TaxRate::from_bps(500), now).unwrap();
        assert_eq!(b, PriceBreakdown::zero());
    }
}
