//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely, and the
//! `TaxRate` type for basis-point rates.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  A checkout total must be reproducible to the cent: the payment step   │
//! │  recomputes the breakdown server-side and compares it to what the      │
//! │  client displayed. Floats make that comparison fragile.                │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    All amounts are i64 cents. Rate math rounds half-up on the half     │
//! │    cent, once, at a single choke point (`rate_portion`).               │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use skillcart_core::money::{Money, TaxRate};
//!
//! // Create from cents (preferred)
//! let price = Money::from_cents(12_000); // $120.00
//!
//! // Tax at 5% (500 basis points)
//! let tax = price.calculate_tax(TaxRate::from_bps(500));
//! assert_eq!(tax.cents(), 600);
//!
//! // NEVER do this:
//! // let bad = Money::from_float(120.00); // NO SUCH METHOD EXISTS!
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents for USD).
///
/// ## Design Decisions
/// - **i64 (signed)**: Intermediate arithmetic (subtotal − discount) may dip
///   below zero before the final floor is applied
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Derives**: Full serde support for JSON serialization
///
/// ## Where Money Flows
/// ```text
/// Course.price ──► LineItem.unit_price ──► items_price
///                                              │
///                         tax_price ◄── rate ──┤
///                   discount_amount ◄── rate ──┤
///                                              ▼
///                                        total_price ──► charged amount
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use skillcart_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // Represents $10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from major and minor units (dollars and cents).
    ///
    /// For negative amounts, only the major unit should be negative:
    /// `from_major_minor(-5, 50)` = -$5.50, not -$4.50.
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (dollars) portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (cents) portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns the absolute value.
    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Returns the smaller of two amounts.
    ///
    /// Used to cap a fixed discount at the cart subtotal so a discount can
    /// never drive the subtotal negative.
    #[inline]
    pub fn min(self, other: Money) -> Money {
        Money(self.0.min(other.0))
    }

    /// Floors the value at zero.
    ///
    /// ## Example
    /// ```rust
    /// use skillcart_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(-250).floor_at_zero().cents(), 0);
    /// assert_eq!(Money::from_cents(250).floor_at_zero().cents(), 250);
    /// ```
    #[inline]
    pub fn floor_at_zero(self) -> Money {
        Money(self.0.max(0))
    }

    /// Takes a basis-point portion of this amount, rounding half-up.
    ///
    /// ## Rounding
    /// ```text
    /// ┌─────────────────────────────────────────────────────────────────────┐
    /// │  ROUND HALF-UP ON THE HALF CENT                                     │
    /// │                                                                     │
    /// │  Formula: (amount_cents × bps + 5000) / 10000                       │
    /// │  The +5000 provides rounding (5000/10000 = 0.5)                     │
    /// │                                                                     │
    /// │  $120.00 × 8.25% = $9.90     (exact)                                │
    /// │  $10.99  × 8.25% = $0.906675 → $0.91 (rounded up)                   │
    /// │                                                                     │
    /// │  Every rate computation in the system (tax AND percentage          │
    /// │  discounts) goes through this one function, so totals are          │
    /// │  reproducible to the cent across cart view, checkout view, and     │
    /// │  the pre-charge re-verification.                                   │
    /// └─────────────────────────────────────────────────────────────────────┘
    /// ```
    ///
    /// ## Example
    /// ```rust
    /// use skillcart_core::money::Money;
    ///
    /// let subtotal = Money::from_cents(20_000); // $200.00
    /// assert_eq!(subtotal.rate_portion(1000).cents(), 2_000); // 10% = $20.00
    /// ```
    pub fn rate_portion(&self, basis_points: u32) -> Money {
        // i128 intermediate prevents overflow on large amounts
        let portion = (self.0 as i128 * basis_points as i128 + 5000) / 10000;
        Money::from_cents(portion as i64)
    }

    /// Calculates tax on this amount.
    ///
    /// ## Example
    /// ```rust
    /// use skillcart_core::money::{Money, TaxRate};
    ///
    /// let subtotal = Money::from_cents(1099); // $10.99
    /// let rate = TaxRate::from_bps(825);      // 8.25%
    ///
    /// // $10.99 × 8.25% = $0.906675 → rounds to $0.91
    /// assert_eq!(subtotal.calculate_tax(rate).cents(), 91);
    /// ```
    #[inline]
    pub fn calculate_tax(&self, rate: TaxRate) -> Money {
        self.rate_portion(rate.bps())
    }
}

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 500 bps = 5.00% (the marketplace default)
///
/// The valid range for pricing is 0..=10000 (0% to 100%); the pricing
/// engine rejects anything above as invalid input rather than baking the
/// bound into the type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Creates a tax rate from a percentage (for convenience).
    pub fn from_percentage(pct: f64) -> Self {
        TaxRate((pct * 100.0).round() as u32)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero tax rate.
    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0)
    }

    /// Checks if tax rate is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate::zero()
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in a human-readable format.
///
/// ## Note
/// This is for debugging and logs. The display layer formats amounts with
/// locale-appropriate separators and currency glyphs; this crate only
/// guarantees the numeric contract.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            self.dollars().abs(),
            self.cents_part()
        )
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

/// Addition of two Money values.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

/// Addition assignment (+=).
impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

/// Subtraction of two Money values.
impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

/// Subtraction assignment (-=).
impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by i64 (e.g., gift purchases of the same course).
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

/// Summation of an iterator of Money values (cart subtotals).
impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
