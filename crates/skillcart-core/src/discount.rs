//! # Discount Module
//!
//! Discount codes, discount kinds, and expiry.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Discount Lifecycle                                 │
//! │                                                                         │
//! │  Admin creates code ──► validate() ──► stored by the catalog           │
//! │                                            │                            │
//! │  Shopper types code ──► case-insensitive lookup (DiscountCode          │
//! │                         normalizes to uppercase)                        │
//! │                                            │                            │
//! │                                            ▼                            │
//! │                              status(now): Active | Expired              │
//! │                              (derived on every read, never stored)      │
//! │                                            │                            │
//! │  Expired codes are inert, not deleted: orders that already applied     │
//! │  them keep referencing the same row.                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! At most one discount is ever considered for a cart. The pricing engine
//! takes `Option<&Discount>`, so stacking is unrepresentable.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;
use crate::validation::{validate_discount_code, validate_percentage_bps};

// =============================================================================
// Discount Code
// =============================================================================

/// A discount lookup key, normalized for case-insensitive matching.
///
/// Construction goes through [`DiscountCode::parse`], which trims and
/// uppercases the input, so `save10`, `Save10`, and `SAVE10` are the same
/// code. Deserialization routes through the same normalization.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(try_from = "String", into = "String")]
pub struct DiscountCode(String);

impl DiscountCode {
    /// Parses and normalizes a code typed by a shopper or an administrator.
    ///
    /// ## Rules
    /// - Must not be empty after trimming
    /// - At most [`crate::MAX_CODE_LENGTH`] characters
    /// - Only letters, digits, hyphens, and underscores
    ///
    /// ## Example
    /// ```rust
    /// use skillcart_core::discount::DiscountCode;
    ///
    /// let code = DiscountCode::parse("  save10 ").unwrap();
    /// assert_eq!(code.as_str(), "SAVE10");
    /// assert!(DiscountCode::parse("").is_err());
    /// ```
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let normalized = raw.trim().to_uppercase();
        validate_discount_code(&normalized)?;
        Ok(DiscountCode(normalized))
    }

    /// The normalized code text.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DiscountCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for DiscountCode {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        DiscountCode::parse(&value)
    }
}

impl From<DiscountCode> for String {
    fn from(code: DiscountCode) -> Self {
        code.0
    }
}

// =============================================================================
// Discount Kind
// =============================================================================

/// How a discount reduces the cart subtotal.
///
/// A proper sum type: the pricing engine matches on this exhaustively, so a
/// new kind cannot be added without the compiler pointing at every rule that
/// must handle it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DiscountKind {
    /// Percentage off the item subtotal, in basis points (1000 = 10%).
    /// Valid range is (0, 100%], i.e. 1..=10000 bps.
    Percentage { basis_points: u32 },

    /// Fixed amount off the item subtotal. Capped at the subtotal by the
    /// pricing engine; admin validation only requires it to be positive.
    Fixed { amount: Money },
}

// =============================================================================
// Discount Status
// =============================================================================

/// Derived two-state status of a discount.
///
/// This is computed from `valid_until` on every read, never stored or
/// transitioned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum DiscountStatus {
    Active,
    Expired,
}

// =============================================================================
// Discount
// =============================================================================

/// An administrator-defined promotional rule.
///
/// Long-lived and shared: many carts may reference the same code at once,
/// read-only. Nothing in this crate ever mutates a discount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Discount {
    /// Unique lookup key, case-insensitive.
    pub code: DiscountCode,

    /// Percentage or fixed amount.
    pub kind: DiscountKind,

    /// Expiry timestamp. At and after this instant the discount is inert.
    #[ts(as = "String")]
    pub valid_until: DateTime<Utc>,
}

impl Discount {
    /// Creates a discount.
    pub fn new(code: DiscountCode, kind: DiscountKind, valid_until: DateTime<Utc>) -> Self {
        Discount {
            code,
            kind,
            valid_until,
        }
    }

    /// Derived status at the given instant. `valid_until <= now` counts as
    /// expired.
    #[inline]
    pub fn status(&self, now: DateTime<Utc>) -> DiscountStatus {
        if self.valid_until <= now {
            DiscountStatus::Expired
        } else {
            DiscountStatus::Active
        }
    }

    /// Convenience check for the expired state.
    #[inline]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.status(now) == DiscountStatus::Expired
    }

    /// Admin-creation validation.
    ///
    /// ## Rules
    /// - Percentage must be within (0, 100] (1..=10000 basis points)
    /// - Fixed amount must be strictly positive
    ///
    /// The subtotal cap on fixed discounts is deliberately NOT enforced
    /// here: it depends on the cart it is applied to, so the pricing engine
    /// clamps it at computation time instead.
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self.kind {
            DiscountKind::Percentage { basis_points } => validate_percentage_bps(basis_points),
            DiscountKind::Fixed { amount } => {
                if !amount.is_positive() {
                    return Err(ValidationError::MustBePositive {
                        field: "amount".to_string(),
                    });
                }
                Ok(())
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn code(s: &str) -> DiscountCode {
        DiscountCode::parse(s).unwrap()
    }

    #[test]
    fn test_code_normalization() {
        assert_eq!(code("save10").as_str(), "SAVE10");
        assert_eq!(code("  Save10  ").as_str(), "SAVE10");
        assert_eq!(code("save10"), code("SAVE10"));
    }

    #[test]
    fn test_code_rejects_bad_input() {
        assert!(DiscountCode::parse("").is_err());
        assert!(DiscountCode::parse("   ").is_err());
        assert!(DiscountCode::parse("has space").is_err());
        assert!(DiscountCode::parse(&"A".repeat(100)).is_err());
    }

    #[test]
    fn test_code_deserialization_normalizes() {
        let parsed: DiscountCode = serde_json::from_str("\"save10\"").unwrap();
        assert_eq!(parsed.as_str(), "SAVE10");

        let bad: Result<DiscountCode, _> = serde_json::from_str("\"\"");
        assert!(bad.is_err());
    }

    #[test]
    fn test_status_boundary() {
        let now = Utc::now();
        let discount = Discount::new(
            code("SAVE10"),
            DiscountKind::Percentage { basis_points: 1000 },
            now,
        );

        // valid_until == now is already expired
        assert_eq!(discount.status(now), DiscountStatus::Expired);
        assert_eq!(
            discount.status(now - Duration::seconds(1)),
            DiscountStatus::Active
        );
        assert!(discount.is_expired(now + Duration::days(1)));
    }

    #[test]
    fn test_validate_percentage_range() {
        let now = Utc::now();
        let make = |bps| {
            Discount::new(
                code("SAVE"),
                DiscountKind::Percentage { basis_points: bps },
                now,
            )
        };

        assert!(make(1).validate().is_ok());
        assert!(make(10_000).validate().is_ok());
        assert!(make(0).validate().is_err());
        assert!(make(10_001).validate().is_err());
    }

    #[test]
    fn test_validate_fixed_amount() {
        let now = Utc::now();
        let make = |cents| {
            Discount::new(
                code("FLAT"),
                DiscountKind::Fixed {
                    amount: Money::from_cents(cents),
                },
                now,
            )
        };

        assert!(make(1).validate().is_ok());
        // Arbitrarily large fixed amounts pass admin validation; the pricing
        // engine caps them at the cart subtotal.
        assert!(make(1_000_000).validate().is_ok());
        assert!(make(0).validate().is_err());
        assert!(make(-500).validate().is_err());
    }

    #[test]
    fn test_discount_kind_serde_tag() {
        let discount = Discount::new(
            code("SAVE10"),
            DiscountKind::Percentage { basis_points: 1000 },
            Utc::now(),
        );
        let json = serde_json::to_value(&discount).unwrap();
        assert_eq!(json["kind"]["type"], "percentage");
        assert_eq!(json["kind"]["basis_points"], 1000);
        assert_eq!(json["code"], "SAVE10");

        let back: Discount = serde_json::from_value(json).unwrap();
        assert_eq!(back, discount);
    }
}
