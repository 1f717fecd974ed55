//! # Validation Module
//!
//! Input validation rules for Skillcart.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Frontend forms                                               │
//! │  ├── Basic format checks (empty, length)                               │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE (shared by cart, discount, pricing)              │
//! │  ├── Field rules as plain functions returning Result                   │
//! │  └── The pricing engine re-checks its own inputs: a request that       │
//! │      skipped the forms (tampered client) still cannot produce a        │
//! │      malformed total                                                    │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Storage constraints (external collaborator)                  │
//! │                                                                         │
//! │  Defense in depth: each layer catches what the one above missed        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Validation shapes are explicit typed structs with dedicated functions,
//! never runtime schema objects: the compiler, not a schema registry, knows
//! what a `Discount` looks like.

use crate::error::ValidationError;
use crate::MAX_CODE_LENGTH;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a course display name.
///
/// ## Rules
/// - Must not be empty
/// - At most 200 characters
pub fn validate_course_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.len() > 200 {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: 200,
        });
    }

    Ok(())
}

/// Validates a normalized discount code.
///
/// ## Rules
/// - Must not be empty
/// - At most [`MAX_CODE_LENGTH`] characters
/// - Only letters, digits, hyphens, and underscores
///
/// Callers normalize (trim + uppercase) before validating; see
/// [`crate::discount::DiscountCode::parse`].
pub fn validate_discount_code(code: &str) -> ValidationResult<()> {
    if code.is_empty() {
        return Err(ValidationError::Required {
            field: "code".to_string(),
        });
    }

    if code.len() > MAX_CODE_LENGTH {
        return Err(ValidationError::TooLong {
            field: "code".to_string(),
            max: MAX_CODE_LENGTH,
        });
    }

    if !code
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidFormat {
            field: "code".to_string(),
            reason: "must contain only letters, numbers, hyphens, and underscores".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a unit price in cents.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (free courses)
///
/// ## Example
/// ```rust
/// use skillcart_core::validation::validate_price_cents;
///
/// assert!(validate_price_cents(12_000).is_ok()); // $120.00
/// assert!(validate_price_cents(0).is_ok());      // Free course
/// assert!(validate_price_cents(-500).is_err());  // Invalid
/// ```
pub fn validate_price_cents(cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::MustBeNonNegative {
            field: "unit_price".to_string(),
        });
    }

    Ok(())
}

/// Validates a tax rate in basis points.
///
/// ## Rules
/// - Must be between 0 and 10000 (0% to 100%)
/// - Marketplace configurations are typically 0-2500 (0% to 25%)
pub fn validate_tax_rate_bps(bps: u32) -> ValidationResult<()> {
    if bps > 10_000 {
        return Err(ValidationError::OutOfRange {
            field: "tax_rate".to_string(),
            min: 0,
            max: 10_000,
        });
    }

    Ok(())
}

/// Validates a percentage discount in basis points.
///
/// ## Rules
/// - Must be within (0, 100], i.e. 1..=10000 basis points
/// - 0% would be a no-op code, and above 100% the subtotal math is undefined
pub fn validate_percentage_bps(bps: u32) -> ValidationResult<()> {
    if bps == 0 || bps > 10_000 {
        return Err(ValidationError::OutOfRange {
            field: "percentage".to_string(),
            min: 1,
            max: 10_000,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
