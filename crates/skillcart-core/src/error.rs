//! # Error Types
//!
//! Domain-specific error types for skillcart-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  skillcart-core errors (this file)                                      │
//! │  ├── CoreError        - Domain rule violations                          │
//! │  └── ValidationError  - Field-level input failures                      │
//! │                                                                         │
//! │  skillcart-checkout errors (separate crate)                             │
//! │  └── CheckoutError    - Orchestration and collaborator failures         │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → CheckoutError → HTTP layer         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## What is NOT an error
//! An unknown discount code, an expired discount, and an empty cart are
//! normal input variations, not failures. They resolve to "no discount
//! applied" or a zero subtotal, and the calling layer owns the user-facing
//! messaging. The pricing engine raises exactly one kind of error:
//! `InvalidInput`, for malformed data that upstream code must correct.
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (course id, field name, bounds)
//! 3. Errors are enum variants, never String

use thiserror::Error;

use crate::types::CourseId;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These represent rule violations the caller must correct; nothing here is
/// retryable and nothing is fatal to the wider system.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Malformed pricing input: a negative unit price, a tax rate above
    /// 100%, or a percentage discount outside (0, 100].
    ///
    /// ## When This Occurs
    /// - A cart row was corrupted upstream (negative snapshot price)
    /// - Misconfigured tax rate
    /// - An administrator created a percentage discount outside (0, 100]
    ///   and it slipped past data-entry validation
    ///
    /// The pricing engine returns no partial result in these cases.
    #[error("invalid input: {0}")]
    InvalidInput(#[from] ValidationError),

    /// The course is not currently in the cart.
    ///
    /// ## When This Occurs
    /// - Removing a course twice (double-click on "remove")
    /// - A stale cart view referencing a course removed in another tab
    #[error("course {0} is not in the cart")]
    CourseNotInCart(CourseId),

    /// Cart has exceeded the maximum number of courses.
    #[error("cart cannot hold more than {max} courses")]
    CartTooLarge { max: usize },
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These occur when input doesn't meet requirements. Used for early
/// validation before business logic runs, and wrapped by
/// [`CoreError::InvalidInput`] when raised from the pricing engine.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be strictly positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must be zero or greater.
    #[error("{field} must not be negative")]
    MustBeNonNegative { field: String },

    /// Invalid format (e.g., invalid UUID, bad character in a code).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
