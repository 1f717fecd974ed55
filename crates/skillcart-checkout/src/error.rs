//! # Checkout Error Types
//!
//! Error types for checkout orchestration.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  Collaborator failure (storage, payment provider)                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CheckoutError (this module) ← adds which seam failed                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  HTTP layer maps to a status code and user-facing message              │
//! │                                                                         │
//! │  Pricing failures (CoreError) pass through unchanged: they are         │
//! │  caller-correctable input problems, never retried.                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Note what is absent: "discount not found" and "discount expired" are not
//! errors. They surface as [`crate::service::DiscountOutcome`] variants on a
//! successful quote.

use skillcart_core::money::Money;
use skillcart_core::CoreError;
use thiserror::Error;

/// Boxed error from behind a collaborator seam.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Checkout orchestration errors.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// The pricing engine rejected its input. Wraps the single error kind
    /// core raises (`InvalidInput`) plus cart rule violations.
    #[error("pricing failed: {0}")]
    Pricing(#[from] CoreError),

    /// An order cannot be placed from an empty cart.
    ///
    /// ## When This Occurs
    /// - The cart was cleared in another tab between quote and checkout
    /// - A stale checkout page was re-submitted after a completed order
    #[error("cannot place an order from an empty cart")]
    EmptyCart,

    /// The client-submitted total does not match the server-side
    /// recomputation.
    ///
    /// ## When This Occurs
    /// - Cart contents or discount changed between display and submit
    /// - A tampered client tried to pay a different amount
    ///
    /// The charge is never attempted; the client must refresh its quote.
    #[error("submitted total {submitted} does not match computed total {expected}")]
    TotalMismatch { expected: Money, submitted: Money },

    /// The cart reader failed.
    #[error("cart unavailable: {0}")]
    CartUnavailable(#[source] BoxError),

    /// The discount reader failed. A missing code is NOT this error; this
    /// is the lookup itself failing.
    #[error("discount lookup failed: {0}")]
    DiscountUnavailable(#[source] BoxError),

    /// The payment gateway refused or failed the charge.
    #[error("payment failed: {0}")]
    PaymentFailed(#[source] BoxError),
}

/// Convenience type alias for Results with CheckoutError.
pub type CheckoutResult<T> = Result<T, CheckoutError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_mismatch_message() {
        let err = CheckoutError::TotalMismatch {
            expected: Money::from_cents(19_000),
            submitted: Money::from_cents(18_000),
        };
        assert_eq!(
            err.to_string(),
            "submitted total $180.00 does not match computed total $190.00"
        );
    }

    #[test]
    fn test_core_error_passes_through() {
        let core = CoreError::CartTooLarge { max: 100 };
        let err: CheckoutError = core.into();
        assert!(matches!(err, CheckoutError::Pricing(_)));
    }
}
