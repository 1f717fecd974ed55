//! # Collaborator Seams
//!
//! Traits for the external collaborators checkout depends on: the cart
//! reader, the discount reader, and the payment gateway.
//!
//! ## Contract Notes
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Seam Contracts                                     │
//! │                                                                         │
//! │  CartSource.line_items(session)                                        │
//! │    → the persisted cart's items, insertion-ordered, prices frozen      │
//! │                                                                         │
//! │  DiscountSource.find_by_code(code)                                     │
//! │    → Ok(None) for unknown/mistyped codes (a normal variation,          │
//! │      NOT an error); Err(..) only when the lookup itself fails          │
//! │                                                                         │
//! │  PaymentGateway.charge(session, amount)                                │
//! │    → charges exactly `amount`; the gateway must never recompute        │
//! │      tax or discount on its own                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Implementations live elsewhere (a database-backed store, a payment
//! provider client); this crate ships only the traits and in-memory fakes
//! in tests.

use skillcart_core::discount::{Discount, DiscountCode};
use skillcart_core::money::Money;
use skillcart_core::types::{LineItem, SessionId};

use crate::error::BoxError;

/// Opaque reference to a captured charge, as issued by the payment
/// provider (auth code, transaction id, ...).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChargeId(pub String);

impl ChargeId {
    /// The provider-issued reference text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Supplies the persisted line items for a session's cart.
pub trait CartSource {
    /// Reads the cart's line items. An empty vec means an empty cart.
    async fn line_items(&self, session: SessionId) -> Result<Vec<LineItem>, BoxError>;
}

/// Supplies zero-or-one discount for a submitted code.
pub trait DiscountSource {
    /// Looks up a code. `Ok(None)` means unknown/mistyped, which the
    /// service degrades to "no discount applied".
    async fn find_by_code(&self, code: &DiscountCode) -> Result<Option<Discount>, BoxError>;
}

/// Captures payment for a placed order.
pub trait PaymentGateway {
    /// Charges exactly `amount` against the session's payment method and
    /// returns the provider's charge reference.
    async fn charge(&self, session: SessionId, amount: Money) -> Result<ChargeId, BoxError>;
}
