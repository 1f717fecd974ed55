//! # skillcart-core: Pure Business Logic for Skillcart
//!
//! This crate is the **heart** of the Skillcart course marketplace. It
//! contains all pricing and cart rules as pure functions with zero I/O
//! dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Skillcart Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Frontend (Web)                               │   │
//! │  │    Catalog UI ──► Cart UI ──► Checkout UI ──► Receipt UI       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             skillcart-checkout (Orchestration)                  │   │
//! │  │    quote(), place_order(), server-side total verification      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ skillcart-core (THIS CRATE) ★                   │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   cart    │  │ discount  │  │   │
//! │  │   │ LineItem  │  │   Money   │  │   Cart    │  │ Discount  │  │   │
//! │  │   │   Order   │  │  TaxRate  │  │  add/rm   │  │  expiry   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                       ┌───────────┐                            │   │
//! │  │                       │  pricing  │  ← the pricing engine      │   │
//! │  │                       └───────────┘                            │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (LineItem, Order, identifiers)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`cart`] - The shopping cart and its uniqueness invariant
//! - [`discount`] - Discount codes, kinds, and expiry
//! - [`pricing`] - The pricing engine: subtotal, tax, discount, total
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation rules
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every pricing computation is deterministic -
//!    the only "time" input is an explicit `now` parameter
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in cents (i64) to avoid
//!    float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use chrono::Utc;
//! use skillcart_core::money::{Money, TaxRate};
//! use skillcart_core::pricing::price_cart;
//! use skillcart_core::types::{CourseId, LineItem};
//!
//! let items = vec![
//!     LineItem::new(CourseId::new(), "Rust in Practice", Money::from_cents(12_000)),
//!     LineItem::new(CourseId::new(), "Async Deep Dive", Money::from_cents(8_000)),
//! ];
//!
//! let breakdown = price_cart(&items, None, TaxRate::from_bps(500), Utc::now()).unwrap();
//!
//! // $200.00 subtotal + 5% tax, no discount
//! assert_eq!(breakdown.items_price.cents(), 20_000);
//! assert_eq!(breakdown.tax_price.cents(), 1_000);
//! assert_eq!(breakdown.total_price.cents(), 21_000);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod discount;
pub mod error;
pub mod money;
pub mod pricing;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use skillcart_core::Money` instead of
// `use skillcart_core::money::Money`

pub use cart::Cart;
pub use discount::{Discount, DiscountCode, DiscountKind, DiscountStatus};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::{Money, TaxRate};
pub use pricing::{price_cart, PriceBreakdown};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum courses allowed in a single cart.
///
/// ## Business Reason
/// Prevents runaway carts and keeps checkout payloads bounded. A learner
/// enrolling in more than 100 courses in one order is a data-entry error,
/// not a purchase.
pub const MAX_CART_ITEMS: usize = 100;

/// Maximum length of a discount code.
///
/// ## Business Reason
/// Codes are typed by hand at checkout; anything longer than 32 characters
/// is a paste error or an abuse attempt.
pub const MAX_CODE_LENGTH: usize = 32;
