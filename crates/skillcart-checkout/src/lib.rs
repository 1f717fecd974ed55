//! # skillcart-checkout: Checkout Orchestration for Skillcart
//!
//! The thin layer between the web surface and the pure pricing engine in
//! `skillcart-core`. It owns the request-side flow: resolve the cart and
//! the discount code, price them, and place orders with a server-side total
//! re-verification before any money moves.
//!
//! ## What lives here vs. elsewhere
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THIS CRATE                          EXTERNAL COLLABORATORS             │
//! │  ──────────────────────────────      ─────────────────────────────      │
//! │  • CheckoutService (quote,           • Cart persistence                 │
//! │    place_order)                      • Discount storage & admin UI      │
//! │  • Collaborator traits               • Payment capture & refunds        │
//! │  • Total verification                • Email/receipt delivery           │
//! │  • Structured logging                • All rendering                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//! ```rust,ignore
//! let service = CheckoutService::new(carts, discounts, payments, CheckoutConfig::from_env());
//!
//! let quote = service.quote(session, Some("SAVE10"), Utc::now()).await?;
//! // ... display quote.breakdown, then on submit:
//! let receipt = service
//!     .place_order(session, Some("SAVE10"), quote.breakdown.total_price, Utc::now())
//!     .await?;
//! ```

pub mod config;
pub mod error;
pub mod service;
pub mod source;

pub use config::{CheckoutConfig, DEFAULT_TAX_RATE_BPS};
pub use error::{CheckoutError, CheckoutResult};
pub use service::{CheckoutService, DiscountOutcome, Quote, Receipt};
pub use source::{CartSource, ChargeId, DiscountSource, PaymentGateway};
