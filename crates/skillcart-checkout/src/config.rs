//! # Checkout Configuration
//!
//! Configuration for the checkout service.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     SKILLCART_TAX_RATE_BPS=825                                         │
//! │                                                                         │
//! │  2. Default Values                                                     │
//! │     Tax rate 500 bps (5%)                                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The tax rate is configuration, not data: the pricing engine receives it
//! as an argument on every call, so a rate change takes effect on the next
//! quote without touching any stored cart.

use serde::{Deserialize, Serialize};
use skillcart_core::money::TaxRate;
use tracing::warn;

/// Marketplace default tax rate: 5% (500 basis points).
pub const DEFAULT_TAX_RATE_BPS: u32 = 500;

/// Environment variable overriding the tax rate, in basis points.
pub const TAX_RATE_ENV: &str = "SKILLCART_TAX_RATE_BPS";

/// Checkout service configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutConfig {
    /// Tax rate applied to every cart's item subtotal.
    pub tax_rate: TaxRate,
}

impl CheckoutConfig {
    /// Builds a configuration with an explicit tax rate.
    pub fn new(tax_rate: TaxRate) -> Self {
        CheckoutConfig { tax_rate }
    }

    /// Loads configuration from the environment, falling back to defaults.
    ///
    /// An unparseable `SKILLCART_TAX_RATE_BPS` logs a warning and keeps the
    /// default rather than refusing to start.
    pub fn from_env() -> Self {
        let tax_rate = match std::env::var(TAX_RATE_ENV) {
            Ok(raw) => match raw.parse::<u32>() {
                Ok(bps) if bps <= 10_000 => TaxRate::from_bps(bps),
                Ok(bps) => {
                    warn!(bps, "{} above 100%, using default", TAX_RATE_ENV);
                    TaxRate::from_bps(DEFAULT_TAX_RATE_BPS)
                }
                Err(_) => {
                    warn!(value = %raw, "{} is not a number, using default", TAX_RATE_ENV);
                    TaxRate::from_bps(DEFAULT_TAX_RATE_BPS)
                }
            },
            Err(_) => TaxRate::from_bps(DEFAULT_TAX_RATE_BPS),
        };

        CheckoutConfig { tax_rate }
    }
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        CheckoutConfig {
            tax_rate: TaxRate::from_bps(DEFAULT_TAX_RATE_BPS),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
