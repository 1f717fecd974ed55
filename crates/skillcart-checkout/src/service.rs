//! # Checkout Service
//!
//! Orchestrates cart pricing and order placement.
//!
//! ## Request Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Checkout Flow                                        │
//! │                                                                         │
//! │  quote(session, code, now)                                              │
//! │    1. CartSource.line_items(session)                                   │
//! │    2. DiscountSource.find_by_code(code)   (unknown → None, no error)   │
//! │    3. price_cart(items, discount, tax_rate, now)                       │
//! │    4. return Quote { breakdown, discount outcome for display }         │
//! │                                                                         │
//! │  place_order(session, code, client_total, now)                          │
//! │    1-3. same inputs, recomputed server-side                            │
//! │    4. breakdown.total_price == client_total?                           │
//! │         no  → TotalMismatch, charge never attempted                    │
//! │         yes → PaymentGateway.charge(session, total_price)              │
//! │    5. return Receipt { order snapshot, charge reference }              │
//! │                                                                         │
//! │  The charged amount is ALWAYS the recomputed total. The client's       │
//! │  figure is only ever compared against it, never charged.               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Clearing the cart after a successful order is the cart store's job; the
//! service hands back the `Order` snapshot and the store destroys the cart
//! rows in the same transaction that persists the order.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};
use ts_rs::TS;

use skillcart_core::discount::{Discount, DiscountCode};
use skillcart_core::money::Money;
use skillcart_core::pricing::{price_cart, PriceBreakdown};
use skillcart_core::types::{Order, SessionId};

use crate::config::CheckoutConfig;
use crate::error::{CheckoutError, CheckoutResult};
use crate::source::{CartSource, ChargeId, DiscountSource, PaymentGateway};

// =============================================================================
// Quote DTOs
// =============================================================================

/// What happened to the submitted discount code.
///
/// Unknown and expired codes are normal variations, not errors: the cart
/// still prices, and the display layer uses this to message
/// "code not found" or "code expired" next to an unchanged total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DiscountOutcome {
    /// No code was submitted.
    NotRequested,
    /// The code was found, is active, and reduced the total.
    Applied { code: DiscountCode },
    /// The code was found but `valid_until` has passed.
    Expired { code: DiscountCode },
    /// No discount matches the submitted text (mistyped or never existed).
    Unknown { code: String },
}

impl DiscountOutcome {
    /// The applied code, if the outcome is `Applied`.
    pub fn applied_code(&self) -> Option<&DiscountCode> {
        match self {
            DiscountOutcome::Applied { code } => Some(code),
            _ => None,
        }
    }
}

/// A priced cart ready for display: the breakdown plus what became of the
/// discount code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub breakdown: PriceBreakdown,
    pub discount: DiscountOutcome,
}

/// The result of a placed order: the immutable order snapshot and the
/// payment provider's charge reference.
#[derive(Debug, Clone)]
pub struct Receipt {
    pub order: Order,
    pub charge: ChargeId,
}

// =============================================================================
// Checkout Service
// =============================================================================

/// Drives quoting and order placement over the collaborator seams.
///
/// Holds no per-request state: concurrent checkouts by different sessions
/// are independent invocations.
#[derive(Debug)]
pub struct CheckoutService<C, D, P> {
    carts: C,
    discounts: D,
    payments: P,
    config: CheckoutConfig,
}

impl<C, D, P> CheckoutService<C, D, P>
where
    C: CartSource,
    D: DiscountSource,
    P: PaymentGateway,
{
    /// Creates a service over the given collaborators.
    pub fn new(carts: C, discounts: D, payments: P, config: CheckoutConfig) -> Self {
        CheckoutService {
            carts,
            discounts,
            payments,
            config,
        }
    }

    /// Prices the session's cart with an optional discount code.
    ///
    /// Degrades gracefully on unknown and expired codes: the breakdown is
    /// computed without them and the outcome says why.
    #[instrument(skip_all, fields(session = %session))]
    pub async fn quote(
        &self,
        session: SessionId,
        code: Option<&str>,
        now: DateTime<Utc>,
    ) -> CheckoutResult<Quote> {
        let items = self
            .carts
            .line_items(session)
            .await
            .map_err(CheckoutError::CartUnavailable)?;

        let (discount, outcome) = self.lookup_discount(code, now).await?;
        let breakdown = price_cart(&items, discount.as_ref(), self.config.tax_rate, now)?;

        debug!(
            total = %breakdown.total_price,
            discount = ?outcome,
            items = items.len(),
            "quoted cart"
        );

        Ok(Quote {
            breakdown,
            discount: outcome,
        })
    }

    /// Places an order: recomputes the breakdown server-side, verifies the
    /// client's total against it, charges exactly the recomputed total, and
    /// returns the order snapshot.
    ///
    /// The verification exists so a stale or tampered client-side total can
    /// never be charged: between quote and submit the cart or discount may
    /// have changed, and the recomputation is the source of truth.
    #[instrument(skip_all, fields(session = %session))]
    pub async fn place_order(
        &self,
        session: SessionId,
        code: Option<&str>,
        client_total: Money,
        now: DateTime<Utc>,
    ) -> CheckoutResult<Receipt> {
        let items = self
            .carts
            .line_items(session)
            .await
            .map_err(CheckoutError::CartUnavailable)?;

        if items.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let (discount, outcome) = self.lookup_discount(code, now).await?;
        let breakdown = price_cart(&items, discount.as_ref(), self.config.tax_rate, now)?;

        if breakdown.total_price != client_total {
            warn!(
                expected = %breakdown.total_price,
                submitted = %client_total,
                "rejecting checkout: total mismatch"
            );
            return Err(CheckoutError::TotalMismatch {
                expected: breakdown.total_price,
                submitted: client_total,
            });
        }

        let charge = self
            .payments
            .charge(session, breakdown.total_price)
            .await
            .map_err(CheckoutError::PaymentFailed)?;

        let order = Order::new(
            session,
            items,
            breakdown,
            outcome.applied_code().cloned(),
            now,
        );

        info!(
            order = %order.id,
            total = %order.charge_amount(),
            charge = charge.as_str(),
            "order placed"
        );

        Ok(Receipt { order, charge })
    }

    /// Resolves an optional raw code string to at most one discount plus a
    /// display outcome.
    ///
    /// A code that fails to parse is treated like an unknown code: nothing
    /// a shopper types into the discount box should error a checkout.
    async fn lookup_discount(
        &self,
        code: Option<&str>,
        now: DateTime<Utc>,
    ) -> CheckoutResult<(Option<Discount>, DiscountOutcome)> {
        let raw = match code.map(str::trim) {
            None | Some("") => return Ok((None, DiscountOutcome::NotRequested)),
            Some(raw) => raw,
        };

        let code = match DiscountCode::parse(raw) {
            Ok(code) => code,
            Err(reason) => {
                debug!(code = raw, %reason, "unparseable discount code");
                return Ok((
                    None,
                    DiscountOutcome::Unknown {
                        code: raw.to_string(),
                    },
                ));
            }
        };

        let found = self
            .discounts
            .find_by_code(&code)
            .await
            .map_err(CheckoutError::DiscountUnavailable)?;

        match found {
            None => {
                debug!(%code, "discount code not found");
                Ok((
                    None,
                    DiscountOutcome::Unknown {
                        code: code.as_str().to_string(),
                    },
                ))
            }
            Some(discount) if discount.is_expired(now) => {
                debug!(%code, valid_until = %discount.valid_until, "discount code expired");
                // The discount still flows into price_cart, which ignores
                // expired codes itself; the engine stays the single source
                // of truth for what counts as applied.
                Ok((Some(discount), DiscountOutcome::Expired { code }))
            }
            Some(discount) => Ok((Some(discount), DiscountOutcome::Applied { code })),
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
    use std::collections::HashMap;
    use std::sync::Mutex;

    use skillcart_core::discount::DiscountKind;
    use skillcart_core::money::TaxRate;
    use skillcart_core::types::{CourseId, LineItem};

    use crate::error::BoxError;

    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    }

    // -------------------------------------------------------------------------
    // In-memory fakes for the collaborator seams
    // -------------------------------------------------------------------------

    struct FixedCart(Vec<LineItem>);

    impl CartSource for FixedCart {
        async fn line_items(&self, _session: SessionId) -> Result<Vec<LineItem>, BoxError> {
            Ok(self.0.clone())
        }
    }

    struct CodeBook(HashMap<DiscountCode, Discount>);

    impl CodeBook {
        fn empty() -> Self {
            CodeBook(HashMap::new())
        }

        fn with(discounts: &[Discount]) -> Self {
            CodeBook(
                discounts
                    .iter()
                    .map(|d| (d.code.clone(), d.clone()))
                    .collect(),
            )
        }
    }

    impl DiscountSource for CodeBook {
        async fn find_by_code(&self, code: &DiscountCode) -> Result<Option<Discount>, BoxError> {
            Ok(self.0.get(code).cloned())
        }
    }

    /// Records every charged amount so tests can assert the gateway saw
    /// exactly the recomputed total (or nothing at all).
    #[derive(Default)]
    struct RecordingGateway {
        charges: Mutex<Vec<Money>>,
    }

    impl RecordingGateway {
        fn charged(&self) -> Vec<Money> {
            self.charges.lock().unwrap().clone()
        }
    }

    impl PaymentGateway for RecordingGateway {
        async fn charge(&self, _session: SessionId, amount: Money) -> Result<ChargeId, BoxError> {
            self.charges.lock().unwrap().push(amount);
            Ok(ChargeId(format!("ch_{}", amount.cents())))
        }
    }

    // -------------------------------------------------------------------------
    // Fixtures
    // -------------------------------------------------------------------------

    fn two_course_cart() -> Vec<LineItem> {
        vec![
            LineItem::new(CourseId::new(), "Rust in Practice", Money::from_cents(12_000)),
            LineItem::new(CourseId::new(), "Async Deep Dive", Money::from_cents(8_000)),
        ]
    }

    fn save10(valid_until: DateTime<Utc>) -> Discount {
        Discount::new(
            DiscountCode::parse("SAVE10").unwrap(),
            DiscountKind::Percentage { basis_points: 1000 },
            valid_until,
        )
    }

    fn service(
        items: Vec<LineItem>,
        discounts: CodeBook,
    ) -> CheckoutService<FixedCart, CodeBook, RecordingGateway> {
        CheckoutService::new(
            FixedCart(items),
            discounts,
            RecordingGateway::default(),
            CheckoutConfig::new(TaxRate::from_bps(500)),
        )
    }

    // -------------------------------------------------------------------------
    // Quote
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_quote_without_code() {
        init_tracing();
        let now = Utc::now();
        let svc = service(two_course_cart(), CodeBook::empty());

        let quote = svc.quote(SessionId::new(), None, now).await.unwrap();

        assert_eq!(quote.breakdown.items_price.cents(), 20_000);
        assert_eq!(quote.breakdown.tax_price.cents(), 1_000);
        assert_eq!(quote.breakdown.total_price.cents(), 21_000);
        assert_eq!(quote.discount, DiscountOutcome::NotRequested);
    }

    #[tokio::test]
    async fn test_quote_applies_active_code_case_insensitively() {
        init_tracing();
        let now = Utc::now();
        let svc = service(
            two_course_cart(),
            CodeBook::with(&[save10(now + Duration::days(30))]),
        );

        let quote = svc
            .quote(SessionId::new(), Some("  save10 "), now)
            .await
            .unwrap();

        assert_eq!(quote.breakdown.discount_amount.cents(), 2_000);
        assert_eq!(quote.breakdown.total_price.cents(), 19_000);
        assert_eq!(
            quote.discount.applied_code().map(|c| c.as_str()),
            Some("SAVE10")
        );
    }

    #[tokio::test]
    async fn test_quote_unknown_code_prices_without_discount() {
        init_tracing();
        let now = Utc::now();
        let svc = service(two_course_cart(), CodeBook::empty());

        let quote = svc
            .quote(SessionId::new(), Some("SVAE10"), now)
            .await
            .unwrap();

        assert_eq!(quote.breakdown.discount_amount, Money::zero());
        assert_eq!(quote.breakdown.total_price.cents(), 21_000);
        assert_eq!(
            quote.discount,
            DiscountOutcome::Unknown {
                code: "SVAE10".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_quote_expired_code_prices_without_discount() {
        init_tracing();
        let now = Utc::now();
        let svc = service(
            two_course_cart(),
            CodeBook::with(&[save10(now - Duration::days(1))]),
        );

        let quote = svc
            .quote(SessionId::new(), Some("SAVE10"), now)
            .await
            .unwrap();

        assert_eq!(quote.breakdown.discount_amount, Money::zero());
        assert_eq!(quote.breakdown.total_price.cents(), 21_000);
        assert!(matches!(quote.discount, DiscountOutcome::Expired { .. }));
    }

    #[tokio::test]
    async fn test_quote_unparseable_code_treated_as_unknown() {
        init_tracing();
        let now = Utc::now();
        let svc = service(two_course_cart(), CodeBook::empty());

        let quote = svc
            .quote(SessionId::new(), Some("not a code!"), now)
            .await
            .unwrap();

        assert!(matches!(quote.discount, DiscountOutcome::Unknown { .. }));
        assert_eq!(quote.breakdown.total_price.cents(), 21_000);
    }

    #[tokio::test]
    async fn test_quote_empty_cart_is_zero_not_error() {
        init_tracing();
        let svc = service(vec![], CodeBook::empty());

        let quote = svc.quote(SessionId::new(), None, Utc::now()).await.unwrap();
        assert_eq!(quote.breakdown.total_price, Money::zero());
    }

    #[tokio::test]
    async fn test_quote_json_shape_for_frontend() {
        init_tracing();
        let now = Utc::now();
        let svc = service(
            two_course_cart(),
            CodeBook::with(&[save10(now + Duration::days(30))]),
        );

        let quote = svc
            .quote(SessionId::new(), Some("SAVE10"), now)
            .await
            .unwrap();
        let json = serde_json::to_value(&quote).unwrap();

        assert_eq!(json["breakdown"]["itemsPrice"], 20_000);
        assert_eq!(json["breakdown"]["totalPrice"], 19_000);
        assert_eq!(json["discount"]["status"], "applied");
        assert_eq!(json["discount"]["code"], "SAVE10");
    }

    // -------------------------------------------------------------------------
    // Place order
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_place_order_charges_recomputed_total() {
        init_tracing();
        let now = Utc::now();
        let svc = service(
            two_course_cart(),
            CodeBook::with(&[save10(now + Duration::days(30))]),
        );
        let session = SessionId::new();

        let receipt = svc
            .place_order(session, Some("SAVE10"), Money::from_cents(19_000), now)
            .await
            .unwrap();

        assert_eq!(receipt.order.charge_amount().cents(), 19_000);
        assert_eq!(
            receipt.order.discount_code.as_ref().map(|c| c.as_str()),
            Some("SAVE10")
        );
        assert_eq!(receipt.order.session_id, session);
        assert_eq!(receipt.order.items.len(), 2);
        assert_eq!(svc.payments.charged(), vec![Money::from_cents(19_000)]);
    }

    #[tokio::test]
    async fn test_place_order_rejects_tampered_total() {
        init_tracing();
        let now = Utc::now();
        let svc = service(two_course_cart(), CodeBook::empty());

        let result = svc
            .place_order(SessionId::new(), None, Money::from_cents(100), now)
            .await;

        match result {
            Err(CheckoutError::TotalMismatch {
                expected,
                submitted,
            }) => {
                assert_eq!(expected.cents(), 21_000);
                assert_eq!(submitted.cents(), 100);
            }
            other => panic!("expected TotalMismatch, got {:?}", other.map(|r| r.order.id)),
        }

        // The gateway must never have been touched
        assert!(svc.payments.charged().is_empty());
    }

    #[tokio::test]
    async fn test_place_order_rejects_stale_discount_total() {
        init_tracing();
        // The client quoted with an active SAVE10 ($190.00) but the code
        // expired before submit: recomputation yields $210.00 and the old
        // total is refused rather than silently re-priced.
        let now = Utc::now();
        let svc = service(
            two_course_cart(),
            CodeBook::with(&[save10(now - Duration::seconds(1))]),
        );

        let result = svc
            .place_order(SessionId::new(), Some("SAVE10"), Money::from_cents(19_000), now)
            .await;

        assert!(matches!(
            result,
            Err(CheckoutError::TotalMismatch { .. })
        ));
        assert!(svc.payments.charged().is_empty());
    }

    #[tokio::test]
    async fn test_place_order_rejects_empty_cart() {
        init_tracing();
        let svc = service(vec![], CodeBook::empty());

        let result = svc
            .place_order(SessionId::new(), None, Money::zero(), Utc::now())
            .await;

        assert!(matches!(result, Err(CheckoutError::EmptyCart)));
        assert!(svc.payments.charged().is_empty());
    }

    #[tokio::test]
    async fn test_place_order_without_discount() {
        init_tracing();
        let now = Utc::now();
        let svc = service(two_course_cart(), CodeBook::empty());

        let receipt = svc
            .place_order(SessionId::new(), None, Money::from_cents(21_000), now)
            .await
            .unwrap();

        assert!(receipt.order.discount_code.is_none());
        assert_eq!(svc.payments.charged(), vec![Money::from_cents(21_000)]);
    }
}
