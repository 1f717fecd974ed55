//! # Domain Types
//!
//! Core domain types for the Skillcart marketplace.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    LineItem     │   │      Order      │   │   Identifiers   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  course_id      │   │  id             │   │  CourseId       │       │
//! │  │  name           │   │  session_id     │   │  SessionId      │       │
//! │  │  unit_price     │   │  items (frozen) │   │  OrderId        │       │
//! │  │  added_at       │   │  breakdown      │   │  (UUID v4)      │       │
//! │  └─────────────────┘   │  discount_code  │   └─────────────────┘       │
//! │                        └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! A `LineItem` freezes the course price at the moment it enters the cart.
//! If the course is repriced in the catalog afterwards, the cart keeps the
//! original price; repricing an in-cart course is remove + re-add.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;
use uuid::Uuid;

use crate::discount::DiscountCode;
use crate::error::ValidationError;
use crate::money::Money;
use crate::pricing::PriceBreakdown;

// =============================================================================
// Identifiers
// =============================================================================

/// Unique identifier for a course (UUID v4).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct CourseId(#[ts(as = "String")] pub Uuid);

impl CourseId {
    /// Generates a fresh random identifier.
    pub fn new() -> Self {
        CourseId(Uuid::new_v4())
    }

    /// Parses an identifier from its string form.
    ///
    /// ## Example
    /// ```rust
    /// use skillcart_core::types::CourseId;
    ///
    /// assert!(CourseId::parse("550e8400-e29b-41d4-a716-446655440000").is_ok());
    /// assert!(CourseId::parse("not-a-uuid").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        Uuid::parse_str(s.trim())
            .map(CourseId)
            .map_err(|_| ValidationError::InvalidFormat {
                field: "course_id".to_string(),
                reason: "must be a valid UUID".to_string(),
            })
    }
}

impl Default for CourseId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CourseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Identifies a shopping session: a signed-in user's cart or an anonymous
/// browser session. A cart belongs to exactly one session.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct SessionId(#[ts(as = "String")] pub Uuid);

impl SessionId {
    /// Generates a fresh random identifier.
    pub fn new() -> Self {
        SessionId(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Unique identifier for a placed order (UUID v4).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct OrderId(#[ts(as = "String")] pub Uuid);

impl OrderId {
    /// Generates a fresh random identifier.
    pub fn new() -> Self {
        OrderId(Uuid::new_v4())
    }
}

impl Default for OrderId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

// =============================================================================
// Line Item
// =============================================================================

/// One priced course entry within a cart.
///
/// The price is a snapshot frozen at add time. The name is display-only and
/// never participates in pricing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// Course this entry refers to. Unique within a cart.
    pub course_id: CourseId,

    /// Course title at time of adding (frozen, display only).
    pub name: String,

    /// Price in cents at time of adding (frozen).
    pub unit_price_cents: i64,

    /// When this course was added to the cart.
    #[ts(as = "String")]
    pub added_at: DateTime<Utc>,
}

impl LineItem {
    /// Creates a line item with the price snapshot taken now.
    pub fn new(course_id: CourseId, name: impl Into<String>, unit_price: Money) -> Self {
        LineItem {
            course_id,
            name: name.into(),
            unit_price_cents: unit_price.cents(),
            added_at: Utc::now(),
        }
    }

    /// Returns the frozen unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }
}

// =============================================================================
// Order
// =============================================================================

/// The immutable snapshot produced by a successful checkout.
///
/// Carries the frozen line items and the full price breakdown so the charged
/// amount can always be traced back to its inputs. Persistence and receipt
/// delivery are the storage and notification collaborators' concerns.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub session_id: SessionId,
    /// Line items frozen at checkout time.
    pub items: Vec<LineItem>,
    /// The exact breakdown whose total was charged.
    pub breakdown: PriceBreakdown,
    /// Discount code that was applied, if any.
    pub discount_code: Option<DiscountCode>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Assembles an order snapshot from checkout inputs.
    pub fn new(
        session_id: SessionId,
        items: Vec<LineItem>,
        breakdown: PriceBreakdown,
        discount_code: Option<DiscountCode>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Order {
            id: OrderId::new(),
            session_id,
            items,
            breakdown,
            discount_code,
            created_at,
        }
    }

    /// The amount the payment collaborator must charge: always the computed
    /// total, never a client-supplied figure.
    #[inline]
    pub fn charge_amount(&self) -> Money {
        self.breakdown.total_price
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_course_id_parse() {
        assert!(CourseId::parse("550e8400-e29b-41d4-a716-446655440000").is_ok());
        assert!(CourseId::parse("  550e8400-e29b-41d4-a716-446655440000  ").is_ok());
        assert!(CourseId::parse("not-a-uuid").is_err());
        assert!(CourseId::parse("").is_err());
    }

    #[test]
    fn test_line_item_price_snapshot() {
        let item = LineItem::new(CourseId::new(), "Rust in Practice", Money::from_cents(12_000));
        assert_eq!(item.unit_price().cents(), 12_000);
        assert_eq!(item.name, "Rust in Practice");
    }

    #[test]
    fn test_order_charge_amount_is_breakdown_total() {
        let items = vec![LineItem::new(
            CourseId::new(),
            "Rust in Practice",
            Money::from_cents(12_000),
        )];
        let breakdown = PriceBreakdown {
            items_price: Money::from_cents(12_000),
            tax_price: Money::from_cents(600),
            discount_amount: Money::zero(),
            total_price: Money::from_cents(12_600),
        };
        let order = Order::new(SessionId::new(), items, breakdown, None, Utc::now());
        assert_eq!(order.charge_amount().cents(), 12_600);
    }
}
