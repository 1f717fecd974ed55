//! # Cart Module
//!
//! The shopping cart: an insertion-ordered collection of course line items
//! belonging to one session.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  Frontend Action          Operation               Cart Change           │
//! │  ───────────────          ─────────               ───────────           │
//! │                                                                         │
//! │  Click "Enroll" ─────────► add_item() ──────────► items.push(item)     │
//! │                            (no-op if the course is already present)    │
//! │                                                                         │
//! │  Click "Remove" ─────────► remove_item() ───────► items.remove(i)      │
//! │                                                                         │
//! │  Order placed ───────────► clear() ─────────────► items.clear()        │
//! │                                                                         │
//! │  View cart ──────────────► items_price() ───────► (derived, not        │
//! │                                                    stored)              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - No two items share a `course_id` (a course is bought once; adding an
//!   already-present course is a no-op, never a duplicate)
//! - Derived totals are recomputed from `items` on every read, so they can
//!   never drift from the line items
//! - Maximum items: [`crate::MAX_CART_ITEMS`]

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{CourseId, LineItem, SessionId};
use crate::validation::validate_price_cents;
use crate::MAX_CART_ITEMS;

/// The shopping cart for one session.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    /// Session (user or anonymous) this cart belongs to.
    pub session_id: SessionId,

    /// Line items in insertion order.
    pub items: Vec<LineItem>,

    /// When the cart was created/last cleared.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl Cart {
    /// Creates a new empty cart for a session.
    pub fn new(session_id: SessionId) -> Self {
        Cart {
            session_id,
            items: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Adds a course to the cart, freezing its price at this moment.
    ///
    /// ## Behavior
    /// - If the course is already in the cart: no-op (the original price
    ///   snapshot wins; repricing is remove + re-add)
    /// - Rejects negative prices and over-full carts
    ///
    /// ## Example
    /// ```rust
    /// use skillcart_core::cart::Cart;
    /// use skillcart_core::money::Money;
    /// use skillcart_core::types::{CourseId, SessionId};
    ///
    /// let mut cart = Cart::new(SessionId::new());
    /// let course = CourseId::new();
    ///
    /// cart.add_item(course, "Rust in Practice", Money::from_cents(12_000)).unwrap();
    /// cart.add_item(course, "Rust in Practice", Money::from_cents(9_999)).unwrap();
    ///
    /// // Second add was a no-op: one item, original price kept
    /// assert_eq!(cart.item_count(), 1);
    /// assert_eq!(cart.items_price().cents(), 12_000);
    /// ```
    pub fn add_item(
        &mut self,
        course_id: CourseId,
        name: &str,
        unit_price: Money,
    ) -> CoreResult<()> {
        validate_price_cents(unit_price.cents())?;

        if self.contains(course_id) {
            return Ok(());
        }

        if self.items.len() >= MAX_CART_ITEMS {
            return Err(CoreError::CartTooLarge {
                max: MAX_CART_ITEMS,
            });
        }

        self.items.push(LineItem::new(course_id, name, unit_price));
        Ok(())
    }

    /// Removes a course from the cart.
    pub fn remove_item(&mut self, course_id: CourseId) -> CoreResult<()> {
        let initial_len = self.items.len();
        self.items.retain(|i| i.course_id != course_id);

        if self.items.len() == initial_len {
            Err(CoreError::CourseNotInCart(course_id))
        } else {
            Ok(())
        }
    }

    /// Clears all items. Called once an order has been created from this
    /// cart.
    pub fn clear(&mut self) {
        self.items.clear();
        self.created_at = Utc::now();
    }

    /// Checks whether a course is already in the cart.
    pub fn contains(&self, course_id: CourseId) -> bool {
        self.items.iter().any(|i| i.course_id == course_id)
    }

    /// Returns the number of courses in the cart.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Calculates the item subtotal (before tax and discount).
    ///
    /// Derived on every read; never stored.
    pub fn items_price(&self) -> Money {
        self.items.iter().map(|i| i.unit_price()).sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
