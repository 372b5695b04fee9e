//! # Order
//!
//! A trackable purchase record.
//!
//! Everything but [`status`](Order::status) is fixed at creation. The status only
//! moves forward along [`OrderStatus::next`].
//!
//! # Wire Format
//! ```json
//! {"id": 1, "itemName": "Wireless Headphones", "status": "PENDING", "date": "2026-02-18T09:00:00Z"}
//! ```
use crate::model::OrderStatus;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for Orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub i64);

impl From<i64> for OrderId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "order_{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub item_name: String,
    pub status: OrderStatus,
    pub date: DateTime<Utc>,
}

impl Order {
    /// Creates a new Order instance.
    ///
    /// # Arguments
    /// * `id` - Unique identifier
    /// * `item_name` - Name of the purchased item
    /// * `status` - Current delivery status
    /// * `date` - When the order was placed
    pub fn new(
        id: i64,
        item_name: impl Into<String>,
        status: OrderStatus,
        date: DateTime<Utc>,
    ) -> Self {
        Self {
            id: OrderId(id),
            item_name: item_name.into(),
            status,
            date,
        }
    }

    /// Returns a copy of this order carrying `status`.
    pub fn with_status(&self, status: OrderStatus) -> Self {
        Self {
            status,
            ..self.clone()
        }
    }
}

/// The demo data set served by the mock repository.
///
/// Five orders with statuses `[pending, in_transit, delivered, in_transit, unknown]`,
/// dated relative to `now`.
pub fn seed_orders(now: DateTime<Utc>) -> Vec<Order> {
    vec![
        Order::new(1, "Wireless Headphones", OrderStatus::Pending, now),
        Order::new(
            2,
            "Running Shoes",
            OrderStatus::InTransit,
            now - Duration::seconds(86_400),
        ),
        Order::new(
            3,
            "Coffee Grinder",
            OrderStatus::Delivered,
            now - Duration::seconds(172_800),
        ),
        Order::new(
            4,
            "Coffee Maker",
            OrderStatus::InTransit,
            now - Duration::seconds(162_222),
        ),
        Order::new(
            5,
            "Tesla",
            OrderStatus::Unknown,
            now - Duration::seconds(192_222),
        ),
    ]
}
