//! # Order Status
//!
//! The delivery lifecycle of an [`Order`](crate::model::Order) and its fixed
//! forward-only transition table.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::Display;

/// Delivery status of an order.
///
/// On the wire the status is one of the case-sensitive tokens `"PENDING"`,
/// `"IN_TRANSIT"`, `"DELIVERED"` or `"UNKNOWN"`. Any other token decodes to
/// [`OrderStatus::Unknown`], so statuses introduced by a newer backend are
/// carried through instead of failing the whole payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderStatus {
    /// Placed, not yet shipped.
    Pending,
    /// Handed to the carrier.
    InTransit,
    /// Arrived. Terminal.
    Delivered,
    /// Unsupported or unrecognized status. Terminal, and hidden from lists.
    Unknown,
}

impl OrderStatus {
    /// Every status in declaration order.
    pub const ALL: [OrderStatus; 4] = [
        OrderStatus::Pending,
        OrderStatus::InTransit,
        OrderStatus::Delivered,
        OrderStatus::Unknown,
    ];

    /// The next status in the delivery lifecycle, or `None` for terminal statuses.
    ///
    /// | current      | next         |
    /// |--------------|--------------|
    /// | `Pending`    | `InTransit`  |
    /// | `InTransit`  | `Delivered`  |
    /// | `Delivered`  | none         |
    /// | `Unknown`    | none         |
    pub fn next(self) -> Option<OrderStatus> {
        match self {
            OrderStatus::Pending => Some(OrderStatus::InTransit),
            OrderStatus::InTransit => Some(OrderStatus::Delivered),
            OrderStatus::Delivered | OrderStatus::Unknown => None,
        }
    }

    /// Returns true when no automatic transition leaves this status.
    pub fn is_terminal(self) -> bool {
        self.next().is_none()
    }

    /// The wire token for this status.
    pub fn as_wire(self) -> &'static str {
        match self {
            OrderStatus::Pending => "PENDING",
            OrderStatus::InTransit => "IN_TRANSIT",
            OrderStatus::Delivered => "DELIVERED",
            OrderStatus::Unknown => "UNKNOWN",
        }
    }

    /// Decodes a wire token. Unrecognized tokens map to `Unknown`.
    pub fn from_wire(token: &str) -> OrderStatus {
        match token {
            "PENDING" => OrderStatus::Pending,
            "IN_TRANSIT" => OrderStatus::InTransit,
            "DELIVERED" => OrderStatus::Delivered,
            _ => OrderStatus::Unknown,
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::InTransit => "In Transit",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Unknown => "Unknown",
        }
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_wire())
    }
}

impl Serialize for OrderStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_wire())
    }
}

impl<'de> Deserialize<'de> for OrderStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let token = String::deserialize(deserializer)?;
        Ok(OrderStatus::from_wire(&token))
    }
}
