//! # Store Errors

use crate::model::OrderId;

/// Errors raised while talking to the [`OrderStore`](crate::store::OrderStore).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StoreError {
    #[error("Order store closed")]
    Closed,
    #[error("Order store dropped response channel")]
    Dropped,
    #[error("Order not found: {0}")]
    NotFound(OrderId),
}
