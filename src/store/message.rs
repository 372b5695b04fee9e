//! # Store Messages
//!
//! Requests sent from a [`StoreClient`](crate::store::StoreClient) to the
//! [`OrderStore`](crate::store::OrderStore) task. Every request carries a
//! one-shot channel the store answers on.

use crate::model::{Order, OrderId, OrderStatus};
use crate::store::StoreError;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by the store.
pub type Response<T> = oneshot::Sender<Result<T, StoreError>>;

#[derive(Debug)]
pub enum StoreRequest {
    /// Snapshot of every order, in store order.
    List { respond_to: Response<Vec<Order>> },
    /// A single order by id.
    Get {
        id: OrderId,
        respond_to: Response<Option<Order>>,
    },
    /// Overwrite one order's status and answer with the updated record.
    UpdateStatus {
        id: OrderId,
        status: OrderStatus,
        respond_to: Response<Order>,
    },
}
