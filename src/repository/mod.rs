//! The boundary between controllers and whatever data source backs them.
//!
//! Controllers only ever see [`OrderRepository`]. Concrete sources:
//!
//! - [`MockOrderRepository`] - backed by the [`OrderStore`](crate::store::OrderStore),
//!   with simulated latency and failure injection
//! - [`ScriptedRepository`] - expectation queue for unit tests

pub mod error;
pub mod mock;
pub mod scripted;

pub use error::RepositoryError;
pub use mock::MockOrderRepository;
pub use scripted::ScriptedRepository;

use crate::model::{Order, OrderId, OrderStatus};
use async_trait::async_trait;

/// Two-method surface every order data source implements.
#[async_trait]
pub trait OrderRepository: Send + Sync + 'static {
    /// Snapshot of all orders.
    async fn list_orders(&self) -> Result<Vec<Order>, RepositoryError>;

    /// Sets the status of order `id` and returns the updated record.
    async fn update_order(
        &self,
        id: OrderId,
        status: OrderStatus,
    ) -> Result<Order, RepositoryError>;
}
