//! # Order Store Task
//!
//! The `OrderStore` owns the canonical order list and the receiver end of its
//! channel. It processes requests one at a time, so the list needs no lock and
//! there is exactly one mutator path.

use crate::model::Order;
use crate::store::{StoreClient, StoreError, StoreRequest};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// The store task.
///
/// # Usage Pattern
///
/// 1.  **Create**: Call `OrderStore::new()` to get the `store` (server) and `client` (interface).
/// 2.  **Run**: Spawn `store.run()` in a background task.
/// 3.  **Use**: Clone the client wherever orders must be read or updated.
///
/// ```rust
/// use delivery_tracker::model::{seed_orders, OrderStatus};
/// use delivery_tracker::store::OrderStore;
///
/// #[tokio::main]
/// async fn main() {
///     let (store, client) = OrderStore::new(seed_orders(chrono::Utc::now()), 8);
///     tokio::spawn(store.run());
///
///     let orders = client.list().await.unwrap();
///     assert_eq!(orders.len(), 5);
///
///     let updated = client.update_status(orders[0].id, OrderStatus::InTransit).await.unwrap();
///     assert_eq!(updated.status, OrderStatus::InTransit);
/// }
/// ```
///
/// Orders are kept in insertion order; `List` answers with a snapshot in that order.
pub struct OrderStore {
    receiver: mpsc::Receiver<StoreRequest>,
    orders: Vec<Order>,
}

impl OrderStore {
    /// Creates a new `OrderStore` seeded with `orders` and its associated `StoreClient`.
    ///
    /// # Arguments
    ///
    /// * `orders` - Initial contents, in display order.
    /// * `buffer_size` - The capacity of the MPSC channel. If the channel is full,
    ///   calls to the client will wait until there is space.
    pub fn new(orders: Vec<Order>, buffer_size: usize) -> (Self, StoreClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let store = Self { receiver, orders };
        (store, StoreClient::new(sender))
    }

    /// Runs the store's event loop until every client has been dropped.
    pub async fn run(mut self) {
        info!(count = self.orders.len(), "Order store started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                StoreRequest::List { respond_to } => {
                    debug!(count = self.orders.len(), "List");
                    let _ = respond_to.send(Ok(self.orders.clone()));
                }
                StoreRequest::Get { id, respond_to } => {
                    let order = self.orders.iter().find(|o| o.id == id).cloned();
                    debug!(%id, found = order.is_some(), "Get");
                    let _ = respond_to.send(Ok(order));
                }
                StoreRequest::UpdateStatus {
                    id,
                    status,
                    respond_to,
                } => {
                    debug!(%id, %status, "UpdateStatus");
                    match self.orders.iter_mut().find(|o| o.id == id) {
                        Some(order) => {
                            let previous = order.status;
                            order.status = status;
                            info!(%id, from = %previous, to = %status, "Status updated");
                            let _ = respond_to.send(Ok(order.clone()));
                        }
                        None => {
                            warn!(%id, "Not found");
                            let _ = respond_to.send(Err(StoreError::NotFound(id)));
                        }
                    }
                }
            }
        }

        info!(count = self.orders.len(), "Order store shutdown");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{seed_orders, OrderId, OrderStatus};
    use chrono::Utc;

    #[tokio::test]
    async fn test_list_preserves_order() {
        let seeded = seed_orders(Utc::now());
        let (store, client) = OrderStore::new(seeded.clone(), 4);
        tokio::spawn(store.run());

        let listed = client.list().await.unwrap();
        assert_eq!(listed, seeded);
    }

    #[tokio::test]
    async fn test_update_missing_order_leaves_store_untouched() {
        let seeded = seed_orders(Utc::now());
        let (store, client) = OrderStore::new(seeded.clone(), 4);
        tokio::spawn(store.run());

        let result = client.update_status(OrderId(99), OrderStatus::Delivered).await;
        assert_eq!(result, Err(StoreError::NotFound(OrderId(99))));
        assert_eq!(client.list().await.unwrap(), seeded);
    }

    #[tokio::test]
    async fn test_get_reflects_update() {
        let (store, client) = OrderStore::new(seed_orders(Utc::now()), 4);
        tokio::spawn(store.run());

        client
            .update_status(OrderId(1), OrderStatus::InTransit)
            .await
            .unwrap();
        let order = client.get(OrderId(1)).await.unwrap().unwrap();
        assert_eq!(order.status, OrderStatus::InTransit);
        assert!(client.get(OrderId(42)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_store_exits_when_clients_dropped() {
        let (store, client) = OrderStore::new(Vec::new(), 4);
        let handle = tokio::spawn(store.run());

        drop(client);
        handle.await.unwrap();
    }
}
