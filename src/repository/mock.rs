//! # Mock Order Repository
//!
//! Serves orders from an [`OrderStore`](crate::store::OrderStore) and simulates
//! a slow, occasionally failing backend.
//!
//! | Operation      | Delay                 | Failure flag honoured |
//! |----------------|-----------------------|-----------------------|
//! | `list_orders`  | `fetch_delay`         | yes                   |
//! | `update_order` | `update_delay`        | no                    |

use crate::lifecycle::Settings;
use crate::model::{Order, OrderId, OrderStatus};
use crate::repository::{OrderRepository, RepositoryError};
use crate::store::StoreClient;
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tracing::{debug, instrument};

pub struct MockOrderRepository {
    store: StoreClient,
    fetch_delay: Duration,
    update_delay: Duration,
    should_fail: AtomicBool,
}

impl MockOrderRepository {
    /// Default delay before `list_orders` answers.
    pub const DEFAULT_FETCH_DELAY: Duration = Duration::from_secs(2);
    /// Default delay before `update_order` answers.
    pub const DEFAULT_UPDATE_DELAY: Duration = Duration::from_millis(500);

    pub fn new(store: StoreClient) -> Self {
        Self {
            store,
            fetch_delay: Self::DEFAULT_FETCH_DELAY,
            update_delay: Self::DEFAULT_UPDATE_DELAY,
            should_fail: AtomicBool::new(false),
        }
    }

    /// Builds a repository with delays and failure flag taken from `settings`.
    pub fn from_settings(store: StoreClient, settings: &Settings) -> Self {
        Self::new(store)
            .with_fetch_delay(settings.fetch_delay())
            .with_update_delay(settings.update_delay())
            .with_should_fail(settings.should_fail)
    }

    pub fn with_fetch_delay(mut self, delay: Duration) -> Self {
        self.fetch_delay = delay;
        self
    }

    pub fn with_update_delay(mut self, delay: Duration) -> Self {
        self.update_delay = delay;
        self
    }

    pub fn with_should_fail(self, should_fail: bool) -> Self {
        self.set_should_fail(should_fail);
        self
    }

    /// Makes subsequent `list_orders` calls fail (or succeed again).
    pub fn set_should_fail(&self, should_fail: bool) {
        self.should_fail.store(should_fail, Ordering::SeqCst);
    }

    pub fn should_fail(&self) -> bool {
        self.should_fail.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl OrderRepository for MockOrderRepository {
    #[instrument(skip(self))]
    async fn list_orders(&self) -> Result<Vec<Order>, RepositoryError> {
        tokio::time::sleep(self.fetch_delay).await;

        if self.should_fail() {
            debug!("Injected fetch failure");
            return Err(RepositoryError::fetch_failed());
        }

        let orders = self.store.list().await?;
        debug!(count = orders.len(), "Fetched orders");
        Ok(orders)
    }

    #[instrument(skip(self, id, status), fields(order_id = %id, status = %status))]
    async fn update_order(
        &self,
        id: OrderId,
        status: OrderStatus,
    ) -> Result<Order, RepositoryError> {
        tokio::time::sleep(self.update_delay).await;

        let order = self.store.update_status(id, status).await?;
        debug!("Order updated");
        Ok(order)
    }
}
