use crate::controllers::{OrderDetailController, OrderListController};
use crate::lifecycle::Settings;
use crate::model::Order;
use crate::repository::MockOrderRepository;
use crate::store::{OrderStore, StoreClient};
use std::sync::Arc;
use tracing::{error, info};

/// The runtime orchestrator for the delivery demo.
///
/// `DeliverySystem` is responsible for:
/// - **Lifecycle Management**: Spawning the order store and shutting it down
/// - **Dependency Wiring**: Building the mock repository from [`Settings`] and
///   handing it to every controller it creates
///
/// # Example
///
/// ```ignore
/// let system = DeliverySystem::new(seed_orders(Utc::now()), Settings::default());
///
/// let mut list = system.list_controller();
/// list.load().await;
///
/// system.shutdown().await?;
/// ```
pub struct DeliverySystem {
    repository: Arc<MockOrderRepository>,
    settings: Settings,
    store_client: StoreClient,
    handle: tokio::task::JoinHandle<()>,
}

impl DeliverySystem {
    /// Spawns the order store seeded with `orders` and wires the mock repository.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn new(orders: Vec<Order>, settings: Settings) -> Self {
        let (store, store_client) = OrderStore::new(orders, settings.store_buffer);
        let handle = tokio::spawn(store.run());

        let repository = Arc::new(MockOrderRepository::from_settings(
            store_client.clone(),
            &settings,
        ));

        info!(?settings, "Delivery system started");

        Self {
            repository,
            settings,
            store_client,
            handle,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Repository shared by every controller the system builds.
    pub fn repository(&self) -> &Arc<MockOrderRepository> {
        &self.repository
    }

    /// Direct handle to the store, bypassing simulated latency.
    pub fn store(&self) -> &StoreClient {
        &self.store_client
    }

    pub fn list_controller(&self) -> OrderListController {
        OrderListController::new(self.repository.clone())
    }

    pub fn detail_controller(&self, order: Order) -> OrderDetailController {
        OrderDetailController::new(order, self.repository.clone())
            .with_tick_interval(self.settings.tick_interval())
    }

    /// Gracefully shuts down the system.
    ///
    /// Closes the store's channel by dropping the system's clients, then waits for
    /// the store task. Controllers built by this system hold a repository clone and
    /// must be dropped first, otherwise the store keeps running and this waits.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down delivery system...");

        drop(self.repository);
        drop(self.store_client);

        if let Err(e) = self.handle.await {
            error!("Order store task failed: {:?}", e);
            return Err(format!("Order store task failed: {:?}", e));
        }

        info!("Delivery system shutdown complete.");
        Ok(())
    }
}
