//! # Delivery Tracker Demo
//!
//! 1.  Loads [`Settings`] from `delivery.toml` and `DELIVERY__*` variables.
//! 2.  Starts the [`DeliverySystem`] with the seeded demo orders.
//! 3.  Loads the order list and applies each status filter.
//! 4.  Tracks the first pending order until it is delivered.

use chrono::Utc;
use delivery_tracker::lifecycle::{load_settings, setup_tracing, DeliverySystem, Settings};
use delivery_tracker::model::{seed_orders, OrderStatus, ViewState};
use tracing::{error, info, Instrument};

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    let settings: Settings = load_settings();
    info!("Starting delivery tracker demo");

    let system = DeliverySystem::new(seed_orders(Utc::now()), settings);

    let mut list = system.list_controller();
    let span = tracing::info_span!("order_list");
    async {
        list.load().await;
        match list.state() {
            ViewState::Loaded(orders) => {
                for order in &orders {
                    info!(
                        order_id = %order.id,
                        item = %order.item_name,
                        status = order.status.label(),
                        date = %order.date.format("%b %-d, %Y %H:%M"),
                        "Order"
                    );
                }
            }
            ViewState::Error(message) => error!(%message, "Could not load orders"),
            other => info!(state = ?other, "Nothing to show"),
        }

        for status in [OrderStatus::Pending, OrderStatus::InTransit, OrderStatus::Delivered] {
            list.filter(Some(status));
            let count = list.state().loaded().map_or(0, Vec::len);
            info!(filter = status.label(), count, "Filtered");
        }
        list.filter(None);
    }
    .instrument(span)
    .await;

    let pending = list
        .all_orders()
        .iter()
        .find(|o| o.status == OrderStatus::Pending)
        .cloned();

    if let Some(order) = pending {
        let span = tracing::info_span!("order_tracking", order_id = %order.id);
        async {
            let mut detail = system.detail_controller(order);
            let mut states = detail.subscribe();
            detail.start_tracking();

            while detail.is_tracking() {
                if states.changed().await.is_err() {
                    break;
                }
                let state = states.borrow_and_update().clone();
                if !state.is_updating {
                    info!(status = state.order.status.label(), "Tracking update");
                }
            }

            info!(status = detail.order().status.label(), "Tracking finished");
        }
        .instrument(span)
        .await;
    } else {
        info!("No pending order to track");
    }

    drop(list);
    system.shutdown().await?;

    info!("Demo completed successfully");
    Ok(())
}
