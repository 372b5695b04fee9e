use chrono::Utc;
use delivery_tracker::controllers::{AdvanceOutcome, OrderDetailController};
use delivery_tracker::model::{seed_orders, Order, OrderId, OrderStatus};
use delivery_tracker::repository::{MockOrderRepository, RepositoryError, ScriptedRepository};
use delivery_tracker::store::{OrderStore, StoreClient};
use std::sync::Arc;
use std::time::Duration;

fn order(status: OrderStatus) -> Order {
    Order::new(1, "Test", status, Utc::now())
}

/// Seeded store plus a mock repository with the default 500ms update latency.
fn store_backed() -> (StoreClient, Arc<MockOrderRepository>) {
    let (store, client) = OrderStore::new(seed_orders(Utc::now()), 8);
    tokio::spawn(store.run());
    let repo = MockOrderRepository::new(client.clone()).with_fetch_delay(Duration::ZERO);
    (client, Arc::new(repo))
}

#[tokio::test]
async fn test_advance_pending_to_in_transit() {
    let repo = ScriptedRepository::new();
    repo.expect_update(OrderId(1))
        .return_ok(order(OrderStatus::InTransit));
    let mut controller = OrderDetailController::new(order(OrderStatus::Pending), Arc::new(repo.clone()));

    let outcome = controller.advance().await;

    assert_eq!(outcome, AdvanceOutcome::Advanced(OrderStatus::InTransit));
    assert_eq!(controller.order().status, OrderStatus::InTransit);
    assert!(!controller.is_updating());
    repo.verify();
}

#[tokio::test]
async fn test_advance_to_delivered_then_stays_delivered() {
    let repo = ScriptedRepository::new();
    repo.expect_update(OrderId(1))
        .return_ok(order(OrderStatus::Delivered));
    let mut controller =
        OrderDetailController::new(order(OrderStatus::InTransit), Arc::new(repo.clone()));

    controller.advance().await;
    assert_eq!(controller.order().status, OrderStatus::Delivered);

    assert_eq!(controller.advance().await, AdvanceOutcome::Terminal);
    assert_eq!(controller.order().status, OrderStatus::Delivered);
    assert_eq!(repo.update_calls(), 1);
    repo.verify();
}

#[tokio::test]
async fn test_delivered_order_never_calls_update() {
    let repo = ScriptedRepository::new();
    let mut controller =
        OrderDetailController::new(order(OrderStatus::Delivered), Arc::new(repo.clone()));

    assert_eq!(controller.advance().await, AdvanceOutcome::Terminal);

    assert_eq!(controller.order().status, OrderStatus::Delivered);
    assert!(repo.calls().is_empty());
    repo.verify();
}

#[tokio::test]
async fn test_failed_update_leaves_order_unchanged() {
    let repo = ScriptedRepository::new();
    repo.expect_update(OrderId(1))
        .return_err(RepositoryError::NotFound(OrderId(1)));
    let mut controller = OrderDetailController::new(order(OrderStatus::Pending), Arc::new(repo.clone()));

    assert_eq!(controller.advance().await, AdvanceOutcome::Failed);

    assert_eq!(controller.order().status, OrderStatus::Pending);
    assert!(!controller.is_updating());
    repo.verify();
}

#[tokio::test]
async fn test_is_updating_while_request_in_flight() {
    let repo = ScriptedRepository::new();
    repo.expect_update(OrderId(1))
        .after(Duration::from_millis(20))
        .return_ok(order(OrderStatus::InTransit));
    let mut controller = OrderDetailController::new(order(OrderStatus::Pending), Arc::new(repo));
    let mut states = controller.subscribe();

    let advance = tokio::spawn(async move {
        controller.advance().await;
        controller
    });

    states.changed().await.unwrap();
    assert!(states.borrow_and_update().is_updating);

    let controller = advance.await.unwrap();
    assert!(!controller.is_updating());
    assert_eq!(controller.order().status, OrderStatus::InTransit);
}

#[tokio::test(start_paused = true)]
async fn test_tracking_reaches_delivered_and_stops() {
    let (store, repo) = store_backed();
    let pending = store.get(OrderId(1)).await.unwrap().unwrap();
    let mut controller = OrderDetailController::new(pending, repo);

    controller.start_tracking();
    assert!(controller.is_tracking());

    // First tick at 3s, update answers at 3.5s
    tokio::time::sleep(Duration::from_millis(3_600)).await;
    assert_eq!(controller.order().status, OrderStatus::InTransit);

    // Second tick at 6s
    tokio::time::sleep(Duration::from_secs(3)).await;
    assert_eq!(controller.order().status, OrderStatus::Delivered);
    assert!(controller.is_tracking());

    // Third tick at 9s finds a terminal status and ends tracking
    tokio::time::sleep(Duration::from_secs(3)).await;
    assert!(!controller.is_tracking());
    assert_eq!(
        store.get(OrderId(1)).await.unwrap().unwrap().status,
        OrderStatus::Delivered
    );
}

#[tokio::test(start_paused = true)]
async fn test_result_after_stop_is_discarded() {
    let (store, repo) = store_backed();
    let pending = store.get(OrderId(1)).await.unwrap().unwrap();
    let mut controller = OrderDetailController::new(pending, repo);

    controller.start_tracking();

    // Tick fired at 3s, update still in flight until 3.5s
    tokio::time::sleep(Duration::from_millis(3_100)).await;
    assert!(controller.is_updating());
    controller.stop_tracking();

    tokio::time::sleep(Duration::from_secs(1)).await;

    // The store applied the write, the controller dropped the late result
    assert_eq!(
        store.get(OrderId(1)).await.unwrap().unwrap().status,
        OrderStatus::InTransit
    );
    assert_eq!(controller.order().status, OrderStatus::Pending);
    assert!(!controller.is_updating());
    assert!(!controller.is_tracking());

    // No further ticks after stopping
    tokio::time::sleep(Duration::from_secs(10)).await;
    assert_eq!(controller.order().status, OrderStatus::Pending);
}

#[tokio::test(start_paused = true)]
async fn test_dropping_controller_cancels_tracking() {
    let repo = ScriptedRepository::new();
    let controller = {
        let mut controller =
            OrderDetailController::new(order(OrderStatus::Pending), Arc::new(repo.clone()));
        controller.start_tracking();
        controller
    };
    drop(controller);

    tokio::time::sleep(Duration::from_secs(10)).await;
    assert!(repo.calls().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_start_tracking_twice_keeps_one_tick() {
    let repo = ScriptedRepository::new();
    repo.expect_update(OrderId(1))
        .return_ok(order(OrderStatus::InTransit));
    let mut controller = OrderDetailController::new(order(OrderStatus::Pending), Arc::new(repo.clone()))
        .with_tick_interval(Duration::from_secs(3));

    controller.start_tracking();
    controller.start_tracking();

    tokio::time::sleep(Duration::from_millis(3_100)).await;

    assert_eq!(repo.update_calls(), 1);
    assert_eq!(controller.order().status, OrderStatus::InTransit);
    controller.stop_tracking();
    repo.verify();
}

#[tokio::test(start_paused = true)]
async fn test_restart_keeps_is_updating_for_new_session() {
    let (store, repo) = store_backed();
    let pending = store.get(OrderId(1)).await.unwrap().unwrap();
    let mut controller =
        OrderDetailController::new(pending, repo).with_tick_interval(Duration::from_millis(100));

    // Old session's update runs 100ms..600ms
    controller.start_tracking();
    tokio::time::sleep(Duration::from_millis(150)).await;
    assert!(controller.is_updating());

    // New session's first update runs 250ms..750ms
    controller.stop_tracking();
    assert!(!controller.is_updating());
    controller.start_tracking();

    // The old result landed at 600ms and was dropped without touching the flag
    tokio::time::sleep(Duration::from_millis(500)).await;
    assert!(controller.is_updating());
    assert_eq!(controller.order().status, OrderStatus::Pending);

    tokio::time::sleep(Duration::from_millis(150)).await;
    assert_eq!(controller.order().status, OrderStatus::InTransit);

    controller.stop_tracking();
}
