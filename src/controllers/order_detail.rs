//! # Order Detail Controller
//!
//! Owns one order and, while tracking, advances its status through the
//! repository on a fixed tick until the status is terminal.
//!
//! ## Tracking Task
//!
//! [`start_tracking`](OrderDetailController::start_tracking) spawns a Tokio task
//! that waits one interval, calls `advance()`, and repeats. The task stops on its
//! own when the order reaches a terminal status, when
//! [`stop_tracking`](OrderDetailController::stop_tracking) is called, or when the
//! controller is dropped.
//!
//! An `advance()` that is already waiting on the repository when tracking stops
//! is not aborted: the repository call completes, but its result is discarded.
//! Every tracking session has an epoch; stopping bumps it, and an update whose
//! epoch no longer matches never reaches the published state, including its
//! `is_updating` reset. Stopping clears `is_updating` itself.

use crate::model::{Order, OrderStatus};
use crate::repository::OrderRepository;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{oneshot, watch};
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info, instrument, warn};

/// Default period between status advances.
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_secs(3);

/// Everything the detail view renders.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailState {
    pub order: Order,
    /// True while an `update_order` call is in flight.
    pub is_updating: bool,
    /// True while the periodic tick is active.
    pub is_tracking: bool,
}

/// Result of a single `advance()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvanceOutcome {
    /// The order moved to this status.
    Advanced(OrderStatus),
    /// The status is terminal; nothing was requested.
    Terminal,
    /// The repository call failed; the order is unchanged.
    Failed,
    /// Tracking stopped while the call was in flight; the result was dropped.
    Discarded,
}

/// State shared between the controller and its tracking task.
struct Tracker {
    repository: Arc<dyn OrderRepository>,
    state: watch::Sender<DetailState>,
    epoch: AtomicU64,
}

impl Tracker {
    fn current_epoch(&self) -> u64 {
        self.epoch.load(Ordering::SeqCst)
    }

    /// Invalidates every in-flight advance started under the current epoch.
    fn bump_epoch(&self) -> u64 {
        self.epoch.fetch_add(1, Ordering::SeqCst) + 1
    }

    async fn advance(&self, epoch: u64) -> AdvanceOutcome {
        let order = self.state.borrow().order.clone();

        let Some(next) = order.status.next() else {
            debug!(order_id = %order.id, status = %order.status, "Status is terminal");
            return AdvanceOutcome::Terminal;
        };

        self.state.send_modify(|s| s.is_updating = true);
        let result = self.repository.update_order(order.id, next).await;

        // A newer session may own is_updating by now
        if self.current_epoch() != epoch {
            debug!(order_id = %order.id, "Discarding update that arrived after tracking stopped");
            return AdvanceOutcome::Discarded;
        }

        let outcome = match result {
            Ok(updated) => {
                info!(order_id = %updated.id, status = %updated.status, "Order advanced");
                let status = updated.status;
                self.state.send_modify(|s| s.order = updated);
                AdvanceOutcome::Advanced(status)
            }
            Err(e) => {
                warn!(order_id = %order.id, error = %e, "Failed to update order");
                AdvanceOutcome::Failed
            }
        };

        self.state.send_modify(|s| s.is_updating = false);
        outcome
    }

    fn finish_tracking(&self, epoch: u64) {
        if self.current_epoch() == epoch {
            self.state.send_modify(|s| s.is_tracking = false);
        }
    }
}

/// Handle to a running tracking task. Dropping it cancels the task.
struct TrackingTask {
    _cancel: oneshot::Sender<()>,
}

pub struct OrderDetailController {
    tracker: Arc<Tracker>,
    tick_interval: Duration,
    tracking: Option<TrackingTask>,
}

impl OrderDetailController {
    pub fn new(order: Order, repository: Arc<dyn OrderRepository>) -> Self {
        let (state, _) = watch::channel(DetailState {
            order,
            is_updating: false,
            is_tracking: false,
        });
        Self {
            tracker: Arc::new(Tracker {
                repository,
                state,
                epoch: AtomicU64::new(0),
            }),
            tick_interval: DEFAULT_TICK_INTERVAL,
            tracking: None,
        }
    }

    pub fn with_tick_interval(mut self, tick_interval: Duration) -> Self {
        self.tick_interval = tick_interval;
        self
    }

    pub fn order(&self) -> Order {
        self.tracker.state.borrow().order.clone()
    }

    pub fn is_updating(&self) -> bool {
        self.tracker.state.borrow().is_updating
    }

    pub fn is_tracking(&self) -> bool {
        self.tracker.state.borrow().is_tracking
    }

    pub fn state(&self) -> DetailState {
        self.tracker.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<DetailState> {
        self.tracker.state.subscribe()
    }

    /// Starts the periodic status tick.
    ///
    /// Does nothing if the order is already delivered or tracking is active.
    /// Must be called from within a Tokio runtime.
    #[instrument(skip(self), fields(order_id = %self.order().id))]
    pub fn start_tracking(&mut self) {
        if self.order().status == OrderStatus::Delivered {
            debug!("Already delivered, not tracking");
            return;
        }
        if self.is_tracking() {
            debug!("Already tracking");
            return;
        }

        let epoch = self.tracker.bump_epoch();
        let (cancel, cancelled) = oneshot::channel();
        self.tracker.state.send_modify(|s| s.is_tracking = true);

        tokio::spawn(run_ticks(
            self.tracker.clone(),
            epoch,
            self.tick_interval,
            cancelled,
        ));
        self.tracking = Some(TrackingTask { _cancel: cancel });
        info!(every = ?self.tick_interval, "Tracking started");
    }

    /// Stops the periodic tick. Safe to call repeatedly.
    pub fn stop_tracking(&mut self) {
        let Some(task) = self.tracking.take() else {
            return;
        };
        self.tracker.bump_epoch();
        drop(task);
        self.tracker.state.send_modify(|s| {
            s.is_tracking = false;
            s.is_updating = false;
        });
        info!(order_id = %self.order().id, "Tracking stopped");
    }

    /// Advances the order one step along the transition table.
    ///
    /// On a terminal status nothing is requested and tracking stops.
    pub async fn advance(&mut self) -> AdvanceOutcome {
        let outcome = self.tracker.advance(self.tracker.current_epoch()).await;
        if outcome == AdvanceOutcome::Terminal {
            self.stop_tracking();
        }
        outcome
    }
}

impl Drop for OrderDetailController {
    fn drop(&mut self) {
        self.stop_tracking();
    }
}

async fn run_ticks(
    tracker: Arc<Tracker>,
    epoch: u64,
    period: Duration,
    mut cancelled: oneshot::Receiver<()>,
) {
    // interval_at panics on a zero period
    let period = period.max(Duration::from_millis(1));
    let mut ticks = tokio::time::interval_at(Instant::now() + period, period);
    ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            // Resolves when the controller drops its TrackingTask.
            _ = &mut cancelled => break,
            _ = ticks.tick() => {
                if tracker.current_epoch() != epoch {
                    break;
                }
                if tracker.advance(epoch).await == AdvanceOutcome::Terminal {
                    tracker.finish_tracking(epoch);
                    break;
                }
            }
        }
    }

    debug!(epoch, "Tracking task finished");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::ScriptedRepository;
    use chrono::Utc;

    fn order(status: OrderStatus) -> Order {
        Order::new(1, "Test Item", status, Utc::now())
    }

    #[test]
    fn test_initial_state() {
        let controller =
            OrderDetailController::new(order(OrderStatus::Pending), Arc::new(ScriptedRepository::new()));

        assert_eq!(controller.order().status, OrderStatus::Pending);
        assert!(!controller.is_updating());
        assert!(!controller.is_tracking());
    }

    #[tokio::test]
    async fn test_start_tracking_delivered_is_noop() {
        let repo = ScriptedRepository::new();
        let mut controller =
            OrderDetailController::new(order(OrderStatus::Delivered), Arc::new(repo.clone()));

        controller.start_tracking();

        assert!(!controller.is_tracking());
        assert!(repo.calls().is_empty());
    }

    #[tokio::test]
    async fn test_stop_tracking_is_idempotent() {
        let repo = ScriptedRepository::new();
        let mut controller =
            OrderDetailController::new(order(OrderStatus::Pending), Arc::new(repo.clone()));

        controller.stop_tracking();
        controller.start_tracking();
        assert!(controller.is_tracking());

        controller.stop_tracking();
        controller.stop_tracking();
        assert!(!controller.is_tracking());
        repo.verify();
    }

    #[tokio::test]
    async fn test_unknown_status_stops_tracking() {
        let repo = ScriptedRepository::new();
        let mut controller =
            OrderDetailController::new(order(OrderStatus::Unknown), Arc::new(repo.clone()));

        controller.start_tracking();
        assert!(controller.is_tracking());

        assert_eq!(controller.advance().await, AdvanceOutcome::Terminal);
        assert!(!controller.is_tracking());
        assert_eq!(controller.order().status, OrderStatus::Unknown);
        assert_eq!(repo.update_calls(), 0);
    }
}
