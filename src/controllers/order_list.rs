//! # Order List Controller
//!
//! Loads orders through an [`OrderRepository`], hides unsupported statuses and
//! projects the (optionally filtered) result into a [`ViewState`].
//!
//! ```text
//! Idle ──load()──▶ Loading ──ok──▶ Loaded(orders) | Empty
//!                     │
//!                     └──err──▶ Error(message) ──retry()──▶ Loading
//!
//! Loaded | Empty ──filter()──▶ Loaded(subset) | Empty     (no repository call)
//! ```

use crate::model::{Order, OrderStatus, ViewState};
use crate::repository::OrderRepository;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info, instrument, warn};

pub type OrderListState = ViewState<Vec<Order>>;

pub struct OrderListController {
    repository: Arc<dyn OrderRepository>,
    all_orders: Vec<Order>,
    selected_filter: Option<OrderStatus>,
    state: watch::Sender<OrderListState>,
}

impl OrderListController {
    pub fn new(repository: Arc<dyn OrderRepository>) -> Self {
        let (state, _) = watch::channel(ViewState::Idle);
        Self {
            repository,
            all_orders: Vec::new(),
            selected_filter: None,
            state,
        }
    }

    /// Current view-state.
    pub fn state(&self) -> OrderListState {
        self.state.borrow().clone()
    }

    /// Receiver that observes every view-state change.
    pub fn subscribe(&self) -> watch::Receiver<OrderListState> {
        self.state.subscribe()
    }

    /// `None` means "all".
    pub fn selected_filter(&self) -> Option<OrderStatus> {
        self.selected_filter
    }

    /// The last loaded set, after unsupported statuses were removed.
    pub fn all_orders(&self) -> &[Order] {
        &self.all_orders
    }

    /// Fetches orders and recomputes the view-state for the current filter.
    #[instrument(skip(self))]
    pub async fn load(&mut self) {
        self.state.send_replace(ViewState::Loading);

        match self.repository.list_orders().await {
            Ok(orders) => {
                let fetched = orders.len();
                self.all_orders = orders
                    .into_iter()
                    .filter(|o| o.status != OrderStatus::Unknown)
                    .collect();
                info!(
                    shown = self.all_orders.len(),
                    hidden = fetched - self.all_orders.len(),
                    "Orders loaded"
                );
                self.apply_filter();
            }
            Err(e) => {
                warn!(error = %e, code = e.code(), "Failed to load orders");
                self.state.send_replace(ViewState::Error(e.to_string()));
            }
        }
    }

    /// Selects a status filter (`None` for all) and recomputes the view-state.
    ///
    /// Works on the already loaded set; never calls the repository.
    pub fn filter(&mut self, selected: Option<OrderStatus>) {
        self.selected_filter = selected;
        self.apply_filter();
    }

    pub async fn retry(&mut self) {
        self.load().await
    }

    /// Pull-to-refresh. Same as [`load`](Self::load).
    pub async fn refresh(&mut self) {
        self.load().await
    }

    fn apply_filter(&mut self) {
        if self.all_orders.is_empty() {
            self.state.send_replace(ViewState::Empty);
            return;
        }

        let filtered: Vec<Order> = match self.selected_filter {
            None => self.all_orders.clone(),
            Some(status) => self
                .all_orders
                .iter()
                .filter(|o| o.status == status)
                .cloned()
                .collect(),
        };
        debug!(filter = ?self.selected_filter, count = filtered.len(), "Filter applied");

        let next = if filtered.is_empty() {
            ViewState::Empty
        } else {
            ViewState::Loaded(filtered)
        };
        self.state.send_replace(next);
    }
}
