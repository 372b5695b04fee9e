//! # Observability & Tracing
//!
//! Structured logging for the store, repository and controllers, built on the
//! `tracing` crate.
//!
//! ## What Gets Traced
//!
//! - **Store Lifecycle**: Startup, shutdown and final order count
//! - **Store Operations**: List, Get and UpdateStatus with order ids
//! - **Repository Calls**: `list_orders` / `update_order` spans carrying `order_id` and `status`
//! - **Controller Flow**: load, filter, tracking start/stop, advances and discarded results
//!
//! ## Usage Examples
//!
//! ```bash
//! # Compact logs
//! RUST_LOG=info cargo run
//!
//! # Every store request and repository span
//! RUST_LOG=debug cargo run
//!
//! # Only the controllers
//! RUST_LOG=delivery_tracker::controllers=debug cargo run
//! ```
//!
//! **With `RUST_LOG=info`**:
//!
//! ```text
//! INFO Order store started count=5
//! INFO Orders loaded shown=4 hidden=1
//! INFO Tracking started order_id=order_1
//! INFO Status updated order_id=order_1 from=PENDING to=IN_TRANSIT
//! INFO Order advanced order_id=order_1 status=IN_TRANSIT
//! ```

/// Initializes the global subscriber. Call once from the binary.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
