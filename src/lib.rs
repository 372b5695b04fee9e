//! # Delivery Tracker
//!
//! > **Order list, status filter and simulated delivery tracking.**
//!
//! This crate holds the core of a small delivery app: an in-memory order store,
//! an async repository seam in front of it, and two controllers that project
//! repository results into state a UI can render.
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Data ([`model`])
//! - **Key items**: [`Order`](model::Order), [`OrderStatus`](model::OrderStatus),
//!   [`ViewState`](model::ViewState).
//! - The status transition table lives on [`OrderStatus::next`](model::OrderStatus::next).
//!
//! ### 2. The Store ([`store`])
//! A single Tokio task owns the canonical order list and processes requests
//! sequentially, so there is no lock and exactly one mutator path.
//! - **Key items**: [`OrderStore`](store::OrderStore), [`StoreClient`](store::StoreClient).
//!
//! ### 3. The Seam ([`repository`])
//! Controllers only see the two-method [`OrderRepository`](repository::OrderRepository) trait.
//! - [`MockOrderRepository`](repository::MockOrderRepository): store-backed, simulated latency and failure.
//! - [`ScriptedRepository`](repository::ScriptedRepository): expectation queue for tests.
//!
//! ### 4. The Controllers ([`controllers`])
//! - [`OrderListController`](controllers::OrderListController): `Idle → Loading → Loaded | Empty | Error`,
//!   status filter, retry.
//! - [`OrderDetailController`](controllers::OrderDetailController): timer-driven
//!   `pending → in_transit → delivered`, cancellable, stale results discarded.
//!
//! ### 5. The Orchestrator ([`lifecycle`])
//! Settings, tracing setup and [`DeliverySystem`](lifecycle::DeliverySystem), which
//! spawns the store and wires the repository into controllers.
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! # Run the demo with info logs and no artificial latency
//! RUST_LOG=info DELIVERY__FETCH_DELAY_MS=0 cargo run
//!
//! # Run tests
//! cargo test
//! ```

pub mod controllers;
pub mod lifecycle;
pub mod model;
pub mod repository;
pub mod store;
