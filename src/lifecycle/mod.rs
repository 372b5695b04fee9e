//! # System Lifecycle & Orchestration
//!
//! Wiring for the delivery demo: configuration, logging and the
//! [`DeliverySystem`] that spawns the order store and hands a shared repository
//! to every controller.
//!
//! ## Dependency Injection
//!
//! Controllers never construct their own data source. They take an
//! `Arc<dyn OrderRepository>` in their constructor; `DeliverySystem` supplies the
//! [`MockOrderRepository`](crate::repository::MockOrderRepository) and tests
//! supply a [`ScriptedRepository`](crate::repository::ScriptedRepository) or a
//! store-backed mock of their own.
//!
//! ## Graceful Shutdown
//!
//! 1. **Drop controllers** - Cancels tracking tasks and releases repository clones
//! 2. **Drop clients** - `DeliverySystem::shutdown` drops its store client
//! 3. **Store exits** - `receiver.recv()` returns `None`
//! 4. **Await completion** - The store task is joined

pub mod settings;
pub mod system;
pub mod tracing;

pub use settings::*;
pub use system::*;
pub use self::tracing::*;
