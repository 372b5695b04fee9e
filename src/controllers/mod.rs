//! Controllers that turn repository calls into observable state.
//!
//! Both take the repository as a required constructor argument and publish
//! their state through a `tokio::sync::watch` channel, so a presentation layer
//! can either poll `state()` or `subscribe()` to changes.

pub mod order_detail;
pub mod order_list;

pub use order_detail::*;
pub use order_list::*;
