//! The authoritative in-memory order store.
//!
//! # Main Components
//!
//! - [`OrderStore`] - Single-owner task holding the canonical order list
//! - [`StoreClient`] - Cloneable handle that sends requests to the store
//! - [`StoreRequest`] - Messages understood by the store
//! - [`StoreError`] - Channel and lookup failures

pub mod actor;
pub mod client;
pub mod error;
pub mod message;

pub use actor::OrderStore;
pub use client::StoreClient;
pub use error::StoreError;
pub use message::{Response, StoreRequest};
