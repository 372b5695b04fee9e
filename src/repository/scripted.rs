//! # Scripted Repository & Testing Guide
//!
//! `ScriptedRepository` implements [`OrderRepository`] from a queue of
//! expectations instead of a store. Each call pops the next expectation and
//! answers with the scripted result, which makes controller tests fully
//! deterministic and failure injection trivial.
//!
//! ## When to use Scripted vs Mock
//!
//! | Feature | ScriptedRepository | MockOrderRepository |
//! |---------|--------------------|---------------------|
//! | **State** | None (expectations) | Real store |
//! | **Error Injection** | Any `RepositoryError` | Fetch failure only |
//! | **Call Verification** | `verify()`, `calls()` | No |
//! | **Use Case** | Controller logic | End-to-end flows |
//!
//! ## Example
//!
//! ```rust
//! use delivery_tracker::model::{OrderId, OrderStatus};
//! use delivery_tracker::repository::{OrderRepository, RepositoryError, ScriptedRepository};
//!
//! #[tokio::main]
//! async fn main() {
//!     let repo = ScriptedRepository::new();
//!     repo.expect_list().return_ok(Vec::new());
//!     repo.expect_update(OrderId(9)).return_err(RepositoryError::NotFound(OrderId(9)));
//!
//!     assert!(repo.list_orders().await.unwrap().is_empty());
//!     let result = repo.update_order(OrderId(9), OrderStatus::Delivered).await;
//!     assert_eq!(result, Err(RepositoryError::NotFound(OrderId(9))));
//!
//!     repo.verify();
//! }
//! ```
//!
//! A call with no matching expectation does not panic inside the caller (it may
//! be running on a background task). It is recorded, answered with a
//! `Network` error, and reported by [`ScriptedRepository::verify`].

use crate::model::{Order, OrderId, OrderStatus};
use crate::repository::{OrderRepository, RepositoryError};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tracing::warn;

#[derive(Debug)]
enum Expectation {
    List {
        delay: Duration,
        response: Result<Vec<Order>, RepositoryError>,
    },
    Update {
        id: OrderId,
        delay: Duration,
        response: Result<Order, RepositoryError>,
    },
}

/// A repository call observed by [`ScriptedRepository`].
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    List,
    Update { id: OrderId, status: OrderStatus },
}

#[derive(Debug, Default)]
struct Script {
    expectations: VecDeque<Expectation>,
    calls: Vec<Call>,
    unexpected: Vec<Call>,
}

/// Expectation-driven [`OrderRepository`] for tests.
#[derive(Debug, Default, Clone)]
pub struct ScriptedRepository {
    script: Arc<Mutex<Script>>,
}

impl ScriptedRepository {
    /// Creates a repository with no expectations.
    pub fn new() -> Self {
        Self::default()
    }

    /// Expects a `list_orders` call.
    pub fn expect_list(&self) -> ListExpectationBuilder {
        ListExpectationBuilder {
            script: self.script.clone(),
            delay: Duration::ZERO,
        }
    }

    /// Expects an `update_order` call for `id`.
    pub fn expect_update(&self, id: OrderId) -> UpdateExpectationBuilder {
        UpdateExpectationBuilder {
            script: self.script.clone(),
            id,
            delay: Duration::ZERO,
        }
    }

    /// Every call received so far, in order.
    pub fn calls(&self) -> Vec<Call> {
        self.lock().calls.clone()
    }

    /// Number of `update_order` calls received so far.
    pub fn update_calls(&self) -> usize {
        self.lock()
            .calls
            .iter()
            .filter(|c| matches!(c, Call::Update { .. }))
            .count()
    }

    /// Panics unless every expectation was consumed and no unexpected call arrived.
    pub fn verify(&self) {
        let script = self.lock();
        if !script.unexpected.is_empty() {
            panic!("Unexpected repository calls: {:?}", script.unexpected);
        }
        if !script.expectations.is_empty() {
            panic!(
                "Not all expectations were met. {} remaining",
                script.expectations.len()
            );
        }
    }

    fn lock(&self) -> MutexGuard<'_, Script> {
        lock(&self.script)
    }

    fn unexpected(&self, call: Call) -> RepositoryError {
        warn!(?call, "Unexpected repository call");
        self.lock().unexpected.push(call.clone());
        RepositoryError::Network {
            code: 500,
            message: format!("Unexpected call: {:?}", call),
        }
    }
}

#[async_trait]
impl OrderRepository for ScriptedRepository {
    async fn list_orders(&self) -> Result<Vec<Order>, RepositoryError> {
        let expectation = {
            let mut script = self.lock();
            script.calls.push(Call::List);
            match script.expectations.front() {
                Some(Expectation::List { .. }) => script.expectations.pop_front(),
                _ => None,
            }
        };

        match expectation {
            Some(Expectation::List { delay, response }) => {
                tokio::time::sleep(delay).await;
                response
            }
            _ => Err(self.unexpected(Call::List)),
        }
    }

    async fn update_order(
        &self,
        id: OrderId,
        status: OrderStatus,
    ) -> Result<Order, RepositoryError> {
        let call = Call::Update { id, status };
        let expectation = {
            let mut script = self.lock();
            script.calls.push(call.clone());
            match script.expectations.front() {
                Some(Expectation::Update { id: expected, .. }) if *expected == id => {
                    script.expectations.pop_front()
                }
                _ => None,
            }
        };

        match expectation {
            Some(Expectation::Update {
                delay, response, ..
            }) => {
                tokio::time::sleep(delay).await;
                response
            }
            _ => Err(self.unexpected(call)),
        }
    }
}

// A test that panicked while holding the lock already failed.
fn lock(script: &Mutex<Script>) -> MutexGuard<'_, Script> {
    script.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Builder for `list_orders` expectations.
pub struct ListExpectationBuilder {
    script: Arc<Mutex<Script>>,
    delay: Duration,
}

impl ListExpectationBuilder {
    /// Waits `delay` before answering.
    pub fn after(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, orders: Vec<Order>) {
        self.push(Ok(orders));
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: RepositoryError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<Vec<Order>, RepositoryError>) {
        let mut script = lock(&self.script);
        script.expectations.push_back(Expectation::List {
            delay: self.delay,
            response,
        });
    }
}

/// Builder for `update_order` expectations.
pub struct UpdateExpectationBuilder {
    script: Arc<Mutex<Script>>,
    id: OrderId,
    delay: Duration,
}

impl UpdateExpectationBuilder {
    /// Waits `delay` before answering.
    pub fn after(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, order: Order) {
        self.push(Ok(order));
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: RepositoryError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<Order, RepositoryError>) {
        let mut script = lock(&self.script);
        script.expectations.push_back(Expectation::Update {
            id: self.id,
            delay: self.delay,
            response,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[tokio::test]
    async fn test_answers_in_script_order() {
        let order = Order::new(1, "Mug", OrderStatus::InTransit, Utc::now());
        let repo = ScriptedRepository::new();
        repo.expect_list().return_ok(vec![order.with_status(OrderStatus::Pending)]);
        repo.expect_update(OrderId(1)).return_ok(order.clone());

        assert_eq!(repo.list_orders().await.unwrap().len(), 1);
        let updated = repo
            .update_order(OrderId(1), OrderStatus::InTransit)
            .await
            .unwrap();
        assert_eq!(updated, order);

        assert_eq!(
            repo.calls(),
            vec![
                Call::List,
                Call::Update {
                    id: OrderId(1),
                    status: OrderStatus::InTransit
                }
            ]
        );
        repo.verify();
    }

    #[tokio::test]
    async fn test_unexpected_call_is_reported_by_verify() {
        let repo = ScriptedRepository::new();
        let result = repo.update_order(OrderId(2), OrderStatus::Delivered).await;
        assert!(matches!(result, Err(RepositoryError::Network { .. })));

        let verified = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| repo.verify()));
        assert!(verified.is_err());
    }

    #[test]
    #[should_panic(expected = "Not all expectations were met")]
    fn test_verify_fails_with_pending_expectations() {
        let repo = ScriptedRepository::new();
        repo.expect_list().return_ok(Vec::new());
        repo.verify();
    }
}
