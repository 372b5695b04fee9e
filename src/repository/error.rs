//! Error types for repository operations.

use crate::model::OrderId;
use crate::store::StoreError;
use thiserror::Error;

/// Errors that can occur while listing or updating orders.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum RepositoryError {
    /// Listing failed. The message is shown to the user as-is.
    #[error("{message}")]
    Network { code: u16, message: String },

    /// The update target does not exist.
    #[error("Order not found: {0}")]
    NotFound(OrderId),

    /// The backing store could not be reached.
    #[error("Order store unavailable: {0}")]
    Store(StoreError),
}

impl RepositoryError {
    /// The failure injected by [`MockOrderRepository`](crate::repository::MockOrderRepository).
    pub fn fetch_failed() -> Self {
        RepositoryError::Network {
            code: 500,
            message: "Failed to fetch orders.".to_string(),
        }
    }

    /// Status-style code for the error.
    pub fn code(&self) -> u16 {
        match self {
            RepositoryError::Network { code, .. } => *code,
            RepositoryError::NotFound(_) => 404,
            RepositoryError::Store(_) => 503,
        }
    }
}

impl From<StoreError> for RepositoryError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => RepositoryError::NotFound(id),
            other => RepositoryError::Store(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_failed_displays_message() {
        let err = RepositoryError::fetch_failed();
        assert_eq!(err.to_string(), "Failed to fetch orders.");
        assert_eq!(err.code(), 500);
    }

    #[test]
    fn test_store_not_found_maps_to_not_found() {
        let err: RepositoryError = StoreError::NotFound(OrderId(3)).into();
        assert_eq!(err, RepositoryError::NotFound(OrderId(3)));
        assert_eq!(err.code(), 404);

        let err: RepositoryError = StoreError::Closed.into();
        assert_eq!(err, RepositoryError::Store(StoreError::Closed));
    }
}
