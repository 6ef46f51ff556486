//! Error types for slot pool operations

use thiserror::Error;

/// Result type for operations that may fail with either pool error
pub type Result<T> = std::result::Result<T, PoolError>;

/// No slot became available within the allotted wait
///
/// Returned by the acquisition methods when the timeout is zero, the deadline
/// has already passed, or the wait elapsed while every slot stayed held. The
/// pool is unchanged and remains usable.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("semaphore acquisition timed out")]
pub struct TimeoutError;

/// A release was attempted while no slot was held
///
/// This points at an unbalanced release at the call site (a double release,
/// or a release without a matching acquire). The pool is unchanged.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("semaphore is empty: release without a held slot")]
pub struct EmptyError;

/// Either failure a pool operation can report
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolError {
    /// Acquisition timed out
    #[error(transparent)]
    Timeout(#[from] TimeoutError),

    /// Release on an empty pool
    #[error(transparent)]
    Empty(#[from] EmptyError),
}

impl PoolError {
    /// Check if this error is a timeout
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout(_))
    }

    /// Check if this error is an empty release
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty(_))
    }
}
