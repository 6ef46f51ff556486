//! semaphore: counting and binary semaphores for coordinating threads
//!
//! The crate is built around one primitive, the slot [`Pool`], and three
//! thin views over it in [`classic`]:
//!
//! - [`classic::LockingSemaphore`] bounds how many workers run at once
//! - [`classic::SyncingSemaphore`] lets a coordinator wait for workers to finish
//! - [`classic::BinarySemaphore`] is a lock with lock/unlock naming
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//!
//! let sem = semaphore::new(2);
//! sem.acquire(Duration::from_secs(1)).unwrap();
//! sem.acquire(Duration::from_secs(1)).unwrap();
//! assert!(sem.acquire(Duration::from_millis(1)).is_err());
//!
//! sem.release().unwrap();
//! assert_eq!(sem.occupied(), 1);
//! ```

pub mod classic;

// Re-export the primitive
pub use slot_pool::{EmptyError, Pool, PoolError, Result, SlotPermit, TimeoutError};

/// Create a semaphore with `capacity` free slots
///
/// Shorthand for [`Pool::new`].
#[must_use]
pub fn new(capacity: usize) -> Pool {
    Pool::new(capacity)
}

#[cfg(doctest)]
#[doc = include_str!("../README.md")]
pub struct ReadmeDoctests;
