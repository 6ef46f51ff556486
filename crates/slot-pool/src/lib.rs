//! Fixed-capacity slot pool for coordinating threads
//!
//! A [`Pool`] holds a fixed number of interchangeable slots. Threads claim a
//! slot with a timed [`Pool::acquire`] and hand it back with
//! [`Pool::release`]. The pool never holds more than its capacity and never
//! goes below zero: acquisition reports [`TimeoutError`] when no slot frees up
//! in time, and releasing an empty pool reports [`EmptyError`].
//!
//! # Example
//!
//! ```rust
//! use slot_pool::Pool;
//! use std::thread;
//! use std::time::Duration;
//!
//! let pool = Pool::new(4);
//!
//! let handles: Vec<_> = (0..16)
//!     .map(|i| {
//!         let pool = pool.clone();
//!         thread::spawn(move || {
//!             // At most 4 workers run the body at once
//!             let _permit = pool.acquire_permit(Duration::from_secs(5)).unwrap();
//!             i * 2
//!         })
//!     })
//!     .collect();
//!
//! for handle in handles {
//!     handle.join().unwrap();
//! }
//! assert_eq!(pool.occupied(), 0);
//! ```

mod error;
mod pool;

pub use error::{EmptyError, PoolError, Result, TimeoutError};
pub use pool::{Pool, SlotPermit};
