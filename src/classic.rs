//! Classic semaphore views over the slot pool
//!
//! Each view wraps a [`Pool`] with its own initial state and exposes a
//! narrow capability trait:
//!
//! | View | Trait | Pool setup |
//! |------|-------|------------|
//! | [`LockingSemaphore`] | [`Limiter`] | `size` free slots |
//! | [`SyncingSemaphore`] | [`Barrier`] | `size` slots, all pre-claimed |
//! | [`BinarySemaphore`] | [`Locker`] | one free slot |
//!
//! # Example
//!
//! ```rust
//! use semaphore::classic::{self, Barrier};
//! use std::thread;
//!
//! let sem = classic::new_syncing(3);
//! for _ in 0..3 {
//!     let sem = sem.clone();
//!     thread::spawn(move || {
//!         // ... do work ...
//!         sem.signal().unwrap();
//!     });
//! }
//! sem.wait(3); // Returns once all three workers have signalled
//! ```

use slot_pool::{EmptyError, Pool};
use tracing::debug;

/// Bounds how many units of work run at once
pub trait Limiter {
    /// Claim `n` units, blocking until each one is granted
    fn acquire(&self, n: usize);

    /// Give back `n` units
    ///
    /// # Errors
    ///
    /// Returns [`EmptyError`] if fewer than `n` units were held.
    fn release(&self, n: usize) -> Result<(), EmptyError>;
}

/// Lets a coordinator wait for workers to report completion
pub trait Barrier {
    /// Report that one unit of work has completed
    ///
    /// # Errors
    ///
    /// Returns [`EmptyError`] if every expected completion was already
    /// reported and not yet waited for.
    fn signal(&self) -> Result<(), EmptyError>;

    /// Block until `n` completions have been reported
    fn wait(&self, n: usize);
}

/// Mutual exclusion with lock/unlock naming
pub trait Locker {
    /// Take the lock, blocking for as long as it takes
    fn lock(&self);

    /// Give the lock back
    ///
    /// # Errors
    ///
    /// Returns [`EmptyError`] if the lock is not held.
    fn unlock(&self) -> Result<(), EmptyError>;
}

/// Concurrency limiter over a pool of `size` slots
#[derive(Debug, Clone)]
pub struct LockingSemaphore {
    pool: Pool,
}

impl LockingSemaphore {
    /// Create a limiter that lets `size` units run at once
    #[must_use]
    pub fn new(size: usize) -> Self {
        Self {
            pool: Pool::new(size),
        }
    }

    /// The underlying pool, for occupancy snapshots and timed acquisition
    #[must_use]
    pub fn pool(&self) -> &Pool {
        &self.pool
    }
}

impl Limiter for LockingSemaphore {
    fn acquire(&self, n: usize) {
        self.pool.acquire_n(n);
    }

    fn release(&self, n: usize) -> Result<(), EmptyError> {
        self.pool.release_n(n)
    }
}

/// Completion barrier over a fully claimed pool of `size` slots
///
/// Free slots stand for completed work: each [`Barrier::signal`] frees one and
/// [`Barrier::wait`] claims them back.
#[derive(Debug, Clone)]
pub struct SyncingSemaphore {
    pool: Pool,
}

impl SyncingSemaphore {
    /// Create a barrier that can track up to `size` outstanding completions
    #[must_use]
    pub fn new(size: usize) -> Self {
        let pool = Pool::new(size);
        // Every slot is free at this point, so this never blocks
        pool.acquire_n(size);
        debug!(size, "created syncing semaphore");
        Self { pool }
    }

    /// Completions signalled but not yet waited for (snapshot)
    #[must_use]
    pub fn completed(&self) -> usize {
        self.pool.available()
    }
}

impl Barrier for SyncingSemaphore {
    fn signal(&self) -> Result<(), EmptyError> {
        self.pool.release()
    }

    fn wait(&self, n: usize) {
        self.pool.acquire_n(n);
    }
}

/// Binary semaphore used as a lock
///
/// Unlike [`std::sync::Mutex`], any thread may unlock, and the lock guards no
/// data.
#[derive(Debug, Clone)]
pub struct BinarySemaphore {
    pool: Pool,
}

impl BinarySemaphore {
    /// Create an unlocked binary semaphore
    #[must_use]
    pub fn new() -> Self {
        debug!("created binary semaphore");
        Self { pool: Pool::new(1) }
    }

    /// Take the lock only if it is free right now
    #[must_use]
    pub fn try_lock(&self) -> bool {
        self.pool.try_acquire().is_ok()
    }

    /// Whether the lock is currently held (snapshot)
    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.pool.occupied() == 1
    }
}

impl Default for BinarySemaphore {
    fn default() -> Self {
        Self::new()
    }
}

impl Locker for BinarySemaphore {
    fn lock(&self) {
        self.pool.acquire_n(1);
    }

    fn unlock(&self) -> Result<(), EmptyError> {
        self.pool.release()
    }
}

/// Create a [`LockingSemaphore`] that lets `size` units run at once
#[must_use]
pub fn new_locking(size: usize) -> LockingSemaphore {
    LockingSemaphore::new(size)
}

/// Create a [`SyncingSemaphore`] for up to `size` outstanding completions
#[must_use]
pub fn new_syncing(size: usize) -> SyncingSemaphore {
    SyncingSemaphore::new(size)
}

/// Create an unlocked [`BinarySemaphore`]
#[must_use]
pub fn new_binary() -> BinarySemaphore {
    BinarySemaphore::new()
}
