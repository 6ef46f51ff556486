//! Fixed-capacity slot pool
//!
//! The pool tracks how many of its slots are held. Acquisition blocks the
//! calling thread until a slot frees up or the timeout elapses; release hands
//! a slot back and wakes one blocked acquirer.
//!
//! # Example
//!
//! ```rust
//! use slot_pool::{EmptyError, Pool, TimeoutError};
//! use std::time::Duration;
//!
//! let pool = Pool::new(2);
//!
//! pool.acquire(Duration::from_secs(1)).unwrap();
//! pool.acquire(Duration::from_secs(1)).unwrap();
//! assert_eq!(pool.occupied(), 2);
//!
//! // Full: a short wait gives up without taking anything
//! assert_eq!(pool.acquire(Duration::from_millis(1)), Err(TimeoutError));
//!
//! pool.release_n(2).unwrap();
//! assert_eq!(pool.release(), Err(EmptyError));
//! ```

use crate::error::{EmptyError, TimeoutError};
use std::fmt;
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};
use tracing::{trace, warn};

/// A fixed number of interchangeable slots shared between threads
///
/// Cloning a `Pool` produces another handle to the same slots; construct a
/// new pool for independent state.
///
/// # Design
///
/// - **Mutex-guarded counter**: `occupied` lives behind a mutex, so
///   `0 <= occupied <= capacity` holds under every interleaving
/// - **Condition variable**: each release wakes one blocked acquirer
/// - **No ownership tracking**: any handle may release a slot claimed by another
///
/// # Fairness
///
/// Blocked acquirers are not served in FIFO order. Whichever waiter the
/// condition variable wakes gets the next freed slot, and a caller arriving
/// just as a slot frees up may claim it ahead of threads that were already
/// waiting.
///
/// # Example
///
/// ```rust
/// use slot_pool::Pool;
/// use std::time::Duration;
///
/// let pool = Pool::new(3);
/// let handle = pool.clone();
///
/// handle.acquire(Duration::from_millis(10)).unwrap();
/// assert_eq!(pool.occupied(), 1);
/// assert_eq!(pool.available(), 2);
/// ```
#[derive(Clone)]
pub struct Pool {
    /// Shared state between all clones of this pool
    inner: Arc<PoolInner>,
}

struct PoolInner {
    /// Number of slots, fixed for the pool's lifetime
    capacity: usize,
    /// Slots currently held
    occupied: Mutex<usize>,
    /// Signalled once per released slot
    slot_freed: Condvar,
}

impl Pool {
    /// Create a pool with `capacity` free slots
    ///
    /// A capacity of zero is valid: no slot is ever available, so every timed
    /// acquisition fails.
    ///
    /// # Example
    ///
    /// ```rust
    /// use slot_pool::Pool;
    ///
    /// let pool = Pool::new(1024);
    /// assert_eq!(pool.capacity(), 1024);
    /// assert_eq!(pool.occupied(), 0);
    /// ```
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Arc::new(PoolInner {
                capacity,
                occupied: Mutex::new(0),
                slot_freed: Condvar::new(),
            }),
        }
    }

    /// Claim one slot, waiting at most `timeout` for one to free up
    ///
    /// A zero timeout counts as already expired and fails without looking at
    /// the pool. On timeout nothing is claimed.
    ///
    /// # Errors
    ///
    /// Returns [`TimeoutError`] if `timeout` is zero or elapses while every
    /// slot stays held.
    ///
    /// # Example
    ///
    /// ```rust
    /// use slot_pool::{Pool, TimeoutError};
    /// use std::time::Duration;
    ///
    /// let pool = Pool::new(1);
    /// assert_eq!(pool.acquire(Duration::ZERO), Err(TimeoutError));
    /// assert!(pool.acquire(Duration::from_millis(1)).is_ok());
    /// assert_eq!(pool.occupied(), 1);
    /// ```
    pub fn acquire(&self, timeout: Duration) -> Result<(), TimeoutError> {
        if timeout.is_zero() {
            trace!(capacity = self.inner.capacity, "rejecting acquire with zero timeout");
            return Err(TimeoutError);
        }

        let capacity = self.inner.capacity;
        let occupied = self.lock_occupied();
        if *occupied >= capacity {
            trace!(capacity, ?timeout, "pool full, waiting for a slot");
        }

        let (mut occupied, _) = self
            .inner
            .slot_freed
            .wait_timeout_while(occupied, timeout, |occupied| *occupied >= capacity)
            .unwrap_or_else(PoisonError::into_inner);

        if *occupied >= capacity {
            trace!(capacity, ?timeout, "acquire timed out");
            return Err(TimeoutError);
        }

        *occupied += 1;
        Ok(())
    }

    /// Claim one slot, waiting until `deadline` at the latest
    ///
    /// A deadline that is not in the future fails immediately.
    ///
    /// # Errors
    ///
    /// Returns [`TimeoutError`] if the deadline has passed or passes while
    /// every slot stays held.
    pub fn acquire_until(&self, deadline: Instant) -> Result<(), TimeoutError> {
        self.acquire(deadline.saturating_duration_since(Instant::now()))
    }

    /// Claim one slot only if one is free right now
    ///
    /// # Errors
    ///
    /// Returns [`TimeoutError`] if every slot is held.
    ///
    /// # Example
    ///
    /// ```rust
    /// use slot_pool::Pool;
    ///
    /// let pool = Pool::new(1);
    /// assert!(pool.try_acquire().is_ok());
    /// assert!(pool.try_acquire().is_err()); // No slots left
    /// ```
    pub fn try_acquire(&self) -> Result<(), TimeoutError> {
        let mut occupied = self.lock_occupied();
        if *occupied >= self.inner.capacity {
            return Err(TimeoutError);
        }
        *occupied += 1;
        Ok(())
    }

    /// Claim one slot and wrap it in a guard that releases it on drop
    ///
    /// # Errors
    ///
    /// Same as [`Pool::acquire`].
    ///
    /// # Example
    ///
    /// ```rust
    /// use slot_pool::Pool;
    /// use std::time::Duration;
    ///
    /// let pool = Pool::new(10);
    /// {
    ///     let _permit = pool.acquire_permit(Duration::from_secs(1)).unwrap();
    ///     assert_eq!(pool.occupied(), 1);
    /// } // Slot released automatically when scope ends
    /// assert_eq!(pool.occupied(), 0);
    /// ```
    pub fn acquire_permit(&self, timeout: Duration) -> Result<SlotPermit, TimeoutError> {
        self.acquire(timeout)?;
        Ok(SlotPermit {
            pool: Some(self.clone()),
        })
    }

    /// Claim `n` slots one at a time, blocking without a timeout
    ///
    /// Each slot is claimed independently, so other callers may acquire and
    /// release in between. On a pool that can never free enough slots this
    /// blocks forever.
    pub fn acquire_n(&self, n: usize) {
        for _ in 0..n {
            self.acquire_blocking();
        }
    }

    /// Hand back one held slot and wake one blocked acquirer
    ///
    /// Any handle may release; the pool does not track which caller claimed
    /// the slot.
    ///
    /// # Errors
    ///
    /// Returns [`EmptyError`] if no slot is currently held. The pool is left
    /// unchanged.
    pub fn release(&self) -> Result<(), EmptyError> {
        if !self.free_slot() {
            warn!(
                capacity = self.inner.capacity,
                "release on an empty semaphore; acquire/release calls are unbalanced"
            );
            return Err(EmptyError);
        }
        Ok(())
    }

    /// Hand back `n` slots one at a time
    ///
    /// Stops at the first failure. Slots released before it stay released.
    ///
    /// # Errors
    ///
    /// Returns [`EmptyError`] if the pool empties before `n` slots were
    /// released.
    pub fn release_n(&self, n: usize) -> Result<(), EmptyError> {
        for _ in 0..n {
            self.release()?;
        }
        Ok(())
    }

    /// Number of slots currently held
    ///
    /// This is a snapshot for monitoring and tests; it may be stale as soon as
    /// it is returned and must not drive control decisions.
    #[must_use]
    pub fn occupied(&self) -> usize {
        *self.lock_occupied()
    }

    /// Total number of slots (fixed at construction)
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.inner.capacity
    }

    /// Number of free slots (capacity - occupied), with the same staleness
    /// caveat as [`Pool::occupied`]
    #[must_use]
    pub fn available(&self) -> usize {
        self.inner.capacity - self.occupied()
    }

    /// Hand back the slot held by a dropped [`SlotPermit`]
    fn release_permit(&self) {
        if !self.free_slot() {
            warn!(
                capacity = self.inner.capacity,
                "slot permit dropped on an empty semaphore; its slot was released elsewhere"
            );
        }
    }

    /// Decrement `occupied` and wake one acquirer; `false` if nothing was held
    fn free_slot(&self) -> bool {
        let mut occupied = self.lock_occupied();
        if *occupied == 0 {
            return false;
        }
        *occupied -= 1;
        drop(occupied);

        self.inner.slot_freed.notify_one();
        true
    }

    fn acquire_blocking(&self) {
        let capacity = self.inner.capacity;
        let occupied = self.lock_occupied();
        if *occupied >= capacity {
            trace!(capacity, "pool full, waiting for a slot");
        }

        let mut occupied = self
            .inner
            .slot_freed
            .wait_while(occupied, |occupied| *occupied >= capacity)
            .unwrap_or_else(PoisonError::into_inner);
        *occupied += 1;
    }

    /// Poisoning is ignored: the counter is never left mid-update.
    fn lock_occupied(&self) -> MutexGuard<'_, usize> {
        self.inner
            .occupied
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for Pool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pool")
            .field("capacity", &self.inner.capacity)
            .field("occupied", &self.occupied())
            .finish()
    }
}

/// RAII guard that releases a slot on drop
///
/// Returned by [`Pool::acquire_permit`]. The guard owns a handle to the pool,
/// so it can be moved to another thread.
#[derive(Debug)]
#[must_use = "the slot is released as soon as the permit is dropped"]
pub struct SlotPermit {
    /// Pool the slot goes back to; `None` once forgotten
    pool: Option<Pool>,
}

impl SlotPermit {
    /// Keep the slot claimed and disarm the guard
    ///
    /// The slot must then be handed back with [`Pool::release`].
    pub fn forget(mut self) {
        self.pool = None;
    }
}

impl Drop for SlotPermit {
    fn drop(&mut self) {
        if let Some(pool) = self.pool.take() {
            pool.release_permit();
        }
    }
}
