//! # Condition Variable
//!
//! Monitor-style wait/notify over a [`Mutex`] held through a [`UniqueLock`].
//!
//! ```text
//! waiter                               notifier
//! ------                               --------
//! lock = UniqueLock::new(&m)
//! cv.wait_until(&mut lock, || ready)   m.lock()
//!   (m released while parked)          ready = true
//!                                      cv.notify_all()
//!                                      m.unlock()
//!   (m reacquired, ready re-checked)
//! ```
//!
//! State read by the predicate must be written under the same mutex before
//! notifying, otherwise the wakeup can be lost.

use crate::lock::{Mutex, UniqueLock};

/// Blocking wait/notify paired with a locked [`Mutex`].
///
/// A condition variable must only be used with one mutex at a time.
pub struct ConditionVariable {
    inner: parking_lot::Condvar,
}

impl ConditionVariable {
    /// Creates a condition variable with no waiters. Never fails.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            inner: parking_lot::Condvar::new(),
        }
    }

    /// Atomically releases the mutex behind `lock`, blocks until notified,
    /// and reacquires the mutex before returning.
    ///
    /// May return without a matching notification. Prefer
    /// [`Self::wait_until`].
    ///
    /// Waiting on a lock that does not own its mutex is logged and returns
    /// immediately.
    pub fn wait(&self, lock: &mut UniqueLock<'_, Mutex>) {
        match lock.mutex() {
            Some(mutex) if lock.owns_lock() => mutex.park_on(&self.inner),
            _ => tracing::error!("ConditionVariable::wait on a lock that does not own its mutex"),
        }
    }

    /// Waits until `predicate` returns true.
    ///
    /// The predicate is evaluated with the mutex held, first before any
    /// wait, then after every wakeup. Spurious and unrelated wakeups are
    /// absorbed.
    pub fn wait_until<F>(&self, lock: &mut UniqueLock<'_, Mutex>, mut predicate: F)
    where
        F: FnMut() -> bool,
    {
        if !lock.owns_lock() {
            tracing::error!("ConditionVariable::wait_until on a lock that does not own its mutex");
            return;
        }
        while !predicate() {
            self.wait(lock);
        }
    }

    /// Waits until `predicate` returns true on a mutex the caller has
    /// already locked.
    ///
    /// The caller's lock is adopted for the wait and handed back, so the
    /// mutex is still locked on return.
    pub fn wait_mutex_until<F>(&self, mutex: &Mutex, predicate: F)
    where
        F: FnMut() -> bool,
    {
        let mut lock = UniqueLock::adopt(mutex);
        self.wait_until(&mut lock, predicate);
        lock.release();
    }

    /// Wakes at most one waiter. Returns whether a thread was woken.
    #[inline]
    pub fn notify_one(&self) -> bool {
        self.inner.notify_one()
    }

    /// Wakes every current waiter. Returns the number of threads woken.
    #[inline]
    pub fn notify_all(&self) -> usize {
        self.inner.notify_all()
    }
}

impl Default for ConditionVariable {
    fn default() -> Self {
        Self::new()
    }
}
