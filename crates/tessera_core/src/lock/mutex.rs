//! # Mutex
//!
//! Blocking, non-reentrant mutual exclusion with explicit lock/unlock.
//!
//! ## Safety Note
//!
//! `parking_lot` ties unlocking to guard lifetimes. Explicit `unlock` needs
//! `force_unlock`, and handing the lock to a condition variable needs
//! `make_guard_unchecked`. Both are confined to this module.

#![allow(unsafe_code)]

use parking_lot::Condvar;

use super::Lockable;

/// Blocking mutual exclusion.
///
/// Unlike `std::sync::Mutex` this type carries no data and is unlocked
/// explicitly, so a lock can be taken in one scope and released in another
/// (or handed through [`UniqueLock`](crate::UniqueLock) into a
/// [`ConditionVariable`](crate::ConditionVariable)).
///
/// # Contract
///
/// - Re-locking from the owning thread deadlocks. Use
///   [`RecursiveMutex`](crate::RecursiveMutex) for reentrancy.
/// - `unlock` must only be called by the owner. Unlocking an unlocked mutex
///   is detected, logged and ignored.
/// - Dropping a locked mutex is logged.
///
/// # Example
///
/// ```rust,ignore
/// static TRACE_SYNC: Mutex = Mutex::new();
///
/// TRACE_SYNC.lock();
/// // ... critical section ...
/// TRACE_SYNC.unlock();
/// ```
pub struct Mutex {
    inner: parking_lot::Mutex<()>,
}

impl Mutex {
    /// Creates an unlocked mutex. Never fails.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            inner: parking_lot::const_mutex(()),
        }
    }

    /// Blocks until the mutex is acquired.
    #[inline]
    pub fn lock(&self) {
        std::mem::forget(self.inner.lock());
    }

    /// Attempts to acquire the mutex without blocking.
    #[inline]
    #[must_use]
    pub fn try_lock(&self) -> bool {
        match self.inner.try_lock() {
            Some(guard) => {
                std::mem::forget(guard);
                true
            }
            None => false,
        }
    }

    /// Releases the mutex.
    pub fn unlock(&self) {
        if !self.inner.is_locked() {
            tracing::error!("Mutex::unlock called on an unlocked mutex, ignoring");
            return;
        }
        // SAFETY: the lock is held, and its guard was forgotten in `lock` or
        // `try_lock`. Ownership by the calling thread is the caller's contract.
        unsafe { self.inner.force_unlock() };
    }

    /// Returns whether any thread currently holds the mutex.
    ///
    /// Diagnostic only: the answer may be stale by the time it is read.
    #[inline]
    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.inner.is_locked()
    }

    /// Releases the mutex, blocks on `condvar`, and reacquires the mutex
    /// before returning.
    ///
    /// The caller must hold the mutex.
    pub(crate) fn park_on(&self, condvar: &Condvar) {
        // SAFETY: the caller owns the lock (checked by `ConditionVariable`
        // through `UniqueLock::owns_lock`) and no live guard exists for it,
        // since `lock`/`try_lock` forget theirs.
        let mut guard = unsafe { self.inner.make_guard_unchecked() };
        condvar.wait(&mut guard);
        // Still locked on return. Ownership goes back to the caller's
        // UniqueLock, not to this guard.
        std::mem::forget(guard);
    }
}

impl Default for Mutex {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Mutex {
    fn drop(&mut self) {
        if self.inner.is_locked() {
            tracing::error!("Mutex dropped while locked");
        }
    }
}

impl Lockable for Mutex {
    #[inline]
    fn lock(&self) {
        Mutex::lock(self);
    }

    #[inline]
    fn try_lock(&self) -> bool {
        Mutex::try_lock(self)
    }

    #[inline]
    fn unlock(&self) {
        Mutex::unlock(self);
    }
}
