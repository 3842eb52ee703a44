//! # Recursive Mutex
//!
//! Blocking mutual exclusion that the owning thread may re-enter.

#![allow(unsafe_code)]

use super::Lockable;

/// A mutex the owning thread may lock repeatedly.
///
/// Every `lock` (or successful `try_lock`) must be balanced by one `unlock`
/// before another thread can acquire it. Unlocking from a thread that does
/// not own the mutex is detected, logged and ignored.
pub struct RecursiveMutex {
    inner: parking_lot::ReentrantMutex<()>,
}

impl RecursiveMutex {
    /// Creates an unlocked recursive mutex. Never fails.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            inner: parking_lot::const_reentrant_mutex(()),
        }
    }

    /// Blocks until acquired. Returns immediately if the calling thread
    /// already owns the mutex.
    #[inline]
    pub fn lock(&self) {
        std::mem::forget(self.inner.lock());
    }

    /// Attempts to acquire without blocking. Always succeeds for the owner.
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

    /// Releases one level of ownership.
    pub fn unlock(&self) {
        if !self.inner.is_owned_by_current_thread() {
            tracing::error!("RecursiveMutex::unlock called by a thread that does not own it, ignoring");
            return;
        }
        // SAFETY: the current thread owns at least one level of the lock and
        // the matching guard was forgotten in `lock` or `try_lock`.
        unsafe { self.inner.force_unlock() };
    }

    /// Returns whether any thread currently holds the mutex.
    #[inline]
    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.inner.is_locked()
    }

    /// Returns whether the calling thread holds the mutex.
    #[inline]
    #[must_use]
    pub fn is_owned_by_current_thread(&self) -> bool {
        self.inner.is_owned_by_current_thread()
    }
}

impl Default for RecursiveMutex {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for RecursiveMutex {
    fn drop(&mut self) {
        if self.inner.is_locked() {
            tracing::error!("RecursiveMutex dropped while locked");
        }
    }
}

impl Lockable for RecursiveMutex {
    #[inline]
    fn lock(&self) {
        RecursiveMutex::lock(self);
    }

    #[inline]
    fn try_lock(&self) -> bool {
        RecursiveMutex::try_lock(self)
    }

    #[inline]
    fn unlock(&self) {
        RecursiveMutex::unlock(self);
    }
}
