//! # Lock Guards
//!
//! Scope-bound ownership over any [`Lockable`].
//!
//! ## Construction Modes
//!
//! ```text
//! new(&m)        lock now
//! adopt(&m)      already locked by the caller, take over the unlock
//! deferred(&m)   do not lock yet
//! try_new(&m)    try once, owns_lock() tells whether it worked
//! ```
//!
//! A guard unlocks on drop iff it still owns the lock. Moving a guard moves
//! the ownership; `std::mem::take` leaves an inert guard behind.

use std::marker::PhantomData;

use super::Lockable;

/// RAII ownership of a [`Lockable`].
///
/// # Example
///
/// ```rust,ignore
/// let mutex = Mutex::new();
/// {
///     let _guard = LockGuard::new(&mutex);
///     // ... critical section ...
/// } // unlocked here
/// ```
///
/// Guards are `!Send`: they must be dropped on the thread that locked.
///
/// ```compile_fail
/// use tessera_core::{LockGuard, RecursiveMutex};
///
/// fn assert_send<T: Send>(_: &T) {}
///
/// let mutex = RecursiveMutex::new();
/// let guard = LockGuard::new(&mutex);
/// assert_send(&guard);
/// ```
pub struct LockGuard<'a, M: Lockable> {
    mutex: Option<&'a M>,
    owns: bool,
    /// Lock ownership is per thread, so the guard must stay on the thread
    /// that locked.
    _not_send: PhantomData<*const ()>,
}

impl<'a, M: Lockable> LockGuard<'a, M> {
    /// Locks `mutex` and takes ownership of the lock.
    #[must_use]
    pub fn new(mutex: &'a M) -> Self {
        mutex.lock();
        Self {
            mutex: Some(mutex),
            owns: true,
            _not_send: PhantomData,
        }
    }

    /// Takes ownership of a lock the caller already holds.
    #[must_use]
    pub fn adopt(mutex: &'a M) -> Self {
        Self {
            mutex: Some(mutex),
            owns: true,
            _not_send: PhantomData,
        }
    }

    /// Binds to `mutex` without locking it.
    #[must_use]
    pub fn deferred(mutex: &'a M) -> Self {
        Self {
            mutex: Some(mutex),
            owns: false,
            _not_send: PhantomData,
        }
    }

    /// Makes one non-blocking attempt; check [`Self::owns_lock`].
    #[must_use]
    pub fn try_new(mutex: &'a M) -> Self {
        let owns = mutex.try_lock();
        Self {
            mutex: Some(mutex),
            owns,
            _not_send: PhantomData,
        }
    }

    /// Locks the bound mutex.
    pub fn lock(&mut self) {
        match self.mutex {
            None => tracing::error!("LockGuard::lock on a guard with no mutex"),
            Some(_) if self.owns => tracing::error!("LockGuard::lock on a guard that already owns its lock"),
            Some(mutex) => {
                mutex.lock();
                self.owns = true;
            }
        }
    }

    /// Tries to lock the bound mutex without blocking.
    #[must_use]
    pub fn try_lock(&mut self) -> bool {
        match self.mutex {
            None => {
                tracing::error!("LockGuard::try_lock on a guard with no mutex");
                false
            }
            Some(_) if self.owns => {
                tracing::error!("LockGuard::try_lock on a guard that already owns its lock");
                false
            }
            Some(mutex) => {
                self.owns = mutex.try_lock();
                self.owns
            }
        }
    }

    /// Unlocks the bound mutex.
    pub fn unlock(&mut self) {
        match self.mutex {
            Some(mutex) if self.owns => {
                mutex.unlock();
                self.owns = false;
            }
            _ => tracing::error!("LockGuard::unlock on a guard that does not own a lock"),
        }
    }

    /// Returns whether this guard currently owns the lock.
    #[inline]
    #[must_use]
    pub fn owns_lock(&self) -> bool {
        self.owns
    }

    /// Detaches from the mutex without unlocking it.
    ///
    /// The guard becomes inert and its drop does nothing. If it owned the
    /// lock, the caller is now responsible for unlocking it.
    pub fn release(&mut self) -> Option<&'a M> {
        self.owns = false;
        self.mutex.take()
    }

    #[inline]
    pub(crate) fn mutex(&self) -> Option<&'a M> {
        self.mutex
    }
}

impl<M: Lockable> Default for LockGuard<'_, M> {
    /// An inert guard bound to nothing.
    fn default() -> Self {
        Self {
            mutex: None,
            owns: false,
            _not_send: PhantomData,
        }
    }
}

impl<M: Lockable> Drop for LockGuard<'_, M> {
    fn drop(&mut self) {
        if self.owns {
            if let Some(mutex) = self.mutex {
                mutex.unlock();
            }
        }
    }
}

/// A [`LockGuard`] that also exposes its mutex.
///
/// This is the lock type [`ConditionVariable`](crate::ConditionVariable)
/// waits on: the wait needs the mutex itself to release and reacquire it.
pub struct UniqueLock<'a, M: Lockable> {
    guard: LockGuard<'a, M>,
}

impl<'a, M: Lockable> UniqueLock<'a, M> {
    /// Locks `mutex` and takes ownership of the lock.
    #[must_use]
    pub fn new(mutex: &'a M) -> Self {
        Self {
            guard: LockGuard::new(mutex),
        }
    }

    /// Takes ownership of a lock the caller already holds.
    #[must_use]
    pub fn adopt(mutex: &'a M) -> Self {
        Self {
            guard: LockGuard::adopt(mutex),
        }
    }

    /// Binds to `mutex` without locking it.
    #[must_use]
    pub fn deferred(mutex: &'a M) -> Self {
        Self {
            guard: LockGuard::deferred(mutex),
        }
    }

    /// Makes one non-blocking attempt; check [`Self::owns_lock`].
    #[must_use]
    pub fn try_new(mutex: &'a M) -> Self {
        Self {
            guard: LockGuard::try_new(mutex),
        }
    }

    /// Locks the bound mutex.
    #[inline]
    pub fn lock(&mut self) {
        self.guard.lock();
    }

    /// Tries to lock the bound mutex without blocking.
    #[inline]
    #[must_use]
    pub fn try_lock(&mut self) -> bool {
        self.guard.try_lock()
    }

    /// Unlocks the bound mutex.
    #[inline]
    pub fn unlock(&mut self) {
        self.guard.unlock();
    }

    /// Returns whether this lock currently owns its mutex.
    #[inline]
    #[must_use]
    pub fn owns_lock(&self) -> bool {
        self.guard.owns_lock()
    }

    /// Detaches from the mutex without unlocking it.
    #[inline]
    pub fn release(&mut self) -> Option<&'a M> {
        self.guard.release()
    }

    /// The bound mutex, if any.
    #[inline]
    #[must_use]
    pub fn mutex(&self) -> Option<&'a M> {
        self.guard.mutex()
    }
}

impl<M: Lockable> Default for UniqueLock<'_, M> {
    /// An inert lock bound to nothing.
    fn default() -> Self {
        Self {
            guard: LockGuard::default(),
        }
    }
}
