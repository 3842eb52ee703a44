//! # Concurrent Object
//!
//! A value bundled with the [`Mutex`] that protects it.
//!
//! ## Safety Note
//!
//! The value lives in an `UnsafeCell`. Access is only handed out through a
//! [`ConcurrentObjectAccessor`], which owns the mutex for its whole
//! lifetime: its `UniqueLock` is private and is only ever released
//! temporarily inside [`ConditionVariable`] waits, while no borrow of the
//! value is alive.

#![allow(unsafe_code)]

use std::cell::UnsafeCell;
use std::ops::{Deref, DerefMut};

use crate::lock::{Mutex, UniqueLock};
use crate::sync::ConditionVariable;

/// A value that can only be touched while its mutex is held.
///
/// # Example
///
/// ```rust,ignore
/// let pending = ConcurrentObject::new(Vec::new());
///
/// pending.lock().push(task);
///
/// let drained = std::mem::take(&mut *pending.lock());
/// ```
pub struct ConcurrentObject<T> {
    mutex: Mutex,
    value: UnsafeCell<T>,
}

// SAFETY: `value` is only reachable through an accessor that holds `mutex`,
// so at most one thread touches it at a time. Moving `T` across threads
// requires `T: Send`.
unsafe impl<T: Send> Sync for ConcurrentObject<T> {}

impl<T> ConcurrentObject<T> {
    /// Wraps `value`.
    #[must_use]
    pub const fn new(value: T) -> Self {
        Self {
            mutex: Mutex::new(),
            value: UnsafeCell::new(value),
        }
    }

    /// Blocks until the mutex is acquired and returns an accessor.
    pub fn lock(&self) -> ConcurrentObjectAccessor<'_, T> {
        ConcurrentObjectAccessor {
            lock: UniqueLock::new(&self.mutex),
            value: &self.value,
        }
    }

    /// Returns an accessor if the mutex is free right now.
    pub fn try_lock(&self) -> Option<ConcurrentObjectAccessor<'_, T>> {
        let lock = UniqueLock::try_new(&self.mutex);
        lock.owns_lock().then(|| ConcurrentObjectAccessor {
            lock,
            value: &self.value,
        })
    }

    /// Direct access through exclusive ownership, no locking.
    pub fn get_mut(&mut self) -> &mut T {
        self.value.get_mut()
    }

    /// Consumes the object and returns the value.
    pub fn into_inner(self) -> T {
        self.value.into_inner()
    }
}

impl<T: Default> Default for ConcurrentObject<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

/// Locked access to a [`ConcurrentObject`]. Unlocks on drop.
pub struct ConcurrentObjectAccessor<'a, T> {
    lock: UniqueLock<'a, Mutex>,
    value: &'a UnsafeCell<T>,
}

impl<T> ConcurrentObjectAccessor<'_, T> {
    /// Releases the mutex, blocks on `condvar`, reacquires before returning.
    ///
    /// May wake spuriously; prefer [`Self::wait_until`].
    pub fn wait(&mut self, condvar: &ConditionVariable) {
        condvar.wait(&mut self.lock);
    }

    /// Waits on `condvar` until `predicate` holds for the protected value.
    ///
    /// The predicate runs with the mutex held.
    pub fn wait_until<F>(&mut self, condvar: &ConditionVariable, mut predicate: F)
    where
        F: FnMut(&T) -> bool,
    {
        while !predicate(&**self) {
            condvar.wait(&mut self.lock);
        }
    }
}

impl<T> Deref for ConcurrentObjectAccessor<'_, T> {
    type Target = T;

    #[inline]
    fn deref(&self) -> &T {
        // SAFETY: the accessor owns the mutex (see module docs)
        unsafe { &*self.value.get() }
    }
}

impl<T> DerefMut for ConcurrentObjectAccessor<'_, T> {
    #[inline]
    fn deref_mut(&mut self) -> &mut T {
        // SAFETY: the accessor owns the mutex and `&mut self` rules out any
        // other borrow through this accessor.
        unsafe { &mut *self.value.get() }
    }
}
