//! # Locks
//!
//! Mutual exclusion with explicit `lock` / `unlock`, plus scope guards.
//!
//! ```text
//!   Mutex            blocking, not reentrant
//!   RecursiveMutex   blocking, reentrant for the owning thread
//!   Spinlock         busy wait, for very short critical sections
//!
//!   LockGuard<M> / UniqueLock<M>   RAII over any Lockable
//! ```
//!
//! All three lock types are data-less: they protect whatever the caller
//! decides they protect. To pair a lock with the data it guards, use
//! [`ConcurrentObject`](crate::ConcurrentObject).

mod guard;
mod mutex;
mod recursive;
mod spinlock;

pub use guard::{LockGuard, UniqueLock};
pub use mutex::Mutex;
pub use recursive::RecursiveMutex;
pub use spinlock::Spinlock;

/// A mutex-shaped type: anything that can be locked, try-locked and unlocked
/// through a shared reference.
///
/// [`LockGuard`] and [`UniqueLock`] are generic over this trait.
pub trait Lockable {
    /// Blocks (or spins) until the lock is acquired.
    fn lock(&self);

    /// Attempts to acquire the lock without blocking.
    #[must_use]
    fn try_lock(&self) -> bool;

    /// Releases the lock. Must only be called by the owner.
    fn unlock(&self);
}
