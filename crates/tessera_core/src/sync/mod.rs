//! # Synchronization Primitives
//!
//! Blocking coordination between threads, all layered on
//! [`Mutex`](crate::Mutex).
//!
//! ```text
//! ConditionVariable          wait / notify over a UniqueLock<Mutex>
//! ConcurrentObject<T>        Mutex + the T it protects
//!   └─ Semaphore             ConcurrentObject<u32> + ConditionVariable
//!   └─ Manual/AutoResetEvent ConcurrentObject<bool> + ConditionVariable
//! ```

mod condvar;
mod event;
mod object;
mod semaphore;

pub use condvar::ConditionVariable;
pub use event::{AutoResetEvent, ManualResetEvent};
pub use object::{ConcurrentObject, ConcurrentObjectAccessor};
pub use semaphore::Semaphore;
