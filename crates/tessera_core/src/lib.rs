//! # Tessera Core
//!
//! Portable concurrency primitives for engine subsystems:
//! - Typed atomics with sequentially consistent defaults
//! - Explicit lock/unlock mutexes, recursive mutexes and spinlocks
//! - RAII guards, condition variables, semaphores and reset events
//! - A blocking, cancelable double-ended queue
//!
//! ## Layering
//!
//! ```text
//! atomic     AtomicValue<T>            (std atomics)
//! lock       Mutex, RecursiveMutex     (parking_lot)
//!            Spinlock                  (AtomicValue<usize>)
//!            LockGuard, UniqueLock     (any Lockable)
//! sync       ConditionVariable         (parking_lot Condvar + Mutex)
//!            ConcurrentObject<T>       (Mutex + T)
//!            Semaphore, *ResetEvent    (ConcurrentObject + ConditionVariable)
//! container  ConcurrentDeque<T>        (ConcurrentObject<VecDeque<T>>)
//! ```
//!
//! ## Misuse Policy
//!
//! Construction never fails. Detectable misuse, such as unlocking a mutex
//! the caller does not hold, is reported through `tracing` and ignored.
//!
//! ## Example
//!
//! ```rust,ignore
//! use tessera_core::{ConcurrentDeque, LockGuard, Mutex};
//!
//! static LOG_MUTEX: Mutex = Mutex::new();
//!
//! let _guard = LockGuard::new(&LOG_MUTEX);
//! // critical section
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod atomic;
pub mod config;
pub mod container;
pub mod error;
pub mod lock;
pub mod sync;

pub use atomic::{AtomicInteger, AtomicPrimitive, AtomicValue};
pub use config::{DequeConfig, SpinConfig, SyncConfig, MAX_DEQUE_INITIAL_CAPACITY};
pub use container::ConcurrentDeque;
pub use error::{SyncError, SyncResult};
pub use lock::{LockGuard, Lockable, Mutex, RecursiveMutex, Spinlock, UniqueLock};
pub use sync::{
    AutoResetEvent, ConcurrentObject, ConcurrentObjectAccessor, ConditionVariable,
    ManualResetEvent, Semaphore,
};
