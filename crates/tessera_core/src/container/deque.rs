//! # Concurrent Deque
//!
//! Blocking double-ended queue with cooperative cancellation.
//!
//! ## States
//!
//! ```text
//!   Active ──cancel()──► Canceled      (one way, idempotent)
//! ```
//!
//! While active, `front`/`back` block on an empty deque. Once canceled,
//! blocked and future readers of an empty deque return immediately with
//! `T::default()` (or `SyncError::Canceled` from the `_checked` variants).
//! Elements still queued at cancel time remain readable.

use std::collections::VecDeque;

use crate::atomic::AtomicValue;
use crate::config::DequeConfig;
use crate::error::{SyncError, SyncResult};
use crate::sync::{ConcurrentObject, ConcurrentObjectAccessor, ConditionVariable};

#[derive(Clone, Copy)]
enum End {
    Front,
    Back,
}

/// A blocking double-ended queue shared between threads.
///
/// # Example
///
/// ```rust,ignore
/// let jobs = Arc::new(ConcurrentDeque::new());
///
/// // Producer
/// jobs.push_back(job);
///
/// // Consumer thread
/// while !jobs.is_canceled() {
///     let job = jobs.pop_front();
///     // ...
/// }
///
/// // Shutdown
/// jobs.cancel();
/// ```
pub struct ConcurrentDeque<T> {
    items: ConcurrentObject<VecDeque<T>>,
    /// Signaled on the empty -> non-empty transition and on cancel.
    not_empty: ConditionVariable,
    /// Recomputed under the lock after every mutation, read without it.
    empty: AtomicValue<bool>,
    canceled: AtomicValue<bool>,
}

impl<T> ConcurrentDeque<T> {
    /// Creates an empty, active deque without allocating.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            items: ConcurrentObject::new(VecDeque::new()),
            not_empty: ConditionVariable::new(),
            empty: AtomicValue::<bool>::new_const(true),
            canceled: AtomicValue::<bool>::new_const(false),
        }
    }

    /// Creates an empty deque with room for `capacity` elements.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: ConcurrentObject::new(VecDeque::with_capacity(capacity)),
            not_empty: ConditionVariable::new(),
            empty: AtomicValue::new(true),
            canceled: AtomicValue::new(false),
        }
    }

    /// Creates an empty deque sized from configuration.
    #[must_use]
    pub fn from_config(config: &DequeConfig) -> Self {
        Self::with_capacity(config.initial_capacity)
    }

    /// Appends to the back, waking readers if the deque was empty.
    pub fn push_back(&self, value: T) {
        self.mutate(|items| items.push_back(value));
    }

    /// Prepends to the front, waking readers if the deque was empty.
    pub fn push_front(&self, value: T) {
        self.mutate(|items| items.push_front(value));
    }

    /// Blocks until an element is available, then returns (and optionally
    /// pops) the front element.
    ///
    /// Returns `T::default()` if the deque is canceled while empty; use
    /// [`Self::is_canceled`] or [`Self::front_checked`] to tell the two
    /// apart.
    ///
    /// The `Clone` bound is needed by the peek path (`pop == false`). For
    /// element types that cannot be cloned, such as boxed closures, pop
    /// with [`Self::pop_front`], which only needs `Default`.
    pub fn front(&self, pop: bool) -> T
    where
        T: Clone + Default,
    {
        self.front_checked(pop).unwrap_or_default()
    }

    /// Like [`Self::front`], for the back element.
    ///
    /// Non-`Clone` element types pop with [`Self::pop_back`].
    pub fn back(&self, pop: bool) -> T
    where
        T: Clone + Default,
    {
        self.back_checked(pop).unwrap_or_default()
    }

    /// Like [`Self::front`], but reports cancellation as an error.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Canceled`] if the deque was canceled while empty.
    pub fn front_checked(&self, pop: bool) -> SyncResult<T>
    where
        T: Clone,
    {
        if pop {
            self.take(End::Front)
        } else {
            self.peek(End::Front)
        }
    }

    /// Like [`Self::back`], but reports cancellation as an error.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Canceled`] if the deque was canceled while empty.
    pub fn back_checked(&self, pop: bool) -> SyncResult<T>
    where
        T: Clone,
    {
        if pop {
            self.take(End::Back)
        } else {
            self.peek(End::Back)
        }
    }

    /// Blocks until an element is available and removes it from the front.
    ///
    /// Returns `T::default()` if the deque is canceled while empty.
    pub fn pop_front(&self) -> T
    where
        T: Default,
    {
        self.take(End::Front).unwrap_or_default()
    }

    /// Blocks until an element is available and removes it from the back.
    ///
    /// Returns `T::default()` if the deque is canceled while empty.
    pub fn pop_back(&self) -> T
    where
        T: Default,
    {
        self.take(End::Back).unwrap_or_default()
    }

    /// Runs `f` on the underlying sequence under a single critical section.
    ///
    /// Readers are woken if `f` leaves a previously empty deque non-empty.
    /// `f` must not call back into this deque.
    pub fn process_deque<R, F>(&self, f: F) -> R
    where
        F: FnOnce(&mut VecDeque<T>) -> R,
    {
        self.mutate(f)
    }

    /// Number of queued elements.
    #[must_use]
    pub fn size(&self) -> usize {
        self.items.lock().len()
    }

    /// Cached emptiness, read without locking.
    ///
    /// May be stale by the time the caller acts on it.
    #[must_use]
    pub fn empty(&self) -> bool {
        self.empty.get()
    }

    /// Removes every element.
    pub fn clear(&self) {
        let mut items = self.items.lock();
        items.clear();
        self.empty.set(true);
    }

    /// Cancels the deque and releases every blocked reader. Idempotent.
    pub fn cancel(&self) {
        if self.canceled.swap(true) {
            return;
        }
        tracing::debug!("ConcurrentDeque canceled, releasing waiters");

        // Taking the lock orders the flag before any waiter's predicate
        // check, so no reader can park after missing it.
        let _items = self.items.lock();
        self.not_empty.notify_all();
    }

    /// Whether [`Self::cancel`] has been called. Relaxed read for polling.
    #[must_use]
    pub fn is_canceled(&self) -> bool {
        self.canceled.get_relaxed()
    }

    fn mutate<R, F>(&self, f: F) -> R
    where
        F: FnOnce(&mut VecDeque<T>) -> R,
    {
        let mut items = self.items.lock();
        let was_empty = items.is_empty();
        let result = f(&mut items);
        let now_empty = items.is_empty();
        self.empty.set(now_empty);

        if was_empty && !now_empty {
            self.not_empty.notify_all();
        }
        result
    }

    /// Locks and waits until the deque is non-empty or canceled.
    fn wait_for_item(&self) -> SyncResult<ConcurrentObjectAccessor<'_, VecDeque<T>>> {
        let mut items = self.items.lock();
        items.wait_until(&self.not_empty, |items| {
            !items.is_empty() || self.canceled.get()
        });

        if items.is_empty() {
            Err(SyncError::Canceled)
        } else {
            Ok(items)
        }
    }

    fn take(&self, end: End) -> SyncResult<T> {
        let mut items = self.wait_for_item()?;
        let value = match end {
            End::Front => items.pop_front(),
            End::Back => items.pop_back(),
        };
        self.empty.set(items.is_empty());
        value.ok_or(SyncError::Canceled)
    }

    fn peek(&self, end: End) -> SyncResult<T>
    where
        T: Clone,
    {
        let items = self.wait_for_item()?;
        let value = match end {
            End::Front => items.front(),
            End::Back => items.back(),
        };
        value.cloned().ok_or(SyncError::Canceled)
    }
}

impl<T> Default for ConcurrentDeque<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;
    use std::time::{Duration, Instant};

    #[test]
    fn test_push_back_is_fifo() {
        let deque = ConcurrentDeque::new();
        for i in 1..=3 {
            deque.push_back(i);
        }
        assert_eq!(deque.front(true), 1);
        assert_eq!(deque.front(true), 2);
        assert_eq!(deque.front(true), 3);
        assert!(deque.empty());
    }

    #[test]
    fn test_push_front_is_lifo() {
        let deque = ConcurrentDeque::new();
        for i in 1..=3 {
            deque.push_front(i);
        }
        assert_eq!(deque.front(true), 3);
        assert_eq!(deque.front(true), 2);
        assert_eq!(deque.front(true), 1);
    }

    #[test]
    fn test_peek_does_not_pop() {
        let deque = ConcurrentDeque::new();
        deque.push_back(10);
        deque.push_back(20);

        assert_eq!(deque.front(false), 10);
        assert_eq!(deque.back(false), 20);
        assert_eq!(deque.size(), 2);

        assert_eq!(deque.back(true), 20);
        assert_eq!(deque.size(), 1);
        assert!(!deque.empty());
    }

    #[test]
    fn test_empty_flag_tracks_mutations() {
        let deque = ConcurrentDeque::with_capacity(4);
        assert!(deque.empty());

        deque.push_back("a");
        assert!(!deque.empty());

        deque.clear();
        assert!(deque.empty());
        assert_eq!(deque.size(), 0);

        deque.push_front("b");
        assert_eq!(deque.pop_back(), "b");
        assert!(deque.empty());
    }

    #[test]
    fn test_process_deque_compound_operation() {
        let deque = ConcurrentDeque::new();
        for i in 0..10 {
            deque.push_back(i);
        }

        let drained: Vec<i32> = deque.process_deque(|items| {
            items.retain(|v| v % 2 == 0);
            items.drain(..2).collect()
        });

        assert_eq!(drained, vec![0, 2]);
        assert_eq!(deque.size(), 3);
        assert_eq!(deque.pop_front(), 4);
    }

    #[test]
    fn test_process_deque_wakes_reader() {
        let deque = Arc::new(ConcurrentDeque::new());

        let reader = {
            let deque = Arc::clone(&deque);
            thread::spawn(move || deque.pop_front())
        };

        thread::sleep(Duration::from_millis(20));
        deque.process_deque(|items| items.extend([7, 8]));

        assert_eq!(reader.join().unwrap(), 7);
        assert_eq!(deque.size(), 1);
    }

    #[test]
    fn test_blocked_reader_receives_push() {
        let deque = Arc::new(ConcurrentDeque::new());

        let reader = {
            let deque = Arc::clone(&deque);
            thread::spawn(move || deque.back(true))
        };

        thread::sleep(Duration::from_millis(20));
        deque.push_back(String::from("payload"));

        assert_eq!(reader.join().unwrap(), "payload");
        assert!(!deque.is_canceled());
    }

    #[test]
    fn test_cancel_releases_blocked_reader() {
        let deque: Arc<ConcurrentDeque<u32>> = Arc::new(ConcurrentDeque::new());

        let reader = {
            let deque = Arc::clone(&deque);
            thread::spawn(move || deque.front(true))
        };

        thread::sleep(Duration::from_millis(20));
        let start = Instant::now();
        deque.cancel();

        assert_eq!(reader.join().unwrap(), 0);
        assert!(start.elapsed() < Duration::from_secs(5));
        assert!(deque.is_canceled());
    }

    #[test]
    fn test_cancel_is_idempotent() {
        let deque: ConcurrentDeque<u8> = ConcurrentDeque::new();
        deque.cancel();
        deque.cancel();
        assert!(deque.is_canceled());
        assert_eq!(deque.front_checked(true), Err(SyncError::Canceled));
        assert_eq!(deque.back(false), 0);
    }

    #[test]
    fn test_canceled_deque_still_drains() {
        let deque = ConcurrentDeque::new();
        deque.push_back(5u32);
        deque.cancel();

        assert_eq!(deque.front_checked(true), Ok(5));
        assert_eq!(deque.front_checked(true), Err(SyncError::Canceled));
    }

    struct Job(Option<Box<dyn FnOnce() -> u32 + Send>>);

    impl Default for Job {
        fn default() -> Self {
            Job(None)
        }
    }

    #[test]
    fn test_non_clone_jobs_pop_from_both_ends() {
        let jobs: Arc<ConcurrentDeque<Job>> = Arc::new(ConcurrentDeque::new());
        jobs.push_back(Job(Some(Box::new(|| 1))));
        jobs.push_back(Job(Some(Box::new(|| 2))));
        jobs.push_front(Job(Some(Box::new(|| 0))));

        let Job(last) = jobs.pop_back();
        let mut results: Vec<u32> = last.into_iter().map(|run| run()).collect();

        let worker = {
            let jobs = Arc::clone(&jobs);
            thread::spawn(move || {
                let mut drained = Vec::new();
                while let Job(Some(run)) = jobs.pop_front() {
                    drained.push(run());
                }
                drained
            })
        };

        jobs.cancel();
        results.extend(worker.join().unwrap());
        assert_eq!(results, vec![2, 0, 1]);
    }

    static SHARED_QUEUE: ConcurrentDeque<u32> = ConcurrentDeque::new();

    #[test]
    fn test_static_deque() {
        SHARED_QUEUE.push_back(42);
        assert_eq!(SHARED_QUEUE.pop_back(), 42);
        assert!(SHARED_QUEUE.empty());
    }

    #[test]
    fn test_from_config() {
        let deque: ConcurrentDeque<u64> =
            ConcurrentDeque::from_config(&DequeConfig { initial_capacity: 64 });
        assert!(deque.empty());
        assert!(deque.process_deque(|items| items.capacity()) >= 64);
    }
}
