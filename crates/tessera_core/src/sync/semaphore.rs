//! # Semaphore
//!
//! Counting semaphore on a [`ConcurrentObject<u32>`] and a
//! [`ConditionVariable`].

use crate::sync::{ConcurrentObject, ConditionVariable};

/// A counting semaphore.
///
/// Typical use is start-up handshakes: the spawning thread waits, the
/// spawned thread posts once it is ready.
///
/// # Example
///
/// ```rust,ignore
/// let started = Arc::new(Semaphore::new(0));
///
/// let render_started = Arc::clone(&started);
/// thread::spawn(move || {
///     init_render_context();
///     render_started.post(1);
///     render_loop();
/// });
///
/// started.wait();
/// ```
pub struct Semaphore {
    count: ConcurrentObject<u32>,
    available: ConditionVariable,
}

impl Semaphore {
    /// Creates a semaphore holding `initial` permits.
    #[must_use]
    pub const fn new(initial: u32) -> Self {
        Self {
            count: ConcurrentObject::new(initial),
            available: ConditionVariable::new(),
        }
    }

    /// Adds `count` permits and wakes waiters. Saturates at `u32::MAX`.
    pub fn post(&self, count: u32) {
        if count == 0 {
            return;
        }

        let mut permits = self.count.lock();
        let current = *permits;
        *permits = current.checked_add(count).unwrap_or_else(|| {
            tracing::warn!(
                "Semaphore::post({}) overflows {} permits, saturating",
                count,
                current
            );
            u32::MAX
        });

        if count == 1 {
            self.available.notify_one();
        } else {
            self.available.notify_all();
        }
    }

    /// Blocks until a permit is available and takes it.
    pub fn wait(&self) {
        let mut permits = self.count.lock();
        permits.wait_until(&self.available, |permits| *permits > 0);
        *permits -= 1;
    }

    /// Takes a permit if one is available right now.
    #[must_use]
    pub fn try_wait(&self) -> bool {
        let mut permits = self.count.lock();
        if *permits == 0 {
            return false;
        }
        *permits -= 1;
        true
    }

    /// Current number of permits.
    #[must_use]
    pub fn count(&self) -> u32 {
        *self.count.lock()
    }
}

impl Default for Semaphore {
    fn default() -> Self {
        Self::new(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    static RENDER_STARTED: Semaphore = Semaphore::new(0);

    #[test]
    fn test_static_semaphore_handshake() {
        let render = thread::spawn(|| RENDER_STARTED.post(1));
        RENDER_STARTED.wait();
        render.join().unwrap();
        assert_eq!(RENDER_STARTED.count(), 0);
    }

    #[test]
    fn test_initial_permits() {
        let sem = Semaphore::new(2);
        assert!(sem.try_wait());
        assert!(sem.try_wait());
        assert!(!sem.try_wait());
        assert_eq!(sem.count(), 0);
    }

    #[test]
    fn test_post_then_wait() {
        let sem = Semaphore::new(0);
        sem.post(3);
        assert_eq!(sem.count(), 3);
        sem.wait();
        sem.wait();
        assert_eq!(sem.count(), 1);
    }

    #[test]
    fn test_post_saturates() {
        let sem = Semaphore::new(u32::MAX - 1);
        sem.post(5);
        assert_eq!(sem.count(), u32::MAX);
    }

    #[test]
    fn test_post_zero_is_noop() {
        let sem = Semaphore::default();
        sem.post(0);
        assert_eq!(sem.count(), 0);
    }

    #[test]
    fn test_startup_handshake() {
        let started = Arc::new(Semaphore::new(0));
        let workers = 4;

        let handles: Vec<_> = (0..workers)
            .map(|_| {
                let started = Arc::clone(&started);
                thread::spawn(move || started.post(1))
            })
            .collect();

        for _ in 0..workers {
            started.wait();
        }
        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(started.count(), 0);
    }

    #[test]
    fn test_post_many_releases_all_waiters() {
        let sem = Arc::new(Semaphore::new(0));

        let waiters: Vec<_> = (0..3)
            .map(|_| {
                let sem = Arc::clone(&sem);
                thread::spawn(move || sem.wait())
            })
            .collect();

        sem.post(3);
        for w in waiters {
            w.join().unwrap();
        }
        assert_eq!(sem.count(), 0);
    }
}
