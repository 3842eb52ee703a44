//! # Spinlock
//!
//! Test-and-test-and-set busy wait on an [`AtomicValue<usize>`].
//!
//! ```text
//! lock():
//!   loop {
//!     CAS(0 -> 1)           success -> done
//!     while relaxed == 1    spin (cache-local, no bus traffic)
//!   }
//! ```

use crate::atomic::AtomicValue;
use crate::config::SpinConfig;

use super::Lockable;

const UNLOCKED: usize = 0;
const LOCKED: usize = 1;

/// Busy-waiting mutual exclusion for very short critical sections.
///
/// No fairness and no bound on starvation. Never hold a spinlock across a
/// blocking call.
///
/// # Example
///
/// ```rust,ignore
/// static QUEUE_SYNC: Spinlock = Spinlock::new();
///
/// QUEUE_SYNC.lock();
/// render_queue.push(index);
/// QUEUE_SYNC.unlock();
/// ```
pub struct Spinlock {
    /// 0 = unlocked, 1 = locked.
    flag: AtomicValue<usize>,
    /// Polls before yielding the time slice, 0 = never.
    yield_after_spins: u32,
}

impl Spinlock {
    /// Creates an unlocked spinlock that spins without ever yielding.
    #[must_use]
    pub const fn new() -> Self {
        Self::with_config(SpinConfig {
            yield_after_spins: 0,
        })
    }

    /// Creates an unlocked spinlock with the given spin policy.
    #[must_use]
    pub const fn with_config(config: SpinConfig) -> Self {
        Self {
            flag: AtomicValue::<usize>::new_const(UNLOCKED),
            yield_after_spins: config.yield_after_spins,
        }
    }

    /// Spins until the lock is acquired.
    pub fn lock(&self) {
        loop {
            if self.flag.compare_and_swap(UNLOCKED, LOCKED) {
                return;
            }

            let mut spins = 0u32;
            while self.flag.get_relaxed() != UNLOCKED {
                std::hint::spin_loop();

                if self.yield_after_spins != 0 {
                    spins += 1;
                    if spins >= self.yield_after_spins {
                        spins = 0;
                        std::thread::yield_now();
                    }
                }
            }
        }
    }

    /// A single acquire attempt, no retry.
    #[inline]
    #[must_use]
    pub fn try_lock(&self) -> bool {
        self.flag.compare_and_swap(UNLOCKED, LOCKED)
    }

    /// Releases the lock.
    #[inline]
    pub fn unlock(&self) {
        if self.flag.get_relaxed() == UNLOCKED {
            tracing::error!("Spinlock::unlock called on an unlocked spinlock, ignoring");
            return;
        }
        self.flag.set(UNLOCKED);
    }

    /// Returns whether the lock is currently held.
    #[inline]
    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.flag.get() == LOCKED
    }
}

impl Default for Spinlock {
    fn default() -> Self {
        Self::new()
    }
}

impl Lockable for Spinlock {
    #[inline]
    fn lock(&self) {
        Spinlock::lock(self);
    }

    #[inline]
    fn try_lock(&self) -> bool {
        Spinlock::try_lock(self)
    }

    #[inline]
    fn unlock(&self) {
        Spinlock::unlock(self);
    }
}
