//! # Reset Events
//!
//! Binary signals built on a `ConcurrentObject<bool>`.
//!
//! ```text
//! ManualResetEvent   signal() latches; every wait() passes until reset()
//! AutoResetEvent     signal() lets exactly one wait() through, then clears
//! ```

use crate::sync::{ConcurrentObject, ConditionVariable};

/// A latched signal. Once signaled, all waiters pass until [`Self::reset`].
pub struct ManualResetEvent {
    signaled: ConcurrentObject<bool>,
    changed: ConditionVariable,
}

impl ManualResetEvent {
    /// Creates an event in the given state.
    #[must_use]
    pub const fn new(signaled: bool) -> Self {
        Self {
            signaled: ConcurrentObject::new(signaled),
            changed: ConditionVariable::new(),
        }
    }

    /// Latches the event and wakes every waiter.
    pub fn signal(&self) {
        let mut signaled = self.signaled.lock();
        *signaled = true;
        self.changed.notify_all();
    }

    /// Clears the latch.
    pub fn reset(&self) {
        *self.signaled.lock() = false;
    }

    /// Blocks until the event is signaled. Returns at once if it already is.
    pub fn wait(&self) {
        let mut signaled = self.signaled.lock();
        signaled.wait_until(&self.changed, |signaled| *signaled);
    }

    /// Current state.
    #[must_use]
    pub fn is_signaled(&self) -> bool {
        *self.signaled.lock()
    }
}

impl Default for ManualResetEvent {
    fn default() -> Self {
        Self::new(false)
    }
}

/// A one-shot signal. Each [`Self::signal`] releases a single
/// [`Self::wait`], which clears the event again.
///
/// Signals do not accumulate: two signals with no waiter in between release
/// only one later wait.
pub struct AutoResetEvent {
    signaled: ConcurrentObject<bool>,
    changed: ConditionVariable,
}

impl AutoResetEvent {
    /// Creates an event in the given state.
    #[must_use]
    pub const fn new(signaled: bool) -> Self {
        Self {
            signaled: ConcurrentObject::new(signaled),
            changed: ConditionVariable::new(),
        }
    }

    /// Sets the event and wakes one waiter.
    pub fn signal(&self) {
        let mut signaled = self.signaled.lock();
        *signaled = true;
        self.changed.notify_one();
    }

    /// Clears the event without waking anyone.
    pub fn reset(&self) {
        *self.signaled.lock() = false;
    }

    /// Blocks until signaled, then consumes the signal.
    pub fn wait(&self) {
        let mut signaled = self.signaled.lock();
        signaled.wait_until(&self.changed, |signaled| *signaled);
        *signaled = false;
    }

    /// Consumes the signal if it is set right now.
    #[must_use]
    pub fn try_wait(&self) -> bool {
        let mut signaled = self.signaled.lock();
        std::mem::replace(&mut *signaled, false)
    }
}

impl Default for AutoResetEvent {
    fn default() -> Self {
        Self::new(false)
    }
}
