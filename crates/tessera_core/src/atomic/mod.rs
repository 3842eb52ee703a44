//! # Atomic Values
//!
//! A single generic atomic wrapper with sequentially consistent defaults.
//!
//! ## Memory Ordering
//!
//! ```text
//! get / set / swap / increment / decrement / compare_and_swap  -> SeqCst
//! get_relaxed                                                  -> Relaxed
//! ```
//!
//! `get_relaxed` is only for polling loops whose happens-before edge is
//! established elsewhere (see [`Spinlock`](crate::Spinlock)).

mod enum_repr;
mod primitive;

use std::fmt;
use std::sync::atomic::Ordering;

pub use primitive::{AtomicInteger, AtomicPrimitive};

/// An atomically accessed value of an integer, `bool`, pointer or enum type.
///
/// Not `Clone`: a copy would not preserve the atomicity of the source.
///
/// # Example
///
/// ```rust,ignore
/// let frames = AtomicValue::new(0u64);
///
/// // Render thread
/// frames.increment();
///
/// // Any thread
/// let seen = frames.get();
/// ```
pub struct AtomicValue<T: AtomicPrimitive> {
    storage: T::Storage,
}

impl<T: AtomicPrimitive> AtomicValue<T> {
    /// Creates a new atomic holding `value`.
    #[inline]
    #[must_use]
    pub fn new(value: T) -> Self {
        Self {
            storage: value.into_storage(),
        }
    }

    /// Sequentially consistent load.
    #[inline]
    #[must_use]
    pub fn get(&self) -> T {
        T::load(&self.storage, Ordering::SeqCst)
    }

    /// Relaxed load. No ordering with respect to other memory operations.
    #[inline]
    #[must_use]
    pub fn get_relaxed(&self) -> T {
        T::load(&self.storage, Ordering::Relaxed)
    }

    /// Sequentially consistent store.
    #[inline]
    pub fn set(&self, value: T) {
        T::store(&self.storage, value, Ordering::SeqCst);
    }

    /// Atomically replaces the value and returns the previous one.
    #[inline]
    pub fn swap(&self, desired: T) -> T {
        T::swap(&self.storage, desired, Ordering::SeqCst)
    }

    /// Strong compare-and-swap.
    ///
    /// Stores `desired` and returns `true` iff the current value equals
    /// `expected`. Otherwise leaves the value untouched and returns `false`.
    /// Never fails spuriously.
    #[inline]
    #[must_use = "a failed compare_and_swap leaves the value unchanged"]
    pub fn compare_and_swap(&self, expected: T, desired: T) -> bool {
        T::compare_exchange(
            &self.storage,
            expected,
            desired,
            Ordering::SeqCst,
            Ordering::SeqCst,
        )
        .is_ok()
    }
}

// `const` construction for concrete instantiations, so atomics can live in
// `static` items.
macro_rules! impl_const_new {
    ($($value:ty => $storage:ident),+ $(,)?) => {
        $(
            impl AtomicValue<$value> {
                #[doc = concat!("Creates an `AtomicValue<", stringify!($value), ">` in a const context.")]
                #[inline]
                #[must_use]
                pub const fn new_const(value: $value) -> Self {
                    Self {
                        storage: std::sync::atomic::$storage::new(value),
                    }
                }
            }
        )+
    };
}

impl_const_new! {
    bool => AtomicBool,
    i8 => AtomicI8,
    u8 => AtomicU8,
    i16 => AtomicI16,
    u16 => AtomicU16,
    i32 => AtomicI32,
    u32 => AtomicU32,
    i64 => AtomicI64,
    u64 => AtomicU64,
    isize => AtomicIsize,
    usize => AtomicUsize,
}

impl<P> AtomicValue<*mut P> {
    /// Creates an atomic pointer in a const context.
    #[inline]
    #[must_use]
    pub const fn new_const(value: *mut P) -> Self {
        Self {
            storage: std::sync::atomic::AtomicPtr::new(value),
        }
    }
}

impl<T: AtomicInteger> AtomicValue<T> {
    /// Atomic pre-increment. Returns the new value; wraps on overflow.
    #[inline]
    pub fn increment(&self) -> T {
        T::increment(&self.storage, Ordering::SeqCst)
    }

    /// Atomic pre-decrement. Returns the new value; wraps on underflow.
    #[inline]
    pub fn decrement(&self) -> T {
        T::decrement(&self.storage, Ordering::SeqCst)
    }
}

impl<T: AtomicPrimitive + Default> Default for AtomicValue<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: AtomicPrimitive> From<T> for AtomicValue<T> {
    fn from(value: T) -> Self {
        Self::new(value)
    }
}

impl<T: AtomicPrimitive + fmt::Debug> fmt::Debug for AtomicValue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AtomicValue").field(&self.get()).finish()
    }
}
