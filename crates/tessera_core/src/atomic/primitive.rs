//! # Atomic Primitive Types
//!
//! Maps each value type that may live inside an
//! [`AtomicValue`](super::AtomicValue) onto its `std` atomic storage.

use std::sync::atomic::{
    AtomicBool, AtomicI16, AtomicI32, AtomicI64, AtomicI8, AtomicIsize, AtomicPtr, AtomicU16,
    AtomicU32, AtomicU64, AtomicU8, AtomicUsize, Ordering,
};

/// A value type with a lock-free atomic representation.
///
/// Implemented for the integer types, `bool`, `*mut P`, `*const P`, and
/// enums declared through [`atomic_enum!`](crate::atomic_enum). Any other
/// type is rejected at compile time when used as the parameter of
/// `AtomicValue`.
pub trait AtomicPrimitive: Copy {
    /// The atomic cell holding the value.
    type Storage: Send + Sync;

    /// Wraps `self` in a fresh atomic cell.
    fn into_storage(self) -> Self::Storage;

    /// Atomically loads the value.
    fn load(storage: &Self::Storage, order: Ordering) -> Self;

    /// Atomically stores `value`.
    fn store(storage: &Self::Storage, value: Self, order: Ordering);

    /// Atomically replaces the value, returning the previous one.
    fn swap(storage: &Self::Storage, value: Self, order: Ordering) -> Self;

    /// Strong compare-exchange. `Ok(previous)` on success, `Err(actual)`
    /// otherwise.
    ///
    /// # Errors
    ///
    /// Returns the value actually stored when it differs from `current`.
    fn compare_exchange(
        storage: &Self::Storage,
        current: Self,
        new: Self,
        success: Ordering,
        failure: Ordering,
    ) -> Result<Self, Self>;
}

/// An [`AtomicPrimitive`] that supports increment and decrement.
pub trait AtomicInteger: AtomicPrimitive {
    /// Atomically adds one (wrapping) and returns the new value.
    fn increment(storage: &Self::Storage, order: Ordering) -> Self;

    /// Atomically subtracts one (wrapping) and returns the new value.
    fn decrement(storage: &Self::Storage, order: Ordering) -> Self;
}

macro_rules! impl_atomic_primitive {
    ($($value:ty => $storage:ty),+ $(,)?) => {
        $(
            impl AtomicPrimitive for $value {
                type Storage = $storage;

                #[inline]
                fn into_storage(self) -> Self::Storage {
                    <$storage>::new(self)
                }

                #[inline]
                fn load(storage: &Self::Storage, order: Ordering) -> Self {
                    storage.load(order)
                }

                #[inline]
                fn store(storage: &Self::Storage, value: Self, order: Ordering) {
                    storage.store(value, order);
                }

                #[inline]
                fn swap(storage: &Self::Storage, value: Self, order: Ordering) -> Self {
                    storage.swap(value, order)
                }

                #[inline]
                fn compare_exchange(
                    storage: &Self::Storage,
                    current: Self,
                    new: Self,
                    success: Ordering,
                    failure: Ordering,
                ) -> Result<Self, Self> {
                    storage.compare_exchange(current, new, success, failure)
                }
            }
        )+
    };
}

macro_rules! impl_atomic_integer {
    ($($value:ty),+ $(,)?) => {
        $(
            impl AtomicInteger for $value {
                #[inline]
                fn increment(storage: &Self::Storage, order: Ordering) -> Self {
                    storage.fetch_add(1, order).wrapping_add(1)
                }

                #[inline]
                fn decrement(storage: &Self::Storage, order: Ordering) -> Self {
                    storage.fetch_sub(1, order).wrapping_sub(1)
                }
            }
        )+
    };
}

impl_atomic_primitive! {
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

impl_atomic_integer!(i8, u8, i16, u16, i32, u32, i64, u64, isize, usize);

impl<P> AtomicPrimitive for *mut P {
    type Storage = AtomicPtr<P>;

    #[inline]
    fn into_storage(self) -> Self::Storage {
        AtomicPtr::new(self)
    }

    #[inline]
    fn load(storage: &Self::Storage, order: Ordering) -> Self {
        storage.load(order)
    }

    #[inline]
    fn store(storage: &Self::Storage, value: Self, order: Ordering) {
        storage.store(value, order);
    }

    #[inline]
    fn swap(storage: &Self::Storage, value: Self, order: Ordering) -> Self {
        storage.swap(value, order)
    }

    #[inline]
    fn compare_exchange(
        storage: &Self::Storage,
        current: Self,
        new: Self,
        success: Ordering,
        failure: Ordering,
    ) -> Result<Self, Self> {
        storage.compare_exchange(current, new, success, failure)
    }
}

// `*const P` shares `AtomicPtr` storage; the casts never dereference.
impl<P> AtomicPrimitive for *const P {
    type Storage = AtomicPtr<P>;

    #[inline]
    fn into_storage(self) -> Self::Storage {
        AtomicPtr::new(self.cast_mut())
    }

    #[inline]
    fn load(storage: &Self::Storage, order: Ordering) -> Self {
        storage.load(order).cast_const()
    }

    #[inline]
    fn store(storage: &Self::Storage, value: Self, order: Ordering) {
        storage.store(value.cast_mut(), order);
    }

    #[inline]
    fn swap(storage: &Self::Storage, value: Self, order: Ordering) -> Self {
        storage.swap(value.cast_mut(), order).cast_const()
    }

    #[inline]
    fn compare_exchange(
        storage: &Self::Storage,
        current: Self,
        new: Self,
        success: Ordering,
        failure: Ordering,
    ) -> Result<Self, Self> {
        storage
            .compare_exchange(current.cast_mut(), new.cast_mut(), success, failure)
            .map(<*mut P>::cast_const)
            .map_err(<*mut P>::cast_const)
    }
}
