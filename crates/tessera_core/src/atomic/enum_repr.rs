//! # Atomic Enums
//!
//! Fieldless enums become atomic by declaring them through
//! [`atomic_enum!`](crate::atomic_enum), which pins their representation and
//! stores them in the atomic integer of that width.

/// Declares a fieldless enum that can be stored in an
/// [`AtomicValue`](crate::AtomicValue).
///
/// The representation type follows the enum name, and the enum must derive
/// `Clone` and `Copy`. Only discriminants of declared variants are ever
/// stored, so loads always decode to a valid variant.
///
/// ```rust,ignore
/// use tessera_core::{atomic_enum, AtomicValue};
///
/// atomic_enum! {
///     /// Render thread lifecycle.
///     #[derive(Clone, Copy, Debug, PartialEq, Eq)]
///     pub enum RenderState: u8 {
///         /// Not started yet.
///         Idle = 0,
///         /// Executing command buffers.
///         Running = 1,
///         /// Exit requested.
///         Exiting = 2,
///     }
/// }
///
/// let state = AtomicValue::new(RenderState::Idle);
/// assert!(state.compare_and_swap(RenderState::Idle, RenderState::Running));
/// assert_eq!(state.get(), RenderState::Running);
/// ```
#[macro_export]
macro_rules! atomic_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident : $repr:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $(= $discriminant:expr)?
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[repr($repr)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant $(= $discriminant)?
            ),+
        }

        impl $name {
            #[inline]
            fn from_atomic_repr(raw: $repr) -> Self {
                $(
                    if raw == ($name::$variant as $repr) {
                        return $name::$variant;
                    }
                )+
                unreachable!(
                    "{} discriminant {} was never stored by an atomic",
                    stringify!($name),
                    raw
                )
            }
        }

        impl $crate::AtomicPrimitive for $name {
            type Storage = <$repr as $crate::AtomicPrimitive>::Storage;

            #[inline]
            fn into_storage(self) -> Self::Storage {
                <$repr as $crate::AtomicPrimitive>::into_storage(self as $repr)
            }

            #[inline]
            fn load(storage: &Self::Storage, order: ::std::sync::atomic::Ordering) -> Self {
                Self::from_atomic_repr(<$repr as $crate::AtomicPrimitive>::load(storage, order))
            }

            #[inline]
            fn store(
                storage: &Self::Storage,
                value: Self,
                order: ::std::sync::atomic::Ordering,
            ) {
                <$repr as $crate::AtomicPrimitive>::store(storage, value as $repr, order);
            }

            #[inline]
            fn swap(
                storage: &Self::Storage,
                value: Self,
                order: ::std::sync::atomic::Ordering,
            ) -> Self {
                Self::from_atomic_repr(<$repr as $crate::AtomicPrimitive>::swap(
                    storage,
                    value as $repr,
                    order,
                ))
            }

            #[inline]
            fn compare_exchange(
                storage: &Self::Storage,
                current: Self,
                new: Self,
                success: ::std::sync::atomic::Ordering,
                failure: ::std::sync::atomic::Ordering,
            ) -> ::std::result::Result<Self, Self> {
                <$repr as $crate::AtomicPrimitive>::compare_exchange(
                    storage,
                    current as $repr,
                    new as $repr,
                    success,
                    failure,
                )
                .map(Self::from_atomic_repr)
                .map_err(Self::from_atomic_repr)
            }
        }
    };
}
