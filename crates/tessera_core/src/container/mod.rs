//! # Containers
//!
//! Thread-safe collections built on the [`sync`](crate::sync) layer.

mod deque;

pub use deque::ConcurrentDeque;
