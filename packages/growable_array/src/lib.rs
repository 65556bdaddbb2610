#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! A minimal dynamic array with amortized doubling growth.
//!
//! This crate provides [`GrowableArray<T>`], a contiguous container that tracks its length
//! separately from its capacity and grows its storage as values are added. The storage is an
//! [`OwnedBuffer`][owned_buffer::OwnedBuffer] that the array exclusively owns; every capacity
//! change allocates a new buffer, moves the values over and swaps the new buffer in.
//!
//! # Key Features
//!
//! - **Amortized constant-time append**: a full array doubles its capacity (0 grows to 1)
//! - **Positional insert and erase**: values shift to make room or close the gap
//! - **Exact reservation**: [`reserve()`][GrowableArray::reserve] and
//!   [`resize()`][GrowableArray::resize] grow to exactly the requested capacity
//! - **Checked and panicking access**: [`at()`][GrowableArray::at] returns a [`RangeError`],
//!   indexing panics
//! - **Slice interop**: the array dereferences to `[T]`
//! - **Value semantics**: deep [`Clone`], lexicographic ordering, equality and hashing by content
//! - **Configurable drop policy**: optionally panic if values remain when the array is dropped
//!
//! # Examples
//!
//! ```
//! use growable_array::{GrowableArray, growable_array, reserve};
//!
//! // Construct from a list of values.
//! let mut numbers = growable_array![2, 3];
//! numbers.insert(0, 1);
//! numbers.push(4);
//!
//! assert_eq!(numbers.as_slice(), &[1, 2, 3, 4]);
//! assert_eq!(numbers.capacity(), 4);
//!
//! // Reserve room up front to avoid relocating while appending.
//! let mut names = GrowableArray::<String>::from(reserve(3));
//! names.push("Alice".to_string());
//! names.push("Bob".to_string());
//!
//! assert_eq!(names.len(), 2);
//! assert_eq!(names.capacity(), 3);
//!
//! // Bounds-checked access.
//! assert!(names.at(2).is_err());
//! ```
//!
//! # Thread safety
//!
//! The array is thread-mobile (`Send`) and shareable (`Sync`) when its values are. It does not
//! synchronize anything itself; wrap it in a `Mutex` to mutate it from multiple threads.

mod array;
mod builder;
mod drop_policy;
mod error;
mod into_iter;
mod reserve;

pub use array::*;
pub use builder::*;
pub use drop_policy::*;
pub use error::RangeError;
pub use into_iter::*;
pub use reserve::*;

/// Creates a [`GrowableArray`] from a list of values or from a value and a length.
///
/// The capacity of the created array equals its length.
///
/// # Examples
///
/// ```
/// use growable_array::growable_array;
///
/// let listed = growable_array![1, 2, 3];
/// assert_eq!(listed.as_slice(), &[1, 2, 3]);
///
/// let repeated = growable_array!["x"; 2];
/// assert_eq!(repeated.as_slice(), &["x", "x"]);
/// ```
#[macro_export]
macro_rules! growable_array {
    () => {
        $crate::GrowableArray::new()
    };
    ($value:expr; $len:expr) => {
        $crate::GrowableArray::filled($len, $value)
    };
    ($($value:expr),+ $(,)?) => {
        $crate::GrowableArray::from([$($value),+])
    };
}
