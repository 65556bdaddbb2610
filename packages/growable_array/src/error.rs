use thiserror::Error;

/// Returned by bounds-checked access when the index is not less than the array length.
///
/// The error carries no payload: the only thing it reports is that the index was out of range.
///
/// # Examples
///
/// ```
/// use growable_array::{RangeError, growable_array};
///
/// let array = growable_array![1, 2, 3];
///
/// assert_eq!(array.at(2), Ok(&3));
/// assert_eq!(array.at(3), Err(RangeError));
/// ```
#[derive(Clone, Copy, Debug, Eq, Error, Hash, PartialEq)]
#[error("index out of range")]
#[expect(
    clippy::exhaustive_structs,
    reason = "callers construct and match the unit value directly"
)]
pub struct RangeError;

/// A specialized `Result` type for bounds-checked array access, returning the crate's
/// [`RangeError`] type as the error value.
pub(crate) type Result<T> = std::result::Result<T, RangeError>;
