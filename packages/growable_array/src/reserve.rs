use crate::GrowableArray;

/// A request to create an empty [`GrowableArray`] with a given capacity.
///
/// This is not stored anywhere. It only exists to select the reserving conversion:
///
/// ```
/// use growable_array::{GrowableArray, reserve};
///
/// let array = GrowableArray::<String>::from(reserve(16));
///
/// assert_eq!(array.len(), 0);
/// assert_eq!(array.capacity(), 16);
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct ReserveRequest {
    capacity: usize,
}

impl ReserveRequest {
    /// Creates a request for an array with room for `capacity` values.
    #[must_use]
    pub const fn new(capacity: usize) -> Self {
        Self { capacity }
    }

    /// The requested capacity.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }
}

/// Shorthand for [`ReserveRequest::new()`].
#[must_use]
pub const fn reserve(capacity: usize) -> ReserveRequest {
    ReserveRequest::new(capacity)
}

impl<T> From<ReserveRequest> for GrowableArray<T> {
    fn from(request: ReserveRequest) -> Self {
        Self::with_capacity(request.capacity())
    }
}
