use std::any::type_name;
use std::fmt;
use std::marker::PhantomData;

use tracing::debug;

use crate::{DropPolicy, GrowableArray};

/// Builder for creating an instance of [`GrowableArray`].
///
/// You only need to use this builder if you want to customize the array configuration.
/// [`GrowableArray::new()`][1] and [`GrowableArray::with_capacity()`][2] cover most use cases.
///
/// # Examples
///
/// ```
/// use growable_array::{DropPolicy, GrowableArray};
///
/// let array = GrowableArray::<u32>::builder()
///     .capacity(8)
///     .drop_policy(DropPolicy::MayDropItems)
///     .build();
///
/// assert_eq!(array.capacity(), 8);
/// ```
///
/// [1]: GrowableArray::new
/// [2]: GrowableArray::with_capacity
#[must_use]
pub struct GrowableArrayBuilder<T> {
    capacity: usize,
    drop_policy: DropPolicy,

    _item: PhantomData<T>,
}

impl<T> fmt::Debug for GrowableArrayBuilder<T> {
    #[cfg_attr(test, mutants::skip)] // No API contract to test.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GrowableArrayBuilder")
            .field("item_type", &format_args!("{}", type_name::<T>()))
            .field("capacity", &self.capacity)
            .field("drop_policy", &self.drop_policy)
            .finish()
    }
}

impl<T> GrowableArrayBuilder<T> {
    pub(crate) fn new() -> Self {
        Self {
            capacity: 0,
            drop_policy: DropPolicy::default(),
            _item: PhantomData,
        }
    }

    /// Sets the initial capacity of the array. Defaults to zero, in which case nothing is
    /// allocated until the first value is added.
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Sets the [drop policy][DropPolicy] for the array. This governs how
    /// to treat remaining values in the array when the array is dropped.
    ///
    /// # Examples
    ///
    /// ```
    /// use growable_array::{DropPolicy, GrowableArray};
    ///
    /// let array = GrowableArray::<u32>::builder()
    ///     .drop_policy(DropPolicy::MustNotDropItems)
    ///     .build();
    /// ```
    pub fn drop_policy(mut self, policy: DropPolicy) -> Self {
        self.drop_policy = policy;
        self
    }

    /// Builds the array with the specified configuration.
    ///
    /// # Panics
    ///
    /// Panics if the requested capacity does not fit in the address space.
    #[must_use]
    pub fn build(self) -> GrowableArray<T> {
        if self.drop_policy != DropPolicy::default() {
            debug!(
                item_type = type_name::<T>(),
                capacity = self.capacity,
                drop_policy = ?self.drop_policy,
                "building array with non-default drop policy"
            );
        }

        GrowableArray::new_inner(self.capacity, self.drop_policy)
    }
}
