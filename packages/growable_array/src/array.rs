use std::any::type_name;
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};
use std::ops::{Deref, DerefMut, Index, IndexMut};
use std::slice::SliceIndex;
use std::{fmt, mem, ptr, slice, thread};

use owned_buffer::OwnedBuffer;
use tracing::trace;

use crate::error::Result;
use crate::{DropPolicy, GrowableArrayBuilder, IntoIter, RangeError};

/// A contiguous array that grows as values are added.
///
/// The array owns a single [`OwnedBuffer`] and tracks how many of its slots hold values. The
/// number of values is the [length][Self::len] and the number of slots is the
/// [capacity][Self::capacity]. Values live in slots `[0, len)`; the remaining slots are
/// allocated but vacant.
///
/// # Growth
///
/// When [`push()`][1] or [`insert()`][2] find the array full, the capacity doubles (an array
/// with no capacity grows to a capacity of 1). [`reserve()`][3] and [`resize()`][4] instead grow
/// to exactly the requested capacity. Capacity never shrinks on its own; [`clear()`][5] and
/// shrinking [`resize()`][4] drop values but keep the storage.
///
/// Growing allocates a new buffer, moves the values over and swaps the new buffer in. Any
/// slices or references obtained before the array was mutated are invalidated by this, which
/// the borrow checker enforces.
///
/// # Element access
///
/// The array dereferences to a slice, so everything slices offer (iteration, `first()`,
/// `get()`, `get_unchecked()`, sorting, ...) is available. Indexing with `array[i]` or a range
/// such as `array[1..]` panics if it reaches past the length. [`at()`][6] reports an out of bounds index as a [`RangeError`] instead.
///
/// # Examples
///
/// ```
/// use growable_array::{GrowableArray, growable_array};
///
/// let mut array = GrowableArray::new();
/// array.push(2);
/// array.push(3);
/// array.insert(0, 1);
///
/// assert_eq!(array, growable_array![1, 2, 3]);
/// assert_eq!(array.capacity(), 4);
///
/// assert_eq!(array.erase(0), 0);
/// assert_eq!(array[0], 2);
/// ```
///
/// [1]: Self::push
/// [2]: Self::insert
/// [3]: Self::reserve
/// [4]: Self::resize
/// [5]: Self::clear
/// [6]: Self::at
pub struct GrowableArray<T> {
    buffer: OwnedBuffer<T>,

    /// Number of initialized slots, counted from the start of the buffer.
    len: usize,

    drop_policy: DropPolicy,
}

impl<T> GrowableArray<T> {
    /// Creates an empty array. Nothing is allocated until the first value is added.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            buffer: OwnedBuffer::new(),
            len: 0,
            drop_policy: DropPolicy::MayDropItems,
        }
    }

    /// Creates an empty array with room for exactly `capacity` values.
    ///
    /// # Panics
    ///
    /// Panics if the storage would not fit in the address space.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::new_inner(capacity, DropPolicy::default())
    }

    /// Creates a builder that can be used to customize the array.
    pub fn builder() -> GrowableArrayBuilder<T> {
        GrowableArrayBuilder::new()
    }

    pub(crate) fn new_inner(capacity: usize, drop_policy: DropPolicy) -> Self {
        Self {
            buffer: OwnedBuffer::allocate(capacity),
            len: 0,
            drop_policy,
        }
    }

    /// Creates an array of `len` default values. The capacity equals the length.
    ///
    /// # Examples
    ///
    /// ```
    /// use growable_array::GrowableArray;
    ///
    /// let array = GrowableArray::<u8>::with_len(3);
    ///
    /// assert_eq!(array.as_slice(), &[0, 0, 0]);
    /// assert_eq!(array.capacity(), 3);
    /// ```
    #[must_use]
    pub fn with_len(len: usize) -> Self
    where
        T: Default,
    {
        let mut array = Self::with_capacity(len);
        array.fill_to_with(len, T::default);
        array
    }

    /// Creates an array of `len` clones of `value`. The capacity equals the length.
    ///
    /// # Examples
    ///
    /// ```
    /// use growable_array::GrowableArray;
    ///
    /// let array = GrowableArray::filled(2, "hi".to_string());
    ///
    /// assert_eq!(array.as_slice(), &["hi", "hi"]);
    /// ```
    #[must_use]
    pub fn filled(len: usize, value: T) -> Self
    where
        T: Clone,
    {
        let mut array = Self::with_capacity(len);
        array.fill_to_with(len, || value.clone());
        array
    }

    /// The number of values in the array.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// The number of values the array can hold without growing.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buffer.capacity()
    }

    /// Whether the array holds no values.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The drop policy the array was created with.
    #[must_use]
    pub fn drop_policy(&self) -> DropPolicy {
        self.drop_policy
    }

    /// The values as a slice. Empty arrays yield an empty slice whether or not they have
    /// storage allocated.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: Slots `[0, len)` are initialized and `len <= capacity`.
        unsafe { self.buffer.as_slice(self.len) }
    }

    /// The values as a mutable slice.
    #[must_use]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: Slots `[0, len)` are initialized and `len <= capacity`.
        unsafe { self.buffer.as_mut_slice(self.len) }
    }

    /// Returns a reference to the value at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`RangeError`] if `index` is not less than the length.
    pub fn at(&self, index: usize) -> Result<&T> {
        self.as_slice().get(index).ok_or(RangeError)
    }

    /// Returns a mutable reference to the value at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`RangeError`] if `index` is not less than the length.
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T> {
        self.as_mut_slice().get_mut(index).ok_or(RangeError)
    }

    /// Appends a value to the end of the array, doubling the capacity first if the array is full.
    ///
    /// # Panics
    ///
    /// Panics if the doubled capacity does not fit in the address space.
    pub fn push(&mut self, value: T) {
        if self.is_full() {
            let index = self.len;
            self.relocate(self.grown_capacity(), Some((index, value)));
        } else {
            self.push_within_capacity(value);
        }
    }

    /// Inserts a value at `index`, shifting the values from `index` onwards one slot to the
    /// right. Doubles the capacity first if the array is full.
    ///
    /// Returns the index of the inserted value, which is always `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index > len` or if the doubled capacity does not fit in the address space.
    pub fn insert(&mut self, index: usize, value: T) -> usize {
        assert!(
            index <= self.len,
            "insert index {index} out of bounds in array of {} with length {}",
            type_name::<T>(),
            self.len
        );

        if self.is_full() {
            self.relocate(self.grown_capacity(), Some((index, value)));
            return index;
        }

        let tail_len = self
            .len
            .checked_sub(index)
            .expect("guarded by index <= len assertion above");

        let base = self.buffer.as_mut_ptr();

        // SAFETY: `index <= len < capacity`, so the slot is inside the allocation.
        let slot = unsafe { base.add(index) };

        // SAFETY: `index + 1 <= len + 1 <= capacity`, at most one past the last slot.
        let next_slot = unsafe { slot.add(1) };

        // SAFETY: Both `[index, len)` and `[index + 1, len + 1)` are inside the allocation
        // because the array is not full. `ptr::copy` permits the overlap.
        unsafe {
            ptr::copy(slot, next_slot, tail_len);
        }

        // SAFETY: The value previously in `slot` now lives in `next_slot`, so this does not
        // overwrite anything we still own.
        unsafe {
            slot.write(value);
        }

        self.len = self
            .len
            .checked_add(1)
            .expect("guarded by len < capacity <= usize::MAX");

        index
    }

    /// Removes and returns the last value. The capacity is not changed.
    ///
    /// # Panics
    ///
    /// Panics if the array is empty.
    pub fn pop(&mut self) -> T {
        assert!(
            !self.is_empty(),
            "cannot pop from an empty array of {}",
            type_name::<T>()
        );

        self.len = self
            .len
            .checked_sub(1)
            .expect("guarded by emptiness assertion above");

        // SAFETY: The slot was initialized and is no longer counted by `len`, so the value is
        // moved out exactly once.
        unsafe { self.buffer[self.len].assume_init_read() }
    }

    /// Removes the value at `index`, shifting the values after it one slot to the left.
    ///
    /// Returns the index of the value that followed the erased one, which is always `index`
    /// (equal to the new length if the last value was erased).
    ///
    /// # Panics
    ///
    /// Panics if the array is empty or `index` is out of bounds.
    pub fn erase(&mut self, index: usize) -> usize {
        assert!(
            !self.is_empty(),
            "cannot erase from an empty array of {}",
            type_name::<T>()
        );
        assert!(
            index < self.len,
            "erase index {index} out of bounds in array of {} with length {}",
            type_name::<T>(),
            self.len
        );

        let new_len = self
            .len
            .checked_sub(1)
            .expect("guarded by emptiness assertion above");
        let tail_len = new_len
            .checked_sub(index)
            .expect("guarded by index < len assertion above");

        let base = self.buffer.as_mut_ptr();

        // SAFETY: `index < len <= capacity`, so the slot is inside the allocation.
        let slot = unsafe { base.add(index) };

        // SAFETY: The slot is initialized. Its value is about to be overwritten by the shift,
        // so this read is the only remaining owner.
        let erased = unsafe { slot.read() };

        // SAFETY: `index + 1 <= len`, at most one past the last value.
        let next_slot = unsafe { slot.add(1) };

        // SAFETY: `[index + 1, len)` holds the tail and `[index, len - 1)` is inside the
        // allocation. `ptr::copy` permits the overlap.
        unsafe {
            ptr::copy(next_slot, slot, tail_len);
        }

        self.len = new_len;

        // Dropped last so that a panicking destructor leaves the array consistent.
        drop(erased);

        index
    }

    /// Drops all values. The capacity is not changed.
    pub fn clear(&mut self) {
        trace!(
            item_type = type_name::<T>(),
            len = self.len,
            capacity = self.capacity(),
            "clearing array"
        );

        self.truncate(0);
    }

    /// Drops the values from `new_len` onwards, keeping the storage. Does nothing if `new_len`
    /// is not less than the current length.
    pub fn truncate(&mut self, new_len: usize) {
        if new_len >= self.len {
            return;
        }

        let excess_len = self
            .len
            .checked_sub(new_len)
            .expect("guarded by new_len < len check above");

        // SAFETY: `new_len < len <= capacity`, so the slot is inside the allocation.
        let excess_start = unsafe { self.buffer.as_mut_ptr().add(new_len) };

        // Shrink first so that a panicking destructor cannot lead to a double drop.
        self.len = new_len;

        // SAFETY: The excess slots were initialized and are no longer counted by `len`.
        unsafe {
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(excess_start, excess_len));
        }
    }

    /// Changes the length to `new_len`.
    ///
    /// * If `new_len` exceeds the capacity, the storage grows to exactly `new_len` and the new
    ///   slots are filled with default values.
    /// * If `new_len` exceeds the length but fits in the capacity, the slots in
    ///   `[len, new_len)` are filled with default values.
    /// * If `new_len` is less than the length, the excess values are dropped and the storage
    ///   is kept. Growing again later fills in fresh default values.
    ///
    /// # Examples
    ///
    /// ```
    /// use growable_array::growable_array;
    ///
    /// let mut array = growable_array![1, 2, 3];
    ///
    /// array.resize(1);
    /// assert_eq!(array.as_slice(), &[1]);
    /// assert_eq!(array.capacity(), 3);
    ///
    /// array.resize(4);
    /// assert_eq!(array.as_slice(), &[1, 0, 0, 0]);
    /// assert_eq!(array.capacity(), 4);
    /// ```
    pub fn resize(&mut self, new_len: usize)
    where
        T: Default,
    {
        if new_len > self.capacity() {
            self.relocate(new_len, None);
        }

        if new_len < self.len {
            self.truncate(new_len);
        } else {
            self.fill_to_with(new_len, T::default);
        }
    }

    /// Grows the storage to exactly `capacity` slots. Does nothing if the array already has at
    /// least that much capacity. The values and the length are not changed.
    ///
    /// # Panics
    ///
    /// Panics if the storage would not fit in the address space.
    pub fn reserve(&mut self, capacity: usize) {
        if capacity > self.capacity() {
            self.relocate(capacity, None);
        }
    }

    /// Exchanges the contents (storage, length and drop policy) of two arrays in constant time.
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(self, other);
    }

    /// Moves the contents out into a new array, leaving this array empty and unallocated.
    ///
    /// The drop policy stays with both arrays.
    ///
    /// # Examples
    ///
    /// ```
    /// use growable_array::growable_array;
    ///
    /// let mut source = growable_array![1, 2];
    /// let destination = source.take();
    ///
    /// assert_eq!(destination.as_slice(), &[1, 2]);
    /// assert_eq!(source.len(), 0);
    /// assert_eq!(source.capacity(), 0);
    /// ```
    #[must_use]
    pub fn take(&mut self) -> Self {
        let empty = Self::new_inner(0, self.drop_policy);
        mem::replace(self, empty)
    }

    /// Clones and appends every value of `values`, growing by the usual doubling policy.
    pub fn extend_from_slice(&mut self, values: &[T])
    where
        T: Clone,
    {
        for value in values {
            self.push(value.clone());
        }
    }

    fn is_full(&self) -> bool {
        self.len == self.capacity()
    }

    fn grown_capacity(&self) -> usize {
        self.capacity()
            .checked_mul(2)
            .unwrap_or_else(|| {
                panic!(
                    "capacity overflow: cannot grow array of {} beyond {} values",
                    type_name::<T>(),
                    self.capacity()
                )
            })
            .max(1)
    }

    /// Writes `value` into the first vacant slot.
    fn push_within_capacity(&mut self, value: T) {
        let index = self.len;
        self.buffer[index].write(value);

        self.len = index
            .checked_add(1)
            .expect("guarded by bounds check in buffer indexing");
    }

    /// Appends values from `make_value` until the length reaches `new_len`.
    ///
    /// The length is bumped after every write, so if `make_value` panics the values written so
    /// far still belong to the array and are dropped with it.
    fn fill_to_with(&mut self, new_len: usize, mut make_value: impl FnMut() -> T) {
        debug_assert!(new_len <= self.capacity());

        while self.len < new_len {
            self.push_within_capacity(make_value());
        }
    }

    /// Moves the values into a new buffer of `new_capacity` slots and swaps it in.
    ///
    /// If `insertion` is given, its value is placed at its index in the new buffer, the values
    /// from that index onwards land one slot further and the length grows by one. This is the
    /// only place where the capacity of an array changes after creation.
    fn relocate(&mut self, new_capacity: usize, insertion: Option<(usize, T)>) {
        let new_len = if insertion.is_some() {
            self.len
                .checked_add(1)
                .expect("a full array of usize::MAX values cannot exist")
        } else {
            self.len
        };

        debug_assert!(new_capacity >= new_len);

        trace!(
            item_type = type_name::<T>(),
            old_capacity = self.capacity(),
            new_capacity,
            len = new_len,
            "relocating array storage"
        );

        let mut new_buffer = OwnedBuffer::<T>::allocate(new_capacity);

        let src = self.buffer.as_ptr();
        let dst = new_buffer.as_mut_ptr();

        match insertion {
            None => {
                // SAFETY: The source holds `len` initialized values, the destination has room
                // for at least `len` and the two are distinct allocations.
                unsafe {
                    ptr::copy_nonoverlapping(src, dst, self.len);
                }
            }
            Some((index, value)) => {
                debug_assert!(index <= self.len);

                let tail_len = self
                    .len
                    .checked_sub(index)
                    .expect("insertion index is validated by callers");

                // SAFETY: `[0, index)` is initialized in the source and fits in the destination;
                // distinct allocations.
                unsafe {
                    ptr::copy_nonoverlapping(src, dst, index);
                }

                // SAFETY: `index <= len`, at most one past the last source value.
                let src_tail = unsafe { src.add(index) };

                // SAFETY: `index < new_len <= new_capacity`, inside the destination.
                let dst_slot = unsafe { dst.add(index) };

                // SAFETY: The destination slot is vacant and inside the allocation.
                unsafe {
                    dst_slot.write(value);
                }

                // SAFETY: `index + 1 <= new_len <= new_capacity`, at most one past the last slot.
                let dst_tail = unsafe { dst_slot.add(1) };

                // SAFETY: `[index, len)` is initialized in the source and
                // `[index + 1, len + 1)` fits in the destination; distinct allocations.
                unsafe {
                    ptr::copy_nonoverlapping(src_tail, dst_tail, tail_len);
                }
            }
        }

        self.buffer.swap(&mut new_buffer);
        self.len = new_len;

        // `new_buffer` now holds the old storage whose values were moved out bitwise.
        // Dropping it only releases the memory.
    }
}

impl<T> Default for GrowableArray<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for GrowableArray<T> {
    fn drop(&mut self) {
        let was_empty = self.is_empty();

        self.truncate(0);

        // If we are already panicking, we do not want to panic again because that will
        // simply obscure whatever the original panic was, leading to debug difficulties.
        if self.drop_policy == DropPolicy::MustNotDropItems && !thread::panicking() {
            assert!(
                was_empty,
                "dropped a non-empty array of {} with a policy that says it must be empty when dropped",
                type_name::<T>()
            );
        }
    }
}

impl<T: Clone> Clone for GrowableArray<T> {
    fn clone(&self) -> Self {
        let mut copy = Self::new_inner(self.capacity(), self.drop_policy);

        for value in self {
            copy.push_within_capacity(value.clone());
        }

        copy
    }

    fn clone_from(&mut self, source: &Self) {
        if ptr::eq(self, source) {
            return;
        }

        let mut copy = source.clone();
        self.swap(&mut copy);
    }
}

impl<T> Deref for GrowableArray<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> DerefMut for GrowableArray<T> {
    fn deref_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T> AsRef<[T]> for GrowableArray<T> {
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> AsMut<[T]> for GrowableArray<T> {
    fn as_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T, I: SliceIndex<[T]>> Index<I> for GrowableArray<T> {
    type Output = I::Output;

    /// Indexes the values in `[0, len)` by position or by range.
    ///
    /// # Panics
    ///
    /// Panics if `index` reaches past the length.
    fn index(&self, index: I) -> &I::Output {
        Index::index(self.as_slice(), index)
    }
}

impl<T, I: SliceIndex<[T]>> IndexMut<I> for GrowableArray<T> {
    /// # Panics
    ///
    /// Panics if `index` reaches past the length.
    fn index_mut(&mut self, index: I) -> &mut I::Output {
        IndexMut::index_mut(self.as_mut_slice(), index)
    }
}

impl<T: PartialEq> PartialEq for GrowableArray<T> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq> Eq for GrowableArray<T> {}

impl<T: PartialEq, const N: usize> PartialEq<[T; N]> for GrowableArray<T> {
    fn eq(&self, other: &[T; N]) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: PartialOrd> PartialOrd for GrowableArray<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.as_slice().partial_cmp(other.as_slice())
    }
}

impl<T: Ord> Ord for GrowableArray<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_slice().cmp(other.as_slice())
    }
}

impl<T: Hash> Hash for GrowableArray<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_slice().hash(state);
    }
}

impl<T: fmt::Debug> fmt::Debug for GrowableArray<T> {
    #[cfg_attr(test, mutants::skip)] // No API contract to test.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

impl<T> FromIterator<T> for GrowableArray<T> {
    /// Collects the values in iteration order. If the iterator reports an exact size, the
    /// capacity equals the resulting length.
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let (lower_bound, _) = iter.size_hint();

        let mut array = Self::with_capacity(lower_bound);
        array.extend(iter);
        array
    }
}

impl<T> Extend<T> for GrowableArray<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push(value);
        }
    }
}

impl<'a, T: Copy + 'a> Extend<&'a T> for GrowableArray<T> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        for value in iter {
            self.push(*value);
        }
    }
}

impl<T, const N: usize> From<[T; N]> for GrowableArray<T> {
    fn from(values: [T; N]) -> Self {
        values.into_iter().collect()
    }
}

impl<T> From<Vec<T>> for GrowableArray<T> {
    fn from(values: Vec<T>) -> Self {
        values.into_iter().collect()
    }
}

impl<T: Clone> From<&[T]> for GrowableArray<T> {
    fn from(values: &[T]) -> Self {
        values.iter().cloned().collect()
    }
}

impl<T> IntoIterator for GrowableArray<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(mut self) -> IntoIter<T> {
        let len = mem::take(&mut self.len);
        let buffer = mem::take(&mut self.buffer);

        // `self` is now empty and unallocated, so dropping it is a no-op.
        IntoIter::new(buffer, len, self.drop_policy)
    }
}

impl<'a, T> IntoIterator for &'a GrowableArray<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> slice::Iter<'a, T> {
        self.as_slice().iter()
    }
}

impl<'a, T> IntoIterator for &'a mut GrowableArray<T> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> slice::IterMut<'a, T> {
        self.as_mut_slice().iter_mut()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::fmt::Debug;
    use std::panic::{AssertUnwindSafe, catch_unwind};
    use std::rc::Rc;
    use std::sync::{Arc, Mutex};

    use static_assertions::{assert_impl_all, assert_not_impl_any};

    use crate::growable_array;

    use super::*;

    assert_impl_all!(GrowableArray<u32>: Send, Sync, Debug, Default, Clone, Eq, Ord, Hash);
    assert_not_impl_any!(GrowableArray<Rc<u32>>: Send, Sync);
    assert_not_impl_any!(GrowableArray<Cell<u32>>: Sync);

    /// Counts how many instances were dropped, to verify that every value is dropped exactly once.
    #[derive(Debug)]
    struct Tracked {
        value: u32,
        drops: Rc<Cell<usize>>,
    }

    impl Tracked {
        fn new(value: u32, drops: &Rc<Cell<usize>>) -> Self {
            Self {
                value,
                drops: Rc::clone(drops),
            }
        }
    }

    impl Clone for Tracked {
        fn clone(&self) -> Self {
            Self::new(self.value, &self.drops)
        }
    }

    impl Drop for Tracked {
        fn drop(&mut self) {
            self.drops.set(self.drops.get() + 1);
        }
    }

    #[test]
    fn smoke_test() {
        let mut array = GrowableArray::new();

        array.push(10);
        array.push(11);
        array.push(12);

        assert_eq!(array.len(), 3);
        assert_eq!(array[0], 10);
        assert_eq!(array[1], 11);
        assert_eq!(array[2], 12);

        assert_eq!(array.pop(), 12);
        assert_eq!(array.len(), 2);
    }

    #[test]
    fn new_is_empty_and_unallocated() {
        let array = GrowableArray::<String>::new();

        assert_eq!(array.len(), 0);
        assert_eq!(array.capacity(), 0);
        assert!(array.is_empty());
        assert!(array.as_slice().is_empty());
        assert!(array.iter().next().is_none());
    }

    #[test]
    fn with_len_fills_defaults() {
        let array = GrowableArray::<String>::with_len(3);

        assert_eq!(array.len(), 3);
        assert_eq!(array.capacity(), 3);
        assert!(array.iter().all(String::is_empty));
    }

    #[test]
    fn with_len_zero_is_unallocated() {
        let array = GrowableArray::<u32>::with_len(0);

        assert!(array.is_empty());
        assert_eq!(array.capacity(), 0);
    }

    #[test]
    fn filled_clones_value() {
        let array = GrowableArray::filled(4, 42_u8);

        assert_eq!(array, [42, 42, 42, 42]);
        assert_eq!(array.capacity(), 4);
    }

    #[test]
    fn macro_forms() {
        let listed = growable_array![1, 2, 3];
        assert_eq!(listed, [1, 2, 3]);
        assert_eq!(listed.capacity(), 3);

        let repeated = growable_array![7; 2];
        assert_eq!(repeated, [7, 7]);

        let empty: GrowableArray<u8> = growable_array![];
        assert!(empty.is_empty());
        assert_eq!(empty.capacity(), 0);
    }

    #[test]
    fn push_doubles_capacity() {
        let mut array = GrowableArray::new();
        let mut observed = Vec::new();

        for value in 0..9 {
            array.push(value);
            observed.push(array.capacity());
        }

        assert_eq!(observed, vec![1, 2, 4, 4, 8, 8, 8, 8, 16]);
        assert_eq!(array, [0, 1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn push_keeps_call_order() {
        let mut array = GrowableArray::new();

        for value in 0..100_u32 {
            array.push(value);
        }

        assert_eq!(array.len(), 100);
        assert!(array.iter().copied().eq(0..100));
    }

    #[test]
    fn insert_at_front() {
        let mut array = growable_array![2, 3];

        let position = array.insert(0, 1);

        assert_eq!(position, 0);
        assert_eq!(array, [1, 2, 3]);
    }

    #[test]
    fn insert_at_end() {
        let mut array = growable_array![1, 2];

        let position = array.insert(2, 3);

        assert_eq!(position, 2);
        assert_eq!(array, [1, 2, 3]);
    }

    #[test]
    fn insert_in_middle_without_growth() {
        let mut array = GrowableArray::with_capacity(4);
        array.push(1);
        array.push(3);

        let position = array.insert(1, 2);

        assert_eq!(position, 1);
        assert_eq!(array, [1, 2, 3]);
        assert_eq!(array.capacity(), 4);
    }

    #[test]
    fn insert_in_middle_with_growth() {
        let mut array = growable_array![1, 2, 4, 5];
        assert_eq!(array.capacity(), 4);

        let position = array.insert(2, 3);

        assert_eq!(position, 2);
        assert_eq!(array, [1, 2, 3, 4, 5]);
        assert_eq!(array.capacity(), 8);
    }

    #[test]
    fn insert_into_empty_grows_to_one() {
        let mut array = GrowableArray::new();

        array.insert(0, "only");

        assert_eq!(array, ["only"]);
        assert_eq!(array.capacity(), 1);
    }

    #[test]
    #[should_panic]
    fn insert_past_end_panics() {
        let mut array = growable_array![1, 2];
        array.insert(3, 9);
    }

    #[test]
    #[should_panic]
    fn pop_empty_panics() {
        let mut array = GrowableArray::<u32>::new();
        _ = array.pop();
    }

    #[test]
    fn pop_keeps_capacity() {
        let mut array = growable_array![1, 2, 3];

        assert_eq!(array.pop(), 3);
        assert_eq!(array.pop(), 2);

        assert_eq!(array, [1]);
        assert_eq!(array.capacity(), 3);
    }

    #[test]
    fn erase_first() {
        let mut array = growable_array![1, 2, 3];

        let position = array.erase(0);

        assert_eq!(array, [2, 3]);
        assert_eq!(array.len(), 2);
        assert_eq!(array[position], 2);
    }

    #[test]
    fn erase_last_returns_end() {
        let mut array = growable_array![1, 2, 3];

        let position = array.erase(2);

        assert_eq!(array, [1, 2]);
        assert_eq!(position, array.len());
    }

    #[test]
    fn erase_middle_keeps_capacity() {
        let mut array = growable_array![1, 2, 3, 4];

        array.erase(1);

        assert_eq!(array, [1, 3, 4]);
        assert_eq!(array.capacity(), 4);
    }

    #[test]
    #[should_panic]
    fn erase_empty_panics() {
        let mut array = GrowableArray::<u32>::with_capacity(3);
        array.erase(0);
    }

    #[test]
    #[should_panic]
    fn erase_out_of_bounds_panics() {
        let mut array = growable_array![1];
        array.erase(1);
    }

    #[test]
    fn at_checks_bounds() {
        let mut array = growable_array![10, 20];

        assert_eq!(array.at(0), Ok(&10));
        assert_eq!(array.at(1), Ok(&20));
        assert_eq!(array.at(2), Err(RangeError));
        assert_eq!(array.at(usize::MAX), Err(RangeError));

        *array.at_mut(1).unwrap() = 21;
        assert_eq!(array[1], 21);
        assert_eq!(array.at_mut(2), Err(RangeError));
    }

    #[test]
    fn at_on_empty_is_error() {
        let array = GrowableArray::<u32>::with_capacity(5);

        assert_eq!(array.at(0), Err(RangeError));
    }

    #[test]
    fn at_past_len_within_capacity_is_error() {
        let mut array = GrowableArray::with_capacity(4);
        array.push(1);

        assert_eq!(array.at(1), Err(RangeError));
    }

    #[test]
    #[should_panic]
    fn index_out_of_bounds_panics() {
        let array = growable_array![1, 2, 3];
        _ = array[3];
    }

    #[test]
    #[should_panic]
    fn index_mut_out_of_bounds_panics() {
        let mut array = growable_array![1, 2, 3];
        array[3] = 4;
    }

    #[test]
    fn range_indexing() {
        let array = growable_array![1, 2, 3];

        assert_eq!(&array[1..], &[2, 3]);
        assert_eq!(&array[..2], &[1, 2]);
        assert_eq!(&array[1..2], &[2]);
        assert_eq!(&array[..], &[1, 2, 3]);
        assert!(array[3..].is_empty());
    }

    #[test]
    fn range_indexing_mut() {
        let mut array = growable_array![1, 2, 3, 4];

        array[..2].copy_from_slice(&[10, 20]);
        array[2..].reverse();

        assert_eq!(array, [10, 20, 4, 3]);
    }

    #[test]
    #[should_panic]
    fn range_index_past_len_panics() {
        let mut array = GrowableArray::<u32>::with_capacity(8);
        array.push(1);

        // Slots past the length are allocated but hold no values.
        _ = &array[..2];
    }

    #[test]
    fn index_mut_writes() {
        let mut array = growable_array![1, 2, 3];

        array[1] = 20;

        assert_eq!(array, [1, 20, 3]);
    }

    #[test]
    fn clear_keeps_capacity() {
        let mut array = growable_array![1, 2, 3];

        array.clear();
        assert!(array.is_empty());
        assert_eq!(array.capacity(), 3);

        array.clear();
        assert!(array.is_empty());
        assert_eq!(array.capacity(), 3);
    }

    #[test]
    fn clear_drops_values() {
        let drops = Rc::new(Cell::new(0));
        let mut array = GrowableArray::new();
        array.push(Tracked::new(1, &drops));
        array.push(Tracked::new(2, &drops));

        array.clear();

        assert_eq!(drops.get(), 2);
    }

    #[test]
    fn resize_grow_past_capacity_is_exact() {
        let mut array = growable_array![1, 2];

        array.resize(5);

        assert_eq!(array, [1, 2, 0, 0, 0]);
        assert_eq!(array.capacity(), 5);
    }

    #[test]
    fn resize_grow_within_capacity() {
        let mut array = GrowableArray::with_capacity(8);
        array.push(1);

        array.resize(3);

        assert_eq!(array, [1, 0, 0]);
        assert_eq!(array.capacity(), 8);
    }

    #[test]
    fn resize_shrink_keeps_capacity_and_does_not_resurrect() {
        let mut array = growable_array![1, 2, 3, 4];

        array.resize(2);
        assert_eq!(array, [1, 2]);
        assert_eq!(array.capacity(), 4);

        array.resize(4);
        assert_eq!(array, [1, 2, 0, 0]);
        assert_eq!(array.capacity(), 4);
    }

    #[test]
    fn resize_to_same_len_is_noop() {
        let mut array = growable_array![1, 2];

        array.resize(2);

        assert_eq!(array, [1, 2]);
        assert_eq!(array.capacity(), 2);
    }

    #[test]
    fn resize_shrink_drops_excess() {
        let drops = Rc::new(Cell::new(0));
        let mut array = GrowableArray::new();
        for value in 0..4 {
            array.push(Tracked::new(value, &drops));
        }

        array.truncate(1);

        assert_eq!(drops.get(), 3);
        assert_eq!(array.len(), 1);
        assert_eq!(array[0].value, 0);
    }

    #[test]
    fn truncate_longer_is_noop() {
        let mut array = growable_array![1, 2];

        array.truncate(5);

        assert_eq!(array, [1, 2]);
    }

    #[test]
    fn reserve_grows_exactly() {
        let mut array = growable_array![1, 2];

        array.reserve(10);

        assert_eq!(array, [1, 2]);
        assert_eq!(array.capacity(), 10);
    }

    #[test]
    fn reserve_smaller_is_noop() {
        let mut array = GrowableArray::<u32>::with_capacity(10);

        array.reserve(3);
        assert_eq!(array.capacity(), 10);

        array.reserve(10);
        assert_eq!(array.capacity(), 10);
    }

    #[test]
    fn reserve_then_push_does_not_relocate() {
        let mut array = GrowableArray::new();
        array.reserve(16);
        let storage = array.as_ptr();

        for value in 0..16 {
            array.push(value);
        }

        assert_eq!(array.capacity(), 16);
        assert_eq!(array.as_ptr(), storage);
    }

    #[test]
    fn swap_exchanges_everything() {
        let mut a = growable_array![1, 2, 3];
        let mut b = GrowableArray::<i32>::builder()
            .capacity(10)
            .drop_policy(DropPolicy::MustNotDropItems)
            .build();
        b.push(9);

        a.swap(&mut b);

        assert_eq!(a, [9]);
        assert_eq!(a.capacity(), 10);
        assert_eq!(a.drop_policy(), DropPolicy::MustNotDropItems);
        assert_eq!(b, [1, 2, 3]);
        assert_eq!(b.capacity(), 3);

        a.clear();
    }

    #[test]
    fn take_leaves_source_unallocated() {
        let mut source = growable_array![1, 2, 3];

        let destination = source.take();

        assert_eq!(destination, [1, 2, 3]);
        assert_eq!(destination.capacity(), 3);
        assert_eq!(source.len(), 0);
        assert_eq!(source.capacity(), 0);
    }

    #[test]
    fn mem_take_leaves_source_unallocated() {
        let mut source = growable_array!["a", "b"];

        let destination = mem::take(&mut source);

        assert_eq!(destination, ["a", "b"]);
        assert_eq!(source.len(), 0);
        assert_eq!(source.capacity(), 0);
    }

    #[test]
    fn clone_preserves_len_capacity_and_content() {
        let mut original = GrowableArray::with_capacity(8);
        original.push("a".to_string());
        original.push("b".to_string());

        let copy = original.clone();

        assert_eq!(copy, original);
        assert_eq!(copy.len(), 2);
        assert_eq!(copy.capacity(), 8);
        assert_ne!(copy.as_ptr(), original.as_ptr());
    }

    #[test]
    fn clone_from_replaces_content() {
        let source = growable_array![1, 2, 3];
        let mut target = growable_array![9; 10];

        target.clone_from(&source);

        assert_eq!(target, source);
        assert_eq!(target.capacity(), 3);
    }

    #[test]
    fn clone_from_equal_content_still_assigns() {
        let source = GrowableArray::filled(2, 5_u32);
        let mut target = growable_array![5, 5];
        target.reserve(10);

        target.clone_from(&source);

        // Equal content does not short-circuit the assignment; the capacity follows the source.
        assert_eq!(target.capacity(), source.capacity());
    }

    #[test]
    fn equality() {
        assert_eq!(growable_array![1, 2, 3], growable_array![1, 2, 3]);
        assert_ne!(growable_array![1, 2, 3], growable_array![1, 2]);
        assert_ne!(growable_array![1, 2, 3], growable_array![1, 2, 4]);
        assert_eq!(GrowableArray::<u8>::new(), GrowableArray::with_capacity(4));
    }

    #[test]
    fn ordering_is_lexicographic() {
        assert!(growable_array![1, 2] < growable_array![1, 2, 3]);
        assert!(growable_array![1, 3] > growable_array![1, 2, 3]);
        assert!(growable_array![1, 2] <= growable_array![1, 2]);
        assert!(growable_array![1, 2] >= growable_array![1, 2]);
        assert!(GrowableArray::<u8>::new() < growable_array![0]);
        assert_eq!(
            growable_array![2].cmp(&growable_array![1, 9]),
            Ordering::Greater
        );
    }

    #[test]
    fn debug_renders_list() {
        assert_eq!(format!("{:?}", growable_array![1, 2]), "[1, 2]");
    }

    #[test]
    fn collect_from_exact_size_iterator() {
        let array: GrowableArray<u32> = (0..5).collect();

        assert_eq!(array, [0, 1, 2, 3, 4]);
        assert_eq!(array.capacity(), 5);
    }

    #[test]
    fn conversions() {
        let from_vec = GrowableArray::from(vec![1, 2]);
        let from_slice = GrowableArray::from(&[1, 2][..]);
        let from_array = GrowableArray::from([1, 2]);

        assert_eq!(from_vec, from_slice);
        assert_eq!(from_slice, from_array);
    }

    #[test]
    fn extend_variants() {
        let mut array = growable_array![1];

        array.extend(vec![2, 3]);
        array.extend(&[4, 5]);
        array.extend_from_slice(&[6]);

        assert_eq!(array, [1, 2, 3, 4, 5, 6]);
        assert_eq!(array.capacity(), 8);
    }

    #[test]
    fn iterates_by_reference() {
        let mut array = growable_array![1, 2, 3];

        for value in &mut array {
            *value *= 10;
        }

        let mut sum = 0;
        for value in &array {
            sum += value;
        }

        assert_eq!(sum, 60);
    }

    #[test]
    fn slice_methods_via_deref() {
        let mut array = growable_array![3, 1, 2];

        array.sort_unstable();

        assert_eq!(array.first(), Some(&1));
        assert_eq!(array.last(), Some(&3));
        assert!(array.contains(&2));
        assert_eq!(&array[1..], &[2, 3]);
    }

    #[test]
    fn empty_ranges_are_equal_regardless_of_allocation() {
        let unallocated = GrowableArray::<u32>::new();
        let allocated = GrowableArray::<u32>::with_capacity(10);

        assert_eq!(unallocated.iter().count(), 0);
        assert_eq!(allocated.iter().count(), 0);
        assert_eq!(unallocated.as_slice(), allocated.as_slice());
    }

    #[test]
    fn zero_sized_values() {
        let mut array = GrowableArray::new();

        for _ in 0..10 {
            array.push(());
        }
        array.insert(3, ());
        array.erase(0);

        assert_eq!(array.len(), 10);
        assert_eq!(array.capacity(), 16);
    }

    #[test]
    fn every_value_dropped_exactly_once() {
        let drops = Rc::new(Cell::new(0));

        {
            let mut array = GrowableArray::new();
            for value in 0..10 {
                array.push(Tracked::new(value, &drops));
            }

            array.insert(5, Tracked::new(100, &drops));
            array.erase(2);
            drop(array.pop());
            array.truncate(6);

            let copy = array.clone();
            let mut other = GrowableArray::new();
            other.clone_from(&copy);
            drop(copy);

            let mut iter = other.into_iter();
            drop(iter.next());
        }

        // 11 originals, 6 clones for `copy` and 6 clones for `other`.
        assert_eq!(drops.get(), 23);
    }

    #[test]
    fn panicking_default_keeps_written_values() {
        thread_local! {
            static CREATED: Cell<usize> = const { Cell::new(0) };
            static DROPPED: Cell<usize> = const { Cell::new(0) };
        }

        struct Fragile;

        impl Drop for Fragile {
            fn drop(&mut self) {
                DROPPED.with(|d| d.set(d.get() + 1));
            }
        }

        impl Default for Fragile {
            fn default() -> Self {
                let created = CREATED.with(|c| {
                    c.set(c.get() + 1);
                    c.get()
                });

                assert!(created <= 2, "third construction fails");
                Self
            }
        }

        let result = catch_unwind(|| GrowableArray::<Fragile>::with_len(5));

        assert!(result.is_err());
        assert_eq!(CREATED.with(Cell::get), 3);

        // The two values written before the failure were dropped along with the array.
        assert_eq!(DROPPED.with(Cell::get), 2);
    }

    #[test]
    fn panicking_drop_during_erase_leaves_array_consistent() {
        struct Bomb(bool);

        impl Drop for Bomb {
            fn drop(&mut self) {
                assert!(!self.0, "boom");
            }
        }

        let mut array = GrowableArray::new();
        array.push(Bomb(true));
        array.push(Bomb(false));

        let result = catch_unwind(AssertUnwindSafe(|| {
            array.erase(0);
        }));

        assert!(result.is_err());
        assert_eq!(array.len(), 1);
        assert!(!array[0].0);
    }

    #[test]
    #[should_panic]
    fn must_not_drop_items_panics_when_non_empty() {
        let mut array = GrowableArray::builder()
            .drop_policy(DropPolicy::MustNotDropItems)
            .build();
        array.push(123);
    }

    #[test]
    fn must_not_drop_items_allows_empty_drop() {
        let mut array = GrowableArray::builder()
            .drop_policy(DropPolicy::MustNotDropItems)
            .build();
        array.push(123);
        assert_eq!(array.pop(), 123);

        drop(array);
    }

    #[test]
    fn must_not_drop_items_allows_into_iter() {
        let mut array = GrowableArray::builder()
            .drop_policy(DropPolicy::MustNotDropItems)
            .build();
        array.push(1);
        array.push(2);

        let values: Vec<_> = array.into_iter().collect();

        assert_eq!(values, vec![1, 2]);
    }

    #[test]
    #[should_panic]
    fn must_not_drop_items_panics_on_partly_consumed_into_iter() {
        let mut array = GrowableArray::builder()
            .drop_policy(DropPolicy::MustNotDropItems)
            .build();
        array.push("a".to_string());
        array.push("b".to_string());

        let mut iter = array.into_iter();
        assert_eq!(iter.next().as_deref(), Some("a"));

        // "b" is still in the iterator.
        drop(iter);
    }

    #[test]
    fn in_refcell_works_fine() {
        let array = RefCell::new(GrowableArray::new());

        array.borrow_mut().push(1);
        array.borrow_mut().push(2);

        assert_eq!(*array.borrow(), [1, 2]);
    }

    #[test]
    fn multithreaded_via_mutex() {
        let array = Arc::new(Mutex::new(growable_array![1, 2, 3]));

        let array_clone = Arc::clone(&array);
        std::thread::spawn(move || {
            let mut array = array_clone.lock().unwrap();
            array.push(4);
        })
        .join()
        .unwrap();

        let array = array.lock().unwrap();
        assert_eq!(*array, [1, 2, 3, 4]);
    }
}
