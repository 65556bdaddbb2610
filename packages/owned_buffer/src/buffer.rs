use std::alloc::{Layout, alloc, dealloc, handle_alloc_error};
use std::any::type_name;
use std::fmt;
use std::mem::{self, MaybeUninit};
use std::ops::{Index, IndexMut};
use std::ptr::NonNull;
use std::slice;

/// Exclusively owns a heap allocation of exactly `capacity` slots of `T`.
///
/// The slots start out uninitialized. The buffer does not track which slots hold values, so
/// the owner is responsible for dropping any values it placed in the slots before the buffer
/// itself is dropped. Dropping the buffer only releases the memory.
///
/// An empty buffer (capacity zero) performs no allocation and [`get()`][1] returns `None` for
/// it. Buffers of zero-sized types never allocate either but still report the capacity they
/// were created with.
///
/// [1]: Self::get
pub struct OwnedBuffer<T> {
    /// Dangling (but well-aligned) if nothing was allocated.
    first_slot_ptr: NonNull<MaybeUninit<T>>,

    capacity: usize,
}

impl<T> OwnedBuffer<T> {
    /// Creates an empty buffer without allocating any memory.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            first_slot_ptr: NonNull::dangling(),
            capacity: 0,
        }
    }

    /// Allocates storage for exactly `capacity` slots, all of them uninitialized.
    ///
    /// A `capacity` of zero yields the same empty buffer as [`new()`][Self::new].
    ///
    /// # Panics
    ///
    /// Panics if the size of the storage would overflow `isize::MAX` bytes. Allocation failure
    /// is reported through [`handle_alloc_error`].
    #[must_use]
    pub fn allocate(capacity: usize) -> Self {
        if capacity == 0 {
            return Self::new();
        }

        let layout = Self::layout(capacity);

        if layout.size() == 0 {
            // Zero-sized items need no memory, only bookkeeping.
            return Self {
                first_slot_ptr: NonNull::dangling(),
                capacity,
            };
        }

        // SAFETY: The layout is valid for an array of `T` (calculated by `layout()`) and is
        // not zero-sized (checked above).
        let ptr = unsafe { alloc(layout) };

        let Some(first_slot_ptr) = NonNull::new(ptr.cast::<MaybeUninit<T>>()) else {
            handle_alloc_error(layout);
        };

        Self {
            first_slot_ptr,
            capacity,
        }
    }

    fn layout(capacity: usize) -> Layout {
        Layout::array::<T>(capacity).unwrap_or_else(|_| {
            panic!(
                "capacity overflow: {capacity} slots of {} do not fit in the address space",
                type_name::<T>()
            )
        })
    }

    /// The number of slots in the buffer.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the address of slot 0, or `None` if the buffer has no slots.
    ///
    /// The slots behind the pointer may be uninitialized.
    #[must_use]
    pub fn get(&self) -> Option<NonNull<T>> {
        (self.capacity > 0).then(|| self.first_slot_ptr.cast::<T>())
    }

    /// Returns a raw pointer to slot 0.
    ///
    /// Unlike [`get()`][Self::get], this always returns a pointer. For an empty buffer the
    /// pointer is dangling but well-aligned, so it is valid for zero-length accesses only.
    #[must_use]
    pub fn as_ptr(&self) -> *const T {
        self.first_slot_ptr.as_ptr().cast_const().cast::<T>()
    }

    /// Returns a raw mutable pointer to slot 0.
    ///
    /// For an empty buffer the pointer is dangling but well-aligned, so it is valid for
    /// zero-length accesses only.
    #[must_use]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.first_slot_ptr.as_ptr().cast::<T>()
    }

    fn slot_ptr(&self, index: usize) -> NonNull<MaybeUninit<T>> {
        assert!(
            index < self.capacity,
            "slot {index} out of bounds in buffer of {} with capacity {}",
            type_name::<T>(),
            self.capacity
        );

        // SAFETY: Guarded by the bounds check above, so the offset stays inside the allocation.
        unsafe { self.first_slot_ptr.add(index) }
    }

    /// Views the first `len` slots as initialized values.
    ///
    /// # Safety
    ///
    /// `len` must not exceed the capacity and every slot in `[0, len)` must be initialized.
    #[must_use]
    pub unsafe fn as_slice(&self, len: usize) -> &[T] {
        debug_assert!(len <= self.capacity);

        // SAFETY: Forwarding the caller's guarantees. The pointer is well-aligned and non-null
        // even for an empty buffer, which is all a zero-length slice needs.
        unsafe { slice::from_raw_parts(self.as_ptr(), len) }
    }

    /// Views the first `len` slots as initialized, exclusively borrowed values.
    ///
    /// # Safety
    ///
    /// `len` must not exceed the capacity and every slot in `[0, len)` must be initialized.
    #[must_use]
    pub unsafe fn as_mut_slice(&mut self, len: usize) -> &mut [T] {
        debug_assert!(len <= self.capacity);

        // SAFETY: Forwarding the caller's guarantees. The pointer is well-aligned and non-null
        // even for an empty buffer, which is all a zero-length slice needs.
        unsafe { slice::from_raw_parts_mut(self.as_mut_ptr(), len) }
    }

    /// Exchanges the storage of two buffers. No slot contents are copied or moved.
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(&mut self.first_slot_ptr, &mut other.first_slot_ptr);
        mem::swap(&mut self.capacity, &mut other.capacity);
    }
}

impl<T> Default for OwnedBuffer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Index<usize> for OwnedBuffer<T> {
    type Output = MaybeUninit<T>;

    /// # Panics
    ///
    /// Panics if `index` is not less than the capacity.
    fn index(&self, index: usize) -> &Self::Output {
        let slot_ptr = self.slot_ptr(index);

        // SAFETY: `slot_ptr()` only returns in-bounds pointers and `MaybeUninit` has no
        // validity requirements, so referencing an uninitialized slot is fine.
        unsafe { slot_ptr.as_ref() }
    }
}

impl<T> IndexMut<usize> for OwnedBuffer<T> {
    /// # Panics
    ///
    /// Panics if `index` is not less than the capacity.
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        let mut slot_ptr = self.slot_ptr(index);

        // SAFETY: `slot_ptr()` only returns in-bounds pointers, `MaybeUninit` has no validity
        // requirements and we hold an exclusive reference to the buffer.
        unsafe { slot_ptr.as_mut() }
    }
}

impl<T> Drop for OwnedBuffer<T> {
    fn drop(&mut self) {
        if self.capacity == 0 {
            return;
        }

        let layout = Self::layout(self.capacity);

        if layout.size() == 0 {
            return;
        }

        // SAFETY: The memory was allocated in `allocate()` with this exact layout and we have
        // not given it away, as `swap()` exchanges the capacity together with the pointer.
        unsafe {
            dealloc(self.first_slot_ptr.as_ptr().cast::<u8>(), layout);
        }
    }
}

impl<T> fmt::Debug for OwnedBuffer<T> {
    #[cfg_attr(test, mutants::skip)] // No API contract to test.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct(type_name::<Self>())
            .field("capacity", &self.capacity)
            .finish_non_exhaustive()
    }
}

// SAFETY: The buffer exclusively owns its storage, so moving it to another thread is as safe
// as moving the `T` values that may live in it.
unsafe impl<T: Send> Send for OwnedBuffer<T> {}

// SAFETY: Shared access to the buffer only hands out shared access to the slots.
unsafe impl<T: Sync> Sync for OwnedBuffer<T> {}
