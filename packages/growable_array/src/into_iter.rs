use std::any::type_name;
use std::fmt;
use std::iter::FusedIterator;
use std::{ptr, thread};

use owned_buffer::OwnedBuffer;

use crate::DropPolicy;

/// An iterator that moves values out of a [`GrowableArray`][crate::GrowableArray].
///
/// Created by the `into_iter()` method on `GrowableArray` (provided by the
/// [`IntoIterator`] trait). Values not consumed by the time the iterator is dropped are
/// dropped along with it, unless the array was created with
/// [`DropPolicy::MustNotDropItems`], in which case dropping them panics.
pub struct IntoIter<T> {
    buffer: OwnedBuffer<T>,
    drop_policy: DropPolicy,

    /// Slots in `[start, end)` hold values not yet yielded. Everything else is vacant.
    start: usize,
    end: usize,
}

impl<T> IntoIter<T> {
    /// Takes over `buffer`, whose first `len` slots must be initialized.
    pub(crate) fn new(buffer: OwnedBuffer<T>, len: usize, drop_policy: DropPolicy) -> Self {
        debug_assert!(len <= buffer.capacity());

        Self {
            buffer,
            drop_policy,
            start: 0,
            end: len,
        }
    }

    /// Returns the remaining values as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        let remaining = self
            .end
            .checked_sub(self.start)
            .expect("start never passes end");

        // SAFETY: `start <= end <= capacity`, so the offset stays in bounds.
        let first = unsafe { self.buffer.as_ptr().add(self.start) };

        // SAFETY: Slots in `[start, end)` are initialized and not aliased mutably.
        unsafe { std::slice::from_raw_parts(first, remaining) }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.start == self.end {
            return None;
        }

        let index = self.start;
        self.start = index.checked_add(1).expect("guarded by start < end");

        // SAFETY: Slot `index` is initialized and, now that `start` moved past it, will never
        // be read again, so the value is moved out exactly once.
        Some(unsafe { self.buffer[index].assume_init_read() })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self
            .end
            .checked_sub(self.start)
            .expect("start never passes end");

        (remaining, Some(remaining))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> {
        if self.start == self.end {
            return None;
        }

        self.end = self.end.checked_sub(1).expect("guarded by start < end");

        // SAFETY: Slot `end` is initialized and, now that `end` moved before it, will never
        // be read again, so the value is moved out exactly once.
        Some(unsafe { self.buffer[self.end].assume_init_read() })
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

impl<T> Drop for IntoIter<T> {
    fn drop(&mut self) {
        let remaining = self
            .end
            .checked_sub(self.start)
            .expect("start never passes end");

        // SAFETY: `start <= end <= capacity`, so the offset stays in bounds.
        let first = unsafe { self.buffer.as_mut_ptr().add(self.start) };

        // Mark everything consumed before dropping, in case a value's drop panics.
        self.start = self.end;

        // SAFETY: These slots were initialized and have not been yielded. Nothing reads them
        // again because the range was marked consumed above.
        unsafe {
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(first, remaining));
        }

        if self.drop_policy == DropPolicy::MustNotDropItems && !thread::panicking() {
            assert!(
                remaining == 0,
                "dropped {remaining} unconsumed {} values with a policy that says they must not be dropped",
                type_name::<T>()
            );
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for IntoIter<T> {
    #[cfg_attr(test, mutants::skip)] // No API contract to test.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple(type_name::<Self>())
            .field(&self.as_slice())
            .finish()
    }
}
