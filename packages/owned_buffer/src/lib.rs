#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! A fixed-capacity heap buffer with exclusive ownership of its storage.
//!
//! [`OwnedBuffer<T>`] allocates storage for an exact number of `T` slots and releases it when
//! dropped. The slots are exposed as [`MaybeUninit<T>`][std::mem::MaybeUninit] because the
//! buffer does not know which of them hold values - that is the business of whatever
//! container is built on top of it. Consequently, dropping the buffer deallocates the memory
//! but never drops the slot contents.
//!
//! The buffer never resizes. Containers change capacity by allocating a new buffer, moving
//! their values over and then [swapping][OwnedBuffer::swap] the new buffer in, which leaves
//! the old storage valid right up until the exchange.
//!
//! # Example
//!
//! ```
//! use owned_buffer::OwnedBuffer;
//!
//! let mut buffer = OwnedBuffer::<u64>::allocate(4);
//! assert_eq!(buffer.capacity(), 4);
//!
//! buffer[0].write(42);
//!
//! // SAFETY: We just initialized slot 0.
//! let first = unsafe { buffer[0].assume_init_read() };
//! assert_eq!(first, 42);
//!
//! let mut other = OwnedBuffer::<u64>::new();
//! buffer.swap(&mut other);
//!
//! assert_eq!(buffer.capacity(), 0);
//! assert!(buffer.get().is_none());
//! assert_eq!(other.capacity(), 4);
//! ```

mod buffer;

pub use buffer::*;
