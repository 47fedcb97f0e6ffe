//! A fixed-capacity last-in, first-out stack.
//!
//! See the [`Stack`] type for details.
use crate::error::{AllocError, Full};
use alloc::{
    alloc::{handle_alloc_error, Layout},
    boxed::Box,
    vec::Vec,
};
use core::{fmt, mem::MaybeUninit, ptr, slice};

/// A last-in, first-out stack with a capacity fixed at construction.
///
/// All of a stack's storage is allocated up front, in a single allocation,
/// when the stack is created. After that, [pushing](Stack::push) and
/// [popping](Stack::pop) never allocate: pushing onto a full stack hands the
/// value back in a [`Full`] error instead.
///
/// # Examples
///
/// ```
/// use hyphae::Stack;
///
/// let mut stack = Stack::with_capacity(2);
/// stack.push(1).unwrap();
/// stack.push(2).unwrap();
///
/// // The stack is full, so the value is handed back.
/// let err = stack.push(3).unwrap_err();
/// assert_eq!(err.into_inner(), 3);
/// assert_eq!(stack.len(), 2);
///
/// assert_eq!(stack.pop(), Some(2));
/// assert_eq!(stack.pop(), Some(1));
/// assert_eq!(stack.pop(), None);
/// ```
pub struct Stack<T> {
    /// Slots `..top` are initialized; the rest are not.
    slots: Box<[MaybeUninit<T>]>,
    top: usize,
}

// === impl Stack ===

impl<T> Stack<T> {
    /// Returns a new empty stack with room for `capacity` elements.
    ///
    /// If the allocation fails, the global
    /// [allocation error handler](handle_alloc_error) is invoked; use
    /// [`Stack::try_with_capacity`] to handle allocation failure instead.
    ///
    /// # Panics
    ///
    /// If `capacity` elements of `T` would exceed `isize::MAX` bytes.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        match Self::try_with_capacity(capacity) {
            Ok(stack) => stack,
            Err(_) => match Layout::array::<T>(capacity) {
                Ok(layout) => handle_alloc_error(layout),
                Err(_) => panic!("stack capacity overflow"),
            },
        }
    }

    /// Returns a new empty stack with room for `capacity` elements, or an
    /// [`AllocError`] if its storage could not be allocated.
    pub fn try_with_capacity(capacity: usize) -> Result<Self, AllocError> {
        let mut slots = Vec::new();
        if let Err(error) = slots.try_reserve_exact(capacity) {
            tracing::debug!(capacity, %error, "Stack::try_with_capacity -> allocation failed");
            return Err(AllocError::new());
        }
        slots.resize_with(capacity, MaybeUninit::uninit);
        tracing::trace!(capacity, "Stack::try_with_capacity");

        Ok(Self {
            slots: slots.into_boxed_slice(),
            top: 0,
        })
    }

    /// Pushes `value` onto the top of the stack.
    ///
    /// # Errors
    ///
    /// If the stack is full, it is left unchanged and `value` is returned
    /// inside a [`Full`] error.
    pub fn push(&mut self, value: T) -> Result<(), Full<T>> {
        let slot = match self.slots.get_mut(self.top) {
            Some(slot) => slot,
            None => {
                tracing::debug!(capacity = self.capacity(), "Stack::push -> full");
                return Err(Full(value));
            }
        };
        slot.write(value);
        self.top += 1;
        test_trace!(len = self.top, "Stack::push");
        Ok(())
    }

    /// Removes the top element of the stack and returns it, or `None` if the
    /// stack is empty.
    pub fn pop(&mut self) -> Option<T> {
        let top = self.top.checked_sub(1)?;
        self.top = top;
        test_trace!(len = self.top, "Stack::pop");

        // Safety: slot `top` was initialized, and since `self.top` no longer
        // covers it, it will not be read or dropped again.
        Some(unsafe { self.slots[top].assume_init_read() })
    }

    /// Returns a reference to the top element, or `None` if the stack is
    /// empty.
    #[must_use]
    pub fn peek(&self) -> Option<&T> {
        self.as_slice().last()
    }

    /// Returns a mutable reference to the top element, or `None` if the
    /// stack is empty.
    #[must_use]
    pub fn peek_mut(&mut self) -> Option<&mut T> {
        self.as_mut_slice().last_mut()
    }

    /// Returns the number of elements on the stack.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.top
    }

    /// Returns `true` if the stack has no elements.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.top == 0
    }

    /// Returns the number of elements the stack can hold.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Returns `true` if the next [`push`](Stack::push) would fail.
    #[inline]
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.top == self.capacity()
    }

    /// Returns an iterator over the elements of the stack, from the bottom to
    /// the top.
    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    fn as_slice(&self) -> &[T] {
        // Safety: slots `..top` are initialized.
        unsafe { slice::from_raw_parts(self.slots.as_ptr().cast::<T>(), self.top) }
    }

    fn as_mut_slice(&mut self) -> &mut [T] {
        // Safety: slots `..top` are initialized.
        unsafe { slice::from_raw_parts_mut(self.slots.as_mut_ptr().cast::<T>(), self.top) }
    }
}

impl<T> Drop for Stack<T> {
    fn drop(&mut self) {
        let live = self.as_mut_slice() as *mut [T];
        // Safety: `live` covers exactly the initialized slots, and the stack
        // is never used again.
        unsafe { ptr::drop_in_place(live) };
    }
}

impl<T: fmt::Debug> fmt::Debug for Stack<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}
