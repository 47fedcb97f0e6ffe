//! Errors returned by the containers in this crate.
//!
//! Only two things can go wrong in a well-formed program: the global allocator
//! can run out of memory, or a fixed-capacity [`Stack`](crate::Stack) can run
//! out of slots. Both are reported as values. Precondition violations (such as
//! erasing a list's sentinel) are bugs, and panic instead.
use core::fmt;

/// The global allocator could not satisfy a request for a new node or
/// buffer.
///
/// When this is returned, the container that returned it is unchanged.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, thiserror::Error)]
#[error("memory allocation failed")]
pub struct AllocError(pub(crate) ());

/// A value could not be pushed onto a [`Stack`](crate::Stack) because the
/// stack is at capacity.
///
/// The rejected value is returned inside the error, and may be recovered with
/// [`Full::into_inner`].
#[derive(Copy, Clone, Eq, PartialEq, thiserror::Error)]
#[error("stack is full")]
pub struct Full<T>(pub T);

// === impl AllocError ===

impl AllocError {
    pub(crate) const fn new() -> Self {
        Self(())
    }
}

// === impl Full ===

impl<T> Full<T> {
    /// Returns the value that could not be pushed.
    #[must_use]
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> fmt::Debug for Full<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Full(..)")
    }
}
