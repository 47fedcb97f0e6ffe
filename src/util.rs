use alloc::{
    alloc::{alloc, Layout},
    boxed::Box,
};
use core::{fmt, ptr::NonNull};

macro_rules! test_trace {
    ($($tt:tt)*) => {
        #[cfg(test)]
        tracing::trace!($($tt)*)
    }
}

pub(crate) struct FmtOption<'a, T> {
    opt: Option<&'a T>,
    or_else: &'a str,
}

/// Moves `value` into a fresh heap allocation, returning it back to the caller
/// if the global allocator is exhausted.
///
/// Unlike `Box::new`, this never calls the allocation error handler, so that
/// the containers can report exhaustion as a return value. The returned
/// pointer owns the value and may be released with [`free`].
pub(crate) fn try_alloc<T>(value: T) -> Result<NonNull<T>, T> {
    let layout = Layout::new::<T>();
    if layout.size() == 0 {
        return Ok(NonNull::from(Box::leak(Box::new(value))));
    }

    // Safety: the layout has a non-zero size.
    let ptr = match NonNull::new(unsafe { alloc(layout) }.cast::<T>()) {
        Some(ptr) => ptr,
        None => {
            tracing::debug!(
                size = layout.size(),
                align = layout.align(),
                "allocation failed"
            );
            return Err(value);
        }
    };

    // Safety: `ptr` was just allocated with `T`'s layout and is not aliased.
    unsafe { ptr.as_ptr().write(value) };
    Ok(ptr)
}

/// Releases an allocation made by [`try_alloc`], returning the value it
/// held.
///
/// # Safety
///
/// `ptr` must have been returned by [`try_alloc`] and must not have been
/// freed already.
pub(crate) unsafe fn free<T>(ptr: NonNull<T>) -> T {
    // Safety: `try_alloc` allocates with the global allocator and `T`'s
    // layout, which is exactly what `Box` expects to free.
    *Box::from_raw(ptr.as_ptr())
}

// === impl FmtOption ===

impl<'a, T> FmtOption<'a, T> {
    pub(crate) fn new(opt: &'a Option<T>) -> Self {
        Self {
            opt: opt.as_ref(),
            or_else: "None",
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for FmtOption<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.opt {
            Some(val) => val.fmt(f),
            None => f.write_str(self.or_else),
        }
    }
}

#[cfg(test)]
pub(crate) fn assert_send_sync<T: Send + Sync>() {}

#[cfg(test)]
pub(crate) fn trace_init() -> tracing::dispatcher::DefaultGuard {
    use tracing_subscriber::prelude::*;
    tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::TRACE)
        .with_target(false)
        .with_timer(())
        .set_default()
}

/// A payload that counts how many times it has been dropped, for checking
/// that containers neither leak nor double-drop their elements.
#[cfg(test)]
#[derive(Debug)]
pub(crate) struct DropCount<'a> {
    pub(crate) val: i32,
    drops: &'a core::cell::Cell<usize>,
}

#[cfg(test)]
impl<'a> DropCount<'a> {
    pub(crate) fn new(val: i32, drops: &'a core::cell::Cell<usize>) -> Self {
        Self { val, drops }
    }
}

#[cfg(test)]
impl Drop for DropCount<'_> {
    fn drop(&mut self) {
        self.drops.set(self.drops.get() + 1);
    }
}
