use super::Links;
use core::{fmt, hash, marker::PhantomData, ptr::NonNull};

/// A position in a [`List`](super::List).
///
/// A `Cursor` names a single node: either an element, or one of the list's
/// two sentinels. Two cursors are equal if and only if they name the same
/// node.
///
/// Cursors are lightweight `Copy` handles. They do not borrow the list they
/// came from, and they are not invalidated by insertions, or by erasing
/// *other* nodes. They are, however, entirely unchecked: once the node a
/// cursor names is erased, the cursor dangles, and using it is undefined
/// behavior. This is why every operation that dereferences a cursor, including
/// [`Cursor::next`] and [`Cursor::prev`], is `unsafe`.
pub struct Cursor<T> {
    pub(super) node: NonNull<Links>,
    _list: PhantomData<fn() -> T>,
}

// === impl Cursor ===

impl<T> Cursor<T> {
    #[inline]
    pub(super) const fn new(node: NonNull<Links>) -> Self {
        Self {
            node,
            _list: PhantomData,
        }
    }

    /// Returns a cursor to the node after this one.
    ///
    /// # Safety
    ///
    /// The node this cursor names must still be linked into a live list.
    ///
    /// # Panics
    ///
    /// If this cursor is its list's [`end`](super::List::end), which has no
    /// next node.
    #[inline]
    #[must_use]
    pub unsafe fn next(self) -> Self {
        match Links::next(self.node) {
            Some(next) => Self::new(next),
            None => panic!("cannot advance a cursor past the end of a list"),
        }
    }

    /// Returns a cursor to the node before this one.
    ///
    /// Stepping back from a list's first element yields the list's leading
    /// sentinel, which may be used as an [insertion
    /// anchor](super::List::insert_after) but holds no element.
    ///
    /// # Safety
    ///
    /// The node this cursor names must still be linked into a live list.
    ///
    /// # Panics
    ///
    /// If this cursor names a list's leading sentinel, which has no previous
    /// node.
    #[inline]
    #[must_use]
    pub unsafe fn prev(self) -> Self {
        match Links::prev(self.node) {
            Some(prev) => Self::new(prev),
            None => panic!("cannot move a cursor before the start of a list"),
        }
    }
}

impl<T> Clone for Cursor<T> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Cursor<T> {}

impl<T> PartialEq for Cursor<T> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.node == other.node
    }
}

impl<T> Eq for Cursor<T> {}

impl<T> hash::Hash for Cursor<T> {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        self.node.hash(state)
    }
}

impl<T> fmt::Debug for Cursor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Cursor").field(&self.node).finish()
    }
}
