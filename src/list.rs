//! A sentinel-bounded doubly-linked list.
//!
//! See the [`List`] type for details.
use crate::{
    error::AllocError,
    util::{self, FmtOption},
};
use alloc::alloc::{handle_alloc_error, Layout};
use core::{
    fmt,
    iter::FromIterator,
    marker::{PhantomData, PhantomPinned},
    ops::ControlFlow,
    ptr::{self, NonNull},
};

mod cursor;
pub use self::cursor::Cursor;

/// A doubly-linked list bounded by two permanent sentinel nodes.
///
/// Every element of a `List` lives in its own heap-allocated node. The first
/// and last nodes of the chain are always the list's *sentinels*: two dataless
/// nodes which are created along with the list, are never removed from it,
/// and never hold an element. Because the sentinels are always there,
/// inserting and erasing at either end of the list is no different from
/// inserting and erasing in the middle.
///
/// Positions in a `List` are named by [`Cursor`]s. [`List::begin`] returns a
/// cursor to the first element (or to [`List::end`], if the list is empty),
/// and [`List::end`] returns a cursor to the trailing sentinel, which may be
/// used as an insertion anchor or as the exclusive end of a range, but never
/// holds an element. Cursors are `Copy` and carry no borrow of the list, so
/// any number of them may be held while the list is mutated. In exchange,
/// they are *unchecked*: operations that dereference a cursor are `unsafe`,
/// and it is the caller's responsibility to only pass them cursors naming
/// nodes which are still part of the list.
///
/// The cursor-based interface supports *O*(1) insertion and erasure at any
/// position, and *O*(1) [splicing](List::splice) of ranges of nodes from one
/// list into another. Determining the list's [length](List::len) is *O*(n).
///
/// # Examples
///
/// Using a `List` as a first-in, first-out queue:
///
/// ```
/// use hyphae::List;
///
/// let mut list = List::new();
/// for i in 0..5 {
///     list.push_back(i);
/// }
///
/// for i in 0..5 {
///     assert_eq!(list.pop_front(), Some(i));
/// }
///
/// assert!(list.is_empty());
/// ```
///
/// Inserting in the middle of a list with a [`Cursor`]:
///
/// ```
/// use hyphae::List;
///
/// let mut list: List<i32> = [1, 2, 4].into_iter().collect();
///
/// // Find the first element greater than 2...
/// let four = unsafe { list.find(list.begin(), list.end(), |&x| x > 2) };
/// // ...and insert a 3 before it.
/// let three = unsafe { list.insert_before(four, 3) };
///
/// assert_eq!(unsafe { list.get(three) }, Some(&3));
/// assert_eq!(list.iter().copied().collect::<Vec<_>>(), [1, 2, 3, 4]);
/// ```
///
/// Moving a range of elements from one list to another:
///
/// ```
/// use hyphae::List;
///
/// let mut a: List<i32> = [1, 2, 3, 4].into_iter().collect();
/// let mut b: List<i32> = [10, 20].into_iter().collect();
///
/// unsafe {
///     let two = a.begin().next();
///     let four = two.next().next();
///     // Move `[2, 3]` to the front of `b`.
///     b.splice(b.begin(), two, four);
/// }
///
/// assert_eq!(a.iter().copied().collect::<Vec<_>>(), [1, 4]);
/// assert_eq!(b.iter().copied().collect::<Vec<_>>(), [2, 3, 10, 20]);
/// ```
pub struct List<T> {
    ends: NonNull<Sentinels>,
    _owns: PhantomData<T>,
}

/// Iterates over the elements of a [`List`] by reference.
pub struct Iter<'list, T> {
    front: NonNull<Links>,
    back: NonNull<Links>,
    _list: PhantomData<&'list T>,
}

/// Iterates over the elements of a [`List`] by mutable reference.
pub struct IterMut<'list, T> {
    front: NonNull<Links>,
    back: NonNull<Links>,
    _list: PhantomData<&'list mut T>,
}

/// An owning iterator over the elements of a [`List`].
pub struct IntoIter<T> {
    list: List<T>,
}

type Link = Option<NonNull<Links>>;

/// The links shared by every node in a list, sentinels included.
///
/// A sentinel is told apart from an element node by position alone: the
/// leading sentinel has no `prev` link and the trailing sentinel has no `next`
/// link. Every other node has both.
struct Links {
    next: Link,
    prev: Link,
    /// Linked list links must always be `!Unpin`, in order to ensure that they
    /// never receive LLVM `noalias` annotations; see also
    /// <https://github.com/rust-lang/rust/issues/63818>.
    _unpin: PhantomPinned,
}

/// An element node. `links` must be the first field, so that a pointer to a
/// node's `Links` may be cast to a pointer to the node.
#[repr(C)]
struct Node<T> {
    links: Links,
    value: T,
}

/// Both sentinels live in one allocation, so that their addresses stay put
/// when the `List` itself is moved.
#[repr(C)]
struct Sentinels {
    head: Links,
    tail: Links,
}

// ==== impl List ====

impl<T> List<T> {
    /// Returns a new empty list.
    ///
    /// This allocates the list's sentinel nodes. If the allocation fails, the
    /// global [allocation error handler](handle_alloc_error) is invoked; use
    /// [`List::try_new`] to handle allocation failure instead.
    #[must_use]
    pub fn new() -> Self {
        match Self::try_new() {
            Ok(list) => list,
            Err(_) => handle_alloc_error(Layout::new::<Sentinels>()),
        }
    }

    /// Returns a new empty list, or an [`AllocError`] if the list's sentinel
    /// nodes could not be allocated.
    pub fn try_new() -> Result<Self, AllocError> {
        let ends = util::try_alloc(Sentinels {
            head: Links::new(),
            tail: Links::new(),
        })
        .map_err(|_| AllocError::new())?;

        let list = Self {
            ends,
            _owns: PhantomData,
        };
        unsafe {
            // Safety: the sentinels were just allocated and nothing else
            // points at them yet.
            Links::set_next(list.head(), Some(list.tail()));
            Links::set_prev(list.tail(), Some(list.head()));
        }
        tracing::trace!(list.ends = ?list.ends, "List::new");
        Ok(list)
    }

    /// Returns `true` if this list has no elements.
    ///
    /// This is an *O*(1) operation.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.begin() == self.end()
    }

    /// Returns the number of elements in the list.
    ///
    /// This is an *O*(n) operation: the list does not keep a count, so every
    /// node between the sentinels is visited.
    #[must_use]
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Returns a cursor to the first element in the list, or [`List::end`] if
    /// the list is empty.
    #[inline]
    #[must_use]
    pub fn begin(&self) -> Cursor<T> {
        // Safety: the leading sentinel is owned by this list and always has a
        // `next` link.
        unsafe { Cursor::new(self.head()).next() }
    }

    /// Returns a cursor to the list's trailing sentinel.
    ///
    /// The end cursor is always valid for as long as the list exists. It may
    /// be compared with other cursors and used as an insertion anchor or as
    /// the exclusive end of a range, but it never refers to an element.
    #[inline]
    #[must_use]
    pub fn end(&self) -> Cursor<T> {
        Cursor::new(self.tail())
    }

    /// Returns a reference to the first element in the list.
    #[must_use]
    pub fn front(&self) -> Option<&T> {
        // Safety: `begin` always names a node of this list.
        unsafe { self.get(self.begin()) }
    }

    /// Returns a reference to the last element in the list.
    #[must_use]
    pub fn back(&self) -> Option<&T> {
        // Safety: `end` always names a node of this list, and so does its
        // predecessor (which is the leading sentinel if the list is empty).
        unsafe { self.get(self.end().prev()) }
    }

    /// Appends `value` to the end of the list.
    ///
    /// Returns a cursor to the new element, or [`List::end`] if a node could
    /// not be allocated, in which case `value` is dropped and the list is
    /// unchanged.
    pub fn push_back(&mut self, value: T) -> Cursor<T> {
        let end = self.end();
        // Safety: `end` is this list's own trailing sentinel.
        unsafe { self.insert_before(end, value) }
    }

    /// Prepends `value` to the beginning of the list.
    ///
    /// Returns a cursor to the new element, or [`List::end`] if a node could
    /// not be allocated, in which case `value` is dropped and the list is
    /// unchanged.
    pub fn push_front(&mut self, value: T) -> Cursor<T> {
        let begin = self.begin();
        // Safety: `begin` names a node of this list.
        unsafe { self.insert_before(begin, value) }
    }

    /// Removes the first element of the list and returns it, or `None` if the
    /// list is empty.
    pub fn pop_front(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }

        let begin = self.begin();
        // Safety: the list is not empty, so `begin` names an element of it.
        Some(unsafe { self.remove(begin) }.0)
    }

    /// Removes the last element of the list and returns it, or `None` if the
    /// list is empty.
    pub fn pop_back(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }

        // Safety: the list is not empty, so the node before the trailing
        // sentinel is an element of it.
        unsafe {
            let last = self.end().prev();
            Some(self.remove(last).0)
        }
    }

    /// Inserts `value` immediately before the node named by `at`.
    ///
    /// Inserting before [`List::begin`] prepends to the list, and inserting
    /// before [`List::end`] appends to it.
    ///
    /// Returns a cursor to the new element, or [`List::end`] if a node could
    /// not be allocated, in which case `value` is dropped and the list is
    /// unchanged.
    ///
    /// # Safety
    ///
    /// `at` must name an element or the trailing sentinel of *this* list.
    ///
    /// # Panics
    ///
    /// If `at` names the leading sentinel (i.e. `list.begin().prev()`), which
    /// nothing may be inserted before.
    pub unsafe fn insert_before(&mut self, at: Cursor<T>, value: T) -> Cursor<T> {
        self.insert_after(at.prev(), value)
    }

    /// Inserts `value` immediately after the node named by `at`.
    ///
    /// Returns a cursor to the new element, or [`List::end`] if a node could
    /// not be allocated, in which case `value` is dropped and the list is
    /// unchanged.
    ///
    /// # Safety
    ///
    /// `at` must name an element or the leading sentinel of *this* list.
    ///
    /// # Panics
    ///
    /// If `at` is [`List::end`], which nothing may be inserted after.
    pub unsafe fn insert_after(&mut self, at: Cursor<T>, value: T) -> Cursor<T> {
        let next = match Links::next(at.node) {
            Some(next) => next,
            None => panic!("cannot insert after the end of a list"),
        };

        let node = match util::try_alloc(Node {
            links: Links::new(),
            value,
        }) {
            Ok(node) => node.cast::<Links>(),
            Err(_) => {
                tracing::debug!(?at, "List::insert_after -> allocation failed");
                return self.end();
            }
        };
        test_trace!(?at, ?node, ?next, "List::insert_after");

        Links::set_prev(node, Some(at.node));
        Links::set_next(node, Some(next));
        Links::set_prev(next, Some(node));
        Links::set_next(at.node, Some(node));

        Cursor::new(node)
    }

    /// Returns a reference to the element named by `at`, or `None` if `at`
    /// names one of the list's sentinels.
    ///
    /// # Safety
    ///
    /// `at` must name a node of *this* list.
    #[must_use]
    pub unsafe fn get(&self, at: Cursor<T>) -> Option<&T> {
        if Links::is_sentinel(at.node) {
            return None;
        }

        Some(&(*at.node.cast::<Node<T>>().as_ptr()).value)
    }

    /// Returns a mutable reference to the element named by `at`, or `None`
    /// if `at` names one of the list's sentinels.
    ///
    /// # Safety
    ///
    /// `at` must name a node of *this* list.
    #[must_use]
    pub unsafe fn get_mut(&mut self, at: Cursor<T>) -> Option<&mut T> {
        if Links::is_sentinel(at.node) {
            return None;
        }

        Some(&mut (*at.node.cast::<Node<T>>().as_ptr()).value)
    }

    /// Unlinks the element named by `at` and drops it, returning a cursor to
    /// the node that followed it.
    ///
    /// Any other copies of `at` dangle once this returns.
    ///
    /// # Safety
    ///
    /// `at` must name an element of *this* list.
    ///
    /// # Panics
    ///
    /// If `at` names one of the list's sentinels.
    pub unsafe fn erase(&mut self, at: Cursor<T>) -> Cursor<T> {
        let (value, next) = self.remove(at);
        drop(value);
        next
    }

    /// Unlinks the element named by `at` and returns it, along with a cursor
    /// to the node that followed it.
    ///
    /// Any other copies of `at` dangle once this returns.
    ///
    /// # Safety
    ///
    /// `at` must name an element of *this* list.
    ///
    /// # Panics
    ///
    /// If `at` names one of the list's sentinels.
    pub unsafe fn remove(&mut self, at: Cursor<T>) -> (T, Cursor<T>) {
        let (prev, next) = match (Links::prev(at.node), Links::next(at.node)) {
            (Some(prev), Some(next)) => (prev, next),
            _ => panic!("cannot erase a list's sentinel node"),
        };
        test_trace!(?at, ?prev, ?next, "List::remove");

        Links::set_next(prev, Some(next));
        Links::set_prev(next, Some(prev));

        let node = util::free(at.node.cast::<Node<T>>());
        (node.value, Cursor::new(next))
    }

    /// Returns a cursor to the first element in the range `[from, to)` for
    /// which `predicate` returns `true`, or `to` if there is no such element.
    ///
    /// Elements are visited in order, starting at `from`. Anything else the
    /// predicate needs to compare against (a needle, a context) is simply
    /// captured by the closure.
    ///
    /// # Safety
    ///
    /// `from` and `to` must name nodes of *this* list, and `to` must be
    /// reachable from `from` by repeatedly advancing with [`Cursor::next`].
    #[must_use]
    pub unsafe fn find(
        &self,
        from: Cursor<T>,
        to: Cursor<T>,
        mut predicate: impl FnMut(&T) -> bool,
    ) -> Cursor<T> {
        let mut curr = from;
        while curr != to {
            let value = match self.get(curr) {
                Some(value) => value,
                None => panic!("`to` is not reachable from `from`"),
            };
            if predicate(value) {
                break;
            }
            curr = curr.next();
        }
        curr
    }

    /// Calls `f` with each element in the range `[from, to)`, in order,
    /// stopping early if `f` returns [`ControlFlow::Break`].
    ///
    /// Returns the first `Break` produced by `f`, or
    /// [`ControlFlow::Continue`] if the whole range was visited. Whether a
    /// `Break` means "found it" or "something went wrong" is up to the
    /// caller.
    ///
    /// # Safety
    ///
    /// `from` and `to` must name nodes of *this* list, and `to` must be
    /// reachable from `from` by repeatedly advancing with [`Cursor::next`].
    pub unsafe fn for_each<B>(
        &mut self,
        from: Cursor<T>,
        to: Cursor<T>,
        mut f: impl FnMut(&mut T) -> ControlFlow<B>,
    ) -> ControlFlow<B> {
        let mut curr = from;
        while curr != to {
            let value = match self.get_mut(curr) {
                Some(value) => value,
                None => panic!("`to` is not reachable from `from`"),
            };
            f(value)?;
            curr = curr.next();
        }
        ControlFlow::Continue(())
    }

    /// Moves the nodes in the range `[from, to)` so that they sit immediately
    /// before `at`, returning a cursor to the last node moved.
    ///
    /// The range may belong to this list or to another one. Nodes are moved by
    /// relinking only: nothing is allocated, and the elements themselves do
    /// not move in memory, so cursors to the moved nodes stay valid (but now
    /// name nodes of this list). This is an *O*(1) operation.
    ///
    /// If `at` is `from` or `to`, the range is already in place, and nothing
    /// changes.
    ///
    /// # Safety
    ///
    /// - `at` must name an element or the trailing sentinel of *this* list.
    /// - `from` must name an element of some list `L`, which may be this list,
    ///   and `to` must name an element or the trailing sentinel of `L`,
    ///   reachable from `from` by repeatedly advancing with [`Cursor::next`].
    /// - `at` must not name a node strictly inside the range.
    /// - If `L` is another list, nothing else may be accessing it for the
    ///   duration of the call.
    ///
    /// # Panics
    ///
    /// If `from == to`. Splicing an empty range is a caller bug, not a
    /// no-op.
    pub unsafe fn splice(&mut self, at: Cursor<T>, from: Cursor<T>, to: Cursor<T>) -> Cursor<T> {
        assert_ne!(from, to, "cannot splice an empty range");

        let last = to.prev();
        if at == from || at == to {
            tracing::trace!(?at, ?from, ?to, "List::splice -> range already in place");
            return last;
        }

        let before = from.prev();
        let after = at.prev();
        tracing::trace!(?at, ?from, ?to, ?before, ?last, ?after, "List::splice");

        // Close the gap the range leaves behind...
        Links::set_next(before.node, Some(to.node));
        Links::set_prev(to.node, Some(before.node));

        // ...then link the range in between `after` and `at`.
        Links::set_next(after.node, Some(from.node));
        Links::set_prev(from.node, Some(after.node));
        Links::set_next(last.node, Some(at.node));
        Links::set_prev(at.node, Some(last.node));

        last
    }

    /// Moves every element of `other` onto the end of this list, leaving
    /// `other` empty.
    ///
    /// This is an *O*(1) operation.
    pub fn append(&mut self, other: &mut List<T>) {
        if other.is_empty() {
            return;
        }

        let end = self.end();
        unsafe {
            // Safety: `end` is our own trailing sentinel, the range is all of
            // `other`, and we have exclusive access to `other`.
            self.splice(end, other.begin(), other.end());
        }
    }

    /// Returns an iterator over the elements of the list, by reference.
    #[must_use]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            front: self.begin().node,
            back: self.tail(),
            _list: PhantomData,
        }
    }

    /// Returns an iterator over the elements of the list, by mutable
    /// reference.
    #[must_use]
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut {
            front: self.begin().node,
            back: self.tail(),
            _list: PhantomData,
        }
    }

    /// Asserts as many of the linked list's invariants as possible.
    ///
    /// This walks the entire list, so it is *O*(n).
    ///
    /// # Panics
    ///
    /// If any invariant is violated.
    #[track_caller]
    pub fn assert_valid(&self) {
        let head = self.head();
        let tail = self.tail();
        unsafe {
            assert_eq!(
                Links::prev(head),
                None,
                "leading sentinel must not have a prev link; head={:#?}",
                *head.as_ptr(),
            );
            assert_eq!(
                Links::next(tail),
                None,
                "trailing sentinel must not have a next link; tail={:#?}",
                *tail.as_ptr(),
            );

            let mut curr = head;
            while curr != tail {
                let next = match Links::next(curr) {
                    Some(next) => next,
                    None => panic!(
                        "only the trailing sentinel may lack a next link; node={:#?}",
                        *curr.as_ptr()
                    ),
                };
                assert_ne!(
                    next,
                    curr,
                    "node's next link cannot be to itself; node={:#?}",
                    *curr.as_ptr()
                );
                assert_eq!(
                    Links::prev(next),
                    Some(curr),
                    "next node's prev link must point back at this node; node={:#?}, next={:#?}",
                    *curr.as_ptr(),
                    *next.as_ptr(),
                );
                curr = next;
            }
        }
    }

    #[inline]
    fn head(&self) -> NonNull<Links> {
        // Safety: `ends` is a live allocation for as long as the list exists.
        unsafe { NonNull::new_unchecked(ptr::addr_of_mut!((*self.ends.as_ptr()).head)) }
    }

    #[inline]
    fn tail(&self) -> NonNull<Links> {
        // Safety: `ends` is a live allocation for as long as the list exists.
        unsafe { NonNull::new_unchecked(ptr::addr_of_mut!((*self.ends.as_ptr()).tail)) }
    }
}

impl<T> Drop for List<T> {
    fn drop(&mut self) {
        tracing::trace!(list.ends = ?self.ends, "List::drop");
        // The list owns every element still linked into it.
        while self.pop_front().is_some() {}

        unsafe {
            // Safety: `ends` was allocated by `try_alloc` in `try_new`, and
            // is only freed here.
            util::free(self.ends);
        }
    }
}

impl<T> Default for List<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for List<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> Extend<T> for List<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push_back(value);
        }
    }
}

impl<T> FromIterator<T> for List<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        list.extend(iter);
        list
    }
}

impl<T> IntoIterator for List<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    #[inline]
    fn into_iter(self) -> IntoIter<T> {
        IntoIter { list: self }
    }
}

impl<'list, T> IntoIterator for &'list List<T> {
    type Item = &'list T;
    type IntoIter = Iter<'list, T>;

    #[inline]
    fn into_iter(self) -> Iter<'list, T> {
        self.iter()
    }
}

impl<'list, T> IntoIterator for &'list mut List<T> {
    type Item = &'list mut T;
    type IntoIter = IterMut<'list, T>;

    #[inline]
    fn into_iter(self) -> IterMut<'list, T> {
        self.iter_mut()
    }
}

/// # Safety
///
/// A `List` owns its elements, so moving it to another thread moves them too.
unsafe impl<T: Send> Send for List<T> {}

/// # Safety
///
/// Shared access to a `List` only permits shared access to its elements.
unsafe impl<T: Sync> Sync for List<T> {}

// ==== impl Links ====

impl Links {
    const fn new() -> Self {
        Self {
            next: None,
            prev: None,
            _unpin: PhantomPinned,
        }
    }

    // The accessors below take raw pointers rather than `&self`, so that no
    // reference to a node's links is ever live while another node's links are
    // being written.

    #[inline]
    unsafe fn next(this: NonNull<Self>) -> Link {
        (*this.as_ptr()).next
    }

    #[inline]
    unsafe fn prev(this: NonNull<Self>) -> Link {
        (*this.as_ptr()).prev
    }

    #[inline]
    unsafe fn set_next(this: NonNull<Self>, next: Link) {
        (*this.as_ptr()).next = next;
    }

    #[inline]
    unsafe fn set_prev(this: NonNull<Self>, prev: Link) {
        (*this.as_ptr()).prev = prev;
    }

    #[inline]
    unsafe fn is_sentinel(this: NonNull<Self>) -> bool {
        Self::next(this).is_none() || Self::prev(this).is_none()
    }
}

impl fmt::Debug for Links {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Links")
            .field("self", &format_args!("{:p}", self))
            .field("next", &FmtOption::new(&self.next))
            .field("prev", &FmtOption::new(&self.prev))
            .finish()
    }
}

// ==== impl Iter ====

impl<'list, T> Iterator for Iter<'list, T> {
    type Item = &'list T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }

        let curr = self.front;
        unsafe {
            // Safety: `front` is strictly before `back`, so it names an
            // element, and the list is borrowed for `'list`.
            self.front = Links::next(curr)?;
            Some(&(*curr.cast::<Node<T>>().as_ptr()).value)
        }
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }

        unsafe {
            // Safety: `back` is strictly after `front`, so its predecessor is
            // an element, and the list is borrowed for `'list`.
            self.back = Links::prev(self.back)?;
            Some(&(*self.back.cast::<Node<T>>().as_ptr()).value)
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Iter")
            .field("front", &self.front)
            .field("back", &self.back)
            .finish()
    }
}

// ==== impl IterMut ====

impl<'list, T> Iterator for IterMut<'list, T> {
    type Item = &'list mut T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }

        let curr = self.front;
        unsafe {
            // Safety: `front` is strictly before `back`, so it names an
            // element, and each element is yielded at most once.
            self.front = Links::next(curr)?;
            Some(&mut (*curr.cast::<Node<T>>().as_ptr()).value)
        }
    }
}

impl<T> DoubleEndedIterator for IterMut<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }

        unsafe {
            // Safety: `back` is strictly after `front`, so its predecessor is
            // an element, and each element is yielded at most once.
            self.back = Links::prev(self.back)?;
            Some(&mut (*self.back.cast::<Node<T>>().as_ptr()).value)
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for IterMut<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IterMut")
            .field("front", &self.front)
            .field("back", &self.back)
            .finish()
    }
}

// ==== impl IntoIter ====

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        self.list.pop_front()
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    #[inline]
    fn next_back(&mut self) -> Option<T> {
        self.list.pop_back()
    }
}

impl<T: fmt::Debug> fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.list).finish()
    }
}

#[cfg(test)]
mod tests;
