//! Raw singly-linked node chains, and the algorithms that operate on them.
//!
//! A chain is nothing more than a sequence of heap-allocated [`Node`]s, each
//! linked to the next, with the last node's `next` link set to `None`. There
//! is no list header and no sentinel: a chain is addressed by a pointer to its
//! first node (a [`Link`]), which the caller keeps track of. This makes it
//! possible to build shapes a safe list type cannot express, such as two
//! chains sharing a common tail, or a chain that loops back on itself, and to
//! ask questions about them ([`has_cycle`], [`find_intersection`]).
//!
//! Because chains are made of raw pointers, every function here is `unsafe`:
//! the caller must guarantee that every node reachable from the pointers it
//! passes in is live. Functions that walk a whole chain additionally require
//! it to be acyclic, except for [`has_cycle`], whose purpose is to find out.
//!
//! # Examples
//!
//! ```
//! use hyphae::slist::{self, Node};
//!
//! unsafe {
//!     // Build the chain 1 -> 2 -> 3, back to front.
//!     let three = Node::alloc(3, None).unwrap();
//!     let two = Node::alloc(2, Some(three)).unwrap();
//!     let one = Node::alloc(1, Some(two)).unwrap();
//!
//!     assert_eq!(slist::count(Some(one)), 3);
//!     assert!(!slist::has_cycle(Some(one)));
//!
//!     // Reverse it in place.
//!     let head = slist::flip(Some(one));
//!     assert_eq!(head, Some(three));
//!     assert_eq!(*Node::value(three), 3);
//!
//!     slist::free_all(head);
//! }
//! ```
use crate::util;
use core::{fmt, mem, ops::ControlFlow, ptr::NonNull};

/// A node in a singly-linked chain.
pub struct Node<T> {
    next: Link<T>,
    value: T,
}

/// A possibly-null pointer to a [`Node`]; the head of a chain, or a node's
/// link to its successor.
pub type Link<T> = Option<NonNull<Node<T>>>;

// === impl Node ===

impl<T> Node<T> {
    /// Allocates a new node holding `value`, linked to `next`.
    ///
    /// Returns `None` if the node could not be allocated, in which case
    /// `value` is dropped.
    ///
    /// The returned node is owned by the caller, and must eventually be
    /// released with [`Node::free`] or [`free_all`].
    #[must_use]
    pub fn alloc(value: T, next: Link<T>) -> Option<NonNull<Self>> {
        util::try_alloc(Self { next, value }).ok()
    }

    /// Frees `node`, returning the value it held.
    ///
    /// The node's `next` link is ignored: nothing after it is freed.
    ///
    /// # Safety
    ///
    /// `node` must have been returned by [`Node::alloc`], must not have been
    /// freed already, and must not be used again.
    pub unsafe fn free(node: NonNull<Self>) -> T {
        util::free(node).value
    }

    /// Returns the node after `node`, or `None` if `node` is the last node in
    /// its chain.
    ///
    /// # Safety
    ///
    /// `node` must be live.
    #[inline]
    #[must_use]
    pub unsafe fn next(node: NonNull<Self>) -> Link<T> {
        (*node.as_ptr()).next
    }

    /// Links `node` to `next`, returning its previous successor.
    ///
    /// # Safety
    ///
    /// `node` must be live. Nothing is freed or unlinked from `next`; the
    /// caller is responsible for keeping track of any nodes this orphans.
    #[inline]
    pub unsafe fn set_next(node: NonNull<Self>, next: Link<T>) -> Link<T> {
        mem::replace(&mut (*node.as_ptr()).next, next)
    }

    /// Returns a reference to the value held by `node`.
    ///
    /// # Safety
    ///
    /// `node` must be live for `'a`, and must not be mutated during `'a`.
    #[inline]
    #[must_use]
    pub unsafe fn value<'a>(node: NonNull<Self>) -> &'a T {
        &(*node.as_ptr()).value
    }

    /// Returns a mutable reference to the value held by `node`.
    ///
    /// # Safety
    ///
    /// `node` must be live for `'a`, and must not be otherwise accessed
    /// during `'a`.
    #[inline]
    #[must_use]
    pub unsafe fn value_mut<'a>(node: NonNull<Self>) -> &'a mut T {
        &mut (*node.as_ptr()).value
    }
}

impl<T: fmt::Debug> fmt::Debug for Node<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("self", &format_args!("{:p}", self))
            .field("next", &util::FmtOption::new(&self.next))
            .field("value", &self.value)
            .finish()
    }
}

// === node primitives ===

/// Links `node` into the chain immediately after `at`, returning `node`.
///
/// # Safety
///
/// `at` and `node` must be live, distinct nodes, and `node` must not be part
/// of any other chain (its current `next` link is overwritten).
pub unsafe fn insert_after<T>(at: NonNull<Node<T>>, node: NonNull<Node<T>>) -> NonNull<Node<T>> {
    debug_assert_ne!(at, node, "a node cannot be linked after itself");
    test_trace!(?at, ?node, "slist::insert_after");

    let next = Node::set_next(at, Some(node));
    Node::set_next(node, next);
    node
}

/// Inserts `node`'s value into the chain immediately *before* `at`, in
/// *O*(1) time, returning `at`.
///
/// A singly-linked node does not know its predecessor, so this links `node`
/// in after `at` and then swaps the two nodes' values. Afterwards `at` holds
/// the inserted value, and `node` holds the value `at` used to hold.
///
/// # Safety
///
/// `at` and `node` must be live, distinct nodes, and `node` must not be part
/// of any other chain.
pub unsafe fn insert<T>(at: NonNull<Node<T>>, node: NonNull<Node<T>>) -> NonNull<Node<T>> {
    insert_after(at, node);
    mem::swap(Node::value_mut(at), Node::value_mut(node));
    at
}

/// Unlinks the node after `at` and returns it.
///
/// The returned node's `next` link is cleared. It is not freed.
///
/// # Safety
///
/// `at` and its successor must be live.
///
/// # Panics
///
/// If `at` is the last node in its chain.
pub unsafe fn remove_after<T>(at: NonNull<Node<T>>) -> NonNull<Node<T>> {
    let removed = match Node::next(at) {
        Some(next) => next,
        None => panic!("cannot remove after the last node of a chain"),
    };
    test_trace!(?at, ?removed, "slist::remove_after");

    let next = Node::set_next(removed, None);
    Node::set_next(at, next);
    removed
}

/// Removes `at`'s value from the chain in *O*(1) time.
///
/// A singly-linked node does not know its predecessor, so instead of
/// unlinking `at` itself, this moves the value of `at`'s successor into `at`
/// and unlinks the successor. The unlinked node is returned, holding the value
/// `at` used to hold; its `next` link is cleared. It is not freed.
///
/// # Safety
///
/// `at` and its successor must be live.
///
/// # Panics
///
/// If `at` is the last node in its chain, which has no successor to take the
/// place of.
pub unsafe fn remove<T>(at: NonNull<Node<T>>) -> NonNull<Node<T>> {
    let removed = remove_after(at);
    mem::swap(Node::value_mut(at), Node::value_mut(removed));
    removed
}

/// Frees every node in the chain starting at `head`, dropping their values.
///
/// # Safety
///
/// Every node in the chain must be live, owned by the caller, and
/// allocated by [`Node::alloc`], and the chain must be acyclic.
pub unsafe fn free_all<T>(mut head: Link<T>) {
    while let Some(node) = head {
        head = Node::next(node);
        drop(Node::free(node));
    }
}

// === algorithms ===

/// Returns the number of nodes in the chain starting at `head`.
///
/// # Safety
///
/// Every node in the chain must be live, and the chain must be acyclic.
#[must_use]
pub unsafe fn count<T>(mut head: Link<T>) -> usize {
    let mut count = 0;
    while let Some(node) = head {
        count += 1;
        head = Node::next(node);
    }
    count
}

/// Returns the first node in the chain starting at `head` whose value
/// satisfies `predicate`, or `None` if no node does.
///
/// # Safety
///
/// Every node in the chain must be live, and the chain must be acyclic.
#[must_use]
pub unsafe fn find<T>(mut head: Link<T>, mut predicate: impl FnMut(&T) -> bool) -> Link<T> {
    while let Some(node) = head {
        if predicate(Node::value(node)) {
            return Some(node);
        }
        head = Node::next(node);
    }
    None
}

/// Calls `f` with the value of each node in the chain starting at `head`, in
/// order, stopping at the first [`ControlFlow::Break`].
///
/// Returns that `Break`, or [`ControlFlow::Continue`] if every node was
/// visited.
///
/// # Safety
///
/// Every node in the chain must be live and not otherwise accessed for the
/// duration of the call, and the chain must be acyclic.
pub unsafe fn for_each<T, B>(
    mut head: Link<T>,
    mut f: impl FnMut(&mut T) -> ControlFlow<B>,
) -> ControlFlow<B> {
    while let Some(node) = head {
        f(Node::value_mut(node))?;
        head = Node::next(node);
    }
    ControlFlow::Continue(())
}

/// Reverses the chain starting at `head` in place, returning its new head
/// (the old last node).
///
/// # Safety
///
/// Every node in the chain must be live, and the chain must be acyclic.
#[must_use = "the old head is now the last node of the chain"]
pub unsafe fn flip<T>(mut head: Link<T>) -> Link<T> {
    let mut prev = None;
    while let Some(node) = head {
        head = Node::set_next(node, prev);
        prev = Some(node);
    }
    prev
}

/// Returns `true` if following `next` links from `head` eventually revisits
/// a node.
///
/// This is Floyd's "tortoise and hare" algorithm: one cursor advances a single
/// node per step, the other advances two, and the chain has a cycle exactly
/// when the fast cursor catches up with the slow one before running off the
/// end. It takes *O*(n) time and *O*(1) space.
///
/// # Safety
///
/// Every node reachable from `head` must be live. Unlike the other functions
/// in this module, the chain may be cyclic.
#[must_use]
pub unsafe fn has_cycle<T>(head: Link<T>) -> bool {
    let mut slow = match head {
        Some(head) => head,
        None => return false,
    };
    let mut fast = Node::next(slow);

    while let Some(hare) = fast {
        let next = match Node::next(hare) {
            Some(next) => next,
            None => break,
        };

        if hare == slow || next == slow {
            test_trace!(?head, ?slow, ?hare, "slist::has_cycle -> true");
            return true;
        }

        fast = Node::next(next);
        slow = match Node::next(slow) {
            Some(slow) => slow,
            None => unreachable!("slow cursor ran off the end of the chain before the fast one"),
        };
    }

    false
}

/// Returns the first node shared by the chains starting at `a` and `b`, or
/// `None` if they never converge.
///
/// Nodes are compared by identity, not by value. Both chains are counted
/// first; the cursor on the longer chain is advanced by the difference, and
/// then both cursors are advanced in lockstep until they meet. This takes
/// *O*(n + m) time and *O*(1) space.
///
/// # Safety
///
/// Every node in both chains must be live, and both chains must be acyclic.
#[must_use]
pub unsafe fn find_intersection<T>(a: Link<T>, b: Link<T>) -> Link<T> {
    let (len_a, len_b) = (count(a), count(b));
    let (mut long, mut short, diff) = if len_a > len_b {
        (a, b, len_a - len_b)
    } else {
        (b, a, len_b - len_a)
    };

    for _ in 0..diff {
        long = long.and_then(|node| Node::next(node));
    }

    while long != short {
        long = long.and_then(|node| Node::next(node));
        short = short.and_then(|node| Node::next(node));
    }

    test_trace!(?a, ?b, intersection = ?long, "slist::find_intersection");
    long
}
