//! A first-in, first-out queue built on [`slist`](crate::slist) nodes.
//!
//! See the [`Queue`] type for details.
use crate::{
    error::AllocError,
    slist::{self, Node},
};
use alloc::alloc::{handle_alloc_error, Layout};
use core::{fmt, marker::PhantomData, ptr::NonNull};

/// A singly-linked first-in, first-out queue.
///
/// Elements are [enqueued](Queue::enqueue) at the back and
/// [dequeued](Queue::dequeue) from the front, both in *O*(1) time, and an
/// entire queue may be [appended](Queue::append) onto another in *O*(1) time.
///
/// The queue's chain of nodes always ends in a *placeholder* node which holds
/// no element. Enqueueing stores the new element in the current placeholder
/// and links a fresh placeholder after it; dequeueing pulls the second node's
/// contents forward into the first node and frees the second. Because the
/// placeholder is always there, neither operation has to treat an empty queue,
/// or a queue with a single element, as a special case.
///
/// # Examples
///
/// ```
/// use hyphae::Queue;
///
/// let mut queue = Queue::new();
/// queue.enqueue(1).unwrap();
/// queue.enqueue(2).unwrap();
///
/// assert_eq!(queue.dequeue(), Some(1));
/// assert_eq!(queue.dequeue(), Some(2));
/// assert_eq!(queue.dequeue(), None);
/// assert!(queue.is_empty());
/// ```
pub struct Queue<T> {
    /// The first node. If the queue is empty, this is the placeholder.
    head: NonNull<Node<Option<T>>>,
    /// The placeholder. Always the last node of the chain.
    tail: NonNull<Node<Option<T>>>,
    _owns: PhantomData<T>,
}

// === impl Queue ===

impl<T> Queue<T> {
    /// Returns a new empty queue.
    ///
    /// This allocates the queue's placeholder node. If the allocation fails,
    /// the global [allocation error handler](handle_alloc_error) is invoked;
    /// use [`Queue::try_new`] to handle allocation failure instead.
    #[must_use]
    pub fn new() -> Self {
        match Self::try_new() {
            Ok(queue) => queue,
            Err(_) => handle_alloc_error(Layout::new::<Node<Option<T>>>()),
        }
    }

    /// Returns a new empty queue, or an [`AllocError`] if the queue's
    /// placeholder node could not be allocated.
    pub fn try_new() -> Result<Self, AllocError> {
        let placeholder = Node::alloc(None, None).ok_or(AllocError::new())?;
        Ok(Self {
            head: placeholder,
            tail: placeholder,
            _owns: PhantomData,
        })
    }

    /// Returns `true` if the queue has no elements.
    ///
    /// This is an *O*(1) operation.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.head == self.tail
    }

    /// Returns the number of elements in the queue.
    ///
    /// This is an *O*(n) operation.
    #[must_use]
    pub fn len(&self) -> usize {
        // Safety: the queue owns its chain, which is always acyclic.
        let nodes = unsafe { slist::count(Some(self.head)) };
        nodes - 1
    }

    /// Appends `value` to the back of the queue.
    ///
    /// This is an *O*(1) operation.
    ///
    /// # Errors
    ///
    /// If a new placeholder node could not be allocated, `value` is dropped,
    /// the queue is unchanged, and an [`AllocError`] is returned.
    pub fn enqueue(&mut self, value: T) -> Result<(), AllocError> {
        let node = match Node::alloc(Some(value), None) {
            Some(node) => node,
            None => {
                tracing::debug!("Queue::enqueue -> allocation failed");
                return Err(AllocError::new());
            }
        };
        test_trace!(?node, ?self.tail, "Queue::enqueue");

        unsafe {
            // Safety: `tail` is our placeholder, and `node` is a fresh node.
            // Afterwards the old placeholder holds `value` and `node` holds
            // `None`, so `node` is the new placeholder.
            slist::insert(self.tail, node);
        }
        self.tail = node;
        Ok(())
    }

    /// Removes the element at the front of the queue and returns it, or
    /// `None` if the queue is empty.
    ///
    /// This is an *O*(1) operation.
    pub fn dequeue(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        test_trace!(?self.head, ?self.tail, "Queue::dequeue");

        unsafe {
            // Safety: the queue is not empty, so `head` holds an element and
            // has a successor (at the very least, the placeholder).
            let value = Node::value_mut(self.head).take();
            let removed = slist::remove(self.head);

            // If the placeholder itself was unlinked, its `None` has just been
            // pulled forward into `head`, which takes over as the placeholder.
            if removed == self.tail {
                self.tail = self.head;
            }

            drop(Node::free(removed));
            debug_assert!(value.is_some(), "a non-placeholder node must hold a value");
            value
        }
    }

    /// Returns a reference to the element at the front of the queue, or
    /// `None` if the queue is empty.
    #[must_use]
    pub fn peek(&self) -> Option<&T> {
        // Safety: `head` is owned by the queue, which is borrowed for the
        // lifetime of the returned reference. The placeholder holds `None`.
        unsafe { Node::value(self.head).as_ref() }
    }

    /// Moves every element of `from` onto the back of this queue, leaving
    /// `from` empty.
    ///
    /// This is an *O*(1) operation which does not allocate: this queue's
    /// placeholder is reused to hold `from`'s first element, and the node
    /// that freed up becomes `from`'s new placeholder.
    pub fn append(&mut self, from: &mut Queue<T>) {
        if from.is_empty() {
            return;
        }
        tracing::trace!(
            to.tail = ?self.tail,
            from.head = ?from.head,
            from.tail = ?from.tail,
            "Queue::append",
        );

        unsafe {
            // Safety: both queues own their chains, and we have exclusive
            // access to both. `from` is not empty, so after linking our
            // placeholder to `from.head` the placeholder has a successor for
            // `remove` to pull forward.
            Node::set_next(self.tail, Some(from.head));
            let spare = slist::remove(self.tail);

            // `spare` received our placeholder's `None`, and `remove` cleared
            // its `next` link, so it is a valid lone placeholder.
            debug_assert!(Node::value(spare).is_none());
            self.tail = from.tail;
            from.head = spare;
            from.tail = spare;
        }
    }

    /// Returns an iterator over the elements of the queue, front to back.
    #[must_use]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            curr: self.head,
            tail: self.tail,
            _queue: PhantomData,
        }
    }
}

impl<T> Drop for Queue<T> {
    fn drop(&mut self) {
        unsafe {
            // Safety: the queue owns every node of its chain, placeholder
            // included, and the chain is acyclic.
            slist::free_all(Some(self.head));
        }
    }
}

impl<T> Default for Queue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for Queue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// # Safety
///
/// A `Queue` owns its elements, so moving it to another thread moves them too.
unsafe impl<T: Send> Send for Queue<T> {}

/// # Safety
///
/// Shared access to a `Queue` only permits shared access to its elements.
unsafe impl<T: Sync> Sync for Queue<T> {}

/// Iterates over the elements of a [`Queue`] by reference, front to back.
pub struct Iter<'queue, T> {
    curr: NonNull<Node<Option<T>>>,
    tail: NonNull<Node<Option<T>>>,
    _queue: PhantomData<&'queue T>,
}

impl<'queue, T> Iterator for Iter<'queue, T> {
    type Item = &'queue T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.curr == self.tail {
            return None;
        }

        unsafe {
            // Safety: every node before the placeholder holds a value and has
            // a successor, and the queue is borrowed for `'queue`.
            let value = Node::value(self.curr).as_ref();
            self.curr = Node::next(self.curr)?;
            value
        }
    }
}

impl<T> fmt::Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Iter")
            .field("curr", &self.curr)
            .field("tail", &self.tail)
            .finish()
    }
}
