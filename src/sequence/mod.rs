use std::fmt::{Debug, Formatter};
use std::iter::FromIterator;
use std::ops::{Index, IndexMut};

use log::trace;

use crate::sequence::arena::{Arena, NodeId};
use crate::sequence::cursor::Cursor;
use crate::{IntoIter, Iter, IterMut, SequenceError};

pub mod cursor;
pub mod iterator;

mod algorithms;
mod arena;

#[cfg(test)]
mod laws;

pub use algorithms::drain::{Drain, DrainFilter};

/// The `Sequence` is a doubly-linked list terminated by a sentinel node.
/// It allows inserting and erasing elements at any cursor in constant time.
/// In compromise, accessing elements by index takes *O*(*n*) time.
///
/// The `Sequence` contains:
/// - an arena owning every node of the chain;
/// - `head`, the first node of the chain (the sentinel if there are no
///   elements);
/// - `sentinel`, the trailing node without payload that [`end`] aliases;
/// - a length field `len`, only with the `length` feature enabled in your
///   `Cargo.toml`:
/// ```text
/// [dependencies]
/// sentinel_list = { features = ["length"] }
/// ```
///
/// A freshly created sequence has no chain at all: both `head` and
/// `sentinel` are absent. This is the *structurally empty* state, which
/// [`clear`] returns to. The chain (and its sentinel) is materialized by the
/// first insertion.
///
/// # Naming Conventions
///
/// - `from..to`: a half-open range of nodes, left inclusive and right
///   exclusive (probably the sentinel).
///
/// [`end`]: Sequence::end
/// [`clear`]: Sequence::clear
pub struct Sequence<T> {
    pub(crate) nodes: Arena<T>,
    pub(crate) head: Option<NodeId>,
    pub(crate) sentinel: Option<NodeId>,
    #[cfg(feature = "length")]
    /// the length of the sequence
    pub(crate) len: usize,
}

/// A storage cell of the chain. The sentinel is the only node with
/// `value == None`.
#[derive(Debug)]
pub(crate) struct Node<T> {
    pub(crate) value: Option<T>,
    pub(crate) next: Option<NodeId>,
    pub(crate) prev: Option<NodeId>,
}

impl<T> Node<T> {
    pub(crate) fn new(value: Option<T>) -> Self {
        Self {
            value,
            next: None,
            prev: None,
        }
    }
}

// private methods
impl<T> Sequence<T> {
    /// Return the sentinel, allocating the chain first if the sequence is
    /// structurally empty.
    pub(crate) fn materialize(&mut self) -> NodeId {
        if let Some(sentinel) = self.sentinel {
            return sentinel;
        }
        let sentinel = self.nodes.alloc(Node::new(None));
        self.head = Some(sentinel);
        self.sentinel = Some(sentinel);
        sentinel
    }

    /// Link `prev -> next`. A missing `prev` makes `next` the head.
    pub(crate) fn connect(&mut self, prev: Option<NodeId>, next: NodeId) {
        self.nodes[next].prev = prev;
        match prev {
            Some(prev) => self.nodes[prev].next = Some(next),
            None => self.head = Some(next),
        }
    }

    /// Allocate a node holding `value` and link it right before `next`.
    pub(crate) fn attach_node(&mut self, next: NodeId, value: T) -> NodeId {
        let prev = self.nodes[next].prev;
        #[cfg(debug_assertions)]
        self.assert_adjacent(prev, next);
        let node = self.nodes.alloc(Node::new(Some(value)));
        self.connect(prev, node);
        self.connect(Some(node), next);
        #[cfg(feature = "length")]
        {
            self.len += 1;
        }
        node
    }

    /// Unlink the element node `node`, free it and return its value.
    ///
    /// `node` must be a live element node of this sequence (not the
    /// sentinel).
    pub(crate) fn detach_node(&mut self, node: NodeId) -> T {
        let Node { value, next, prev } = self
            .nodes
            .free(node)
            .expect("dangling node link");
        let next = next.expect("element node without successor");
        self.connect(prev, next);
        #[cfg(feature = "length")]
        {
            self.len -= 1;
        }
        value.expect("element node without value")
    }

    /// Resolve `pos` to a node. `Ok(None)` is the end of a structurally
    /// empty sequence.
    pub(crate) fn node(&self, pos: Cursor) -> Result<Option<&Node<T>>, SequenceError> {
        match pos.node {
            Some(id) => self
                .nodes
                .get(id)
                .map(Some)
                .ok_or(SequenceError::InvalidCursor),
            None if self.head.is_none() => Ok(None),
            None => Err(SequenceError::InvalidCursor),
        }
    }

    /// Resolve `pos` to an element node, rejecting the sentinel.
    pub(crate) fn element_node(&self, pos: Cursor) -> Result<NodeId, SequenceError> {
        match (self.node(pos)?, pos.node) {
            (Some(node), Some(id)) if node.value.is_some() => Ok(id),
            _ => Err(SequenceError::Sentinel),
        }
    }

    /// Resolve `pos` to a node that may be inserted before. `Ok(None)`
    /// means the chain must be materialized first.
    pub(crate) fn insert_position(&self, pos: Cursor) -> Result<Option<NodeId>, SequenceError> {
        self.node(pos)?;
        Ok(pos.node)
    }

    #[cfg(debug_assertions)]
    fn assert_adjacent(&self, prev: Option<NodeId>, next: NodeId) {
        match prev {
            Some(prev) => assert_eq!(self.nodes[prev].next, Some(next)),
            None => assert_eq!(self.head, Some(next)),
        }
    }
}

impl<T> Sequence<T> {
    /// Create a structurally empty `Sequence`.
    ///
    /// # Examples
    /// ```
    /// use sentinel_list::Sequence;
    /// let seq: Sequence<u32> = Sequence::new();
    /// assert!(!seq.is_materialized());
    /// ```
    #[inline]
    pub const fn new() -> Self {
        Self {
            nodes: Arena::new(),
            head: None,
            sentinel: None,
            #[cfg(feature = "length")]
            len: 0,
        }
    }

    /// Create a sequence of `n` default values.
    ///
    /// # Examples
    /// ```
    /// use sentinel_list::Sequence;
    ///
    /// let seq: Sequence<i32> = Sequence::with_len(3);
    /// assert_eq!(seq, Sequence::from([0, 0, 0]));
    /// ```
    pub fn with_len(n: usize) -> Self
    where
        T: Default,
    {
        (0..n).map(|_| T::default()).collect()
    }

    /// Create a sequence of `n` clones of `value`.
    ///
    /// # Examples
    /// ```
    /// use sentinel_list::Sequence;
    ///
    /// let seq = Sequence::with_value(2, "ab");
    /// assert_eq!(seq, Sequence::from(["ab", "ab"]));
    /// ```
    pub fn with_value(n: usize, value: T) -> Self
    where
        T: Clone,
    {
        std::iter::repeat(value).take(n).collect()
    }

    /// Returns `true` if the `Sequence` holds no element.
    ///
    /// A sequence popped down to zero elements keeps its sentinel, so it is
    /// empty but still [materialized](Sequence::is_materialized).
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::Sequence;
    ///
    /// let mut seq = Sequence::new();
    /// assert!(seq.is_empty());
    ///
    /// seq.push_front("foo");
    /// assert!(!seq.is_empty());
    /// ```
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.head == self.sentinel
    }

    /// Returns `true` if the chain exists, i.e. the sequence is not
    /// structurally empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::Sequence;
    ///
    /// let mut seq = Sequence::new();
    /// assert!(!seq.is_materialized());
    ///
    /// seq.push_back(1);
    /// seq.pop_back();
    /// assert!(seq.is_empty());
    /// assert!(seq.is_materialized());
    ///
    /// seq.clear();
    /// assert!(!seq.is_materialized());
    /// ```
    #[inline]
    pub fn is_materialized(&self) -> bool {
        self.head.is_some()
    }

    /// Returns the length of the `Sequence`.
    ///
    /// # Complexity
    ///
    /// This operation computes in *O*(*n*) time by walking from [`begin`]
    /// to [`end`], or in *O*(1) time with the `length` feature.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::Sequence;
    ///
    /// let mut seq = Sequence::new();
    ///
    /// seq.push_front(2);
    /// assert_eq!(seq.len(), 1);
    ///
    /// seq.push_front(1);
    /// assert_eq!(seq.len(), 2);
    ///
    /// seq.push_back(3);
    /// assert_eq!(seq.len(), 3);
    /// ```
    ///
    /// [`begin`]: Sequence::begin
    /// [`end`]: Sequence::end
    #[cfg(feature = "length")]
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns the length of the `Sequence`.
    ///
    /// # Complexity
    ///
    /// This operation computes in *O*(*n*) time by walking from [`begin`]
    /// to [`end`], or in *O*(1) time with the `length` feature.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::Sequence;
    ///
    /// let mut seq = Sequence::new();
    ///
    /// seq.push_front(2);
    /// assert_eq!(seq.len(), 1);
    ///
    /// seq.push_front(1);
    /// assert_eq!(seq.len(), 2);
    ///
    /// seq.push_back(3);
    /// assert_eq!(seq.len(), 3);
    /// ```
    ///
    /// [`begin`]: Sequence::begin
    /// [`end`]: Sequence::end
    #[cfg(not(feature = "length"))]
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Removes all elements and the sentinel from the `Sequence`, leaving it
    /// structurally empty. Every cursor into the sequence is invalidated.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::Sequence;
    ///
    /// let mut seq = Sequence::new();
    ///
    /// seq.push_front(2);
    /// seq.push_front(1);
    /// assert_eq!(seq.len(), 2);
    /// assert_eq!(seq.front(), Some(&1));
    ///
    /// seq.clear();
    /// assert_eq!(seq.len(), 0);
    /// assert_eq!(seq.front(), None);
    /// assert!(!seq.is_materialized());
    /// ```
    pub fn clear(&mut self) {
        if self.head.is_some() {
            trace!("clear: freeing {} nodes", self.nodes.live());
        }
        self.nodes.clear();
        self.head = None;
        self.sentinel = None;
        #[cfg(feature = "length")]
        {
            self.len = 0;
        }
    }

    /// Swaps the contents (and cursors' owner) of two sequences in *O*(1).
    ///
    /// Cursors keep referring to the nodes they referred to, so after the
    /// swap they are used with the other sequence.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::Sequence;
    ///
    /// let mut a = Sequence::from([1, 2]);
    /// let mut b = Sequence::from([3]);
    /// a.swap(&mut b);
    /// assert_eq!(a, Sequence::from([3]));
    /// assert_eq!(b, Sequence::from([1, 2]));
    /// ```
    #[inline]
    pub fn swap(&mut self, other: &mut Self) {
        std::mem::swap(self, other);
    }

    /// Provides a reference to the front element, or `None` if the sequence
    /// is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::Sequence;
    ///
    /// let mut seq = Sequence::new();
    /// assert_eq!(seq.front(), None);
    ///
    /// seq.push_front(1);
    /// assert_eq!(seq.front(), Some(&1));
    /// ```
    #[inline]
    pub fn front(&self) -> Option<&T> {
        self.get(self.begin())
    }

    /// Provides a mutable reference to the front element, or `None` if the
    /// sequence is empty.
    #[inline]
    pub fn front_mut(&mut self) -> Option<&mut T> {
        self.get_mut(self.begin())
    }

    /// Provides a reference to the back element, or `None` if the sequence
    /// is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::Sequence;
    ///
    /// let mut seq = Sequence::new();
    /// assert_eq!(seq.back(), None);
    ///
    /// seq.push_back(1);
    /// seq.push_back(2);
    /// assert_eq!(seq.back(), Some(&2));
    /// ```
    #[inline]
    pub fn back(&self) -> Option<&T> {
        self.get(self.end().prev(self)?)
    }

    /// Provides a mutable reference to the back element, or `None` if the
    /// sequence is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::Sequence;
    ///
    /// let mut seq = Sequence::from([1, 2]);
    /// if let Some(x) = seq.back_mut() {
    ///     *x = 5;
    /// }
    /// assert_eq!(seq.back(), Some(&5));
    /// ```
    #[inline]
    pub fn back_mut(&mut self) -> Option<&mut T> {
        let last = self.end().prev(self)?;
        self.get_mut(last)
    }

    /// Adds an element first in the sequence.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::Sequence;
    ///
    /// let mut seq = Sequence::new();
    ///
    /// seq.push_front(2);
    /// assert_eq!(seq.front().unwrap(), &2);
    ///
    /// seq.push_front(1);
    /// assert_eq!(seq.front().unwrap(), &1);
    /// ```
    pub fn push_front(&mut self, elt: T) {
        let head = match self.head {
            Some(head) => head,
            None => self.materialize(),
        };
        self.attach_node(head, elt);
    }

    /// Removes the first element and returns it, or `None` if the sequence
    /// is empty.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::Sequence;
    ///
    /// let mut seq = Sequence::new();
    /// assert_eq!(seq.pop_front(), None);
    ///
    /// seq.push_front(1);
    /// seq.push_front(3);
    /// assert_eq!(seq.pop_front(), Some(3));
    /// assert_eq!(seq.pop_front(), Some(1));
    /// assert_eq!(seq.pop_front(), None);
    /// ```
    pub fn pop_front(&mut self) -> Option<T> {
        let head = self.element_node(self.begin()).ok()?;
        Some(self.detach_node(head))
    }

    /// Appends an element to the back of the sequence. The sentinel stays in
    /// place, so cursors at [`end`](Sequence::end) remain valid.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::Sequence;
    ///
    /// let mut seq = Sequence::new();
    /// seq.push_back(1);
    /// seq.push_back(3);
    /// assert_eq!(seq.back().unwrap(), &3);
    /// ```
    pub fn push_back(&mut self, elt: T) {
        let sentinel = self.materialize();
        self.attach_node(sentinel, elt);
    }

    /// Removes the last element from the sequence and returns it, or `None`
    /// if it is empty.
    ///
    /// The node of the removed element is recycled as the new sentinel and
    /// the old sentinel is freed. Hence a cursor at the removed element
    /// becomes equal to [`end`], and cursors at the old end are invalidated.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::Sequence;
    ///
    /// let mut seq = Sequence::new();
    /// assert_eq!(seq.pop_back(), None);
    /// seq.push_back(1);
    /// seq.push_back(3);
    ///
    /// let last = seq.cursor(1);
    /// assert_eq!(seq.pop_back(), Some(3));
    /// assert_eq!(last, seq.end());
    /// ```
    ///
    /// [`end`]: Sequence::end
    pub fn pop_back(&mut self) -> Option<T> {
        let sentinel = self.sentinel?;
        let last = self.nodes[sentinel].prev?;
        self.nodes.free(sentinel);
        let node = &mut self.nodes[last];
        node.next = None;
        let value = node.value.take();
        self.sentinel = Some(last);
        #[cfg(feature = "length")]
        {
            self.len -= 1;
        }
        trace!("pop_back: recycled node {} as sentinel", last.index());
        value
    }

    /// Provides a cursor at the first node: the first element, or the
    /// sentinel if the sequence is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::Sequence;
    ///
    /// let seq = Sequence::from([1, 2, 3]);
    /// assert_eq!(seq.begin().current(&seq), Some(&1));
    ///
    /// let empty: Sequence<i32> = Sequence::new();
    /// assert_eq!(empty.begin(), empty.end());
    /// ```
    #[inline]
    pub fn begin(&self) -> Cursor {
        Cursor::new(self.head)
    }

    /// Provides a cursor at the sentinel.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::Sequence;
    ///
    /// let seq = Sequence::from([1, 2, 3]);
    /// let end = seq.end();
    /// assert_eq!(end.current(&seq), None);
    /// assert_eq!(end.prev(&seq).and_then(|c| c.current(&seq)), Some(&3));
    /// ```
    #[inline]
    pub fn end(&self) -> Cursor {
        Cursor::new(self.sentinel)
    }

    /// Provides a cursor at the node with given index.
    ///
    /// By convention, the cursor is at the sentinel if `at == len`.
    ///
    /// # Panics
    ///
    /// Panics if `at > len`
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::Sequence;
    ///
    /// let seq = Sequence::from([1, 2, 3]);
    /// assert_eq!(seq[seq.cursor(1)], 2);
    /// assert_eq!(seq.cursor(3), seq.end());
    /// ```
    pub fn cursor(&self, at: usize) -> Cursor {
        let mut cursor = self.begin();
        for _ in 0..at {
            cursor
                .move_next(self)
                .expect("Cannot create cursor at a nonexistent index");
        }
        cursor
    }

    /// Returns a reference to the element at `pos`, or `None` if `pos` is at
    /// the sentinel or its node has been freed.
    #[inline]
    pub fn get(&self, pos: Cursor) -> Option<&T> {
        self.nodes.get(pos.node?)?.value.as_ref()
    }

    /// Returns a mutable reference to the element at `pos`, or `None` if
    /// `pos` is at the sentinel or its node has been freed.
    #[inline]
    pub fn get_mut(&mut self, pos: Cursor) -> Option<&mut T> {
        self.nodes.get_mut(pos.node?)?.value.as_mut()
    }

    /// Provides a forward iterator.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::Sequence;
    ///
    /// let mut seq = Sequence::new();
    ///
    /// seq.push_back(0);
    /// seq.push_back(1);
    /// seq.push_back(2);
    ///
    /// let mut iter = seq.iter();
    /// assert_eq!(iter.next(), Some(&0));
    /// assert_eq!(iter.next(), Some(&1));
    /// assert_eq!(iter.next(), Some(&2));
    /// assert_eq!(iter.next(), None);
    /// ```
    #[inline]
    #[allow(clippy::let_and_return)]
    pub fn iter(&self) -> Iter<'_, T> {
        let iter = Iter::new(self, self.begin(), self.end());
        #[cfg(feature = "length")]
        let iter = iter.with_len(self.len);
        iter
    }

    /// Provides a forward iterator over the half-open range `from..to`.
    ///
    /// `from` should not come after `to`. If it does, iterating forward
    /// yields `from` up to the last element, and iterating backward yields
    /// the elements before `to` down to the first one. Mixing both ends on
    /// such a range yields unspecified elements, but always terminates.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::Sequence;
    ///
    /// let seq = Sequence::from([1, 2, 3, 4]);
    /// let range: Vec<_> = seq.range(seq.cursor(1), seq.cursor(3)).collect();
    /// assert_eq!(range, vec![&2, &3]);
    /// ```
    #[inline]
    pub fn range(&self, from: Cursor, to: Cursor) -> Iter<'_, T> {
        Iter::new(self, from, to)
    }

    /// Provides a forward iterator with mutable references.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::Sequence;
    ///
    /// let mut seq = Sequence::from([0, 1, 2]);
    ///
    /// for element in seq.iter_mut() {
    ///     *element += 10;
    /// }
    ///
    /// let mut iter = seq.iter();
    /// assert_eq!(iter.next(), Some(&10));
    /// assert_eq!(iter.next(), Some(&11));
    /// assert_eq!(iter.next(), Some(&12));
    /// assert_eq!(iter.next(), None);
    /// ```
    #[inline]
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut::new(self)
    }

    /// Inserts `value` before `pos` and returns a cursor at it.
    ///
    /// Inserting at [`begin`](Sequence::begin) makes `value` the new front.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Panics
    ///
    /// Panics if `pos` does not reference a live node of this sequence.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::Sequence;
    ///
    /// let mut seq = Sequence::from([1, 3]);
    /// let pos = seq.insert(seq.cursor(1), 2);
    /// assert_eq!(seq[pos], 2);
    /// assert_eq!(seq, Sequence::from([1, 2, 3]));
    /// ```
    pub fn insert(&mut self, pos: Cursor, value: T) -> Cursor {
        self.try_insert_iter(pos, Some(value))
            .expect("Cannot insert at an invalid cursor")
    }

    /// Inserts every item of `iter`, in order, before `pos` and returns a
    /// cursor at the first inserted element, or `pos` if `iter` is empty.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*k*) time, where *k* is the
    /// number of inserted elements.
    ///
    /// # Panics
    ///
    /// Panics if `pos` does not reference a live node of this sequence.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::Sequence;
    ///
    /// let mut seq = Sequence::from([1, 5]);
    /// let pos = seq.insert_iter(seq.cursor(1), vec![2, 3, 4]);
    /// assert_eq!(seq[pos], 2);
    /// assert_eq!(seq, Sequence::from([1, 2, 3, 4, 5]));
    /// ```
    pub fn insert_iter<I>(&mut self, pos: Cursor, iter: I) -> Cursor
    where
        I: IntoIterator<Item = T>,
    {
        self.try_insert_iter(pos, iter)
            .expect("Cannot insert at an invalid cursor")
    }

    /// Inserts `n` clones of `value` before `pos`. See
    /// [`insert_iter`](Sequence::insert_iter).
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::Sequence;
    ///
    /// let mut seq = Sequence::from([1, 2]);
    /// seq.insert_n(seq.begin(), 2, 0);
    /// assert_eq!(seq, Sequence::from([0, 0, 1, 2]));
    /// ```
    pub fn insert_n(&mut self, pos: Cursor, n: usize, value: T) -> Cursor
    where
        T: Clone,
    {
        self.insert_iter(pos, std::iter::repeat(value).take(n))
    }

    /// Like [`insert_iter`](Sequence::insert_iter), but returns an error
    /// instead of panicking on an invalid cursor.
    ///
    /// Inserting at [`end`](Sequence::end) of a structurally empty sequence
    /// materializes the chain.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::{Sequence, SequenceError};
    ///
    /// let mut seq = Sequence::from([1, 2]);
    /// let stale = seq.begin();
    /// seq.pop_front();
    /// assert_eq!(
    ///     seq.try_insert_iter(stale, vec![0]),
    ///     Err(SequenceError::InvalidCursor)
    /// );
    /// ```
    pub fn try_insert_iter<I>(&mut self, pos: Cursor, iter: I) -> Result<Cursor, SequenceError>
    where
        I: IntoIterator<Item = T>,
    {
        let anchor = self.insert_position(pos)?;
        let mut first = None;
        for value in iter {
            let next = match anchor {
                Some(next) => next,
                None => self.materialize(),
            };
            let node = self.attach_node(next, value);
            first.get_or_insert(node);
        }
        Ok(first.map_or(pos, |node| Cursor::new(Some(node))))
    }

    /// Converts `args` into an element and inserts it before `pos`.
    ///
    /// # Panics
    ///
    /// Panics if `pos` does not reference a live node of this sequence.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::Sequence;
    ///
    /// let mut seq: Sequence<String> = Sequence::new();
    /// let pos = seq.emplace(seq.end(), "hello");
    /// assert_eq!(seq[pos], "hello");
    /// ```
    pub fn emplace<A>(&mut self, pos: Cursor, args: A) -> Cursor
    where
        A: Into<T>,
    {
        let value = args.into();
        self.insert(pos, value)
    }

    /// Converts `args` into an element and appends it.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::Sequence;
    ///
    /// let mut seq: Sequence<(i32, char)> = Sequence::new();
    /// seq.emplace_back((1, 'a'));
    /// assert_eq!(seq.back(), Some(&(1, 'a')));
    /// ```
    pub fn emplace_back<A>(&mut self, args: A)
    where
        A: Into<T>,
    {
        let value = args.into();
        self.push_back(value);
    }

    /// Converts `args` into an element and prepends it.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::Sequence;
    ///
    /// let mut seq: Sequence<i64> = Sequence::from([2]);
    /// seq.emplace_front(1_i32);
    /// assert_eq!(seq.front(), Some(&1));
    /// ```
    pub fn emplace_front<A>(&mut self, args: A)
    where
        A: Into<T>,
    {
        let value = args.into();
        self.push_front(value);
    }

    /// Erases the element at `pos` and returns a cursor at its former
    /// successor (possibly the sentinel).
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is at the sentinel or does not reference a live node
    /// of this sequence.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::Sequence;
    ///
    /// let mut seq = Sequence::from([1, 2, 3]);
    /// let next = seq.erase(seq.cursor(1));
    /// assert_eq!(seq[next], 3);
    /// assert_eq!(seq, Sequence::from([1, 3]));
    ///
    /// let next = seq.erase(seq.begin());
    /// assert_eq!(next, seq.begin());
    /// ```
    pub fn erase(&mut self, pos: Cursor) -> Cursor {
        let (_, next) = self
            .try_erase(pos)
            .expect("Cannot erase at an invalid cursor");
        next
    }

    /// Like [`erase`](Sequence::erase), but returns the erased element along
    /// with the cursor, or an error instead of panicking.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::{Sequence, SequenceError};
    ///
    /// let mut seq = Sequence::from([1, 2]);
    /// let (value, next) = seq.try_erase(seq.begin()).unwrap();
    /// assert_eq!(value, 1);
    /// assert_eq!(seq[next], 2);
    /// assert_eq!(seq.try_erase(seq.end()), Err(SequenceError::Sentinel));
    /// ```
    pub fn try_erase(&mut self, pos: Cursor) -> Result<(T, Cursor), SequenceError> {
        let node = self.element_node(pos)?;
        let next = self.nodes[node].next;
        let value = self.detach_node(node);
        Ok((value, Cursor::new(next)))
    }
}

/// Dereference a cursor.
///
/// # Panics
///
/// Panics if `pos` is at the sentinel or its node has been freed.
impl<T> Index<Cursor> for Sequence<T> {
    type Output = T;

    fn index(&self, pos: Cursor) -> &T {
        self.get(pos)
            .expect("Cannot dereference a cursor without element")
    }
}

impl<T> IndexMut<Cursor> for Sequence<T> {
    fn index_mut(&mut self, pos: Cursor) -> &mut T {
        self.get_mut(pos)
            .expect("Cannot dereference a cursor without element")
    }
}

impl<T: Debug> Debug for Sequence<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> Default for Sequence<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const N: usize> From<[T; N]> for Sequence<T> {
    fn from(array: [T; N]) -> Self {
        Self::from_iter(array)
    }
}

impl<T> From<Vec<T>> for Sequence<T> {
    fn from(vec: Vec<T>) -> Self {
        Self::from_iter(vec)
    }
}

// Ensure that `Sequence` and its read-only iterators are covariant in their type parameters.
#[allow(dead_code)]
fn assert_covariance() {
    fn a<'a>(x: Sequence<&'static str>) -> Sequence<&'a str> {
        x
    }
    fn b<'i, 'a>(x: Iter<'i, &'static str>) -> Iter<'i, &'a str> {
        x
    }
    fn c<'a>(x: IntoIter<&'static str>) -> IntoIter<&'a str> {
        x
    }
}

#[cfg(test)]
mod tests {
    use crate::{Sequence, SequenceError};
    use std::cell::RefCell;
    use std::iter::FromIterator;

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    #[test]
    fn sequence_create() {
        let mut seq = Sequence::<i32>::new();
        assert!(seq.is_empty());
        assert!(!seq.is_materialized());
        assert_eq!(seq.begin(), seq.end());
        seq.push_back(1);
        assert!(!seq.is_empty());
        assert!(seq.is_materialized());
        assert_eq!(seq.pop_back(), Some(1));
        assert!(seq.is_empty());
    }

    #[test]
    fn sequence_drop() {
        #[derive(Debug)]
        struct DropChecker<'a, T: Copy> {
            value: T,
            dropped: &'a RefCell<Vec<T>>,
        }
        impl<'a, T: Copy> DropChecker<'a, T> {
            fn new(value: T, dropped: &'a RefCell<Vec<T>>) -> Self {
                Self { value, dropped }
            }
        }
        impl<'a, T: Copy> Drop for DropChecker<'a, T> {
            fn drop(&mut self) {
                self.dropped.borrow_mut().push(self.value);
            }
        }
        let dropped = RefCell::new(Vec::<i32>::new());
        let mut seq = Sequence::new();
        seq.push_back(DropChecker::new(1, &dropped));
        seq.push_back(DropChecker::new(2, &dropped));
        seq.push_back(DropChecker::new(3, &dropped));
        seq.erase(seq.cursor(1));
        assert_eq!(dropped.borrow().as_slice(), &[2]);
        seq.clear();
        assert_eq!(dropped.borrow().as_slice(), &[2, 1, 3]);
        seq.push_back(DropChecker::new(4, &dropped));
        drop(seq);
        assert_eq!(dropped.borrow().as_slice(), &[2, 1, 3, 4]);
    }

    #[test]
    fn sequence_constructors() {
        let seq: Sequence<i32> = Sequence::with_len(3);
        assert_eq!(Vec::from_iter(seq.iter().copied()), vec![0, 0, 0]);

        let seq = Sequence::with_value(2, 'x');
        assert_eq!(Vec::from_iter(seq.iter().copied()), vec!['x', 'x']);

        let seq = Sequence::from(vec![1, 2, 3]);
        assert_eq!(Vec::from_iter(seq.iter().copied()), vec![1, 2, 3]);

        let seq: Sequence<i32> = Sequence::with_len(0);
        assert!(!seq.is_materialized());
        let seq = Sequence::with_value(0, 1);
        assert!(!seq.is_materialized());
    }

    #[test]
    fn sequence_push_and_pop() {
        let mut seq = Sequence::new();
        assert!(seq.is_empty());
        assert_eq!(seq.len(), 0);

        assert_eq!(seq.front(), None);
        assert_eq!(seq.back(), None);
        assert_eq!(seq.pop_front(), None);
        assert_eq!(seq.pop_back(), None);

        seq.push_back(1);
        assert_eq!(seq.back(), Some(&1));
        assert_eq!(seq.pop_front(), Some(1));
        assert_eq!(seq.pop_back(), None);
        assert!(seq.is_empty());
        assert_eq!(seq.len(), 0);

        seq.push_front(1);
        seq.push_front(2);
        seq.push_back(3);
        assert_eq!(seq.back(), Some(&3));
        assert_eq!(seq.front(), Some(&2));
        assert_eq!(seq.pop_front(), Some(2));
        assert_eq!(seq.pop_back(), Some(3));

        assert_eq!(seq.front(), Some(&1));
        assert_eq!(seq.pop_front(), Some(1));
        assert_eq!(seq.front(), None);
        assert_eq!(seq.back(), None);
        assert!(seq.is_empty());
        assert_eq!(seq.len(), 0);
    }

    #[test]
    fn sequence_popped_down_state() {
        init_logger();
        let mut seq = Sequence::from([1, 2]);
        assert_eq!(seq.pop_back(), Some(2));
        assert_eq!(seq.pop_back(), Some(1));
        assert!(seq.is_empty());
        assert!(seq.is_materialized());
        assert_eq!(seq.begin(), seq.end());
        assert_eq!(seq.front(), None);
        assert_eq!(seq.back(), None);
        seq.remove(&1);
        seq.unique();
        assert_eq!(seq.len(), 0);

        seq.push_front(3);
        seq.push_back(4);
        assert_eq!(Vec::from_iter(seq.iter().copied()), vec![3, 4]);

        seq.clear();
        assert!(!seq.is_materialized());
        seq.clear();
        assert!(!seq.is_materialized());
        assert_eq!(seq.len(), 0);
    }

    #[test]
    fn sequence_pop_back_recycles_node() {
        let mut seq = Sequence::from([1, 2, 3]);
        let mut old_end = seq.end();
        let last = seq.cursor(2);
        assert_eq!(seq.pop_back(), Some(3));
        assert_eq!(seq.end(), last);
        assert_eq!(seq.get(last), None);
        assert_eq!(old_end.move_next(&seq).err(), Some(SequenceError::InvalidCursor));

        // the end cursor survives `push_back`
        let end = seq.end();
        seq.push_back(4);
        assert_eq!(seq.end(), end);
        assert_eq!(seq.back(), Some(&4));
    }

    #[test]
    fn sequence_insert_and_erase() {
        fn seq_eq<I>(seq: &Sequence<i32>, expected: I)
        where
            I: IntoIterator<Item = i32>,
        {
            assert_eq!(
                Vec::from_iter(seq.iter().copied()),
                Vec::from_iter(expected)
            );
        }

        let mut seq = Sequence::from_iter(0..10);
        let pos = seq.insert(seq.cursor(5), 10);
        assert_eq!(seq[pos], 10);
        seq_eq(&seq, (0..5).chain(Some(10)).chain(5..10));

        let next = seq.erase(seq.cursor(10));
        assert_eq!(next, seq.end());
        assert_eq!(seq.back(), Some(&8));
        seq_eq(&seq, (0..5).chain(Some(10)).chain(5..9));

        let pos = seq.insert(seq.begin(), 11);
        assert_eq!(pos, seq.begin());
        assert_eq!(seq.front(), Some(&11));

        let next = seq.erase(seq.begin());
        assert_eq!(next, seq.begin());
        assert_eq!(seq.front(), Some(&0));
        seq_eq(&seq, (0..5).chain(Some(10)).chain(5..9));

        seq.insert(seq.end(), 12);
        assert_eq!(seq.back(), Some(&12));
        seq_eq(&seq, (0..5).chain(Some(10)).chain(5..9).chain(Some(12)));
    }

    #[test]
    fn sequence_insert_variants() {
        let mut seq = Sequence::new();
        let pos = seq.insert_iter(seq.end(), Vec::new());
        assert_eq!(pos, seq.end());
        assert!(!seq.is_materialized());

        let pos = seq.insert_iter(seq.end(), vec![3, 4]);
        assert_eq!(pos, seq.begin());
        assert_eq!(seq.front(), Some(&3));

        let pos = seq.insert_n(seq.begin(), 2, 1);
        assert_eq!(pos, seq.begin());
        let pos = seq.insert_iter(seq.cursor(2), [2]);
        assert_eq!(seq[pos], 2);
        assert_eq!(Vec::from_iter(seq.iter().copied()), vec![1, 1, 2, 3, 4]);

        let end = seq.end();
        assert_eq!(seq.insert_iter(end, None), end);
    }

    #[test]
    fn sequence_cursors_survive_unrelated_edits() {
        let mut seq = Sequence::from(['a', 'b', 'c', 'd']);
        let b = seq.cursor(1);
        let d = seq.cursor(3);
        seq.erase(seq.cursor(2));
        seq.insert(d, 'x');
        seq.push_front('z');
        seq.pop_back();
        assert_eq!(seq[b], 'b');
        assert_eq!(b.next(&seq).map(|c| seq[c]), Some('x'));
        assert_eq!(d, seq.end());
    }

    #[test]
    fn sequence_invalid_cursors() {
        let mut seq = Sequence::from([1, 2, 3]);
        let first = seq.begin();
        seq.erase(first);
        assert_eq!(seq.get(first), None);
        assert_eq!(seq.try_erase(first), Err(SequenceError::InvalidCursor));
        assert_eq!(
            seq.try_insert_iter(first, Some(0)),
            Err(SequenceError::InvalidCursor)
        );
        assert_eq!(seq.try_erase(seq.end()), Err(SequenceError::Sentinel));

        let mut empty: Sequence<i32> = Sequence::new();
        assert_eq!(empty.try_erase(empty.end()), Err(SequenceError::Sentinel));
        // a null cursor is only the end of a structurally empty sequence
        assert_eq!(
            seq.try_insert_iter(empty.end(), Some(0)),
            Err(SequenceError::InvalidCursor)
        );
        assert!(empty.try_insert_iter(empty.end(), Some(0)).is_ok());
        assert_eq!(empty.front(), Some(&0));
    }

    #[test]
    fn sequence_rejects_foreign_cursors() {
        let a = Sequence::from([1, 2, 3]);
        let mut b = Sequence::from([10, 20, 30]);
        let foreign = a.cursor(1);
        assert_eq!(b.get(foreign), None);
        assert_eq!(b.try_erase(foreign), Err(SequenceError::InvalidCursor));
        assert_eq!(
            b.try_insert_iter(foreign, Some(0)),
            Err(SequenceError::InvalidCursor)
        );
        assert_eq!(b.try_erase(a.end()), Err(SequenceError::InvalidCursor));
        assert_eq!(Vec::from_iter(b.iter().copied()), vec![10, 20, 30]);
        assert_eq!(a[foreign], 2);
    }

    #[test]
    fn sequence_releases_nodes() {
        init_logger();
        let mut seq = Sequence::from_iter(0..1000);
        assert_eq!(seq.nodes.slot_count(), 1001);
        seq.clear();
        assert_eq!(seq.nodes.slot_count(), 0);
        seq.push_back(1);
        assert_eq!(seq.nodes.slot_count(), 2);

        let mut seq = Sequence::from_iter(0..1000);
        while seq.pop_front().is_some() {}
        assert_eq!(seq.nodes.slot_count(), 1);
        assert!(seq.is_materialized());
        assert_eq!(seq.begin(), seq.end());

        let mut seq = Sequence::from_iter(0..1000);
        while seq.pop_back().is_some() {}
        assert_eq!(seq.nodes.slot_count(), 2);
        seq.push_back(7);
        assert_eq!(Vec::from_iter(seq.iter().copied()), vec![7]);
    }

    #[test]
    #[should_panic(expected = "Cannot erase at an invalid cursor")]
    fn sequence_erase_sentinel() {
        let mut seq = Sequence::from([1]);
        seq.erase(seq.end());
    }

    #[test]
    #[should_panic(expected = "Cannot dereference a cursor without element")]
    fn sequence_index_sentinel() {
        let seq = Sequence::from([1]);
        let _ = seq[seq.end()];
    }

    #[test]
    #[should_panic(expected = "Cannot create cursor at a nonexistent index")]
    fn sequence_cursor_out_of_bounds() {
        let seq = Sequence::from([1]);
        seq.cursor(2);
    }

    #[test]
    fn sequence_emplace() {
        let mut seq: Sequence<String> = Sequence::new();
        seq.emplace_back("b");
        seq.emplace_front("a");
        let pos = seq.emplace(seq.end(), String::from("c"));
        assert_eq!(seq[pos], "c");
        assert_eq!(
            Vec::from_iter(seq.iter().map(String::as_str)),
            vec!["a", "b", "c"]
        );
    }

    #[test]
    fn sequence_move_and_swap() {
        let mut a = Sequence::from([1, 2, 3]);
        let cursor = a.cursor(1);
        let b = std::mem::take(&mut a);
        assert!(!a.is_materialized());
        assert_eq!(a.begin(), a.end());
        assert_eq!(Vec::from_iter(b.iter().copied()), vec![1, 2, 3]);
        // cursors follow the moved chain
        assert_eq!(b[cursor], 2);

        let mut c = Sequence::from([9]);
        let mut b = b;
        b.swap(&mut c);
        assert_eq!(Vec::from_iter(b.iter().copied()), vec![9]);
        assert_eq!(c[cursor], 2);
    }

    #[test]
    fn sequence_front_back_mut() {
        let mut seq = Sequence::from([1, 2, 3]);
        *seq.front_mut().unwrap() = 10;
        *seq.back_mut().unwrap() = 30;
        let mid = seq.cursor(1);
        seq[mid] = 20;
        assert_eq!(Vec::from_iter(seq.iter().copied()), vec![10, 20, 30]);
    }

    #[cfg(feature = "length")]
    #[test]
    fn sequence_len() {
        let mut seq = Sequence::new();
        assert_eq!(seq.len(), 0);

        seq.push_back(1);
        assert_eq!(seq.len(), 1);

        seq.pop_front();
        assert_eq!(seq.len(), 0);

        seq.insert_iter(seq.end(), 0..5);
        assert_eq!(seq.len(), 5);

        seq.erase(seq.cursor(3));
        assert_eq!(seq.len(), 4);

        seq.pop_back();
        assert_eq!(seq.len(), 3);

        seq.clear();
        assert_eq!(seq.len(), 0);
    }
}
