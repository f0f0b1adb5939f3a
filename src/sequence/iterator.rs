use crate::sequence::arena::NodeId;
use crate::sequence::cursor::Cursor;
use crate::Sequence;
use std::fmt;
use std::iter::{FromIterator, FusedIterator};

/// An iterator over the elements of a `Sequence`.
///
/// It uses a pair of nodes `start..end` to represent a half-open subrange
/// of the sequence, where `start` is inclusive and `end` is not.
///
/// With the `length` feature, the iterator returned by [`Sequence::iter`]
/// knows its exact length, and a subrange is bounded by the length of the
/// sequence.
///
/// # Examples
///
/// ```compile_fail
/// use sentinel_list::Sequence;
///
/// let mut seq = Sequence::from([1, 2, 3]);
/// let mut iter = seq.iter();
///
/// // Won't compile, because seq is already borrowed immutably.
/// seq.push_back(4);
/// println!("{:?}", iter.next());
/// ```
pub struct Iter<'a, T: 'a> {
    seq: &'a Sequence<T>,
    start: Option<NodeId>,
    end: Option<NodeId>,
    /// the number of elements left, when `start..end` spans the sequence
    #[cfg(feature = "length")]
    remaining: Option<usize>,
}

impl<'a, T: 'a> Iter<'a, T> {
    pub(crate) fn new(seq: &'a Sequence<T>, start: Cursor, end: Cursor) -> Self {
        Self {
            seq,
            start: start.node,
            end: end.node,
            #[cfg(feature = "length")]
            remaining: None,
        }
    }

    #[cfg(feature = "length")]
    pub(crate) fn with_len(self, len: usize) -> Self {
        Self {
            remaining: Some(len),
            ..self
        }
    }

    #[cfg(feature = "length")]
    fn took_one(&mut self) {
        if let Some(remaining) = &mut self.remaining {
            *remaining -= 1;
        }
    }

    #[cfg(not(feature = "length"))]
    fn took_one(&mut self) {}
}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            seq: self.seq,
            start: self.start,
            end: self.end,
            #[cfg(feature = "length")]
            remaining: self.remaining,
        }
    }
}

impl<'a, T: fmt::Debug + 'a> fmt::Debug for Iter<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Iter")
            .field(&self.clone().collect::<Vec<_>>())
            .finish()
    }
}

impl<'a, T: 'a> Iterator for Iter<'a, T> {
    type Item = &'a T;

    /// Return `*start` and reset the iterating range to `(start.next)..end`,
    /// or return `None` if `start..end` is already empty.
    fn next(&mut self) -> Option<Self::Item> {
        if self.start == self.end {
            return None;
        }
        let seq = self.seq;
        let current = seq.nodes.get(self.start?)?;
        match current.value.as_ref() {
            Some(value) => {
                self.start = current.next;
                self.took_one();
                Some(value)
            }
            None => {
                // `start` ran into the sentinel before meeting `end`.
                self.start = self.end;
                None
            }
        }
    }

    #[cfg(feature = "length")]
    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.remaining {
            Some(remaining) => (remaining, Some(remaining)),
            None if self.start == self.end => (0, Some(0)),
            None => (0, Some(self.seq.len)),
        }
    }

    fn last(mut self) -> Option<Self::Item>
    where
        Self: Sized,
    {
        self.next_back()
    }
}

impl<'a, T: 'a> DoubleEndedIterator for Iter<'a, T> {
    /// Reset the iterating range to `start..(end.prev)` and return `*end`,
    /// or return `None` if `start..end` is already empty.
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.start == self.end {
            return None;
        }
        let seq = self.seq;
        let prev = seq.nodes.get(self.end?)?.prev?;
        self.end = Some(prev);
        let value = seq.nodes.get(prev)?.value.as_ref()?;
        self.took_one();
        Some(value)
    }
}

impl<'a, T: 'a> FusedIterator for Iter<'a, T> {}

/// A mutable iterator over the elements of a `Sequence`.
///
/// The references are collected in chain order when the iterator is
/// created, so the iterator is double-ended and knows its length.
///
/// # Examples
///
/// `Sequence` is not readable after an `IterMut` is created.
/// ```compile_fail
/// use sentinel_list::Sequence;
///
/// let mut seq = Sequence::from([1, 2, 3]);
/// let mut iter = seq.iter_mut();
/// println!("{:?}", seq.back());
/// println!("{:?}", iter.next());
/// ```
pub struct IterMut<'a, T: 'a> {
    inner: std::vec::IntoIter<&'a mut T>,
}

impl<'a, T: 'a> IterMut<'a, T> {
    pub(crate) fn new(seq: &'a mut Sequence<T>) -> Self {
        let mut order = Vec::new();
        let mut current = seq.head;
        while let Some(id) = current {
            let node = &seq.nodes[id];
            if node.value.is_none() {
                break;
            }
            order.push(id.index());
            current = node.next;
        }
        let mut values = seq.nodes.values_mut();
        let inner = order
            .into_iter()
            .filter_map(|index| values[index].take())
            .collect::<Vec<_>>()
            .into_iter();
        Self { inner }
    }
}

impl<'a, T: fmt::Debug + 'a> fmt::Debug for IterMut<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IterMut")
            .field(&self.inner.as_slice())
            .finish()
    }
}

impl<'a, T: 'a> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }

    fn last(mut self) -> Option<Self::Item>
    where
        Self: Sized,
    {
        self.next_back()
    }
}

impl<'a, T: 'a> DoubleEndedIterator for IterMut<'a, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl<'a, T: 'a> ExactSizeIterator for IterMut<'a, T> {}

impl<'a, T: 'a> FusedIterator for IterMut<'a, T> {}

/// An owning iterator over the elements of a `Sequence`.
///
/// This `struct` is created by the [`into_iter`] method on [`Sequence`]
/// (provided by the `IntoIterator` trait). See its documentation for more.
///
/// [`into_iter`]: Sequence::into_iter
pub struct IntoIter<T> {
    seq: Sequence<T>,
}

impl<T: fmt::Debug> fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntoIter").field("seq", &self.seq).finish()
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.seq.pop_front()
    }

    #[cfg(feature = "length")]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.seq.len;
        (len, Some(len))
    }

    fn last(mut self) -> Option<Self::Item>
    where
        Self: Sized,
    {
        self.next_back()
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.seq.pop_back()
    }
}

#[cfg(feature = "length")]
impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

impl<T> IntoIterator for Sequence<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter { seq: self }
    }
}

impl<'a, T> IntoIterator for &'a Sequence<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut Sequence<T> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<T> FromIterator<T> for Sequence<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut seq = Sequence::new();
        seq.extend(iter);
        seq
    }
}

impl<T> Extend<T> for Sequence<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        iter.into_iter().for_each(|item| self.push_back(item));
    }
}

impl<'a, T: 'a + Copy> Extend<&'a T> for Sequence<T> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied())
    }
}
