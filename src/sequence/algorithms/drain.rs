use crate::sequence::cursor::Cursor;
use crate::Sequence;
use std::fmt;

/// A draining iterator over the elements of a `Sequence`.
///
/// This `struct` is created by [`Sequence::drain`].
pub struct Drain<'a, T: 'a> {
    seq: &'a mut Sequence<T>,
}

impl<'a, T: 'a> Drain<'a, T> {
    pub(crate) fn new(seq: &'a mut Sequence<T>) -> Self {
        Self { seq }
    }
}

impl<T> Iterator for Drain<'_, T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.seq.pop_front()
    }
}

impl<T> DoubleEndedIterator for Drain<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.seq.pop_back()
    }
}

impl<T> Drop for Drain<'_, T> {
    fn drop(&mut self) {
        self.seq.clear();
    }
}

impl<T: fmt::Debug> fmt::Debug for Drain<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Drain").field(&*self.seq).finish()
    }
}

/// An iterator which uses a closure to determine if an element should be
/// removed.
///
/// This `struct` is created by [`Sequence::drain_filter`].
pub struct DrainFilter<'a, T: 'a, F: 'a>
where
    F: FnMut(&mut T) -> bool,
{
    seq: &'a mut Sequence<T>,
    cursor: Cursor,
    filter: F,
}

impl<'a, T, F> DrainFilter<'a, T, F>
where
    F: FnMut(&mut T) -> bool,
{
    pub(crate) fn new(seq: &'a mut Sequence<T>, filter: F) -> Self {
        let cursor = seq.begin();
        Self {
            seq,
            cursor,
            filter,
        }
    }
}

impl<T, F> Iterator for DrainFilter<'_, T, F>
where
    F: FnMut(&mut T) -> bool,
{
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if (self.filter)(self.seq.get_mut(self.cursor)?) {
                // continue from the successor, so it is tested exactly once
                let (value, next) = self.seq.try_erase(self.cursor).ok()?;
                self.cursor = next;
                return Some(value);
            }
            self.cursor = self.cursor.next(&*self.seq)?;
        }
    }
}

impl<T, F> Drop for DrainFilter<'_, T, F>
where
    F: FnMut(&mut T) -> bool,
{
    fn drop(&mut self) {
        self.for_each(drop);
    }
}

impl<T: fmt::Debug, F> fmt::Debug for DrainFilter<'_, T, F>
where
    F: FnMut(&mut T) -> bool,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("DrainFilter").field(&*self.seq).finish()
    }
}
