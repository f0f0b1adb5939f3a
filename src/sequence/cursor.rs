use crate::sequence::arena::NodeId;
use crate::{Sequence, SequenceError};

/// A position in a [`Sequence`].
///
/// A `Cursor` is like an iterator, except that it can freely step
/// back-and-forth, and it does not borrow the sequence: it is a plain handle
/// of one node, so it can be kept while the sequence is mutated and then be
/// passed to [`Sequence::insert`] or [`Sequence::erase`]. Reading through a
/// cursor, or moving it, takes the sequence as an argument.
///
/// In a sequence with length *n*, there are *n* + 1 valid positions for the
/// cursor: the *n* elements and the sentinel ([`Sequence::end`]).
///
/// A cursor stays valid as long as its node is alive, whatever happens to
/// the other nodes. Using a cursor whose node has been freed, or a cursor of
/// another sequence, is reported as [`SequenceError::InvalidCursor`], or as
/// `None` by the accessors.
///
/// # Examples
///
/// Here is a simple example showing how the cursors work. (The sentinel of
/// the sequence is denoted by `#`).
/// ```
/// use sentinel_list::{Sequence, SequenceError};
///
/// // Create a sequence: [ A B C D #]
/// let seq = Sequence::from(['A', 'B', 'C', 'D']);
///
/// // Create a cursor at start: [|A B C D #]
/// let mut cursor = seq.begin();
/// assert_eq!(cursor.current(&seq), Some(&'A'));
///
/// // Move cursor forward: [ A|B C D #]
/// assert!(cursor.move_next(&seq).is_ok());
/// assert_eq!(cursor.current(&seq), Some(&'B'));
///
/// // Create a cursor in the end: [ A B C D|#]
/// let mut cursor = seq.end();
/// assert_eq!(cursor.current(&seq), None);
/// assert_eq!(cursor.move_next(&seq), Err(SequenceError::PastEnd));
///
/// // Move cursor backward: [ A B C|D #]
/// assert!(cursor.move_prev(&seq).is_ok());
/// assert_eq!(cursor.current(&seq), Some(&'D'));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cursor {
    /// `None` only for the end of a structurally empty sequence.
    pub(crate) node: Option<NodeId>,
}

impl Cursor {
    pub(crate) fn new(node: Option<NodeId>) -> Self {
        Self { node }
    }

    /// Returns the element at the cursor, or `None` at the sentinel. See
    /// [`Sequence::get`].
    #[inline]
    pub fn current<T>(self, seq: &Sequence<T>) -> Option<&T> {
        seq.get(self)
    }

    /// Returns `true` if the cursor is at the sentinel of `seq`.
    #[inline]
    pub fn is_end<T>(self, seq: &Sequence<T>) -> bool {
        self == seq.end()
    }

    /// Move the cursor to the next position, or return an error when it is
    /// already at the sentinel.
    ///
    /// This operation should compute in *O*(*1*) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::{Sequence, SequenceError};
    ///
    /// let seq = Sequence::from([1, 2]);
    /// let mut cursor = seq.begin();
    ///
    /// assert_eq!(cursor.move_next(&seq), Ok(()));
    /// assert_eq!(cursor.move_next(&seq), Ok(()));
    /// assert_eq!(cursor, seq.end());
    ///
    /// // Forbid to move past the sentinel
    /// assert_eq!(cursor.move_next(&seq), Err(SequenceError::PastEnd));
    /// assert_eq!(cursor, seq.end());
    /// ```
    pub fn move_next<T>(&mut self, seq: &Sequence<T>) -> Result<(), SequenceError> {
        let next = seq
            .node(*self)?
            .and_then(|node| node.next)
            .ok_or(SequenceError::PastEnd)?;
        self.node = Some(next);
        Ok(())
    }

    /// Move the cursor to the previous position, or return an error when it
    /// is already at the first node.
    ///
    /// This operation should compute in *O*(*1*) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::{Sequence, SequenceError};
    ///
    /// let seq = Sequence::from([1, 2]);
    /// let mut cursor = seq.end();
    ///
    /// assert_eq!(cursor.move_prev(&seq), Ok(()));
    /// assert_eq!(cursor.current(&seq), Some(&2));
    /// assert_eq!(cursor.move_prev(&seq), Ok(()));
    ///
    /// // Forbid to move before the first element
    /// assert_eq!(cursor.move_prev(&seq), Err(SequenceError::BeforeBegin));
    /// assert_eq!(cursor.current(&seq), Some(&1));
    /// ```
    pub fn move_prev<T>(&mut self, seq: &Sequence<T>) -> Result<(), SequenceError> {
        let prev = seq
            .node(*self)?
            .and_then(|node| node.prev)
            .ok_or(SequenceError::BeforeBegin)?;
        self.node = Some(prev);
        Ok(())
    }

    /// Returns a cursor at the next position, leaving `self` unchanged, or
    /// `None` if `self` is at the sentinel or invalid.
    #[inline]
    pub fn next<T>(mut self, seq: &Sequence<T>) -> Option<Cursor> {
        self.move_next(seq).ok()?;
        Some(self)
    }

    /// Returns a cursor at the previous position, leaving `self` unchanged,
    /// or `None` if `self` is at the first node or invalid.
    #[inline]
    pub fn prev<T>(mut self, seq: &Sequence<T>) -> Option<Cursor> {
        self.move_prev(seq).ok()?;
        Some(self)
    }
}
