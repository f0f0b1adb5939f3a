//! This crate provides a doubly-linked sequence with owned nodes, terminated
//! by a sentinel node.
//!
//! The [`Sequence`] allows inserting, removing elements at any given
//! [`Cursor`] in constant time. In compromise, accessing or mutating elements
//! at any index take *O*(*n*) time.
//!
//! Here is a quick example showing how the sequence works.
//!
//! ```
//! use sentinel_list::Sequence;
//!
//! let mut seq = Sequence::from([1, 2, 3, 4]);
//!
//! let pos = seq.insert(seq.begin(), 0); // insert 0 at the beginning
//! assert_eq!(seq[pos], 0);
//! assert_eq!(seq, Sequence::from([0, 1, 2, 3, 4]));
//!
//! let next = seq.erase(seq.cursor(3)); // erase the node at index 3
//! assert_eq!(seq[next], 4);
//! assert_eq!(seq, Sequence::from([0, 1, 2, 4]));
//!
//! seq.push_front(5);
//! assert_eq!(seq, Sequence::from([5, 0, 1, 2, 4]));
//!
//! // the cursors are not invalidated by the unrelated edits
//! assert_eq!(seq[pos], 0);
//! assert_eq!(seq[next], 4);
//! ```
//!
//! # Memory Layout
//!
//! The memory layout of the sequence is like the following graph:
//! ```text
//!    ╔═══════════╗           ╔═══════════╗                        ┌───────────┐
//!    ║   next    ║ ────────→ ║   next    ║ ────────→ ┄┄ ────────→ │   next    │ ─→ None
//!    ╟───────────╢           ╟───────────╢     Node 2, 3, ...     ├───────────┤
//! ┌─ ║   prev    ║ ←──────── ║   prev    ║ ←──────── ┄┄ ←──────── │   prev    │
//! │  ╟───────────╢           ╟───────────╢                        ├───────────┤
//! │  ║ payload T ║           ║ payload T ║                        ┊No payload ┊
//! │  ╚═══════════╝           ╚═══════════╝                        └╌╌╌╌╌╌╌╌╌╌╌┘
//! ↓      Node 0  ↑               Node 1                          (Sentinel) Node N
//! None           │                                                    ↑
//! ╔═══════════╗  │                                                    │
//! ║   head    ║ ─┘                                                    │
//! ╟───────────╢                                                       │
//! ║ sentinel  ║ ──────────────────────────────────────────────────────┘
//! ╟───────────╢
//! ║   nodes   ║ (the arena owning Node 0 ..= Node N)
//! ╟───────────╢
//! ║   (len)   ║
//! ╚═══════════╝
//!    Sequence
//! ```
//! The `Sequence` contains:
//! - `head`, the id of the first node;
//! - `sentinel`, the id of the trailing node without payload;
//! - `nodes`, an arena of slots that owns every node. A node is addressed by
//!   its slot index, the generation of that slot and the token of the arena;
//! - a length field `len`, only with the `length` feature enabled in your
//!   `Cargo.toml`:
//! ```text
//! [dependencies]
//! sentinel_list = { features = ["length"] }
//! ```
//!
//! Each node of the sequence `Sequence<T>` contains:
//! - the `next` link to the next node (or `None` for the sentinel);
//! - the `prev` link to the previous node (or `None` for the first node);
//! - the actual payload `T`, except the sentinel.
//!
//! A new sequence is *structurally empty*: it has no node at all, and both
//! `head` and `sentinel` are `None`. The first insertion allocates the
//! sentinel along with the element. A sequence whose elements are all removed
//! one by one keeps its sentinel; [`Sequence::clear`] frees it as well.
//!
//! In convention, in a sequence with length *n*, the nodes are indexed by 0,
//! 1, ..., *n* - 1, and the sentinel is always indexed by *n*.
//!
//! # Cursors
//!
//! A [`Cursor`] is a copyable handle of one node. It does not borrow the
//! sequence, so it is kept across mutations and stays valid until its own
//! node is removed. Freed slots get a new generation, so a cursor at a
//! removed node is detected ([`SequenceError::InvalidCursor`]) instead of
//! silently reading whatever node reuses the slot. Every arena carries a
//! token of its own as well, so a cursor of another sequence is rejected
//! the same way.
//!
//! ```
//! use sentinel_list::{Sequence, SequenceError};
//!
//! let mut seq = Sequence::from(['a', 'b', 'c']);
//! let mut cursor = seq.cursor(1);
//! seq.erase(cursor);
//!
//! assert_eq!(seq.get(cursor), None);
//! assert_eq!(cursor.move_next(&seq), Err(SequenceError::InvalidCursor));
//! ```
//!
//! # Iteration
//!
//! Iterating over a sequence is by the [`Iter`] and [`IterMut`] iterators.
//! These are double-ended iterators and iterate the sequence like an array.
//! [`IterMut`] provides mutability of the elements (but not the linked
//! structure of the sequence).
//!
//! ## Examples
//!
//! ```
//! use sentinel_list::Sequence;
//! use std::iter::FromIterator;
//!
//! let mut seq = Sequence::from([1, 2, 3]);
//! let mut iter = seq.iter();
//! assert_eq!(iter.next(), Some(&1));
//! assert_eq!(iter.next(), Some(&2));
//! assert_eq!(iter.next(), Some(&3));
//! assert_eq!(iter.next(), None);
//! assert_eq!(iter.next(), None); // Fused
//!
//! seq.iter_mut().for_each(|item| *item *= 2);
//! assert_eq!(Vec::from_iter(seq), vec![2, 4, 6]);
//! ```
//!
//! # Algorithms
//!
//! - [`remove`] and [`remove_if`]: erase every matching element;
//! - [`unique`]: keep only the first occurrence of every value;
//! - [`resize`]: truncate from, or extend at, the back;
//! - [`assign`]: replace the whole content.
//!
//! [`remove`]: Sequence::remove
//! [`remove_if`]: Sequence::remove_if
//! [`unique`]: Sequence::unique
//! [`resize`]: Sequence::resize
//! [`assign`]: Sequence::assign

#[doc(inline)]
pub use error::SequenceError;
#[doc(inline)]
pub use sequence::cursor::Cursor;
#[doc(inline)]
pub use sequence::iterator::{IntoIter, Iter, IterMut};
#[doc(inline)]
pub use sequence::{Drain, DrainFilter, Sequence};

pub mod sequence;

mod error;
