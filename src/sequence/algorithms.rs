use crate::sequence::cursor::Cursor;
use crate::sequence::{Drain, DrainFilter};
use crate::Sequence;
use log::trace;
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

pub mod drain;

impl<T: PartialEq> PartialEq for Sequence<T> {
    fn eq(&self, other: &Self) -> bool {
        self.iter().eq(other)
    }
}

impl<T: Eq> Eq for Sequence<T> {}

impl<T: PartialOrd> PartialOrd for Sequence<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.iter().partial_cmp(other)
    }
}

impl<T: Ord> Ord for Sequence<T> {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.iter().cmp(other)
    }
}

impl<T: Clone> Clone for Sequence<T> {
    fn clone(&self) -> Self {
        self.iter().cloned().collect()
    }

    /// Overwrites the elements of `self` in place, then erases the surplus
    /// or appends the missing ones. Cursors at the overwritten elements stay
    /// valid.
    fn clone_from(&mut self, other: &Self) {
        let mut others = other.iter();
        let mut pos = self.begin();
        while let Some(elem) = self.get_mut(pos) {
            match others.next() {
                Some(elem_other) => elem.clone_from(elem_other),
                None => break,
            }
            match pos.next(self) {
                Some(next) => pos = next,
                None => break,
            }
        }
        while self.get(pos).is_some() {
            pos = self.erase(pos);
        }
        self.extend(others.cloned());
    }
}

impl<T: Hash> Hash for Sequence<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let mut len = 0_usize;
        for elt in self {
            elt.hash(state);
            len += 1;
        }
        len.hash(state);
    }
}

impl<'a, T, U> From<&'a Sequence<U>> for Sequence<T>
where
    T: From<U>,
    U: Clone,
{
    fn from(other: &'a Sequence<U>) -> Self {
        Self::from_sequence(other)
    }
}

impl<T> Sequence<T> {
    /// Creates a sequence by converting a copy of every element of `other`.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::Sequence;
    ///
    /// let small = Sequence::from([1_u8, 2, 3]);
    /// let wide: Sequence<u32> = Sequence::from_sequence(&small);
    /// assert_eq!(wide, Sequence::from([1, 2, 3]));
    /// ```
    pub fn from_sequence<U>(other: &Sequence<U>) -> Self
    where
        T: From<U>,
        U: Clone,
    {
        other.iter().cloned().map(T::from).collect()
    }

    /// Replaces the content of the sequence with the items of `iter`.
    ///
    /// The old nodes are all freed first, so every cursor into the sequence
    /// is invalidated.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::Sequence;
    ///
    /// let mut seq = Sequence::from([1, 2, 3]);
    /// seq.assign(vec![4, 5]);
    /// assert_eq!(seq, Sequence::from([4, 5]));
    /// ```
    pub fn assign<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = T>,
    {
        self.clear();
        self.extend(iter);
        trace!("assign: rebuilt with {} nodes", self.nodes.live());
    }

    /// Replaces the content of the sequence with `n` clones of `value`.
    pub fn assign_n(&mut self, n: usize, value: T)
    where
        T: Clone,
    {
        self.assign(std::iter::repeat(value).take(n));
    }

    /// Replaces the content of the sequence with converted copies of the
    /// elements of `other`.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::Sequence;
    ///
    /// let mut seq: Sequence<f64> = Sequence::from([0.5]);
    /// seq.assign_from(&Sequence::from([1_i32, 2]));
    /// assert_eq!(seq, Sequence::from([1.0, 2.0]));
    /// ```
    pub fn assign_from<U>(&mut self, other: &Sequence<U>)
    where
        T: From<U>,
        U: Clone,
    {
        self.assign(other.iter().cloned().map(T::from));
    }

    /// Returns `true` if the `Sequence` contains an element equal to the
    /// given value.
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
    /// assert_eq!(seq.contains(&0), true);
    /// assert_eq!(seq.contains(&10), false);
    /// ```
    pub fn contains(&self, x: &T) -> bool
    where
        T: PartialEq<T>,
    {
        self.iter().any(|e| e == x)
    }

    /// Resizes the sequence in-place so that its length equals `new_len`.
    ///
    /// If `new_len` is less than the length, the sequence is truncated by
    /// popping elements from the back. Otherwise it is extended at the back
    /// by values returned from calling `f`.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::Sequence;
    ///
    /// let mut seq = Sequence::from([1, 2]);
    /// let mut next = 3;
    /// seq.resize_with(4, || {
    ///     next += 1;
    ///     next - 1
    /// });
    /// assert_eq!(seq, Sequence::from([1, 2, 3, 4]));
    /// ```
    pub fn resize_with<F>(&mut self, new_len: usize, mut f: F)
    where
        F: FnMut() -> T,
    {
        let len = self.len();
        if new_len < len {
            for _ in new_len..len {
                self.pop_back();
            }
        } else {
            for _ in len..new_len {
                self.push_back(f());
            }
        }
        trace!("resize: {} -> {} elements", len, new_len);
    }

    /// Resizes the sequence to `new_len`, appending clones of `value` when it
    /// grows.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::Sequence;
    ///
    /// let mut seq = Sequence::from([1, 2]);
    /// seq.resize(5, 9);
    /// assert_eq!(seq, Sequence::from([1, 2, 9, 9, 9]));
    ///
    /// seq.resize(1, 0);
    /// assert_eq!(seq, Sequence::from([1]));
    /// ```
    pub fn resize(&mut self, new_len: usize, value: T)
    where
        T: Clone,
    {
        self.resize_with(new_len, || value.clone());
    }

    /// Resizes the sequence to `new_len`, appending default values when it
    /// grows.
    pub fn resize_default(&mut self, new_len: usize)
    where
        T: Default,
    {
        self.resize_with(new_len, T::default);
    }

    /// Removes every element equal to `value`, and returns how many were
    /// removed.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::Sequence;
    ///
    /// let mut seq = Sequence::from([2, 2, 1, 2, 3, 2]);
    /// assert_eq!(seq.remove(&2), 4);
    /// assert_eq!(seq, Sequence::from([1, 3]));
    /// ```
    pub fn remove(&mut self, value: &T) -> usize
    where
        T: PartialEq,
    {
        self.remove_if(|elem| elem == value)
    }

    /// Removes every element for which `pred` returns `true`, and returns
    /// how many were removed. Each element is tested exactly once, in order.
    ///
    /// Cursors at the kept elements stay valid.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::Sequence;
    /// use std::iter::FromIterator;
    ///
    /// let mut seq = Sequence::from_iter(1..=6);
    /// assert_eq!(seq.remove_if(|x| x % 2 == 0), 3);
    /// assert_eq!(seq, Sequence::from([1, 3, 5]));
    /// ```
    pub fn remove_if<F>(&mut self, mut pred: F) -> usize
    where
        F: FnMut(&T) -> bool,
    {
        let removed = self.drain_filter(|elem| pred(elem)).count();
        trace!("remove_if: removed {} nodes", removed);
        removed
    }

    /// Removes every element equal to an earlier element, keeping the first
    /// occurrence of each value in its original place. Unlike
    /// [`Vec::dedup`], duplicates need not be consecutive.
    ///
    /// # Complexity
    ///
    /// This operation computes in *O*(*n*<sup>2</sup>) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::Sequence;
    ///
    /// let mut seq = Sequence::from([1, 2, 2, 3, 2]);
    /// assert_eq!(seq.unique(), 2);
    /// assert_eq!(seq, Sequence::from([1, 2, 3]));
    /// ```
    pub fn unique(&mut self) -> usize
    where
        T: PartialEq,
    {
        self.unique_by(|anchor, later| anchor == later)
    }

    /// Like [`unique`](Sequence::unique), but an element is removed when
    /// `same(anchor, later)` returns `true` for some kept earlier element
    /// `anchor`.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::Sequence;
    ///
    /// let mut seq = Sequence::from(["apple", "avocado", "banana", "blueberry", "cherry"]);
    /// seq.unique_by(|a, b| a.as_bytes()[0] == b.as_bytes()[0]);
    /// assert_eq!(seq, Sequence::from(["apple", "banana", "cherry"]));
    /// ```
    pub fn unique_by<F>(&mut self, mut same: F) -> usize
    where
        F: FnMut(&T, &T) -> bool,
    {
        let mut removed = 0;
        let mut anchor = self.head;
        while let Some(anchor_id) = anchor {
            if self.nodes[anchor_id].value.is_none() {
                break;
            }
            let mut later = self.nodes[anchor_id].next;
            while let Some(later_id) = later {
                let next = self.nodes[later_id].next;
                let duplicate = match (
                    self.nodes[anchor_id].value.as_ref(),
                    self.nodes[later_id].value.as_ref(),
                ) {
                    (Some(a), Some(b)) => same(a, b),
                    _ => false,
                };
                if duplicate {
                    self.detach_node(later_id);
                    removed += 1;
                }
                later = next;
            }
            anchor = self.nodes[anchor_id].next;
        }
        trace!("unique: removed {} nodes", removed);
        removed
    }

    /// Removes all elements from the sequence in bulk, returning them as an
    /// iterator. When the iterator is dropped, the remaining elements are
    /// dropped too and the sequence is left structurally empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::Sequence;
    ///
    /// let mut seq = Sequence::from([1, 2, 3]);
    /// let drained: Vec<_> = seq.drain().collect();
    /// assert_eq!(drained, vec![1, 2, 3]);
    /// assert!(!seq.is_materialized());
    /// ```
    pub fn drain(&mut self) -> Drain<'_, T> {
        Drain::new(self)
    }

    /// Creates an iterator which uses a closure to determine if an element
    /// should be removed.
    ///
    /// If the closure returns true, the element is removed and yielded.
    /// If the closure returns false, the element remains in the sequence
    /// and will not be yielded by the iterator.
    ///
    /// Dropping the iterator removes the rest of the matching elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::Sequence;
    ///
    /// let mut numbers = Sequence::from([1, 2, 3, 4, 5, 6, 8, 9, 11, 13, 14, 15]);
    ///
    /// let evens: Vec<_> = numbers.drain_filter(|x| *x % 2 == 0).collect();
    /// let odds: Vec<_> = numbers.into_iter().collect();
    ///
    /// assert_eq!(evens, vec![2, 4, 6, 8, 14]);
    /// assert_eq!(odds, vec![1, 3, 5, 9, 11, 13, 15]);
    /// ```
    pub fn drain_filter<F>(&mut self, filter: F) -> DrainFilter<'_, T, F>
    where
        F: FnMut(&mut T) -> bool,
    {
        DrainFilter::new(self, filter)
    }

    /// Returns a cursor at the first element equal to `x`, or
    /// [`end`](Sequence::end) if there is none.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::Sequence;
    ///
    /// let seq = Sequence::from(['a', 'b', 'c']);
    /// assert_eq!(seq.find(&'b'), seq.cursor(1));
    /// assert_eq!(seq.find(&'z'), seq.end());
    /// ```
    pub fn find(&self, x: &T) -> Cursor
    where
        T: PartialEq,
    {
        let mut pos = self.begin();
        while let Some(elem) = self.get(pos) {
            if elem == x {
                break;
            }
            match pos.next(self) {
                Some(next) => pos = next,
                None => break,
            }
        }
        pos
    }
}
