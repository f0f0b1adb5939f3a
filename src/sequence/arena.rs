//! Slot storage for the nodes of a [`Sequence`].
//!
//! Every node of a sequence lives in one slot of an `Arena`. Nodes are
//! addressed by [`NodeId`], which pairs the slot index with the slot's
//! generation and the token of the arena. Freeing a slot bumps its
//! generation, so an id that outlived its node never resolves to whatever
//! node reuses the slot later. The token tells apart the ids of different
//! arenas.
//!
//! Free slots at the end of the slot vector are released as soon as they
//! appear, and [`Arena::clear`] releases the whole vector.
//!
//! [`Sequence`]: crate::Sequence
use std::ops;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::sequence::Node;

static NEXT_TOKEN: AtomicUsize = AtomicUsize::new(1);

/// A (possibly stale) reference to a node slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct NodeId {
    token: usize,
    index: usize,
    generation: u32,
}

#[derive(Debug)]
enum Entry<T> {
    Used(Node<T>),

    /// This slot is free. Links its neighbours in the free list.
    Free {
        prev: Option<usize>,
        next: Option<usize>,
    },
}

#[derive(Debug)]
struct Slot<T> {
    generation: u32,
    entry: Entry<T>,
}

#[derive(Debug)]
pub(crate) struct Arena<T> {
    slots: Vec<Slot<T>>,
    first_free: Option<usize>,
    /// The generation of a slot pushed at the end. It is above the
    /// generation of every released slot.
    base_generation: u32,
    /// `0` until the first allocation after creation or release.
    token: usize,
    live: usize,
}

impl<T> Entry<T> {
    fn as_ref(&self) -> Option<&Node<T>> {
        match self {
            Entry::Used(node) => Some(node),
            Entry::Free { .. } => None,
        }
    }
    fn as_mut(&mut self) -> Option<&mut Node<T>> {
        match self {
            Entry::Used(node) => Some(node),
            Entry::Free { .. } => None,
        }
    }
}

impl<T> Arena<T> {
    pub(crate) const fn new() -> Self {
        Self {
            slots: Vec::new(),
            first_free: None,
            base_generation: 0,
            token: 0,
            live: 0,
        }
    }

    /// Store `node` in a free slot (or a new one) and return its id.
    pub(crate) fn alloc(&mut self, node: Node<T>) -> NodeId {
        if self.token == 0 {
            self.token = NEXT_TOKEN.fetch_add(1, Ordering::Relaxed);
        }
        self.live += 1;
        match self.first_free {
            Some(index) => {
                self.unlink_free(index);
                let slot = &mut self.slots[index];
                slot.entry = Entry::Used(node);
                NodeId {
                    token: self.token,
                    index,
                    generation: slot.generation,
                }
            }
            None => {
                let index = self.slots.len();
                self.slots.push(Slot {
                    generation: self.base_generation,
                    entry: Entry::Used(node),
                });
                NodeId {
                    token: self.token,
                    index,
                    generation: self.base_generation,
                }
            }
        }
    }

    /// Free the slot of `id` and return the node it held, or `None` if `id`
    /// is stale or foreign.
    pub(crate) fn free(&mut self, id: NodeId) -> Option<Node<T>> {
        self.get(id)?;
        let first_free = self.first_free;
        let slot = &mut self.slots[id.index];
        let entry = std::mem::replace(
            &mut slot.entry,
            Entry::Free {
                prev: None,
                next: first_free,
            },
        );
        let node = match entry {
            Entry::Used(node) => node,
            Entry::Free { .. } => unreachable!("live id points to a free slot"),
        };
        slot.generation = slot.generation.wrapping_add(1);
        if let Some(next) = first_free {
            self.set_free_prev(next, Some(id.index));
        }
        self.first_free = Some(id.index);
        self.live -= 1;
        self.release_free_tail();
        Some(node)
    }

    pub(crate) fn get(&self, id: NodeId) -> Option<&Node<T>> {
        if id.token != self.token {
            return None;
        }
        let slot = self.slots.get(id.index)?;
        if slot.generation != id.generation {
            return None;
        }
        slot.entry.as_ref()
    }

    pub(crate) fn get_mut(&mut self, id: NodeId) -> Option<&mut Node<T>> {
        if id.token != self.token {
            return None;
        }
        let slot = self.slots.get_mut(id.index)?;
        if slot.generation != id.generation {
            return None;
        }
        slot.entry.as_mut()
    }

    /// Number of live nodes, the sentinel included.
    pub(crate) fn live(&self) -> usize {
        self.live
    }

    /// Mutable references to the values of all live nodes, indexed by
    /// slot. Used to hand out disjoint `&mut T` in chain order.
    pub(crate) fn values_mut(&mut self) -> Vec<Option<&mut T>> {
        self.slots
            .iter_mut()
            .map(|slot| {
                slot.entry
                    .as_mut()
                    .and_then(|node| node.value.as_mut())
            })
            .collect()
    }

    /// Drop every node, in slot order, and release the slot vector. The
    /// arena takes a new token on its next allocation, so ids handed out
    /// before the call stay detectably stale.
    pub(crate) fn clear(&mut self) {
        self.slots = Vec::new();
        self.first_free = None;
        self.base_generation = 0;
        self.token = 0;
        self.live = 0;
    }

    #[cfg(test)]
    pub(crate) fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Pop the free slots at the end of the slot vector.
    fn release_free_tail(&mut self) {
        while let Some(slot) = self.slots.last() {
            if let Entry::Used(_) = slot.entry {
                break;
            }
            let generation = slot.generation;
            let index = self.slots.len() - 1;
            self.unlink_free(index);
            self.slots.pop();
            self.base_generation = self.base_generation.max(generation);
        }
        if self.slots.is_empty() {
            self.clear();
        } else if self.slots.len() < self.slots.capacity() / 4 {
            self.slots.shrink_to_fit();
        }
    }

    fn unlink_free(&mut self, index: usize) {
        let (prev, next) = match self.slots[index].entry {
            Entry::Free { prev, next } => (prev, next),
            Entry::Used(_) => unreachable!("free list points to a used slot"),
        };
        match prev {
            Some(prev) => self.set_free_next(prev, next),
            None => self.first_free = next,
        }
        if let Some(next) = next {
            self.set_free_prev(next, prev);
        }
    }

    fn set_free_prev(&mut self, index: usize, link: Option<usize>) {
        if let Entry::Free { prev, .. } = &mut self.slots[index].entry {
            *prev = link;
        }
    }

    fn set_free_next(&mut self, index: usize, link: Option<usize>) {
        if let Entry::Free { next, .. } = &mut self.slots[index].entry {
            *next = link;
        }
    }
}

impl NodeId {
    pub(crate) fn index(self) -> usize {
        self.index
    }
}

/// Follows a link that the chain invariants guarantee to be live.
///
/// # Panics
///
/// Panics if `id` is stale, which means the chain is ill-formed.
impl<T> ops::Index<NodeId> for Arena<T> {
    type Output = Node<T>;

    fn index(&self, id: NodeId) -> &Node<T> {
        self.get(id).expect("dangling node link")
    }
}

impl<T> ops::IndexMut<NodeId> for Arena<T> {
    fn index_mut(&mut self, id: NodeId) -> &mut Node<T> {
        self.get_mut(id).expect("dangling node link")
    }
}
