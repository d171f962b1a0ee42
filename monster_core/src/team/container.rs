//! Backing structures for the three team disciplines
//!
//! Capacity is enforced by `MonsterTeam` before anything is pushed here.

use super::SortKey;
use crate::monster::Monster;
use tracing::trace;

#[derive(Debug, Clone)]
pub(crate) enum Container {
    /// Last added is first retrieved
    Stack(Vec<Monster>),
    /// First added is first retrieved, over a fixed circular buffer
    Ring(Ring),
    /// Highest key first (lowest after `special`)
    Priority(PriorityList),
}

impl Container {
    pub(crate) fn len(&self) -> usize {
        match self {
            Container::Stack(stack) => stack.len(),
            Container::Ring(ring) => ring.len,
            Container::Priority(list) => list.entries.len(),
        }
    }

    pub(crate) fn push(&mut self, monster: Monster) {
        match self {
            Container::Stack(stack) => stack.push(monster),
            Container::Ring(ring) => ring.append(monster),
            Container::Priority(list) => list.insert(monster),
        }
    }

    pub(crate) fn pop(&mut self) -> Option<Monster> {
        match self {
            Container::Stack(stack) => stack.pop(),
            Container::Ring(ring) => ring.serve(),
            Container::Priority(list) => list.pop_head(),
        }
    }

    pub(crate) fn special(&mut self) {
        match self {
            Container::Stack(stack) => {
                // Popping then pushing in pop order inverts the top three
                let count = stack.len().min(3);
                let top: Vec<Monster> = (0..count).filter_map(|_| stack.pop()).collect();
                stack.extend(top);
            }
            Container::Ring(ring) => ring.swap_halves(),
            Container::Priority(list) => list.flip(),
        }
        trace!(len = self.len(), "special");
    }

    /// Members in the order they would be retrieved
    pub(crate) fn members(&self) -> Vec<&Monster> {
        match self {
            Container::Stack(stack) => stack.iter().rev().collect(),
            Container::Ring(ring) => ring.iter().collect(),
            Container::Priority(list) => list.entries.iter().map(|(_, m)| m).collect(),
        }
    }
}

/// Fixed-size circular buffer with independent read and write cursors
#[derive(Debug, Clone)]
pub(crate) struct Ring {
    slots: Vec<Option<Monster>>,
    front: usize,
    rear: usize,
    len: usize,
}

impl Ring {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Ring {
            slots: vec![None; capacity],
            front: 0,
            rear: 0,
            len: 0,
        }
    }

    fn append(&mut self, monster: Monster) {
        debug_assert!(self.len < self.slots.len(), "ring buffer overflow");
        self.slots[self.rear] = Some(monster);
        self.rear = (self.rear + 1) % self.slots.len();
        self.len += 1;
    }

    fn serve(&mut self) -> Option<Monster> {
        if self.len == 0 {
            return None;
        }
        let monster = self.slots[self.front].take();
        self.front = (self.front + 1) % self.slots.len();
        self.len -= 1;
        monster
    }

    fn iter(&self) -> impl Iterator<Item = &Monster> {
        (0..self.len).filter_map(move |i| self.slots[(self.front + i) % self.slots.len()].as_ref())
    }

    /// Front half keeps its order and moves to the back; back half is
    /// reversed and moved to the front. With an odd count the back half is
    /// the larger one.
    fn swap_halves(&mut self) {
        let front_count = self.len / 2;
        let front_half: Vec<Monster> = (0..front_count).filter_map(|_| self.serve()).collect();
        let mut back_half: Vec<Monster> = std::iter::from_fn(|| self.serve()).collect();
        back_half.reverse();
        for monster in back_half.into_iter().chain(front_half) {
            self.append(monster);
        }
    }
}

/// Sorted list keyed at insertion time; ties keep insertion order
#[derive(Debug, Clone)]
pub(crate) struct PriorityList {
    entries: Vec<(u32, Monster)>,
    key: SortKey,
    descending: bool,
}

impl PriorityList {
    pub(crate) fn new(key: SortKey) -> Self {
        PriorityList {
            entries: Vec::new(),
            key,
            descending: true,
        }
    }

    fn insert(&mut self, monster: Monster) {
        let value = self.key.value(&monster);
        let descending = self.descending;
        let position = self
            .entries
            .iter()
            .position(|(existing, _)| {
                if descending {
                    *existing < value
                } else {
                    *existing > value
                }
            })
            .unwrap_or(self.entries.len());
        self.entries.insert(position, (value, monster));
    }

    fn pop_head(&mut self) -> Option<Monster> {
        if self.entries.is_empty() {
            None
        } else {
            Some(self.entries.remove(0).1)
        }
    }

    /// Reverse the direction; equal keys stay in insertion order
    fn flip(&mut self) {
        self.descending = !self.descending;
        if self.descending {
            self.entries.sort_by(|(a, _), (b, _)| b.cmp(a));
        } else {
            self.entries.sort_by_key(|(value, _)| *value);
        }
    }
}
