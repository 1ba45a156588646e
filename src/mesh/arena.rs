// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Slot arena backing each element kind of a [`Mesh`](super::Mesh).
//!
//! Ids are slot indices. Removing an element frees its slot without
//! compacting, so the live ids of a kind may be non-contiguous.

/// Identifier of a mesh element, unique within its kind.
pub type CellId = u32;

#[derive(Debug, Clone)]
pub struct SlotArena<T> {
    slots: Vec<Option<T>>,
    live: usize,
}

impl<T> Default for SlotArena<T> {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            live: 0,
        }
    }
}

impl<T> SlotArena<T> {
    /// Store a value in a fresh slot at the end of the arena.
    pub fn insert(&mut self, value: T) -> CellId {
        let id = self.slots.len() as CellId;
        self.slots.push(Some(value));
        self.live += 1;
        id
    }

    pub fn remove(&mut self, id: CellId) -> Option<T> {
        let value = self.slots.get_mut(id as usize)?.take();
        if value.is_some() {
            self.live -= 1;
        }
        value
    }

    #[inline]
    pub fn get(&self, id: CellId) -> Option<&T> {
        self.slots.get(id as usize)?.as_ref()
    }

    /// Number of live elements.
    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// One past the largest id ever handed out.
    pub fn id_bound(&self) -> usize {
        self.slots.len()
    }

    /// Live elements in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = (CellId, &T)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|v| (i as CellId, v)))
    }

    pub fn ids(&self) -> impl Iterator<Item = CellId> + '_ {
        self.iter().map(|(id, _)| id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remove_leaves_hole() {
        let mut arena = SlotArena::default();
        let a = arena.insert('a');
        let b = arena.insert('b');
        let c = arena.insert('c');
        assert_eq!((a, b, c), (0, 1, 2));

        assert_eq!(arena.remove(b), Some('b'));
        assert_eq!(arena.remove(b), None);
        assert_eq!(arena.len(), 2);
        assert_eq!(arena.id_bound(), 3);
        assert_eq!(arena.ids().collect::<Vec<_>>(), vec![0, 2]);
        assert!(arena.get(1).is_none());

        // New elements never reuse a freed slot.
        assert_eq!(arena.insert('d'), 3);
    }
}
