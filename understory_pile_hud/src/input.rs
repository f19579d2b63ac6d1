// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-frame inputs from the host: pointer state and the external selection.

use alloc::vec::Vec;
use core::hash::{BuildHasher, Hash};

use hashbrown::HashSet;
use kurbo::Point;

/// Pointer state for one frame, in HUD space.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct PointerState {
    /// Pointer position, or `None` when the pointer is not over the HUD.
    pub position: Option<Point>,
    /// Whether the click binding went down this frame.
    pub just_pressed: bool,
}

impl PointerState {
    /// A pointer resting at `position`.
    pub fn at(position: Point) -> Self {
        Self {
            position: Some(position),
            just_pressed: false,
        }
    }

    /// A pointer pressed at `position` this frame.
    pub fn pressed_at(position: Point) -> Self {
        Self {
            position: Some(position),
            just_pressed: true,
        }
    }
}

/// Read-only view of the host's current selection.
///
/// Only used to force highlights on; never mutated by the HUD.
pub trait SelectionLookup<K> {
    /// Whether `id` is selected.
    fn is_selected(&self, id: &K) -> bool;
}

impl<K: PartialEq> SelectionLookup<K> for [K] {
    fn is_selected(&self, id: &K) -> bool {
        self.contains(id)
    }
}

impl<K: PartialEq> SelectionLookup<K> for Vec<K> {
    fn is_selected(&self, id: &K) -> bool {
        self.as_slice().contains(id)
    }
}

impl<K: Eq + Hash, S: BuildHasher> SelectionLookup<K> for HashSet<K, S> {
    fn is_selected(&self, id: &K) -> bool {
        self.contains(id)
    }
}

impl<K, T: SelectionLookup<K> + ?Sized> SelectionLookup<K> for &T {
    fn is_selected(&self, id: &K) -> bool {
        (**self).is_selected(id)
    }
}

/// A selection with nothing in it.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoSelection;

impl<K> SelectionLookup<K> for NoSelection {
    fn is_selected(&self, _id: &K) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn lookups_agree() {
        let list = vec![1_u32, 4, 9];
        let set: HashSet<u32> = list.iter().copied().collect();
        for id in 0..10 {
            let expected = id == 1 || id == 4 || id == 9;
            assert_eq!(list.is_selected(&id), expected);
            assert_eq!(list.as_slice().is_selected(&id), expected);
            assert_eq!(set.is_selected(&id), expected);
            assert!(!NoSelection.is_selected(&id));
        }
    }

    #[test]
    fn default_pointer_is_away() {
        let p = PointerState::default();
        assert_eq!(p.position, None);
        assert!(!p.just_pressed);
        assert!(PointerState::pressed_at(Point::ZERO).just_pressed);
    }
}
