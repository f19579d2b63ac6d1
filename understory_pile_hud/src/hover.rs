// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hover transitions for tooltip handling.
//!
//! The hovered element is described by a short path: the container (a pile panel or a
//! stack) followed by the member button, if any. [`HoverState::update_path`] diffs the
//! new path against the previous one and reports what was left and what was entered.
//!
//! ```
//! use understory_pile::EntityKind;
//! use understory_pile_hud::hover::{HoverEvent, HoverState, HoverTarget};
//!
//! let mut hover: HoverState<u32> = HoverState::new();
//! let stack = HoverTarget::Stack(EntityKind(0));
//! assert_eq!(
//!     hover.update_path(&[stack, HoverTarget::Entity(1)]),
//!     vec![HoverEvent::Enter(stack), HoverEvent::Enter(HoverTarget::Entity(1))],
//! );
//! assert_eq!(
//!     hover.update_path(&[stack, HoverTarget::Entity(2)]),
//!     vec![
//!         HoverEvent::Leave(HoverTarget::Entity(1)),
//!         HoverEvent::Enter(HoverTarget::Entity(2)),
//!     ],
//! );
//! ```

use alloc::vec::Vec;

use understory_pile::{EntityKind, PileId};

/// Something the pointer can hover.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum HoverTarget<K> {
    /// A pile's panel.
    Pile(PileId),
    /// A kind's stack.
    Stack(EntityKind),
    /// A member button.
    Entity(K),
}

/// A hover transition.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum HoverEvent<K> {
    /// Pointer entered the target (outer to inner).
    Enter(HoverTarget<K>),
    /// Pointer left the target (inner to outer).
    Leave(HoverTarget<K>),
}

/// Current hover path and the diff against the next one.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HoverState<K> {
    current: Vec<HoverTarget<K>>,
}

impl<K: Copy + Eq> HoverState<K> {
    /// Create an empty hover state.
    pub fn new() -> Self {
        Self {
            current: Vec::new(),
        }
    }

    /// The current container→button path.
    pub fn current_path(&self) -> &[HoverTarget<K>] {
        &self.current
    }

    /// Replace the path, returning leaves (inner first) then enters (outer first).
    pub fn update_path(&mut self, path: &[HoverTarget<K>]) -> Vec<HoverEvent<K>> {
        let shared = self
            .current
            .iter()
            .zip(path)
            .take_while(|(a, b)| a == b)
            .count();

        let mut out = Vec::with_capacity(self.current.len() + path.len() - 2 * shared);
        out.extend(self.current[shared..].iter().rev().map(|&t| HoverEvent::Leave(t)));
        out.extend(path[shared..].iter().map(|&t| HoverEvent::Enter(t)));

        self.current.clear();
        self.current.extend_from_slice(path);
        out
    }

    /// Forget the path, returning its leave events.
    pub fn clear(&mut self) -> Vec<HoverEvent<K>> {
        self.update_path(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use understory_pile::{EntityFrame, EntitySnapshot, PileSet};

    fn some_pile() -> PileId {
        let entities = [EntitySnapshot::new(1_u32, kurbo::Rect::new(0.0, 0.0, 1.0, 1.0))
            .with_priority(0.0)];
        let mut piles = PileSet::new();
        piles.maintain(&EntityFrame::new(&entities));
        piles.pile_of(&1).expect("low-priority entity gets a pile")
    }

    #[test]
    fn moving_between_containers_leaves_then_enters() {
        let pile = HoverTarget::Pile(some_pile());
        let stack = HoverTarget::Stack(EntityKind(3));
        let mut h: HoverState<u32> = HoverState::new();
        h.update_path(&[pile, HoverTarget::Entity(1)]);
        assert_eq!(
            h.update_path(&[stack, HoverTarget::Entity(2)]),
            vec![
                HoverEvent::Leave(HoverTarget::Entity(1)),
                HoverEvent::Leave(pile),
                HoverEvent::Enter(stack),
                HoverEvent::Enter(HoverTarget::Entity(2)),
            ]
        );
    }

    #[test]
    fn same_path_is_silent() {
        let mut h: HoverState<u32> = HoverState::new();
        let path = [HoverTarget::Stack(EntityKind(0)), HoverTarget::Entity(4)];
        h.update_path(&path);
        assert!(h.update_path(&path).is_empty());
        assert_eq!(h.current_path(), &path);
    }

    #[test]
    fn clear_leaves_inner_first() {
        let mut h: HoverState<u32> = HoverState::new();
        let stack = HoverTarget::Stack(EntityKind(0));
        h.update_path(&[stack, HoverTarget::Entity(4)]);
        assert_eq!(
            h.clear(),
            vec![
                HoverEvent::Leave(HoverTarget::Entity(4)),
                HoverEvent::Leave(stack)
            ]
        );
        assert!(h.current_path().is_empty());
    }
}
