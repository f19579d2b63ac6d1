// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-frame entity views: snapshots, handles, and the id-indexed frame.

use core::fmt::Debug;
use core::hash::Hash;

use hashbrown::HashMap;
use kurbo::{Point, Rect};

/// Stack grouping key for an entity (for example a character class).
///
/// Stacks are laid out in ascending key order.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntityKind(pub u32);

/// Handle to an icon owned by an external content cache.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct IconId(pub u32);

/// Handle to a short corner label (for example a key binding) owned by an external cache.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct LabelId(pub u32);

/// Read-only view of one entity for the current frame.
///
/// Snapshots are produced by the entity source every frame. The clustering engine only
/// keeps ids between frames; everything else is read fresh.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct EntitySnapshot<K> {
    /// Stable, unique id of the entity.
    pub id: K,
    /// World-space bounding rectangle.
    pub bounds: Rect,
    /// Scalar in `0.0..=1.0`; entities below the healthy cutoff get their own pile.
    pub priority: f64,
    /// Whether the entity is alive. Dead entities are not clustered.
    pub alive: bool,
    /// Stack grouping key.
    pub kind: EntityKind,
    /// Icon shown on the entity's button.
    pub icon: Option<IconId>,
    /// Corner label shown on the entity's button.
    pub label: Option<LabelId>,
    /// World-space foot position used to anchor pile panels.
    pub anchor: Point,
}

impl<K> EntitySnapshot<K> {
    /// Create a healthy, alive snapshot with default kind and no decorations.
    ///
    /// `bounds` is normalized and the anchor is placed at its bottom-center.
    pub fn new(id: K, bounds: Rect) -> Self {
        let bounds = bounds.abs();
        Self {
            id,
            bounds,
            priority: 1.0,
            alive: true,
            kind: EntityKind::default(),
            icon: None,
            label: None,
            anchor: Point::new(0.5 * (bounds.x0 + bounds.x1), bounds.y1),
        }
    }

    /// Set the priority.
    #[must_use]
    pub fn with_priority(mut self, priority: f64) -> Self {
        self.priority = priority;
        self
    }

    /// Set the alive flag.
    #[must_use]
    pub fn with_alive(mut self, alive: bool) -> Self {
        self.alive = alive;
        self
    }

    /// Set the stack grouping key.
    #[must_use]
    pub fn with_kind(mut self, kind: EntityKind) -> Self {
        self.kind = kind;
        self
    }

    /// Set the icon handle.
    #[must_use]
    pub fn with_icon(mut self, icon: IconId) -> Self {
        self.icon = Some(icon);
        self
    }

    /// Set the corner label handle.
    #[must_use]
    pub fn with_label(mut self, label: LabelId) -> Self {
        self.label = Some(label);
        self
    }

    /// Override the anchor point.
    #[must_use]
    pub fn with_anchor(mut self, anchor: Point) -> Self {
        self.anchor = anchor;
        self
    }
}

/// Id-indexed view over one frame of entity snapshots.
///
/// The slice is expected to be ordered and duplicate-free; frame order drives the
/// order in which unpiled entities are considered.
#[derive(Debug)]
pub struct EntityFrame<'a, K> {
    entities: &'a [EntitySnapshot<K>],
    index: HashMap<K, usize>,
}

impl<'a, K: Copy + Eq + Hash + Debug> EntityFrame<'a, K> {
    /// Index a frame of snapshots.
    pub fn new(entities: &'a [EntitySnapshot<K>]) -> Self {
        let mut index = HashMap::with_capacity(entities.len());
        for (i, e) in entities.iter().enumerate() {
            let previous = index.insert(e.id, i);
            debug_assert!(
                previous.is_none(),
                "entity {:?} appears twice in one frame",
                e.id
            );
        }
        Self { entities, index }
    }

    /// Look up an entity; `None` if it is not part of this frame.
    pub fn get(&self, id: &K) -> Option<&'a EntitySnapshot<K>> {
        self.index.get(id).map(|&i| &self.entities[i])
    }

    /// Whether the entity is present and alive in this frame.
    pub fn is_live(&self, id: &K) -> bool {
        self.get(id).is_some_and(|e| e.alive)
    }

    /// Snapshots in frame order.
    pub fn entities(&self) -> &'a [EntitySnapshot<K>] {
        self.entities
    }

    /// Number of snapshots in the frame.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether the frame has no snapshots.
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}
