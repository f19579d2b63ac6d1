// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-kind button stacks for entities that are not in any pile.
//!
//! Stacks sit along the HUD baseline between two points. Each stack is a fixed-size
//! frame holding a column of buttons that overlap more as the stack fills up; the first
//! button sits at the bottom and is drawn on top.

use alloc::vec::Vec;
use core::fmt::Debug;
use core::hash::Hash;

use kurbo::{Insets, Point, Rect, Size, Vec2};
use understory_pile::{EntityFrame, EntityKind, PileSet};

use crate::button::{ButtonFlags, MemberButton};
use crate::input::{PointerState, SelectionLookup};

/// Where along the baseline the stacks start.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum StackLocation {
    /// From the left end towards the right.
    #[default]
    Left,
    /// From the right end towards the left.
    Right,
    /// Centred between both ends, laid out left to right.
    Center,
}

/// Stack sizing. Lengths are in unscaled HUD units.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct StackConfig {
    /// Size of one stack frame. The frame's bottom edge sits on the baseline.
    pub frame_size: Size,
    /// Distance from the frame edges to the button column.
    pub insets: Insets,
    /// Where the stacks start.
    pub location: StackLocation,
}

impl Default for StackConfig {
    fn default() -> Self {
        Self {
            frame_size: Size::new(72.0, 200.0),
            insets: Insets::new(8.0, 16.0, 8.0, 8.0),
            location: StackLocation::Left,
        }
    }
}

/// One kind's stack.
#[derive(Clone, Debug)]
pub struct Stack<K> {
    kind: EntityKind,
    members: Vec<K>,
    frame: Rect,
    buttons: Vec<MemberButton<K>>,
}

impl<K> Stack<K> {
    /// Kind shared by every member.
    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    /// Members bottom to top.
    pub fn members(&self) -> &[K] {
        &self.members
    }

    /// Frame rectangle in HUD space.
    pub fn frame(&self) -> Rect {
        self.frame
    }

    /// Buttons bottom to top; the first is drawn on top.
    pub fn buttons(&self) -> &[MemberButton<K>] {
        &self.buttons
    }
}

/// All stacks of one selector, ordered by ascending kind.
#[derive(Clone, Debug)]
pub struct StackLayout<K> {
    stacks: Vec<Stack<K>>,
    hovered: Option<(EntityKind, K)>,
    clicked: Option<K>,
}

impl<K> Default for StackLayout<K> {
    fn default() -> Self {
        Self {
            stacks: Vec::new(),
            hovered: None,
            clicked: None,
        }
    }
}

impl<K: Copy + Eq + Hash + Debug> StackLayout<K> {
    /// Create an empty layout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Regroup the unpiled, alive entities of `frame` by kind.
    ///
    /// Members that stay keep their position in their stack; newcomers are appended at
    /// the top in frame order. Stacks of kinds with no members left are removed.
    pub fn sync(&mut self, frame: &EntityFrame<'_, K>, piles: &PileSet<K>) {
        let stays = |id: &K| frame.is_live(id) && !piles.contains_entity(id);

        for stack in &mut self.stacks {
            let kind = stack.kind;
            stack
                .members
                .retain(|id| stays(id) && frame.get(id).is_some_and(|e| e.kind == kind));
        }
        for e in frame.entities() {
            if !stays(&e.id) {
                continue;
            }
            let i = match self.stacks.binary_search_by_key(&e.kind, |s| s.kind) {
                Ok(i) => i,
                Err(i) => {
                    self.stacks.insert(
                        i,
                        Stack {
                            kind: e.kind,
                            members: Vec::new(),
                            frame: Rect::ZERO,
                            buttons: Vec::new(),
                        },
                    );
                    i
                }
            };
            let members = &mut self.stacks[i].members;
            if !members.contains(&e.id) {
                members.push(e.id);
            }
        }
        self.stacks.retain(|s| !s.members.is_empty());
    }

    /// Place frames along the baseline from `left` to `right` and fill their buttons.
    pub fn layout(
        &mut self,
        frame: &EntityFrame<'_, K>,
        left: Point,
        right: Point,
        scale: f64,
        config: &StackConfig,
    ) {
        let frame_size = config.frame_size * scale;
        let raw = config.insets;
        let insets = Insets::new(raw.x0 * scale, raw.y0 * scale, raw.x1 * scale, raw.y1 * scale);
        let along = direction(left, right);
        let w = frame_size.width;
        #[allow(
            clippy::cast_precision_loss,
            reason = "Stack counts are tiny; no precision is lost."
        )]
        let count = self.stacks.len() as f64;
        let (start, step) = match config.location {
            StackLocation::Left => (left, along),
            StackLocation::Right => (right, -along),
            StackLocation::Center => (left.midpoint(right) - along * (0.5 * count * w), along),
        };

        for (i, stack) in self.stacks.iter_mut().enumerate() {
            #[allow(
                clippy::cast_precision_loss,
                reason = "Stack indices are tiny; no precision is lost."
            )]
            let offset = i as f64 * w + 0.5 * w;
            let foot = start + step * offset;
            stack.frame = Rect::new(
                foot.x - 0.5 * w,
                foot.y - frame_size.height,
                foot.x + 0.5 * w,
                foot.y,
            );

            let column = stack.frame - insets;
            let edge = column.width();
            #[allow(
                clippy::cast_precision_loss,
                reason = "Stack sizes are tiny; no precision is lost."
            )]
            let n = stack.members.len() as f64;
            // A column shorter than one button collapses the stack onto the bottom slot.
            let spacing = ((column.height() - edge) / n).min(edge).max(0.0);

            stack.buttons.clear();
            let mut j = 0.0;
            for id in &stack.members {
                let Some(entity) = frame.get(id) else {
                    continue;
                };
                let y0 = column.y1 - j * spacing - edge;
                let bounds = Rect::new(column.x0, y0, column.x0 + edge, y0 + edge);
                stack.buttons.push(MemberButton::new(entity, bounds));
                j += 1.0;
            }
        }
    }

    /// Resolve hover, click, and selection highlights.
    ///
    /// The first button under the pointer, in stack then bottom-to-top order, is the
    /// topmost and the only one hovered or clicked. Returns whether any button is hit.
    pub fn resolve_pointer<S: SelectionLookup<K> + ?Sized>(
        &mut self,
        pointer: &PointerState,
        selection: &S,
    ) -> bool {
        self.hovered = None;
        self.clicked = None;
        for stack in &mut self.stacks {
            for button in &mut stack.buttons {
                button.flags = ButtonFlags::empty();
                button
                    .flags
                    .set(ButtonFlags::SELECTED, selection.is_selected(&button.entity));
                let hit = self.hovered.is_none()
                    && pointer.position.is_some_and(|p| button.contains(p));
                if hit {
                    self.hovered = Some((stack.kind, button.entity));
                    button.flags |= ButtonFlags::HOVERED;
                    if pointer.just_pressed {
                        self.clicked = Some(button.entity);
                        button.flags |= ButtonFlags::CLICKED;
                    }
                }
            }
        }
        self.hovered.is_some()
    }

    /// Stacks in ascending kind order.
    pub fn stacks(&self) -> &[Stack<K>] {
        &self.stacks
    }

    /// Number of stacks.
    pub fn len(&self) -> usize {
        self.stacks.len()
    }

    /// Whether there are no stacks.
    pub fn is_empty(&self) -> bool {
        self.stacks.is_empty()
    }

    /// Topmost hovered button's kind and entity.
    pub fn hovered(&self) -> Option<(EntityKind, K)> {
        self.hovered
    }

    /// Entity whose button was clicked this frame.
    pub fn clicked_member(&self) -> Option<K> {
        self.clicked
    }
}

/// Unit vector from `left` to `right`, or +x if they coincide.
fn direction(left: Point, right: Point) -> Vec2 {
    let d = right - left;
    let len = d.hypot();
    if len > 0.0 { d / len } else { Vec2::new(1.0, 0.0) }
}
