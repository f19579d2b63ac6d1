// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Member buttons shared by grids and stacks.

use kurbo::{Point, Rect};
use peniko::Color;
use understory_pile::{EntitySnapshot, IconId, LabelId};

use crate::tint::{health_bar_color, icon_tint, shows_health_bar};

bitflags::bitflags! {
    /// Per-frame interaction state of a button.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct ButtonFlags: u8 {
        /// Highlight forced on by the host's selection.
        const SELECTED = 0b0000_0001;
        /// Topmost button under the pointer.
        const HOVERED  = 0b0000_0010;
        /// Clicked this frame.
        const CLICKED  = 0b0000_0100;
    }
}

/// Partial-health bar drawn behind the icon.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct HealthBar {
    /// Bar rectangle: the button's bounds with the width scaled by health.
    pub bounds: Rect,
    /// Bar colour.
    pub color: Color,
}

/// One entity's button in a pile grid or a stack.
///
/// Icon and label are handles into the host's content cache; the button holds them for
/// as long as it exists and the host resolves them at draw time.
#[derive(Clone, Debug, PartialEq)]
pub struct MemberButton<K> {
    /// Entity the button stands for.
    pub entity: K,
    /// HUD-space bounds.
    pub bounds: Rect,
    /// Icon handle.
    pub icon: Option<IconId>,
    /// Icon tint derived from health.
    pub icon_tint: Color,
    /// Health bar, if the entity is alive and neither at full nor zero health.
    pub health_bar: Option<HealthBar>,
    /// Corner label handle.
    pub label: Option<LabelId>,
    /// Interaction state.
    pub flags: ButtonFlags,
}

impl<K: Copy> MemberButton<K> {
    /// Build a button for `entity` at `bounds`, with no interaction flags.
    pub fn new(entity: &EntitySnapshot<K>, bounds: Rect) -> Self {
        let health = entity.priority;
        let health_bar = shows_health_bar(health, entity.alive).then(|| HealthBar {
            bounds: Rect::new(
                bounds.x0,
                bounds.y0,
                bounds.x0 + bounds.width() * health,
                bounds.y1,
            ),
            color: health_bar_color(health),
        });
        Self {
            entity: entity.id,
            bounds,
            icon: entity.icon,
            icon_tint: icon_tint(health, entity.alive),
            health_bar,
            label: entity.label,
            flags: ButtonFlags::empty(),
        }
    }

    /// Whether `point` falls inside the button.
    pub fn contains(&self, point: Point) -> bool {
        self.bounds.contains(point)
    }

    /// Whether the button draws highlighted (selected or hovered).
    pub fn is_highlighted(&self) -> bool {
        self.flags
            .intersects(ButtonFlags::SELECTED | ButtonFlags::HOVERED)
    }
}
