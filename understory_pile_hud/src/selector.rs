// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The per-frame orchestrator: clustering, layout, and pointer resolution.
//!
//! ## Layers
//!
//! Pile panels are drawn in pile creation order and stacks are drawn over all of
//! them. Pointer hits resolve top-down: a stack button beats any pile, and among
//! overlapping piles the last drawn wins. Layers below the hit see no pointer.

use alloc::vec::Vec;
use core::fmt::Debug;
use core::hash::Hash;

use hashbrown::HashMap;
use kurbo::Point;
use peniko::Color;
use tracing::{debug, trace};
use understory_pile::{EntityFrame, EntitySnapshot, MaintainStats, PileConfig, PileId, PileSet};

use crate::grid::{GridConfig, PileGrid};
use crate::hover::{HoverEvent, HoverState, HoverTarget};
use crate::input::{PointerState, SelectionLookup};
use crate::projection::Projection;
use crate::stack::{StackConfig, StackLayout};

/// Everything a [`Selector`] needs to know up front.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SelectorConfig {
    /// Clustering thresholds.
    pub piles: PileConfig,
    /// Pile grid sizing.
    pub grid: GridConfig,
    /// Stack sizing and placement.
    pub stack: StackConfig,
    /// Seconds a fade in or out of the pile panels takes.
    pub fade_duration: f64,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            piles: PileConfig::default(),
            grid: GridConfig::default(),
            stack: StackConfig::default(),
            fade_duration: 0.25,
        }
    }
}

/// HUD entity selector: piles of crowded entities plus per-kind stacks of the rest.
pub struct Selector<K> {
    config: SelectorConfig,
    piles: PileSet<K>,
    grids: HashMap<PileId, PileGrid<K>>,
    stacks: StackLayout<K>,
    left: Point,
    right: Point,
    scale: f64,
    animated_in: bool,
    fade_timer: f64,
    last_stats: MaintainStats,
    mouse_over: bool,
    just_clicked: bool,
    clicked: Option<K>,
    tooltip: Option<K>,
    hover: HoverState<K>,
    hover_events: Vec<HoverEvent<K>>,
}

impl<K: Debug> Debug for Selector<K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Selector")
            .field("piles", &self.piles)
            .field("stacks", &self.stacks)
            .field("scale", &self.scale)
            .field("mouse_over", &self.mouse_over)
            .field("clicked", &self.clicked)
            .finish_non_exhaustive()
    }
}

impl<K: Copy + Eq + Hash + Debug> Selector<K> {
    /// Create a selector, faded in.
    ///
    /// # Panics
    ///
    /// Panics if the pile thresholds are inverted (see [`PileSet::with_config`]).
    pub fn new(config: SelectorConfig) -> Self {
        Self {
            piles: PileSet::with_config(config.piles),
            grids: HashMap::new(),
            stacks: StackLayout::new(),
            left: Point::ZERO,
            right: Point::ZERO,
            scale: 1.0,
            animated_in: true,
            fade_timer: config.fade_duration,
            last_stats: MaintainStats::default(),
            mouse_over: false,
            just_clicked: false,
            clicked: None,
            tooltip: None,
            hover: HoverState::new(),
            hover_events: Vec::new(),
            config,
        }
    }

    /// The configuration in use.
    pub fn config(&self) -> &SelectorConfig {
        &self.config
    }

    /// Set the HUD baseline the stacks sit on and the HUD scale.
    ///
    /// Takes effect at the next [`update`](Self::update).
    pub fn set_position(&mut self, left: Point, right: Point, scale: f64) {
        self.left = left;
        self.right = right;
        self.scale = scale;
    }

    /// Run one frame: cluster, lay out, and resolve the pointer.
    pub fn update<S: SelectionLookup<K> + ?Sized>(
        &mut self,
        dt: f64,
        entities: &[EntitySnapshot<K>],
        projection: &impl Projection,
        pointer: &PointerState,
        selection: &S,
    ) {
        self.fade_timer = (self.fade_timer + dt.max(0.0)).min(self.config.fade_duration);

        let frame = EntityFrame::new(entities);
        self.last_stats = self.piles.maintain(&frame);

        let live = &self.piles;
        let before = self.grids.len();
        self.grids.retain(|id, _| live.get(*id).is_some());
        let released = before - self.grids.len();
        if released > 0 {
            debug!(released, "pile grids released");
        }
        for (id, pile) in self.piles.iter() {
            let grid = self.grids.entry(id).or_default();
            grid.sync(pile, &frame, &self.config.grid);
            grid.layout(&frame, projection, self.scale, &self.config.grid);
        }

        self.stacks.sync(&frame, &self.piles);
        self.stacks
            .layout(&frame, self.left, self.right, self.scale, &self.config.stack);

        self.resolve_pointer(pointer, selection);
        trace!(
            piles = self.piles.len(),
            stacks = self.stacks.len(),
            mouse_over = self.mouse_over,
            "selector updated"
        );
    }

    fn resolve_pointer<S: SelectionLookup<K> + ?Sized>(
        &mut self,
        pointer: &PointerState,
        selection: &S,
    ) {
        let mut path = Vec::with_capacity(2);
        let mut remaining = *pointer;

        let over_stack = self.stacks.resolve_pointer(&remaining, selection);
        self.clicked = self.stacks.clicked_member();
        self.tooltip = None;
        if let Some((kind, id)) = self.stacks.hovered() {
            path.push(HoverTarget::Stack(kind));
            path.push(HoverTarget::Entity(id));
            self.tooltip = Some(id);
        }
        if over_stack {
            remaining = PointerState::default();
        }

        let mut over_pile = false;
        let draw_order: Vec<PileId> = self.piles.iter().map(|(id, _)| id).collect();
        for id in draw_order.into_iter().rev() {
            let Some(grid) = self.grids.get_mut(&id) else {
                continue;
            };
            if !grid.resolve_pointer(&remaining, selection) {
                continue;
            }
            over_pile = true;
            self.clicked = grid.clicked_member();
            path.push(HoverTarget::Pile(id));
            if let Some(member) = grid.hovered_member() {
                path.push(HoverTarget::Entity(member));
                self.tooltip = Some(member);
            }
            remaining = PointerState::default();
        }

        self.mouse_over = over_stack || over_pile;
        self.just_clicked = self.mouse_over && pointer.just_pressed;
        self.hover_events = self.hover.update_path(&path);
        if let Some(entity) = self.clicked {
            debug!(?entity, "entity clicked");
        }
    }

    /// Start fading the pile panels in; `instant` skips the ramp.
    pub fn animate_in(&mut self, instant: bool) {
        self.animated_in = true;
        self.fade_timer = if instant { self.config.fade_duration } else { 0.0 };
    }

    /// Start fading the pile panels out; `instant` skips the ramp.
    pub fn animate_out(&mut self, instant: bool) {
        self.animated_in = false;
        self.fade_timer = if instant { self.config.fade_duration } else { 0.0 };
    }

    /// Whether the last request was to fade in.
    pub fn is_animated_in(&self) -> bool {
        self.animated_in
    }

    /// Current pile panel opacity in `0.0..=1.0`.
    pub fn opacity(&self) -> f64 {
        let duration = self.config.fade_duration;
        let progress = if duration > 0.0 && self.fade_timer < duration {
            self.fade_timer / duration
        } else {
            1.0
        };
        if self.animated_in { progress } else { 1.0 - progress }
    }

    /// White modulated by [`opacity`](Self::opacity), for tinting pile panels.
    pub fn pile_tint(&self) -> Color {
        #[allow(
            clippy::cast_possible_truncation,
            reason = "Opacity is in 0..=1; f32 is plenty."
        )]
        let alpha = self.opacity() as f32;
        Color::new([1.0, 1.0, 1.0, alpha])
    }

    /// Whether the pointer is over any pile panel or stack button.
    pub fn is_mouse_over(&self) -> bool {
        self.mouse_over
    }

    /// Whether the pointer went down over the selector this frame.
    ///
    /// Hosts use this to keep the click from reaching the world.
    pub fn is_just_clicked(&self) -> bool {
        self.just_clicked
    }

    /// Entity whose button was clicked this frame.
    pub fn clicked_entity(&self) -> Option<K> {
        self.clicked
    }

    /// Entity whose button is topmost under the pointer, for tooltips.
    pub fn hover_tooltip_source(&self) -> Option<K> {
        self.tooltip
    }

    /// Hover transitions produced by the last update.
    pub fn hover_events(&self) -> &[HoverEvent<K>] {
        &self.hover_events
    }

    /// What the last maintenance pass changed.
    pub fn last_stats(&self) -> MaintainStats {
        self.last_stats
    }

    /// The pile set.
    pub fn piles(&self) -> &PileSet<K> {
        &self.piles
    }

    /// The grid of one pile.
    pub fn grid(&self, id: PileId) -> Option<&PileGrid<K>> {
        self.grids.get(&id)
    }

    /// Pile grids in draw order (bottom first).
    pub fn grids(&self) -> impl Iterator<Item = (PileId, &PileGrid<K>)> + '_ {
        self.piles
            .iter()
            .filter_map(|(id, _)| self.grids.get(&id).map(|grid| (id, grid)))
    }

    /// The stacks of unpiled entities.
    pub fn stacks(&self) -> &StackLayout<K> {
        &self.stacks
    }
}
