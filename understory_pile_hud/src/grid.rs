// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Grid layout of one pile's members.
//!
//! A [`PileGrid`] is the on-screen widget of a pile: a background panel anchored at the
//! projected foot position of the members, holding one [`MemberButton`] per member in
//! row-major order.
//!
//! The grid keeps its own member order across frames. Members that stay keep their
//! slot and newcomers are appended, so buttons do not jump around as the pile grows.
//! Small piles are additionally sorted left to right by world position, matching what
//! the player sees.

use alloc::vec::Vec;
use core::fmt::Debug;
use core::hash::Hash;

use kurbo::{Point, Rect, Vec2};
use understory_pile::{EntityFrame, Pile};

use crate::button::{ButtonFlags, MemberButton};
use crate::input::{PointerState, SelectionLookup};
use crate::projection::Projection;

/// Which side of the anchor the panel sits on (HUD y grows downward).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum PanelPlacement {
    /// Panel bottom edge on the anchor.
    #[default]
    Above,
    /// Panel top edge on the anchor.
    Below,
}

/// Grid sizing. Lengths are in unscaled HUD units.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GridConfig {
    /// Edge length of a square button.
    pub button_size: f64,
    /// Maximum buttons per row.
    pub max_columns: usize,
    /// Piles with at most this many members are sorted by world x.
    pub sort_threshold: usize,
    /// Padding between the panel edge and the button block.
    pub panel_padding: f64,
    /// Panel side relative to the anchor.
    pub placement: PanelPlacement,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            button_size: 54.0,
            max_columns: 6,
            sort_threshold: 3,
            panel_padding: 3.0,
            placement: PanelPlacement::Above,
        }
    }
}

impl GridConfig {
    /// `(columns, rows)` for `count` buttons.
    pub fn dimensions(&self, count: usize) -> (usize, usize) {
        if count == 0 {
            return (0, 0);
        }
        let columns = self.max_columns.max(1).min(count);
        (columns, count.div_ceil(columns))
    }
}

/// HUD widget for one pile.
#[derive(Clone)]
pub struct PileGrid<K> {
    order: Vec<K>,
    anchor: Point,
    panel: Rect,
    buttons: Vec<MemberButton<K>>,
    mouse_over: bool,
    hovered: Option<K>,
    clicked: Option<K>,
}

impl<K: Debug> Debug for PileGrid<K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PileGrid")
            .field("order", &self.order)
            .field("panel", &self.panel)
            .field("hovered", &self.hovered)
            .field("clicked", &self.clicked)
            .finish_non_exhaustive()
    }
}

impl<K> Default for PileGrid<K> {
    fn default() -> Self {
        Self {
            order: Vec::new(),
            anchor: Point::ZERO,
            panel: Rect::ZERO,
            buttons: Vec::new(),
            mouse_over: false,
            hovered: None,
            clicked: None,
        }
    }
}

impl<K: Copy + Eq + Hash + Debug> PileGrid<K> {
    /// Create an empty grid; call [`sync`](Self::sync) and [`layout`](Self::layout) to fill it.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bring the member order in line with `pile`.
    ///
    /// Members gone from the pile (or from the frame) are dropped, remaining members keep
    /// their relative order, and new members are appended in pile order. When the pile
    /// has at most `config.sort_threshold` members the order is stable-sorted by world
    /// anchor x.
    pub fn sync(&mut self, pile: &Pile<K>, frame: &EntityFrame<'_, K>, config: &GridConfig) {
        self.order
            .retain(|id| pile.contains(id) && frame.get(id).is_some());
        for id in pile.members() {
            if !self.order.contains(&id) && frame.get(&id).is_some() {
                self.order.push(id);
            }
        }
        if self.order.len() <= config.sort_threshold {
            let x = |id: &K| frame.get(id).map_or(0.0, |e| e.anchor.x);
            self.order.sort_by(|a, b| x(a).total_cmp(&x(b)));
        }
    }

    /// Place the panel and the buttons for this frame.
    pub fn layout(
        &mut self,
        frame: &EntityFrame<'_, K>,
        projection: &impl Projection,
        scale: f64,
        config: &GridConfig,
    ) {
        self.buttons.clear();
        let members: Vec<_> = self.order.iter().filter_map(|id| frame.get(id)).collect();
        if members.is_empty() {
            self.panel = Rect::ZERO;
            return;
        }

        #[allow(
            clippy::cast_precision_loss,
            reason = "Member counts are tiny; no precision is lost."
        )]
        let n = members.len() as f64;
        let sum = members
            .iter()
            .fold(Vec2::ZERO, |acc, e| acc + e.anchor.to_vec2());
        self.anchor = projection.project((sum / n).to_point());

        let (columns, rows) = config.dimensions(members.len());
        let edge = config.button_size * scale;
        let pad = config.panel_padding * scale;
        #[allow(
            clippy::cast_precision_loss,
            reason = "Row and column counts are tiny; no precision is lost."
        )]
        let (width, height) = (
            columns as f64 * edge + 2.0 * pad,
            rows as f64 * edge + 2.0 * pad,
        );
        let x0 = self.anchor.x - 0.5 * width;
        let y0 = match config.placement {
            PanelPlacement::Above => self.anchor.y - height,
            PanelPlacement::Below => self.anchor.y,
        };
        self.panel = Rect::new(x0, y0, x0 + width, y0 + height);

        let origin = Point::new(x0 + pad, y0 + pad);
        for (i, entity) in members.into_iter().enumerate() {
            #[allow(
                clippy::cast_precision_loss,
                reason = "Grid coordinates are tiny; no precision is lost."
            )]
            let (col, row) = ((i % columns) as f64, (i / columns) as f64);
            let cell = Rect::from_origin_size(
                origin + Vec2::new(col * edge, row * edge),
                (edge, edge),
            );
            self.buttons.push(MemberButton::new(entity, cell));
        }
    }

    /// Resolve hover, click, and selection highlights for this frame.
    ///
    /// Returns whether the pointer is over the panel.
    pub fn resolve_pointer<S: SelectionLookup<K> + ?Sized>(
        &mut self,
        pointer: &PointerState,
        selection: &S,
    ) -> bool {
        self.hovered = None;
        self.clicked = None;
        self.mouse_over = pointer.position.is_some_and(|p| self.panel.contains(p));

        for button in &mut self.buttons {
            button.flags = ButtonFlags::empty();
            button
                .flags
                .set(ButtonFlags::SELECTED, selection.is_selected(&button.entity));
            let hit = self.hovered.is_none() && pointer.position.is_some_and(|p| button.contains(p));
            if hit {
                self.hovered = Some(button.entity);
                button.flags |= ButtonFlags::HOVERED;
                if pointer.just_pressed {
                    self.clicked = Some(button.entity);
                    button.flags |= ButtonFlags::CLICKED;
                }
            }
        }
        self.mouse_over
    }

    /// Member order as shown, row-major.
    pub fn order(&self) -> &[K] {
        &self.order
    }

    /// Projected anchor the panel hangs from.
    pub fn anchor(&self) -> Point {
        self.anchor
    }

    /// Background panel in HUD space.
    pub fn panel(&self) -> Rect {
        self.panel
    }

    /// Buttons in row-major order.
    pub fn buttons(&self) -> &[MemberButton<K>] {
        &self.buttons
    }

    /// Whether the pointer is over the panel.
    pub fn is_mouse_over(&self) -> bool {
        self.mouse_over
    }

    /// Member whose button was clicked this frame.
    pub fn clicked_member(&self) -> Option<K> {
        self.clicked
    }

    /// Member whose button is under the pointer.
    pub fn hovered_member(&self) -> Option<K> {
        self.hovered
    }
}
