// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_pile --heading-base-level=0

//! Understory Pile: flicker-free online clustering of moving boxes.
//!
//! HUD overlays that draw one widget per on-screen entity turn into an unreadable heap
//! when entities crowd together. This crate groups the entity boxes into *piles*, so the
//! overlay can draw one merged widget per dense cluster instead.
//!
//! - Clustering is incremental: [`PileSet::maintain`] adjusts last frame's piles to this
//!   frame's boxes rather than starting over.
//! - Creation and destruction use separate density thresholds (a hysteresis band), so a
//!   pair hovering around one threshold does not pile and unpile every frame.
//! - Eviction is greedy: a pile that gets too sparse drops whichever member leaves the
//!   densest remainder.
//!
//! Layout and drawing live in `understory_pile_hud`; this crate is geometry only and
//! works in world space.
//!
//! ## Density
//!
//! The density of a set of boxes is the sum of their areas over the area of the bounding
//! rectangle of their union. Boxes that merely touch score at most `1.0`; coincident
//! boxes score their count. See [`geometry::pair_density`].
//!
//! ## Example
//!
//! ```rust
//! use kurbo::Rect;
//! use understory_pile::{EntityFrame, EntitySnapshot, PileSet};
//!
//! let entities = [
//!     EntitySnapshot::new(1_u32, Rect::new(0.0, 0.0, 10.0, 10.0)),
//!     EntitySnapshot::new(2_u32, Rect::new(2.0, 2.0, 12.0, 12.0)),
//!     EntitySnapshot::new(3_u32, Rect::new(40.0, 0.0, 50.0, 10.0)),
//! ];
//!
//! let mut piles = PileSet::new();
//! let stats = piles.maintain(&EntityFrame::new(&entities));
//! assert_eq!(stats.created, 1);
//! assert_eq!(piles.pile_of(&1), piles.pile_of(&2));
//! assert!(!piles.contains_entity(&3));
//!
//! // Nothing moved, so nothing changes.
//! assert!(piles.maintain(&EntityFrame::new(&entities)).is_quiet());
//! ```
//!
//! ### Float semantics
//!
//! Rectangles are assumed finite and free of NaNs. Debug builds may assert.

#![no_std]

extern crate alloc;

pub mod config;
pub mod entity;
pub mod geometry;
pub mod pile;
pub mod set;

pub use config::PileConfig;
pub use entity::{EntityFrame, EntityKind, EntitySnapshot, IconId, LabelId};
pub use pile::Pile;
pub use set::{MaintainStats, PileId, PileSet};
