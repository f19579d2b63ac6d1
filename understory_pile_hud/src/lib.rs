// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_pile_hud --heading-base-level=0

//! Understory Pile HUD: entity selector layouts on top of `understory_pile`.
//!
//! - [`PileGrid`]: one panel per pile, members in a row-major button grid.
//! - [`StackLayout`]: per-kind button stacks for entities outside any pile.
//! - [`Selector`]: runs clustering and both layouts once per frame and reports what the
//!   pointer did.
//!
//! The crate produces geometry and state only. Buttons carry icon and label handles,
//! colours, and flags; drawing them is up to the host.
//!
//! ## Example
//!
//! ```rust
//! use kurbo::{Affine, Point, Rect};
//! use understory_pile::EntitySnapshot;
//! use understory_pile_hud::{NoSelection, PointerState, Selector, SelectorConfig};
//!
//! let mut selector = Selector::new(SelectorConfig::default());
//! selector.set_position(Point::new(0.0, 600.0), Point::new(800.0, 600.0), 1.0);
//!
//! let entities = [
//!     EntitySnapshot::new(1_u32, Rect::new(100.0, 100.0, 120.0, 140.0)),
//!     EntitySnapshot::new(2_u32, Rect::new(104.0, 102.0, 124.0, 142.0)),
//!     EntitySnapshot::new(3_u32, Rect::new(400.0, 100.0, 420.0, 140.0)),
//! ];
//! let camera = Affine::IDENTITY;
//! selector.update(1.0 / 60.0, &entities, &camera, &PointerState::default(), &NoSelection);
//!
//! // The two crowded entities share a pile; the third sits in a stack.
//! assert_eq!(selector.grids().count(), 1);
//! assert_eq!(selector.stacks().stacks()[0].members(), &[3]);
//! ```
//!
//! ## Coordinate spaces
//!
//! Entity rectangles and anchors are world space; everything this crate returns is HUD
//! space, y down. The host supplies the mapping as a [`Projection`], which
//! [`kurbo::Affine`] implements.

#![no_std]

extern crate alloc;

pub mod button;
pub mod grid;
pub mod hover;
pub mod input;
pub mod projection;
pub mod selector;
pub mod stack;
pub mod tint;

pub use button::{ButtonFlags, HealthBar, MemberButton};
pub use grid::{GridConfig, PanelPlacement, PileGrid};
pub use hover::{HoverEvent, HoverState, HoverTarget};
pub use input::{NoSelection, PointerState, SelectionLookup};
pub use projection::Projection;
pub use selector::{Selector, SelectorConfig};
pub use stack::{Stack, StackConfig, StackLayout, StackLocation};
