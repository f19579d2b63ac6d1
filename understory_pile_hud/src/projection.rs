// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! World-to-HUD projection.
//!
//! Clustering runs in world space; only anchors are projected, so piles do not change
//! when the camera zooms or pans.

use kurbo::{Affine, Point};

/// Maps a world-space point to HUD space.
pub trait Projection {
    /// Project one point.
    fn project(&self, world: Point) -> Point;
}

impl Projection for Affine {
    fn project(&self, world: Point) -> Point {
        *self * world
    }
}

impl<P: Projection + ?Sized> Projection for &P {
    fn project(&self, world: Point) -> Point {
        (**self).project(world)
    }
}
