// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Clustering thresholds.

/// Thresholds driving pile creation, destruction, and singling out.
///
/// `creation_density` must be strictly greater than `destruction_density`. The gap
/// between the two is the hysteresis band: a pair of boxes whose density lies inside
/// it keeps whatever state (piled or not) it already had.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PileConfig {
    /// Density a new or grown pile must exceed (merges accept equality).
    pub creation_density: f64,
    /// Piles below this density shed members until they recover or are singletons.
    pub destruction_density: f64,
    /// Entities with a priority below this get a pile of their own even when isolated;
    /// a singleton pile whose member is at or above it dissolves.
    pub healthy_priority: f64,
}

impl Default for PileConfig {
    fn default() -> Self {
        Self {
            creation_density: 1.2,
            destruction_density: 1.1,
            healthy_priority: 1.0,
        }
    }
}

impl PileConfig {
    /// Whether the hysteresis band is well formed.
    pub fn is_valid(&self) -> bool {
        self.creation_density > self.destruction_density
    }
}
