// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A single pile: members plus cached union bounds, summed area, and density.
//!
//! A union of axis-aligned boxes cannot be "un-merged", so every membership change
//! recomputes the cache from the remaining members rather than adjusting it.

use alloc::vec::Vec;
use core::fmt::Debug;

use kurbo::Rect;

use crate::geometry::density;

#[derive(Copy, Clone, Debug, PartialEq)]
struct Member<K> {
    id: K,
    bounds: Rect,
}

/// A cluster of entities rendered as one widget.
///
/// Members keep insertion order. The cached [`bounds`](Pile::bounds),
/// [`area_sum`](Pile::area_sum), and [`density`](Pile::density) always reflect the
/// current members and the rectangles last given for them.
#[derive(Clone, Debug, PartialEq)]
pub struct Pile<K> {
    members: Vec<Member<K>>,
    bounds: Rect,
    area_sum: f64,
    density: f64,
}

impl<K> Default for Pile<K> {
    fn default() -> Self {
        Self {
            members: Vec::new(),
            bounds: Rect::ZERO,
            area_sum: 0.0,
            density: 0.0,
        }
    }
}

impl<K: Copy + Eq + Debug> Pile<K> {
    /// Create an empty pile.
    ///
    /// Empty piles never live inside a [`PileSet`](crate::PileSet); this is a
    /// building block for populating one.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the pile has no members.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Whether `id` is a member.
    pub fn contains(&self, id: &K) -> bool {
        self.position(id).is_some()
    }

    /// Member ids in insertion order.
    pub fn members(&self) -> impl ExactSizeIterator<Item = K> + '_ {
        self.members.iter().map(|m| m.id)
    }

    /// The rectangle last recorded for a member.
    pub fn member_bounds(&self, id: &K) -> Option<Rect> {
        self.position(id).map(|i| self.members[i].bounds)
    }

    /// Union of all member rectangles (`Rect::ZERO` when empty).
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Sum of all member rectangle areas.
    pub fn area_sum(&self) -> f64 {
        self.area_sum
    }

    /// `area_sum / bounds.area()`, or `0.0` if the union has no area.
    pub fn density(&self) -> f64 {
        self.density
    }

    /// Add a member.
    ///
    /// # Panics
    ///
    /// Panics if `id` is already a member.
    pub fn add_member(&mut self, id: K, bounds: Rect) {
        assert!(!self.contains(&id), "entity {id:?} is already in this pile");
        self.members.push(Member { id, bounds });
        self.recompute();
    }

    /// Remove a member. The caller discards the pile if this empties it.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not a member.
    pub fn remove_member(&mut self, id: &K) {
        let Some(i) = self.position(id) else {
            panic!("entity {id:?} is not in this pile");
        };
        self.members.remove(i);
        self.recompute();
    }

    /// Re-read every member's rectangle for a new frame.
    ///
    /// Members for which `lookup` returns `None` keep their previous rectangle; the
    /// pile set removes vanished members before refreshing.
    pub fn refresh(&mut self, mut lookup: impl FnMut(&K) -> Option<Rect>) {
        for m in &mut self.members {
            if let Some(bounds) = lookup(&m.id) {
                m.bounds = bounds;
            }
        }
        self.recompute();
    }

    /// Density this pile would have without `skip`. Does not mutate.
    ///
    /// Returns `0.0` if `skip` is the only member.
    ///
    /// # Panics
    ///
    /// Panics if `skip` is not a member.
    pub fn density_without(&self, skip: &K) -> f64 {
        assert!(self.contains(skip), "entity {skip:?} is not in this pile");
        let (area_sum, bounds) = aggregate(self.members.iter().filter(|m| m.id != *skip));
        bounds.map_or(0.0, |b| density(area_sum, b))
    }

    /// Density this pile would have if a box with `bounds` joined. Does not mutate.
    pub fn density_with(&self, bounds: Rect) -> f64 {
        if self.is_empty() {
            return density(bounds.area(), bounds);
        }
        density(self.area_sum + bounds.area(), self.bounds.union(bounds))
    }

    /// Density of the union of two piles' members. Mutates neither.
    pub fn merge_density(a: &Self, b: &Self) -> f64 {
        match (a.is_empty(), b.is_empty()) {
            (true, true) => 0.0,
            (false, true) => a.density,
            (true, false) => b.density,
            (false, false) => density(a.area_sum + b.area_sum, a.bounds.union(b.bounds)),
        }
    }

    /// Member ids paired with their recorded rectangles, in insertion order.
    pub fn entries(&self) -> impl ExactSizeIterator<Item = (K, Rect)> + '_ {
        self.members.iter().map(|m| (m.id, m.bounds))
    }

    fn position(&self, id: &K) -> Option<usize> {
        self.members.iter().position(|m| m.id == *id)
    }

    fn recompute(&mut self) {
        let (area_sum, bounds) = aggregate(self.members.iter());
        self.area_sum = area_sum;
        self.bounds = bounds.unwrap_or(Rect::ZERO);
        self.density = bounds.map_or(0.0, |b| density(area_sum, b));
    }
}

fn aggregate<'a, K: 'a>(members: impl Iterator<Item = &'a Member<K>>) -> (f64, Option<Rect>) {
    let mut area_sum = 0.0;
    let mut bounds: Option<Rect> = None;
    for m in members {
        area_sum += m.bounds.area();
        bounds = Some(match bounds {
            Some(b) => b.union(m.bounds),
            None => m.bounds,
        });
    }
    (area_sum, bounds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn xywh(x: f64, y: f64, w: f64, h: f64) -> Rect {
        Rect::new(x, y, x + w, y + h)
    }

    fn close(a: f64, b: f64) -> bool {
        let d = a - b;
        -1e-9 < d && d < 1e-9
    }

    #[test]
    fn add_recomputes_cache() {
        let mut p: Pile<u32> = Pile::new();
        p.add_member(1, xywh(0.0, 0.0, 10.0, 10.0));
        assert_eq!(p.density(), 1.0);
        p.add_member(2, xywh(2.0, 2.0, 10.0, 10.0));
        assert_eq!(p.len(), 2);
        assert_eq!(p.bounds(), Rect::new(0.0, 0.0, 12.0, 12.0));
        assert_eq!(p.area_sum(), 200.0);
        assert!(close(p.density(), 200.0 / 144.0));
    }

    #[test]
    fn remove_recomputes_union_from_remaining() {
        let mut p: Pile<u32> = Pile::new();
        p.add_member(1, xywh(0.0, 0.0, 10.0, 10.0));
        p.add_member(2, xywh(50.0, 50.0, 10.0, 10.0));
        p.remove_member(&2);
        assert_eq!(p.bounds(), xywh(0.0, 0.0, 10.0, 10.0));
        assert_eq!(p.area_sum(), 100.0);
        assert_eq!(p.density(), 1.0);
        p.remove_member(&1);
        assert!(p.is_empty());
        assert_eq!(p.density(), 0.0);
    }

    #[test]
    #[should_panic(expected = "already in this pile")]
    fn duplicate_insert_panics() {
        let mut p: Pile<u32> = Pile::new();
        p.add_member(7, xywh(0.0, 0.0, 1.0, 1.0));
        p.add_member(7, xywh(0.0, 0.0, 1.0, 1.0));
    }

    #[test]
    #[should_panic(expected = "not in this pile")]
    fn removing_stranger_panics() {
        let mut p: Pile<u32> = Pile::new();
        p.add_member(7, xywh(0.0, 0.0, 1.0, 1.0));
        p.remove_member(&8);
    }

    #[test]
    fn hypothetical_queries_do_not_mutate() {
        let mut p: Pile<u32> = Pile::new();
        p.add_member(1, xywh(0.0, 0.0, 10.0, 10.0));
        p.add_member(2, xywh(0.0, 0.0, 10.0, 10.0));
        p.add_member(3, xywh(20.0, 0.0, 10.0, 10.0));
        let before = p.clone();

        // Without the far box the two coincident ones double count.
        assert_eq!(p.density_without(&3), 2.0);
        // Joining a third coincident box: 400 / 300.
        assert!(close(p.density_with(xywh(0.0, 0.0, 10.0, 10.0)), 400.0 / 300.0));
        assert_eq!(p, before);
    }

    #[test]
    fn density_without_only_member_is_zero() {
        let mut p: Pile<u32> = Pile::new();
        p.add_member(1, xywh(0.0, 0.0, 10.0, 10.0));
        assert_eq!(p.density_without(&1), 0.0);
    }

    #[test]
    fn merge_density_unions_both_piles() {
        let mut a: Pile<u32> = Pile::new();
        a.add_member(1, xywh(0.0, 0.0, 10.0, 10.0));
        let mut b: Pile<u32> = Pile::new();
        b.add_member(2, xywh(0.0, 0.0, 10.0, 10.0));
        b.add_member(3, xywh(0.0, 0.0, 10.0, 10.0));
        assert_eq!(Pile::merge_density(&a, &b), 3.0);
        assert_eq!(Pile::merge_density(&a, &Pile::new()), 1.0);
    }

    #[test]
    fn refresh_reads_new_rectangles() {
        let mut p: Pile<u32> = Pile::new();
        p.add_member(1, xywh(0.0, 0.0, 10.0, 10.0));
        p.add_member(2, xywh(0.0, 0.0, 10.0, 10.0));
        assert_eq!(p.density(), 2.0);
        p.refresh(|id| (*id == 2).then(|| xywh(10.0, 0.0, 10.0, 10.0)));
        assert_eq!(p.density(), 1.0);
        assert_eq!(p.member_bounds(&2), Some(xywh(10.0, 0.0, 10.0, 10.0)));
        assert_eq!(p.members().collect::<Vec<_>>(), vec![1, 2]);
    }
}
