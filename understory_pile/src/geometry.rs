// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rectangle helpers shared by the clustering passes.
//!
//! Rectangles are world-space [`Rect`]s and are assumed to be normalized
//! (`x0 <= x1`, `y0 <= y1`) and finite. Debug builds may assert.

use alloc::vec;
use alloc::vec::Vec;

use kurbo::Rect;

/// Whether two rectangles touch or overlap. Shared edges count as touching.
#[inline]
pub fn touches(a: Rect, b: Rect) -> bool {
    a.x0 <= b.x1 && b.x0 <= a.x1 && a.y0 <= b.y1 && b.y0 <= a.y1
}

/// Density of a set of boxes from the sum of their areas and the bounds of their union.
///
/// Returns `0.0` when the union has no area.
#[inline]
pub fn density(area_sum: f64, union: Rect) -> f64 {
    let area = union.area();
    if area > 0.0 { area_sum / area } else { 0.0 }
}

/// Density of two boxes taken as a pair: `(area(a) + area(b)) / area(a ∪ b)`.
///
/// Two boxes that merely touch have a pair density of at most `1.0`; anything
/// above that means they overlap.
#[inline]
pub fn pair_density(a: Rect, b: Rect) -> f64 {
    density(a.area() + b.area(), a.union(b))
}

/// A group of rectangles produced by [`merge_touching`].
#[derive(Clone, Debug, PartialEq)]
pub struct RectGroup {
    /// Union of every rectangle in the group.
    pub bounds: Rect,
    /// Indices into the input slice, ascending.
    pub members: Vec<usize>,
}

/// Merge rectangles into groups whose union bounds are pairwise disjoint.
///
/// Two rectangles land in the same group when they touch, either directly or
/// through the union bounds of a group one of them already belongs to. Groups are
/// returned ordered by their lowest member index.
///
/// ```
/// use kurbo::Rect;
/// use understory_pile::geometry::merge_touching;
///
/// let groups = merge_touching(&[
///     Rect::new(0.0, 0.0, 10.0, 10.0),
///     Rect::new(50.0, 0.0, 60.0, 10.0),
///     Rect::new(8.0, 8.0, 12.0, 12.0),
/// ]);
/// assert_eq!(groups.len(), 2);
/// assert_eq!(groups[0].members, vec![0, 2]);
/// assert_eq!(groups[1].members, vec![1]);
/// ```
pub fn merge_touching(rects: &[Rect]) -> Vec<RectGroup> {
    let mut groups: Vec<RectGroup> = rects
        .iter()
        .enumerate()
        .map(|(i, r)| RectGroup {
            bounds: *r,
            members: vec![i],
        })
        .collect();

    // Growing a union can make it touch a group that was disjoint before, so keep
    // folding until a full scan finds nothing.
    let mut changed = true;
    while changed {
        changed = false;
        'scan: for i in 0..groups.len() {
            for j in (i + 1)..groups.len() {
                if touches(groups[i].bounds, groups[j].bounds) {
                    let other = groups.remove(j);
                    let group = &mut groups[i];
                    group.bounds = group.bounds.union(other.bounds);
                    group.members.extend(other.members);
                    changed = true;
                    break 'scan;
                }
            }
        }
    }

    for group in &mut groups {
        group.members.sort_unstable();
    }
    groups
}

/// Index of the group holding the most rectangles; ties go to the earlier group.
///
/// Returns `None` for an empty slice.
pub fn dominant_group(groups: &[RectGroup]) -> Option<usize> {
    let mut best: Option<(usize, usize)> = None;
    for (i, group) in groups.iter().enumerate() {
        match best {
            Some((_, count)) if count >= group.members.len() => {}
            _ => best = Some((i, group.members.len())),
        }
    }
    best.map(|(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn xywh(x: f64, y: f64, w: f64, h: f64) -> Rect {
        Rect::new(x, y, x + w, y + h)
    }

    #[test]
    fn shared_edge_touches() {
        assert!(touches(xywh(0.0, 0.0, 10.0, 10.0), xywh(10.0, 0.0, 10.0, 10.0)));
        assert!(!touches(xywh(0.0, 0.0, 10.0, 10.0), xywh(10.5, 0.0, 10.0, 10.0)));
    }

    #[test]
    fn touching_pair_is_not_dense() {
        let d = pair_density(xywh(0.0, 0.0, 10.0, 10.0), xywh(10.0, 0.0, 10.0, 10.0));
        assert_eq!(d, 1.0);
    }

    #[test]
    fn overlapping_pair_is_dense() {
        // Union is 12x12 = 144; summed area is 200.
        let d = pair_density(xywh(0.0, 0.0, 10.0, 10.0), xywh(2.0, 2.0, 10.0, 10.0));
        assert!(d > 1.38 && d < 1.39, "unexpected density {d}");
    }

    #[test]
    fn coincident_boxes_double_count() {
        let r = xywh(5.0, 5.0, 4.0, 4.0);
        assert_eq!(pair_density(r, r), 2.0);
    }

    #[test]
    fn empty_union_has_zero_density() {
        let p = Rect::new(3.0, 3.0, 3.0, 3.0);
        assert_eq!(density(0.0, p), 0.0);
        assert_eq!(pair_density(p, p), 0.0);
    }

    #[test]
    fn merge_chains_through_grown_unions() {
        // The third box only touches the union of the first two, not either box alone.
        let rects = [
            xywh(0.0, 0.0, 10.0, 2.0),
            xywh(8.0, 0.0, 2.0, 10.0),
            xywh(1.0, 9.0, 2.0, 2.0),
        ];
        let groups = merge_touching(&rects);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].members, vec![0, 1, 2]);
        assert_eq!(groups[0].bounds, Rect::new(0.0, 0.0, 10.0, 11.0));
    }

    #[test]
    fn dominant_prefers_larger_then_earlier() {
        let rects = [
            xywh(0.0, 0.0, 1.0, 1.0),
            xywh(100.0, 0.0, 10.0, 10.0),
            xywh(105.0, 5.0, 10.0, 10.0),
        ];
        let groups = merge_touching(&rects);
        assert_eq!(groups.len(), 2);
        assert_eq!(dominant_group(&groups), Some(1));

        let tied = merge_touching(&[xywh(0.0, 0.0, 1.0, 1.0), xywh(5.0, 5.0, 1.0, 1.0)]);
        assert_eq!(dominant_group(&tied), Some(0));
        assert_eq!(dominant_group(&[]), None);
    }
}
