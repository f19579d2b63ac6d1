// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property tests for the pile set invariants.

use std::collections::BTreeSet;

use kurbo::Rect;
use proptest::prelude::*;
use understory_pile::geometry::merge_touching;
use understory_pile::{EntityFrame, EntitySnapshot, PileSet};

fn snapshot() -> impl Strategy<Value = (Rect, f64, bool)> {
    (
        0_u8..60,
        0_u8..60,
        1_u8..20,
        1_u8..20,
        prop_oneof![4 => Just(1.0), 1 => Just(0.3)],
        prop_oneof![9 => Just(true), 1 => Just(false)],
    )
        .prop_map(|(x, y, w, h, priority, alive)| {
            let (x, y) = (f64::from(x), f64::from(y));
            (
                Rect::new(x, y, x + f64::from(w), y + f64::from(h)),
                priority,
                alive,
            )
        })
}

fn frame_strategy() -> impl Strategy<Value = Vec<EntitySnapshot<u32>>> {
    prop::collection::vec(snapshot(), 0..24).prop_map(|boxes| {
        (0_u32..)
            .zip(boxes)
            .map(|(i, (rect, priority, alive))| {
                EntitySnapshot::new(i, rect)
                    .with_priority(priority)
                    .with_alive(alive)
            })
            .collect()
    })
}

fn membership(set: &PileSet<u32>) -> Vec<Vec<u32>> {
    set.iter().map(|(_, p)| p.members().collect()).collect()
}

fn check_invariants(set: &PileSet<u32>, entities: &[EntitySnapshot<u32>]) {
    let frame = EntityFrame::new(entities);
    let mut seen = BTreeSet::new();
    for (id, pile) in set.iter() {
        assert!(!pile.is_empty(), "empty pile {id:?} survived");
        assert!(set.get(id).is_some(), "iterated pile {id:?} is not reachable");

        let mut area_sum = 0.0;
        let mut bounds: Option<Rect> = None;
        for member in pile.members() {
            assert!(seen.insert(member), "entity {member} is in two piles");
            assert_eq!(set.pile_of(&member), Some(id), "membership map disagrees");
            let e = frame.get(&member).expect("piled entity is in the frame");
            assert!(e.alive, "dead entity {member} is piled");
            assert_eq!(pile.member_bounds(&member), Some(e.bounds));
            area_sum += e.bounds.area();
            bounds = Some(bounds.map_or(e.bounds, |b| b.union(e.bounds)));
        }
        let bounds = bounds.expect("pile has members");
        assert_eq!(pile.bounds(), bounds);
        let expected = area_sum / bounds.area();
        assert!(
            (pile.density() - expected).abs() < 1e-9,
            "cached density {} != {expected}",
            pile.density()
        );
        if pile.len() > 1 {
            assert!(
                pile.density() >= set.config().destruction_density,
                "sparse pile {id:?} kept {} members",
                pile.len()
            );
        }
    }
    for e in entities {
        assert_eq!(
            set.contains_entity(&e.id),
            seen.contains(&e.id),
            "membership map has a stale entry for {}",
            e.id
        );
    }
}

proptest! {
    #[test]
    fn maintain_keeps_a_partition(entities in frame_strategy()) {
        let mut set = PileSet::new();
        set.maintain(&EntityFrame::new(&entities));
        check_invariants(&set, &entities);
    }

    #[test]
    fn maintain_reaches_a_fixed_point(entities in frame_strategy()) {
        let mut set = PileSet::new();
        set.maintain(&EntityFrame::new(&entities));
        let first = membership(&set);
        let again = set.maintain(&EntityFrame::new(&entities));
        prop_assert!(again.is_quiet(), "second pass changed state: {:?}", again);
        prop_assert_eq!(membership(&set), first);
    }

    #[test]
    fn piles_stay_single_touching_groups(entities in frame_strategy()) {
        let mut set = PileSet::new();
        set.maintain(&EntityFrame::new(&entities));
        for (id, pile) in set.iter() {
            let rects: Vec<Rect> = pile.entries().map(|(_, r)| r).collect();
            prop_assert_eq!(merge_touching(&rects).len(), 1, "pile {:?} fell apart", id);
        }
    }

    #[test]
    fn invariants_hold_across_frames(frames in prop::collection::vec(frame_strategy(), 1..6)) {
        let mut set = PileSet::new();
        for entities in &frames {
            set.maintain(&EntityFrame::new(entities));
            check_invariants(&set, entities);
        }
    }
}
