// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pile basics.
//!
//! Crowd a few entities together, watch them pile up, then walk one away and
//! let the pile shed it.
//!
//! Run:
//! - `RUST_LOG=understory_pile=debug cargo run -p understory_pile_demos --example pile_basics`

use kurbo::{Rect, Vec2};
use tracing_subscriber::EnvFilter;
use understory_pile::{EntityFrame, EntitySnapshot, PileSet};

fn print_piles(piles: &PileSet<u32>) {
    for (id, pile) in piles.iter() {
        let members: Vec<u32> = pile.members().collect();
        println!(
            "  {id:?}: members={members:?} density={:.2} bounds={:?}",
            pile.density(),
            pile.bounds()
        );
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Three overlapping boxes near the origin, one far away.
    let mut entities = vec![
        EntitySnapshot::new(1_u32, Rect::new(0.0, 0.0, 20.0, 40.0)),
        EntitySnapshot::new(2, Rect::new(6.0, 4.0, 26.0, 44.0)),
        EntitySnapshot::new(3, Rect::new(12.0, 2.0, 32.0, 42.0)),
        EntitySnapshot::new(4, Rect::new(300.0, 0.0, 320.0, 40.0)),
    ];

    let mut piles = PileSet::new();
    let stats = piles.maintain(&EntityFrame::new(&entities));
    println!("frame 0: {stats:?}");
    print_piles(&piles);

    // A second pass over the same frame changes nothing.
    let stats = piles.maintain(&EntityFrame::new(&entities));
    println!("frame 1 (unchanged): quiet={}", stats.is_quiet());

    // Walk entity 3 to the right until it falls out of the pile.
    for frame in 2..8 {
        let e = &mut entities[2];
        e.bounds = e.bounds + Vec2::new(10.0, 0.0);
        e.anchor += Vec2::new(10.0, 0.0);
        let stats = piles.maintain(&EntityFrame::new(&entities));
        println!("frame {frame}: 3 in {:?}, {stats:?}", piles.pile_of(&3));
    }
    print_piles(&piles);

    // A wounded straggler keeps a pile of its own.
    entities[3].priority = 0.3;
    piles.maintain(&EntityFrame::new(&entities));
    println!("after wounding 4: 4 in {:?}", piles.pile_of(&4));

    // Removing it outright destroys that pile.
    piles.unregister(&4);
    entities.pop();
    piles.maintain(&EntityFrame::new(&entities));
    println!("after removing 4:");
    print_piles(&piles);
}
