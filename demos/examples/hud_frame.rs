// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Selector HUD frame.
//!
//! Run a few frames of the selector over a small scene: one crowd that piles up and
//! some loners that land in the per-kind stacks. Then hover and click a button.
//!
//! Run:
//! - `RUST_LOG=understory_pile_hud=debug cargo run -p understory_pile_demos --example hud_frame`

use kurbo::{Affine, Point, Rect, Vec2};
use tracing_subscriber::EnvFilter;
use understory_pile::{EntityKind, EntitySnapshot, IconId};
use understory_pile_hud::{HoverEvent, NoSelection, PointerState, Selector, SelectorConfig};

fn scene() -> Vec<EntitySnapshot<u32>> {
    let soldier = |id: u32, x: f64, y: f64| {
        EntitySnapshot::new(id, Rect::new(x, y, x + 20.0, y + 40.0))
            .with_kind(EntityKind(0))
            .with_icon(IconId(id))
    };
    vec![
        soldier(1, 200.0, 200.0),
        soldier(2, 206.0, 204.0),
        soldier(3, 212.0, 201.0).with_priority(0.4),
        soldier(4, 600.0, 200.0),
        soldier(5, 700.0, 220.0).with_kind(EntityKind(2)),
        soldier(6, 900.0, 210.0).with_alive(false),
    ]
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut selector = Selector::new(SelectorConfig::default());
    selector.set_position(Point::new(0.0, 720.0), Point::new(1280.0, 720.0), 1.0);
    selector.animate_in(false);

    // World is panned by 40px; the HUD sees the projected anchors.
    let camera = Affine::translate(Vec2::new(40.0, 0.0));
    let entities = scene();
    let dt = 1.0 / 60.0;

    selector.update(dt, &entities, &camera, &PointerState::default(), &NoSelection);
    println!("stats: {:?}", selector.last_stats());
    println!("opacity after one frame: {:.2}", selector.opacity());

    for (id, grid) in selector.grids() {
        println!("{id:?}: panel={:?} order={:?}", grid.panel(), grid.order());
        for button in grid.buttons() {
            println!("    button {} at {:?}", button.entity, button.bounds);
        }
    }
    for stack in selector.stacks().stacks() {
        println!(
            "stack {:?}: frame={:?} members={:?}",
            stack.kind(),
            stack.frame(),
            stack.members()
        );
    }

    // Hover the first button of the first pile, then click it.
    let Some(target) = selector
        .grids()
        .next()
        .and_then(|(_, grid)| grid.buttons().first())
        .map(|button| button.bounds.center())
    else {
        println!("no pile to hover");
        return;
    };

    selector.update(dt, &entities, &camera, &PointerState::at(target), &NoSelection);
    for event in selector.hover_events() {
        match event {
            HoverEvent::Enter(t) => println!("enter {t:?}"),
            HoverEvent::Leave(t) => println!("leave {t:?}"),
        }
    }
    println!("tooltip source: {:?}", selector.hover_tooltip_source());

    selector.update(dt, &entities, &camera, &PointerState::pressed_at(target), &NoSelection);
    println!(
        "clicked: {:?} (mouse over: {})",
        selector.clicked_entity(),
        selector.is_mouse_over()
    );

    selector.animate_out(true);
    println!("faded out: opacity={:.2}", selector.opacity());
}
