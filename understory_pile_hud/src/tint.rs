// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Health colours for member buttons.
//!
//! Priorities are read as health fractions in `0.0..=1.0`; values outside are clamped.

use peniko::Color;

const RED: Color = Color::new([1.0, 0.0, 0.0, 1.0]);
const YELLOW: Color = Color::new([1.0, 1.0, 0.0, 1.0]);
const GREEN: Color = Color::new([0.0, 1.0, 0.0, 1.0]);

/// Icon tint: red at zero health through yellow to white at full health.
///
/// Dead entities are drawn untinted.
pub fn icon_tint(health: f64, alive: bool) -> Color {
    if !alive {
        return Color::WHITE;
    }
    let h = clamp_unit(health);
    if h > 0.5 {
        lerp(YELLOW, Color::WHITE, (h - 0.5) * 2.0)
    } else {
        lerp(RED, YELLOW, h * 2.0)
    }
}

/// Health bar colour: red, yellow, green, fading to black just below full health.
pub fn health_bar_color(health: f64) -> Color {
    let h = clamp_unit(health);
    if h > 0.9 {
        lerp(GREEN, Color::BLACK, (h - 0.9) * 10.0)
    } else if h > 0.5 {
        lerp(YELLOW, GREEN, (h - 0.5) * 2.0)
    } else {
        lerp(RED, YELLOW, h * 2.0)
    }
}

/// Whether a health bar is drawn at all: alive and neither empty nor full.
pub fn shows_health_bar(health: f64, alive: bool) -> bool {
    alive && health > 0.0 && health < 1.0
}

/// Component-wise interpolation in sRGB, alpha included.
fn lerp(a: Color, b: Color, t: f64) -> Color {
    #[allow(
        clippy::cast_possible_truncation,
        reason = "Colour components are f32; t is already in 0..=1."
    )]
    let t = t as f32;
    let [r0, g0, b0, a0] = a.components;
    let [r1, g1, b1, a1] = b.components;
    Color::new([
        r0 + (r1 - r0) * t,
        g0 + (g1 - g0) * t,
        b0 + (b1 - b0) * t,
        a0 + (a1 - a0) * t,
    ])
}

fn clamp_unit(v: f64) -> f64 {
    v.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Color, b: Color) -> bool {
        a.components
            .iter()
            .zip(b.components.iter())
            .all(|(x, y)| {
                let d = x - y;
                -1e-6 < d && d < 1e-6
            })
    }

    #[test]
    fn icon_tint_ramps_red_yellow_white() {
        assert!(approx(icon_tint(0.0, true), RED));
        assert!(approx(icon_tint(0.5, true), YELLOW));
        assert!(approx(icon_tint(1.0, true), Color::WHITE));
        assert!(approx(icon_tint(0.25, true), Color::new([1.0, 0.5, 0.0, 1.0])));
    }

    #[test]
    fn dead_entities_are_untinted() {
        assert!(approx(icon_tint(0.1, false), Color::WHITE));
    }

    #[test]
    fn bar_colour_bands() {
        assert!(approx(health_bar_color(0.0), RED));
        assert!(approx(health_bar_color(0.5), YELLOW));
        assert!(approx(health_bar_color(0.9), lerp(YELLOW, GREEN, 0.8)));
        assert!(approx(health_bar_color(0.9 + 1e-9), GREEN));
        assert!(approx(health_bar_color(1.0), Color::BLACK));
        assert!(approx(health_bar_color(-3.0), RED));
    }

    #[test]
    fn bar_only_for_partial_health() {
        assert!(shows_health_bar(0.5, true));
        assert!(!shows_health_bar(0.5, false));
        assert!(!shows_health_bar(1.0, true));
        assert!(!shows_health_bar(0.0, true));
    }
}
