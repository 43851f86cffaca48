// script.rs - The hundred-phase demonstration
//
// Phases: 40 drops laid in a loose field, 40 diagonal stylus lines, then 20
// passes of a vertical comb, with a spoken cue between phases. Timing and
// step count never vary; only drop positions and stylus starts come from
// the rng.

use rand::Rng;

use super::timeline::{Timeline, TimelineBuilder};
use crate::color::Color;
use crate::geom::Point;
use crate::sim::Operator;

pub const DEMO_PALETTE: [Color; 5] = [
    Color::rgb(0x1D, 0x35, 0x57),
    Color::rgb(0x45, 0x7B, 0x9D),
    Color::rgb(0xE6, 0x39, 0x46),
    Color::rgb(0xFF, 0xB7, 0x03),
    Color::rgb(0xF1, 0xFA, 0xEE),
];

pub const WELCOME: &str =
    "Welcome to the marbling basin. A one hundred phase Ebru demonstration is starting.";
pub const AFTER_DROPS: &str =
    "Forty drops now float on the water. Every new drop pushes the older ink outward.";
pub const AFTER_STYLUS: &str =
    "A stylus has been drawn through the colors forty times. Now a comb rakes the whole basin.";
pub const FAREWELL: &str = "The demonstration is complete. The basin is yours.";

const DROP_COUNT: usize = 40;
const DROP_RADIUS: f32 = 60.0;
const DROP_DELAY_MS: f64 = 100.0;

const STYLUS_COUNT: usize = 40;
const STYLUS_FORCE: f32 = 30.0;
const STYLUS_REACH: Point = Point::new(100.0, 100.0);
const STYLUS_DELAY_MS: f64 = 120.0;

const COMB_COUNT: usize = 20;
const COMB_SPACING: f32 = 35.0;
const COMB_FORCE: f32 = 12.0;
const COMB_DELAY_MS: f64 = 200.0;

const INTERLUDE_MS: f64 = 500.0;
const OUTRO_MS: f64 = 2000.0;

/// Total scheduled steps, cues included.
pub const DEMO_STEPS: usize = DROP_COUNT + STYLUS_COUNT + COMB_COUNT + 4;

/// Build the demonstration for a `width` x `height` basin.
pub fn demo_timeline<R: Rng + ?Sized>(rng: &mut R, width: f32, height: f32) -> Timeline {
    let mut t = TimelineBuilder::new();
    t.cue(0.0, WELCOME);

    // Drops stay clear of the rim: middle 3/4 across, middle 2/3 down
    for i in 1..=DROP_COUNT {
        let center = Point::new(
            lerp(width / 8.0, width * 7.0 / 8.0, rng.r#gen()),
            lerp(height / 6.0, height * 5.0 / 6.0, rng.r#gen()),
        );
        let color = DEMO_PALETTE[i % DEMO_PALETTE.len()];
        t.apply(DROP_DELAY_MS, Operator::Drop { center, radius: DROP_RADIUS, color });
    }
    t.cue(INTERLUDE_MS, AFTER_DROPS);

    for _ in 0..STYLUS_COUNT {
        let from = Point::new(rng.r#gen::<f32>() * width, rng.r#gen::<f32>() * height);
        t.apply(STYLUS_DELAY_MS, Operator::Tine { from, to: from + STYLUS_REACH, force: STYLUS_FORCE });
    }
    t.cue(INTERLUDE_MS, AFTER_STYLUS);

    let from = Point::new(width / 2.0, height / 12.0);
    let to = Point::new(width / 2.0, height - height / 12.0);
    for _ in 0..COMB_COUNT {
        t.apply(COMB_DELAY_MS, Operator::Comb { from, to, spacing: COMB_SPACING, force: COMB_FORCE });
    }

    t.finish(OUTRO_MS, Some(FAREWELL));
    t.build()
}

#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 { a + (b - a) * t }
