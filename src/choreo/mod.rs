// choreo/ - Scripted demonstration playback
//
// A run is a Timeline plus the time it started. `advance` is called from
// the frame callback with the current time and fires every step that has
// come due, in order, exactly once. Cancelling drops the run, so pending
// steps cannot fire after a clear or teardown.
//
//   Idle --start--> Running --last step / Finish / cancel--> Idle

mod script;
mod timeline;

pub use script::{AFTER_DROPS, AFTER_STYLUS, DEMO_PALETTE, DEMO_STEPS, FAREWELL, WELCOME, demo_timeline};
pub use timeline::{Action, Step, Timeline, TimelineBuilder};

use crate::narration::Narrator;
use crate::sim::Basin;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChoreoState {
    Idle,
    Running,
}

struct Run {
    started_ms: f64,
    timeline: Timeline,
    next: usize,
}

#[derive(Default)]
pub struct Choreographer {
    run: Option<Run>,
}

impl Choreographer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ChoreoState {
        if self.run.is_some() { ChoreoState::Running } else { ChoreoState::Idle }
    }

    pub fn is_running(&self) -> bool {
        self.run.is_some()
    }

    /// Steps scheduled but not yet fired.
    pub fn pending(&self) -> usize {
        self.run.as_ref().map_or(0, |r| r.timeline.len() - r.next)
    }

    /// Begin a run at `now_ms`. Ignored while one is already running; the
    /// timeline is only built once the run is accepted.
    pub fn start(
        &mut self,
        now_ms: f64,
        basin: &mut Basin,
        build: impl FnOnce() -> Timeline,
    ) -> bool {
        if self.is_running() {
            log::debug!("choreo: start ignored, {} steps still pending", self.pending());
            return false;
        }

        let timeline = build();
        if timeline.is_empty() {
            log::warn!("choreo: empty timeline, nothing to play");
            return false;
        }
        basin.clear();

        log::info!(
            "choreo: starting {} steps over {:.1}s",
            timeline.len(),
            timeline.duration_ms() / 1000.0
        );
        self.run = Some(Run { started_ms: now_ms, timeline, next: 0 });
        true
    }

    /// Fire every step due by `now_ms`. Returns how many fired.
    pub fn advance(&mut self, now_ms: f64, basin: &mut Basin, narrator: &mut dyn Narrator) -> usize {
        let Some(run) = self.run.as_mut() else { return 0 };
        let elapsed = now_ms - run.started_ms;
        if !elapsed.is_finite() {
            return 0;
        }

        let mut fired = 0;
        let mut finished = false;

        while let Some(step) = run.timeline.steps().get(run.next) {
            if step.offset_ms > elapsed { break; }
            run.next += 1;
            fired += 1;

            if let Some(text) = &step.announcement {
                narrator.announce(text);
            }
            match &step.action {
                Action::Cue => {}
                Action::Apply(op) => basin.apply(op),
                Action::Finish => {
                    finished = true;
                    break;
                }
            }
        }

        if finished || run.next >= run.timeline.len() {
            log::info!("choreo: finished after {:.1}s", elapsed / 1000.0);
            self.run = None;
        }
        fired
    }

    /// Stop the run; nothing still pending will ever fire. Returns how many
    /// steps were dropped.
    pub fn cancel(&mut self) -> usize {
        let dropped = self.pending();
        if self.run.take().is_some() {
            log::info!("choreo: cancelled with {dropped} steps pending");
        }
        dropped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::config::PhysicsConfig;
    use crate::geom::Point;
    use crate::narration::Transcript;
    use crate::sim::Operator;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn drop_at(x: f32) -> Operator {
        Operator::Drop { center: Point::new(x, 100.0), radius: 10.0, color: Color::BLACK }
    }

    fn short_script() -> Timeline {
        TimelineBuilder::new()
            .cue(0.0, "go")
            .apply(100.0, drop_at(100.0))
            .apply(100.0, drop_at(200.0))
            .apply(100.0, drop_at(300.0))
            .finish(500.0, Some("done"))
            .build()
    }

    fn basin() -> Basin {
        Basin::new(PhysicsConfig::default())
    }

    #[test]
    fn test_fires_on_virtual_clock() {
        let mut choreo = Choreographer::new();
        let mut basin = basin();
        let mut voice = Transcript::default();

        assert!(choreo.start(1000.0, &mut basin, short_script));
        assert_eq!(choreo.state(), ChoreoState::Running);
        assert_eq!(choreo.pending(), 5);

        assert_eq!(choreo.advance(1000.0, &mut basin, &mut voice), 1);
        assert_eq!(voice.lines(), ["go"]);
        assert!(basin.is_empty());

        assert_eq!(choreo.advance(1150.0, &mut basin, &mut voice), 1);
        assert_eq!(basin.len(), 1);

        // Re-asking for the same instant fires nothing twice
        assert_eq!(choreo.advance(1150.0, &mut basin, &mut voice), 0);

        // A long frame catches up on everything due, in order
        assert_eq!(choreo.advance(1400.0, &mut basin, &mut voice), 2);
        let xs: Vec<f32> = basin.drops().iter().map(|d| d.center().x).collect();
        assert_eq!(xs, [100.0, 200.0, 300.0]);

        assert_eq!(choreo.advance(1799.0, &mut basin, &mut voice), 0);
        assert_eq!(choreo.advance(1800.0, &mut basin, &mut voice), 1);
        assert_eq!(voice.lines(), ["go", "done"]);
        assert_eq!(choreo.state(), ChoreoState::Idle);
        assert_eq!(choreo.pending(), 0);
    }

    #[test]
    fn test_start_is_idempotent_while_running() {
        let mut choreo = Choreographer::new();
        let mut basin = basin();
        let mut voice = Transcript::default();

        choreo.start(0.0, &mut basin, short_script);
        choreo.advance(250.0, &mut basin, &mut voice);
        assert_eq!(basin.len(), 2);
        assert_eq!(choreo.pending(), 2);

        let mut rebuilt = false;
        assert!(!choreo.start(300.0, &mut basin, || {
            rebuilt = true;
            short_script()
        }));
        assert!(!rebuilt);
        assert_eq!(basin.len(), 2);
        assert_eq!(choreo.pending(), 2);

        // Original schedule still applies, measured from the first start
        assert_eq!(choreo.advance(300.0, &mut basin, &mut voice), 1);
    }

    #[test]
    fn test_start_clears_basin() {
        let mut choreo = Choreographer::new();
        let mut basin = basin();
        basin.add_drop(Point::new(10.0, 10.0), 5.0, Color::BLACK);

        choreo.start(0.0, &mut basin, short_script);
        assert!(basin.is_empty());
    }

    #[test]
    fn test_cancel_stops_pending_steps() {
        let mut choreo = Choreographer::new();
        let mut basin = basin();
        let mut voice = Transcript::default();

        choreo.start(0.0, &mut basin, short_script);
        choreo.advance(150.0, &mut basin, &mut voice);
        assert_eq!(choreo.cancel(), 3);
        assert_eq!(choreo.state(), ChoreoState::Idle);

        basin.clear();
        assert_eq!(choreo.advance(10_000.0, &mut basin, &mut voice), 0);
        assert!(basin.is_empty());
        assert_eq!(voice.lines(), ["go"]);

        // And a fresh run is allowed afterwards
        assert!(choreo.start(20_000.0, &mut basin, short_script));
    }

    #[test]
    fn test_finish_drops_trailing_steps() {
        let script = || {
            TimelineBuilder::new()
                .apply(10.0, drop_at(1.0))
                .finish(10.0, None)
                .apply(10.0, drop_at(2.0))
                .build()
        };
        let mut choreo = Choreographer::new();
        let mut basin = basin();
        choreo.start(0.0, &mut basin, script);

        assert_eq!(choreo.advance(100.0, &mut basin, &mut Transcript::default()), 2);
        assert!(!choreo.is_running());
        assert_eq!(basin.len(), 1);
    }

    #[test]
    fn test_empty_timeline_is_not_started() {
        let mut choreo = Choreographer::new();
        let mut basin = basin();
        basin.add_drop(Point::new(10.0, 10.0), 5.0, Color::BLACK);

        assert!(!choreo.start(0.0, &mut basin, Timeline::default));
        assert!(!choreo.is_running());
        // A refused start leaves existing ink alone
        assert_eq!(basin.len(), 1);
    }

    #[test]
    fn test_clock_going_backwards_or_nan() {
        let mut choreo = Choreographer::new();
        let mut basin = basin();
        let mut voice = Transcript::default();
        choreo.start(500.0, &mut basin, short_script);

        assert_eq!(choreo.advance(100.0, &mut basin, &mut voice), 0);
        assert_eq!(choreo.advance(f64::NAN, &mut basin, &mut voice), 0);
        assert_eq!(choreo.pending(), 5);
    }

    #[test]
    fn test_full_demo_plays_out() {
        let mut choreo = Choreographer::new();
        let mut basin = basin();
        let mut voice = Transcript::default();
        let mut rng = SmallRng::seed_from_u64(2024);

        choreo.start(0.0, &mut basin, || demo_timeline(&mut rng, 800.0, 600.0));
        assert_eq!(choreo.pending(), DEMO_STEPS);

        // 60 fps virtual clock
        let mut fired = 0;
        let mut frame = 0;
        while choreo.is_running() {
            frame += 1;
            fired += choreo.advance(frame as f64 * 1000.0 / 60.0, &mut basin, &mut voice);
            assert!(frame < 2000, "demo never finished");
        }

        assert_eq!(fired, DEMO_STEPS);
        assert_eq!(basin.len(), 40);
        assert_eq!(voice.lines(), [WELCOME, AFTER_DROPS, AFTER_STYLUS, FAREWELL]);
        for drop in basin.drops() {
            assert_eq!(drop.boundary().len(), 300);
            assert!(drop.boundary().iter().all(|p| p.is_finite()));
        }
    }
}
