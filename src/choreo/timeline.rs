// timeline.rs - Scheduled actions as data
//
// Steps carry absolute offsets from run start. The builder accumulates a
// running offset, so scripts are written as "wait N ms, then do X".

use serde::{Deserialize, Serialize};

use crate::sim::Operator;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Narration only.
    Cue,
    Apply(Operator),
    /// Ends the run; later steps never fire.
    Finish,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Step {
    pub offset_ms: f64,
    pub action: Action,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub announcement: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Timeline {
    steps: Vec<Step>,
}

impl Timeline {
    pub fn steps(&self) -> &[Step] { &self.steps }
    pub fn len(&self) -> usize { self.steps.len() }
    pub fn is_empty(&self) -> bool { self.steps.is_empty() }

    /// Offset of the last step.
    pub fn duration_ms(&self) -> f64 {
        self.steps.last().map_or(0.0, |s| s.offset_ms)
    }

    pub fn announcements(&self) -> impl Iterator<Item = &str> {
        self.steps.iter().filter_map(|s| s.announcement.as_deref())
    }
}

#[derive(Debug, Default)]
pub struct TimelineBuilder {
    cursor_ms: f64,
    steps: Vec<Step>,
}

impl TimelineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `action` `delay_ms` after the previous step.
    pub fn step(&mut self, delay_ms: f64, action: Action, announcement: Option<&str>) -> &mut Self {
        self.cursor_ms += delay_ms.max(0.0);
        self.steps.push(Step {
            offset_ms: self.cursor_ms,
            action,
            announcement: announcement.map(str::to_string),
        });
        self
    }

    pub fn apply(&mut self, delay_ms: f64, op: Operator) -> &mut Self {
        self.step(delay_ms, Action::Apply(op), None)
    }

    pub fn cue(&mut self, delay_ms: f64, text: &str) -> &mut Self {
        self.step(delay_ms, Action::Cue, Some(text))
    }

    pub fn finish(&mut self, delay_ms: f64, text: Option<&str>) -> &mut Self {
        self.step(delay_ms, Action::Finish, text)
    }

    pub fn build(&mut self) -> Timeline {
        self.cursor_ms = 0.0;
        Timeline { steps: std::mem::take(&mut self.steps) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::Point;

    #[test]
    fn test_offsets_accumulate() {
        let op = Operator::Tine { from: Point::ZERO, to: Point::new(1.0, 1.0), force: 1.0 };
        let timeline = TimelineBuilder::new()
            .cue(0.0, "hello")
            .apply(100.0, op)
            .apply(100.0, op)
            .cue(500.0, "middle")
            .finish(2000.0, None)
            .build();

        let offsets: Vec<f64> = timeline.steps().iter().map(|s| s.offset_ms).collect();
        assert_eq!(offsets, [0.0, 100.0, 200.0, 700.0, 2700.0]);
        assert_eq!(timeline.duration_ms(), 2700.0);
        assert_eq!(timeline.announcements().collect::<Vec<_>>(), ["hello", "middle"]);
        assert_eq!(timeline.steps()[4].action, Action::Finish);
    }

    #[test]
    fn test_negative_delay_never_rewinds() {
        let timeline = TimelineBuilder::new().cue(300.0, "a").cue(-100.0, "b").build();
        assert_eq!(timeline.steps()[1].offset_ms, 300.0);
    }

    #[test]
    fn test_empty() {
        let timeline = TimelineBuilder::new().build();
        assert!(timeline.is_empty());
        assert_eq!(timeline.duration_ms(), 0.0);
    }
}
