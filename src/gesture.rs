//! Swipe gesture interpreter for the lightbox image.
//!
//! A single pointer drives a [`GestureState`]: pointer-down starts a
//! [`DragSession`], moves update the tracked offset and velocity, and release
//! classifies the drag into an [`Outcome`] through the ordered
//! [`SWIPE_RULES`] list. Classification is a pure function of displacement,
//! velocity, and viewport width so it can be exercised with synthetic input.

#[cfg(test)]
#[path = "gesture_test.rs"]
mod gesture_test;

use crate::config::ViewerConfig;

/// One pointer sample in client coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub pointer_id: i32,
    pub x: f64,
    pub y: f64,
    /// High-resolution timestamp in milliseconds.
    pub t_ms: f64,
}

impl Sample {
    #[must_use]
    pub fn new(pointer_id: i32, x: f64, y: f64, t_ms: f64) -> Self {
        Self { pointer_id, x, y, t_ms }
    }
}

/// State of one drag between pointer-down and release.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    /// Pointer that owns the session; other pointers are ignored.
    pub pointer_id: i32,
    pub start_x: f64,
    pub start_y: f64,
    /// `x` of the last accepted sample.
    pub last_x: f64,
    /// Timestamp of the last accepted sample.
    pub last_t_ms: f64,
    /// Horizontal velocity (px/s) between the last two accepted samples.
    pub vx: f64,
}

impl DragSession {
    fn start(sample: Sample) -> Self {
        Self {
            pointer_id: sample.pointer_id,
            start_x: sample.x,
            start_y: sample.y,
            last_x: sample.x,
            last_t_ms: sample.t_ms,
            vx: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum GestureState {
    #[default]
    Idle,
    Dragging(DragSession),
}

/// Result of classifying a release.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Show the next panel (swipe or fling to the left).
    Advance,
    /// Show the previous panel (swipe or fling to the right).
    Retreat,
    /// Snap back without navigating.
    Cancel,
}

impl Outcome {
    /// Navigator step for this outcome.
    #[must_use]
    pub fn delta(self) -> Option<i64> {
        match self {
            Self::Advance => Some(1),
            Self::Retreat => Some(-1),
            Self::Cancel => None,
        }
    }
}

/// Numeric limits used by the interpreter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwipeThresholds {
    pub threshold_px: f64,
    pub fling_velocity_px_s: f64,
    pub velocity_exit_fraction: f64,
    pub vertical_intent_ratio: f64,
    pub min_sample_interval_s: f64,
}

impl Default for SwipeThresholds {
    fn default() -> Self {
        Self::from(&ViewerConfig::default())
    }
}

impl From<&ViewerConfig> for SwipeThresholds {
    fn from(config: &ViewerConfig) -> Self {
        Self {
            threshold_px: config.swipe_threshold_px,
            fling_velocity_px_s: config.fling_velocity_px_s,
            velocity_exit_fraction: config.velocity_exit_fraction,
            vertical_intent_ratio: config.vertical_intent_ratio,
            min_sample_interval_s: config.min_sample_interval_s,
        }
    }
}

/// Measurements a rule is evaluated against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Release {
    /// Horizontal displacement from the drag start.
    pub dx: f64,
    /// Last recorded horizontal velocity, px/s.
    pub vx: f64,
    pub viewport_width: f64,
}

/// A classification rule. Rules are tried in order; the first match wins.
pub struct SwipeRule {
    pub outcome: Outcome,
    pub matches: fn(&Release, &SwipeThresholds) -> bool,
}

fn swiped_left(r: &Release, t: &SwipeThresholds) -> bool {
    r.dx <= -t.threshold_px || r.vx <= -t.fling_velocity_px_s || fast_exit(r, t)
}

/// Fling faster than a fraction of the viewport per second. Off when the
/// width is unknown (zero, negative, or not finite).
fn fast_exit(r: &Release, t: &SwipeThresholds) -> bool {
    r.viewport_width.is_finite()
        && r.viewport_width > 0.0
        && r.vx.abs() > r.viewport_width * t.velocity_exit_fraction
}

fn swiped_right(r: &Release, t: &SwipeThresholds) -> bool {
    r.dx >= t.threshold_px || r.vx >= t.fling_velocity_px_s
}

/// Ordered rule list. Anything unmatched is [`Outcome::Cancel`].
///
/// The fast-exit clause sits in the advance rule, so a quick rightward fling
/// on a narrow viewport still advances.
pub const SWIPE_RULES: [SwipeRule; 2] = [
    SwipeRule { outcome: Outcome::Advance, matches: swiped_left },
    SwipeRule { outcome: Outcome::Retreat, matches: swiped_right },
];

/// Classify a release.
#[must_use]
pub fn classify(dx: f64, vx: f64, viewport_width: f64, thresholds: &SwipeThresholds) -> Outcome {
    let release = Release { dx, vx, viewport_width };
    SWIPE_RULES
        .iter()
        .find(|rule| (rule.matches)(&release, thresholds))
        .map_or(Outcome::Cancel, |rule| rule.outcome)
}

/// Tracks at most one drag and classifies it on release.
#[derive(Debug, Clone, Default)]
pub struct GestureInterpreter {
    state: GestureState,
    thresholds: SwipeThresholds,
}

impl GestureInterpreter {
    #[must_use]
    pub fn new(thresholds: SwipeThresholds) -> Self {
        Self { state: GestureState::Idle, thresholds }
    }

    #[must_use]
    pub fn state(&self) -> GestureState {
        self.state
    }

    #[must_use]
    pub fn thresholds(&self) -> &SwipeThresholds {
        &self.thresholds
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self.state, GestureState::Dragging(_))
    }

    /// Start a drag. Returns `false` (and changes nothing) if one is active.
    pub fn begin(&mut self, sample: Sample) -> bool {
        if self.is_dragging() {
            log::debug!("gesture: ignoring pointer {} while dragging", sample.pointer_id);
            return false;
        }
        self.state = GestureState::Dragging(DragSession::start(sample));
        true
    }

    /// Feed a movement sample. Returns the new horizontal offset, or `None`
    /// when the sample is ignored (idle, foreign pointer, or vertical intent).
    pub fn update(&mut self, sample: Sample) -> Option<f64> {
        let GestureState::Dragging(session) = &mut self.state else {
            return None;
        };
        if session.pointer_id != sample.pointer_id {
            return None;
        }
        let dx = sample.x - session.start_x;
        let dy = sample.y - session.start_y;
        if dy.abs() > dx.abs() * self.thresholds.vertical_intent_ratio {
            return None;
        }

        let dt_s = ((sample.t_ms - session.last_t_ms) / 1000.0).max(self.thresholds.min_sample_interval_s);
        session.vx = (sample.x - session.last_x) / dt_s;
        session.last_x = sample.x;
        session.last_t_ms = sample.t_ms;
        Some(dx)
    }

    /// End the drag and classify it. `None` if no drag owned by this pointer
    /// was active.
    pub fn release(&mut self, sample: Sample, viewport_width: f64) -> Option<Outcome> {
        let GestureState::Dragging(session) = self.state else {
            return None;
        };
        if session.pointer_id != sample.pointer_id {
            return None;
        }
        self.state = GestureState::Idle;
        let dx = sample.x - session.start_x;
        Some(classify(dx, session.vx, viewport_width, &self.thresholds))
    }

    /// Drop any active drag without classifying. Returns whether one existed.
    pub fn abort(&mut self) -> bool {
        matches!(std::mem::take(&mut self.state), GestureState::Dragging(_))
    }
}
