//! Shared numeric defaults for the viewer crate.
//!
//! Every value here seeds a field of [`crate::config::ViewerConfig`]; code
//! outside `config` reads the config, not these constants.

// ── Swipe classification ────────────────────────────────────────

/// Horizontal displacement in pixels that commits a swipe.
pub const SWIPE_THRESHOLD_PX: f64 = 40.0;

/// Seconds a threshold-length swipe may take and still count as a fling.
pub const FLING_WINDOW_S: f64 = 0.16;

/// Release velocity (px/s) that commits a swipe regardless of displacement.
pub const FLING_VELOCITY_PX_S: f64 = SWIPE_THRESHOLD_PX / FLING_WINDOW_S;

/// Fraction of the viewport width per second that always advances.
pub const VELOCITY_EXIT_FRACTION: f64 = 0.25;

/// A sample with `|dy| > ratio * |dx|` is read as vertical scrolling.
pub const VERTICAL_INTENT_RATIO: f64 = 1.2;

/// Floor for the time between two samples, in seconds.
pub const MIN_SAMPLE_INTERVAL_S: f64 = 0.001;

// ── Transitions ─────────────────────────────────────────────────

/// Delay before a committed swipe swaps the image, in milliseconds.
pub const NAVIGATE_DELAY_MS: u32 = 150;

/// Duration of the ease-out transform transition, in milliseconds.
pub const TRANSITION_MS: u32 = 160;

// ── Navigation bar ──────────────────────────────────────────────

/// `scrollY` beyond which the nav bar gets the `scrolled` class.
pub const SCROLLED_OFFSET_PX: f64 = 8.0;

/// Extra top margin added to the nav height for section observation.
pub const NAV_MARGIN_PAD_PX: f64 = 8.0;

/// Bottom root margin for section observation, as a percentage of the viewport.
pub const BOTTOM_MARGIN_PERCENT: f64 = 40.0;

/// Visibility ratios at which the observer reports.
pub const VISIBILITY_THRESHOLDS: [f64; 5] = [0.1, 0.25, 0.5, 0.75, 0.98];
