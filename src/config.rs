//! Tunable viewer parameters.
//!
//! Defaults come from [`crate::consts`]. A page may override any subset by
//! embedding a JSON object (camelCase keys) in
//! `<script type="application/json" id="comic-viewer-config">`.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

use crate::consts::{
    BOTTOM_MARGIN_PERCENT, FLING_VELOCITY_PX_S, MIN_SAMPLE_INTERVAL_S, NAV_MARGIN_PAD_PX, NAVIGATE_DELAY_MS,
    SCROLLED_OFFSET_PX, SWIPE_THRESHOLD_PX, TRANSITION_MS, VELOCITY_EXIT_FRACTION, VERTICAL_INTENT_RATIO,
    VISIBILITY_THRESHOLDS,
};
use crate::error::ConfigError;

/// Id of the optional inline config element.
pub const CONFIG_ELEMENT_ID: &str = "comic-viewer-config";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct ViewerConfig {
    /// Displacement (px) that commits a swipe.
    pub swipe_threshold_px: f64,
    /// Release velocity (px/s) that commits a swipe as a fling.
    pub fling_velocity_px_s: f64,
    /// Viewport widths per second above which any release advances.
    pub velocity_exit_fraction: f64,
    /// Vertical-over-horizontal ratio that marks a sample as scroll intent.
    pub vertical_intent_ratio: f64,
    /// Floor for the interval between samples, in seconds.
    pub min_sample_interval_s: f64,
    /// Delay before a committed swipe swaps the image.
    pub navigate_delay_ms: u32,
    /// Transform transition duration.
    pub transition_ms: u32,
    /// Scroll offset past which the nav bar is marked `scrolled`.
    pub scrolled_offset_px: f64,
    /// Padding added to the nav height in the observer's top margin.
    pub nav_margin_pad_px: f64,
    /// Observer bottom margin, percent of viewport height.
    pub bottom_margin_percent: f64,
    /// Observer visibility thresholds.
    pub visibility_thresholds: Vec<f64>,
    pub panel_selector: String,
    pub nav_selector: String,
    pub nav_link_selector: String,
    pub year_element_id: String,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            swipe_threshold_px: SWIPE_THRESHOLD_PX,
            fling_velocity_px_s: FLING_VELOCITY_PX_S,
            velocity_exit_fraction: VELOCITY_EXIT_FRACTION,
            vertical_intent_ratio: VERTICAL_INTENT_RATIO,
            min_sample_interval_s: MIN_SAMPLE_INTERVAL_S,
            navigate_delay_ms: NAVIGATE_DELAY_MS,
            transition_ms: TRANSITION_MS,
            scrolled_offset_px: SCROLLED_OFFSET_PX,
            nav_margin_pad_px: NAV_MARGIN_PAD_PX,
            bottom_margin_percent: BOTTOM_MARGIN_PERCENT,
            visibility_thresholds: VISIBILITY_THRESHOLDS.to_vec(),
            panel_selector: ".comic-panel".to_owned(),
            nav_selector: "nav".to_owned(),
            nav_link_selector: "nav a[href^='#']".to_owned(),
            year_element_id: "year".to_owned(),
        }
    }
}

impl ViewerConfig {
    /// Parse a JSON override object and validate the merged result.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON or unknown keys and
    /// [`ConfigError::Invalid`] for out-of-range values.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every field for a usable value.
    ///
    /// # Errors
    ///
    /// Returns the first offending field as [`ConfigError::Invalid`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive(self.swipe_threshold_px, "swipeThresholdPx")?;
        positive(self.fling_velocity_px_s, "flingVelocityPxS")?;
        positive(self.vertical_intent_ratio, "verticalIntentRatio")?;
        positive(self.min_sample_interval_s, "minSampleIntervalS")?;
        non_negative(self.velocity_exit_fraction, "velocityExitFraction")?;
        non_negative(self.scrolled_offset_px, "scrolledOffsetPx")?;
        non_negative(self.nav_margin_pad_px, "navMarginPadPx")?;
        if !(0.0..=100.0).contains(&self.bottom_margin_percent) {
            return Err(invalid("bottomMarginPercent", "must be between 0 and 100"));
        }
        if self.visibility_thresholds.is_empty() {
            return Err(invalid("visibilityThresholds", "must not be empty"));
        }
        if self.visibility_thresholds.iter().any(|t| !(0.0..=1.0).contains(t)) {
            return Err(invalid("visibilityThresholds", "entries must be between 0 and 1"));
        }
        for (value, field) in [
            (&self.panel_selector, "panelSelector"),
            (&self.nav_selector, "navSelector"),
            (&self.nav_link_selector, "navLinkSelector"),
            (&self.year_element_id, "yearElementId"),
        ] {
            if value.trim().is_empty() {
                return Err(invalid(field, "must not be blank"));
            }
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: &'static str) -> ConfigError {
    ConfigError::Invalid { field, reason }
}

fn positive(value: f64, field: &'static str) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, "must be a positive number"))
    }
}

fn non_negative(value: f64, field: &'static str) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(invalid(field, "must be a non-negative number"))
    }
}
