#![allow(clippy::float_cmp)]

use serde_json::json;

use super::*;

// =============================================================
// Defaults
// =============================================================

#[test]
fn default_swipe_values_match_page_script() {
    let config = ViewerConfig::default();
    assert_eq!(config.swipe_threshold_px, 40.0);
    assert_eq!(config.fling_velocity_px_s, 250.0);
    assert_eq!(config.velocity_exit_fraction, 0.25);
    assert_eq!(config.vertical_intent_ratio, 1.2);
    assert_eq!(config.navigate_delay_ms, 150);
    assert_eq!(config.transition_ms, 160);
}

#[test]
fn default_selectors() {
    let config = ViewerConfig::default();
    assert_eq!(config.panel_selector, ".comic-panel");
    assert_eq!(config.nav_link_selector, "nav a[href^='#']");
    assert_eq!(config.year_element_id, "year");
}

#[test]
fn default_validates() {
    assert!(ViewerConfig::default().validate().is_ok());
}

// =============================================================
// from_json
// =============================================================

#[test]
fn empty_object_yields_defaults() {
    let config = ViewerConfig::from_json("{}").unwrap();
    assert_eq!(config, ViewerConfig::default());
}

#[test]
fn partial_override_keeps_other_defaults() {
    let text = json!({ "swipeThresholdPx": 60.0, "panelSelector": ".page" }).to_string();
    let config = ViewerConfig::from_json(&text).unwrap();
    assert_eq!(config.swipe_threshold_px, 60.0);
    assert_eq!(config.panel_selector, ".page");
    assert_eq!(config.fling_velocity_px_s, 250.0);
}

#[test]
fn malformed_json_is_parse_error() {
    let err = ViewerConfig::from_json("{ nope").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn unknown_key_is_parse_error() {
    let err = ViewerConfig::from_json(r#"{"swipeThreshold": 10}"#).unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn zero_threshold_rejected() {
    let err = ViewerConfig::from_json(r#"{"swipeThresholdPx": 0}"#).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { field: "swipeThresholdPx", .. }));
}

#[test]
fn negative_fling_velocity_rejected() {
    let err = ViewerConfig::from_json(r#"{"flingVelocityPxS": -5}"#).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { field: "flingVelocityPxS", .. }));
}

#[test]
fn zero_sample_interval_rejected() {
    let err = ViewerConfig::from_json(r#"{"minSampleIntervalS": 0}"#).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { field: "minSampleIntervalS", .. }));
}

#[test]
fn bottom_margin_out_of_range_rejected() {
    let err = ViewerConfig::from_json(r#"{"bottomMarginPercent": 140}"#).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { field: "bottomMarginPercent", .. }));
}

#[test]
fn empty_thresholds_rejected() {
    let err = ViewerConfig::from_json(r#"{"visibilityThresholds": []}"#).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { field: "visibilityThresholds", .. }));
}

#[test]
fn threshold_above_one_rejected() {
    let err = ViewerConfig::from_json(r#"{"visibilityThresholds": [0.5, 1.5]}"#).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { field: "visibilityThresholds", .. }));
}

#[test]
fn blank_selector_rejected() {
    let err = ViewerConfig::from_json(r#"{"navSelector": "  "}"#).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { field: "navSelector", .. }));
}

#[test]
fn serializes_with_camel_case_keys() {
    let value = serde_json::to_value(ViewerConfig::default()).unwrap();
    assert_eq!(value["swipeThresholdPx"], json!(40.0));
    assert_eq!(value["yearElementId"], json!("year"));
}
