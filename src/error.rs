//! Error types for the viewer.
//!
//! Nothing here is fatal to the page: each feature installer returns a
//! [`ViewerError`] that the entry point logs before moving on to the next
//! feature.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

/// Error returned by [`crate::config::ViewerConfig::from_json`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config text is not valid JSON for [`crate::config::ViewerConfig`].
    #[error("failed to parse viewer config: {0}")]
    Parse(#[from] serde_json::Error),
    /// A field parsed but holds an unusable value.
    #[error("invalid viewer config field `{field}`: {reason}")]
    Invalid {
        /// camelCase key of the offending field.
        field: &'static str,
        /// What is wrong with it.
        reason: &'static str,
    },
}

/// Errors raised while driving the viewer or its DOM wiring.
#[derive(Debug, thiserror::Error)]
pub enum ViewerError {
    /// A gallery index outside `0..len` was requested.
    #[error("panel index {index} out of range for gallery of {len}")]
    IndexOutOfRange { index: usize, len: usize },
    /// An element the feature depends on is not in the page.
    #[error("missing element: {0}")]
    MissingElement(&'static str),
    /// A DOM call threw.
    #[error("dom error: {0}")]
    Dom(String),
    /// The page supplied an unusable config.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[cfg(feature = "hydrate")]
impl From<wasm_bindgen::JsValue> for ViewerError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        Self::Dom(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}
