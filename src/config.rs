//! Initializer configuration.
//!
//! Every field has a default matching the stock page setup, so the page can
//! call `initSite()` with no options, or override a subset with a JSON object:
//!
//! ```json
//! { "storageKey": "site-theme", "smoothScroll": false }
//! ```

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::Deserialize;

use crate::consts::{DARK_LABEL, LIGHT_LABEL, SCROLL_DURATION_MS, STORAGE_KEY, TOGGLE_CLASS, TOGGLE_ID};
use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct Config {
    pub storage_key: String,
    pub toggle_id: String,
    pub toggle_class: String,
    /// Label shown while dark.
    pub light_label: String,
    /// Label shown while light.
    pub dark_label: String,
    pub scroll_duration_ms: f64,
    /// Create (or adopt) the floating toggle button.
    pub floating_toggle: bool,
    /// Install the smooth-scroll shim when the browser lacks native support.
    pub smooth_scroll: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage_key: STORAGE_KEY.to_owned(),
            toggle_id: TOGGLE_ID.to_owned(),
            toggle_class: TOGGLE_CLASS.to_owned(),
            light_label: LIGHT_LABEL.to_owned(),
            dark_label: DARK_LABEL.to_owned(),
            scroll_duration_ms: SCROLL_DURATION_MS,
            floating_toggle: true,
            smooth_scroll: true,
        }
    }
}

impl Config {
    /// Parse an optional JSON override. `None` or a blank string yields defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON or unknown fields, and
    /// the [`Config::validate`] errors otherwise.
    pub fn from_json(raw: Option<&str>) -> Result<Self, ConfigError> {
        let config = match raw.map(str::trim) {
            None | Some("") => Self::default(),
            Some(raw) => serde_json::from_str(raw)?,
        };
        config.validate()?;
        Ok(config)
    }

    /// # Errors
    ///
    /// Returns [`ConfigError::Empty`] for a blank storage key or toggle id, and
    /// [`ConfigError::InvalidDuration`] for a non-positive or non-finite duration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.storage_key.trim().is_empty() {
            return Err(ConfigError::Empty("storageKey"));
        }
        if self.toggle_id.trim().is_empty() {
            return Err(ConfigError::Empty("toggleId"));
        }
        if !self.scroll_duration_ms.is_finite() || self.scroll_duration_ms <= 0.0 {
            return Err(ConfigError::InvalidDuration(self.scroll_duration_ms));
        }
        Ok(())
    }
}
