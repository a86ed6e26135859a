//! Dark/light theme state and the controller that drives it.
//!
//! SYSTEM CONTEXT
//! ==============
//! [`ThemeController`] owns the current [`Theme`] and talks to the page only
//! through [`ThemeEnv`], so all decisions (initial resolution, toggling,
//! persistence fallback, toggle binding) run natively in tests against a fake
//! environment. The browser adapter implements `ThemeEnv` with `web-sys`.
//!
//! TRADE-OFFS
//! ==========
//! `toggle` reads the current theme back from the root element rather than
//! trusting `self.theme`, so markup or scripts that flip the root class
//! directly are still toggled correctly.

#[cfg(test)]
#[path = "theme_test.rs"]
mod theme_test;

use std::fmt;
use std::str::FromStr;

use crate::config::Config;
use crate::error::{ParseThemeError, StorageError};

/// Visual color scheme of the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    #[must_use]
    pub fn from_dark(dark: bool) -> Self {
        if dark { Self::Dark } else { Self::Light }
    }

    #[must_use]
    pub fn is_dark(self) -> bool {
        self == Self::Dark
    }

    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = ParseThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            _ => Err(ParseThemeError(s.to_owned())),
        }
    }
}

/// Where the initial theme came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeSource {
    Stored,
    System,
}

/// Resolve the startup theme from the raw stored value and the OS preference.
///
/// Only an exact `"dark"` selects dark. A missing or empty value defers to the
/// OS; any other stored value (including `"light"`) selects light.
#[must_use]
pub fn resolve_initial(stored: Option<&str>, prefers_dark: bool) -> (Theme, ThemeSource) {
    match stored {
        None | Some("") => (Theme::from_dark(prefers_dark), ThemeSource::System),
        Some(value) => (Theme::from_dark(value == "dark"), ThemeSource::Stored),
    }
}

/// Whether the preference survives a reload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Persistence {
    /// Reads and writes go through local storage.
    Stored,
    /// Storage failed; the preference lives in memory for this page only.
    SessionOnly,
}

/// Outcome of locating the toggle control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleMount {
    Created,
    /// An existing control with no click handler from this crate yet.
    Reused,
    /// An existing control already carrying the bound marker.
    AlreadyBound,
    /// The control could not be created (no body, or the DOM call threw).
    Failed,
}

/// Result of [`ThemeController::mount_toggle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MountedToggle {
    pub mount: ToggleMount,
    /// The caller must attach the click handler to the control.
    pub needs_binding: bool,
}

/// CSS selector matching every element whose id is `toggle_id`.
#[must_use]
pub fn toggle_selector(toggle_id: &str) -> String {
    let escaped = toggle_id.replace('\\', "\\\\").replace('"', "\\\"");
    format!("[id=\"{escaped}\"]")
}

/// Page reads and writes needed by the theme controller.
pub trait ThemeEnv {
    /// Raw stored preference, `Ok(None)` when nothing is stored.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] when storage is missing or throws.
    fn load_preference(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// # Errors
    ///
    /// Returns a [`StorageError`] when storage is missing or throws.
    fn store_preference(&mut self, key: &str, theme: Theme) -> Result<(), StorageError>;

    /// OS-level dark preference; `false` when the media query API is absent.
    fn prefers_dark(&self) -> bool;

    /// Whether the root element currently carries the dark class.
    fn root_is_dark(&self) -> bool;

    /// Set or clear the root theme attribute and class.
    fn apply_root(&mut self, theme: Theme);

    /// Set the text of every element with `toggle_id`.
    fn set_toggle_labels(&mut self, toggle_id: &str, label: &str);

    /// Find the toggle by id, or create it with `class` and append it to the body.
    fn mount_toggle(&mut self, toggle_id: &str, class: &str) -> ToggleMount;

    /// Mark the toggle as carrying a click handler, so later mounts report
    /// [`ToggleMount::AlreadyBound`].
    ///
    /// The marker lives on the control itself, not in the controller, so a
    /// second controller on the same page sees it too.
    fn mark_toggle_bound(&mut self, toggle_id: &str);
}

/// Owns the theme state for one page.
pub struct ThemeController<E: ThemeEnv> {
    env: E,
    config: Config,
    theme: Theme,
    preference: Option<Theme>,
    persistence: Persistence,
}

impl<E: ThemeEnv> ThemeController<E> {
    /// Resolve the startup theme and apply it to the root element.
    ///
    /// A storage failure is logged and downgrades the controller to
    /// [`Persistence::SessionOnly`]; the OS preference decides the theme.
    pub fn init(env: E, config: Config) -> Self {
        let (stored, persistence) = match env.load_preference(&config.storage_key) {
            Ok(stored) => (stored, Persistence::Stored),
            Err(err) => {
                log::warn!("theme: {err}; preference kept for this session only");
                (None, Persistence::SessionOnly)
            }
        };
        let (theme, source) = resolve_initial(stored.as_deref(), env.prefers_dark());
        log::debug!("theme: resolved {theme} from {source:?}");

        let preference = match source {
            ThemeSource::Stored => Some(theme),
            ThemeSource::System => None,
        };
        let mut controller = Self { env, config, theme, preference, persistence };
        controller.apply(theme);
        controller
    }

    /// Set the root marker for `theme`. Applying the current theme again is a no-op in effect.
    pub fn apply(&mut self, theme: Theme) {
        self.env.apply_root(theme);
        self.theme = theme;
    }

    /// Flip the theme shown on the root element, persist it, and relabel the toggles.
    pub fn toggle(&mut self) -> Theme {
        let next = Theme::from_dark(self.env.root_is_dark()).toggled();
        self.apply(next);
        self.persist(next);
        self.update_buttons(next);
        next
    }

    /// Apply `theme` and relabel the toggles without persisting it.
    pub fn set(&mut self, theme: Theme) {
        self.apply(theme);
        self.update_buttons(theme);
    }

    /// Label every toggle control for `theme`.
    pub fn update_buttons(&mut self, theme: Theme) {
        let label = self.label_for(theme).to_owned();
        self.env.set_toggle_labels(&self.config.toggle_id, &label);
    }

    /// Ensure the toggle control exists. The click handler is requested once per
    /// control, across every controller on the page, so repeated calls never
    /// stack duplicate handlers.
    pub fn mount_toggle(&mut self) -> MountedToggle {
        let mount = self.env.mount_toggle(&self.config.toggle_id, &self.config.toggle_class);
        let needs_binding = matches!(mount, ToggleMount::Created | ToggleMount::Reused);
        if needs_binding {
            self.env.mark_toggle_bound(&self.config.toggle_id);
        }
        log::debug!("theme: toggle #{} {mount:?}", self.config.toggle_id);
        MountedToggle { mount, needs_binding }
    }

    #[must_use]
    pub fn label_for(&self, theme: Theme) -> &str {
        match theme {
            Theme::Dark => &self.config.light_label,
            Theme::Light => &self.config.dark_label,
        }
    }

    #[must_use]
    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// The user's explicit choice, if any was stored or made this session.
    #[must_use]
    pub fn preference(&self) -> Option<Theme> {
        self.preference
    }

    #[must_use]
    pub fn persistence(&self) -> Persistence {
        self.persistence
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    #[must_use]
    pub fn env(&self) -> &E {
        &self.env
    }

    fn persist(&mut self, theme: Theme) {
        self.preference = Some(theme);
        if self.persistence == Persistence::SessionOnly {
            return;
        }
        if let Err(err) = self.env.store_preference(&self.config.storage_key, theme) {
            log::warn!("theme: {err}; preference kept for this session only");
            self.persistence = Persistence::SessionOnly;
        }
    }
}
