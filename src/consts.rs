//! Shared constants for the theme controller and the scroll shim.

// ── Theme ───────────────────────────────────────────────────────

/// Local storage key holding the persisted theme preference.
pub const STORAGE_KEY: &str = "theme";

/// Element id of the theme toggle button.
pub const TOGGLE_ID: &str = "themeToggle";

/// Class list applied to a toggle button created by the controller.
pub const TOGGLE_CLASS: &str = "theme-toggle theme-toggle-floating";

/// Label shown while the page is dark (the button switches to light).
pub const LIGHT_LABEL: &str = "☀️ Light Mode";

/// Label shown while the page is light (the button switches to dark).
pub const DARK_LABEL: &str = "🌙 Dark Mode";

/// Attribute marking a toggle control whose click handler is attached.
pub const TOGGLE_BOUND_ATTR: &str = "data-theme-bound";

/// Attribute set on the root element while dark.
pub const THEME_ATTR: &str = "data-theme";

/// Class added to the root element while dark.
pub const DARK_CLASS: &str = "dark";

/// Media query for the OS-level dark preference.
pub const PREFERS_DARK_QUERY: &str = "(prefers-color-scheme: dark)";

// ── Scroll ──────────────────────────────────────────────────────

/// Duration of one animated anchor scroll, in milliseconds.
pub const SCROLL_DURATION_MS: f64 = 468.0;

/// Style property whose presence signals native smooth scrolling.
pub const NATIVE_SMOOTH_SCROLL_PROBE: &str = "scrollBehavior";
