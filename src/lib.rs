//! Dark/light theme switching and a smooth-scroll shim for static pages.
//!
//! This crate is compiled to WebAssembly and loaded by the page. It owns two
//! independent behaviors that share one initializer: a theme controller that
//! persists the reader's dark/light choice (falling back to the OS setting),
//! and a click shim that animates in-page anchor jumps on browsers without
//! native `scroll-behavior: smooth`.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`theme`] | [`theme::Theme`], startup resolution, and the testable [`theme::ThemeController`] |
//! | [`link`] | Classifies anchor clicks into take-over or native navigation |
//! | [`scroll`] | Easing curve, per-frame scroll animation, single-owner animation slot |
//! | [`config`] | Initializer options with page defaults |
//! | [`error`] | Storage, config, and parse errors |
//! | [`consts`] | Storage key, element ids, labels, durations |
//! | `browser` | `web-sys` adapter and exported JS handle (feature `browser`) |

pub mod config;
pub mod consts;
pub mod error;
pub mod link;
pub mod scroll;
pub mod theme;

#[cfg(feature = "browser")]
pub mod browser;
