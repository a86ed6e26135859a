//! Anchor click routing for the smooth-scroll shim.
//!
//! Decides, from an anchor's raw `href` and the current location, whether a
//! click should be taken over (scroll animated, URL updated in place) or left
//! to the browser.

#[cfg(test)]
#[path = "link_test.rs"]
mod link_test;

use url::Url;

/// Where an anchor's `href` points relative to the current page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkTarget {
    /// A bare `#id` reference.
    Fragment(String),
    /// A full or relative URL naming this page plus a non-empty fragment.
    SamePage { id: String, href: String },
    /// Another page, or this page without a fragment.
    Elsewhere,
}

/// Classify `href` against `location_href`.
///
/// # Errors
///
/// Returns the parse error when either URL is malformed.
pub fn classify(href: &str, location_href: &str) -> Result<LinkTarget, url::ParseError> {
    if let Some(id) = href.strip_prefix('#') {
        return Ok(LinkTarget::Fragment(id.to_owned()));
    }

    let base = Url::parse(location_href)?;
    let resolved = base.join(href)?;
    let same_page = same_document(&resolved, &base);
    match resolved.fragment() {
        Some(id) if same_page && !id.is_empty() => Ok(LinkTarget::SamePage {
            id: id.to_owned(),
            href: resolved.as_str().to_owned(),
        }),
        _ => Ok(LinkTarget::Elsewhere),
    }
}

/// Same scheme, host, port, and path.
///
/// Compared field by field because `file:` URLs have opaque origins, which
/// never compare equal even for the same file.
fn same_document(a: &Url, b: &Url) -> bool {
    a.scheme() == b.scheme()
        && a.host_str() == b.host_str()
        && a.port_or_known_default() == b.port_or_known_default()
        && a.path() == b.path()
}

/// How to reflect a taken-over click in the address bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UrlUpdate {
    /// `#id`; falls back to assigning `location.hash`.
    Fragment(String),
    /// Absolute URL; falls back to assigning `location.href`.
    Href(String),
}

impl UrlUpdate {
    /// The value handed to `history.pushState`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Fragment(value) | Self::Href(value) => value,
        }
    }
}

/// What to do with one anchor click.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickAction {
    /// Leave the click alone.
    Native,
    /// Prevent navigation, animate to `target_id`, then apply `url`.
    SmoothScroll { target_id: String, url: UrlUpdate },
}

/// Decide how to handle a click on an anchor with `href`.
///
/// `element_exists` reports whether the page has an element with a given id.
/// Malformed URLs fall through to native navigation.
pub fn plan_click(href: Option<&str>, location_href: &str, element_exists: impl Fn(&str) -> bool) -> ClickAction {
    let Some(href) = href.filter(|h| !h.is_empty()) else {
        return ClickAction::Native;
    };

    let target = match classify(href, location_href) {
        Ok(target) => target,
        Err(err) => {
            log::debug!("scroll: ignoring malformed link {href:?}: {err}");
            return ClickAction::Native;
        }
    };

    match target {
        LinkTarget::Fragment(id) if !id.is_empty() && element_exists(&id) => {
            let url = UrlUpdate::Fragment(format!("#{id}"));
            ClickAction::SmoothScroll { target_id: id, url }
        }
        LinkTarget::SamePage { id, href } if element_exists(&id) => {
            ClickAction::SmoothScroll { target_id: id, url: UrlUpdate::Href(href) }
        }
        _ => ClickAction::Native,
    }
}
