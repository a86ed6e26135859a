use super::*;

const PAGE: &str = "https://example.com/docs/page.html?lang=en";

fn has(ids: &'static [&'static str]) -> impl Fn(&str) -> bool {
    move |id: &str| ids.iter().any(|known| *known == id)
}

// --- classify ---

#[test]
fn bare_fragment_is_not_parsed_as_url() {
    assert_eq!(classify("#section1", "not a url"), Ok(LinkTarget::Fragment("section1".into())));
}

#[test]
fn relative_link_to_same_path_with_fragment_is_same_page() {
    assert_eq!(
        classify("page.html#intro", PAGE),
        Ok(LinkTarget::SamePage {
            id: "intro".into(),
            href: "https://example.com/docs/page.html#intro".into(),
        })
    );
}

#[test]
fn absolute_link_to_same_path_is_same_page() {
    let target = classify("https://example.com/docs/page.html?lang=fr#faq", PAGE);
    assert_eq!(
        target,
        Ok(LinkTarget::SamePage {
            id: "faq".into(),
            href: "https://example.com/docs/page.html?lang=fr#faq".into(),
        })
    );
}

#[test]
fn other_path_or_origin_is_elsewhere() {
    assert_eq!(classify("other.html#intro", PAGE), Ok(LinkTarget::Elsewhere));
    assert_eq!(classify("https://elsewhere.org/docs/page.html#intro", PAGE), Ok(LinkTarget::Elsewhere));
}

#[test]
fn same_path_without_fragment_is_elsewhere() {
    assert_eq!(classify("page.html", PAGE), Ok(LinkTarget::Elsewhere));
    assert_eq!(classify("page.html#", PAGE), Ok(LinkTarget::Elsewhere));
}

#[test]
fn file_page_links_to_itself_are_same_page() {
    assert_eq!(
        classify("index.html#intro", "file:///home/u/blog/index.html"),
        Ok(LinkTarget::SamePage {
            id: "intro".into(),
            href: "file:///home/u/blog/index.html#intro".into(),
        })
    );
    assert_eq!(classify("about.html#intro", "file:///home/u/blog/index.html"), Ok(LinkTarget::Elsewhere));
}

#[test]
fn explicit_default_port_is_same_page() {
    let target = classify("https://example.com:443/docs/page.html#faq", PAGE);
    assert!(matches!(target, Ok(LinkTarget::SamePage { ref id, .. }) if id == "faq"));
    assert_eq!(classify("http://example.com/docs/page.html#faq", PAGE), Ok(LinkTarget::Elsewhere));
}

#[test]
fn malformed_urls_report_parse_errors() {
    assert!(classify("http://[::1", PAGE).is_err());
    assert!(classify("page.html#x", "relative/base").is_err());
}

// --- plan_click ---

#[test]
fn fragment_to_existing_element_is_taken_over() {
    assert_eq!(
        plan_click(Some("#section1"), PAGE, has(&["section1"])),
        ClickAction::SmoothScroll {
            target_id: "section1".into(),
            url: UrlUpdate::Fragment("#section1".into()),
        }
    );
}

#[test]
fn fragment_to_missing_element_is_native() {
    assert_eq!(plan_click(Some("#missing"), PAGE, has(&["section1"])), ClickAction::Native);
}

#[test]
fn empty_fragment_is_native() {
    assert_eq!(plan_click(Some("#"), PAGE, |_| true), ClickAction::Native);
}

#[test]
fn missing_or_empty_href_is_native() {
    assert_eq!(plan_click(None, PAGE, |_| true), ClickAction::Native);
    assert_eq!(plan_click(Some(""), PAGE, |_| true), ClickAction::Native);
}

#[test]
fn external_link_is_native() {
    assert_eq!(plan_click(Some("https://rust-lang.org/"), PAGE, |_| true), ClickAction::Native);
}

#[test]
fn same_page_url_pushes_full_href() {
    let action = plan_click(Some("page.html#faq"), PAGE, has(&["faq"]));
    let ClickAction::SmoothScroll { target_id, url } = action else {
        panic!("expected smooth scroll, got {action:?}");
    };
    assert_eq!(target_id, "faq");
    assert_eq!(url.as_str(), "https://example.com/docs/page.html#faq");
    assert!(matches!(url, UrlUpdate::Href(_)));
}

#[test]
fn same_page_url_to_missing_element_is_native() {
    assert_eq!(plan_click(Some("page.html#nowhere"), PAGE, has(&["faq"])), ClickAction::Native);
}

#[test]
fn file_page_fragment_url_is_taken_over() {
    let action = plan_click(Some("index.html#intro"), "file:///home/u/blog/index.html", has(&["intro"]));
    assert_eq!(
        action,
        ClickAction::SmoothScroll {
            target_id: "intro".into(),
            url: UrlUpdate::Href("file:///home/u/blog/index.html#intro".into()),
        }
    );
}

#[test]
fn malformed_url_falls_through_to_native() {
    assert_eq!(plan_click(Some("http://[::1"), PAGE, |_| true), ClickAction::Native);
}
