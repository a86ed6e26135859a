//! `web-sys` adapter: wires the theme controller and the scroll shim into a page.
//!
//! SYSTEM CONTEXT
//! ==============
//! Everything that touches `window`/`document` lives here. The decisions are
//! made by [`crate::theme`], [`crate::link`], and [`crate::scroll`]; this module
//! performs the reads and writes, registers listeners, and schedules frames.
//!
//! The page calls `initSite(options?)` and keeps the returned [`SiteHandle`].
//! Setup runs immediately when the document has finished loading, otherwise on
//! `DOMContentLoaded`; the handle reports `isReady() == false` until then.
//! Later `initSite` calls return the same handle and install nothing.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, Event, HtmlElement, Window};

use crate::config::Config;
use crate::consts::{DARK_CLASS, NATIVE_SMOOTH_SCROLL_PROBE, PREFERS_DARK_QUERY, THEME_ATTR, TOGGLE_BOUND_ATTR};
use crate::error::StorageError;
use crate::link::{ClickAction, UrlUpdate, plan_click};
use crate::scroll::{AnimationSlot, ScrollAnimation, shim_needed, target_offset};
use crate::theme::{Theme, ThemeController, ThemeEnv, ToggleMount, toggle_selector};

type ThemeCell = Rc<RefCell<Option<ThemeController<DomEnv>>>>;

thread_local! {
    /// The handle from the first successful `initSite`.
    static SITE: RefCell<Option<SiteHandle>> = const { RefCell::new(None) };
}

/// Install the panic hook and the console logger when the module loads.
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let level = if cfg!(debug_assertions) { log::Level::Debug } else { log::Level::Info };
    if let Err(err) = console_log::init_with_level(level) {
        web_sys::console::warn_1(&JsValue::from_str(&format!("site-theme: logger not installed: {err}")));
    }
}

/// Initialize the theme controller and smooth-scroll shim.
///
/// `options` is an optional JSON object overriding [`Config`] fields. Only the
/// first successful call sets the page up; later calls return its handle and
/// ignore their options, so listeners are never stacked.
///
/// # Errors
///
/// Throws when the options are invalid or there is no document.
#[wasm_bindgen(js_name = initSite)]
pub fn init(options: Option<String>) -> Result<SiteHandle, JsError> {
    if let Some(existing) = SITE.with(|site| site.borrow().clone()) {
        log::debug!("site-theme: already initialized; returning existing handle");
        return Ok(existing);
    }

    let config = Config::from_json(options.as_deref()).map_err(|err| JsError::new(&err.to_string()))?;
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsError::new("site-theme: no document available"))?;

    let handle = SiteHandle { theme: Rc::new(RefCell::new(None)) };
    if document.ready_state() == "loading" {
        let cell = Rc::clone(&handle.theme);
        let on_ready = Closure::once_into_js(move || setup(config, &cell));
        document
            .add_event_listener_with_callback("DOMContentLoaded", on_ready.unchecked_ref())
            .map_err(|err| JsError::new(&js_error_text(&err)))?;
    } else {
        setup(config, &handle.theme);
    }
    SITE.with(|site| *site.borrow_mut() = Some(handle.clone()));
    Ok(handle)
}

fn setup(config: Config, cell: &ThemeCell) {
    let Some(window) = web_sys::window() else {
        log::warn!("site-theme: no window; skipping setup");
        return;
    };
    let Some(document) = window.document() else {
        log::warn!("site-theme: no document; skipping setup");
        return;
    };

    let env = DomEnv { window: window.clone(), document: document.clone() };
    let mut controller = ThemeController::init(env, config.clone());
    let needs_binding = config.floating_toggle && controller.mount_toggle().needs_binding;
    let current = Theme::from_dark(controller.env().root_is_dark());
    controller.update_buttons(current);
    *cell.borrow_mut() = Some(controller);

    if needs_binding {
        bind_toggle(cell, &document, &config.toggle_id);
    }
    let native = native_smooth_scroll(&document);
    if config.smooth_scroll && native {
        log::debug!("scroll: native smooth scrolling available; shim not installed");
    }
    let shim = shim_needed(config.smooth_scroll, native) && install_smooth_scroll(window, document, config.scroll_duration_ms);
    log::info!("site-theme: ready (theme {current}, scroll shim {shim})");
}

// =============================================================
// Exported handle
// =============================================================

/// Page-facing interface returned by `initSite`.
#[wasm_bindgen]
#[derive(Clone)]
pub struct SiteHandle {
    theme: ThemeCell,
}

#[wasm_bindgen]
impl SiteHandle {
    /// Flip the theme. Returns the new theme, or `undefined` before setup.
    pub fn toggle(&self) -> Option<String> {
        let mut cell = self.theme.borrow_mut();
        let controller = cell.as_mut()?;
        Some(controller.toggle().as_str().to_owned())
    }

    /// Apply `"dark"` or `"light"` without persisting it.
    ///
    /// # Errors
    ///
    /// Throws for any other value.
    pub fn set(&self, theme: &str) -> Result<(), JsError> {
        let theme = theme.parse::<Theme>().map_err(|err| JsError::new(&err.to_string()))?;
        if let Some(controller) = self.theme.borrow_mut().as_mut() {
            controller.set(theme);
        } else {
            log::warn!("site-theme: set({theme}) ignored before setup");
        }
        Ok(())
    }

    /// Current theme, or `undefined` before setup.
    pub fn theme(&self) -> Option<String> {
        self.theme.borrow().as_ref().map(|c| c.theme().as_str().to_owned())
    }

    #[wasm_bindgen(js_name = isReady)]
    pub fn is_ready(&self) -> bool {
        self.theme.borrow().is_some()
    }

    /// Ensure the floating toggle exists; binds its click handler at most once.
    #[wasm_bindgen(js_name = mountToggle)]
    pub fn mount_toggle(&self) {
        let (document, toggle_id) = {
            let mut cell = self.theme.borrow_mut();
            let Some(controller) = cell.as_mut() else {
                return;
            };
            if !controller.mount_toggle().needs_binding {
                return;
            }
            let current = controller.theme();
            controller.update_buttons(current);
            (controller.env().document.clone(), controller.config().toggle_id.clone())
        };
        bind_toggle(&self.theme, &document, &toggle_id);
    }
}

fn bind_toggle(cell: &ThemeCell, document: &Document, toggle_id: &str) {
    let Some(button) = document.get_element_by_id(toggle_id) else {
        return;
    };
    let shared = Rc::clone(cell);
    let on_click = Closure::wrap(Box::new(move |_event: Event| {
        if let Some(controller) = shared.borrow_mut().as_mut() {
            controller.toggle();
        }
    }) as Box<dyn FnMut(Event)>);
    match button.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref()) {
        Ok(()) => on_click.forget(),
        Err(err) => {
            log::warn!("theme: could not bind toggle: {}", js_error_text(&err));
            // Let a later mount retry.
            if let Err(err) = button.remove_attribute(TOGGLE_BOUND_ATTR) {
                log::debug!("theme: could not clear bound marker: {}", js_error_text(&err));
            }
        }
    }
}

// =============================================================
// Theme environment
// =============================================================

/// [`ThemeEnv`] backed by the live document and local storage.
pub struct DomEnv {
    window: Window,
    document: Document,
}

impl DomEnv {
    fn storage(&self) -> Result<web_sys::Storage, StorageError> {
        self.window
            .local_storage()
            .map_err(|err| StorageError::Read(js_error_text(&err)))?
            .ok_or(StorageError::Unavailable)
    }
}

impl ThemeEnv for DomEnv {
    fn load_preference(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.storage()?
            .get_item(key)
            .map_err(|err| StorageError::Read(js_error_text(&err)))
    }

    fn store_preference(&mut self, key: &str, theme: Theme) -> Result<(), StorageError> {
        self.storage()?
            .set_item(key, theme.as_str())
            .map_err(|err| StorageError::Write(js_error_text(&err)))
    }

    fn prefers_dark(&self) -> bool {
        match self.window.match_media(PREFERS_DARK_QUERY) {
            Ok(query) => query.is_some_and(|mq| mq.matches()),
            Err(err) => {
                log::debug!("theme: matchMedia failed: {}", js_error_text(&err));
                false
            }
        }
    }

    fn root_is_dark(&self) -> bool {
        self.document
            .document_element()
            .is_some_and(|root| root.class_list().contains(DARK_CLASS))
    }

    fn apply_root(&mut self, theme: Theme) {
        let Some(root) = self.document.document_element() else {
            return;
        };
        let result = if theme.is_dark() {
            root.set_attribute(THEME_ATTR, Theme::Dark.as_str())
                .and_then(|()| root.class_list().add_1(DARK_CLASS))
        } else {
            root.remove_attribute(THEME_ATTR)
                .and_then(|()| root.class_list().remove_1(DARK_CLASS))
        };
        if let Err(err) = result {
            log::warn!("theme: could not apply {theme}: {}", js_error_text(&err));
        }
    }

    fn set_toggle_labels(&mut self, toggle_id: &str, label: &str) {
        let nodes = match self.document.query_selector_all(&toggle_selector(toggle_id)) {
            Ok(nodes) => nodes,
            Err(err) => {
                log::warn!("theme: toggle lookup failed: {}", js_error_text(&err));
                return;
            }
        };
        for i in 0..nodes.length() {
            if let Some(node) = nodes.item(i) {
                node.set_text_content(Some(label));
            }
        }
    }

    fn mount_toggle(&mut self, toggle_id: &str, class: &str) -> ToggleMount {
        if let Some(existing) = self.document.get_element_by_id(toggle_id) {
            if existing.has_attribute(TOGGLE_BOUND_ATTR) {
                return ToggleMount::AlreadyBound;
            }
            return ToggleMount::Reused;
        }
        let Some(body) = self.document.body() else {
            log::warn!("theme: no <body> to hold the toggle");
            return ToggleMount::Failed;
        };
        let created = self.document.create_element("button").and_then(|button| {
            button.set_id(toggle_id);
            button.set_class_name(class);
            body.append_child(&button)
        });
        match created {
            Ok(_) => ToggleMount::Created,
            Err(err) => {
                log::warn!("theme: could not create toggle: {}", js_error_text(&err));
                ToggleMount::Failed
            }
        }
    }

    fn mark_toggle_bound(&mut self, toggle_id: &str) {
        let Some(button) = self.document.get_element_by_id(toggle_id) else {
            return;
        };
        if let Err(err) = button.set_attribute(TOGGLE_BOUND_ATTR, "") {
            log::warn!("theme: could not mark toggle bound: {}", js_error_text(&err));
        }
    }
}

// =============================================================
// Smooth-scroll shim
// =============================================================

struct ScrollShim {
    window: Window,
    document: Document,
    slot: RefCell<AnimationSlot>,
    duration_ms: f64,
}

/// Whether the browser animates `scroll-behavior: smooth` itself.
fn native_smooth_scroll(document: &Document) -> bool {
    let Some(root) = document.document_element() else {
        return false;
    };
    let Some(root) = root.dyn_ref::<HtmlElement>() else {
        return false;
    };
    js_sys::Reflect::has(&root.style(), &JsValue::from_str(NATIVE_SMOOTH_SCROLL_PROBE)).unwrap_or(false)
}

/// Install the delegated document click listener.
fn install_smooth_scroll(window: Window, document: Document, duration_ms: f64) -> bool {
    let shim = Rc::new(ScrollShim {
        window,
        document: document.clone(),
        slot: RefCell::new(AnimationSlot::new()),
        duration_ms,
    });
    let on_click = Closure::wrap(Box::new(move |event: Event| {
        on_document_click(&shim, &event);
    }) as Box<dyn FnMut(Event)>);
    match document.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref()) {
        Ok(()) => {
            on_click.forget();
            true
        }
        Err(err) => {
            log::warn!("scroll: could not install click listener: {}", js_error_text(&err));
            false
        }
    }
}

fn closest_anchor(event: &Event) -> Option<Element> {
    let target = event.target()?;
    let element = target.dyn_ref::<Element>()?;
    match element.closest("a[href]") {
        Ok(anchor) => anchor,
        Err(err) => {
            log::debug!("scroll: closest() failed: {}", js_error_text(&err));
            None
        }
    }
}

fn on_document_click(shim: &Rc<ScrollShim>, event: &Event) {
    let Some(anchor) = closest_anchor(event) else {
        return;
    };
    let href = anchor.get_attribute("href");
    let location_href = match shim.window.location().href() {
        Ok(href) => href,
        Err(err) => {
            log::debug!("scroll: location unavailable: {}", js_error_text(&err));
            String::new()
        }
    };

    let document = &shim.document;
    let action = plan_click(href.as_deref(), &location_href, |id| document.get_element_by_id(id).is_some());
    let ClickAction::SmoothScroll { target_id, url } = action else {
        return;
    };
    let Some(dest) = document.get_element_by_id(&target_id) else {
        return;
    };

    event.prevent_default();
    smooth_scroll_to_element(shim, &dest);
    update_url(&shim.window, &url);
}

fn smooth_scroll_to_element(shim: &Rc<ScrollShim>, el: &Element) {
    let start = match shim.window.scroll_y() {
        Ok(y) => y,
        Err(err) => {
            log::debug!("scroll: scrollY unavailable: {}", js_error_text(&err));
            0.0
        }
    };
    let target = target_offset(el.get_bounding_client_rect().top(), start);
    let started = shim
        .slot
        .borrow_mut()
        .start(ScrollAnimation::new(start, target, shim.duration_ms));

    // A cancelled frame never runs, so its one-shot closure is not reclaimed.
    if let Some(frame_id) = started.cancel_frame {
        if let Err(err) = shim.window.cancel_animation_frame(frame_id) {
            log::debug!("scroll: cancel frame {frame_id} failed: {}", js_error_text(&err));
        }
    }
    schedule_frame(shim, started.generation);
}

fn schedule_frame(shim: &Rc<ScrollShim>, generation: u64) {
    let shim_for_cb = Rc::clone(shim);
    let on_frame = Closure::once_into_js(move |now: f64| run_frame(&shim_for_cb, generation, now));
    match shim.window.request_animation_frame(on_frame.unchecked_ref()) {
        Ok(frame_id) => shim.slot.borrow_mut().set_pending_frame(generation, frame_id),
        Err(err) => {
            log::warn!("scroll: requestAnimationFrame failed: {}", js_error_text(&err));
            shim.slot.borrow_mut().cancel();
        }
    }
}

fn run_frame(shim: &Rc<ScrollShim>, generation: u64, now: f64) {
    let frame = shim.slot.borrow_mut().step(generation, now);
    let Some(frame) = frame else {
        return;
    };
    shim.window.scroll_to_with_x_and_y(0.0, frame.position);
    if !frame.done {
        schedule_frame(shim, generation);
    }
}

fn update_url(window: &Window, url: &UrlUpdate) {
    match window.history() {
        Ok(history) => match history.push_state_with_url(&JsValue::NULL, "", Some(url.as_str())) {
            Ok(()) => return,
            Err(err) => log::debug!("scroll: pushState failed: {}", js_error_text(&err)),
        },
        Err(err) => log::debug!("scroll: history unavailable: {}", js_error_text(&err)),
    }

    let location = window.location();
    let result = match url {
        UrlUpdate::Fragment(hash) => location.set_hash(hash),
        UrlUpdate::Href(href) => location.set_href(href),
    };
    if let Err(err) = result {
        log::warn!("scroll: could not update URL: {}", js_error_text(&err));
    }
}

fn js_error_text(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}
