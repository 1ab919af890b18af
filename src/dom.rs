//! Thin helpers over `web-sys` for reading layout and writing styles.

use crate::scroll::Layout;
use gloo_utils::{document, window};
use log::warn;
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

pub fn query(selector: &str) -> Option<HtmlElement> {
    document()
        .query_selector(selector)
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
}

pub fn query_all(selector: &str) -> Vec<HtmlElement> {
    let Ok(list) = document().query_selector_all(selector) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
        .collect()
}

pub fn set_style(el: &HtmlElement, property: &str, value: &str) {
    if let Err(e) = el.style().set_property(property, value) {
        warn!("Failed to set {}={}: {:?}", property, value, e);
    }
}

pub fn set_class(el: &HtmlElement, class: &str, on: bool) {
    let classes = el.class_list();
    let result = if on {
        classes.add_1(class)
    } else {
        classes.remove_1(class)
    };
    if let Err(e) = result {
        warn!("Failed to toggle class {}: {:?}", class, e);
    }
}

pub fn set_text(el: &HtmlElement, text: &str) {
    el.set_text_content(Some(text));
}

/// Inner window size in CSS pixels.
pub fn viewport_size() -> (f64, f64) {
    let win = window();
    let width = win.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    let height = win.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    (width, height)
}

pub fn scroll_y() -> f64 {
    window().scroll_y().unwrap_or(0.0)
}

/// Snapshot of the trigger's document position and the viewport height.
pub fn layout_of(trigger: &HtmlElement) -> Layout {
    let rect = trigger.get_bounding_client_rect();
    Layout {
        trigger_top: rect.top() + scroll_y(),
        trigger_height: rect.height(),
        viewport_height: viewport_size().1,
    }
}

/// Milliseconds on the same clock as `requestAnimationFrame` timestamps.
pub fn now_ms() -> f64 {
    window()
        .performance()
        .map(|p| p.now())
        .unwrap_or_else(js_sys::Date::now)
}
