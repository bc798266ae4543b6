//! Null-safe DOM helpers
//!
//! Every lookup returns an `Option`; a missing element only disables the
//! feature that needed it.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlElement};

use crate::consts::TOAST_BUFFER_MS;

pub fn document() -> Option<Document> {
    web_sys::window().and_then(|w| w.document())
}

/// Look up an element by id
pub fn by_id(id: &str) -> Option<HtmlElement> {
    document()?
        .get_element_by_id(id)?
        .dyn_into::<HtmlElement>()
        .ok()
}

pub fn set_text(id: &str, text: &str) {
    if let Some(el) = by_id(id) {
        el.set_text_content(Some(text));
    }
}

pub fn set_hidden(el: &Element, hidden: bool) {
    let _ = el.class_list().toggle_with_force("hidden", hidden);
}

/// Create a `div` with a class, not yet attached
pub fn create_div(class: &str) -> Option<HtmlElement> {
    let el = document()?.create_element("div").ok()?;
    el.set_class_name(class);
    el.dyn_into::<HtmlElement>().ok()
}

/// Run `f` once after `delay_ms`
pub fn set_timeout(delay_ms: u64, f: impl FnOnce() + 'static) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let closure = Closure::once(f);
    let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
        closure.as_ref().unchecked_ref(),
        delay_ms.min(i32::MAX as u64) as i32,
    );
    closure.forget();
}

/// Show a transient notification; it removes itself after `duration_ms`
/// plus a short buffer
pub fn notify(text: &str, duration_ms: u64) {
    let (Some(doc), Some(toast)) = (document(), create_div("toast")) else {
        return;
    };
    let Some(body) = doc.body() else { return };

    toast.set_inner_text(text);
    if body.append_child(&toast).is_err() {
        log::warn!("Could not show notification: {}", text);
        return;
    }
    set_timeout(duration_ms + TOAST_BUFFER_MS, move || toast.remove());
}

/// Briefly add `class` to an element
pub fn pulse(el: &Element, class: &str, duration_ms: u64) {
    let _ = el.class_list().add_1(class);
    let el = el.clone();
    let class = class.to_string();
    set_timeout(duration_ms, move || {
        let _ = el.class_list().remove_1(&class);
    });
}
