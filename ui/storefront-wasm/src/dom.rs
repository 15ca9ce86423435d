//! DOM helpers.
//!
//! Thin wrappers over `web_sys` lookups used by the notifier, the form
//! helpers and page bootstrap. Lookups return `Option`; a missing element is
//! never an error at this level.

use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlElement, Window};

pub fn document() -> Document {
    gloo_utils::document()
}

pub fn window() -> Window {
    gloo_utils::window()
}

pub fn by_id(id: &str) -> Option<Element> {
    document().get_element_by_id(id)
}

pub fn by_id_typed<T: JsCast>(id: &str) -> Option<T> {
    by_id(id).and_then(|e| e.dyn_into::<T>().ok())
}

/// All elements matching `selector`, in document order.
pub fn query_all(selector: &str) -> Vec<Element> {
    match document().query_selector_all(selector) {
        Ok(nl) => collect(&nl),
        Err(_) => Vec::new(),
    }
}

/// All elements under `parent` matching `selector`, in document order.
pub fn query_all_within(parent: &Element, selector: &str) -> Vec<Element> {
    match parent.query_selector_all(selector) {
        Ok(nl) => collect(&nl),
        Err(_) => Vec::new(),
    }
}

fn collect(nl: &web_sys::NodeList) -> Vec<Element> {
    let mut v = Vec::new();
    for i in 0..nl.length() {
        if let Some(e) = nl.item(i) {
            if let Ok(el) = e.dyn_into::<Element>() {
                v.push(el);
            }
        }
    }
    v
}

pub fn create_element(tag: &str) -> Result<Element, JsValue> {
    document().create_element(tag)
}

pub fn add_class(el: &Element, cls: &str) {
    let _ = el.class_list().add_1(cls);
}

/// Set an inline style property. No-op for non-HTML elements.
pub fn set_style(el: &Element, prop: &str, value: &str) {
    if let Some(html) = el.dyn_ref::<HtmlElement>() {
        let _ = html.style().set_property(prop, value);
    }
}

pub fn set_inner_html(el: &Element, html: &str) {
    el.set_inner_html(html);
}

/// Escape text before it goes into `innerHTML`.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}
