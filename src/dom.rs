//! DOM helpers (WASM only)

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<(web::Window, web::Document)> {
    let window = web::window()?;
    let document = window.document()?;
    Some((window, document))
}

/// Attach a long-lived listener; the closure lives as long as the page
pub fn add_listener<E: JsCast + 'static>(
    target: &web::EventTarget,
    event: &str,
    mut handler: impl FnMut(E) + 'static,
) {
    let closure = Closure::<dyn FnMut(web::Event)>::new(move |event: web::Event| {
        if let Ok(event) = event.dyn_into::<E>() {
            handler(event);
        }
    });
    let _ = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
    closure.forget();
}

#[inline]
pub fn add_click_listener(
    document: &web::Document,
    element_id: &str,
    mut handler: impl FnMut() + 'static,
) {
    if let Some(el) = document.get_element_by_id(element_id) {
        add_listener(&el, "click", move |_: web::Event| handler());
    }
}

/// Enter/Space on an element acts like a click. Elements the browser already
/// activates (buttons, links) are skipped so the handler never runs twice.
pub fn add_activate_listener(
    document: &web::Document,
    element_id: &str,
    mut handler: impl FnMut() + 'static,
) {
    let Some(el) = document.get_element_by_id(element_id) else {
        return;
    };
    if crate::interaction::activates_natively(&el.tag_name()) {
        log::debug!("#{} activates natively; no key listener", element_id);
        return;
    }
    add_listener(&el, "keydown", move |e: web::KeyboardEvent| {
        if crate::interaction::is_activation_key(&e.key()) {
            // Space would otherwise scroll the page
            e.prevent_default();
            handler();
        }
    });
}

/// Every element matching `selector`, as `HtmlElement`s
pub fn query_all(document: &web::Document, selector: &str) -> Vec<web::HtmlElement> {
    let Ok(list) = document.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<web::HtmlElement>().ok())
        .collect()
}

#[inline]
pub fn set_style(el: &web::HtmlElement, property: &str, value: &str) {
    let _ = el.style().set_property(property, value);
}

/// Smoothly scroll an element to the middle of the viewport
pub fn scroll_to_center(document: &web::Document, element_id: &str) {
    let Some(el) = document.get_element_by_id(element_id) else {
        log::debug!("No #{} to scroll to", element_id);
        return;
    };
    let options = web::ScrollIntoViewOptions::new();
    options.set_behavior(web::ScrollBehavior::Smooth);
    options.set_block(web::ScrollLogicalPosition::Center);
    el.scroll_into_view_with_scroll_into_view_options(&options);
}

/// The user agent's reduced-motion preference, read once
pub fn prefers_reduced_motion(window: &web::Window) -> bool {
    window
        .match_media("(prefers-reduced-motion: reduce)")
        .ok()
        .flatten()
        .map(|mq| mq.matches())
        .unwrap_or(false)
}

/// CSS pixel viewport size
pub fn viewport_size(window: &web::Window) -> (f32, f32) {
    let width = window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    let height = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    (width as f32, height as f32)
}
