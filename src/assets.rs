//! Placeholder images for missing assets
//!
//! Broken image references are swapped for a generated SVG so the page
//! never shows a broken-image icon. Failures are absorbed, never surfaced.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// Portrait placeholder background
pub const PLACEHOLDER_BACKGROUND: &str = "#efe6dc";
/// Portrait placeholder text
pub const PLACEHOLDER_INK: &str = "#b28a41";

/// 1200x1200 SVG with a large label and a smaller sublabel
pub fn placeholder_svg(label: &str, sublabel: &str) -> String {
    format!(
        "<svg xmlns='http://www.w3.org/2000/svg' width='1200' height='1200'>\
         <rect width='100%' height='100%' fill='{PLACEHOLDER_BACKGROUND}'/>\
         <g fill='{PLACEHOLDER_INK}' font-family='Playfair Display,serif' font-size='72' text-anchor='middle'>\
         <text x='50%' y='45%'>{label}</text>\
         <text x='50%' y='58%' font-size='36'>{sublabel}</text>\
         </g></svg>"
    )
}

/// The default portrait placeholder as a data URI
pub fn portrait_placeholder_uri() -> String {
    svg_data_uri(&placeholder_svg("Portrait", "Mum"))
}

/// Wrap an SVG document in a `data:` URI
pub fn svg_data_uri(svg: &str) -> String {
    format!(
        "data:image/svg+xml;charset=utf-8,{}",
        encode_uri_component(svg)
    )
}

/// `encodeURIComponent`'s escape set: everything but `A-Z a-z 0-9 - _ . ! ~ * ' ( )`
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encode a string as a URI component, UTF-8 byte-wise
pub fn encode_uri_component(input: &str) -> String {
    utf8_percent_encode(input, URI_COMPONENT).to_string()
}

/// Swap an image's source to the placeholder if it fails to load (WASM only).
///
/// The swap happens at most once, so a failing placeholder cannot loop.
#[cfg(target_arch = "wasm32")]
pub fn install_placeholder_fallback(img: &web_sys::HtmlImageElement) {
    use std::cell::Cell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;

    let swapped = Rc::new(Cell::new(false));
    let swap = {
        let swapped = swapped.clone();
        move |img: &web_sys::HtmlImageElement| {
            if swapped.replace(true) {
                return;
            }
            log::debug!("Image failed to load, using placeholder: {}", img.src());
            img.set_src(&portrait_placeholder_uri());
        }
    };

    let target = img.clone();
    let on_error = swap.clone();
    let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
        on_error(&target);
    });
    let _ = img.add_event_listener_with_callback("error", closure.as_ref().unchecked_ref());
    closure.forget();

    // Already failed before the listener was attached
    if img.complete() && img.natural_width() == 0 && !img.src().is_empty() {
        swap(img);
    }
}

/// Install the fallback on the image matching `selector`, if any (WASM only)
#[cfg(target_arch = "wasm32")]
pub fn ensure_placeholder(document: &web_sys::Document, selector: &str) {
    use wasm_bindgen::JsCast;

    let Some(img) = document
        .query_selector(selector)
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<web_sys::HtmlImageElement>().ok())
    else {
        return;
    };
    install_placeholder_fallback(&img);
}
