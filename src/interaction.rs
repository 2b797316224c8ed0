//! Buttons, keyboard access and focus outlines
//!
//! Direct UI interactions are never tied to the animation clock, so they
//! keep working with reduced motion.

/// Elements that enlarge the cursor follower on hover
pub const HOVER_SELECTOR: &str = r#"button, [role="button"], .message-tile, .envelope"#;

/// Class on `<html>` that turns keyboard focus outlines on
pub const FOCUS_CLASS: &str = "show-focus";

/// Keys that activate a focused button-like element
pub fn is_activation_key(key: &str) -> bool {
    key == "Enter" || key == " "
}

/// Tags the browser already activates from the keyboard with a synthetic click
pub fn activates_natively(tag_name: &str) -> bool {
    matches!(
        tag_name.to_ascii_uppercase().as_str(),
        "BUTTON" | "A" | "INPUT" | "SUMMARY" | "SELECT" | "TEXTAREA"
    )
}

/// Sections the page can smooth-scroll to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollTarget {
    /// The revealed letter under the envelope
    Reveal,
    /// The photo timeline
    Timeline,
}

impl ScrollTarget {
    pub fn element_id(self) -> &'static str {
        match self {
            ScrollTarget::Reveal => "reveal",
            ScrollTarget::Timeline => "timeline",
        }
    }

    /// Which section a control scrolls to
    pub fn for_control(control_id: &str) -> Option<Self> {
        match control_id {
            "openEnvelope" | "envelope" => Some(ScrollTarget::Reveal),
            "viewCollage" => Some(ScrollTarget::Timeline),
            _ => None,
        }
    }
}

/// Keyboard-only focus outlines: shown after Tab, hidden by any mouse press
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FocusOutline {
    visible: bool,
}

impl FocusOutline {
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Returns true when the outline state changed
    pub fn key_down(&mut self, key: &str) -> bool {
        if key == "Tab" && !self.visible {
            self.visible = true;
            return true;
        }
        false
    }

    /// Returns true when the outline state changed
    pub fn mouse_down(&mut self) -> bool {
        std::mem::replace(&mut self.visible, false)
    }
}

/// Wire the envelope and collage buttons to their scroll targets (WASM only)
#[cfg(target_arch = "wasm32")]
pub fn wire_navigation(document: &web_sys::Document) {
    use crate::dom;

    for control in ["openEnvelope", "envelope", "viewCollage"] {
        let Some(target) = ScrollTarget::for_control(control) else {
            continue;
        };
        let doc = document.clone();
        dom::add_click_listener(document, control, move || {
            dom::scroll_to_center(&doc, target.element_id());
        });
    }

    // The envelope is a div with role="button", so it needs its own key handling
    let doc = document.clone();
    dom::add_activate_listener(document, "envelope", move || {
        dom::scroll_to_center(&doc, ScrollTarget::Reveal.element_id());
    });
}

/// Toggle `show-focus` on `<html>` for keyboard users (WASM only)
#[cfg(target_arch = "wasm32")]
pub fn wire_focus_outlines(document: &web_sys::Document) {
    use std::cell::Cell;
    use std::rc::Rc;

    let state = Rc::new(Cell::new(FocusOutline::default()));

    let apply = {
        let document = document.clone();
        move |visible: bool| {
            let Some(root) = document.document_element() else {
                return;
            };
            let _ = if visible {
                root.class_list().add_1(FOCUS_CLASS)
            } else {
                root.class_list().remove_1(FOCUS_CLASS)
            };
        }
    };

    {
        let state = state.clone();
        let apply = apply.clone();
        crate::dom::add_listener(document, "keydown", move |e: web_sys::KeyboardEvent| {
            let mut outline = state.get();
            if outline.key_down(&e.key()) {
                apply(outline.is_visible());
            }
            state.set(outline);
        });
    }

    crate::dom::add_listener(document, "mousedown", move |_: web_sys::MouseEvent| {
        let mut outline = state.get();
        if outline.mouse_down() {
            apply(outline.is_visible());
        }
        state.set(outline);
    });
}

/// Wire the ambient audio toggle (WASM only)
#[cfg(target_arch = "wasm32")]
pub fn wire_audio(document: &web_sys::Document, volume: f32) {
    use std::rc::Rc;
    use wasm_bindgen::JsCast;

    let audio = document
        .get_element_by_id("ambientAudio")
        .and_then(|el| el.dyn_into::<web_sys::HtmlAudioElement>().ok());
    let (Some(audio), Some(button)) = (audio, document.get_element_by_id("audioToggle")) else {
        log::debug!("No ambient audio controls on this page");
        return;
    };

    let ambient = Rc::new(crate::audio::AmbientAudio::new(audio, button, volume));
    {
        let element = ambient.element().clone();
        let ambient = ambient.clone();
        crate::dom::add_listener(&element, "pause", move |_: web_sys::Event| ambient.on_pause());
    }
    // A <button>: Enter/Space already arrive as a click
    crate::dom::add_click_listener(document, "audioToggle", move || ambient.click());
}

/// Wire the printable card download button (WASM only)
#[cfg(target_arch = "wasm32")]
pub fn wire_print_card(window: &web_sys::Window, document: &web_sys::Document) {
    let window = window.clone();
    crate::dom::add_click_listener(document, "downloadCard", move || {
        crate::print_card::open_printable_card(&window);
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activation_keys() {
        assert!(is_activation_key("Enter"));
        assert!(is_activation_key(" "));
        assert!(!is_activation_key("Tab"));
        assert!(!is_activation_key("Spacebar"));
    }

    #[test]
    fn test_native_activation_tags() {
        assert!(activates_natively("BUTTON"));
        assert!(activates_natively("button"));
        assert!(activates_natively("A"));
        // The envelope is a role="button" div
        assert!(!activates_natively("DIV"));
        assert!(!activates_natively("SPAN"));
    }

    #[test]
    fn test_scroll_targets() {
        assert_eq!(ScrollTarget::for_control("openEnvelope"), Some(ScrollTarget::Reveal));
        assert_eq!(ScrollTarget::for_control("envelope"), Some(ScrollTarget::Reveal));
        assert_eq!(
            ScrollTarget::for_control("viewCollage").map(ScrollTarget::element_id),
            Some("timeline")
        );
        assert_eq!(ScrollTarget::for_control("downloadCard"), None);
    }

    #[test]
    fn test_focus_outline_tab_and_mouse() {
        let mut outline = FocusOutline::default();
        assert!(!outline.key_down("a"));
        assert!(outline.key_down("Tab"));
        assert!(outline.is_visible());
        // Already visible
        assert!(!outline.key_down("Tab"));

        assert!(outline.mouse_down());
        assert!(!outline.is_visible());
        assert!(!outline.mouse_down());
    }

    #[test]
    fn test_hover_selector_covers_tiles_and_envelope() {
        assert!(HOVER_SELECTOR.contains(".message-tile"));
        assert!(HOVER_SELECTOR.contains(".envelope"));
        assert!(HOVER_SELECTOR.contains(r#"[role="button"]"#));
    }
}
