//! requestAnimationFrame loop (WASM only)

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

/// Calls `frame(timestamp_ms)` once per display refresh, forever
pub struct FrameScheduler;

impl FrameScheduler {
    pub fn start<F: FnMut(f64) + 'static>(frame: F) {
        Self::request(Rc::new(RefCell::new(frame)));
    }

    fn request<F: FnMut(f64) + 'static>(frame: Rc<RefCell<F>>) {
        let Some(window) = web_sys::window() else {
            log::warn!("No window; animation loop not started");
            return;
        };
        let closure = Closure::once(move |time: f64| {
            (&mut *frame.borrow_mut())(time);
            Self::request(frame);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }
}
