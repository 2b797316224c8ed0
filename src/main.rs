//! Foil Card entry point
//!
//! Wires the page: foil hearts, cursor follower, confetti, content, scroll
//! choreography and the buttons. Everything runs on the UI thread from DOM
//! events and the per-frame loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_card {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, HtmlElement, PointerEvent};

    use foil_card::anim::{AnimationClock, FrameScheduler};
    use foil_card::confetti::ConfettiLayer;
    use foil_card::consts::RENDER_GRACE_MS;
    use foil_card::content::{CardContent, DomContainer, populate};
    use foil_card::follower::CursorFollower;
    use foil_card::interaction::{self, HOVER_SELECTOR};
    use foil_card::renderer::FoilRenderState;
    use foil_card::scene::{Camera, SceneInput, SceneState, normalize_pointer, tick};
    use foil_card::scroll::{
        ElementRect, FadeFrame, FadeSpec, FadeTracks, INTRO_SEQUENCE, PortraitTilt,
        ScrollChoreographer,
    };
    use foil_card::{Settings, assets, dom};

    const FOLLOWER_STYLE: &str = "position:fixed;width:24px;height:24px;top:0;left:0;\
        pointer-events:none;z-index:200;transform:translate(-50%,-50%);\
        color:var(--accent);transition:color 0.3s;";

    const FOLLOWER_SVG: &str = "<svg viewBox=\"0 0 24 24\" fill=\"currentColor\" \
        style=\"filter:drop-shadow(0 2px 4px rgba(0,0,0,0.2));\">\
        <path d=\"M12 21.35l-1.45-1.32C5.4 15.36 2 12.28 2 8.5 2 5.42 4.42 3 7.5 3c1.74 0 \
        3.41.81 4.5 2.09C13.09 3.81 14.76 3 16.5 3 19.58 3 22 5.42 22 8.5c0 3.78-3.4 \
        6.86-8.55 11.54L12 21.35z\"/></svg>";

    /// Follower model plus the element it drives
    struct Follower {
        model: CursorFollower,
        element: HtmlElement,
    }

    /// Page instance holding all state
    struct Card {
        settings: Settings,
        clock: AnimationClock,
        scene: SceneState,
        camera: Camera,
        pointer: Vec2,
        canvas: HtmlCanvasElement,
        canvas_hidden: bool,
        renderer: Option<FoilRenderState>,
        follower: Option<Follower>,
        confetti: ConfettiLayer,
        fades: FadeTracks<HtmlElement>,
        choreographer: ScrollChoreographer,
        tilt: PortraitTilt,
        portrait_img: Option<HtmlElement>,
    }

    fn apply_fade(el: &HtmlElement, frame: FadeFrame) {
        dom::set_style(el, "transform", &format!("translateY({:.2}px)", frame.y));
        dom::set_style(el, "opacity", &format!("{:.3}", frame.opacity));
    }

    impl Card {
        fn new(settings: Settings, canvas: HtmlCanvasElement, seed: u64) -> Self {
            let clock = if settings.reduced_motion {
                log::info!("Reduced motion: decorative animation frozen");
                AnimationClock::frozen()
            } else {
                AnimationClock::new()
            };
            let (w, h) = hero_size(&canvas);
            Self {
                scene: SceneState::with_count(seed, settings.quality.heart_count()),
                camera: Camera::new(w, h),
                pointer: Vec2::ZERO,
                canvas,
                canvas_hidden: false,
                renderer: None,
                follower: None,
                confetti: ConfettiLayer::new(seed ^ 0x9e37_79b9),
                fades: FadeTracks::new(),
                choreographer: ScrollChoreographer::card_page(),
                tilt: PortraitTilt::new(),
                portrait_img: None,
                clock,
                settings,
            }
        }

        /// Start a fade on every element its selector matches and show the first frame
        fn start_fade(&mut self, document: &web_sys::Document, spec: &FadeSpec) {
            self.fades.start(spec, dom::query_all(document, spec.selector));
            self.fades.advance(0.0, apply_fade);
        }

        /// Resize the camera and backing store to the canvas container
        fn resize(&mut self, window: &web_sys::Window) {
            let (w, h) = hero_size(&self.canvas);
            if !self.camera.resize(w, h) {
                return;
            }
            let dpr = self.settings.pixel_ratio(window.device_pixel_ratio());
            let px_w = ((w as f64) * dpr) as u32;
            let px_h = ((h as f64) * dpr) as u32;
            self.canvas.set_width(px_w.max(1));
            self.canvas.set_height(px_h.max(1));
            if let Some(renderer) = &mut self.renderer {
                renderer.resize(px_w, px_h);
            }
        }

        fn frame(&mut self, now_ms: f64) {
            let delta = self.clock.tick(now_ms);

            // Scene: rotate, drift, separate, then render
            tick(
                &mut self.scene,
                &SceneInput {
                    pointer: self.pointer,
                    step: delta.delta_ratio,
                },
            );
            if let Some(renderer) = &mut self.renderer {
                match renderer.render(&self.scene, &self.camera, self.clock.elapsed()) {
                    Ok(()) => {}
                    Err(wgpu::SurfaceError::Lost) | Err(wgpu::SurfaceError::Outdated) => {
                        let (w, h) = renderer.size;
                        renderer.resize(w, h);
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }

            if let Some(follower) = &mut self.follower {
                let out = follower.model.tick(delta, now_ms);
                dom::set_style(&follower.element, "transform", &out.transform());
                dom::set_style(&follower.element, "opacity", &format!("{:.3}", out.opacity));
                dom::set_style(
                    &follower.element,
                    "color",
                    &format!("var({})", out.fill.css_var()),
                );
            }

            self.confetti.update(delta.dt);

            if !self.fades.is_empty() {
                self.fades.advance(delta.dt, apply_fade);
            }

            if let Some(img) = &self.portrait_img {
                if !self.tilt.is_settled() {
                    let (rx, ry) = self.tilt.advance(delta.dt);
                    dom::set_style(img, "transform", &PortraitTilt::transform(rx, ry));
                }
            }
        }

        fn on_scroll(&mut self, window: &web_sys::Window, document: &web_sys::Document) {
            let (_, vh) = dom::viewport_size(window);
            let update = self.choreographer.on_scroll(vh, |id| {
                document.get_element_by_id(id).map(|el| {
                    let rect = el.get_bounding_client_rect();
                    ElementRect {
                        top: rect.top() as f32,
                        height: rect.height() as f32,
                    }
                })
            });

            for spec in &update.reveals {
                if self.settings.reduced_motion {
                    // Frozen clock: show the content as-is
                    for el in dom::query_all(document, spec.selector) {
                        apply_fade(&el, FadeFrame { y: 0.0, opacity: 1.0 });
                    }
                } else {
                    self.start_fade(document, spec);
                }
            }

            if self.settings.reduced_motion {
                return;
            }
            for (target_id, percent) in update.parallax {
                if let Some(el) = document
                    .get_element_by_id(target_id)
                    .and_then(|el| el.dyn_into::<HtmlElement>().ok())
                {
                    dom::set_style(&el, "transform", &format!("translateY({:.3}%)", percent));
                }
            }
        }
    }

    /// CSS size of the canvas container
    fn hero_size(canvas: &HtmlCanvasElement) -> (f32, f32) {
        let rect = match canvas.parent_element() {
            Some(parent) => parent.get_bounding_client_rect(),
            None => canvas.get_bounding_client_rect(),
        };
        (rect.width() as f32, rect.height() as f32)
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        log::info!("Foil card starting...");

        let Some((window, document)) = dom::window_document() else {
            log::warn!("No window/document; nothing to do");
            return;
        };

        let settings = Settings::load().with_user_preference(dom::prefers_reduced_motion(&window));

        // Images and content come first so hover wiring sees the message tiles
        assets::ensure_placeholder(&document, "#portraitImg");
        assets::ensure_placeholder(&document, "#portraitLarge img");
        populate_content(&document);

        let Some(canvas) = document
            .get_element_by_id("foilCanvas")
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        else {
            log::warn!("No #foilCanvas; running without foil hearts");
            wire_static_controls(&window, &document, &settings);
            return;
        };

        let seed = js_sys::Date::now() as u64;
        let card = Rc::new(RefCell::new(Card::new(settings.clone(), canvas.clone(), seed)));
        card.borrow_mut().resize(&window);
        log::info!("Card initialized with seed: {}", seed);

        wire_static_controls(&window, &document, &settings);
        setup_pointer_handlers(&window, card.clone());
        setup_resize_handler(&window, card.clone());
        setup_scroll_handler(&window, &document, card.clone());
        setup_portrait_tilt(&document, card.clone());
        if settings.effective_cursor_follower() {
            mount_follower(&window, &document, card.clone());
        }
        start_intro(&document, &card);

        spawn_renderer(canvas, card.clone());
        setup_render_grace(&window, card.clone());

        let frame_card = card;
        FrameScheduler::start(move |time| frame_card.borrow_mut().frame(time));

        log::info!("Foil card running!");
    }

    fn populate_content(document: &web_sys::Document) {
        let content = CardContent::sample();
        match (
            DomContainer::by_id(document, "timeline"),
            DomContainer::by_id(document, "messagesGrid"),
        ) {
            (Some(mut timeline), Some(mut messages)) => {
                populate(&content, &mut timeline, &mut messages);
            }
            _ => log::debug!("Timeline or messages container missing; content skipped"),
        }
    }

    /// Buttons that don't depend on the animation state
    fn wire_static_controls(
        window: &web_sys::Window,
        document: &web_sys::Document,
        settings: &Settings,
    ) {
        interaction::wire_navigation(document);
        interaction::wire_focus_outlines(document);
        interaction::wire_print_card(window, document);
        interaction::wire_audio(document, settings.effective_audio_volume());
    }

    fn start_intro(document: &web_sys::Document, card: &Rc<RefCell<Card>>) {
        let mut c = card.borrow_mut();
        if c.settings.reduced_motion {
            return;
        }
        for spec in &INTRO_SEQUENCE {
            c.start_fade(document, spec);
        }
        // Scroll-revealed content waits hidden until its trigger fires
        let pending: Vec<FadeSpec> = c.choreographer.pending_reveals().copied().collect();
        for spec in &pending {
            for el in dom::query_all(document, spec.selector) {
                apply_fade(
                    &el,
                    FadeFrame {
                        y: spec.from_y,
                        opacity: 0.0,
                    },
                );
            }
        }
    }

    fn spawn_renderer(canvas: HtmlCanvasElement, card: Rc<RefCell<Card>>) {
        wasm_bindgen_futures::spawn_local(async move {
            let (w, h) = (canvas.width(), canvas.height());
            match FoilRenderState::from_canvas(canvas, w, h).await {
                Ok(mut renderer) => {
                    let mut c = card.borrow_mut();
                    if c.canvas_hidden {
                        log::warn!("Renderer ready after the grace period; canvas stays hidden");
                        return;
                    }
                    // The canvas may have been resized while the device was pending
                    let (w, h) = (c.canvas.width(), c.canvas.height());
                    if renderer.needs_resize(w, h) {
                        renderer.resize(w, h);
                    }
                    c.renderer = Some(renderer);
                    log::info!("Foil renderer ready");
                }
                Err(e) => log::warn!("Foil renderer unavailable: {}", e),
            }
        });
    }

    /// Hide the canvas if the renderer isn't up in time
    fn setup_render_grace(window: &web_sys::Window, card: Rc<RefCell<Card>>) {
        let closure = Closure::once(move || {
            let mut c = card.borrow_mut();
            if c.renderer.is_none() {
                log::info!("No foil renderer after {} ms; hiding canvas", RENDER_GRACE_MS);
                let _ = c.canvas.style().set_property("display", "none");
                c.canvas_hidden = true;
            }
        });
        let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            RENDER_GRACE_MS,
        );
        closure.forget();
    }

    fn setup_pointer_handlers(window: &web_sys::Window, card: Rc<RefCell<Card>>) {
        // Pointer position drives the scene drift and the follower
        {
            let card = card.clone();
            let win = window.clone();
            dom::add_listener(window, "pointermove", move |e: PointerEvent| {
                let (vw, vh) = dom::viewport_size(&win);
                let (x, y) = (e.client_x() as f32, e.client_y() as f32);
                let mut c = card.borrow_mut();
                c.pointer = normalize_pointer(x, y, vw, vh);
                if let Some(follower) = &mut c.follower {
                    follower.model.pointer_move(x, y, e.time_stamp());
                }
            });
        }

        // Any click: confetti and a follower pulse
        let win = window.clone();
        let Some(document) = window.document() else {
            return;
        };
        let doc = document.clone();
        dom::add_listener(&document, "click", move |e: web_sys::MouseEvent| {
            let (vw, vh) = dom::viewport_size(&win);
            let mut c = card.borrow_mut();
            if c.settings.effective_confetti() {
                let click = Vec2::new(e.client_x() as f32, e.client_y() as f32);
                c.confetti.burst(&doc, click, Vec2::new(vw, vh));
            }
            if let Some(follower) = &mut c.follower {
                follower.model.click();
            }
        });
    }

    fn mount_follower(
        window: &web_sys::Window,
        document: &web_sys::Document,
        card: Rc<RefCell<Card>>,
    ) {
        let Some(body) = document.body() else {
            return;
        };
        let Some(element) = document
            .create_element("div")
            .ok()
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        else {
            return;
        };
        let _ = element.set_attribute("style", FOLLOWER_STYLE);
        let _ = element.set_attribute("aria-hidden", "true");
        element.set_inner_html(FOLLOWER_SVG);
        let _ = body.append_child(&element);

        let (vw, vh) = dom::viewport_size(window);
        card.borrow_mut().follower = Some(Follower {
            model: CursorFollower::new(vw, vh),
            element,
        });

        // Hover affordance on interactive elements
        for el in dom::query_all(document, HOVER_SELECTOR) {
            let enter = card.clone();
            dom::add_listener(&el, "pointerenter", move |_: PointerEvent| {
                if let Some(f) = &mut enter.borrow_mut().follower {
                    f.model.pointer_enter();
                }
            });
            let leave = card.clone();
            dom::add_listener(&el, "pointerleave", move |_: PointerEvent| {
                if let Some(f) = &mut leave.borrow_mut().follower {
                    f.model.pointer_leave();
                }
            });
        }
    }

    fn setup_resize_handler(window: &web_sys::Window, card: Rc<RefCell<Card>>) {
        let win = window.clone();
        dom::add_listener(window, "resize", move |_: web_sys::Event| {
            card.borrow_mut().resize(&win);
        });
    }

    fn setup_scroll_handler(
        window: &web_sys::Window,
        document: &web_sys::Document,
        card: Rc<RefCell<Card>>,
    ) {
        let win = window.clone();
        let doc = document.clone();
        // The tribute may already be in view on load
        card.borrow_mut().on_scroll(&win, &doc);
        dom::add_listener(window, "scroll", move |_: web_sys::Event| {
            card.borrow_mut().on_scroll(&win, &doc);
        });
    }

    fn setup_portrait_tilt(document: &web_sys::Document, card: Rc<RefCell<Card>>) {
        let Some(img) = document
            .query_selector("#portraitLarge img")
            .ok()
            .flatten()
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        else {
            return;
        };
        let Some(wrap) = img.closest(".portrait-large").ok().flatten() else {
            return;
        };
        card.borrow_mut().portrait_img = Some(img);

        {
            let card = card.clone();
            let target = wrap.clone();
            dom::add_listener(&wrap, "pointermove", move |e: PointerEvent| {
                let r = target.get_bounding_client_rect();
                let (nx, ny) = PortraitTilt::normalized_offset(
                    e.client_x() as f32,
                    e.client_y() as f32,
                    r.left() as f32,
                    r.top() as f32,
                    r.width() as f32,
                    r.height() as f32,
                );
                card.borrow_mut().tilt.pointer_move(nx, ny);
            });
        }
        dom::add_listener(&wrap, "pointerleave", move |_: PointerEvent| {
            card.borrow_mut().tilt.pointer_leave();
        });
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_card::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Foil card (native) starting...");
    log::info!("The card runs in the browser - build for wasm32 and serve the page");

    let content = foil_card::content::CardContent::sample();
    log::info!(
        "Sample content: {} timeline entries, {} messages",
        content.timeline.len(),
        content.messages.len()
    );

    println!("{}", foil_card::print_card::printable_card_html());
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
