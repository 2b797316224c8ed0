//! Intro, reveal and parallax choreography
//!
//! Everything here is layout-agnostic: the page measures element rects and
//! feeds them in, and writes the resulting transforms back out. Fades use
//! "from" semantics: an element starts offset and transparent and settles
//! at its natural position.

use crate::anim::{Ease, Tween};

/// A staggered fade-up applied to every element matching `selector`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FadeSpec {
    pub selector: &'static str,
    /// Starting vertical offset (pixels)
    pub from_y: f32,
    pub duration: f32,
    pub delay: f32,
    /// Extra delay per matched element
    pub stagger: f32,
    pub ease: Ease,
}

/// Page-ready intro, in start order
pub const INTRO_SEQUENCE: [FadeSpec; 5] = [
    FadeSpec {
        selector: ".portrait-medallion",
        from_y: -20.0,
        duration: 1.1,
        delay: 0.0,
        stagger: 0.0,
        ease: Ease::Power3Out,
    },
    FadeSpec {
        selector: ".headline",
        from_y: 6.0,
        duration: 1.2,
        delay: 0.12,
        stagger: 0.0,
        ease: Ease::Power2Out,
    },
    FadeSpec {
        selector: ".subline",
        from_y: 8.0,
        duration: 1.2,
        delay: 0.18,
        stagger: 0.0,
        ease: Ease::Power2Out,
    },
    FadeSpec {
        selector: ".hero-actions .btn",
        from_y: 10.0,
        duration: 1.0,
        delay: 0.26,
        stagger: 0.08,
        ease: Ease::Power1Out,
    },
    FadeSpec {
        selector: "#letterpress",
        from_y: 12.0,
        duration: 1.2,
        delay: 0.6,
        stagger: 0.0,
        ease: Ease::Power3Out,
    },
];

/// Tribute section contents, revealed on scroll
pub const TRIBUTE_REVEAL: FadeSpec = FadeSpec {
    selector: "#tribute .left, #tribute .right > *",
    from_y: 30.0,
    duration: 0.9,
    delay: 0.0,
    stagger: 0.1,
    ease: Ease::Power2Out,
};

/// Fraction of the viewport height the trigger's top must cross
pub const REVEAL_START: f32 = 0.8;

/// Parallax travel at full progress (percent of the target's height)
pub const PARALLAX_PERCENT: f32 = -8.0;

/// Vertical position and size of an element relative to the viewport
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementRect {
    pub top: f32,
    pub height: f32,
}

/// Offset and opacity for one frame of a fade
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FadeFrame {
    pub y: f32,
    pub opacity: f32,
}

/// One element's fade-up
#[derive(Debug, Clone)]
pub struct FadeIn {
    y: Tween,
    opacity: Tween,
}

impl FadeIn {
    pub fn new(spec: &FadeSpec, index: usize) -> Self {
        let delay = spec.delay + spec.stagger * index as f32;
        Self {
            y: Tween::new(spec.from_y, 0.0, spec.duration)
                .with_ease(spec.ease)
                .with_delay(delay),
            opacity: Tween::new(0.0, 1.0, spec.duration)
                .with_ease(spec.ease)
                .with_delay(delay),
        }
    }

    pub fn advance(&mut self, dt: f32) -> FadeFrame {
        FadeFrame {
            y: self.y.advance(dt),
            opacity: self.opacity.advance(dt),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.y.is_complete() && self.opacity.is_complete()
    }
}

/// Running fades keyed by whatever handle the page uses for elements
#[derive(Debug)]
pub struct FadeTracks<T> {
    tracks: Vec<(T, FadeIn)>,
}

impl<T> Default for FadeTracks<T> {
    fn default() -> Self {
        Self { tracks: Vec::new() }
    }
}

impl<T> FadeTracks<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start `spec` on `targets` in order, staggering each one
    pub fn start(&mut self, spec: &FadeSpec, targets: impl IntoIterator<Item = T>) {
        for (i, target) in targets.into_iter().enumerate() {
            self.tracks.push((target, FadeIn::new(spec, i)));
        }
    }

    /// Advance all fades, call `apply` for each, then drop the finished ones.
    /// A finished fade still gets its final frame applied.
    pub fn advance(&mut self, dt: f32, mut apply: impl FnMut(&T, FadeFrame)) {
        for (target, fade) in &mut self.tracks {
            let frame = fade.advance(dt);
            apply(target, frame);
        }
        self.tracks.retain(|(_, fade)| !fade.is_complete());
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}

/// Fires a fade once, when the trigger element scrolls into view
#[derive(Debug, Clone)]
pub struct RevealTrigger {
    pub trigger_id: &'static str,
    pub spec: FadeSpec,
    fired: bool,
}

impl RevealTrigger {
    pub fn new(trigger_id: &'static str, spec: FadeSpec) -> Self {
        Self {
            trigger_id,
            spec,
            fired: false,
        }
    }

    pub fn has_fired(&self) -> bool {
        self.fired
    }

    /// True exactly once: the first time the trigger's top is at or above 80% of the viewport
    pub fn check(&mut self, rect: ElementRect, viewport_height: f32) -> bool {
        if self.fired || rect.top > viewport_height * REVEAL_START {
            return false;
        }
        self.fired = true;
        true
    }
}

/// Scrubbed vertical parallax on `target_id`, driven by `trigger_id` crossing the viewport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParallaxBinding {
    pub target_id: &'static str,
    pub trigger_id: &'static str,
}

impl ParallaxBinding {
    /// 0 when the trigger's top meets the viewport bottom, 1 when its bottom meets the viewport top
    pub fn progress(rect: ElementRect, viewport_height: f32) -> f32 {
        let span = viewport_height + rect.height;
        if span <= 0.0 {
            return 0.0;
        }
        ((viewport_height - rect.top) / span).clamp(0.0, 1.0)
    }

    /// Vertical offset in percent of the target's own height (linear)
    pub fn offset_percent(progress: f32) -> f32 {
        PARALLAX_PERCENT * progress
    }
}

/// What a scroll event changed
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ScrollUpdate {
    /// Reveals that fired on this event
    pub reveals: Vec<FadeSpec>,
    /// (target id, y offset percent)
    pub parallax: Vec<(&'static str, f32)>,
}

#[derive(Debug, Default)]
pub struct ScrollChoreographer {
    reveals: Vec<RevealTrigger>,
    parallax: Vec<ParallaxBinding>,
}

impl ScrollChoreographer {
    pub fn new() -> Self {
        Self::default()
    }

    /// The card page: tribute reveal and portrait parallax
    pub fn card_page() -> Self {
        let mut choreographer = Self::new();
        choreographer.add_reveal(RevealTrigger::new("tribute", TRIBUTE_REVEAL));
        choreographer.bind_parallax(ParallaxBinding {
            target_id: "portraitLarge",
            trigger_id: "tribute",
        });
        choreographer
    }

    pub fn add_reveal(&mut self, trigger: RevealTrigger) {
        self.reveals.push(trigger);
    }

    /// Register a parallax binding. Returns false (and changes nothing) for a duplicate.
    pub fn bind_parallax(&mut self, binding: ParallaxBinding) -> bool {
        if self.parallax.contains(&binding) {
            log::debug!("Parallax on #{} already bound", binding.target_id);
            return false;
        }
        self.parallax.push(binding);
        true
    }

    /// Fades still waiting for their trigger; their targets start hidden
    pub fn pending_reveals(&self) -> impl Iterator<Item = &FadeSpec> {
        self.reveals
            .iter()
            .filter(|r| !r.has_fired())
            .map(|r| &r.spec)
    }

    pub fn parallax_bindings(&self) -> &[ParallaxBinding] {
        &self.parallax
    }

    /// Evaluate every trigger against the current layout.
    /// `measure` returns the viewport-relative rect of an element id.
    pub fn on_scroll(
        &mut self,
        viewport_height: f32,
        measure: impl Fn(&str) -> Option<ElementRect>,
    ) -> ScrollUpdate {
        let mut update = ScrollUpdate::default();

        for reveal in &mut self.reveals {
            if reveal.has_fired() {
                continue;
            }
            if let Some(rect) = measure(reveal.trigger_id) {
                if reveal.check(rect, viewport_height) {
                    update.reveals.push(reveal.spec);
                }
            }
        }

        for binding in &self.parallax {
            if let Some(rect) = measure(binding.trigger_id) {
                let progress = ParallaxBinding::progress(rect, viewport_height);
                update
                    .parallax
                    .push((binding.target_id, ParallaxBinding::offset_percent(progress)));
            }
        }

        update
    }
}

const TILT_Y_DEG: f32 = 8.0;
const TILT_X_DEG: f32 = 6.0;
const TILT_TIME: f32 = 0.7;
const TILT_RESET_TIME: f32 = 0.6;

/// Pointer-driven 3D tilt of the large portrait
#[derive(Debug, Clone)]
pub struct PortraitTilt {
    rotation_x: Tween,
    rotation_y: Tween,
}

impl Default for PortraitTilt {
    fn default() -> Self {
        Self::new()
    }
}

impl PortraitTilt {
    pub fn new() -> Self {
        Self {
            rotation_x: Tween::new(0.0, 0.0, 0.0),
            rotation_y: Tween::new(0.0, 0.0, 0.0),
        }
    }

    /// Pointer offset from the wrapper centre, each axis in -0.5..0.5
    pub fn normalized_offset(
        x: f32,
        y: f32,
        left: f32,
        top: f32,
        width: f32,
        height: f32,
    ) -> (f32, f32) {
        if width <= 0.0 || height <= 0.0 {
            return (0.0, 0.0);
        }
        ((x - left) / width - 0.5, (y - top) / height - 0.5)
    }

    fn retarget(&mut self, x: f32, y: f32, duration: f32) {
        self.rotation_x =
            Tween::new(self.rotation_x.value(), x, duration).with_ease(Ease::Power2Out);
        self.rotation_y =
            Tween::new(self.rotation_y.value(), y, duration).with_ease(Ease::Power2Out);
    }

    pub fn pointer_move(&mut self, nx: f32, ny: f32) {
        self.retarget(-ny * TILT_X_DEG, nx * TILT_Y_DEG, TILT_TIME);
    }

    pub fn pointer_leave(&mut self) {
        self.retarget(0.0, 0.0, TILT_RESET_TIME);
    }

    /// (rotateX, rotateY) in degrees
    pub fn advance(&mut self, dt: f32) -> (f32, f32) {
        (self.rotation_x.advance(dt), self.rotation_y.advance(dt))
    }

    pub fn is_settled(&self) -> bool {
        self.rotation_x.is_complete() && self.rotation_y.is_complete()
    }

    pub fn transform(rotation_x: f32, rotation_y: f32) -> String {
        format!("rotateX({:.2}deg) rotateY({:.2}deg)", rotation_x, rotation_y)
    }
}
