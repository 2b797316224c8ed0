//! Heart cursor follower
//!
//! A decorative heart that trails the pointer with frame-rate independent
//! smoothing. After the pointer rests for a moment it starts "breathing";
//! any pointer move stops that again.

use glam::Vec2;

use crate::anim::{Ease, FrameDelta, Tween};
use crate::consts::{FOLLOWER_SPEED, IDLE_DELAY_MS};

const BREATH_SCALE: f32 = 1.15;
const BREATH_CYCLE: f32 = 1.0;
const HOVER_SCALE: f32 = 1.4;
const SCALE_EASE_TIME: f32 = 0.3;
const PULSE_SCALE: f32 = 2.5;
const PULSE_TIME: f32 = 0.4;

/// Idle/breathing state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FollowerMotion {
    /// Following the pointer at rest scale
    Tracking,
    /// Pointer idle: slow scale oscillation
    Breathing,
}

/// Which theme color the heart is filled with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FollowerFill {
    /// `--accent` (default)
    Accent,
    /// `--paper` (over interactive elements)
    Paper,
}

impl FollowerFill {
    /// CSS custom property holding this color
    pub fn css_var(self) -> &'static str {
        match self {
            FollowerFill::Accent => "--accent",
            FollowerFill::Paper => "--paper",
        }
    }
}

/// What the DOM layer writes for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FollowerFrame {
    pub x: f32,
    pub y: f32,
    pub scale: f32,
    pub opacity: f32,
    pub fill: FollowerFill,
}

impl FollowerFrame {
    /// CSS transform centring the heart on (x, y)
    pub fn transform(&self) -> String {
        format!(
            "translate({:.2}px, {:.2}px) translate(-50%, -50%) scale({:.3})",
            self.x, self.y, self.scale
        )
    }
}

/// Click pulse: grow and fade, then snap back
#[derive(Debug, Clone)]
struct Pulse {
    scale: Tween,
    opacity: Tween,
}

#[derive(Debug, Clone)]
pub struct CursorFollower {
    pub pos: Vec2,
    pub pointer: Vec2,
    motion: FollowerMotion,
    /// Host time of the last pointer move (None until the first one)
    last_move_ms: Option<f64>,
    hovering: bool,
    breath: Tween,
    scale_tween: Tween,
    pulse: Option<Pulse>,
    scale: f32,
    opacity: f32,
}

impl CursorFollower {
    /// Start centred in a `width` x `height` viewport
    pub fn new(width: f32, height: f32) -> Self {
        let center = Vec2::new(width / 2.0, height / 2.0);
        Self {
            pos: center,
            pointer: center,
            motion: FollowerMotion::Tracking,
            last_move_ms: None,
            hovering: false,
            breath: Tween::new(1.0, BREATH_SCALE, BREATH_CYCLE)
                .with_ease(Ease::Power1InOut)
                .yoyo(),
            scale_tween: Tween::new(1.0, 1.0, 0.0),
            pulse: None,
            scale: 1.0,
            opacity: 1.0,
        }
    }

    pub fn motion(&self) -> FollowerMotion {
        self.motion
    }

    pub fn fill(&self) -> FollowerFill {
        if self.hovering {
            FollowerFill::Paper
        } else {
            FollowerFill::Accent
        }
    }

    fn rest_scale(&self) -> f32 {
        if self.hovering { HOVER_SCALE } else { 1.0 }
    }

    fn ease_scale_to(&mut self, target: f32) {
        self.scale_tween = Tween::new(self.scale, target, SCALE_EASE_TIME);
    }

    pub fn pointer_move(&mut self, x: f32, y: f32, now_ms: f64) {
        self.pointer = Vec2::new(x, y);
        self.last_move_ms = Some(now_ms);
        if self.motion == FollowerMotion::Breathing {
            self.motion = FollowerMotion::Tracking;
            self.breath.restart();
            self.ease_scale_to(self.rest_scale());
        }
    }

    pub fn pointer_enter(&mut self) {
        self.hovering = true;
        self.ease_scale_to(HOVER_SCALE);
    }

    pub fn pointer_leave(&mut self) {
        self.hovering = false;
        self.ease_scale_to(1.0);
    }

    pub fn click(&mut self) {
        self.pulse = Some(Pulse {
            scale: Tween::new(1.0, PULSE_SCALE, PULSE_TIME).with_ease(Ease::Power2Out),
            opacity: Tween::new(1.0, 0.0, PULSE_TIME).with_ease(Ease::Power2Out),
        });
    }

    /// Advance one frame. `now_ms` is host time (idle detection is not time-scaled).
    pub fn tick(&mut self, delta: FrameDelta, now_ms: f64) -> FollowerFrame {
        // 0.2 per 60 Hz frame, compounded for longer or shorter frames
        let k = 1.0 - (1.0 - FOLLOWER_SPEED).powf(delta.delta_ratio);
        self.pos += (self.pointer - self.pos) * k;

        if self.motion == FollowerMotion::Tracking
            && !self.hovering
            && self
                .last_move_ms
                .is_some_and(|last| now_ms - last >= IDLE_DELAY_MS)
        {
            self.motion = FollowerMotion::Breathing;
            self.breath.restart();
        }

        if let Some(pulse) = &mut self.pulse {
            self.scale = pulse.scale.advance(delta.dt);
            self.opacity = pulse.opacity.advance(delta.dt);
            if pulse.scale.is_complete() {
                self.pulse = None;
                self.scale = 1.0;
                self.opacity = 1.0;
                self.scale_tween = Tween::new(1.0, self.rest_scale(), SCALE_EASE_TIME);
            }
        } else if self.motion == FollowerMotion::Breathing {
            self.scale = self.breath.advance(delta.dt);
        } else {
            self.scale = self.scale_tween.advance(delta.dt);
        }

        FollowerFrame {
            x: self.pos.x,
            y: self.pos.y,
            scale: self.scale,
            opacity: self.opacity,
            fill: self.fill(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(ratio: f32) -> FrameDelta {
        FrameDelta {
            dt: ratio / 60.0,
            delta_ratio: ratio,
        }
    }

    #[test]
    fn test_starts_centred() {
        let follower = CursorFollower::new(800.0, 600.0);
        assert_eq!(follower.pos, Vec2::new(400.0, 300.0));
        assert_eq!(follower.motion(), FollowerMotion::Tracking);
    }

    #[test]
    fn test_one_frame_moves_twenty_percent() {
        let mut follower = CursorFollower::new(0.0, 0.0);
        follower.pointer_move(100.0, 0.0, 0.0);
        let out = follower.tick(frame(1.0), 16.0);
        assert!((out.x - 20.0).abs() < 1e-4);
    }

    #[test]
    fn test_frame_rate_independent() {
        // Two 60 Hz frames land where one 30 Hz frame does
        let mut fast = CursorFollower::new(0.0, 0.0);
        fast.pointer_move(100.0, 50.0, 0.0);
        fast.tick(frame(1.0), 16.0);
        let a = fast.tick(frame(1.0), 32.0);

        let mut slow = CursorFollower::new(0.0, 0.0);
        slow.pointer_move(100.0, 50.0, 0.0);
        let b = slow.tick(frame(2.0), 32.0);

        assert!((a.x - b.x).abs() < 1e-3);
        assert!((a.y - b.y).abs() < 1e-3);
    }

    #[test]
    fn test_converges_to_pointer() {
        let mut follower = CursorFollower::new(0.0, 0.0);
        follower.pointer_move(640.0, 360.0, 0.0);
        let mut out = follower.tick(frame(1.0), 0.0);
        for i in 0..200 {
            out = follower.tick(frame(1.0), i as f64);
        }
        assert!((out.x - 640.0).abs() < 0.01);
        assert!((out.y - 360.0).abs() < 0.01);
    }

    #[test]
    fn test_frozen_clock_holds_position() {
        let mut follower = CursorFollower::new(800.0, 600.0);
        follower.pointer_move(10.0, 10.0, 0.0);
        for i in 0..30 {
            let out = follower.tick(FrameDelta::ZERO, i as f64 * 16.0);
            assert_eq!((out.x, out.y), (400.0, 300.0));
        }
    }

    #[test]
    fn test_no_breathing_before_first_move() {
        let mut follower = CursorFollower::new(800.0, 600.0);
        follower.tick(frame(1.0), 10_000.0);
        assert_eq!(follower.motion(), FollowerMotion::Tracking);
    }

    #[test]
    fn test_idle_starts_breathing_and_move_cancels() {
        let mut follower = CursorFollower::new(800.0, 600.0);
        follower.pointer_move(100.0, 100.0, 1000.0);
        follower.tick(frame(1.0), 1200.0);
        assert_eq!(follower.motion(), FollowerMotion::Tracking);

        follower.tick(frame(1.0), 1300.0);
        assert_eq!(follower.motion(), FollowerMotion::Breathing);

        // Half a breath cycle later the heart is larger than rest
        let mut out = follower.tick(frame(1.0), 1316.0);
        for i in 0..30 {
            out = follower.tick(frame(1.0), 1316.0 + i as f64 * 16.0);
        }
        assert!(out.scale > 1.0);

        follower.pointer_move(120.0, 100.0, 1900.0);
        assert_eq!(follower.motion(), FollowerMotion::Tracking);
        for i in 0..30 {
            out = follower.tick(frame(1.0), 1900.0 + i as f64 * 5.0);
        }
        assert!((out.scale - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_hover_swaps_fill_and_scale() {
        let mut follower = CursorFollower::new(800.0, 600.0);
        follower.pointer_enter();
        let mut out = follower.tick(frame(1.0), 0.0);
        assert_eq!(out.fill, FollowerFill::Paper);
        for _ in 0..30 {
            out = follower.tick(frame(1.0), 0.0);
        }
        assert!((out.scale - HOVER_SCALE).abs() < 1e-4);

        follower.pointer_leave();
        for _ in 0..30 {
            out = follower.tick(frame(1.0), 0.0);
        }
        assert_eq!(out.fill, FollowerFill::Accent);
        assert!((out.scale - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_click_pulse_resets() {
        let mut follower = CursorFollower::new(800.0, 600.0);
        follower.click();
        let mid = follower.tick(frame(12.0), 0.0); // 0.2 s
        assert!(mid.scale > 1.0);
        assert!(mid.opacity < 1.0);

        let end = follower.tick(frame(15.0), 0.0); // past 0.4 s
        assert_eq!(end.scale, 1.0);
        assert_eq!(end.opacity, 1.0);
    }

    #[test]
    fn test_transform_string() {
        let out = FollowerFrame {
            x: 10.0,
            y: 20.5,
            scale: 1.0,
            opacity: 1.0,
            fill: FollowerFill::Accent,
        };
        assert_eq!(
            out.transform(),
            "translate(10.00px, 20.50px) translate(-50%, -50%) scale(1.000)"
        );
    }
}
