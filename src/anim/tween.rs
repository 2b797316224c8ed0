//! Scalar property tweens
//!
//! A tween owns its own elapsed time; callers feed it scaled frame deltas
//! from the shared clock, so a frozen clock freezes every tween.

use super::ease::Ease;

/// How a tween behaves once it reaches the end
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Repeat {
    /// Play once and hold the final value
    #[default]
    Once,
    /// Play forward, then backward, forever
    YoyoForever,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tween {
    pub from: f32,
    pub to: f32,
    /// Seconds per cycle
    pub duration: f32,
    /// Seconds before the tween starts moving
    pub delay: f32,
    pub ease: Ease,
    pub repeat: Repeat,
    elapsed: f32,
}

impl Tween {
    pub fn new(from: f32, to: f32, duration: f32) -> Self {
        Self {
            from,
            to,
            duration,
            delay: 0.0,
            ease: Ease::Linear,
            repeat: Repeat::Once,
            elapsed: 0.0,
        }
    }

    pub fn with_ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    pub fn with_delay(mut self, delay: f32) -> Self {
        self.delay = delay.max(0.0);
        self
    }

    pub fn yoyo(mut self) -> Self {
        self.repeat = Repeat::YoyoForever;
        self
    }

    /// Advance by `dt` seconds and return the new value
    pub fn advance(&mut self, dt: f32) -> f32 {
        self.elapsed += dt.max(0.0);
        self.value()
    }

    /// Un-eased position within the current cycle (0-1)
    pub fn progress(&self) -> f32 {
        let active = self.elapsed - self.delay;
        if active <= 0.0 {
            return 0.0;
        }
        if self.duration <= 0.0 {
            return 1.0;
        }
        let cycles = active / self.duration;
        match self.repeat {
            Repeat::Once => cycles.min(1.0),
            Repeat::YoyoForever => {
                let n = cycles.floor();
                let frac = cycles - n;
                if (n as u64) % 2 == 0 { frac } else { 1.0 - frac }
            }
        }
    }

    pub fn value(&self) -> f32 {
        let t = self.ease.apply(self.progress());
        self.from + (self.to - self.from) * t
    }

    /// True once a one-shot tween has played out (yoyo tweens never complete)
    pub fn is_complete(&self) -> bool {
        match self.repeat {
            Repeat::Once => self.elapsed >= self.delay + self.duration,
            Repeat::YoyoForever => false,
        }
    }

    /// Rewind to the start (progress 0)
    pub fn restart(&mut self) {
        self.elapsed = 0.0;
    }
}
