//! Shared animation clock
//!
//! Converts host frame timestamps (ms) into scaled deltas. Every decorative
//! animation reads its time from here, so setting the time scale to zero
//! (reduced motion) freezes them all at once.

use crate::consts::{MAX_FRAME_DT, REFERENCE_FRAME};

/// Time elapsed since the previous frame, after time scaling
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameDelta {
    /// Scaled seconds
    pub dt: f32,
    /// Scaled dt relative to a 60 Hz frame (1.0 at 60 fps)
    pub delta_ratio: f32,
}

impl FrameDelta {
    pub const ZERO: Self = Self {
        dt: 0.0,
        delta_ratio: 0.0,
    };

    pub fn is_frozen(&self) -> bool {
        self.dt == 0.0
    }
}

#[derive(Debug, Clone)]
pub struct AnimationClock {
    time_scale: f32,
    last_time_ms: Option<f64>,
    /// Scaled seconds since the clock started
    elapsed: f64,
}

impl Default for AnimationClock {
    fn default() -> Self {
        Self::new()
    }
}

impl AnimationClock {
    pub fn new() -> Self {
        Self {
            time_scale: 1.0,
            last_time_ms: None,
            elapsed: 0.0,
        }
    }

    /// Clock for the reduced-motion preference (time scale 0)
    pub fn frozen() -> Self {
        let mut clock = Self::new();
        clock.set_time_scale(0.0);
        clock
    }

    pub fn set_time_scale(&mut self, scale: f32) {
        self.time_scale = scale.max(0.0);
    }

    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    pub fn is_frozen(&self) -> bool {
        self.time_scale == 0.0
    }

    /// Scaled seconds since start
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Record a frame at `now_ms` (host timestamp) and return the scaled delta
    pub fn tick(&mut self, now_ms: f64) -> FrameDelta {
        let raw = match self.last_time_ms {
            Some(last) => (((now_ms - last) / 1000.0) as f32).clamp(0.0, MAX_FRAME_DT),
            None => REFERENCE_FRAME,
        };
        self.last_time_ms = Some(now_ms);

        let dt = raw * self.time_scale;
        self.elapsed += dt as f64;
        FrameDelta {
            dt,
            delta_ratio: dt / REFERENCE_FRAME,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_frame_is_reference() {
        let mut clock = AnimationClock::new();
        let delta = clock.tick(1000.0);
        assert!((delta.delta_ratio - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_delta_ratio_tracks_frame_rate() {
        let mut clock = AnimationClock::new();
        clock.tick(0.0);
        // 30 fps frame
        let delta = clock.tick(1000.0 / 30.0);
        assert!((delta.delta_ratio - 2.0).abs() < 1e-3);
    }

    #[test]
    fn test_long_gap_is_clamped() {
        let mut clock = AnimationClock::new();
        clock.tick(0.0);
        let delta = clock.tick(5000.0);
        assert!((delta.dt - MAX_FRAME_DT).abs() < 1e-6);
    }

    #[test]
    fn test_frozen_clock_never_advances() {
        let mut clock = AnimationClock::frozen();
        for i in 0..10 {
            let delta = clock.tick(i as f64 * 16.0);
            assert!(delta.is_frozen());
        }
        assert_eq!(clock.elapsed(), 0.0);
    }

    #[test]
    fn test_backwards_timestamp_is_zero() {
        let mut clock = AnimationClock::new();
        clock.tick(100.0);
        assert_eq!(clock.tick(50.0).dt, 0.0);
    }
}
