//! Animation primitives
//!
//! Everything that moves on the page is driven from here:
//! - Easing curves
//! - Property tweens (one-shot and yoyo)
//! - The shared animation clock (time scale, delta ratio)
//! - The per-frame scheduler (WASM only)

pub mod clock;
pub mod ease;
#[cfg(target_arch = "wasm32")]
pub mod scheduler;
pub mod tween;

pub use clock::{AnimationClock, FrameDelta};
pub use ease::Ease;
#[cfg(target_arch = "wasm32")]
pub use scheduler::FrameScheduler;
pub use tween::{Repeat, Tween};
