//! Foil Card - a vintage birthday card page
//!
//! Core modules:
//! - `scene`: Floating foil hearts (rotation, pointer drift, separation)
//! - `renderer`: WebGPU raymarched foil rendering
//! - `anim`: Tweens, easing and the shared animation clock
//! - `follower`: Heart cursor follower
//! - `confetti`: Click confetti bursts with explicit particle lifecycle
//! - `content`: Timeline and message tiles
//! - `scroll`: Scroll-bound reveals, parallax and portrait tilt
//! - `audio`: Ambient audio toggle
//! - `interaction`: Scroll-to buttons, keyboard activation, focus outlines
//! - `assets`: Placeholder images for missing assets
//! - `print_card`: Printable card document

pub mod anim;
pub mod assets;
pub mod audio;
pub mod confetti;
pub mod content;
pub mod follower;
pub mod interaction;
pub mod print_card;
pub mod renderer;
pub mod scene;
pub mod scroll;
pub mod settings;

#[cfg(target_arch = "wasm32")]
pub mod dom;

pub use settings::{QualityPreset, Settings};

/// Card configuration constants
pub mod consts {
    /// Number of decorative hearts in the hero scene
    pub const HEART_COUNT: usize = 20;
    /// Hearts closer than this are pushed apart
    pub const MIN_SEPARATION: f32 = 15.0;
    /// Fraction of the overlap each heart moves per frame
    pub const SEPARATION_FACTOR: f32 = 0.02;
    /// Yaw smoothing toward the pointer-biased target
    pub const YAW_SMOOTHING: f32 = 0.02;
    /// Yaw bias per unit of normalized pointer x
    pub const POINTER_YAW_GAIN: f32 = 0.2;

    /// Camera defaults (vertical FOV in degrees)
    pub const CAMERA_FOV_DEG: f32 = 45.0;
    pub const CAMERA_NEAR: f32 = 0.1;
    pub const CAMERA_FAR: f32 = 1000.0;
    pub const CAMERA_Z: f32 = 60.0;
    /// Device pixel ratio cap for the hero canvas
    pub const MAX_PIXEL_RATIO: f64 = 2.0;

    /// Confetti burst size cap
    pub const CONFETTI_MAX: usize = 80;
    /// One confetti particle per this many pixels of viewport width
    pub const CONFETTI_PX_PER_PARTICLE: f32 = 10.0;

    /// Cursor follower smoothing per 60 Hz frame
    pub const FOLLOWER_SPEED: f32 = 0.2;
    /// Pointer idle time before the follower starts breathing (ms)
    pub const IDLE_DELAY_MS: f64 = 300.0;

    /// Time the renderer has to come up before the canvas is hidden (ms)
    pub const RENDER_GRACE_MS: i32 = 1200;

    /// Reference frame duration for delta ratios (seconds)
    pub const REFERENCE_FRAME: f32 = 1.0 / 60.0;
    /// Longest frame gap fed into animations (tab switches, stalls)
    pub const MAX_FRAME_DT: f32 = 0.1;
}

/// Split a packed 0xRRGGBB color into RGB floats (0-1, no gamma)
pub fn hex_to_rgb(hex: u32) -> [f32; 3] {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
    ]
}
