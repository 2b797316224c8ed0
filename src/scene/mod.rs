//! Hero scene model
//!
//! The floating foil hearts live here, independent of rendering:
//! - Seeded construction (reproducible layouts)
//! - Per-frame update (spin, pointer drift, separation)
//! - Camera that follows the canvas container size

pub mod camera;
pub mod state;
pub mod tick;

pub use camera::Camera;
pub use state::{DecorativeShape, SceneState, THEME_COLORS, normalize_pointer};
pub use tick::{SceneInput, separate, tick};
