//! Decorative shapes and the scene that owns them

use glam::{Vec2, Vec3};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::HEART_COUNT;

/// Foil tints cycled across the hearts
pub const THEME_COLORS: [u32; 5] = [0xfff1dd, 0xf7d4d6, 0xd6c3a0, 0xb28a41, 0xeadfcf];

/// Spawn volume half-extents (world units)
const SPAWN_HALF_EXTENTS: Vec3 = Vec3::new(50.0, 40.0, 20.0);

/// One floating heart
#[derive(Debug, Clone, PartialEq)]
pub struct DecorativeShape {
    pub position: Vec3,
    /// Euler angles (radians, XYZ order)
    pub rotation: Vec3,
    /// Per-frame spin on x and y (radians per 60 Hz frame)
    pub rotation_speed: Vec2,
    pub scale: f32,
    /// Packed 0xRRGGBB foil tint
    pub color: u32,
}

impl DecorativeShape {
    pub fn new(position: Vec3, scale: f32, color: u32) -> Self {
        Self {
            position,
            rotation: Vec3::ZERO,
            rotation_speed: Vec2::ZERO,
            scale,
            color,
        }
    }

    /// Spawn a heart with randomized placement, size and spin
    pub fn random(rng: &mut impl Rng, color: u32) -> Self {
        use std::f32::consts::PI;

        let position = Vec3::new(
            (rng.random::<f32>() - 0.5) * 2.0 * SPAWN_HALF_EXTENTS.x,
            (rng.random::<f32>() - 0.5) * 2.0 * SPAWN_HALF_EXTENTS.y,
            (rng.random::<f32>() - 0.5) * 2.0 * SPAWN_HALF_EXTENTS.z,
        );
        let scale = rng.random::<f32>() * 0.4 + 0.2;
        let rotation = Vec3::new(
            rng.random::<f32>() * PI,
            rng.random::<f32>() * PI,
            rng.random::<f32>() * PI,
        );
        let rotation_speed = Vec2::new(
            (rng.random::<f32>() - 0.5) * 0.005,
            (rng.random::<f32>() - 0.5) * 0.005,
        );

        Self {
            position,
            rotation,
            rotation_speed,
            scale,
            color,
        }
    }
}

/// The hero scene: a fixed set of hearts
#[derive(Debug, Clone)]
pub struct SceneState {
    pub seed: u64,
    /// Hearts (fixed count for the page's lifetime, index is identity)
    pub shapes: Vec<DecorativeShape>,
    /// Frames simulated so far
    pub frame: u64,
}

impl SceneState {
    /// Create the default scene with `HEART_COUNT` hearts
    pub fn new(seed: u64) -> Self {
        Self::with_count(seed, HEART_COUNT)
    }

    pub fn with_count(seed: u64, count: usize) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let shapes = (0..count)
            .map(|i| DecorativeShape::random(&mut rng, THEME_COLORS[i % THEME_COLORS.len()]))
            .collect();

        Self {
            seed,
            shapes,
            frame: 0,
        }
    }

    /// Build a scene from explicit shapes (tests, fixed layouts)
    pub fn from_shapes(shapes: Vec<DecorativeShape>) -> Self {
        Self {
            seed: 0,
            shapes,
            frame: 0,
        }
    }
}

/// Map a viewport pixel position to [-0.5, 0.5] on each axis
pub fn normalize_pointer(client_x: f32, client_y: f32, viewport_w: f32, viewport_h: f32) -> Vec2 {
    if viewport_w <= 0.0 || viewport_h <= 0.0 {
        return Vec2::ZERO;
    }
    Vec2::new(client_x / viewport_w - 0.5, client_y / viewport_h - 0.5)
}
