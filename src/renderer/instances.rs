//! CPU-side heart instance data (must match `foil_shader.wgsl`)

use bytemuck::{Pod, Zeroable};
use glam::{EulerRot, Mat3, Vec3};

use crate::hex_to_rgb;
use crate::scene::{Camera, DecorativeShape, SceneState};

/// Maximum number of hearts the storage buffer holds
pub const MAX_HEARTS: usize = 64;

/// Heart half-size in world units at scale 1.0
pub const HEART_SIZE: f32 = 45.0;
/// Extrusion half-depth at scale 1.0 (depth 6 plus bevel thickness 2 per side)
pub const HEART_HALF_DEPTH: f32 = 5.0;
/// Bevel radius at scale 1.0
pub const HEART_BEVEL: f32 = 2.0;

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct HeartData {
    /// World-to-local rotation rows (w unused)
    pub inv_rot: [[f32; 4]; 3],
    /// xyz = position, w = scale
    pub pos_scale: [f32; 4],
    /// rgb = foil tint, w = bounding radius
    pub color_radius: [f32; 4],
}

impl HeartData {
    pub fn from_shape(shape: &DecorativeShape) -> Self {
        let rot = Mat3::from_euler(
            EulerRot::XYZ,
            shape.rotation.x,
            shape.rotation.y,
            shape.rotation.z,
        );
        // Rows of the inverse rotation are the columns of the rotation
        let inv = rot.transpose();
        let row = |v: Vec3| [v.x, v.y, v.z, 0.0];
        let [r, g, b] = hex_to_rgb(shape.color);

        Self {
            inv_rot: [row(inv.row(0)), row(inv.row(1)), row(inv.row(2))],
            pos_scale: [
                shape.position.x,
                shape.position.y,
                shape.position.z,
                shape.scale,
            ],
            color_radius: [r, g, b, bounding_radius(shape.scale)],
        }
    }
}

/// Radius of a sphere enclosing a heart at `scale`
pub fn bounding_radius(scale: f32) -> f32 {
    let half_extent = HEART_SIZE * 0.75;
    (half_extent * half_extent + HEART_HALF_DEPTH * HEART_HALF_DEPTH).sqrt() * scale
        + HEART_BEVEL * scale
}

/// Instance data for every heart the camera can see (at most `MAX_HEARTS`)
pub fn heart_instances(scene: &SceneState, camera: &Camera) -> Vec<HeartData> {
    scene
        .shapes
        .iter()
        .filter(|shape| is_visible(shape, camera))
        .take(MAX_HEARTS)
        .map(HeartData::from_shape)
        .collect()
}

fn is_visible(shape: &DecorativeShape, camera: &Camera) -> bool {
    let Some(ndc) = camera.project(shape.position) else {
        return false;
    };
    // Generous margin so hearts sliding in at the edges are not popped
    let depth = (camera.position.z - shape.position.z).max(camera.near);
    let margin = bounding_radius(shape.scale) / (depth * camera.tan_half_fov());
    ndc.x.abs() <= 1.0 + margin * 2.0 && ndc.y.abs() <= 1.0 + margin * 2.0
}
