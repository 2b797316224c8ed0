//! Perspective camera for the hero scene

use glam::{Mat4, Vec3};

use crate::consts::*;

#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Vertical field of view (degrees)
    pub fov_y_deg: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vec3,
}

impl Camera {
    /// Camera looking down -Z from `CAMERA_Z`, sized to a `width` x `height` container
    pub fn new(width: f32, height: f32) -> Self {
        let mut camera = Self {
            fov_y_deg: CAMERA_FOV_DEG,
            aspect: 1.0,
            near: CAMERA_NEAR,
            far: CAMERA_FAR,
            position: Vec3::new(0.0, 0.0, CAMERA_Z),
        };
        camera.resize(width, height);
        camera
    }

    /// Match the aspect ratio to the container. Zero-sized containers are ignored.
    pub fn resize(&mut self, width: f32, height: f32) -> bool {
        if width <= 0.0 || height <= 0.0 {
            return false;
        }
        self.aspect = width / height;
        true
    }

    /// tan(fov/2), used by the shader to build view rays
    pub fn tan_half_fov(&self) -> f32 {
        (self.fov_y_deg.to_radians() * 0.5).tan()
    }

    pub fn view_projection(&self) -> Mat4 {
        let proj = Mat4::perspective_rh(
            self.fov_y_deg.to_radians(),
            self.aspect,
            self.near,
            self.far,
        );
        let view = Mat4::look_at_rh(self.position, self.position - Vec3::Z, Vec3::Y);
        proj * view
    }

    /// Project a world point to normalized device coordinates (None if behind the camera)
    pub fn project(&self, world: Vec3) -> Option<Vec3> {
        let clip = self.view_projection() * world.extend(1.0);
        if clip.w <= 0.0 {
            return None;
        }
        Some(clip.truncate() / clip.w)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resize_updates_aspect() {
        let mut camera = Camera::new(800.0, 400.0);
        assert!((camera.aspect - 2.0).abs() < 1e-6);
        assert!(camera.resize(300.0, 600.0));
        assert!((camera.aspect - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_zero_size_ignored() {
        let mut camera = Camera::new(800.0, 400.0);
        assert!(!camera.resize(800.0, 0.0));
        assert!((camera.aspect - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_origin_projects_to_center() {
        let camera = Camera::new(1280.0, 720.0);
        let ndc = camera.project(Vec3::ZERO).expect("in front of camera");
        assert!(ndc.x.abs() < 1e-5);
        assert!(ndc.y.abs() < 1e-5);
    }

    #[test]
    fn test_behind_camera_not_projected() {
        let camera = Camera::new(1280.0, 720.0);
        assert!(camera.project(Vec3::new(0.0, 0.0, 100.0)).is_none());
    }

    #[test]
    fn test_right_of_origin_projects_right() {
        let camera = Camera::new(1000.0, 1000.0);
        let ndc = camera.project(Vec3::new(10.0, 0.0, 0.0)).expect("visible");
        // x / (z_dist * tan(22.5°))
        let expected = 10.0 / (60.0 * camera.tan_half_fov());
        assert!((ndc.x - expected).abs() < 1e-4);
    }
}
