//! Per-frame scene update
//!
//! Order within a frame is fixed: for each heart in index order, spin it,
//! drift its yaw toward the pointer, then push it apart from every later
//! heart. Rendering happens after the whole pass.

use glam::{Vec2, Vec3};

use super::state::SceneState;
use crate::consts::*;

/// Input for one scene frame
#[derive(Debug, Clone, Copy, Default)]
pub struct SceneInput {
    /// Normalized pointer position, each axis in [-0.5, 0.5]
    pub pointer: Vec2,
    /// Frame step relative to 60 Hz (0 = frozen clock)
    pub step: f32,
}

/// Advance the scene by one frame
pub fn tick(state: &mut SceneState, input: &SceneInput) {
    if input.step <= 0.0 {
        return;
    }
    let step = input.step;
    let yaw_bias = input.pointer.x * POINTER_YAW_GAIN;
    let smoothing = (YAW_SMOOTHING * step).min(1.0);
    let strength = SEPARATION_FACTOR * step;

    for i in 0..state.shapes.len() {
        let (head, tail) = state.shapes.split_at_mut(i + 1);
        let shape = &mut head[i];

        shape.rotation.x += shape.rotation_speed.x * step;
        shape.rotation.y += shape.rotation_speed.y * step;

        // Exponential smoothing toward the pointer-biased yaw
        let yaw = shape.rotation.y;
        shape.rotation.y = yaw + (yaw + yaw_bias - yaw) * smoothing;

        // O(n²) is fine at ~20 hearts; larger counts need spatial partitioning
        for other in tail.iter_mut() {
            separate(&mut shape.position, &mut other.position, strength);
        }
    }

    state.frame += 1;
}

/// Push two positions apart if they are closer than `MIN_SEPARATION`.
///
/// Each moves `(MIN_SEPARATION - distance) * strength` along the connecting
/// axis. Coincident positions have no axis and are left alone.
/// Returns true if anything moved.
pub fn separate(a: &mut Vec3, b: &mut Vec3, strength: f32) -> bool {
    let offset = *a - *b;
    let distance = offset.length();
    if distance >= MIN_SEPARATION || distance == 0.0 {
        return false;
    }

    let push = offset / distance * ((MIN_SEPARATION - distance) * strength);
    *a += push;
    *b -= push;
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::state::DecorativeShape;
    use proptest::prelude::*;

    fn pair(a: Vec3, b: Vec3) -> SceneState {
        SceneState::from_shapes(vec![
            DecorativeShape::new(a, 0.4, 0xb28a41),
            DecorativeShape::new(b, 0.4, 0xfff1dd),
        ])
    }

    #[test]
    fn test_separation_pushes_along_axis() {
        let mut a = Vec3::new(0.0, 0.0, 0.0);
        let mut b = Vec3::new(10.0, 0.0, 0.0);
        assert!(separate(&mut a, &mut b, SEPARATION_FACTOR));
        // (15 - 10) * 0.02 = 0.1 each
        assert!((a.x + 0.1).abs() < 1e-6);
        assert!((b.x - 10.1).abs() < 1e-6);
        assert_eq!(a.y, 0.0);
        assert_eq!(b.z, 0.0);
    }

    #[test]
    fn test_far_shapes_untouched() {
        let mut a = Vec3::new(0.0, 0.0, 0.0);
        let mut b = Vec3::new(0.0, 20.0, 0.0);
        assert!(!separate(&mut a, &mut b, SEPARATION_FACTOR));
        assert_eq!(b, Vec3::new(0.0, 20.0, 0.0));
    }

    #[test]
    fn test_exactly_at_minimum_untouched() {
        let mut a = Vec3::ZERO;
        let mut b = Vec3::new(0.0, 0.0, MIN_SEPARATION);
        assert!(!separate(&mut a, &mut b, SEPARATION_FACTOR));
    }

    #[test]
    fn test_coincident_shapes_untouched() {
        let mut a = Vec3::new(3.0, 4.0, 5.0);
        let mut b = a;
        assert!(!separate(&mut a, &mut b, SEPARATION_FACTOR));
        assert_eq!(a, b);
    }

    #[test]
    fn test_tick_spins_shapes() {
        let mut scene = pair(Vec3::ZERO, Vec3::new(40.0, 0.0, 0.0));
        scene.shapes[0].rotation_speed = Vec2::new(0.002, -0.001);
        tick(&mut scene, &SceneInput { pointer: Vec2::ZERO, step: 1.0 });
        assert!((scene.shapes[0].rotation.x - 0.002).abs() < 1e-7);
        assert!((scene.shapes[0].rotation.y + 0.001).abs() < 1e-7);
        assert_eq!(scene.frame, 1);
    }

    #[test]
    fn test_pointer_biases_yaw() {
        let mut scene = pair(Vec3::ZERO, Vec3::new(40.0, 0.0, 0.0));
        let input = SceneInput {
            pointer: Vec2::new(0.5, 0.0),
            step: 1.0,
        };
        tick(&mut scene, &input);
        // 0.5 * 0.2 * 0.02
        assert!((scene.shapes[0].rotation.y - 0.002).abs() < 1e-6);

        let mut left = pair(Vec3::ZERO, Vec3::new(40.0, 0.0, 0.0));
        let input = SceneInput {
            pointer: Vec2::new(-0.5, 0.0),
            step: 1.0,
        };
        tick(&mut left, &input);
        assert!(left.shapes[0].rotation.y < 0.0);
    }

    #[test]
    fn test_frozen_step_changes_nothing() {
        let mut scene = SceneState::new(99);
        let before = scene.shapes.clone();
        let input = SceneInput {
            pointer: Vec2::new(0.3, -0.2),
            step: 0.0,
        };
        for _ in 0..100 {
            tick(&mut scene, &input);
        }
        assert_eq!(scene.shapes, before);
        assert_eq!(scene.frame, 0);
    }

    #[test]
    fn test_count_is_stable_across_frames() {
        let mut scene = SceneState::new(5);
        let input = SceneInput {
            pointer: Vec2::ZERO,
            step: 1.0,
        };
        for _ in 0..500 {
            tick(&mut scene, &input);
        }
        assert_eq!(scene.shapes.len(), HEART_COUNT);
    }

    #[test]
    fn test_clumped_scene_spreads_out() {
        let shapes = (0..6)
            .map(|i| DecorativeShape::new(Vec3::new(i as f32, 0.5 * i as f32, 0.0), 0.3, 0xeadfcf))
            .collect();
        let mut scene = SceneState::from_shapes(shapes);
        let input = SceneInput {
            pointer: Vec2::ZERO,
            step: 1.0,
        };
        let min_dist = |s: &SceneState| {
            let mut best = f32::MAX;
            for i in 0..s.shapes.len() {
                for j in i + 1..s.shapes.len() {
                    best = best.min(s.shapes[i].position.distance(s.shapes[j].position));
                }
            }
            best
        };
        let before = min_dist(&scene);
        for _ in 0..2000 {
            tick(&mut scene, &input);
        }
        assert!(min_dist(&scene) > before);
    }

    proptest! {
        #[test]
        fn prop_separation_increases_distance(
            ax in -100.0f32..100.0, ay in -100.0f32..100.0, az in -100.0f32..100.0,
            dx in -1.0f32..1.0, dy in -1.0f32..1.0, dz in -1.0f32..1.0,
            dist in 0.01f32..14.9,
        ) {
            let dir = Vec3::new(dx, dy, dz);
            prop_assume!(dir.length() > 0.1);
            let mut a = Vec3::new(ax, ay, az);
            let mut b = a + dir.normalize() * dist;
            let before = a.distance(b);
            prop_assume!(before > 0.0 && before < MIN_SEPARATION);

            prop_assert!(separate(&mut a, &mut b, SEPARATION_FACTOR));
            prop_assert!(a.distance(b) > before);
        }
    }
}
