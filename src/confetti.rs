//! Click confetti bursts
//!
//! Each click spawns a burst of torn-paper bits that fall to the bottom of
//! the viewport while spinning and fading. Particles follow an explicit
//! spawn -> animate -> dispose lifecycle: `advance` reports every particle
//! whose animation finished so its element can be removed.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::anim::Ease;
use crate::consts::{CONFETTI_MAX, CONFETTI_PX_PER_PARTICLE};

/// Paper colors
pub const CONFETTI_COLORS: [&str; 5] = ["#f7d4d6", "#f2e2d9", "#e9d9c9", "#d6c3a0", "#b28a41"];

/// Shortest and longest fall (seconds)
pub const MIN_DURATION: f32 = 2.5;
pub const MAX_DURATION: f32 = 4.5;

/// Particles in a burst for a viewport `width` pixels wide
pub fn particle_count(viewport_width: f32) -> usize {
    let by_width = (viewport_width / CONFETTI_PX_PER_PARTICLE).floor().max(0.0) as usize;
    by_width.min(CONFETTI_MAX)
}

/// Burst origin; a zero coordinate (keyboard-triggered click) falls back to the viewport centre
pub fn burst_origin(click: Vec2, viewport: Vec2) -> Vec2 {
    Vec2::new(
        if click.x != 0.0 { click.x } else { viewport.x / 2.0 },
        if click.y != 0.0 { click.y } else { viewport.y / 2.0 },
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfettiShape {
    Circle,
    Strip,
}

/// Animated values for one frame, relative to the spawn point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleFrame {
    pub x: f32,
    pub y: f32,
    pub rotation_z: f32,
    pub rotation_x: f32,
    pub opacity: f32,
}

#[derive(Debug, Clone)]
pub struct ConfettiParticle {
    pub id: u64,
    pub origin: Vec2,
    pub width: f32,
    pub height: f32,
    pub shape: ConfettiShape,
    pub color: &'static str,
    /// Initial tilt (degrees)
    pub start_rotation: f32,
    /// Final offset from the origin (pixels)
    pub end: Vec2,
    /// Total spin over the fall (degrees)
    pub spin_z: f32,
    pub spin_x: f32,
    /// Seconds
    pub duration: f32,
    elapsed: f32,
}

impl ConfettiParticle {
    fn random(rng: &mut impl Rng, id: u64, origin: Vec2, viewport_height: f32) -> Self {
        let is_circle = rng.random::<f32>() > 0.7;
        let size = rng.random::<f32>() * 8.0 + 5.0;
        let color = CONFETTI_COLORS[rng.random_range(0..CONFETTI_COLORS.len())];

        Self {
            id,
            origin,
            width: size,
            height: if is_circle { size } else { size * 1.4 },
            shape: if is_circle {
                ConfettiShape::Circle
            } else {
                ConfettiShape::Strip
            },
            color,
            start_rotation: rng.random::<f32>() * 360.0,
            end: Vec2::new(
                (rng.random::<f32>() - 0.5) * 400.0,
                viewport_height - origin.y + 50.0,
            ),
            spin_z: rng.random::<f32>() * 720.0 - 360.0,
            spin_x: rng.random::<f32>() * 720.0 - 360.0,
            duration: MIN_DURATION + rng.random::<f32>() * (MAX_DURATION - MIN_DURATION),
            elapsed: 0.0,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    pub fn frame(&self) -> ParticleFrame {
        let t = Ease::Power1Out.apply(self.elapsed / self.duration);
        ParticleFrame {
            x: self.end.x * t,
            y: self.end.y * t,
            rotation_z: self.spin_z * t,
            rotation_x: self.spin_x * t,
            opacity: 1.0 - t,
        }
    }

    /// Static inline style set once when the element is created
    pub fn base_style(&self) -> String {
        let radius = match self.shape {
            ConfettiShape::Circle => "50%",
            ConfettiShape::Strip => "2px",
        };
        format!(
            "position:fixed;left:{:.1}px;top:{:.1}px;width:{:.2}px;height:{:.2}px;\
             background:{};border-radius:{};z-index:140;pointer-events:none;\
             box-shadow:0 2px 8px rgba(0,0,0,0.12);",
            self.origin.x, self.origin.y, self.width, self.height, self.color, radius
        )
    }

    /// Full inline style for the current frame
    pub fn style(&self) -> String {
        let f = self.frame();
        format!(
            "{}transform:translate({:.1}px, {:.1}px) rotate({:.1}deg) rotateZ({:.1}deg) rotateX({:.1}deg);opacity:{:.3};",
            self.base_style(),
            f.x,
            f.y,
            self.start_rotation,
            f.rotation_z,
            f.rotation_x,
            f.opacity
        )
    }
}

/// Every live confetti particle on the page
#[derive(Debug)]
pub struct ConfettiSystem {
    rng: Pcg32,
    next_id: u64,
    live: Vec<ConfettiParticle>,
}

impl ConfettiSystem {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
            live: Vec::new(),
        }
    }

    /// Spawn a burst at `click` and return the new particles
    pub fn spawn_burst(&mut self, click: Vec2, viewport: Vec2) -> &[ConfettiParticle] {
        let origin = burst_origin(click, viewport);
        let count = particle_count(viewport.x);
        let start = self.live.len();

        for _ in 0..count {
            let id = self.next_id;
            self.next_id += 1;
            let particle = ConfettiParticle::random(&mut self.rng, id, origin, viewport.y);
            self.live.push(particle);
        }

        log::debug!("Confetti burst: {} particles ({} live)", count, self.live.len());
        &self.live[start..]
    }

    /// Animate by `dt` seconds and return the ids of particles that finished
    pub fn advance(&mut self, dt: f32) -> Vec<u64> {
        let mut disposed = Vec::new();
        for particle in &mut self.live {
            particle.elapsed += dt.max(0.0);
            if particle.is_finished() {
                disposed.push(particle.id);
            }
        }
        self.live.retain(|p| !p.is_finished());
        disposed
    }

    pub fn live(&self) -> &[ConfettiParticle] {
        &self.live
    }

    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }
}

/// Confetti particles bound to DOM elements (WASM only)
#[cfg(target_arch = "wasm32")]
pub struct ConfettiLayer {
    system: ConfettiSystem,
    elements: std::collections::HashMap<u64, web_sys::Element>,
}

#[cfg(target_arch = "wasm32")]
impl ConfettiLayer {
    pub fn new(seed: u64) -> Self {
        Self {
            system: ConfettiSystem::new(seed),
            elements: std::collections::HashMap::new(),
        }
    }

    /// Spawn a burst and append one element per particle to `<body>`
    pub fn burst(&mut self, document: &web_sys::Document, click: Vec2, viewport: Vec2) {
        let Some(body) = document.body() else {
            return;
        };
        for particle in self.system.spawn_burst(click, viewport) {
            let Ok(el) = document.create_element("div") else {
                continue;
            };
            let _ = el.set_attribute("aria-hidden", "true");
            let _ = el.set_attribute("style", &particle.style());
            let _ = body.append_child(&el);
            self.elements.insert(particle.id, el);
        }
    }

    /// Animate every particle and remove finished elements
    pub fn update(&mut self, dt: f32) {
        if self.system.is_empty() {
            return;
        }
        for id in self.system.advance(dt) {
            if let Some(el) = self.elements.remove(&id) {
                el.remove();
            }
        }
        for particle in self.system.live() {
            if let Some(el) = self.elements.get(&particle.id) {
                let _ = el.set_attribute("style", &particle.style());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_particle_count() {
        assert_eq!(particle_count(1280.0), 80);
        assert_eq!(particle_count(375.0), 37);
        assert_eq!(particle_count(809.0), 80);
        assert_eq!(particle_count(799.0), 79);
        assert_eq!(particle_count(5.0), 0);
        assert_eq!(particle_count(0.0), 0);
    }

    #[test]
    fn test_burst_at_click_point() {
        let mut system = ConfettiSystem::new(1);
        let burst = system.spawn_burst(Vec2::new(400.0, 300.0), Vec2::new(1280.0, 800.0));
        assert_eq!(burst.len(), 80);
        for p in burst {
            assert_eq!(p.origin, Vec2::new(400.0, 300.0));
            assert!(CONFETTI_COLORS.contains(&p.color));
            assert!(p.base_style().contains(&format!("background:{};", p.color)));
            assert!((MIN_DURATION..=MAX_DURATION).contains(&p.duration));
            // Falls to 50px past the bottom edge
            assert!((p.end.y - 550.0).abs() < 1e-4);
            assert!(p.end.x.abs() <= 200.0);
        }
    }

    #[test]
    fn test_keyboard_click_uses_centre() {
        let origin = burst_origin(Vec2::ZERO, Vec2::new(1000.0, 600.0));
        assert_eq!(origin, Vec2::new(500.0, 300.0));
        let origin = burst_origin(Vec2::new(20.0, 0.0), Vec2::new(1000.0, 600.0));
        assert_eq!(origin, Vec2::new(20.0, 300.0));
    }

    #[test]
    fn test_all_disposed_within_five_seconds() {
        let mut system = ConfettiSystem::new(7);
        let ids: Vec<u64> = system
            .spawn_burst(Vec2::new(400.0, 300.0), Vec2::new(1280.0, 800.0))
            .iter()
            .map(|p| p.id)
            .collect();

        let mut disposed = Vec::new();
        for _ in 0..300 {
            disposed.extend(system.advance(1.0 / 60.0));
        }
        assert!(system.is_empty());
        disposed.sort_unstable();
        assert_eq!(disposed, ids);
    }

    #[test]
    fn test_nothing_disposed_early() {
        let mut system = ConfettiSystem::new(3);
        system.spawn_burst(Vec2::new(10.0, 10.0), Vec2::new(640.0, 480.0));
        assert!(system.advance(2.4).is_empty());
        assert_eq!(system.len(), 64);
    }

    #[test]
    fn test_overlapping_bursts_tracked_separately() {
        let mut system = ConfettiSystem::new(5);
        system.spawn_burst(Vec2::new(10.0, 10.0), Vec2::new(300.0, 300.0));
        system.advance(2.0);
        system.spawn_burst(Vec2::new(20.0, 20.0), Vec2::new(300.0, 300.0));
        assert_eq!(system.len(), 60);

        // First burst is gone by 4.5 s, second still falling
        system.advance(2.6);
        assert!(!system.is_empty());
        assert!(system.live().iter().all(|p| p.origin == Vec2::new(20.0, 20.0)));
        system.advance(2.0);
        assert!(system.is_empty());
    }

    #[test]
    fn test_frame_fades_out() {
        let mut system = ConfettiSystem::new(9);
        system.spawn_burst(Vec2::new(100.0, 100.0), Vec2::new(200.0, 400.0));
        let start = system.live()[0].frame();
        assert_eq!(start.opacity, 1.0);
        assert_eq!((start.x, start.y), (0.0, 0.0));

        system.advance(1.0);
        let later = system.live()[0].frame();
        assert!(later.opacity < 1.0);
        assert!(later.y > 0.0);
    }

    proptest! {
        #[test]
        fn prop_burst_size_matches_width(width in 0.0f32..4000.0, seed in any::<u64>()) {
            let mut system = ConfettiSystem::new(seed);
            let n = system.spawn_burst(Vec2::new(1.0, 1.0), Vec2::new(width, 900.0)).len();
            prop_assert_eq!(n, ((width / 10.0).floor() as usize).min(80));
        }
    }
}
