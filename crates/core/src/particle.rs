//! A single drifting point of the field.

use crate::config::FieldConfig;
use crate::prng::RandomSource;
use crate::viewport::Viewport;
use glam::DVec2;
use serde::{Deserialize, Serialize};

/// One moving point: position and velocity in pixels, radius, fill opacity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub position: DVec2,
    /// Pixels per frame.
    pub velocity: DVec2,
    /// Radius in pixels.
    pub size: f64,
    pub opacity: f64,
}

impl Particle {
    /// Draws a particle uniformly inside `viewport` with attributes in the
    /// configured ranges.
    ///
    /// Draw order is fixed (x, y, size, vx, vy, opacity) so a seed always
    /// yields the same field.
    pub fn spawn<R: RandomSource + ?Sized>(
        rng: &mut R,
        viewport: Viewport,
        config: &FieldConfig,
    ) -> Self {
        let x = rng.next_range(0.0, viewport.max_x());
        let y = rng.next_range(0.0, viewport.max_y());
        let size = rng.next_range(config.size_min, config.size_max);
        let vx = rng.next_range(-config.max_speed, config.max_speed);
        let vy = rng.next_range(-config.max_speed, config.max_speed);
        let opacity = rng.next_range(config.opacity_min, config.opacity_max);
        Self {
            position: DVec2::new(x, y),
            velocity: DVec2::new(vx, vy),
            size,
            opacity,
        }
    }

    /// Moves by one frame of velocity, then wraps each axis into `viewport`.
    pub fn update(&mut self, viewport: Viewport) {
        let next = self.position + self.velocity;
        self.position = DVec2::new(
            wrap_axis(next.x, viewport.max_x()),
            wrap_axis(next.y, viewport.max_y()),
        );
    }
}

/// Wraps one coordinate into [0, bound).
///
/// At or past the far edge snaps to 0. Below 0 reappears at the far edge,
/// offset by how far it went under.
pub fn wrap_axis(pos: f64, bound: f64) -> f64 {
    if pos >= bound {
        0.0
    } else if pos < 0.0 {
        // rem_euclid can round up to `bound` for tiny negative inputs.
        let wrapped = pos.rem_euclid(bound);
        if wrapped < bound {
            wrapped
        } else {
            0.0
        }
    } else {
        pos
    }
}
