//! The particle collection and its pairwise connections.
//!
//! A [`ParticleField`] is seeded once and then only ever advanced or resized;
//! its particle count never changes. Connections are recomputed from scratch
//! every frame by [`ParticleField::links`], an O(n²) scan over index pairs
//! `i <= j` (or `i < j` when self links are disabled).

use crate::config::FieldConfig;
use crate::particle::Particle;
use crate::prng::RandomSource;
use crate::viewport::Viewport;
use glam::DVec2;

/// A connection to draw between two particles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Link {
    pub from: DVec2,
    pub to: DVec2,
    pub distance: f64,
    /// Stroke alpha, `link_alpha * (1 - distance / link_distance)`.
    pub alpha: f64,
}

/// Stroke alpha for a pair at `distance`, or `None` if they are too far apart.
///
/// The threshold is strict: a pair exactly `link_distance` apart is not linked.
pub fn link_alpha(distance: f64, config: &FieldConfig) -> Option<f64> {
    if distance < config.link_distance {
        Some(config.link_alpha * (1.0 - distance / config.link_distance))
    } else {
        None
    }
}

/// A fixed-size set of particles moving over a surface of known size.
#[derive(Debug, Clone)]
pub struct ParticleField {
    particles: Vec<Particle>,
    viewport: Viewport,
    config: FieldConfig,
}

impl ParticleField {
    /// Spawns `config.count` particles inside `viewport`.
    pub fn new<R: RandomSource + ?Sized>(
        viewport: Viewport,
        config: FieldConfig,
        rng: &mut R,
    ) -> Self {
        let particles = (0..config.count)
            .map(|_| Particle::spawn(&mut *rng, viewport, &config))
            .collect();
        Self {
            particles,
            viewport,
            config,
        }
    }

    /// Builds a field from existing particles, e.g. restored state or test fixtures.
    pub fn from_particles(particles: Vec<Particle>, viewport: Viewport, config: FieldConfig) -> Self {
        Self {
            particles,
            viewport,
            config,
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    /// Replaces the bounds particles wrap against. Positions are not rescaled;
    /// anything outside the new bounds wraps on its next [`advance`](Self::advance).
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Moves every particle one frame and wraps it into the current viewport.
    pub fn advance(&mut self) {
        let viewport = self.viewport;
        for particle in &mut self.particles {
            particle.update(viewport);
        }
    }

    /// Every connection to draw this frame, in pair order.
    pub fn links(&self) -> Links<'_> {
        Links {
            particles: &self.particles,
            config: &self.config,
            i: 0,
            j: self.first_partner(0),
        }
    }

    /// Whether every particle lies inside the current viewport.
    pub fn all_in_bounds(&self) -> bool {
        self.particles
            .iter()
            .all(|p| self.viewport.contains(p.position.x, p.position.y))
    }

    fn first_partner(&self, i: usize) -> usize {
        if self.config.self_links {
            i
        } else {
            i + 1
        }
    }
}

/// Iterator over the links of a field. See [`ParticleField::links`].
pub struct Links<'a> {
    particles: &'a [Particle],
    config: &'a FieldConfig,
    i: usize,
    j: usize,
}

impl Iterator for Links<'_> {
    type Item = Link;

    fn next(&mut self) -> Option<Link> {
        let n = self.particles.len();
        while self.i < n {
            if self.j >= n {
                self.i += 1;
                self.j = if self.config.self_links {
                    self.i
                } else {
                    self.i + 1
                };
                continue;
            }
            let a = self.particles[self.i].position;
            let b = self.particles[self.j].position;
            self.j += 1;
            let distance = a.distance(b);
            if let Some(alpha) = link_alpha(distance, self.config) {
                return Some(Link {
                    from: a,
                    to: b,
                    distance,
                    alpha,
                });
            }
        }
        None
    }
}
