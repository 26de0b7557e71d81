//! Owns a surface and the field painted onto it.
//!
//! A [`ParticleRenderer`] built without a surface is the supported "feature
//! disabled" state: every operation on it silently does nothing.

use crate::config::FieldConfig;
use crate::error::FieldError;
use crate::field::ParticleField;
use crate::prng::RandomSource;
use crate::surface::Surface;
use crate::viewport::Viewport;

/// Paints one frame and advances the field.
///
/// Order: clear, connection lines, particle movement, particle circles. The
/// circles are drawn at their post-move positions on top of the lines.
pub fn draw_frame<S: Surface + ?Sized>(field: &mut ParticleField, surface: &mut S) {
    surface.clear();
    let color = field.config().color;
    let line_width = field.config().line_width;
    for link in field.links() {
        surface.stroke_line(link.from, link.to, line_width, color.with_alpha(link.alpha));
    }
    field.advance();
    for particle in field.particles() {
        surface.fill_circle(
            particle.position,
            particle.size,
            color.with_alpha(particle.opacity),
        );
    }
}

/// The particle background: an optional surface plus the field, created on
/// [`initialize`](Self::initialize).
#[derive(Debug)]
pub struct ParticleRenderer<S> {
    surface: Option<S>,
    field: Option<ParticleField>,
    config: FieldConfig,
}

impl<S: Surface> ParticleRenderer<S> {
    /// `None` for `surface` yields a renderer that stays inactive forever.
    pub fn new(surface: Option<S>, config: FieldConfig) -> Self {
        Self {
            surface,
            field: None,
            config,
        }
    }

    /// Whether frames will actually be drawn.
    pub fn is_active(&self) -> bool {
        self.surface.is_some() && self.field.is_some()
    }

    /// Seeds the field from the surface's current size.
    ///
    /// Returns `false` without doing anything when there is no surface.
    /// Calling it again after a successful initialization keeps the existing
    /// particles.
    pub fn initialize<R: RandomSource + ?Sized>(&mut self, rng: &mut R) -> bool {
        let Some(surface) = &self.surface else {
            return false;
        };
        if self.field.is_none() {
            let viewport = surface.viewport();
            let field = ParticleField::new(viewport, self.config.clone(), rng);
            log::info!(
                "particle field initialized: {} particles on {}x{}",
                field.len(),
                viewport.width(),
                viewport.height()
            );
            self.field = Some(field);
        }
        true
    }

    /// Draws one frame. Returns `false` if the renderer is inactive.
    ///
    /// The field's bounds are first synced from the surface, so a host that
    /// resized the surface directly is picked up here.
    pub fn frame(&mut self) -> bool {
        let (Some(surface), Some(field)) = (self.surface.as_mut(), self.field.as_mut()) else {
            return false;
        };
        let viewport = surface.viewport();
        if viewport != field.viewport() {
            field.resize(viewport);
        }
        draw_frame(field, surface);
        true
    }

    /// Resizes the surface and the field bounds. Particle positions are kept.
    ///
    /// A no-op if the size is unchanged or the renderer has no surface.
    pub fn resize(&mut self, viewport: Viewport) {
        let Some(surface) = self.surface.as_mut() else {
            return;
        };
        if surface.viewport() != viewport {
            log::debug!("surface resized to {}x{}", viewport.width(), viewport.height());
            surface.set_viewport(viewport);
        }
        if let Some(field) = self.field.as_mut() {
            field.resize(viewport);
        }
    }

    /// [`resize`](Self::resize) from raw dimensions.
    ///
    /// Returns `FieldError::InvalidDimensions` for a zero dimension and leaves
    /// everything unchanged.
    pub fn resize_to(&mut self, width: u32, height: u32) -> Result<(), FieldError> {
        self.resize(Viewport::new(width, height)?);
        Ok(())
    }

    /// Drops the field and hands the surface back. The renderer is inactive afterwards.
    pub fn dispose(&mut self) -> Option<S> {
        self.field = None;
        self.surface.take()
    }

    pub fn field(&self) -> Option<&ParticleField> {
        self.field.as_ref()
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }
}
