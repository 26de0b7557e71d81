#![deny(unsafe_code)]
//! Headless rendering for the particle field: a software [`Surface`] and PNG
//! snapshots.
//!
//! This crate sits between `particle-field-core` (which defines the
//! [`Surface`] seam and the renderer) and the CLI, so that rendering a
//! [`Seed`] to pixels lives in one place.

pub mod pixel;

#[cfg(feature = "png")]
pub mod snapshot;

use particle_field_core::color::Rgb8;
use particle_field_core::error::FieldError;
use particle_field_core::frame_loop::FrameLoop;
use particle_field_core::prng::Xorshift64;
use particle_field_core::renderer::ParticleRenderer;
use particle_field_core::seed::Seed;
use particle_field_core::surface::Surface;

pub use pixel::RasterSurface;

/// Draws `seed.frames` frames of the seeded field and returns the renderer,
/// whose surface holds the last frame.
///
/// With `frames == 0` the surface is only cleared.
pub fn render_seed<S: Surface>(seed: &Seed, mut surface: S) -> Result<ParticleRenderer<S>, FieldError> {
    let viewport = seed.viewport()?;
    let config = seed.config()?;
    surface.set_viewport(viewport);
    surface.clear();
    let mut renderer = ParticleRenderer::new(Some(surface), config);
    renderer.initialize(&mut Xorshift64::new(seed.seed));
    let drawn = FrameLoop::new().run(&mut renderer, seed.frames);
    log::debug!("rendered {drawn} frames for seed {}", seed.seed);
    Ok(renderer)
}

/// [`render_seed`] onto a fresh [`RasterSurface`].
pub fn rasterize(seed: &Seed, background: Option<Rgb8>) -> Result<RasterSurface, FieldError> {
    let viewport = seed.viewport()?;
    let surface = match background {
        Some(bg) => RasterSurface::with_background(viewport, bg),
        None => RasterSurface::new(viewport),
    };
    render_seed(seed, surface)?
        .dispose()
        .ok_or_else(|| FieldError::Io("renderer lost its surface".into()))
}
