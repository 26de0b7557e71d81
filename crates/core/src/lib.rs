#![deny(unsafe_code)]
//! Core types for the particle field background.
//!
//! Provides the `Particle` and `ParticleField` model, `FieldConfig`, the
//! `Surface` drawing seam with a recording implementation, the
//! `ParticleRenderer` (with its silent disabled state), the cancellable
//! `FrameLoop`, the `Xorshift64` PRNG behind `RandomSource`, and `Seed`.

pub mod color;
pub mod config;
pub mod error;
pub mod field;
pub mod frame_loop;
pub mod params;
pub mod particle;
pub mod prng;
pub mod renderer;
pub mod seed;
pub mod surface;
pub mod viewport;

pub use color::{Rgb8, Rgba, ACCENT};
pub use config::FieldConfig;
pub use error::FieldError;
pub use field::{Link, ParticleField};
pub use frame_loop::{CancelHandle, FrameLoop, FrameStatus};
pub use particle::Particle;
pub use prng::{RandomSource, Xorshift64};
pub use renderer::ParticleRenderer;
pub use seed::Seed;
pub use surface::{DrawCommand, Recorder, Surface};
pub use viewport::Viewport;
