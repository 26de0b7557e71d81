//! PNG encoding of a [`RasterSurface`].
//!
//! This module is feature-gated behind `png` (default on) so that builds which
//! only need the rasterizer do not pull in the `image` crate.

use particle_field_core::error::FieldError;
use particle_field_core::surface::Surface;
use std::path::Path;

use crate::pixel::RasterSurface;

/// Writes the surface's current contents as a PNG image.
///
/// Returns `FieldError::Io` on encode or write failure.
pub fn write_png(surface: &RasterSurface, path: &Path) -> Result<(), FieldError> {
    let viewport = surface.viewport();
    let img = image::RgbaImage::from_raw(
        viewport.width(),
        viewport.height(),
        surface.pixels().to_vec(),
    )
    .ok_or_else(|| FieldError::Io("RGBA buffer size mismatch".into()))?;
    img.save(path).map_err(|e| FieldError::Io(e.to_string()))?;
    log::info!("wrote {}x{} snapshot to {}", viewport.width(), viewport.height(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec2;
    use particle_field_core::color::ACCENT;
    use particle_field_core::viewport::Viewport;

    #[test]
    fn write_png_round_trip() {
        let mut surface = RasterSurface::new(Viewport::new(16, 12).unwrap());
        surface.fill_circle(DVec2::new(8.0, 6.0), 3.0, ACCENT.with_alpha(1.0));
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("field.png");

        write_png(&surface, &path).unwrap();

        let img = image::open(&path).unwrap().to_rgba8();
        assert_eq!(img.width(), 16);
        assert_eq!(img.height(), 12);
        assert_eq!(img.get_pixel(8, 6).0, [255, 107, 0, 255]);
    }

    #[test]
    fn write_png_to_missing_directory_is_io_error() {
        let surface = RasterSurface::new(Viewport::new(4, 4).unwrap());
        let err = write_png(&surface, Path::new("/nonexistent/dir/out.png")).unwrap_err();
        assert!(matches!(err, FieldError::Io(_)));
    }
}
