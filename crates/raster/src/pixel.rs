//! Software [`Surface`] backed by an RGBA8 pixel buffer.
//!
//! Blending is straight-alpha source-over, the same compositing a 2D canvas
//! applies by default. Every primitive collects its covered pixels first and
//! blends each one exactly once, so a thick line never darkens where its
//! stamps overlap.

use glam::DVec2;
use particle_field_core::color::{Rgb8, Rgba};
use particle_field_core::config::MAX_LINE_WIDTH;
use particle_field_core::surface::Surface;
use particle_field_core::viewport::Viewport;

/// An RGBA8 raster, row-major, 4 bytes per pixel, straight (non-premultiplied) alpha.
#[derive(Debug, Clone)]
pub struct RasterSurface {
    viewport: Viewport,
    background: Option<Rgb8>,
    pixels: Vec<u8>,
}

impl RasterSurface {
    /// A transparent surface.
    pub fn new(viewport: Viewport) -> Self {
        let mut surface = Self {
            viewport,
            background: None,
            pixels: Vec::new(),
        };
        surface.clear();
        surface
    }

    /// A surface that clears to an opaque background color.
    pub fn with_background(viewport: Viewport, background: Rgb8) -> Self {
        let mut surface = Self {
            viewport,
            background: Some(background),
            pixels: Vec::new(),
        };
        surface.clear();
        surface
    }

    /// Read-only access to the RGBA8 buffer. Length is `width * height * 4`.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    /// The RGBA value at `(x, y)`, or `None` outside the surface.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.viewport.width() || y >= self.viewport.height() {
            return None;
        }
        let i = self.offset(x as i64, y as i64);
        Some([
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        ])
    }

    fn offset(&self, x: i64, y: i64) -> usize {
        (y as usize * self.viewport.width() as usize + x as usize) * 4
    }

    fn in_bounds(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && x < self.viewport.width() as i64 && y < self.viewport.height() as i64
    }

    /// Blends each listed pixel once. Duplicates and off-surface pixels are dropped.
    fn blend_all(&mut self, mut covered: Vec<(i64, i64)>, color: Rgba) {
        covered.sort_unstable();
        covered.dedup();
        for (x, y) in covered {
            if self.in_bounds(x, y) {
                let i = self.offset(x, y);
                blend_over(&mut self.pixels[i..i + 4], color);
            }
        }
    }
}

/// Straight-alpha source-over of `src` onto one RGBA8 pixel.
fn blend_over(dst: &mut [u8], src: Rgba) {
    let sa = src.a;
    let da = f64::from(dst[3]) / 255.0;
    let out_a = sa + da * (1.0 - sa);
    if out_a <= 0.0 {
        dst.copy_from_slice(&[0, 0, 0, 0]);
        return;
    }
    let mix = |s: u8, d: u8| {
        let c = (f64::from(s) * sa + f64::from(d) * da * (1.0 - sa)) / out_a;
        c.round().clamp(0.0, 255.0) as u8
    };
    dst[0] = mix(src.r, dst[0]);
    dst[1] = mix(src.g, dst[1]);
    dst[2] = mix(src.b, dst[2]);
    dst[3] = (out_a * 255.0).round().clamp(0.0, 255.0) as u8;
}

/// Liang-Barsky clip of the segment `a..b` to the box `min..max`.
fn clip_segment(a: DVec2, b: DVec2, min: DVec2, max: DVec2) -> Option<(DVec2, DVec2)> {
    let d = b - a;
    let (mut t0, mut t1) = (0.0_f64, 1.0_f64);
    for (p, q) in [
        (-d.x, a.x - min.x),
        (d.x, max.x - a.x),
        (-d.y, a.y - min.y),
        (d.y, max.y - a.y),
    ] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let t = q / p;
        if p < 0.0 {
            t0 = t0.max(t);
        } else {
            t1 = t1.min(t);
        }
        if t0 > t1 {
            return None;
        }
    }
    Some((a + d * t0, a + d * t1))
}

impl Surface for RasterSurface {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.clear();
    }

    fn clear(&mut self) {
        let fill = match self.background {
            Some(bg) => [bg.r, bg.g, bg.b, 255],
            None => [0, 0, 0, 0],
        };
        let len = self.viewport.area() * 4;
        self.pixels.clear();
        self.pixels.reserve(len);
        for _ in 0..self.viewport.area() {
            self.pixels.extend_from_slice(&fill);
        }
    }

    fn stroke_line(&mut self, from: DVec2, to: DVec2, width: f64, color: Rgba) {
        // Zero-length segments have no area with butt caps.
        if from == to || width <= 0.0 || color.a <= 0.0 {
            return;
        }
        let thickness = width.round().clamp(1.0, MAX_LINE_WIDTH) as i64;
        let lo = -(thickness - 1) / 2;
        let hi = lo + thickness - 1;

        let margin = thickness as f64;
        let Some((from, to)) = clip_segment(
            from,
            to,
            DVec2::splat(-margin),
            DVec2::new(self.viewport.max_x() + margin, self.viewport.max_y() + margin),
        ) else {
            return;
        };
        let delta = to - from;
        let steps = delta.x.abs().max(delta.y.abs()).ceil().max(1.0) as i64;
        let capacity = (steps + 1)
            .checked_mul(thickness * thickness)
            .and_then(|n| usize::try_from(n).ok())
            .unwrap_or(0);
        let mut covered = Vec::with_capacity(capacity);
        for k in 0..=steps {
            let p = from + delta * (k as f64 / steps as f64);
            let (px, py) = (p.x.floor() as i64, p.y.floor() as i64);
            for oy in lo..=hi {
                for ox in lo..=hi {
                    covered.push((px + ox, py + oy));
                }
            }
        }
        self.blend_all(covered, color);
    }

    fn fill_circle(&mut self, center: DVec2, radius: f64, color: Rgba) {
        if radius <= 0.0 || color.a <= 0.0 {
            return;
        }
        let r2 = radius * radius;
        // Scan only the part of the bounding box that lies on the surface.
        let x0 = ((center.x - radius).floor() as i64).max(0);
        let x1 = ((center.x + radius).ceil() as i64).min(self.viewport.width() as i64 - 1);
        let y0 = ((center.y - radius).floor() as i64).max(0);
        let y1 = ((center.y + radius).ceil() as i64).min(self.viewport.height() as i64 - 1);
        let mut covered = Vec::new();
        for y in y0..=y1 {
            for x in x0..=x1 {
                let d = DVec2::new(x as f64 + 0.5, y as f64 + 0.5) - center;
                if d.length_squared() <= r2 {
                    covered.push((x, y));
                }
            }
        }
        // Sub-pixel dots still show up as their containing pixel.
        if covered.is_empty() {
            covered.push((center.x.floor() as i64, center.y.floor() as i64));
        }
        self.blend_all(covered, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use particle_field_core::color::ACCENT;

    fn surface(w: u32, h: u32) -> RasterSurface {
        RasterSurface::new(Viewport::new(w, h).unwrap())
    }

    #[test]
    fn new_surface_is_transparent_with_correct_length() {
        let s = surface(8, 4);
        assert_eq!(s.pixels().len(), 8 * 4 * 4);
        assert!(s.pixels().iter().all(|&b| b == 0));
    }

    #[test]
    fn background_clear_is_opaque() {
        let bg = Rgb8 { r: 10, g: 20, b: 30 };
        let s = RasterSurface::with_background(Viewport::new(2, 2).unwrap(), bg);
        assert_eq!(s.pixel(1, 1), Some([10, 20, 30, 255]));
    }

    #[test]
    fn pixel_outside_is_none() {
        let s = surface(2, 2);
        assert_eq!(s.pixel(2, 0), None);
        assert_eq!(s.pixel(0, 2), None);
    }

    #[test]
    fn opaque_circle_writes_exact_color() {
        let mut s = surface(10, 10);
        s.fill_circle(DVec2::new(5.0, 5.0), 2.0, ACCENT.with_alpha(1.0));
        assert_eq!(s.pixel(5, 5), Some([255, 107, 0, 255]));
        assert_eq!(s.pixel(0, 0), Some([0, 0, 0, 0]));
    }

    #[test]
    fn tiny_circle_still_marks_its_pixel() {
        let mut s = surface(10, 10);
        s.fill_circle(DVec2::new(3.2, 7.9), 0.1, ACCENT.with_alpha(1.0));
        assert_eq!(s.pixel(3, 7), Some([255, 107, 0, 255]));
    }

    #[test]
    fn translucent_over_transparent_keeps_color_and_alpha() {
        let mut s = surface(4, 4);
        s.fill_circle(DVec2::new(1.5, 1.5), 0.5, ACCENT.with_alpha(0.5));
        let [r, g, b, a] = s.pixel(1, 1).unwrap();
        assert_eq!((r, g, b), (255, 107, 0));
        assert_eq!(a, 128);
    }

    #[test]
    fn translucent_over_opaque_background_mixes() {
        let bg = Rgb8 { r: 0, g: 0, b: 0 };
        let mut s = RasterSurface::with_background(Viewport::new(4, 4).unwrap(), bg);
        s.fill_circle(DVec2::new(1.5, 1.5), 0.5, ACCENT.with_alpha(0.5));
        assert_eq!(s.pixel(1, 1), Some([128, 54, 0, 255]));
    }

    #[test]
    fn horizontal_line_covers_each_pixel_once() {
        let mut s = surface(10, 3);
        s.stroke_line(
            DVec2::new(0.5, 1.5),
            DVec2::new(9.5, 1.5),
            1.0,
            ACCENT.with_alpha(0.5),
        );
        for x in 0..10 {
            assert_eq!(s.pixel(x, 1).unwrap()[3], 128, "pixel {x} blended more than once");
            assert_eq!(s.pixel(x, 0).unwrap()[3], 0);
        }
    }

    #[test]
    fn zero_length_line_draws_nothing() {
        let mut s = surface(4, 4);
        let p = DVec2::new(2.0, 2.0);
        s.stroke_line(p, p, 1.0, ACCENT.with_alpha(0.15));
        assert!(s.pixels().iter().all(|&b| b == 0));
    }

    #[test]
    fn thick_line_is_wider() {
        let mut s = surface(10, 10);
        s.stroke_line(
            DVec2::new(0.5, 5.5),
            DVec2::new(9.5, 5.5),
            3.0,
            ACCENT.with_alpha(1.0),
        );
        assert_eq!(s.pixel(4, 4).unwrap()[3], 255);
        assert_eq!(s.pixel(4, 5).unwrap()[3], 255);
        assert_eq!(s.pixel(4, 6).unwrap()[3], 255);
        assert_eq!(s.pixel(4, 7).unwrap()[3], 0);
    }

    #[test]
    fn primitives_are_clipped_to_the_surface() {
        let mut s = surface(5, 5);
        s.fill_circle(DVec2::new(-1.0, -1.0), 3.0, ACCENT.with_alpha(1.0));
        s.stroke_line(
            DVec2::new(-50.0, 2.5),
            DVec2::new(50.0, 2.5),
            1.0,
            ACCENT.with_alpha(1.0),
        );
        assert_eq!(s.pixels().len(), 5 * 5 * 4);
        assert_eq!(s.pixel(0, 0).unwrap()[3], 255);
    }

    #[test]
    fn set_viewport_reallocates_and_clears() {
        let mut s = surface(4, 4);
        s.fill_circle(DVec2::new(2.0, 2.0), 2.0, ACCENT.with_alpha(1.0));
        s.set_viewport(Viewport::new(6, 3).unwrap());
        assert_eq!(s.pixels().len(), 6 * 3 * 4);
        assert!(s.pixels().iter().all(|&b| b == 0));
    }

    #[test]
    fn segment_outside_the_box_is_dropped() {
        let (min, max) = (DVec2::ZERO, DVec2::new(10.0, 10.0));
        assert!(clip_segment(DVec2::new(-5.0, -5.0), DVec2::new(-1.0, 20.0), min, max).is_none());
        let (a, b) = clip_segment(DVec2::new(-10.0, 5.0), DVec2::new(30.0, 5.0), min, max).unwrap();
        assert_eq!((a, b), (DVec2::new(0.0, 5.0), DVec2::new(10.0, 5.0)));
    }

    #[test]
    fn oversized_stroke_width_is_capped_without_overflow() {
        let mut s = surface(16, 16);
        s.stroke_line(
            DVec2::new(0.5, 8.5),
            DVec2::new(15.5, 8.5),
            1e12,
            ACCENT.with_alpha(1.0),
        );
        assert!(s.pixels().chunks(4).all(|px| px[3] == 255));
    }

    #[test]
    fn huge_circle_covers_the_surface_quickly() {
        let mut s = surface(8, 8);
        s.fill_circle(DVec2::new(4.0, 4.0), 1e9, ACCENT.with_alpha(1.0));
        assert!(s.pixels().chunks(4).all(|px| px == [255, 107, 0, 255]));
    }

    #[test]
    fn very_long_line_is_clipped_without_overflow() {
        let mut s = surface(8, 8);
        s.stroke_line(
            DVec2::new(-1e15, 4.5),
            DVec2::new(1e15, 4.5),
            1.0,
            ACCENT.with_alpha(1.0),
        );
        assert_eq!(s.pixels().len(), 8 * 8 * 4);
        for x in 0..8 {
            assert_eq!(s.pixel(x, 4).unwrap()[3], 255);
            assert_eq!(s.pixel(x, 3).unwrap()[3], 0);
        }
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn arbitrary_lines_never_panic_or_resize(
                x0 in -500.0_f64..500.0,
                y0 in -500.0_f64..500.0,
                x1 in -500.0_f64..500.0,
                y1 in -500.0_f64..500.0,
                a in 0.0_f64..1.0,
            ) {
                let mut s = surface(64, 48);
                s.stroke_line(DVec2::new(x0, y0), DVec2::new(x1, y1), 1.0, ACCENT.with_alpha(a));
                prop_assert_eq!(s.pixels().len(), 64 * 48 * 4);
            }
        }
    }
}
