//! Pixel dimensions of a drawing surface.

use crate::error::FieldError;

/// Width and height of a drawing surface in pixels. Both are non-zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    width: u32,
    height: u32,
}

impl Viewport {
    /// Returns `FieldError::InvalidDimensions` if either dimension is zero.
    pub fn new(width: u32, height: u32) -> Result<Self, FieldError> {
        if width == 0 || height == 0 {
            return Err(FieldError::InvalidDimensions);
        }
        Ok(Self { width, height })
    }

    /// Like [`new`](Self::new), but a zero dimension becomes one pixel.
    ///
    /// For hosts that can momentarily report an empty surface.
    pub fn clamped(width: u32, height: u32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
        }
    }

    pub fn width(self) -> u32 {
        self.width
    }

    pub fn height(self) -> u32 {
        self.height
    }

    /// Exclusive upper bound for x coordinates.
    pub fn max_x(self) -> f64 {
        f64::from(self.width)
    }

    /// Exclusive upper bound for y coordinates.
    pub fn max_y(self) -> f64 {
        f64::from(self.height)
    }

    /// Whether `(x, y)` lies in [0, width) x [0, height).
    pub fn contains(self, x: f64, y: f64) -> bool {
        (0.0..self.max_x()).contains(&x) && (0.0..self.max_y()).contains(&y)
    }

    /// Number of pixels, for buffer allocation.
    pub fn area(self) -> usize {
        self.width as usize * self.height as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rejects_zero_width_or_height() {
        assert!(matches!(
            Viewport::new(0, 10),
            Err(FieldError::InvalidDimensions)
        ));
        assert!(matches!(
            Viewport::new(10, 0),
            Err(FieldError::InvalidDimensions)
        ));
    }

    #[test]
    fn clamped_turns_zero_into_one() {
        let v = Viewport::clamped(0, 300);
        assert_eq!((v.width(), v.height()), (1, 300));
        assert_eq!(Viewport::clamped(640, 480), Viewport::new(640, 480).unwrap());
    }

    #[test]
    fn contains_is_half_open() {
        let v = Viewport::new(800, 600).unwrap();
        assert!(v.contains(0.0, 0.0));
        assert!(v.contains(799.99, 599.99));
        assert!(!v.contains(800.0, 10.0));
        assert!(!v.contains(10.0, 600.0));
        assert!(!v.contains(-0.01, 10.0));
    }

    #[test]
    fn area_does_not_overflow_u32() {
        let v = Viewport::new(u32::MAX, 2).unwrap();
        assert_eq!(v.area(), u32::MAX as usize * 2);
    }
}
