//! The drawing surface seam.
//!
//! Anything the field can paint onto implements [`Surface`]: a browser canvas,
//! a software raster buffer, or the [`Recorder`] used in tests to inspect
//! exactly which primitives a frame produced.

use crate::color::Rgba;
use crate::viewport::Viewport;
use glam::DVec2;

/// A 2D raster area sized in whole pixels.
///
/// Changing the viewport discards the current contents, matching how a
/// canvas element behaves when its pixel dimensions are assigned.
pub trait Surface {
    /// Current pixel dimensions.
    fn viewport(&self) -> Viewport;

    /// Resizes the pixel buffer.
    fn set_viewport(&mut self, viewport: Viewport);

    /// Clears every pixel to transparent (or the surface's background).
    fn clear(&mut self);

    /// Strokes a straight segment.
    fn stroke_line(&mut self, from: DVec2, to: DVec2, width: f64, color: Rgba);

    /// Fills a full circle.
    fn fill_circle(&mut self, center: DVec2, radius: f64, color: Rgba);
}

/// One primitive issued to a [`Recorder`].
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear,
    Line {
        from: DVec2,
        to: DVec2,
        width: f64,
        color: Rgba,
    },
    Circle {
        center: DVec2,
        radius: f64,
        color: Rgba,
    },
}

/// A surface that draws nothing and remembers every call since the last clear.
#[derive(Debug, Clone)]
pub struct Recorder {
    viewport: Viewport,
    commands: Vec<DrawCommand>,
    resizes: usize,
}

impl Recorder {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            commands: Vec::new(),
            resizes: 0,
        }
    }

    /// Commands issued since (and including) the most recent clear.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Number of line commands in the current frame.
    pub fn line_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Line { .. }))
            .count()
    }

    /// Number of circle commands in the current frame.
    pub fn circle_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Circle { .. }))
            .count()
    }

    /// How many times `set_viewport` has been called.
    pub fn resizes(&self) -> usize {
        self.resizes
    }
}

impl Surface for Recorder {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.commands.clear();
        self.resizes += 1;
    }

    fn clear(&mut self) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear);
    }

    fn stroke_line(&mut self, from: DVec2, to: DVec2, width: f64, color: Rgba) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            width,
            color,
        });
    }

    fn fill_circle(&mut self, center: DVec2, radius: f64, color: Rgba) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
        });
    }
}
