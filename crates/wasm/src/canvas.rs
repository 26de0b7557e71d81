//! [`Surface`] over a `<canvas>` element's 2D context.

use glam::DVec2;
use particle_field_core::color::Rgba;
use particle_field_core::surface::Surface;
use particle_field_core::viewport::Viewport;
use std::f64::consts::TAU;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement};

/// A canvas element plus its `CanvasRenderingContext2d`.
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    /// Looks up `id` in the document. `None` if the element is missing, is
    /// not a canvas, or refuses a 2D context.
    pub fn find(document: &Document, id: &str) -> Option<Self> {
        let canvas = document
            .get_element_by_id(id)?
            .dyn_into::<HtmlCanvasElement>()
            .ok()?;
        Self::from_canvas(canvas)
    }

    /// Wraps an existing canvas. `None` if it has no 2D context.
    pub fn from_canvas(canvas: HtmlCanvasElement) -> Option<Self> {
        let ctx = canvas
            .get_context("2d")
            .ok()??
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some(Self { canvas, ctx })
    }

    #[allow(deprecated)]
    fn set_stroke(&self, color: Rgba) {
        self.ctx
            .set_stroke_style(&JsValue::from_str(&color.to_css()));
    }

    #[allow(deprecated)]
    fn set_fill(&self, color: Rgba) {
        self.ctx.set_fill_style(&JsValue::from_str(&color.to_css()));
    }
}

impl Surface for CanvasSurface {
    fn viewport(&self) -> Viewport {
        Viewport::clamped(self.canvas.width(), self.canvas.height())
    }

    fn set_viewport(&mut self, viewport: Viewport) {
        self.canvas.set_width(viewport.width());
        self.canvas.set_height(viewport.height());
    }

    fn clear(&mut self) {
        let viewport = self.viewport();
        self.ctx
            .clear_rect(0.0, 0.0, viewport.max_x(), viewport.max_y());
    }

    fn stroke_line(&mut self, from: DVec2, to: DVec2, width: f64, color: Rgba) {
        self.set_stroke(color);
        self.ctx.set_line_width(width);
        self.ctx.begin_path();
        self.ctx.move_to(from.x, from.y);
        self.ctx.line_to(to.x, to.y);
        self.ctx.stroke();
    }

    fn fill_circle(&mut self, center: DVec2, radius: f64, color: Rgba) {
        self.set_fill(color);
        self.ctx.begin_path();
        // Only fails for a negative radius, which the config rejects.
        let _ = self.ctx.arc(center.x, center.y, radius, 0.0, TAU);
        self.ctx.fill();
    }
}
