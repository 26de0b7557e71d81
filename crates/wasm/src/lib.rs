#![deny(unsafe_code)]
//! WASM bindings: draws the particle field behind a page.
//!
//! ```js
//! import init, { mount } from "./particle_field_wasm.js";
//! await init();
//! const background = mount("particles-canvas"); // undefined if the canvas is missing
//! // later: background?.stop();
//! ```
//!
//! The frame chain is a `requestAnimationFrame` closure that asks the core
//! [`FrameLoop`] whether to continue; `stop()` cancels it, cancels the pending
//! frame and removes the resize listener.

mod canvas;

pub use canvas::CanvasSurface;

use particle_field_core::frame_loop::{CancelHandle, FrameLoop, FrameStatus};
use particle_field_core::prng::Xorshift64;
use particle_field_core::renderer::ParticleRenderer;
use particle_field_core::surface::Surface;
use particle_field_core::viewport::Viewport;
use particle_field_core::FieldConfig;
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Window;

/// Canvas id the portfolio page uses.
pub const DEFAULT_CANVAS_ID: &str = "particles-canvas";

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// State shared by the animation frame and resize closures.
struct Shared {
    renderer: RefCell<ParticleRenderer<CanvasSurface>>,
    frame_loop: RefCell<FrameLoop>,
    pending: Cell<Option<i32>>,
}

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
}

/// A running particle background. Dropping it (or calling `free()` from JS)
/// stops it.
#[wasm_bindgen]
pub struct ParticleBackground {
    window: Window,
    shared: Rc<Shared>,
    cancel: CancelHandle,
    _tick: FrameCallback,
    on_resize: Option<Closure<dyn FnMut()>>,
}

#[wasm_bindgen]
impl ParticleBackground {
    /// Stops the animation, clears the canvas and detaches the resize
    /// listener. Safe to call more than once.
    pub fn stop(&mut self) {
        self.cancel.cancel();
        if let Some(id) = self.shared.pending.take() {
            if let Err(e) = self.window.cancel_animation_frame(id) {
                log::warn!("cancelAnimationFrame failed: {e:?}");
            }
        }
        if let Some(on_resize) = self.on_resize.take() {
            if let Err(e) = self
                .window
                .remove_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())
            {
                log::warn!("removing resize listener failed: {e:?}");
            }
        }
        if let Some(mut surface) = self.shared.renderer.borrow_mut().dispose() {
            surface.clear();
            log::info!(
                "particle background stopped after {} frames",
                self.shared.frame_loop.borrow().frames()
            );
        }
    }

    /// Whether frames are still being drawn.
    #[wasm_bindgen(js_name = isRunning)]
    pub fn is_running(&self) -> bool {
        !self.cancel.is_cancelled() && self.shared.renderer.borrow().is_active()
    }

    /// Frames drawn so far.
    pub fn frames(&self) -> f64 {
        self.shared.frame_loop.borrow().frames() as f64
    }
}

impl Drop for ParticleBackground {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Starts the particle background on the canvas with id `canvas_id`.
///
/// Returns `undefined` when there is no window, no such canvas, or no 2D
/// context; the page simply has no background then.
#[wasm_bindgen]
pub fn mount(canvas_id: &str) -> Result<Option<ParticleBackground>, JsValue> {
    let Some(window) = web_sys::window() else {
        return Ok(None);
    };
    let Some(mut surface) = window
        .document()
        .and_then(|document| CanvasSurface::find(&document, canvas_id))
    else {
        return Ok(None);
    };
    if let Some(viewport) = window_viewport(&window) {
        surface.set_viewport(viewport);
    }

    let mut renderer = ParticleRenderer::new(Some(surface), FieldConfig::default());
    renderer.initialize(&mut Xorshift64::new(clock_seed()));
    let frame_loop = FrameLoop::new();
    let cancel = frame_loop.cancel_handle();
    let shared = Rc::new(Shared {
        renderer: RefCell::new(renderer),
        frame_loop: RefCell::new(frame_loop),
        pending: Cell::new(None),
    });

    let on_resize = {
        let shared = Rc::clone(&shared);
        let window = window.clone();
        Closure::<dyn FnMut()>::new(move || {
            if let Some(viewport) = window_viewport(&window) {
                shared.renderer.borrow_mut().resize(viewport);
            }
        })
    };
    window.add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())?;

    let tick: FrameCallback = Rc::new(RefCell::new(None));
    *tick.borrow_mut() = Some(frame_callback(
        window.clone(),
        Rc::clone(&shared),
        Rc::downgrade(&tick),
    ));
    if let Some(callback) = tick.borrow().as_ref() {
        let id = window.request_animation_frame(callback.as_ref().unchecked_ref())?;
        shared.pending.set(Some(id));
    }

    Ok(Some(ParticleBackground {
        window,
        shared,
        cancel,
        _tick: tick,
        on_resize: Some(on_resize),
    }))
}

/// [`mount`] on [`DEFAULT_CANVAS_ID`].
#[wasm_bindgen(js_name = mountDefault)]
pub fn mount_default() -> Result<Option<ParticleBackground>, JsValue> {
    mount(DEFAULT_CANVAS_ID)
}

/// One frame, then exactly one request for the next unless the loop stopped.
///
/// Holds only a weak reference to its own slot so that dropping the
/// [`ParticleBackground`] frees it.
fn frame_callback(
    window: Window,
    shared: Rc<Shared>,
    slot: Weak<RefCell<Option<Closure<dyn FnMut()>>>>,
) -> Closure<dyn FnMut()> {
    Closure::new(move || {
        shared.pending.set(None);
        let status = shared
            .frame_loop
            .borrow_mut()
            .tick(&mut shared.renderer.borrow_mut());
        if status == FrameStatus::Stopped {
            return;
        }
        let Some(slot) = slot.upgrade() else {
            return;
        };
        let callback = slot.borrow();
        if let Some(callback) = callback.as_ref() {
            match window.request_animation_frame(callback.as_ref().unchecked_ref()) {
                Ok(id) => shared.pending.set(Some(id)),
                Err(e) => log::error!("requestAnimationFrame failed: {e:?}"),
            }
        }
    })
}

fn window_viewport(window: &Window) -> Option<Viewport> {
    let width = window.inner_width().ok()?.as_f64()?;
    let height = window.inner_height().ok()?.as_f64()?;
    viewport_from_css_size(width, height)
}

/// Converts a CSS pixel size to a viewport, rejecting empty or non-finite sizes.
fn viewport_from_css_size(width: f64, height: f64) -> Option<Viewport> {
    if !(width.is_finite() && height.is_finite()) {
        return None;
    }
    let to_px = |v: f64| v.floor().clamp(0.0, f64::from(u32::MAX)) as u32;
    Viewport::new(to_px(width), to_px(height)).ok()
}

fn clock_seed() -> u64 {
    let now = js_sys::Date::now() as u64;
    let noise = (js_sys::Math::random() * (1u64 << 53) as f64) as u64;
    now ^ noise.rotate_left(17)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn css_size_is_floored_to_whole_pixels() {
        let v = viewport_from_css_size(1280.7, 719.2).unwrap();
        assert_eq!((v.width(), v.height()), (1280, 719));
    }

    #[test]
    fn empty_or_nan_css_size_is_rejected() {
        assert!(viewport_from_css_size(0.0, 600.0).is_none());
        assert!(viewport_from_css_size(800.0, 0.4).is_none());
        assert!(viewport_from_css_size(f64::NAN, 600.0).is_none());
        assert!(viewport_from_css_size(800.0, f64::INFINITY).is_none());
    }

    #[test]
    fn negative_css_size_is_rejected() {
        assert!(viewport_from_css_size(-5.0, 600.0).is_none());
    }
}
