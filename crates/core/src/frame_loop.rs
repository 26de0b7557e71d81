//! Explicit, cancellable frame loop.
//!
//! The host owns the actual scheduling primitive (`requestAnimationFrame` in
//! the browser, a plain `for` in the CLI). Each time it fires, the host calls
//! [`FrameLoop::tick`] and requests the next frame only if the tick returned
//! [`FrameStatus::Continue`]. Cancelling through a [`CancelHandle`] stops the
//! chain at the next tick.

use crate::renderer::ParticleRenderer;
use crate::surface::Surface;
use std::cell::Cell;
use std::rc::Rc;

/// Shared stop flag for a [`FrameLoop`]. Clones refer to the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancelHandle(Rc<Cell<bool>>);

impl CancelHandle {
    pub fn cancel(&self) {
        self.0.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.get()
    }
}

/// What the host should do after a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStatus {
    /// A frame was drawn; schedule exactly one more.
    Continue,
    /// Cancelled, or the renderer is inactive; schedule nothing.
    Stopped,
}

/// Counts frames and carries the cancel flag.
#[derive(Debug, Default)]
pub struct FrameLoop {
    cancel: CancelHandle,
    frames: u64,
}

impl FrameLoop {
    pub fn new() -> Self {
        Self::default()
    }

    /// A handle that stops this loop when cancelled.
    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    /// Frames drawn so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Draws one frame unless the loop was cancelled or the renderer is inactive.
    pub fn tick<S: Surface>(&mut self, renderer: &mut ParticleRenderer<S>) -> FrameStatus {
        if self.cancel.is_cancelled() {
            log::debug!("frame loop cancelled after {} frames", self.frames);
            return FrameStatus::Stopped;
        }
        if !renderer.frame() {
            return FrameStatus::Stopped;
        }
        self.frames += 1;
        FrameStatus::Continue
    }

    /// Ticks synchronously up to `max_frames` times, stopping early if the loop
    /// stops. Returns the number of frames drawn by this call.
    pub fn run<S: Surface>(&mut self, renderer: &mut ParticleRenderer<S>, max_frames: u64) -> u64 {
        let start = self.frames;
        for _ in 0..max_frames {
            if self.tick(renderer) == FrameStatus::Stopped {
                break;
            }
        }
        self.frames - start
    }
}
