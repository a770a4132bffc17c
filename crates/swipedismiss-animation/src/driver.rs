//! The animation facility a gesture recognizer talks to.

use std::cell::Cell;
use std::rc::Rc;

use swipedismiss_ui_graphics::Presentation;

use crate::AnimationSpec;

/// Per-frame callback receiving the current animated value.
pub type FrameCallback<T> = Box<dyn FnMut(T) + 'static>;

/// Completion callback, run once after the final frame.
pub type EndCallback = Box<dyn FnOnce() + 'static>;

/// Cancellation token shared between the caller and a running animation.
///
/// A cancelled animation stops at its next frame without delivering further
/// values and without running its completion callback.
#[derive(Clone, Debug, Default)]
pub struct AnimationHandle {
    cancelled: Rc<Cell<bool>>,
}

impl AnimationHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.get()
    }
}

/// Schedules animations on behalf of a gesture recognizer.
///
/// Callbacks arrive on the thread that started the animation. A driver
/// that can no longer deliver frames applies the target and completes from
/// inside the `animate_*` call, so callers must not hold borrows across it.
pub trait AnimationDriver {
    /// Animates an element's presentation from `from` to `to`. `on_frame`
    /// applies each intermediate value; `on_end` runs once the target was
    /// applied.
    fn animate_presentation(
        &self,
        from: Presentation,
        to: Presentation,
        spec: AnimationSpec,
        on_frame: FrameCallback<Presentation>,
        on_end: Option<EndCallback>,
    ) -> AnimationHandle;

    /// Animates a plain number from `from` to `to`, reporting every frame.
    fn animate_value(
        &self,
        from: f32,
        to: f32,
        spec: AnimationSpec,
        on_update: FrameCallback<f32>,
        on_end: EndCallback,
    ) -> AnimationHandle;
}
