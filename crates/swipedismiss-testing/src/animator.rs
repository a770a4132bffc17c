//! [`AnimationDriver`] that records requests and finishes them on demand.
//!
//! Tests assert on what the recognizer asked for, then call
//! [`RecordingAnimator::finish_all`] to jump every animation to its end.

use std::cell::RefCell;
use std::collections::VecDeque;

use swipedismiss_animation::{
    AnimationDriver, AnimationHandle, AnimationSpec, EndCallback, FrameCallback,
};
use swipedismiss_ui_graphics::Presentation;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnimationTarget {
    Presentation { from: Presentation, to: Presentation },
    Value { from: f32, to: f32 },
}

#[derive(Debug, Clone)]
pub struct AnimationRequest {
    pub target: AnimationTarget,
    pub spec: AnimationSpec,
    pub handle: AnimationHandle,
}

impl AnimationRequest {
    /// Target presentation, if this was a presentation animation.
    pub fn presentation_target(&self) -> Option<Presentation> {
        match self.target {
            AnimationTarget::Presentation { to, .. } => Some(to),
            AnimationTarget::Value { .. } => None,
        }
    }
}

enum PendingCallbacks {
    Presentation {
        to: Presentation,
        on_frame: FrameCallback<Presentation>,
        on_end: Option<EndCallback>,
    },
    Value {
        to: f32,
        on_update: FrameCallback<f32>,
        on_end: EndCallback,
    },
}

struct PendingAnimation {
    handle: AnimationHandle,
    callbacks: PendingCallbacks,
}

#[derive(Default)]
pub struct RecordingAnimator {
    requests: RefCell<Vec<AnimationRequest>>,
    pending: RefCell<VecDeque<PendingAnimation>>,
}

impl RecordingAnimator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn requests(&self) -> Vec<AnimationRequest> {
        self.requests.borrow().clone()
    }

    pub fn last_request(&self) -> Option<AnimationRequest> {
        self.requests.borrow().last().cloned()
    }

    pub fn pending_count(&self) -> usize {
        self.pending.borrow().len()
    }

    /// Jumps the oldest pending animation to its target and completes it.
    /// Cancelled animations are dropped without callbacks. Returns `false`
    /// when nothing was pending.
    pub fn finish_next(&self) -> bool {
        let Some(animation) = self.pending.borrow_mut().pop_front() else {
            return false;
        };
        if animation.handle.is_cancelled() {
            return true;
        }
        match animation.callbacks {
            PendingCallbacks::Presentation {
                to,
                mut on_frame,
                on_end,
            } => {
                on_frame(to);
                if let Some(on_end) = on_end {
                    on_end();
                }
            }
            PendingCallbacks::Value {
                to,
                mut on_update,
                on_end,
            } => {
                on_update(to);
                on_end();
            }
        }
        true
    }

    /// Finishes pending animations, including ones started by completion
    /// callbacks, until none are left.
    pub fn finish_all(&self) {
        for _ in 0..64 {
            if !self.finish_next() {
                return;
            }
        }
        panic!("animations kept scheduling new animations");
    }

    fn record(
        &self,
        target: AnimationTarget,
        spec: AnimationSpec,
        callbacks: PendingCallbacks,
    ) -> AnimationHandle {
        let handle = AnimationHandle::new();
        self.requests.borrow_mut().push(AnimationRequest {
            target,
            spec,
            handle: handle.clone(),
        });
        self.pending.borrow_mut().push_back(PendingAnimation {
            handle: handle.clone(),
            callbacks,
        });
        handle
    }
}

impl AnimationDriver for RecordingAnimator {
    fn animate_presentation(
        &self,
        from: Presentation,
        to: Presentation,
        spec: AnimationSpec,
        on_frame: FrameCallback<Presentation>,
        on_end: Option<EndCallback>,
    ) -> AnimationHandle {
        self.record(
            AnimationTarget::Presentation { from, to },
            spec,
            PendingCallbacks::Presentation {
                to,
                on_frame,
                on_end,
            },
        )
    }

    fn animate_value(
        &self,
        from: f32,
        to: f32,
        spec: AnimationSpec,
        on_update: FrameCallback<f32>,
        on_end: EndCallback,
    ) -> AnimationHandle {
        self.record(
            AnimationTarget::Value { from, to },
            spec,
            PendingCallbacks::Value {
                to,
                on_update,
                on_end,
            },
        )
    }
}
