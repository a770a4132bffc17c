//! Tween driver on top of the frame runtime.
//!
//! Each running tween re-registers itself for the next frame until its spec
//! reports completion, the same way a fling decay walks frame by frame.

use std::cell::RefCell;
use std::rc::Rc;

use swipedismiss_core::{FrameCallbackRegistration, FrameClock, RuntimeHandle};
use swipedismiss_ui_graphics::Presentation;

use crate::driver::{AnimationDriver, AnimationHandle, EndCallback, FrameCallback};
use crate::{AnimationSpec, Lerp};

struct TweenState<T: Lerp + Copy + 'static> {
    start: T,
    target: T,
    spec: AnimationSpec,
    start_frame_time_nanos: Option<u64>,
    on_frame: Option<FrameCallback<T>>,
    on_end: Option<EndCallback>,
    handle: AnimationHandle,
    registration: Option<FrameCallbackRegistration>,
}

fn schedule_next_frame<T: Lerp + Copy + 'static>(
    state: Rc<RefCell<TweenState<T>>>,
    frame_clock: FrameClock,
) {
    let state_for_closure = Rc::clone(&state);
    let clock_for_closure = frame_clock.clone();
    let registration = frame_clock.with_frame_nanos(move |frame_time_nanos| {
        on_frame(state_for_closure, clock_for_closure, frame_time_nanos);
    });
    if registration.is_active() {
        state.borrow_mut().registration = Some(registration);
    } else {
        log::warn!("frame runtime is gone; jumping tween to its target");
        finish_without_frames(state);
    }
}

/// Applies the target and completes the tween right away. Used when no
/// further frames will ever be delivered.
fn finish_without_frames<T: Lerp + Copy + 'static>(state: Rc<RefCell<TweenState<T>>>) {
    let (target, on_frame, on_end) = {
        let mut tween = state.borrow_mut();
        if tween.handle.is_cancelled() {
            return;
        }
        (tween.target, tween.on_frame.take(), tween.on_end.take())
    };
    if let Some(mut on_frame) = on_frame {
        on_frame(target);
    }
    if let Some(on_end) = on_end {
        on_end();
    }
}

fn on_frame<T: Lerp + Copy + 'static>(
    state: Rc<RefCell<TweenState<T>>>,
    frame_clock: FrameClock,
    frame_time_nanos: u64,
) {
    let (value, finished, mut callback) = {
        let mut tween = state.borrow_mut();
        tween.registration = None;
        if tween.handle.is_cancelled() {
            return;
        }
        let start_time = *tween.start_frame_time_nanos.get_or_insert(frame_time_nanos);
        let (progress, finished) = tween
            .spec
            .progress_at(frame_time_nanos.saturating_sub(start_time));
        let value = if finished {
            tween.target
        } else {
            tween.start.lerp(&tween.target, progress)
        };
        (value, finished, tween.on_frame.take())
    };

    // The callback may touch the element; keep the tween unborrowed meanwhile.
    if let Some(callback) = callback.as_mut() {
        callback(value);
    }

    if finished {
        let on_end = state.borrow_mut().on_end.take();
        if let Some(on_end) = on_end {
            on_end();
        }
    } else {
        state.borrow_mut().on_frame = callback;
        schedule_next_frame(state, frame_clock);
    }
}

/// [`AnimationDriver`] backed by a [`FrameClock`].
#[derive(Clone)]
pub struct FrameClockAnimator {
    frame_clock: FrameClock,
}

impl FrameClockAnimator {
    pub fn new(runtime: RuntimeHandle) -> Self {
        Self {
            frame_clock: runtime.frame_clock(),
        }
    }

    fn start<T: Lerp + Copy + 'static>(
        &self,
        from: T,
        to: T,
        spec: AnimationSpec,
        on_frame: FrameCallback<T>,
        on_end: Option<EndCallback>,
    ) -> AnimationHandle {
        let handle = AnimationHandle::new();
        let state = Rc::new(RefCell::new(TweenState {
            start: from,
            target: to,
            spec,
            start_frame_time_nanos: None,
            on_frame: Some(on_frame),
            on_end,
            handle: handle.clone(),
            registration: None,
        }));
        schedule_next_frame(state, self.frame_clock.clone());
        handle
    }
}

impl AnimationDriver for FrameClockAnimator {
    fn animate_presentation(
        &self,
        from: Presentation,
        to: Presentation,
        spec: AnimationSpec,
        on_frame: FrameCallback<Presentation>,
        on_end: Option<EndCallback>,
    ) -> AnimationHandle {
        self.start(from, to, spec, on_frame, on_end)
    }

    fn animate_value(
        &self,
        from: f32,
        to: f32,
        spec: AnimationSpec,
        on_update: FrameCallback<f32>,
        on_end: EndCallback,
    ) -> AnimationHandle {
        self.start(from, to, spec, on_update, Some(on_end))
    }
}
