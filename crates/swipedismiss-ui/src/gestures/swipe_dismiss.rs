//! Swipe-to-dismiss touch listener.
//!
//! Event handling runs against the listener's state under a short borrow and
//! produces a list of effects. The effects touch the element and start
//! animations only after that borrow is released, so host code and animation
//! callbacks are free to call back into the listener.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use smallvec::SmallVec;
use swipedismiss_animation::{AnimationDriver, AnimationHandle};
use swipedismiss_foundation::{PointerEvent, PointerEventKind, VelocityTracker, ViewConfiguration};
use swipedismiss_ui_graphics::{Point, Presentation};

use super::decision::{
    decide, Calibration, DismissDirection, ReleaseSample, SwipeDecision, VELOCITY_TIME_BASE_MS,
};
use crate::DismissableElement;

/// Height an element collapses to before the dismiss callback fires.
pub const COLLAPSED_HEIGHT: f32 = 1.0;

/// Viewport width used until the element reports a real one. Never zero, so
/// the opacity fade never divides by zero.
const UNMEASURED_WIDTH: f32 = 1.0;

/// Callback invoked with the element once it has been swiped away.
pub type DismissCallback<E> = Box<dyn FnMut(&Rc<E>) + 'static>;

/// Coarse view of the recognizer's state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GesturePhase {
    Idle,
    /// Pressed, but not yet past the touch slop.
    Tracking,
    /// Dragging the element horizontally.
    Swiping,
    /// Sliding out or collapsing; new presses are ignored.
    Exiting,
}

struct TrackingSession {
    origin: Point,
    velocity: VelocityTracker,
}

struct SwipingSession {
    origin: Point,
    velocity: VelocityTracker,
    /// `±touch_slop`, signed like the drag that started the swipe.
    slop_sign: f32,
    translation_x: f32,
}

enum GestureState {
    Idle,
    Tracking(TrackingSession),
    Swiping(SwipingSession),
    Exiting,
}

impl GestureState {
    fn phase(&self) -> GesturePhase {
        match self {
            GestureState::Idle => GesturePhase::Idle,
            GestureState::Tracking(_) => GesturePhase::Tracking,
            GestureState::Swiping(_) => GesturePhase::Swiping,
            GestureState::Exiting => GesturePhase::Exiting,
        }
    }
}

enum Effect {
    CancelSnapBack,
    /// Swipe started: keep the parent out of it and clear the element's own
    /// pressed state.
    ClaimGesture(PointerEvent),
    Present(Presentation),
    SnapBack,
    SlideOut {
        direction: DismissDirection,
        distance: f32,
    },
}

type Effects = SmallVec<[Effect; 3]>;

struct ListenerState<E: DismissableElement + 'static> {
    element: Rc<E>,
    animator: Rc<dyn AnimationDriver>,
    calibration: Calibration,
    viewport_width: f32,
    warned_unmeasured: bool,
    gesture: GestureState,
    snap_back: Option<AnimationHandle>,
    on_dismiss: Option<DismissCallback<E>>,
    /// Bumped on every listener replacement so a callback that cleared or
    /// replaced itself is not restored afterwards.
    listener_generation: u64,
}

impl<E: DismissableElement + 'static> ListenerState<E> {
    fn live_translation(&self) -> f32 {
        match &self.gesture {
            GestureState::Swiping(session) => session.translation_x,
            _ => 0.0,
        }
    }

    fn capture_viewport_width(&mut self) {
        if self.viewport_width >= 2.0 {
            return;
        }
        let width = self.element.width();
        if width >= 2.0 {
            self.viewport_width = width;
        } else if !self.warned_unmeasured {
            self.warned_unmeasured = true;
            log::warn!("swipe target reports width {width}; thresholds use {UNMEASURED_WIDTH} until it is laid out");
        }
    }

    fn on_event(&mut self, raw: &PointerEvent) -> (bool, Effects) {
        // The element moves under the pointer while dragged; sample in its
        // untranslated frame.
        let event = raw.offset_location(self.live_translation(), 0.0);
        self.capture_viewport_width();

        let mut effects = Effects::new();
        let claimed = match event.kind {
            PointerEventKind::Down => self.on_down(&event, &mut effects),
            PointerEventKind::Move => self.on_move(&event, &mut effects),
            PointerEventKind::Up => {
                self.on_up(&event, &mut effects);
                false
            }
            PointerEventKind::Cancel => {
                self.on_cancel(&mut effects);
                false
            }
            PointerEventKind::Enter | PointerEventKind::Exit | PointerEventKind::Scroll => false,
        };
        (claimed, effects)
    }

    fn on_down(&mut self, event: &PointerEvent, effects: &mut Effects) -> bool {
        match self.gesture {
            GestureState::Exiting => {
                log::debug!("press ignored while the element is being dismissed");
                return false;
            }
            GestureState::Swiping(_) => {
                // Down without a matching up; do not leave the element dragged.
                effects.push(Effect::SnapBack);
            }
            GestureState::Idle | GestureState::Tracking(_) => {}
        }

        let mut velocity = VelocityTracker::new();
        velocity.add_movement(event);
        self.gesture = GestureState::Tracking(TrackingSession {
            origin: event.global_position,
            velocity,
        });
        true
    }

    fn on_move(&mut self, event: &PointerEvent, effects: &mut Effects) -> bool {
        let touch_slop = self.calibration.touch_slop;
        let viewport_width = self.viewport_width;

        let session = match std::mem::replace(&mut self.gesture, GestureState::Idle) {
            GestureState::Tracking(mut tracking) => {
                tracking.velocity.add_movement(event);
                let (delta_x, delta_y) = event.delta_from(tracking.origin);
                if delta_x.abs() > touch_slop && delta_y.abs() < delta_x.abs() / 2.0 {
                    let slop_sign = if delta_x > 0.0 { touch_slop } else { -touch_slop };
                    log::debug!("swipe started: dx={delta_x} dy={delta_y} slop={slop_sign}");
                    effects.push(Effect::CancelSnapBack);
                    effects.push(Effect::ClaimGesture(
                        event.with_kind(PointerEventKind::Cancel),
                    ));
                    SwipingSession {
                        origin: tracking.origin,
                        velocity: tracking.velocity,
                        slop_sign,
                        translation_x: 0.0,
                    }
                } else {
                    self.gesture = GestureState::Tracking(tracking);
                    return false;
                }
            }
            GestureState::Swiping(mut swiping) => {
                swiping.velocity.add_movement(event);
                swiping
            }
            other => {
                self.gesture = other;
                return false;
            }
        };

        let (delta_x, _) = event.delta_from(session.origin);
        let alpha = (1.0 - 2.0 * delta_x.abs() / viewport_width).clamp(0.0, 1.0);
        log::trace!("swipe dx={delta_x} alpha={alpha}");
        effects.push(Effect::Present(Presentation::new(
            delta_x - session.slop_sign,
            alpha,
        )));
        self.gesture = GestureState::Swiping(SwipingSession {
            translation_x: delta_x,
            ..session
        });
        true
    }

    fn on_up(&mut self, event: &PointerEvent, effects: &mut Effects) {
        let (origin, mut velocity, swiping) =
            match std::mem::replace(&mut self.gesture, GestureState::Idle) {
                GestureState::Tracking(session) => (session.origin, session.velocity, false),
                GestureState::Swiping(session) => (session.origin, session.velocity, true),
                other => {
                    self.gesture = other;
                    return;
                }
            };

        velocity.add_movement(event);
        let sample = ReleaseSample {
            delta_x: event.delta_from(origin).0,
            velocity: velocity.compute_current_velocity(VELOCITY_TIME_BASE_MS, f32::MAX),
            swiping,
        };
        let decision = decide(sample, self.viewport_width, &self.calibration);
        log::debug!(
            "release dx={} vx={} vy={} -> {decision:?}",
            sample.delta_x,
            sample.velocity.x,
            sample.velocity.y
        );

        match decision {
            SwipeDecision::Dismiss(direction) => {
                self.gesture = GestureState::Exiting;
                effects.push(Effect::SlideOut {
                    direction,
                    distance: self.viewport_width,
                });
            }
            SwipeDecision::SnapBack => effects.push(Effect::SnapBack),
            SwipeDecision::Ignore => {}
        }
    }

    fn on_cancel(&mut self, effects: &mut Effects) {
        match self.gesture {
            GestureState::Tracking(_) | GestureState::Swiping(_) => {
                log::debug!("gesture cancelled by the platform");
                self.gesture = GestureState::Idle;
                effects.push(Effect::SnapBack);
            }
            GestureState::Idle | GestureState::Exiting => {}
        }
    }
}

/// Makes one element dismissable with a horizontal swipe.
///
/// ```ignore
/// let listener = SwipeDismissTouchListener::new(card.clone(), animator, &ViewConfiguration::default());
/// listener.set_on_dismiss(move |card| list.remove(card));
/// // in the host's event loop:
/// let claimed = listener.handle_event(&event);
/// ```
pub struct SwipeDismissTouchListener<E: DismissableElement + 'static> {
    inner: Rc<RefCell<ListenerState<E>>>,
}

impl<E: DismissableElement + 'static> SwipeDismissTouchListener<E> {
    pub fn new(
        element: Rc<E>,
        animator: Rc<dyn AnimationDriver>,
        configuration: &ViewConfiguration,
    ) -> Self {
        Self::with_calibration(
            element,
            animator,
            Calibration::from_configuration(configuration),
        )
    }

    pub fn with_calibration(
        element: Rc<E>,
        animator: Rc<dyn AnimationDriver>,
        calibration: Calibration,
    ) -> Self {
        Self {
            inner: Rc::new(RefCell::new(ListenerState {
                element,
                animator,
                calibration,
                viewport_width: UNMEASURED_WIDTH,
                warned_unmeasured: false,
                gesture: GestureState::Idle,
                snap_back: None,
                on_dismiss: None,
                listener_generation: 0,
            })),
        }
    }

    /// Replaces the dismiss callback. `None` removes it.
    pub fn set_dismiss_listener(&self, callback: Option<DismissCallback<E>>) {
        let mut state = self.inner.borrow_mut();
        state.on_dismiss = callback;
        state.listener_generation += 1;
    }

    pub fn set_on_dismiss(&self, callback: impl FnMut(&Rc<E>) + 'static) {
        self.set_dismiss_listener(Some(Box::new(callback)));
    }

    /// Feeds one pointer event. Returns `true` when the listener claimed it
    /// and the host should not run its own handling for it.
    pub fn handle_event(&self, event: &PointerEvent) -> bool {
        let (claimed, effects) = self.inner.borrow_mut().on_event(event);
        for effect in effects {
            apply_effect(&self.inner, effect);
        }
        claimed
    }

    pub fn element(&self) -> Rc<E> {
        Rc::clone(&self.inner.borrow().element)
    }

    pub fn calibration(&self) -> Calibration {
        self.inner.borrow().calibration
    }

    pub fn gesture_phase(&self) -> GesturePhase {
        self.inner.borrow().gesture.phase()
    }

    pub fn is_swiping(&self) -> bool {
        self.gesture_phase() == GesturePhase::Swiping
    }

    pub fn is_exiting(&self) -> bool {
        self.gesture_phase() == GesturePhase::Exiting
    }
}

impl<E: DismissableElement + 'static> Clone for SwipeDismissTouchListener<E> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<E: DismissableElement + 'static> fmt::Debug for SwipeDismissTouchListener<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.inner.borrow();
        f.debug_struct("SwipeDismissTouchListener")
            .field("phase", &state.gesture.phase())
            .field("viewport_width", &state.viewport_width)
            .field("calibration", &state.calibration)
            .field("has_dismiss_listener", &state.on_dismiss.is_some())
            .finish()
    }
}

fn apply_effect<E: DismissableElement + 'static>(
    inner: &Rc<RefCell<ListenerState<E>>>,
    effect: Effect,
) {
    let (element, animator, spec) = {
        let state = inner.borrow();
        (
            Rc::clone(&state.element),
            Rc::clone(&state.animator),
            state.calibration.animation_spec(),
        )
    };

    match effect {
        Effect::CancelSnapBack => {
            if let Some(handle) = inner.borrow_mut().snap_back.take() {
                handle.cancel();
            }
        }
        Effect::ClaimGesture(cancel) => {
            element.request_disallow_intercept_touch_event(true);
            element.on_touch_event(&cancel);
        }
        Effect::Present(presentation) => element.set_presentation(presentation),
        Effect::SnapBack => {
            let target = Rc::clone(&element);
            let handle = animator.animate_presentation(
                element.presentation(),
                Presentation::REST,
                spec,
                Box::new(move |presentation| target.set_presentation(presentation)),
                None,
            );
            if let Some(previous) = inner.borrow_mut().snap_back.replace(handle) {
                previous.cancel();
            }
        }
        Effect::SlideOut {
            direction,
            distance,
        } => {
            log::debug!("dismissing {direction:?}");
            let target = Rc::clone(&element);
            let weak = Rc::downgrade(inner);
            animator.animate_presentation(
                element.presentation(),
                Presentation::new(direction.sign() * distance, 0.0),
                spec,
                Box::new(move |presentation| target.set_presentation(presentation)),
                Some(Box::new(move || perform_dismiss(weak))),
            );
        }
    }
}

/// Second exit phase: collapse the element's height, then notify.
fn perform_dismiss<E: DismissableElement + 'static>(weak: Weak<RefCell<ListenerState<E>>>) {
    let Some(inner) = weak.upgrade() else {
        return;
    };
    let (element, animator, spec) = {
        let state = inner.borrow();
        (
            Rc::clone(&state.element),
            Rc::clone(&state.animator),
            state.calibration.animation_spec(),
        )
    };

    let original_height = element.height();
    let target = Rc::clone(&element);
    animator.animate_value(
        original_height,
        COLLAPSED_HEIGHT,
        spec,
        Box::new(move |height| target.set_layout_height(height)),
        Box::new(move || finish_dismiss(weak, element, original_height)),
    );
}

fn finish_dismiss<E: DismissableElement + 'static>(
    weak: Weak<RefCell<ListenerState<E>>>,
    element: Rc<E>,
    original_height: f32,
) {
    let inner = weak.upgrade();
    if let Some(inner) = &inner {
        let (callback, generation) = {
            let mut state = inner.borrow_mut();
            (state.on_dismiss.take(), state.listener_generation)
        };
        if let Some(mut callback) = callback {
            callback(&element);
            let mut state = inner.borrow_mut();
            if state.listener_generation == generation {
                state.on_dismiss = Some(callback);
            }
        }
    }

    // Ready the element for reuse, e.g. by a recycling list.
    element.set_presentation(Presentation::REST);
    element.set_layout_height(original_height);

    if let Some(inner) = inner {
        inner.borrow_mut().gesture = GestureState::Idle;
    }
}
