use std::cell::Cell;
use std::rc::Rc;

use swipedismiss_animation::AnimationDriver;
use swipedismiss_foundation::PointerEventKind;
use swipedismiss_testing::prelude::*;
use swipedismiss_ui::{
    Calibration, DismissableElement, GesturePhase, SwipeDismissTouchListener, COLLAPSED_HEIGHT,
};
use swipedismiss_ui_graphics::{Presentation, Size};

const WIDTH: f32 = 400.0;
const HEIGHT: f32 = 80.0;

struct Harness {
    element: Rc<FakeElement>,
    animator: Rc<RecordingAnimator>,
    listener: SwipeDismissTouchListener<FakeElement>,
    robot: GestureRobot<FakeElement>,
    dismissed: Rc<Cell<usize>>,
}

fn calibration() -> Calibration {
    Calibration {
        touch_slop: 10.0,
        min_fling_velocity: 800.0,
        max_fling_velocity: 8000.0,
        animation_millis: 200,
    }
}

fn harness_with_size(size: Size) -> Harness {
    let element = Rc::new(FakeElement::new(size));
    let animator = Rc::new(RecordingAnimator::new());
    let driver: Rc<dyn AnimationDriver> = animator.clone();
    let listener = SwipeDismissTouchListener::with_calibration(Rc::clone(&element), driver, calibration());
    let dismissed = Rc::new(Cell::new(0));
    {
        let dismissed = Rc::clone(&dismissed);
        listener.set_on_dismiss(move |_| dismissed.set(dismissed.get() + 1));
    }
    let robot = GestureRobot::new(Rc::clone(&element));
    Harness {
        element,
        animator,
        listener,
        robot,
        dismissed,
    }
}

fn harness() -> Harness {
    harness_with_size(Size::new(WIDTH, HEIGHT))
}

impl Harness {
    fn send(&mut self, kind: PointerEventKind, x: f32, y: f32) -> bool {
        self.robot.send(&self.listener, kind, x, y)
    }

    /// Press at 0, cross the slop at 40 and keep dragging to `x`.
    fn drag_to(&mut self, x: f32) {
        assert!(self.send(PointerEventKind::Down, 0.0, 0.0));
        self.robot.advance_time(10);
        let start = if x < 0.0 { -40.0 } else { 40.0 };
        assert!(self.send(PointerEventKind::Move, start, 0.0));
        self.robot.advance_time(10);
        assert!(self.send(PointerEventKind::Move, x, 0.0));
    }

    /// Releases at `x` long after the last move so the fling velocity is 0.
    fn release_slowly(&mut self, x: f32) -> bool {
        self.robot.advance_time(200);
        self.send(PointerEventKind::Up, x, 0.0)
    }
}

#[test]
fn distance_dismiss_to_the_right() {
    let mut h = harness();

    assert!(h.send(PointerEventKind::Down, 0.0, 0.0));
    h.robot.advance_time(10);
    assert!(h.send(PointerEventKind::Move, 40.0, 0.0));
    assert!(h.listener.is_swiping());
    assert_presentation_approx_eq(
        h.element.presentation(),
        Presentation::new(30.0, 0.8),
        1e-4,
        "past the slop",
    );

    h.robot.advance_time(10);
    assert!(h.send(PointerEventKind::Move, 250.0, 0.0));
    assert_presentation_approx_eq(
        h.element.presentation(),
        Presentation::new(240.0, 0.0),
        1e-4,
        "past half the width",
    );

    assert!(!h.release_slowly(250.0));
    assert_eq!(h.listener.gesture_phase(), GesturePhase::Exiting);

    let slide_out = h.animator.last_request().expect("slide-out requested");
    assert_eq!(
        slide_out.target,
        AnimationTarget::Presentation {
            from: Presentation::new(240.0, 0.0),
            to: Presentation::new(WIDTH, 0.0),
        }
    );
    assert_eq!(slide_out.spec.duration_millis, 200);
    assert_eq!(h.dismissed.get(), 0);

    assert!(h.animator.finish_next());
    let collapse = h.animator.last_request().expect("collapse requested");
    assert_eq!(
        collapse.target,
        AnimationTarget::Value {
            from: HEIGHT,
            to: COLLAPSED_HEIGHT,
        }
    );
    assert_eq!(h.dismissed.get(), 0);

    assert!(h.animator.finish_next());
    assert_eq!(h.dismissed.get(), 1);
    assert_eq!(h.element.presentation(), Presentation::REST);
    assert_eq!(h.element.height_history(), vec![COLLAPSED_HEIGHT, HEIGHT]);
    assert_eq!(h.listener.gesture_phase(), GesturePhase::Idle);
}

#[test]
fn distance_dismiss_to_the_left() {
    let mut h = harness();
    h.drag_to(-250.0);
    h.release_slowly(-250.0);

    let slide_out = h.animator.last_request().expect("slide-out requested");
    assert_eq!(
        slide_out.presentation_target(),
        Some(Presentation::new(-WIDTH, 0.0))
    );
    h.animator.finish_all();
    assert_eq!(h.dismissed.get(), 1);
}

#[test]
fn fling_dismisses_short_drag() {
    let mut h = harness();

    assert!(h.send(PointerEventKind::Down, 0.0, 0.0));
    h.robot.advance_time(15);
    assert!(h.send(PointerEventKind::Move, 30.0, 0.75));
    let release = h.robot.up(30.0, 0.75);
    assert_eq!(release.uptime_millis, 15);
    assert!(!h.listener.handle_event(&release));

    let slide_out = h.animator.last_request().expect("slide-out requested");
    assert_eq!(
        slide_out.presentation_target(),
        Some(Presentation::new(WIDTH, 0.0))
    );
    h.animator.finish_all();
    assert_eq!(h.dismissed.get(), 1);
}

#[test]
fn fling_against_drag_direction_snaps_back() {
    let mut h = harness();

    assert!(h.send(PointerEventKind::Down, 0.0, 0.0));
    h.robot.advance_time(10);
    assert!(h.send(PointerEventKind::Move, 30.0, 0.0));
    h.robot.advance_time(10);
    assert!(h.send(PointerEventKind::Move, 60.0, 0.0));
    h.robot.advance_time(15);
    assert!(!h.send(PointerEventKind::Up, 30.0, 0.0));

    let snap_back = h.animator.last_request().expect("snap-back requested");
    assert_eq!(snap_back.presentation_target(), Some(Presentation::REST));
    assert_eq!(h.listener.gesture_phase(), GesturePhase::Idle);

    h.animator.finish_all();
    assert_eq!(h.element.presentation(), Presentation::REST);
    assert_eq!(h.dismissed.get(), 0);
}

#[test]
fn short_drag_snaps_back() {
    let mut h = harness();
    h.drag_to(120.0);
    assert!(!h.release_slowly(120.0));

    assert_eq!(h.animator.requests().len(), 1);
    assert_eq!(
        h.animator.requests()[0].presentation_target(),
        Some(Presentation::REST)
    );
    h.animator.finish_all();
    assert_eq!(h.dismissed.get(), 0);
    assert!(h.element.height_history().is_empty());
}

#[test]
fn movement_below_slop_never_swipes() {
    let mut h = harness();

    assert!(h.send(PointerEventKind::Down, 0.0, 0.0));
    h.robot.advance_time(1);
    assert!(!h.send(PointerEventKind::Move, 5.0, 0.0));
    assert_eq!(h.listener.gesture_phase(), GesturePhase::Tracking);
    h.robot.advance_time(1);
    assert!(!h.send(PointerEventKind::Up, 5.0, 0.0));

    assert!(h.animator.requests().is_empty());
    assert_eq!(h.element.presentation(), Presentation::REST);
    assert_eq!(h.element.disallow_intercept_requests(), 0);
    assert_eq!(h.listener.gesture_phase(), GesturePhase::Idle);
}

#[test]
fn mostly_vertical_drag_never_swipes() {
    let mut h = harness();

    assert!(h.send(PointerEventKind::Down, 0.0, 0.0));
    h.robot.advance_time(10);
    assert!(!h.send(PointerEventKind::Move, 40.0, 30.0));

    assert!(!h.listener.is_swiping());
    assert_eq!(h.element.presentation(), Presentation::REST);
}

#[test]
fn platform_cancel_mid_swipe_snaps_back_without_callback() {
    let mut h = harness();
    h.drag_to(150.0);

    let cancel = h.robot.cancel();
    assert!(!h.listener.handle_event(&cancel));
    assert_eq!(h.listener.gesture_phase(), GesturePhase::Idle);

    let snap_back = h.animator.last_request().expect("snap-back requested");
    assert_eq!(snap_back.presentation_target(), Some(Presentation::REST));

    h.animator.finish_all();
    assert_eq!(h.element.presentation(), Presentation::REST);
    assert_eq!(h.dismissed.get(), 0);
}

#[test]
fn swipe_start_takes_the_gesture_from_parent_and_element() {
    let mut h = harness();
    h.drag_to(100.0);

    assert_eq!(h.element.disallow_intercept_requests(), 1);
    let events = h.element.touch_events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].kind, PointerEventKind::Cancel);
}

#[test]
fn events_without_a_session_are_not_claimed() {
    let mut h = harness();

    assert!(!h.send(PointerEventKind::Move, 50.0, 0.0));
    assert!(!h.send(PointerEventKind::Up, 50.0, 0.0));
    assert!(!h.send(PointerEventKind::Cancel, 50.0, 0.0));
    assert!(!h.send(PointerEventKind::Enter, 50.0, 0.0));
    assert!(!h.send(PointerEventKind::Scroll, 50.0, 0.0));

    assert!(h.animator.requests().is_empty());
    assert_eq!(h.listener.gesture_phase(), GesturePhase::Idle);
}

#[test]
fn hover_events_are_not_claimed_mid_swipe() {
    let mut h = harness();
    h.drag_to(100.0);

    assert!(!h.send(PointerEventKind::Exit, 100.0, 0.0));
    assert!(h.listener.is_swiping());
}

#[test]
fn press_during_exit_is_ignored() {
    let mut h = harness();
    h.drag_to(300.0);
    h.release_slowly(300.0);
    assert!(h.listener.is_exiting());

    assert!(!h.send(PointerEventKind::Down, 10.0, 0.0));
    assert!(!h.send(PointerEventKind::Move, 200.0, 0.0));
    assert!(h.listener.is_exiting());
    assert_eq!(h.animator.requests().len(), 1);

    h.animator.finish_all();
    assert_eq!(h.dismissed.get(), 1);
    assert!(h.send(PointerEventKind::Down, 10.0, 0.0));
}

#[test]
fn callback_fires_once_per_dismiss() {
    let mut h = harness();

    h.drag_to(300.0);
    h.release_slowly(300.0);
    h.animator.finish_all();
    h.animator.finish_all();
    assert_eq!(h.dismissed.get(), 1);

    h.drag_to(300.0);
    h.release_slowly(300.0);
    h.animator.finish_all();
    assert_eq!(h.dismissed.get(), 2);
}

#[test]
fn callback_receives_the_bound_element() {
    let mut h = harness();
    let seen = Rc::new(Cell::new(false));
    {
        let seen = Rc::clone(&seen);
        let expected = Rc::clone(&h.element);
        h.listener
            .set_on_dismiss(move |element| seen.set(Rc::ptr_eq(element, &expected)));
    }

    h.drag_to(300.0);
    h.release_slowly(300.0);
    h.animator.finish_all();

    assert!(seen.get());
}

#[test]
fn clearing_the_listener_is_idempotent() {
    let mut h = harness();

    h.drag_to(300.0);
    h.release_slowly(300.0);
    h.animator.finish_all();
    assert_eq!(h.dismissed.get(), 1);

    h.listener.set_dismiss_listener(None);
    h.listener.set_dismiss_listener(None);

    h.drag_to(300.0);
    h.release_slowly(300.0);
    h.animator.finish_all();
    assert_eq!(h.dismissed.get(), 1);
    assert_eq!(h.element.presentation(), Presentation::REST);
}

#[test]
fn listener_can_clear_itself_from_the_callback() {
    let mut h = harness();
    let calls = Rc::new(Cell::new(0));
    {
        let calls = Rc::clone(&calls);
        let listener = h.listener.clone();
        h.listener.set_on_dismiss(move |_| {
            calls.set(calls.get() + 1);
            listener.set_dismiss_listener(None);
        });
    }

    h.drag_to(300.0);
    h.release_slowly(300.0);
    h.animator.finish_all();
    h.drag_to(300.0);
    h.release_slowly(300.0);
    h.animator.finish_all();

    assert_eq!(calls.get(), 1);
}

#[test]
fn listener_replaced_from_the_callback_stays_replaced() {
    let mut h = harness();
    let second = Rc::new(Cell::new(0));
    {
        let listener = h.listener.clone();
        let second = Rc::clone(&second);
        h.listener.set_on_dismiss(move |_| {
            let second = Rc::clone(&second);
            listener.set_on_dismiss(move |_| second.set(second.get() + 1));
        });
    }

    h.drag_to(300.0);
    h.release_slowly(300.0);
    h.animator.finish_all();
    assert_eq!(second.get(), 0);

    h.drag_to(300.0);
    h.release_slowly(300.0);
    h.animator.finish_all();
    assert_eq!(second.get(), 1);
}

#[test]
fn new_swipe_cancels_running_snap_back() {
    let mut h = harness();
    h.drag_to(100.0);
    h.release_slowly(100.0);
    let snap_back = h.animator.last_request().expect("snap-back requested");
    assert!(!snap_back.handle.is_cancelled());

    h.robot.advance_time(10);
    assert!(h.send(PointerEventKind::Down, 0.0, 0.0));
    assert!(!snap_back.handle.is_cancelled());

    h.robot.advance_time(10);
    assert!(h.send(PointerEventKind::Move, 50.0, 0.0));
    assert!(snap_back.handle.is_cancelled());

    h.animator.finish_all();
    assert_presentation_approx_eq(
        h.element.presentation(),
        Presentation::new(40.0, 0.75),
        1e-4,
        "live drag after cancelled snap-back",
    );
}

#[test]
fn second_press_mid_swipe_restarts_tracking() {
    let mut h = harness();
    h.drag_to(100.0);

    assert!(h.send(PointerEventKind::Down, 100.0, 0.0));
    assert_eq!(h.listener.gesture_phase(), GesturePhase::Tracking);
    assert_eq!(
        h.animator.last_request().and_then(|r| r.presentation_target()),
        Some(Presentation::REST)
    );
}

#[test]
fn unmeasured_width_is_captured_lazily() {
    let mut h = harness_with_size(Size::new(0.0, HEIGHT));

    assert!(h.send(PointerEventKind::Down, 0.0, 0.0));
    h.element.set_width(WIDTH);
    h.robot.advance_time(10);
    assert!(h.send(PointerEventKind::Move, 40.0, 0.0));

    assert_presentation_approx_eq(
        h.element.presentation(),
        Presentation::new(30.0, 0.8),
        1e-4,
        "alpha uses the captured width",
    );
}

#[test]
fn zero_width_element_does_not_divide_by_zero() {
    let mut h = harness_with_size(Size::new(0.0, HEIGHT));
    h.drag_to(40.0);

    let presentation = h.element.presentation();
    assert!(presentation.alpha.is_finite());
    assert_eq!(presentation.alpha, 0.0);

    h.release_slowly(40.0);
    h.animator.finish_all();
    assert_eq!(h.dismissed.get(), 1);
}

#[test]
fn drag_coordinates_ignore_element_translation() {
    let mut h = harness();
    h.drag_to(100.0);

    // Local position shifts as the element follows the finger; the delta
    // still tracks the screen position.
    h.robot.advance_time(10);
    assert!(h.send(PointerEventKind::Move, 180.0, 0.0));
    assert_approx_eq(
        h.element.presentation().translation_x,
        170.0,
        1e-4,
        "translation",
    );
}
