//! Full exit sequence driven by the frame runtime instead of a recording
//! animator.

use std::cell::Cell;
use std::rc::Rc;

use swipedismiss_animation::{AnimationDriver, FrameClockAnimator};
use swipedismiss_core::Runtime;
use swipedismiss_foundation::{PointerEventKind, ViewConfiguration};
use swipedismiss_testing::prelude::*;
use swipedismiss_ui::{DismissableElement, GesturePhase, SwipeDismissTouchListener, COLLAPSED_HEIGHT};
use swipedismiss_ui_graphics::{Presentation, Size};

const FRAME_NANOS: u64 = 16_000_000;

struct Scene {
    runtime: Runtime,
    element: Rc<FakeElement>,
    listener: SwipeDismissTouchListener<FakeElement>,
    robot: GestureRobot<FakeElement>,
    dismissed: Rc<Cell<usize>>,
    frame_time: u64,
}

fn scene() -> Scene {
    let runtime = Runtime::default();
    let element = Rc::new(FakeElement::new(Size::new(400.0, 80.0)));
    let animator: Rc<dyn AnimationDriver> = Rc::new(FrameClockAnimator::new(runtime.handle()));
    let listener =
        SwipeDismissTouchListener::new(Rc::clone(&element), animator, &ViewConfiguration::default());
    let dismissed = Rc::new(Cell::new(0));
    {
        let dismissed = Rc::clone(&dismissed);
        listener.set_on_dismiss(move |_| dismissed.set(dismissed.get() + 1));
    }
    let robot = GestureRobot::new(Rc::clone(&element));
    Scene {
        runtime,
        element,
        listener,
        robot,
        dismissed,
        frame_time: 0,
    }
}

impl Scene {
    fn pump_frame(&mut self) {
        self.frame_time += FRAME_NANOS;
        self.runtime.drain_frame_callbacks(self.frame_time);
    }

    /// Pumps frames until no animation is scheduled. Returns the number of
    /// frames rendered.
    fn pump_until_idle(&mut self) -> usize {
        let mut frames = 0;
        while self.runtime.has_frame_callbacks() {
            assert!(frames < 200, "animations never settled");
            self.pump_frame();
            frames += 1;
        }
        frames
    }
}

#[test]
fn dismiss_runs_slide_out_then_collapse_then_callback() {
    let mut s = scene();

    s.robot.swipe(&s.listener, 0.0, 300.0, 3, 10);
    assert_eq!(s.listener.gesture_phase(), GesturePhase::Exiting);
    assert!(s.runtime.has_frame_callbacks());

    // Halfway through the slide-out the element is moving right and fading.
    for _ in 0..7 {
        s.pump_frame();
    }
    let mid = s.element.presentation();
    assert!(mid.translation_x > 292.0 && mid.translation_x < 400.0);
    assert_eq!(mid.alpha, 0.0);
    assert_eq!(s.dismissed.get(), 0);

    s.pump_until_idle();

    assert_eq!(s.dismissed.get(), 1);
    assert_eq!(s.element.presentation(), Presentation::REST);
    assert_eq!(s.element.height(), 80.0);
    assert_eq!(s.listener.gesture_phase(), GesturePhase::Idle);

    let heights = s.element.height_history();
    assert!(heights.len() >= 3);
    assert_approx_eq(heights[0], 80.0, 1e-3, "collapse starts at full height");
    assert_eq!(heights[heights.len() - 2], COLLAPSED_HEIGHT);
    assert_eq!(heights[heights.len() - 1], 80.0);
    assert!(heights[..heights.len() - 1]
        .windows(2)
        .all(|pair| pair[1] <= pair[0]));
}

#[test]
fn snap_back_settles_at_rest() {
    let mut s = scene();

    assert!(s.robot.send(&s.listener, PointerEventKind::Down, 0.0, 0.0));
    s.robot.advance_time(10);
    assert!(s.robot.send(&s.listener, PointerEventKind::Move, 60.0, 0.0));
    s.robot.advance_time(500);
    assert!(!s.robot.send(&s.listener, PointerEventKind::Up, 60.0, 0.0));

    let frames = s.pump_until_idle();
    assert!(frames > 1);
    assert_eq!(s.element.presentation(), Presentation::REST);
    assert_eq!(s.dismissed.get(), 0);
}

#[test]
fn fast_short_swipe_is_a_fling() {
    let mut s = scene();

    // 60px in 20ms is 3000px/s, well under half the 400px width.
    s.robot.swipe(&s.listener, 0.0, 60.0, 4, 5);
    assert!(s.listener.is_exiting());

    s.pump_until_idle();
    assert_eq!(s.dismissed.get(), 1);
}

#[test]
fn dismiss_completes_when_the_runtime_is_gone() {
    let detached = Runtime::default().handle();
    let element = Rc::new(FakeElement::new(Size::new(400.0, 80.0)));
    let animator: Rc<dyn AnimationDriver> = Rc::new(FrameClockAnimator::new(detached));
    let listener =
        SwipeDismissTouchListener::new(Rc::clone(&element), animator, &ViewConfiguration::default());
    let dismissed = Rc::new(Cell::new(0));
    {
        let dismissed = Rc::clone(&dismissed);
        listener.set_on_dismiss(move |_| dismissed.set(dismissed.get() + 1));
    }
    let mut robot = GestureRobot::new(Rc::clone(&element));

    robot.swipe(&listener, 0.0, 300.0, 3, 10);

    assert_eq!(dismissed.get(), 1);
    assert_eq!(listener.gesture_phase(), GesturePhase::Idle);
    assert_eq!(element.presentation(), Presentation::REST);
    assert_eq!(element.height(), 80.0);

    robot.advance_time(50);
    assert!(robot.send(&listener, PointerEventKind::Down, 0.0, 0.0));
}
