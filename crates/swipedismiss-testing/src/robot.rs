//! Scripted pointer input for a single dismissable element.
//!
//! The robot works in screen coordinates relative to the element's resting
//! position and fills in the local position the way a host would: shifted by
//! whatever translation the element currently shows.
//!
//! ```ignore
//! let mut robot = GestureRobot::new(element.clone());
//! robot.send(&listener, PointerEventKind::Down, 0.0, 0.0);
//! robot.advance_time(10);
//! robot.send(&listener, PointerEventKind::Move, 40.0, 0.0);
//! ```

use std::rc::Rc;

use swipedismiss_foundation::{PointerEvent, PointerEventKind};
use swipedismiss_ui::{DismissableElement, SwipeDismissTouchListener};
use swipedismiss_ui_graphics::Point;

pub struct GestureRobot<E: DismissableElement> {
    element: Rc<E>,
    origin: Point,
    now_millis: i64,
    last: Point,
}

impl<E: DismissableElement + 'static> GestureRobot<E> {
    pub fn new(element: Rc<E>) -> Self {
        Self::at_origin(element, Point::ZERO)
    }

    /// Robot for an element whose resting top-left corner is at `origin` on
    /// screen.
    pub fn at_origin(element: Rc<E>, origin: Point) -> Self {
        Self {
            element,
            origin,
            now_millis: 0,
            last: Point::ZERO,
        }
    }

    pub fn now_millis(&self) -> i64 {
        self.now_millis
    }

    pub fn advance_time(&mut self, millis: i64) {
        self.now_millis += millis;
    }

    /// Builds an event at `(x, y)`, relative to the element's resting
    /// position, stamped with the current time.
    pub fn event(&mut self, kind: PointerEventKind, x: f32, y: f32) -> PointerEvent {
        self.last = Point::new(x, y);
        let translation = self.element.presentation().translation_x;
        PointerEvent::new(
            kind,
            Point::new(x - translation, y),
            Point::new(self.origin.x + x, self.origin.y + y),
            self.now_millis,
        )
    }

    pub fn down(&mut self, x: f32, y: f32) -> PointerEvent {
        self.event(PointerEventKind::Down, x, y)
    }

    pub fn move_to(&mut self, x: f32, y: f32) -> PointerEvent {
        self.event(PointerEventKind::Move, x, y)
    }

    pub fn up(&mut self, x: f32, y: f32) -> PointerEvent {
        self.event(PointerEventKind::Up, x, y)
    }

    /// Platform cancel at the last pointer position.
    pub fn cancel(&mut self) -> PointerEvent {
        let Point { x, y } = self.last;
        self.event(PointerEventKind::Cancel, x, y)
    }

    /// Builds an event and feeds it to `listener`, returning whether it was
    /// claimed.
    pub fn send(
        &mut self,
        listener: &SwipeDismissTouchListener<E>,
        kind: PointerEventKind,
        x: f32,
        y: f32,
    ) -> bool {
        let event = self.event(kind, x, y);
        listener.handle_event(&event)
    }

    /// Presses at `from_x`, moves to `to_x` in `steps` evenly spaced moves
    /// `step_millis` apart, and releases at `to_x` right after the last
    /// move. Returns the claim results in delivery order.
    pub fn swipe(
        &mut self,
        listener: &SwipeDismissTouchListener<E>,
        from_x: f32,
        to_x: f32,
        steps: usize,
        step_millis: i64,
    ) -> Vec<bool> {
        let steps = steps.max(1);
        let mut claims = Vec::with_capacity(steps + 2);
        claims.push(self.send(listener, PointerEventKind::Down, from_x, 0.0));
        for step in 1..=steps {
            self.advance_time(step_millis);
            let x = from_x + (to_x - from_x) * step as f32 / steps as f32;
            claims.push(self.send(listener, PointerEventKind::Move, x, 0.0));
        }
        claims.push(self.send(listener, PointerEventKind::Up, to_x, 0.0));
        claims
    }
}
