//! In-memory [`DismissableElement`] that records what the recognizer did.

use std::cell::{Cell, RefCell};

use swipedismiss_foundation::PointerEvent;
use swipedismiss_ui::DismissableElement;
use swipedismiss_ui_graphics::{Presentation, Size};

#[derive(Debug)]
pub struct FakeElement {
    width: Cell<f32>,
    layout_height: Cell<f32>,
    presentation: Cell<Presentation>,
    disallow_intercept_requests: Cell<usize>,
    touch_events: RefCell<Vec<PointerEvent>>,
    height_history: RefCell<Vec<f32>>,
}

impl FakeElement {
    pub fn new(size: Size) -> Self {
        Self {
            width: Cell::new(size.width),
            layout_height: Cell::new(size.height),
            presentation: Cell::new(Presentation::REST),
            disallow_intercept_requests: Cell::new(0),
            touch_events: RefCell::new(Vec::new()),
            height_history: RefCell::new(Vec::new()),
        }
    }

    /// Simulates a layout pass that changes the element's width.
    pub fn set_width(&self, width: f32) {
        self.width.set(width);
    }

    /// How many times the parent was asked to stop intercepting.
    pub fn disallow_intercept_requests(&self) -> usize {
        self.disallow_intercept_requests.get()
    }

    /// Events delivered to the element's own default handler.
    pub fn touch_events(&self) -> Vec<PointerEvent> {
        self.touch_events.borrow().clone()
    }

    /// Every layout height written by the recognizer, in order.
    pub fn height_history(&self) -> Vec<f32> {
        self.height_history.borrow().clone()
    }
}

impl DismissableElement for FakeElement {
    fn width(&self) -> f32 {
        self.width.get()
    }

    fn height(&self) -> f32 {
        self.layout_height.get()
    }

    fn presentation(&self) -> Presentation {
        self.presentation.get()
    }

    fn set_presentation(&self, presentation: Presentation) {
        self.presentation.set(presentation);
    }

    fn set_layout_height(&self, height: f32) {
        self.layout_height.set(height);
        self.height_history.borrow_mut().push(height);
    }

    fn request_disallow_intercept_touch_event(&self, disallow: bool) {
        if disallow {
            self.disallow_intercept_requests
                .set(self.disallow_intercept_requests.get() + 1);
        }
    }

    fn on_touch_event(&self, event: &PointerEvent) -> bool {
        self.touch_events.borrow_mut().push(*event);
        false
    }
}
