//! A card in the demo column.

use std::cell::Cell;
use std::rc::Rc;

use swipedismiss_foundation::{PointerEvent, PointerEventKind};
use swipedismiss_ui::DismissableElement;
use swipedismiss_ui_graphics::{Point, Presentation, Rect, Size};

pub struct Card {
    label: String,
    /// Laid-out bounds in screen space; the height may differ from
    /// `layout_height` until the next layout pass.
    bounds: Cell<Rect>,
    layout_height: Cell<f32>,
    presentation: Cell<Presentation>,
    pressed: Cell<bool>,
    clicks: Cell<usize>,
    /// Shared with the column; set while a card owns the gesture.
    parent_intercept_disallowed: Rc<Cell<bool>>,
}

impl Card {
    pub fn new(label: impl Into<String>, size: Size, parent_intercept_disallowed: Rc<Cell<bool>>) -> Self {
        Self {
            label: label.into(),
            bounds: Cell::new(Rect::from_origin_size(Point::ZERO, size)),
            layout_height: Cell::new(size.height),
            presentation: Cell::new(Presentation::REST),
            pressed: Cell::new(false),
            clicks: Cell::new(0),
            parent_intercept_disallowed,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn bounds(&self) -> Rect {
        self.bounds.get()
    }

    pub fn place(&self, origin: Point, width: f32) {
        self.bounds.set(Rect::from_origin_size(
            origin,
            Size::new(width, self.layout_height.get()),
        ));
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed.get()
    }

    pub fn clicks(&self) -> usize {
        self.clicks.get()
    }

    /// Converts a screen position into this card's local space, following
    /// its visual translation.
    pub fn to_local(&self, global: Point) -> Point {
        let origin = self.bounds.get().origin();
        Point::new(
            global.x - origin.x - self.presentation.get().translation_x,
            global.y - origin.y,
        )
    }
}

impl DismissableElement for Card {
    fn width(&self) -> f32 {
        self.bounds.get().width
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
    }

    fn request_disallow_intercept_touch_event(&self, disallow: bool) {
        self.parent_intercept_disallowed.set(disallow);
    }

    fn on_touch_event(&self, event: &PointerEvent) -> bool {
        match event.kind {
            PointerEventKind::Down => self.pressed.set(true),
            PointerEventKind::Up => {
                if self.pressed.replace(false) {
                    self.clicks.set(self.clicks.get() + 1);
                    log::debug!("{} clicked", self.label);
                }
            }
            PointerEventKind::Cancel => self.pressed.set(false),
            _ => {}
        }
        true
    }
}
