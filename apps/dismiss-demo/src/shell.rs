//! Headless host: owns a column of cards, routes pointer events to the card
//! under the pointer and pumps the frame runtime.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use swipedismiss_animation::{AnimationDriver, FrameClockAnimator};
use swipedismiss_core::Runtime;
use swipedismiss_foundation::{PointerEvent, PointerEventKind, ViewConfiguration};
use swipedismiss_ui::{DismissableElement, SwipeDismissTouchListener};
use swipedismiss_ui_graphics::{Point, Size};
use web_time::Instant;

use crate::card::Card;

struct CardEntry {
    card: Rc<Card>,
    listener: SwipeDismissTouchListener<Card>,
}

pub struct DemoShell {
    runtime: Runtime,
    animator: Rc<dyn AnimationDriver>,
    configuration: ViewConfiguration,
    width: f32,
    cards: Rc<RefCell<Vec<CardEntry>>>,
    dismissed: Rc<RefCell<Vec<String>>>,
    intercept_disallowed: Rc<Cell<bool>>,
    /// Card that received the current pointer's down event.
    target: Option<(Rc<Card>, SwipeDismissTouchListener<Card>)>,
    start_time: Instant,
}

impl DemoShell {
    pub fn new(width: f32, configuration: ViewConfiguration) -> Self {
        let runtime = Runtime::default();
        let animator: Rc<dyn AnimationDriver> = Rc::new(FrameClockAnimator::new(runtime.handle()));
        Self {
            runtime,
            animator,
            configuration,
            width,
            cards: Rc::new(RefCell::new(Vec::new())),
            dismissed: Rc::new(RefCell::new(Vec::new())),
            intercept_disallowed: Rc::new(Cell::new(false)),
            target: None,
            start_time: Instant::now(),
        }
    }

    pub fn add_card(&mut self, label: &str, height: f32) {
        let card = Rc::new(Card::new(
            label,
            Size::new(self.width, height),
            Rc::clone(&self.intercept_disallowed),
        ));
        let listener = SwipeDismissTouchListener::new(
            Rc::clone(&card),
            Rc::clone(&self.animator),
            &self.configuration,
        );

        let cards: Weak<RefCell<Vec<CardEntry>>> = Rc::downgrade(&self.cards);
        let dismissed = Rc::downgrade(&self.dismissed);
        listener.set_on_dismiss(move |card: &Rc<Card>| {
            log::info!("dismissed {}", card.label());
            if let Some(cards) = cards.upgrade() {
                cards
                    .borrow_mut()
                    .retain(|entry| !Rc::ptr_eq(&entry.card, card));
            }
            if let Some(dismissed) = dismissed.upgrade() {
                dismissed.borrow_mut().push(card.label().to_owned());
            }
        });

        self.cards.borrow_mut().push(CardEntry { card, listener });
        self.layout();
    }

    pub fn labels(&self) -> Vec<String> {
        self.cards
            .borrow()
            .iter()
            .map(|entry| entry.card.label().to_owned())
            .collect()
    }

    pub fn dismissed(&self) -> Vec<String> {
        self.dismissed.borrow().clone()
    }

    pub fn card(&self, label: &str) -> Option<Rc<Card>> {
        self.cards
            .borrow()
            .iter()
            .find(|entry| entry.card.label() == label)
            .map(|entry| Rc::clone(&entry.card))
    }

    /// Milliseconds since the shell was created.
    pub fn now_millis(&self) -> i64 {
        self.start_time.elapsed().as_millis() as i64
    }

    pub fn is_idle(&self) -> bool {
        !self.runtime.has_frame_callbacks()
    }

    /// Runs one frame at the current wall-clock time.
    pub fn update(&mut self) {
        let frame_time = Instant::now()
            .checked_duration_since(self.start_time)
            .unwrap_or_default()
            .as_nanos() as u64;
        self.update_at(frame_time);
    }

    pub fn update_at(&mut self, frame_time_nanos: u64) {
        self.runtime.drain_frame_callbacks(frame_time_nanos);
        self.layout();
    }

    /// Routes a pointer event at screen position `global`. Returns whether
    /// any card handled it.
    pub fn dispatch(&mut self, kind: PointerEventKind, global: Point, uptime_millis: i64) -> bool {
        if kind == PointerEventKind::Down {
            self.target = self.hit_test(global);
        }
        let Some((card, listener)) = self.target.clone() else {
            return false;
        };

        let event = PointerEvent::new(kind, card.to_local(global), global, uptime_millis);
        // Press feedback starts on down before the swipe listener sees it.
        let is_down = kind == PointerEventKind::Down;
        if is_down {
            card.on_touch_event(&event);
        }
        let mut handled = listener.handle_event(&event);
        if !handled && !is_down {
            handled = card.on_touch_event(&event);
        }

        if matches!(kind, PointerEventKind::Up | PointerEventKind::Cancel) {
            self.target = None;
            self.intercept_disallowed.set(false);
        }
        handled
    }

    fn hit_test(&self, global: Point) -> Option<(Rc<Card>, SwipeDismissTouchListener<Card>)> {
        self.cards
            .borrow()
            .iter()
            .find(|entry| entry.card.bounds().contains(global.x, global.y))
            .map(|entry| (Rc::clone(&entry.card), entry.listener.clone()))
    }

    fn layout(&self) {
        let mut y = 0.0;
        for entry in self.cards.borrow().iter() {
            entry.card.place(Point::new(0.0, y), self.width);
            y += entry.card.height();
        }
    }
}
