use swipedismiss_ui_graphics::Point;

pub type PointerId = u64;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerEventKind {
    Down,
    Move,
    Up,
    /// The platform took the gesture away (e.g. a parent started scrolling).
    Cancel,
    Enter,
    Exit,
    Scroll,
}

/// A single pointer sample as delivered by the host.
///
/// `position` is local to the element the event is delivered to, so it moves
/// when the element is translated. `global_position` is in screen space and
/// does not.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    pub id: PointerId,
    pub kind: PointerEventKind,
    pub position: Point,
    pub global_position: Point,
    /// Milliseconds on a monotonic clock.
    pub uptime_millis: i64,
}

impl PointerEvent {
    pub fn new(
        kind: PointerEventKind,
        position: Point,
        global_position: Point,
        uptime_millis: i64,
    ) -> Self {
        Self {
            id: 0,
            kind,
            position,
            global_position,
            uptime_millis,
        }
    }

    /// Shifts the local position, leaving the screen position untouched.
    pub fn offset_location(mut self, dx: f32, dy: f32) -> Self {
        self.position = self.position.offset(dx, dy);
        self
    }

    /// The same sample re-labelled as `kind`, e.g. to synthesize a cancel.
    pub fn with_kind(mut self, kind: PointerEventKind) -> Self {
        self.kind = kind;
        self
    }

    /// Screen-space movement since `origin`.
    pub fn delta_from(&self, origin: Point) -> (f32, f32) {
        (
            self.global_position.x - origin.x,
            self.global_position.y - origin.y,
        )
    }
}
