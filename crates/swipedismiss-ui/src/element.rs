use swipedismiss_foundation::PointerEvent;
use swipedismiss_ui_graphics::Presentation;

/// The host's view of an element that can be swiped away.
///
/// Methods take `&self`; hosts keep their element state behind `Cell` or
/// `RefCell` the way retained view trees usually do.
pub trait DismissableElement {
    /// Current laid-out width.
    fn width(&self) -> f32;

    /// Current laid-out height.
    fn height(&self) -> f32;

    fn presentation(&self) -> Presentation;

    fn set_presentation(&self, presentation: Presentation);

    /// Overrides the height the element occupies in its parent's layout.
    fn set_layout_height(&self, height: f32);

    /// Asks the parent container not to steal the rest of this gesture, e.g.
    /// to stop a scrolling list from intercepting a horizontal drag.
    fn request_disallow_intercept_touch_event(&self, disallow: bool);

    /// The element's own default touch handling. The recognizer sends a
    /// synthesized cancel through here once a swipe starts so pressed or
    /// click state is cleared.
    fn on_touch_event(&self, event: &PointerEvent) -> bool;
}
