//! Swipe-to-dismiss for any host UI.
//!
//! Bind a [`SwipeDismissTouchListener`] to an element implementing
//! [`DismissableElement`], feed it the element's pointer events, and it will
//! drag, fade, slide out and collapse the element when the user swipes it
//! away horizontally.

mod element;
pub mod gestures;

pub use element::DismissableElement;
pub use gestures::decision::{decide, Calibration, DismissDirection, ReleaseSample, SwipeDecision};
pub use gestures::swipe_dismiss::{
    DismissCallback, GesturePhase, SwipeDismissTouchListener, COLLAPSED_HEIGHT,
};

pub mod prelude {
    pub use crate::element::DismissableElement;
    pub use crate::gestures::decision::{DismissDirection, SwipeDecision};
    pub use crate::gestures::swipe_dismiss::{GesturePhase, SwipeDismissTouchListener};
    pub use swipedismiss_foundation::prelude::*;
}
