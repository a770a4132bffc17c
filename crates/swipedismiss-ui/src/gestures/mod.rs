pub mod decision;
pub mod swipe_dismiss;

pub use decision::{decide, Calibration, DismissDirection, ReleaseSample, SwipeDecision};
pub use swipe_dismiss::{GesturePhase, SwipeDismissTouchListener};
