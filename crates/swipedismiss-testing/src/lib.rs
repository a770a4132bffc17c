//! Testing utilities and harness for swipe-dismiss

pub mod animator;
pub mod element;
pub mod robot;
pub mod robot_assertions;

pub use animator::{AnimationRequest, AnimationTarget, RecordingAnimator};
pub use element::FakeElement;
pub use robot::GestureRobot;
pub use robot_assertions::{assert_approx_eq, assert_presentation_approx_eq};

pub mod prelude {
    pub use crate::animator::{AnimationRequest, AnimationTarget, RecordingAnimator};
    pub use crate::element::FakeElement;
    pub use crate::robot::GestureRobot;
    pub use crate::robot_assertions::*;
}
