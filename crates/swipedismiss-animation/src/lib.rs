//! Animation system for swipe-dismiss
//!
//! [`AnimationDriver`] is the seam between the gesture recognizer and
//! whatever actually moves pixels. [`FrameClockAnimator`] is the stock
//! implementation on top of the frame runtime.

mod animation;
mod driver;
mod frame_animator;

pub use animation::{AnimationSpec, Easing, Lerp};
pub use driver::{AnimationDriver, AnimationHandle, EndCallback, FrameCallback};
pub use frame_animator::FrameClockAnimator;

pub mod prelude {
    pub use crate::animation::{AnimationSpec, Easing};
    pub use crate::driver::{AnimationDriver, AnimationHandle};
    pub use crate::frame_animator::FrameClockAnimator;
}
