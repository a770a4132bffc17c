//! Frame runtime for the swipe-dismiss crates.
//!
//! Everything here runs on the UI thread. Hosts call
//! [`Runtime::drain_frame_callbacks`] once per display frame; animations
//! register a callback for the next frame through a [`FrameClock`].

mod frame_clock;
pub mod platform;
mod runtime;

pub use frame_clock::{FrameCallbackRegistration, FrameClock};
pub use platform::RuntimeScheduler;
pub use runtime::{DefaultScheduler, Runtime, RuntimeHandle};

pub type FrameCallbackId = u64;

pub mod prelude {
    pub use crate::frame_clock::{FrameCallbackRegistration, FrameClock};
    pub use crate::runtime::{DefaultScheduler, Runtime, RuntimeHandle};
}
