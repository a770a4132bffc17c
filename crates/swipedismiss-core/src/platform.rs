//! Platform abstraction traits for runtime services.
//!
//! The runtime never decides on its own when a frame happens. It tells the
//! host through [`RuntimeScheduler`] and waits for the host to drain frame
//! callbacks.

/// Schedules work for the runtime.
///
/// Implementations are responsible for triggering frame processing, for
/// example by requesting a redraw from the windowing system.
pub trait RuntimeScheduler {
    /// Request that the host schedule a new frame.
    fn schedule_frame(&self);
}
