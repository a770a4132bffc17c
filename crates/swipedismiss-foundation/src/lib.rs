//! Input plumbing shared by swipe-dismiss gesture recognizers.

pub mod input;
pub mod velocity_tracker;
pub mod view_configuration;

pub use input::{PointerEvent, PointerEventKind, PointerId};
pub use velocity_tracker::{Velocity, VelocityTracker, VelocityTracker1D};
pub use view_configuration::{ConfigError, ViewConfiguration};

pub mod prelude {
    pub use crate::input::{PointerEvent, PointerEventKind};
    pub use crate::velocity_tracker::{Velocity, VelocityTracker};
    pub use crate::view_configuration::ViewConfiguration;
}
