//! Pure math/data for swipe-dismiss geometry
//!
//! Points, sizes and the presentation layer (horizontal translation and
//! alpha) that a dismissable element exposes to the gesture recognizer.

mod geometry;
mod presentation;

pub use geometry::*;
pub use presentation::*;

pub mod prelude {
    pub use crate::geometry::{Point, Rect, Size};
    pub use crate::presentation::Presentation;
}
