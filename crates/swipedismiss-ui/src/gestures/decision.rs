//! Release policy: does a finished swipe dismiss the element?

use swipedismiss_animation::{AnimationSpec, Easing};
use swipedismiss_foundation::{Velocity, ViewConfiguration};

/// Multiplier applied to the platform's minimum fling velocity. A plain
/// platform fling is far too easy to trigger by accident on a list item.
pub const FLING_VELOCITY_MULTIPLIER: f32 = 16.0;

/// Time base, in milliseconds, for velocities compared against the
/// calibration.
pub const VELOCITY_TIME_BASE_MS: f32 = 1000.0;

/// Thresholds derived once from the host's [`ViewConfiguration`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Calibration {
    pub touch_slop: f32,
    pub min_fling_velocity: f32,
    pub max_fling_velocity: f32,
    pub animation_millis: u64,
}

impl Calibration {
    pub fn from_configuration(config: &ViewConfiguration) -> Self {
        Self {
            touch_slop: config.touch_slop,
            min_fling_velocity: config.minimum_fling_velocity * FLING_VELOCITY_MULTIPLIER,
            max_fling_velocity: config.maximum_fling_velocity,
            animation_millis: config.short_animation_millis,
        }
    }

    /// Tween used for every animation the recognizer starts.
    pub fn animation_spec(&self) -> AnimationSpec {
        AnimationSpec::tween(self.animation_millis, Easing::EaseInOut)
    }
}

impl Default for Calibration {
    fn default() -> Self {
        Self::from_configuration(&ViewConfiguration::default())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DismissDirection {
    Left,
    Right,
}

impl DismissDirection {
    /// `Right` for positive values, `Left` otherwise.
    pub fn from_sign(value: f32) -> Self {
        if value > 0.0 {
            DismissDirection::Right
        } else {
            DismissDirection::Left
        }
    }

    pub fn sign(self) -> f32 {
        match self {
            DismissDirection::Left => -1.0,
            DismissDirection::Right => 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeDecision {
    /// Slide the element out in the given direction.
    Dismiss(DismissDirection),
    /// The element was dragged but not far or fast enough; return it.
    SnapBack,
    /// The pointer never crossed the slop; nothing moved.
    Ignore,
}

/// What the recognizer knows about a gesture at release time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReleaseSample {
    /// Screen-space horizontal travel since the press.
    pub delta_x: f32,
    pub velocity: Velocity,
    pub swiping: bool,
}

/// Decides the outcome of a released gesture.
///
/// Travel past half the viewport always dismisses in the direction of
/// travel. Otherwise a mostly-horizontal fling inside the calibrated
/// velocity range dismisses, but only when it points the same way as the
/// drag.
pub fn decide(sample: ReleaseSample, viewport_width: f32, calibration: &Calibration) -> SwipeDecision {
    if !sample.swiping {
        return SwipeDecision::Ignore;
    }

    if sample.delta_x.abs() > viewport_width / 2.0 {
        return SwipeDecision::Dismiss(DismissDirection::from_sign(sample.delta_x));
    }

    let abs_velocity_x = sample.velocity.x.abs();
    let abs_velocity_y = sample.velocity.y.abs();
    let is_fling = calibration.min_fling_velocity <= abs_velocity_x
        && abs_velocity_x <= calibration.max_fling_velocity
        && abs_velocity_y < abs_velocity_x;

    if is_fling && (sample.velocity.x < 0.0) == (sample.delta_x < 0.0) {
        SwipeDecision::Dismiss(DismissDirection::from_sign(sample.velocity.x))
    } else {
        SwipeDecision::SnapBack
    }
}
