//! Platform calibration for touch gestures.
//!
//! Values are in logical pixels at density 1.0 and match Android's
//! `ViewConfiguration` defaults. Hosts with a known display density should
//! build their configuration with [`ViewConfiguration::for_density`].

use std::fmt;

/// Distance a pointer may travel before a press turns into a drag.
///
/// Android uses ~8dp for ViewConfiguration.TOUCH_SLOP.
pub const TOUCH_SLOP: f32 = 8.0;

/// Minimum velocity, in pixels per second, for a release to count as a fling.
pub const MIN_FLING_VELOCITY: f32 = 50.0;

/// Maximum fling velocity in pixels per second.
pub const MAX_FLING_VELOCITY: f32 = 8_000.0;

/// Duration of short UI animations (Android's `config_shortAnimTime`).
pub const SHORT_ANIMATION_MILLIS: u64 = 200;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewConfiguration {
    pub touch_slop: f32,
    pub minimum_fling_velocity: f32,
    pub maximum_fling_velocity: f32,
    pub short_animation_millis: u64,
}

impl Default for ViewConfiguration {
    fn default() -> Self {
        Self {
            touch_slop: TOUCH_SLOP,
            minimum_fling_velocity: MIN_FLING_VELOCITY,
            maximum_fling_velocity: MAX_FLING_VELOCITY,
            short_animation_millis: SHORT_ANIMATION_MILLIS,
        }
    }
}

impl ViewConfiguration {
    /// Defaults scaled to a display with `density` physical pixels per
    /// logical pixel.
    pub fn for_density(density: f32) -> Result<Self, ConfigError> {
        if !density.is_finite() || density <= 0.0 {
            return Err(ConfigError::InvalidDensity { density });
        }
        let defaults = Self::default();
        let scaled = Self {
            touch_slop: defaults.touch_slop * density,
            minimum_fling_velocity: defaults.minimum_fling_velocity * density,
            maximum_fling_velocity: defaults.maximum_fling_velocity * density,
            short_animation_millis: defaults.short_animation_millis,
        };
        log::debug!("view configuration for density {density}: {scaled:?}");
        Ok(scaled)
    }

    pub fn with_touch_slop(mut self, touch_slop: f32) -> Self {
        self.touch_slop = touch_slop;
        self
    }

    pub fn with_fling_velocities(mut self, minimum: f32, maximum: f32) -> Self {
        self.minimum_fling_velocity = minimum;
        self.maximum_fling_velocity = maximum;
        self
    }

    pub fn with_short_animation_millis(mut self, millis: u64) -> Self {
        self.short_animation_millis = millis;
        self
    }

    /// Checks that every value is usable for gesture thresholds.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_non_negative("touch_slop", self.touch_slop)?;
        check_non_negative("minimum_fling_velocity", self.minimum_fling_velocity)?;
        check_non_negative("maximum_fling_velocity", self.maximum_fling_velocity)?;
        if self.minimum_fling_velocity > self.maximum_fling_velocity {
            return Err(ConfigError::FlingRange {
                minimum: self.minimum_fling_velocity,
                maximum: self.maximum_fling_velocity,
            });
        }
        Ok(())
    }
}

fn check_non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue { field, value })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    InvalidDensity { density: f32 },
    InvalidValue { field: &'static str, value: f32 },
    FlingRange { minimum: f32, maximum: f32 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidDensity { density } => {
                write!(f, "display density must be positive and finite, got {density}")
            }
            ConfigError::InvalidValue { field, value } => {
                write!(f, "{field} must be finite and non-negative, got {value}")
            }
            ConfigError::FlingRange { minimum, maximum } => write!(
                f,
                "minimum fling velocity {minimum} exceeds maximum {maximum}"
            ),
        }
    }
}

impl std::error::Error for ConfigError {}
