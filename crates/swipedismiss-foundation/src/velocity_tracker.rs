//! Velocity estimation for fling detection.
//!
//! Impulse strategy: the velocity is derived from the kinetic energy the
//! pointer imparted over its recent samples, which is less jumpy than a
//! least-squares fit on short touch gestures.

use crate::input::PointerEvent;

/// Ring buffer size for velocity tracking samples.
const HISTORY_SIZE: usize = 20;

/// Only use samples within the last 100ms for velocity calculation.
const HORIZON_MS: i64 = 100;

/// If no movement for this duration, assume the pointer has stopped.
pub const ASSUME_STOPPED_MS: i64 = 40;

#[derive(Clone, Copy, Default, Debug)]
struct DataPointAtTime {
    time_ms: i64,
    data_point: f32,
}

/// Velocity along one axis from absolute positions.
///
/// ```
/// use swipedismiss_foundation::VelocityTracker1D;
///
/// let mut tracker = VelocityTracker1D::new();
/// tracker.add_data_point(0, 0.0);
/// tracker.add_data_point(10, 20.0);
/// tracker.add_data_point(20, 40.0);
/// assert!((tracker.calculate_velocity() - 2000.0).abs() < 1.0);
/// ```
#[derive(Clone, Debug)]
pub struct VelocityTracker1D {
    samples: [Option<DataPointAtTime>; HISTORY_SIZE],
    index: usize,
}

impl Default for VelocityTracker1D {
    fn default() -> Self {
        Self::new()
    }
}

impl VelocityTracker1D {
    pub fn new() -> Self {
        Self {
            samples: [None; HISTORY_SIZE],
            index: 0,
        }
    }

    /// Adds a position sampled at `time_ms`.
    pub fn add_data_point(&mut self, time_ms: i64, data_point: f32) {
        self.index = (self.index + 1) % HISTORY_SIZE;
        self.samples[self.index] = Some(DataPointAtTime {
            time_ms,
            data_point,
        });
    }

    /// Velocity in units per second.
    pub fn calculate_velocity(&self) -> f32 {
        self.calculate_velocity_per(1000.0)
    }

    /// Velocity in units per `time_base_ms` milliseconds. Returns 0.0 with
    /// fewer than two usable samples.
    pub fn calculate_velocity_per(&self, time_base_ms: f32) -> f32 {
        let mut data_points = [0.0f32; HISTORY_SIZE];
        let mut times = [0.0f32; HISTORY_SIZE];
        let mut sample_count = 0;

        let Some(newest_sample) = self.samples[self.index] else {
            return 0.0;
        };

        let mut current_index = self.index;
        let mut previous_time = newest_sample.time_ms;

        while let Some(sample) = self.samples[current_index] {
            let age = newest_sample.time_ms - sample.time_ms;
            let gap = (previous_time - sample.time_ms).abs();
            if age > HORIZON_MS || gap > ASSUME_STOPPED_MS {
                break;
            }
            previous_time = sample.time_ms;

            data_points[sample_count] = sample.data_point;
            times[sample_count] = -(age as f32);
            sample_count += 1;
            if sample_count >= HISTORY_SIZE {
                break;
            }

            current_index = if current_index == 0 {
                HISTORY_SIZE - 1
            } else {
                current_index - 1
            };
        }

        if sample_count < 2 {
            return 0.0;
        }

        calculate_impulse_velocity(&data_points[..sample_count], &times[..sample_count])
            * time_base_ms
    }

    /// Velocity in units per `time_base_ms`, clamped to `±max_velocity`.
    pub fn calculate_velocity_with_max(&self, time_base_ms: f32, max_velocity: f32) -> f32 {
        if !max_velocity.is_finite() || max_velocity <= 0.0 {
            return 0.0;
        }
        let velocity = self.calculate_velocity_per(time_base_ms);
        if velocity == 0.0 || velocity.is_nan() {
            return 0.0;
        }
        velocity.clamp(-max_velocity, max_velocity)
    }

    pub fn reset(&mut self) {
        self.samples = [None; HISTORY_SIZE];
        self.index = 0;
    }
}

/// Samples are ordered newest first; `times` are non-positive ages.
fn calculate_impulse_velocity(data_points: &[f32], times: &[f32]) -> f32 {
    let start = data_points.len() - 1;
    let mut work = 0.0f32;
    let mut next_time = times[start];

    for i in (1..=start).rev() {
        let current_time = next_time;
        next_time = times[i - 1];
        if current_time == next_time {
            continue;
        }

        let v_curr = (data_points[i] - data_points[i - 1]) / (current_time - next_time);
        let v_prev = kinetic_energy_to_velocity(work);
        work += (v_curr - v_prev) * v_curr.abs();
        if i == start {
            work *= 0.5;
        }
    }

    kinetic_energy_to_velocity(work)
}

/// E = 0.5 * m * v^2 with m = 1.
#[inline]
fn kinetic_energy_to_velocity(kinetic_energy: f32) -> f32 {
    kinetic_energy.signum() * (2.0 * kinetic_energy.abs()).sqrt()
}

/// Velocity of a pointer in both axes.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Velocity {
    pub x: f32,
    pub y: f32,
}

impl Velocity {
    pub const ZERO: Velocity = Velocity { x: 0.0, y: 0.0 };
}

/// Two-axis tracker fed with pointer events.
#[derive(Clone, Debug, Default)]
pub struct VelocityTracker {
    x: VelocityTracker1D,
    y: VelocityTracker1D,
    samples: usize,
}

impl VelocityTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the event's local position at its timestamp.
    pub fn add_movement(&mut self, event: &PointerEvent) {
        self.x
            .add_data_point(event.uptime_millis, event.position.x);
        self.y
            .add_data_point(event.uptime_millis, event.position.y);
        self.samples += 1;
    }

    /// Number of events fed since creation or the last reset.
    pub fn sample_count(&self) -> usize {
        self.samples
    }

    /// Velocity in pixels per `time_base_ms`, each axis clamped to
    /// `±max_velocity`.
    pub fn compute_current_velocity(&self, time_base_ms: f32, max_velocity: f32) -> Velocity {
        Velocity {
            x: self.x.calculate_velocity_with_max(time_base_ms, max_velocity),
            y: self.y.calculate_velocity_with_max(time_base_ms, max_velocity),
        }
    }

    pub fn reset(&mut self) {
        self.x.reset();
        self.y.reset();
        self.samples = 0;
    }
}
