//! Positions of the monorail pod and the car on their closed loop.
//!
//! Owned exclusively by the frame loop; it never reads simulation state.

use std::f64::consts::TAU;

/// Seconds for one full lap at default speed.
const POD_LAP_SECONDS: f64 = 12.0;
/// The car runs the inner lane, a little slower than the pod.
const CAR_SPEED_RATIO: f64 = 0.8;
const CAR_PHASE_OFFSET: f64 = 0.5;

/// Point in normalized scene coordinates, both axes in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScenePoint {
    pub x: f64,
    pub y: f64,
}

/// Elliptical loop centred in the scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackLoop {
    pub radius_x: f64,
    pub radius_y: f64,
}

impl TrackLoop {
    /// `phase` in laps; only the fractional part matters.
    pub fn point_at(&self, phase: f64) -> ScenePoint {
        let angle = phase.rem_euclid(1.0) * TAU;
        ScenePoint { x: 0.5 + self.radius_x * angle.cos(), y: 0.5 + self.radius_y * angle.sin() }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrackAnimator {
    pub outer: TrackLoop,
    pub inner: TrackLoop,
    pod_phase: f64,
    car_phase: f64,
    last_timestamp: Option<f64>,
}

impl Default for TrackAnimator {
    fn default() -> Self {
        Self::new()
    }
}

impl TrackAnimator {
    pub fn new() -> Self {
        Self {
            outer: TrackLoop { radius_x: 0.42, radius_y: 0.32 },
            inner: TrackLoop { radius_x: 0.34, radius_y: 0.24 },
            pod_phase: 0.0,
            car_phase: CAR_PHASE_OFFSET,
            last_timestamp: None,
        }
    }

    /// Advance to the frame timestamp (milliseconds, as given by `requestAnimationFrame`).
    /// The first frame only records the clock.
    pub fn advance_to(&mut self, timestamp_ms: f64) {
        if let Some(last) = self.last_timestamp {
            let elapsed = (timestamp_ms - last).max(0.0);
            self.advance_by(elapsed);
        }
        self.last_timestamp = Some(timestamp_ms);
    }

    pub fn advance_by(&mut self, elapsed_ms: f64) {
        if !elapsed_ms.is_finite() || elapsed_ms <= 0.0 {
            return;
        }
        let laps = elapsed_ms / 1000.0 / POD_LAP_SECONDS;
        self.pod_phase = (self.pod_phase + laps).rem_euclid(1.0);
        self.car_phase = (self.car_phase + laps * CAR_SPEED_RATIO).rem_euclid(1.0);
    }

    pub fn pod_phase(&self) -> f64 {
        self.pod_phase
    }

    pub fn pod_position(&self) -> ScenePoint {
        self.outer.point_at(self.pod_phase)
    }

    pub fn car_position(&self) -> ScenePoint {
        self.inner.point_at(self.car_phase)
    }
}
