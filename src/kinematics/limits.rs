use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::error::{ensure_positive, Result};

// ---------------------------------------------------------------------------
// Motion limits
// ---------------------------------------------------------------------------

/// Speed and turn-rate ceilings for a vehicle.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MotionLimits {
    pub speed: f64,        // distance per unit time
    pub angular_rate: f64, // degrees per unit time
}

impl MotionLimits {
    pub fn new(speed: f64, angular_rate: f64) -> Result<Self> {
        Ok(Self {
            speed: ensure_positive("speed limit", speed)?,
            angular_rate: ensure_positive("angular rate limit", angular_rate)?,
        })
    }

    /// Largest translation allowed over `dt`.
    pub fn max_distance(&self, dt: f64) -> f64 {
        self.speed * dt
    }

    /// Largest rotation magnitude allowed over `dt`.
    pub fn max_rotation(&self, dt: f64) -> f64 {
        self.angular_rate * dt
    }
}

// ---------------------------------------------------------------------------
// Vector helpers
// ---------------------------------------------------------------------------

/// Rescale `v` to `max_norm` if it is longer, keeping its direction.
/// Returns the vector and whether it was clamped.
///
/// The norm is taken on `v / amax(v)` so huge finite components do not
/// overflow it.
pub fn clamp_norm(v: Vector3<f64>, max_norm: f64) -> (Vector3<f64>, bool) {
    let scale = v.amax();
    if scale == 0.0 {
        return (v, false);
    }
    let unit = v / scale;
    let unit_norm = unit.norm();
    if unit_norm * scale > max_norm {
        (unit * (max_norm / unit_norm), true)
    } else {
        (v, false)
    }
}

/// Step from `from` toward `to` of length at most `max_step`, never
/// overshooting. Coincident points give a zero step.
pub fn seek(from: &Vector3<f64>, to: &Vector3<f64>, max_step: f64) -> Vector3<f64> {
    clamp_norm(to - from, max_step).0
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn limits_must_be_positive() {
        assert!(MotionLimits::new(10.0, 30.0).is_ok());
        assert!(MotionLimits::new(0.0, 30.0).is_err());
        assert!(MotionLimits::new(10.0, -1.0).is_err());
    }

    #[test]
    fn clamp_preserves_direction() {
        let v = Vector3::new(15.0, 20.0, 0.0); // |v| = 25
        let (c, clamped) = clamp_norm(v, 10.0);
        assert!(clamped);
        assert_relative_eq!(c.norm(), 10.0, epsilon = 1e-12);
        assert_relative_eq!(c.normalize(), v.normalize(), epsilon = 1e-12);
    }

    #[test]
    fn clamp_leaves_short_vectors() {
        let v = Vector3::new(1.0, 2.0, 2.0);
        let (c, clamped) = clamp_norm(v, 10.0);
        assert!(!clamped);
        assert_eq!(c, v);
    }

    #[test]
    fn clamp_survives_huge_components() {
        let (c, clamped) = clamp_norm(Vector3::new(1e200, -1e200, 0.0), 10.0);
        assert!(clamped);
        assert_relative_eq!(c.norm(), 10.0, epsilon = 1e-12);
        assert_relative_eq!(c.x, 10.0 / 2.0_f64.sqrt(), epsilon = 1e-12);
        assert_relative_eq!(c.y, -c.x);

        let (c, _) = clamp_norm(Vector3::new(0.0, f64::MAX, f64::MAX), 1.0);
        assert_relative_eq!(c.norm(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn seek_stops_at_target() {
        let from = Vector3::new(0.0, 0.0, 0.0);
        let to = Vector3::new(0.0, 0.0, 0.3);
        assert_relative_eq!(seek(&from, &to, 0.5), to);
        assert_relative_eq!(seek(&from, &to, 0.1).norm(), 0.1, epsilon = 1e-12);
    }

    #[test]
    fn seek_degenerate_is_zero() {
        let p = Vector3::new(4.0, 5.0, 6.0);
        assert_eq!(seek(&p, &p, 1.0), Vector3::zeros());
    }
}
