use std::fmt;

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// Per-field tolerance used when no explicit threshold is given.
pub const DEFAULT_POSE_TOLERANCE: f64 = 1e-5;

// ---------------------------------------------------------------------------
// Pose: position + orientation at one instant
// ---------------------------------------------------------------------------

/// Six-degree-of-freedom pose.
///
/// Position is in world units with `y` up; orientation angles are degrees.
/// A pose never changes after construction: motion produces a new pose via
/// [`Pose::apply_delta`]. Serialized as `[x, y, z, pitch, yaw, roll]`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(from = "[f64; 6]", into = "[f64; 6]")]
pub struct Pose {
    x: f64,
    y: f64,
    z: f64,
    pitch: f64,
    yaw: f64,
    roll: f64,
}

impl Pose {
    pub const fn new(x: f64, y: f64, z: f64, pitch: f64, yaw: f64, roll: f64) -> Self {
        Self { x, y, z, pitch, yaw, roll }
    }

    /// Pose at a position with level orientation.
    pub const fn at(x: f64, y: f64, z: f64) -> Self {
        Self::new(x, y, z, 0.0, 0.0, 0.0)
    }

    pub fn x(&self) -> f64 { self.x }
    pub fn y(&self) -> f64 { self.y }
    pub fn z(&self) -> f64 { self.z }
    pub fn pitch(&self) -> f64 { self.pitch }
    pub fn yaw(&self) -> f64 { self.yaw }
    pub fn roll(&self) -> f64 { self.roll }

    pub fn position(&self) -> Vector3<f64> {
        Vector3::new(self.x, self.y, self.z)
    }

    /// Orientation as `[pitch, yaw, roll]`, degrees.
    pub fn orientation(&self) -> Vector3<f64> {
        Vector3::new(self.pitch, self.yaw, self.roll)
    }

    /// New pose with every field offset by the matching delta component.
    pub fn apply_delta(&self, d: &PoseDelta) -> Pose {
        Pose {
            x: self.x + d.dx,
            y: self.y + d.dy,
            z: self.z + d.dz,
            pitch: self.pitch + d.dpitch,
            yaw: self.yaw + d.dyaw,
            roll: self.roll + d.droll,
        }
    }

    /// True iff all six absolute field differences are within `threshold`.
    pub fn approx_eq(&self, other: &Pose, threshold: f64) -> bool {
        self.to_array()
            .iter()
            .zip(other.to_array().iter())
            .all(|(a, b)| (a - b).abs() <= threshold)
    }

    pub fn distance_to(&self, other: &Pose) -> f64 {
        (other.position() - self.position()).norm()
    }

    pub fn to_array(&self) -> [f64; 6] {
        [self.x, self.y, self.z, self.pitch, self.yaw, self.roll]
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::at(0.0, 0.0, 0.0)
    }
}

impl From<[f64; 6]> for Pose {
    fn from(v: [f64; 6]) -> Self {
        Self::new(v[0], v[1], v[2], v[3], v[4], v[5])
    }
}

impl From<Pose> for [f64; 6] {
    fn from(p: Pose) -> Self {
        p.to_array()
    }
}

impl fmt::Display for Pose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "(x:{:.3}, y:{:.3}, z:{:.3}, p:{:.2}, yw:{:.2}, r:{:.2})",
            self.x, self.y, self.z, self.pitch, self.yaw, self.roll
        )
    }
}

// ---------------------------------------------------------------------------
// PoseDelta: additive change, all components default to zero
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default)]
pub struct PoseDelta {
    pub dx: f64,
    pub dy: f64,
    pub dz: f64,
    pub dpitch: f64,
    pub dyaw: f64,
    pub droll: f64,
}

impl PoseDelta {
    pub const fn new(dx: f64, dy: f64, dz: f64, dpitch: f64, dyaw: f64, droll: f64) -> Self {
        Self { dx, dy, dz, dpitch, dyaw, droll }
    }

    pub fn from_parts(linear: Vector3<f64>, angular: Vector3<f64>) -> Self {
        Self::new(linear.x, linear.y, linear.z, angular.x, angular.y, angular.z)
    }

    pub fn translation(dx: f64, dy: f64, dz: f64) -> Self {
        Self { dx, dy, dz, ..Self::default() }
    }

    pub fn rotation(dpitch: f64, dyaw: f64, droll: f64) -> Self {
        Self { dpitch, dyaw, droll, ..Self::default() }
    }

    pub fn linear(&self) -> Vector3<f64> {
        Vector3::new(self.dx, self.dy, self.dz)
    }

    pub fn angular(&self) -> Vector3<f64> {
        Vector3::new(self.dpitch, self.dyaw, self.droll)
    }
}
