use nalgebra::Vector3;

use crate::error::{ensure_positive, Result};
use crate::kinematics::Pose;
use crate::signal::Transmitter;

// ---------------------------------------------------------------------------
// Slope: finite inclined plane centred at the origin
// ---------------------------------------------------------------------------

/// Rectangular ramp spanning `width` along x and `height` along z, rising
/// with x at `angle` degrees. Holds at most one buried transmitter.
#[derive(Debug, Clone)]
pub struct Slope {
    width: f64,
    height: f64,
    angle: f64, // deg
    normal: Vector3<f64>,
    transmitter: Option<Transmitter>,
}

impl Slope {
    pub fn new(width: f64, height: f64, angle: f64, transmitter: Option<Transmitter>) -> Result<Self> {
        let width = ensure_positive("slope width", width)?;
        let height = ensure_positive("slope height", height)?;
        let rad = angle.to_radians();
        Ok(Self {
            width,
            height,
            angle,
            normal: Vector3::new(rad.sin(), 0.0, rad.cos()),
            transmitter,
        })
    }

    pub fn width(&self) -> f64 { self.width }
    pub fn height(&self) -> f64 { self.height }
    pub fn angle(&self) -> f64 { self.angle }

    /// Unit normal `(sin a, 0, cos a)`, fixed at construction.
    pub fn normal(&self) -> &Vector3<f64> {
        &self.normal
    }

    pub fn transmitter(&self) -> Option<&Transmitter> {
        self.transmitter.as_ref()
    }

    /// Whether `(x, z)` lies over the slope footprint.
    pub fn contains(&self, x: f64, z: f64) -> bool {
        x.abs() <= self.width / 2.0 && z.abs() <= self.height / 2.0
    }

    /// Surface height at `x`.
    pub fn surface_y(&self, x: f64) -> f64 {
        x * self.angle.to_radians().tan()
    }

    /// True when `pose` is on or above the surface. Points outside the
    /// footprint are unconstrained and always pass.
    pub fn is_above(&self, pose: &Pose) -> bool {
        if !self.contains(pose.x(), pose.z()) {
            return true;
        }
        pose.y() >= self.surface_y(pose.x())
    }
}
