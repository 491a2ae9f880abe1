use std::f64::consts::PI;

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Signal strength models
// ---------------------------------------------------------------------------

/// How a transmitter's signal strength is evaluated at an observer.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SignalModel {
    /// Strength is the straight-line distance to the transmitter. A proxy,
    /// not a calibrated attenuation model: it grows with range.
    #[default]
    Distance,
    /// Field magnitude of a vertical magnetic dipole (loop antenna).
    Dipole { moment: f64 },
}

impl SignalModel {
    /// Strength at `offset` (observer minus transmitter position).
    pub fn strength(&self, offset: &Vector3<f64>) -> f64 {
        match *self {
            SignalModel::Distance => offset.norm(),
            SignalModel::Dipole { moment } => dipole_field(moment, offset),
        }
    }
}

/// |H| of a dipole aligned with +y:
///   Hr = M cos(theta) / (2 pi r^3),  Ht = M sin(theta) / (4 pi r^3)
/// Infinite at the dipole itself.
pub fn dipole_field(moment: f64, offset: &Vector3<f64>) -> f64 {
    let r = offset.norm();
    if r <= 0.0 {
        return f64::INFINITY;
    }
    let horizontal = (offset.x * offset.x + offset.z * offset.z).sqrt();
    let theta = horizontal.atan2(offset.y);
    let r3 = r * r * r;
    let hr = moment * theta.cos() / (2.0 * PI * r3);
    let ht = moment * theta.sin() / (4.0 * PI * r3);
    (hr * hr + ht * ht).sqrt()
}
