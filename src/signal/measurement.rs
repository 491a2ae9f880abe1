use serde::{Deserialize, Serialize};

use crate::kinematics::Pose;

/// A signal sample taken by the vehicle.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Measurement {
    pub pose: Pose,
    pub strength: f64,
    pub bearing: f64,   // deg, relative to the observer's yaw
    pub timestamp: f64, // elapsed simulation time
}
