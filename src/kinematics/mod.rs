pub mod pose;
pub mod limits;

pub use pose::{Pose, PoseDelta, DEFAULT_POSE_TOLERANCE};
pub use limits::{clamp_norm, seek, MotionLimits};
