use std::io;

use crate::kinematics::Pose;

/// Errors raised by simulation setup, stepping and run output.
///
/// Constraint violations during motion are not errors; see
/// [`MoveOutcome`](crate::vehicle::MoveOutcome).
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    #[error("Invalid {name}: {value}. Must be positive and finite")]
    InvalidParameter { name: &'static str, value: f64 },

    #[error("Start pose {0} is below the ground or the slope")]
    InvalidStart(Pose),

    #[error("Step budget exhausted after {steps} steps with {remaining} waypoints left")]
    StepBudgetExhausted { steps: usize, remaining: usize },

    #[error("Unknown run id: {0}")]
    UnknownRun(u64),

    #[error("Scenario parse failed: {0}")]
    Scenario(#[from] toml::de::Error),

    #[error("JSON encode/decode failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O failed: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, SimError>;

/// Reject zero, negative and non-finite values for a named parameter.
pub(crate) fn ensure_positive(name: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(SimError::InvalidParameter { name, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_values_pass_through() {
        assert_eq!(ensure_positive("dt", 0.05).unwrap(), 0.05);
    }

    #[test]
    fn zero_nan_and_negative_rejected() {
        for v in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let err = ensure_positive("speed limit", v).unwrap_err();
            assert!(matches!(err, SimError::InvalidParameter { name: "speed limit", .. }));
        }
    }
}
