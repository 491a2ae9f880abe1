use serde::{Deserialize, Serialize};

/// Fraction of one step's travel used as the default arrival tolerance.
pub const ARRIVAL_FRACTION: f64 = 0.5;

// ---------------------------------------------------------------------------
// Stepping configuration
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimConfig {
    pub dt: f64,
    /// Position tolerance for reaching a waypoint. Defaults to
    /// `ARRIVAL_FRACTION * speed_limit * dt`.
    pub arrival_tolerance: Option<f64>,
    /// Orientation tolerance (deg). Defaults to
    /// `ARRIVAL_FRACTION * angular_rate_limit * dt`.
    pub angular_tolerance: Option<f64>,
    /// Consecutive rejected moves after which a waypoint is abandoned.
    pub stall_limit: u32,
    /// Hard ceiling on seek iterations for one `follow_path` call.
    pub max_steps: usize,
}

impl SimConfig {
    pub fn with_dt(dt: f64) -> Self {
        Self { dt, ..Self::default() }
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            dt: 0.05,              // 20 Hz
            arrival_tolerance: None,
            angular_tolerance: None,
            stall_limit: 1,        // motion is deterministic, a retry repeats the same move
            max_steps: 1_000_000,
        }
    }
}
