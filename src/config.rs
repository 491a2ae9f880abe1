//! Scenario files: everything needed to set up and run one search.
//!
//! Scenarios are TOML. Every section is optional and falls back to the
//! reference 35 deg slope run. Poses are written as
//! `[x, y, z, pitch, yaw, roll]`.
//!
//! ```toml
//! description = "Sweep"
//!
//! [vehicle]
//! start = [0.0, 5.0, -90.0, 0.0, 0.0, 0.0]
//! speed_limit = 10.0
//! angular_rate_limit = 30.0
//! antenna_range = 60.0
//!
//! [path]
//! pattern = "lawnmower"
//! spacing = 20.0
//! clearance = 3.0
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::kinematics::{MotionLimits, Pose};
use crate::signal::{Transmitter, TransmitterBuilder};
use crate::sim::config::SimConfig;
use crate::terrain::Slope;
use crate::vehicle::{presets, WaypointPath};

// ---------------------------------------------------------------------------
// Top-level scenario
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    #[serde(default = "default_description")]
    pub description: String,
    #[serde(default)]
    pub vehicle: VehicleConfig,
    #[serde(default)]
    pub slope: SlopeConfig,
    #[serde(default = "default_transmitter")]
    pub transmitter: Option<Transmitter>,
    #[serde(default)]
    pub path: PathConfig,
    #[serde(default)]
    pub sim: SimConfig,
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            description: default_description(),
            vehicle: VehicleConfig::default(),
            slope: SlopeConfig::default(),
            transmitter: default_transmitter(),
            path: PathConfig::default(),
            sim: SimConfig::default(),
        }
    }
}

impl Scenario {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading scenario");
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn limits(&self) -> Result<MotionLimits> {
        MotionLimits::new(self.vehicle.speed_limit, self.vehicle.angular_rate_limit)
    }

    /// Slope with the scenario's transmitter buried in it.
    pub fn build_slope(&self) -> Result<Slope> {
        Slope::new(
            self.slope.width,
            self.slope.height,
            self.slope.angle,
            self.transmitter.clone(),
        )
    }

    pub fn build_path(&self, slope: &Slope) -> Result<WaypointPath> {
        match &self.path {
            PathConfig::Waypoints { waypoints } => Ok(WaypointPath::new(waypoints.clone())),
            PathConfig::Lawnmower { spacing, clearance } => {
                presets::lawnmower(slope, *spacing, *clearance)
            }
        }
    }
}

fn default_description() -> String {
    "Simulation of drone movement on a 35-degree slope.".into()
}

fn default_transmitter() -> Option<Transmitter> {
    Some(TransmitterBuilder::new("Transmitter", Pose::default()).build())
}

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VehicleConfig {
    pub start: Pose,
    pub speed_limit: f64,
    pub angular_rate_limit: f64,
    pub antenna_range: Option<f64>,
}

impl Default for VehicleConfig {
    fn default() -> Self {
        Self {
            start: Pose::at(0.0, 0.0, 5.0),
            speed_limit: 10.0,
            angular_rate_limit: 30.0,
            antenna_range: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SlopeConfig {
    pub width: f64,
    pub height: f64,
    pub angle: f64, // deg
}

impl Default for SlopeConfig {
    fn default() -> Self {
        Self { width: 100.0, height: 200.0, angle: 35.0 }
    }
}

/// Where the waypoints come from.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "pattern", rename_all = "snake_case")]
pub enum PathConfig {
    Waypoints { waypoints: Vec<Pose> },
    Lawnmower { spacing: f64, clearance: f64 },
}

impl Default for PathConfig {
    fn default() -> Self {
        PathConfig::Waypoints { waypoints: presets::slope_survey().waypoints().to_vec() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SimError;

    #[test]
    fn empty_file_gives_reference_scenario() {
        let s = Scenario::from_toml_str("").unwrap();
        assert_eq!(s.slope.angle, 35.0);
        assert_eq!(s.vehicle.speed_limit, 10.0);
        assert!(s.vehicle.start.approx_eq(&Pose::at(0.0, 0.0, 5.0), 0.0));
        assert_eq!(s.sim.dt, 0.05);
        let slope = s.build_slope().unwrap();
        assert!(slope.transmitter().is_some());
        assert_eq!(s.build_path(&slope).unwrap().len(), 4);
    }

    #[test]
    fn parses_full_scenario() {
        let s = Scenario::from_toml_str(
            r#"
            description = "Sweep"

            [vehicle]
            start = [0.0, 5.0, -90.0, 0.0, 0.0, 0.0]
            speed_limit = 8.0
            antenna_range = 60.0

            [slope]
            angle = 20.0

            [transmitter]
            pose = [10.0, -1.0, 30.0, 0.0, 0.0, 0.0]
            name = "Victim"

            [path]
            pattern = "lawnmower"
            spacing = 20.0
            clearance = 3.0

            [sim]
            dt = 0.1
            stall_limit = 2
            "#,
        )
        .unwrap();

        assert_eq!(s.description, "Sweep");
        assert_eq!(s.vehicle.angular_rate_limit, 30.0);
        assert_eq!(s.vehicle.antenna_range, Some(60.0));
        assert_eq!(s.slope.width, 100.0);
        assert_eq!(s.sim.stall_limit, 2);
        assert_eq!(s.transmitter.as_ref().unwrap().name(), "Victim");
        let slope = s.build_slope().unwrap();
        assert_eq!(s.build_path(&slope).unwrap().len(), 12);
    }

    #[test]
    fn explicit_waypoints() {
        let s = Scenario::from_toml_str(
            r#"
            [path]
            pattern = "waypoints"
            waypoints = [[0.0, 1.0, 2.0, 0.0, 0.0, 0.0], [3.0, 4.0, 5.0, 0.0, 10.0, 0.0]]
            "#,
        )
        .unwrap();
        let slope = s.build_slope().unwrap();
        let p = s.build_path(&slope).unwrap();
        assert_eq!(p.len(), 2);
        assert_eq!(p.waypoints()[1].yaw(), 10.0);
    }

    #[test]
    fn bundled_sweep_scenario_parses() {
        let s = Scenario::from_toml_str(include_str!("../scenarios/sweep.toml")).unwrap();
        let tx = s.transmitter.as_ref().unwrap();
        assert!(matches!(tx.model(), crate::signal::SignalModel::Dipole { .. }));
        let slope = s.build_slope().unwrap();
        assert!(!slope.is_above(tx.pose()), "beacon should be buried");
        assert_eq!(s.build_path(&slope).unwrap().len(), 12);
    }

    #[test]
    fn unknown_fields_rejected() {
        let err = Scenario::from_toml_str("[vehicle]\nmax_speed = 3.0\n").unwrap_err();
        assert!(matches!(err, SimError::Scenario(_)));
    }

    #[test]
    fn invalid_limits_surface_as_errors() {
        let s = Scenario::from_toml_str("[vehicle]\nspeed_limit = 0.0\n").unwrap();
        assert!(s.limits().is_err());
    }
}
