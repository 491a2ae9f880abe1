use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::kinematics::Pose;
use crate::sim::RunOutput;

/// Summary statistics computed from a finished run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub description: String,
    pub start: Pose,
    pub beacon: Option<Pose>,
    pub final_pose: Pose,
    /// Entries in the pose history, start included.
    pub steps: usize,
    pub flight_time: f64,
    pub path_length: f64,
    /// Smallest distance between any visited pose and the beacon.
    pub closest_approach: Option<f64>,
    pub samples: usize,
    pub waypoints_reached: usize,
    pub waypoints_abandoned: usize,
}

impl RunSummary {
    /// Compute summary from run output.
    pub fn from_run(description: impl Into<String>, run: &RunOutput) -> Self {
        let path_length = run
            .pose_history
            .windows(2)
            .map(|w| w[0].0.distance_to(&w[1].0))
            .sum();

        let closest_approach = run.beacon.map(|b| {
            run.pose_history
                .iter()
                .map(|(p, _)| p.distance_to(&b))
                .fold(f64::INFINITY, f64::min)
        });

        RunSummary {
            description: description.into(),
            start: run.start,
            beacon: run.beacon,
            final_pose: run.final_pose,
            steps: run.pose_history.len(),
            flight_time: run.pose_history.last().map_or(0.0, |(_, t)| *t),
            path_length,
            closest_approach,
            samples: run.measurements.len(),
            waypoints_reached: run.report.reached.len(),
            waypoints_abandoned: run.report.abandoned.len(),
        }
    }
}

/// Write run summary as pretty JSON to a writer.
pub fn write_summary<W: Write>(writer: &mut W, summary: &RunSummary) -> Result<()> {
    serde_json::to_writer_pretty(&mut *writer, summary)?;
    writeln!(writer)?;
    Ok(())
}

/// Write run summary JSON to a file.
pub fn write_summary_file(path: impl AsRef<Path>, summary: &RunSummary) -> Result<()> {
    let mut file = std::fs::File::create(path)?;
    write_summary(&mut file, summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vehicle::PathReport;
    use approx::assert_relative_eq;

    fn simple_run() -> RunOutput {
        RunOutput {
            start: Pose::at(0.0, 0.0, 0.0),
            beacon: Some(Pose::at(3.0, -4.0, 0.0)),
            pose_history: vec![
                (Pose::at(0.0, 0.0, 0.0), 0.0),
                (Pose::at(3.0, 0.0, 0.0), 1.0),
                (Pose::at(3.0, 4.0, 0.0), 2.0),
            ],
            measurements: vec![],
            final_pose: Pose::at(3.0, 4.0, 0.0),
            report: PathReport { reached: vec![0, 1], abandoned: vec![2], ..Default::default() },
            events: vec![],
        }
    }

    #[test]
    fn summary_computes_path_and_approach() {
        let s = RunSummary::from_run("Test", &simple_run());
        assert_eq!(s.steps, 3);
        assert_relative_eq!(s.path_length, 7.0);
        assert_relative_eq!(s.flight_time, 2.0);
        assert_relative_eq!(s.closest_approach.unwrap(), 4.0);
        assert_eq!(s.waypoints_reached, 2);
        assert_eq!(s.waypoints_abandoned, 1);
    }

    #[test]
    fn json_output_is_valid() {
        let summary = RunSummary::from_run("Test", &simple_run());

        let mut buf = Vec::new();
        write_summary(&mut buf, &summary).unwrap();
        let json = String::from_utf8(buf).unwrap();
        assert!(json.contains("\"closest_approach\""));
        assert!(json.contains("\"Test\""));

        let back: RunSummary = serde_json::from_str(&json).unwrap();
        assert!(back.final_pose.approx_eq(&summary.final_pose, 0.0));
    }
}
