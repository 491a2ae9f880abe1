use tracing::info;

use crate::config::Scenario;
use crate::error::Result;
use crate::kinematics::Pose;
use crate::signal::Measurement;
use crate::vehicle::{Drone, PathReport};
use super::event::{detect, ClosestApproachDetector, EventDetector, SimEvent};

// ---------------------------------------------------------------------------
// Run output
// ---------------------------------------------------------------------------

/// Everything a finished run leaves behind.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub start: Pose,
    pub beacon: Option<Pose>,
    pub pose_history: Vec<(Pose, f64)>,
    pub measurements: Vec<Measurement>,
    pub final_pose: Pose,
    pub report: PathReport,
    /// Waypoint events followed by detector events, each in time order.
    pub events: Vec<SimEvent>,
}

// ---------------------------------------------------------------------------
// Full scenario simulation
// ---------------------------------------------------------------------------

/// Build the slope, drone and path from `scenario`, follow the path, then
/// run `detectors` over the sample history.
pub fn simulate_with(
    scenario: &Scenario,
    detectors: &mut [Box<dyn EventDetector>],
) -> Result<RunOutput> {
    let slope = scenario.build_slope()?;
    let path = scenario.build_path(&slope)?;
    let start = scenario.vehicle.start;

    let mut drone = Drone::new(start, scenario.limits()?, &slope)?
        .with_antenna_range(scenario.vehicle.antenna_range);
    drone.add_path(path.waypoints().iter().copied());

    info!(
        description = %scenario.description,
        waypoints = path.len(),
        dt = scenario.sim.dt,
        "starting simulation"
    );
    let report = drone.follow_path_with(&scenario.sim)?;
    info!(
        steps = report.steps,
        accepted = report.accepted,
        rejected = report.rejected,
        reached = report.reached.len(),
        abandoned = report.abandoned.len(),
        "path finished"
    );

    let mut events = report.events.clone();
    events.extend(detect(detectors, drone.measurements()));

    Ok(RunOutput {
        start,
        beacon: slope.transmitter().map(|t| *t.pose()),
        pose_history: drone.pose_history().to_vec(),
        measurements: drone.measurements().to_vec(),
        final_pose: *drone.pose(),
        report,
        events,
    })
}

/// Simulate with a closest-approach detector on the beacon.
pub fn simulate(scenario: &Scenario) -> Result<RunOutput> {
    let mut detectors: Vec<Box<dyn EventDetector>> = Vec::new();
    if let Some(tx) = &scenario.transmitter {
        detectors.push(Box::new(ClosestApproachDetector::new(tx.pose())));
    }
    simulate_with(scenario, &mut detectors)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PathConfig;
    use crate::sim::event::{EventKind, StrengthThresholdDetector};
    use crate::vehicle::presets;
    use approx::assert_relative_eq;

    fn survey_from(start: Pose) -> Scenario {
        let mut s = Scenario::default();
        s.vehicle.start = start;
        s
    }

    #[test]
    fn reference_run_completes() {
        let out = simulate(&Scenario::default()).unwrap();
        assert_eq!(out.pose_history[0].1, 0.0);
        assert!(out.pose_history[0].0.approx_eq(&out.start, 0.0));
        assert_eq!(out.report.reached.len() + out.report.abandoned.len(), 4);
        assert!(out.final_pose.approx_eq(&out.pose_history.last().unwrap().0, 0.0));
    }

    #[test]
    fn final_time_counts_accepted_steps() {
        let out = simulate(&survey_from(Pose::at(0.0, 0.0, 10.0))).unwrap();
        let last_t = out.pose_history.last().unwrap().1;
        assert_relative_eq!(last_t, 0.05 * out.report.accepted as f64, epsilon = 1e-9);
        assert!(out.final_pose.approx_eq(&Pose::new(0.0, 0.0, 20.0, 0.0, 15.0, 0.0), 1e-9));
    }

    #[test]
    fn waypoint_events_recorded_in_order() {
        let out = simulate(&survey_from(Pose::at(0.0, 0.0, 10.0))).unwrap();
        let kinds: Vec<_> = out.events.iter().take(4).map(|e| e.kind.clone()).collect();
        assert_eq!(
            kinds,
            vec![
                EventKind::WaypointReached { index: 0 },
                EventKind::WaypointReached { index: 1 },
                EventKind::WaypointAbandoned { index: 2 },
                EventKind::WaypointAbandoned { index: 3 },
            ]
        );
    }

    #[test]
    fn sweep_passes_over_beacon() {
        let mut s = Scenario::default();
        s.vehicle.start = Pose::at(-50.0, 2.0, -100.0);
        s.path = PathConfig::Lawnmower { spacing: 25.0, clearance: 2.0 };
        let out = simulate(&s).unwrap();
        assert!(out.report.abandoned.is_empty());
        assert!(out
            .events
            .iter()
            .any(|e| matches!(e.kind, EventKind::ClosestApproach { distance } if distance < 3.0)));
    }

    #[test]
    fn custom_detectors_run() {
        let mut s = Scenario::default();
        s.vehicle.start = Pose::at(-50.0, 2.0, -100.0);
        s.path = PathConfig::Waypoints {
            waypoints: presets::lawnmower(&s.build_slope().unwrap(), 50.0, 2.0)
                .unwrap()
                .waypoints()
                .to_vec(),
        };
        let mut dets: Vec<Box<dyn EventDetector>> =
            vec![Box::new(StrengthThresholdDetector::new(20.0, false))];
        let out = simulate_with(&s, &mut dets).unwrap();
        assert!(out
            .events
            .iter()
            .any(|e| matches!(e.kind, EventKind::StrengthCrossed { rising: false, .. })));
    }

    #[test]
    fn antenna_range_limits_samples() {
        let mut s = survey_from(Pose::at(0.0, 0.0, 10.0));
        s.vehicle.antenna_range = Some(15.0);
        let out = simulate(&s).unwrap();
        assert!(!out.measurements.is_empty());
        assert!(out.measurements.len() < out.report.steps);
        assert!(out.measurements.iter().all(|m| m.strength <= 15.0));
    }
}
