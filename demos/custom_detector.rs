use beacon_sim::config::{PathConfig, Scenario};
use beacon_sim::kinematics::Pose;
use beacon_sim::signal::Measurement;
use beacon_sim::sim::{self, EventDetector, EventKind};

/// Flags samples where the beacon bearing swings by more than a set angle
/// between consecutive readings, which happens when passing over it.
struct BearingFlipDetector {
    min_swing: f64,
}

impl EventDetector for BearingFlipDetector {
    fn check(&mut self, prev: &Measurement, current: &Measurement) -> Option<EventKind> {
        let swing = beacon_sim::signal::wrap_degrees(current.bearing - prev.bearing).abs();
        (swing > self.min_swing).then(|| EventKind::Custom(format!("Bearing swing {:.0} deg", swing)))
    }
}

fn main() -> beacon_sim::Result<()> {
    let mut scenario = Scenario::default();
    scenario.description = "Lawnmower sweep".into();
    scenario.vehicle.start = Pose::at(-50.0, 2.0, -100.0);
    scenario.path = PathConfig::Lawnmower { spacing: 25.0, clearance: 2.0 };

    let mut detectors: Vec<Box<dyn EventDetector>> =
        vec![Box::new(BearingFlipDetector { min_swing: 90.0 })];

    println!("Simulating {}...", scenario.description);
    let out = sim::simulate_with(&scenario, &mut detectors)?;

    for e in &out.events {
        if let EventKind::Custom(label) = &e.kind {
            println!("t={:>7.2}  {}  at {}", e.time, label, e.pose);
        }
    }
    println!("Samples: {}", out.measurements.len());
    println!("Final pose: {}", out.final_pose);
    Ok(())
}
