use nalgebra::Vector3;

use crate::kinematics::Pose;
use crate::signal::Measurement;

// ---------------------------------------------------------------------------
// Simulation events
// ---------------------------------------------------------------------------

/// Kinds of simulation events.
#[derive(Debug, Clone, PartialEq)]
pub enum EventKind {
    WaypointReached { index: usize },
    WaypointAbandoned { index: usize },
    ClosestApproach { distance: f64 },
    StrengthCrossed { threshold: f64, rising: bool },
    Custom(String),
}

/// A discrete event that occurred during simulation.
#[derive(Debug, Clone)]
pub struct SimEvent {
    pub time: f64,
    pub kind: EventKind,
    pub pose: Pose,
}

/// Trait for passive event detectors.
/// Implementations inspect consecutive signal samples and report events.
pub trait EventDetector {
    fn check(&mut self, prev: &Measurement, current: &Measurement) -> Option<EventKind>;
}

/// Run `detectors` over a sample history in order.
pub fn detect(detectors: &mut [Box<dyn EventDetector>], samples: &[Measurement]) -> Vec<SimEvent> {
    let mut events = Vec::new();
    for pair in samples.windows(2) {
        for det in detectors.iter_mut() {
            if let Some(kind) = det.check(&pair[0], &pair[1]) {
                events.push(SimEvent { time: pair[1].timestamp, kind, pose: pair[1].pose });
            }
        }
    }
    events
}

/// Detects the sample where range to the beacon stops shrinking.
pub struct ClosestApproachDetector {
    beacon: Vector3<f64>,
    closing: bool,
}

impl ClosestApproachDetector {
    pub fn new(beacon: &Pose) -> Self {
        Self { beacon: beacon.position(), closing: false }
    }

    fn range(&self, m: &Measurement) -> f64 {
        (m.pose.position() - self.beacon).norm()
    }
}

impl EventDetector for ClosestApproachDetector {
    fn check(&mut self, prev: &Measurement, current: &Measurement) -> Option<EventKind> {
        let (r0, r1) = (self.range(prev), self.range(current));
        if r1 < r0 {
            self.closing = true;
            None
        } else if r1 > r0 && self.closing {
            self.closing = false;
            Some(EventKind::ClosestApproach { distance: r0 })
        } else {
            None
        }
    }
}

/// Detects when signal strength crosses a threshold (once).
pub struct StrengthThresholdDetector {
    pub threshold: f64,
    pub rising: bool,
    fired: bool,
}

impl StrengthThresholdDetector {
    pub fn new(threshold: f64, rising: bool) -> Self {
        Self { threshold, rising, fired: false }
    }
}

impl EventDetector for StrengthThresholdDetector {
    fn check(&mut self, prev: &Measurement, current: &Measurement) -> Option<EventKind> {
        if self.fired {
            return None;
        }
        let crossed = if self.rising {
            prev.strength < self.threshold && current.strength >= self.threshold
        } else {
            prev.strength > self.threshold && current.strength <= self.threshold
        };
        if crossed {
            self.fired = true;
            Some(EventKind::StrengthCrossed { threshold: self.threshold, rising: self.rising })
        } else {
            None
        }
    }
}
