use tracing::{debug, info, warn};

use crate::error::{ensure_positive, Result, SimError};
use crate::kinematics::{clamp_norm, seek, MotionLimits, Pose, PoseDelta};
use crate::signal::Measurement;
use crate::sim::config::{SimConfig, ARRIVAL_FRACTION};
use crate::sim::event::{EventKind, SimEvent};
use crate::terrain::Slope;
use super::path::WaypointPath;

// ---------------------------------------------------------------------------
// Move results
// ---------------------------------------------------------------------------

/// Why a candidate pose was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    BelowGround,
    ThroughSlope,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    Accepted,
    Rejected(Rejection),
}

impl MoveOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, MoveOutcome::Accepted)
    }
}

/// What happened during one `follow_path` run.
#[derive(Debug, Clone, Default)]
pub struct PathReport {
    pub steps: usize,
    pub accepted: usize,
    pub rejected: usize,
    pub reached: Vec<usize>,
    pub abandoned: Vec<usize>,
    pub events: Vec<SimEvent>,
}

// ---------------------------------------------------------------------------
// Drone: kinematic vehicle constrained by a slope
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Drone<'a> {
    pose: Pose,
    limits: MotionLimits,
    slope: &'a Slope,
    path: WaypointPath,
    antenna_range: Option<f64>,
    history: Vec<(Pose, f64)>,
    measurements: Vec<Measurement>,
}

impl<'a> Drone<'a> {
    /// Fails if `start` is below ground or under the slope.
    pub fn new(start: Pose, limits: MotionLimits, slope: &'a Slope) -> Result<Self> {
        if start.y() < 0.0 || !slope.is_above(&start) {
            return Err(SimError::InvalidStart(start));
        }
        Ok(Self {
            pose: start,
            limits,
            slope,
            path: WaypointPath::default(),
            antenna_range: None,
            history: vec![(start, 0.0)],
            measurements: Vec::new(),
        })
    }

    /// Limit signal reception to `range` from the transmitter.
    pub fn with_antenna_range(mut self, range: Option<f64>) -> Self {
        self.antenna_range = range;
        self
    }

    pub fn pose(&self) -> &Pose { &self.pose }
    pub fn limits(&self) -> &MotionLimits { &self.limits }
    pub fn slope(&self) -> &Slope { self.slope }
    pub fn antenna_range(&self) -> Option<f64> { self.antenna_range }
    pub fn path(&self) -> &WaypointPath { &self.path }
    pub fn path_mut(&mut self) -> &mut WaypointPath { &mut self.path }

    /// Accepted poses with cumulative time; the first entry is `(start, 0)`.
    pub fn pose_history(&self) -> &[(Pose, f64)] {
        &self.history
    }

    pub fn measurements(&self) -> &[Measurement] {
        &self.measurements
    }

    /// Simulation time of the latest accepted pose.
    pub fn elapsed(&self) -> f64 {
        self.history.last().map_or(0.0, |(_, t)| *t)
    }

    pub fn add_path<I: IntoIterator<Item = Pose>>(&mut self, waypoints: I) {
        self.path.add_path(waypoints);
    }

    /// Apply `delta` over `dt`, clamped to the motion limits.
    ///
    /// A translation faster than the speed limit is rescaled to it. A
    /// rotation faster than the angular-rate limit is rescaled likewise;
    /// otherwise the requested rotation is applied unchanged. The result is
    /// refused if it ends below ground or beneath the slope, leaving the
    /// drone untouched. A non-finite delta component is an error.
    pub fn move_by(&mut self, delta: &PoseDelta, dt: f64) -> Result<MoveOutcome> {
        let dt = ensure_positive("timestep", dt)?;
        if let Some(&value) = delta
            .linear()
            .iter()
            .chain(delta.angular().iter())
            .find(|c| !c.is_finite())
        {
            return Err(SimError::InvalidParameter { name: "pose delta", value });
        }

        let (linear, clamped) = clamp_norm(delta.linear(), self.limits.max_distance(dt));
        if clamped {
            debug!(
                max = self.limits.speed,
                attempted = delta.linear().norm() / dt,
                "speed limit exceeded, displacement rescaled"
            );
        }

        let requested = delta.angular();
        let (scaled, rot_clamped) = clamp_norm(requested, self.limits.max_rotation(dt));
        let angular = if rot_clamped {
            debug!(
                max = self.limits.angular_rate,
                attempted = requested.norm() / dt,
                "angular rate limit exceeded, rotation rescaled"
            );
            scaled
        } else {
            requested
        };

        let candidate = self.pose.apply_delta(&PoseDelta::from_parts(linear, angular));

        let rejection = if candidate.y() < 0.0 {
            Some(Rejection::BelowGround)
        } else if !self.slope.is_above(&candidate) {
            Some(Rejection::ThroughSlope)
        } else {
            None
        };
        if let Some(reason) = rejection {
            warn!(?reason, current = %self.pose, "invalid move, drone cannot go beneath or through the slope");
            return Ok(MoveOutcome::Rejected(reason));
        }

        let t = self.elapsed() + dt;
        self.pose = candidate;
        self.history.push((candidate, t));
        Ok(MoveOutcome::Accepted)
    }

    /// Take one bounded step toward `target` in position and orientation.
    pub fn fly_towards(&mut self, target: &Pose, dt: f64) -> Result<MoveOutcome> {
        let dt = ensure_positive("timestep", dt)?;
        let linear = seek(&self.pose.position(), &target.position(), self.limits.max_distance(dt));
        let angular = seek(
            &self.pose.orientation(),
            &target.orientation(),
            self.limits.max_rotation(dt),
        );
        self.move_by(&PoseDelta::from_parts(linear, angular), dt)
    }

    /// Sample the slope's transmitter at the current pose.
    /// Returns false when there is no transmitter or it is out of range.
    pub fn measure_signal(&mut self) -> bool {
        let Some(tx) = self.slope.transmitter() else {
            return false;
        };
        match tx.sample(&self.pose, self.antenna_range) {
            Some(reading) => {
                self.measurements.push(Measurement {
                    pose: self.pose,
                    strength: reading.strength,
                    bearing: reading.bearing,
                    timestamp: self.elapsed(),
                });
                true
            }
            None => false,
        }
    }

    /// Whether the current pose matches `target` within both tolerances.
    pub fn is_at(&self, target: &Pose, tolerance: f64, angular_tolerance: f64) -> bool {
        self.pose.distance_to(target) <= tolerance
            && (target.orientation() - self.pose.orientation()).norm() <= angular_tolerance
    }

    /// Follow the queued waypoints with default settings and timestep `dt`.
    pub fn follow_path(&mut self, dt: f64) -> Result<PathReport> {
        self.follow_path_with(&SimConfig::with_dt(dt))
    }

    /// Seek each waypoint in turn, sampling the signal after every step,
    /// until the path is complete.
    ///
    /// A waypoint is reached once the pose is within the arrival
    /// tolerances, and abandoned after `stall_limit` consecutive refused
    /// moves toward it.
    pub fn follow_path_with(&mut self, config: &SimConfig) -> Result<PathReport> {
        let dt = ensure_positive("timestep", config.dt)?;
        let tolerance = config
            .arrival_tolerance
            .unwrap_or(ARRIVAL_FRACTION * self.limits.max_distance(dt));
        let angular_tolerance = config
            .angular_tolerance
            .unwrap_or(ARRIVAL_FRACTION * self.limits.max_rotation(dt));
        let stall_limit = config.stall_limit.max(1);

        let mut report = PathReport::default();
        let mut stalled = 0;

        while let Some(target) = self.path.next().copied() {
            if report.steps >= config.max_steps {
                return Err(SimError::StepBudgetExhausted {
                    steps: report.steps,
                    remaining: self.path.remaining(),
                });
            }
            report.steps += 1;
            let index = self.path.cursor();

            if self.fly_towards(&target, dt)?.is_accepted() {
                report.accepted += 1;
                stalled = 0;
            } else {
                report.rejected += 1;
                stalled += 1;
            }
            self.measure_signal();

            let kind = if self.is_at(&target, tolerance, angular_tolerance) {
                info!(index, t = self.elapsed(), pose = %self.pose, "waypoint reached");
                report.reached.push(index);
                EventKind::WaypointReached { index }
            } else if stalled >= stall_limit {
                warn!(index, target = %target, "waypoint unreachable, abandoning");
                report.abandoned.push(index);
                EventKind::WaypointAbandoned { index }
            } else {
                continue;
            };
            self.path.complete_step();
            stalled = 0;
            report.events.push(SimEvent { time: self.elapsed(), kind, pose: self.pose });
        }

        Ok(report)
    }
}
