use tracing::debug;

use crate::kinematics::Pose;

// ---------------------------------------------------------------------------
// Waypoint path: ordered targets consumed through a cursor
// ---------------------------------------------------------------------------

/// Lifecycle of a [`WaypointPath`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathState {
    Empty,
    Seeking,
    Complete,
}

/// Ordered queue of target poses.
///
/// The cursor only moves forward, one waypoint per
/// [`complete_step`](Self::complete_step), and is reset only by
/// [`override_path`](Self::override_path). It always lies in
/// `0..=waypoints.len()`.
#[derive(Debug, Clone, Default)]
pub struct WaypointPath {
    waypoints: Vec<Pose>,
    cursor: usize,
    completed: Vec<Pose>,
}

impl WaypointPath {
    pub fn new(waypoints: Vec<Pose>) -> Self {
        Self { waypoints, cursor: 0, completed: Vec::new() }
    }

    pub fn state(&self) -> PathState {
        if self.waypoints.is_empty() {
            PathState::Empty
        } else if self.cursor < self.waypoints.len() {
            PathState::Seeking
        } else {
            PathState::Complete
        }
    }

    pub fn is_complete(&self) -> bool {
        self.state() == PathState::Complete
    }

    /// Current target, `None` when empty or complete.
    pub fn next(&self) -> Option<&Pose> {
        self.waypoints.get(self.cursor)
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    /// Waypoints not yet completed.
    pub fn remaining(&self) -> usize {
        self.waypoints.len() - self.cursor
    }

    pub fn waypoints(&self) -> &[Pose] {
        &self.waypoints
    }

    /// Waypoints passed so far, in order, across overrides.
    pub fn completed(&self) -> &[Pose] {
        &self.completed
    }

    /// Append waypoints. The current target of a seeking path is kept.
    ///
    /// `Complete` is only terminal until more waypoints arrive: appending
    /// to a complete path puts it back in `Seeking` at the first appended
    /// waypoint.
    pub fn add_path<I: IntoIterator<Item = Pose>>(&mut self, waypoints: I) {
        let before = self.waypoints.len();
        self.waypoints.extend(waypoints);
        debug!(added = self.waypoints.len() - before, total = self.waypoints.len(), "path extended");
    }

    pub fn push(&mut self, waypoint: Pose) {
        self.waypoints.push(waypoint);
    }

    /// Mark the current target reached and move to the next one.
    /// Returns the completed waypoint, or `None` if there was no target.
    pub fn complete_step(&mut self) -> Option<Pose> {
        let done = *self.next()?;
        self.completed.push(done);
        self.cursor += 1;
        debug!(cursor = self.cursor, len = self.waypoints.len(), state = ?self.state(), "waypoint completed");
        Some(done)
    }

    /// Replace every waypoint and restart at the first one.
    pub fn override_path(&mut self, waypoints: Vec<Pose>) {
        self.waypoints = waypoints;
        self.cursor = 0;
        debug!(len = self.waypoints.len(), "path overridden");
    }
}

impl FromIterator<Pose> for WaypointPath {
    fn from_iter<I: IntoIterator<Item = Pose>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

// ---------------------------------------------------------------------------
// Path builder
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct PathBuilder {
    waypoints: Vec<Pose>,
}

impl PathBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn waypoint(mut self, pose: Pose) -> Self {
        self.waypoints.push(pose);
        self
    }

    pub fn build(self) -> WaypointPath {
        WaypointPath::new(self.waypoints)
    }
}

// ---------------------------------------------------------------------------
// Preset paths
// ---------------------------------------------------------------------------

pub mod presets {
    use super::*;
    use crate::error::{ensure_positive, Result};
    use crate::terrain::Slope;

    /// Four-leg survey over the reference 35 deg slope.
    pub fn slope_survey() -> WaypointPath {
        PathBuilder::new()
            .waypoint(Pose::new(0.0, 0.0, 10.0, 0.0, 0.0, 0.0))
            .waypoint(Pose::new(0.0, 0.0, 20.0, 0.0, 15.0, 0.0))
            .waypoint(Pose::new(20.0, 0.0, 10.0, 0.0, 30.0, 0.0))
            .waypoint(Pose::new(30.0, 10.0, 10.0, 0.0, 45.0, 0.0))
            .build()
    }

    /// Back-and-forth sweep covering the slope footprint.
    ///
    /// Lanes run along z, `spacing` apart in x, alternating direction. Each
    /// waypoint sits `clearance` above the surface (and above ground).
    pub fn lawnmower(slope: &Slope, spacing: f64, clearance: f64) -> Result<WaypointPath> {
        let spacing = ensure_positive("lane spacing", spacing)?;
        let clearance = clearance.max(0.0);
        let half_w = slope.width() / 2.0;
        let half_h = slope.height() / 2.0;
        let lanes = (slope.width() / spacing).floor() as usize + 1;

        let mut builder = PathBuilder::new();
        for i in 0..lanes {
            let x = (-half_w + i as f64 * spacing).min(half_w);
            let y = slope.surface_y(x).max(0.0) + clearance;
            let (z0, z1) = if i % 2 == 0 { (-half_h, half_h) } else { (half_h, -half_h) };
            builder = builder
                .waypoint(Pose::at(x, y, z0))
                .waypoint(Pose::at(x, y, z1));
        }
        Ok(builder.build())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terrain::Slope;

    fn a() -> Pose { Pose::at(1.0, 0.0, 0.0) }
    fn b() -> Pose { Pose::at(2.0, 0.0, 0.0) }
    fn c() -> Pose { Pose::at(3.0, 0.0, 0.0) }

    #[test]
    fn empty_by_default() {
        let p = WaypointPath::default();
        assert_eq!(p.state(), PathState::Empty);
        assert!(!p.is_complete());
        assert!(p.next().is_none());
    }

    #[test]
    fn two_step_lifecycle() {
        let mut p = WaypointPath::new(vec![a(), b()]);
        assert_eq!(p.state(), PathState::Seeking);
        assert!(!p.is_complete());

        p.complete_step();
        assert_eq!(p.state(), PathState::Seeking);
        assert!(!p.is_complete());
        assert!(p.next().unwrap().approx_eq(&b(), 0.0));

        p.complete_step();
        assert_eq!(p.state(), PathState::Complete);
        assert!(p.is_complete());
        assert!(p.next().is_none());
        assert_eq!(p.completed().len(), 2);
        assert_eq!(p.cursor(), 2);
    }

    #[test]
    fn complete_step_past_end_is_noop() {
        let mut p = WaypointPath::new(vec![a()]);
        assert!(p.complete_step().is_some());
        assert!(p.complete_step().is_none());
        assert_eq!(p.cursor(), 1);
        assert!(WaypointPath::default().complete_step().is_none());
    }

    #[test]
    fn add_path_on_empty_starts_seeking() {
        let mut p = WaypointPath::default();
        p.add_path(vec![a(), b()]);
        assert_eq!(p.state(), PathState::Seeking);
        assert!(p.next().unwrap().approx_eq(&a(), 0.0));
    }

    #[test]
    fn add_path_appends_and_keeps_target() {
        let mut p = WaypointPath::new(vec![a()]);
        p.add_path(vec![b(), c()]);
        assert_eq!(p.len(), 3);
        assert!(p.next().unwrap().approx_eq(&a(), 0.0));
    }

    #[test]
    fn add_path_after_completion_resumes() {
        let mut p = WaypointPath::new(vec![a()]);
        p.complete_step();
        assert!(p.is_complete());
        p.add_path(vec![c()]);
        assert_eq!(p.state(), PathState::Seeking);
        assert!(p.next().unwrap().approx_eq(&c(), 0.0));
    }

    #[test]
    fn override_resets_cursor() {
        let mut p = WaypointPath::new(vec![a(), b()]);
        p.complete_step();
        p.complete_step();
        p.override_path(vec![c()]);
        assert_eq!(p.cursor(), 0);
        assert_eq!(p.state(), PathState::Seeking);
        assert!(p.next().unwrap().approx_eq(&c(), 0.0));
        assert_eq!(p.completed().len(), 2);
    }

    #[test]
    fn survey_preset_has_four_legs() {
        let p = presets::slope_survey();
        assert_eq!(p.len(), 4);
        assert_eq!(p.waypoints()[3].yaw(), 45.0);
    }

    #[test]
    fn lawnmower_covers_footprint_above_surface() {
        let slope = Slope::new(100.0, 200.0, 35.0, None).unwrap();
        let p = presets::lawnmower(&slope, 25.0, 2.0).unwrap();
        assert_eq!(p.len(), 10); // 5 lanes, 2 ends each
        for w in p.waypoints() {
            assert!(slope.contains(w.x(), w.z()));
            assert!(slope.is_above(w));
            assert!(w.y() >= 2.0);
        }
        // lanes alternate direction
        assert_eq!(p.waypoints()[1].z(), 100.0);
        assert_eq!(p.waypoints()[2].z(), 100.0);
        assert_eq!(p.waypoints()[3].z(), -100.0);
    }

    #[test]
    fn lawnmower_rejects_zero_spacing() {
        let slope = Slope::new(100.0, 200.0, 35.0, None).unwrap();
        assert!(presets::lawnmower(&slope, 0.0, 2.0).is_err());
    }
}
