pub mod drone;
pub mod path;

pub use drone::{Drone, MoveOutcome, PathReport, Rejection};
pub use path::{presets, PathBuilder, PathState, WaypointPath};
