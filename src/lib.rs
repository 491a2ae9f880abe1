//! Kinematic simulation of a drone searching a slope for a buried beacon.
//!
//! A [`Drone`](vehicle::Drone) follows a [`WaypointPath`](vehicle::WaypointPath)
//! under speed and turn-rate limits, is kept on or above a
//! [`Slope`](terrain::Slope), and samples the slope's
//! [`Transmitter`](signal::Transmitter) after every step.

pub mod error;
pub mod kinematics;
pub mod terrain;
pub mod signal;
pub mod vehicle;
pub mod sim;
pub mod io;
pub mod config;

pub use error::{Result, SimError};
