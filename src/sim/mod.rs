pub mod config;
pub mod runner;
pub mod event;

pub use config::SimConfig;
pub use runner::{simulate, simulate_with, RunOutput};
pub use event::{EventDetector, EventKind, SimEvent};
