pub mod slope;

pub use slope::Slope;
