pub mod measurement;
pub mod model;
pub mod transmitter;

pub use measurement::Measurement;
pub use model::{dipole_field, SignalModel};
pub use transmitter::{wrap_degrees, SignalReading, Transmitter, TransmitterBuilder};
