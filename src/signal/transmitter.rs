use serde::{Deserialize, Serialize};

use crate::kinematics::Pose;
use super::model::SignalModel;

// ---------------------------------------------------------------------------
// Transmitter: stationary beacon with a signal model
// ---------------------------------------------------------------------------

/// One strength/bearing observation of a transmitter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignalReading {
    pub strength: f64,
    pub bearing: f64, // deg, relative to observer yaw, in (-180, 180]
}

/// A buried beacon. Its pose is fixed once built.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Transmitter {
    #[serde(default)]
    id: u32,
    pose: Pose,
    #[serde(default = "default_name")]
    name: String,
    #[serde(default = "default_kind")]
    kind: String,
    #[serde(default = "default_polarization")]
    polarization: String,
    #[serde(default = "default_pattern")]
    pattern: String,
    #[serde(default = "default_power")]
    power: f64,      // W
    #[serde(default = "default_frequency")]
    frequency: f64,  // GHz
    #[serde(default = "default_gain")]
    gain: f64,       // dBi
    #[serde(default)]
    azimuth: f64,    // deg
    #[serde(default = "default_beamwidth")]
    beamwidth: f64,  // deg
    #[serde(default)]
    model: SignalModel,
}

impl Transmitter {
    pub fn id(&self) -> u32 { self.id }
    pub fn pose(&self) -> &Pose { &self.pose }
    pub fn name(&self) -> &str { &self.name }
    pub fn kind(&self) -> &str { &self.kind }
    pub fn polarization(&self) -> &str { &self.polarization }
    pub fn pattern(&self) -> &str { &self.pattern }
    pub fn power(&self) -> f64 { self.power }
    pub fn frequency(&self) -> f64 { self.frequency }
    pub fn gain(&self) -> f64 { self.gain }
    pub fn azimuth(&self) -> f64 { self.azimuth }
    pub fn beamwidth(&self) -> f64 { self.beamwidth }
    pub fn model(&self) -> SignalModel { self.model }

    /// Sample the signal at `observer`.
    ///
    /// With `range` set, observers farther away than it get `None`.
    /// Without it the call always yields a reading.
    pub fn sample(&self, observer: &Pose, range: Option<f64>) -> Option<SignalReading> {
        let offset = observer.position() - self.pose.position();
        if let Some(r) = range {
            if offset.norm() > r {
                return None;
            }
        }
        let strength = self.model.strength(&offset);
        let bearing = wrap_degrees(offset.y.atan2(offset.x).to_degrees() - observer.yaw());
        Some(SignalReading { strength, bearing })
    }
}

/// Wrap an angle in degrees into (-180, 180].
pub fn wrap_degrees(angle: f64) -> f64 {
    let a = angle.rem_euclid(360.0);
    if a > 180.0 {
        a - 360.0
    } else {
        a
    }
}

fn default_name() -> String { "Transmitter".into() }
fn default_kind() -> String { "Omni".into() }
fn default_polarization() -> String { "Vertical".into() }
fn default_pattern() -> String { "Pattern".into() }
fn default_power() -> f64 { 10.0 }
fn default_frequency() -> f64 { 2.4 }
fn default_gain() -> f64 { 5.0 }
fn default_beamwidth() -> f64 { 360.0 }

// ---------------------------------------------------------------------------
// Transmitter builder
// ---------------------------------------------------------------------------

pub struct TransmitterBuilder {
    inner: Transmitter,
}

impl TransmitterBuilder {
    pub fn new(name: impl Into<String>, pose: Pose) -> Self {
        Self {
            inner: Transmitter {
                id: 1,
                pose,
                name: name.into(),
                kind: default_kind(),
                polarization: default_polarization(),
                pattern: default_pattern(),
                power: default_power(),
                frequency: default_frequency(),
                gain: default_gain(),
                azimuth: 0.0,
                beamwidth: default_beamwidth(),
                model: SignalModel::Distance,
            },
        }
    }

    pub fn id(mut self, v: u32) -> Self { self.inner.id = v; self }
    pub fn kind(mut self, v: impl Into<String>) -> Self { self.inner.kind = v.into(); self }
    pub fn polarization(mut self, v: impl Into<String>) -> Self { self.inner.polarization = v.into(); self }
    pub fn pattern(mut self, v: impl Into<String>) -> Self { self.inner.pattern = v.into(); self }
    pub fn power(mut self, v: f64) -> Self { self.inner.power = v; self }
    pub fn frequency(mut self, v: f64) -> Self { self.inner.frequency = v; self }
    pub fn gain(mut self, v: f64) -> Self { self.inner.gain = v; self }
    pub fn azimuth(mut self, v: f64) -> Self { self.inner.azimuth = v; self }
    pub fn beamwidth(mut self, v: f64) -> Self { self.inner.beamwidth = v; self }
    pub fn model(mut self, v: SignalModel) -> Self { self.inner.model = v; self }

    pub fn build(self) -> Transmitter {
        self.inner
    }
}
