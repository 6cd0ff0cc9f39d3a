use crate::error::Result;
use crate::model::{check_positive, check_temperature, ProcessKind};
use crate::presets::PresetCatalog;
use serde::{Deserialize, Serialize};

/// Starting values for a fresh parameter store, plus driver limits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationSettings {
    pub initial_temperature: f64,
    pub ambient_temperature: f64,
    pub cooling_preset: String,
    pub initial_quantity: f64,
    pub decay_preset: String,
    pub playback_seconds: f64,
    /// Upper bound on ticks replayed by a single clock advance.
    pub max_catch_up_ticks: u32,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            initial_temperature: 100.0,
            ambient_temperature: 25.0,
            cooling_preset: "Aluminum".to_string(),
            initial_quantity: 100.0,
            decay_preset: "Carbon-14".to_string(),
            playback_seconds: 10.0,
            max_catch_up_ticks: 30,
        }
    }
}

impl SimulationSettings {
    pub fn validate(&self) -> Result<()> {
        check_temperature("initialTemperature", self.initial_temperature)?;
        check_temperature("ambientTemperature", self.ambient_temperature)?;
        check_positive("initialQuantity", self.initial_quantity)?;
        check_positive("playbackSeconds", self.playback_seconds)?;
        PresetCatalog::for_kind(ProcessKind::Cooling).lookup(&self.cooling_preset)?;
        PresetCatalog::for_kind(ProcessKind::Decay).lookup(&self.decay_preset)?;
        Ok(())
    }

    pub(crate) fn preset_for(&self, kind: ProcessKind) -> &str {
        match kind {
            ProcessKind::Cooling => &self.cooling_preset,
            ProcessKind::Decay => &self.decay_preset,
        }
    }

    pub(crate) fn initial_for(&self, kind: ProcessKind) -> f64 {
        match kind {
            ProcessKind::Cooling => self.initial_temperature,
            ProcessKind::Decay => self.initial_quantity,
        }
    }
}
