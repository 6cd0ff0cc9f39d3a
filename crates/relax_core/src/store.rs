//! User-editable inputs and the lock that freezes them during a run.

use crate::error::{EngineError, Result};
use crate::model::{check_positive, check_temperature, ProcessKind, RelaxationModel};
use crate::presets::{PresetCatalog, ProcessPreset};
use crate::settings::SimulationSettings;
use log::debug;
use serde::{Deserialize, Serialize};
use std::f64::consts::LN_2;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    InitialValue,
    AmbientTemperature,
    RateConstant,
    HalfLife,
    WallClockDurationSeconds,
}

impl Field {
    pub const ALL: [Field; 5] = [
        Field::InitialValue,
        Field::AmbientTemperature,
        Field::RateConstant,
        Field::HalfLife,
        Field::WallClockDurationSeconds,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Field::InitialValue => "initialValue",
            Field::AmbientTemperature => "ambientTemperature",
            Field::RateConstant => "rateConstant",
            Field::HalfLife => "halfLife",
            Field::WallClockDurationSeconds => "wallClockDurationSeconds",
        }
    }

    pub fn applies_to(self, kind: ProcessKind) -> bool {
        !matches!(
            (self, kind),
            (Field::AmbientTemperature, ProcessKind::Decay)
        )
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Field {
    type Err = EngineError;

    /// Accepts the camelCase wire name or its snake_case spelling.
    fn from_str(s: &str) -> Result<Self> {
        let wanted: String = s.trim().chars().filter(|c| *c != '_').collect();
        Field::ALL
            .into_iter()
            .find(|field| field.name().eq_ignore_ascii_case(&wanted))
            .ok_or_else(|| EngineError::invalid(s.trim(), "unknown parameter"))
    }
}

/// Holds the inputs of one process kind.
///
/// The decay constant is stored as a half-life and the cooling constant as a
/// rate; either field may be set on either kind and is converted through
/// `ln 2`. Edits are rejected while the store is locked.
#[derive(Debug, Clone)]
pub struct ParameterStore {
    kind: ProcessKind,
    preset: Option<&'static ProcessPreset>,
    initial: Option<f64>,
    ambient: Option<f64>,
    /// `k` for cooling, half-life for decay.
    constant: Option<f64>,
    playback_seconds: Option<f64>,
    locked: bool,
    revision: u64,
}

impl ParameterStore {
    /// A store with nothing set; it cannot be locked until every field is filled in.
    pub fn blank(kind: ProcessKind) -> Self {
        Self {
            kind,
            preset: None,
            initial: None,
            ambient: None,
            constant: None,
            playback_seconds: None,
            locked: false,
            revision: 0,
        }
    }

    /// A store filled from `settings`, ready to lock.
    pub fn new(kind: ProcessKind, settings: &SimulationSettings) -> Result<Self> {
        settings.validate()?;
        let mut store = Self::blank(kind);
        store.select_preset(settings.preset_for(kind))?;
        store.set_parameter(Field::InitialValue, settings.initial_for(kind))?;
        if kind == ProcessKind::Cooling {
            store.set_parameter(Field::AmbientTemperature, settings.ambient_temperature)?;
        }
        store.set_parameter(Field::WallClockDurationSeconds, settings.playback_seconds)?;
        Ok(store)
    }

    pub fn kind(&self) -> ProcessKind {
        self.kind
    }

    pub fn catalog(&self) -> PresetCatalog {
        PresetCatalog::for_kind(self.kind)
    }

    pub fn preset(&self) -> Option<&'static ProcessPreset> {
        self.preset
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Incremented by every accepted edit.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn playback_seconds(&self) -> Option<f64> {
        self.playback_seconds
    }

    pub fn get(&self, field: Field) -> Option<f64> {
        match (field, self.kind) {
            (Field::InitialValue, _) => self.initial,
            (Field::AmbientTemperature, ProcessKind::Cooling) => self.ambient,
            (Field::AmbientTemperature, ProcessKind::Decay) => None,
            (Field::RateConstant, ProcessKind::Cooling)
            | (Field::HalfLife, ProcessKind::Decay) => self.constant,
            (Field::RateConstant, ProcessKind::Decay)
            | (Field::HalfLife, ProcessKind::Cooling) => self.constant.map(|c| LN_2 / c),
            (Field::WallClockDurationSeconds, _) => self.playback_seconds,
        }
    }

    fn ensure_unlocked(&self) -> Result<()> {
        if self.locked {
            return Err(EngineError::PreconditionFailed(
                "parameters are locked while a run is active".to_string(),
            ));
        }
        Ok(())
    }

    pub fn set_parameter(&mut self, field: Field, value: f64) -> Result<()> {
        self.ensure_unlocked()?;
        if !field.applies_to(self.kind) {
            return Err(EngineError::invalid(
                field.name(),
                format!("does not apply to {} models", self.kind),
            ));
        }

        match field {
            Field::InitialValue => {
                match self.kind {
                    ProcessKind::Cooling => check_temperature(field.name(), value)?,
                    ProcessKind::Decay => check_positive(field.name(), value)?,
                }
                self.initial = Some(value);
            }
            Field::AmbientTemperature => {
                check_temperature(field.name(), value)?;
                self.ambient = Some(value);
            }
            Field::RateConstant | Field::HalfLife => {
                check_positive(field.name(), value)?;
                let native = match (field, self.kind) {
                    (Field::RateConstant, ProcessKind::Cooling)
                    | (Field::HalfLife, ProcessKind::Decay) => value,
                    _ => LN_2 / value,
                };
                check_positive(field.name(), native)?;
                if self.kind == ProcessKind::Decay {
                    check_positive(field.name(), LN_2 / native)?;
                }
                self.constant = Some(native);
            }
            Field::WallClockDurationSeconds => {
                check_positive(field.name(), value)?;
                self.playback_seconds = Some(value);
            }
        }

        self.revision += 1;
        debug!("{} parameter {} set to {}", self.kind, field, value);
        Ok(())
    }

    pub fn select_preset(&mut self, name: &str) -> Result<&'static ProcessPreset> {
        self.ensure_unlocked()?;
        let preset = self.catalog().lookup(name)?;
        let constant = match self.kind {
            ProcessKind::Cooling => preset.rate_constant(),
            ProcessKind::Decay => preset.half_life(),
        };
        self.preset = Some(preset);
        self.constant = constant;
        self.revision += 1;
        debug!("{} preset set to {}", self.kind, preset.name);
        Ok(preset)
    }

    /// Build the model the current inputs describe without locking.
    pub fn model(&self) -> Result<RelaxationModel> {
        let missing = |field: Field| {
            EngineError::PreconditionFailed(format!("required parameter `{field}` is not set"))
        };
        let initial = self.initial.ok_or_else(|| missing(Field::InitialValue))?;
        let model = match self.kind {
            ProcessKind::Cooling => {
                let ambient = self.ambient.ok_or_else(|| missing(Field::AmbientTemperature))?;
                let k = self.constant.ok_or_else(|| missing(Field::RateConstant))?;
                RelaxationModel::cooling(initial, ambient, k)
            }
            ProcessKind::Decay => {
                let half_life = self.constant.ok_or_else(|| missing(Field::HalfLife))?;
                RelaxationModel::decay(initial, half_life)
            }
        };
        model.map_err(|err| EngineError::PreconditionFailed(err.to_string()))
    }

    /// Freeze the inputs and return the model and playback duration of the run.
    pub fn lock(&mut self) -> Result<(RelaxationModel, f64)> {
        if self.locked {
            return Err(EngineError::PreconditionFailed(
                "parameters are already locked".to_string(),
            ));
        }
        let model = self.model()?;
        let seconds = self.playback_seconds.ok_or_else(|| {
            EngineError::PreconditionFailed(format!(
                "required parameter `{}` is not set",
                Field::WallClockDurationSeconds
            ))
        })?;
        self.locked = true;
        debug!("{} parameters locked", self.kind);
        Ok((model, seconds))
    }

    pub fn unlock(&mut self) {
        if self.locked {
            debug!("{} parameters unlocked", self.kind);
        }
        self.locked = false;
    }
}
