//! Per-run model of a relaxation process.

use crate::error::{EngineError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of time constants (1/k) a cooling run spans; leaves e^-5 of the initial gap.
pub const COOLING_TIME_CONSTANTS: f64 = 5.0;
/// Number of half-lives a decay run spans.
pub const DECAY_HALF_LIVES: f64 = 5.0;
/// Lower bound accepted for temperatures, in degrees Celsius.
pub const ABSOLUTE_ZERO_CELSIUS: f64 = -273.15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessKind {
    Cooling,
    Decay,
}

impl fmt::Display for ProcessKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessKind::Cooling => f.write_str("cooling"),
            ProcessKind::Decay => f.write_str("decay"),
        }
    }
}

impl FromStr for ProcessKind {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cooling" => Ok(ProcessKind::Cooling),
            "decay" => Ok(ProcessKind::Decay),
            other => Err(EngineError::invalid(
                "kind",
                format!("unknown process kind '{other}'"),
            )),
        }
    }
}

/// A validated cooling or decay model.
///
/// Values are only built through [`RelaxationModel::cooling`] and
/// [`RelaxationModel::decay`], so the rate constant is always positive and the
/// total duration is always positive and finite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RelaxationModel {
    #[serde(rename_all = "camelCase")]
    Cooling {
        initial: f64,
        ambient: f64,
        rate_constant: f64,
    },
    #[serde(rename_all = "camelCase")]
    Decay { initial: f64, half_life: f64 },
}

impl RelaxationModel {
    pub fn cooling(initial: f64, ambient: f64, rate_constant: f64) -> Result<Self> {
        check_temperature("initialValue", initial)?;
        check_temperature("ambientTemperature", ambient)?;
        check_positive("rateConstant", rate_constant)?;
        let model = RelaxationModel::Cooling {
            initial,
            ambient,
            rate_constant,
        };
        model.check_horizon()?;
        Ok(model)
    }

    pub fn decay(initial: f64, half_life: f64) -> Result<Self> {
        check_positive("initialValue", initial)?;
        check_positive("halfLife", half_life)?;
        let model = RelaxationModel::Decay { initial, half_life };
        model.check_horizon()?;
        Ok(model)
    }

    fn check_horizon(&self) -> Result<()> {
        let field = match self {
            RelaxationModel::Cooling { .. } => "rateConstant",
            RelaxationModel::Decay { .. } => "halfLife",
        };
        let rate = self.rate_constant();
        if !(rate.is_finite() && rate > 0.0) {
            return Err(EngineError::invalid(
                field,
                format!("gives an unusable rate constant ({rate})"),
            ));
        }
        let total = self.total_duration();
        if !(total.is_finite() && total > 0.0) {
            return Err(EngineError::invalid(
                field,
                format!("gives an unusable run duration ({total})"),
            ));
        }
        Ok(())
    }

    pub fn kind(&self) -> ProcessKind {
        match self {
            RelaxationModel::Cooling { .. } => ProcessKind::Cooling,
            RelaxationModel::Decay { .. } => ProcessKind::Decay,
        }
    }

    pub fn initial(&self) -> f64 {
        match *self {
            RelaxationModel::Cooling { initial, .. } | RelaxationModel::Decay { initial, .. } => {
                initial
            }
        }
    }

    /// Ambient temperature for cooling, zero for decay.
    pub fn asymptote(&self) -> f64 {
        match *self {
            RelaxationModel::Cooling { ambient, .. } => ambient,
            RelaxationModel::Decay { .. } => 0.0,
        }
    }

    /// `k` for cooling, `λ = ln 2 / half-life` for decay.
    pub fn rate_constant(&self) -> f64 {
        match *self {
            RelaxationModel::Cooling { rate_constant, .. } => rate_constant,
            RelaxationModel::Decay { half_life, .. } => std::f64::consts::LN_2 / half_life,
        }
    }

    pub fn half_life(&self) -> Option<f64> {
        match *self {
            RelaxationModel::Decay { half_life, .. } => Some(half_life),
            RelaxationModel::Cooling { .. } => None,
        }
    }

    /// Simulated time covered by one run: 5/k for cooling, five half-lives for decay.
    pub fn total_duration(&self) -> f64 {
        match *self {
            RelaxationModel::Cooling { rate_constant, .. } => {
                COOLING_TIME_CONSTANTS / rate_constant
            }
            RelaxationModel::Decay { half_life, .. } => DECAY_HALF_LIVES * half_life,
        }
    }
}

pub(crate) fn check_finite(field: &str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(EngineError::invalid(field, "must be a finite number"));
    }
    Ok(())
}

pub(crate) fn check_positive(field: &str, value: f64) -> Result<()> {
    check_finite(field, value)?;
    if value <= 0.0 {
        return Err(EngineError::invalid(
            field,
            format!("must be greater than zero (got {value})"),
        ));
    }
    Ok(())
}

pub(crate) fn check_temperature(field: &str, value: f64) -> Result<()> {
    check_finite(field, value)?;
    if value < ABSOLUTE_ZERO_CELSIUS {
        return Err(EngineError::invalid(
            field,
            format!("is below absolute zero (got {value} °C)"),
        ));
    }
    Ok(())
}
