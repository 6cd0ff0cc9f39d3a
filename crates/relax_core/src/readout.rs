//! Display quantities derived from a model at a point in simulated time.

use crate::model::{ProcessKind, RelaxationModel};
use crate::traits::AnalyticSolution;
use serde::Serialize;

/// Size of the proportional atom display shown for decay runs.
pub const ATOM_GRID: usize = 100;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Readout {
    pub kind: ProcessKind,
    pub simulated_time: f64,
    pub value: f64,
    /// Fraction of the run already played, in `[0, 1]`.
    pub progress: f64,
    /// Share of the initial gap to the asymptote still remaining.
    pub fraction_remaining: f64,
    /// Half-lives (decay) or time constants (cooling) elapsed.
    pub elapsed_periods: f64,
    pub display_time: f64,
    pub display_unit: String,
    /// Lit atoms out of [`ATOM_GRID`]; decay only.
    pub active_atoms: Option<usize>,
}

impl Readout {
    /// `unit_label` is the unit simulated time is measured in.
    pub fn at(model: &RelaxationModel, unit_label: &str, simulated_time: f64) -> Self {
        let value = model.value_at(simulated_time);
        let total = model.total_duration();
        let gap = model.initial() - model.asymptote();
        let fraction_remaining = if gap == 0.0 {
            1.0
        } else {
            (value - model.asymptote()) / gap
        };

        let (elapsed_periods, display_time, display_unit, active_atoms) = match model.kind() {
            ProcessKind::Cooling => (
                model.rate_constant() * simulated_time,
                simulated_time / 60.0,
                "min".to_string(),
                None,
            ),
            ProcessKind::Decay => (
                simulated_time / model.half_life().unwrap_or(f64::INFINITY),
                simulated_time,
                unit_label.to_string(),
                Some(active_atoms(value, model.initial())),
            ),
        };

        Self {
            kind: model.kind(),
            simulated_time,
            value,
            progress: (simulated_time / total).clamp(0.0, 1.0),
            fraction_remaining,
            elapsed_periods,
            display_time,
            display_unit,
            active_atoms,
        }
    }
}

/// Atoms still lit when `value` of `initial` remains.
pub fn active_atoms(value: f64, initial: f64) -> usize {
    if initial <= 0.0 || !value.is_finite() {
        return 0;
    }
    let lit = (value / initial * ATOM_GRID as f64).round();
    lit.clamp(0.0, ATOM_GRID as f64) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decay_readout_at_one_half_life() {
        let model = RelaxationModel::decay(100.0, 5730.0).unwrap();
        let readout = Readout::at(&model, "years", 5730.0);
        assert!((readout.value - 50.0).abs() < 1e-9);
        assert!((readout.fraction_remaining - 0.5).abs() < 1e-12);
        assert!((readout.elapsed_periods - 1.0).abs() < 1e-12);
        assert!((readout.progress - 0.2).abs() < 1e-12);
        assert_eq!(readout.display_unit, "years");
        assert_eq!(readout.active_atoms, Some(50));
    }

    #[test]
    fn cooling_readout_shows_minutes() {
        let model = RelaxationModel::cooling(100.0, 25.0, 0.15).unwrap();
        let readout = Readout::at(&model, "s", 30.0);
        assert_eq!(readout.display_time, 0.5);
        assert_eq!(readout.display_unit, "min");
        assert!((readout.elapsed_periods - 4.5).abs() < 1e-12);
        assert_eq!(readout.active_atoms, None);
    }

    #[test]
    fn degenerate_cooling_reports_full_fraction() {
        let model = RelaxationModel::cooling(20.0, 20.0, 0.1).unwrap();
        let readout = Readout::at(&model, "s", 10.0);
        assert_eq!(readout.fraction_remaining, 1.0);
        assert_eq!(readout.value, 20.0);
    }

    #[test]
    fn atom_count_rounds_and_clamps() {
        assert_eq!(active_atoms(100.0, 100.0), 100);
        assert_eq!(active_atoms(0.674, 100.0), 1);
        assert_eq!(active_atoms(0.4, 100.0), 0);
        assert_eq!(active_atoms(250.0, 100.0), 100);
        assert_eq!(active_atoms(5.0, 0.0), 0);
    }
}
