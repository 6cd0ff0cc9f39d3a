//! Built-in material and isotope tables.

use crate::error::{EngineError, Result};
use crate::model::ProcessKind;
use serde::Serialize;

/// The physical constant a preset contributes to a model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum PresetRate {
    /// Cooling rate constant `k`, per unit of simulated time.
    RateConstant(f64),
    /// Decay half-life, in units of simulated time.
    HalfLife(f64),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessPreset {
    pub name: &'static str,
    /// Alternate names accepted by lookup (the Spanish catalog names).
    #[serde(skip)]
    pub aliases: &'static [&'static str],
    pub rate: PresetRate,
    pub unit_label: &'static str,
    pub description: &'static str,
}

impl ProcessPreset {
    pub fn kind(&self) -> ProcessKind {
        match self.rate {
            PresetRate::RateConstant(_) => ProcessKind::Cooling,
            PresetRate::HalfLife(_) => ProcessKind::Decay,
        }
    }

    pub fn rate_constant(&self) -> Option<f64> {
        match self.rate {
            PresetRate::RateConstant(k) => Some(k),
            PresetRate::HalfLife(_) => None,
        }
    }

    pub fn half_life(&self) -> Option<f64> {
        match self.rate {
            PresetRate::HalfLife(h) => Some(h),
            PresetRate::RateConstant(_) => None,
        }
    }

    /// True when `name` is this preset's name or one of its aliases, ignoring ASCII case.
    pub fn answers_to(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
            || self.aliases.iter().any(|alias| alias.eq_ignore_ascii_case(name))
    }

    /// Short selector label, e.g. `Copper (k ≈ 0.18)` or `Iodine-131 (8.02 days)`.
    pub fn label(&self) -> String {
        match self.rate {
            PresetRate::RateConstant(k) => format!("{} (k ≈ {})", self.name, k),
            PresetRate::HalfLife(h) => format!("{} ({} {})", self.name, h, self.unit_label),
        }
    }
}

const fn metal(
    name: &'static str,
    aliases: &'static [&'static str],
    k: f64,
    description: &'static str,
) -> ProcessPreset {
    ProcessPreset {
        name,
        aliases,
        rate: PresetRate::RateConstant(k),
        unit_label: "s",
        description,
    }
}

const fn isotope(
    name: &'static str,
    aliases: &'static [&'static str],
    half_life: f64,
    unit_label: &'static str,
    description: &'static str,
) -> ProcessPreset {
    ProcessPreset {
        name,
        aliases,
        rate: PresetRate::HalfLife(half_life),
        unit_label,
        description,
    }
}

pub static COOLING_PRESETS: [ProcessPreset; 8] = [
    metal("Aluminum", &["Aluminio"], 0.15, "Light metal, sheds heat quickly"),
    metal("Copper", &["Cobre"], 0.18, "Excellent thermal conductor"),
    metal("Iron", &["Hierro"], 0.10, "Moderate conductor"),
    metal("Steel", &["Acero"], 0.08, "Alloyed iron, holds heat longer"),
    metal("Silver", &["Plata"], 0.20, "Fastest cooling of the set"),
    metal("Brass", &["Latón"], 0.12, "Copper-zinc alloy"),
    metal("Bronze", &["Bronce"], 0.11, "Copper-tin alloy"),
    metal("Lead", &["Plomo"], 0.06, "Dense, slow to cool"),
];

pub static DECAY_PRESETS: [ProcessPreset; 5] = [
    isotope("Carbon-14", &["Carbono-14"], 5730.0, "years", "Archaeological dating"),
    isotope("Uranium-238", &["Uranio-238"], 4_468_000_000.0, "years", "Geological dating"),
    isotope("Iodine-131", &["Yodo-131"], 8.02, "days", "Nuclear medicine"),
    isotope("Radon-222", &["Radón-222"], 3.82, "days", "Environmental hazard"),
    isotope("Cesium-137", &["Cesio-137"], 30.17, "years", "Radiotherapy"),
];

/// An ordered, read-only view over one preset table.
#[derive(Debug, Clone, Copy)]
pub struct PresetCatalog {
    entries: &'static [ProcessPreset],
}

impl PresetCatalog {
    pub fn for_kind(kind: ProcessKind) -> Self {
        let entries: &'static [ProcessPreset] = match kind {
            ProcessKind::Cooling => &COOLING_PRESETS,
            ProcessKind::Decay => &DECAY_PRESETS,
        };
        Self { entries }
    }

    /// Find a preset by name or alias. Matching ignores ASCII case.
    pub fn lookup(&self, name: &str) -> Result<&'static ProcessPreset> {
        let name = name.trim();
        self.entries
            .iter()
            .find(|preset| preset.answers_to(name))
            .ok_or_else(|| EngineError::NotFound(name.to_string()))
    }

    pub fn entries(&self) -> &'static [ProcessPreset] {
        self.entries
    }
}

/// Search both tables.
pub fn lookup(name: &str) -> Result<&'static ProcessPreset> {
    PresetCatalog::for_kind(ProcessKind::Cooling)
        .lookup(name)
        .or_else(|_| PresetCatalog::for_kind(ProcessKind::Decay).lookup(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_finds_entries_in_either_table() {
        let copper = lookup("Copper").expect("copper");
        assert_eq!(copper.rate_constant(), Some(0.18));
        assert_eq!(copper.kind(), ProcessKind::Cooling);

        let carbon = lookup("carbon-14").expect("carbon");
        assert_eq!(carbon.half_life(), Some(5730.0));
        assert_eq!(carbon.unit_label, "years");
        assert_eq!(carbon.kind(), ProcessKind::Decay);
    }

    #[test]
    fn lookup_reports_unknown_names() {
        let err = lookup("Unobtainium").unwrap_err();
        assert_eq!(err, EngineError::NotFound("Unobtainium".to_string()));
    }

    #[test]
    fn kind_catalogs_do_not_cross() {
        let cooling = PresetCatalog::for_kind(ProcessKind::Cooling);
        assert!(cooling.lookup("Radon-222").is_err());
        assert_eq!(cooling.entries()[0].name, "Aluminum");
        assert_eq!(cooling.entries().len(), 8);

        let decay = PresetCatalog::for_kind(ProcessKind::Decay);
        assert!(decay.lookup("Lead").is_err());
        assert_eq!(decay.entries()[0].name, "Carbon-14");
    }

    #[test]
    fn every_preset_carries_a_positive_constant() {
        for preset in COOLING_PRESETS.iter().chain(DECAY_PRESETS.iter()) {
            let value = preset
                .rate_constant()
                .or(preset.half_life())
                .expect("constant");
            assert!(value.is_finite() && value > 0.0, "{}", preset.name);
            assert!(!preset.description.is_empty());
        }
    }

    #[test]
    fn labels_match_selector_text() {
        assert_eq!(lookup("Copper").unwrap().label(), "Copper (k ≈ 0.18)");
        assert_eq!(lookup("Iodine-131").unwrap().label(), "Iodine-131 (8.02 days)");
    }

    #[test]
    fn spanish_catalog_names_resolve_as_aliases() {
        assert_eq!(lookup("Cobre").unwrap().name, "Copper");
        assert_eq!(lookup("latón").unwrap().name, "Brass");
        assert_eq!(lookup("Carbono-14").unwrap().name, "Carbon-14");
        assert_eq!(lookup(" Radón-222 ").unwrap().name, "Radon-222");
        let decay = PresetCatalog::for_kind(ProcessKind::Decay);
        assert!(decay.lookup("Plomo").is_err());
    }
}
