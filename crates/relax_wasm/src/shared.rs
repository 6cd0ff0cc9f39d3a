//! Conversions between engine types and JS values.

use anyhow::anyhow;
use relax_core::error::EngineError;
use relax_core::presets::{PresetCatalog, ProcessPreset};
use relax_core::settings::SimulationSettings;
use relax_core::ProcessKind;
use serde_wasm_bindgen::{from_value, to_value};
use wasm_bindgen::prelude::*;

pub(crate) fn js_error(err: EngineError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Deserialize and validate a settings object; missing keys take their defaults.
pub(crate) fn parse_settings(value: JsValue) -> anyhow::Result<SimulationSettings> {
    let settings: SimulationSettings =
        from_value(value).map_err(|e| anyhow!("Invalid simulation settings: {}", e))?;
    settings
        .validate()
        .map_err(|e| anyhow!(e).context("Invalid simulation settings"))?;
    Ok(settings)
}

/// Catalog of `"cooling"` or `"decay"` presets, for populating selectors.
#[wasm_bindgen]
pub fn list_presets(kind: &str) -> Result<JsValue, JsValue> {
    let kind: ProcessKind = kind.parse().map_err(js_error)?;
    let entries: &[ProcessPreset] = PresetCatalog::for_kind(kind).entries();
    to_value(entries).map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

/// Selector label of a preset in either catalog.
#[wasm_bindgen]
pub fn preset_label(name: &str) -> Result<String, JsValue> {
    relax_core::presets::lookup(name)
        .map(|preset| preset.label())
        .map_err(js_error)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preset_label_resolves_known_names() {
        assert_eq!(preset_label("Bronze").unwrap(), "Bronze (k ≈ 0.11)");
        assert_eq!(preset_label("Radon-222").unwrap(), "Radon-222 (3.82 days)");
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::wasm_bindgen_test;

    #[wasm_bindgen_test]
    fn list_presets_returns_an_array() {
        let value = list_presets("decay").expect("presets");
        assert!(js_sys::Array::is_array(&value));
        assert_eq!(js_sys::Array::from(&value).length(), 5);
    }

    #[wasm_bindgen_test]
    fn parse_settings_fills_missing_keys() {
        let partial = js_sys::Object::new();
        js_sys::Reflect::set(&partial, &"playback_seconds".into(), &4.0.into()).unwrap();
        let settings = parse_settings(partial.into()).expect("settings");
        assert_eq!(settings.playback_seconds, 4.0);
        assert_eq!(settings.cooling_preset, "Aluminum");
    }

    #[wasm_bindgen_test]
    fn parse_settings_rejects_invalid_values() {
        let partial = js_sys::Object::new();
        js_sys::Reflect::set(&partial, &"decay_preset".into(), &"Kryptonite".into()).unwrap();
        let err = parse_settings(partial.into()).unwrap_err();
        assert!(format!("{err:#}").contains("Preset not found"));
    }
}
