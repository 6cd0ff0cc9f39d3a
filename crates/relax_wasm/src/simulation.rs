//! Browser-facing wrapper around a single simulation.

use crate::shared::{js_error, parse_settings};
use js_sys::Float64Array;
use relax_core::engine::Simulation;
use relax_core::model::ProcessKind;
use relax_core::playback::TickOutcome;
use relax_core::settings::SimulationSettings;
use relax_core::store::Field;
use serde_wasm_bindgen::to_value;
use std::time::Duration;
use wasm_bindgen::prelude::*;

/// WASM-exported simulation.
/// The page drives it by calling `tick()` from a 1000/60 ms interval, or
/// `advance(elapsedMs)` from an animation frame callback.
#[wasm_bindgen]
pub struct WasmSimulation {
    pub(crate) sim: Simulation,
}

fn build(kind: &str, settings: &SimulationSettings) -> Result<Simulation, JsValue> {
    let kind: ProcessKind = kind.parse().map_err(js_error)?;
    Simulation::new(kind, settings).map_err(js_error)
}

#[wasm_bindgen]
impl WasmSimulation {
    /// Create a simulation of `"cooling"` or `"decay"` with default settings.
    #[wasm_bindgen(constructor)]
    pub fn new(kind: &str) -> Result<WasmSimulation, JsValue> {
        console_error_panic_hook::set_once();
        Ok(WasmSimulation {
            sim: build(kind, &SimulationSettings::default())?,
        })
    }

    /// Create a simulation from a settings object.
    pub fn with_settings(kind: &str, settings_val: JsValue) -> Result<WasmSimulation, JsValue> {
        console_error_panic_hook::set_once();
        let settings = parse_settings(settings_val)
            .map_err(|err| JsValue::from_str(&format!("{err:#}")))?;
        Ok(WasmSimulation {
            sim: build(kind, &settings)?,
        })
    }

    pub fn kind(&self) -> String {
        self.sim.kind().to_string()
    }

    pub fn select_preset(&mut self, name: &str) -> Result<(), JsValue> {
        self.sim.select_preset(name).map(|_| ()).map_err(js_error)
    }

    pub fn set_parameter(&mut self, field: &str, value: f64) -> Result<(), JsValue> {
        let field: Field = field.parse().map_err(js_error)?;
        self.sim.set_parameter(field, value).map_err(js_error)
    }

    /// Current value of a parameter; `undefined` when unset or unknown.
    pub fn get_parameter(&self, field: &str) -> Option<f64> {
        let field: Field = field.parse().ok()?;
        self.sim.store().get(field)
    }

    pub fn preset_name(&self) -> Option<String> {
        self.sim.store().preset().map(|preset| preset.name.to_string())
    }

    pub fn is_locked(&self) -> bool {
        self.sim.store().is_locked()
    }

    pub fn start(&mut self) -> Result<(), JsValue> {
        self.sim.start().map(|_| ()).map_err(js_error)
    }

    pub fn toggle_pause(&mut self) -> Result<(), JsValue> {
        self.sim.toggle_pause().map(|_| ()).map_err(js_error)
    }

    pub fn seek(&mut self, t: f64) -> Result<(), JsValue> {
        self.sim.seek(t).map_err(js_error)
    }

    pub fn reset(&mut self) {
        self.sim.reset();
    }

    /// Apply one tick. Returns false when nothing moved (paused, idle, finished).
    pub fn tick(&mut self) -> bool {
        !matches!(self.sim.tick_live(), TickOutcome::Stale)
    }

    /// Apply every tick due after `elapsed_ms` milliseconds of wall-clock time.
    /// Gaps too long for a `Duration` saturate; catch-up is capped anyway.
    pub fn advance(&mut self, elapsed_ms: f64) -> u32 {
        if !(elapsed_ms.is_finite() && elapsed_ms > 0.0) {
            return 0;
        }
        let elapsed = Duration::try_from_secs_f64(elapsed_ms / 1000.0).unwrap_or(Duration::MAX);
        self.sim.advance(elapsed)
    }

    pub fn status(&self) -> String {
        self.sim.state().status.to_string()
    }

    pub fn simulated_time(&self) -> f64 {
        self.sim.state().simulated_time
    }

    pub fn total_duration(&self) -> Option<f64> {
        self.sim.playback().total_duration()
    }

    pub fn current_value(&self) -> Option<f64> {
        self.sim.current_value()
    }

    pub fn get_state(&self) -> Result<JsValue, JsValue> {
        to_value(&self.sim.state())
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }

    /// Series as `[{ time, value }, ...]`; empty while idle.
    pub fn get_series(&self) -> Result<JsValue, JsValue> {
        to_value(self.sim.series())
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }

    /// Series as an interleaved `[t0, v0, t1, v1, ...]` buffer.
    pub fn series_buffer(&self) -> Float64Array {
        Float64Array::from(self.sim.series().to_interleaved().as_slice())
    }

    pub fn get_readout(&self) -> Result<JsValue, JsValue> {
        to_value(&self.sim.readout())
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }

    pub fn get_presets(&self) -> Result<JsValue, JsValue> {
        to_value(self.sim.presets())
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }
}


#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use serde::Deserialize;
    use serde_wasm_bindgen::from_value;
    use wasm_bindgen_test::wasm_bindgen_test;

    fn message(err: JsValue) -> String {
        err.as_string().unwrap_or_default()
    }

    #[wasm_bindgen_test]
    fn rejects_unknown_kind() {
        let err = WasmSimulation::new("heating").err().expect("error");
        assert!(message(err).contains("unknown process kind"));
    }

    #[wasm_bindgen_test]
    fn rejects_negative_playback_duration() {
        let mut sim = WasmSimulation::new("cooling").expect("simulation");
        let err = sim
            .set_parameter("wallClockDurationSeconds", -1.0)
            .expect_err("negative duration");
        assert!(message(err).contains("Invalid parameter"));
        assert_eq!(sim.get_parameter("wallClockDurationSeconds"), Some(10.0));
    }

    #[wasm_bindgen_test]
    fn toggle_pause_while_idle_is_an_invalid_transition() {
        let mut sim = WasmSimulation::new("decay").expect("simulation");
        let err = sim.toggle_pause().expect_err("idle");
        assert!(message(err).contains("Cannot toggle pause while idle"));
    }

    #[wasm_bindgen_test]
    fn unknown_preset_is_not_found() {
        let mut sim = WasmSimulation::new("decay").expect("simulation");
        let err = sim.select_preset("Copper").expect_err("wrong catalog");
        assert!(message(err).contains("Preset not found"));
    }

    #[wasm_bindgen_test]
    fn settings_object_seeds_the_store() {
        let settings = SimulationSettings {
            decay_preset: "Radon-222".to_string(),
            initial_quantity: 64.0,
            ..SimulationSettings::default()
        };
        let sim = WasmSimulation::with_settings("decay", to_value(&settings).unwrap())
            .expect("simulation");
        assert_eq!(sim.preset_name().as_deref(), Some("Radon-222"));
        assert_eq!(sim.get_parameter("initialValue"), Some(64.0));
    }

    #[wasm_bindgen_test]
    fn invalid_settings_are_reported() {
        let err = WasmSimulation::with_settings("decay", JsValue::from_str("nope"))
            .err()
            .expect("error");
        assert!(message(err).contains("Invalid simulation settings"));
    }

    #[derive(Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct Point {
        time: f64,
    }

    #[wasm_bindgen_test]
    fn series_and_state_serialize() {
        let mut sim = WasmSimulation::new("cooling").expect("simulation");
        sim.start().expect("start");

        let points: Vec<Point> = from_value(sim.get_series().unwrap()).unwrap();
        assert_eq!(points.len(), 101);
        assert_eq!(points[0].time, 0.0);
        assert_eq!(sim.series_buffer().length(), 202);

        assert!(sim.get_state().unwrap().is_object());
        assert!(sim.get_readout().unwrap().is_object());
        assert!(sim.get_presets().unwrap().is_object());
    }
}
