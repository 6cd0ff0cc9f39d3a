//! WASM bindings for the Relax simulation engine.
//!
//! `WasmSimulation` wraps one engine instance; the free functions expose the
//! preset catalogs so the page can build its selectors before a simulation exists.

mod shared;
mod simulation;

pub use shared::{list_presets, preset_label};
pub use simulation::WasmSimulation;
