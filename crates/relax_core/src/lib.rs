pub mod clock;
pub mod engine;
pub mod error;
pub mod model;
pub mod playback;
pub mod presets;
pub mod readout;
pub mod sampler;
pub mod settings;
pub mod solver;
pub mod store;
/// The `relax_core` crate provides the simulation engine behind the Relax explorer.
/// It models two first-order linear processes with closed-form solutions:
/// Newton cooling toward an ambient temperature and radioactive decay toward zero.
///
/// Key components:
/// - **Presets**: static material and isotope tables.
/// - **Store**: validated user inputs, locked for the duration of a run.
/// - **Solver / Sampler**: analytic evaluation and the fixed 101-point plot series.
/// - **Playback**: the Idle/Running/Paused/Completed state machine and its tick tokens.
/// - **Engine**: the command/query façade tying the pieces together.
pub mod traits;

pub use engine::Simulation;
pub use error::{EngineError, Result};
pub use model::{ProcessKind, RelaxationModel};
pub use playback::{PlaybackState, PlaybackStatus, TickOutcome, TickTask};
pub use store::Field;
