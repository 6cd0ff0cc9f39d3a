//! Command/query façade over the parameter store and the playback controller.

use crate::clock::TickClock;
use crate::error::{EngineError, Result};
use crate::model::ProcessKind;
use crate::playback::{PlaybackController, PlaybackState, PlaybackStatus, TickOutcome, TickTask};
use crate::presets::ProcessPreset;
use crate::readout::Readout;
use crate::sampler::SampleSeries;
use crate::settings::SimulationSettings;
use crate::store::{Field, ParameterStore};
use std::time::Duration;

/// One independent simulation of a cooling or decay process.
#[derive(Debug, Clone)]
pub struct Simulation {
    store: ParameterStore,
    playback: PlaybackController,
    clock: TickClock,
}

impl Simulation {
    pub fn new(kind: ProcessKind, settings: &SimulationSettings) -> Result<Self> {
        let store = ParameterStore::new(kind, settings)?;
        Ok(Self {
            store,
            playback: PlaybackController::new(),
            clock: TickClock::new(settings.max_catch_up_ticks),
        })
    }

    pub fn from_store(store: ParameterStore) -> Self {
        Self {
            store,
            playback: PlaybackController::new(),
            clock: TickClock::default(),
        }
    }

    pub fn kind(&self) -> ProcessKind {
        self.store.kind()
    }

    pub fn store(&self) -> &ParameterStore {
        &self.store
    }

    pub fn playback(&self) -> &PlaybackController {
        &self.playback
    }

    pub fn presets(&self) -> &'static [ProcessPreset] {
        self.store.catalog().entries()
    }

    /// Edits while unlocked drop any leftover run.
    fn invalidate_run(&mut self) {
        if self.playback.status() != PlaybackStatus::Idle {
            self.playback.reset();
        }
        self.clock.reset();
    }

    pub fn select_preset(&mut self, name: &str) -> Result<&'static ProcessPreset> {
        let preset = self.store.select_preset(name)?;
        self.invalidate_run();
        Ok(preset)
    }

    pub fn set_parameter(&mut self, field: Field, value: f64) -> Result<()> {
        self.store.set_parameter(field, value)?;
        self.invalidate_run();
        Ok(())
    }

    /// Lock the parameters and begin playback.
    pub fn start(&mut self) -> Result<TickTask> {
        let status = self.playback.status();
        if status != PlaybackStatus::Idle {
            return Err(EngineError::InvalidTransition {
                command: "start",
                status,
            });
        }
        let (model, seconds) = self.store.lock()?;
        self.clock.reset();
        match self.playback.start(model, seconds) {
            Ok(task) => Ok(task),
            Err(err) => {
                self.store.unlock();
                Err(err)
            }
        }
    }

    pub fn toggle_pause(&mut self) -> Result<Option<TickTask>> {
        let task = self.playback.toggle_pause()?;
        self.clock.reset();
        Ok(task)
    }

    pub fn seek(&mut self, t: f64) -> Result<()> {
        self.playback.seek(t)
    }

    /// Discard the run and unlock the parameters.
    pub fn reset(&mut self) {
        self.playback.reset();
        self.store.unlock();
        self.clock.reset();
    }

    pub fn tick(&mut self, task: TickTask) -> TickOutcome {
        self.playback.tick(task)
    }

    /// Tick with whatever task is live.
    pub fn tick_live(&mut self) -> TickOutcome {
        match self.playback.live_task() {
            Some(task) => self.playback.tick(task),
            None => TickOutcome::Stale,
        }
    }

    /// Run every tick that falls due in `elapsed` wall-clock time.
    ///
    /// Returns the number of ticks applied.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        if self.playback.status() != PlaybackStatus::Running {
            self.clock.reset();
            return 0;
        }
        let due = self.clock.due(elapsed);
        let mut applied = 0;
        for _ in 0..due {
            match self.tick_live() {
                TickOutcome::Advanced(_) => applied += 1,
                TickOutcome::Completed(_) => {
                    applied += 1;
                    break;
                }
                TickOutcome::Stale => break,
            }
        }
        applied
    }

    pub fn state(&self) -> PlaybackState {
        self.playback.state()
    }

    /// Value at the current simulated time; the configured initial value while idle.
    pub fn current_value(&self) -> Option<f64> {
        self.playback
            .current_value()
            .or_else(|| self.store.get(Field::InitialValue))
    }

    pub fn series(&self) -> &SampleSeries {
        self.playback.series()
    }

    /// Readout for the active run, or for the pending parameters at time zero.
    pub fn readout(&self) -> Option<Readout> {
        let unit = self.store.preset().map_or("", |preset| preset.unit_label);
        match self.playback.model() {
            Some(model) => Some(Readout::at(model, unit, self.playback.simulated_time())),
            None => self
                .store
                .model()
                .ok()
                .map(|model| Readout::at(&model, unit, 0.0)),
        }
    }
}
