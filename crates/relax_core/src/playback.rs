//! Playback state machine driving the simulated clock.
//!
//! ```text
//! Idle --start--> Running <--toggle_pause--> Paused
//!                    |                          |
//!                    +------> Completed <-------+  (end reached or seek to end)
//! any --reset--> Idle
//! ```
//!
//! The repeating tick is represented by a [`TickTask`] token. Only the most
//! recently issued token is live; every transition out of `Running` revokes it
//! before returning, so a tick that was already scheduled with an older token
//! is observed as [`TickOutcome::Stale`] and changes nothing.

use crate::error::{EngineError, Result};
use crate::model::{check_positive, RelaxationModel};
use crate::sampler::{sample, SampleSeries};
use crate::traits::AnalyticSolution;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Logical tick rate of the playback clock.
pub const TICKS_PER_SECOND: f64 = 60.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PlaybackStatus {
    Idle,
    Running,
    Paused,
    Completed,
}

impl fmt::Display for PlaybackStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PlaybackStatus::Idle => "idle",
            PlaybackStatus::Running => "running",
            PlaybackStatus::Paused => "paused",
            PlaybackStatus::Completed => "completed",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaybackState {
    pub status: PlaybackStatus,
    pub simulated_time: f64,
    pub wall_clock_duration_seconds: f64,
}

/// Token for the live repeating tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TickTask {
    generation: u64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickOutcome {
    /// Simulated time moved forward to the contained value.
    Advanced(f64),
    /// The end of the run was reached; the task is finished.
    Completed(f64),
    /// The task was cancelled or the controller is not running.
    Stale,
}

#[derive(Debug, Clone)]
struct Run {
    model: RelaxationModel,
    total: f64,
    increment: f64,
}

#[derive(Debug, Clone)]
pub struct PlaybackController {
    status: PlaybackStatus,
    simulated_time: f64,
    wall_clock_duration_seconds: f64,
    run: Option<Run>,
    series: SampleSeries,
    live_task: Option<TickTask>,
    issued: u64,
}

impl Default for PlaybackController {
    fn default() -> Self {
        Self::new()
    }
}

impl PlaybackController {
    pub fn new() -> Self {
        Self {
            status: PlaybackStatus::Idle,
            simulated_time: 0.0,
            wall_clock_duration_seconds: 0.0,
            run: None,
            series: SampleSeries::default(),
            live_task: None,
            issued: 0,
        }
    }

    pub fn state(&self) -> PlaybackState {
        PlaybackState {
            status: self.status,
            simulated_time: self.simulated_time,
            wall_clock_duration_seconds: self.wall_clock_duration_seconds,
        }
    }

    pub fn status(&self) -> PlaybackStatus {
        self.status
    }

    pub fn simulated_time(&self) -> f64 {
        self.simulated_time
    }

    /// Samples of the active run; empty while idle.
    pub fn series(&self) -> &SampleSeries {
        &self.series
    }

    pub fn model(&self) -> Option<&RelaxationModel> {
        self.run.as_ref().map(|run| &run.model)
    }

    pub fn total_duration(&self) -> Option<f64> {
        self.run.as_ref().map(|run| run.total)
    }

    /// Simulated time added by one tick.
    pub fn increment(&self) -> Option<f64> {
        self.run.as_ref().map(|run| run.increment)
    }

    pub fn current_value(&self) -> Option<f64> {
        self.run
            .as_ref()
            .map(|run| run.model.value_at(self.simulated_time))
    }

    pub fn live_task(&self) -> Option<TickTask> {
        self.live_task
    }

    fn issue_task(&mut self) -> TickTask {
        self.issued += 1;
        let task = TickTask {
            generation: self.issued,
        };
        self.live_task = Some(task);
        task
    }

    fn cancel_task(&mut self) {
        if let Some(task) = self.live_task.take() {
            debug!("tick task {} cancelled", task.generation);
        }
    }

    fn forbid(&self, command: &'static str) -> EngineError {
        EngineError::InvalidTransition {
            command,
            status: self.status,
        }
    }

    /// Begin a run of `model` played back over `wall_clock_duration_seconds`.
    pub fn start(
        &mut self,
        model: RelaxationModel,
        wall_clock_duration_seconds: f64,
    ) -> Result<TickTask> {
        if self.status != PlaybackStatus::Idle {
            return Err(self.forbid("start"));
        }
        check_positive("wallClockDurationSeconds", wall_clock_duration_seconds)?;

        let total = model.total_duration();
        let increment = total / (wall_clock_duration_seconds * TICKS_PER_SECOND);
        if !(increment.is_finite() && increment > 0.0) {
            return Err(EngineError::invalid(
                "wallClockDurationSeconds",
                format!("gives an unusable tick increment ({increment})"),
            ));
        }

        self.cancel_task();
        self.series = sample(&model);
        self.run = Some(Run {
            model,
            total,
            increment,
        });
        self.simulated_time = 0.0;
        self.wall_clock_duration_seconds = wall_clock_duration_seconds;
        self.status = PlaybackStatus::Running;
        let task = self.issue_task();
        info!(
            "{} run started: {} simulated over {}s ({} per tick)",
            model.kind(),
            total,
            wall_clock_duration_seconds,
            increment
        );
        Ok(task)
    }

    /// Advance by one tick if `task` is still the live task.
    pub fn tick(&mut self, task: TickTask) -> TickOutcome {
        if self.live_task != Some(task) || self.status != PlaybackStatus::Running {
            return TickOutcome::Stale;
        }
        let Some(run) = self.run.as_ref() else {
            return TickOutcome::Stale;
        };

        let next = (self.simulated_time + run.increment).min(run.total);
        self.simulated_time = next;
        if next >= run.total {
            self.complete();
            TickOutcome::Completed(next)
        } else {
            TickOutcome::Advanced(next)
        }
    }

    fn complete(&mut self) {
        self.cancel_task();
        self.status = PlaybackStatus::Completed;
        info!("run completed at simulated time {}", self.simulated_time);
    }

    /// Flip between running and paused.
    ///
    /// Returns the new task when resuming and `None` when pausing.
    pub fn toggle_pause(&mut self) -> Result<Option<TickTask>> {
        match self.status {
            PlaybackStatus::Running => {
                self.cancel_task();
                self.status = PlaybackStatus::Paused;
                debug!("paused at simulated time {}", self.simulated_time);
                Ok(None)
            }
            PlaybackStatus::Paused => {
                self.status = PlaybackStatus::Running;
                debug!("resumed at simulated time {}", self.simulated_time);
                Ok(Some(self.issue_task()))
            }
            PlaybackStatus::Idle | PlaybackStatus::Completed => Err(self.forbid("toggle pause")),
        }
    }

    /// Jump to simulated time `t`, clamped to the run.
    ///
    /// Status is kept, except that landing on the end completes the run.
    pub fn seek(&mut self, t: f64) -> Result<()> {
        let total = match self.run.as_ref() {
            Some(run) if self.status != PlaybackStatus::Idle => run.total,
            _ => return Err(self.forbid("seek")),
        };
        if t.is_nan() {
            return Err(EngineError::invalid("time", "must be a number"));
        }

        self.simulated_time = t.clamp(0.0, total);
        debug!("seek to simulated time {}", self.simulated_time);
        if self.simulated_time >= total && self.status != PlaybackStatus::Completed {
            self.complete();
        }
        Ok(())
    }

    /// Discard the run and return to idle. Always succeeds.
    pub fn reset(&mut self) {
        self.cancel_task();
        self.run = None;
        self.series = SampleSeries::default();
        self.simulated_time = 0.0;
        self.wall_clock_duration_seconds = 0.0;
        if self.status != PlaybackStatus::Idle {
            debug!("playback reset from {}", self.status);
        }
        self.status = PlaybackStatus::Idle;
    }
}
