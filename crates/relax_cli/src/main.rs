//! # relax
//!
//! Runs a cooling or decay simulation in the terminal and prints the live
//! readout as playback advances.
//!
//! ```bash
//! # List the isotope table
//! relax presets decay
//!
//! # Cool a copper block from 90 °C in a 20 °C room over 5 seconds of playback
//! relax run cooling --preset Copper --initial 90 --ambient 20 --seconds 5 --realtime
//! ```

mod config;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use log::info;
use relax_core::clock::TickClock;
use relax_core::presets::PresetCatalog;
use relax_core::readout::{Readout, ATOM_GRID};
use relax_core::store::Field;
use relax_core::{PlaybackStatus, ProcessKind, Simulation, TickOutcome};
use std::path::PathBuf;
use std::thread;
use std::time::Instant;

/// relax - closed-form cooling and decay explorer
#[derive(Parser)]
#[command(name = "relax")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the built-in presets
    Presets {
        /// Only list presets for this process (cooling or decay)
        #[arg(value_name = "KIND")]
        kind: Option<ProcessKind>,
    },

    /// Run a simulation to completion
    Run(RunArgs),
}

#[derive(Args)]
struct RunArgs {
    /// Process to simulate (cooling or decay)
    #[arg(value_name = "KIND")]
    kind: ProcessKind,

    /// Material or isotope name
    #[arg(short, long)]
    preset: Option<String>,

    /// Initial temperature (cooling) or quantity (decay)
    #[arg(long, allow_negative_numbers = true)]
    initial: Option<f64>,

    /// Ambient temperature (cooling only)
    #[arg(long, allow_negative_numbers = true)]
    ambient: Option<f64>,

    /// Rate constant, overriding the preset
    #[arg(long)]
    rate: Option<f64>,

    /// Half-life, overriding the preset
    #[arg(long)]
    half_life: Option<f64>,

    /// Playback duration in wall-clock seconds
    #[arg(short, long)]
    seconds: Option<f64>,

    /// TOML settings file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Pace ticks in real time instead of running them back to back
    #[arg(long)]
    realtime: bool,

    /// Print a readout line every N ticks
    #[arg(short, long, default_value = "60")]
    every: u64,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    match cli.command {
        Commands::Presets { kind } => {
            run_presets(kind);
            Ok(())
        }
        Commands::Run(args) => run_simulation(args),
    }
}

fn run_presets(kind: Option<ProcessKind>) {
    let kinds = match kind {
        Some(kind) => vec![kind],
        None => vec![ProcessKind::Cooling, ProcessKind::Decay],
    };
    for kind in kinds {
        println!("{kind}:");
        for preset in PresetCatalog::for_kind(kind).entries() {
            println!("  {:<28} {}", preset.label(), preset.description);
        }
    }
}

/// Build the simulation described by the settings file and flags.
fn configure(args: &RunArgs) -> Result<Simulation> {
    let settings = config::load_settings(args.config.as_deref())?;
    let mut sim = Simulation::new(args.kind, &settings)?;

    if let Some(name) = &args.preset {
        sim.select_preset(name)?;
    }
    let overrides = [
        (Field::InitialValue, args.initial),
        (Field::AmbientTemperature, args.ambient),
        (Field::RateConstant, args.rate),
        (Field::HalfLife, args.half_life),
        (Field::WallClockDurationSeconds, args.seconds),
    ];
    for (field, value) in overrides {
        if let Some(value) = value {
            sim.set_parameter(field, value)
                .with_context(|| format!("Cannot apply --{}", flag_name(field)))?;
        }
    }
    Ok(sim)
}

fn flag_name(field: Field) -> &'static str {
    match field {
        Field::InitialValue => "initial",
        Field::AmbientTemperature => "ambient",
        Field::RateConstant => "rate",
        Field::HalfLife => "half-life",
        Field::WallClockDurationSeconds => "seconds",
    }
}

fn run_simulation(args: RunArgs) -> Result<()> {
    let mut sim = configure(&args)?;
    let every = args.every.max(1);

    sim.start()?;
    let total = sim.playback().total_duration().unwrap_or_default();
    info!(
        "Running {} simulation over {} simulated time units",
        sim.kind(),
        total
    );
    print_readout(&sim);

    let period = TickClock::default().period();
    let mut ticks: u64 = 0;
    let mut last = Instant::now();
    while sim.state().status == PlaybackStatus::Running {
        let applied = if args.realtime {
            thread::sleep(period);
            let now = Instant::now();
            let applied = sim.advance(now - last);
            last = now;
            u64::from(applied)
        } else {
            match sim.tick_live() {
                TickOutcome::Stale => 0,
                _ => 1,
            }
        };
        let before = ticks;
        ticks += applied;
        if ticks / every != before / every && sim.state().status == PlaybackStatus::Running {
            print_readout(&sim);
        }
    }

    print_readout(&sim);
    info!("Finished after {} ticks", ticks);
    Ok(())
}

fn print_readout(sim: &Simulation) {
    if let Some(readout) = sim.readout() {
        println!("{}", format_readout(&readout));
    }
}

fn format_readout(readout: &Readout) -> String {
    let mut line = format!(
        "t = {:>10.2} {:<5} value = {:>10.3}  remaining = {:>6.2}%  progress = {:>5.1}%",
        readout.display_time,
        readout.display_unit,
        readout.value,
        readout.fraction_remaining * 100.0,
        readout.progress * 100.0
    );
    if let Some(atoms) = readout.active_atoms {
        line.push_str(&format!("  atoms = {atoms}/{ATOM_GRID}"));
    }
    line
}
