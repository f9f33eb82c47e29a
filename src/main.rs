//! Shaman Sphere - headless runner
//!
//! Builds a world from a config file (or the defaults), replays an optional
//! script of timed player commands, and runs the simulation for a fixed
//! number of simulated seconds.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use serde::Deserialize;

use shaman_sphere::command::{Command, CommandExecutor};
use shaman_sphere::core::config::SimulationConfig;
use shaman_sphere::core::error::Result;
use shaman_sphere::ecs::world::World;
use shaman_sphere::simulation::tick::SimulationEvent;

/// Headless colony simulation
#[derive(Parser, Debug)]
#[command(name = "shaman-sphere")]
#[command(about = "Run the colony simulation without a renderer")]
struct Args {
    /// TOML config file; built-in tuning when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Simulated seconds to run
    #[arg(long, default_value_t = 120.0)]
    seconds: f32,

    /// Seconds per tick
    #[arg(long, default_value_t = 1.0 / 60.0)]
    dt: f32,

    /// Random seed, overrides the config
    #[arg(long)]
    seed: Option<u64>,

    /// JSON file of timed commands: [{"at": 2.0, "command": {...}}, ...]
    #[arg(long)]
    commands: Option<PathBuf>,

    /// Print the final world snapshot as JSON
    #[arg(long)]
    snapshot: bool,

    /// Log every event and rejected command
    #[arg(long, short = 'v')]
    verbose: bool,
}

/// A command to apply once the simulation clock reaches `at`
#[derive(Debug, Deserialize)]
struct ScheduledCommand {
    at: f32,
    command: Command,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_filter = if args.verbose {
        "shaman_sphere=debug"
    } else {
        "shaman_sphere=info"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut config = match &args.config {
        Some(path) => SimulationConfig::load(path)?,
        None => SimulationConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }

    let mut script = match &args.commands {
        Some(path) => load_script(path)?,
        None => Vec::new(),
    };
    script.sort_by(|a, b| a.at.total_cmp(&b.at));
    let mut script = script.into_iter().peekable();

    let mut world = World::new(config)?;
    let dt = args.dt.max(f32::EPSILON);
    let total_ticks = (args.seconds / dt).ceil() as u64;
    let ticks_per_report = (1.0 / dt).round().max(1.0) as u64;

    tracing::info!(
        "Running {} ticks ({}s at dt={})",
        total_ticks,
        args.seconds,
        dt
    );

    for _ in 0..total_ticks {
        while let Some(next) = script.next_if(|c| c.at <= world.elapsed) {
            let result = CommandExecutor::execute(&mut world, &next.command);
            tracing::info!("t={:.2}s {:?} -> {:?}", world.elapsed, next.command, result);
        }

        for event in world.advance(dt) {
            log_event(&event);
        }

        if world.current_tick % ticks_per_report == 0 {
            tracing::info!(
                "t={:.0}s wood={:.1} pop={}/{} buildings={} enemies={} arrows={}",
                world.elapsed,
                world.ledger.wood,
                world.ledger.population,
                world.ledger.max_population_cap,
                world.entities.buildings.len(),
                world.entities.enemies.len(),
                world.entities.projectiles.len()
            );
        }
    }

    if args.snapshot {
        println!("{}", serde_json::to_string_pretty(&world.snapshot())?);
    }

    Ok(())
}

fn load_script(path: &Path) -> Result<Vec<ScheduledCommand>> {
    let content = fs::read_to_string(path)?;
    let script: Vec<ScheduledCommand> = serde_json::from_str(&content)?;
    tracing::info!("Loaded {} scripted commands from {:?}", script.len(), path);
    Ok(script)
}

fn log_event(event: &SimulationEvent) {
    match event {
        SimulationEvent::WoodDelivered { .. }
        | SimulationEvent::ProjectileFired { .. }
        | SimulationEvent::ProjectileHit { .. }
        | SimulationEvent::TreeFelled { .. } => tracing::debug!("{:?}", event),
        _ => tracing::info!("{:?}", event),
    }
}
