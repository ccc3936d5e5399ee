//! EcoSim command-line driver.
//!
//! Runs a seasonal grid ecosystem in the terminal, rendering the grid and the
//! population trends every turn until nothing is alive or the turn budget runs out.

mod driver;
mod export;
mod render;
mod telemetry;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use driver::{DriverOptions, StopReason};
use eco_core::{HistorySummary, RunConfig};
use eco_world::Ecosystem;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::io;
use std::path::PathBuf;
use tokio::signal;
use tokio::time::Duration;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "ecosim")]
#[command(version)]
#[command(about = "Seasonal grid ecosystem of plants, herbivores and carnivores")]
struct Cli {
    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a new simulation
    Run {
        /// Configuration file (JSON); defaults are used when omitted
        #[arg(short, long)]
        config: Option<PathBuf>,

        #[command(flatten)]
        overrides: RunOverrides,

        /// Grid width and height
        #[arg(long)]
        size: Option<usize>,
    },

    /// Continue a simulation from a saved snapshot
    Resume {
        /// Snapshot file written by `run --snapshot-out`
        #[arg(short, long)]
        snapshot: PathBuf,

        #[command(flatten)]
        overrides: RunOverrides,
    },

    /// Write the default configuration file
    Init {
        #[arg(short, long, default_value = "ecosim.json")]
        output: PathBuf,
    },

    /// Print a summary of a saved snapshot
    Inspect {
        snapshot: PathBuf,

        /// Dump the whole snapshot as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(clap::Args)]
struct RunOverrides {
    /// Random seed for reproducibility
    #[arg(long)]
    seed: Option<u64>,

    /// Turn budget
    #[arg(short, long)]
    turns: Option<u64>,

    /// Milliseconds between frames
    #[arg(short, long)]
    interval_ms: Option<u64>,

    /// Do not render frames
    #[arg(long)]
    no_render: bool,

    /// Export the population history as JSON when the run ends
    #[arg(long)]
    history_out: Option<PathBuf>,

    /// Save an ecosystem snapshot when the run ends
    #[arg(long)]
    snapshot_out: Option<PathBuf>,
}

impl RunOverrides {
    fn apply(&self, config: &mut RunConfig) {
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(turns) = self.turns {
            config.max_turns = turns;
        }
        if let Some(interval) = self.interval_ms {
            config.tick_interval_ms = interval;
        }
    }

    fn driver_options(&self, config: &RunConfig) -> DriverOptions {
        DriverOptions {
            max_turns: config.max_turns,
            tick_interval: Duration::from_millis(config.tick_interval_ms),
            render: !self.no_render,
            clear_screen: !self.no_render,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    telemetry::init_telemetry(cli.log_json)?;

    match cli.command {
        Commands::Run {
            config,
            overrides,
            size,
        } => {
            let mut run_config = match config {
                Some(path) => RunConfig::from_file(&path)
                    .with_context(|| format!("loading config {}", path.display()))?,
                None => RunConfig::default(),
            };
            overrides.apply(&mut run_config);
            if let Some(size) = size {
                run_config.ecosystem.size = size;
            }
            run_config.validate()?;

            info!(
                seed = run_config.seed,
                size = run_config.ecosystem.size,
                plants = run_config.population.plants,
                herbivores = run_config.population.herbivores,
                carnivores = run_config.population.carnivores,
                "Creating ecosystem"
            );

            let mut eco = Ecosystem::from_config(run_config.ecosystem.clone(), run_config.seed)?;
            let population = &run_config.population;
            eco.populate(population.plants, population.herbivores, population.carnivores)?;

            drive(&mut eco, &overrides, &run_config).await
        }

        Commands::Resume {
            snapshot,
            overrides,
        } => {
            let snapshot = export::read_snapshot(&snapshot)?;
            let mut run_config = RunConfig {
                ecosystem: snapshot.config.clone(),
                ..Default::default()
            };
            overrides.apply(&mut run_config);

            info!(
                turn = snapshot.turn,
                season = %snapshot.season(),
                seed = run_config.seed,
                "Resuming from snapshot"
            );

            run_config.max_turns = session_budget(run_config.max_turns, snapshot.turn);
            let mut eco = Ecosystem::restore(snapshot, ChaCha8Rng::seed_from_u64(run_config.seed))?;
            drive(&mut eco, &overrides, &run_config).await
        }

        Commands::Init { output } => {
            RunConfig::default().save(&output)?;
            info!("Default configuration written to {}", output.display());
            Ok(())
        }

        Commands::Inspect { snapshot, json } => {
            let snapshot = export::read_snapshot(&snapshot)?;
            if json {
                println!("{}", snapshot.to_json()?);
                return Ok(());
            }

            let summary = HistorySummary::from_history(&snapshot.history);
            println!("Snapshot v{} taken at {}", snapshot.version, snapshot.timestamp);
            println!("Grid:          {0}x{0}", snapshot.config.size);
            println!("Turn:          {}", snapshot.turn);
            println!("Season:        {}", snapshot.season());
            println!("Final counts:  {}", summary.final_counts);
            println!("Peak counts:   {}", summary.peak);
            println!("Mean plants:   {:.1}", summary.mean_plants);
            Ok(())
        }
    }
}

/// Total turn limit for a resumed run; the budget counts turns run in this session
fn session_budget(turns: u64, start_turn: u64) -> u64 {
    turns.saturating_add(start_turn)
}

async fn drive(
    eco: &mut Ecosystem<ChaCha8Rng>,
    overrides: &RunOverrides,
    config: &RunConfig,
) -> Result<()> {
    let options = overrides.driver_options(config);
    let mut stdout = io::stdout().lock();
    let reason = driver::run(eco, &options, &mut stdout, shutdown_signal()).await?;

    if reason == StopReason::Extinct {
        warn!(turn = eco.turn(), "No living organisms remain");
    }

    if let Some(path) = &overrides.history_out {
        export::write_history_json(path, eco.population_stats())?;
    }
    if let Some(path) = &overrides.snapshot_out {
        export::write_snapshot(path, &eco.snapshot())?;
    }
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
