//! Presentation loop: advance the ecosystem turn by turn and render each frame.

use crate::render::render_frame;
use anyhow::Result;
use eco_core::HistorySummary;
use eco_world::Ecosystem;
use rand::Rng;
use std::future::Future;
use std::io::Write;
use tokio::time::{self, Duration, MissedTickBehavior};
use tracing::{debug, info};

const CLEAR_SCREEN: &str = "\x1B[2J\x1B[H";

#[derive(Debug, Clone)]
pub struct DriverOptions {
    /// Stop after this many completed turns in total
    pub max_turns: u64,
    /// Pause between frames; zero runs as fast as possible
    pub tick_interval: Duration,
    pub render: bool,
    /// Clear the terminal before each frame
    pub clear_screen: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// No cell holds an organism
    Extinct,
    TurnBudget,
    Interrupted,
}

/// Drive the ecosystem until extinction, the turn budget, or `shutdown` resolves
pub async fn run<R, W, S>(
    eco: &mut Ecosystem<R>,
    options: &DriverOptions,
    out: &mut W,
    shutdown: S,
) -> Result<StopReason>
where
    R: Rng,
    W: Write,
    S: Future<Output = ()>,
{
    tokio::pin!(shutdown);

    let mut ticker = (!options.tick_interval.is_zero()).then(|| {
        let mut ticker = time::interval(options.tick_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        ticker
    });

    info!(
        event = "run_start",
        start_turn = eco.turn(),
        max_turns = options.max_turns,
        counts = %eco.population_counts(),
        "Starting simulation"
    );

    let reason = loop {
        if !eco.has_living_organisms() {
            break StopReason::Extinct;
        }
        if eco.turn() >= options.max_turns {
            break StopReason::TurnBudget;
        }

        let outcome = eco.update();
        if outcome.season_changed {
            debug!(turn = outcome.turn, season = %eco.season(), "Season advanced");
        }

        if options.render {
            if options.clear_screen {
                write!(out, "{}", CLEAR_SCREEN)?;
            }
            let frame = render_frame(eco.grid(), eco.season(), eco.population_stats());
            write!(out, "{}", frame)?;
            out.flush()?;
        }

        let interrupted = match ticker.as_mut() {
            Some(ticker) => tokio::select! {
                _ = &mut shutdown => true,
                _ = ticker.tick() => false,
            },
            None => tokio::select! {
                biased;
                _ = &mut shutdown => true,
                _ = tokio::task::yield_now() => false,
            },
        };
        if interrupted {
            break StopReason::Interrupted;
        }
    };

    let summary = HistorySummary::from_history(eco.population_stats());
    info!(
        event = "run_complete",
        reason = ?reason,
        turns = summary.turns,
        final_counts = %summary.final_counts,
        peak_plants = summary.peak.plants,
        mean_plants = format!("{:.1}", summary.mean_plants),
        "Simulation finished"
    );

    Ok(reason)
}
