//! Brute-force strategy sweep.
//!
//! A sweep walks a grid of bet percentages, plays a batch of episodes
//! for each, and aggregates final bankrolls into a comparison table.
//! Every episode gets its own pair of ChaCha streams derived from the
//! base seed and the episode's position in the sweep, so results are
//! reproducible and independent of how buckets are scheduled across
//! threads. The parallel and sequential paths run the exact same
//! per-bucket code and produce identical tables.

pub mod aggregate;

pub use aggregate::{aggregate, select_best, BucketStats, SampleStats, SweepOutcome, SweepSummary};

use crate::game::{GameEngine, RandomWheel};
use crate::strategy::size_bet;
use crate::types::{GameError, Prediction, BANKROLL_MULTIPLIER, BET_INCREMENT};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use tracing::{debug, info};

/// Smallest accepted grid step, in percentage points.
pub const MIN_STEP: f64 = 1e-6;

// ---------------------------------------------------------------------------
// Planning
// ---------------------------------------------------------------------------

/// How many episodes the sweep may spend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EpisodeBudget {
    /// Play this many episodes for every strategy bucket.
    PerStrategy(u64),
    /// Split this many episodes evenly across the grid.
    Total(u64),
}

/// A validated sweep: the grid, the per-bucket episode count, and the
/// seed everything derives from.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepPlan {
    initial_bankroll: u64,
    percentages: Vec<f64>,
    episodes_per_strategy: u64,
    base_seed: u64,
}

impl SweepPlan {
    /// Validate the inputs and lay out the grid.
    pub fn new(
        initial_bankroll: u64,
        step: f64,
        budget: EpisodeBudget,
        base_seed: u64,
    ) -> Result<Self, GameError> {
        if initial_bankroll == 0 || initial_bankroll % BET_INCREMENT != 0 {
            return Err(GameError::InvalidConfiguration(format!(
                "initial bankroll must be a positive multiple of {BET_INCREMENT}, got {initial_bankroll}"
            )));
        }
        if initial_bankroll.checked_mul(BANKROLL_MULTIPLIER).is_none() {
            return Err(GameError::InvalidConfiguration(format!(
                "initial bankroll {initial_bankroll} overflows the bankroll cap"
            )));
        }
        if !(MIN_STEP..=100.0).contains(&step) {
            return Err(GameError::InvalidConfiguration(format!(
                "step size must be between {MIN_STEP} and 100, got {step}"
            )));
        }

        let percentages = percentage_grid(step);
        let buckets = percentages.len() as u64;

        let episodes_per_strategy = match budget {
            EpisodeBudget::PerStrategy(episodes) => episodes,
            EpisodeBudget::Total(total) => total / buckets,
        };
        if episodes_per_strategy == 0 {
            return Err(GameError::InvalidConfiguration(format!(
                "episode budget {budget:?} allows no episodes for {buckets} strategy buckets"
            )));
        }

        // Each episode consumes two seed streams, so the whole sweep
        // must fit in half the stream space.
        let total = buckets
            .checked_mul(episodes_per_strategy)
            .and_then(|total| total.checked_mul(2))
            .ok_or_else(|| {
                GameError::InvalidConfiguration(format!(
                    "episode budget {budget:?} over {buckets} strategy buckets overflows"
                ))
            })?;
        debug!(
            buckets,
            episodes_per_strategy,
            total_episodes = total / 2,
            "sweep planned"
        );

        Ok(SweepPlan {
            initial_bankroll,
            percentages,
            episodes_per_strategy,
            base_seed,
        })
    }

    pub fn initial_bankroll(&self) -> u64 {
        self.initial_bankroll
    }

    pub fn percentages(&self) -> &[f64] {
        &self.percentages
    }

    pub fn episodes_per_strategy(&self) -> u64 {
        self.episodes_per_strategy
    }

    pub fn base_seed(&self) -> u64 {
        self.base_seed
    }

    pub fn total_episodes(&self) -> u64 {
        self.percentages.len() as u64 * self.episodes_per_strategy
    }
}

/// Lay out the percentage grid for a step size.
///
/// The grid has `floor(100 / step)` evenly spaced points ending at
/// exactly 100%, each rounded to six decimal places so neighbouring
/// points stay distinct and printable.
pub fn percentage_grid(step: f64) -> Vec<f64> {
    let run_count = (100.0 / step) as u64;
    (1..=run_count)
        .map(|i| round6(i as f64 / run_count as f64 * 100.0))
        .collect()
}

fn round6(value: f64) -> f64 {
    (value * 1e6).round() / 1e6
}

// ---------------------------------------------------------------------------
// Execution
// ---------------------------------------------------------------------------

/// The two ChaCha streams for one episode: one drives the wheel, one
/// drives the colour calls. Streams are indexed by the episode's
/// ordinal so neighbouring episodes never share randomness.
fn episode_rngs(base_seed: u64, ordinal: u64) -> (ChaCha8Rng, ChaCha8Rng) {
    let mut wheel = ChaCha8Rng::seed_from_u64(base_seed);
    wheel.set_stream(ordinal * 2);
    let mut calls = ChaCha8Rng::seed_from_u64(base_seed);
    calls.set_stream(ordinal * 2 + 1);
    (wheel, calls)
}

/// Play every episode of one strategy bucket.
fn run_bucket(plan: &SweepPlan, bucket_idx: usize, percentage: f64) -> Result<SampleStats, GameError> {
    let mut stats = SampleStats::new();
    for episode in 0..plan.episodes_per_strategy {
        let ordinal = bucket_idx as u64 * plan.episodes_per_strategy + episode;
        let (wheel_rng, mut calls) = episode_rngs(plan.base_seed, ordinal);
        let mut game = GameEngine::new(RandomWheel::new(wheel_rng), plan.initial_bankroll)?;
        while !game.has_game_ended() {
            let bet = size_bet(percentage, game.initial_bankroll(), game.bankroll());
            game.play(bet, Prediction::random(&mut calls))?;
        }
        stats.record(game.bankroll(), game.status());
    }
    debug!(percentage, episodes = stats.episodes(), "bucket finished");
    Ok(stats)
}

/// Run the sweep across all available cores.
pub fn run_sweep(plan: &SweepPlan) -> Result<SweepOutcome, GameError> {
    info!(
        buckets = plan.percentages.len(),
        episodes_per_strategy = plan.episodes_per_strategy,
        initial_bankroll = plan.initial_bankroll,
        seed = plan.base_seed,
        "starting strategy sweep"
    );
    let rows: Vec<(f64, SampleStats)> = plan
        .percentages
        .par_iter()
        .enumerate()
        .map(|(idx, &percentage)| run_bucket(plan, idx, percentage).map(|stats| (percentage, stats)))
        .collect::<Result<_, _>>()?;
    finish(plan, &rows)
}

/// Run the sweep on the calling thread. Produces the same table as
/// [`run_sweep`] for the same plan.
pub fn run_sweep_sequential(plan: &SweepPlan) -> Result<SweepOutcome, GameError> {
    info!(
        buckets = plan.percentages.len(),
        episodes_per_strategy = plan.episodes_per_strategy,
        initial_bankroll = plan.initial_bankroll,
        seed = plan.base_seed,
        "starting strategy sweep (sequential)"
    );
    let rows: Vec<(f64, SampleStats)> = plan
        .percentages
        .iter()
        .enumerate()
        .map(|(idx, &percentage)| run_bucket(plan, idx, percentage).map(|stats| (percentage, stats)))
        .collect::<Result<_, _>>()?;
    finish(plan, &rows)
}

fn finish(plan: &SweepPlan, rows: &[(f64, SampleStats)]) -> Result<SweepOutcome, GameError> {
    let outcome = aggregate(rows).ok_or_else(|| {
        GameError::InvalidConfiguration("sweep produced no episodes".to_string())
    })?;
    info!(
        best_percentage = outcome.best.percentage,
        best_avg = outcome.best.avg,
        episodes = plan.total_episodes(),
        bust_pct = outcome.summary.bust_pct,
        cap_pct = outcome.summary.cap_pct,
        "sweep complete"
    );
    Ok(outcome)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
