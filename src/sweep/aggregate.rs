//! Aggregation of episode results into per-strategy and sweep-wide stats.
//!
//! Buckets accumulate incrementally so a full-grid sweep never holds
//! per-episode samples in memory. Merging two accumulators gives the
//! same result as recording into one, which is what lets the parallel
//! and sequential sweep paths share the reporting code.

use crate::types::GameStatus;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Accumulator
// ---------------------------------------------------------------------------

/// Running statistics over final bankrolls for one strategy bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleStats {
    episodes: u64,
    total: u128,
    min: u64,
    max: u64,
    busts: u64,
    caps: u64,
}

impl SampleStats {
    pub fn new() -> Self {
        SampleStats {
            episodes: 0,
            total: 0,
            min: u64::MAX,
            max: 0,
            busts: 0,
            caps: 0,
        }
    }

    /// Record one finished episode.
    pub fn record(&mut self, final_bankroll: u64, status: GameStatus) {
        self.episodes += 1;
        self.total += final_bankroll as u128;
        self.min = self.min.min(final_bankroll);
        self.max = self.max.max(final_bankroll);
        match status {
            GameStatus::Busted => self.busts += 1,
            GameStatus::Capped => self.caps += 1,
            _ => {}
        }
    }

    /// Combine two accumulators. Recording episodes into one stats
    /// value or into two merged halves gives identical results.
    pub fn merge(mut self, other: SampleStats) -> Self {
        self.episodes += other.episodes;
        self.total += other.total;
        self.min = self.min.min(other.min);
        self.max = self.max.max(other.max);
        self.busts += other.busts;
        self.caps += other.caps;
        self
    }

    pub fn episodes(&self) -> u64 {
        self.episodes
    }

    pub fn mean(&self) -> Option<f64> {
        if self.episodes == 0 {
            None
        } else {
            Some(self.total as f64 / self.episodes as f64)
        }
    }
}

impl Default for SampleStats {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Reported shapes
// ---------------------------------------------------------------------------

/// Aggregated result of one strategy bucket, as reported.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BucketStats {
    /// Bet percentage this bucket simulated.
    pub percentage: f64,
    pub episodes: u64,
    /// Average final bankroll across the bucket's episodes.
    pub avg: f64,
    pub min: u64,
    pub max: u64,
}

/// Whole-sweep summary across every bucket.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepSummary {
    pub episodes: u64,
    /// Percent of episodes that ended with an empty bankroll.
    pub bust_pct: f64,
    /// Percent of episodes that hit the bankroll cap.
    pub cap_pct: f64,
    pub avg_final_bankroll: f64,
}

/// Everything a finished sweep produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepOutcome {
    /// One row per strategy bucket, in grid order.
    pub table: Vec<BucketStats>,
    /// The winning bucket: highest average final bankroll, with ties
    /// broken towards the lowest percentage.
    pub best: BucketStats,
    pub summary: SweepSummary,
}

/// Build the sweep outcome from per-bucket accumulators.
///
/// Returns `None` when no bucket recorded any episode.
pub fn aggregate(rows: &[(f64, SampleStats)]) -> Option<SweepOutcome> {
    let table: Vec<BucketStats> = rows
        .iter()
        .filter(|(_, stats)| stats.episodes > 0)
        .map(|(percentage, stats)| BucketStats {
            percentage: *percentage,
            episodes: stats.episodes,
            avg: stats.total as f64 / stats.episodes as f64,
            min: stats.min,
            max: stats.max,
        })
        .collect();

    let best = select_best(&table)?;

    let combined = rows
        .iter()
        .fold(SampleStats::new(), |acc, (_, stats)| acc.merge(*stats));
    let episodes = combined.episodes;
    let summary = SweepSummary {
        episodes,
        bust_pct: combined.busts as f64 / episodes as f64 * 100.0,
        cap_pct: combined.caps as f64 / episodes as f64 * 100.0,
        avg_final_bankroll: combined.total as f64 / episodes as f64,
    };

    Some(SweepOutcome {
        table,
        best,
        summary,
    })
}

/// The bucket with the highest average final bankroll. Ties go to the
/// lowest percentage, so a cautious strategy wins over an equal bold one.
pub fn select_best(table: &[BucketStats]) -> Option<BucketStats> {
    table.iter().copied().reduce(|best, row| {
        if row.avg > best.avg || (row.avg == best.avg && row.percentage < best.percentage) {
            row
        } else {
            best
        }
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
