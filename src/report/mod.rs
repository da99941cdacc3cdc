//! Report rendering for finished sweeps.
//!
//! Writers take any `io::Write` sink so the CLI can point them at
//! stdout or at files, and tests at byte buffers. Saved files get a
//! timestamp in the name so consecutive sweeps never clobber each
//! other.

use crate::sweep::SweepOutcome;
use anyhow::{Context, Result};
use chrono::Local;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::info;

/// Human-readable summary of the whole sweep.
pub fn write_summary<W: Write>(outcome: &SweepOutcome, sink: &mut W) -> io::Result<()> {
    writeln!(sink, "Episodes played: {}", outcome.summary.episodes)?;
    writeln!(
        sink,
        "Percentage of games where the player went bust: {:.2}%",
        outcome.summary.bust_pct
    )?;
    writeln!(
        sink,
        "Percentage of games where the player hit the max bankroll: {:.2}%",
        outcome.summary.cap_pct
    )?;
    writeln!(
        sink,
        "Average bankroll at the end of the game: {:.2}",
        outcome.summary.avg_final_bankroll
    )?;
    writeln!(
        sink,
        "Best strategy: betting {}% of bankroll (avg {:.2} over {} episodes, min {}, max {})",
        outcome.best.percentage,
        outcome.best.avg,
        outcome.best.episodes,
        outcome.best.min,
        outcome.best.max
    )?;
    Ok(())
}

/// The per-strategy table as CSV, one row per bucket in grid order.
pub fn write_table_csv<W: Write>(outcome: &SweepOutcome, sink: &mut W) -> io::Result<()> {
    writeln!(sink, "percentage,avg,min,max")?;
    for row in &outcome.table {
        writeln!(sink, "{},{},{},{}", row.percentage, row.avg, row.min, row.max)?;
    }
    Ok(())
}

/// The whole outcome (table, best bucket, summary) as pretty JSON.
pub fn write_table_json<W: Write>(outcome: &SweepOutcome, sink: &mut W) -> Result<()> {
    let json = serde_json::to_string_pretty(outcome).context("Failed to serialize sweep outcome")?;
    sink.write_all(json.as_bytes())?;
    sink.write_all(b"\n")?;
    Ok(())
}

/// A file path like `dir/name_20260821_1530.ext`.
pub fn timestamped_path(dir: &Path, name: &str, ext: &str) -> PathBuf {
    let stamp = Local::now().format("%Y%m%d_%H%M");
    dir.join(format!("{name}_{stamp}.{ext}"))
}

/// Where `save_reports` wrote its files.
#[derive(Debug, Clone)]
pub struct SavedReports {
    pub summary: PathBuf,
    pub table_csv: PathBuf,
    pub table_json: PathBuf,
}

/// Write the summary, the CSV table, and the JSON outcome into `dir`.
pub fn save_reports(outcome: &SweepOutcome, dir: &Path) -> Result<SavedReports> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;

    let summary = timestamped_path(dir, "sweep_summary", "txt");
    let mut sink = fs::File::create(&summary)
        .with_context(|| format!("Failed to create report file: {}", summary.display()))?;
    write_summary(outcome, &mut sink)?;

    let table_csv = timestamped_path(dir, "sweep_results", "csv");
    let mut sink = fs::File::create(&table_csv)
        .with_context(|| format!("Failed to create report file: {}", table_csv.display()))?;
    write_table_csv(outcome, &mut sink)?;

    let table_json = timestamped_path(dir, "sweep_results", "json");
    let mut sink = fs::File::create(&table_json)
        .with_context(|| format!("Failed to create report file: {}", table_json.display()))?;
    write_table_json(outcome, &mut sink)?;

    info!(
        summary = %summary.display(),
        table_csv = %table_csv.display(),
        table_json = %table_json.display(),
        "reports saved"
    );
    Ok(SavedReports {
        summary,
        table_csv,
        table_json,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sweep::{BucketStats, SweepSummary};

    fn make_outcome() -> SweepOutcome {
        let table = vec![
            BucketStats {
                percentage: 25.0,
                episodes: 100,
                avg: 60_000.0,
                min: 0,
                max: 204_000,
            },
            BucketStats {
                percentage: 50.0,
                episodes: 100,
                avg: 75_000.0,
                min: 0,
                max: 204_000,
            },
        ];
        SweepOutcome {
            best: table[1],
            table,
            summary: SweepSummary {
                episodes: 200,
                bust_pct: 12.5,
                cap_pct: 8.0,
                avg_final_bankroll: 67_500.0,
            },
        }
    }

    fn temp_report_dir() -> PathBuf {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .subsec_nanos();
        std::env::temp_dir().join(format!("traitor-roulette-test-{}-{nanos}", std::process::id()))
    }

    // -- writer tests --

    #[test]
    fn test_summary_lines() {
        let mut sink = Vec::new();
        write_summary(&make_outcome(), &mut sink).unwrap();
        let text = String::from_utf8(sink).unwrap();
        assert!(text.contains("Episodes played: 200"));
        assert!(text.contains("went bust: 12.50%"));
        assert!(text.contains("hit the max bankroll: 8.00%"));
        assert!(text.contains("Average bankroll at the end of the game: 67500.00"));
        assert!(text.contains("Best strategy: betting 50% of bankroll"));
    }

    #[test]
    fn test_csv_shape() {
        let mut sink = Vec::new();
        write_table_csv(&make_outcome(), &mut sink).unwrap();
        let text = String::from_utf8(sink).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "percentage,avg,min,max");
        assert_eq!(lines[1], "25,60000,0,204000");
        assert_eq!(lines[2], "50,75000,0,204000");
    }

    #[test]
    fn test_json_roundtrip() {
        let outcome = make_outcome();
        let mut sink = Vec::new();
        write_table_json(&outcome, &mut sink).unwrap();
        let parsed: SweepOutcome = serde_json::from_slice(&sink).unwrap();
        assert_eq!(outcome, parsed);
    }

    // -- path tests --

    #[test]
    fn test_timestamped_path_shape() {
        let path = timestamped_path(Path::new("output"), "sweep_results", "csv");
        let name = path.file_name().unwrap().to_str().unwrap();
        assert!(path.starts_with("output"));
        assert!(name.starts_with("sweep_results_"));
        assert!(name.ends_with(".csv"));
        // sweep_results_YYYYmmdd_HHMM.csv
        assert_eq!(name.len(), "sweep_results_".len() + 13 + ".csv".len());
    }

    // -- save tests --

    #[test]
    fn test_save_reports_writes_all_files() {
        let dir = temp_report_dir();
        let saved = save_reports(&make_outcome(), &dir).unwrap();

        assert!(saved.summary.exists());
        assert!(saved.table_csv.exists());
        assert!(saved.table_json.exists());

        let csv = fs::read_to_string(&saved.table_csv).unwrap();
        assert!(csv.starts_with("percentage,avg,min,max"));

        fs::remove_dir_all(&dir).unwrap();
    }
}
