//! End-to-end sweep scenarios: plan from config, run, aggregate, report.

use std::fs;
use std::path::PathBuf;

use traitor_roulette::config::SweepConfig;
use traitor_roulette::report;
use traitor_roulette::sweep::{
    run_sweep, run_sweep_sequential, EpisodeBudget, SweepOutcome, SweepPlan,
};

fn small_plan() -> SweepPlan {
    SweepPlan::new(68_000, 25.0, EpisodeBudget::PerStrategy(200), 7).unwrap()
}

fn temp_path(name: &str) -> PathBuf {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .subsec_nanos();
    std::env::temp_dir().join(format!(
        "traitor-roulette-it-{}-{nanos}-{name}",
        std::process::id()
    ))
}

#[test]
fn sweep_is_reproducible_for_a_seed() {
    let first = run_sweep(&small_plan()).unwrap();
    let second = run_sweep(&small_plan()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn parallel_and_sequential_agree() {
    let plan = small_plan();
    let parallel = run_sweep(&plan).unwrap();
    let sequential = run_sweep_sequential(&plan).unwrap();
    assert_eq!(parallel, sequential);
}

#[test]
fn outcome_respects_game_bounds() {
    let outcome = run_sweep(&small_plan()).unwrap();

    assert_eq!(outcome.table.len(), 4);
    assert_eq!(outcome.summary.episodes, 800);
    for row in &outcome.table {
        assert_eq!(row.episodes, 200);
        assert!(row.max <= 204_000);
        assert!((row.min as f64) <= row.avg && row.avg <= (row.max as f64));
    }

    // Betting 100% every round either busts, caps, or triples, so the
    // extremes must actually be hit somewhere in 200 episodes.
    let all_in = outcome.table.last().unwrap();
    assert_eq!(all_in.percentage, 100.0);
    assert_eq!(all_in.min, 0);
    assert_eq!(all_in.max, 204_000);
}

#[test]
fn best_bucket_dominates_the_table() {
    let outcome = run_sweep(&small_plan()).unwrap();
    assert!(outcome.table.contains(&outcome.best));
    for row in &outcome.table {
        assert!(row.avg <= outcome.best.avg);
    }
}

#[test]
fn total_budget_is_split_across_the_grid() {
    let plan = SweepPlan::new(68_000, 25.0, EpisodeBudget::Total(80), 7).unwrap();
    let outcome = run_sweep(&plan).unwrap();
    assert_eq!(outcome.table.len(), 4);
    for row in &outcome.table {
        assert_eq!(row.episodes, 20);
    }
    assert_eq!(outcome.summary.episodes, 80);
}

#[test]
fn config_file_drives_a_whole_sweep() {
    let path = temp_path("config.toml");
    fs::write(
        &path,
        r#"
        initial_bankroll = 50000
        step_size = 20.0
        episodes_per_strategy = 100
        base_seed = 3
        "#,
    )
    .unwrap();

    let config = SweepConfig::load(path.to_str().unwrap()).unwrap();
    let plan = config.plan().unwrap();
    assert_eq!(plan.percentages(), &[20.0, 40.0, 60.0, 80.0, 100.0]);
    assert_eq!(plan.initial_bankroll(), 50_000);

    let outcome = run_sweep(&plan).unwrap();
    assert_eq!(outcome.summary.episodes, 500);
    for row in &outcome.table {
        assert!(row.max <= 150_000);
    }

    fs::remove_file(&path).unwrap();
}

#[test]
fn reports_land_on_disk_and_roundtrip() {
    let outcome = run_sweep(&small_plan()).unwrap();
    let dir = temp_path("reports");

    let saved = report::save_reports(&outcome, &dir).unwrap();

    let summary = fs::read_to_string(&saved.summary).unwrap();
    assert!(summary.contains("Episodes played: 800"));
    assert!(summary.contains("Best strategy: betting"));

    let csv = fs::read_to_string(&saved.table_csv).unwrap();
    assert_eq!(csv.lines().count(), outcome.table.len() + 1);
    assert!(csv.starts_with("percentage,avg,min,max"));

    let json = fs::read_to_string(&saved.table_json).unwrap();
    let parsed: SweepOutcome = serde_json::from_str(&json).unwrap();
    assert_eq!(outcome, parsed);

    fs::remove_dir_all(&dir).unwrap();
}
