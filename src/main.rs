//! Traitor Roulette command line.
//!
//! Entry point. Parses the CLI, initialises structured logging, and
//! dispatches either to the brute-force strategy sweep or to a single
//! interactive game on the terminal.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::io;
use std::path::Path;
use tracing::info;

use traitor_roulette::config::SweepConfig;
use traitor_roulette::console;
use traitor_roulette::game::{GameEngine, RandomWheel};
use traitor_roulette::report;
use traitor_roulette::sweep;

const BANNER: &str = r#"
 ____    ___   _   _  _      _____  _____  _____  _____
|  _ \  / _ \ | | | || |    | ____||_   _||_   _|| ____|
| |_) || | | || | | || |    |  _|    | |    | |  |  _|
|  _ < | |_| || |_| || |___ | |___   | |    | |  | |___
|_| \_\ \___/  \___/ |_____||_____|  |_|    |_|  |_____|

  Traitor Roulette: three rounds, one wheel, twelve traitors
  v0.1.0
"#;

#[derive(Parser)]
#[command(name = "traitor-roulette", version, about = "Traitor Roulette simulator and strategy search")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Brute-force the percentage grid and report the best strategy.
    Sweep(SweepArgs),
    /// Play one game interactively on the terminal.
    Play(PlayArgs),
}

#[derive(Args)]
struct SweepArgs {
    /// Config file to start from.
    #[arg(long)]
    config: Option<String>,

    /// Episodes per strategy bucket.
    #[arg(long)]
    iterations: Option<u64>,

    /// Episode budget split evenly across the whole grid.
    #[arg(long, conflicts_with = "iterations")]
    total_episodes: Option<u64>,

    /// Grid step in percentage points.
    #[arg(long)]
    step_size: Option<f64>,

    /// Starting bankroll in chips, a multiple of 2000.
    #[arg(long)]
    bankroll: Option<u64>,

    /// Base seed for reproducible sweeps.
    #[arg(long)]
    seed: Option<u64>,

    /// Run buckets on a single thread.
    #[arg(long)]
    sequential: bool,

    /// Directory reports are written to.
    #[arg(long)]
    output_dir: Option<String>,
}

#[derive(Args)]
struct PlayArgs {
    /// Starting bankroll in chips, a multiple of 2000.
    #[arg(long, default_value_t = 68_000)]
    bankroll: u64,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging();
    println!("{BANNER}");

    match cli.command {
        Command::Sweep(args) => run_sweep_command(args),
        Command::Play(args) => run_play_command(args),
    }
}

/// Resolve config and flags, run the sweep, print and save the reports.
fn run_sweep_command(args: SweepArgs) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => SweepConfig::load(path)?,
        None => SweepConfig::default(),
    };

    // Flags override the file. Setting one budget style clears the
    // other so a config file and a flag never conflict.
    if let Some(iterations) = args.iterations {
        config.episodes_per_strategy = Some(iterations);
        config.total_episodes = None;
    }
    if let Some(total) = args.total_episodes {
        config.total_episodes = Some(total);
        config.episodes_per_strategy = None;
    }
    if let Some(step) = args.step_size {
        config.step_size = step;
    }
    if let Some(bankroll) = args.bankroll {
        config.initial_bankroll = bankroll;
    }
    if let Some(seed) = args.seed {
        config.base_seed = seed;
    }
    if args.sequential {
        config.parallel = false;
    }
    if let Some(dir) = args.output_dir {
        config.output_dir = dir;
    }

    let plan = config.plan()?;
    info!(
        initial_bankroll = config.initial_bankroll,
        step_size = config.step_size,
        buckets = plan.percentages().len(),
        total_episodes = plan.total_episodes(),
        parallel = config.parallel,
        "sweep configured"
    );

    let outcome = if config.parallel {
        sweep::run_sweep(&plan)?
    } else {
        sweep::run_sweep_sequential(&plan)?
    };

    let mut stdout = io::stdout();
    report::write_summary(&outcome, &mut stdout)?;
    let saved = report::save_reports(&outcome, Path::new(&config.output_dir))?;
    println!("Results written to {}", saved.table_csv.display());

    Ok(())
}

/// Play one entropy-seeded game on stdin/stdout.
fn run_play_command(args: PlayArgs) -> Result<()> {
    let mut game = GameEngine::new(RandomWheel::from_entropy(), args.bankroll)?;
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();
    console::play_session(&mut game, &mut input, &mut output)
}

/// Initialise the `tracing` subscriber.
fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("traitor_roulette=info"));

    let json_logging = std::env::var("TRAITOR_ROULETTE_LOG_JSON").is_ok();

    if json_logging {
        fmt()
            .json()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_thread_ids(true)
            .init();
    } else {
        fmt()
            .with_env_filter(env_filter)
            .with_target(true)
            .init();
    }
}
