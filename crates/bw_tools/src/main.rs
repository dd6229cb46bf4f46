//! bw-oracle - frame queries over a scenario.
//!
//! # Usage
//!
//! ```bash
//! # Answer JSON-lines requests on stdin for one scenario
//! cargo run -p bw_tools --bin bw-oracle -- serve --scenario demos/scenarios/terran_opening.ron
//!
//! # Check every scenario in a directory
//! cargo run -p bw_tools --bin bw-oracle -- validate demos/scenarios
//! ```
//!
//! Responses go to stdout, logs to stderr. See the protocol module for the
//! request and response format.

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use bw_tools::config::OracleConfig;
use bw_tools::runner::{QueryRunner, RunnerConfig};
use bw_tools::scenario::Scenario;
use bw_tools::validate::validate_scenario_directory;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "bw-oracle")]
#[command(about = "Placement, legality, power, damage and path queries over a match snapshot")]
#[command(version)]
struct Cli {
    /// Config file (RON)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Answer requests from stdin
    Serve {
        /// Scenario file to load
        #[arg(short, long)]
        scenario: Option<PathBuf>,

        /// Default build-site search range in tiles
        #[arg(long)]
        range: Option<i32>,

        /// Pretty-print responses
        #[arg(long)]
        pretty: bool,
    },

    /// Validate scenario files
    Validate {
        /// Directory of scenarios
        #[arg(default_value = "demos/scenarios")]
        path: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => match OracleConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("bw-oracle: {e}");
                return ExitCode::FAILURE;
            }
        },
        None => OracleConfig::default(),
    };

    // Logs go to stderr; stdout is for protocol
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_filter))
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();

    match cli.command {
        Commands::Serve { scenario, range, pretty } => cmd_serve(config, scenario, range, pretty),
        Commands::Validate { path } => cmd_validate(&path),
    }
}

fn cmd_serve(config: OracleConfig, scenario: Option<PathBuf>, range: Option<i32>, pretty: bool) -> ExitCode {
    let Some(path) = scenario.or(config.scenario) else {
        tracing::error!("No scenario given; pass --scenario or set one in the config");
        return ExitCode::FAILURE;
    };
    let runner_config = RunnerConfig {
        build_search_range: range.unwrap_or(config.build_search_range),
        pretty: pretty || config.pretty,
    };

    let mut runner = match Scenario::load(&path).and_then(|s| QueryRunner::from_scenario(&s, runner_config)) {
        Ok(runner) => runner,
        Err(e) => {
            tracing::error!("Cannot load {}: {e}", path.display());
            return ExitCode::FAILURE;
        }
    };
    tracing::info!("Serving {}", path.display());

    match runner.run(io::stdin().lock(), io::stdout().lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("IO error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn cmd_validate(path: &std::path::Path) -> ExitCode {
    tracing::info!("Validating scenarios in: {}", path.display());
    let reports = match validate_scenario_directory(path) {
        Ok(reports) => reports,
        Err(e) => {
            tracing::error!("Cannot read {}: {e}", path.display());
            return ExitCode::FAILURE;
        }
    };

    let failed = reports.iter().filter(|r| r.error.is_some()).count();
    for report in &reports {
        match &report.error {
            Some(e) => println!("FAIL {}: {e}", report.path.display()),
            None => println!("ok   {}", report.path.display()),
        }
    }
    if failed == 0 {
        tracing::info!("Validation passed ({} scenarios)", reports.len());
        ExitCode::SUCCESS
    } else {
        tracing::error!("{failed} of {} scenarios failed", reports.len());
        ExitCode::FAILURE
    }
}
