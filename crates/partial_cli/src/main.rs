//! Partial CLI
//!
//! Command-line interface for driving Partial sheets headlessly.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use partial_app::{HeadlessScenario, ScenarioRunner};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;

use config::{PartialConfig, CONFIG_FILE};

#[derive(Parser)]
#[command(name = "partial")]
#[command(author, version, about = "Drive and inspect Partial bottom sheets headlessly")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a headless gesture scenario
    Run {
        /// Scenario JSON file
        scenario: PathBuf,

        /// Configuration file or directory containing partial.toml
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Also write the JSON report to this file
        #[arg(short, long)]
        report: Option<PathBuf>,
    },

    /// Print the checkpoint layout for a container height
    Checkpoints {
        /// Container height (defaults to the configured headless height)
        #[arg(long)]
        height: Option<f32>,

        /// Configuration file or directory containing partial.toml
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Write a default partial.toml
    Init {
        /// Target directory
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            scenario,
            config,
            report,
        } => cmd_run(&scenario, config.as_deref(), report.as_deref()),
        Commands::Checkpoints { height, config } => cmd_checkpoints(height, config.as_deref()),
        Commands::Init { path, force } => cmd_init(&path, force),
    }
}

fn cmd_run(scenario_path: &Path, config: Option<&Path>, report_path: Option<&Path>) -> Result<()> {
    let config = PartialConfig::load(config)?;
    let scenario = HeadlessScenario::from_path(scenario_path)?;

    info!(
        scenario = %scenario_path.display(),
        steps = scenario.steps.len(),
        "running scenario"
    );

    let mut runner = ScenarioRunner::new(config.sheet, config.headless)?;
    let outcome = runner.run(&scenario);
    let report = outcome.report();

    report.write_to_writer(&mut io::stdout().lock())?;
    if let Some(path) = report_path {
        report.write_to_path(path)?;
        info!(path = %path.display(), "report written");
    }

    if outcome.is_failed() {
        bail!(
            "scenario failed at step {} ({}): {}",
            report.failed_step_index.unwrap_or_default(),
            report.assertion.as_deref().unwrap_or("unknown"),
            report.message.as_deref().unwrap_or("")
        );
    }
    Ok(())
}

fn cmd_checkpoints(height: Option<f32>, config: Option<&Path>) -> Result<()> {
    let config = PartialConfig::load(config)?;
    let height = height.unwrap_or(config.headless.height);
    let checkpoints = config
        .sheet
        .checkpoints(height)
        .with_context(|| format!("cannot lay out a sheet in a {height}pt container"))?;
    let initial = config.sheet.initial_offset(&checkpoints, height);

    println!("container height: {height}");
    println!("{:<8} {:>10} {:>10}", "state", "offset", "visible");
    for checkpoint in checkpoints.iter() {
        println!(
            "{:<8} {:>10.1} {:>10.1}",
            checkpoint.state.name(),
            checkpoint.offset,
            height - checkpoint.offset
        );
    }
    println!(
        "initial offset: {initial:.1} ({})",
        checkpoints.state_for(initial)
    );
    Ok(())
}

fn cmd_init(path: &Path, force: bool) -> Result<()> {
    fs::create_dir_all(path).with_context(|| format!("Failed to create {}", path.display()))?;

    let config_path = path.join(CONFIG_FILE);
    if config_path.exists() && !force {
        bail!(
            "{} already exists (use --force to overwrite)",
            config_path.display()
        );
    }

    let body = PartialConfig::default().to_toml()?;
    let content = format!("# Partial sheet configuration\n\n{body}");
    fs::write(&config_path, content)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;

    info!(path = %config_path.display(), "created config");
    Ok(())
}
