//! Terminal viewer for targeting rules.
//!
//! Run with: `target-viewer <FILE>` for the interactive grid, or
//! `target-viewer dump <FILE>` to print the evaluated grid as JSON.
mod app;
mod config;
mod input;
mod loader;
mod logging;
mod presentation;

use std::path::PathBuf;

use anyhow::{Context, Result};
use app::ViewerApp;
use clap::{Parser, Subcommand, ValueEnum};
use config::ViewerConfig;
use presentation::terminal::{self, TerminalGuard};
use targeting_core::{RenderOptions, Visualizer};

/// Preview targeting rules on a grid
#[derive(Parser)]
#[command(name = "target-viewer")]
#[command(about = "Preview targeting rules on a grid", long_about = None)]
#[command(version)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    #[command(flatten)]
    view: ViewArgs,
}

#[derive(Subcommand)]
enum Command {
    /// Print the evaluated grid, summary, and warnings as JSON
    Dump(DumpArgs),
}

/// Interactive viewer arguments
#[derive(clap::Args)]
struct ViewArgs {
    /// Rule file to load
    file: Option<PathBuf>,

    /// Start with the dash-attack option enabled
    #[arg(long)]
    dash: bool,

    /// Extra note shown with the warnings (repeatable)
    #[arg(long = "warning", value_name = "TEXT")]
    warnings: Vec<String>,
}

#[derive(clap::Args)]
struct DumpArgs {
    /// Rule file to evaluate
    file: PathBuf,

    /// Evaluate with the dash-attack option enabled
    #[arg(long)]
    dash: bool,

    /// Obstacle layout to place before evaluating
    #[arg(long, value_enum, default_value_t = ObstacleLayout::None)]
    obstacles: ObstacleLayout,

    /// Cell to hover before evaluating, as ROW,COL
    #[arg(long, value_name = "ROW,COL", value_parser = parse_cell)]
    hover: Option<targeting_core::Cell>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum ObstacleLayout {
    None,
    Sample,
}

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = ViewerConfig::from_env();
    let cli = Cli::parse();

    match cli.command {
        Some(Command::Dump(args)) => dump(args, &config),
        None => view(cli.view, config),
    }
}

fn view(args: ViewArgs, config: ViewerConfig) -> Result<()> {
    let path = args
        .file
        .context("No rule file given. Usage: target-viewer <FILE>")?;

    logging::setup_file_logging(config.session_id.as_deref())?;

    let text = loader::load_rule(&path)?;
    let options = RenderOptions {
        dash_attack: args.dash || config.dash_attack,
        extra_warnings: args.warnings,
    };
    let mut visualizer = Visualizer::with_options(Default::default(), options);
    if config.sample_obstacles {
        visualizer.apply_sample_obstacles();
    }
    visualizer.render(&text);
    tracing::info!(path = %path.display(), summary = visualizer.summary(), "rule loaded");

    let mut tui = terminal::init()?;
    let _guard = TerminalGuard;

    ViewerApp::new(visualizer, path, config.ui).run(&mut tui)
}

fn dump(args: DumpArgs, config: &ViewerConfig) -> Result<()> {
    logging::setup_stderr_logging();

    let text = loader::load_rule(&args.file)?;
    let options = RenderOptions {
        dash_attack: args.dash || config.dash_attack,
        ..RenderOptions::default()
    };
    let mut visualizer = Visualizer::with_options(Default::default(), options);
    if args.obstacles == ObstacleLayout::Sample || config.sample_obstacles {
        visualizer.apply_sample_obstacles();
    }
    visualizer.render(&text);
    if let Some(cell) = args.hover {
        visualizer.hover(cell);
    }

    let report = visualizer.report();
    let json = serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
    println!("{json}");
    Ok(())
}

fn parse_cell(value: &str) -> Result<targeting_core::Cell, String> {
    let (row, col) = value
        .split_once(',')
        .ok_or_else(|| format!("expected ROW,COL, got `{value}`"))?;
    let parse = |part: &str| {
        part.trim()
            .parse::<i32>()
            .map_err(|err| format!("invalid coordinate `{part}`: {err}"))
    };
    Ok(targeting_core::Cell::new(parse(row)?, parse(col)?))
}
