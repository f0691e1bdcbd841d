// main.rs - Desktop dashboard for Conway's Game of Life

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use conway_coro::GameConfig;
use conway_grid::patterns;
use eframe::egui;
use tracing_subscriber::EnvFilter;

mod ui;

use ui::DashboardApp;

#[derive(Parser, Debug)]
#[command(about = "Conway's Game of Life dashboard")]
struct Args {
    /// JSON file with game settings
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Pattern the first game starts from instead of the glider board
    #[arg(long, value_name = "NAME")]
    pattern: Option<String>,

    /// tracing filter, overrides RUST_LOG
    #[arg(long, value_name = "FILTER")]
    log: Option<String>,
}

fn init_tracing(filter: Option<&str>) {
    let filter = match filter {
        Some(filter) => EnvFilter::new(filter),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.log.as_deref());

    let config = GameConfig::load_or_default(args.config.as_deref())
        .context("failed to load config")?;
    let first_pattern = args
        .pattern
        .as_deref()
        .map(|name| patterns::find(name).ok_or_else(|| anyhow!("unknown pattern {name:?}")))
        .transpose()?;
    let runtime = tokio::runtime::Runtime::new().context("failed to start tokio runtime")?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 950.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Conway's Game of Life",
        options,
        Box::new(move |cc| Box::new(DashboardApp::new(cc, runtime, config, first_pattern))),
    )
    .map_err(|err| anyhow!("eframe: {err}"))
}
