//! Sprout CLI Application
//!
//! Command-line interface for following crop growth journeys.

mod args;
mod cli;
mod mcp;
mod renderer;

use std::sync::Arc;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use log::info;
use mcp::{run_stdio_server, SproutMcpServer};
use renderer::TerminalRenderer;
use sprout_core::{Clock, FixedClock, SystemClock, TrackerBuilder};
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        database_file,
        no_color,
        cycle_days,
        today,
        command,
    } = Args::parse();

    let clock: Arc<dyn Clock> = match today {
        Some(date) => Arc::new(FixedClock(date)),
        None => Arc::new(SystemClock),
    };

    let tracker = TrackerBuilder::new()
        .with_database_path(database_file)
        .with_clock(clock)
        .with_cycle_days(cycle_days)
        .build()
        .await
        .context("Failed to initialize journey tracker")?;

    let renderer = TerminalRenderer::new(!no_color);

    info!("Sprout started");

    if let Some(Serve) = command {
        info!("Starting Sprout MCP server");
        return run_stdio_server(SproutMcpServer::new(tracker))
            .await
            .context("MCP server failed");
    }

    let cli = Cli::new(tracker, renderer);
    match command {
        Some(Login(args)) => cli.login(args).await,
        Some(Logout) => cli.logout().await,
        Some(Whoami) => cli.whoami(),
        Some(Journey { command }) => cli.handle_journey_command(command).await,
        Some(Daily { command }) => cli.handle_daily_command(command).await,
        Some(History) => cli.show_history().await,
        Some(Crop { command }) => cli.handle_crop_command(command).await,
        Some(User { command }) => cli.handle_user_command(command).await,
        Some(Recommend(args)) => cli.recommend(args),
        Some(Guide(args)) => cli.guide(args),
        Some(Serve) | None => cli.show_status().await,
    }
}
