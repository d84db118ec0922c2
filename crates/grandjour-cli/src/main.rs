//! Grand Jour CLI Application
//!
//! Command-line interface for the Grand Jour wedding day-of coordination
//! tool.

mod args;
mod cli;
mod renderer;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use grandjour_core::{params::ListPlannings, CoordinatorBuilder};
use log::info;
use renderer::TerminalRenderer;
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args { database_file, no_color, command } = Args::parse();

    let coordinator = CoordinatorBuilder::new()
        .with_database_path(database_file)
        .build()
        .await
        .context("Failed to initialize coordinator")?;

    let renderer = TerminalRenderer::new(!no_color);

    info!("Grand Jour started");

    match command {
        Some(Planning { command }) => {
            Cli::new(coordinator, renderer)
                .handle_planning_command(command)
                .await
        }
        Some(Activity { command }) => {
            Cli::new(coordinator, renderer)
                .handle_activity_command(command)
                .await
        }
        Some(Timeline { command }) => {
            Cli::new(coordinator, renderer)
                .handle_timeline_command(command)
                .await
        }
        None => {
            Cli::new(coordinator, renderer)
                .list_plannings(&ListPlannings { archived: false })
                .await
        }
    }
}
