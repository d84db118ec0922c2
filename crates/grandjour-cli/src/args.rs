use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cli::{ActivityCommands, PlanningCommands, TimelineCommands};

/// Main command-line interface for the Grand Jour coordination tool
///
/// Grand Jour assembles and maintains a chronological wedding-day
/// timeline from declared activities: it answers a short questionnaire,
/// computes concrete start and end times around the ceremony anchors,
/// and keeps the day consistent through every reorder, edit, and
/// anchor change.
#[derive(Parser)]
#[command(version, about, name = "gj")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/grandjour/grandjour.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands for the Grand Jour CLI
///
/// The CLI is organized into three main command categories:
/// - `planning`: Operations for managing plannings (create, list, archive, etc.)
/// - `activity`: Operations for individual timeline activities
/// - `timeline`: Whole-timeline operations (generate, show, rebase, import)
#[derive(Subcommand)]
pub enum Commands {
    /// Manage plannings
    #[command(alias = "p")]
    Planning {
        #[command(subcommand)]
        command: PlanningCommands,
    },
    /// Manage timeline activities
    #[command(alias = "a")]
    Activity {
        #[command(subcommand)]
        command: ActivityCommands,
    },
    /// Generate, inspect, and shift timelines
    #[command(alias = "t")]
    Timeline {
        #[command(subcommand)]
        command: TimelineCommands,
    },
}
