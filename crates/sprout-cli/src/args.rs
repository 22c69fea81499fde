use std::path::PathBuf;

use clap::{Parser, Subcommand};
use jiff::civil::Date;

use crate::cli::{
    CropCommands, DailyCommands, GuidanceArgs, JourneyCommands, LoginArgs, RecommendArgs,
    UserCommands,
};

/// Follow a crop from sowing to harvest
///
/// Sprout tracks one growth journey per account: which phase of the crop's
/// routine is active, what to do today and what comes next. Journeys, history
/// and the crop library live in a local SQLite database. The same operations
/// are available to AI assistants through an MCP server (`sprout serve`).
#[derive(Parser)]
#[command(version, about, name = "sprout")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/sprout/sprout.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Cycle length in days used for the progress percentage
    #[arg(long, global = true, default_value_t = sprout_core::DEFAULT_CYCLE_DAYS)]
    pub cycle_days: u32,

    /// Treat this date (YYYY-MM-DD) as today
    #[arg(long, global = true)]
    pub today: Option<Date>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands for the Sprout CLI
///
/// Without a command the active journey is shown.
#[derive(Subcommand)]
pub enum Commands {
    /// Sign in, creating the account on first use
    Login(LoginArgs),
    /// Sign out and clear the cached session
    Logout,
    /// Show the signed-in account
    Whoami,
    /// Follow the active growth journey
    #[command(alias = "j")]
    Journey {
        #[command(subcommand)]
        command: JourneyCommands,
    },
    /// Tick off today's routine for the current phase
    #[command(alias = "d")]
    Daily {
        #[command(subcommand)]
        command: DailyCommands,
    },
    /// List completed journeys
    History,
    /// Browse and manage the crop library
    #[command(alias = "c")]
    Crop {
        #[command(subcommand)]
        command: CropCommands,
    },
    /// Manage accounts (admin)
    #[command(alias = "u")]
    User {
        #[command(subcommand)]
        command: UserCommands,
    },
    /// Suggest crops for a soil type, season and climate
    Recommend(RecommendArgs),
    /// Show headline cultivation advice for a crop
    Guide(GuidanceArgs),
    /// Start the MCP server
    Serve,
}
