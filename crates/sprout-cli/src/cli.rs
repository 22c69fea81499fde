//! Command-line argument wrappers and command handlers.
//!
//! Argument structs carry the clap derives and convert into the core
//! parameter types with `From`, so core params stay free of CLI concerns:
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → JourneyTracker
//! ```
//!
//! [`Cli`] runs each command against the tracker and renders the markdown
//! output. Backend and storage failures on read-only commands are logged and
//! shown as an empty "no data" result instead of aborting.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use jiff::civil::Date;
use log::error;
use sprout_core::{
    display::{Crops, HistoryEntries, OperationStatus, Recommendations, Users},
    params::*,
    recommend::{farming_guidance, recommend_crops},
    Crop, JourneyError, LocalTracker, StartOutcome, UserRole,
};

use crate::renderer::TerminalRenderer;

// ============================================================================
// CLI Argument Wrapper Implementations
// ============================================================================

/// Sign in
#[derive(Args)]
pub struct LoginArgs {
    /// Account name
    pub name: String,
    /// Create the account as an admin; only granted while no admin exists
    #[arg(long)]
    pub admin: bool,
}

impl From<LoginArgs> for Login {
    fn from(val: LoginArgs) -> Self {
        Login {
            name: val.name,
            admin: val.admin,
        }
    }
}

/// Start a growth journey
#[derive(Args)]
pub struct StartJourneyArgs {
    /// Name of the crop in the library
    pub crop: String,
    /// Sowing date as YYYY-MM-DD; defaults to today
    #[arg(long, help = "Sowing date as YYYY-MM-DD; defaults to today")]
    pub sown: Option<Date>,
    /// Replace the active journey without archiving it
    #[arg(long, help = "Replace the active journey without archiving it")]
    pub force: bool,
}

impl From<StartJourneyArgs> for StartJourney {
    fn from(val: StartJourneyArgs) -> Self {
        StartJourney {
            crop_name: val.crop,
            sowing_date: val.sown,
            force: val.force,
        }
    }
}

/// Mark a phase task done or not done
#[derive(Args)]
pub struct ToggleTaskArgs {
    /// Title of the phase, e.g. "Tillering"
    pub title: String,
}

impl From<ToggleTaskArgs> for ToggleTask {
    fn from(val: ToggleTaskArgs) -> Self {
        ToggleTask {
            task_title: val.title,
        }
    }
}

/// Tick or untick a subtask of today's routine
#[derive(Args)]
pub struct ToggleSubtaskArgs {
    /// Subtask text exactly as listed by `sprout daily list`
    pub subtask: String,
}

impl From<ToggleSubtaskArgs> for ToggleSubtask {
    fn from(val: ToggleSubtaskArgs) -> Self {
        ToggleSubtask {
            subtask: val.subtask,
        }
    }
}

/// Select a crop by name
#[derive(Args)]
pub struct CropNameArgs {
    /// Crop name, case-insensitive
    pub name: String,
}

impl From<CropNameArgs> for CropName {
    fn from(val: CropNameArgs) -> Self {
        CropName { name: val.name }
    }
}

/// Import crops from a JSON file
#[derive(Args)]
pub struct ImportCropsArgs {
    /// JSON file holding one crop object or an array of them
    pub file: PathBuf,
}

/// Select an account by id
#[derive(Args)]
pub struct UserIdArgs {
    /// Account id as shown by `sprout user list`
    pub id: i64,
}

impl From<UserIdArgs> for UserId {
    fn from(val: UserIdArgs) -> Self {
        UserId { user_id: val.id }
    }
}

/// Change an account's role
#[derive(Args)]
pub struct SetRoleArgs {
    /// Account id as shown by `sprout user list`
    pub id: i64,
    /// New role: farmer or admin
    pub role: UserRole,
}

impl From<SetRoleArgs> for SetUserRole {
    fn from(val: SetRoleArgs) -> Self {
        SetUserRole {
            user_id: val.id,
            admin: val.role == UserRole::Admin,
        }
    }
}

/// Describe growing conditions
#[derive(Args)]
pub struct RecommendArgs {
    /// Soil type: Alluvial, Red or Black
    #[arg(long)]
    pub soil: String,
    /// Season: Summer or Winter
    #[arg(long)]
    pub season: String,
    /// Climate: Hot, Moderate or Cool
    #[arg(long)]
    pub climate: String,
}

impl From<RecommendArgs> for RecommendCrops {
    fn from(val: RecommendArgs) -> Self {
        RecommendCrops {
            soil: val.soil,
            season: val.season,
            climate: val.climate,
        }
    }
}

/// Show cultivation advice
#[derive(Args)]
pub struct GuidanceArgs {
    /// Crop name
    pub crop: String,
}

#[derive(Subcommand)]
pub enum JourneyCommands {
    /// Show the active journey
    #[command(alias = "s")]
    Status,
    /// Start a journey for a crop
    Start(StartJourneyArgs),
    /// Mark a phase task done or not done
    #[command(alias = "t")]
    Toggle(ToggleTaskArgs),
    /// Archive the journey once harvest is complete
    Complete,
}

#[derive(Subcommand)]
pub enum DailyCommands {
    /// Show today's routine
    #[command(aliases = ["l", "ls"])]
    List,
    /// Tick or untick a subtask
    #[command(alias = "t")]
    Toggle(ToggleSubtaskArgs),
}

#[derive(Subcommand)]
pub enum CropCommands {
    /// List the crop library
    #[command(aliases = ["l", "ls"])]
    List,
    /// Show a crop with its full routine
    #[command(alias = "s")]
    Show(CropNameArgs),
    /// Add or replace crops from a JSON file (admin)
    Import(ImportCropsArgs),
    /// Remove a crop from the library (admin)
    #[command(alias = "rm")]
    Remove(CropNameArgs),
}

#[derive(Subcommand)]
pub enum UserCommands {
    /// List every account
    #[command(aliases = ["l", "ls"])]
    List,
    /// Block an active account or reactivate a blocked one
    #[command(alias = "t")]
    Toggle(UserIdArgs),
    /// Grant or revoke the admin role
    Role(SetRoleArgs),
}

// ============================================================================
// Command Handlers
// ============================================================================

/// Logs a failure to load data and degrades it to `None`.
///
/// Only transport, storage and payload failures degrade; everything else is a
/// real answer for the user and is returned as an error.
fn degrade<T>(result: sprout_core::Result<T>, what: &str) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(
            e @ (JourneyError::Backend { .. }
            | JourneyError::Database { .. }
            | JourneyError::MalformedPayload { .. }),
        ) => {
            error!("Failed to load {what}: {e}");
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}

/// Reads crops from a JSON file holding either one crop or an array.
fn read_crops(path: &Path) -> Result<Vec<Crop>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let value: serde_json::Value = serde_json::from_str(&contents)
        .with_context(|| format!("{} is not valid JSON", path.display()))?;

    let crops = if value.is_array() {
        serde_json::from_value::<Vec<Crop>>(value)
    } else {
        serde_json::from_value::<Crop>(value).map(|crop| vec![crop])
    };
    crops.with_context(|| format!("{} does not describe crops", path.display()))
}

/// Runs commands against a tracker and renders their output.
pub struct Cli {
    tracker: LocalTracker,
    renderer: TerminalRenderer,
}

impl Cli {
    pub fn new(tracker: LocalTracker, renderer: TerminalRenderer) -> Self {
        Self { tracker, renderer }
    }

    fn success(&self, message: String) -> Result<()> {
        self.renderer
            .render(&OperationStatus::success(message).to_string())
    }

    pub async fn login(&self, args: LoginArgs) -> Result<()> {
        let profile = self
            .tracker
            .login(&args.into())
            .await
            .context("Failed to sign in")?;
        self.renderer.render(&profile.to_string())
    }

    pub async fn logout(&self) -> Result<()> {
        self.tracker.logout().await.context("Failed to sign out")?;
        self.success("Signed out".to_string())
    }

    pub fn whoami(&self) -> Result<()> {
        match self.tracker.current_user()? {
            Some(profile) => self.renderer.render(&profile.to_string()),
            None => self
                .renderer
                .render("Not signed in. Use `sprout login <name>`.\n"),
        }
    }

    pub async fn handle_journey_command(&self, command: JourneyCommands) -> Result<()> {
        match command {
            JourneyCommands::Status => self.show_status().await,
            JourneyCommands::Start(args) => self.start_journey(args).await,
            JourneyCommands::Toggle(args) => {
                let view = self
                    .tracker
                    .toggle_task(&args.into())
                    .await
                    .context("Failed to toggle task")?;
                self.renderer.render(&view.to_string())
            }
            JourneyCommands::Complete => {
                let entry = self
                    .tracker
                    .complete_journey()
                    .await
                    .context("Failed to complete journey")?;
                self.success(format!(
                    "Archived the {} journey after {} days",
                    entry.crop_name, entry.duration
                ))
            }
        }
    }

    pub async fn show_status(&self) -> Result<()> {
        let Some(status) = degrade(self.tracker.status().await, "journey status")? else {
            return self.renderer.render("No journey data available.\n");
        };

        match status {
            Some(view) => self.renderer.render(&view.to_string()),
            None => self.renderer.render(
                "No active journey. Start one with `sprout journey start <crop>`.\n",
            ),
        }
    }

    async fn start_journey(&self, args: StartJourneyArgs) -> Result<()> {
        let outcome = self
            .tracker
            .start_journey(&args.into())
            .await
            .context("Failed to start journey")?;

        match &outcome {
            StartOutcome::Started(_) => self.renderer.render(&outcome.to_string()),
            StartOutcome::Conflict { existing_crop } => self.renderer.render(&format!(
                "A {existing_crop} journey is already active. Run again with `--force` to replace it.\n"
            )),
        }
    }

    pub async fn handle_daily_command(&self, command: DailyCommands) -> Result<()> {
        match command {
            DailyCommands::List => {
                let Some(status) = degrade(self.tracker.status().await, "daily routine")? else {
                    return self.renderer.render("No routine data available.\n");
                };
                let Some(view) = status else {
                    return self.renderer.render("No active journey.\n");
                };

                let subtasks = view.daily_subtasks();
                if subtasks.is_empty() {
                    return self.renderer.render("Nothing to tick off today.\n");
                }
                let mut output = String::from("## Today's routine\n\n");
                for subtask in subtasks {
                    let mark = if view.daily_checklist.is_done(subtask) {
                        "x"
                    } else {
                        " "
                    };
                    output.push_str(&format!("- [{mark}] {subtask}\n"));
                }
                self.renderer.render(&output)
            }
            DailyCommands::Toggle(args) => {
                let params = ToggleSubtask::from(args);
                let done = self
                    .tracker
                    .toggle_daily_subtask(&params)
                    .await
                    .context("Failed to toggle subtask")?;
                let state = if done.contains(params.subtask.trim()) {
                    "done"
                } else {
                    "not done"
                };
                self.success(format!(
                    "'{}' marked {state} ({} ticked today)",
                    params.subtask.trim(),
                    done.len()
                ))
            }
        }
    }

    pub async fn show_history(&self) -> Result<()> {
        let Some(entries) = degrade(self.tracker.history().await, "history")? else {
            return self.renderer.render("No history data available.\n");
        };
        let output = format!("# Journey history\n\n{}", HistoryEntries(entries));
        self.renderer.render(&output)
    }

    pub async fn handle_crop_command(&self, command: CropCommands) -> Result<()> {
        match command {
            CropCommands::List => {
                let Some(crops) = degrade(self.tracker.crops().await, "crop library")? else {
                    return self.renderer.render("No crop data available.\n");
                };
                let output = format!("# Crop library\n\n{}", Crops(crops));
                self.renderer.render(&output)
            }
            CropCommands::Show(args) => {
                let params = CropName::from(args);
                let crop = self
                    .tracker
                    .crop(&params)
                    .await
                    .context("Failed to look up crop")?
                    .ok_or_else(|| JourneyError::CropNotFound {
                        name: params.name.clone(),
                    })?;
                self.renderer.render(&crop.to_string())
            }
            CropCommands::Import(args) => {
                let crops = read_crops(&args.file)?;
                let count = self
                    .tracker
                    .import_crops(crops)
                    .await
                    .context("Failed to import crops")?;
                self.success(format!("Imported {count} crop(s)"))
            }
            CropCommands::Remove(args) => {
                let params = CropName::from(args);
                let removed = self
                    .tracker
                    .remove_crop(&params)
                    .await
                    .context("Failed to remove crop")?;
                if removed {
                    self.success(format!("Removed {} from the library", params.name))
                } else {
                    Err(JourneyError::CropNotFound { name: params.name }.into())
                }
            }
        }
    }

    pub async fn handle_user_command(&self, command: UserCommands) -> Result<()> {
        match command {
            UserCommands::List => {
                let users = self
                    .tracker
                    .users()
                    .await
                    .context("Failed to list users")?;
                let output = format!("# Users\n\n{}", Users(users));
                self.renderer.render(&output)
            }
            UserCommands::Toggle(args) => {
                let account = self
                    .tracker
                    .toggle_user_status(&args.into())
                    .await
                    .context("Failed to change account status")?;
                self.success(format!("{} is now {}", account.name, account.status))
            }
            UserCommands::Role(args) => {
                let account = self
                    .tracker
                    .set_user_role(&args.into())
                    .await
                    .context("Failed to change account role")?;
                self.success(format!("{} is now {}", account.name, account.role))
            }
        }
    }

    pub fn recommend(&self, args: RecommendArgs) -> Result<()> {
        let params = RecommendCrops::from(args);
        let crops = recommend_crops(&params.soil, &params.season, &params.climate);
        self.renderer.render(&Recommendations(crops).to_string())
    }

    pub fn guide(&self, args: GuidanceArgs) -> Result<()> {
        let guidance = farming_guidance(&args.crop);
        let output = format!("# {} guidance\n\n{guidance}", args.crop.trim());
        self.renderer.render(&output)
    }
}
