//! MCP tool handlers implementation

use std::sync::Arc;

use log::debug;
use rmcp::{
    handler::server::wrapper::Parameters,
    model::{CallToolResult, Content},
    ErrorData,
};
use schemars::JsonSchema;
use serde::Deserialize;
use sprout_core::{
    display::{Crops, HistoryEntries, OperationStatus, Recommendations, Users},
    params as core,
    recommend::{farming_guidance, recommend_crops},
    JourneyError, LocalTracker, StartOutcome,
};

use super::to_mcp_error;

/// Generic MCP wrapper for core parameter types with serde integration
///
/// Provides JSON deserialization and schema generation for any parameter type,
/// so the core types need no MCP-specific derives.
#[derive(Debug, Deserialize)]
#[serde(transparent)]
pub struct McpParams<T>(T)
where
    T: JsonSchema;

impl<T> JsonSchema for McpParams<T>
where
    T: JsonSchema,
{
    fn schema_name() -> std::borrow::Cow<'static, str> {
        T::schema_name()
    }

    fn json_schema(g: &mut schemars::SchemaGenerator) -> schemars::Schema {
        T::json_schema(g)
    }
}

impl<T> AsRef<T> for McpParams<T>
where
    T: JsonSchema,
{
    fn as_ref(&self) -> &T {
        &self.0
    }
}

// Type aliases for cleaner usage in function signatures
pub type Login = McpParams<core::Login>;
pub type StartJourney = McpParams<core::StartJourney>;
pub type ToggleTask = McpParams<core::ToggleTask>;
pub type ToggleSubtask = McpParams<core::ToggleSubtask>;
pub type CropName = McpParams<core::CropName>;
pub type RecommendCrops = McpParams<core::RecommendCrops>;
pub type UserId = McpParams<core::UserId>;
pub type SetUserRole = McpParams<core::SetUserRole>;

pub type McpResult = Result<CallToolResult, ErrorData>;

fn text(output: impl Into<String>) -> McpResult {
    Ok(CallToolResult::success(vec![Content::text(output.into())]))
}

/// Handler implementations for the MCP server
pub struct McpHandlers {
    tracker: Arc<LocalTracker>,
}

impl McpHandlers {
    pub fn new(tracker: Arc<LocalTracker>) -> Self {
        Self { tracker }
    }

    pub async fn login(&self, Parameters(params): Parameters<Login>) -> McpResult {
        debug!("login: {:?}", params);

        let profile = self
            .tracker
            .login(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to sign in", &e))?;
        text(profile.to_string())
    }

    pub async fn journey_status(&self) -> McpResult {
        debug!("journey_status");

        let view = self
            .tracker
            .status()
            .await
            .map_err(|e| to_mcp_error("Failed to load journey status", &e))?;
        match view {
            Some(view) => text(view.to_string()),
            None => text("No active journey. Use `start_journey` to begin one."),
        }
    }

    pub async fn start_journey(&self, Parameters(params): Parameters<StartJourney>) -> McpResult {
        debug!("start_journey: {:?}", params);

        let outcome = self
            .tracker
            .start_journey(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to start journey", &e))?;
        match &outcome {
            StartOutcome::Started(_) => text(outcome.to_string()),
            StartOutcome::Conflict { existing_crop } => text(format!(
                "A {existing_crop} journey is already active. Ask the user to confirm, then call `start_journey` again with force=true to replace it."
            )),
        }
    }

    pub async fn toggle_task(&self, Parameters(params): Parameters<ToggleTask>) -> McpResult {
        debug!("toggle_task: {:?}", params);

        let view = self
            .tracker
            .toggle_task(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to toggle task", &e))?;
        let title = &params.as_ref().task_title;
        let state = if view.journey.is_task_completed(title) {
            "done"
        } else {
            "not done"
        };
        text(format!(
            "{}\n{view}",
            OperationStatus::success(format!("Task '{title}' marked {state}"))
        ))
    }

    pub async fn complete_journey(&self) -> McpResult {
        debug!("complete_journey");

        let entry = self
            .tracker
            .complete_journey()
            .await
            .map_err(|e| to_mcp_error("Failed to complete journey", &e))?;
        text(format!(
            "{}\n{entry}",
            OperationStatus::success(format!("Archived the {} journey", entry.crop_name))
        ))
    }

    pub async fn toggle_daily_subtask(
        &self,
        Parameters(params): Parameters<ToggleSubtask>,
    ) -> McpResult {
        debug!("toggle_daily_subtask: {:?}", params);

        let done = self
            .tracker
            .toggle_daily_subtask(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to toggle subtask", &e))?;
        let mut output = String::from("## Ticked today\n\n");
        if done.is_empty() {
            output.push_str("Nothing ticked yet.\n");
        }
        for subtask in &done {
            output.push_str(&format!("- [x] {subtask}\n"));
        }
        text(output)
    }

    pub async fn list_history(&self) -> McpResult {
        debug!("list_history");

        let entries = self
            .tracker
            .history()
            .await
            .map_err(|e| to_mcp_error("Failed to list history", &e))?;
        text(format!("# Journey history\n\n{}", HistoryEntries(entries)))
    }

    pub async fn list_crops(&self) -> McpResult {
        debug!("list_crops");

        let crops = self
            .tracker
            .crops()
            .await
            .map_err(|e| to_mcp_error("Failed to list crops", &e))?;
        text(format!("# Crop library\n\n{}", Crops(crops)))
    }

    pub async fn show_crop(&self, Parameters(params): Parameters<CropName>) -> McpResult {
        debug!("show_crop: {:?}", params);

        let name = &params.as_ref().name;
        let crop = self
            .tracker
            .crop(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to look up crop", &e))?
            .ok_or_else(|| {
                to_mcp_error(
                    "Failed to look up crop",
                    &JourneyError::CropNotFound { name: name.clone() },
                )
            })?;
        text(format!("{crop}\n## Guidance\n\n{}", farming_guidance(&crop.name)))
    }

    pub fn recommend_crops(&self, Parameters(params): Parameters<RecommendCrops>) -> McpResult {
        debug!("recommend_crops: {:?}", params);

        let p = params.as_ref();
        text(Recommendations(recommend_crops(&p.soil, &p.season, &p.climate)).to_string())
    }

    pub async fn list_users(&self) -> McpResult {
        debug!("list_users");

        let users = self
            .tracker
            .users()
            .await
            .map_err(|e| to_mcp_error("Failed to list users", &e))?;
        text(format!("# Users\n\n{}", Users(users)))
    }

    pub async fn toggle_user_status(&self, Parameters(params): Parameters<UserId>) -> McpResult {
        debug!("toggle_user_status: {:?}", params);

        let account = self
            .tracker
            .toggle_user_status(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to change account status", &e))?;
        text(format!(
            "{}\n{account}",
            OperationStatus::success(format!("{} is now {}", account.name, account.status))
        ))
    }

    pub async fn set_user_role(&self, Parameters(params): Parameters<SetUserRole>) -> McpResult {
        debug!("set_user_role: {:?}", params);

        let account = self
            .tracker
            .set_user_role(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to change account role", &e))?;
        text(format!(
            "{}\n{account}",
            OperationStatus::success(format!("{} is now {}", account.name, account.role))
        ))
    }
}
