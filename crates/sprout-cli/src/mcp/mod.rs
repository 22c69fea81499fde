//! MCP server implementation for Sprout
//!
//! Exposes the journey tracker to AI assistants over the Model Context
//! Protocol. Tools operate on the session cached in the database, so an
//! assistant sees the same account as the CLI.

use std::sync::Arc;

use anyhow::Result;
use log::{debug, error, info};
use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{Implementation, ProtocolVersion, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router, ServerHandler,
};
use sprout_core::LocalTracker;
use tokio::signal::unix::{signal, SignalKind};

pub mod errors;
pub mod handlers;

pub use errors::to_mcp_error;
pub use handlers::{
    CropName, Login, McpResult, RecommendCrops, SetUserRole, StartJourney, ToggleSubtask,
    ToggleTask, UserId,
};

/// MCP server for Sprout
#[derive(Clone)]
pub struct SproutMcpServer {
    tracker: Arc<LocalTracker>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl SproutMcpServer {
    /// Create a new Sprout MCP server
    pub fn new(tracker: LocalTracker) -> Self {
        Self {
            tracker: Arc::new(tracker),
            tool_router: Self::tool_router(),
        }
    }

    fn handlers(&self) -> handlers::McpHandlers {
        handlers::McpHandlers::new(self.tracker.clone())
    }

    #[tool(
        name = "login",
        description = "Sign in by account name; the account is created on first use. admin=true is honoured only when creating the first admin account; existing accounts keep their role. Every other journey tool acts on the signed-in account."
    )]
    async fn login(&self, params: Parameters<Login>) -> McpResult {
        self.handlers().login(params).await
    }

    #[tool(
        name = "journey_status",
        description = "Show the active growth journey: crop, days since sowing, progress percentage, current and next phase task, the phase timeline, today's daily routine checklist, and post-harvest guidance once harvest is complete."
    )]
    async fn journey_status(&self) -> McpResult {
        self.handlers().journey_status().await
    }

    #[tool(
        name = "start_journey",
        description = "Start following a crop from the library. sowing_date (YYYY-MM-DD) defaults to today. If another journey is active the call reports a conflict and changes nothing; repeat with force=true only after the user confirms, which discards the old journey without archiving it."
    )]
    async fn start_journey(&self, params: Parameters<StartJourney>) -> McpResult {
        self.handlers().start_journey(params).await
    }

    #[tool(
        name = "toggle_task",
        description = "Mark a phase task of the active journey done, or back to not done if it already was. task_title must match a phase title shown by journey_status."
    )]
    async fn toggle_task(&self, params: Parameters<ToggleTask>) -> McpResult {
        self.handlers().toggle_task(params).await
    }

    #[tool(
        name = "complete_journey",
        description = "Archive the active journey into history. Only allowed once harvest is complete, that is after the final phase's last day; earlier calls are rejected."
    )]
    async fn complete_journey(&self) -> McpResult {
        self.handlers().complete_journey().await
    }

    #[tool(
        name = "toggle_daily_subtask",
        description = "Tick or untick one item of today's routine for the current phase. Ticks are kept on this device only and reset on a new day or phase."
    )]
    async fn toggle_daily_subtask(&self, params: Parameters<ToggleSubtask>) -> McpResult {
        self.handlers().toggle_daily_subtask(params).await
    }

    #[tool(
        name = "list_history",
        description = "List completed journeys with sowing date, completion date and duration in days, most recent first."
    )]
    async fn list_history(&self) -> McpResult {
        self.handlers().list_history().await
    }

    #[tool(
        name = "list_crops",
        description = "List the crops in the library with their phase count and cycle length."
    )]
    async fn list_crops(&self) -> McpResult {
        self.handlers().list_crops().await
    }

    #[tool(
        name = "show_crop",
        description = "Show one crop's full routine (phases, protocols, daily routines, risks), post-harvest practice and headline guidance. Names are case-insensitive."
    )]
    async fn show_crop(&self, params: Parameters<CropName>) -> McpResult {
        self.handlers().show_crop(params).await
    }

    #[tool(
        name = "recommend_crops",
        description = "Suggest crops for a soil type (Alluvial, Red, Black), season (Summer, Winter) and climate (Hot, Moderate, Cool)."
    )]
    async fn recommend_crops(&self, params: Parameters<RecommendCrops>) -> McpResult {
        self.handlers().recommend_crops(params)
    }

    #[tool(
        name = "list_users",
        description = "List every account with its id, role and status (active or blocked). Requires the signed-in account to be an admin."
    )]
    async fn list_users(&self) -> McpResult {
        self.handlers().list_users().await
    }

    #[tool(
        name = "toggle_user_status",
        description = "Block an active account or reactivate a blocked one, by user_id from list_users. Blocked accounts cannot sign in. Admin only; admins cannot block themselves."
    )]
    async fn toggle_user_status(&self, params: Parameters<UserId>) -> McpResult {
        self.handlers().toggle_user_status(params).await
    }

    #[tool(
        name = "set_user_role",
        description = "Grant (admin=true) or revoke (admin=false) the admin role of the account user_id from list_users. Admin only; admins cannot change their own role."
    )]
    async fn set_user_role(&self, params: Parameters<SetUserRole>) -> McpResult {
        self.handlers().set_user_role(params).await
    }
}

#[tool_handler(router = self.tool_router)]
impl ServerHandler for SproutMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "sprout".to_string(),
                title: None,
                version: env!("CARGO_PKG_VERSION").to_string(),
                icons: None,
                website_url: None,
            },
            instructions: Some(r#"Sprout follows one crop per account from sowing to harvest.

## Core Concepts
- **Journey**: the active cultivation cycle for one crop, counted in days since sowing
- **Phase**: a day-bounded stage of the crop's routine; the active phase is the current task
- **Daily routine**: small checks for today in the current phase, tracked on this device only

## Workflow
1. `login` with the farmer's name
2. `list_crops` or `recommend_crops` to choose a crop, `show_crop` for its routine
3. `start_journey` (confirm with the user before force=true)
4. `journey_status` to see what to do now; `toggle_task` and `toggle_daily_subtask` as work is done
5. After harvest, `complete_journey` and review `list_history`

Admins can also manage accounts with `list_users`, `toggle_user_status` and `set_user_role`."#.to_string()),
        }
    }
}

/// Run the MCP server with stdio transport
pub async fn run_stdio_server(server: SproutMcpServer) -> Result<()> {
    use rmcp::{transport::stdio, ServiceExt};

    info!("Starting Sprout MCP server on stdio");
    debug!(
        "Server created with {} tools",
        server.tool_router.list_all().len()
    );

    let service = server.serve(stdio()).await.inspect_err(|e| {
        error!("serving error: {e:?}");
    })?;

    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;

    tokio::select! {
        result = service.waiting() => {
            match result {
                Ok(_) => info!("MCP server stopped normally"),
                Err(e) => error!("MCP server error: {e:?}"),
            }
        }
        _ = sigint.recv() => {
            info!("Received SIGINT, shutting down gracefully...");
        }
        _ = sigterm.recv() => {
            info!("Received SIGTERM, shutting down gracefully...");
        }
    }

    info!("MCP server shutdown complete");
    Ok(())
}
