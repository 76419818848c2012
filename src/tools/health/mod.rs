//! Diagnostic tools: `health_check` and `get_server_info`.
//!
//! Both handlers are stateless. `health_check` reads the wall clock;
//! `get_server_info` reports fixed identity fields plus the tool groups known
//! to the server, including groups served by external providers.

pub mod payload;

use chrono::Utc;
use rmcp::{
    handler::server::wrapper::Parameters,
    model::{CallToolResult, Content, ErrorData},
    tool, tool_router,
};

pub use payload::{
    CapabilityFlags, HealthState, HealthStatus, ServerInfoPayload, ServerInfoRequest,
    STATIC_CAPABILITIES,
};

use crate::{
    lib::{errors::payload_error_to_error_data, telemetry},
    server::runtime::TestAgentServer,
    tools::ToolGroup,
};

pub const GROUP_NAME: &str = "health";
pub const HEALTH_CHECK_TOOL_ID: &str = "health_check";
pub const SERVER_INFO_TOOL_ID: &str = "get_server_info";

pub fn group() -> ToolGroup<TestAgentServer> {
    ToolGroup {
        name: GROUP_NAME,
        router: TestAgentServer::health_router,
    }
}

#[tool_router(router = health_router)]
impl TestAgentServer {
    #[tool(
        name = "health_check",
        description = "Check if the MCP server is running and responsive"
    )]
    async fn health_check(&self) -> Result<CallToolResult, ErrorData> {
        let status = HealthStatus::at(Utc::now());
        let text = serde_json::to_string(&status)
            .map_err(|err| payload_error_to_error_data(HEALTH_CHECK_TOOL_ID, err))?;
        telemetry::emit_tool_call(HEALTH_CHECK_TOOL_ID, None);
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    #[tool(
        name = "get_server_info",
        description = "Get information about the MCP server and available tool groups"
    )]
    async fn get_server_info(
        &self,
        Parameters(request): Parameters<ServerInfoRequest>,
    ) -> Result<CallToolResult, ErrorData> {
        let verbose = request.verbose.unwrap_or(false);
        let info = ServerInfoPayload::new(self.tool_groups(), verbose);
        let text = serde_json::to_string_pretty(&info)
            .map_err(|err| payload_error_to_error_data(SERVER_INFO_TOOL_ID, err))?;
        telemetry::emit_tool_call(SERVER_INFO_TOOL_ID, request.verbose);
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }
}
