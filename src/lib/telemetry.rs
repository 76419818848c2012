//! Telemetry initialization and structured runtime/tool events.

use anyhow::Result;
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::{fmt, EnvFilter};

/// Initialize `tracing` and format developer logs.
///
/// Logs always go to stderr; stdout carries the MCP protocol stream.
pub fn init_tracing() -> Result<()> {
    if tracing::dispatcher::has_been_set() {
        return Ok(());
    }

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow::anyhow!("failed to initialize tracing: {err}"))
}

/// Payload for logging MCP runtime state as structured telemetry.
#[derive(Debug, Serialize)]
pub struct RuntimeModeTelemetry<'a> {
    pub transport: &'a str,
    pub host: Option<&'a str>,
    pub port: Option<u16>,
    pub config_path: Option<&'a str>,
    pub config_source: &'a str,
    pub tool_groups: &'a [String],
    pub tool_count: usize,
    pub instructions: &'a str,
    pub launch_args: &'a [String],
}

/// Emit runtime mode to `tracing`.
pub fn emit_runtime_mode(telemetry: &RuntimeModeTelemetry<'_>) {
    info!(
        target: "testagent_mcp::runtime",
        transport = telemetry.transport,
        host = telemetry.host.unwrap_or(""),
        port = telemetry.port.unwrap_or_default(),
        config_path = telemetry.config_path.unwrap_or("<defaults>"),
        config_source = telemetry.config_source,
        tool_groups = ?telemetry.tool_groups,
        tool_count = telemetry.tool_count,
        instructions = telemetry.instructions,
        launch_args = ?telemetry.launch_args,
        "Started MCP server"
    );
}

/// Record a completed tool invocation.
pub fn emit_tool_call(tool: &'static str, verbose: Option<bool>) {
    debug!(
        target: "testagent_mcp::tools",
        tool,
        verbose = verbose.unwrap_or(false),
        "Handled tool call"
    );
}
