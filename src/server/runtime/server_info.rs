use crate::{cli::LaunchProfile, server::config::ServerConfig};

/// Identifier reported by `health_check`, `get_server_info`, and the MCP handshake.
pub const SERVER_NAME: &str = "testagent-mcp-server";
pub const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");
pub const SERVER_DESCRIPTION: &str = "TestAgent MCP Server - 浏览器自动化与自定义工具";

/// Build the `ServerInfo.instructions` string shown to MCP clients.
pub fn build_instructions(profile: &LaunchProfile, config: &ServerConfig) -> String {
    format!(
        "{SERVER_DESCRIPTION}. Provides health_check and get_server_info; browser automation is served by a separate provider. Loaded config {path}; waiting in {transport} mode.",
        path = config.source_label(),
        transport = profile.transport.as_str(),
    )
}
