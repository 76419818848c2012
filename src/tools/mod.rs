//! MCP tools registered on the server and the registry that attaches them.

pub mod health;

use rmcp::handler::server::router::tool::ToolRouter;

use crate::{lib::errors::RegistryError, server::runtime::TestAgentServer};

pub type ServerToolRouter<S> = ToolRouter<S>;

/// A named set of tools attached to a server as one unit.
pub struct ToolGroup<S> {
    pub name: &'static str,
    pub router: fn() -> ServerToolRouter<S>,
}

/// Every group implemented by this crate, in registration order.
pub fn tool_groups() -> Vec<ToolGroup<TestAgentServer>> {
    vec![health::group()]
}

/// Attach all known tool groups to `server`. Call once, before serving.
pub fn register_tools(server: &mut TestAgentServer) -> Result<(), RegistryError> {
    for group in tool_groups() {
        server.register_group(group)?;
    }
    Ok(())
}
