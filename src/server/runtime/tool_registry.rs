use std::sync::Arc;

use rmcp::{
    handler::server::ServerHandler,
    model::{Implementation, ServerCapabilities, ServerInfo, Tool},
    tool_handler,
};

use crate::{
    lib::errors::RegistryError,
    server::{
        config::ServerConfig,
        runtime::server_info::{SERVER_NAME, SERVER_VERSION},
    },
    tools::{ServerToolRouter, ToolGroup},
};

/// MCP server instance. Starts with no tools; groups are attached through
/// [`crate::tools::register_tools`] before the transport is connected.
#[derive(Clone)]
pub struct TestAgentServer {
    instructions: Arc<String>,
    external_groups: Arc<Vec<String>>,
    registered_groups: Vec<String>,
    tool_router: ServerToolRouter<Self>,
}

impl TestAgentServer {
    pub fn new(config: &ServerConfig, instructions: String) -> Self {
        Self {
            instructions: Arc::new(instructions),
            external_groups: Arc::new(config.tools.external_groups.clone()),
            registered_groups: Vec::new(),
            tool_router: ServerToolRouter::new(),
        }
    }

    /// Attach every tool of `group`, rejecting any name already routed.
    pub fn register_group(&mut self, group: ToolGroup<Self>) -> Result<(), RegistryError> {
        if self.registered_groups.iter().any(|name| name == group.name) {
            return Err(RegistryError::DuplicateGroup { group: group.name });
        }

        let router = (group.router)();
        if let Some(tool) = router
            .list_all()
            .into_iter()
            .find(|tool| self.tool_router.has_route(tool.name.as_ref()))
        {
            return Err(RegistryError::DuplicateTool {
                tool: tool.name.to_string(),
                group: group.name,
            });
        }

        tracing::debug!(
            target: "testagent_mcp::runtime",
            group = group.name,
            tools = router.list_all().len(),
            "Registered tool group"
        );
        self.tool_router.merge(router);
        self.registered_groups.push(group.name.to_string());
        Ok(())
    }

    /// Names of the groups attached to this server, in registration order.
    pub fn registered_groups(&self) -> &[String] {
        &self.registered_groups
    }

    /// Registered groups followed by groups served by external providers.
    pub fn tool_groups(&self) -> Vec<String> {
        self.registered_groups
            .iter()
            .chain(self.external_groups.iter())
            .cloned()
            .collect()
    }

    /// Text advertised as `ServerInfo.instructions`.
    pub fn instructions(&self) -> &str {
        &self.instructions
    }

    pub fn registered_tools(&self) -> Vec<Tool> {
        self.tool_router.list_all()
    }

    pub fn has_tool(&self, name: &str) -> bool {
        self.tool_router.has_route(name)
    }
}

#[tool_handler(router = self.tool_router)]
impl ServerHandler for TestAgentServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: SERVER_NAME.to_string(),
                version: SERVER_VERSION.to_string(),
                ..Implementation::from_build_env()
            },
            instructions: Some((*self.instructions).clone()),
            ..ServerInfo::default()
        }
    }
}
