//! MCP server startup and tool registration.
mod server_info;
mod startup;
mod tool_registry;

pub use server_info::{build_instructions, SERVER_DESCRIPTION, SERVER_NAME, SERVER_VERSION};
pub use startup::{prepare_server, run_server, RuntimeExit};
pub use tool_registry::TestAgentServer;
