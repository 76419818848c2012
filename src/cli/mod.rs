//! CLI entrypoint module structure.
use anyhow::Result;
use serde_json::json;

use crate::{
    server::{
        config::ServerConfig,
        runtime::{build_instructions, TestAgentServer},
    },
    tools,
};

pub mod args;
pub mod profile;

pub use args::{CliCommand, LaunchProfileArgs, ParsedCommand};
pub use profile::{
    build_launch_args, resolve_config_path, ConfigSource, LaunchProfile, TransportMode,
};

/// Execute CLI command mode and return a user-facing result payload.
pub fn execute_cli_command(command: CliCommand) -> Result<String> {
    match command {
        CliCommand::Tools => describe_registered_tools(),
    }
}

/// Build a throwaway server, register every group, and describe the result.
fn describe_registered_tools() -> Result<String> {
    let profile = LaunchProfile::stdio_defaults();
    let config = ServerConfig::default();
    let mut server = TestAgentServer::new(&config, build_instructions(&profile, &config));
    tools::register_tools(&mut server)?;

    let mut listed = server.registered_tools();
    listed.sort_by(|a, b| a.name.cmp(&b.name));
    let tools: Vec<_> = listed
        .iter()
        .map(|tool| {
            json!({
                "name": tool.name,
                "description": tool.description,
            })
        })
        .collect();

    let payload = json!({
        "tool_groups": server.registered_groups(),
        "tools": tools,
    });

    Ok(serde_json::to_string_pretty(&payload)?)
}
