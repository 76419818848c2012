use std::process::ExitCode;

use anyhow::{Context, Error};
use rmcp::{service::ServerInitializeError, ServiceExt};
use tokio::net::TcpListener;

use crate::{
    cli::{LaunchProfile, TransportMode},
    lib::telemetry,
    server::{
        config::ServerConfig,
        runtime::{build_instructions, TestAgentServer},
    },
    tools,
};

/// Readiness line written to stderr once stdio is attached, before the handshake.
pub const STDIO_READY_BANNER: &str = "TestAgent MCP Server running on stdio";
const STARTUP_FAILURE_PREFIX: &str = "Failed to start MCP server";

/// Bundles a runtime error message with an exit code.
#[derive(Debug)]
pub struct RuntimeExit {
    message: String,
    exit_code: ExitCode,
}

impl RuntimeExit {
    pub fn from_error(err: impl Into<Error>) -> Self {
        let err = err.into();
        Self {
            message: format!("{err:?}"),
            exit_code: ExitCode::FAILURE,
        }
    }

    /// The server could not be brought up; exits with status 1.
    pub fn startup_failure(err: impl Into<Error>) -> Self {
        let err = err.into();
        Self {
            message: format!("{STARTUP_FAILURE_PREFIX}: {err:#}"),
            exit_code: ExitCode::FAILURE,
        }
    }

    pub fn report(self) -> ExitCode {
        eprintln!("{}", self.message);
        self.exit_code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn exit_code(&self) -> ExitCode {
        self.exit_code
    }
}

/// Construct the server and attach every tool group.
pub fn prepare_server(
    profile: &LaunchProfile,
    config: &ServerConfig,
) -> Result<TestAgentServer, RuntimeExit> {
    let instructions = build_instructions(profile, config);
    let mut server = TestAgentServer::new(config, instructions);
    tools::register_tools(&mut server).map_err(RuntimeExit::startup_failure)?;
    Ok(server)
}

/// Start the MCP server and select stdio/TCP based on the launch profile.
pub async fn run_server(profile: LaunchProfile, config: ServerConfig) -> Result<(), RuntimeExit> {
    let server = prepare_server(&profile, &config)?;

    let config_path = config
        .source_path
        .as_ref()
        .map(|path| path.to_string_lossy().into_owned());
    let tool_groups = server.tool_groups();
    let tcp = profile.transport == TransportMode::Tcp;
    telemetry::emit_runtime_mode(&telemetry::RuntimeModeTelemetry {
        transport: profile.transport.as_str(),
        host: tcp.then_some(config.server.host.as_str()),
        port: tcp.then_some(config.server.port),
        config_path: config_path.as_deref(),
        config_source: profile.config_source.as_str(),
        tool_groups: &tool_groups,
        tool_count: server.registered_tools().len(),
        instructions: server.instructions(),
        launch_args: &profile.launch_args,
    });

    match profile.transport {
        TransportMode::Stdio => run_stdio(server).await,
        TransportMode::Tcp => run_tcp(server, &config).await,
    }
}

async fn run_stdio(server: TestAgentServer) -> Result<(), RuntimeExit> {
    let transport = rmcp::transport::stdio();
    eprintln!("{STDIO_READY_BANNER}");
    let running = match server.serve(transport).await {
        Ok(running) => running,
        Err(err) if closed_before_initialize(&err) => {
            tracing::info!(
                target: "testagent_mcp::runtime",
                reason = %err,
                "Client closed stdio before initialize; shutting down"
            );
            return Ok(());
        }
        Err(err) => {
            return Err(RuntimeExit::startup_failure(
                Error::new(err).context("failed to attach stdio transport"),
            ))
        }
    };
    let reason = running.waiting().await.map_err(RuntimeExit::from_error)?;
    tracing::info!(
        target: "testagent_mcp::runtime",
        reason = ?reason,
        "MCP session ended"
    );
    Ok(())
}

/// The peer hung up before completing the handshake.
fn closed_before_initialize(err: &ServerInitializeError) -> bool {
    matches!(err, ServerInitializeError::ConnectionClosed(_))
}

async fn run_tcp(server: TestAgentServer, config: &ServerConfig) -> Result<(), RuntimeExit> {
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind TCP port {addr}"))
        .map_err(RuntimeExit::startup_failure)?;
    eprintln!("TestAgent MCP Server running on tcp {addr}");
    tracing::info!(
        target: "testagent_mcp::runtime",
        transport = "tcp",
        bind_addr = %addr,
        "Started listening in TCP mode"
    );

    loop {
        let (stream, peer) = listener
            .accept()
            .await
            .with_context(|| format!("failed to accept TCP connection ({addr})"))
            .map_err(RuntimeExit::from_error)?;
        tracing::info!(
            target: "testagent_mcp::runtime",
            peer = %peer,
            "Accepted connection from MCP client"
        );
        let running = match server.clone().serve(stream).await {
            Ok(running) => running,
            Err(err) => {
                tracing::warn!(
                    target: "testagent_mcp::runtime",
                    peer = %peer,
                    reason = %err,
                    "MCP handshake failed; dropping connection"
                );
                continue;
            }
        };
        match running.waiting().await {
            Ok(reason) => tracing::info!(
                target: "testagent_mcp::runtime",
                peer = %peer,
                reason = ?reason,
                "MCP session ended"
            ),
            Err(err) => tracing::warn!(
                target: "testagent_mcp::runtime",
                peer = %peer,
                reason = %err,
                "MCP session terminated abnormally"
            ),
        }
    }
}
