use tracing::{debug, info};

use super::ServerConfig;

pub fn log_defaults() {
    debug!(
        target: "testagent_mcp::config",
        "No configuration file given; using built-in defaults"
    );
}

pub fn log_loaded(config: &ServerConfig) {
    info!(
        target: "testagent_mcp::config",
        path = %config.source_label(),
        host = %config.server.host,
        port = config.server.port,
        external_groups = ?config.tools.external_groups,
        "Configuration loaded successfully"
    );
}
