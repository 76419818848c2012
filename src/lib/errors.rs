use std::path::PathBuf;

use config::ConfigError as ConfigLoaderError;
use rmcp::model::ErrorData;
use thiserror::Error;

/// Errors that can occur while loading or validating configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to build (read) the configuration file.
    #[error("Failed to read configuration file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: ConfigLoaderError,
    },
    /// Failed to deserialize TOML into a struct.
    #[error("Failed to parse configuration file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ConfigLoaderError,
    },
    /// Field failed validation.
    #[error("Configuration file {path} has invalid `{field}`: {message}")]
    InvalidField {
        path: PathBuf,
        field: &'static str,
        message: String,
    },
}

impl ConfigError {
    /// Helper to wrap `config::ConfigError` as a read failure.
    pub fn from_read_error(path: PathBuf, source: ConfigLoaderError) -> Self {
        Self::FileRead { path, source }
    }

    /// Helper to wrap `config::ConfigError` as a parse failure.
    pub fn from_parse_error(path: PathBuf, source: ConfigLoaderError) -> Self {
        Self::Parse { path, source }
    }
}

/// Failures raised while attaching tool groups to a server.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Tool `{tool}` from group `{group}` is already registered")]
    DuplicateTool { tool: String, group: &'static str },
    #[error("Tool group `{group}` is already registered")]
    DuplicateGroup { group: &'static str },
}

/// Map a payload serialization failure to an MCP internal error.
pub fn payload_error_to_error_data(tool: &'static str, err: serde_json::Error) -> ErrorData {
    ErrorData::internal_error(
        format!("Failed to serialize `{tool}` payload: {err}"),
        None,
    )
}
