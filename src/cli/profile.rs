//! LaunchProfile and config path resolution.
use std::{
    env,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::ValueEnum;

const MCP_CONFIG_ENV: &str = "MCP_CONFIG_PATH";

/// MCP transport mode.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum TransportMode {
    Stdio,
    Tcp,
}

impl TransportMode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            TransportMode::Stdio => "stdio",
            TransportMode::Tcp => "tcp",
        }
    }
}

/// Where the configuration path came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    Cli,
    Env,
    Defaults,
}

impl ConfigSource {
    pub const fn as_str(&self) -> &'static str {
        match self {
            ConfigSource::Cli => "cli",
            ConfigSource::Env => "env",
            ConfigSource::Defaults => "defaults",
        }
    }
}

/// Resolved launch profile.
#[derive(Debug, Clone)]
pub struct LaunchProfile {
    pub config_path: Option<PathBuf>,
    pub config_source: ConfigSource,
    pub transport: TransportMode,
    pub launch_args: Vec<String>,
}

impl LaunchProfile {
    /// Profile used when the server is embedded or tested without CLI parsing.
    pub fn stdio_defaults() -> Self {
        Self {
            config_path: None,
            config_source: ConfigSource::Defaults,
            transport: TransportMode::Stdio,
            launch_args: build_launch_args(TransportMode::Stdio, None),
        }
    }
}

/// Resolve config path in the order: CLI override → env var → none.
pub fn resolve_config_path(
    override_path: Option<PathBuf>,
) -> Result<(Option<PathBuf>, ConfigSource)> {
    let (path, source) = match override_path {
        Some(path) => (path, ConfigSource::Cli),
        None => match env::var_os(MCP_CONFIG_ENV).filter(|value| !value.is_empty()) {
            Some(value) => (PathBuf::from(value), ConfigSource::Env),
            None => return Ok((None, ConfigSource::Defaults)),
        },
    };

    if path.is_absolute() {
        return Ok((Some(path), source));
    }

    let cwd = env::current_dir().context("failed to obtain current directory")?;
    Ok((Some(cwd.join(path)), source))
}

/// Build launch arguments suitable for reproduction/logging.
pub fn build_launch_args(transport: TransportMode, config: Option<&Path>) -> Vec<String> {
    let mut args = vec![format!("--transport={}", transport.as_str())];
    if let Some(config) = config {
        args.push(format!("--config={}", config.display()));
    }
    args
}
