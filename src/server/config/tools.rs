use std::{collections::HashSet, path::Path};

use serde::Deserialize;

use crate::{lib::errors::ConfigError, tools};

/// Tool group served by a separate provider; listed in `get_server_info` only.
pub const DEFAULT_EXTERNAL_GROUPS: &[&str] = &["playwright (via @playwright/mcp)"];

/// Tool listing settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolsSection {
    pub external_groups: Vec<String>,
}

impl Default for ToolsSection {
    fn default() -> Self {
        Self {
            external_groups: DEFAULT_EXTERNAL_GROUPS
                .iter()
                .map(|group| group.to_string())
                .collect(),
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct RawToolsSection {
    pub external_groups: Option<Vec<String>>,
}

pub fn parse_tools_section(
    raw: Option<RawToolsSection>,
    path: &Path,
) -> Result<ToolsSection, ConfigError> {
    let Some(external_groups) = raw.unwrap_or_default().external_groups else {
        return Ok(ToolsSection::default());
    };

    let mut seen = HashSet::new();
    let mut groups = Vec::with_capacity(external_groups.len());
    for group in external_groups {
        let trimmed = group.trim();
        if trimmed.is_empty() {
            return Err(ConfigError::InvalidField {
                path: path.to_path_buf(),
                field: "tools.external_groups",
                message: "Group names must not be blank".into(),
            });
        }
        if tools::tool_groups()
            .iter()
            .any(|registered| registered.name == trimmed)
        {
            return Err(ConfigError::InvalidField {
                path: path.to_path_buf(),
                field: "tools.external_groups",
                message: format!("Group `{trimmed}` is served by this server"),
            });
        }
        if !seen.insert(trimmed.to_string()) {
            return Err(ConfigError::InvalidField {
                path: path.to_path_buf(),
                field: "tools.external_groups",
                message: format!("Group `{trimmed}` is listed more than once"),
            });
        }
        groups.push(trimmed.to_string());
    }

    Ok(ToolsSection {
        external_groups: groups,
    })
}
