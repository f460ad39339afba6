use crate::models::glob::{GlobGroupId, GlobRegistry};
use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Glob group definitions from Globscope Groups.yaml
///
/// Keys are group identifiers (with an embedded `_x_` mnemonic), values are
/// the ordered glob patterns of the group.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupsConfig {
    #[serde(rename = "Glob_Groups", default)]
    pub glob_groups: IndexMap<String, Vec<String>>,
}

impl GroupsConfig {
    /// Validate every identifier and build the registry in file order
    pub fn to_registry(&self) -> Result<GlobRegistry> {
        let mut registry = GlobRegistry::new();
        for (raw_id, patterns) in &self.glob_groups {
            let id = GlobGroupId::new(raw_id.as_str())
                .with_context(|| format!("Invalid glob group identifier: {:?}", raw_id))?;
            registry.register(id, patterns.iter().cloned());
        }
        Ok(registry)
    }
}

/// User configuration from Globscope Settings.yaml (plus environment overrides)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserConfig {
    #[serde(default)]
    pub search_settings: SearchSettings,

    #[serde(default)]
    pub ignore: IgnoreConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchSettings {
    #[serde(default = "default_ripgrep_exe")]
    pub ripgrep_exe: String,

    /// Seconds before a running search is abandoned
    #[serde(default = "default_search_timeout")]
    pub search_timeout: u64,

    #[serde(default = "default_literal")]
    pub literal_by_default: bool,

    #[serde(default)]
    pub debug_mode: bool,

    #[serde(default = "default_log_dir")]
    pub log_dir: String,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            ripgrep_exe: default_ripgrep_exe(),
            search_timeout: default_search_timeout(),
            literal_by_default: default_literal(),
            debug_mode: false,
            log_dir: default_log_dir(),
        }
    }
}

fn default_ripgrep_exe() -> String {
    "rg".to_string()
}

fn default_search_timeout() -> u64 {
    60
}

fn default_literal() -> bool {
    true
}

fn default_log_dir() -> String {
    "logs".to_string()
}

/// Project-level ignore lists, always folded into the exclusion side of a search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IgnoreConfig {
    #[serde(default)]
    pub files: Vec<String>,

    #[serde(default)]
    pub directories: Vec<String>,
}

impl Default for IgnoreConfig {
    fn default() -> Self {
        Self {
            files: vec!["*.min.js".to_string(), "*.lock".to_string()],
            directories: vec![
                ".git".to_string(),
                "target".to_string(),
                "node_modules".to_string(),
            ],
        }
    }
}
