//! Build configuration.
use std::path::Path;

use serde::Deserialize;

use crate::error::Result;
use crate::naming::DEFAULT_PREFIX;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct BuildOptions {
    /// Prepended to every generated type name.
    pub prefix: String,
    pub tab_precedence: TabPrecedence,
    pub collisions: CollisionPolicy,
    /// Deepest allowed nesting of groups / slices below the custom type.
    pub max_depth: usize,
}

/// Which definition survives when two tabs declare the same field id.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum TabPrecedence {
    #[default]
    FirstSeenWins,
    /// Later definition replaces the earlier one but keeps its position.
    LastSeenWins,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum CollisionPolicy {
    #[default]
    Error,
    Warn,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_PREFIX.to_string(),
            tab_precedence: TabPrecedence::default(),
            collisions: CollisionPolicy::default(),
            max_depth: 32,
        }
    }
}

impl BuildOptions {
    pub fn from_json_str(source: &str) -> Result<Self> {
        crate::path_de::from_str_with_path(source)
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        use anyhow::Context;
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_json_str(&source)
            .with_context(|| format!("invalid config file {}", path.display()))
    }
}
