//! Configuration loading and management
//!
//! Handles parsing of `td.toml` configuration files.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Data directory for the task store; defaults to the platform
    /// data dir when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,

    /// Task defaults
    #[serde(default)]
    pub tasks: TasksConfig,

    /// Task table rendering
    #[serde(default)]
    pub table: TableConfig,
}

/// Task-related configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TasksConfig {
    /// Kind assigned when `td add` is called without --kind
    #[serde(default = "default_kind")]
    pub default_kind: String,
}

fn default_kind() -> String {
    "Todo".to_string()
}

impl Default for TasksConfig {
    fn default() -> Self {
        Self {
            default_kind: default_kind(),
        }
    }
}

/// Column widths for the task table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableConfig {
    #[serde(default = "default_kind_width")]
    pub kind_width: usize,

    #[serde(default = "default_text_width")]
    pub text_width: usize,

    #[serde(default = "default_deadline_width")]
    pub deadline_width: usize,
}

fn default_kind_width() -> usize {
    15
}

fn default_text_width() -> usize {
    50
}

fn default_deadline_width() -> usize {
    25
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            kind_width: default_kind_width(),
            text_width: default_text_width(),
            deadline_width: default_deadline_width(),
        }
    }
}

impl Config {
    /// Load configuration from a `td.toml` file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from the given path, falling back to the
    /// platform config location, or defaults when no file exists.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        let candidate = match path {
            Some(path) => Some(path.to_path_buf()),
            None => default_config_path(),
        };
        match candidate {
            Some(path) if path.exists() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// The directory the task store lives in. A command-line override
    /// wins over the config file, which wins over the platform default.
    pub fn resolve_data_dir(&self, override_dir: Option<PathBuf>) -> Result<PathBuf> {
        if let Some(dir) = override_dir {
            return Ok(dir);
        }
        if let Some(dir) = &self.data_dir {
            return Ok(dir.clone());
        }
        let dirs = project_dirs().ok_or_else(|| {
            Error::InvalidConfig(
                "could not determine a data directory; set data_dir in td.toml or pass --data-dir"
                    .to_string(),
            )
        })?;
        Ok(dirs.data_dir().to_path_buf())
    }

    fn validate(&self) -> Result<()> {
        if self.tasks.default_kind.trim().is_empty() {
            return Err(Error::InvalidConfig(
                "tasks.default_kind cannot be empty".to_string(),
            ));
        }
        for (name, width) in [
            ("table.kind_width", self.table.kind_width),
            ("table.text_width", self.table.text_width),
            ("table.deadline_width", self.table.deadline_width),
        ] {
            if width == 0 {
                return Err(Error::InvalidConfig(format!("{name} must be > 0")));
            }
        }
        Ok(())
    }
}

/// Platform config file location, e.g. `~/.config/td/td.toml`
pub fn default_config_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join("td.toml"))
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "td")
}
