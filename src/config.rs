//! Configuration handling for the form workflow

use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Default debounce window between draft writes (milliseconds)
pub const DEFAULT_DEBOUNCE_MS: u64 = 400;
/// Default toast display duration (milliseconds)
pub const DEFAULT_TOAST_MS: u64 = 4000;

/// User configuration for the workflow's timing and storage knobs
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct WorkflowConfig {
    /// Debounce window for draft writes, in milliseconds
    pub debounce_ms: Option<u64>,
    /// Toast display duration, in milliseconds
    pub toast_ms: Option<u64>,
    /// Override for the drafts directory
    pub drafts_dir: Option<PathBuf>,
}

impl WorkflowConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("io", "planstudio", "planstudio-forms")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from file
    pub fn load() -> Result<Self> {
        let path = Self::config_path();

        if let Some(path) = path {
            if path.exists() {
                let content = fs::read_to_string(&path)?;
                let config: WorkflowConfig = serde_json::from_str(&content)?;
                return Ok(config);
            }
        }

        Ok(Self::default())
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        if let Some(path) = Self::config_path() {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            let content = serde_json::to_string_pretty(self)?;
            fs::write(&path, content)?;
        }
        Ok(())
    }

    /// Effective debounce window
    pub fn debounce_window(&self) -> Duration {
        Duration::from_millis(self.debounce_ms.unwrap_or(DEFAULT_DEBOUNCE_MS))
    }

    /// Effective toast display duration
    pub fn toast_duration(&self) -> Duration {
        Duration::from_millis(self.toast_ms.unwrap_or(DEFAULT_TOAST_MS))
    }
}
