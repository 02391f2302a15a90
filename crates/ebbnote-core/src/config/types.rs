//! Configuration type definitions

use serde::{Deserialize, Serialize};

use crate::schedule::Schedule;

/// Top-level configuration, stored as TOML
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub paths: PathsConfig,

    #[serde(default)]
    pub review: ReviewConfig,

    #[serde(default)]
    pub git: GitConfig,

    #[serde(default)]
    pub editor: EditorConfig,

    #[serde(default)]
    pub export: ExportConfig,
}

/// Store and export locations; relative paths resolve against the config file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathsConfig {
    #[serde(default = "default_dir")]
    pub root_dir: String,

    #[serde(default = "default_dir")]
    pub export_dir: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            root_dir: default_dir(),
            export_dir: default_dir(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewConfig {
    /// Comma-separated day offsets, e.g. "0,1,2,4"
    #[serde(default = "default_target_days")]
    pub target_days: String,
}

impl Default for ReviewConfig {
    fn default() -> Self {
        Self {
            target_days: default_target_days(),
        }
    }
}

/// Version control settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GitConfig {
    #[serde(default)]
    pub enabled: bool,

    #[serde(default = "default_remote")]
    pub remote_name: String,

    #[serde(default = "default_branch")]
    pub branch: String,
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            remote_name: default_remote(),
            branch: default_branch(),
        }
    }
}

/// Editor override; `$VISUAL` then `$EDITOR` are used when unset
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EditorConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Also write HTML renderings of the exports
    #[serde(default)]
    pub html: bool,
}

fn default_dir() -> String {
    "./answers".to_string()
}

fn default_target_days() -> String {
    Schedule::default().to_string()
}

fn default_remote() -> String {
    "origin".to_string()
}

fn default_branch() -> String {
    "main".to_string()
}
