//! Configuration for ebbnote
//!
//! Configuration lives in a TOML file (default `config.toml` in the working
//! directory). A missing file is created with the defaults so later runs see
//! an explicit configuration; missing keys in an existing file take defaults.

pub mod types;

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{EbbError, Result};
use crate::schedule::Schedule;
use crate::store::FsRepository;

pub use types::{Config, EditorConfig, ExportConfig, GitConfig, PathsConfig, ReviewConfig};

/// Default configuration file name
pub const CONFIG_FILE: &str = "config.toml";

/// Environment variable overriding the configuration path
pub const CONFIG_ENV_VAR: &str = "EBBNOTE_CONFIG";

/// A configuration together with where it was loaded from
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: Config,
    pub path: PathBuf,
    /// True when the file did not exist and defaults were written
    pub created: bool,
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| EbbError::io_operation("read config", path.display(), e))?;
        toml::from_str(&content).map_err(|e| EbbError::InvalidConfig {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| EbbError::Other(format!("failed to serialize config: {}", e)))?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .map_err(|e| EbbError::io_operation("create directory", parent.display(), e))?;
        }
        fs::write(path, content)
            .map_err(|e| EbbError::io_operation("write config", path.display(), e))?;
        Ok(())
    }

    /// Load `path`, writing the defaults first if it does not exist
    pub fn load_or_init(path: &Path) -> Result<LoadedConfig> {
        if path.exists() {
            return Ok(LoadedConfig {
                config: Self::load(path)?,
                path: path.to_path_buf(),
                created: false,
            });
        }

        let config = Config::default();
        config.save(path)?;
        tracing::info!(path = %path.display(), "wrote default config");
        Ok(LoadedConfig {
            config,
            path: path.to_path_buf(),
            created: true,
        })
    }

    /// Parsed review schedule
    pub fn schedule(&self) -> Result<Schedule> {
        self.review.target_days.parse()
    }
}

impl LoadedConfig {
    /// Directory relative paths in the config resolve against
    pub fn base_dir(&self) -> PathBuf {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }

    fn resolve(&self, value: &str) -> PathBuf {
        let path = Path::new(value);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir().join(path)
        }
    }

    /// Absolute or config-relative note store root
    pub fn root_dir(&self) -> PathBuf {
        self.resolve(&self.config.paths.root_dir)
    }

    pub fn export_dir(&self) -> PathBuf {
        self.resolve(&self.config.paths.export_dir)
    }

    /// Directory treated as the git working tree
    pub fn repo_dir(&self) -> PathBuf {
        self.base_dir()
    }

    /// Start-up checks: create the store root if missing and validate the
    /// schedule. Returns the parsed schedule.
    pub fn check(&self) -> Result<Schedule> {
        let schedule = self.config.schedule()?;
        if FsRepository::new(self.root_dir()).ensure_root()? {
            tracing::info!(root = %self.root_dir().display(), "created note root");
        }
        Ok(schedule)
    }
}

/// Resolve the configuration path from an explicit flag, falling back to
/// `config.toml` in `cwd`.
pub fn resolve_config_path(explicit: Option<PathBuf>, cwd: &Path) -> PathBuf {
    match explicit {
        Some(path) if path.is_absolute() => path,
        Some(path) => cwd.join(path),
        None => cwd.join(CONFIG_FILE),
    }
}
