//! Opening notes in an external editor

use std::path::Path;
use std::process::Command;

use crate::error::{EbbError, Result};

/// Editor capability; `open` blocks until the editor exits
pub trait Editor {
    fn open(&self, path: &Path) -> Result<()>;
}

/// Runs a configured editor command with the file path appended
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandEditor {
    program: String,
    args: Vec<String>,
}

impl CommandEditor {
    /// Parse a command line such as `code --wait`
    pub fn from_command(command: &str) -> Option<Self> {
        let mut parts = command.split_whitespace().map(str::to_string);
        let program = parts.next()?;
        Some(Self {
            program,
            args: parts.collect(),
        })
    }

    /// Pick the editor from an explicit override, then `$VISUAL`, then `$EDITOR`
    pub fn resolve(configured: Option<&str>) -> Option<Self> {
        configured
            .map(str::to_string)
            .or_else(|| std::env::var("VISUAL").ok())
            .or_else(|| std::env::var("EDITOR").ok())
            .and_then(|command| Self::from_command(&command))
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

impl Editor for CommandEditor {
    fn open(&self, path: &Path) -> Result<()> {
        tracing::debug!(editor = %self.program, path = %path.display(), "open_editor");

        let status = Command::new(&self.program)
            .args(&self.args)
            .arg(path)
            .status()
            .map_err(|e| EbbError::editor(format!("failed to open '{}': {}", self.program, e)))?;

        if !status.success() {
            return Err(EbbError::editor(format!(
                "'{}' exited with non-zero status: {:?}",
                self.program, status
            )));
        }

        Ok(())
    }
}
