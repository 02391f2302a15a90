//! Session context shared by every command handler

use std::io::Write;
use std::path::Path;

use ebbnote_core::config::{resolve_config_path, Config, LoadedConfig};
use ebbnote_core::editor::{CommandEditor, Editor};
use ebbnote_core::error::{EbbError, Result};
use ebbnote_core::git::{self, GitCli, VersionControl};
use ebbnote_core::html::{MarkdownRenderer, Renderer};
use ebbnote_core::schedule::Schedule;
use ebbnote_core::store::{FsRepository, NoteRepository};

use crate::cli::{Cli, OutputFormat};

/// State carried between commands: configuration, the store, the
/// collaborators, and the last subject used for note entry.
pub struct Session {
    pub config: LoadedConfig,
    pub schedule: Schedule,
    pub repo: Box<dyn NoteRepository>,
    pub editor: Option<Box<dyn Editor>>,
    pub vcs: Box<dyn VersionControl>,
    pub renderer: Box<dyn Renderer>,
    pub last_subject: Option<String>,
    pub format: OutputFormat,
    pub quiet: bool,
}

impl Session {
    /// Load configuration, run start-up checks and wire the real collaborators
    pub fn open(cli: &Cli, cwd: &Path, out: &mut dyn Write) -> Result<Self> {
        let path = resolve_config_path(cli.config.clone(), cwd);
        let config = Config::load_or_init(&path)?;
        if config.created && !cli.quiet && cli.format == OutputFormat::Human {
            writeln!(out, ">> Created default config {}", path.display())?;
        }

        let schedule = config.check().map_err(|e| EbbError::InvalidConfig {
            path: path.clone(),
            reason: e.to_string(),
        })?;

        if config.config.git.enabled {
            if !git::is_git_available() {
                tracing::warn!("git is enabled but the git binary was not found");
            } else if let Err(e) = git::ensure_repository(&config.repo_dir()) {
                tracing::warn!(error = %e, "could not initialize git repository");
            }
        }

        let editor = CommandEditor::resolve(config.config.editor.command.as_deref())
            .map(|editor| Box::new(editor) as Box<dyn Editor>);
        let repo = Box::new(FsRepository::new(config.root_dir()));

        Ok(Self {
            config,
            schedule,
            repo,
            editor,
            vcs: Box::new(GitCli),
            renderer: Box::new(MarkdownRenderer),
            last_subject: None,
            format: cli.format,
            quiet: cli.quiet,
        })
    }

    /// Whether human-readable progress messages should be printed
    pub fn chatty(&self) -> bool {
        !self.quiet && self.format == OutputFormat::Human
    }

    /// Open `path` in the editor if one is configured. Editor failures are
    /// reported and do not fail the calling command.
    pub fn open_in_editor(&self, path: &Path, out: &mut dyn Write) -> Result<()> {
        let Some(editor) = &self.editor else {
            tracing::debug!(path = %path.display(), "no editor configured");
            if self.chatty() {
                writeln!(out, ">> No editor configured, open {} manually", path.display())?;
            }
            return Ok(());
        };
        if let Err(e) = editor.open(path) {
            writeln!(out, ">> Could not open {}: {}", path.display(), e)?;
        }
        Ok(())
    }
}
