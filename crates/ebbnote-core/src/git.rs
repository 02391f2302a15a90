//! Git integration for publishing the note store
//!
//! Stages everything, commits with a timestamped message and pushes to the
//! configured remote. All calls shell out to the `git` binary.

use std::path::Path;
use std::process::{Command, Output};

use chrono::Local;

use crate::error::{EbbError, Result};

/// Result of a successful publish
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PushOutcome {
    Pushed,
    /// The remote already had everything
    UpToDate,
}

/// Version-control capability used by the orchestrator
pub trait VersionControl {
    fn commit_and_push(&self, repo: &Path, remote: &str, branch: &str) -> Result<PushOutcome>;
}

/// [`VersionControl`] backed by the `git` command line
#[derive(Debug, Clone, Copy, Default)]
pub struct GitCli;

/// Check if git is available on the system
pub fn is_git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .map(|output| output.status.success())
        .unwrap_or(false)
}

/// Initialize a repository at `repo_path` unless one exists. Returns true if
/// `git init` was run.
pub fn ensure_repository(repo_path: &Path) -> Result<bool> {
    if repo_path.join(".git").exists() {
        return Ok(false);
    }
    run_git(repo_path, &["init"])?;
    tracing::info!(path = %repo_path.display(), "initialized git repository");
    Ok(true)
}

/// Commit message for an automatic publish
pub fn commit_message() -> String {
    format!("Auto commit: {}", Local::now().format("%Y-%m-%d %H:%M:%S"))
}

fn git_output(repo_path: &Path, args: &[&str]) -> Result<Output> {
    Command::new("git")
        .arg("-C")
        .arg(repo_path)
        .args(args)
        .output()
        .map_err(|e| EbbError::vcs(format!("failed to run git {}: {}", args.join(" "), e)))
}

fn combined_output(output: &Output) -> String {
    format!(
        "{}{}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    )
}

fn run_git(repo_path: &Path, args: &[&str]) -> Result<Output> {
    let output = git_output(repo_path, args)?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(EbbError::vcs(format!(
            "git {} failed: {}",
            args.join(" "),
            stderr.trim()
        )));
    }
    Ok(output)
}

/// Whether a failed `git commit` only failed because the tree was clean
fn is_nothing_to_commit(text: &str) -> bool {
    text.contains("nothing to commit") || text.contains("nothing added to commit")
}

fn is_up_to_date(text: &str) -> bool {
    text.contains("Everything up-to-date")
}

impl VersionControl for GitCli {
    #[tracing::instrument(skip(self), fields(repo = %repo.display()))]
    fn commit_and_push(&self, repo: &Path, remote: &str, branch: &str) -> Result<PushOutcome> {
        run_git(repo, &["add", "-A"])?;

        let message = commit_message();
        let commit = git_output(repo, &["commit", "-m", &message])?;
        if !commit.status.success() {
            let text = combined_output(&commit);
            if !is_nothing_to_commit(&text) {
                return Err(EbbError::vcs(format!("git commit failed: {}", text.trim())));
            }
            tracing::debug!("nothing to commit");
        }

        let push = run_git(repo, &["push", remote, branch])?;
        if is_up_to_date(&combined_output(&push)) {
            return Ok(PushOutcome::UpToDate);
        }
        tracing::info!(remote = %remote, branch = %branch, "pushed");
        Ok(PushOutcome::Pushed)
    }
}
