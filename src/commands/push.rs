//! `ebbnote push` - commit and push the store with git

use std::io::Write;

use crate::cli::OutputFormat;
use crate::session::Session;
use ebbnote_core::bail_usage;
use ebbnote_core::error::Result;
use ebbnote_core::git::PushOutcome;

/// Execute the push command
pub fn execute(session: &Session, out: &mut dyn Write) -> Result<PushOutcome> {
    let git = &session.config.config.git;
    if !git.enabled {
        bail_usage!("git is not enabled; set [git] enabled = true in the config");
    }

    if session.chatty() {
        writeln!(out, ">> Pushing changes...")?;
    }

    let outcome =
        session
            .vcs
            .commit_and_push(&session.config.repo_dir(), &git.remote_name, &git.branch)?;

    match session.format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "remote": git.remote_name,
                "branch": git.branch,
                "pushed": outcome == PushOutcome::Pushed,
            });
            writeln!(out, "{}", serde_json::to_string_pretty(&output)?)?;
        }
        OutputFormat::Human if !session.quiet => match outcome {
            PushOutcome::Pushed => {
                writeln!(out, ">> Pushed to {}/{}", git.remote_name, git.branch)?
            }
            PushOutcome::UpToDate => writeln!(out, ">> Nothing new to push")?,
        },
        OutputFormat::Human => {}
    }

    Ok(outcome)
}
