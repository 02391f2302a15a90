//! `ebbnote export` - regenerate the due and complete exports

use std::io::Write;
use std::time::Instant;

use chrono::Local;
use tracing::debug;

use crate::cli::OutputFormat;
use crate::session::Session;
use ebbnote_core::error::Result;
use ebbnote_core::export::{regenerate, render, ExportSummary, ALL_TITLE};
use ebbnote_core::html::write_html_sibling;

/// Regenerate both exports, plus their HTML renderings when enabled.
/// Scan problems are reported on `out` but do not fail the refresh.
pub fn refresh(session: &Session, out: &mut dyn Write) -> Result<ExportSummary> {
    let start = Instant::now();
    let now = Local::now();

    let summary = regenerate(
        session.repo.as_ref(),
        &session.config.export_dir(),
        &session.schedule,
        &now,
    )?;

    for error in &summary.scan_errors {
        writeln!(out, ">> Failed to read notes: {}", error)?;
    }

    if session.config.config.export.html {
        let today = now.date_naive();
        let due_md = render(&summary.due, None, today);
        write_html_sibling(session.renderer.as_ref(), &summary.due_path, &due_md)?;

        let all_md = render(&summary.all, Some(ALL_TITLE), today);
        write_html_sibling(session.renderer.as_ref(), &summary.all_path, &all_md)?;
    }

    debug!(elapsed = ?start.elapsed(), due = summary.due.len(), total = summary.total(), "refresh");
    Ok(summary)
}

/// Execute the export command
pub fn execute(session: &Session, open: bool, out: &mut dyn Write) -> Result<()> {
    let summary = refresh(session, out)?;

    match session.format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "due": summary.due.len(),
                "total": summary.total(),
                "due_path": summary.due_path.display().to_string(),
                "all_path": summary.all_path.display().to_string(),
                "scan_errors": summary.scan_errors.iter().map(|e| e.to_string()).collect::<Vec<_>>(),
            });
            writeln!(out, "{}", serde_json::to_string_pretty(&output)?)?;
        }
        OutputFormat::Human => {
            if !session.quiet {
                writeln!(
                    out,
                    "<< Generated {} and {} ({} due of {} notes)",
                    summary.due_path.display(),
                    summary.all_path.display(),
                    summary.due.len(),
                    summary.total()
                )?;
            }
        }
    }

    if open {
        session.open_in_editor(&summary.due_path, out)?;
    }

    Ok(())
}
