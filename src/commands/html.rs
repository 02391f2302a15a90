//! `ebbnote html` - convert every note to HTML

use std::io::Write;
use std::path::PathBuf;

use crate::cli::OutputFormat;
use crate::session::Session;
use ebbnote_core::error::Result;
use ebbnote_core::html::{convert_store, ConversionReport};

/// Default output directory under the export directory
pub const HTML_DIR: &str = "html";

/// Execute the html command
pub fn execute(
    session: &Session,
    out_dir: Option<PathBuf>,
    out: &mut dyn Write,
) -> Result<ConversionReport> {
    let out_dir = out_dir.unwrap_or_else(|| session.config.export_dir().join(HTML_DIR));
    let report = convert_store(session.repo.as_ref(), &out_dir, session.renderer.as_ref());

    match session.format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "out_dir": out_dir.display().to_string(),
                "converted": report.converted,
                "placeholders": report.placeholders,
                "failures": report.failures.iter().map(|e| e.to_string()).collect::<Vec<_>>(),
            });
            writeln!(out, "{}", serde_json::to_string_pretty(&output)?)?;
        }
        OutputFormat::Human => {
            for failure in &report.failures {
                writeln!(out, ">> {}", failure)?;
            }
            for placeholder in &report.placeholders {
                writeln!(out, ">> Could not decode {}, wrote a placeholder", placeholder)?;
            }
            if !session.quiet {
                writeln!(
                    out,
                    "<< Converted {} notes into {}",
                    report.converted,
                    out_dir.display()
                )?;
            }
        }
    }

    Ok(report)
}
