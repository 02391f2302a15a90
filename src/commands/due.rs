//! `ebbnote due` - print the notes due for review today

use std::io::Write;

use chrono::Local;

use crate::cli::OutputFormat;
use crate::session::Session;
use ebbnote_core::error::Result;
use ebbnote_core::export::render_now;
use ebbnote_core::store::scan;

/// Execute the due command
pub fn execute(session: &Session, out: &mut dyn Write) -> Result<()> {
    let outcome = scan(session.repo.as_ref());
    for error in &outcome.errors {
        tracing::warn!(error = %error, "scan incomplete");
    }
    let due = session
        .schedule
        .filter(&outcome.notes, Local::now().timestamp());

    match session.format {
        OutputFormat::Json => {
            writeln!(out, "{}", serde_json::to_string_pretty(&due)?)?;
        }
        OutputFormat::Human => {
            write!(out, "{}", render_now(&due, None))?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::testing::session_in;
    use ebbnote_core::schedule::Schedule;
    use ebbnote_core::store::create_note;
    use tempfile::tempdir;

    #[test]
    fn test_due_lists_fresh_note() {
        let dir = tempdir().unwrap();
        let (mut session, _) = session_in(dir.path(), Schedule::new([0]));
        create_note(session.repo.as_mut(), "Math", "A").unwrap();

        let mut out = Vec::new();
        execute(&session, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("### [Math](Math)\n- [A](Math/A.md)\n"));
    }

    #[test]
    fn test_due_json() {
        let dir = tempdir().unwrap();
        let (mut session, _) = session_in(dir.path(), Schedule::new([1]));
        session.format = OutputFormat::Json;
        create_note(session.repo.as_mut(), "Math", "A").unwrap();

        let mut out = Vec::new();
        execute(&session, &mut out).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value.as_array().unwrap().len(), 0);
    }
}
