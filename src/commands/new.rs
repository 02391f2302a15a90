//! `ebbnote new` - create a note and regenerate the exports
//!
//! Creating a note that already exists is a reported no-op, not an error.

use std::io::Write;

use tracing::debug;

use crate::cli::OutputFormat;
use crate::commands::export::refresh;
use crate::session::Session;
use ebbnote_core::error::Result;
use ebbnote_core::store::{create_note, CreateOutcome};

/// Create `subject/content`, optionally open it, then refresh the exports.
///
/// Export regeneration runs even when the note already existed so the
/// exports always match the store after an entry.
pub fn create_and_refresh(
    session: &mut Session,
    subject: &str,
    content: &str,
    open: bool,
    out: &mut dyn Write,
) -> Result<CreateOutcome> {
    let outcome = create_note(session.repo.as_mut(), subject, content)?;
    debug!(?outcome, "create_note");

    if session.chatty() {
        match &outcome {
            CreateOutcome::Created(path) => {
                writeln!(out, ">> Created {}", path.display())?;
            }
            CreateOutcome::AlreadyExists(path) => {
                writeln!(out, ">> '{}' already exists, nothing to do", path.display())?;
            }
        }
    }

    if open && outcome.is_created() {
        session.open_in_editor(outcome.path(), out)?;
    }

    refresh(session, out)?;
    Ok(outcome)
}

/// Execute the new command
pub fn execute(
    session: &mut Session,
    subject: &str,
    content: &str,
    open: bool,
    out: &mut dyn Write,
) -> Result<()> {
    let outcome = create_and_refresh(session, subject, content, open, out)?;

    if session.format == OutputFormat::Json {
        let output = serde_json::json!({
            "subject": subject,
            "content": content,
            "path": outcome.path().display().to_string(),
            "created": outcome.is_created(),
        });
        writeln!(out, "{}", serde_json::to_string_pretty(&output)?)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::testing::session_in;
    use ebbnote_core::export::EXPORT_FILE;
    use ebbnote_core::schedule::Schedule;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_create_opens_editor_and_refreshes() {
        let dir = tempdir().unwrap();
        let (mut session, editor) = session_in(dir.path(), Schedule::new([0]));

        let outcome = create_and_refresh(&mut session, "Math", "A", true, &mut Vec::new()).unwrap();
        assert!(outcome.is_created());
        assert_eq!(editor.0.borrow().len(), 1);

        let due = fs::read_to_string(session.config.export_dir().join(EXPORT_FILE)).unwrap();
        assert!(due.contains("- [A](Math/A.md)"));
    }

    #[test]
    fn test_existing_note_is_noop_and_not_opened() {
        let dir = tempdir().unwrap();
        let (mut session, editor) = session_in(dir.path(), Schedule::new([0]));
        create_and_refresh(&mut session, "Math", "A", false, &mut Vec::new()).unwrap();
        let path = session.config.root_dir().join("Math/A.md");
        let before = fs::read(&path).unwrap();

        let mut out = Vec::new();
        let outcome = create_and_refresh(&mut session, "Math", "A", true, &mut out).unwrap();
        assert!(!outcome.is_created());
        assert!(editor.0.borrow().is_empty());
        assert_eq!(fs::read(&path).unwrap(), before);
        assert!(String::from_utf8(out).unwrap().contains("already exists"));
    }

    #[test]
    fn test_invalid_name_is_rejected_before_refresh() {
        let dir = tempdir().unwrap();
        let (mut session, _) = session_in(dir.path(), Schedule::default());

        let err = create_and_refresh(&mut session, "Math", "a/b", false, &mut Vec::new())
            .unwrap_err();
        assert!(err.is_validation());
        assert!(!session.config.export_dir().join(EXPORT_FILE).exists());
    }
}
