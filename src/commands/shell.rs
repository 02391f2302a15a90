//! Interactive shell
//!
//! Menu:
//! - `1` create a note, `1 -r` keep creating until `0`
//! - `2` regenerate the exports and open the due export
//! - `git` commit and push (only when enabled)
//! - `html` convert every note to HTML
//! - `cls` clear the screen and redraw the menu
//! - `0` exit

use std::io::{self, BufRead, Write};

use chrono::Local;
use crossterm::cursor::MoveTo;
use crossterm::terminal::{Clear, ClearType};
use crossterm::QueueableCommand;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use crate::commands::entry::{parse_entry, EntryAction};
use crate::commands::{export, html, new, push};
use crate::session::Session;
use ebbnote_core::error::{EbbError, Result};
use ebbnote_core::export::DATE_FORMAT;
use ebbnote_core::git::PushOutcome;
use ebbnote_core::name::validate_name;
use ebbnote_core::store::scan;

const PROMPT: &str = "<< ";

/// Source of input lines; `None` means end of input
pub trait LineSource {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>>;
}

/// Line editing with history when attached to a terminal
pub struct RustylineSource {
    editor: DefaultEditor,
}

impl RustylineSource {
    pub fn new() -> Result<Self> {
        let editor = DefaultEditor::new()
            .map_err(|e| EbbError::Other(format!("failed to initialize line editor: {}", e)))?;
        Ok(Self { editor })
    }
}

impl LineSource for RustylineSource {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        match self.editor.readline(prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    let _ = self.editor.add_history_entry(line.as_str());
                }
                Ok(Some(line))
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => Ok(None),
            Err(e) => Err(EbbError::Other(format!("failed to read input: {}", e))),
        }
    }
}

/// Plain buffered reader, used when input is piped
pub struct ReaderSource<R> {
    reader: R,
}

impl<R: BufRead> ReaderSource<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> LineSource for ReaderSource<R> {
    fn read_line(&mut self, _prompt: &str) -> Result<Option<String>> {
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}

/// Print the date, the number of notes due today and the menu
fn draw_menu(session: &Session, out: &mut dyn Write) -> Result<()> {
    let now = Local::now();
    let due = session
        .schedule
        .filter(&scan(session.repo.as_ref()).notes, now.timestamp());

    writeln!(
        out,
        ">> {}, {} notes due for review",
        now.format(DATE_FORMAT),
        due.len()
    )?;
    writeln!(out, ">> 1: new note (1 -r to keep adding)")?;
    writeln!(out, ">> 2: generate exports")?;
    if session.config.config.git.enabled {
        writeln!(out, ">> git: push to remote")?;
    }
    writeln!(out, ">> html: convert notes to HTML")?;
    writeln!(out, ">> cls: clear screen")?;
    writeln!(out, ">> 0: exit")?;
    writeln!(out)?;
    Ok(())
}

fn clear_screen(out: &mut dyn Write) -> Result<()> {
    out.queue(Clear(ClearType::All))?.queue(MoveTo(0, 0))?;
    out.flush()?;
    Ok(())
}

fn entry_prompt(session: &Session, first: bool) -> String {
    match (&session.last_subject, first) {
        (Some(subject), false) => format!(
            ">> Enter a note (default subject: {}): content, or subject content; 0 to cancel",
            subject
        ),
        _ => ">> Enter a note as: subject content; 0 to cancel".to_string(),
    }
}

/// Read note entries until cancelled (or after one entry unless `repeat`)
pub fn note_entry(
    session: &mut Session,
    input: &mut dyn LineSource,
    repeat: bool,
    out: &mut dyn Write,
) -> Result<()> {
    let mut first = true;

    loop {
        writeln!(out, "{}", entry_prompt(session, first))?;
        first = false;

        let Some(line) = input.read_line(PROMPT)? else {
            return Ok(());
        };

        let (subject, content) = match parse_entry(&line, session.last_subject.as_deref()) {
            EntryAction::Empty => {
                writeln!(out, ">> Empty input is not allowed\n")?;
                continue;
            }
            EntryAction::Cancel => {
                writeln!(out, ">> Note entry cancelled\n")?;
                return Ok(());
            }
            EntryAction::SetSubject(subject) => {
                if subject.is_empty() {
                    writeln!(out, ">> Error: subject must not be empty\n")?;
                } else if let Err(e) = validate_name("subject", &subject) {
                    writeln!(out, ">> Error: {}\n", e)?;
                } else {
                    writeln!(out, ">> Default subject set: {}\n", subject)?;
                    session.last_subject = Some(subject);
                }
                continue;
            }
            EntryAction::Create {
                subject,
                content,
                used_default,
            } => {
                if used_default {
                    writeln!(out, ">> Using default subject: {}", subject)?;
                }
                (subject, content)
            }
        };

        if let Err(e) =
            validate_name("subject", &subject).and_then(|()| validate_name("content", &content))
        {
            writeln!(out, ">> Error: {}\n", e)?;
            continue;
        }
        session.last_subject = Some(subject.clone());

        if let Err(e) = new::create_and_refresh(session, &subject, &content, true, out) {
            writeln!(out, ">> Error: {}", e)?;
        }

        if !repeat {
            return Ok(());
        }
    }
}

fn push_changes(session: &Session, out: &mut dyn Write) -> Result<()> {
    match push::execute(session, out) {
        Ok(PushOutcome::Pushed) => writeln!(out, ">> Push succeeded")?,
        Ok(PushOutcome::UpToDate) => {}
        Err(e) => writeln!(out, ">> Push failed: {}", e)?,
    }
    Ok(())
}

/// Run the menu loop until `0` or end of input
pub fn run(session: &mut Session, input: &mut dyn LineSource, out: &mut dyn Write) -> Result<()> {
    if let Err(e) = export::refresh(session, out) {
        writeln!(out, ">> Error: {}", e)?;
    }
    draw_menu(session, out)?;

    loop {
        writeln!(out, ">> Choose an option")?;
        let Some(line) = input.read_line(PROMPT)? else {
            break;
        };

        let result = match line.trim() {
            "0" => break,
            "1" => note_entry(session, input, false, out),
            "1 -r" => note_entry(session, input, true, out),
            "2" => export::execute(session, true, out),
            "git" if session.config.config.git.enabled => push_changes(session, out),
            "html" => html::execute(session, None, out).map(|_| ()),
            "cls" => clear_screen(out).and_then(|()| draw_menu(session, out)),
            _ => {
                writeln!(out, ">> Not an available option\n")?;
                Ok(())
            }
        };

        if let Err(e) = result {
            writeln!(out, ">> Error: {}", e)?;
        }
    }

    writeln!(out, ">> Bye\n")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::testing::session_in;
    use ebbnote_core::export::{ALL_EXPORT_FILE, EXPORT_FILE};
    use ebbnote_core::schedule::Schedule;
    use std::fs;
    use tempfile::tempdir;

    fn script(lines: &[&str]) -> ReaderSource<io::Cursor<String>> {
        ReaderSource::new(io::Cursor::new(lines.join("\n") + "\n"))
    }

    fn run_script(session: &mut Session, lines: &[&str]) -> String {
        let mut out = Vec::new();
        run(session, &mut script(lines), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_exit_immediately_writes_exports() {
        let dir = tempdir().unwrap();
        let (mut session, _) = session_in(dir.path(), Schedule::default());

        let text = run_script(&mut session, &["0"]);
        assert!(text.contains("0 notes due for review"));
        assert!(text.contains(">> Bye"));
        assert!(session.config.export_dir().join(EXPORT_FILE).exists());
        assert!(session.config.export_dir().join(ALL_EXPORT_FILE).exists());
    }

    #[test]
    fn test_create_note_through_menu() {
        let dir = tempdir().unwrap();
        let (mut session, editor) = session_in(dir.path(), Schedule::new([0]));

        run_script(&mut session, &["1", "Math Limits", "0"]);

        let root = session.config.root_dir();
        assert_eq!(fs::read_to_string(root.join("Math/Limits.md")).unwrap(), "## Limits\n");
        assert_eq!(editor.0.borrow().len(), 1);
        let due = fs::read_to_string(session.config.export_dir().join(EXPORT_FILE)).unwrap();
        assert!(due.contains("- [Limits](Math/Limits.md)"));
    }

    #[test]
    fn test_repeat_mode_with_default_subject() {
        let dir = tempdir().unwrap();
        let (mut session, _) = session_in(dir.path(), Schedule::default());

        let text = run_script(
            &mut session,
            &["1 -r", "> Art", "Colour", "Math Limits", "Derivatives", "0", "0"],
        );

        let root = session.config.root_dir();
        assert!(root.join("Art/Colour.md").exists());
        assert!(root.join("Math/Limits.md").exists());
        // the last explicit subject becomes the default
        assert!(root.join("Math/Derivatives.md").exists());
        assert!(text.contains("Default subject set: Art"));
        assert!(text.contains("Using default subject: Math"));
        assert!(text.contains("Note entry cancelled"));
    }

    #[test]
    fn test_invalid_entry_does_not_mutate() {
        let dir = tempdir().unwrap();
        let (mut session, _) = session_in(dir.path(), Schedule::default());

        let text = run_script(&mut session, &["1", "Math a?b", "", "0", "0"]);
        assert!(text.contains("reserved characters"));
        assert!(text.contains("Empty input is not allowed"));
        assert!(!session.config.root_dir().join("Math").exists());
        assert!(session.last_subject.is_none());
    }

    #[test]
    fn test_existing_note_reported_as_noop() {
        let dir = tempdir().unwrap();
        let (mut session, _) = session_in(dir.path(), Schedule::default());
        let root = session.config.root_dir();
        fs::create_dir_all(root.join("Math")).unwrap();
        fs::write(root.join("Math/A.md"), "## A\nmy notes\n").unwrap();

        let text = run_script(&mut session, &["1", "Math A", "0"]);
        assert!(text.contains("already exists"));
        assert_eq!(fs::read_to_string(root.join("Math/A.md")).unwrap(), "## A\nmy notes\n");
    }

    #[test]
    fn test_git_hidden_when_disabled() {
        let dir = tempdir().unwrap();
        let (mut session, _) = session_in(dir.path(), Schedule::default());

        let text = run_script(&mut session, &["git", "bogus", "0"]);
        assert!(!text.contains("git: push"));
        assert_eq!(text.matches("Not an available option").count(), 2);
    }

    #[test]
    fn test_git_push_when_enabled() {
        let dir = tempdir().unwrap();
        let (mut session, _) = session_in(dir.path(), Schedule::default());
        session.config.config.git.enabled = true;

        let text = run_script(&mut session, &["git", "0"]);
        assert!(text.contains("git: push to remote"));
        assert!(text.contains("Push succeeded"));
    }

    #[test]
    fn test_clear_screen_goes_through_writer() {
        let dir = tempdir().unwrap();
        let (mut session, _) = session_in(dir.path(), Schedule::default());

        let text = run_script(&mut session, &["cls", "0"]);
        // ESC[2J clears, ESC[1;1H homes the cursor
        assert!(text.contains("\x1b[2J\x1b[1;1H"));
        assert_eq!(text.matches(">> 0: exit").count(), 2);
    }

    #[test]
    fn test_end_of_input_exits_cleanly() {
        let dir = tempdir().unwrap();
        let (mut session, _) = session_in(dir.path(), Schedule::default());

        let text = run_script(&mut session, &["1 -r", "Math A"]);
        assert!(text.contains(">> Bye"));
        assert!(session.config.root_dir().join("Math/A.md").exists());
    }
}
