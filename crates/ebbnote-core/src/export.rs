//! Export documents
//!
//! Two Markdown link lists are regenerated wholesale on every export:
//! `export.md` with the notes due today and `allExport.md` with every note.
//! Subjects get a heading each time the subject changes from the previous
//! note, so a subject that reappears later in the listing gets a second
//! heading.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::{DateTime, Local, NaiveDate, TimeZone};

use crate::error::{EbbError, Result};
use crate::note::Note;
use crate::schedule::Schedule;
use crate::store::{scan, NoteRepository};
use crate::trace_time;

/// File name of the due-notes export
pub const EXPORT_FILE: &str = "export.md";

/// File name of the complete export
pub const ALL_EXPORT_FILE: &str = "allExport.md";

/// Title of the complete export
pub const ALL_TITLE: &str = "All";

/// Format of the date heading used when no title is given
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Render `notes` as a Markdown link list.
///
/// The first line is `## <title>`, or `## <today>` when `title` is `None`.
pub fn render(notes: &[Note], title: Option<&str>, today: NaiveDate) -> String {
    let mut out = match title {
        Some(title) => format!("## {}\n", title),
        None => format!("## {}\n", today.format(DATE_FORMAT)),
    };

    let mut last_subject: Option<&str> = None;
    for note in notes {
        if last_subject != Some(note.subject.as_str()) {
            out.push_str(&format!("### [{0}]({0})\n", note.subject));
            last_subject = Some(note.subject.as_str());
        }
        out.push_str(&format!("- [{}]({})\n", note.content, note.relative_path()));
    }

    out
}

/// [`render`] with today's local date
pub fn render_now(notes: &[Note], title: Option<&str>) -> String {
    render(notes, title, Local::now().date_naive())
}

/// Replace the file at `path` with `text`
pub fn write_export(path: &Path, text: &str) -> Result<()> {
    fs::write(path, text).map_err(|e| EbbError::io_operation("write", path.display(), e))
}

/// What one export cycle produced
#[derive(Debug)]
pub struct ExportSummary {
    pub due: Vec<Note>,
    /// Every scanned note, in scan order
    pub all: Vec<Note>,
    pub due_path: PathBuf,
    pub all_path: PathBuf,
    /// Listing failures from the scan; the exports reflect what could be read
    pub scan_errors: Vec<EbbError>,
}

/// Scan the store and regenerate both export files in `export_dir`.
///
/// `now` is the reference time for due evaluation and supplies the date
/// heading of the due export.
#[tracing::instrument(skip(repo, schedule, now), fields(export_dir = %export_dir.display()))]
pub fn regenerate<R, Tz>(
    repo: &R,
    export_dir: &Path,
    schedule: &Schedule,
    now: &DateTime<Tz>,
) -> Result<ExportSummary>
where
    R: NoteRepository + ?Sized,
    Tz: TimeZone,
{
    let start = Instant::now();

    let outcome = scan(repo);
    let due = schedule.filter(&outcome.notes, now.timestamp());
    let today = now.date_naive();

    if !export_dir.is_dir() {
        fs::create_dir_all(export_dir)
            .map_err(|e| EbbError::io_operation("create directory", export_dir.display(), e))?;
    }

    let due_path = export_dir.join(EXPORT_FILE);
    let all_path = export_dir.join(ALL_EXPORT_FILE);
    write_export(&due_path, &render(&due, None, today))?;
    write_export(&all_path, &render(&outcome.notes, Some(ALL_TITLE), today))?;

    trace_time!(start, "regenerate", due = due.len(), total = outcome.notes.len());

    Ok(ExportSummary {
        due,
        all: outcome.notes,
        due_path,
        all_path,
        scan_errors: outcome.errors,
    })
}

impl ExportSummary {
    pub fn total(&self) -> usize {
        self.all.len()
    }
}
