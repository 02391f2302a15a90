//! Note store access
//!
//! The store is a two-level directory tree: `root/<subject>/<content>.md`.
//! The tree itself is the source of truth; everything else is rebuilt from a
//! scan. Access goes through [`NoteRepository`] so the scan and writer logic
//! can run against [`MemoryRepository`] in tests.

pub mod fs;
pub mod memory;

use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::error::{EbbError, Result};
use crate::name::validate_name;
use crate::note::Note;
use crate::{bail_invalid, trace_time};

pub use fs::FsRepository;
pub use memory::MemoryRepository;

/// A note document as listed inside one subject directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteEntry {
    pub content: String,
    pub last_modified: i64,
}

/// Storage backend for note documents
pub trait NoteRepository {
    /// Root of the store, used to build note paths
    fn root(&self) -> &Path;

    /// Subject directory names, in listing order
    fn list_subjects(&self) -> Result<Vec<String>>;

    /// Note documents directly inside `subject`, in listing order
    fn list_notes(&self, subject: &str) -> Result<Vec<NoteEntry>>;

    /// Modification time of a note, or `None` if it does not exist
    fn read_meta(&self, subject: &str, content: &str) -> Result<Option<i64>>;

    /// Raw bytes of a note document
    fn read_note(&self, subject: &str, content: &str) -> Result<Vec<u8>>;

    /// Write a new note document, creating the subject directory if needed.
    /// Never replaces an existing document.
    fn write_note(&mut self, subject: &str, content: &str, body: &str) -> Result<PathBuf>;

    fn note_path(&self, subject: &str, content: &str) -> PathBuf {
        self.root().join(subject).join(Note::file_name(content))
    }
}

/// Result of scanning a store
#[derive(Debug, Default)]
pub struct ScanOutcome {
    pub notes: Vec<Note>,
    /// Listing failures encountered; a failure on the root leaves `notes` empty
    pub errors: Vec<EbbError>,
}

impl ScanOutcome {
    pub fn is_complete(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Build the note inventory from the store.
///
/// Subjects and notes keep the backend's listing order. Listing failures are
/// returned in the outcome instead of aborting: an unreadable root yields an
/// empty inventory, an unreadable subject is skipped.
#[tracing::instrument(skip(repo), fields(root = %repo.root().display()))]
pub fn scan<R: NoteRepository + ?Sized>(repo: &R) -> ScanOutcome {
    let start = Instant::now();
    let mut outcome = ScanOutcome::default();

    let subjects = match repo.list_subjects() {
        Ok(subjects) => subjects,
        Err(e) => {
            tracing::warn!(error = %e, "failed to list store root");
            outcome.errors.push(e);
            return outcome;
        }
    };

    for subject in subjects {
        match repo.list_notes(&subject) {
            Ok(entries) => outcome.notes.extend(
                entries
                    .into_iter()
                    .map(|entry| Note::new(subject.clone(), entry.content, entry.last_modified)),
            ),
            Err(e) => {
                tracing::warn!(subject = %subject, error = %e, "failed to list subject");
                outcome.errors.push(e);
            }
        }
    }

    trace_time!(start, "scan", notes = outcome.notes.len());
    outcome
}

/// What [`create_note`] did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateOutcome {
    Created(PathBuf),
    /// The document was already present and was left untouched
    AlreadyExists(PathBuf),
}

impl CreateOutcome {
    pub fn path(&self) -> &Path {
        match self {
            CreateOutcome::Created(path) | CreateOutcome::AlreadyExists(path) => path,
        }
    }

    pub fn is_created(&self) -> bool {
        matches!(self, CreateOutcome::Created(_))
    }
}

/// Initial body of a freshly created note
pub fn initial_body(content: &str) -> String {
    format!("## {}\n", content)
}

/// Create `root/<subject>/<content>.md` unless it already exists.
#[tracing::instrument(skip(repo))]
pub fn create_note<R: NoteRepository + ?Sized>(
    repo: &mut R,
    subject: &str,
    content: &str,
) -> Result<CreateOutcome> {
    validate_name("subject", subject)?;
    validate_name("content", content)?;
    if subject.trim().is_empty() || matches!(subject, "." | "..") {
        bail_invalid!("subject", format!("{subject:?}"));
    }
    if content.trim().is_empty() {
        bail_invalid!("content", format!("{content:?}"));
    }

    if repo.read_meta(subject, content)?.is_some() {
        let path = repo.note_path(subject, content);
        tracing::debug!(path = %path.display(), "note already exists");
        return Ok(CreateOutcome::AlreadyExists(path));
    }

    let path = repo.write_note(subject, content, &initial_body(content))?;
    tracing::info!(path = %path.display(), "created note");
    Ok(CreateOutcome::Created(path))
}
