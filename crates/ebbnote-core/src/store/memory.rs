//! In-memory note repository for tests and dry runs

use std::io;
use std::path::{Path, PathBuf};

use super::{NoteEntry, NoteRepository};
use crate::error::{EbbError, Result};

#[derive(Debug, Clone)]
struct MemoryNote {
    content: String,
    last_modified: i64,
    body: Vec<u8>,
}

#[derive(Debug, Clone)]
struct MemorySubject {
    name: String,
    notes: Vec<MemoryNote>,
}

/// Repository that keeps subjects and notes in insertion order.
///
/// New notes get the repository clock as their modification time; older
/// notes are seeded through [`MemoryRepository::insert`].
#[derive(Debug, Clone)]
pub struct MemoryRepository {
    root: PathBuf,
    subjects: Vec<MemorySubject>,
    now: i64,
    unreadable_root: bool,
    unreadable_subjects: Vec<String>,
}

impl Default for MemoryRepository {
    fn default() -> Self {
        Self::new(0)
    }
}

impl MemoryRepository {
    pub fn new(now: i64) -> Self {
        Self {
            root: PathBuf::from("memory"),
            subjects: Vec::new(),
            now,
            unreadable_root: false,
            unreadable_subjects: Vec::new(),
        }
    }

    /// Insert or replace a note with an explicit modification time
    pub fn insert(&mut self, subject: &str, content: &str, last_modified: i64, body: &[u8]) {
        let note = MemoryNote {
            content: content.to_string(),
            last_modified,
            body: body.to_vec(),
        };
        let entry = self.subject_mut(subject);
        match entry.notes.iter_mut().find(|n| n.content == content) {
            Some(existing) => *existing = note,
            None => entry.notes.push(note),
        }
    }

    /// Make every root listing fail
    pub fn make_root_unreadable(&mut self) {
        self.unreadable_root = true;
    }

    /// Make listing one subject fail
    pub fn make_subject_unreadable(&mut self, subject: &str) {
        self.unreadable_subjects.push(subject.to_string());
    }

    fn subject_mut(&mut self, name: &str) -> &mut MemorySubject {
        let index = match self.subjects.iter().position(|s| s.name == name) {
            Some(index) => index,
            None => {
                self.subjects.push(MemorySubject {
                    name: name.to_string(),
                    notes: Vec::new(),
                });
                self.subjects.len() - 1
            }
        };
        &mut self.subjects[index]
    }

    fn find(&self, subject: &str, content: &str) -> Option<&MemoryNote> {
        self.subjects
            .iter()
            .find(|s| s.name == subject)
            .and_then(|s| s.notes.iter().find(|n| n.content == content))
    }

    fn denied(path: &Path) -> EbbError {
        EbbError::io_operation(
            "list",
            path.display(),
            io::Error::from(io::ErrorKind::PermissionDenied),
        )
    }
}

impl NoteRepository for MemoryRepository {
    fn root(&self) -> &Path {
        &self.root
    }

    fn list_subjects(&self) -> Result<Vec<String>> {
        if self.unreadable_root {
            return Err(Self::denied(&self.root));
        }
        Ok(self.subjects.iter().map(|s| s.name.clone()).collect())
    }

    fn list_notes(&self, subject: &str) -> Result<Vec<NoteEntry>> {
        if self.unreadable_subjects.iter().any(|s| s == subject) {
            return Err(Self::denied(&self.root.join(subject)));
        }
        let subject = self
            .subjects
            .iter()
            .find(|s| s.name == subject)
            .ok_or_else(|| {
                EbbError::io_operation(
                    "list",
                    self.root.join(subject).display(),
                    io::Error::from(io::ErrorKind::NotFound),
                )
            })?;
        Ok(subject
            .notes
            .iter()
            .map(|n| NoteEntry {
                content: n.content.clone(),
                last_modified: n.last_modified,
            })
            .collect())
    }

    fn read_meta(&self, subject: &str, content: &str) -> Result<Option<i64>> {
        Ok(self.find(subject, content).map(|n| n.last_modified))
    }

    fn read_note(&self, subject: &str, content: &str) -> Result<Vec<u8>> {
        self.find(subject, content)
            .map(|n| n.body.clone())
            .ok_or_else(|| {
                EbbError::io_operation(
                    "read",
                    self.note_path(subject, content).display(),
                    io::Error::from(io::ErrorKind::NotFound),
                )
            })
    }

    fn write_note(&mut self, subject: &str, content: &str, body: &str) -> Result<PathBuf> {
        let path = self.note_path(subject, content);
        if self.find(subject, content).is_some() {
            return Err(EbbError::io_operation(
                "create",
                path.display(),
                io::Error::from(io::ErrorKind::AlreadyExists),
            ));
        }
        let now = self.now;
        self.subject_mut(subject).notes.push(MemoryNote {
            content: content.to_string(),
            last_modified: now,
            body: body.as_bytes().to_vec(),
        });
        Ok(path)
    }
}
