//! Filesystem-backed note repository

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use walkdir::{DirEntry, WalkDir};

use super::{NoteEntry, NoteRepository};
use crate::error::{EbbError, Result};
use crate::note::NOTE_EXTENSION;

/// Notes stored as `root/<subject>/<content>.md` on disk
#[derive(Debug, Clone)]
pub struct FsRepository {
    root: PathBuf,
}

impl FsRepository {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Create the root directory if it is missing. Returns true if it was created.
    pub fn ensure_root(&self) -> Result<bool> {
        if self.root.is_dir() {
            return Ok(false);
        }
        fs::create_dir_all(&self.root)
            .map_err(|e| EbbError::io_operation("create directory", self.root.display(), e))?;
        Ok(true)
    }

    /// Immediate children of `dir`, in directory listing order.
    ///
    /// Only failing to read `dir` itself is an error; entries that cannot be
    /// inspected (dangling links, permission errors) are skipped.
    fn children(&self, dir: &Path) -> Result<Vec<DirEntry>> {
        let mut children = Vec::new();
        for entry in WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
        {
            match entry {
                Ok(entry) => children.push(entry),
                Err(e) if e.depth() == 0 => {
                    return Err(EbbError::io_operation("list", dir.display(), e));
                }
                Err(e) => tracing::warn!(error = %e, "skipping unreadable entry"),
            }
        }
        Ok(children)
    }
}

fn utf8_name(entry: &DirEntry) -> Option<&str> {
    let name = entry.file_name().to_str();
    if name.is_none() {
        tracing::warn!(path = %entry.path().display(), "skipping non UTF-8 name");
    }
    name
}

/// Modification time as whole seconds since the epoch (floored)
fn epoch_seconds(time: SystemTime) -> i64 {
    match time.duration_since(UNIX_EPOCH) {
        Ok(d) => d.as_secs() as i64,
        Err(e) => {
            let before = e.duration();
            let secs = before.as_secs() as i64;
            if before.subsec_nanos() > 0 {
                -secs - 1
            } else {
                -secs
            }
        }
    }
}

fn modified_seconds(path: &Path) -> Result<i64> {
    let modified = fs::metadata(path)
        .and_then(|m| m.modified())
        .map_err(|e| EbbError::io_operation("read metadata of", path.display(), e))?;
    Ok(epoch_seconds(modified))
}

impl NoteRepository for FsRepository {
    fn root(&self) -> &Path {
        &self.root
    }

    fn list_subjects(&self) -> Result<Vec<String>> {
        Ok(self
            .children(&self.root)?
            .iter()
            .filter(|entry| entry.file_type().is_dir())
            .filter_map(|entry| utf8_name(entry).map(str::to_string))
            .collect())
    }

    fn list_notes(&self, subject: &str) -> Result<Vec<NoteEntry>> {
        let suffix = format!(".{}", NOTE_EXTENSION);
        let mut entries = Vec::new();

        for entry in self.children(&self.root.join(subject))? {
            if !entry.file_type().is_file() {
                continue;
            }
            let Some(content) = utf8_name(&entry).and_then(|name| name.strip_suffix(&suffix))
            else {
                continue;
            };
            if content.is_empty() {
                continue;
            }
            match modified_seconds(entry.path()) {
                Ok(last_modified) => entries.push(NoteEntry {
                    content: content.to_string(),
                    last_modified,
                }),
                Err(e) => tracing::warn!(error = %e, "skipping note"),
            }
        }

        Ok(entries)
    }

    fn read_meta(&self, subject: &str, content: &str) -> Result<Option<i64>> {
        let path = self.note_path(subject, content);
        if !path.exists() {
            return Ok(None);
        }
        modified_seconds(&path).map(Some)
    }

    fn read_note(&self, subject: &str, content: &str) -> Result<Vec<u8>> {
        let path = self.note_path(subject, content);
        fs::read(&path).map_err(|e| EbbError::io_operation("read", path.display(), e))
    }

    fn write_note(&mut self, subject: &str, content: &str, body: &str) -> Result<PathBuf> {
        self.write_with(subject, content, |file| file.write_all(body.as_bytes()))
    }
}

impl FsRepository {
    /// Create the note file and fill it with `fill`. A failed fill removes the
    /// partial file, and the subject directory if this call created it.
    fn write_with<F>(&self, subject: &str, content: &str, fill: F) -> Result<PathBuf>
    where
        F: FnOnce(&mut File) -> io::Result<()>,
    {
        let dir = self.root.join(subject);
        let created_dir = !dir.is_dir();
        if created_dir {
            fs::create_dir_all(&dir)
                .map_err(|e| EbbError::io_operation("create directory", dir.display(), e))?;
            tracing::info!(subject = %subject, "created subject directory");
        }

        let path = self.note_path(subject, content);
        let written = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .map_err(|e| EbbError::io_operation("create", path.display(), e))
            .and_then(|mut file| {
                fill(&mut file).map_err(|e| {
                    drop(file);
                    if let Err(cleanup) = fs::remove_file(&path) {
                        tracing::warn!(path = %path.display(), error = %cleanup, "could not remove partial note");
                    }
                    EbbError::io_operation("write", path.display(), e)
                })
            });

        if let Err(e) = written {
            if created_dir {
                let _ = fs::remove_dir(&dir);
            }
            return Err(e);
        }
        Ok(path)
    }
}
