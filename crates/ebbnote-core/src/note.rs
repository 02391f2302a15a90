//! The note record produced by a store scan

use serde::Serialize;

/// File extension of note documents
pub const NOTE_EXTENSION: &str = "md";

/// A note document as seen by one scan of the store.
///
/// Notes are never persisted as records; the document file is the durable
/// entity and a `Note` is rebuilt from it on every scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Note {
    /// Name of the subject directory containing the note
    pub subject: String,
    /// Document file name without the extension
    pub content: String,
    /// Modification time in seconds since the Unix epoch
    pub last_modified: i64,
}

impl Note {
    pub fn new(subject: impl Into<String>, content: impl Into<String>, last_modified: i64) -> Self {
        Self {
            subject: subject.into(),
            content: content.into(),
            last_modified,
        }
    }

    /// Path of the note relative to the store root, `/`-separated for links
    pub fn relative_path(&self) -> String {
        format!("{}/{}.{}", self.subject, self.content, NOTE_EXTENSION)
    }

    /// File name of the note document
    pub fn file_name(content: &str) -> String {
        format!("{}.{}", content, NOTE_EXTENSION)
    }
}
