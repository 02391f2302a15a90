//! Parsing of note-entry lines typed into the shell
//!
//! Grammar:
//! - `0` cancels entry
//! - `> subject` sets the default subject
//! - `content` uses the default subject when one is set
//! - `subject content` splits at the first whitespace run

/// What a line of note entry asks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryAction {
    Empty,
    Cancel,
    SetSubject(String),
    Create {
        subject: String,
        content: String,
        /// True when the subject came from the session default
        used_default: bool,
    },
}

/// Split at the first whitespace run; a single word is both subject and content
pub fn split_subject(input: &str) -> (&str, &str) {
    match input.split_once(char::is_whitespace) {
        Some((subject, rest)) => (subject, rest.trim_start()),
        None => (input, input),
    }
}

pub fn parse_entry(line: &str, default_subject: Option<&str>) -> EntryAction {
    let input = line.trim();

    if input.is_empty() {
        return EntryAction::Empty;
    }
    if input == "0" {
        return EntryAction::Cancel;
    }
    if let Some(rest) = input.strip_prefix('>') {
        return EntryAction::SetSubject(rest.trim().to_string());
    }

    if let Some(subject) = default_subject.filter(|_| !input.contains(char::is_whitespace)) {
        return EntryAction::Create {
            subject: subject.to_string(),
            content: input.to_string(),
            used_default: true,
        };
    }

    let (subject, content) = split_subject(input);
    EntryAction::Create {
        subject: subject.to_string(),
        content: content.to_string(),
        used_default: false,
    }
}
