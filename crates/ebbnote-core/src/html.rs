//! HTML rendering of notes and exports
//!
//! Conversion never aborts a batch: documents that cannot be decoded get a
//! placeholder body, and renderer failures become an error-marker document.

use std::fs;
use std::path::{Path, PathBuf};

use encoding_rs::{Encoding, GBK, UTF_8};
use pulldown_cmark::{html, Options, Parser};

use crate::error::{EbbError, Result};
use crate::note::Note;
use crate::store::{scan, NoteRepository};

/// Encodings tried in order when decoding a note document
pub const DEFAULT_LADDER: &[&Encoding] = &[UTF_8, GBK];

/// CSS class of the paragraph emitted when rendering fails
pub const ERROR_MARKER_CLASS: &str = "ebbnote-error";

/// Markdown to HTML conversion capability
pub trait Renderer {
    fn to_html(&self, markdown: &str) -> Result<String>;
}

/// [`Renderer`] backed by pulldown-cmark
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownRenderer;

impl Renderer for MarkdownRenderer {
    fn to_html(&self, markdown: &str) -> Result<String> {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_STRIKETHROUGH);
        let parser = Parser::new_ext(markdown, options);

        let mut out = String::with_capacity(markdown.len() * 3 / 2);
        html::push_html(&mut out, parser);
        Ok(out)
    }
}

/// Wrap a body fragment in a standalone HTML page
pub fn wrap_page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n</head>\n<body>\n{}</body>\n</html>\n",
        html_escape::encode_text(title),
        body
    )
}

/// Render `markdown` into a full page, substituting an error marker if the
/// renderer fails.
pub fn render_document<R: Renderer + ?Sized>(renderer: &R, title: &str, markdown: &str) -> String {
    let body = match renderer.to_html(markdown) {
        Ok(body) => body,
        Err(e) => {
            tracing::warn!(title = %title, error = %e, "html conversion failed");
            format!(
                "<p class=\"{}\">Conversion failed: {}</p>\n",
                ERROR_MARKER_CLASS,
                html_escape::encode_text(&e.to_string())
            )
        }
    };
    wrap_page(title, &body)
}

/// Decode a document, honouring a BOM and otherwise trying `ladder` in order.
/// Returns `None` when no encoding decodes the bytes cleanly.
pub fn decode_document(bytes: &[u8], ladder: &[&'static Encoding]) -> Option<String> {
    if let Some((encoding, bom_len)) = Encoding::for_bom(bytes) {
        return encoding
            .decode_without_bom_handling_and_without_replacement(&bytes[bom_len..])
            .map(|text| text.into_owned());
    }

    ladder.iter().find_map(|encoding| {
        let text = encoding.decode_without_bom_handling_and_without_replacement(bytes)?;
        if *encoding != UTF_8 {
            tracing::debug!(encoding = encoding.name(), "decoded with fallback encoding");
        }
        Some(text.into_owned())
    })
}

/// Markdown substituted for a document that could not be decoded
pub fn placeholder_markdown(content: &str) -> String {
    format!(
        "## {}\n\n*This note could not be decoded with any supported encoding.*\n",
        content
    )
}

/// Outcome of a batch conversion
#[derive(Debug, Default)]
pub struct ConversionReport {
    pub converted: usize,
    /// Relative paths of notes rendered with the placeholder body
    pub placeholders: Vec<String>,
    /// Notes that could not be read or written
    pub failures: Vec<EbbError>,
}

fn html_path(out_dir: &Path, note: &Note) -> PathBuf {
    out_dir
        .join(&note.subject)
        .join(format!("{}.html", note.content))
}

fn write_page(path: &Path, page: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| EbbError::io_operation("create directory", parent.display(), e))?;
    }
    fs::write(path, page).map_err(|e| EbbError::io_operation("write", path.display(), e))
}

/// Convert every note in the store to `out_dir/<subject>/<content>.html`.
#[tracing::instrument(skip(repo, renderer), fields(out_dir = %out_dir.display()))]
pub fn convert_store<R, T>(repo: &R, out_dir: &Path, renderer: &T) -> ConversionReport
where
    R: NoteRepository + ?Sized,
    T: Renderer + ?Sized,
{
    let outcome = scan(repo);
    let mut report = ConversionReport {
        failures: outcome.errors,
        ..Default::default()
    };

    for note in &outcome.notes {
        let bytes = match repo.read_note(&note.subject, &note.content) {
            Ok(bytes) => bytes,
            Err(e) => {
                report.failures.push(e);
                continue;
            }
        };

        let markdown = decode_document(&bytes, DEFAULT_LADDER).unwrap_or_else(|| {
            tracing::warn!(note = %note.relative_path(), "undecodable note, using placeholder");
            report.placeholders.push(note.relative_path());
            placeholder_markdown(&note.content)
        });

        let page = render_document(renderer, &note.content, &markdown);
        match write_page(&html_path(out_dir, note), &page) {
            Ok(()) => report.converted += 1,
            Err(e) => report.failures.push(e),
        }
    }

    report
}

/// Write `<name>.html` next to a Markdown export
pub fn write_html_sibling<T: Renderer + ?Sized>(
    renderer: &T,
    markdown_path: &Path,
    markdown: &str,
) -> Result<PathBuf> {
    let path = markdown_path.with_extension("html");
    let title = markdown_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    write_page(&path, &render_document(renderer, &title, markdown))?;
    Ok(path)
}
