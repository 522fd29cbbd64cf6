//! Page text source: validated input, document loading, per-page extraction.
//!
//! ## Why per-page extraction?
//!
//! The rest of the pipeline never sees the PDF object model — it consumes a
//! flat, ordered sequence of [`RawPage`] values, one per page, 1-indexed and
//! contiguous. Asking lopdf for one page at a time keeps that boundary
//! honest (page boundaries come from the reader, not from guessing at form
//! feeds) and lets the progress callback tick per page. Layout and font
//! internals stay opaque behind `extract_text`.
//!
//! Pages that parse but contain no text (image-only scans, blank pages) are
//! kept in the sequence with empty text so page numbering never develops
//! gaps; the assembler skips them. A page that *fails to parse* is a
//! different matter entirely and aborts the run — see
//! [`crate::error::SiftError::PageExtraction`].
//!
//! Input paths are validated up front (existence, readability, `%PDF` magic
//! bytes) so callers get a meaningful error rather than a parser backtrace.

use crate::error::SiftError;
use crate::output::DocumentMetadata;
use crate::progress::ProgressCallback;
use lopdf::{Document, Object};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::debug;

/// One page's raw extracted text.
///
/// `number` is the 1-indexed page number; the sequence produced by
/// [`read_pages`] is contiguous from 1. `text` may be empty (image-only or
/// blank pages) and is otherwise exactly what the extractor produced, with
/// no normalization applied yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawPage {
    pub number: u32,
    pub text: String,
}

/// Validate a local PDF path: it must exist, be readable, and begin with the
/// PDF magic bytes.
pub fn resolve_input(path: &Path) -> Result<PathBuf, SiftError> {
    let path = path.to_path_buf();

    if !path.exists() {
        return Err(SiftError::MissingInput { path });
    }

    // Check read permission by attempting to open
    match std::fs::File::open(&path) {
        Ok(mut f) => {
            let mut magic = [0u8; 4];
            if f.read_exact(&mut magic).is_ok() && &magic != b"%PDF" {
                return Err(SiftError::NotAPdf { path, magic });
            }
        }
        Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
            return Err(SiftError::PermissionDenied { path });
        }
        Err(_) => {
            return Err(SiftError::MissingInput { path });
        }
    }

    debug!("resolved input PDF: {}", path.display());
    Ok(path)
}

/// Load and sanity-check a PDF document from disk.
pub fn load_document(path: &Path) -> Result<Document, SiftError> {
    let doc = Document::load(path).map_err(|e| SiftError::MalformedPdf {
        detail: e.to_string(),
    })?;
    ensure_not_encrypted(&doc)?;
    debug!(
        "loaded '{}': PDF {}, {} pages",
        path.display(),
        doc.version,
        doc.get_pages().len()
    );
    Ok(doc)
}

/// Load and sanity-check a PDF document from an in-memory buffer.
pub fn load_document_bytes(bytes: &[u8]) -> Result<Document, SiftError> {
    let doc = Document::load_mem(bytes).map_err(|e| SiftError::MalformedPdf {
        detail: e.to_string(),
    })?;
    ensure_not_encrypted(&doc)?;
    debug!("loaded {}-byte buffer: PDF {}", bytes.len(), doc.version);
    Ok(doc)
}

fn ensure_not_encrypted(doc: &Document) -> Result<(), SiftError> {
    if doc.is_encrypted() {
        return Err(SiftError::EncryptedPdf);
    }
    Ok(())
}

/// Extract text from every page, in order.
///
/// Requests the total page count first, then the text of each page index
/// 1..=count. The result is contiguous: empty pages are represented, not
/// omitted. Any page-level parse failure aborts with
/// [`SiftError::PageExtraction`].
pub fn read_pages(
    doc: &Document,
    progress: Option<&dyn ProgressCallback>,
) -> Result<Vec<RawPage>, SiftError> {
    let total = doc.get_pages().len();
    if let Some(cb) = progress {
        cb.on_extraction_start(total);
    }

    let mut pages = Vec::with_capacity(total);
    let mut non_empty = 0usize;
    for number in 1..=total as u32 {
        let text = doc
            .extract_text(&[number])
            .map_err(|e| SiftError::PageExtraction {
                page: number,
                detail: e.to_string(),
            })?;

        if text.trim().is_empty() {
            debug!("page {number}: no text, will be skipped at assembly");
        } else {
            non_empty += 1;
        }
        if let Some(cb) = progress {
            cb.on_page_extracted(number, total, text.chars().count());
        }
        pages.push(RawPage { number, text });
    }

    if let Some(cb) = progress {
        cb.on_extraction_complete(total, non_empty);
    }
    debug!("extracted text from {non_empty}/{total} pages");
    Ok(pages)
}

/// Read document metadata from the trailer's Info dictionary.
///
/// Missing dictionaries and non-string values simply yield `None` fields;
/// this never fails.
pub fn read_metadata(doc: &Document) -> DocumentMetadata {
    let info_dict = match doc.trailer.get(b"Info") {
        Ok(Object::Reference(id)) => doc
            .get_object(*id)
            .ok()
            .and_then(|obj| obj.as_dict().ok()),
        Ok(Object::Dictionary(dict)) => Some(dict),
        _ => None,
    };

    let get_string = |key: &[u8]| -> Option<String> {
        info_dict
            .and_then(|dict| dict.get(key).ok())
            .and_then(|obj| match obj {
                Object::String(bytes, _) => Some(decode_text_string(bytes)),
                _ => None,
            })
    };

    DocumentMetadata {
        title: get_string(b"Title"),
        author: get_string(b"Author"),
        subject: get_string(b"Subject"),
        creator: get_string(b"Creator"),
        producer: get_string(b"Producer"),
        page_count: doc.get_pages().len(),
        pdf_version: doc.version.clone(),
        encrypted: doc.is_encrypted(),
    }
}

/// PDF text strings are usually UTF-8 in practice; fall back to Latin-1
/// (byte-as-char) so nothing ever fails here.
fn decode_text_string(bytes: &[u8]) -> String {
    String::from_utf8(bytes.to_vec())
        .unwrap_or_else(|_| bytes.iter().map(|&b| b as char).collect())
}

// ── Tests ────────────────────────────────────────────────────────────────────
