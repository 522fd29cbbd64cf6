//! Error types for the pdfsift library.
//!
//! A single fatal error enum covers the whole pipeline. Every failure either
//! happens before any page is read (bad path, not a PDF, encrypted document)
//! or aborts the run outright (corrupt structure, unreadable page content,
//! unwritable destination). There is deliberately no non-fatal page error:
//! a page that merely yields *no text* (image-only scans, blank pages) is not
//! a failure — it is skipped during assembly — and anything worse than that
//! means the extracted document cannot be trusted, so the conversion stops
//! without writing partial output.

use std::path::PathBuf;
use thiserror::Error;

/// All errors returned by the pdfsift library.
#[derive(Debug, Error)]
pub enum SiftError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// Input file was not found at the given path.
    #[error("Input file not found: '{path}'\nCheck the path exists and is readable.")]
    MissingInput { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    /// The file exists and was read, but is not a PDF.
    #[error("File is not a valid PDF: '{path}'\nFirst bytes: {magic:?}")]
    NotAPdf { path: PathBuf, magic: [u8; 4] },

    // ── PDF errors ────────────────────────────────────────────────────────
    /// The document is encrypted; password-protected PDFs are not supported.
    #[error(
        "PDF is encrypted (password-protected documents are not supported).\n\
         Decrypt a copy first, e.g.: qpdf --decrypt input.pdf decrypted.pdf"
    )]
    EncryptedPdf,

    /// PDF header/trailer/xref is corrupt and cannot be parsed.
    #[error("Failed to parse PDF structure: {detail}\nThe file may be truncated or damaged. Try repairing it with: qpdf input.pdf repaired.pdf")]
    MalformedPdf { detail: String },

    /// A page's content stream could not be read.
    ///
    /// This aborts the whole run: a page that *exists* but cannot be parsed
    /// leaves the document in an unknown state, unlike a page that parses to
    /// empty text (which is simply skipped).
    #[error("Failed to extract text from page {page}: {detail}")]
    PageExtraction { page: u32, detail: String },

    // ── I/O errors ────────────────────────────────────────────────────────
    /// Could not create or write the output Markdown file.
    ///
    /// The destination is untouched when this is returned: output is staged
    /// in a temporary file and only renamed into place on success.
    #[error("Failed to write output file '{path}': {source}")]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_input_display_names_path() {
        let e = SiftError::MissingInput {
            path: PathBuf::from("/tmp/nope.pdf"),
        };
        let msg = e.to_string();
        assert!(msg.contains("/tmp/nope.pdf"), "got: {msg}");
    }

    #[test]
    fn not_a_pdf_display_shows_magic() {
        let e = SiftError::NotAPdf {
            path: PathBuf::from("notes.txt"),
            magic: *b"Hell",
        };
        let msg = e.to_string();
        assert!(msg.contains("notes.txt"));
        assert!(msg.contains("72"), "magic bytes should be listed: {msg}");
    }

    #[test]
    fn page_extraction_display_names_page() {
        let e = SiftError::PageExtraction {
            page: 7,
            detail: "content stream is not decodable".into(),
        };
        let msg = e.to_string();
        assert!(msg.contains("page 7"));
        assert!(msg.contains("content stream"));
    }

    #[test]
    fn encrypted_display_suggests_decryption() {
        let msg = SiftError::EncryptedPdf.to_string();
        assert!(msg.contains("encrypted"));
        assert!(msg.contains("qpdf"));
    }

    #[test]
    fn output_write_keeps_source() {
        use std::error::Error as _;
        let e = SiftError::OutputWrite {
            path: PathBuf::from("out.md"),
            source: std::io::Error::new(std::io::ErrorKind::Other, "disk full"),
        };
        assert!(e.to_string().contains("out.md"));
        assert!(e.source().is_some());
    }
}
