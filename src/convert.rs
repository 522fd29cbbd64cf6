//! Full-document conversion entry points.
//!
//! ## Why one-shot?
//!
//! Conversion is deliberately batch-shaped: every page is extracted, the
//! whole document is assembled in memory, and only then does anything get
//! returned or written. There is no streaming and no partial output — a run
//! either produces the complete document or fails before writing a byte,
//! which keeps the output file trustworthy and the pipeline trivially
//! deterministic. Peak memory is the extracted text of one book, which is
//! small change next to the PDF itself.

use crate::config::ConversionConfig;
use crate::error::SiftError;
use crate::output::{ConversionOutput, ConversionStats, DocumentMetadata};
use crate::pipeline::assemble::{assemble, AssembleOptions};
use crate::pipeline::cleanup::clean_markdown;
use crate::pipeline::reader;
use lopdf::Document;
use std::io::Write;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Convert a PDF file to Markdown.
///
/// This is the primary entry point for the library.
///
/// # Arguments
/// * `input` — Path to a local PDF file
/// * `config` — Conversion configuration
///
/// # Returns
/// `Ok(ConversionOutput)` on success. Pages with no extractable text (e.g.
/// image-only pages) are skipped silently; check `output.stats.skipped_pages`.
///
/// # Errors
/// Returns `Err(SiftError)` for fatal conditions:
/// - File missing, unreadable, or not a PDF
/// - Encrypted or structurally malformed PDF
/// - Any page whose content streams fail to parse
pub fn convert(
    input: impl AsRef<Path>,
    config: &ConversionConfig,
) -> Result<ConversionOutput, SiftError> {
    let total_start = Instant::now();
    let input = input.as_ref();
    info!("Starting conversion: {}", input.display());

    // ── Step 1: Resolve and load input ───────────────────────────────────
    let pdf_path = reader::resolve_input(input)?;
    let doc = reader::load_document(&pdf_path)?;

    let title = resolve_title(config, &pdf_path);
    let source = resolve_source(config, &pdf_path);
    convert_document(&doc, title, source, config, total_start)
}

/// Convert PDF bytes in memory to Markdown.
///
/// This avoids the need for the caller to create a temporary file, and is
/// the recommended API when PDF data comes from a database, network stream,
/// or in-memory buffer rather than a file on disk. The attribution line
/// falls back to a fixed label unless [`ConversionConfig::source_label`]
/// provides one.
///
/// # Example
/// ```rust,no_run
/// use pdfsift::{convert_from_bytes, ConversionConfig};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let bytes: Vec<u8> = std::fs::read("document.pdf")?;
/// let config = ConversionConfig::default();
/// let output = convert_from_bytes(&bytes, &config)?;
/// println!("{}", output.markdown);
/// # Ok(())
/// # }
/// ```
pub fn convert_from_bytes(
    bytes: &[u8],
    config: &ConversionConfig,
) -> Result<ConversionOutput, SiftError> {
    let total_start = Instant::now();
    info!("Starting conversion of {} in-memory bytes", bytes.len());

    let doc = reader::load_document_bytes(bytes)?;
    let title = config.title.clone().unwrap_or_else(|| "Document".into());
    let source = config
        .source_label
        .clone()
        .unwrap_or_else(|| "(in-memory buffer)".into());
    convert_document(&doc, title, source, config, total_start)
}

/// Convert a PDF and write the markdown directly to a file.
///
/// The write is atomic: content goes to a temporary file in the destination
/// directory first and is renamed into place only once complete, so an
/// existing file at `output_path` is never left half-overwritten.
pub fn convert_to_file(
    input: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
    config: &ConversionConfig,
) -> Result<ConversionStats, SiftError> {
    let output = convert(input, config)?;
    let path = output_path.as_ref();

    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent).map_err(|e| SiftError::OutputWrite {
        path: path.to_path_buf(),
        source: e,
    })?;

    let mut tmp = tempfile::NamedTempFile::new_in(parent).map_err(|e| SiftError::OutputWrite {
        path: path.to_path_buf(),
        source: e,
    })?;
    tmp.write_all(output.markdown.as_bytes())
        .map_err(|e| SiftError::OutputWrite {
            path: path.to_path_buf(),
            source: e,
        })?;
    tmp.persist(path).map_err(|e| SiftError::OutputWrite {
        path: path.to_path_buf(),
        source: e.error,
    })?;

    info!("Wrote {} bytes to {}", output.markdown.len(), path.display());
    Ok(output.stats)
}

/// Extract PDF metadata without converting content.
pub fn inspect(input: impl AsRef<Path>) -> Result<DocumentMetadata, SiftError> {
    let pdf_path = reader::resolve_input(input.as_ref())?;
    let doc = reader::load_document(&pdf_path)?;
    Ok(reader::read_metadata(&doc))
}

// ── Internal helpers ─────────────────────────────────────────────────────

/// Shared tail of the conversion pipeline once a document is loaded.
fn convert_document(
    doc: &Document,
    title: String,
    source: String,
    config: &ConversionConfig,
    total_start: Instant,
) -> Result<ConversionOutput, SiftError> {
    // ── Step 2: Extract metadata ─────────────────────────────────────────
    let metadata = reader::read_metadata(doc);
    info!("PDF has {} pages", metadata.page_count);

    // ── Step 3: Extract text page by page ────────────────────────────────
    let extract_start = Instant::now();
    let pages = reader::read_pages(doc, config.progress_callback.as_deref())?;
    let extract_duration_ms = extract_start.elapsed().as_millis() as u64;
    debug!(
        "Extracted text from {} pages in {}ms",
        pages.len(),
        extract_duration_ms
    );

    // ── Step 4: Assemble the markdown document ───────────────────────────
    let assemble_start = Instant::now();
    let opts = AssembleOptions {
        title,
        source,
        include_toc: config.include_toc,
    };
    let assembly = assemble(&pages, &opts);
    if assembly.extracted_pages == 0 && !pages.is_empty() {
        warn!(
            "No page yielded any text ({} pages total); the document is \
             likely scanned or image-only",
            pages.len()
        );
    }

    // ── Step 5: Post-pass cleanup ────────────────────────────────────────
    let markdown = if config.cleanup {
        clean_markdown(&assembly.markdown)
    } else {
        assembly.markdown
    };
    let assemble_duration_ms = assemble_start.elapsed().as_millis() as u64;

    // ── Step 6: Compute stats ────────────────────────────────────────────
    let stats = ConversionStats {
        total_pages: metadata.page_count,
        extracted_pages: assembly.extracted_pages,
        skipped_pages: assembly.skipped_pages,
        dropped_lines: assembly.dropped_lines,
        toc_entries: assembly.toc_entries,
        major_headings: assembly.major_headings,
        minor_headings: assembly.minor_headings,
        total_duration_ms: total_start.elapsed().as_millis() as u64,
        extract_duration_ms,
        assemble_duration_ms,
    };

    info!(
        "Conversion complete: {}/{} pages, {}ms total",
        stats.extracted_pages, stats.total_pages, stats.total_duration_ms
    );

    Ok(ConversionOutput {
        markdown,
        sections: assembly.sections,
        stats,
        metadata,
    })
}

/// Document title: explicit config value, else the input file stem.
fn resolve_title(config: &ConversionConfig, path: &Path) -> String {
    if let Some(ref title) = config.title {
        return title.clone();
    }
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "Document".into())
}

/// Attribution label: explicit config value, else the input file name.
fn resolve_source(config: &ConversionConfig, path: &Path) -> String {
    if let Some(ref label) = config.source_label {
        return label.clone();
    }
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

// ── Tests ────────────────────────────────────────────────────────────────────
