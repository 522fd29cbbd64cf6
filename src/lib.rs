//! # pdfsift
//!
//! Extract text-first PDF documents into structured Markdown.
//!
//! ## Why this crate?
//!
//! Plenty of tools dump PDF text; few leave you with something readable.
//! This crate targets books and reports whose text layer is intact: it pulls
//! flat text out of each page, strips the page-number noise that extraction
//! drags along, recovers headings from line shape (all-caps runs, short
//! title-case lines after blanks), rebuilds the table of contents from
//! dot-leader lines, and emits one markdown document with per-page markers.
//! Everything is deterministic and offline — the same PDF always produces
//! the same markdown, with no network calls and no rasterisation.
//!
//! ## Pipeline Overview
//!
//! ```text
//! PDF
//!  │
//!  ├─ 1. Read       flat text per page via lopdf (layout model is opaque)
//!  ├─ 2. Normalize  strip page-number artifacts line by line
//!  ├─ 3. Classify   shape-based heading detection with a one-line lookback
//!  ├─ 4. Assemble   title + attribution + TOC + per-page sections, in memory
//!  └─ 5. Clean      post-pass: restyle markers, collapse leftover noise
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pdfsift::{convert, ConversionConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ConversionConfig::default();
//!     let output = convert("document.pdf", &config)?;
//!     println!("{}", output.markdown);
//!     eprintln!("{}", output.summary());
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `pdfsift` binary (clap + anyhow + tracing-subscriber + indicatif) |
//!
//! Disable `cli` when using only the library to avoid pulling in CLI-only deps:
//! ```toml
//! pdfsift = { version = "0.3", default-features = false }
//! ```
//!
//! ## Limits
//!
//! Heading and TOC detection is heuristic by construction: PDF text carries
//! no font or layout metadata here, so the classifier judges lines purely by
//! shape. Image-only pages yield no text and are skipped. Scanned documents
//! need OCR first; encrypted documents need decrypting first. The cleanup
//! pass is deliberately lossy about short trailing numbers (see
//! [`pipeline::cleanup`]) — disable it with
//! [`ConversionConfigBuilder::cleanup`] when that matters.

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod convert;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod progress;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{ConversionConfig, ConversionConfigBuilder};
pub use convert::{convert, convert_from_bytes, convert_to_file, inspect};
pub use error::SiftError;
pub use output::{ConversionOutput, ConversionStats, DocumentMetadata};
pub use pipeline::classify::{LineKind, PrevLine};
pub use pipeline::cleanup::clean_markdown;
pub use pipeline::reader::RawPage;
pub use progress::{NoopProgress, ProgressCallback, SharedProgressCallback};
