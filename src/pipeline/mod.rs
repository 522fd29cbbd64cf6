//! Pipeline stages for PDF-to-Markdown extraction.
//!
//! Each submodule implements exactly one transformation step.
//! Keeping stages separate makes each independently testable: the line rules
//! can be exercised without a PDF in sight, and the reader can be swapped for
//! hand-built pages in tests.
//!
//! ## Data Flow
//!
//! ```text
//! reader ──▶ normalize ──▶ classify ──▶ assemble ──▶ cleanup
//! (lopdf)    (artifacts)   (headings)   (markdown)   (post-pass)
//! ```
//!
//! 1. [`reader`]    — load the document and pull flat text out of each page
//! 2. [`normalize`] — per-line artifact stripping (page numbers and friends)
//! 3. [`classify`]  — shape-based heading detection with a one-line lookback
//! 4. [`assemble`]  — stitch classified lines into one markdown document,
//!    including the table-of-contents scan and page markers
//! 5. [`cleanup`]   — text-only post-pass that restyles markers and collapses
//!    leftover artifacts; also usable standalone on existing files
//!
//! The normalize and classify stages are driven per line by `assemble`;
//! `cleanup` runs once over the finished document.

pub mod assemble;
pub mod classify;
pub mod cleanup;
pub mod normalize;
pub mod reader;
