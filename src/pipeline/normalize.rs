//! Line normalization: stripping page-number artifacts from extracted text.
//!
//! ## Why is normalization necessary?
//!
//! Extracted PDF text has no layout metadata. Page numbers that were visually
//! separate in the rendered page (running headers, footers, margin folios)
//! come back as part of the text flow — either glued onto a content line:
//!
//! ```text
//! 9 Start with a feature, not a layout
//! Start with a feature, not a layout 9
//! ```
//!
//! or as a line of their own (`42`, `Page 42`). This module strips the glued
//! numbers and discards the standalone ones, so the classifier and assembler
//! only ever see content lines and paragraph breaks.
//!
//! ## Known imprecision
//!
//! A line that legitimately *starts* with a short number (`3 apples`) is
//! indistinguishable from a stray page number and loses its leading token.
//! That is an accepted trade-off of heuristic cleanup, documented on
//! [`normalize_line`]; do not "fix" it without re-validating every reference
//! output.

use once_cell::sync::Lazy;
use regex::Regex;

/// A standalone page artifact: nothing but digits, or literally `Page N`.
static RE_PAGE_ARTIFACT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(?:\d+|Page \d+)$").unwrap());

/// A short numeric run stuck to the front of a content line.
static RE_LEADING_NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d{1,3})\s+(.+)$").unwrap());

/// A short numeric run stuck to the end of a content line.
static RE_TRAILING_NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(.+?)\s+(\d{1,3})$").unwrap());

static RE_DIGITS_ONLY: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+$").unwrap());

/// Normalize one line of raw page text.
///
/// Returns:
/// * `None` — the line was a pure page-number artifact (only digits, or
///   `Page N`, or reduced to digits by stripping) and must be discarded;
/// * `Some("")` — the line was blank; blank lines are paragraph breaks and
///   reset the heading classifier's context, so they are never discarded;
/// * `Some(text)` — the trimmed line with any leading/trailing 1–3 digit
///   page-number run (whitespace-separated) removed.
///
/// **Lossy by design**: a content line that genuinely begins or ends with a
/// short, whitespace-separated number is stripped too — `3 apples` becomes
/// `apples`, `released in May 24` becomes `released in May`. Four-or-more
/// digit runs (years, large counts) are left alone.
pub fn normalize_line(raw: &str) -> Option<String> {
    let line = raw.trim();
    if line.is_empty() {
        return Some(String::new());
    }
    if RE_PAGE_ARTIFACT.is_match(line) {
        return None;
    }
    let line = strip_leading_number(line);
    let line = strip_trailing_number(line);
    // Stripping can expose a second artifact ("12 34" reduces to "34").
    if RE_DIGITS_ONLY.is_match(line) {
        return None;
    }
    Some(line.to_string())
}

fn strip_leading_number(line: &str) -> &str {
    RE_LEADING_NUMBER
        .captures(line)
        .and_then(|caps| caps.get(2))
        .map_or(line, |m| m.as_str())
}

fn strip_trailing_number(line: &str) -> &str {
    RE_TRAILING_NUMBER
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map_or(line, |m| m.as_str())
}

// ── Tests ────────────────────────────────────────────────────────────────────
