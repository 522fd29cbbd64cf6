//! Markdown assembly: turning raw pages into one structured document.
//!
//! ## Output shape
//!
//! ```text
//! # <title>
//!
//! *Extracted from: <source>*
//!
//! ---
//!
//! ## Table of Contents        (optional block)
//!
//! - <topic>
//! …
//!
//! ---
//!
//! ## Page 1                   (one section per non-empty page)
//!
//! ## <major heading>
//! ### <minor heading>
//! <body paragraph>
//!
//! ---
//! …
//! ```
//!
//! The whole document is built in memory; nothing is written here. Page
//! markers use the `## Page N` form on purpose — the post-pass restyles them
//! into low-key `<!-- Page N -->` comments, and keeping the two renderings
//! distinct makes it obvious whether a document has been cleaned yet.
//!
//! ## The accumulator
//!
//! Classification context (the one-line lookback) and section tracking live
//! in an explicit [`AssemblyState`] value threaded through the per-page loop,
//! so [`render_page`] is reentrant and testable on a single page. Context
//! deliberately carries across page boundaries: the last line of page 12 is
//! the lookback for the first line of page 13.
//!
//! ## The TOC heuristic
//!
//! Books front-load their table of contents, so only the first
//! [`TOC_SCAN_PAGES`] pages are scanned. A page mentioning "Contents" turns
//! scanning on; dot-leader lines (`Topic ..... 7`) become entries; scanning
//! turns off once the mention fades from the neighbourhood of the current
//! page. Best-effort by design — a missed entry costs a line in the TOC
//! block, a false trigger costs nothing visible.

use crate::pipeline::classify::{classify_line, LineKind, PrevLine};
use crate::pipeline::normalize::normalize_line;
use crate::pipeline::reader::RawPage;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

/// Pages scanned for table-of-contents entries.
pub const TOC_SCAN_PAGES: usize = 10;

/// Substring that switches TOC scanning on ("Table of Contents" contains it
/// too, so one test covers both spellings).
const TOC_TRIGGER: &str = "Contents";

/// TOC scanning may only switch off after this page number; real books
/// interleave front matter with multi-page contents sections.
const TOC_STOP_AFTER_PAGE: u32 = 5;

/// TOC candidate lines must be strictly longer than this many characters.
const TOC_MIN_LINE_CHARS: usize = 5;

/// TOC topics must be strictly longer than this many characters.
const TOC_MIN_TOPIC_CHARS: usize = 3;

/// A dot-leader contents line: `<topic> … <page number>`.
static RE_TOC_ENTRY: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(.+?)\s+\.+\s*\d+$").unwrap());

/// Inputs the assembler needs beyond the pages themselves.
#[derive(Debug, Clone)]
pub struct AssembleOptions {
    /// Document title for the leading `# …` line.
    pub title: String,
    /// Text of the `*Extracted from: …*` attribution line.
    pub source: String,
    /// Whether to emit the `## Table of Contents` block.
    pub include_toc: bool,
}

/// The assembled document plus everything counted along the way.
#[derive(Debug, Clone)]
pub struct Assembly {
    pub markdown: String,
    /// Major headings in document order.
    pub sections: Vec<String>,
    pub toc_entries: usize,
    pub extracted_pages: usize,
    pub skipped_pages: usize,
    pub dropped_lines: usize,
    pub major_headings: usize,
    pub minor_headings: usize,
}

/// Accumulator threaded through the per-page loop.
///
/// Holds the classifier's one-step lookback and the running list of major
/// sections. A fresh `AssemblyState::default()` means "start of document".
#[derive(Debug, Default)]
pub struct AssemblyState {
    prev: PrevLine,
    sections: Vec<String>,
    major_headings: usize,
    minor_headings: usize,
    dropped_lines: usize,
}

impl AssemblyState {
    /// Title of the most recently opened major section, if any.
    pub fn current_section(&self) -> Option<&str> {
        self.sections.last().map(String::as_str)
    }
}

/// Assemble the full markdown document from the ordered page sequence.
///
/// Pages whose raw text is blank contribute nothing — no marker, no
/// separator. Everything else gets a `## Page N` marker, its classified
/// lines, and a trailing `---` separator, in input order.
pub fn assemble(pages: &[RawPage], opts: &AssembleOptions) -> Assembly {
    let mut out = String::new();
    out.push_str(&format!("# {}\n\n", opts.title));
    out.push_str(&format!("*Extracted from: {}*\n\n", opts.source));
    out.push_str("---\n\n");

    let mut toc_entries = 0usize;
    if opts.include_toc {
        let entries = extract_toc(pages);
        toc_entries = entries.len();
        debug!("TOC scan found {toc_entries} entries");
        out.push_str("## Table of Contents\n\n");
        for topic in &entries {
            out.push_str(&format!("- {topic}\n"));
        }
        out.push_str("\n---\n\n");
    }

    let mut state = AssemblyState::default();
    let mut extracted_pages = 0usize;
    let mut skipped_pages = 0usize;
    for page in pages {
        if page.text.trim().is_empty() {
            skipped_pages += 1;
            continue;
        }
        extracted_pages += 1;
        out.push_str(&render_page(page, &mut state));
    }

    debug!(
        "assembled {extracted_pages} pages ({skipped_pages} empty), \
         {} major + {} minor headings, {} artifact lines dropped",
        state.major_headings, state.minor_headings, state.dropped_lines
    );

    Assembly {
        markdown: out,
        sections: state.sections,
        toc_entries,
        extracted_pages,
        skipped_pages,
        dropped_lines: state.dropped_lines,
        major_headings: state.major_headings,
        minor_headings: state.minor_headings,
    }
}

/// Render one page: marker, classified lines, trailing separator.
///
/// The caller is responsible for skipping blank pages; this function assumes
/// the page has content. `state` is updated in place and must be carried to
/// the next page unchanged for the lookback to work across boundaries.
pub fn render_page(page: &RawPage, state: &mut AssemblyState) -> String {
    let mut out = String::with_capacity(page.text.len() + 64);
    out.push_str(&format!("## Page {}\n\n", page.number));

    for raw_line in page.text.split('\n') {
        let Some(line) = normalize_line(raw_line) else {
            state.dropped_lines += 1;
            continue;
        };

        let kind = classify_line(&line, state.prev);
        match kind {
            LineKind::Blank => out.push('\n'),
            LineKind::MajorHeading => {
                out.push_str(&format!("## {line}\n\n"));
                state.major_headings += 1;
                state.sections.push(line.clone());
            }
            LineKind::MinorHeading => {
                out.push_str(&format!("### {line}\n\n"));
                state.minor_headings += 1;
            }
            LineKind::Body => out.push_str(&format!("{line}\n\n")),
        }
        state.prev = PrevLine::after(kind);
    }

    out.push_str("\n---\n\n");
    out
}

/// Extract table-of-contents topics from the first pages of the document.
///
/// Returns topics in encounter order, duplicates included; an empty result
/// means no contents page was recognised.
pub fn extract_toc(pages: &[RawPage]) -> Vec<String> {
    let scan = &pages[..pages.len().min(TOC_SCAN_PAGES)];
    let mut entries = Vec::new();
    let mut scanning = false;

    for (idx, page) in scan.iter().enumerate() {
        if page.text.contains(TOC_TRIGGER) {
            scanning = true;
        }
        if !scanning {
            continue;
        }

        for line in page.text.split('\n') {
            let line = line.trim();
            if line.chars().count() <= TOC_MIN_LINE_CHARS || line.starts_with("Page") {
                continue;
            }
            if let Some(caps) = RE_TOC_ENTRY.captures(line) {
                let topic = caps[1].trim();
                if topic.chars().count() > TOC_MIN_TOPIC_CHARS {
                    entries.push(topic.to_string());
                }
            }
        }

        // Stop once the trigger is absent from the previous, current, and
        // following page; the first pages are exempt so a contents section
        // is never cut short by its own front matter.
        if page.number > TOC_STOP_AFTER_PAGE {
            let lo = idx.saturating_sub(1);
            let hi = (idx + 1).min(pages.len() - 1);
            if pages[lo..=hi].iter().all(|p| !p.text.contains(TOC_TRIGGER)) {
                scanning = false;
            }
        }
    }
    entries
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn opts() -> AssembleOptions {
        AssembleOptions {
            title: "Refactoring UI - Complete Guide".into(),
            source: "refactoring-ui.pdf".into(),
            include_toc: true,
        }
    }

    fn page(number: u32, text: &str) -> RawPage {
        RawPage {
            number,
            text: text.into(),
        }
    }

    #[test]
    fn header_has_title_attribution_and_separator() {
        let a = assemble(&[], &opts());
        assert!(a.markdown.starts_with(
            "# Refactoring UI - Complete Guide\n\n\
             *Extracted from: refactoring-ui.pdf*\n\n\
             ---\n\n"
        ));
    }

    #[test]
    fn toc_block_is_present_even_without_entries() {
        let a = assemble(&[page(1, "Just prose, no contents here")], &opts());
        assert!(a.markdown.contains("## Table of Contents\n\n"));
        assert_eq!(a.toc_entries, 0);
    }

    #[test]
    fn toc_block_can_be_disabled() {
        let mut o = opts();
        o.include_toc = false;
        let a = assemble(&[page(1, "Contents\nIntroduction ..... 3")], &o);
        assert!(!a.markdown.contains("Table of Contents"));
        assert_eq!(a.toc_entries, 0);
    }

    #[test]
    fn toc_entries_come_from_dot_leader_lines() {
        let text = "Contents\n\
                    Introduction .......... 3\n\
                    Designing for humans ..... 12\n\
                    Page 4 ........ 9\n\
                    ABC .. 7\n\
                    short\n";
        let entries = extract_toc(&[page(1, text)]);
        assert_eq!(entries, vec!["Introduction", "Designing for humans"]);
    }

    #[test]
    fn toc_trigger_must_appear_in_the_scan_window() {
        let mut pages: Vec<RawPage> = (1..=10)
            .map(|n| page(n, "ordinary prose about color and contrast"))
            .collect();
        pages.push(page(11, "Contents\nLate entry ..... 12"));
        assert!(extract_toc(&pages).is_empty());
    }

    #[test]
    fn toc_scanning_stops_once_the_trigger_fades() {
        let mut pages = vec![page(1, "Contents\nIntroduction ..... 2")];
        for n in 2..=6 {
            pages.push(page(n, "plain prose about spacing and hierarchy"));
        }
        pages.push(page(7, "Sneaky secrets ....... 9"));
        let entries = extract_toc(&pages);
        assert_eq!(entries, vec!["Introduction"]);
    }

    #[test]
    fn toc_survives_a_gap_covered_by_the_lookahead() {
        // Page 6 has no trigger, but page 7 still does, so scanning stays on
        // through the gap and picks the entry up.
        let pages = vec![
            page(1, "Contents\nFirst topic ..... 2"),
            page(2, "filler text"),
            page(3, "filler text"),
            page(4, "filler text"),
            page(5, "filler text"),
            page(6, "Middle topic ...... 8"),
            page(7, "Contents continued\nLast topic ...... 20"),
        ];
        let entries = extract_toc(&pages);
        assert_eq!(entries, vec!["First topic", "Middle topic", "Last topic"]);
    }

    #[test]
    fn markers_appear_in_page_order() {
        let a = assemble(
            &[
                page(1, "First page prose runs long enough."),
                page(2, "Second page prose runs long enough."),
                page(3, "Third page prose runs long enough."),
            ],
            &opts(),
        );
        let p1 = a.markdown.find("## Page 1").unwrap();
        let p2 = a.markdown.find("## Page 2").unwrap();
        let p3 = a.markdown.find("## Page 3").unwrap();
        assert!(p1 < p2 && p2 < p3);
        assert_eq!(a.extracted_pages, 3);
        assert_eq!(a.skipped_pages, 0);
    }

    #[test]
    fn empty_pages_contribute_nothing() {
        let a = assemble(
            &[
                page(1, "Something worth keeping here."),
                page(2, ""),
                page(3, "   \n  "),
                page(4, "And a final thought to close."),
            ],
            &opts(),
        );
        assert!(a.markdown.contains("## Page 1"));
        assert!(!a.markdown.contains("## Page 2"));
        assert!(!a.markdown.contains("## Page 3"));
        assert!(a.markdown.contains("## Page 4"));
        assert_eq!(a.extracted_pages, 2);
        assert_eq!(a.skipped_pages, 2);
    }

    #[test]
    fn major_headings_render_with_two_hashes() {
        let a = assemble(
            &[page(1, "DESIGN PRINCIPLES\nStarting from scratch is hard.")],
            &opts(),
        );
        assert!(a.markdown.contains("## DESIGN PRINCIPLES\n\n"));
        assert_eq!(a.sections, vec!["DESIGN PRINCIPLES"]);
        assert_eq!(a.major_headings, 1);
    }

    #[test]
    fn minor_headings_render_with_three_hashes() {
        let a = assemble(
            &[page(1, "Starting Small\nBegin every screen with too little.")],
            &opts(),
        );
        assert!(a.markdown.contains("### Starting Small\n\n"));
        assert_eq!(a.minor_headings, 1);
        assert!(a.sections.is_empty());
    }

    #[test]
    fn classifier_context_carries_across_pages() {
        let a = assemble(
            &[
                page(1, "INTRODUCTION"),
                page(2, "Why it matters\nBecause users notice everything."),
            ],
            &opts(),
        );
        // Page 1 ends on a heading, so page 2 opens with heading context.
        assert!(a.markdown.contains("## INTRODUCTION\n\n"));
        assert!(a.markdown.contains("### Why it matters\n\n"));
    }

    #[test]
    fn artifact_lines_are_dropped_and_counted() {
        let a = assemble(
            &[page(1, "42\nPage 3\nReal content stays in place.")],
            &opts(),
        );
        assert_eq!(a.dropped_lines, 2);
        assert!(a.markdown.contains("Real content stays in place."));
        assert!(!a.markdown.contains("42"));
    }

    #[test]
    fn blank_lines_become_paragraph_breaks_and_reset_context() {
        let raw = "A tidy paragraph ends here.\n\nNext Steps\nKeep going until it ships.";
        let a = assemble(&[page(1, raw)], &opts());
        // "Next Steps" sits after a blank line, so it classifies as a heading
        // even though the line before the blank was body text.
        assert!(a.markdown.contains("### Next Steps\n\n"));
    }

    #[test]
    fn pages_end_with_a_separator() {
        let a = assemble(&[page(1, "Only line on this page worth keeping.")], &opts());
        assert!(a.markdown.ends_with("\n---\n\n"));
    }

    #[test]
    fn render_page_is_reentrant() {
        let p = page(5, "SPACING\nWhitespace is a feature, not a bug.");
        let mut s1 = AssemblyState::default();
        let mut s2 = AssemblyState::default();
        assert_eq!(render_page(&p, &mut s1), render_page(&p, &mut s2));
        assert_eq!(s1.current_section(), Some("SPACING"));
    }
}
