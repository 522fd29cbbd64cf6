//! Output types returned by the conversion entry points.
//!
//! [`ConversionOutput`] bundles the final markdown with everything a caller
//! might want to report on afterwards: the document outline (major headings in
//! order), per-stage timing and counter statistics, and the PDF's own
//! metadata. All types serialise cleanly so the CLI's `--json` mode is just
//! `serde_json::to_string_pretty(&output)`.

use serde::{Deserialize, Serialize};

/// Document-level metadata read from the PDF trailer's Info dictionary.
///
/// Every textual field is optional: plenty of real-world PDFs carry no Info
/// dictionary at all. String values are decoded as UTF-8 with a Latin-1
/// fallback, matching how most producers actually write them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentMetadata {
    pub title: Option<String>,
    pub author: Option<String>,
    pub subject: Option<String>,
    pub creator: Option<String>,
    pub producer: Option<String>,
    /// Total pages in the document (not just pages that yielded text).
    pub page_count: usize,
    /// PDF format version from the file header, e.g. `"1.5"`.
    pub pdf_version: String,
    /// Whether the document declares encryption. Encrypted documents are
    /// rejected before extraction, so this is only ever `true` in
    /// [`crate::inspect`] results.
    pub encrypted: bool,
}

/// Counters and timings for one conversion run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConversionStats {
    /// Pages in the document.
    pub total_pages: usize,
    /// Pages that yielded text and contributed blocks to the output.
    pub extracted_pages: usize,
    /// Pages whose extracted text was empty (image-only or blank); skipped.
    pub skipped_pages: usize,
    /// Lines discarded as pure page-number artifacts during normalization.
    pub dropped_lines: usize,
    /// Entries emitted in the table-of-contents block.
    pub toc_entries: usize,
    /// Lines rendered as `## …` headings.
    pub major_headings: usize,
    /// Lines rendered as `### …` headings.
    pub minor_headings: usize,
    /// Wall-clock time for the whole conversion.
    pub total_duration_ms: u64,
    /// Time spent loading the document and extracting page text.
    pub extract_duration_ms: u64,
    /// Time spent assembling (and, when enabled, cleaning) the markdown.
    pub assemble_duration_ms: u64,
}

/// The complete result of a conversion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionOutput {
    /// The final markdown document.
    pub markdown: String,
    /// Major headings in document order; a cheap outline of the result.
    pub sections: Vec<String>,
    pub stats: ConversionStats,
    pub metadata: DocumentMetadata,
}

impl ConversionOutput {
    /// One-line human summary, e.g. for log messages.
    pub fn summary(&self) -> String {
        format!(
            "{}/{} pages extracted, {} sections, {} TOC entries, {} ms",
            self.stats.extracted_pages,
            self.stats.total_pages,
            self.sections.len(),
            self.stats.toc_entries,
            self.stats.total_duration_ms
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ConversionOutput {
        ConversionOutput {
            markdown: "# T\n".into(),
            sections: vec!["DESIGN PRINCIPLES".into()],
            stats: ConversionStats {
                total_pages: 4,
                extracted_pages: 3,
                skipped_pages: 1,
                ..Default::default()
            },
            metadata: DocumentMetadata {
                title: Some("T".into()),
                page_count: 4,
                pdf_version: "1.5".into(),
                ..Default::default()
            },
        }
    }

    #[test]
    fn summary_mentions_page_counts() {
        let s = sample().summary();
        assert!(s.contains("3/4 pages"), "got: {s}");
    }

    #[test]
    fn serialises_to_json_with_expected_fields() {
        let json = serde_json::to_string(&sample()).unwrap();
        assert!(json.contains("\"markdown\""));
        assert!(json.contains("\"sections\""));
        assert!(json.contains("\"extracted_pages\":3"));
        assert!(json.contains("\"pdf_version\":\"1.5\""));
    }
}
