//! Configuration types for PDF-to-Markdown extraction.
//!
//! All conversion behaviour is controlled through [`ConversionConfig`], built
//! via its [`ConversionConfigBuilder`]. Keeping every knob in one struct makes
//! it trivial to share configs between the library entry points and to diff
//! two runs to understand why their outputs differ.
//!
//! The heading thresholds and the table-of-contents scan window are *not*
//! configurable: they are fixed constants in [`crate::pipeline::classify`] and
//! [`crate::pipeline::assemble`], because changing them silently changes every
//! golden output downstream.

use crate::progress::SharedProgressCallback;
use std::fmt;

/// Configuration for a PDF-to-Markdown conversion.
///
/// Built via [`ConversionConfig::builder()`] or using
/// [`ConversionConfig::default()`].
///
/// # Example
/// ```rust
/// use pdfsift::ConversionConfig;
///
/// let config = ConversionConfig::builder()
///     .title("Refactoring UI - Complete Guide")
///     .include_toc(false)
///     .build();
/// ```
#[derive(Clone)]
pub struct ConversionConfig {
    /// Document title rendered as the leading `# …` heading. Default: `None`.
    ///
    /// When unset, the input file stem is used (`guide.pdf` → `# guide`);
    /// conversions from an in-memory buffer fall back to `"Document"`.
    pub title: Option<String>,

    /// Text of the `*Extracted from: …*` attribution line. Default: `None`.
    ///
    /// When unset, the input file name is used; conversions from an in-memory
    /// buffer fall back to `"(in-memory buffer)"`.
    pub source_label: Option<String>,

    /// Emit a `## Table of Contents` block before the page content. Default: `true`.
    ///
    /// The block is extracted heuristically from the first pages of the
    /// document (dot-leader lines after a "Contents" trigger) and is
    /// best-effort: documents without a recognisable TOC page get an empty
    /// block, never a wrong one.
    pub include_toc: bool,

    /// Run the markdown post-pass after assembly. Default: `true`.
    ///
    /// The post-pass strips residual page-number artifacts, collapses
    /// duplicate separators and blank runs, and restyles page markers as
    /// HTML comments. Disable it to inspect the raw assembler output, or when
    /// the cleaner's lossy numeric stripping (see
    /// [`crate::pipeline::cleanup::clean_markdown`]) is unacceptable for the
    /// document at hand.
    pub cleanup: bool,

    /// Progress callback invoked from the page-extraction loop. Default: `None`.
    pub progress_callback: Option<SharedProgressCallback>,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            title: None,
            source_label: None,
            include_toc: true,
            cleanup: true,
            progress_callback: None,
        }
    }
}

impl fmt::Debug for ConversionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConversionConfig")
            .field("title", &self.title)
            .field("source_label", &self.source_label)
            .field("include_toc", &self.include_toc)
            .field("cleanup", &self.cleanup)
            .field(
                "progress_callback",
                &self.progress_callback.as_ref().map(|_| "<dyn ProgressCallback>"),
            )
            .finish()
    }
}

impl ConversionConfig {
    /// Create a new builder for `ConversionConfig`.
    pub fn builder() -> ConversionConfigBuilder {
        ConversionConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`ConversionConfig`].
#[derive(Debug)]
pub struct ConversionConfigBuilder {
    config: ConversionConfig,
}

impl ConversionConfigBuilder {
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.config.title = Some(title.into());
        self
    }

    pub fn source_label(mut self, label: impl Into<String>) -> Self {
        self.config.source_label = Some(label.into());
        self
    }

    pub fn include_toc(mut self, v: bool) -> Self {
        self.config.include_toc = v;
        self
    }

    pub fn cleanup(mut self, v: bool) -> Self {
        self.config.cleanup = v;
        self
    }

    pub fn progress_callback(mut self, callback: SharedProgressCallback) -> Self {
        self.config.progress_callback = Some(callback);
        self
    }

    /// Build the configuration.
    ///
    /// Infallible: every field accepts its full type range, so there is
    /// nothing to validate.
    pub fn build(self) -> ConversionConfig {
        self.config
    }
}
