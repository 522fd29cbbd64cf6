//! Progress-callback trait for per-page extraction events.
//!
//! Inject an [`Arc<dyn ProgressCallback>`] via
//! [`crate::config::ConversionConfigBuilder::progress_callback`] to receive
//! events as the pipeline extracts each page.
//!
//! # Why callbacks instead of channels?
//!
//! The callback approach is the least-invasive integration point: callers can
//! forward events to a terminal progress bar, a log, or a GUI without the
//! library knowing anything about how the host application communicates.
//! Extraction is strictly sequential, so events always arrive in page order
//! from the calling thread; the trait is still `Send + Sync` so the same
//! `Arc` can live inside a config that is shared or moved across threads.
//!
//! # Example
//!
//! ```rust
//! use pdfsift::{ConversionConfig, ProgressCallback};
//! use std::sync::{Arc, atomic::{AtomicUsize, Ordering}};
//!
//! struct CountingCallback {
//!     extracted: AtomicUsize,
//! }
//!
//! impl ProgressCallback for CountingCallback {
//!     fn on_page_extracted(&self, page_num: u32, total_pages: usize, chars: usize) {
//!         self.extracted.fetch_add(1, Ordering::SeqCst);
//!         eprintln!("page {}/{} ({} chars)", page_num, total_pages, chars);
//!     }
//! }
//!
//! let counter = Arc::new(CountingCallback { extracted: AtomicUsize::new(0) });
//!
//! let config = ConversionConfig::builder()
//!     .progress_callback(counter as Arc<dyn ProgressCallback>)
//!     .build();
//! ```

use std::sync::Arc;

/// Called by the extraction loop as it reads each page.
///
/// All methods have default no-op implementations so callers only override
/// what they care about. Calls are made sequentially, in page order, from
/// the thread running the conversion.
pub trait ProgressCallback: Send + Sync {
    /// Called once after the document is opened, before any page is read.
    ///
    /// # Arguments
    /// * `total_pages` — number of pages the document reports
    fn on_extraction_start(&self, total_pages: usize) {
        let _ = total_pages;
    }

    /// Called after each page's text has been extracted.
    ///
    /// # Arguments
    /// * `page_num`    — 1-indexed page number
    /// * `total_pages` — total pages in the document
    /// * `chars`       — character count of the extracted text
    ///   (0 for image-only or blank pages, which are later skipped)
    fn on_page_extracted(&self, page_num: u32, total_pages: usize, chars: usize) {
        let _ = (page_num, total_pages, chars);
    }

    /// Called once after the last page has been read.
    ///
    /// # Arguments
    /// * `total_pages` — total pages in the document
    /// * `non_empty`   — pages that yielded any text
    fn on_extraction_complete(&self, total_pages: usize, non_empty: usize) {
        let _ = (total_pages, non_empty);
    }
}

/// A no-op implementation for callers that don't need progress events.
///
/// This is the default when no callback is configured.
pub struct NoopProgress;

impl ProgressCallback for NoopProgress {}

/// Convenience alias matching the type stored in [`crate::config::ConversionConfig`].
pub type SharedProgressCallback = Arc<dyn ProgressCallback>;
