//! Result types returned by a successful extraction.

use crate::error::PageError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Everything an extraction produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionOutput {
    /// Files written, in creation order.
    pub files: Vec<PathBuf>,
    /// Normalised text that was chunked into `files`.
    pub text: String,
    /// Per-page OCR outcome, in page order.
    pub pages: Vec<PageResult>,
    pub metadata: DocumentMetadata,
    pub stats: ExtractionStats,
}

impl ExtractionOutput {
    /// Pages whose OCR failed.
    pub fn failed_pages(&self) -> impl Iterator<Item = &PageResult> {
        self.pages.iter().filter(|p| p.error.is_some())
    }
}

/// OCR outcome for one page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageResult {
    /// 1-indexed page number.
    pub page_num: usize,
    /// Raw OCR text; empty when `error` is set.
    pub text: String,
    pub duration_ms: u64,
    pub error: Option<PageError>,
}

impl PageResult {
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Document-level facts read from the PDF without OCR.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentMetadata {
    pub title: Option<String>,
    pub author: Option<String>,
    pub subject: Option<String>,
    pub creator: Option<String>,
    pub producer: Option<String>,
    pub page_count: usize,
    pub pdf_version: String,
}

/// Counters and timings for one extraction.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractionStats {
    /// Pages in the document.
    pub total_pages: usize,
    /// Pages OCR'd successfully.
    pub processed_pages: usize,
    /// Pages whose OCR failed.
    pub failed_pages: usize,
    /// Whitespace-delimited words in the normalised text.
    pub word_count: usize,
    pub file_count: usize,
    pub render_duration_ms: u64,
    pub ocr_duration_ms: u64,
    pub total_duration_ms: u64,
}
