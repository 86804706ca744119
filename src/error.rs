//! Error types for the bengali-pdf2txt library.
//!
//! Two tiers reflect two distinct failure modes:
//!
//! * [`ExtractError`]: **Fatal**: the document cannot be processed at all
//!   (missing file, not a PDF, pdfium unavailable, rasterisation failed).
//!   Returned as `Err(ExtractError)` from [`crate::extract::extract`]. No
//!   output files are written, since the failure happens before any text is
//!   assembled.
//!
//! * [`PageError`]: **Non-fatal**: OCR failed on one page. Stored inside
//!   [`crate::output::PageResult`]; that page contributes no text and the
//!   remaining pages are still processed.
//!
//! [`OcrError`] is what an [`crate::pipeline::ocr::OcrEngine`] returns. The
//! page processor wraps it into a [`PageError`] carrying the page number.

use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the bengali-pdf2txt library.
#[derive(Debug, Error)]
pub enum ExtractError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// Input file was not found at the given path.
    #[error("PDF file not found: '{path}'\nCheck the path exists and is readable.")]
    FileNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    /// The file exists and was read, but is not a PDF.
    #[error("File is not a valid PDF: '{path}'\nFirst bytes: {magic:?}")]
    NotAPdf { path: PathBuf, magic: [u8; 4] },

    // ── PDF errors ────────────────────────────────────────────────────────
    /// PDF header/trailer/xref is corrupt and cannot be parsed.
    #[error("PDF '{path}' is corrupt: {detail}")]
    CorruptPdf { path: PathBuf, detail: String },

    /// PDF requires a password but none was provided.
    #[error("PDF '{path}' is encrypted and requires a password.\nProvide it with --password <PASSWORD>.")]
    PasswordRequired { path: PathBuf },

    /// A password was provided but it is wrong.
    #[error("Wrong password for PDF '{path}'")]
    WrongPassword { path: PathBuf },

    /// The page selection does not match any page of the document.
    #[error("Page {page} is out of range (document has {total} pages)")]
    PageOutOfRange { page: usize, total: usize },

    /// pdfium returned an error while rendering a page.
    #[error("Rasterisation failed for page {page}: {detail}")]
    RasterisationFailed { page: usize, detail: String },

    /// Could not bind to a pdfium library.
    #[error(
        "Failed to bind to pdfium library: {0}\n\n\
Point --pdfium-lib-dir (or PDFIUM_LIB_PATH) at the directory containing\n\
libpdfium.so / libpdfium.dylib / pdfium.dll, or install pdfium system-wide.\n\
Pre-built libraries: https://github.com/bblanchon/pdfium-binaries/releases\n"
    )]
    PdfiumBindingFailed(String),

    // ── I/O errors ────────────────────────────────────────────────────────
    /// Could not create or write an output text file.
    #[error("Failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ExtractError {
    /// Short machine-friendly name of the failure kind, used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            ExtractError::FileNotFound { .. } => "file_not_found",
            ExtractError::PermissionDenied { .. } => "permission_denied",
            ExtractError::NotAPdf { .. } => "not_a_pdf",
            ExtractError::CorruptPdf { .. } => "corrupt_pdf",
            ExtractError::PasswordRequired { .. } => "password_required",
            ExtractError::WrongPassword { .. } => "wrong_password",
            ExtractError::PageOutOfRange { .. } => "page_out_of_range",
            ExtractError::RasterisationFailed { .. } => "rasterisation_failed",
            ExtractError::PdfiumBindingFailed(_) => "pdfium_binding_failed",
            ExtractError::OutputWriteFailed { .. } => "output_write_failed",
            ExtractError::InvalidConfig(_) => "invalid_config",
            ExtractError::Internal(_) => "internal",
        }
    }
}

/// A non-fatal error for a single page.
///
/// Stored alongside [`crate::output::PageResult`] when a page fails.
/// Extraction always continues with the next page.
#[derive(Debug, Clone, Error, serde::Serialize, serde::Deserialize)]
pub enum PageError {
    /// The OCR engine ran but could not produce text for the page.
    #[error("Page {page}: OCR failed: {detail}")]
    OcrFailed { page: usize, detail: String },

    /// The OCR engine could not be started at all.
    #[error("Page {page}: OCR engine unavailable: {detail}")]
    EngineUnavailable { page: usize, detail: String },
}

impl PageError {
    /// Wrap an engine error for the given 1-indexed page.
    pub fn from_ocr(page: usize, err: &OcrError) -> Self {
        match err {
            OcrError::Spawn { .. } => PageError::EngineUnavailable {
                page,
                detail: err.to_string(),
            },
            _ => PageError::OcrFailed {
                page,
                detail: err.to_string(),
            },
        }
    }

    /// The 1-indexed page this error belongs to.
    pub fn page(&self) -> usize {
        match self {
            PageError::OcrFailed { page, .. } | PageError::EngineUnavailable { page, .. } => *page,
        }
    }
}

/// Errors returned by an [`crate::pipeline::ocr::OcrEngine`].
#[derive(Debug, Error)]
pub enum OcrError {
    /// The OCR binary could not be executed.
    #[error("failed to run '{binary}' (is it installed?): {source}")]
    Spawn {
        binary: String,
        #[source]
        source: std::io::Error,
    },

    /// The OCR process ran and exited unsuccessfully.
    #[error("'{binary}' exited with code {code}: {stderr}")]
    Exit {
        binary: String,
        code: i32,
        stderr: String,
    },

    /// The page image could not be staged for the engine.
    #[error("could not prepare page image: {0}")]
    Image(String),

    /// Any other engine-specific failure.
    #[error("{0}")]
    Other(String),
}
