//! # bengali-pdf2txt
//!
//! Extract Bengali-script text from scanned PDF documents with Tesseract OCR
//! and write it out as plain UTF-8 `.txt` files.
//!
//! ## Pipeline Overview
//!
//! ```text
//! PDF
//!  │
//!  ├─ 1. Input      validate the local file, derive the output base name
//!  ├─ 2. Render     rasterise pages at 300 DPI via pdfium (spawn_blocking)
//!  ├─ 3. OCR        tesseract per page, in page order; a failed page is skipped
//!  ├─ 4. Normalise  collapse whitespace, optionally keep only U+0980–U+09FF
//!  └─ 5. Chunk      `<base>_<k>.txt` per N words, or a single `<base>.txt`
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use bengali_pdf2txt::{extract, ChunkPolicy, ExtractionConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ExtractionConfig::builder()
//!         .chunk_policy(ChunkPolicy::WordCount(1000))
//!         .build()?;
//!     let output = extract("scan.pdf", &config).await?;
//!     for file in &output.files {
//!         println!("{}", file.display());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Failure tiers
//!
//! A document that cannot be opened or rasterised is a fatal
//! [`ExtractError`]. A page that tesseract cannot read only records a
//! [`PageError`] on its [`PageResult`]; the remaining pages still produce
//! output.
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `pdf2txt` binary (clap + anyhow + tracing-subscriber + indicatif) |

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod error;
pub mod extract;
pub mod output;
pub mod pipeline;
pub mod progress;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{
    ChunkPolicy, ExtractionConfig, ExtractionConfigBuilder, PageSelection, ScriptRange,
    BENGALI_RANGE, DEFAULT_LANGUAGE, DEFAULT_WORDS_PER_FILE, RENDER_DPI,
};
pub use error::{ExtractError, OcrError, PageError};
pub use extract::{extract, extract_sync, extract_to_files, inspect};
pub use output::{DocumentMetadata, ExtractionOutput, ExtractionStats, PageResult};
pub use pipeline::ocr::{OcrEngine, TesseractEngine};
pub use pipeline::render::{PageImage, PdfiumRasterizer, Rasterizer};
pub use progress::{ExtractionProgressCallback, ProgressCallback};
