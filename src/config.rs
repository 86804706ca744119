//! Configuration types for scanned-PDF text extraction.
//!
//! All extraction behaviour is controlled through [`ExtractionConfig`], built
//! via its [`ExtractionConfigBuilder`]. The two output variants (fixed word
//! count chunks vs. one whole-document file) and the script filter are plain
//! options on the same config rather than separate code paths.

use crate::error::ExtractError;
use crate::pipeline::ocr::OcrEngine;
use crate::pipeline::render::Rasterizer;
use crate::progress::ProgressCallback;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

/// Rasterisation resolution for every page.
///
/// Fixed rather than configurable: tesseract's Bengali model is tuned for
/// scans around 300 DPI.
pub const RENDER_DPI: u32 = 300;

/// Tesseract language code for Bengali script.
pub const DEFAULT_LANGUAGE: &str = "ben";

/// Words per output file for [`ChunkPolicy::WordCount`].
pub const DEFAULT_WORDS_PER_FILE: usize = 1000;

/// The Bengali Unicode block, U+0980–U+09FF.
pub const BENGALI_RANGE: ScriptRange = ScriptRange {
    start: '\u{0980}',
    end: '\u{09FF}',
};

/// Configuration for a scanned-PDF extraction.
///
/// Built via [`ExtractionConfig::builder()`] or using
/// [`ExtractionConfig::default()`].
///
/// # Example
/// ```rust
/// use bengali_pdf2txt::{ChunkPolicy, ExtractionConfig};
///
/// let config = ExtractionConfig::builder()
///     .language("ben")
///     .chunk_policy(ChunkPolicy::WholeDocument)
///     .script_filter(false)
///     .build()
///     .unwrap();
/// ```
#[derive(Clone)]
pub struct ExtractionConfig {
    /// Tesseract language code. Default: `"ben"`.
    pub language: String,

    /// How normalised text is split into files. Default: 1000 words per file.
    pub chunk_policy: ChunkPolicy,

    /// Drop every non-whitespace character outside [`Self::script_range`]. Default: true.
    pub script_filter_enabled: bool,

    /// Unicode block kept when the script filter is on. Default: [`BENGALI_RANGE`].
    pub script_range: ScriptRange,

    /// Page selection. Default: All pages.
    pub pages: PageSelection,

    /// PDF user password for encrypted documents.
    pub password: Option<String>,

    /// Directory output files are written to. `None` writes to the current
    /// working directory. The directory is never created.
    pub output_dir: Option<PathBuf>,

    /// Number of pages OCR'd at the same time. Default: 1 (strictly sequential).
    ///
    /// Results are always assembled in page order regardless of which page
    /// finishes first.
    pub concurrency: usize,

    /// Directory holding the pdfium shared library. `None` falls back to the
    /// system library search path.
    pub pdfium_lib_dir: Option<PathBuf>,

    /// Tesseract executable. Default: `"tesseract"` (resolved through `PATH`).
    pub tesseract_path: String,

    /// Directory with tesseract `.traineddata` files, passed to the child
    /// process as `TESSDATA_PREFIX`.
    pub tessdata_dir: Option<PathBuf>,

    /// Pre-constructed rasteriser. Takes precedence over `pdfium_lib_dir`.
    pub rasterizer: Option<Arc<dyn Rasterizer>>,

    /// Pre-constructed OCR engine. Takes precedence over `tesseract_path`.
    pub ocr_engine: Option<Arc<dyn OcrEngine>>,

    /// Receives per-page progress events.
    pub progress_callback: Option<ProgressCallback>,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            language: DEFAULT_LANGUAGE.to_string(),
            chunk_policy: ChunkPolicy::default(),
            script_filter_enabled: true,
            script_range: BENGALI_RANGE,
            pages: PageSelection::default(),
            password: None,
            output_dir: None,
            concurrency: 1,
            pdfium_lib_dir: None,
            tesseract_path: "tesseract".to_string(),
            tessdata_dir: None,
            rasterizer: None,
            ocr_engine: None,
            progress_callback: None,
        }
    }
}

impl fmt::Debug for ExtractionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtractionConfig")
            .field("language", &self.language)
            .field("chunk_policy", &self.chunk_policy)
            .field("script_filter_enabled", &self.script_filter_enabled)
            .field("script_range", &self.script_range)
            .field("pages", &self.pages)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("output_dir", &self.output_dir)
            .field("concurrency", &self.concurrency)
            .field("pdfium_lib_dir", &self.pdfium_lib_dir)
            .field("tesseract_path", &self.tesseract_path)
            .field("tessdata_dir", &self.tessdata_dir)
            .field("rasterizer", &self.rasterizer.as_ref().map(|_| "<dyn Rasterizer>"))
            .field("ocr_engine", &self.ocr_engine.as_ref().map(|_| "<dyn OcrEngine>"))
            .finish()
    }
}

impl ExtractionConfig {
    /// Create a new builder for `ExtractionConfig`.
    pub fn builder() -> ExtractionConfigBuilder {
        ExtractionConfigBuilder {
            config: Self::default(),
        }
    }

    /// The script range to filter with, or `None` when filtering is off.
    pub fn active_script_filter(&self) -> Option<ScriptRange> {
        self.script_filter_enabled.then_some(self.script_range)
    }
}

/// Builder for [`ExtractionConfig`].
pub struct ExtractionConfigBuilder {
    config: ExtractionConfig,
}

impl fmt::Debug for ExtractionConfigBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtractionConfigBuilder")
            .field("config", &self.config)
            .finish()
    }
}

impl ExtractionConfigBuilder {
    pub fn language(mut self, code: impl Into<String>) -> Self {
        self.config.language = code.into();
        self
    }

    pub fn chunk_policy(mut self, policy: ChunkPolicy) -> Self {
        self.config.chunk_policy = policy;
        self
    }

    /// Shorthand for `chunk_policy(ChunkPolicy::WordCount(n))`.
    pub fn words_per_file(mut self, n: usize) -> Self {
        self.config.chunk_policy = ChunkPolicy::WordCount(n);
        self
    }

    pub fn script_filter(mut self, enabled: bool) -> Self {
        self.config.script_filter_enabled = enabled;
        self
    }

    pub fn script_range(mut self, range: ScriptRange) -> Self {
        self.config.script_range = range;
        self
    }

    pub fn pages(mut self, selection: PageSelection) -> Self {
        self.config.pages = selection;
        self
    }

    pub fn password(mut self, pwd: impl Into<String>) -> Self {
        self.config.password = Some(pwd.into());
        self
    }

    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.output_dir = Some(dir.into());
        self
    }

    pub fn concurrency(mut self, n: usize) -> Self {
        self.config.concurrency = n;
        self
    }

    pub fn pdfium_lib_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.pdfium_lib_dir = Some(dir.into());
        self
    }

    pub fn tesseract_path(mut self, path: impl Into<String>) -> Self {
        self.config.tesseract_path = path.into();
        self
    }

    pub fn tessdata_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.tessdata_dir = Some(dir.into());
        self
    }

    pub fn rasterizer(mut self, rasterizer: Arc<dyn Rasterizer>) -> Self {
        self.config.rasterizer = Some(rasterizer);
        self
    }

    pub fn ocr_engine(mut self, engine: Arc<dyn OcrEngine>) -> Self {
        self.config.ocr_engine = Some(engine);
        self
    }

    pub fn progress_callback(mut self, cb: ProgressCallback) -> Self {
        self.config.progress_callback = Some(cb);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ExtractionConfig, ExtractError> {
        let c = &self.config;
        if let ChunkPolicy::WordCount(0) = c.chunk_policy {
            return Err(ExtractError::InvalidConfig(
                "words per file must be ≥ 1".into(),
            ));
        }
        if c.concurrency == 0 {
            return Err(ExtractError::InvalidConfig(
                "Concurrency must be ≥ 1".into(),
            ));
        }
        if c.language.trim().is_empty() {
            return Err(ExtractError::InvalidConfig(
                "OCR language code must not be empty".into(),
            ));
        }
        if c.script_range.start > c.script_range.end {
            return Err(ExtractError::InvalidConfig(format!(
                "script range start U+{:04X} is after end U+{:04X}",
                c.script_range.start as u32, c.script_range.end as u32
            )));
        }
        Ok(self.config)
    }
}

// ── Enums ────────────────────────────────────────────────────────────────

/// How normalised text is persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChunkPolicy {
    /// Contiguous groups of at most `n` words, one file each: `<base>_<k>.txt`.
    /// Zero words produce zero files.
    WordCount(usize),
    /// All text in a single `<base>.txt`, written even when empty.
    WholeDocument,
}

impl Default for ChunkPolicy {
    fn default() -> Self {
        ChunkPolicy::WordCount(DEFAULT_WORDS_PER_FILE)
    }
}

/// An inclusive range of Unicode scalar values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptRange {
    pub start: char,
    pub end: char,
}

impl ScriptRange {
    pub const fn new(start: char, end: char) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, c: char) -> bool {
        (self.start..=self.end).contains(&c)
    }
}

/// Specifies which pages of the PDF to OCR.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub enum PageSelection {
    /// All pages (default).
    #[default]
    All,
    /// A single page (1-indexed).
    Single(usize),
    /// A contiguous range of pages (1-indexed, inclusive).
    Range(usize, usize),
    /// Specific pages (1-indexed, deduplicated).
    Set(Vec<usize>),
}

impl PageSelection {
    /// Expand the selection into a sorted, deduplicated list of 0-indexed page numbers.
    pub fn to_indices(&self, total_pages: usize) -> Vec<usize> {
        let mut indices: Vec<usize> = match self {
            PageSelection::All => (0..total_pages).collect(),
            PageSelection::Single(p) => {
                if *p >= 1 && *p <= total_pages {
                    vec![p - 1]
                } else {
                    vec![]
                }
            }
            PageSelection::Range(start, end) => {
                let s = (*start).max(1) - 1;
                let e = (*end).min(total_pages);
                (s..e).collect()
            }
            PageSelection::Set(pages) => pages
                .iter()
                .filter(|&&p| p >= 1 && p <= total_pages)
                .map(|p| p - 1)
                .collect(),
        };
        indices.sort_unstable();
        indices.dedup();
        indices
    }
}
