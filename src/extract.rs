//! Extraction entry points.
//!
//! [`extract`] runs the full pipeline and returns either the written files
//! with per-page results, or a fatal [`ExtractError`]. [`extract_to_files`]
//! wraps it for callers that only want the list of files and treat an empty
//! list as failure.

use crate::config::{ExtractionConfig, PageSelection, RENDER_DPI};
use crate::error::ExtractError;
use crate::output::{DocumentMetadata, ExtractionOutput, ExtractionStats};
use crate::pipeline::ocr::{OcrEngine, TesseractEngine};
use crate::pipeline::render::{PdfiumRasterizer, Rasterizer};
use crate::pipeline::{chunk, input, normalize, pages, render};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, warn};

/// Extract text from a scanned PDF and write it to `.txt` files.
///
/// # Returns
/// `Ok(ExtractionOutput)` once the files are written, even if some or all
/// pages failed OCR (check `output.stats.failed_pages`). When no page
/// yielded any words, the word-count policy writes no files.
///
/// # Errors
/// Returns `Err(ExtractError)` only for document-level failures:
/// - File not found / permission denied / not a PDF
/// - pdfium unavailable, PDF corrupt or encrypted
/// - Rasterisation failed
/// - An output file could not be written
pub async fn extract(
    pdf_path: impl AsRef<Path>,
    config: &ExtractionConfig,
) -> Result<ExtractionOutput, ExtractError> {
    let total_start = Instant::now();
    let pdf_path = pdf_path.as_ref();
    info!("Starting extraction: {}", pdf_path.display());

    // ── Step 1: Resolve input ────────────────────────────────────────────
    let document = input::resolve_input(pdf_path)?;

    // ── Step 2: Resolve collaborators ────────────────────────────────────
    let rasterizer = resolve_rasterizer(config);
    let engine = resolve_ocr_engine(config).await;

    // ── Step 3: Extract metadata ─────────────────────────────────────────
    let metadata =
        render::extract_metadata(&rasterizer, document.path(), config.password.as_deref())
            .await?;
    let total_pages = metadata.page_count;
    info!("PDF has {} pages", total_pages);

    // ── Step 4: Compute page indices ─────────────────────────────────────
    let page_indices = config.pages.to_indices(total_pages);
    if page_indices.is_empty() && !matches!(config.pages, PageSelection::All) {
        return Err(ExtractError::PageOutOfRange {
            page: 0,
            total: total_pages,
        });
    }
    debug!("Selected {} pages for OCR", page_indices.len());

    // ── Step 5: Rasterise pages ──────────────────────────────────────────
    let render_start = Instant::now();
    let rendered = render::render_pages(
        &rasterizer,
        document.path(),
        RENDER_DPI,
        config.password.as_deref(),
        &page_indices,
    )
    .await?;
    let render_duration_ms = render_start.elapsed().as_millis() as u64;
    info!(
        "Rendered {} pages at {} DPI in {}ms",
        rendered.len(),
        RENDER_DPI,
        render_duration_ms
    );

    if let Some(ref cb) = config.progress_callback {
        cb.on_extraction_start(rendered.len());
    }

    // ── Step 6: OCR pages ────────────────────────────────────────────────
    let ocr_start = Instant::now();
    let page_results = pages::process_pages(&engine, rendered, config).await;
    let ocr_duration_ms = ocr_start.elapsed().as_millis() as u64;

    let processed = page_results.iter().filter(|p| p.is_success()).count();
    let failed = page_results.len() - processed;
    if processed == 0 && !page_results.is_empty() {
        warn!(
            "All {} pages failed OCR; continuing with empty text",
            page_results.len()
        );
    }

    // ── Step 7: Assemble and normalise ───────────────────────────────────
    let full_text = pages::assemble_full_text(&page_results);
    let text = normalize::normalize_text(&full_text, config.active_script_filter());
    let word_count = normalize::words(&text).len();
    debug!(
        "Normalised {} chars of OCR text to {} chars ({} words)",
        full_text.chars().count(),
        text.chars().count(),
        word_count
    );

    // ── Step 8: Chunk and write ──────────────────────────────────────────
    let chunks = chunk::plan_chunks(document.base_name(), &text, config.chunk_policy);
    let files = chunk::write_chunks(config.output_dir.as_deref(), &chunks).await?;

    let stats = ExtractionStats {
        total_pages,
        processed_pages: processed,
        failed_pages: failed,
        word_count,
        file_count: files.len(),
        render_duration_ms,
        ocr_duration_ms,
        total_duration_ms: total_start.elapsed().as_millis() as u64,
    };

    info!(
        "Extraction complete: {}/{} pages, {} words, {} files, {}ms total",
        processed,
        page_results.len(),
        word_count,
        files.len(),
        stats.total_duration_ms
    );

    if let Some(ref cb) = config.progress_callback {
        cb.on_extraction_complete(page_results.len(), processed);
    }

    Ok(ExtractionOutput {
        files,
        text,
        pages: page_results,
        metadata,
        stats,
    })
}

/// Extract and return only the written file paths.
///
/// A document-level failure is logged (kind, message and source chain)
/// and reported as an empty list, which is also what a document with no
/// recognisable words produces under the word-count policy. Use
/// [`extract`] when the two cases need to be told apart.
pub async fn extract_to_files(
    pdf_path: impl AsRef<Path>,
    config: &ExtractionConfig,
) -> Vec<PathBuf> {
    match extract(pdf_path.as_ref(), config).await {
        Ok(output) => output.files,
        Err(e) => {
            error!(
                kind = e.kind(),
                "Extraction of '{}' failed: {}",
                pdf_path.as_ref().display(),
                e
            );
            let mut source = std::error::Error::source(&e);
            while let Some(cause) = source {
                error!("  caused by: {}", cause);
                source = cause.source();
            }
            Vec::new()
        }
    }
}

/// Synchronous wrapper around [`extract`].
///
/// Creates a temporary tokio runtime internally.
pub fn extract_sync(
    pdf_path: impl AsRef<Path>,
    config: &ExtractionConfig,
) -> Result<ExtractionOutput, ExtractError> {
    tokio::runtime::Runtime::new()
        .map_err(|e| ExtractError::Internal(format!("Failed to create tokio runtime: {}", e)))?
        .block_on(extract(pdf_path, config))
}

/// Read PDF metadata without rendering or OCR.
///
/// Uses the configured rasteriser (or pdfium from `pdfium_lib_dir`) and password.
pub async fn inspect(
    pdf_path: impl AsRef<Path>,
    config: &ExtractionConfig,
) -> Result<DocumentMetadata, ExtractError> {
    let document = input::resolve_input(pdf_path)?;
    let rasterizer = resolve_rasterizer(config);
    render::extract_metadata(&rasterizer, document.path(), config.password.as_deref()).await
}

// ── Internal helpers ─────────────────────────────────────────────────────

/// Injected rasteriser first, otherwise pdfium from the configured directory.
fn resolve_rasterizer(config: &ExtractionConfig) -> Arc<dyn Rasterizer> {
    if let Some(ref r) = config.rasterizer {
        return Arc::clone(r);
    }
    Arc::new(PdfiumRasterizer::new(config.pdfium_lib_dir.clone()))
}

/// Injected engine first, otherwise the tesseract CLI.
///
/// A missing tesseract binary is not fatal here: every page then fails
/// with [`crate::error::PageError::EngineUnavailable`]. The `--version`
/// check spawns a process, so it runs on the blocking pool.
async fn resolve_ocr_engine(config: &ExtractionConfig) -> Arc<dyn OcrEngine> {
    if let Some(ref e) = config.ocr_engine {
        return Arc::clone(e);
    }
    let engine = TesseractEngine::new(config.tesseract_path.clone(), config.tessdata_dir.clone());
    let probe = engine.clone();
    let available = tokio::task::spawn_blocking(move || probe.is_available())
        .await
        .unwrap_or(false);
    if !available {
        warn!(
            "'{}' could not be executed; every page will fail OCR",
            engine.binary()
        );
    }
    Arc::new(engine)
}
