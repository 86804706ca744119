//! Page processing: OCR every page and assemble the full document text.
//!
//! ## Failure isolation
//!
//! [`ocr_page`] never propagates an error. A page that fails records a
//! [`PageError`] in its [`PageResult`], contributes no text, and the next
//! page is processed as usual. Even when every page fails, the (empty) text
//! still flows on to normalisation and chunking.
//!
//! ## Ordering
//!
//! Pages are fed through `StreamExt::buffered`, which yields results in
//! input order however many OCR calls are in flight. With the default
//! concurrency of 1 this is a plain sequential loop.

use crate::config::ExtractionConfig;
use crate::error::PageError;
use crate::output::PageResult;
use crate::pipeline::ocr::OcrEngine;
use crate::pipeline::render::PageImage;
use futures::stream::{self, StreamExt};
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

/// OCR a single page on the blocking thread pool.
///
/// The page image is moved in and dropped once recognition finishes.
pub async fn ocr_page(
    engine: &Arc<dyn OcrEngine>,
    page: PageImage,
    language: &str,
) -> PageResult {
    let start = Instant::now();
    let page_num = page.page_num;
    let engine = Arc::clone(engine);
    let lang = language.to_string();

    let outcome = tokio::task::spawn_blocking(move || engine.recognize(&page.image, &lang)).await;
    let duration_ms = start.elapsed().as_millis() as u64;

    let error = match outcome {
        Ok(Ok(text)) => {
            info!("Successfully processed page {}", page_num);
            return PageResult {
                page_num,
                text,
                duration_ms,
                error: None,
            };
        }
        Ok(Err(e)) => PageError::from_ocr(page_num, &e),
        Err(join) => PageError::OcrFailed {
            page: page_num,
            detail: format!("OCR task panicked: {join}"),
        },
    };

    warn!("Error processing page {}: {}", page_num, error);
    PageResult {
        page_num,
        text: String::new(),
        duration_ms,
        error: Some(error),
    }
}

/// OCR all pages, returning one result per page in page order.
pub async fn process_pages(
    engine: &Arc<dyn OcrEngine>,
    pages: Vec<PageImage>,
    config: &ExtractionConfig,
) -> Vec<PageResult> {
    let total_pages = pages.len();
    stream::iter(pages.into_iter().map(|page| {
        let engine = Arc::clone(engine);
        let cb = config.progress_callback.clone();
        let language = config.language.clone();
        async move {
            let page_num = page.page_num;
            if let Some(ref cb) = cb {
                cb.on_page_start(page_num, total_pages);
            }
            let result = ocr_page(&engine, page, &language).await;
            if let Some(ref cb) = cb {
                match &result.error {
                    None => cb.on_page_complete(page_num, total_pages, result.text.chars().count()),
                    Some(e) => cb.on_page_error(page_num, total_pages, &e.to_string()),
                }
            }
            result
        }
    }))
    .buffered(config.concurrency.max(1))
    .collect()
    .await
}

/// Concatenate successful page texts in page order, each followed by `'\n'`.
///
/// Failed pages contribute nothing.
pub fn assemble_full_text(pages: &[PageResult]) -> String {
    let mut full_text = String::new();
    for page in pages.iter().filter(|p| p.is_success()) {
        full_text.push_str(&page.text);
        full_text.push('\n');
    }
    full_text
}
