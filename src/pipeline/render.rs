//! PDF rasterisation: render selected pages to `DynamicImage`s.
//!
//! [`Rasterizer`] is the seam between the pipeline and the PDF engine. The
//! default [`PdfiumRasterizer`] binds pdfium from a library directory given
//! at construction time, so locating the engine never touches process-wide
//! state such as `PATH` or `LD_LIBRARY_PATH`.
//!
//! pdfium uses thread-local state internally and is not safe to call from
//! async contexts, so [`render_pages`] and [`extract_metadata`] move the work
//! onto `tokio::task::spawn_blocking`.

use crate::error::ExtractError;
use crate::output::DocumentMetadata;
use image::DynamicImage;
use pdfium_render::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

/// One rasterised page.
pub struct PageImage {
    /// 1-indexed page number.
    pub page_num: usize,
    pub image: DynamicImage,
}

impl std::fmt::Debug for PageImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageImage")
            .field("page_num", &self.page_num)
            .field("width", &self.image.width())
            .field("height", &self.image.height())
            .finish()
    }
}

/// Turns a PDF into page images.
///
/// Any error is document-level: if the file cannot be opened or any selected
/// page cannot be rendered, the whole extraction stops.
pub trait Rasterizer: Send + Sync {
    /// Read document metadata (including page count) without rendering.
    fn metadata(&self, pdf_path: &Path, password: Option<&str>)
        -> Result<DocumentMetadata, ExtractError>;

    /// Render the given 0-indexed pages at `dpi`, returned in the order given.
    fn rasterize(
        &self,
        pdf_path: &Path,
        dpi: u32,
        password: Option<&str>,
        page_indices: &[usize],
    ) -> Result<Vec<PageImage>, ExtractError>;
}

/// [`Rasterizer`] backed by the pdfium library via `pdfium-render`.
#[derive(Debug, Clone, Default)]
pub struct PdfiumRasterizer {
    lib_dir: Option<PathBuf>,
}

impl PdfiumRasterizer {
    /// `lib_dir` is the directory holding `libpdfium`; `None` uses the
    /// system library search path.
    pub fn new(lib_dir: Option<PathBuf>) -> Self {
        Self { lib_dir }
    }

    pub fn lib_dir(&self) -> Option<&Path> {
        self.lib_dir.as_deref()
    }

    fn bind(&self) -> Result<Pdfium, ExtractError> {
        let bindings = match &self.lib_dir {
            Some(dir) => {
                let lib = Pdfium::pdfium_platform_library_name_at_path(dir);
                debug!("Binding pdfium from {}", lib.display());
                Pdfium::bind_to_library(&lib).map_err(|e| {
                    ExtractError::PdfiumBindingFailed(format!("{}: {}", lib.display(), e))
                })?
            }
            None => Pdfium::bind_to_system_library()
                .map_err(|e| ExtractError::PdfiumBindingFailed(format!("system library: {e}")))?,
        };
        Ok(Pdfium::new(bindings))
    }
}

/// Map a pdfium load failure onto the matching fatal error.
fn load_error(pdf_path: &Path, password: Option<&str>, err: PdfiumError) -> ExtractError {
    let err_str = format!("{:?}", err);
    if err_str.contains("Password") || err_str.contains("password") {
        if password.is_some() {
            ExtractError::WrongPassword {
                path: pdf_path.to_path_buf(),
            }
        } else {
            ExtractError::PasswordRequired {
                path: pdf_path.to_path_buf(),
            }
        }
    } else {
        ExtractError::CorruptPdf {
            path: pdf_path.to_path_buf(),
            detail: err_str,
        }
    }
}

/// pdfium renders at 72 points per inch at scale 1.0.
fn scale_for_dpi(dpi: u32) -> f32 {
    dpi as f32 / 72.0
}

impl Rasterizer for PdfiumRasterizer {
    fn metadata(
        &self,
        pdf_path: &Path,
        password: Option<&str>,
    ) -> Result<DocumentMetadata, ExtractError> {
        let pdfium = self.bind()?;
        let document = pdfium
            .load_pdf_from_file(pdf_path, password)
            .map_err(|e| load_error(pdf_path, password, e))?;

        let metadata = document.metadata();
        let get_meta = |tag: PdfDocumentMetadataTagType| -> Option<String> {
            metadata
                .get(tag)
                .map(|t| t.value().to_string())
                .filter(|v| !v.is_empty())
        };

        Ok(DocumentMetadata {
            title: get_meta(PdfDocumentMetadataTagType::Title),
            author: get_meta(PdfDocumentMetadataTagType::Author),
            subject: get_meta(PdfDocumentMetadataTagType::Subject),
            creator: get_meta(PdfDocumentMetadataTagType::Creator),
            producer: get_meta(PdfDocumentMetadataTagType::Producer),
            page_count: document.pages().len() as usize,
            pdf_version: format!("{:?}", document.version()),
        })
    }

    fn rasterize(
        &self,
        pdf_path: &Path,
        dpi: u32,
        password: Option<&str>,
        page_indices: &[usize],
    ) -> Result<Vec<PageImage>, ExtractError> {
        let pdfium = self.bind()?;
        let document = pdfium
            .load_pdf_from_file(pdf_path, password)
            .map_err(|e| load_error(pdf_path, password, e))?;

        let pages = document.pages();
        let total_pages = pages.len() as usize;
        info!("PDF loaded: {} pages", total_pages);

        let render_config = PdfRenderConfig::new().scale_page_by_factor(scale_for_dpi(dpi));

        let mut results = Vec::with_capacity(page_indices.len());
        for &idx in page_indices {
            if idx >= total_pages {
                return Err(ExtractError::PageOutOfRange {
                    page: idx + 1,
                    total: total_pages,
                });
            }

            let page = pages
                .get(idx as u16)
                .map_err(|e| ExtractError::RasterisationFailed {
                    page: idx + 1,
                    detail: format!("{:?}", e),
                })?;

            let bitmap = page.render_with_config(&render_config).map_err(|e| {
                ExtractError::RasterisationFailed {
                    page: idx + 1,
                    detail: format!("{:?}", e),
                }
            })?;

            let image = bitmap.as_image();
            debug!(
                "Rendered page {} at {} DPI → {}x{} px",
                idx + 1,
                dpi,
                image.width(),
                image.height()
            );

            results.push(PageImage {
                page_num: idx + 1,
                image,
            });
        }

        Ok(results)
    }
}

/// Rasterise selected pages on the blocking thread pool.
pub async fn render_pages(
    rasterizer: &Arc<dyn Rasterizer>,
    pdf_path: &Path,
    dpi: u32,
    password: Option<&str>,
    page_indices: &[usize],
) -> Result<Vec<PageImage>, ExtractError> {
    let rasterizer = Arc::clone(rasterizer);
    let path = pdf_path.to_path_buf();
    let password = password.map(str::to_string);
    let indices = page_indices.to_vec();

    tokio::task::spawn_blocking(move || {
        rasterizer.rasterize(&path, dpi, password.as_deref(), &indices)
    })
    .await
    .map_err(|e| ExtractError::Internal(format!("Render task panicked: {}", e)))?
}

/// Read document metadata on the blocking thread pool.
pub async fn extract_metadata(
    rasterizer: &Arc<dyn Rasterizer>,
    pdf_path: &Path,
    password: Option<&str>,
) -> Result<DocumentMetadata, ExtractError> {
    let rasterizer = Arc::clone(rasterizer);
    let path = pdf_path.to_path_buf();
    let password = password.map(str::to_string);

    tokio::task::spawn_blocking(move || rasterizer.metadata(&path, password.as_deref()))
        .await
        .map_err(|e| ExtractError::Internal(format!("Metadata task panicked: {}", e)))?
}
