//! Page OCR: turn one page image into text.
//!
//! [`OcrEngine`] is the seam for the OCR collaborator. The default
//! [`TesseractEngine`] shells out to the `tesseract` CLI:
//!
//! ```text
//! tesseract <page.png> stdout -l ben
//! ```
//!
//! The page is staged as a PNG in a temporary file that is removed as soon
//! as the call returns. `TESSDATA_PREFIX` is only ever set on the child
//! process, never on our own environment.

use crate::error::OcrError;
use image::{DynamicImage, ImageFormat};
use std::path::PathBuf;
use std::process::Command;
use tracing::debug;

/// Recognises the text on a single page image.
///
/// Called from the blocking thread pool; implementations may block.
pub trait OcrEngine: Send + Sync {
    fn recognize(&self, image: &DynamicImage, language: &str) -> Result<String, OcrError>;
}

/// [`OcrEngine`] that runs the tesseract command-line tool.
#[derive(Debug, Clone)]
pub struct TesseractEngine {
    binary: String,
    tessdata_dir: Option<PathBuf>,
}

impl Default for TesseractEngine {
    fn default() -> Self {
        Self::new("tesseract", None)
    }
}

impl TesseractEngine {
    pub fn new(binary: impl Into<String>, tessdata_dir: Option<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
            tessdata_dir,
        }
    }

    pub fn binary(&self) -> &str {
        &self.binary
    }

    /// Whether the binary can be executed at all (`tesseract --version`).
    pub fn is_available(&self) -> bool {
        Command::new(&self.binary)
            .arg("--version")
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false)
    }

    fn command(&self, image_path: &std::path::Path, language: &str) -> Command {
        let mut cmd = Command::new(&self.binary);
        cmd.arg(image_path).arg("stdout").arg("-l").arg(language);
        if let Some(dir) = &self.tessdata_dir {
            cmd.env("TESSDATA_PREFIX", dir);
        }
        cmd
    }
}

impl OcrEngine for TesseractEngine {
    fn recognize(&self, image: &DynamicImage, language: &str) -> Result<String, OcrError> {
        let staged = tempfile::Builder::new()
            .prefix("pdf2txt-page-")
            .suffix(".png")
            .tempfile()
            .map_err(|e| OcrError::Image(format!("temp file: {e}")))?;

        image
            .save_with_format(staged.path(), ImageFormat::Png)
            .map_err(|e| OcrError::Image(e.to_string()))?;

        debug!(
            "Running {} {} stdout -l {}",
            self.binary,
            staged.path().display(),
            language
        );

        let output = self
            .command(staged.path(), language)
            .output()
            .map_err(|source| OcrError::Spawn {
                binary: self.binary.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(OcrError::Exit {
                binary: self.binary.clone(),
                code: output.status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
