//! Input resolution: validate a user-supplied path as a readable PDF.
//!
//! We check the `%PDF` magic bytes before handing the file to pdfium so
//! callers get a meaningful error rather than an opaque parser failure.

use crate::error::ExtractError;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A source PDF and the base name its outputs are named after.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    path: PathBuf,
    base_name: String,
}

impl Document {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File name without its extension, e.g. `"scan"` for `/tmp/scan.pdf`.
    pub fn base_name(&self) -> &str {
        &self.base_name
    }
}

/// Derive the output base name: the file name with its last extension removed.
pub fn base_name_of(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document".to_string())
}

/// Resolve a local file path, validating existence and PDF magic bytes.
pub fn resolve_input(path: impl AsRef<Path>) -> Result<Document, ExtractError> {
    let path = path.as_ref().to_path_buf();

    if !path.exists() {
        return Err(ExtractError::FileNotFound { path });
    }

    match std::fs::File::open(&path) {
        Ok(mut f) => {
            let mut magic = [0u8; 4];
            if f.read_exact(&mut magic).is_ok() && &magic != b"%PDF" {
                return Err(ExtractError::NotAPdf { path, magic });
            }
        }
        Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
            return Err(ExtractError::PermissionDenied { path });
        }
        Err(_) => {
            return Err(ExtractError::FileNotFound { path });
        }
    }

    let base_name = base_name_of(&path);
    debug!("Resolved local PDF: {} (base name '{}')", path.display(), base_name);
    Ok(Document { path, base_name })
}
