//! Pipeline stages for scanned-PDF text extraction.
//!
//! Each submodule implements exactly one transformation step, so each is
//! testable on its own and the two external collaborators (pdfium and
//! tesseract) sit behind traits that tests can replace.
//!
//! ## Data Flow
//!
//! ```text
//! input ──▶ render ──▶ pages(ocr) ──▶ normalize ──▶ chunk
//! (path)    (pdfium)   (tesseract)    (cleanup)     (.txt files)
//! ```
//!
//! 1. [`input`]     : validate the local PDF and derive its output base name
//! 2. [`render`]    : rasterise selected pages; runs in `spawn_blocking`
//!    because pdfium is not async-safe
//! 3. [`pages`]     : OCR every page through [`ocr`], isolating failures and
//!    assembling the full text in page order
//! 4. [`normalize`] : collapse whitespace, optionally restrict to one script
//! 5. [`chunk`]     : split into word-count chunks or one file and write them

pub mod chunk;
pub mod input;
pub mod normalize;
pub mod ocr;
pub mod pages;
pub mod render;
