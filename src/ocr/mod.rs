//! OCR and text extraction.
//!
//! Extracts text from uploaded scans using external tools:
//! - Tesseract OCR for images and rasterized PDF pages
//! - pdftoppm (Poppler) for PDF rasterization
//! - pdftotext (Poppler) for PDFs with embedded text
//!
//! Missing binaries or language packs surface as typed errors so request
//! handlers can answer with a fixed diagnostic instead of garbage output.

mod extractor;

pub use extractor::{ImageOcr, PageOcr, PdfOcr, TextExtractor};

use thiserror::Error;

/// Errors that can occur during OCR and text extraction.
#[derive(Debug, Error)]
pub enum OcrError {
    #[error("external tool not found: {0}")]
    ToolNotFound(String),

    #[error("missing Tesseract language data: {0}")]
    MissingLanguage(String),

    #[error("extraction failed: {0}")]
    Failed(String),

    #[error("PDF has no pages")]
    EmptyPdf,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
