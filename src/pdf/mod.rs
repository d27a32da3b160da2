//! PDF form handling for the EWYP notification template.
//!
//! All PDF parsing and writing is delegated to lopdf; this module only
//! implements the field mapping, fill, read-back, redaction, and accident
//! card generation on top of it.

mod acroform;
mod anonymizer;
mod card;
pub mod mapper;
mod reader;
mod writer;

use std::path::Path;

use thiserror::Error;

pub use anonymizer::{Anonymizer, DEFAULT_REDACTED_FIELDS};
pub use card::{render_card, CardData};
pub use reader::{extract_text, read_form_fields};
pub use writer::fill_template;

/// Errors that can occur while working with PDF forms.
#[derive(Debug, Error)]
pub enum PdfError {
    #[error("PDF template not found: {0}")]
    TemplateNotFound(String),

    #[error("malformed PDF: {0}")]
    Malformed(String),

    #[error("PDF error: {0}")]
    Lopdf(#[from] lopdf::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Read the form template from disk.
pub fn load_template(path: &Path) -> Result<Vec<u8>, PdfError> {
    if !path.exists() {
        return Err(PdfError::TemplateNotFound(path.display().to_string()));
    }
    Ok(std::fs::read(path)?)
}
