//! Read field values and text back out of a PDF.

use std::collections::BTreeMap;

use lopdf::{Document, Object};

use super::{acroform, PdfError};

/// Extract the form's field name → value pairs.
///
/// Fields without a value are reported with an empty string so callers see
/// the full field inventory of the template.
pub fn read_form_fields(pdf: &[u8]) -> Result<BTreeMap<String, String>, PdfError> {
    let doc = Document::load_mem(pdf)?;

    let mut fields = BTreeMap::new();
    for field_id in acroform::form_field_ids(&doc) {
        let name = match acroform::field_name(&doc, field_id) {
            Some(name) => name,
            None => continue,
        };
        let value = match doc.get_object(field_id) {
            Ok(Object::Dictionary(dict)) => acroform::field_value(dict).unwrap_or_default(),
            _ => String::new(),
        };
        // Hierarchical fields repeat the partial name; keep the first
        // non-empty value
        let entry = fields.entry(name).or_insert_with(String::new);
        if entry.is_empty() {
            *entry = value;
        }
    }

    Ok(fields)
}

/// Extract embedded text from a PDF (no OCR).
pub fn extract_text(pdf: &[u8]) -> Result<String, PdfError> {
    pdf_extract::extract_text_from_mem(pdf).map_err(|e| PdfError::Malformed(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::test_form;

    #[test]
    fn test_read_empty_form() {
        let template = test_form::build(&["PESEL[0]", "Imię[0]"]);
        let fields = read_form_fields(&template).unwrap();

        assert_eq!(fields.len(), 2);
        assert_eq!(fields["PESEL[0]"], "");
        assert_eq!(fields["Imię[0]"], "");
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(read_form_fields(b"not a pdf").is_err());
    }
}
