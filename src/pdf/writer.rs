//! Fill the EWYP form template with record values.

use std::collections::BTreeMap;

use lopdf::{Document, Object};

use super::{acroform, PdfError};

/// Fill the template's text fields from a name → value map and return the
/// serialized PDF.
///
/// Fields are matched by partial name. Existing appearance streams of
/// filled fields are dropped and NeedAppearances is set so viewers render
/// the new values.
pub fn fill_template(
    template: &[u8],
    values: &BTreeMap<String, String>,
) -> Result<Vec<u8>, PdfError> {
    let mut doc = Document::load_mem(template)?;

    let field_ids = acroform::form_field_ids(&doc);
    if field_ids.is_empty() {
        return Err(PdfError::Malformed(
            "template has no AcroForm fields".to_string(),
        ));
    }

    let mut filled = 0usize;
    for field_id in field_ids {
        let name = match acroform::field_name(&doc, field_id) {
            Some(name) => name,
            None => continue,
        };
        let value = match values.get(&name) {
            Some(value) => value,
            None => continue,
        };

        if let Ok(Object::Dictionary(ref mut dict)) = doc.get_object_mut(field_id) {
            dict.set(b"V", acroform::encode_text(value));
            // Stale appearance streams would keep showing the old value
            dict.remove(b"AP");
            filled += 1;
        }
    }
    tracing::debug!("filled {} of {} mapped fields", filled, values.len());

    acroform::set_need_appearances(&mut doc)?;

    let mut out = Vec::new();
    doc.save_to(&mut out)?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::test_support::sample_data;
    use crate::pdf::{mapper, reader, test_form};

    #[test]
    fn test_fill_and_read_back() {
        let template = test_form::build(&[
            "PESEL[0]",
            "Imię[0]",
            "Nazwisko[0]",
            "Datawyp[0]",
            "Tekst8[0]",
            "Ulica2A[0]",
        ]);
        let values = mapper::document_to_fields(&sample_data());

        let filled = fill_template(&template, &values).unwrap();
        let fields = reader::read_form_fields(&filled).unwrap();

        assert_eq!(fields["PESEL[0]"], "44051401359");
        assert_eq!(fields["Imię[0]"], "Jan");
        assert_eq!(fields["Nazwisko[0]"], "Kowalski");
        assert_eq!(fields["Datawyp[0]"], "2024-11-08");
        assert_eq!(
            fields["Tekst8[0]"],
            "Upadek z drabiny podczas zdejmowania towaru z regału."
        );
        // Unmapped template field stays empty
        assert_eq!(fields["Ulica2A[0]"], "");
    }

    #[test]
    fn test_fill_without_form_is_an_error() {
        // A PDF without AcroForm: the card renderer output qualifies
        let no_form = crate::pdf::render_card(&crate::pdf::CardData::default()).unwrap();
        let values = mapper::document_to_fields(&sample_data());
        assert!(matches!(
            fill_template(&no_form, &values),
            Err(PdfError::Malformed(_))
        ));
    }
}
