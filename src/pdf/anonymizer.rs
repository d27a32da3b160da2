//! Redaction of personal data in filled EWYP forms.
//!
//! Selected AcroForm fields are covered with opaque rectangles; the field
//! value, its appearance streams, and the widget annotation itself are
//! removed so the original text cannot be recovered from the output.

use std::collections::BTreeSet;

use lopdf::{Dictionary, Document, Object, ObjectId};

use super::{acroform, PdfError};

/// PDF fields of the template that carry personal or address data. Matches
/// every mapped identity/address field; narrative answers stay readable.
///
/// The last two entries reproduce the mojibake field names that the
/// template actually contains.
pub const DEFAULT_REDACTED_FIELDS: &[&str] = &[
    "PESEL[0]",
    "Rodzajseriainumerdokumentu[0]",
    "Imię[0]",
    "Nazwisko[0]",
    "Dataurodzenia[0]",
    "Miejsceurodzenia[0]",
    "Numertelefonu[0]",
    "Ulica[0]",
    "Numerdomu[0]",
    "Numerlokalu[0]",
    "Kodpocztowy[0]",
    "Poczta[0]",
    "Nazwapaństwa[0]",
    "Ulica2[0]",
    "Numerdomu2[0]",
    "Numerlokalu2[0]",
    "Kodpocztowy2[0]",
    "Poczta2[0]",
    "Ulica2A[0]",
    "Numerdomu2A[0]",
    "Numerlokalu2A[0]",
    "Kodpocztowy2A[0]",
    "Poczta2A[0]",
    "Nazwapaństwa2[0]",
    "Ulica3[0]",
    "Numerdomu3[0]",
    "Numerlokalu3[0]",
    "Kodpocztowy3[0]",
    "Poczta3[0]",
    "Numertelefonu3[0]",
    "Imię[1]",
    "Nazwisko[1]",
    "PESEL[1]",
    "Rodzajseriainumerdokumentu[1]",
    "Numertelefonu2[0]",
    "Ulica[1]",
    "Numerdomu[1]",
    "Numerlokalu[1]",
    "Kodpocztowy[1]",
    "Poczta[1]",
    "Ulica2[1]",
    "Numerdomu2[1]",
    "Numerlokalu2[1]",
    "Kodpocztowy2[1]",
    "Poczta2[1]",
    "ImiÄ™2[0]",
    "Nazwisko2[0]",
];

/// Covers selected AcroForm fields with opaque rectangles.
pub struct Anonymizer {
    redacted_fields: BTreeSet<String>,
    padding: f32,
}

impl Default for Anonymizer {
    fn default() -> Self {
        Self {
            redacted_fields: DEFAULT_REDACTED_FIELDS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            padding: 1.5,
        }
    }
}

impl Anonymizer {
    /// Return a copy of the PDF where the selected fields are hidden.
    ///
    /// `fields` overrides the configured set when non-empty.
    pub fn redact(&self, pdf: &[u8], fields: Option<&[String]>) -> Result<Vec<u8>, PdfError> {
        let mut doc = Document::load_mem(pdf)?;

        let targets: BTreeSet<String> = match fields {
            Some(list) if !list.is_empty() => list
                .iter()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            _ => self.redacted_fields.clone(),
        };

        let mut removed = BTreeSet::new();
        let page_ids: Vec<ObjectId> = doc.page_iter().collect();
        for page_id in page_ids {
            self.redact_page(&mut doc, page_id, &targets, &mut removed);
        }

        prune_field_refs(&mut doc, &removed);

        let mut out = Vec::new();
        doc.save_to(&mut out)?;
        Ok(out)
    }

    fn redact_page(
        &self,
        doc: &mut Document,
        page_id: ObjectId,
        targets: &BTreeSet<String>,
        removed: &mut BTreeSet<ObjectId>,
    ) {
        let annots_obj: Option<Object> = match doc.get_object(page_id) {
            Ok(Object::Dictionary(page_dict)) => page_dict.get(b"Annots").ok().cloned(),
            _ => None,
        };
        let annot_ids = acroform::reference_array(doc, annots_obj.as_ref());
        if annot_ids.is_empty() {
            return;
        }

        // Find target widgets and their rectangles
        let mut hits: Vec<(ObjectId, (f32, f32, f32, f32))> = Vec::new();
        for annot_id in &annot_ids {
            let dict = match doc.get_object(*annot_id) {
                Ok(Object::Dictionary(dict)) => dict,
                _ => continue,
            };
            let is_widget =
                matches!(dict.get(b"Subtype"), Ok(Object::Name(n)) if n == b"Widget");
            if !is_widget {
                continue;
            }
            let rect = match acroform::field_rect(dict) {
                Some(rect) => rect,
                None => continue,
            };
            let name = match acroform::field_name(doc, *annot_id) {
                Some(name) => name,
                None => continue,
            };
            if targets.contains(name.trim()) {
                hits.push((*annot_id, rect));
            }
        }
        if hits.is_empty() {
            return;
        }

        // Clear values, drop appearance streams, build covers
        let mut cover_refs = Vec::new();
        for (annot_id, rect) in &hits {
            clear_field_value(doc, *annot_id);
            remove_appearance_streams(doc, *annot_id);

            let cover_id = doc.add_object(Object::Dictionary(black_cover(*rect, self.padding)));
            cover_refs.push(Object::Reference(cover_id));
            removed.insert(*annot_id);
        }

        // Rebuild the page's annotation array without the removed widgets
        let mut new_annots: Vec<Object> = annot_ids
            .iter()
            .filter(|id| !removed.contains(id))
            .map(|id| Object::Reference(*id))
            .collect();
        new_annots.extend(cover_refs);

        if let Ok(Object::Dictionary(ref mut page_dict)) = doc.get_object_mut(page_id) {
            page_dict.set(b"Annots", Object::Array(new_annots));
        }

        for (annot_id, _) in hits {
            doc.objects.remove(&annot_id);
        }
    }
}

/// Clear V and DV on the widget and every ancestor field.
fn clear_field_value(doc: &mut Document, id: ObjectId) {
    let mut current = Some(id);
    for _ in 0..16 {
        let id = match current {
            Some(id) => id,
            None => break,
        };
        current = if let Ok(Object::Dictionary(ref mut dict)) = doc.get_object_mut(id) {
            dict.remove(b"V");
            dict.remove(b"DV");
            match dict.get(b"Parent") {
                Ok(Object::Reference(parent_id)) => Some(*parent_id),
                _ => None,
            }
        } else {
            None
        };
    }
}

/// Remove the appearance stream objects of a widget; they may still render
/// the original text after the value is cleared.
fn remove_appearance_streams(doc: &mut Document, annot_id: ObjectId) {
    let mut stream_ids = Vec::new();
    if let Ok(Object::Dictionary(dict)) = doc.get_object(annot_id) {
        if let Ok(Object::Dictionary(ap)) = dict.get(b"AP") {
            for (_, entry) in ap.iter() {
                match entry {
                    Object::Reference(id) => stream_ids.push(*id),
                    Object::Dictionary(states) => {
                        for (_, state) in states.iter() {
                            if let Object::Reference(id) = state {
                                stream_ids.push(*id);
                            }
                        }
                    }
                    _ => {}
                }
            }
        }
    }
    for id in stream_ids {
        doc.objects.remove(&id);
    }
}

/// Opaque black Square annotation over the padded field rectangle.
fn black_cover(rect: (f32, f32, f32, f32), padding: f32) -> Dictionary {
    let (x0, y0, x1, y1) = rect;
    let mut cover = Dictionary::new();
    cover.set("Type", Object::Name(b"Annot".to_vec()));
    cover.set("Subtype", Object::Name(b"Square".to_vec()));
    cover.set(
        "Rect",
        Object::Array(vec![
            Object::Real(x0.min(x1) - padding),
            Object::Real(y0.min(y1) - padding),
            Object::Real(x0.max(x1) + padding),
            Object::Real(y0.max(y1) + padding),
        ]),
    );
    // Black interior and border, printable
    cover.set(
        "IC",
        Object::Array(vec![
            Object::Real(0.0),
            Object::Real(0.0),
            Object::Real(0.0),
        ]),
    );
    cover.set(
        "C",
        Object::Array(vec![
            Object::Real(0.0),
            Object::Real(0.0),
            Object::Real(0.0),
        ]),
    );
    cover.set("F", Object::Integer(4));
    let mut bs = Dictionary::new();
    bs.set("W", Object::Integer(0));
    cover.set("BS", Object::Dictionary(bs));
    cover
}

/// Drop dangling references to removed fields from Fields/Kids arrays.
fn prune_field_refs(doc: &mut Document, removed: &BTreeSet<ObjectId>) {
    if removed.is_empty() {
        return;
    }
    let keep = |o: &Object| !matches!(o, Object::Reference(id) if removed.contains(id));
    for object in doc.objects.values_mut() {
        match object {
            Object::Dictionary(dict) => {
                for key in [b"Fields".as_slice(), b"Kids".as_slice()] {
                    if let Ok(Object::Array(ref mut arr)) = dict.get_mut(key) {
                        arr.retain(keep);
                    }
                }
            }
            Object::Array(arr) => arr.retain(keep),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::test_support::sample_data;
    use crate::pdf::{fill_template, mapper, read_form_fields, test_form};

    fn filled_fixture() -> Vec<u8> {
        let template = test_form::build(&["PESEL[0]", "Nazwisko[0]", "Tekst8[0]"]);
        fill_template(&template, &mapper::document_to_fields(&sample_data())).unwrap()
    }

    #[test]
    fn test_redact_removes_value_and_widget() {
        let filled = filled_fixture();
        assert!(contains(&filled, b"44051401359"));

        let redacted = Anonymizer::default().redact(&filled, None).unwrap();

        // The PESEL must not survive anywhere in the output bytes
        assert!(!contains(&redacted, b"44051401359"));

        // Redacted fields are gone; the narrative field keeps its value
        let fields = read_form_fields(&redacted).unwrap();
        assert!(!fields.contains_key("PESEL[0]"));
        assert!(!fields.contains_key("Nazwisko[0]"));
        assert_eq!(
            fields["Tekst8[0]"],
            "Upadek z drabiny podczas zdejmowania towaru z regału."
        );
    }

    #[test]
    fn test_redact_adds_cover_annotation() {
        let redacted = Anonymizer::default()
            .redact(&filled_fixture(), None)
            .unwrap();
        let doc = Document::load_mem(&redacted).unwrap();

        let mut squares = 0;
        for object in doc.objects.values() {
            if let Object::Dictionary(dict) = object {
                if matches!(dict.get(b"Subtype"), Ok(Object::Name(n)) if n == b"Square") {
                    squares += 1;
                }
            }
        }
        assert_eq!(squares, 2);
    }

    #[test]
    fn test_redact_with_explicit_fields() {
        let filled = filled_fixture();
        let only = vec!["Nazwisko[0]".to_string()];
        let redacted = Anonymizer::default().redact(&filled, Some(&only)).unwrap();

        let fields = read_form_fields(&redacted).unwrap();
        // PESEL untouched under the narrower field list
        assert_eq!(fields["PESEL[0]"], "44051401359");
        assert!(!fields.contains_key("Nazwisko[0]"));
    }

    fn contains(haystack: &[u8], needle: &[u8]) -> bool {
        haystack.windows(needle.len()).any(|w| w == needle)
    }
}
