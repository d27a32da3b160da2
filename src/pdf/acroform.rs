//! Shared AcroForm helpers: catalog lookup, field tree traversal, and
//! PDF text string encoding.

use lopdf::{Dictionary, Document, Object, ObjectId, StringFormat};

use super::PdfError;

/// Get the document catalog's ObjectId.
pub fn catalog_id(doc: &Document) -> Result<ObjectId, PdfError> {
    match doc.trailer.get(b"Root") {
        Ok(Object::Reference(id)) => Ok(*id),
        _ => Err(PdfError::Malformed("missing document catalog".to_string())),
    }
}

/// Resolve the AcroForm dictionary reference from the catalog, if any.
///
/// Returns the object id when the form is an indirect object; inline
/// AcroForm dictionaries are resolved by `form_field_ids` directly.
pub fn acroform_ref(doc: &Document) -> Option<ObjectId> {
    let catalog_id = catalog_id(doc).ok()?;
    if let Ok(Object::Dictionary(catalog)) = doc.get_object(catalog_id) {
        match catalog.get(b"AcroForm") {
            Ok(Object::Reference(id)) => Some(*id),
            _ => None,
        }
    } else {
        None
    }
}

/// Collect all form field ids, including kids of hierarchical fields.
pub fn form_field_ids(doc: &Document) -> Vec<ObjectId> {
    let mut field_ids = Vec::new();

    let fields = match acroform_fields_array(doc) {
        Some(fields) => fields,
        None => return field_ids,
    };

    for field_ref in fields {
        if let Object::Reference(field_id) = field_ref {
            collect_field_ids(doc, field_id, &mut field_ids);
        }
    }

    field_ids
}

fn acroform_fields_array(doc: &Document) -> Option<Vec<Object>> {
    let catalog_id = catalog_id(doc).ok()?;
    let catalog = match doc.get_object(catalog_id) {
        Ok(Object::Dictionary(catalog)) => catalog,
        _ => return None,
    };

    let acroform = match catalog.get(b"AcroForm") {
        Ok(Object::Reference(id)) => match doc.get_object(*id) {
            Ok(Object::Dictionary(acroform)) => acroform,
            _ => return None,
        },
        Ok(Object::Dictionary(acroform)) => acroform,
        _ => return None,
    };

    match acroform.get(b"Fields") {
        Ok(Object::Array(arr)) => Some(arr.clone()),
        Ok(Object::Reference(id)) => match doc.get_object(*id) {
            Ok(Object::Array(arr)) => Some(arr.clone()),
            _ => None,
        },
        _ => None,
    }
}

fn collect_field_ids(doc: &Document, field_id: ObjectId, ids: &mut Vec<ObjectId>) {
    ids.push(field_id);

    if let Ok(Object::Dictionary(field_dict)) = doc.get_object(field_id) {
        for kid_id in reference_array(doc, field_dict.get(b"Kids").ok()) {
            collect_field_ids(doc, kid_id, ids);
        }
    }
}

/// Resolve an array of references that may itself be indirect.
pub fn reference_array(doc: &Document, obj: Option<&Object>) -> Vec<ObjectId> {
    let arr = match obj {
        Some(Object::Array(arr)) => arr.clone(),
        Some(Object::Reference(id)) => match doc.get_object(*id) {
            Ok(Object::Array(arr)) => arr.clone(),
            _ => return Vec::new(),
        },
        _ => return Vec::new(),
    };

    arr.iter()
        .filter_map(|o| match o {
            Object::Reference(id) => Some(*id),
            _ => None,
        })
        .collect()
}

/// Get a field's partial name, walking up through Parent for widgets that
/// are kids of a named field.
pub fn field_name(doc: &Document, field_id: ObjectId) -> Option<String> {
    let mut current = field_id;
    // Bounded walk; malformed files can have Parent cycles
    for _ in 0..16 {
        let dict = match doc.get_object(current) {
            Ok(Object::Dictionary(dict)) => dict,
            _ => return None,
        };
        if let Ok(Object::String(bytes, _)) = dict.get(b"T") {
            return Some(decode_text(bytes));
        }
        match dict.get(b"Parent") {
            Ok(Object::Reference(parent_id)) => current = *parent_id,
            _ => return None,
        }
    }
    None
}

/// Get a field's rectangle as (x0, y0, x1, y1).
pub fn field_rect(field_dict: &Dictionary) -> Option<(f32, f32, f32, f32)> {
    if let Ok(Object::Array(rect)) = field_dict.get(b"Rect") {
        let values: Vec<f32> = rect
            .iter()
            .filter_map(|o| match o {
                Object::Integer(i) => Some(*i as f32),
                Object::Real(r) => Some(*r),
                _ => None,
            })
            .collect();
        if values.len() == 4 {
            return Some((values[0], values[1], values[2], values[3]));
        }
    }
    None
}

/// Set NeedAppearances on the form so viewers regenerate field appearances.
pub fn set_need_appearances(doc: &mut Document) -> Result<(), PdfError> {
    let catalog_id = catalog_id(doc)?;

    if let Some(acroform_id) = acroform_ref(doc) {
        if let Ok(Object::Dictionary(ref mut acroform)) = doc.get_object_mut(acroform_id) {
            acroform.set(b"NeedAppearances", Object::Boolean(true));
        }
        return Ok(());
    }

    // Inline AcroForm dictionary in the catalog
    if let Ok(Object::Dictionary(ref mut catalog)) = doc.get_object_mut(catalog_id) {
        if let Ok(Object::Dictionary(ref mut acroform)) = catalog.get_mut(b"AcroForm") {
            acroform.set(b"NeedAppearances", Object::Boolean(true));
        }
    }
    Ok(())
}

/// Decode a PDF text string: UTF-16BE with BOM, or byte text.
pub fn decode_text(bytes: &[u8]) -> String {
    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        let units: Vec<u16> = bytes[2..]
            .chunks_exact(2)
            .map(|c| u16::from_be_bytes([c[0], c[1]]))
            .collect();
        String::from_utf16_lossy(&units)
    } else {
        String::from_utf8_lossy(bytes).to_string()
    }
}

/// Encode a value as a PDF text string object. ASCII stays literal;
/// anything else uses UTF-16BE with BOM.
pub fn encode_text(value: &str) -> Object {
    if value.is_ascii() {
        Object::String(value.as_bytes().to_vec(), StringFormat::Literal)
    } else {
        let mut bytes = vec![0xFE, 0xFF];
        for unit in value.encode_utf16() {
            bytes.extend_from_slice(&unit.to_be_bytes());
        }
        Object::String(bytes, StringFormat::Hexadecimal)
    }
}

/// Read a field's current value as text, if present.
pub fn field_value(dict: &Dictionary) -> Option<String> {
    match dict.get(b"V") {
        Ok(Object::String(bytes, _)) => Some(decode_text(bytes)),
        Ok(Object::Name(name)) => Some(String::from_utf8_lossy(name).to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_text_utf16() {
        let mut bytes = vec![0xFE, 0xFF];
        for unit in "Imię".encode_utf16() {
            bytes.extend_from_slice(&unit.to_be_bytes());
        }
        assert_eq!(decode_text(&bytes), "Imię");
        assert_eq!(decode_text("PESEL[0]".as_bytes()), "PESEL[0]");
    }

    #[test]
    fn test_encode_text_round_trip() {
        for value in ["Kowalski", "Złamanie lewego przedramienia"] {
            match encode_text(value) {
                Object::String(bytes, _) => assert_eq!(decode_text(&bytes), value),
                other => panic!("unexpected object: {:?}", other),
            }
        }
    }

    #[test]
    fn test_form_field_ids_on_fixture() {
        let bytes = crate::pdf::test_form::build(&["PESEL[0]", "Imię[0]"]);
        let doc = lopdf::Document::load_mem(&bytes).unwrap();

        let ids = form_field_ids(&doc);
        assert_eq!(ids.len(), 2);

        let names: Vec<String> = ids.iter().filter_map(|id| field_name(&doc, *id)).collect();
        assert_eq!(names, vec!["PESEL[0]", "Imię[0]"]);
    }
}
