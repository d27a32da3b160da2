//! Form PDF endpoints: fill, anonymize, read back, accident card.

use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use super::documents::CreateDocumentRequest;
use super::{bad_request, internal_error, not_found, pdf_error_response, pdf_response};
use crate::pdf::{self, mapper, Anonymizer, CardData};
use crate::server::AppState;

#[derive(Debug, Deserialize)]
pub struct DocumentPdfQuery {
    /// Redact personal fields before returning the PDF
    #[serde(default)]
    pub anonymized: bool,
}

/// Fill the form template from a stored record.
pub async fn document_pdf(
    State(state): State<AppState>,
    Path(doc_id): Path<String>,
    Query(params): Query<DocumentPdfQuery>,
) -> impl IntoResponse {
    let document = match state.repo.get(&doc_id).await {
        Ok(Some(document)) => document,
        Ok(None) => return not_found(),
        Err(e) => return internal_error(e),
    };

    let template = match pdf::load_template(&state.template_path) {
        Ok(template) => template,
        Err(e) => return pdf_error_response(e),
    };

    let values = mapper::document_to_fields(&document.data);
    let filled = match pdf::fill_template(&template, &values) {
        Ok(filled) => filled,
        Err(e) => return pdf_error_response(e),
    };

    if params.anonymized {
        match Anonymizer::default().redact(&filled, None) {
            Ok(redacted) => {
                pdf_response(&format!("zawiadomienie-{}-anon.pdf", doc_id), redacted)
            }
            Err(e) => pdf_error_response(e),
        }
    } else {
        pdf_response(&format!("zawiadomienie-{}.pdf", doc_id), filled)
    }
}

/// Persist the submitted record and return the filled form.
pub async fn generate_pdf(
    State(state): State<AppState>,
    Json(request): Json<CreateDocumentRequest>,
) -> impl IntoResponse {
    if let Err(problems) = request.validate() {
        return bad_request(format!("Invalid document data: {}", problems));
    }

    let template = match pdf::load_template(&state.template_path) {
        Ok(template) => template,
        Err(e) => return pdf_error_response(e),
    };

    let document = match state.repo.create(&request.data, &request.witnesses).await {
        Ok(document) => document,
        Err(e) => return internal_error(e),
    };

    let values = mapper::document_to_fields(&document.data);
    match pdf::fill_template(&template, &values) {
        Ok(filled) => pdf_response("filled.pdf", filled),
        Err(e) => pdf_error_response(e),
    }
}

/// Redact an uploaded filled form. An optional `fields` part narrows the
/// redacted field set (comma-separated field names).
pub async fn anonymize_pdf(
    State(_state): State<AppState>,
    multipart: Multipart,
) -> impl IntoResponse {
    let upload = match read_upload(multipart).await {
        Ok(upload) => upload,
        Err(response) => return response,
    };
    let (name, bytes, fields) = upload;

    let override_fields: Option<Vec<String>> = fields.map(|list| {
        list.split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    });

    match Anonymizer::default().redact(&bytes, override_fields.as_deref()) {
        Ok(redacted) => pdf_response(&format!("anon-{}", name), redacted),
        Err(e) => pdf_error_response(e),
    }
}

/// Read an uploaded filled form back into record fields.
pub async fn parse_pdf(State(_state): State<AppState>, multipart: Multipart) -> impl IntoResponse {
    let (_, bytes, _) = match read_upload(multipart).await {
        Ok(upload) => upload,
        Err(response) => return response,
    };

    match pdf::read_form_fields(&bytes) {
        Ok(fields) => Json(mapper::fields_to_document(&fields)).into_response(),
        Err(e) => pdf_error_response(e),
    }
}

/// Dump the template's field names and current values.
pub async fn template_fields(State(state): State<AppState>) -> impl IntoResponse {
    let template = match pdf::load_template(&state.template_path) {
        Ok(template) => template,
        Err(e) => return pdf_error_response(e),
    };

    match pdf::read_form_fields(&template) {
        Ok(fields) => Json(fields).into_response(),
        Err(e) => pdf_error_response(e),
    }
}

/// Render the statutory accident card for a stored record.
pub async fn document_card(
    State(state): State<AppState>,
    Path(doc_id): Path<String>,
) -> impl IntoResponse {
    let document = match state.repo.get(&doc_id).await {
        Ok(Some(document)) => document,
        Ok(None) => return not_found(),
        Err(e) => return internal_error(e),
    };

    let card = CardData::from_document(&document);
    match pdf::render_card(&card) {
        Ok(bytes) => pdf_response(&format!("karta-wypadku-{}.pdf", doc_id), bytes),
        Err(e) => pdf_error_response(e),
    }
}

/// Pull the uploaded PDF (and optional `fields` part) out of a multipart
/// request.
async fn read_upload(
    mut multipart: Multipart,
) -> Result<(String, Vec<u8>, Option<String>), axum::response::Response> {
    let mut upload: Option<(String, Vec<u8>)> = None;
    let mut fields: Option<String> = None;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => return Err(bad_request(format!("Invalid multipart body: {}", e))),
        };

        match field.name().unwrap_or_default() {
            "fields" => match field.text().await {
                Ok(text) => fields = Some(text),
                Err(e) => return Err(bad_request(format!("Invalid multipart body: {}", e))),
            },
            _ => {
                let name = field
                    .file_name()
                    .map(|n| n.to_string())
                    .unwrap_or_else(|| "upload.pdf".to_string());
                match field.bytes().await {
                    Ok(bytes) => upload = Some((name, bytes.to_vec())),
                    Err(e) => return Err(bad_request(format!("Invalid multipart body: {}", e))),
                }
            }
        }
    }

    match upload {
        Some((name, bytes)) if !bytes.is_empty() => Ok((name, bytes, fields)),
        _ => Err((StatusCode::BAD_REQUEST, "No PDF uploaded").into_response()),
    }
}
