//! LLM-backed assistance endpoints.

use axum::{
    extract::{Multipart, State},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use super::{bad_request, internal_error, llm_error_response, not_found, ocr_error_response};
use crate::server::AppState;

/// Request for refining a narrative field.
#[derive(Debug, Deserialize)]
pub struct RecommendationRequest {
    /// Field being edited (rodzaj_urazow, szczegoly_okolicznosci, opis_maszyn)
    pub field_name: String,
    /// Conversation history with the assistant, if any
    #[serde(default)]
    pub history: String,
    /// Stored record to use as context
    #[serde(default)]
    pub document_id: Option<String>,
    /// Inline record data, for drafts not yet stored
    #[serde(default)]
    pub document: Option<serde_json::Value>,
}

/// Request for a clerk-style review of a record.
#[derive(Debug, Deserialize)]
pub struct ReviewRequest {
    #[serde(default)]
    pub document_id: Option<String>,
    #[serde(default)]
    pub document: Option<serde_json::Value>,
}

/// Refine the narrative answer the user is editing.
pub async fn recommendation(
    State(state): State<AppState>,
    Json(request): Json<RecommendationRequest>,
) -> impl IntoResponse {
    let context = match resolve_context(&state, &request.document_id, request.document).await {
        Ok(context) => context,
        Err(response) => return response,
    };

    match state
        .llm
        .field_recommendation(&context, &request.field_name, &request.history)
        .await
    {
        Ok(recommendation) => Json(recommendation).into_response(),
        Err(e) => llm_error_response(e),
    }
}

/// Critique a record the way a ZUS clerk would.
pub async fn review(
    State(state): State<AppState>,
    Json(request): Json<ReviewRequest>,
) -> impl IntoResponse {
    let context = match resolve_context(&state, &request.document_id, request.document).await {
        Ok(context) => context,
        Err(response) => return response,
    };

    match state.llm.review_report(&context).await {
        Ok(review) => Json(review).into_response(),
        Err(e) => llm_error_response(e),
    }
}

/// Structure scanned-form text into record fields.
///
/// Accepts a multipart body with either a `text` part (pre-extracted OCR
/// text) or an uploaded scan (PDF or image) to OCR first.
pub async fn extract(State(state): State<AppState>, mut multipart: Multipart) -> impl IntoResponse {
    let mut text: Option<String> = None;
    let mut upload: Option<(String, Vec<u8>)> = None;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => return bad_request(format!("Invalid multipart body: {}", e)),
        };

        if field.name() == Some("text") {
            match field.text().await {
                Ok(value) => text = Some(value),
                Err(e) => return bad_request(format!("Invalid multipart body: {}", e)),
            }
            continue;
        }

        let name = field.file_name().unwrap_or("upload").to_string();
        match field.bytes().await {
            Ok(bytes) if !bytes.is_empty() => upload = Some((name, bytes.to_vec())),
            Ok(_) => {}
            Err(e) => return bad_request(format!("Invalid multipart body: {}", e)),
        }
    }

    let text = match (text, upload) {
        (Some(text), _) if !text.trim().is_empty() => text,
        (_, Some((name, bytes))) => {
            let extractor = state.extractor();
            let is_pdf = infer::get(&bytes)
                .map(|kind| kind.mime_type() == "application/pdf")
                .unwrap_or(false);

            let result = tokio::task::spawn_blocking(move || {
                if is_pdf {
                    // Digital PDFs carry their text; only scans need OCR
                    match crate::pdf::extract_text(&bytes) {
                        Ok(text) if text.chars().filter(|c| !c.is_whitespace()).count() >= 200 => {
                            Ok(text)
                        }
                        _ => extractor.extract_pdf_text(&bytes),
                    }
                } else {
                    extractor.ocr_image_bytes(&name, &bytes).map(|r| r.text)
                }
            })
            .await;

            match result {
                Ok(Ok(text)) => text,
                Ok(Err(e)) => return ocr_error_response(e),
                Err(e) => return internal_error(e),
            }
        }
        _ => return bad_request("Provide a `text` part or an uploaded scan"),
    };

    match state.llm.structure_ocr_text(&text).await {
        Ok(fields) => Json(fields).into_response(),
        Err(e) => llm_error_response(e),
    }
}

/// Resolve the record context for an assistant call: a stored record by id,
/// or inline data.
async fn resolve_context(
    state: &AppState,
    document_id: &Option<String>,
    inline: Option<serde_json::Value>,
) -> Result<serde_json::Value, axum::response::Response> {
    if let Some(id) = document_id {
        return match state.repo.get(id).await {
            Ok(Some(document)) => {
                Ok(serde_json::to_value(&document).unwrap_or(serde_json::Value::Null))
            }
            Ok(None) => Err(not_found()),
            Err(e) => Err(internal_error(e)),
        };
    }
    match inline {
        Some(value) => Ok(value),
        None => Err(bad_request("Provide `document` or `document_id`")),
    }
}
