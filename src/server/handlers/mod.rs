//! Request handlers, split per concern.

pub mod ai;
pub mod documents;
pub mod ocr;
pub mod pdf;

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::llm::LlmError;
use crate::ocr::OcrError;
use crate::pdf::PdfError;

/// Health check.
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

/// 400 with a plain-text description of what was wrong with the input.
pub(crate) fn bad_request(message: impl Into<String>) -> Response {
    (StatusCode::BAD_REQUEST, message.into()).into_response()
}

/// 404 for an unknown record.
pub(crate) fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({ "error": "Document not found" })),
    )
        .into_response()
}

/// 500 for repository failures.
pub(crate) fn internal_error(e: impl std::fmt::Display) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(serde_json::json!({ "error": e.to_string() })),
    )
        .into_response()
}

/// Map OCR failures: missing tooling gets a fixed diagnostic, everything
/// else a generic failure.
pub(crate) fn ocr_error_response(err: OcrError) -> Response {
    let (status, message) = match &err {
        OcrError::ToolNotFound(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "OCR engine is not available on this server",
        ),
        OcrError::MissingLanguage(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "OCR language data is not installed on this server",
        ),
        OcrError::EmptyPdf => (StatusCode::BAD_REQUEST, "PDF has no pages"),
        _ => (StatusCode::INTERNAL_SERVER_ERROR, "OCR processing failed"),
    };
    tracing::error!("OCR error: {}", err);
    (status, message).into_response()
}

/// Map LLM failures onto upstream-error responses.
pub(crate) fn llm_error_response(err: LlmError) -> Response {
    tracing::error!("LLM error: {}", err);
    match err {
        LlmError::Disabled => (
            StatusCode::SERVICE_UNAVAILABLE,
            "LLM assistance is disabled",
        )
            .into_response(),
        other => (StatusCode::BAD_GATEWAY, other.to_string()).into_response(),
    }
}

/// Map PDF failures: a missing template is a server problem, a bad upload
/// is the client's.
pub(crate) fn pdf_error_response(err: PdfError) -> Response {
    tracing::error!("PDF error: {}", err);
    match err {
        PdfError::TemplateNotFound(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "PDF template not found on this server",
        )
            .into_response(),
        PdfError::Malformed(msg) => bad_request(format!("Invalid PDF: {}", msg)),
        PdfError::Lopdf(e) => bad_request(format!("Invalid PDF: {}", e)),
        PdfError::Io(e) => internal_error(e),
    }
}

/// A PDF download response.
pub(crate) fn pdf_response(filename: &str, bytes: Vec<u8>) -> Response {
    (
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename={}", filename),
            ),
        ],
        bytes,
    )
        .into_response()
}
