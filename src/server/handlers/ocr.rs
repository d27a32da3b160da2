//! OCR endpoints for uploaded scans.

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use super::{bad_request, internal_error, ocr_error_response};
use crate::server::AppState;

/// OCR one or more uploaded images; returns per-image recognized text.
pub async fn ocr_image(State(state): State<AppState>, multipart: Multipart) -> impl IntoResponse {
    let uploads = match read_uploads(multipart).await {
        Ok(uploads) => uploads,
        Err(response) => return response,
    };
    if uploads.is_empty() {
        return (StatusCode::BAD_REQUEST, "No image uploaded").into_response();
    }

    let extractor = state.extractor();
    let result = tokio::task::spawn_blocking(move || {
        let mut results = Vec::with_capacity(uploads.len());
        for (name, bytes) in uploads {
            results.push(extractor.ocr_image_bytes(&name, &bytes)?);
        }
        Ok::<_, crate::ocr::OcrError>(results)
    })
    .await;

    match result {
        Ok(Ok(results)) => Json(results).into_response(),
        Ok(Err(e)) => ocr_error_response(e),
        Err(e) => internal_error(e),
    }
}

/// OCR a multi-page scanned PDF; returns per-page texts and combined text.
pub async fn ocr_pdf(State(state): State<AppState>, multipart: Multipart) -> impl IntoResponse {
    let uploads = match read_uploads(multipart).await {
        Ok(uploads) => uploads,
        Err(response) => return response,
    };
    let (name, bytes) = match uploads.into_iter().next() {
        Some(upload) => upload,
        None => return (StatusCode::BAD_REQUEST, "No PDF uploaded").into_response(),
    };

    let extractor = state.extractor();
    let result =
        tokio::task::spawn_blocking(move || extractor.ocr_pdf_bytes(&name, &bytes)).await;

    match result {
        Ok(Ok(ocr)) => Json(ocr).into_response(),
        Ok(Err(e)) => ocr_error_response(e),
        Err(e) => internal_error(e),
    }
}

/// Collect all uploaded files from a multipart request.
async fn read_uploads(
    mut multipart: Multipart,
) -> Result<Vec<(String, Vec<u8>)>, axum::response::Response> {
    let mut uploads = Vec::new();

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => return Err(bad_request(format!("Invalid multipart body: {}", e))),
        };

        let name = field
            .file_name()
            .or(field.name())
            .unwrap_or("upload")
            .to_string();
        match field.bytes().await {
            Ok(bytes) if !bytes.is_empty() => uploads.push((name, bytes.to_vec())),
            Ok(_) => {}
            Err(e) => return Err(bad_request(format!("Invalid multipart body: {}", e))),
        }
    }

    Ok(uploads)
}
