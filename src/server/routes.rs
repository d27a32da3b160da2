//! Router configuration for the web server.

use axum::extract::DefaultBodyLimit;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;

use super::handlers::{self, ai, documents, ocr, pdf};
use super::AppState;

/// Uploaded scans can be large; 50 MiB covers multi-page 300 DPI documents.
const MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;

/// Create the main router with all routes.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(handlers::health))
        // Records
        .route(
            "/api/documents",
            get(documents::list_documents).post(documents::create_document),
        )
        .route("/api/documents/:doc_id", get(documents::get_document))
        // Form PDF generation and read-back
        .route("/api/documents/:doc_id/pdf", get(pdf::document_pdf))
        .route("/api/documents/:doc_id/card", get(pdf::document_card))
        .route("/api/pdf/generate", post(pdf::generate_pdf))
        .route("/api/pdf/anonymize", post(pdf::anonymize_pdf))
        .route("/api/pdf/parse", post(pdf::parse_pdf))
        .route("/api/pdf/fields", get(pdf::template_fields))
        // OCR of uploaded scans
        .route("/api/ocr/image", post(ocr::ocr_image))
        .route("/api/ocr/pdf", post(ocr::ocr_pdf))
        // LLM-backed assistance
        .route("/api/ai/recommendation", post(ai::recommendation))
        .route("/api/ai/review", post(ai::review))
        .route("/api/ai/extract", post(ai::extract))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
