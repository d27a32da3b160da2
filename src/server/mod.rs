//! HTTP API server for accident notifications.
//!
//! Exposes JSON endpoints for record CRUD, form PDF generation (plain and
//! anonymized), form read-back, OCR of uploaded scans, and LLM-backed
//! drafting/review.

mod handlers;
mod routes;

pub use routes::create_router;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use crate::config::Settings;
use crate::llm::LlmClient;
use crate::ocr::TextExtractor;
use crate::repository::DocumentRepository;

/// Shared state for the web server.
#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<DocumentRepository>,
    pub llm: Arc<LlmClient>,
    pub template_path: PathBuf,
    pub ocr_language: String,
}

impl AppState {
    pub async fn new(settings: &Settings) -> anyhow::Result<Self> {
        let ctx = settings.create_db_context();

        Ok(Self {
            repo: Arc::new(ctx.documents()),
            llm: Arc::new(LlmClient::new(settings.llm.clone())),
            template_path: settings.template_path.clone(),
            ocr_language: settings.ocr_language.clone(),
        })
    }

    /// Build a text extractor configured for this deployment.
    pub fn extractor(&self) -> TextExtractor {
        TextExtractor::new().with_language(&self.ocr_language)
    }
}

/// Start the web server.
pub async fn serve(settings: &Settings, host: &str, port: u16) -> anyhow::Result<()> {
    let state = AppState::new(settings).await?;
    let app = create_router(state);

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    tracing::info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tempfile::tempdir;
    use tower::ServiceExt;

    use crate::llm::LlmConfig;
    use crate::repository::DbContext;

    async fn setup_test_app() -> (axum::Router, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("test.db");

        let ctx = DbContext::from_sqlite_path(&db_path);
        ctx.init_schema().await.unwrap();

        let state = AppState {
            repo: Arc::new(ctx.documents()),
            llm: Arc::new(LlmClient::new(LlmConfig {
                enabled: false,
                ..Default::default()
            })),
            template_path: dir.path().join("ewyp.pdf"),
            ocr_language: "pol".to_string(),
        };

        (create_router(state), dir)
    }

    #[tokio::test]
    async fn test_health() {
        let (app, _dir) = setup_test_app().await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), 1024).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], "ok");
    }

    #[tokio::test]
    async fn test_missing_document_is_404() {
        let (app, _dir) = setup_test_app().await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/documents/does-not-exist")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_missing_template_is_500() {
        let (app, _dir) = setup_test_app().await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/pdf/fields")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
