//! Record CRUD endpoints.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{bad_request, internal_error, not_found};
use crate::models::{Document, DocumentData, WitnessData};
use crate::repository::{DocumentFilter, SortField, SortOrder};
use crate::server::AppState;

/// Query parameters for record search/listing.
#[derive(Debug, Deserialize)]
pub struct DocumentsQuery {
    /// Substring search over name, surname, PESEL, and accident place
    pub q: Option<String>,
    /// Accident date range (inclusive)
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    /// Page number (1-indexed)
    pub page: Option<usize>,
    /// Items per page (default: 50, max: 200)
    pub per_page: Option<usize>,
    /// Sort field (created_at, data_wypadku, nazwisko)
    pub sort: Option<String>,
    /// Sort order (asc, desc)
    pub order: Option<String>,
}

/// Paginated response wrapper.
#[derive(Debug, Serialize)]
pub struct PaginatedResponse<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub per_page: usize,
    pub total: u64,
    pub total_pages: u64,
}

/// Record creation payload: the form fields plus nested witnesses.
#[derive(Debug, Deserialize)]
pub struct CreateDocumentRequest {
    #[serde(flatten)]
    pub data: DocumentData,
    #[serde(default)]
    pub witnesses: Vec<WitnessData>,
}

impl CreateDocumentRequest {
    /// Validate the record and every witness.
    pub fn validate(&self) -> Result<(), String> {
        self.data.validate().map_err(|e| e.to_string())?;
        for witness in &self.witnesses {
            witness.validate()?;
        }
        Ok(())
    }
}

/// List/search records with filters and pagination.
pub async fn list_documents(
    State(state): State<AppState>,
    Query(params): Query<DocumentsQuery>,
) -> impl IntoResponse {
    let per_page = params.per_page.unwrap_or(50).clamp(1, 200);
    let page = params.page.unwrap_or(1).clamp(1, 100_000);
    let offset = page.saturating_sub(1) * per_page;

    let filter = DocumentFilter {
        q: params.q.clone().filter(|q| !q.trim().is_empty()),
        date_from: params.date_from,
        date_to: params.date_to,
        sort: params
            .sort
            .as_deref()
            .and_then(SortField::from_str)
            .unwrap_or_default(),
        order: match params.order.as_deref() {
            Some("asc") => SortOrder::Asc,
            _ => SortOrder::Desc,
        },
        limit: per_page as u32,
        offset: offset as u32,
    };

    let items: Vec<Document> = match state.repo.list(&filter).await {
        Ok(docs) => docs,
        Err(e) => return internal_error(e),
    };

    let total = state
        .repo
        .count(&filter)
        .await
        .unwrap_or(items.len() as u64);
    let total_pages = total.div_ceil(per_page as u64);

    Json(PaginatedResponse {
        items,
        page,
        per_page,
        total,
        total_pages,
    })
    .into_response()
}

/// Create a record (with nested witnesses).
pub async fn create_document(
    State(state): State<AppState>,
    Json(request): Json<CreateDocumentRequest>,
) -> impl IntoResponse {
    if let Err(problems) = request.validate() {
        return bad_request(format!("Invalid document data: {}", problems));
    }

    match state.repo.create(&request.data, &request.witnesses).await {
        Ok(document) => (StatusCode::CREATED, Json(document)).into_response(),
        Err(e) => internal_error(e),
    }
}

/// Get a single record by ID.
pub async fn get_document(
    State(state): State<AppState>,
    Path(doc_id): Path<String>,
) -> impl IntoResponse {
    match state.repo.get(&doc_id).await {
        Ok(Some(document)) => Json(document).into_response(),
        Ok(None) => not_found(),
        Err(e) => internal_error(e),
    }
}
