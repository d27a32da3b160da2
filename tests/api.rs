//! End-to-end API tests against the full router with a temporary database.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use lopdf::{dictionary, Document as PdfDocument, Object, Stream, StringFormat};
use pretty_assertions::assert_eq;
use tower::ServiceExt;

use ewyp::llm::{LlmClient, LlmConfig};
use ewyp::repository::DbContext;
use ewyp::server::{create_router, AppState};

/// Build the router over a fresh tempdir database. The form template is
/// written only when `with_template` is set.
async fn setup_app(with_template: bool) -> (axum::Router, tempfile::TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("test.db");
    let template_path = dir.path().join("ewyp.pdf");

    if with_template {
        std::fs::write(&template_path, form_fixture()).unwrap();
    }

    let ctx = DbContext::from_sqlite_path(&db_path);
    ctx.init_schema().await.unwrap();

    let state = AppState {
        repo: Arc::new(ctx.documents()),
        llm: Arc::new(LlmClient::new(LlmConfig {
            enabled: false,
            ..Default::default()
        })),
        template_path,
        ocr_language: "pol".to_string(),
    };

    (create_router(state), dir)
}

fn sample_payload() -> serde_json::Value {
    serde_json::json!({
        "pesel": "44051401359",
        "nr_dowodu": "ABC123456",
        "imie": "Jan",
        "nazwisko": "Kowalski",
        "data_urodzenia": "1985-03-14",
        "miejsce_urodzenia": "Warszawa",
        "numer_telefonu": "600100200",
        "ulica": "Kwiatowa",
        "nr_domu": "12",
        "nr_lokalu": "4",
        "miejscowosc": "Warszawa",
        "kod_pocztowy": "00-001",
        "data_wypadku": "2024-11-08",
        "godzina_wypadku": "10:30:00",
        "miejsce_wypadku": "Hala produkcyjna, Warszawa",
        "planowana_godzina_rozpoczecia_pracy": "08:00:00",
        "planowana_godzina_zakonczenia_pracy": "16:00:00",
        "rodzaj_urazow": "Złamanie lewego przedramienia",
        "szczegoly_okolicznosci": "Upadek z drabiny podczas zdejmowania towaru z regału.",
        "czy_udzielona_pomoc": true,
        "miejsce_udzielenia_pomocy": "SOR, Szpital Wolski",
        "witnesses": [
            {
                "imie": "Anna",
                "nazwisko": "Lis",
                "ulica": "Polna",
                "nr_domu": "3",
                "miejscowosc": "Radom",
                "kod_pocztowy": "26-600"
            }
        ]
    })
}

async fn post_json(app: &axum::Router, uri: &str, body: serde_json::Value) -> (StatusCode, Vec<u8>) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), 10 * 1024 * 1024)
        .await
        .unwrap();
    (status, bytes.to_vec())
}

async fn get(app: &axum::Router, uri: &str) -> (StatusCode, Vec<u8>) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), 10 * 1024 * 1024)
        .await
        .unwrap();
    (status, bytes.to_vec())
}

#[tokio::test]
async fn test_create_fetch_round_trip() {
    let (app, _dir) = setup_app(false).await;

    let (status, body) = post_json(&app, "/api/documents", sample_payload()).await;
    assert_eq!(status, StatusCode::CREATED);
    let created: serde_json::Value = serde_json::from_slice(&body).unwrap();
    let id = created["id"].as_str().unwrap().to_string();

    let (status, body) = get(&app, &format!("/api/documents/{}", id)).await;
    assert_eq!(status, StatusCode::OK);
    let fetched: serde_json::Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(fetched["pesel"], "44051401359");
    assert_eq!(fetched["imie"], "Jan");
    assert_eq!(fetched["godzina_wypadku"], "10:30:00");
    assert_eq!(fetched["czy_udzielona_pomoc"], true);
    assert_eq!(fetched["witnesses"][0]["nazwisko"], "Lis");
    assert_eq!(fetched["witnesses"][0]["document_id"], id.as_str());
}

#[tokio::test]
async fn test_list_with_filters_and_pagination() {
    let (app, _dir) = setup_app(false).await;

    let mut second = sample_payload();
    second["nazwisko"] = "Nowak".into();
    second["data_wypadku"] = "2023-01-05".into();

    post_json(&app, "/api/documents", sample_payload()).await;
    post_json(&app, "/api/documents", second).await;

    let (status, body) = get(&app, "/api/documents").await;
    assert_eq!(status, StatusCode::OK);
    let listing: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(listing["total"], 2);
    assert_eq!(listing["items"].as_array().unwrap().len(), 2);

    let (_, body) = get(&app, "/api/documents?q=Nowak").await;
    let listing: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(listing["total"], 1);
    assert_eq!(listing["items"][0]["nazwisko"], "Nowak");

    let (_, body) = get(&app, "/api/documents?date_from=2024-01-01").await;
    let listing: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(listing["total"], 1);
    assert_eq!(listing["items"][0]["nazwisko"], "Kowalski");

    let (_, body) = get(&app, "/api/documents?per_page=1&page=2&sort=nazwisko&order=asc").await;
    let listing: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(listing["total"], 2);
    assert_eq!(listing["total_pages"], 2);
    assert_eq!(listing["items"][0]["nazwisko"], "Nowak");
}

#[tokio::test]
async fn test_invalid_document_is_400_plain_text() {
    let (app, _dir) = setup_app(false).await;

    let mut payload = sample_payload();
    payload["pesel"] = "123".into();

    let (status, body) = post_json(&app, "/api/documents", payload).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let text = String::from_utf8(body).unwrap();
    assert!(text.starts_with("Invalid document data"));
    assert!(text.contains("pesel"));
}

#[tokio::test]
async fn test_generate_pdf_fills_and_persists() {
    let (app, _dir) = setup_app(true).await;

    let (status, body) = post_json(&app, "/api/pdf/generate", sample_payload()).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.starts_with(b"%PDF"));

    // The record was stored as a side effect
    let (_, listing) = get(&app, "/api/documents").await;
    let listing: serde_json::Value = serde_json::from_slice(&listing).unwrap();
    assert_eq!(listing["total"], 1);

    // The filled value is visible in the form fields
    let fields = ewyp::pdf::read_form_fields(&body).unwrap();
    assert_eq!(fields["PESEL[0]"], "44051401359");
    assert_eq!(fields["Nazwisko[0]"], "Kowalski");
}

#[tokio::test]
async fn test_document_pdf_plain_and_anonymized() {
    let (app, _dir) = setup_app(true).await;

    let (_, body) = post_json(&app, "/api/documents", sample_payload()).await;
    let created: serde_json::Value = serde_json::from_slice(&body).unwrap();
    let id = created["id"].as_str().unwrap();

    let (status, plain) = get(&app, &format!("/api/documents/{}/pdf", id)).await;
    assert_eq!(status, StatusCode::OK);
    let fields = ewyp::pdf::read_form_fields(&plain).unwrap();
    assert_eq!(fields["PESEL[0]"], "44051401359");

    let (status, anon) =
        get(&app, &format!("/api/documents/{}/pdf?anonymized=true", id)).await;
    assert_eq!(status, StatusCode::OK);
    let fields = ewyp::pdf::read_form_fields(&anon).unwrap();
    assert!(!fields.contains_key("PESEL[0]"));
    assert!(!contains(&anon, b"44051401359"));
}

#[tokio::test]
async fn test_document_card_renders() {
    let (app, _dir) = setup_app(false).await;

    let (_, body) = post_json(&app, "/api/documents", sample_payload()).await;
    let created: serde_json::Value = serde_json::from_slice(&body).unwrap();
    let id = created["id"].as_str().unwrap();

    let (status, card) = get(&app, &format!("/api/documents/{}/card", id)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(card.starts_with(b"%PDF"));
}

#[tokio::test]
async fn test_template_fields_endpoint() {
    let (app, _dir) = setup_app(true).await;

    let (status, body) = get(&app, "/api/pdf/fields").await;
    assert_eq!(status, StatusCode::OK);
    let fields: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert!(fields.get("PESEL[0]").is_some());
}

#[tokio::test]
async fn test_ai_endpoints_when_llm_disabled() {
    let (app, _dir) = setup_app(false).await;

    let (status, _) = post_json(
        &app,
        "/api/ai/review",
        serde_json::json!({ "document": sample_payload() }),
    )
    .await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);

    // Unknown record id wins over the LLM call
    let (status, _) = post_json(
        &app,
        "/api/ai/recommendation",
        serde_json::json!({ "field_name": "rodzaj_urazow", "document_id": "missing" }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = post_json(&app, "/api/ai/review", serde_json::json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|w| w == needle)
}

/// Minimal AcroForm with the template's most important fields, merged
/// field/widget objects on a single page.
fn form_fixture() -> Vec<u8> {
    let field_names = [
        "PESEL[0]",
        "Imię[0]",
        "Nazwisko[0]",
        "Dataurodzenia[0]",
        "Ulica[0]",
        "Kodpocztowy[0]",
        "Poczta[0]",
        "Datawyp[0]",
        "Godzina[0]",
        "Tekst7[0]",
        "Tekst8[0]",
    ];

    let mut doc = PdfDocument::with_version("1.5");
    let pages_id = doc.new_object_id();
    let page_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => Object::Reference(font_id) },
    });
    let content_id = doc.add_object(Stream::new(dictionary! {}, Vec::new()));

    let mut field_refs = Vec::new();
    for (i, name) in field_names.iter().enumerate() {
        let y = 780.0 - 30.0 * i as f32;
        let field_id = doc.add_object(dictionary! {
            "Type" => "Annot",
            "Subtype" => "Widget",
            "FT" => "Tx",
            "T" => Object::String(name.as_bytes().to_vec(), StringFormat::Literal),
            "Rect" => Object::Array(vec![
                Object::Real(50.0),
                Object::Real(y),
                Object::Real(400.0),
                Object::Real(y + 20.0),
            ]),
            "P" => Object::Reference(page_id),
        });
        field_refs.push(Object::Reference(field_id));
    }

    doc.objects.insert(
        page_id,
        Object::Dictionary(dictionary! {
            "Type" => "Page",
            "Parent" => Object::Reference(pages_id),
            "MediaBox" => Object::Array(vec![0.into(), 0.into(), 595.into(), 842.into()]),
            "Contents" => Object::Reference(content_id),
            "Resources" => Object::Reference(resources_id),
            "Annots" => Object::Array(field_refs.clone()),
        }),
    );
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => Object::Array(vec![Object::Reference(page_id)]),
            "Count" => 1,
        }),
    );

    let acroform_id = doc.add_object(dictionary! {
        "Fields" => Object::Array(field_refs),
    });
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => Object::Reference(pages_id),
        "AcroForm" => Object::Reference(acroform_id),
    });
    doc.trailer.set("Root", Object::Reference(catalog_id));

    let mut out = Vec::new();
    doc.save_to(&mut out).unwrap();
    out
}
