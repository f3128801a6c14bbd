use super::*;
use axum::{body, body::Body, http::Request};
use catalog::ContentRecord;
use server_api::ApiContext;
use storage::Storage;
use tower::ServiceExt;

const TEST_BODY_LIMIT: usize = 4 * 1024;

async fn seeded_storage() -> Storage {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    let talks: Vec<ContentRecord> = serde_json::from_value(serde_json::json!([
        {
            "kind": "talk",
            "name": "Leading AI teams",
            "lang": "English",
            "date": "2024-05-01",
            "tags": ["ai", "leadership"],
            "url": "https://video.example/1"
        },
        {
            "kind": "talk",
            "name": "בינה מלאכותית בצוותים",
            "lang": "Hebrew",
            "date": "2024-04-01",
            "tags": ["ai"]
        },
        {
            "kind": "talk",
            "name": "Untagged",
            "lang": "English",
            "date": "2024-03-01"
        }
    ]))
    .expect("records");
    for talk in &talks {
        storage.insert_content(talk).await.expect("insert");
    }
    storage
}

async fn test_app() -> (Router, Storage) {
    let storage = seeded_storage().await;
    let state = AppState {
        api: ApiContext {
            storage: storage.clone(),
        },
    };
    (build_router(Arc::new(state), TEST_BODY_LIMIT), storage)
}

async fn read_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    serde_json::from_slice(&bytes).expect("json")
}

#[tokio::test]
async fn healthz_reports_ok_when_storage_is_ready() {
    let (app, _storage) = test_app().await;
    let request = Request::get("/healthz")
        .body(Body::empty())
        .expect("request");
    let response = app.oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let body = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    assert_eq!(body.as_ref(), b"ok");
}

#[tokio::test]
async fn talks_route_applies_shared_link_filters() {
    let (app, _storage) = test_app().await;
    let request = Request::get("/talks?lang=all&tag=ai")
        .body(Body::empty())
        .expect("request");
    let response = app.oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let listing: ContentListing = read_json(response).await;
    assert_eq!(listing.items.len(), 2);
    assert_eq!(listing.all_tags, vec!["ai".to_string(), "leadership".to_string()]);
    assert_eq!(listing.share_query, "tag=ai");
    assert!(listing.items[0].date > listing.items[1].date);
}

#[tokio::test]
async fn empty_collection_lists_no_items() {
    let (app, _storage) = test_app().await;
    let request = Request::get("/podcasts")
        .body(Body::empty())
        .expect("request");
    let response = app.oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let listing: ContentListing = read_json(response).await;
    assert_eq!(listing.kind, ContentKind::Podcast);
    assert!(listing.items.is_empty());
}

#[tokio::test]
async fn unknown_language_yields_empty_listing() {
    let (app, _storage) = test_app().await;
    let request = Request::get("/talks?lang=english")
        .body(Body::empty())
        .expect("request");
    let response = app.oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let listing: ContentListing = read_json(response).await;
    assert!(listing.items.is_empty());
    assert_eq!(listing.all_tags, vec!["ai".to_string(), "leadership".to_string()]);
    assert_eq!(listing.share_query, "lang=english");
}

#[tokio::test]
async fn contact_submission_is_stored() {
    let (app, storage) = test_app().await;
    let request = Request::post("/contact")
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::json!({
                "topic": "smarthome",
                "name": "Noa",
                "email": "noa@example.com",
                "message": "Lights and blinds",
                "home_size": "120 sqm",
                "number_of_devices": "30"
            })
            .to_string(),
        ))
        .expect("request");
    let response = app.oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let receipt: ContactReceipt = read_json(response).await;
    assert!(receipt.message.contains("smart home"));

    let stored = storage.list_contact_submissions(10).await.expect("stored");
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].submission.home_size.as_deref(), Some("120 sqm"));
}

#[tokio::test]
async fn contact_submission_missing_topic_field_is_rejected() {
    let (app, storage) = test_app().await;
    let request = Request::post("/contact")
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::json!({
                "topic": "mentorship",
                "name": "Noa",
                "email": "noa@example.com",
                "message": "Hi"
            })
            .to_string(),
        ))
        .expect("request");
    let response = app.oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let error: ApiError = read_json(response).await;
    assert_eq!(error.message, "mentorship_area is required");
    assert!(storage
        .list_contact_submissions(10)
        .await
        .expect("stored")
        .is_empty());
}

#[tokio::test]
async fn oversized_contact_body_is_refused() {
    let (app, _storage) = test_app().await;
    let request = Request::post("/contact")
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::json!({
                "topic": "other",
                "name": "Noa",
                "email": "noa@example.com",
                "message": "x".repeat(TEST_BODY_LIMIT * 2)
            })
            .to_string(),
        ))
        .expect("request");
    let response = app.oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
}
