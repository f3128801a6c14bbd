use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use server_api::{list_content, submit_contact};
use shared::{
    domain::ContentKind,
    error::{ApiError, ErrorCode},
    protocol::{ContactReceipt, ContactSubmission, ContentListing},
};
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};
use tracing::warn;

use crate::app_state::AppState;

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ApiError>)>;

#[derive(Debug, Deserialize)]
pub(crate) struct FilterQuery {
    lang: Option<String>,
    tag: Option<String>,
}

pub(crate) fn build_router(state: Arc<AppState>, max_body_bytes: usize) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/talks", get(http_list_talks))
        .route("/podcasts", get(http_list_podcasts))
        .route("/blog", get(http_list_blog))
        .route("/contact", post(http_submit_contact))
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz(State(state): State<Arc<AppState>>) -> (StatusCode, &'static str) {
    match state.api.storage.health_check().await {
        Ok(()) => (StatusCode::OK, "ok"),
        Err(error) => {
            warn!(%error, "health check failed");
            (StatusCode::SERVICE_UNAVAILABLE, "unavailable")
        }
    }
}

async fn http_list_talks(
    State(state): State<Arc<AppState>>,
    Query(q): Query<FilterQuery>,
) -> ApiResult<ContentListing> {
    list_kind(&state, ContentKind::Talk, q).await
}

async fn http_list_podcasts(
    State(state): State<Arc<AppState>>,
    Query(q): Query<FilterQuery>,
) -> ApiResult<ContentListing> {
    list_kind(&state, ContentKind::Podcast, q).await
}

async fn http_list_blog(
    State(state): State<Arc<AppState>>,
    Query(q): Query<FilterQuery>,
) -> ApiResult<ContentListing> {
    list_kind(&state, ContentKind::Blog, q).await
}

async fn list_kind(state: &AppState, kind: ContentKind, q: FilterQuery) -> ApiResult<ContentListing> {
    let listing = list_content(&state.api, kind, q.lang.as_deref(), q.tag.as_deref())
        .await
        .map_err(reject)?;
    Ok(Json(listing))
}

async fn http_submit_contact(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ContactSubmission>,
) -> ApiResult<ContactReceipt> {
    let receipt = submit_contact(&state.api, req).await.map_err(reject)?;
    Ok(Json(receipt))
}

fn reject(error: ApiError) -> (StatusCode, Json<ApiError>) {
    let status = match error.code {
        ErrorCode::Validation => StatusCode::BAD_REQUEST,
        ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(error))
}

#[cfg(test)]
#[path = "tests/mod_tests.rs"]
mod tests;
