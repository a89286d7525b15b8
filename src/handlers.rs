//! HTTP route handlers for the banner studio.
//!
//! This module contains the editor page, the preview/render endpoints that
//! run the banner template, the image discovery endpoints and the upload
//! ingestion endpoint.

use axum::{
    extract::{DefaultBodyLimit, Multipart, Request, State},
    http::{header, HeaderValue, StatusCode},
    middleware::{self, Next},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::banner::render_banner;
use crate::ingest::{ingest_bytes, IngestError};
use crate::models::{
    BannerForm, BannerSnapshot, ErrorResponse, HtmlResponse, IngestResponse, SearchRequest,
    SearchResponse, SuggestRequest, SuggestResponse,
};
use crate::suggest::{search_photos, suggest_search_terms, UpstreamError};
use crate::templates::{render_editor_page, render_email_document};
use crate::{AppState, MAX_BODY_BYTES};

// ============================================================================
// Router
// ============================================================================

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/preview", post(preview))
        .route("/api/render", post(render))
        .route("/api/suggest-image", post(suggest_image))
        .route("/api/search-images", post(search_images))
        .route("/api/ingest", post(ingest))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(middleware::from_fn(no_cache))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Every response is marked uncacheable so edits always show up.
async fn no_cache(request: Request, next: Next) -> Response {
    let mut response = next.run(request).await;
    let headers = response.headers_mut();
    headers.insert(
        header::CACHE_CONTROL,
        HeaderValue::from_static("no-cache, no-store, must-revalidate"),
    );
    headers.insert(header::PRAGMA, HeaderValue::from_static("no-cache"));
    headers.insert(header::EXPIRES, HeaderValue::from_static("0"));
    response
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
        .into_response()
}

fn upstream_error(err: UpstreamError) -> Response {
    let status = match &err {
        UpstreamError::MissingKey(_) => StatusCode::INTERNAL_SERVER_ERROR,
        _ => StatusCode::BAD_GATEWAY,
    };
    warn!(error = %err, "upstream call failed");
    error_response(status, err.to_string())
}

// ============================================================================
// Page
// ============================================================================

pub async fn index() -> Html<String> {
    Html(render_editor_page())
}

// ============================================================================
// Banner Rendering
// ============================================================================

pub async fn preview(Json(form): Json<BannerForm>) -> Json<HtmlResponse> {
    let snapshot = BannerSnapshot::from_form(&form);
    Json(HtmlResponse {
        html: render_banner(&snapshot),
    })
}

pub async fn render(Json(form): Json<BannerForm>) -> Json<HtmlResponse> {
    let snapshot = BannerSnapshot::from_form(&form);
    info!(event = %snapshot.event_name, "rendering email export");
    Json(HtmlResponse {
        html: render_email_document(&snapshot),
    })
}

// ============================================================================
// Image Discovery
// ============================================================================

pub async fn suggest_image(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SuggestRequest>,
) -> Response {
    let location = body.location.trim();
    if location.is_empty() {
        return Json(SuggestResponse {
            suggestions: Vec::new(),
        })
        .into_response();
    }

    match suggest_search_terms(
        &state.http,
        state.config.anthropic_api_key.as_deref(),
        &state.config.anthropic_model,
        location,
    )
    .await
    {
        Ok(suggestions) => Json(SuggestResponse { suggestions }).into_response(),
        Err(err) => upstream_error(err),
    }
}

pub async fn search_images(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SearchRequest>,
) -> Response {
    let query = body.query.trim();
    if query.is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "Enter a search term first");
    }

    match search_photos(&state.http, state.config.unsplash_access_key.as_deref(), query).await {
        Ok(images) => Json(SearchResponse { images }).into_response(),
        Err(err) => upstream_error(err),
    }
}

// ============================================================================
// Upload Ingestion
// ============================================================================

pub async fn ingest(mut multipart: Multipart) -> Response {
    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                warn!(error = %e, "malformed multipart upload");
                return error_response(StatusCode::BAD_REQUEST, format!("Malformed upload: {}", e));
            }
        };
        if field.name() != Some("file") {
            continue;
        }

        let file_name = field.file_name().unwrap_or("image").to_string();
        let bytes = match field.bytes().await {
            Ok(bytes) => bytes,
            Err(e) => {
                return error_response(StatusCode::BAD_REQUEST, format!("Failed to read file: {}", e))
            }
        };

        return match ingest_bytes(&file_name, &bytes) {
            Ok(image) => {
                info!(file = %image.file_name, mime = %image.mime, size = bytes.len(), "image ingested");
                Json(IngestResponse {
                    data_uri: image.data_uri,
                    file_name: image.file_name,
                })
                .into_response()
            }
            Err(err @ IngestError::TooLarge { .. }) => {
                error_response(StatusCode::PAYLOAD_TOO_LARGE, err.to_string())
            }
            Err(err) => error_response(StatusCode::BAD_REQUEST, err.to_string()),
        };
    }

    error_response(StatusCode::BAD_REQUEST, "No file uploaded")
}
