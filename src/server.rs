//! HTTP surface serving the rendered page.

use crate::{
    cache::{CachedReleases, ReleaseCache},
    error::Result,
    format_html::{format_error_html, format_page_html},
    host::detect_arch,
    page::PageView,
    provider::github,
};
use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use std::sync::Arc;
use tracing::{debug, warn};

#[derive(Clone)]
pub struct AppState {
    pub client: reqwest::Client,
    pub cache: ReleaseCache,
    /// `owner/name` of the GitHub repository.
    pub repo: String,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/page.json", get(page_json))
        .route("/health", get(health_check))
        .with_state(state)
}

async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

fn host_arch(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::USER_AGENT)
        .and_then(|ua| ua.to_str().ok())
        .and_then(detect_arch)
}

async fn load_releases(state: &AppState) -> Result<CachedReleases> {
    let cached = state
        .cache
        .get_or_fetch(|| github::fetch_releases(&state.client, &state.repo))
        .await?;
    debug!("Using releases fetched at {}", cached.fetched_at);
    Ok(cached)
}

async fn build_page(state: &AppState, headers: &HeaderMap) -> Result<(PageView, CachedReleases)> {
    let cached = load_releases(state).await?;
    let arch = host_arch(headers);
    let page = PageView::build(&cached.records, arch.as_deref())?;
    Ok((page, cached))
}

async fn index(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    match build_page(&state, &headers).await {
        Ok((page, cached)) => {
            Html(format_page_html(&page, &state.repo, Some(cached.fetched_at))).into_response()
        }
        Err(e) => {
            warn!("Failed to build page: {}", e);
            (
                StatusCode::BAD_GATEWAY,
                Html(format_error_html(&state.repo, &e.to_string())),
            )
                .into_response()
        }
    }
}

async fn page_json(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> std::result::Result<Json<PageView>, (StatusCode, String)> {
    build_page(&state, &headers)
        .await
        .map(|(page, _)| Json(page))
        .map_err(|e| (StatusCode::BAD_GATEWAY, e.to_string()))
}
