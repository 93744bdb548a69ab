//! Image relay endpoint.
//!
//! Fetches an upstream image server-side and re-serves the bytes, so browsers
//! only ever talk to this origin. Responses are plain bodies with image
//! headers, not the JSON envelope the `/api/v1` routes use.

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
};
use serde::Deserialize;

use super::AppState;

/// Browser-shaped UA so upstreams that reject unknown clients still serve us.
const RELAY_USER_AGENT: &str = "Mozilla/5.0 (compatible; vitrine-image-proxy/1.0)";
const RELAY_CACHE_CONTROL: &str = "public, max-age=86400";
const DEFAULT_CONTENT_TYPE: &str = "image/webp";

#[derive(Debug, Deserialize)]
pub struct RelayParams {
    pub url: Option<String>,
}

/// `GET /api/image-proxy?url=...`
///
/// Every relay failure is a plain-text 404; upstream status codes and error
/// bodies are never forwarded to the browser.
pub async fn image_proxy(
    State(state): State<AppState>,
    Query(params): Query<RelayParams>,
) -> impl IntoResponse {
    let Some(url) = params.url.filter(|url| !url.is_empty()) else {
        return (StatusCode::BAD_REQUEST, "Missing image URL").into_response();
    };

    let response = match state
        .proxy_client
        .get(&url)
        .header(header::USER_AGENT, RELAY_USER_AGENT)
        .send()
        .await
    {
        Ok(response) if response.status().is_success() => response,
        Ok(response) => {
            tracing::warn!(url = %url, status = %response.status(), "image relay upstream error");
            return (StatusCode::NOT_FOUND, "Image not found").into_response();
        }
        Err(error) => {
            tracing::warn!(url = %url, error = %error, "image relay request failed");
            return (StatusCode::NOT_FOUND, "Image not found").into_response();
        }
    };

    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or(DEFAULT_CONTENT_TYPE)
        .to_string();

    let body = match response.bytes().await {
        Ok(bytes) => bytes,
        Err(error) => {
            tracing::warn!(url = %url, error = %error, "image relay body read failed");
            return (StatusCode::NOT_FOUND, "Image not found").into_response();
        }
    };

    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, content_type),
            (header::CACHE_CONTROL, RELAY_CACHE_CONTROL.to_string()),
        ],
        body,
    )
        .into_response()
}
