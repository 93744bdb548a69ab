//! Category listing handler.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Extension, Json};

use super::{cache_control, map_cms_error, ApiError, ApiResponse, AppState, ResponseMeta};
use crate::middleware::RequestId;
use vitrine_cms::assemble_categories;

/// `GET /api/v1/categories` — active categories with a resolvable tile image.
pub async fn list_categories(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<impl IntoResponse, ApiError> {
    let records = state
        .cms
        .fetch_categories()
        .await
        .map_err(|e| map_cms_error(req_id.0.clone(), &e))?;

    let categories = assemble_categories(&records, state.cms.base_url());

    Ok((
        StatusCode::OK,
        cache_control(state.config.home_max_age_secs),
        Json(ApiResponse {
            data: categories,
            meta: ResponseMeta::new(req_id.0),
        }),
    ))
}
