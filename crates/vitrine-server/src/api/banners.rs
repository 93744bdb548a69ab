//! Banner listing and the combined home-page handler.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Extension, Json};
use serde::Serialize;

use super::{cache_control, map_cms_error, ApiError, ApiResponse, AppState, ResponseMeta};
use crate::middleware::RequestId;
use vitrine_cms::{assemble_banners, assemble_categories, Banner, Category};

#[derive(Debug, Serialize)]
pub struct HomeData {
    pub banners: Vec<Banner>,
    pub categories: Vec<Category>,
}

/// `GET /api/v1/banners` — active banners in display order.
pub async fn list_banners(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<impl IntoResponse, ApiError> {
    let records = state
        .cms
        .fetch_banners()
        .await
        .map_err(|e| map_cms_error(req_id.0.clone(), &e))?;

    let banners = assemble_banners(&records, state.cms.base_url());

    Ok((
        StatusCode::OK,
        cache_control(state.config.home_max_age_secs),
        Json(ApiResponse {
            data: banners,
            meta: ResponseMeta::new(req_id.0),
        }),
    ))
}

/// `GET /api/v1/home` — everything the landing page needs in one response.
///
/// Banners and categories are fetched concurrently; either upstream failure
/// fails the whole response.
pub async fn home(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<impl IntoResponse, ApiError> {
    let (banner_records, category_records) =
        futures::try_join!(state.cms.fetch_banners(), state.cms.fetch_categories())
            .map_err(|e| map_cms_error(req_id.0.clone(), &e))?;

    let base_url = state.cms.base_url();
    let data = HomeData {
        banners: assemble_banners(&banner_records, base_url),
        categories: assemble_categories(&category_records, base_url),
    };

    Ok((
        StatusCode::OK,
        cache_control(state.config.home_max_age_secs),
        Json(ApiResponse {
            data,
            meta: ResponseMeta::new(req_id.0),
        }),
    ))
}
