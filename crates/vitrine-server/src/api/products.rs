//! Product listing and detail handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{cache_control, map_cms_error, ApiError, ApiResponse, AppState, ResponseMeta};
use crate::middleware::RequestId;
use vitrine_cms::{assemble_product, assemble_product_detail, assemble_products, CatalogItem, ProductDetail};

/// Number of other products returned alongside a detail view.
const RELATED_COUNT: usize = 3;

#[derive(Debug, Deserialize)]
pub struct ProductFilter {
    pub category: Option<String>,
    pub variant: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ProductDetailData {
    pub product: ProductDetail,
    pub related: Vec<CatalogItem>,
}

/// `GET /api/v1/products` — the assembled catalog, optionally narrowed by
/// `category` and `variant` (both case-insensitive).
pub async fn list_products(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(filter): Query<ProductFilter>,
) -> Result<impl IntoResponse, ApiError> {
    let records = state
        .cms
        .fetch_products()
        .await
        .map_err(|e| map_cms_error(req_id.0.clone(), &e))?;

    let mut items = assemble_products(&records, state.cms.base_url());
    if let Some(category) = &filter.category {
        items.retain(|item| item.category.eq_ignore_ascii_case(category));
    }
    if let Some(variant) = &filter.variant {
        items.retain(|item| item.variant.eq_ignore_ascii_case(variant));
    }

    Ok((
        StatusCode::OK,
        cache_control(state.config.products_max_age_secs),
        Json(ApiResponse {
            data: items,
            meta: ResponseMeta::new(req_id.0),
        }),
    ))
}

/// `GET /api/v1/products/{id}` — one product's detail view plus a handful of
/// other catalog items for the "you may also like" strip.
pub async fn get_product(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let records = state
        .cms
        .fetch_products()
        .await
        .map_err(|e| map_cms_error(req_id.0.clone(), &e))?;

    let base_url = state.cms.base_url();
    let Some(record) = records.iter().find(|record| record_id(record) == Some(id)) else {
        return Err(ApiError::new(req_id.0, "not_found", "product not found"));
    };

    let product = assemble_product_detail(record, base_url);
    let related = records
        .iter()
        .filter(|candidate| record_id(candidate) != Some(id))
        .take(RELATED_COUNT)
        .map(|candidate| assemble_product(candidate, base_url))
        .collect();

    Ok((
        StatusCode::OK,
        cache_control(state.config.products_max_age_secs),
        Json(ApiResponse {
            data: ProductDetailData { product, related },
            meta: ResponseMeta::new(req_id.0),
        }),
    ))
}

fn record_id(record: &Value) -> Option<i64> {
    record.get("id").and_then(Value::as_i64)
}
