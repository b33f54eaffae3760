use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use super::{ApiError, bad_request, catalog_error};
use crate::{
    adapters::inbound::http::{
        dto::{ProductDeletionDto, ProductDraftDto, ProductDto, ProductSummaryDto},
        router::AppState,
    },
    domain::value_objects::ProductId,
};

pub(crate) fn parse_product_id(id: String) -> Result<ProductId, ApiError> {
    ProductId::new(id).map_err(|e| bad_request(&format!("Invalid product id: {}", e)))
}

/// Handle product listing, newest first
pub async fn list_products(State(app_state): State<AppState>) -> Json<Vec<ProductSummaryDto>> {
    let products = app_state.product_service.list_products().await;
    Json(products.into_iter().map(Into::into).collect())
}

/// Handle product retrieval
pub async fn get_product(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ProductDto>, ApiError> {
    let id = parse_product_id(id)?;

    let product = app_state
        .product_service
        .get_product(&id)
        .await
        .map_err(catalog_error)?;

    Ok(Json(product.into()))
}

/// Handle product creation
pub async fn create_product(
    State(app_state): State<AppState>,
    Json(draft): Json<ProductDraftDto>,
) -> Result<(StatusCode, Json<ProductDto>), ApiError> {
    let product = app_state
        .product_service
        .create_product(draft.into())
        .await
        .map_err(catalog_error)?;

    Ok((StatusCode::CREATED, Json(product.into())))
}

/// Handle product update; images dropped from the list are deleted
pub async fn update_product(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
    Json(draft): Json<ProductDraftDto>,
) -> Result<Json<ProductDto>, ApiError> {
    let id = parse_product_id(id)?;

    let product = app_state
        .product_service
        .update_product(&id, draft.into())
        .await
        .map_err(catalog_error)?;

    Ok(Json(product.into()))
}

/// Handle product deletion together with its images
pub async fn delete_product(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ProductDeletionDto>, ApiError> {
    let id = parse_product_id(id)?;

    let deletion = app_state
        .product_service
        .delete_product(&id)
        .await
        .map_err(catalog_error)?;

    Ok(Json(deletion.into()))
}
