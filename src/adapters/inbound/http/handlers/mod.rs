pub mod image_handlers;
pub mod product_handlers;
pub mod session_handlers;
pub mod system_handlers;

pub use image_handlers::*;
pub use product_handlers::*;
pub use session_handlers::*;
pub use system_handlers::*;

use axum::{Json, http::StatusCode};

use crate::{adapters::inbound::http::dto::ErrorResponseDto, domain::errors::CatalogError};

/// Error half of every handler result
pub type ApiError = (StatusCode, Json<ErrorResponseDto>);

pub(crate) fn catalog_error(error: CatalogError) -> ApiError {
    (
        StatusCode::from(&error),
        Json(ErrorResponseDto::from_catalog_error(&error)),
    )
}

pub(crate) fn bad_request(message: &str) -> ApiError {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponseDto::bad_request(message)),
    )
}
