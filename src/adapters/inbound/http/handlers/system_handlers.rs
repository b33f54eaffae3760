use axum::{Json, extract::State};
use serde_json::json;

use crate::adapters::inbound::http::{dto::SuccessResponseDto, router::AppState};

/// Public landing endpoint pointing clients at sign-in and the API
pub async fn home(State(app_state): State<AppState>) -> Json<SuccessResponseDto> {
    Json(SuccessResponseDto::with_data(
        "Product catalog admin",
        json!({
            "sign_in": app_state.sign_in_path,
            "products": "/api/products",
        }),
    ))
}

pub async fn health() -> Json<SuccessResponseDto> {
    Json(SuccessResponseDto::new("ok"))
}
