use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware::from_fn_with_state,
    routing::{delete, get, post},
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::{
    handlers::{
        cancel_session, create_product, delete_image, delete_product, get_product, get_session,
        health, home, list_products, open_session, remove_session_image, serve_image,
        submit_session, update_product, upload_image, upload_session_images,
    },
    middleware::require_session,
    sessions::SessionRegistry,
};
use crate::{
    ports::{
        auth::SessionVerifier,
        services::{ImageStorageService, ProductService},
    },
    services::ImageLifecycleCoordinator,
};

/// Largest accepted request body, sized for image uploads
pub const MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

/// Public prefix stored images are served under
pub const IMAGE_ROUTE_PREFIX: &str = "/storage/product-images";

/// Application state containing all services
#[derive(Clone)]
pub struct AppState {
    pub product_service: Arc<dyn ProductService>,
    pub image_service: Arc<dyn ImageStorageService>,
    pub coordinator: Arc<ImageLifecycleCoordinator>,
    pub sessions: SessionRegistry,
    pub verifier: Arc<dyn SessionVerifier>,
    /// Where browsers without a session are redirected
    pub sign_in_path: String,
}

/// Create the main application router with all endpoints
pub fn create_router(state: AppState) -> Router {
    let api = create_api_router().route_layer(from_fn_with_state(state.clone(), require_session));

    Router::new()
        .route("/", get(home))
        .route("/health", get(health))
        .route(&format!("{}/{{name}}", IMAGE_ROUTE_PREFIX), get(serve_image))
        .nest("/api", api)
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Routes that require a verified session
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        // Products
        .route("/products", get(list_products).post(create_product))
        .route(
            "/products/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        // Images
        .route("/images", post(upload_image))
        .route("/images/{name}", delete(delete_image))
        // Editing sessions
        .route("/sessions", post(open_session))
        .route("/sessions/{id}", get(get_session))
        .route("/sessions/{id}/images", post(upload_session_images))
        .route("/sessions/{id}/images/{index}", delete(remove_session_image))
        .route("/sessions/{id}/cancel", post(cancel_session))
        .route("/sessions/{id}/submit", post(submit_session))
}
