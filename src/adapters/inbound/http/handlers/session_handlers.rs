use axum::{
    Json,
    extract::{Multipart, Path, State},
    http::StatusCode,
};
use tracing::info;
use uuid::Uuid;

use super::{
    ApiError, bad_request, catalog_error, image_handlers::read_files,
    product_handlers::parse_product_id,
};
use crate::{
    adapters::inbound::http::{
        dto::{
            CancelSessionDto, ErrorResponseDto, ImageRemovalDto, OpenSessionDto, ProductDto,
            SessionDto, SubmitSessionDto, UploadProgressDto,
        },
        router::AppState,
        sessions::SharedSession,
    },
    domain::models::{EditingMode, EditingSession},
};

fn session_not_found(id: &Uuid) -> ApiError {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponseDto::not_found(&format!(
            "Editing session not found: {}",
            id
        ))),
    )
}

async fn find_session(app_state: &AppState, id: &Uuid) -> Result<SharedSession, ApiError> {
    app_state
        .sessions
        .get(id)
        .await
        .ok_or_else(|| session_not_found(id))
}

/// State of a session that is still open once its lock is held
fn open_state<'a>(
    slot: &'a mut Option<EditingSession>,
    id: &Uuid,
) -> Result<&'a mut EditingSession, ApiError> {
    slot.as_mut().ok_or_else(|| session_not_found(id))
}

/// Open a form: empty for a new product, or seeded with a product's images
pub async fn open_session(
    State(app_state): State<AppState>,
    Json(request): Json<OpenSessionDto>,
) -> Result<(StatusCode, Json<SessionDto>), ApiError> {
    let session = match request.product_id {
        Some(id) => {
            let id = parse_product_id(id)?;
            let product = app_state
                .product_service
                .get_product(&id)
                .await
                .map_err(catalog_error)?;
            EditingSession::for_product(&product)
        }
        None => EditingSession::new_product(),
    };

    let dto_session = session.clone();
    let id = app_state.sessions.open(session).await;
    info!(session = %id, product_id = ?dto_session.product_id(), "Opened editing session");

    Ok((StatusCode::CREATED, Json(SessionDto::new(id, &dto_session))))
}

pub async fn get_session(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionDto>, ApiError> {
    let shared = find_session(&app_state, &id).await?;
    let mut slot = shared.lock().await;
    let session = open_state(&mut slot, &id)?;
    Ok(Json(SessionDto::new(id, session)))
}

/// Upload one or more files into the form, one at a time
pub async fn upload_session_images(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    multipart: Multipart,
) -> Result<Json<UploadProgressDto>, ApiError> {
    let shared = find_session(&app_state, &id).await?;

    let files = read_files(multipart).await?;
    if files.is_empty() {
        return Err(bad_request("No files in upload"));
    }

    let mut slot = shared.lock().await;
    let session = open_state(&mut slot, &id)?;
    let progress = app_state.coordinator.on_upload_files(session, files).await;

    Ok(Json(UploadProgressDto::new(
        progress,
        SessionDto::new(id, session),
    )))
}

/// Remove the image at a position in the form
pub async fn remove_session_image(
    State(app_state): State<AppState>,
    Path((id, index)): Path<(Uuid, usize)>,
) -> Result<Json<ImageRemovalDto>, ApiError> {
    let shared = find_session(&app_state, &id).await?;

    let mut slot = shared.lock().await;
    let session = open_state(&mut slot, &id)?;
    let removal = app_state
        .coordinator
        .on_remove(session, index)
        .await
        .map_err(catalog_error)?;

    Ok(Json(ImageRemovalDto::new(
        removal,
        SessionDto::new(id, session),
    )))
}

/// Discard the form and delete its temporary images
pub async fn cancel_session(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CancelSessionDto>, ApiError> {
    let session = app_state
        .sessions
        .close(&id)
        .await
        .ok_or_else(|| session_not_found(&id))?;

    let results = app_state.coordinator.on_cancel(session).await;

    Ok(Json(CancelSessionDto {
        deleted_images: results.into_iter().map(Into::into).collect(),
    }))
}

/// Save the form's fields with its current images.
///
/// The session stays locked from the save until it is closed, so no other
/// gesture can act on it in between. A failed save leaves the session open.
pub async fn submit_session(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(fields): Json<SubmitSessionDto>,
) -> Result<(StatusCode, Json<ProductDto>), ApiError> {
    let shared = find_session(&app_state, &id).await?;
    let mut slot = shared.lock().await;
    let session = open_state(&mut slot, &id)?;

    let draft = fields.into_draft(session.current_images().to_vec());
    let (status, product) = match session.mode() {
        EditingMode::Create => (
            StatusCode::CREATED,
            app_state.product_service.create_product(draft).await,
        ),
        EditingMode::Edit { product_id } => (
            StatusCode::OK,
            app_state
                .product_service
                .update_product(product_id, draft)
                .await,
        ),
    };
    let product = product.map_err(catalog_error)?;

    if let Some(session) = slot.take() {
        app_state.coordinator.on_submit_success(session);
    }
    app_state.sessions.discard(&id).await;
    drop(slot);

    Ok((status, Json(product.into())))
}
