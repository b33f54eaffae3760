use axum::{
    Json,
    extract::{Multipart, Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};

use super::{ApiError, bad_request, catalog_error};
use crate::{
    adapters::inbound::http::{
        dto::{SuccessResponseDto, UploadedImageDto},
        router::AppState,
    },
    domain::models::ImageFile,
};

/// Multipart field carrying a single upload
pub const FILE_FIELD: &str = "file";

/// Read every file part of a multipart body, in order.
///
/// Parts without a file name are form fields and are skipped.
pub(crate) async fn read_files(mut multipart: Multipart) -> Result<Vec<ImageFile>, ApiError> {
    let mut files = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| bad_request(&format!("Invalid multipart body: {}", e)))?
    {
        let Some(file_name) = field.file_name().map(str::to_string) else {
            continue;
        };

        let data = field
            .bytes()
            .await
            .map_err(|e| bad_request(&format!("Failed to read '{}': {}", file_name, e)))?;

        files.push(ImageFile::new(file_name, data));
    }

    Ok(files)
}

/// Handle a single image upload from the `file` field
pub async fn upload_image(
    State(app_state): State<AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<UploadedImageDto>), ApiError> {
    let mut file = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| bad_request(&format!("Invalid multipart body: {}", e)))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let file_name = field.file_name().unwrap_or_default().to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| bad_request(&format!("Failed to read upload: {}", e)))?;
        file = Some(ImageFile::new(file_name, data));
        break;
    }

    let file = file.ok_or_else(|| bad_request("Missing 'file' field"))?;

    let uploaded = app_state
        .image_service
        .upload_image(file)
        .await
        .map_err(catalog_error)?;

    Ok((StatusCode::CREATED, Json(uploaded.into())))
}

/// Handle image deletion by object name
pub async fn delete_image(
    State(app_state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<SuccessResponseDto>, ApiError> {
    app_state
        .image_service
        .delete_image(&name)
        .await
        .map_err(catalog_error)?;

    Ok(Json(SuccessResponseDto::new("Image deleted successfully")))
}

/// Serve a stored image with the headers it was uploaded with
pub async fn serve_image(
    State(app_state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Response, ApiError> {
    let image = app_state
        .image_service
        .fetch_image(&name)
        .await
        .map_err(catalog_error)?;

    let content_type = image
        .content_type
        .unwrap_or_else(|| "application/octet-stream".to_string());
    let cache_control = image.cache_control.unwrap_or_else(|| "no-cache".to_string());

    Ok((
        [
            (header::CONTENT_TYPE, content_type),
            (header::CACHE_CONTROL, cache_control),
        ],
        image.data,
    )
        .into_response())
}
