use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

use crate::{
    domain::{
        errors::CatalogError,
        models::{
            EditingMode, EditingSession, ImageDeletionResult, Product, ProductDeletion,
            ProductDraft, UploadProgress, UploadedImage,
        },
    },
    services::{ImageRemoval, RemovalAction},
};

const EXCERPT_CHARS: usize = 50;

/// DTO for a full product
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductDto {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub size: String,
    pub image_url: Vec<String>,
    pub price: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// DTO for one row of the product table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductSummaryDto {
    pub id: String,
    pub name: String,
    pub size: String,
    pub price: i64,
    pub first_image: Option<String>,
    /// Images beyond the first
    pub extra_images: usize,
    pub description_excerpt: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// DTO for creating or updating a product.
///
/// `price` accepts a JSON number or a string, as typed into a form.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductDraftDto {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub size: String,
    #[serde(default)]
    pub price: Option<serde_json::Value>,
    #[serde(default)]
    pub image_url: Vec<String>,
}

/// DTO for session submission; images come from the session
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubmitSessionDto {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub size: String,
    #[serde(default)]
    pub price: Option<serde_json::Value>,
}

/// DTO for opening an editing session
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OpenSessionDto {
    pub product_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadedImageDto {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadFailureDto {
    pub file_name: String,
    pub error: String,
}

/// DTO for a multi-file upload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadProgressDto {
    pub total: usize,
    pub completed: usize,
    pub percent: u8,
    pub uploaded: Vec<UploadedImageDto>,
    pub failures: Vec<UploadFailureDto>,
    pub session: SessionDto,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeletionResultDto {
    pub url: String,
    pub success: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductDeletionDto {
    pub id: String,
    pub deleted_images: Vec<DeletionResultDto>,
}

/// DTO for an editing session's state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionDto {
    pub id: Uuid,
    /// "create" or "edit"
    pub mode: String,
    pub product_id: Option<String>,
    pub images: Vec<String>,
    pub temporary_images: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageRemovalDto {
    pub url: String,
    /// "deleted", "delete_failed", "untracked" or "detached"
    pub action: String,
    pub error: Option<String>,
    pub session: SessionDto,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CancelSessionDto {
    pub deleted_images: Vec<DeletionResultDto>,
}

/// Error response body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponseDto {
    pub error: String,
    pub message: String,
    pub details: Option<HashMap<String, serde_json::Value>>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuccessResponseDto {
    pub message: String,
    pub data: Option<serde_json::Value>,
    pub timestamp: DateTime<Utc>,
}

// Conversions

impl From<Product> for ProductDto {
    fn from(product: Product) -> Self {
        ProductDto {
            id: product.id.to_string(),
            name: product.name,
            description: product.description,
            size: product.size,
            image_url: product.image_url,
            price: product.price,
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }
}

impl From<Product> for ProductSummaryDto {
    fn from(product: Product) -> Self {
        let description_excerpt = product.description.as_deref().map(excerpt);

        ProductSummaryDto {
            id: product.id.to_string(),
            name: product.name,
            size: product.size,
            price: product.price,
            first_image: product.image_url.first().cloned(),
            extra_images: product.image_url.len().saturating_sub(1),
            description_excerpt,
            created_at: product.created_at,
        }
    }
}

/// First characters of a description, with an ellipsis when cut
fn excerpt(text: &str) -> String {
    if text.chars().count() <= EXCERPT_CHARS {
        return text.to_string();
    }
    let cut: String = text.chars().take(EXCERPT_CHARS).collect();
    format!("{}...", cut)
}

fn price_text(price: Option<serde_json::Value>) -> String {
    match price {
        None | Some(serde_json::Value::Null) => String::new(),
        Some(serde_json::Value::String(s)) => s,
        Some(other) => other.to_string(),
    }
}

impl From<ProductDraftDto> for ProductDraft {
    fn from(dto: ProductDraftDto) -> Self {
        ProductDraft {
            name: dto.name,
            description: dto.description,
            size: dto.size,
            price: price_text(dto.price),
            image_url: dto.image_url,
        }
    }
}

impl SubmitSessionDto {
    pub fn into_draft(self, image_url: Vec<String>) -> ProductDraft {
        ProductDraft {
            name: self.name,
            description: self.description,
            size: self.size,
            price: price_text(self.price),
            image_url,
        }
    }
}

impl From<UploadedImage> for UploadedImageDto {
    fn from(image: UploadedImage) -> Self {
        UploadedImageDto {
            name: image.object_name.to_string(),
            url: image.public_url,
        }
    }
}

impl From<ImageDeletionResult> for DeletionResultDto {
    fn from(result: ImageDeletionResult) -> Self {
        DeletionResultDto {
            url: result.url,
            success: result.success,
            error: result.error,
        }
    }
}

impl From<ProductDeletion> for ProductDeletionDto {
    fn from(deletion: ProductDeletion) -> Self {
        ProductDeletionDto {
            id: deletion.id.to_string(),
            deleted_images: deletion.deleted_images.into_iter().map(Into::into).collect(),
        }
    }
}

impl SessionDto {
    pub fn new(id: Uuid, session: &EditingSession) -> Self {
        let (mode, product_id) = match session.mode() {
            EditingMode::Create => ("create", None),
            EditingMode::Edit { product_id } => ("edit", Some(product_id.to_string())),
        };

        SessionDto {
            id,
            mode: mode.to_string(),
            product_id,
            images: session.current_images().to_vec(),
            temporary_images: session.temporary_images().to_vec(),
        }
    }
}

impl UploadProgressDto {
    pub fn new(progress: UploadProgress, session: SessionDto) -> Self {
        UploadProgressDto {
            total: progress.total,
            completed: progress.completed,
            percent: progress.percent(),
            uploaded: progress.uploaded.into_iter().map(Into::into).collect(),
            failures: progress
                .failures
                .into_iter()
                .map(|f| UploadFailureDto {
                    file_name: f.file_name,
                    error: f.error,
                })
                .collect(),
            session,
        }
    }
}

impl ImageRemovalDto {
    pub fn new(removal: ImageRemoval, session: SessionDto) -> Self {
        let (action, error) = match removal.action {
            RemovalAction::Deleted => ("deleted", None),
            RemovalAction::DeleteFailed { error } => ("delete_failed", Some(error)),
            RemovalAction::Untracked => ("untracked", None),
            RemovalAction::Detached => ("detached", None),
        };

        ImageRemovalDto {
            url: removal.url,
            action: action.to_string(),
            error,
            session,
        }
    }
}

// Error response helpers

impl From<&CatalogError> for StatusCode {
    fn from(error: &CatalogError) -> Self {
        match error {
            CatalogError::ValidationFailed { .. } => StatusCode::BAD_REQUEST,
            CatalogError::NotFound { .. } | CatalogError::ImageNotFound { .. } => {
                StatusCode::NOT_FOUND
            }
            CatalogError::PersistenceFailed { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            CatalogError::UploadFailed { .. }
            | CatalogError::DeleteFailed { .. }
            | CatalogError::FetchFailed { .. } => StatusCode::BAD_GATEWAY,
        }
    }
}

impl ErrorResponseDto {
    pub fn from_catalog_error(error: &CatalogError) -> Self {
        let mut details = HashMap::new();

        let kind = match error {
            CatalogError::ValidationFailed { errors } => {
                details.insert(
                    "validation_errors".to_string(),
                    serde_json::Value::Array(
                        errors
                            .iter()
                            .map(|e| serde_json::Value::String(e.to_string()))
                            .collect(),
                    ),
                );
                "ValidationFailed"
            }
            CatalogError::NotFound { id } => {
                details.insert(
                    "id".to_string(),
                    serde_json::Value::String(id.to_string()),
                );
                "NotFound"
            }
            CatalogError::DeleteFailed { name, .. } => {
                details.insert(
                    "name".to_string(),
                    serde_json::Value::String(name.clone()),
                );
                "DeleteFailed"
            }
            CatalogError::FetchFailed { name, .. } => {
                details.insert(
                    "name".to_string(),
                    serde_json::Value::String(name.clone()),
                );
                "FetchFailed"
            }
            CatalogError::ImageNotFound { name } => {
                details.insert(
                    "name".to_string(),
                    serde_json::Value::String(name.clone()),
                );
                "ImageNotFound"
            }
            CatalogError::PersistenceFailed { .. } => "PersistenceFailed",
            CatalogError::UploadFailed { .. } => "UploadFailed",
        };

        ErrorResponseDto {
            error: kind.to_string(),
            message: error.to_string(),
            details: if details.is_empty() {
                None
            } else {
                Some(details)
            },
            timestamp: Utc::now(),
        }
    }

    pub fn bad_request(message: &str) -> Self {
        ErrorResponseDto {
            error: "BadRequest".to_string(),
            message: message.to_string(),
            details: None,
            timestamp: Utc::now(),
        }
    }

    pub fn not_found(message: &str) -> Self {
        ErrorResponseDto {
            error: "NotFound".to_string(),
            message: message.to_string(),
            details: None,
            timestamp: Utc::now(),
        }
    }

    pub fn unauthorized(message: &str) -> Self {
        ErrorResponseDto {
            error: "Unauthorized".to_string(),
            message: message.to_string(),
            details: None,
            timestamp: Utc::now(),
        }
    }
}

impl SuccessResponseDto {
    pub fn new(message: &str) -> Self {
        SuccessResponseDto {
            message: message.to_string(),
            data: None,
            timestamp: Utc::now(),
        }
    }

    pub fn with_data(message: &str, data: serde_json::Value) -> Self {
        SuccessResponseDto {
            message: message.to_string(),
            data: Some(data),
            timestamp: Utc::now(),
        }
    }
}
