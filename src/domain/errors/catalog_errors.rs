use crate::domain::{errors::ValidationError, value_objects::ProductId};

/// Errors that can occur while managing products and their images
#[derive(Debug, Clone)]
pub enum CatalogError {
    /// One or more required fields are missing or malformed
    ValidationFailed { errors: Vec<ValidationError> },

    /// The products table rejected or failed the operation
    PersistenceFailed { message: String },

    /// The storage bucket rejected or failed an upload
    UploadFailed { message: String },

    /// The storage bucket rejected or failed a removal
    DeleteFailed { name: String, message: String },

    /// The storage bucket failed to return an image
    FetchFailed { name: String, message: String },

    /// Product not found
    NotFound { id: ProductId },

    /// No image is stored under this name
    ImageNotFound { name: String },
}

impl CatalogError {
    pub fn validation(error: ValidationError) -> Self {
        CatalogError::ValidationFailed {
            errors: vec![error],
        }
    }

    pub fn persistence(message: impl Into<String>) -> Self {
        CatalogError::PersistenceFailed {
            message: message.into(),
        }
    }
}

impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogError::ValidationFailed { errors } => {
                let messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
                write!(f, "Validation failed: {}", messages.join("; "))
            }
            CatalogError::PersistenceFailed { message } => {
                write!(f, "Persistence error: {}", message)
            }
            CatalogError::UploadFailed { message } => {
                write!(f, "Upload failed: {}", message)
            }
            CatalogError::DeleteFailed { name, message } => {
                write!(f, "Failed to delete '{}': {}", name, message)
            }
            CatalogError::FetchFailed { name, message } => {
                write!(f, "Failed to fetch '{}': {}", name, message)
            }
            CatalogError::NotFound { id } => {
                write!(f, "Product not found: {}", id)
            }
            CatalogError::ImageNotFound { name } => {
                write!(f, "Image not found: {}", name)
            }
        }
    }
}

impl std::error::Error for CatalogError {}

impl From<ValidationError> for CatalogError {
    fn from(error: ValidationError) -> Self {
        CatalogError::validation(error)
    }
}

/// Result type for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;
