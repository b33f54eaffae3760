use crate::domain::value_objects::ObjectName;

/// Errors reported by the object storage backend
#[derive(Debug, Clone)]
pub enum StorageError {
    /// Object not found
    ObjectNotFound { name: ObjectName },

    /// Object already exists (uploads never overwrite)
    ObjectAlreadyExists { name: ObjectName },

    /// Validation error
    ValidationError { message: String },

    /// Infrastructure error with external source
    InfrastructureError {
        message: String,
        source: Option<String>, // Store error as string to allow Clone
    },
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageError::ObjectNotFound { name } => {
                write!(f, "Object not found: {}", name)
            }
            StorageError::ObjectAlreadyExists { name } => {
                write!(f, "Object already exists: {}", name)
            }
            StorageError::ValidationError { message } => {
                write!(f, "Validation error: {}", message)
            }
            StorageError::InfrastructureError { message, .. } => {
                write!(f, "Infrastructure error: {}", message)
            }
        }
    }
}

impl std::error::Error for StorageError {}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;
