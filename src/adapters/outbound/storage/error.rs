use crate::domain::{errors::StorageError, value_objects::ObjectName};
use thiserror::Error as ThisError;

#[derive(ThisError, Debug)]
pub enum StoreError {
    #[error("Object store error: {0}")]
    ObjectStore(#[from] object_store::Error),

    #[error("Invalid storage configuration: {0}")]
    Configuration(String),
}

/// Convert object_store errors to domain storage errors for a known object
pub fn storage_error(err: object_store::Error, name: &ObjectName) -> StorageError {
    match err {
        object_store::Error::NotFound { .. } => StorageError::ObjectNotFound { name: name.clone() },
        object_store::Error::AlreadyExists { .. } => {
            StorageError::ObjectAlreadyExists { name: name.clone() }
        }
        _ => StorageError::InfrastructureError {
            message: format!("Object store operation failed on '{}': {}", name, err),
            source: Some(err.to_string()),
        },
    }
}

/// Convert infrastructure StoreError to domain StorageError
impl From<StoreError> for StorageError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::ObjectStore(e) => StorageError::InfrastructureError {
                message: format!("Object store operation failed: {}", e),
                source: Some(e.to_string()),
            },
            StoreError::Configuration(message) => StorageError::ValidationError { message },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_store_errors_map_to_domain() {
        let name = ObjectName::new("a.png".to_string()).unwrap();

        let not_found = object_store::Error::NotFound {
            path: "a.png".to_string(),
            source: "missing".into(),
        };
        assert!(matches!(
            storage_error(not_found, &name),
            StorageError::ObjectNotFound { .. }
        ));

        let exists = object_store::Error::AlreadyExists {
            path: "a.png".to_string(),
            source: "taken".into(),
        };
        assert!(matches!(
            storage_error(exists, &name),
            StorageError::ObjectAlreadyExists { .. }
        ));
    }

    #[test]
    fn test_configuration_error_is_validation() {
        let err: StorageError = StoreError::Configuration("no bucket".to_string()).into();
        assert!(matches!(err, StorageError::ValidationError { .. }));
    }
}
