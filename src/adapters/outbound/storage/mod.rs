// Infrastructure error types
pub mod error;

// Storage implementations
pub mod apache_object_store_adapter;

// Re-export key types
pub use apache_object_store_adapter::{ApacheObjectStoreAdapter, S3Settings};
pub use error::StoreError;
