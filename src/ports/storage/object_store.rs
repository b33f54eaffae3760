use crate::domain::{errors::StorageResult, models::StoredImage, value_objects::ObjectName};
use async_trait::async_trait;
use bytes::Bytes;

/// Port for the image bucket
/// Abstracts the storage backend, S3 or in-memory
#[async_trait]
pub trait ObjectStore: Send + Sync + 'static {
    /// Store object data under a name that must not exist yet
    async fn put_object(
        &self,
        name: &ObjectName,
        data: Bytes,
        content_type: &str,
    ) -> StorageResult<()>;

    /// Read object data along with its stored headers
    async fn get_object(&self, name: &ObjectName) -> StorageResult<StoredImage>;

    /// Delete object data
    async fn delete_object(&self, name: &ObjectName) -> StorageResult<()>;

    /// Check if object exists
    async fn object_exists(&self, name: &ObjectName) -> StorageResult<bool>;
}
