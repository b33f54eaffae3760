use crate::domain::{
    errors::CatalogResult,
    models::{ImageFile, StoredImage, UploadedImage},
    value_objects::ObjectName,
};
use async_trait::async_trait;

/// Port for the image storage gateway
/// Uploads product images under unique names and removes them again
#[async_trait]
pub trait ImageStorageService: Send + Sync + 'static {
    /// Store a file under a freshly generated name and return its public URL
    async fn upload_image(&self, file: ImageFile) -> CatalogResult<UploadedImage>;

    /// Delete an image given its object name or its public URL
    async fn delete_image(&self, name_or_url: &str) -> CatalogResult<()>;

    /// Read back a stored image by object name
    async fn fetch_image(&self, name: &str) -> CatalogResult<StoredImage>;

    /// Public URL an object is served from
    fn public_url(&self, name: &ObjectName) -> String;
}
