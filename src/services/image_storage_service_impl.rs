use async_trait::async_trait;
use futures::future::join_all;
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::{
    domain::{
        errors::{CatalogError, CatalogResult, StorageError},
        models::{ImageDeletionResult, ImageFile, StoredImage, UploadedImage},
        value_objects::ObjectName,
    },
    ports::{services::ImageStorageService, storage::ObjectStore},
};

const FALLBACK_EXTENSION: &str = "jpg";

/// Implementation of ImageStorageService on top of the bucket port
#[derive(Clone)]
pub struct ImageStorageServiceImpl {
    store: Arc<dyn ObjectStore>,
    public_base_url: String,
}

impl ImageStorageServiceImpl {
    /// Create a new ImageStorageServiceImpl serving objects below `public_base_url`
    pub fn new(store: Arc<dyn ObjectStore>, public_base_url: impl Into<String>) -> Self {
        Self {
            store,
            public_base_url: public_base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Unique name for an upload: a UUID plus the original file's extension
    fn generate_object_name(original_name: &str) -> CatalogResult<ObjectName> {
        let extension = original_name
            .rsplit_once('.')
            .map(|(_, ext)| ext)
            .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()))
            .unwrap_or(FALLBACK_EXTENSION);

        ObjectName::new(format!("{}.{}", uuid::Uuid::new_v4(), extension)).map_err(|e| {
            CatalogError::UploadFailed {
                message: format!("Invalid generated object name: {}", e),
            }
        })
    }

    fn content_type_for(name: &ObjectName) -> &'static str {
        match name.extension().map(|ext| ext.to_ascii_lowercase()).as_deref() {
            Some("jpg") | Some("jpeg") => "image/jpeg",
            Some("png") => "image/png",
            Some("gif") => "image/gif",
            Some("webp") => "image/webp",
            Some("svg") => "image/svg+xml",
            _ => "application/octet-stream",
        }
    }
}

#[async_trait]
impl ImageStorageService for ImageStorageServiceImpl {
    async fn upload_image(&self, file: ImageFile) -> CatalogResult<UploadedImage> {
        let object_name = Self::generate_object_name(&file.file_name)?;
        let content_type = Self::content_type_for(&object_name);
        let size = file.data.len();

        self.store
            .put_object(&object_name, file.data, content_type)
            .await
            .map_err(|e| {
                error!(file_name = %file.file_name, object = %object_name, error = %e, "Error uploading file");
                CatalogError::UploadFailed {
                    message: e.to_string(),
                }
            })?;

        let public_url = self.public_url(&object_name);
        info!(file_name = %file.file_name, object = %object_name, size, "Uploaded product image");

        Ok(UploadedImage {
            object_name,
            public_url,
        })
    }

    async fn delete_image(&self, name_or_url: &str) -> CatalogResult<()> {
        let object_name =
            ObjectName::from_name_or_url(name_or_url).map_err(|e| CatalogError::DeleteFailed {
                name: name_or_url.to_string(),
                message: e.to_string(),
            })?;

        match self.store.delete_object(&object_name).await {
            Ok(()) => {
                info!(object = %object_name, "Deleted product image");
                Ok(())
            }
            Err(StorageError::ObjectNotFound { .. }) => {
                warn!(object = %object_name, "Image already absent from storage");
                Ok(())
            }
            Err(e) => {
                error!(object = %object_name, error = %e, "Error deleting file");
                Err(CatalogError::DeleteFailed {
                    name: object_name.to_string(),
                    message: e.to_string(),
                })
            }
        }
    }

    async fn fetch_image(&self, name: &str) -> CatalogResult<StoredImage> {
        let object_name = ObjectName::new(name.to_string())?;

        match self.store.get_object(&object_name).await {
            Ok(image) => Ok(image),
            Err(StorageError::ObjectNotFound { .. }) => Err(CatalogError::ImageNotFound {
                name: object_name.to_string(),
            }),
            Err(e) => {
                error!(object = %object_name, error = %e, "Error fetching file");
                Err(CatalogError::FetchFailed {
                    name: object_name.to_string(),
                    message: e.to_string(),
                })
            }
        }
    }

    fn public_url(&self, name: &ObjectName) -> String {
        format!("{}/{}", self.public_base_url, name)
    }
}

/// Delete each URL as its own task and collect one result per URL.
///
/// Failures are logged and reported, never propagated.
pub async fn delete_images_concurrently(
    storage: &dyn ImageStorageService,
    urls: &[String],
) -> Vec<ImageDeletionResult> {
    let deletions = urls.iter().map(|url| async move {
        match storage.delete_image(url).await {
            Ok(()) => ImageDeletionResult::deleted(url.as_str()),
            Err(e) => {
                warn!(url = %url, error = %e, "Failed to delete image");
                ImageDeletionResult::failed(url.as_str(), e)
            }
        }
    });

    join_all(deletions).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::outbound::storage::ApacheObjectStoreAdapter;
    use object_store::memory::InMemory;

    const BASE_URL: &str = "https://cdn.example.com/product-images/";

    fn service() -> (ImageStorageServiceImpl, Arc<ApacheObjectStoreAdapter>) {
        let store = Arc::new(ApacheObjectStoreAdapter::new(Arc::new(InMemory::new())));
        (
            ImageStorageServiceImpl::new(store.clone(), BASE_URL),
            store,
        )
    }

    #[test]
    fn test_object_name_keeps_extension() {
        let name = ImageStorageServiceImpl::generate_object_name("photo.final.PNG").unwrap();
        assert_eq!(name.extension(), Some("PNG"));
        assert_eq!(name.as_str().len(), 36 + ".PNG".len());
    }

    #[test]
    fn test_object_name_falls_back_to_jpg() {
        for original in ["photo", "photo.", "weird.p/g", ""] {
            let name = ImageStorageServiceImpl::generate_object_name(original).unwrap();
            assert_eq!(name.extension(), Some("jpg"), "original: {:?}", original);
        }
    }

    #[test]
    fn test_content_types() {
        let ct = |n: &str| {
            ImageStorageServiceImpl::content_type_for(&ObjectName::new(n.to_string()).unwrap())
        };
        assert_eq!(ct("a.JPG"), "image/jpeg");
        assert_eq!(ct("a.png"), "image/png");
        assert_eq!(ct("a.bin"), "application/octet-stream");
    }

    #[tokio::test]
    async fn test_upload_returns_public_url() {
        let (service, store) = service();

        let uploaded = service
            .upload_image(ImageFile::new("shirt.png", b"png bytes".to_vec()))
            .await
            .unwrap();

        assert_eq!(
            uploaded.public_url,
            format!("https://cdn.example.com/product-images/{}", uploaded.object_name)
        );
        assert!(store.object_exists(&uploaded.object_name).await.unwrap());
    }

    #[tokio::test]
    async fn test_delete_accepts_url_or_name() {
        let (service, store) = service();

        let first = service
            .upload_image(ImageFile::new("a.png", b"a".to_vec()))
            .await
            .unwrap();
        let second = service
            .upload_image(ImageFile::new("b.png", b"b".to_vec()))
            .await
            .unwrap();

        service.delete_image(&first.public_url).await.unwrap();
        service
            .delete_image(second.object_name.as_str())
            .await
            .unwrap();

        assert!(!store.object_exists(&first.object_name).await.unwrap());
        assert!(!store.object_exists(&second.object_name).await.unwrap());
    }

    #[tokio::test]
    async fn test_second_delete_is_not_fatal() {
        let (service, _store) = service();

        let uploaded = service
            .upload_image(ImageFile::new("a.png", b"a".to_vec()))
            .await
            .unwrap();

        service.delete_image(&uploaded.public_url).await.unwrap();
        assert!(service.delete_image(&uploaded.public_url).await.is_ok());
    }

    #[tokio::test]
    async fn test_fetch_returns_stored_headers() {
        let (service, _store) = service();

        let uploaded = service
            .upload_image(ImageFile::new("a.webp", b"webp".to_vec()))
            .await
            .unwrap();

        let image = service
            .fetch_image(uploaded.object_name.as_str())
            .await
            .unwrap();
        assert_eq!(image.data.as_ref(), b"webp");
        assert_eq!(image.content_type.as_deref(), Some("image/webp"));

        service.delete_image(&uploaded.public_url).await.unwrap();
        let result = service.fetch_image(uploaded.object_name.as_str()).await;
        assert!(matches!(result, Err(CatalogError::ImageNotFound { .. })));
    }

    #[tokio::test]
    async fn test_delete_rejects_url_without_name() {
        let (service, _store) = service();

        let result = service.delete_image("https://cdn.example.com/").await;
        assert!(matches!(result, Err(CatalogError::DeleteFailed { .. })));
    }

    #[tokio::test]
    async fn test_concurrent_deletion_reports_each_url() {
        let (service, _store) = service();

        let uploaded = service
            .upload_image(ImageFile::new("a.png", b"a".to_vec()))
            .await
            .unwrap();
        let urls = vec![uploaded.public_url.clone(), "https://cdn.example.com/".to_string()];

        let results = delete_images_concurrently(&service, &urls).await;

        assert_eq!(results.len(), 2);
        assert_eq!(results[0], ImageDeletionResult::deleted(uploaded.public_url));
        assert!(!results[1].success);
        assert!(results[1].error.is_some());
    }
}
