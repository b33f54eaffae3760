use async_trait::async_trait;
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::{
    domain::{
        errors::{CatalogError, CatalogResult},
        models::{removed_images, Product, ProductDeletion, ProductDraft, ProductFields},
        value_objects::ProductId,
    },
    ports::{
        repositories::ProductRepository,
        services::{ImageStorageService, ProductService},
    },
    services::image_storage_service_impl::delete_images_concurrently,
};

/// Implementation of ProductService keeping product rows and their stored
/// images consistent
#[derive(Clone)]
pub struct ProductServiceImpl {
    repository: Arc<dyn ProductRepository>,
    storage: Arc<dyn ImageStorageService>,
}

impl ProductServiceImpl {
    /// Create a new ProductServiceImpl instance
    pub fn new(repository: Arc<dyn ProductRepository>, storage: Arc<dyn ImageStorageService>) -> Self {
        Self {
            repository,
            storage,
        }
    }

    async fn committed_images(&self, id: &ProductId) -> CatalogResult<Vec<String>> {
        self.repository
            .find_image_urls(id)
            .await?
            .ok_or_else(|| CatalogError::NotFound { id: id.clone() })
    }

    fn validate(draft: ProductDraft) -> CatalogResult<ProductFields> {
        draft
            .validate()
            .map_err(|errors| CatalogError::ValidationFailed { errors })
    }
}

#[async_trait]
impl ProductService for ProductServiceImpl {
    async fn list_products(&self) -> Vec<Product> {
        // A failed fetch is indistinguishable from an empty catalog to callers.
        match self.repository.list_newest_first().await {
            Ok(products) => products,
            Err(e) => {
                error!(error = %e, "Error fetching products");
                Vec::new()
            }
        }
    }

    async fn get_product(&self, id: &ProductId) -> CatalogResult<Product> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| CatalogError::NotFound { id: id.clone() })
    }

    async fn create_product(&self, draft: ProductDraft) -> CatalogResult<Product> {
        let fields = Self::validate(draft)?;

        let product = self.repository.insert(&fields).await.map_err(|e| {
            error!(error = %e, "Error creating product");
            e
        })?;

        info!(
            id = %product.id,
            name = %product.name,
            images = product.image_url.len(),
            "Created product"
        );
        Ok(product)
    }

    async fn update_product(&self, id: &ProductId, draft: ProductDraft) -> CatalogResult<Product> {
        let fields = Self::validate(draft)?;

        let committed = self.committed_images(id).await?;
        let removed = removed_images(&committed, &fields.image_url);

        let product = self
            .repository
            .update(id, &fields)
            .await
            .map_err(|e| {
                error!(id = %id, error = %e, "Error updating product");
                e
            })?
            .ok_or_else(|| CatalogError::NotFound { id: id.clone() })?;

        // The row is saved; image cleanup can no longer fail the update.
        for url in &removed {
            if let Err(e) = self.storage.delete_image(url).await {
                warn!(id = %id, url = %url, error = %e, "Failed to delete removed image");
            }
        }

        info!(
            id = %product.id,
            images = product.image_url.len(),
            removed = removed.len(),
            "Updated product"
        );
        Ok(product)
    }

    async fn delete_product(&self, id: &ProductId) -> CatalogResult<ProductDeletion> {
        let images = self.committed_images(id).await?;

        let existed = self.repository.delete(id).await.map_err(|e| {
            error!(id = %id, error = %e, "Error deleting product");
            e
        })?;
        if !existed {
            return Err(CatalogError::NotFound { id: id.clone() });
        }

        let deleted_images = delete_images_concurrently(self.storage.as_ref(), &images).await;

        let failed = deleted_images.iter().filter(|r| !r.success).count();
        info!(
            id = %id,
            images = deleted_images.len(),
            failed,
            "Deleted product"
        );

        Ok(ProductDeletion {
            id: id.clone(),
            deleted_images,
        })
    }
}

/// Builder for ProductServiceImpl
#[derive(Default)]
pub struct ProductServiceBuilder {
    repository: Option<Arc<dyn ProductRepository>>,
    storage: Option<Arc<dyn ImageStorageService>>,
}

impl ProductServiceBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn repository(mut self, repository: Arc<dyn ProductRepository>) -> Self {
        self.repository = Some(repository);
        self
    }

    pub fn storage(mut self, storage: Arc<dyn ImageStorageService>) -> Self {
        self.storage = Some(storage);
        self
    }

    pub fn build(self) -> Result<ProductServiceImpl, &'static str> {
        let repository = self.repository.ok_or("Repository is required")?;
        let storage = self.storage.ok_or("Image storage is required")?;

        Ok(ProductServiceImpl::new(repository, storage))
    }
}
