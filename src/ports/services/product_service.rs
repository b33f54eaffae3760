use crate::domain::{
    errors::CatalogResult,
    models::{Product, ProductDeletion, ProductDraft},
    value_objects::ProductId,
};
use async_trait::async_trait;

/// Port for product catalog operations
/// This trait defines the business logic for products and the images they own
#[async_trait]
pub trait ProductService: Send + Sync + 'static {
    /// All products, newest first. A failed fetch yields an empty list.
    async fn list_products(&self) -> Vec<Product>;

    /// Get a product
    async fn get_product(&self, id: &ProductId) -> CatalogResult<Product>;

    /// Validate and create a product
    async fn create_product(&self, draft: ProductDraft) -> CatalogResult<Product>;

    /// Validate and update a product, purging images it no longer references
    async fn update_product(&self, id: &ProductId, draft: ProductDraft) -> CatalogResult<Product>;

    /// Delete a product and then each of its images
    async fn delete_product(&self, id: &ProductId) -> CatalogResult<ProductDeletion>;
}
