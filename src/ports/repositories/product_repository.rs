use crate::domain::{
    errors::CatalogResult,
    models::{Product, ProductFields},
    value_objects::ProductId,
};
use async_trait::async_trait;

/// Repository for the products table
/// Rows only; image objects are handled by the storage port
#[async_trait]
pub trait ProductRepository: Send + Sync + 'static {
    /// All products, most recently created first
    async fn list_newest_first(&self) -> CatalogResult<Vec<Product>>;

    /// Retrieve one product
    async fn find_by_id(&self, id: &ProductId) -> CatalogResult<Option<Product>>;

    /// The persisted image list of one product
    async fn find_image_urls(&self, id: &ProductId) -> CatalogResult<Option<Vec<String>>>;

    /// Insert a new row; the repository assigns id and timestamps
    async fn insert(&self, fields: &ProductFields) -> CatalogResult<Product>;

    /// Overwrite the fields of an existing row, returning `None` if absent
    async fn update(&self, id: &ProductId, fields: &ProductFields)
        -> CatalogResult<Option<Product>>;

    /// Delete a row, returning whether it existed
    async fn delete(&self, id: &ProductId) -> CatalogResult<bool>;
}
