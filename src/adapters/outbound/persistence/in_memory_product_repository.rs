use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::{
    domain::{
        errors::CatalogResult,
        models::{Product, ProductFields},
        value_objects::ProductId,
    },
    ports::repositories::ProductRepository,
};

/// In-memory implementation of ProductRepository for testing and development
#[derive(Clone, Default)]
pub struct InMemoryProductRepository {
    // Kept in insertion order; listing walks it backwards
    products: Arc<RwLock<Vec<Product>>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn list_newest_first(&self) -> CatalogResult<Vec<Product>> {
        let products = self.products.read().await;
        Ok(products.iter().rev().cloned().collect())
    }

    async fn find_by_id(&self, id: &ProductId) -> CatalogResult<Option<Product>> {
        let products = self.products.read().await;
        Ok(products.iter().find(|p| &p.id == id).cloned())
    }

    async fn find_image_urls(&self, id: &ProductId) -> CatalogResult<Option<Vec<String>>> {
        let products = self.products.read().await;
        Ok(products
            .iter()
            .find(|p| &p.id == id)
            .map(|p| p.image_url.clone()))
    }

    async fn insert(&self, fields: &ProductFields) -> CatalogResult<Product> {
        let now = Utc::now();
        let product = Product {
            id: ProductId::generate(),
            name: fields.name.clone(),
            description: fields.description.clone(),
            size: fields.size.clone(),
            image_url: fields.image_url.clone(),
            price: fields.price,
            created_at: now,
            updated_at: now,
        };

        self.products.write().await.push(product.clone());
        Ok(product)
    }

    async fn update(
        &self,
        id: &ProductId,
        fields: &ProductFields,
    ) -> CatalogResult<Option<Product>> {
        let mut products = self.products.write().await;

        let Some(product) = products.iter_mut().find(|p| &p.id == id) else {
            return Ok(None);
        };

        product.name = fields.name.clone();
        product.description = fields.description.clone();
        product.size = fields.size.clone();
        product.image_url = fields.image_url.clone();
        product.price = fields.price;
        product.updated_at = Utc::now();

        Ok(Some(product.clone()))
    }

    async fn delete(&self, id: &ProductId) -> CatalogResult<bool> {
        let mut products = self.products.write().await;
        let before = products.len();
        products.retain(|p| &p.id != id);
        Ok(products.len() != before)
    }
}
