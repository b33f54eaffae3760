use async_trait::async_trait;
use sqlx::{postgres::PgRow, PgPool, Row};

use crate::{
    domain::{
        errors::{CatalogError, CatalogResult},
        models::{Product, ProductFields},
        value_objects::ProductId,
    },
    ports::repositories::ProductRepository,
};

const PRODUCT_COLUMNS: &str =
    "id, name, description, size, price, image_url, created_at, updated_at";

/// SQL-based implementation of ProductRepository using PostgreSQL
#[derive(Clone)]
pub struct SqlProductRepository {
    pool: PgPool,
}

impl SqlProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Initialize database tables
    pub async fn migrate(&self) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS products (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                description TEXT,
                size TEXT NOT NULL,
                price BIGINT NOT NULL CHECK (price > 0),
                image_url TEXT[] NOT NULL DEFAULT '{}',
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_products_created_at ON products(created_at DESC)",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    fn product_from_row(row: &PgRow) -> CatalogResult<Product> {
        let id: String = row.try_get("id").map_err(db_error)?;

        Ok(Product {
            id: ProductId::new(id).map_err(|e| {
                CatalogError::persistence(format!("Stored product id is invalid: {}", e))
            })?,
            name: row.try_get("name").map_err(db_error)?,
            description: row.try_get("description").map_err(db_error)?,
            size: row.try_get("size").map_err(db_error)?,
            price: row.try_get("price").map_err(db_error)?,
            image_url: row.try_get("image_url").map_err(db_error)?,
            created_at: row.try_get("created_at").map_err(db_error)?,
            updated_at: row.try_get("updated_at").map_err(db_error)?,
        })
    }
}

fn db_error(e: sqlx::Error) -> CatalogError {
    CatalogError::persistence(format!("Database error: {}", e))
}

#[async_trait]
impl ProductRepository for SqlProductRepository {
    async fn list_newest_first(&self) -> CatalogResult<Vec<Product>> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM products ORDER BY created_at DESC",
            PRODUCT_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;

        rows.iter().map(Self::product_from_row).collect()
    }

    async fn find_by_id(&self, id: &ProductId) -> CatalogResult<Option<Product>> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM products WHERE id = $1",
            PRODUCT_COLUMNS
        ))
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?;

        row.as_ref().map(Self::product_from_row).transpose()
    }

    async fn find_image_urls(&self, id: &ProductId) -> CatalogResult<Option<Vec<String>>> {
        let row = sqlx::query("SELECT image_url FROM products WHERE id = $1")
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error)?;

        row.map(|row| row.try_get("image_url").map_err(db_error))
            .transpose()
    }

    async fn insert(&self, fields: &ProductFields) -> CatalogResult<Product> {
        let id = ProductId::generate();

        let row = sqlx::query(&format!(
            r#"
            INSERT INTO products (id, name, description, size, price, image_url)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {}
            "#,
            PRODUCT_COLUMNS
        ))
        .bind(id.as_str())
        .bind(&fields.name)
        .bind(&fields.description)
        .bind(&fields.size)
        .bind(fields.price)
        .bind(&fields.image_url)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error)?;

        Self::product_from_row(&row)
    }

    async fn update(
        &self,
        id: &ProductId,
        fields: &ProductFields,
    ) -> CatalogResult<Option<Product>> {
        let row = sqlx::query(&format!(
            r#"
            UPDATE products
            SET name = $2, description = $3, size = $4, price = $5,
                image_url = $6, updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            PRODUCT_COLUMNS
        ))
        .bind(id.as_str())
        .bind(&fields.name)
        .bind(&fields.description)
        .bind(&fields.size)
        .bind(fields.price)
        .bind(&fields.image_url)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?;

        row.as_ref().map(Self::product_from_row).transpose()
    }

    async fn delete(&self, id: &ProductId) -> CatalogResult<bool> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id.as_str())
            .execute(&self.pool)
            .await
            .map_err(db_error)?;

        Ok(result.rows_affected() > 0)
    }
}
