use chrono::{DateTime, Utc};

use crate::domain::{errors::ValidationError, value_objects::ProductId};

/// A product row as persisted in the catalog
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: Option<String>,
    pub size: String,
    /// Public URLs of the product's images, in display order
    pub image_url: Vec<String>,
    pub price: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Raw form input for creating or updating a product
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductDraft {
    pub name: String,
    pub description: Option<String>,
    pub size: String,
    pub price: String,
    pub image_url: Vec<String>,
}

impl ProductDraft {
    pub fn new(name: impl Into<String>, size: impl Into<String>, price: impl ToString) -> Self {
        Self {
            name: name.into(),
            size: size.into(),
            price: price.to_string(),
            ..Default::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_images(mut self, image_url: Vec<String>) -> Self {
        self.image_url = image_url;
        self
    }

    /// Validate the draft, collecting every field error rather than stopping
    /// at the first one.
    pub fn validate(self) -> Result<ProductFields, Vec<ValidationError>> {
        let mut errors = Vec::new();

        let name = self.name.trim().to_string();
        if name.is_empty() {
            errors.push(ValidationError::MissingName);
        }

        let size = self.size.trim().to_string();
        if size.is_empty() {
            errors.push(ValidationError::MissingSize);
        }

        let price = match parse_price(&self.price) {
            Ok(price) => price,
            Err(e) => {
                errors.push(e);
                0
            }
        };

        if !errors.is_empty() {
            return Err(errors);
        }

        let description = self
            .description
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());

        let image_url = self
            .image_url
            .into_iter()
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty())
            .collect();

        Ok(ProductFields {
            name,
            description,
            size,
            price,
            image_url,
        })
    }
}

fn parse_price(raw: &str) -> Result<i64, ValidationError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ValidationError::MissingPrice);
    }

    let price: i64 = raw
        .parse()
        .map_err(|_| ValidationError::InvalidPrice(raw.to_string()))?;

    if price <= 0 {
        return Err(ValidationError::NonPositivePrice(price));
    }

    Ok(price)
}

/// Validated product fields ready to be written to the products table
#[derive(Debug, Clone, PartialEq)]
pub struct ProductFields {
    pub name: String,
    pub description: Option<String>,
    pub size: String,
    pub price: i64,
    pub image_url: Vec<String>,
}

/// Outcome of deleting a product row and its images
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDeletion {
    pub id: ProductId,
    pub deleted_images: Vec<super::ImageDeletionResult>,
}

/// Images present in `committed` that no longer appear in `retained`.
///
/// Comparison is by URL equality; the order of `committed` is preserved.
pub fn removed_images(committed: &[String], retained: &[String]) -> Vec<String> {
    committed
        .iter()
        .filter(|url| !retained.contains(url))
        .cloned()
        .collect()
}
