use crate::domain::errors::ValidationError;

/// Opaque unique identifier of a product row
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProductId(String);

impl ProductId {
    const MAX_LEN: usize = 128;

    /// Create a ProductId from an identifier supplied by a caller
    pub fn new(value: String) -> Result<Self, ValidationError> {
        let value = value.trim().to_string();

        if value.is_empty() {
            return Err(ValidationError::EmptyProductId);
        }

        if value.len() > Self::MAX_LEN {
            return Err(ValidationError::ProductIdTooLong {
                actual: value.len(),
                max: Self::MAX_LEN,
            });
        }

        Ok(Self(value))
    }

    /// Generate a fresh identifier for a new row
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
