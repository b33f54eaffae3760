/// Validation errors for product fields and domain value objects
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    // Product field validation errors
    MissingName,
    MissingSize,
    MissingPrice,
    InvalidPrice(String),
    NonPositivePrice(i64),

    // ProductId validation errors
    EmptyProductId,
    ProductIdTooLong {
        actual: usize,
        max: usize,
    },

    // ObjectName validation errors
    EmptyObjectName,
    ObjectNameTooLong {
        actual: usize,
        max: usize,
    },
    InvalidObjectNameCharacter(char),

    // BucketName validation errors
    BucketNameLength {
        actual: usize,
        min: usize,
        max: usize,
    },
    BucketNameInvalidEdge,
    BucketNameInvalidCharacter(char),
    BucketNameConsecutiveHyphens,

    // Editing session errors
    ImageIndexOutOfRange {
        index: usize,
        len: usize,
    },
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::MissingName => write!(f, "Name is required"),
            ValidationError::MissingSize => write!(f, "Size is required"),
            ValidationError::MissingPrice => write!(f, "Price is required"),
            ValidationError::InvalidPrice(value) => {
                write!(f, "Price must be a whole number, got '{}'", value)
            }
            ValidationError::NonPositivePrice(value) => {
                write!(f, "Price must be greater than zero, got {}", value)
            }

            ValidationError::EmptyProductId => write!(f, "Product ID cannot be empty"),
            ValidationError::ProductIdTooLong { actual, max } => {
                write!(
                    f,
                    "Product ID too long: {} characters (max: {})",
                    actual, max
                )
            }

            ValidationError::EmptyObjectName => write!(f, "Object name cannot be empty"),
            ValidationError::ObjectNameTooLong { actual, max } => {
                write!(f, "Object name too long: {} bytes (max: {})", actual, max)
            }
            ValidationError::InvalidObjectNameCharacter(c) => {
                write!(f, "Invalid character in object name: '{}'", c.escape_default())
            }

            ValidationError::BucketNameLength { actual, min, max } => {
                write!(
                    f,
                    "Bucket name must be {}-{} characters long, got {}",
                    min, max, actual
                )
            }
            ValidationError::BucketNameInvalidEdge => {
                write!(
                    f,
                    "Bucket name must start and end with a lowercase letter or number"
                )
            }
            ValidationError::BucketNameInvalidCharacter(c) => {
                write!(
                    f,
                    "Invalid character in bucket name: '{}'. Only lowercase letters, numbers, and hyphens allowed",
                    c
                )
            }
            ValidationError::BucketNameConsecutiveHyphens => {
                write!(f, "Bucket name cannot contain consecutive hyphens")
            }

            ValidationError::ImageIndexOutOfRange { index, len } => {
                write!(
                    f,
                    "Image index {} out of range (form holds {} images)",
                    index, len
                )
            }
        }
    }
}

impl std::error::Error for ValidationError {}
