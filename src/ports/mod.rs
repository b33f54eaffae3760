pub mod auth;
pub mod repositories;
pub mod services;
pub mod storage;

// Re-export all port traits for convenience
pub use auth::{AuthenticatedUser, SessionVerifier};
pub use repositories::ProductRepository;
pub use services::{ImageStorageService, ProductService};
pub use storage::ObjectStore;
