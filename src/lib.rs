pub mod adapters;
pub mod app;
pub mod domain;
pub mod ports;
pub mod services;

// Re-export key types for convenience

// Domain types - core business entities and value objects
pub use domain::{
    BucketName,
    // Errors
    CatalogError,
    CatalogResult,
    // Models
    EditingMode,
    EditingSession,
    ImageDeletionResult,
    ImageFile,
    // Value objects
    ObjectName,
    Product,
    ProductDraft,
    ProductFields,
    ProductId,
    StorageError,
    StoredImage,
    UploadProgress,
    UploadedImage,
    ValidationError,
};

// Port types - interfaces for external systems
pub use ports::{
    AuthenticatedUser, ImageStorageService, ObjectStore, ProductRepository,
    ProductService, SessionVerifier,
};

// Service implementations - business logic
pub use services::{
    ImageLifecycleCoordinator, ImageRemoval, ImageStorageServiceImpl, ProductServiceBuilder,
    ProductServiceImpl, RemovalAction, TemporaryRemovalPolicy,
};

// Application factory and configuration
pub use app::{
    AppBuilder, AppConfig, AppDependencies, AppError, AppServices, DEFAULT_PUBLIC_BASE_URL,
    RepositoryBackend, StorageBackend, config_from_env, create_app_from_env, create_in_memory_app,
};

// Adapter types - infrastructure implementations
pub use adapters::{
    inbound::http::{AppState, SessionRegistry, create_router},
    outbound::{
        auth::StaticTokenVerifier,
        persistence::{InMemoryProductRepository, SqlProductRepository},
        storage::{ApacheObjectStoreAdapter, S3Settings},
    },
};

// Public facade for easy construction
pub mod prelude {
    pub use crate::{
        AppBuilder, AppServices, CatalogError, EditingSession, ImageFile,
        ImageLifecycleCoordinator, ImageStorageService, Product, ProductDraft, ProductId,
        ProductService, TemporaryRemovalPolicy, create_in_memory_app, create_router,
    };
}
