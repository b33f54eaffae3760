use axum::Router;
use object_store::memory::InMemory;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tracing::info;

use crate::{
    adapters::{
        inbound::http::{AppState, SessionRegistry, create_router},
        outbound::{
            auth::StaticTokenVerifier,
            persistence::{InMemoryProductRepository, SqlProductRepository},
            storage::{ApacheObjectStoreAdapter, S3Settings},
        },
    },
    domain::value_objects::BucketName,
    ports::{
        auth::SessionVerifier,
        repositories::ProductRepository,
        services::{ImageStorageService, ProductService},
        storage::ObjectStore,
    },
    services::{
        ImageLifecycleCoordinator, ImageStorageServiceImpl, ProductServiceImpl,
        TemporaryRemovalPolicy,
    },
};

/// Image URLs resolve against this server's own image route by default
pub const DEFAULT_PUBLIC_BASE_URL: &str = "http://localhost:3000/storage/product-images";
pub const DEFAULT_SIGN_IN_PATH: &str = "/sign-in";

/// Configuration for the application
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub storage_backend: StorageBackend,
    pub repository_backend: RepositoryBackend,
    /// Prefix of every image URL handed to clients
    pub public_base_url: String,
    pub temporary_removal: TemporaryRemovalPolicy,
    /// `subject:token` entries accepted by the static verifier
    pub auth_tokens: Vec<String>,
    pub sign_in_path: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage_backend: StorageBackend::InMemory,
            repository_backend: RepositoryBackend::InMemory,
            public_base_url: DEFAULT_PUBLIC_BASE_URL.to_string(),
            temporary_removal: TemporaryRemovalPolicy::default(),
            auth_tokens: Vec::new(),
            sign_in_path: DEFAULT_SIGN_IN_PATH.to_string(),
        }
    }
}

/// Storage backend configuration
#[derive(Debug, Clone)]
pub enum StorageBackend {
    InMemory,
    S3(S3Settings),
}

/// Repository backend configuration
#[derive(Debug, Clone)]
pub enum RepositoryBackend {
    InMemory,
    Database { connection_string: String },
}

/// Application dependencies container
pub struct AppDependencies {
    pub object_store: Arc<dyn ObjectStore>,
    pub product_repository: Arc<dyn ProductRepository>,
    pub verifier: Arc<dyn SessionVerifier>,
}

/// Application services container
#[derive(Clone)]
pub struct AppServices {
    pub product_service: Arc<dyn ProductService>,
    pub image_service: Arc<dyn ImageStorageService>,
    pub coordinator: Arc<ImageLifecycleCoordinator>,
    pub verifier: Arc<dyn SessionVerifier>,
    pub sign_in_path: String,
}

impl AppServices {
    /// Router state with a fresh session registry
    pub fn into_state(self) -> AppState {
        AppState {
            product_service: self.product_service,
            image_service: self.image_service,
            coordinator: self.coordinator,
            sessions: SessionRegistry::new(),
            verifier: self.verifier,
            sign_in_path: self.sign_in_path,
        }
    }

    pub fn into_router(self) -> Router {
        create_router(self.into_state())
    }
}

/// Application builder for dependency injection
pub struct AppBuilder {
    config: AppConfig,
}

impl AppBuilder {
    /// Create a new application builder
    pub fn new() -> Self {
        Self {
            config: AppConfig::default(),
        }
    }

    /// Configure the application with custom settings
    pub fn with_config(mut self, config: AppConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_storage_backend(mut self, backend: StorageBackend) -> Self {
        self.config.storage_backend = backend;
        self
    }

    pub fn with_repository_backend(mut self, backend: RepositoryBackend) -> Self {
        self.config.repository_backend = backend;
        self
    }

    pub fn with_public_base_url(mut self, url: impl Into<String>) -> Self {
        self.config.public_base_url = url.into();
        self
    }

    pub fn with_temporary_removal(mut self, policy: TemporaryRemovalPolicy) -> Self {
        self.config.temporary_removal = policy;
        self
    }

    pub fn with_auth_tokens<I, S>(mut self, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.auth_tokens = tokens.into_iter().map(Into::into).collect();
        self
    }

    /// Build the application dependencies
    pub async fn build_dependencies(&self) -> Result<AppDependencies, AppError> {
        let object_store = self.create_object_store()?;
        let product_repository = self.create_repository().await?;

        let verifier = StaticTokenVerifier::new(&self.config.auth_tokens);
        if verifier.is_empty() {
            tracing::warn!("No auth tokens configured; every /api request will be rejected");
        }

        Ok(AppDependencies {
            object_store,
            product_repository,
            verifier: Arc::new(verifier),
        })
    }

    /// Build the complete application with services
    pub async fn build(self) -> Result<AppServices, AppError> {
        let deps = self.build_dependencies().await?;

        let image_service: Arc<dyn ImageStorageService> = Arc::new(ImageStorageServiceImpl::new(
            deps.object_store,
            self.config.public_base_url.clone(),
        ));

        let product_service = Arc::new(ProductServiceImpl::new(
            deps.product_repository,
            image_service.clone(),
        ));

        let coordinator = Arc::new(
            ImageLifecycleCoordinator::new(image_service.clone())
                .with_temporary_removal(self.config.temporary_removal),
        );

        info!(
            public_base_url = %self.config.public_base_url,
            temporary_removal = ?self.config.temporary_removal,
            "Application services ready"
        );

        Ok(AppServices {
            product_service,
            image_service,
            coordinator,
            verifier: deps.verifier,
            sign_in_path: self.config.sign_in_path,
        })
    }

    fn create_object_store(&self) -> Result<Arc<dyn ObjectStore>, AppError> {
        match &self.config.storage_backend {
            StorageBackend::InMemory => Ok(Arc::new(ApacheObjectStoreAdapter::new(Arc::new(
                InMemory::new(),
            )))),
            StorageBackend::S3(settings) => {
                let adapter =
                    ApacheObjectStoreAdapter::s3(settings).map_err(|e| AppError::StorageInit {
                        message: e.to_string(),
                    })?;
                info!(bucket = %settings.bucket, region = %settings.region, "Using S3 storage");
                Ok(Arc::new(adapter))
            }
        }
    }

    async fn create_repository(&self) -> Result<Arc<dyn ProductRepository>, AppError> {
        match &self.config.repository_backend {
            RepositoryBackend::InMemory => Ok(Arc::new(InMemoryProductRepository::new())),
            RepositoryBackend::Database { connection_string } => {
                let pool = PgPoolOptions::new()
                    .connect(connection_string)
                    .await
                    .map_err(|e| AppError::RepositoryInit {
                        message: format!("Failed to connect to database: {}", e),
                    })?;

                let repository = SqlProductRepository::new(pool);
                repository
                    .migrate()
                    .await
                    .map_err(|e| AppError::RepositoryInit {
                        message: format!("Failed to migrate products table: {}", e),
                    })?;

                Ok(Arc::new(repository))
            }
        }
    }
}

impl Default for AppBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Application-level errors
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Storage initialization error: {message}")]
    StorageInit { message: String },

    #[error("Repository initialization error: {message}")]
    RepositoryInit { message: String },
}

/// Create an in-memory application for testing and development
pub async fn create_in_memory_app() -> Result<AppServices, AppError> {
    AppBuilder::new()
        .with_storage_backend(StorageBackend::InMemory)
        .with_repository_backend(RepositoryBackend::InMemory)
        .build()
        .await
}

fn required_env(name: &str) -> Result<String, AppError> {
    std::env::var(name).map_err(|_| AppError::Configuration {
        message: format!("{} environment variable required", name),
    })
}

/// Read the application configuration from environment variables
pub fn config_from_env() -> Result<AppConfig, AppError> {
    let storage_backend = match std::env::var("STORAGE_BACKEND").as_deref() {
        Ok("s3") => {
            let bucket = match std::env::var("S3_BUCKET") {
                Ok(name) => BucketName::new(name).map_err(|e| AppError::Configuration {
                    message: format!("Invalid S3_BUCKET: {}", e),
                })?,
                Err(_) => BucketName::product_images(),
            };

            StorageBackend::S3(S3Settings {
                bucket,
                region: required_env("S3_REGION")?,
                endpoint: std::env::var("S3_ENDPOINT").ok(),
                access_key: std::env::var("S3_ACCESS_KEY").ok(),
                secret_key: std::env::var("S3_SECRET_KEY").ok(),
                allow_http: std::env::var("S3_ALLOW_HTTP")
                    .map(|v| v.eq_ignore_ascii_case("true"))
                    .unwrap_or(false),
            })
        }
        Ok("memory") | Err(_) => StorageBackend::InMemory,
        Ok(other) => {
            return Err(AppError::Configuration {
                message: format!("Unknown STORAGE_BACKEND: {}", other),
            });
        }
    };

    let repository_backend = match std::env::var("REPOSITORY_BACKEND").as_deref() {
        Ok("database") => RepositoryBackend::Database {
            connection_string: required_env("DATABASE_URL")?,
        },
        Ok("memory") | Err(_) => RepositoryBackend::InMemory,
        Ok(other) => {
            return Err(AppError::Configuration {
                message: format!("Unknown REPOSITORY_BACKEND: {}", other),
            });
        }
    };

    let temporary_removal = match std::env::var("TEMPORARY_IMAGE_REMOVAL") {
        Ok(value) => value
            .parse()
            .map_err(|message| AppError::Configuration { message })?,
        Err(_) => TemporaryRemovalPolicy::default(),
    };

    let defaults = AppConfig::default();
    Ok(AppConfig {
        storage_backend,
        repository_backend,
        public_base_url: std::env::var("PUBLIC_BASE_URL").unwrap_or(defaults.public_base_url),
        temporary_removal,
        auth_tokens: std::env::var("AUTH_TOKENS")
            .map(|list| list.split(',').map(str::to_string).collect())
            .unwrap_or_default(),
        sign_in_path: std::env::var("SIGN_IN_PATH").unwrap_or(defaults.sign_in_path),
    })
}

/// Create application from environment variables
pub async fn create_app_from_env() -> Result<AppServices, AppError> {
    AppBuilder::new()
        .with_config(config_from_env()?)
        .build()
        .await
}
