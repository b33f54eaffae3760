use anyhow::{Context, Result};
use clap::Parser;
use product_catalog_server::{
    app::{AppBuilder, AppConfig, DEFAULT_PUBLIC_BASE_URL, RepositoryBackend, StorageBackend},
    adapters::outbound::storage::S3Settings,
    domain::value_objects::BucketName,
    services::TemporaryRemovalPolicy,
};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "product-catalog-server")]
#[command(about = "Admin API for a product catalog and its images", long_about = None)]
struct Cli {
    /// Server port to listen on
    #[arg(short, long, env = "SERVER_PORT", default_value = "3000")]
    port: u16,

    /// Server host to bind to
    #[arg(long, env = "SERVER_HOST", default_value = "0.0.0.0")]
    host: String,

    /// Storage backend type (memory or s3)
    #[arg(long, env = "STORAGE_BACKEND", default_value = "memory")]
    storage_backend: String,

    /// Repository backend type (memory or database)
    #[arg(long, env = "REPOSITORY_BACKEND", default_value = "memory")]
    repository_backend: String,

    /// S3-compatible endpoint URL
    #[arg(long, env = "S3_ENDPOINT")]
    s3_endpoint: Option<String>,

    /// Bucket holding product images
    #[arg(long, env = "S3_BUCKET", default_value = "product-images")]
    s3_bucket: String,

    /// S3 region
    #[arg(long, env = "S3_REGION", default_value = "us-east-1")]
    s3_region: String,

    /// S3 access key
    #[arg(long, env = "S3_ACCESS_KEY")]
    s3_access_key: Option<String>,

    /// S3 secret key
    #[arg(long, env = "S3_SECRET_KEY")]
    s3_secret_key: Option<String>,

    /// Allow plain HTTP to the S3 endpoint
    #[arg(long, env = "S3_ALLOW_HTTP", default_value = "false")]
    s3_allow_http: bool,

    /// Database URL for repository backend (PostgreSQL)
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,

    /// Public URL prefix of stored images
    #[arg(long, env = "PUBLIC_BASE_URL", default_value = DEFAULT_PUBLIC_BASE_URL)]
    public_base_url: String,

    /// What removing a just-uploaded image does: untrack or delete
    #[arg(long, env = "TEMPORARY_IMAGE_REMOVAL", default_value = "untrack")]
    temporary_image_removal: TemporaryRemovalPolicy,

    /// Comma separated `subject:token` entries accepted as sessions
    #[arg(long, env = "AUTH_TOKENS", value_delimiter = ',')]
    auth_tokens: Vec<String>,

    /// Where browsers without a session are redirected
    #[arg(long, env = "SIGN_IN_PATH", default_value = "/sign-in")]
    sign_in_path: String,

    /// Log level
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    log_level: String,
}

impl Cli {
    fn to_app_config(&self) -> Result<AppConfig> {
        let storage_backend = match self.storage_backend.as_str() {
            "memory" => StorageBackend::InMemory,
            "s3" => {
                let bucket = BucketName::new(self.s3_bucket.clone())
                    .map_err(|e| anyhow::anyhow!("Invalid S3_BUCKET: {}", e))?;

                StorageBackend::S3(S3Settings {
                    bucket,
                    region: self.s3_region.clone(),
                    endpoint: self.s3_endpoint.clone(),
                    access_key: self.s3_access_key.clone(),
                    secret_key: self.s3_secret_key.clone(),
                    allow_http: self.s3_allow_http,
                })
            }
            _ => anyhow::bail!("Unknown storage backend: {}", self.storage_backend),
        };

        let repository_backend = match self.repository_backend.as_str() {
            "memory" => RepositoryBackend::InMemory,
            "database" | "db" => {
                let connection_string = self
                    .database_url
                    .clone()
                    .context("DATABASE_URL is required for database backend")?;
                RepositoryBackend::Database { connection_string }
            }
            _ => anyhow::bail!("Unknown repository backend: {}", self.repository_backend),
        };

        Ok(AppConfig {
            storage_backend,
            repository_backend,
            public_base_url: self.public_base_url.clone(),
            temporary_removal: self.temporary_image_removal,
            auth_tokens: self.auth_tokens.clone(),
            sign_in_path: self.sign_in_path.clone(),
        })
    }

    fn init_logging(&self) -> Result<()> {
        let env_filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(&self.log_level))
            .context("Invalid log level")?;

        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .try_init()
            .context("Failed to initialize logging")?;

        Ok(())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    cli.init_logging()?;

    info!("Starting product catalog server");
    info!("Storage backend: {}", cli.storage_backend);
    info!("Repository backend: {}", cli.repository_backend);

    let config = cli.to_app_config()?;

    let app_services = AppBuilder::new()
        .with_config(config)
        .build()
        .await
        .context("Failed to build application")?;

    let router = app_services.into_router();

    let addr: SocketAddr = format!("{}:{}", cli.host, cli.port).parse()?;
    let listener = TcpListener::bind(addr).await?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, router)
        .await
        .context("Failed to start server")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::parse_from([
            "product-catalog-server",
            "--port",
            "8080",
            "--storage-backend",
            "s3",
            "--s3-bucket",
            "catalog-images",
            "--auth-tokens",
            "alice:one,two",
            "--temporary-image-removal",
            "delete",
        ]);

        assert_eq!(cli.port, 8080);
        assert_eq!(cli.storage_backend, "s3");
        assert_eq!(cli.auth_tokens, vec!["alice:one", "two"]);
        assert_eq!(cli.temporary_image_removal, TemporaryRemovalPolicy::Delete);

        let config = cli.to_app_config().unwrap();
        match config.storage_backend {
            StorageBackend::S3(settings) => assert_eq!(settings.bucket.as_str(), "catalog-images"),
            _ => panic!("Expected S3 backend"),
        }
    }

    #[test]
    fn test_memory_config() {
        let cli = Cli::parse_from(["product-catalog-server"]);

        let config = cli.to_app_config().unwrap();
        assert!(matches!(config.storage_backend, StorageBackend::InMemory));
        assert!(matches!(config.repository_backend, RepositoryBackend::InMemory));
        assert_eq!(config.temporary_removal, TemporaryRemovalPolicy::Untrack);
    }

    #[test]
    fn test_database_requires_url() {
        let cli = Cli::parse_from([
            "product-catalog-server",
            "--repository-backend",
            "database",
        ]);
        // DATABASE_URL may be set in the environment running the tests
        if cli.database_url.is_none() {
            assert!(cli.to_app_config().is_err());
        }
    }
}
