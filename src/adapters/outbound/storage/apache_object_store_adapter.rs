use async_trait::async_trait;
use bytes::Bytes;
use object_store::{
    aws::AmazonS3Builder, path::Path as ObjectPath, Attribute, Attributes,
    ObjectStore as ApacheObjectStore, PutMode, PutOptions, PutPayload,
};
use std::sync::Arc;

use super::error::{storage_error, StoreError};
use crate::{
    domain::{
        errors::StorageResult,
        models::StoredImage,
        value_objects::{BucketName, ObjectName},
    },
    ports::storage::ObjectStore,
};

const CACHE_CONTROL: &str = "max-age=3600";

/// Connection settings for an S3-compatible bucket
#[derive(Debug, Clone)]
pub struct S3Settings {
    pub bucket: BucketName,
    pub region: String,
    pub endpoint: Option<String>,
    pub access_key: Option<String>,
    pub secret_key: Option<String>,
    pub allow_http: bool,
}

/// Adapter that implements our ObjectStore trait using Apache object_store
#[derive(Clone)]
pub struct ApacheObjectStoreAdapter {
    inner: Arc<dyn ApacheObjectStore>,
}

impl ApacheObjectStoreAdapter {
    pub fn new(store: Arc<dyn ApacheObjectStore>) -> Self {
        Self { inner: store }
    }

    /// Connect to an S3-compatible bucket
    pub fn s3(settings: &S3Settings) -> Result<Self, StoreError> {
        let mut builder = AmazonS3Builder::new()
            .with_bucket_name(settings.bucket.as_str())
            .with_region(&settings.region);

        if let Some(endpoint) = &settings.endpoint {
            builder = builder
                .with_endpoint(endpoint)
                .with_allow_http(settings.allow_http);
        }

        match (&settings.access_key, &settings.secret_key) {
            (Some(access_key), Some(secret_key)) => {
                builder = builder
                    .with_access_key_id(access_key)
                    .with_secret_access_key(secret_key);
            }
            (None, None) => {}
            _ => {
                return Err(StoreError::Configuration(
                    "access key and secret key must be set together".to_string(),
                ));
            }
        }

        Ok(Self::new(Arc::new(builder.build()?)))
    }

    fn path(name: &ObjectName) -> ObjectPath {
        ObjectPath::from(name.as_str())
    }
}

fn attribute(attributes: &Attributes, key: &Attribute) -> Option<String> {
    attributes.get(key).map(|value| {
        let value: &str = value.as_ref();
        value.to_string()
    })
}

#[async_trait]
impl ObjectStore for ApacheObjectStoreAdapter {
    async fn put_object(
        &self,
        name: &ObjectName,
        data: Bytes,
        content_type: &str,
    ) -> StorageResult<()> {
        let mut attributes = Attributes::new();
        attributes.insert(Attribute::ContentType, content_type.to_string().into());
        attributes.insert(Attribute::CacheControl, CACHE_CONTROL.into());

        let options = PutOptions {
            mode: PutMode::Create,
            attributes,
            ..Default::default()
        };

        self.inner
            .put_opts(&Self::path(name), PutPayload::from(data), options)
            .await
            .map_err(|e| storage_error(e, name))?;

        Ok(())
    }

    async fn get_object(&self, name: &ObjectName) -> StorageResult<StoredImage> {
        let result = self
            .inner
            .get(&Self::path(name))
            .await
            .map_err(|e| storage_error(e, name))?;

        let content_type = attribute(&result.attributes, &Attribute::ContentType);
        let cache_control = attribute(&result.attributes, &Attribute::CacheControl);
        let data = result.bytes().await.map_err(|e| storage_error(e, name))?;

        Ok(StoredImage {
            data,
            content_type,
            cache_control,
        })
    }

    async fn delete_object(&self, name: &ObjectName) -> StorageResult<()> {
        self.inner
            .delete(&Self::path(name))
            .await
            .map_err(|e| storage_error(e, name))
    }

    async fn object_exists(&self, name: &ObjectName) -> StorageResult<bool> {
        match self.inner.head(&Self::path(name)).await {
            Ok(_) => Ok(true),
            Err(object_store::Error::NotFound { .. }) => Ok(false),
            Err(e) => Err(storage_error(e, name)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::StorageError;
    use object_store::memory::InMemory;

    fn name(value: &str) -> ObjectName {
        ObjectName::new(value.to_string()).unwrap()
    }

    #[tokio::test]
    async fn test_basic_object_operations() {
        let adapter = ApacheObjectStoreAdapter::new(Arc::new(InMemory::new()));
        let key = name("a.png");

        adapter
            .put_object(&key, Bytes::from_static(b"png"), "image/png")
            .await
            .unwrap();
        assert!(adapter.object_exists(&key).await.unwrap());

        let stored = adapter.get_object(&key).await.unwrap();
        assert_eq!(stored.data.as_ref(), b"png");
        assert_eq!(stored.content_type.as_deref(), Some("image/png"));
        assert_eq!(stored.cache_control.as_deref(), Some("max-age=3600"));

        adapter.delete_object(&key).await.unwrap();
        assert!(!adapter.object_exists(&key).await.unwrap());
        assert!(matches!(
            adapter.get_object(&key).await,
            Err(StorageError::ObjectNotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_put_never_overwrites() {
        let inner = Arc::new(InMemory::new());
        let adapter = ApacheObjectStoreAdapter::new(inner.clone());
        let key = name("taken.png");

        adapter
            .put_object(&key, Bytes::from_static(b"first"), "image/png")
            .await
            .unwrap();
        let result = adapter
            .put_object(&key, Bytes::from_static(b"second"), "image/png")
            .await;
        assert!(matches!(result, Err(StorageError::ObjectAlreadyExists { .. })));

        let stored = inner
            .get(&ObjectPath::from("taken.png"))
            .await
            .unwrap()
            .bytes()
            .await
            .unwrap();
        assert_eq!(stored.as_ref(), b"first");
    }

    #[test]
    fn test_s3_requires_both_credentials() {
        let settings = S3Settings {
            bucket: BucketName::default(),
            region: "us-east-1".to_string(),
            endpoint: None,
            access_key: Some("key".to_string()),
            secret_key: None,
            allow_http: false,
        };
        assert!(matches!(
            ApacheObjectStoreAdapter::s3(&settings),
            Err(StoreError::Configuration(_))
        ));
    }
}
