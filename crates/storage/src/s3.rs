use crate::backend::{BackendFactory, ObjectBackend, PutRequest};
use crate::StorageError;
use aws_config::retry::RetryConfig;
use aws_config::timeout::TimeoutConfig;
use aws_config::{BehaviorVersion, Region};
use aws_credential_types::Credentials;
use aws_sdk_s3::error::{DisplayErrorContext, ProvideErrorMetadata};
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::{ObjectCannedAcl, StorageClass};
use aws_sdk_s3::Client;
use mediastore_config::StorageSettings;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Semaphore, SemaphorePermit};

/// S3-compatible storage backend
/// Compatible with: AWS S3, MinIO, Cloudflare R2, DigitalOcean Spaces, etc.
pub struct S3Backend {
    client: Client,
    permits: Semaphore,
}

/// Builds [`S3Backend`] handles for the storage client
#[derive(Debug, Clone, Copy, Default)]
pub struct S3BackendFactory;

#[async_trait::async_trait]
impl BackendFactory for S3BackendFactory {
    async fn build(&self, settings: &StorageSettings) -> Result<Arc<dyn ObjectBackend>, StorageError> {
        let backend = S3Backend::new(settings).await?;
        Ok(Arc::new(backend))
    }
}

/// How endpoint, region and credentials end up configured on the client
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ClientPlan {
    /// Custom endpoint bound to a region
    pub endpoint: Option<(String, String)>,
    /// Plain region, only when no custom endpoint is used
    pub region: Option<String>,
    pub static_credentials: Option<(String, String)>,
    pub connect_timeout: Duration,
    pub max_attempts: u32,
    pub max_connections: usize,
}

impl ClientPlan {
    pub(crate) fn from_settings(settings: &StorageSettings) -> Self {
        // An endpoint without a region is ignored
        let endpoint = match (settings.endpoint(), settings.region()) {
            (Some(endpoint), Some(region)) => Some((endpoint.to_string(), region.to_string())),
            _ => None,
        };

        let static_credentials = settings
            .access_key()
            .map(|key| (key.to_string(), settings.secret_key().to_string()));

        let region = if endpoint.is_none() {
            settings.region().map(str::to_string)
        } else {
            None
        };

        Self {
            endpoint,
            region,
            static_credentials,
            connect_timeout: Duration::from_millis(settings.transport.connect_timeout_ms),
            max_attempts: settings.transport.max_retries.saturating_add(1),
            max_connections: settings.transport.max_connections.max(1),
        }
    }
}

impl S3Backend {
    pub async fn new(settings: &StorageSettings) -> Result<Self, StorageError> {
        let plan = ClientPlan::from_settings(settings);

        let mut loader = aws_config::defaults(BehaviorVersion::latest());

        if let Some((endpoint, region)) = &plan.endpoint {
            loader = loader
                .endpoint_url(endpoint.clone())
                .region(Region::new(region.clone()));
        }

        if let Some((access_key, secret_key)) = &plan.static_credentials {
            let credentials = Credentials::new(
                access_key.clone(),
                secret_key.clone(),
                None,
                None,
                "mediastore-static",
            );
            loader = loader.credentials_provider(credentials);
        }

        if let Some(region) = &plan.region {
            loader = loader.region(Region::new(region.clone()));
        }

        let sdk_config = loader
            .timeout_config(
                TimeoutConfig::builder()
                    .connect_timeout(plan.connect_timeout)
                    .build(),
            )
            .retry_config(RetryConfig::standard().with_max_attempts(plan.max_attempts))
            .load()
            .await;

        if sdk_config.region().is_none() {
            return Err(StorageError::ClientBuildError(
                "no region configured and none could be discovered".to_string(),
            ));
        }

        let s3_config = aws_sdk_s3::config::Builder::from(&sdk_config)
            .force_path_style(settings.force_path_style)
            .build();

        Ok(Self {
            client: Client::from_conf(s3_config),
            permits: Semaphore::new(plan.max_connections),
        })
    }

    async fn permit(&self) -> Result<SemaphorePermit<'_>, StorageError> {
        self.permits
            .acquire()
            .await
            .map_err(|e| StorageError::TaskAborted(e.to_string()))
    }
}

#[async_trait::async_trait]
impl ObjectBackend for S3Backend {
    async fn list_keys(&self, bucket: &str, prefix: &str) -> Result<Vec<String>, StorageError> {
        let _permit = self.permit().await?;

        let mut pages = self
            .client
            .list_objects_v2()
            .bucket(bucket)
            .prefix(prefix)
            .into_paginator()
            .send();

        let mut keys = Vec::new();
        while let Some(page) = pages.next().await {
            let page = page.map_err(|e| {
                StorageError::ListError(prefix.to_string(), DisplayErrorContext(&e).to_string())
            })?;
            keys.extend(
                page.contents()
                    .iter()
                    .filter_map(|object| object.key().map(str::to_string)),
            );
        }

        tracing::debug!("Listed {} object(s) under '{}' in {}", keys.len(), prefix, bucket);
        Ok(keys)
    }

    async fn exists(&self, bucket: &str, key: &str) -> Result<bool, StorageError> {
        let _permit = self.permit().await?;

        match self.client.head_object().bucket(bucket).key(key).send().await {
            Ok(_) => Ok(true),
            Err(e) => {
                let service_error = e.into_service_error();
                if service_error.is_not_found() {
                    Ok(false)
                } else {
                    Err(StorageError::HeadError(
                        key.to_string(),
                        DisplayErrorContext(&service_error).to_string(),
                    ))
                }
            }
        }
    }

    async fn delete(&self, bucket: &str, key: &str) -> Result<(), StorageError> {
        let _permit = self.permit().await?;

        tracing::debug!("Deleting {} from bucket {}", key, bucket);

        match self.client.delete_object().bucket(bucket).key(key).send().await {
            Ok(_) => Ok(()),
            Err(e) => {
                let service_error = e.into_service_error();
                // S3 answers 204 for missing keys, some compatible backends do not
                if service_error.code() == Some("NoSuchKey") {
                    Ok(())
                } else {
                    Err(StorageError::DeleteError(
                        key.to_string(),
                        DisplayErrorContext(&service_error).to_string(),
                    ))
                }
            }
        }
    }

    async fn put_file(&self, request: &PutRequest) -> Result<(), StorageError> {
        let _permit = self.permit().await?;

        let body = ByteStream::from_path(&request.file)
            .await
            .map_err(|e| StorageError::UploadError(request.key.clone(), e.to_string()))?;

        self.client
            .put_object()
            .bucket(&request.bucket)
            .key(&request.key)
            .body(body)
            .acl(ObjectCannedAcl::from(request.acl))
            .set_storage_class(request.storage_class.as_ref().map(StorageClass::from))
            .set_content_type(request.content_type.clone())
            .send()
            .await
            .map_err(|e| {
                StorageError::UploadError(request.key.clone(), DisplayErrorContext(&e).to_string())
            })?;

        Ok(())
    }
}
