use crate::{AccessControl, StorageClassHint, StorageError};
use mediastore_config::StorageSettings;
use std::path::PathBuf;
use std::sync::Arc;

/// Everything the backend needs to store one local file as an object
#[derive(Debug, Clone)]
pub struct PutRequest {
    pub bucket: String,
    pub key: String,
    pub file: PathBuf,
    pub acl: AccessControl,
    pub storage_class: Option<StorageClassHint>,
    pub content_type: Option<String>,
}

/// Object operations against one configured backend
#[async_trait::async_trait]
pub trait ObjectBackend: Send + Sync {
    /// Keys under `prefix`, in backend listing order
    async fn list_keys(&self, bucket: &str, prefix: &str) -> Result<Vec<String>, StorageError>;

    async fn exists(&self, bucket: &str, key: &str) -> Result<bool, StorageError>;

    /// Deleting a missing key is not an error
    async fn delete(&self, bucket: &str, key: &str) -> Result<(), StorageError>;

    async fn put_file(&self, request: &PutRequest) -> Result<(), StorageError>;
}

/// Builds a backend handle from the current settings
#[async_trait::async_trait]
pub trait BackendFactory: Send + Sync {
    async fn build(&self, settings: &StorageSettings) -> Result<Arc<dyn ObjectBackend>, StorageError>;
}
