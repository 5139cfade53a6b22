use crate::backend::{BackendFactory, ObjectBackend, PutRequest};
use crate::{AccessControl, StorageError};
use mediastore_config::StorageSettings;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Object stored by [`InMemoryBackend`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub size: u64,
    pub acl: AccessControl,
    pub storage_class: Option<String>,
    pub content_type: Option<String>,
}

/// In-memory backend for tests and local runs without a bucket.
/// Keeps object metadata only, never the file contents.
#[derive(Default)]
pub struct InMemoryBackend {
    objects: RwLock<BTreeMap<(String, String), StoredObject>>,
    fail_uploads: AtomicBool,
    upload_delay: RwLock<Option<Duration>>,
    calls: AtomicUsize,
}

impl InMemoryBackend {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Makes every following upload fail
    pub fn set_fail_uploads(&self, fail: bool) {
        self.fail_uploads.store(fail, Ordering::SeqCst);
    }

    /// Delays every following upload, to keep transfers in flight
    pub fn set_upload_delay(&self, delay: Option<Duration>) {
        *self.upload_delay.write() = delay;
    }

    pub fn insert(&self, bucket: &str, key: &str, object: StoredObject) {
        self.objects
            .write()
            .insert((bucket.to_string(), key.to_string()), object);
    }

    pub fn get(&self, bucket: &str, key: &str) -> Option<StoredObject> {
        self.objects
            .read()
            .get(&(bucket.to_string(), key.to_string()))
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.objects.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.read().is_empty()
    }

    /// Number of backend operations served so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn record_call(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait::async_trait]
impl ObjectBackend for InMemoryBackend {
    async fn list_keys(&self, bucket: &str, prefix: &str) -> Result<Vec<String>, StorageError> {
        self.record_call();

        let objects = self.objects.read();
        Ok(objects
            .keys()
            .filter(|(b, key)| b == bucket && key.starts_with(prefix))
            .map(|(_, key)| key.clone())
            .collect())
    }

    async fn exists(&self, bucket: &str, key: &str) -> Result<bool, StorageError> {
        self.record_call();
        Ok(self.get(bucket, key).is_some())
    }

    async fn delete(&self, bucket: &str, key: &str) -> Result<(), StorageError> {
        self.record_call();
        self.objects
            .write()
            .remove(&(bucket.to_string(), key.to_string()));
        Ok(())
    }

    async fn put_file(&self, request: &PutRequest) -> Result<(), StorageError> {
        self.record_call();

        let delay = *self.upload_delay.read();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if self.fail_uploads.load(Ordering::SeqCst) {
            return Err(StorageError::UploadError(
                request.key.clone(),
                "simulated transfer failure".to_string(),
            ));
        }

        let metadata = tokio::fs::metadata(&request.file)
            .await
            .map_err(|e| StorageError::UploadError(request.key.clone(), e.to_string()))?;

        self.insert(
            &request.bucket,
            &request.key,
            StoredObject {
                size: metadata.len(),
                acl: request.acl,
                storage_class: request.storage_class.as_ref().map(|c| c.as_str().to_string()),
                content_type: request.content_type.clone(),
            },
        );
        Ok(())
    }
}

/// Hands out one shared [`InMemoryBackend`] and counts how often it was asked to
pub struct InMemoryBackendFactory {
    backend: Arc<InMemoryBackend>,
    builds: AtomicUsize,
}

impl InMemoryBackendFactory {
    pub fn new(backend: Arc<InMemoryBackend>) -> Arc<Self> {
        Arc::new(Self {
            backend,
            builds: AtomicUsize::new(0),
        })
    }

    pub fn backend(&self) -> &Arc<InMemoryBackend> {
        &self.backend
    }

    /// Number of client builds requested so far
    pub fn builds(&self) -> usize {
        self.builds.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl BackendFactory for InMemoryBackendFactory {
    async fn build(&self, _settings: &StorageSettings) -> Result<Arc<dyn ObjectBackend>, StorageError> {
        self.builds.fetch_add(1, Ordering::SeqCst);
        Ok(Arc::clone(&self.backend) as Arc<dyn ObjectBackend>)
    }
}
