use crate::backend::{BackendFactory, ObjectBackend, PutRequest};
use crate::s3::S3BackendFactory;
use crate::upload::{UploadHandle, UploadListener, UploadOutcome, UploadTask};
use crate::{AccessControl, StorageClassHint, StorageError};
use mediastore_config::{ConfigError, StorageSettings};
use mediastore_events::{EventBus, StorageEvent};
use parking_lot::RwLock;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::path::Path;
use std::sync::Arc;
use tokio::runtime::Handle;

/// Object storage client for recordings and other generated artifacts.
///
/// The backend handle is built lazily on first use and shared by every
/// operation until [`ObjectStorageClient::reset`] drops it. Operations that
/// already hold the previous handle finish against it.
///
/// With storage disabled every operation is a logged no-op.
#[derive(Clone)]
pub struct ObjectStorageClient {
    inner: Arc<Inner>,
}

struct Inner {
    settings: RwLock<Arc<StorageSettings>>,
    backend: tokio::sync::RwLock<Option<Arc<dyn ObjectBackend>>>,
    factory: Arc<dyn BackendFactory>,
    events: Arc<EventBus>,
    runtime: Option<Handle>,
}

pub struct ObjectStorageClientBuilder {
    settings: StorageSettings,
    factory: Arc<dyn BackendFactory>,
    events: Option<Arc<EventBus>>,
    runtime: Option<Handle>,
}

impl ObjectStorageClientBuilder {
    /// Backend used instead of S3
    pub fn factory(mut self, factory: Arc<dyn BackendFactory>) -> Self {
        self.factory = factory;
        self
    }

    pub fn events(mut self, events: Arc<EventBus>) -> Self {
        self.events = Some(events);
        self
    }

    /// Runtime that runs uploads, so they can be submitted from threads
    /// outside of it. Defaults to the runtime `build` is called in.
    pub fn runtime(mut self, runtime: Handle) -> Self {
        self.runtime = Some(runtime);
        self
    }

    pub fn build(self) -> ObjectStorageClient {
        ObjectStorageClient {
            inner: Arc::new(Inner {
                settings: RwLock::new(Arc::new(self.settings)),
                backend: tokio::sync::RwLock::new(None),
                factory: self.factory,
                events: self.events.unwrap_or_else(|| EventBus::new(true)),
                runtime: self.runtime.or_else(|| Handle::try_current().ok()),
            }),
        }
    }
}

impl ObjectStorageClient {
    /// S3-backed client
    pub fn new(settings: StorageSettings, events: Arc<EventBus>) -> Self {
        Self::builder(settings).events(events).build()
    }

    pub fn builder(settings: StorageSettings) -> ObjectStorageClientBuilder {
        ObjectStorageClientBuilder {
            settings,
            factory: Arc::new(S3BackendFactory),
            events: None,
            runtime: None,
        }
    }

    pub fn settings(&self) -> Arc<StorageSettings> {
        Arc::clone(&self.inner.settings.read())
    }

    pub fn is_enabled(&self) -> bool {
        self.inner.settings.read().enabled
    }

    /// Returns the cached backend handle, building it from the current
    /// settings if there is none. Concurrent callers build it once.
    pub async fn get_client(&self) -> Result<Arc<dyn ObjectBackend>, StorageError> {
        if let Some(backend) = self.inner.backend.read().await.as_ref() {
            return Ok(Arc::clone(backend));
        }

        let mut slot = self.inner.backend.write().await;
        if let Some(backend) = slot.as_ref() {
            return Ok(Arc::clone(backend));
        }

        let settings = self.settings();
        let backend = self.inner.factory.build(&settings).await?;
        *slot = Some(Arc::clone(&backend));

        self.inner.events.emit(StorageEvent::ClientBuilt {
            bucket: settings.bucket_name.clone(),
            endpoint: settings.endpoint().map(str::to_string),
            region: settings.region().map(str::to_string),
        });

        Ok(backend)
    }

    /// Drops the cached backend handle; the next operation rebuilds it
    pub async fn reset(&self) {
        let previous = self.inner.backend.write().await.take();
        if previous.is_some() {
            self.inner.events.emit(StorageEvent::ClientReset);
        }
    }

    /// Swaps in new settings, e.g. rotated credentials, and resets the handle.
    /// Invalid settings are rejected and the current ones stay in place.
    pub async fn reconfigure(&self, settings: StorageSettings) -> Result<(), ConfigError> {
        settings.validate()?;
        *self.inner.settings.write() = Arc::new(settings);
        self.reset().await;
        Ok(())
    }

    /// Keys under `prefix` in backend order, empty when storage is disabled
    pub async fn list_objects(&self, prefix: &str) -> Result<Vec<String>, StorageError> {
        let settings = self.settings();
        if !settings.enabled {
            self.skip("list", prefix);
            return Ok(Vec::new());
        }

        let backend = self.get_client().await?;
        backend.list_keys(&settings.bucket_name, prefix).await
    }

    pub async fn exists(&self, key: &str) -> Result<bool, StorageError> {
        let settings = self.settings();
        if !settings.enabled {
            self.skip("existence check", key);
            return Ok(false);
        }

        let backend = self.get_client().await?;
        backend.exists(&settings.bucket_name, key).await
    }

    pub async fn delete(&self, key: &str) -> Result<(), StorageError> {
        let settings = self.settings();
        if !settings.enabled {
            self.skip("delete", key);
            return Ok(());
        }

        let backend = self.get_client().await?;
        backend.delete(&settings.bucket_name, key).await
    }

    /// Uploads `file` as `{type_dir}/{file name}`, keeping the local file
    pub fn save(&self, file: impl AsRef<Path>, type_dir: &str) -> Result<Option<UploadHandle>, StorageError> {
        let task = UploadTask::for_type(file.as_ref(), type_dir)?;
        Ok(self.upload_with(task, None))
    }

    /// Starts uploading `file` to `key` and returns without waiting for it.
    /// Returns `None` when storage is disabled.
    pub fn upload(
        &self,
        key: &str,
        file: impl AsRef<Path>,
        delete_local_on_success: bool,
    ) -> Option<UploadHandle> {
        let task = UploadTask::new(key, file.as_ref()).delete_local_on_success(delete_local_on_success);
        self.upload_with(task, None)
    }

    /// Like [`ObjectStorageClient::upload`], reporting the outcome to `listener`
    pub fn upload_with(
        &self,
        task: UploadTask,
        listener: Option<Arc<dyn UploadListener>>,
    ) -> Option<UploadHandle> {
        let settings = self.settings();
        if !settings.enabled {
            self.skip("upload", task.key());
            return None;
        }

        let request = PutRequest {
            bucket: settings.bucket_name.clone(),
            key: task.key().to_string(),
            file: task.file().to_path_buf(),
            acl: AccessControl::resolve(&settings.permission),
            storage_class: StorageClassHint::parse(&settings.storage_class),
            content_type: mime_guess::from_path(task.file()).first_raw().map(str::to_string),
        };

        self.inner.events.emit(StorageEvent::UploadStarted {
            file: task.file_name(),
            key: task.key().to_string(),
        });

        let Some(runtime) = self.runtime() else {
            // Nothing could ever run the transfer
            let error = StorageError::TaskAborted("no runtime".to_string());
            let outcome = self.report_failure(&task, error, listener.as_deref());
            return Some(UploadHandle::finished(task.key().to_string(), outcome));
        };

        let key = task.key().to_string();
        let client = self.clone();
        let join = runtime.spawn(async move { client.run_upload(task, request, listener).await });

        Some(UploadHandle::new(key, join))
    }

    async fn run_upload(
        &self,
        task: UploadTask,
        request: PutRequest,
        listener: Option<Arc<dyn UploadListener>>,
    ) -> UploadOutcome {
        let result = match self.get_client().await {
            Ok(backend) => backend.put_file(&request).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(()) => {
                if task.deletes_local_file() {
                    self.delete_local_file(task.file()).await;
                }

                self.inner.events.emit(StorageEvent::UploadCompleted {
                    file: task.file_name(),
                    key: task.key().to_string(),
                });

                if let Some(listener) = &listener {
                    notify_listener(&task, || listener.on_success(&task));
                }
                UploadOutcome::Completed
            }
            Err(e) => self.report_failure(&task, e, listener.as_deref()),
        }
    }

    fn report_failure(
        &self,
        task: &UploadTask,
        error: StorageError,
        listener: Option<&dyn UploadListener>,
    ) -> UploadOutcome {
        self.inner.events.emit(StorageEvent::UploadFailed {
            file: task.file_name(),
            key: task.key().to_string(),
            error: error.to_string(),
        });

        if let Some(listener) = listener {
            notify_listener(task, || listener.on_failure(task, &error));
        }
        UploadOutcome::Failed(error.to_string())
    }

    async fn delete_local_file(&self, path: &Path) {
        match tokio::fs::remove_file(path).await {
            Ok(()) => self.inner.events.emit(StorageEvent::LocalFileDeleted {
                path: path.display().to_string(),
            }),
            Err(e) => self.inner.events.emit(StorageEvent::LocalFileDeleteFailed {
                path: path.display().to_string(),
                error: format!("{} ({:?})", e, e.kind()),
            }),
        }
    }

    fn runtime(&self) -> Option<Handle> {
        self.inner
            .runtime
            .clone()
            .or_else(|| Handle::try_current().ok())
    }

    fn skip(&self, operation: &str, key: &str) {
        self.inner.events.emit(StorageEvent::OperationSkipped {
            operation: operation.to_string(),
            key: key.to_string(),
        });
    }
}

// A panicking listener must not turn a stored upload into a failed one
fn notify_listener(task: &UploadTask, notify: impl FnOnce()) {
    if catch_unwind(AssertUnwindSafe(notify)).is_err() {
        tracing::error!("Upload listener panicked for key {}", task.key());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{InMemoryBackend, InMemoryBackendFactory};
    use parking_lot::Mutex;
    use std::path::PathBuf;
    use std::time::Duration;

    #[derive(Default)]
    struct RecordingListener {
        successes: Mutex<Vec<String>>,
        failures: Mutex<Vec<String>>,
    }

    impl UploadListener for RecordingListener {
        fn on_success(&self, task: &UploadTask) {
            self.successes.lock().push(task.key().to_string());
        }

        fn on_failure(&self, task: &UploadTask, _cause: &StorageError) {
            self.failures.lock().push(task.key().to_string());
        }
    }

    fn enabled_settings() -> StorageSettings {
        let mut settings = StorageSettings::default();
        settings.enabled = true;
        settings.bucket_name = "recordings-bucket".to_string();
        settings
    }

    fn client_with(settings: StorageSettings) -> (ObjectStorageClient, Arc<InMemoryBackendFactory>) {
        let factory = InMemoryBackendFactory::new(InMemoryBackend::new());
        let client = ObjectStorageClient::builder(settings)
            .factory(factory.clone())
            .build();
        (client, factory)
    }

    fn write_file(dir: &tempfile::TempDir, name: &str) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, b"frame data").unwrap();
        path
    }

    #[tokio::test]
    async fn test_disabled_storage_is_a_no_op() {
        let dir = tempfile::tempdir().unwrap();
        let file = write_file(&dir, "video123.mp4");
        let (client, factory) = client_with(StorageSettings::default());

        assert!(client.list_objects("").await.unwrap().is_empty());
        assert!(!client.exists("recordings/video123.mp4").await.unwrap());
        client.delete("recordings/video123.mp4").await.unwrap();
        assert!(client.upload("recordings/video123.mp4", &file, true).is_none());
        assert!(client.save(&file, "recordings").unwrap().is_none());

        assert_eq!(factory.builds(), 0);
        assert_eq!(factory.backend().calls(), 0);
        assert!(file.exists());
    }

    #[tokio::test]
    async fn test_client_is_built_once_and_reused() {
        let (client, factory) = client_with(enabled_settings());

        client.list_objects("recordings/").await.unwrap();
        client.exists("recordings/a.mp4").await.unwrap();
        client.delete("recordings/a.mp4").await.unwrap();

        assert_eq!(factory.builds(), 1);
        assert_eq!(factory.backend().calls(), 3);
    }

    #[tokio::test]
    async fn test_concurrent_first_use_builds_once() {
        let (client, factory) = client_with(enabled_settings());

        let tasks: Vec<_> = (0..8)
            .map(|_| {
                let client = client.clone();
                tokio::spawn(async move { client.exists("recordings/a.mp4").await })
            })
            .collect();
        for task in tasks {
            task.await.unwrap().unwrap();
        }

        assert_eq!(factory.builds(), 1);
    }

    #[tokio::test]
    async fn test_repeated_reset_rebuilds_once() {
        let dir = tempfile::tempdir().unwrap();
        let file = write_file(&dir, "video123.mp4");
        let (client, factory) = client_with(enabled_settings());

        client.exists("recordings/video123.mp4").await.unwrap();
        assert_eq!(factory.builds(), 1);

        client.reset().await;
        client.reset().await;
        assert_eq!(factory.builds(), 1, "reset never builds eagerly");

        let outcome = client.upload("recordings/video123.mp4", &file, false).unwrap().wait().await;
        assert!(outcome.is_completed());
        assert_eq!(factory.builds(), 2);
    }

    #[tokio::test]
    async fn test_successful_upload_deletes_local_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = write_file(&dir, "video123.mp4");
        let (client, factory) = client_with(enabled_settings());
        let listener = Arc::new(RecordingListener::default());

        let task = UploadTask::new("recordings/video123.mp4", &file).delete_local_on_success(true);
        let outcome = client
            .upload_with(task, Some(listener.clone()))
            .unwrap()
            .wait()
            .await;

        assert_eq!(outcome, UploadOutcome::Completed);
        assert!(!file.exists());
        assert_eq!(*listener.successes.lock(), vec!["recordings/video123.mp4".to_string()]);
        assert!(listener.failures.lock().is_empty());

        let stored = factory
            .backend()
            .get("recordings-bucket", "recordings/video123.mp4")
            .unwrap();
        assert_eq!(stored.size, 10);
        assert_eq!(stored.acl, AccessControl::PublicRead);
        assert_eq!(stored.storage_class.as_deref(), Some("STANDARD"));
        assert_eq!(stored.content_type.as_deref(), Some("video/mp4"));
    }

    #[tokio::test]
    async fn test_successful_upload_keeps_local_file_when_asked() {
        let dir = tempfile::tempdir().unwrap();
        let file = write_file(&dir, "video123.mp4");
        let (client, _factory) = client_with(enabled_settings());

        let outcome = client.upload("recordings/video123.mp4", &file, false).unwrap().wait().await;

        assert!(outcome.is_completed());
        assert!(file.exists());
    }

    #[tokio::test]
    async fn test_failed_upload_keeps_local_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = write_file(&dir, "video123.mp4");
        let (client, factory) = client_with(enabled_settings());
        factory.backend().set_fail_uploads(true);
        let listener = Arc::new(RecordingListener::default());

        let task = UploadTask::new("recordings/video123.mp4", &file).delete_local_on_success(true);
        let outcome = client
            .upload_with(task, Some(listener.clone()))
            .unwrap()
            .wait()
            .await;

        assert!(matches!(outcome, UploadOutcome::Failed(_)));
        assert!(file.exists());
        assert!(listener.successes.lock().is_empty());
        assert_eq!(*listener.failures.lock(), vec!["recordings/video123.mp4".to_string()]);
        assert!(factory.backend().is_empty());
    }

    #[tokio::test]
    async fn test_missing_local_file_fails_upload() {
        let dir = tempfile::tempdir().unwrap();
        let (client, _factory) = client_with(enabled_settings());

        let outcome = client
            .upload("recordings/gone.mp4", dir.path().join("gone.mp4"), true)
            .unwrap()
            .wait()
            .await;

        assert!(matches!(outcome, UploadOutcome::Failed(_)));
    }

    #[tokio::test]
    async fn test_save_derives_key_from_type_and_file_name() {
        let dir = tempfile::tempdir().unwrap();
        let file = write_file(&dir, "video123.mp4");
        let (client, factory) = client_with(enabled_settings());

        let handle = client.save(&file, "recordings").unwrap().unwrap();
        assert_eq!(handle.key(), "recordings/video123.mp4");
        assert!(handle.wait().await.is_completed());

        assert!(file.exists());
        assert!(client.exists("recordings/video123.mp4").await.unwrap());
        assert!(factory.backend().get("recordings-bucket", "recordings/video123.mp4").is_some());
    }

    #[tokio::test]
    async fn test_invalid_permission_and_storage_class() {
        let dir = tempfile::tempdir().unwrap();
        let file = write_file(&dir, "preview.png");
        let mut settings = enabled_settings();
        settings.permission = "everyone".to_string();
        settings.storage_class = "frozen".to_string();
        let (client, factory) = client_with(settings);

        let outcome = client.upload("previews/preview.png", &file, false).unwrap().wait().await;
        assert!(outcome.is_completed());

        let stored = factory.backend().get("recordings-bucket", "previews/preview.png").unwrap();
        assert_eq!(stored.acl, AccessControl::PublicRead);
        assert_eq!(stored.storage_class, None);
    }

    #[tokio::test]
    async fn test_configured_permission_and_storage_class() {
        let dir = tempfile::tempdir().unwrap();
        let file = write_file(&dir, "video123.mp4");
        let mut settings = enabled_settings();
        settings.permission = "bucket-owner-full-control".to_string();
        settings.storage_class = "standard_ia".to_string();
        let (client, factory) = client_with(settings);

        client.upload("recordings/video123.mp4", &file, false).unwrap().wait().await;

        let stored = factory.backend().get("recordings-bucket", "recordings/video123.mp4").unwrap();
        assert_eq!(stored.acl, AccessControl::BucketOwnerFullControl);
        assert_eq!(stored.storage_class.as_deref(), Some("STANDARD_IA"));
    }

    #[tokio::test]
    async fn test_list_exists_and_idempotent_delete() {
        let dir = tempfile::tempdir().unwrap();
        let (client, _factory) = client_with(enabled_settings());

        for name in ["a.mp4", "b.mp4"] {
            let file = write_file(&dir, name);
            client.save(&file, "recordings").unwrap().unwrap().wait().await;
        }
        let preview = write_file(&dir, "a.png");
        client.save(&preview, "previews").unwrap().unwrap().wait().await;

        let mut keys = client.list_objects("recordings/").await.unwrap();
        keys.sort();
        assert_eq!(keys, vec!["recordings/a.mp4", "recordings/b.mp4"]);

        client.delete("recordings/a.mp4").await.unwrap();
        client.delete("recordings/a.mp4").await.unwrap();
        assert!(!client.exists("recordings/a.mp4").await.unwrap());
        assert_eq!(client.list_objects("").await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_concurrent_uploads_are_independent() {
        let dir = tempfile::tempdir().unwrap();
        let (client, factory) = client_with(enabled_settings());
        factory.backend().set_upload_delay(Some(Duration::from_millis(5)));
        let listener = Arc::new(RecordingListener::default());

        let mut uploads = Vec::new();
        for i in 0..16 {
            let file = write_file(&dir, &format!("segment{}.ts", i));
            let task = UploadTask::new(format!("streams/segment{}.ts", i), &file)
                .delete_local_on_success(i % 2 == 0);
            let handle = client.upload_with(task, Some(listener.clone())).unwrap();
            uploads.push((i, file, handle));
        }

        for (i, file, handle) in uploads {
            assert!(handle.wait().await.is_completed());
            assert_eq!(file.exists(), i % 2 != 0, "segment{}", i);
        }

        assert_eq!(listener.successes.lock().len(), 16);
        assert!(listener.failures.lock().is_empty());
        assert_eq!(factory.backend().len(), 16);
        assert_eq!(factory.builds(), 1);
    }

    #[tokio::test]
    async fn test_reset_does_not_disturb_upload_in_flight() {
        let dir = tempfile::tempdir().unwrap();
        let file = write_file(&dir, "video123.mp4");
        let (client, factory) = client_with(enabled_settings());
        factory.backend().set_upload_delay(Some(Duration::from_millis(50)));

        let handle = client.upload("recordings/video123.mp4", &file, true).unwrap();
        tokio::time::sleep(Duration::from_millis(10)).await;
        client.reset().await;

        assert!(handle.wait().await.is_completed());
        assert!(!file.exists());
        assert_eq!(factory.builds(), 1);
    }

    #[tokio::test]
    async fn test_reconfigure_applies_new_settings() {
        let (client, factory) = client_with(StorageSettings::default());
        assert!(!client.is_enabled());

        client.reconfigure(enabled_settings()).await.unwrap();
        assert!(client.is_enabled());

        client.list_objects("").await.unwrap();
        assert_eq!(factory.builds(), 1);
        assert_eq!(client.settings().bucket_name, "recordings-bucket");
    }

    #[test]
    fn test_upload_from_thread_outside_runtime() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let dir = tempfile::tempdir().unwrap();
        let file = write_file(&dir, "video123.mp4");

        let factory = InMemoryBackendFactory::new(InMemoryBackend::new());
        let client = ObjectStorageClient::builder(enabled_settings())
            .factory(factory.clone())
            .runtime(runtime.handle().clone())
            .build();

        let submitter = {
            let client = client.clone();
            let file = file.clone();
            std::thread::spawn(move || client.upload("recordings/video123.mp4", &file, true))
        };
        let handle = submitter.join().unwrap().unwrap();

        assert!(runtime.block_on(handle.wait()).is_completed());
        assert!(!file.exists());
    }

    #[tokio::test]
    async fn test_reconfigure_rejects_invalid_settings() {
        let (client, factory) = client_with(enabled_settings());
        client.list_objects("").await.unwrap();

        let mut invalid = enabled_settings();
        invalid.bucket_name = String::new();

        let result = client.reconfigure(invalid).await;
        assert!(matches!(result, Err(ConfigError::InvalidConfig(_))));
        assert_eq!(client.settings().bucket_name, "recordings-bucket");

        // Cached handle survives the rejected swap
        client.list_objects("").await.unwrap();
        assert_eq!(factory.builds(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_client_built_in_runtime_accepts_uploads_from_plain_threads() {
        let dir = tempfile::tempdir().unwrap();
        let file = write_file(&dir, "video123.mp4");
        let (client, factory) = client_with(enabled_settings());

        let submitter = {
            let client = client.clone();
            let file = file.clone();
            std::thread::spawn(move || client.upload("recordings/video123.mp4", &file, true))
        };
        let handle = submitter.join().unwrap().unwrap();

        assert!(handle.wait().await.is_completed());
        assert!(!file.exists());
        assert!(factory.backend().get("recordings-bucket", "recordings/video123.mp4").is_some());
    }

    #[test]
    fn test_upload_without_any_runtime_reports_failure() {
        let dir = tempfile::tempdir().unwrap();
        let file = write_file(&dir, "video123.mp4");
        let (client, factory) = client_with(enabled_settings());
        let listener = Arc::new(RecordingListener::default());

        let task = UploadTask::new("recordings/video123.mp4", &file).delete_local_on_success(true);
        let handle = client.upload_with(task, Some(listener.clone())).unwrap();
        assert!(handle.is_finished());

        let outcome = tokio::runtime::Runtime::new().unwrap().block_on(handle.wait());
        assert!(matches!(outcome, UploadOutcome::Failed(ref e) if e.contains("no runtime")));
        assert_eq!(*listener.failures.lock(), vec!["recordings/video123.mp4"]);
        assert!(listener.successes.lock().is_empty());
        assert!(file.exists());
        assert_eq!(factory.builds(), 0);
    }

    #[tokio::test]
    async fn test_local_delete_failure_still_completes_upload() {
        let dir = tempfile::tempdir().unwrap();
        // remove_file refuses directories
        let segments = dir.path().join("segments");
        std::fs::create_dir(&segments).unwrap();
        let (client, factory) = client_with(enabled_settings());
        let listener = Arc::new(RecordingListener::default());

        let task = UploadTask::new("recordings/segments", &segments).delete_local_on_success(true);
        let outcome = client.upload_with(task, Some(listener.clone())).unwrap().wait().await;

        assert_eq!(outcome, UploadOutcome::Completed);
        assert!(segments.exists());
        assert_eq!(*listener.successes.lock(), vec!["recordings/segments"]);
        assert!(listener.failures.lock().is_empty());
        assert!(factory.backend().get("recordings-bucket", "recordings/segments").is_some());
    }

    struct PanickingListener;

    impl UploadListener for PanickingListener {
        fn on_success(&self, _task: &UploadTask) {
            panic!("listener bug");
        }

        fn on_failure(&self, _task: &UploadTask, _cause: &StorageError) {
            panic!("listener bug");
        }
    }

    #[tokio::test]
    async fn test_panicking_listener_does_not_change_outcome() {
        let dir = tempfile::tempdir().unwrap();
        let file = write_file(&dir, "video123.mp4");
        let (client, factory) = client_with(enabled_settings());

        let task = UploadTask::new("recordings/video123.mp4", &file).delete_local_on_success(true);
        let outcome = client.upload_with(task, Some(Arc::new(PanickingListener))).unwrap().wait().await;

        assert_eq!(outcome, UploadOutcome::Completed);
        assert!(!file.exists());
        assert!(factory.backend().get("recordings-bucket", "recordings/video123.mp4").is_some());

        factory.backend().set_fail_uploads(true);
        let file = write_file(&dir, "video124.mp4");
        let task = UploadTask::new("recordings/video124.mp4", &file);
        let outcome = client.upload_with(task, Some(Arc::new(PanickingListener))).unwrap().wait().await;
        assert!(matches!(outcome, UploadOutcome::Failed(_)));
    }
}
