use crate::StorageError;
use std::path::{Path, PathBuf};
use tokio::task::JoinHandle;

/// One upload of a local file to an object key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadTask {
    key: String,
    file: PathBuf,
    delete_local_on_success: bool,
}

impl UploadTask {
    pub fn new(key: impl Into<String>, file: impl Into<PathBuf>) -> Self {
        Self {
            key: key.into(),
            file: file.into(),
            delete_local_on_success: false,
        }
    }

    /// Key `{type_dir}/{file base name}`
    pub fn for_type(file: impl Into<PathBuf>, type_dir: &str) -> Result<Self, StorageError> {
        let file = file.into();
        let name = file
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .ok_or_else(|| StorageError::InvalidPath(file.display().to_string()))?;

        Ok(Self::new(format!("{}/{}", type_dir, name), file))
    }

    pub fn delete_local_on_success(mut self, delete: bool) -> Self {
        self.delete_local_on_success = delete;
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn file(&self) -> &Path {
        &self.file
    }

    pub fn deletes_local_file(&self) -> bool {
        self.delete_local_on_success
    }

    /// File base name, as shown in logs
    pub fn file_name(&self) -> String {
        self.file
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| self.file.display().to_string())
    }
}

/// Terminal state of a submitted upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutcome {
    Completed,
    Failed(String),
}

impl UploadOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, UploadOutcome::Completed)
    }
}

/// Receives the terminal outcome of an upload.
///
/// Exactly one of the two methods is called per submitted upload, normally
/// on a runtime worker thread. When no runtime is available the failure is
/// reported on the submitting thread. On success the local file has already
/// been removed when the task asked for it. A panic in either method is
/// logged and does not change the outcome.
pub trait UploadListener: Send + Sync {
    fn on_success(&self, task: &UploadTask);

    fn on_failure(&self, task: &UploadTask, cause: &StorageError);
}

enum HandleState {
    Running(JoinHandle<UploadOutcome>),
    Finished(UploadOutcome),
}

/// Handle to an upload running in the background.
/// Dropping it does not cancel the upload.
pub struct UploadHandle {
    key: String,
    state: HandleState,
}

impl UploadHandle {
    pub(crate) fn new(key: String, join: JoinHandle<UploadOutcome>) -> Self {
        Self {
            key,
            state: HandleState::Running(join),
        }
    }

    /// Upload that ended before it could be spawned
    pub(crate) fn finished(key: String, outcome: UploadOutcome) -> Self {
        Self {
            key,
            state: HandleState::Finished(outcome),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn is_finished(&self) -> bool {
        match &self.state {
            HandleState::Running(join) => join.is_finished(),
            HandleState::Finished(_) => true,
        }
    }

    /// Waits for the terminal outcome, after the listener has run
    pub async fn wait(self) -> UploadOutcome {
        match self.state {
            HandleState::Running(join) => match join.await {
                Ok(outcome) => outcome,
                Err(e) => UploadOutcome::Failed(StorageError::TaskAborted(e.to_string()).to_string()),
            },
            HandleState::Finished(outcome) => outcome,
        }
    }
}
