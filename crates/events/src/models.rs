use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StorageEvent {
    // Configuration
    ConfigLoading { path: String },
    ConfigLoaded { enabled: bool, bucket: String },
    ConfigCreated { path: String },
    ConfigMigrated { added_fields: Vec<String> },

    // Client lifecycle
    ClientBuilt {
        bucket: String,
        endpoint: Option<String>,
        region: Option<String>,
    },
    ClientReset,

    // Disabled storage
    OperationSkipped { operation: String, key: String },

    // Uploads
    UploadStarted { file: String, key: String },
    UploadCompleted { file: String, key: String },
    UploadFailed { file: String, key: String, error: String },
    LocalFileDeleted { path: String },
    LocalFileDeleteFailed { path: String, error: String },
}

pub struct EventBus {
    pub(super) silent_mode: bool,
}
