// Re-export all public APIs from the workspace crates

pub use mediastore_events::*;
pub use mediastore_config::*;
pub use mediastore_storage::*;

/// Prelude module for convenient imports
pub mod prelude {
    // Events
    pub use mediastore_events::{EventBus, StorageEvent};

    // Configuration
    pub use mediastore_config::{Config, StorageSettings};

    // Storage client
    pub use mediastore_storage::{
        AccessControl, ObjectStorageClient, StorageClassHint, StorageError, UploadHandle,
        UploadListener, UploadOutcome, UploadTask,
    };
}
