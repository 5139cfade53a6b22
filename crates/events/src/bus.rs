use super::models::{EventBus, StorageEvent};
use std::sync::Arc;
use colored::Colorize;

impl EventBus {
    pub fn new(silent_mode: bool) -> Arc<Self> {
        Arc::new(Self { silent_mode })
    }

    pub fn emit(&self, event: StorageEvent) {
        match event {
            // Configuration
            StorageEvent::ConfigLoading { path } => {
                tracing::debug!("Loading config {}", path);
            }
            StorageEvent::ConfigLoaded { enabled, bucket } => {
                if enabled {
                    tracing::info!("Object storage enabled for bucket {}", bucket);
                } else {
                    tracing::info!("Object storage disabled");
                }
            }
            StorageEvent::ConfigCreated { path } => {
                tracing::warn!("Configuration file not found");
                tracing::info!("Created default configuration at: {}", path);
            }
            StorageEvent::ConfigMigrated { added_fields } => {
                if !added_fields.is_empty() {
                    tracing::info!("Config updated: added {}", added_fields.join(", "));
                }
            }

            // Client lifecycle
            StorageEvent::ClientBuilt { bucket, endpoint, region } => {
                tracing::info!(
                    "Storage client built: bucket={}, endpoint={}, region={}",
                    bucket,
                    endpoint.as_deref().unwrap_or("default"),
                    region.as_deref().unwrap_or("default")
                );
            }
            StorageEvent::ClientReset => {
                tracing::info!("Storage client reset, next operation rebuilds it");
            }

            // Disabled storage
            StorageEvent::OperationSkipped { operation, key } => {
                tracing::debug!("Storage is not enabled, skipping {} for {}", operation, key);
            }

            // Uploads
            StorageEvent::UploadStarted { file, key } => {
                tracing::info!("{} upload has started with key: {}", file, key);
            }
            StorageEvent::UploadCompleted { file, key } => {
                tracing::info!("File {} uploaded with key: {}", file, key);
                if !self.silent_mode {
                    println!("  {} {} {}", "✓".green(), file.cyan(), key.dimmed());
                }
            }
            StorageEvent::UploadFailed { file, key, error } => {
                tracing::error!("Upload failed for {} with key {}: {}", file, key, error);
                if !self.silent_mode {
                    println!("  {} {} {}", "✗".red(), file.cyan(), error.dimmed());
                }
            }
            StorageEvent::LocalFileDeleted { path } => {
                tracing::info!("Local file {} deleted after upload", path);
            }
            StorageEvent::LocalFileDeleteFailed { path, error } => {
                tracing::error!("Failed to delete local file {}: {}", path, error);
            }
        }
    }
}
