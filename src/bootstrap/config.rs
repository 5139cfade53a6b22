use mediastore_events::{EventBus, StorageEvent};
use mediastore_config::Config;
use anyhow::Result;
use std::path::Path;
use std::sync::Arc;

pub async fn load(config_path: &Path, events: &Arc<EventBus>) -> Result<Config> {
    let abs_config_path = absolute_path_string(config_path)?;

    events.emit(StorageEvent::ConfigLoading {
        path: abs_config_path.clone(),
    });

    let config_exists = config_path.exists();
    let config = Config::from_file_with_events(config_path, Some(events)).await?;

    if !config_exists {
        events.emit(StorageEvent::ConfigCreated {
            path: abs_config_path,
        });
    }

    events.emit(StorageEvent::ConfigLoaded {
        enabled: config.storage.enabled,
        bucket: config.storage.bucket_name.clone(),
    });

    Ok(config)
}

fn absolute_path_string(path: &Path) -> Result<String> {
    let abs_path = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };
    Ok(abs_path.to_string_lossy().to_string())
}
