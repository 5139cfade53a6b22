use super::errors::ConfigError;
use std::path::Path;
use std::sync::Arc;
use toml_edit::{DocumentMut, Item, Table, Value};

/// Migrates config file to latest format if needed
pub async fn migrate_config_if_needed<P: AsRef<Path>>(
    path: P,
    events: Option<&Arc<mediastore_events::EventBus>>,
) -> Result<(), ConfigError> {
    let content = tokio::fs::read_to_string(path.as_ref()).await?;
    let mut doc = content.parse::<DocumentMut>()?;
    let mut added_fields = Vec::new();

    migrate_storage_section(&mut doc, &mut added_fields)?;

    // Only write if we added fields
    if !added_fields.is_empty() {
        tokio::fs::write(path.as_ref(), doc.to_string()).await?;

        if let Some(event_bus) = events {
            event_bus.emit(mediastore_events::StorageEvent::ConfigMigrated {
                added_fields: added_fields.clone(),
            });
        }
    }

    Ok(())
}

fn migrate_storage_section(
    doc: &mut DocumentMut,
    added_fields: &mut Vec<String>,
) -> Result<(), ConfigError> {
    if !doc.contains_key("storage") {
        doc["storage"] = Item::Table(Table::new());
        added_fields.push("storage".to_string());
    }

    let storage = doc["storage"]
        .as_table_mut()
        .ok_or_else(|| ConfigError::MigrationError("Invalid [storage] section in config".to_string()))?;

    // Credentials and endpoint stay optional, they are never written back
    ensure_field(storage, "enabled", Value::from(false), added_fields);
    ensure_field(
        storage,
        "bucket_name",
        Value::from(super::defaults::bucket_name()),
        added_fields,
    );
    ensure_field(
        storage,
        "permission",
        Value::from(super::defaults::permission()),
        added_fields,
    );
    ensure_field(
        storage,
        "storage_class",
        Value::from(super::defaults::storage_class()),
        added_fields,
    );
    ensure_field(storage, "force_path_style", Value::from(false), added_fields);

    if !storage.contains_key("transport") {
        storage["transport"] = Item::Table(Table::new());
        added_fields.push("storage.transport".to_string());
    }

    let transport = storage["transport"]
        .as_table_mut()
        .ok_or_else(|| ConfigError::MigrationError("Invalid [storage.transport] section in config".to_string()))?;
    ensure_field(
        transport,
        "max_connections",
        Value::from(super::defaults::max_connections() as i64),
        added_fields,
    );
    ensure_field(
        transport,
        "connect_timeout_ms",
        Value::from(super::defaults::connect_timeout_ms() as i64),
        added_fields,
    );
    ensure_field(
        transport,
        "max_retries",
        Value::from(super::defaults::max_retries() as i64),
        added_fields,
    );

    Ok(())
}

fn ensure_field(
    table: &mut Table,
    key: &str,
    default_value: Value,
    added_fields: &mut Vec<String>,
) {
    if !table.contains_key(key) {
        table[key] = Item::Value(default_value);
        added_fields.push(key.to_string());
    }
}
