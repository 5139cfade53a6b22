use super::errors::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageSettings,
}

#[derive(Clone, Deserialize, Serialize)]
pub struct StorageSettings {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "super::defaults::bucket_name")]
    pub bucket_name: String,
    #[serde(default, deserialize_with = "deserialize_non_empty")]
    pub endpoint_url: Option<String>,
    #[serde(default, deserialize_with = "deserialize_non_empty")]
    pub region: Option<String>,
    #[serde(default, deserialize_with = "deserialize_non_empty")]
    pub access_key_id: Option<String>,
    #[serde(default, deserialize_with = "deserialize_non_empty")]
    pub secret_access_key: Option<String>,
    #[serde(default = "super::defaults::permission")]
    pub permission: String,
    #[serde(default = "super::defaults::storage_class")]
    pub storage_class: String,
    #[serde(default)]
    pub force_path_style: bool,
    #[serde(default)]
    pub transport: TransportSettings,
}

// Empty strings in the config file mean "not set"
fn deserialize_non_empty<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value.filter(|v| !v.trim().is_empty()))
}

/// Limits applied to the HTTP transport of the backend client
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TransportSettings {
    #[serde(default = "super::defaults::max_connections")]
    pub max_connections: usize,
    #[serde(default = "super::defaults::connect_timeout_ms")]
    pub connect_timeout_ms: u64,
    #[serde(default = "super::defaults::max_retries")]
    pub max_retries: u32,
}

impl Default for TransportSettings {
    fn default() -> Self {
        super::defaults::transport_settings()
    }
}

impl Default for StorageSettings {
    fn default() -> Self {
        super::defaults::storage_settings()
    }
}

impl StorageSettings {
    /// Custom endpoint, if one is configured
    pub fn endpoint(&self) -> Option<&str> {
        non_empty(&self.endpoint_url)
    }

    pub fn region(&self) -> Option<&str> {
        non_empty(&self.region)
    }

    /// Static access key; `None` falls back to the default credential chain
    pub fn access_key(&self) -> Option<&str> {
        non_empty(&self.access_key_id)
    }

    pub fn secret_key(&self) -> &str {
        self.secret_access_key.as_deref().unwrap_or_default()
    }

    /// Checks settings that would otherwise only fail on first use.
    /// Disabled settings are always valid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.enabled {
            return Ok(());
        }

        if self.bucket_name.trim().is_empty() {
            return Err(ConfigError::InvalidConfig(
                "storage.bucket_name must be set when storage is enabled".to_string(),
            ));
        }

        if self.access_key().is_some() && non_empty(&self.secret_access_key).is_none() {
            return Err(ConfigError::InvalidConfig(
                "storage.secret_access_key is required with storage.access_key_id".to_string(),
            ));
        }

        if self.transport.max_connections == 0 {
            return Err(ConfigError::InvalidConfig(
                "storage.transport.max_connections must be greater than 0".to_string(),
            ));
        }

        if self.transport.connect_timeout_ms == 0 {
            return Err(ConfigError::InvalidConfig(
                "storage.transport.connect_timeout_ms must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

impl fmt::Debug for StorageSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StorageSettings")
            .field("enabled", &self.enabled)
            .field("bucket_name", &self.bucket_name)
            .field("endpoint_url", &self.endpoint_url)
            .field("region", &self.region)
            .field("access_key_id", &self.access_key_id)
            .field(
                "secret_access_key",
                &self.secret_access_key.as_ref().map(|_| "<redacted>"),
            )
            .field("permission", &self.permission)
            .field("storage_class", &self.storage_class)
            .field("force_path_style", &self.force_path_style)
            .field("transport", &self.transport)
            .finish()
    }
}
