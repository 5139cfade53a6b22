/// Default values for configuration fields

pub fn bucket_name() -> String {
    "mediastore".to_string()
}

pub fn permission() -> String {
    "public-read".to_string()
}

pub fn storage_class() -> String {
    "STANDARD".to_string()
}

pub fn max_connections() -> usize {
    100
}

pub fn connect_timeout_ms() -> u64 {
    120_000  // 2 minutes
}

pub fn max_retries() -> u32 {
    15  // Retries after the initial attempt
}

pub fn transport_settings() -> super::models::TransportSettings {
    super::models::TransportSettings {
        max_connections: max_connections(),
        connect_timeout_ms: connect_timeout_ms(),
        max_retries: max_retries(),
    }
}

pub fn storage_settings() -> super::models::StorageSettings {
    super::models::StorageSettings {
        enabled: false,
        bucket_name: bucket_name(),
        endpoint_url: None,
        region: None,
        access_key_id: None,
        secret_access_key: None,
        permission: permission(),
        storage_class: storage_class(),
        force_path_style: false,
        transport: transport_settings(),
    }
}

pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# ===============================================================================
# MediaStore Configuration
# ===============================================================================

# ===============================================================================
# OBJECT STORAGE
# ===============================================================================
[storage]
enabled = false                      # Disabled storage turns every operation into a no-op
bucket_name = "mediastore"           # Bucket that receives recordings and other artifacts
endpoint_url = ""                    # Custom endpoint (MinIO, R2, ...). Only used together with region
region = ""                          # e.g. us-east-1. Empty = SDK default region discovery
access_key_id = ""                   # Empty = default credential chain (env, profile, IMDS)
secret_access_key = ""
permission = "public-read"           # Canned ACL: public-read | private | public-read-write |
                                     #   authenticated-read | log-delivery-write | bucket-owner-read |
                                     #   bucket-owner-full-control | aws-exec-read
storage_class = "STANDARD"           # STANDARD | STANDARD_IA | GLACIER | ... (case-insensitive)
force_path_style = false             # Path-style addressing for MinIO-style endpoints

# Transport limits
[storage.transport]
max_connections = 100                # Max concurrent requests to the backend
connect_timeout_ms = 120000          # Connection timeout in milliseconds
max_retries = 15                     # Retries after the initial attempt
"#;
