mod acl;
mod backend;
mod client;
mod errors;
mod memory;
mod s3;
mod storage_class;
mod upload;

pub use acl::AccessControl;
pub use backend::{BackendFactory, ObjectBackend, PutRequest};
pub use client::{ObjectStorageClient, ObjectStorageClientBuilder};
pub use errors::*;
pub use memory::{InMemoryBackend, InMemoryBackendFactory, StoredObject};
pub use s3::{S3Backend, S3BackendFactory};
pub use storage_class::{is_valid_storage_class, StorageClassHint};
pub use upload::{UploadHandle, UploadListener, UploadOutcome, UploadTask};
