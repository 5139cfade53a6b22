use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to build storage client: {0}")]
    ClientBuildError(String),

    #[error("Listing failed for prefix '{0}': {1}")]
    ListError(String, String),

    #[error("Existence check failed for '{0}': {1}")]
    HeadError(String, String),

    #[error("Upload failed for '{0}': {1}")]
    UploadError(String, String),

    #[error("Delete failed for '{0}': {1}")]
    DeleteError(String, String),

    #[error("Invalid file path: {0}")]
    InvalidPath(String),

    #[error("Upload task aborted: {0}")]
    TaskAborted(String),
}
