use thiserror::Error;

/// Errors raised by blob storage backends.
#[derive(Debug, Error)]
pub enum StorageError {
    /// No blob is stored under the requested hash.
    #[error("blob not found: {0}")]
    NotFound(String),
    #[error("storage IO error: {0}")]
    Io(#[from] std::io::Error),
    /// A stored or supplied content hash could not be parsed.
    #[error("invalid content hash: {0}")]
    InvalidHash(String),
    /// The blob is larger than the configured limit.
    #[error("blob exceeds size limit ({actual} > {limit} bytes)")]
    SizeLimitExceeded { actual: u64, limit: u64 },
}
