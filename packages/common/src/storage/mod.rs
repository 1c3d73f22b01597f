//! Content-addressed blob storage backing uploaded catalog files.
//!
//! File metadata lives in the relational store; the bytes live here, keyed by
//! their SHA-256 hash so identical uploads share one blob.

mod error;
mod hash;
mod traits;

pub mod filesystem;

pub use error::StorageError;
pub use filesystem::FilesystemBlobStore;
pub use hash::ContentHash;
pub use traits::{BlobStore, BoxReader, StagedBlob};
