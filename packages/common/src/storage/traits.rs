use async_trait::async_trait;
use tokio::io::{AsyncRead, AsyncReadExt};

use super::error::StorageError;
use super::hash::ContentHash;

pub type BoxReader = Box<dyn AsyncRead + Unpin + Send>;

/// Content written to the store but not yet readable under its hash.
#[derive(Debug)]
pub struct StagedBlob {
    hash: ContentHash,
    size: u64,
    key: String,
}

impl StagedBlob {
    pub(crate) fn new(hash: ContentHash, size: u64, key: String) -> Self {
        Self { hash, size, key }
    }

    pub fn hash(&self) -> &ContentHash {
        &self.hash
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    /// Backend-specific staging location.
    pub(crate) fn key(&self) -> &str {
        &self.key
    }
}

/// Blob storage keyed by the SHA-256 of the content.
///
/// Storing the same bytes twice yields the same hash and keeps one copy, so
/// callers that share a blob must count references before deleting it.
/// Writing is split in two: [`stage`](Self::stage) consumes the bytes,
/// [`promote`](Self::promote) publishes them. Callers that reference-count
/// blobs promote under the same lock they collect under.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Drain `reader` into staging, hashing it on the way.
    async fn stage(
        &self,
        reader: &mut (dyn AsyncRead + Unpin + Send),
    ) -> Result<StagedBlob, StorageError>;

    /// Publish a staged blob. If identical content is already stored the
    /// staged copy is dropped.
    async fn promote(&self, staged: &StagedBlob) -> Result<(), StorageError>;

    /// Drop a staged blob that will not be promoted. No-op after promotion.
    async fn discard(&self, staged: &StagedBlob) -> Result<(), StorageError>;

    async fn get_stream(&self, hash: &ContentHash) -> Result<BoxReader, StorageError>;

    /// `Ok(false)` when nothing was stored under `hash`.
    async fn delete(&self, hash: &ContentHash) -> Result<bool, StorageError>;

    /// Stage and promote in one step, returning the hash and byte count.
    async fn put_stream(&self, mut reader: BoxReader) -> Result<(ContentHash, u64), StorageError> {
        let staged = self.stage(&mut *reader).await?;
        if let Err(e) = self.promote(&staged).await {
            let _ = self.discard(&staged).await;
            return Err(e);
        }
        Ok((staged.hash, staged.size))
    }

    async fn put(&self, data: &[u8]) -> Result<ContentHash, StorageError> {
        let (hash, _) = self
            .put_stream(Box::new(std::io::Cursor::new(data.to_vec())))
            .await?;
        Ok(hash)
    }

    async fn get(&self, hash: &ContentHash) -> Result<Vec<u8>, StorageError> {
        let mut data = Vec::new();
        self.get_stream(hash).await?.read_to_end(&mut data).await?;
        Ok(data)
    }
}
