use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use tokio::fs;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, info};

use super::error::StorageError;
use super::hash::ContentHash;
use super::traits::{BlobStore, BoxReader, StagedBlob};
use crate::config::StorageConfig;

const STAGING_DIR: &str = ".staging";
const CHUNK_SIZE: usize = 64 * 1024;

/// Blob store on the local filesystem.
///
/// Layout: `{root}/{first 2 hex chars}/{remaining 62 hex chars}`. Uploads are
/// written under `{root}/.staging` first and renamed into their shard once the
/// hash is known, so a blob path never holds partial content.
pub struct FilesystemBlobStore {
    root: PathBuf,
    max_size: u64,
}

impl FilesystemBlobStore {
    /// Open (or create) a store rooted at `root`.
    ///
    /// Staged files left behind by an interrupted upload are discarded.
    pub async fn new(root: PathBuf, max_size: u64) -> Result<Self, StorageError> {
        let staging = root.join(STAGING_DIR);
        fs::create_dir_all(&staging).await?;

        let mut leftovers = 0usize;
        let mut entries = fs::read_dir(&staging).await?;
        while let Some(entry) = entries.next_entry().await? {
            if fs::remove_file(entry.path()).await.is_ok() {
                leftovers += 1;
            }
        }
        if leftovers > 0 {
            info!(count = leftovers, "Discarded interrupted uploads");
        }

        Ok(Self { root, max_size })
    }

    pub async fn from_config(config: &StorageConfig) -> Result<Self, StorageError> {
        Self::new(config.data_dir.clone(), config.max_blob_size).await
    }

    fn blob_path(&self, hash: &ContentHash) -> PathBuf {
        self.root.join(hash.shard_prefix()).join(hash.shard_suffix())
    }

    fn staging_path(&self, key: &str) -> PathBuf {
        self.root.join(STAGING_DIR).join(key)
    }

    async fn write_hashed(
        &self,
        path: &Path,
        reader: &mut (dyn AsyncRead + Unpin + Send),
    ) -> Result<(ContentHash, u64), StorageError> {
        let mut file = fs::File::create(path).await?;
        let mut hasher = Sha256::new();
        let mut size: u64 = 0;
        let mut chunk = vec![0u8; CHUNK_SIZE];

        loop {
            let n = reader.read(&mut chunk).await?;
            if n == 0 {
                break;
            }
            size += n as u64;
            if size > self.max_size {
                return Err(StorageError::SizeLimitExceeded {
                    actual: size,
                    limit: self.max_size,
                });
            }
            hasher.update(&chunk[..n]);
            file.write_all(&chunk[..n]).await?;
        }
        file.sync_all().await?;

        Ok((ContentHash::from_bytes(hasher.finalize().into()), size))
    }
}

#[async_trait]
impl BlobStore for FilesystemBlobStore {
    async fn stage(
        &self,
        reader: &mut (dyn AsyncRead + Unpin + Send),
    ) -> Result<StagedBlob, StorageError> {
        let key = uuid::Uuid::new_v4().to_string();
        let path = self.staging_path(&key);

        match self.write_hashed(&path, reader).await {
            Ok((hash, size)) => Ok(StagedBlob::new(hash, size, key)),
            Err(e) => {
                let _ = fs::remove_file(&path).await;
                Err(e)
            }
        }
    }

    async fn promote(&self, staged: &StagedBlob) -> Result<(), StorageError> {
        let source = self.staging_path(staged.key());
        let target = self.blob_path(staged.hash());
        if fs::try_exists(&target).await? {
            fs::remove_file(&source).await?;
            debug!(hash = %staged.hash(), "Blob already stored");
            return Ok(());
        }

        if let Some(shard) = target.parent() {
            fs::create_dir_all(shard).await?;
        }
        fs::rename(&source, &target).await?;
        debug!(hash = %staged.hash(), size = staged.size(), "Stored blob");
        Ok(())
    }

    async fn discard(&self, staged: &StagedBlob) -> Result<(), StorageError> {
        match fs::remove_file(self.staging_path(staged.key())).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    async fn get_stream(&self, hash: &ContentHash) -> Result<BoxReader, StorageError> {
        match fs::File::open(self.blob_path(hash)).await {
            Ok(file) => Ok(Box::new(BufReader::new(file))),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(StorageError::NotFound(hash.to_hex())),
            Err(e) => Err(e.into()),
        }
    }

    async fn delete(&self, hash: &ContentHash) -> Result<bool, StorageError> {
        let path = self.blob_path(hash);
        match fs::remove_file(&path).await {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(false),
            Err(e) => return Err(e.into()),
        }
        debug!(hash = %hash, "Deleted blob");

        // Only succeeds once the shard is empty.
        if let Some(shard) = path.parent() {
            let _ = fs::remove_dir(shard).await;
        }
        Ok(true)
    }
}
