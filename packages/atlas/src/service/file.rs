use chrono::Utc;
use common::storage::{BlobStore, BoxReader, ContentHash, StagedBlob, StorageError};
use sea_orm::{ActiveModelTrait, ConnectionTrait, Set, TransactionSession, TransactionTrait};
use tokio::io::AsyncRead;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::entity::file;
use crate::error::AppError;
use crate::repository;

/// Uploaded bytes sitting in staging, waiting for a metadata row.
#[derive(Debug)]
pub struct StoredUpload {
    pub name: String,
    pub mime_type: String,
    pub blob: StagedBlob,
}

impl StoredUpload {
    pub fn size(&self) -> i64 {
        i64::try_from(self.blob.size()).unwrap_or(i64::MAX)
    }
}

/// Storage locator recorded on the row. Distinct per file even when several
/// files share one blob.
pub fn file_url(hash: &ContentHash, id: Uuid) -> String {
    format!("blob:{hash}/{id}")
}

/// Use the declared content type unless it is missing or generic, in which
/// case guess from the file name.
pub fn resolve_mime_type(name: &str, declared: Option<&str>) -> String {
    match declared.map(str::trim) {
        Some(m) if !m.is_empty() && m != "application/octet-stream" => m.to_string(),
        _ => mime_guess::from_path(name)
            .first_or_octet_stream()
            .to_string(),
    }
}

pub struct FileService<'a> {
    blob_store: &'a dyn BlobStore,
}

impl<'a> FileService<'a> {
    pub fn new(blob_store: &'a dyn BlobStore) -> Self {
        Self { blob_store }
    }

    /// Stage uploaded content. Nothing is readable until [`Self::create`].
    pub async fn store(
        &self,
        name: String,
        declared_mime: Option<&str>,
        reader: &mut (dyn AsyncRead + Unpin + Send),
    ) -> Result<StoredUpload, StorageError> {
        let blob = self.blob_store.stage(reader).await?;
        Ok(StoredUpload {
            mime_type: resolve_mime_type(&name, declared_mime),
            name,
            blob,
        })
    }

    /// Publish the staged blob and insert its metadata row.
    ///
    /// Runs under the blob's lock so a concurrent [`Self::collect_blob`]
    /// either sees the new row or finishes before the blob is published.
    pub async fn create<C: ConnectionTrait>(
        &self,
        db: &C,
        upload: &StoredUpload,
    ) -> Result<file::Model, AppError> {
        let hash = upload.blob.hash();
        repository::file::lock_content_hash(db, &hash.to_hex()).await?;
        self.blob_store.promote(&upload.blob).await?;

        let id = Uuid::now_v7();
        let model = file::ActiveModel {
            id: Set(id),
            name: Set(upload.name.clone()),
            mime_type: Set(upload.mime_type.clone()),
            file_url: Set(file_url(hash, id)),
            content_hash: Set(hash.to_hex()),
            size: Set(upload.size()),
            created_at: Set(Utc::now()),
        };
        Ok(model.insert(db).await?)
    }

    pub async fn content(&self, file: &file::Model) -> Result<BoxReader, AppError> {
        let hash = ContentHash::from_hex(&file.content_hash)?;
        Ok(self.blob_store.get_stream(&hash).await?)
    }

    /// Delete the metadata row. The blob stays until [`Self::release`] runs
    /// after the surrounding transaction commits.
    pub async fn delete_in<C: ConnectionTrait>(
        &self,
        db: &C,
        file: &file::Model,
    ) -> Result<(), AppError> {
        repository::file::delete_by_id(db, file.id).await?;
        Ok(())
    }

    /// Delete the blob if no file row references it any more. The count and
    /// the delete share one lock with [`Self::create`].
    pub async fn collect_blob<C: ConnectionTrait + TransactionTrait>(
        &self,
        db: &C,
        content_hash: &str,
    ) -> Result<bool, AppError> {
        let hash = ContentHash::from_hex(content_hash)?;
        let txn = db.begin().await?;
        repository::file::lock_content_hash(&txn, content_hash).await?;
        if repository::file::count_by_content_hash(&txn, content_hash).await? > 0 {
            txn.commit().await?;
            return Ok(false);
        }

        let deleted = self.blob_store.delete(&hash).await?;
        txn.commit().await?;
        if deleted {
            debug!(hash = %hash, "Collected unreferenced blob");
        }
        Ok(deleted)
    }

    /// Best-effort [`Self::collect_blob`]; failures only leave an orphan blob.
    pub async fn release<C: ConnectionTrait + TransactionTrait>(
        &self,
        db: &C,
        content_hash: &str,
    ) {
        if let Err(e) = self.collect_blob(db, content_hash).await {
            warn!(content_hash, error = ?e, "Failed to collect blob");
        }
    }

    /// Undo a failed attach: drop the staged copy and collect the blob if it
    /// was already published.
    pub async fn abandon<C: ConnectionTrait + TransactionTrait>(
        &self,
        db: &C,
        upload: &StoredUpload,
    ) {
        if let Err(e) = self.blob_store.discard(&upload.blob).await {
            warn!(hash = %upload.blob.hash(), error = ?e, "Failed to discard staged upload");
        }
        self.release(db, &upload.blob.hash().to_hex()).await;
    }
}
