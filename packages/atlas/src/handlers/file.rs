//! Upload and download plumbing shared by every resource that owns a file.

use std::fmt::Write;
use std::io;

use axum::body::Body;
use axum::extract::multipart::MultipartError;
use axum::extract::{DefaultBodyLimit, Multipart};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use common::storage::{ContentHash, StorageError};
use futures::TryStreamExt;
use tokio_util::io::{ReaderStream, StreamReader};

use crate::entity::file;
use crate::error::AppError;
use crate::service::file::{FileService, StoredUpload};

/// Multipart envelope overhead allowed on top of the blob size limit.
const MULTIPART_OVERHEAD: u64 = 64 * 1024;

pub fn upload_body_limit(max_blob_size: u64) -> DefaultBodyLimit {
    let limit = max_blob_size.saturating_add(MULTIPART_OVERHEAD);
    DefaultBodyLimit::max(usize::try_from(limit).unwrap_or(usize::MAX))
}

/// Stage the `file` field of a multipart body. The blob store enforces the
/// size limit while the body streams in.
pub async fn read_upload(
    mut multipart: Multipart,
    files: &FileService<'_>,
) -> Result<StoredUpload, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Multipart error: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let name = field
            .file_name()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| AppError::Validation("File field must have a filename".into()))?;
        let declared_mime = field.content_type().map(str::to_string);

        let mut body = StreamReader::new(Box::pin(field.map_err(io::Error::other)));
        return files
            .store(name, declared_mime.as_deref(), &mut body)
            .await
            .map_err(upload_error);
    }
    Err(AppError::Validation("Missing 'file' field".into()))
}

/// A broken request body is the client's fault; anything else is ours.
fn upload_error(err: StorageError) -> AppError {
    if let StorageError::Io(io_err) = &err
        && let Some(multipart_err) = io_err
            .get_ref()
            .and_then(|inner| inner.downcast_ref::<MultipartError>())
    {
        return AppError::Validation(format!("Upload read error: {multipart_err}"));
    }
    err.into()
}

/// Stream a file's content, honouring `If-None-Match` against its hash.
pub async fn content_response(
    file: &file::Model,
    headers: &HeaderMap,
    files: &FileService<'_>,
) -> Result<Response, AppError> {
    let etag_value = ContentHash::from_hex(&file.content_hash)?.etag();
    if let Some(if_none_match) = headers.get(header::IF_NONE_MATCH)
        && let Ok(val) = if_none_match.to_str()
        && (val == etag_value || val == "*")
    {
        return Ok(StatusCode::NOT_MODIFIED.into_response());
    }

    let reader = files.content(file).await?;
    let body = Body::from_stream(ReaderStream::new(reader));

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, &file.mime_type)
        .header(header::CONTENT_LENGTH, file.size.to_string())
        .header(
            header::CONTENT_DISPOSITION,
            content_disposition_value(&file.name),
        )
        .header(header::ETAG, &etag_value)
        .body(body)
        .map_err(|e| AppError::Internal(format!("Failed to build response: {e}")))
}

/// Quoted ASCII fallback plus the exact name as RFC 5987 `filename*`.
fn content_disposition_value(filename: &str) -> String {
    let fallback: String = filename
        .chars()
        .map(|c| match c {
            '"' | '\\' => '_',
            ' ' => c,
            c if c.is_ascii_graphic() => c,
            _ => '_',
        })
        .collect();
    let fallback = if fallback.trim().is_empty() {
        "download"
    } else {
        fallback.as_str()
    };

    let mut encoded = String::with_capacity(filename.len());
    for b in filename.bytes() {
        if is_attr_char(b) {
            encoded.push(char::from(b));
        } else {
            let _ = write!(encoded, "%{b:02X}");
        }
    }

    format!("attachment; filename=\"{fallback}\"; filename*=UTF-8''{encoded}")
}

fn is_attr_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b"!#$&+-.^_`|~".contains(&b)
}
