use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::shared::Links;
use crate::entity::file;

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct FileResponse {
    pub id: Uuid,
    #[schema(example = "oracle.qasm")]
    pub name: String,
    #[schema(example = "text/plain")]
    pub mime_type: String,
    pub file_url: String,
    pub size: i64,
    pub created_at: DateTime<Utc>,
    #[serde(rename = "_links")]
    #[schema(value_type = Object)]
    pub links: Links,
}

impl FileResponse {
    /// `owner_href` is the resource the file is attached to.
    pub fn new(model: file::Model, owner_href: &str) -> Self {
        Self {
            id: model.id,
            name: model.name,
            mime_type: model.mime_type,
            file_url: model.file_url,
            size: model.size,
            created_at: model.created_at,
            links: crate::links::file(owner_href),
        }
    }
}
