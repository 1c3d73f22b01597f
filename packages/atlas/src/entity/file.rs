use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "file")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Original upload filename.
    pub name: String,
    pub mime_type: String,

    /// Storage locator of this file's content.
    #[sea_orm(unique)]
    pub file_url: String,

    /// SHA-256 of the content; several files may share one blob.
    #[sea_orm(indexed)]
    pub content_hash: String,

    /// Purposefully denormalized to avoid hitting the blob store for listings.
    pub size: i64,

    #[sea_orm(has_one)]
    pub concrete_solution: HasOne<super::concrete_solution::Entity>,

    #[sea_orm(has_one)]
    pub package_file: HasOne<super::implementation_package_file::Entity>,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
