use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "publication")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub title: String,
    pub doi: Option<String>,
    pub url: Option<String>,

    /// Ordered author names stored as a JSON array of strings.
    #[sea_orm(column_type = "JsonBinary")]
    pub authors: serde_json::Value,

    #[sea_orm(has_many, via = "algorithm_publication")]
    pub algorithms: HasMany<super::algorithm::Entity>,

    #[sea_orm(has_many, via = "implementation_publication")]
    pub implementations: HasMany<super::implementation::Entity>,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
