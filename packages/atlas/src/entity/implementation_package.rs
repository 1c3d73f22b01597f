use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A bundle of artifacts realizing an implementation.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "implementation_package")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub name: String,
    #[sea_orm(column_type = "Text")]
    pub description: Option<String>,

    pub implementation_id: Uuid,
    #[sea_orm(belongs_to, from = "implementation_id", to = "id")]
    pub implementation: HasOne<super::implementation::Entity>,

    #[sea_orm(has_one)]
    pub package_file: HasOne<super::implementation_package_file::Entity>,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
