use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "implementation")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub name: String,
    pub link: Option<String>,
    pub input_format: Option<String>,
    pub output_format: Option<String>,
    #[sea_orm(column_type = "Text")]
    pub description: Option<String>,
    pub contributors: Option<String>,
    #[sea_orm(column_type = "Text")]
    pub assumptions: Option<String>,
    #[sea_orm(column_type = "Text")]
    pub parameter: Option<String>,
    #[sea_orm(column_type = "Text")]
    pub dependencies: Option<String>,

    pub algorithm_id: Uuid,
    #[sea_orm(belongs_to, from = "algorithm_id", to = "id")]
    pub algorithm: HasOne<super::algorithm::Entity>,

    #[sea_orm(has_many)]
    pub packages: HasMany<super::implementation_package::Entity>,

    #[sea_orm(has_many, via = "implementation_publication")]
    pub publications: HasMany<super::publication::Entity>,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
