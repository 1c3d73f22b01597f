use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "algorithm")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub name: String,
    pub acronym: Option<String>,
    #[sea_orm(column_type = "Text")]
    pub problem: Option<String>,

    #[sea_orm(has_many)]
    pub implementations: HasMany<super::implementation::Entity>,

    #[sea_orm(has_many, via = "algorithm_publication")]
    pub publications: HasMany<super::publication::Entity>,

    #[sea_orm(has_many, via = "algorithm_application_area")]
    pub application_areas: HasMany<super::application_area::Entity>,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
