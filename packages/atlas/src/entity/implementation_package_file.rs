use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Join row attaching at most one file to an implementation package.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "implementation_package_file")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub implementation_package_id: Uuid,
    #[sea_orm(belongs_to, from = "implementation_package_id", to = "id")]
    pub implementation_package: HasOne<super::implementation_package::Entity>,

    #[sea_orm(unique)]
    pub file_id: Uuid,
    #[sea_orm(belongs_to, from = "file_id", to = "id")]
    pub file: HasOne<super::file::Entity>,
}

impl ActiveModelBehavior for ActiveModel {}
