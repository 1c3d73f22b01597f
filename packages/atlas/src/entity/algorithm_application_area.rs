use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "algorithm_application_area")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub algorithm_id: Uuid,
    #[sea_orm(primary_key, auto_increment = false)]
    pub application_area_id: Uuid,
    #[sea_orm(belongs_to, from = "algorithm_id", to = "id")]
    pub algorithm: HasOne<super::algorithm::Entity>,
    #[sea_orm(belongs_to, from = "application_area_id", to = "id")]
    pub application_area: HasOne<super::application_area::Entity>,
}

impl ActiveModelBehavior for ActiveModel {}
