use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "implementation_publication")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub implementation_id: Uuid,
    #[sea_orm(primary_key, auto_increment = false)]
    pub publication_id: Uuid,
    #[sea_orm(belongs_to, from = "implementation_id", to = "id")]
    pub implementation: HasOne<super::implementation::Entity>,
    #[sea_orm(belongs_to, from = "publication_id", to = "id")]
    pub publication: HasOne<super::publication::Entity>,
}

impl ActiveModelBehavior for ActiveModel {}
