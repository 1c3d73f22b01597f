use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "concrete_solution")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub name: String,
    #[sea_orm(column_type = "Text")]
    pub description: Option<String>,

    /// Pattern this solution implements. Patterns live in another catalog,
    /// so this is a bare reference without a foreign key.
    #[sea_orm(indexed)]
    pub pattern: Uuid,

    /// One of: code, circuit, file, other
    pub concrete_solution_type: Option<String>,

    /// Exclusively owned file; removed together with the solution.
    #[sea_orm(unique)]
    pub file_id: Option<Uuid>,
    #[sea_orm(belongs_to, from = "file_id", to = "id")]
    pub file: HasOne<super::file::Entity>,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
