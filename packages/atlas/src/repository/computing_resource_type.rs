use sea_orm::{ConnectionTrait, DbErr, EntityTrait, QueryOrder};
use uuid::Uuid;

use super::{Page, PageRequest, fetch_page};
use crate::entity::computing_resource_type;

pub async fn find_by_id<C: ConnectionTrait>(
    db: &C,
    id: Uuid,
) -> Result<Option<computing_resource_type::Model>, DbErr> {
    computing_resource_type::Entity::find_by_id(id).one(db).await
}

pub async fn find_page<C: ConnectionTrait>(
    db: &C,
    request: PageRequest,
) -> Result<Page<computing_resource_type::Model>, DbErr> {
    let select = computing_resource_type::Entity::find()
        .order_by_asc(computing_resource_type::Column::CreatedAt)
        .order_by_asc(computing_resource_type::Column::Id);
    fetch_page(db, select, request).await
}

pub async fn delete_by_id<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<u64, DbErr> {
    let res = computing_resource_type::Entity::delete_by_id(id)
        .exec(db)
        .await?;
    Ok(res.rows_affected)
}
