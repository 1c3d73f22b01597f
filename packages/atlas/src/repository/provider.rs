use sea_orm::{ConnectionTrait, DbErr, EntityTrait, QueryOrder};
use uuid::Uuid;

use super::{Page, PageRequest, fetch_page};
use crate::entity::provider;

pub async fn find_by_id<C: ConnectionTrait>(
    db: &C,
    id: Uuid,
) -> Result<Option<provider::Model>, DbErr> {
    provider::Entity::find_by_id(id).one(db).await
}

pub async fn find_page<C: ConnectionTrait>(
    db: &C,
    request: PageRequest,
) -> Result<Page<provider::Model>, DbErr> {
    let select = provider::Entity::find()
        .order_by_asc(provider::Column::CreatedAt)
        .order_by_asc(provider::Column::Id);
    fetch_page(db, select, request).await
}

pub async fn delete_by_id<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<u64, DbErr> {
    let res = provider::Entity::delete_by_id(id).exec(db).await?;
    Ok(res.rows_affected)
}
