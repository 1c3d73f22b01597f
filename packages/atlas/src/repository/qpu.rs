use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use super::{Page, PageRequest, fetch_page};
use crate::entity::qpu;

pub async fn find_by_id<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<Option<qpu::Model>, DbErr> {
    qpu::Entity::find_by_id(id).one(db).await
}

pub async fn find_by_provider<C: ConnectionTrait>(
    db: &C,
    provider_id: Uuid,
    request: PageRequest,
) -> Result<Page<qpu::Model>, DbErr> {
    let select = qpu::Entity::find()
        .filter(qpu::Column::ProviderId.eq(provider_id))
        .order_by_asc(qpu::Column::CreatedAt)
        .order_by_asc(qpu::Column::Id);
    fetch_page(db, select, request).await
}

pub async fn delete_by_provider<C: ConnectionTrait>(
    db: &C,
    provider_id: Uuid,
) -> Result<u64, DbErr> {
    let res = qpu::Entity::delete_many()
        .filter(qpu::Column::ProviderId.eq(provider_id))
        .exec(db)
        .await?;
    Ok(res.rows_affected)
}

pub async fn delete_by_id<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<u64, DbErr> {
    let res = qpu::Entity::delete_by_id(id).exec(db).await?;
    Ok(res.rows_affected)
}
