use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use super::{Page, PageRequest, fetch_page};
use crate::entity::concrete_solution;

pub async fn find_by_id<C: ConnectionTrait>(
    db: &C,
    id: Uuid,
) -> Result<Option<concrete_solution::Model>, DbErr> {
    concrete_solution::Entity::find_by_id(id).one(db).await
}

pub async fn find_page<C: ConnectionTrait>(
    db: &C,
    request: PageRequest,
) -> Result<Page<concrete_solution::Model>, DbErr> {
    let select = concrete_solution::Entity::find()
        .order_by_asc(concrete_solution::Column::CreatedAt)
        .order_by_asc(concrete_solution::Column::Id);
    fetch_page(db, select, request).await
}

pub async fn find_by_pattern<C: ConnectionTrait>(
    db: &C,
    pattern: Uuid,
    request: PageRequest,
) -> Result<Page<concrete_solution::Model>, DbErr> {
    let select = concrete_solution::Entity::find()
        .filter(concrete_solution::Column::Pattern.eq(pattern))
        .order_by_asc(concrete_solution::Column::CreatedAt)
        .order_by_asc(concrete_solution::Column::Id);
    fetch_page(db, select, request).await
}

pub async fn delete_by_id<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<u64, DbErr> {
    let res = concrete_solution::Entity::delete_by_id(id).exec(db).await?;
    Ok(res.rows_affected)
}
