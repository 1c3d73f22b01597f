use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use super::{Page, PageRequest, fetch_page};
use crate::entity::{implementation_package, implementation_package_file};

pub async fn find_by_id<C: ConnectionTrait>(
    db: &C,
    id: Uuid,
) -> Result<Option<implementation_package::Model>, DbErr> {
    implementation_package::Entity::find_by_id(id).one(db).await
}

pub async fn find_by_implementation<C: ConnectionTrait>(
    db: &C,
    implementation_id: Uuid,
    request: PageRequest,
) -> Result<Page<implementation_package::Model>, DbErr> {
    let select = implementation_package::Entity::find()
        .filter(implementation_package::Column::ImplementationId.eq(implementation_id))
        .order_by_asc(implementation_package::Column::CreatedAt)
        .order_by_asc(implementation_package::Column::Id);
    fetch_page(db, select, request).await
}

pub async fn find_file_link<C: ConnectionTrait>(
    db: &C,
    implementation_package_id: Uuid,
) -> Result<Option<implementation_package_file::Model>, DbErr> {
    implementation_package_file::Entity::find_by_id(implementation_package_id)
        .one(db)
        .await
}

pub async fn delete_file_link<C: ConnectionTrait>(
    db: &C,
    implementation_package_id: Uuid,
) -> Result<u64, DbErr> {
    let res = implementation_package_file::Entity::delete_by_id(implementation_package_id)
        .exec(db)
        .await?;
    Ok(res.rows_affected)
}

pub async fn delete_by_id<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<u64, DbErr> {
    let res = implementation_package::Entity::delete_by_id(id).exec(db).await?;
    Ok(res.rows_affected)
}
