use sea_orm::sea_query::Query;
use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use super::{Page, PageRequest, fetch_page};
use crate::entity::{algorithm_application_area, application_area};

pub async fn find_by_id<C: ConnectionTrait>(
    db: &C,
    id: Uuid,
) -> Result<Option<application_area::Model>, DbErr> {
    application_area::Entity::find_by_id(id).one(db).await
}

pub async fn find_by_name<C: ConnectionTrait>(
    db: &C,
    name: &str,
) -> Result<Option<application_area::Model>, DbErr> {
    application_area::Entity::find()
        .filter(application_area::Column::Name.eq(name))
        .one(db)
        .await
}

pub async fn find_page<C: ConnectionTrait>(
    db: &C,
    request: PageRequest,
) -> Result<Page<application_area::Model>, DbErr> {
    let select = application_area::Entity::find()
        .order_by_asc(application_area::Column::CreatedAt)
        .order_by_asc(application_area::Column::Id);
    fetch_page(db, select, request).await
}

pub async fn find_by_algorithm<C: ConnectionTrait>(
    db: &C,
    algorithm_id: Uuid,
    request: PageRequest,
) -> Result<Page<application_area::Model>, DbErr> {
    let select = application_area::Entity::find()
        .filter(
            application_area::Column::Id.in_subquery(
                Query::select()
                    .column(algorithm_application_area::Column::ApplicationAreaId)
                    .from(algorithm_application_area::Entity)
                    .and_where(algorithm_application_area::Column::AlgorithmId.eq(algorithm_id))
                    .to_owned(),
            ),
        )
        .order_by_asc(application_area::Column::CreatedAt)
        .order_by_asc(application_area::Column::Id);
    fetch_page(db, select, request).await
}

pub async fn delete_links<C: ConnectionTrait>(
    db: &C,
    application_area_id: Uuid,
) -> Result<(), DbErr> {
    algorithm_application_area::Entity::delete_many()
        .filter(algorithm_application_area::Column::ApplicationAreaId.eq(application_area_id))
        .exec(db)
        .await?;
    Ok(())
}

pub async fn delete_by_id<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<u64, DbErr> {
    let res = application_area::Entity::delete_by_id(id).exec(db).await?;
    Ok(res.rows_affected)
}
