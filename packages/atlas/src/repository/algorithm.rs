use sea_orm::sea_query::Query;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
};
use uuid::Uuid;

use super::{Page, PageRequest, fetch_page};
use crate::entity::{
    algorithm, algorithm_application_area, algorithm_publication, implementation,
};

pub async fn find_by_id<C: ConnectionTrait>(
    db: &C,
    id: Uuid,
) -> Result<Option<algorithm::Model>, DbErr> {
    algorithm::Entity::find_by_id(id).one(db).await
}

pub async fn find_page<C: ConnectionTrait>(
    db: &C,
    request: PageRequest,
) -> Result<Page<algorithm::Model>, DbErr> {
    let select = algorithm::Entity::find()
        .order_by_asc(algorithm::Column::CreatedAt)
        .order_by_asc(algorithm::Column::Id);
    fetch_page(db, select, request).await
}

/// Algorithms citing the given publication.
pub async fn find_by_publication<C: ConnectionTrait>(
    db: &C,
    publication_id: Uuid,
    request: PageRequest,
) -> Result<Page<algorithm::Model>, DbErr> {
    let select = algorithm::Entity::find()
        .filter(
            algorithm::Column::Id.in_subquery(
                Query::select()
                    .column(algorithm_publication::Column::AlgorithmId)
                    .from(algorithm_publication::Entity)
                    .and_where(algorithm_publication::Column::PublicationId.eq(publication_id))
                    .to_owned(),
            ),
        )
        .order_by_asc(algorithm::Column::CreatedAt)
        .order_by_asc(algorithm::Column::Id);
    fetch_page(db, select, request).await
}

pub async fn count_implementations<C: ConnectionTrait>(
    db: &C,
    algorithm_id: Uuid,
) -> Result<u64, DbErr> {
    implementation::Entity::find()
        .filter(implementation::Column::AlgorithmId.eq(algorithm_id))
        .count(db)
        .await
}

pub async fn find_publication_link<C: ConnectionTrait>(
    db: &C,
    algorithm_id: Uuid,
    publication_id: Uuid,
) -> Result<Option<algorithm_publication::Model>, DbErr> {
    algorithm_publication::Entity::find_by_id((algorithm_id, publication_id))
        .one(db)
        .await
}

pub async fn find_application_area_link<C: ConnectionTrait>(
    db: &C,
    algorithm_id: Uuid,
    application_area_id: Uuid,
) -> Result<Option<algorithm_application_area::Model>, DbErr> {
    algorithm_application_area::Entity::find_by_id((algorithm_id, application_area_id))
        .one(db)
        .await
}

/// Remove every publication and application-area link of an algorithm.
pub async fn delete_links<C: ConnectionTrait>(db: &C, algorithm_id: Uuid) -> Result<(), DbErr> {
    algorithm_publication::Entity::delete_many()
        .filter(algorithm_publication::Column::AlgorithmId.eq(algorithm_id))
        .exec(db)
        .await?;
    algorithm_application_area::Entity::delete_many()
        .filter(algorithm_application_area::Column::AlgorithmId.eq(algorithm_id))
        .exec(db)
        .await?;
    Ok(())
}

pub async fn delete_by_id<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<u64, DbErr> {
    let res = algorithm::Entity::delete_by_id(id).exec(db).await?;
    Ok(res.rows_affected)
}
