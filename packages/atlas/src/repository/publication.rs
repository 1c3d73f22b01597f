use sea_orm::sea_query::Query;
use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use super::{Page, PageRequest, fetch_page};
use crate::entity::{algorithm_publication, implementation_publication, publication};

pub async fn find_by_id<C: ConnectionTrait>(
    db: &C,
    id: Uuid,
) -> Result<Option<publication::Model>, DbErr> {
    publication::Entity::find_by_id(id).one(db).await
}

pub async fn find_page<C: ConnectionTrait>(
    db: &C,
    request: PageRequest,
) -> Result<Page<publication::Model>, DbErr> {
    let select = publication::Entity::find()
        .order_by_asc(publication::Column::CreatedAt)
        .order_by_asc(publication::Column::Id);
    fetch_page(db, select, request).await
}

pub async fn find_by_algorithm<C: ConnectionTrait>(
    db: &C,
    algorithm_id: Uuid,
    request: PageRequest,
) -> Result<Page<publication::Model>, DbErr> {
    let select = publication::Entity::find()
        .filter(
            publication::Column::Id.in_subquery(
                Query::select()
                    .column(algorithm_publication::Column::PublicationId)
                    .from(algorithm_publication::Entity)
                    .and_where(algorithm_publication::Column::AlgorithmId.eq(algorithm_id))
                    .to_owned(),
            ),
        )
        .order_by_asc(publication::Column::CreatedAt)
        .order_by_asc(publication::Column::Id);
    fetch_page(db, select, request).await
}

pub async fn find_by_implementation<C: ConnectionTrait>(
    db: &C,
    implementation_id: Uuid,
    request: PageRequest,
) -> Result<Page<publication::Model>, DbErr> {
    let select = publication::Entity::find()
        .filter(
            publication::Column::Id.in_subquery(
                Query::select()
                    .column(implementation_publication::Column::PublicationId)
                    .from(implementation_publication::Entity)
                    .and_where(
                        implementation_publication::Column::ImplementationId
                            .eq(implementation_id),
                    )
                    .to_owned(),
            ),
        )
        .order_by_asc(publication::Column::CreatedAt)
        .order_by_asc(publication::Column::Id);
    fetch_page(db, select, request).await
}

/// Remove the publication from every algorithm and implementation citing it.
pub async fn delete_links<C: ConnectionTrait>(db: &C, publication_id: Uuid) -> Result<(), DbErr> {
    algorithm_publication::Entity::delete_many()
        .filter(algorithm_publication::Column::PublicationId.eq(publication_id))
        .exec(db)
        .await?;
    implementation_publication::Entity::delete_many()
        .filter(implementation_publication::Column::PublicationId.eq(publication_id))
        .exec(db)
        .await?;
    Ok(())
}

pub async fn delete_by_id<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<u64, DbErr> {
    let res = publication::Entity::delete_by_id(id).exec(db).await?;
    Ok(res.rows_affected)
}
