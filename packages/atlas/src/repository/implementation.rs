use sea_orm::sea_query::Query;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
};
use uuid::Uuid;

use super::{Page, PageRequest, fetch_page};
use crate::entity::{implementation, implementation_package, implementation_publication};

pub async fn find_by_id<C: ConnectionTrait>(
    db: &C,
    id: Uuid,
) -> Result<Option<implementation::Model>, DbErr> {
    implementation::Entity::find_by_id(id).one(db).await
}

pub async fn find_page<C: ConnectionTrait>(
    db: &C,
    request: PageRequest,
) -> Result<Page<implementation::Model>, DbErr> {
    let select = implementation::Entity::find()
        .order_by_asc(implementation::Column::CreatedAt)
        .order_by_asc(implementation::Column::Id);
    fetch_page(db, select, request).await
}

pub async fn find_by_algorithm<C: ConnectionTrait>(
    db: &C,
    algorithm_id: Uuid,
    request: PageRequest,
) -> Result<Page<implementation::Model>, DbErr> {
    let select = implementation::Entity::find()
        .filter(implementation::Column::AlgorithmId.eq(algorithm_id))
        .order_by_asc(implementation::Column::CreatedAt)
        .order_by_asc(implementation::Column::Id);
    fetch_page(db, select, request).await
}

/// Implementations citing the given publication.
pub async fn find_by_publication<C: ConnectionTrait>(
    db: &C,
    publication_id: Uuid,
    request: PageRequest,
) -> Result<Page<implementation::Model>, DbErr> {
    let select = implementation::Entity::find()
        .filter(
            implementation::Column::Id.in_subquery(
                Query::select()
                    .column(implementation_publication::Column::ImplementationId)
                    .from(implementation_publication::Entity)
                    .and_where(
                        implementation_publication::Column::PublicationId.eq(publication_id),
                    )
                    .to_owned(),
            ),
        )
        .order_by_asc(implementation::Column::CreatedAt)
        .order_by_asc(implementation::Column::Id);
    fetch_page(db, select, request).await
}

pub async fn count_packages<C: ConnectionTrait>(
    db: &C,
    implementation_id: Uuid,
) -> Result<u64, DbErr> {
    implementation_package::Entity::find()
        .filter(implementation_package::Column::ImplementationId.eq(implementation_id))
        .count(db)
        .await
}

pub async fn find_publication_link<C: ConnectionTrait>(
    db: &C,
    implementation_id: Uuid,
    publication_id: Uuid,
) -> Result<Option<implementation_publication::Model>, DbErr> {
    implementation_publication::Entity::find_by_id((implementation_id, publication_id))
        .one(db)
        .await
}

pub async fn delete_links<C: ConnectionTrait>(
    db: &C,
    implementation_id: Uuid,
) -> Result<(), DbErr> {
    implementation_publication::Entity::delete_many()
        .filter(implementation_publication::Column::ImplementationId.eq(implementation_id))
        .exec(db)
        .await?;
    Ok(())
}

pub async fn delete_by_id<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<u64, DbErr> {
    let res = implementation::Entity::delete_by_id(id).exec(db).await?;
    Ok(res.rows_affected)
}
