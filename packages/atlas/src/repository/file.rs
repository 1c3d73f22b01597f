use sea_orm::{
    ColumnTrait, ConnectionTrait, DbBackend, DbErr, EntityTrait, PaginatorTrait, QueryFilter,
    Statement,
};
use uuid::Uuid;

use crate::entity::{concrete_solution, file};

pub async fn find_by_id<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<Option<file::Model>, DbErr> {
    file::Entity::find_by_id(id).one(db).await
}

/// The file attached to a concrete solution, if the solution has one.
pub async fn find_by_concrete_solution<C: ConnectionTrait>(
    db: &C,
    solution: &concrete_solution::Model,
) -> Result<Option<file::Model>, DbErr> {
    match solution.file_id {
        Some(file_id) => find_by_id(db, file_id).await,
        None => Ok(None),
    }
}

/// The file attached to an implementation package, resolved through the
/// `implementation_package_file` join table.
pub async fn find_by_implementation_package<C: ConnectionTrait>(
    db: &C,
    implementation_package_id: Uuid,
) -> Result<Option<file::Model>, DbErr> {
    file::Entity::find()
        .from_raw_sql(Statement::from_sql_and_values(
            DbBackend::Postgres,
            r#"SELECT "file".* FROM "file"
               INNER JOIN "implementation_package_file" ipf ON "file"."id" = ipf."file_id"
               WHERE ipf."implementation_package_id" = $1"#,
            [implementation_package_id.into()],
        ))
        .one(db)
        .await
}

/// Number of file rows pointing at the given blob.
pub async fn count_by_content_hash<C: ConnectionTrait>(
    db: &C,
    content_hash: &str,
) -> Result<u64, DbErr> {
    file::Entity::find()
        .filter(file::Column::ContentHash.eq(content_hash))
        .count(db)
        .await
}

/// Serialize work on one blob. Held until the surrounding transaction ends;
/// only Postgres takes a lock.
pub async fn lock_content_hash<C: ConnectionTrait>(
    db: &C,
    content_hash: &str,
) -> Result<(), DbErr> {
    if db.get_database_backend() != DbBackend::Postgres {
        return Ok(());
    }
    db.execute_raw(Statement::from_sql_and_values(
        DbBackend::Postgres,
        "SELECT pg_advisory_xact_lock(hashtext($1))",
        [content_hash.into()],
    ))
    .await?;
    Ok(())
}

pub async fn delete_by_id<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<u64, DbErr> {
    let res = file::Entity::delete_by_id(id).exec(db).await?;
    Ok(res.rows_affected)
}
