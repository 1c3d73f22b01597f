use chrono::Utc;
use sea_orm::{ActiveModelTrait, ConnectionTrait, Set, TransactionSession, TransactionTrait};
use tracing::info;
use uuid::Uuid;

use super::file::{FileService, StoredUpload};
use super::implementation::find_implementation;
use crate::entity::{file, implementation_package, implementation_package_file};
use crate::error::AppError;
use crate::models::implementation_package::ImplementationPackageRequest;
use crate::repository::{self, Page, PageRequest};

pub struct ImplementationPackageService<'a, C: ConnectionTrait + TransactionTrait> {
    conn: &'a C,
}

impl<'a, C: ConnectionTrait + TransactionTrait> ImplementationPackageService<'a, C> {
    pub fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    pub async fn create(
        &self,
        implementation_id: Uuid,
        request: ImplementationPackageRequest,
    ) -> Result<implementation_package::Model, AppError> {
        let request = request.validate()?;
        find_implementation(self.conn, implementation_id).await?;

        let model = implementation_package::ActiveModel {
            id: Set(Uuid::now_v7()),
            name: Set(request.name),
            description: Set(request.description),
            implementation_id: Set(implementation_id),
            created_at: Set(Utc::now()),
        };
        Ok(model.insert(self.conn).await?)
    }

    pub async fn find_by_implementation(
        &self,
        implementation_id: Uuid,
        request: PageRequest,
    ) -> Result<Page<implementation_package::Model>, AppError> {
        find_implementation(self.conn, implementation_id).await?;
        Ok(
            repository::implementation_package::find_by_implementation(
                self.conn,
                implementation_id,
                request,
            )
            .await?,
        )
    }

    pub async fn find_in_implementation(
        &self,
        implementation_id: Uuid,
        id: Uuid,
    ) -> Result<implementation_package::Model, AppError> {
        find_in_implementation(self.conn, implementation_id, id).await
    }

    /// Id of the attached file, if any.
    pub async fn file_id(&self, id: Uuid) -> Result<Option<Uuid>, AppError> {
        Ok(
            repository::implementation_package::find_file_link(self.conn, id)
                .await?
                .map(|link| link.file_id),
        )
    }

    pub async fn find_linked_file(
        &self,
        implementation_id: Uuid,
        id: Uuid,
    ) -> Result<file::Model, AppError> {
        find_in_implementation(self.conn, implementation_id, id).await?;
        linked_file(self.conn, id).await
    }

    /// Attach an uploaded file, replacing and deleting any previous one.
    pub async fn add_file(
        &self,
        files: &FileService<'_>,
        implementation_id: Uuid,
        id: Uuid,
        upload: StoredUpload,
    ) -> Result<file::Model, AppError> {
        let result = async {
            let txn = self.conn.begin().await?;
            find_in_implementation(&txn, implementation_id, id).await?;
            let previous =
                repository::file::find_by_implementation_package(&txn, id).await?;
            if previous.is_some() {
                repository::implementation_package::delete_file_link(&txn, id).await?;
            }

            let created = files.create(&txn, &upload).await?;
            implementation_package_file::ActiveModel {
                implementation_package_id: Set(id),
                file_id: Set(created.id),
            }
            .insert(&txn)
            .await?;

            if let Some(previous) = &previous {
                files.delete_in(&txn, previous).await?;
            }
            txn.commit().await?;
            Ok::<_, AppError>((created, previous))
        }
        .await;

        match result {
            Ok((created, previous)) => {
                if let Some(previous) = previous {
                    info!(package_id = %id, file_id = %previous.id, "Replaced implementation package file");
                    files.release(self.conn, &previous.content_hash).await;
                }
                Ok(created)
            }
            Err(e) => {
                files.abandon(self.conn, &upload).await;
                Err(e)
            }
        }
    }

    pub async fn delete_file(
        &self,
        files: &FileService<'_>,
        implementation_id: Uuid,
        id: Uuid,
    ) -> Result<(), AppError> {
        let txn = self.conn.begin().await?;
        find_in_implementation(&txn, implementation_id, id).await?;
        let file = linked_file(&txn, id).await?;

        repository::implementation_package::delete_file_link(&txn, id).await?;
        files.delete_in(&txn, &file).await?;
        txn.commit().await?;

        info!(package_id = %id, file_id = %file.id, "Deleted implementation package file");
        files.release(self.conn, &file.content_hash).await;
        Ok(())
    }

    /// Delete the package together with its file.
    pub async fn delete(
        &self,
        files: &FileService<'_>,
        implementation_id: Uuid,
        id: Uuid,
    ) -> Result<(), AppError> {
        let txn = self.conn.begin().await?;
        find_in_implementation(&txn, implementation_id, id).await?;
        let file = repository::file::find_by_implementation_package(&txn, id).await?;

        repository::implementation_package::delete_file_link(&txn, id).await?;
        if let Some(file) = &file {
            files.delete_in(&txn, file).await?;
        }
        repository::implementation_package::delete_by_id(&txn, id).await?;
        txn.commit().await?;

        info!(package_id = %id, "Deleted implementation package");
        if let Some(file) = file {
            files.release(self.conn, &file.content_hash).await;
        }
        Ok(())
    }
}

async fn find_in_implementation<C: ConnectionTrait>(
    db: &C,
    implementation_id: Uuid,
    id: Uuid,
) -> Result<implementation_package::Model, AppError> {
    repository::implementation_package::find_by_id(db, id)
        .await?
        .filter(|p| p.implementation_id == implementation_id)
        .ok_or_else(|| {
            AppError::NotFound(format!(
                "Implementation package with ID \"{id}\" does not exist"
            ))
        })
}

async fn linked_file<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<file::Model, AppError> {
    repository::file::find_by_implementation_package(db, id)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!(
                "File of implementation package with ID \"{id}\" does not exist"
            ))
        })
}
