use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ConnectionTrait, IntoActiveModel, Set, TransactionSession, TransactionTrait,
};
use tracing::info;
use uuid::Uuid;

use super::file::{FileService, StoredUpload};
use crate::entity::{concrete_solution, file};
use crate::error::AppError;
use crate::models::concrete_solution::{
    CreateConcreteSolutionRequest, UpdateConcreteSolutionRequest,
};
use crate::repository::{self, Page, PageRequest};

fn not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Concrete solution with ID \"{id}\" does not exist"))
}

/// Overwrite name, description and pattern. The file reference and the
/// solution type are left as stored.
pub fn apply_update(
    model: concrete_solution::Model,
    request: UpdateConcreteSolutionRequest,
) -> concrete_solution::ActiveModel {
    let pattern = request.pattern.unwrap_or(model.pattern);
    let mut active = model.into_active_model();
    active.name = Set(request.name);
    active.description = Set(request.description);
    active.pattern = Set(pattern);
    active
}

pub struct ConcreteSolutionService<'a, C: ConnectionTrait + TransactionTrait> {
    conn: &'a C,
}

impl<'a, C: ConnectionTrait + TransactionTrait> ConcreteSolutionService<'a, C> {
    pub fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    /// Persist a new solution under `pattern`. A new solution never starts
    /// with a file; files are attached through [`Self::add_file`].
    pub async fn create(
        &self,
        pattern: Uuid,
        request: CreateConcreteSolutionRequest,
    ) -> Result<concrete_solution::Model, AppError> {
        let request = request.validate()?;
        let model = concrete_solution::ActiveModel {
            id: Set(Uuid::now_v7()),
            name: Set(request.name),
            description: Set(request.description),
            pattern: Set(pattern),
            concrete_solution_type: Set(request
                .concrete_solution_type
                .map(|t| t.as_str().to_string())),
            file_id: Set(None),
            created_at: Set(Utc::now()),
        };
        Ok(model.insert(self.conn).await?)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<concrete_solution::Model, AppError> {
        repository::concrete_solution::find_by_id(self.conn, id)
            .await?
            .ok_or_else(|| not_found(id))
    }

    /// Like [`Self::find_by_id`], but a solution of another pattern is
    /// reported as missing.
    pub async fn find_in_pattern(
        &self,
        pattern: Uuid,
        id: Uuid,
    ) -> Result<concrete_solution::Model, AppError> {
        find_in_pattern(self.conn, pattern, id).await
    }

    pub async fn find_all(
        &self,
        request: PageRequest,
    ) -> Result<Page<concrete_solution::Model>, AppError> {
        Ok(repository::concrete_solution::find_page(self.conn, request).await?)
    }

    pub async fn find_by_pattern(
        &self,
        pattern: Uuid,
        request: PageRequest,
    ) -> Result<Page<concrete_solution::Model>, AppError> {
        Ok(repository::concrete_solution::find_by_pattern(self.conn, pattern, request).await?)
    }

    pub async fn update(
        &self,
        pattern: Uuid,
        id: Uuid,
        request: UpdateConcreteSolutionRequest,
    ) -> Result<concrete_solution::Model, AppError> {
        let request = request.validate()?;
        let existing = self.find_in_pattern(pattern, id).await?;
        Ok(apply_update(existing, request).update(self.conn).await?)
    }

    /// The solution together with its attached file.
    pub async fn find_linked_file(
        &self,
        pattern: Uuid,
        id: Uuid,
    ) -> Result<(concrete_solution::Model, file::Model), AppError> {
        let solution = self.find_in_pattern(pattern, id).await?;
        let file = linked_file(self.conn, &solution).await?;
        Ok((solution, file))
    }

    /// Attach an uploaded file, replacing and deleting any previous one.
    ///
    /// On failure the staged upload is discarded again.
    pub async fn add_file(
        &self,
        files: &FileService<'_>,
        pattern: Uuid,
        id: Uuid,
        upload: StoredUpload,
    ) -> Result<file::Model, AppError> {
        let result = async {
            let txn = self.conn.begin().await?;
            let solution = find_in_pattern(&txn, pattern, id).await?;
            let previous = repository::file::find_by_concrete_solution(&txn, &solution).await?;

            let created = files.create(&txn, &upload).await?;
            let mut active = solution.into_active_model();
            active.file_id = Set(Some(created.id));
            active.update(&txn).await?;

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
                    info!(solution_id = %id, file_id = %previous.id, "Replaced concrete solution file");
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

    /// Detach and delete the attached file in one transaction.
    pub async fn delete_file(
        &self,
        files: &FileService<'_>,
        pattern: Uuid,
        id: Uuid,
    ) -> Result<(), AppError> {
        let txn = self.conn.begin().await?;
        let solution = find_in_pattern(&txn, pattern, id).await?;
        let file = linked_file(&txn, &solution).await?;

        let mut active = solution.into_active_model();
        active.file_id = Set(None);
        active.update(&txn).await?;
        files.delete_in(&txn, &file).await?;
        txn.commit().await?;

        info!(solution_id = %id, file_id = %file.id, "Deleted concrete solution file");
        files.release(self.conn, &file.content_hash).await;
        Ok(())
    }

    /// Delete the solution together with its file.
    pub async fn delete(
        &self,
        files: &FileService<'_>,
        pattern: Uuid,
        id: Uuid,
    ) -> Result<(), AppError> {
        let txn = self.conn.begin().await?;
        let solution = find_in_pattern(&txn, pattern, id).await?;
        let file = repository::file::find_by_concrete_solution(&txn, &solution).await?;

        repository::concrete_solution::delete_by_id(&txn, solution.id).await?;
        if let Some(file) = &file {
            files.delete_in(&txn, file).await?;
        }
        txn.commit().await?;

        info!(solution_id = %id, "Deleted concrete solution");
        if let Some(file) = file {
            files.release(self.conn, &file.content_hash).await;
        }
        Ok(())
    }
}

async fn find_in_pattern<C: ConnectionTrait>(
    db: &C,
    pattern: Uuid,
    id: Uuid,
) -> Result<concrete_solution::Model, AppError> {
    repository::concrete_solution::find_by_id(db, id)
        .await?
        .filter(|s| s.pattern == pattern)
        .ok_or_else(|| not_found(id))
}

async fn linked_file<C: ConnectionTrait>(
    db: &C,
    solution: &concrete_solution::Model,
) -> Result<file::Model, AppError> {
    repository::file::find_by_concrete_solution(db, solution)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!(
                "File of concrete solution with ID \"{}\" does not exist",
                solution.id
            ))
        })
}
