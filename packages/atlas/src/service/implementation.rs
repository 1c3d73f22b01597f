use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ConnectionTrait, IntoActiveModel, Set, TransactionSession, TransactionTrait,
};
use tracing::info;
use uuid::Uuid;

use super::algorithm::find_algorithm;
use super::publication::find_publication;
use crate::entity::{implementation, implementation_publication, publication};
use crate::error::AppError;
use crate::models::implementation::ImplementationRequest;
use crate::repository::{self, Page, PageRequest};

fn not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Implementation with ID \"{id}\" does not exist"))
}

pub(crate) async fn find_implementation<C: ConnectionTrait>(
    db: &C,
    id: Uuid,
) -> Result<implementation::Model, AppError> {
    repository::implementation::find_by_id(db, id)
        .await?
        .ok_or_else(|| not_found(id))
}

fn apply_request(active: &mut implementation::ActiveModel, request: ImplementationRequest) {
    active.name = Set(request.name);
    active.link = Set(request.link);
    active.input_format = Set(request.input_format);
    active.output_format = Set(request.output_format);
    active.description = Set(request.description);
    active.contributors = Set(request.contributors);
    active.assumptions = Set(request.assumptions);
    active.parameter = Set(request.parameter);
    active.dependencies = Set(request.dependencies);
}

pub struct ImplementationService<'a, C: ConnectionTrait + TransactionTrait> {
    conn: &'a C,
}

impl<'a, C: ConnectionTrait + TransactionTrait> ImplementationService<'a, C> {
    pub fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    pub async fn create(
        &self,
        algorithm_id: Uuid,
        request: ImplementationRequest,
    ) -> Result<implementation::Model, AppError> {
        let request = request.validate()?;
        find_algorithm(self.conn, algorithm_id).await?;

        let mut model = implementation::ActiveModel {
            id: Set(Uuid::now_v7()),
            algorithm_id: Set(algorithm_id),
            created_at: Set(Utc::now()),
            ..Default::default()
        };
        apply_request(&mut model, request);
        Ok(model.insert(self.conn).await?)
    }

    /// An implementation of another algorithm is reported as missing.
    pub async fn find_in_algorithm(
        &self,
        algorithm_id: Uuid,
        id: Uuid,
    ) -> Result<implementation::Model, AppError> {
        find_in_algorithm(self.conn, algorithm_id, id).await
    }

    pub async fn find_all(
        &self,
        request: PageRequest,
    ) -> Result<Page<implementation::Model>, AppError> {
        Ok(repository::implementation::find_page(self.conn, request).await?)
    }

    pub async fn find_by_algorithm(
        &self,
        algorithm_id: Uuid,
        request: PageRequest,
    ) -> Result<Page<implementation::Model>, AppError> {
        find_algorithm(self.conn, algorithm_id).await?;
        Ok(repository::implementation::find_by_algorithm(self.conn, algorithm_id, request).await?)
    }

    pub async fn update(
        &self,
        algorithm_id: Uuid,
        id: Uuid,
        request: ImplementationRequest,
    ) -> Result<implementation::Model, AppError> {
        let request = request.validate()?;
        let mut active = find_in_algorithm(self.conn, algorithm_id, id)
            .await?
            .into_active_model();
        apply_request(&mut active, request);
        Ok(active.update(self.conn).await?)
    }

    /// Refused while packages still belong to the implementation.
    pub async fn delete(&self, algorithm_id: Uuid, id: Uuid) -> Result<(), AppError> {
        let txn = self.conn.begin().await?;
        find_in_algorithm(&txn, algorithm_id, id).await?;

        let packages = repository::implementation::count_packages(&txn, id).await?;
        if packages > 0 {
            return Err(AppError::Conflict(format!(
                "Implementation with ID \"{id}\" still has {packages} package(s)"
            )));
        }

        repository::implementation::delete_links(&txn, id).await?;
        repository::implementation::delete_by_id(&txn, id).await?;
        txn.commit().await?;

        info!(implementation_id = %id, "Deleted implementation");
        Ok(())
    }

    pub async fn find_publications(
        &self,
        id: Uuid,
        request: PageRequest,
    ) -> Result<Page<publication::Model>, AppError> {
        find_implementation(self.conn, id).await?;
        Ok(repository::publication::find_by_implementation(self.conn, id, request).await?)
    }

    /// Linking twice is a no-op.
    pub async fn link_publication(&self, id: Uuid, publication_id: Uuid) -> Result<(), AppError> {
        find_implementation(self.conn, id).await?;
        find_publication(self.conn, publication_id).await?;

        if repository::implementation::find_publication_link(self.conn, id, publication_id)
            .await?
            .is_none()
        {
            implementation_publication::ActiveModel {
                implementation_id: Set(id),
                publication_id: Set(publication_id),
            }
            .insert(self.conn)
            .await?;
        }
        Ok(())
    }

    pub async fn unlink_publication(&self, id: Uuid, publication_id: Uuid) -> Result<(), AppError> {
        find_implementation(self.conn, id).await?;
        let link = repository::implementation::find_publication_link(self.conn, id, publication_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "Publication with ID \"{publication_id}\" is not linked to implementation \"{id}\""
                ))
            })?;
        link.into_active_model().delete(self.conn).await?;
        Ok(())
    }
}

async fn find_in_algorithm<C: ConnectionTrait>(
    db: &C,
    algorithm_id: Uuid,
    id: Uuid,
) -> Result<implementation::Model, AppError> {
    repository::implementation::find_by_id(db, id)
        .await?
        .filter(|i| i.algorithm_id == algorithm_id)
        .ok_or_else(|| not_found(id))
}
