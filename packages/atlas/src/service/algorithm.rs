use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ConnectionTrait, IntoActiveModel, Set, TransactionSession, TransactionTrait,
};
use tracing::info;
use uuid::Uuid;

use crate::entity::{algorithm, algorithm_application_area, algorithm_publication};
use crate::error::AppError;
use crate::models::algorithm::AlgorithmRequest;
use crate::repository::{self, Page, PageRequest};
use crate::service::{application_area::find_application_area, publication::find_publication};

pub(crate) async fn find_algorithm<C: ConnectionTrait>(
    db: &C,
    id: Uuid,
) -> Result<algorithm::Model, AppError> {
    repository::algorithm::find_by_id(db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Algorithm with ID \"{id}\" does not exist")))
}

pub struct AlgorithmService<'a, C: ConnectionTrait + TransactionTrait> {
    conn: &'a C,
}

impl<'a, C: ConnectionTrait + TransactionTrait> AlgorithmService<'a, C> {
    pub fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    pub async fn create(&self, request: AlgorithmRequest) -> Result<algorithm::Model, AppError> {
        let request = request.validate()?;
        let model = algorithm::ActiveModel {
            id: Set(Uuid::now_v7()),
            name: Set(request.name),
            acronym: Set(request.acronym),
            problem: Set(request.problem),
            created_at: Set(Utc::now()),
        };
        Ok(model.insert(self.conn).await?)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<algorithm::Model, AppError> {
        find_algorithm(self.conn, id).await
    }

    pub async fn find_all(&self, request: PageRequest) -> Result<Page<algorithm::Model>, AppError> {
        Ok(repository::algorithm::find_page(self.conn, request).await?)
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: AlgorithmRequest,
    ) -> Result<algorithm::Model, AppError> {
        let request = request.validate()?;
        let mut active = find_algorithm(self.conn, id).await?.into_active_model();
        active.name = Set(request.name);
        active.acronym = Set(request.acronym);
        active.problem = Set(request.problem);
        Ok(active.update(self.conn).await?)
    }

    /// Refused while implementations still reference the algorithm.
    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let txn = self.conn.begin().await?;
        find_algorithm(&txn, id).await?;

        let implementations = repository::algorithm::count_implementations(&txn, id).await?;
        if implementations > 0 {
            return Err(AppError::Conflict(format!(
                "Algorithm with ID \"{id}\" still has {implementations} implementation(s)"
            )));
        }

        repository::algorithm::delete_links(&txn, id).await?;
        repository::algorithm::delete_by_id(&txn, id).await?;
        txn.commit().await?;

        info!(algorithm_id = %id, "Deleted algorithm");
        Ok(())
    }

    /// Linking twice is a no-op.
    pub async fn link_publication(
        &self,
        algorithm_id: Uuid,
        publication_id: Uuid,
    ) -> Result<(), AppError> {
        find_algorithm(self.conn, algorithm_id).await?;
        find_publication(self.conn, publication_id).await?;

        if repository::algorithm::find_publication_link(self.conn, algorithm_id, publication_id)
            .await?
            .is_none()
        {
            algorithm_publication::ActiveModel {
                algorithm_id: Set(algorithm_id),
                publication_id: Set(publication_id),
            }
            .insert(self.conn)
            .await?;
        }
        Ok(())
    }

    pub async fn unlink_publication(
        &self,
        algorithm_id: Uuid,
        publication_id: Uuid,
    ) -> Result<(), AppError> {
        find_algorithm(self.conn, algorithm_id).await?;
        let link =
            repository::algorithm::find_publication_link(self.conn, algorithm_id, publication_id)
                .await?
                .ok_or_else(|| {
                    AppError::NotFound(format!(
                        "Publication with ID \"{publication_id}\" is not linked to algorithm \"{algorithm_id}\""
                    ))
                })?;
        link.into_active_model().delete(self.conn).await?;
        Ok(())
    }

    pub async fn link_application_area(
        &self,
        algorithm_id: Uuid,
        application_area_id: Uuid,
    ) -> Result<(), AppError> {
        find_algorithm(self.conn, algorithm_id).await?;
        find_application_area(self.conn, application_area_id).await?;

        if repository::algorithm::find_application_area_link(
            self.conn,
            algorithm_id,
            application_area_id,
        )
        .await?
        .is_none()
        {
            algorithm_application_area::ActiveModel {
                algorithm_id: Set(algorithm_id),
                application_area_id: Set(application_area_id),
            }
            .insert(self.conn)
            .await?;
        }
        Ok(())
    }

    pub async fn unlink_application_area(
        &self,
        algorithm_id: Uuid,
        application_area_id: Uuid,
    ) -> Result<(), AppError> {
        find_algorithm(self.conn, algorithm_id).await?;
        let link = repository::algorithm::find_application_area_link(
            self.conn,
            algorithm_id,
            application_area_id,
        )
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!(
                "Application area with ID \"{application_area_id}\" is not linked to algorithm \"{algorithm_id}\""
            ))
        })?;
        link.into_active_model().delete(self.conn).await?;
        Ok(())
    }

    pub async fn find_publications(
        &self,
        algorithm_id: Uuid,
        request: PageRequest,
    ) -> Result<Page<crate::entity::publication::Model>, AppError> {
        find_algorithm(self.conn, algorithm_id).await?;
        Ok(repository::publication::find_by_algorithm(self.conn, algorithm_id, request).await?)
    }

    pub async fn find_application_areas(
        &self,
        algorithm_id: Uuid,
        request: PageRequest,
    ) -> Result<Page<crate::entity::application_area::Model>, AppError> {
        find_algorithm(self.conn, algorithm_id).await?;
        Ok(
            repository::application_area::find_by_algorithm(self.conn, algorithm_id, request)
                .await?,
        )
    }
}
