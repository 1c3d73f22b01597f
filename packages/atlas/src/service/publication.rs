use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ConnectionTrait, IntoActiveModel, Set, TransactionSession, TransactionTrait,
};
use tracing::info;
use uuid::Uuid;

use crate::entity::{algorithm, implementation, publication};
use crate::error::AppError;
use crate::models::publication::PublicationRequest;
use crate::repository::{self, Page, PageRequest};

pub(crate) async fn find_publication<C: ConnectionTrait>(
    db: &C,
    id: Uuid,
) -> Result<publication::Model, AppError> {
    repository::publication::find_by_id(db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Publication with ID \"{id}\" does not exist")))
}

pub struct PublicationService<'a, C: ConnectionTrait + TransactionTrait> {
    conn: &'a C,
}

impl<'a, C: ConnectionTrait + TransactionTrait> PublicationService<'a, C> {
    pub fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    pub async fn create(
        &self,
        request: PublicationRequest,
    ) -> Result<publication::Model, AppError> {
        let request = request.validate()?;
        let model = publication::ActiveModel {
            id: Set(Uuid::now_v7()),
            title: Set(request.title),
            doi: Set(request.doi),
            url: Set(request.url),
            authors: Set(serde_json::json!(request.authors)),
            created_at: Set(Utc::now()),
        };
        Ok(model.insert(self.conn).await?)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<publication::Model, AppError> {
        find_publication(self.conn, id).await
    }

    pub async fn find_all(
        &self,
        request: PageRequest,
    ) -> Result<Page<publication::Model>, AppError> {
        Ok(repository::publication::find_page(self.conn, request).await?)
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: PublicationRequest,
    ) -> Result<publication::Model, AppError> {
        let request = request.validate()?;
        let mut active = find_publication(self.conn, id).await?.into_active_model();
        active.title = Set(request.title);
        active.doi = Set(request.doi);
        active.url = Set(request.url);
        active.authors = Set(serde_json::json!(request.authors));
        Ok(active.update(self.conn).await?)
    }

    /// Unlinks the publication from every algorithm and implementation first.
    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let txn = self.conn.begin().await?;
        find_publication(&txn, id).await?;
        repository::publication::delete_links(&txn, id).await?;
        repository::publication::delete_by_id(&txn, id).await?;
        txn.commit().await?;

        info!(publication_id = %id, "Deleted publication");
        Ok(())
    }

    pub async fn find_algorithms(
        &self,
        id: Uuid,
        request: PageRequest,
    ) -> Result<Page<algorithm::Model>, AppError> {
        find_publication(self.conn, id).await?;
        Ok(repository::algorithm::find_by_publication(self.conn, id, request).await?)
    }

    pub async fn find_implementations(
        &self,
        id: Uuid,
        request: PageRequest,
    ) -> Result<Page<implementation::Model>, AppError> {
        find_publication(self.conn, id).await?;
        Ok(repository::implementation::find_by_publication(self.conn, id, request).await?)
    }
}
