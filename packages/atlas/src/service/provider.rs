use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ConnectionTrait, IntoActiveModel, Set, TransactionSession, TransactionTrait,
};
use tracing::info;
use uuid::Uuid;

use crate::entity::{provider, qpu};
use crate::error::AppError;
use crate::models::provider::{CreateProviderRequest, QpuRequest, UpdateProviderRequest};
use crate::repository::{self, Page, PageRequest};

async fn find_provider<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<provider::Model, AppError> {
    repository::provider::find_by_id(db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Provider with ID \"{id}\" does not exist")))
}

pub struct ProviderService<'a, C: ConnectionTrait + TransactionTrait> {
    conn: &'a C,
}

impl<'a, C: ConnectionTrait + TransactionTrait> ProviderService<'a, C> {
    pub fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    pub async fn create(&self, request: CreateProviderRequest) -> Result<provider::Model, AppError> {
        let request = request.validate()?;
        let model = provider::ActiveModel {
            id: Set(Uuid::now_v7()),
            name: Set(request.name),
            access_key: Set(request.access_key),
            secret_key: Set(request.secret_key),
            created_at: Set(Utc::now()),
        };
        Ok(model.insert(self.conn).await?)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<provider::Model, AppError> {
        find_provider(self.conn, id).await
    }

    pub async fn find_all(&self, request: PageRequest) -> Result<Page<provider::Model>, AppError> {
        Ok(repository::provider::find_page(self.conn, request).await?)
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateProviderRequest,
    ) -> Result<provider::Model, AppError> {
        let request = request.validate()?;
        let mut active = find_provider(self.conn, id).await?.into_active_model();
        active.name = Set(request.name);
        active.access_key = Set(request.access_key);
        if let Some(secret_key) = request.secret_key {
            active.secret_key = Set(secret_key);
        }
        Ok(active.update(self.conn).await?)
    }

    /// Deletes the provider's QPUs in the same transaction.
    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let txn = self.conn.begin().await?;
        find_provider(&txn, id).await?;
        let qpus = repository::qpu::delete_by_provider(&txn, id).await?;
        repository::provider::delete_by_id(&txn, id).await?;
        txn.commit().await?;

        info!(provider_id = %id, qpus, "Deleted provider");
        Ok(())
    }

    pub async fn create_qpu(
        &self,
        provider_id: Uuid,
        request: QpuRequest,
    ) -> Result<qpu::Model, AppError> {
        let request = request.validate()?;
        find_provider(self.conn, provider_id).await?;
        let model = qpu::ActiveModel {
            id: Set(Uuid::now_v7()),
            name: Set(request.name),
            qubit_count: Set(request.qubit_count),
            t1: Set(request.t1),
            max_gate_time: Set(request.max_gate_time),
            provider_id: Set(provider_id),
            created_at: Set(Utc::now()),
        };
        Ok(model.insert(self.conn).await?)
    }

    pub async fn find_qpus(
        &self,
        provider_id: Uuid,
        request: PageRequest,
    ) -> Result<Page<qpu::Model>, AppError> {
        find_provider(self.conn, provider_id).await?;
        Ok(repository::qpu::find_by_provider(self.conn, provider_id, request).await?)
    }

    pub async fn find_qpu(&self, provider_id: Uuid, id: Uuid) -> Result<qpu::Model, AppError> {
        repository::qpu::find_by_id(self.conn, id)
            .await?
            .filter(|q| q.provider_id == provider_id)
            .ok_or_else(|| AppError::NotFound(format!("QPU with ID \"{id}\" does not exist")))
    }

    pub async fn delete_qpu(&self, provider_id: Uuid, id: Uuid) -> Result<(), AppError> {
        self.find_qpu(provider_id, id).await?;
        repository::qpu::delete_by_id(self.conn, id).await?;
        info!(provider_id = %provider_id, qpu_id = %id, "Deleted QPU");
        Ok(())
    }
}
