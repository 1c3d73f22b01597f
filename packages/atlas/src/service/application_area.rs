use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ConnectionTrait, IntoActiveModel, Set, TransactionSession, TransactionTrait,
};
use tracing::info;
use uuid::Uuid;

use crate::entity::application_area;
use crate::error::AppError;
use crate::models::application_area::ApplicationAreaRequest;
use crate::repository::{self, Page, PageRequest};

pub(crate) async fn find_application_area<C: ConnectionTrait>(
    db: &C,
    id: Uuid,
) -> Result<application_area::Model, AppError> {
    repository::application_area::find_by_id(db, id)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!("Application area with ID \"{id}\" does not exist"))
        })
}

/// Names are unique; `except` is the row being renamed.
async fn ensure_unique_name<C: ConnectionTrait>(
    db: &C,
    name: &str,
    except: Option<Uuid>,
) -> Result<(), AppError> {
    match repository::application_area::find_by_name(db, name).await? {
        Some(existing) if Some(existing.id) != except => Err(AppError::Conflict(format!(
            "Application area \"{name}\" already exists"
        ))),
        _ => Ok(()),
    }
}

pub struct ApplicationAreaService<'a, C: ConnectionTrait + TransactionTrait> {
    conn: &'a C,
}

impl<'a, C: ConnectionTrait + TransactionTrait> ApplicationAreaService<'a, C> {
    pub fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    pub async fn create(
        &self,
        request: ApplicationAreaRequest,
    ) -> Result<application_area::Model, AppError> {
        let request = request.validate()?;
        ensure_unique_name(self.conn, &request.name, None).await?;
        let model = application_area::ActiveModel {
            id: Set(Uuid::now_v7()),
            name: Set(request.name),
            created_at: Set(Utc::now()),
        };
        Ok(model.insert(self.conn).await?)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<application_area::Model, AppError> {
        find_application_area(self.conn, id).await
    }

    pub async fn find_all(
        &self,
        request: PageRequest,
    ) -> Result<Page<application_area::Model>, AppError> {
        Ok(repository::application_area::find_page(self.conn, request).await?)
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: ApplicationAreaRequest,
    ) -> Result<application_area::Model, AppError> {
        let request = request.validate()?;
        let existing = find_application_area(self.conn, id).await?;
        ensure_unique_name(self.conn, &request.name, Some(id)).await?;
        let mut active = existing.into_active_model();
        active.name = Set(request.name);
        Ok(active.update(self.conn).await?)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let txn = self.conn.begin().await?;
        find_application_area(&txn, id).await?;
        repository::application_area::delete_links(&txn, id).await?;
        repository::application_area::delete_by_id(&txn, id).await?;
        txn.commit().await?;

        info!(application_area_id = %id, "Deleted application area");
        Ok(())
    }
}
