use chrono::Utc;
use sea_orm::{ActiveModelTrait, ConnectionTrait, IntoActiveModel, Set};
use tracing::info;
use uuid::Uuid;

use crate::entity::computing_resource_type;
use crate::error::AppError;
use crate::models::computing_resource_type::ComputingResourceTypeRequest;
use crate::repository::{self, Page, PageRequest};

pub struct ComputingResourceTypeService<'a, C: ConnectionTrait> {
    conn: &'a C,
}

impl<'a, C: ConnectionTrait> ComputingResourceTypeService<'a, C> {
    pub fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    pub async fn create(
        &self,
        request: ComputingResourceTypeRequest,
    ) -> Result<computing_resource_type::Model, AppError> {
        let request = request.validate()?;
        let model = computing_resource_type::ActiveModel {
            id: Set(Uuid::now_v7()),
            name: Set(request.name),
            datatype: Set(request.datatype.as_str().to_string()),
            description: Set(request.description),
            created_at: Set(Utc::now()),
        };
        Ok(model.insert(self.conn).await?)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<computing_resource_type::Model, AppError> {
        repository::computing_resource_type::find_by_id(self.conn, id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "Computing resource type with ID \"{id}\" does not exist"
                ))
            })
    }

    pub async fn find_all(
        &self,
        request: PageRequest,
    ) -> Result<Page<computing_resource_type::Model>, AppError> {
        Ok(repository::computing_resource_type::find_page(self.conn, request).await?)
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: ComputingResourceTypeRequest,
    ) -> Result<computing_resource_type::Model, AppError> {
        let request = request.validate()?;
        let mut active = self.find_by_id(id).await?.into_active_model();
        active.name = Set(request.name);
        active.datatype = Set(request.datatype.as_str().to_string());
        active.description = Set(request.description);
        Ok(active.update(self.conn).await?)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        if repository::computing_resource_type::delete_by_id(self.conn, id).await? == 0 {
            return Err(AppError::NotFound(format!(
                "Computing resource type with ID \"{id}\" does not exist"
            )));
        }
        info!(computing_resource_type_id = %id, "Deleted computing resource type");
        Ok(())
    }
}
