use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::shared::{Links, optional_text, require_text};
use crate::entity::implementation_package;
use crate::error::AppError;

#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
pub struct ImplementationPackageRequest {
    #[schema(example = "qiskit-sources")]
    pub name: String,
    pub description: Option<String>,
}

impl ImplementationPackageRequest {
    pub fn validate(self) -> Result<Self, AppError> {
        Ok(Self {
            name: require_text(&self.name, "Name of the implementation package")?,
            description: optional_text(self.description),
        })
    }
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ImplementationPackageResponse {
    pub id: Uuid,
    pub implementation_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub file_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    #[serde(rename = "_links")]
    #[schema(value_type = Object)]
    pub links: Links,
}

impl ImplementationPackageResponse {
    pub fn new(model: implementation_package::Model, file_id: Option<Uuid>, base: &str) -> Self {
        let links = crate::links::implementation_package(&model, file_id.is_some(), base);
        Self {
            id: model.id,
            implementation_id: model.implementation_id,
            name: model.name,
            description: model.description,
            file_id,
            created_at: model.created_at,
            links,
        }
    }
}
