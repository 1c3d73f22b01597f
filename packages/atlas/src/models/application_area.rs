use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::shared::{Links, require_text};
use crate::entity::application_area;
use crate::error::AppError;

#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
pub struct ApplicationAreaRequest {
    #[schema(example = "Chemistry")]
    pub name: String,
}

impl ApplicationAreaRequest {
    pub fn validate(self) -> Result<Self, AppError> {
        Ok(Self {
            name: require_text(&self.name, "Name of the application area")?,
        })
    }
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ApplicationAreaResponse {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    #[serde(rename = "_links")]
    #[schema(value_type = Object)]
    pub links: Links,
}

impl ApplicationAreaResponse {
    pub fn new(model: application_area::Model, base: &str) -> Self {
        let links = crate::links::application_area(&model, base);
        Self {
            id: model.id,
            name: model.name,
            created_at: model.created_at,
            links,
        }
    }
}
