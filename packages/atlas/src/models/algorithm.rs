use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::shared::{Links, optional_text, require_text};
use crate::entity::algorithm;
use crate::error::AppError;

/// Create and full-update body.
#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
pub struct AlgorithmRequest {
    #[schema(example = "Grover's Algorithm")]
    pub name: String,
    pub acronym: Option<String>,
    pub problem: Option<String>,
}

impl AlgorithmRequest {
    pub fn validate(self) -> Result<Self, AppError> {
        Ok(Self {
            name: require_text(&self.name, "Name of the algorithm")?,
            acronym: optional_text(self.acronym),
            problem: optional_text(self.problem),
        })
    }
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct AlgorithmResponse {
    pub id: Uuid,
    pub name: String,
    pub acronym: Option<String>,
    pub problem: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(rename = "_links")]
    #[schema(value_type = Object)]
    pub links: Links,
}

impl AlgorithmResponse {
    pub fn new(model: algorithm::Model, base: &str) -> Self {
        let links = crate::links::algorithm(&model, base);
        Self {
            id: model.id,
            name: model.name,
            acronym: model.acronym,
            problem: model.problem,
            created_at: model.created_at,
            links,
        }
    }
}
