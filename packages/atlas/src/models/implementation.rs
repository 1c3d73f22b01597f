use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::shared::{Links, optional_text, optional_url, require_text};
use crate::entity::implementation;
use crate::error::AppError;

/// Create and full-update body. Omitted optional fields are cleared on update.
#[derive(Debug, Clone, Default, Deserialize, utoipa::ToSchema)]
pub struct ImplementationRequest {
    #[schema(example = "Grover-Qiskit")]
    pub name: String,
    pub link: Option<String>,
    pub input_format: Option<String>,
    pub output_format: Option<String>,
    pub description: Option<String>,
    pub contributors: Option<String>,
    pub assumptions: Option<String>,
    pub parameter: Option<String>,
    pub dependencies: Option<String>,
}

impl ImplementationRequest {
    pub fn validate(self) -> Result<Self, AppError> {
        Ok(Self {
            name: require_text(&self.name, "Name of the implementation")?,
            link: optional_url(self.link, "Link of the implementation")?,
            input_format: optional_text(self.input_format),
            output_format: optional_text(self.output_format),
            description: optional_text(self.description),
            contributors: optional_text(self.contributors),
            assumptions: optional_text(self.assumptions),
            parameter: optional_text(self.parameter),
            dependencies: optional_text(self.dependencies),
        })
    }
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ImplementationResponse {
    pub id: Uuid,
    pub algorithm_id: Uuid,
    pub name: String,
    pub link: Option<String>,
    pub input_format: Option<String>,
    pub output_format: Option<String>,
    pub description: Option<String>,
    pub contributors: Option<String>,
    pub assumptions: Option<String>,
    pub parameter: Option<String>,
    pub dependencies: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(rename = "_links")]
    #[schema(value_type = Object)]
    pub links: Links,
}

impl ImplementationResponse {
    pub fn new(model: implementation::Model, base: &str) -> Self {
        let links = crate::links::implementation(&model, base);
        Self {
            id: model.id,
            algorithm_id: model.algorithm_id,
            name: model.name,
            link: model.link,
            input_format: model.input_format,
            output_format: model.output_format,
            description: model.description,
            contributors: model.contributors,
            assumptions: model.assumptions,
            parameter: model.parameter,
            dependencies: model.dependencies,
            created_at: model.created_at,
            links,
        }
    }
}
