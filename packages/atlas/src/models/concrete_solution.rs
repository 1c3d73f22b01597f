use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::shared::{Links, optional_text, require_text};
use crate::entity::concrete_solution;
use crate::error::AppError;

/// Kind of artifact a concrete solution provides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ConcreteSolutionType {
    Code,
    Circuit,
    File,
    Other,
}

impl ConcreteSolutionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Code => "code",
            Self::Circuit => "circuit",
            Self::File => "file",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for ConcreteSolutionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConcreteSolutionType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "code" => Ok(Self::Code),
            "circuit" => Ok(Self::Circuit),
            "file" => Ok(Self::File),
            "other" => Ok(Self::Other),
            other => Err(AppError::Validation(format!(
                "Unknown concrete solution type: {other}"
            ))),
        }
    }
}

#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
pub struct CreateConcreteSolutionRequest {
    #[schema(example = "Grover Oracle")]
    pub name: String,
    pub description: Option<String>,
    pub concrete_solution_type: Option<ConcreteSolutionType>,
}

impl CreateConcreteSolutionRequest {
    /// Trim fields and reject a blank name.
    pub fn validate(self) -> Result<Self, AppError> {
        Ok(Self {
            name: require_text(&self.name, "Name of the concrete solution")?,
            description: optional_text(self.description),
            concrete_solution_type: self.concrete_solution_type,
        })
    }
}

/// Full replacement of the mutable fields. The attached file and the
/// solution type are never touched by an update.
#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
pub struct UpdateConcreteSolutionRequest {
    pub name: String,
    pub description: Option<String>,
    /// Moves the solution to another pattern. Defaults to the pattern in the path.
    pub pattern: Option<Uuid>,
}

impl UpdateConcreteSolutionRequest {
    pub fn validate(self) -> Result<Self, AppError> {
        Ok(Self {
            name: require_text(&self.name, "Name of the concrete solution")?,
            description: optional_text(self.description),
            pattern: self.pattern,
        })
    }
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ConcreteSolutionResponse {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub pattern: Uuid,
    pub concrete_solution_type: Option<ConcreteSolutionType>,
    pub file_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    #[serde(rename = "_links")]
    #[schema(value_type = Object)]
    pub links: Links,
}

impl ConcreteSolutionResponse {
    pub fn new(model: concrete_solution::Model, base: &str) -> Self {
        let links = crate::links::concrete_solution(&model, base);
        Self {
            concrete_solution_type: model
                .concrete_solution_type
                .as_deref()
                .and_then(|s| s.parse().ok()),
            id: model.id,
            name: model.name,
            description: model.description,
            pattern: model.pattern,
            file_id: model.file_id,
            created_at: model.created_at,
            links,
        }
    }
}
