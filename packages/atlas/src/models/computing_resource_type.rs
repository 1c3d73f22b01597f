use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::shared::{Links, optional_text, require_text};
use crate::entity::computing_resource_type;
use crate::error::AppError;

/// Value type of a computing resource property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum ComputingResourceDatatype {
    Integer,
    Float,
    String,
    Boolean,
}

impl ComputingResourceDatatype {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Integer => "INTEGER",
            Self::Float => "FLOAT",
            Self::String => "STRING",
            Self::Boolean => "BOOLEAN",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "INTEGER" => Some(Self::Integer),
            "FLOAT" => Some(Self::Float),
            "STRING" => Some(Self::String),
            "BOOLEAN" => Some(Self::Boolean),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
pub struct ComputingResourceTypeRequest {
    #[schema(example = "T1")]
    pub name: String,
    pub datatype: ComputingResourceDatatype,
    pub description: Option<String>,
}

impl ComputingResourceTypeRequest {
    pub fn validate(self) -> Result<Self, AppError> {
        Ok(Self {
            name: require_text(&self.name, "Name of the computing resource type")?,
            datatype: self.datatype,
            description: optional_text(self.description),
        })
    }
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ComputingResourceTypeResponse {
    pub id: Uuid,
    pub name: String,
    pub datatype: ComputingResourceDatatype,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(rename = "_links")]
    #[schema(value_type = Object)]
    pub links: Links,
}

impl ComputingResourceTypeResponse {
    /// Rows always hold a datatype written by this service; anything else
    /// renders as `STRING`.
    pub fn new(model: computing_resource_type::Model, base: &str) -> Self {
        let links = crate::links::computing_resource_type(&model, base);
        Self {
            datatype: ComputingResourceDatatype::parse(&model.datatype)
                .unwrap_or(ComputingResourceDatatype::String),
            id: model.id,
            name: model.name,
            description: model.description,
            created_at: model.created_at,
            links,
        }
    }
}
