use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::shared::{Links, optional_text, optional_url, require_text};
use crate::entity::publication;
use crate::error::AppError;

/// Create and full-update body.
#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
pub struct PublicationRequest {
    #[schema(example = "A fast quantum mechanical algorithm for database search")]
    pub title: String,
    pub doi: Option<String>,
    pub url: Option<String>,
    /// Author names in citation order. At least one is required.
    #[schema(example = json!(["Lov K. Grover"]))]
    pub authors: Vec<String>,
}

impl PublicationRequest {
    pub fn validate(self) -> Result<Self, AppError> {
        let authors: Vec<String> = self
            .authors
            .iter()
            .map(|a| a.trim().to_string())
            .filter(|a| !a.is_empty())
            .collect();
        if authors.is_empty() {
            return Err(AppError::Validation(
                "Authors of the publication must not be empty".into(),
            ));
        }
        Ok(Self {
            title: require_text(&self.title, "Title of the publication")?,
            doi: optional_text(self.doi),
            url: optional_url(self.url, "URL of the publication")?,
            authors,
        })
    }
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct PublicationResponse {
    pub id: Uuid,
    pub title: String,
    pub doi: Option<String>,
    pub url: Option<String>,
    pub authors: Vec<String>,
    pub created_at: DateTime<Utc>,
    #[serde(rename = "_links")]
    #[schema(value_type = Object)]
    pub links: Links,
}

impl PublicationResponse {
    pub fn new(model: publication::Model, base: &str) -> Self {
        let links = crate::links::publication(&model, base);
        Self {
            authors: serde_json::from_value(model.authors).unwrap_or_default(),
            id: model.id,
            title: model.title,
            doi: model.doi,
            url: model.url,
            created_at: model.created_at,
            links,
        }
    }
}
