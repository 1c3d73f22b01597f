use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::shared::{Links, require_text};
use crate::entity::{provider, qpu};
use crate::error::AppError;

#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
pub struct CreateProviderRequest {
    #[schema(example = "IBMQ")]
    pub name: String,
    pub access_key: String,
    pub secret_key: String,
}

impl CreateProviderRequest {
    pub fn validate(self) -> Result<Self, AppError> {
        Ok(Self {
            name: require_text(&self.name, "Name of the provider")?,
            access_key: require_text(&self.access_key, "Access key of the provider")?,
            secret_key: require_text(&self.secret_key, "Secret key of the provider")?,
        })
    }
}

/// The secret key is only replaced when supplied.
#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
pub struct UpdateProviderRequest {
    pub name: String,
    pub access_key: String,
    pub secret_key: Option<String>,
}

impl UpdateProviderRequest {
    pub fn validate(self) -> Result<Self, AppError> {
        let secret_key = match self.secret_key {
            Some(key) => Some(require_text(&key, "Secret key of the provider")?),
            None => None,
        };
        Ok(Self {
            name: require_text(&self.name, "Name of the provider")?,
            access_key: require_text(&self.access_key, "Access key of the provider")?,
            secret_key,
        })
    }
}

/// Credentials are write-only: the secret key is never rendered.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ProviderResponse {
    pub id: Uuid,
    pub name: String,
    pub access_key: String,
    pub created_at: DateTime<Utc>,
    #[serde(rename = "_links")]
    #[schema(value_type = Object)]
    pub links: Links,
}

impl ProviderResponse {
    pub fn new(model: provider::Model, base: &str) -> Self {
        let links = crate::links::provider(&model, base);
        Self {
            id: model.id,
            name: model.name,
            access_key: model.access_key,
            created_at: model.created_at,
            links,
        }
    }
}

#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
pub struct QpuRequest {
    #[schema(example = "ibmq_16_melbourne")]
    pub name: String,
    #[schema(example = 15)]
    pub qubit_count: i32,
    pub t1: Option<f64>,
    pub max_gate_time: Option<f64>,
}

impl QpuRequest {
    pub fn validate(self) -> Result<Self, AppError> {
        if self.qubit_count < 1 {
            return Err(AppError::Validation(
                "Qubit count of the QPU must be at least 1".into(),
            ));
        }
        for (value, field) in [(self.t1, "T1"), (self.max_gate_time, "Max gate time")] {
            if value.is_some_and(|v| !v.is_finite() || v < 0.0) {
                return Err(AppError::Validation(format!(
                    "{field} of the QPU must be a non-negative number"
                )));
            }
        }
        Ok(Self {
            name: require_text(&self.name, "Name of the QPU")?,
            ..self
        })
    }
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct QpuResponse {
    pub id: Uuid,
    pub provider_id: Uuid,
    pub name: String,
    pub qubit_count: i32,
    pub t1: Option<f64>,
    pub max_gate_time: Option<f64>,
    pub created_at: DateTime<Utc>,
    #[serde(rename = "_links")]
    #[schema(value_type = Object)]
    pub links: Links,
}

impl QpuResponse {
    pub fn new(model: qpu::Model, base: &str) -> Self {
        let links = crate::links::qpu(&model, base);
        Self {
            id: model.id,
            provider_id: model.provider_id,
            name: model.name,
            qubit_count: model.qubit_count,
            t1: model.t1,
            max_gate_time: model.max_gate_time,
            created_at: model.created_at,
            links,
        }
    }
}
