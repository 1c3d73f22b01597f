use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::AppError;
use crate::repository::{Page, PageRequest};

/// A single hypermedia reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, utoipa::ToSchema)]
pub struct Link {
    #[schema(example = "http://127.0.0.1:6626/api/v1/algorithms/0190b1d2-7c3e-7000-8000-000000000000")]
    pub href: String,
}

/// Relation name to reference, rendered as the `_links` object.
pub type Links = BTreeMap<String, Link>;

/// Pagination metadata included in list responses.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct Pagination {
    /// Current page number (0-based).
    #[schema(example = 0)]
    pub page: u64,
    /// Number of items per page.
    #[schema(example = 20)]
    pub size: u64,
    /// Total number of matching items across all pages.
    #[schema(example = 47)]
    pub total_elements: u64,
    #[schema(example = 3)]
    pub total_pages: u64,
}

/// Paged collection envelope.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct Paged<T> {
    pub data: Vec<T>,
    pub pagination: Pagination,
    #[serde(rename = "_links")]
    #[schema(value_type = Object)]
    pub links: Links,
}

impl<T> Paged<T> {
    /// Wrap a repository page, converting each item and linking the
    /// neighbouring pages of `collection_href`.
    pub fn from_page<M>(page: Page<M>, collection_href: &str, f: impl FnMut(M) -> T) -> Self {
        let links = crate::links::paged(collection_href, &page);
        let pagination = Pagination {
            page: page.page,
            size: page.size,
            total_elements: page.total_elements,
            total_pages: page.total_pages(),
        };
        Paged {
            data: page.items.into_iter().map(f).collect(),
            pagination,
            links,
        }
    }
}

/// Body of the endpoints that link an existing resource by id.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct ReferenceRequest {
    pub id: uuid::Uuid,
}

/// `?page=&size=` query accepted by every list endpoint.
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageQuery {
    /// Page number, 0-based. Defaults to 0.
    pub page: Option<u64>,
    /// Page size, 1-100. Defaults to 20.
    pub size: Option<u64>,
}

impl TryFrom<PageQuery> for PageRequest {
    type Error = AppError;

    fn try_from(query: PageQuery) -> Result<Self, AppError> {
        let request = PageRequest::new(query.page, query.size);
        match request.offset() {
            Some(_) => Ok(request),
            None => Err(AppError::Validation(format!(
                "Page {} is out of range for page size {}",
                request.page, request.size
            ))),
        }
    }
}

/// Trim a required text field, rejecting blank values.
pub fn require_text(value: &str, field: &str) -> Result<String, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::Validation(format!("{field} must not be empty")));
    }
    Ok(trimmed.to_string())
}

/// Trim an optional text field; blank collapses to `None`.
pub fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Validate an optional absolute http(s) URL.
pub fn optional_url(value: Option<String>, field: &str) -> Result<Option<String>, AppError> {
    let Some(raw) = optional_text(value) else {
        return Ok(None);
    };
    match Url::parse(&raw) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(Some(raw)),
        _ => Err(AppError::Validation(format!(
            "{field} must be an absolute http(s) URL"
        ))),
    }
}
