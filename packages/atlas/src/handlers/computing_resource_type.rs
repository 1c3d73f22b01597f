use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use tracing::instrument;
use uuid::Uuid;

use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::extractors::path::AppPath;
use crate::models::computing_resource_type::{
    ComputingResourceTypeRequest, ComputingResourceTypeResponse,
};
use crate::models::shared::{PageQuery, Paged};
use crate::service::computing_resource_type::ComputingResourceTypeService;
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/",
    tag = "Computing Resource Types",
    operation_id = "createComputingResourceType",
    summary = "Create a computing resource type",
    request_body = ComputingResourceTypeRequest,
    responses(
        (status = 201, description = "Computing resource type created", body = ComputingResourceTypeResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(name = %payload.name))]
pub async fn create_computing_resource_type(
    State(state): State<AppState>,
    AppJson(payload): AppJson<ComputingResourceTypeRequest>,
) -> Result<impl IntoResponse, AppError> {
    let model = ComputingResourceTypeService::new(&state.db)
        .create(payload)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(ComputingResourceTypeResponse::new(model, &state.api_base())),
    ))
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Computing Resource Types",
    operation_id = "listComputingResourceTypes",
    summary = "List computing resource types",
    params(PageQuery),
    responses((status = 200, description = "Page of computing resource types", body = Paged<ComputingResourceTypeResponse>)),
)]
#[instrument(skip(state, query))]
pub async fn list_computing_resource_types(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Paged<ComputingResourceTypeResponse>>, AppError> {
    let page = ComputingResourceTypeService::new(&state.db)
        .find_all(query.try_into()?)
        .await?;
    let base = state.api_base();
    let href = format!("{base}/computing-resource-types");
    Ok(Json(Paged::from_page(page, &href, |m| {
        ComputingResourceTypeResponse::new(m, &base)
    })))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Computing Resource Types",
    operation_id = "getComputingResourceType",
    summary = "Get a computing resource type",
    params(("id" = Uuid, Path, description = "Computing resource type ID")),
    responses(
        (status = 200, description = "Computing resource type", body = ComputingResourceTypeResponse),
        (status = 404, description = "Computing resource type not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id = %id))]
pub async fn get_computing_resource_type(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<ComputingResourceTypeResponse>, AppError> {
    let model = ComputingResourceTypeService::new(&state.db)
        .find_by_id(id)
        .await?;
    Ok(Json(ComputingResourceTypeResponse::new(
        model,
        &state.api_base(),
    )))
}

#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Computing Resource Types",
    operation_id = "updateComputingResourceType",
    summary = "Update a computing resource type",
    params(("id" = Uuid, Path, description = "Computing resource type ID")),
    request_body = ComputingResourceTypeRequest,
    responses(
        (status = 200, description = "Computing resource type updated", body = ComputingResourceTypeResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Computing resource type not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(id = %id))]
pub async fn update_computing_resource_type(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
    AppJson(payload): AppJson<ComputingResourceTypeRequest>,
) -> Result<Json<ComputingResourceTypeResponse>, AppError> {
    let model = ComputingResourceTypeService::new(&state.db)
        .update(id, payload)
        .await?;
    Ok(Json(ComputingResourceTypeResponse::new(
        model,
        &state.api_base(),
    )))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Computing Resource Types",
    operation_id = "deleteComputingResourceType",
    summary = "Delete a computing resource type",
    params(("id" = Uuid, Path, description = "Computing resource type ID")),
    responses(
        (status = 204, description = "Computing resource type deleted"),
        (status = 404, description = "Computing resource type not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id = %id))]
pub async fn delete_computing_resource_type(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    ComputingResourceTypeService::new(&state.db)
        .delete(id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
