use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use tracing::instrument;
use uuid::Uuid;

use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::extractors::path::AppPath;
use crate::links;
use crate::models::provider::{
    CreateProviderRequest, ProviderResponse, QpuRequest, QpuResponse, UpdateProviderRequest,
};
use crate::models::shared::{PageQuery, Paged};
use crate::service::provider::ProviderService;
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/",
    tag = "Providers",
    operation_id = "createProvider",
    summary = "Create a provider",
    description = "Name, access key and secret key are required. The secret key is never returned.",
    request_body = CreateProviderRequest,
    responses(
        (status = 201, description = "Provider created", body = ProviderResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(name = %payload.name))]
pub async fn create_provider(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateProviderRequest>,
) -> Result<impl IntoResponse, AppError> {
    let model = ProviderService::new(&state.db).create(payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(ProviderResponse::new(model, &state.api_base())),
    ))
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Providers",
    operation_id = "listProviders",
    summary = "List providers",
    params(PageQuery),
    responses((status = 200, description = "Page of providers", body = Paged<ProviderResponse>)),
)]
#[instrument(skip(state, query))]
pub async fn list_providers(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Paged<ProviderResponse>>, AppError> {
    let page = ProviderService::new(&state.db)
        .find_all(query.try_into()?)
        .await?;
    let base = state.api_base();
    let href = format!("{base}/providers");
    Ok(Json(Paged::from_page(page, &href, |m| {
        ProviderResponse::new(m, &base)
    })))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Providers",
    operation_id = "getProvider",
    summary = "Get a provider",
    params(("id" = Uuid, Path, description = "Provider ID")),
    responses(
        (status = 200, description = "Provider", body = ProviderResponse),
        (status = 404, description = "Provider not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id = %id))]
pub async fn get_provider(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<ProviderResponse>, AppError> {
    let model = ProviderService::new(&state.db).find_by_id(id).await?;
    Ok(Json(ProviderResponse::new(model, &state.api_base())))
}

#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Providers",
    operation_id = "updateProvider",
    summary = "Update a provider",
    description = "The secret key is only replaced when supplied.",
    params(("id" = Uuid, Path, description = "Provider ID")),
    request_body = UpdateProviderRequest,
    responses(
        (status = 200, description = "Provider updated", body = ProviderResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Provider not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(id = %id))]
pub async fn update_provider(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
    AppJson(payload): AppJson<UpdateProviderRequest>,
) -> Result<Json<ProviderResponse>, AppError> {
    let model = ProviderService::new(&state.db).update(id, payload).await?;
    Ok(Json(ProviderResponse::new(model, &state.api_base())))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Providers",
    operation_id = "deleteProvider",
    summary = "Delete a provider",
    description = "Deletes the provider together with its QPUs.",
    params(("id" = Uuid, Path, description = "Provider ID")),
    responses(
        (status = 204, description = "Provider deleted"),
        (status = 404, description = "Provider not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id = %id))]
pub async fn delete_provider(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    ProviderService::new(&state.db).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/{id}/qpus",
    tag = "Providers",
    operation_id = "createQpu",
    summary = "Create a QPU of a provider",
    params(("id" = Uuid, Path, description = "Provider ID")),
    request_body = QpuRequest,
    responses(
        (status = 201, description = "QPU created", body = QpuResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Provider not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(id = %id))]
pub async fn create_qpu(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
    AppJson(payload): AppJson<QpuRequest>,
) -> Result<impl IntoResponse, AppError> {
    let model = ProviderService::new(&state.db)
        .create_qpu(id, payload)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(QpuResponse::new(model, &state.api_base())),
    ))
}

#[utoipa::path(
    get,
    path = "/{id}/qpus",
    tag = "Providers",
    operation_id = "listQpus",
    summary = "List the QPUs of a provider",
    params(("id" = Uuid, Path, description = "Provider ID"), PageQuery),
    responses(
        (status = 200, description = "Page of QPUs", body = Paged<QpuResponse>),
        (status = 404, description = "Provider not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, query), fields(id = %id))]
pub async fn list_qpus(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Paged<QpuResponse>>, AppError> {
    let page = ProviderService::new(&state.db)
        .find_qpus(id, query.try_into()?)
        .await?;
    let base = state.api_base();
    let href = format!("{}/qpus", links::provider_href(&base, id));
    Ok(Json(Paged::from_page(page, &href, |m| {
        QpuResponse::new(m, &base)
    })))
}

#[utoipa::path(
    get,
    path = "/{id}/qpus/{qpu_id}",
    tag = "Providers",
    operation_id = "getQpu",
    summary = "Get a QPU",
    params(
        ("id" = Uuid, Path, description = "Provider ID"),
        ("qpu_id" = Uuid, Path, description = "QPU ID"),
    ),
    responses(
        (status = 200, description = "QPU", body = QpuResponse),
        (status = 404, description = "QPU not found for this provider (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id = %id, qpu_id = %qpu_id))]
pub async fn get_qpu(
    State(state): State<AppState>,
    AppPath((id, qpu_id)): AppPath<(Uuid, Uuid)>,
) -> Result<Json<QpuResponse>, AppError> {
    let model = ProviderService::new(&state.db).find_qpu(id, qpu_id).await?;
    Ok(Json(QpuResponse::new(model, &state.api_base())))
}

#[utoipa::path(
    delete,
    path = "/{id}/qpus/{qpu_id}",
    tag = "Providers",
    operation_id = "deleteQpu",
    summary = "Delete a QPU",
    params(
        ("id" = Uuid, Path, description = "Provider ID"),
        ("qpu_id" = Uuid, Path, description = "QPU ID"),
    ),
    responses(
        (status = 204, description = "QPU deleted"),
        (status = 404, description = "QPU not found for this provider (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id = %id, qpu_id = %qpu_id))]
pub async fn delete_qpu(
    State(state): State<AppState>,
    AppPath((id, qpu_id)): AppPath<(Uuid, Uuid)>,
) -> Result<impl IntoResponse, AppError> {
    ProviderService::new(&state.db).delete_qpu(id, qpu_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
