use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use tracing::instrument;
use uuid::Uuid;

use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::extractors::path::AppPath;
use crate::models::application_area::{ApplicationAreaRequest, ApplicationAreaResponse};
use crate::models::shared::{PageQuery, Paged};
use crate::service::application_area::ApplicationAreaService;
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/",
    tag = "Application Areas",
    operation_id = "createApplicationArea",
    summary = "Create an application area",
    request_body = ApplicationAreaRequest,
    responses(
        (status = 201, description = "Application area created", body = ApplicationAreaResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 409, description = "Name already taken (CONFLICT)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(name = %payload.name))]
pub async fn create_application_area(
    State(state): State<AppState>,
    AppJson(payload): AppJson<ApplicationAreaRequest>,
) -> Result<impl IntoResponse, AppError> {
    let model = ApplicationAreaService::new(&state.db)
        .create(payload)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(ApplicationAreaResponse::new(model, &state.api_base())),
    ))
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Application Areas",
    operation_id = "listApplicationAreas",
    summary = "List application areas",
    params(PageQuery),
    responses((status = 200, description = "Page of application areas", body = Paged<ApplicationAreaResponse>)),
)]
#[instrument(skip(state, query))]
pub async fn list_application_areas(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Paged<ApplicationAreaResponse>>, AppError> {
    let page = ApplicationAreaService::new(&state.db)
        .find_all(query.try_into()?)
        .await?;
    let base = state.api_base();
    let href = format!("{base}/application-areas");
    Ok(Json(Paged::from_page(page, &href, |m| {
        ApplicationAreaResponse::new(m, &base)
    })))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Application Areas",
    operation_id = "getApplicationArea",
    summary = "Get an application area",
    params(("id" = Uuid, Path, description = "Application area ID")),
    responses(
        (status = 200, description = "Application area", body = ApplicationAreaResponse),
        (status = 404, description = "Application area not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id = %id))]
pub async fn get_application_area(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<ApplicationAreaResponse>, AppError> {
    let model = ApplicationAreaService::new(&state.db).find_by_id(id).await?;
    Ok(Json(ApplicationAreaResponse::new(model, &state.api_base())))
}

#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Application Areas",
    operation_id = "updateApplicationArea",
    summary = "Rename an application area",
    params(("id" = Uuid, Path, description = "Application area ID")),
    request_body = ApplicationAreaRequest,
    responses(
        (status = 200, description = "Application area updated", body = ApplicationAreaResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Application area not found (NOT_FOUND)", body = ErrorBody),
        (status = 409, description = "Name already taken (CONFLICT)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(id = %id))]
pub async fn update_application_area(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
    AppJson(payload): AppJson<ApplicationAreaRequest>,
) -> Result<Json<ApplicationAreaResponse>, AppError> {
    let model = ApplicationAreaService::new(&state.db)
        .update(id, payload)
        .await?;
    Ok(Json(ApplicationAreaResponse::new(model, &state.api_base())))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Application Areas",
    operation_id = "deleteApplicationArea",
    summary = "Delete an application area",
    params(("id" = Uuid, Path, description = "Application area ID")),
    responses(
        (status = 204, description = "Application area deleted"),
        (status = 404, description = "Application area not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id = %id))]
pub async fn delete_application_area(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    ApplicationAreaService::new(&state.db).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
