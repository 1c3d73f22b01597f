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
use crate::models::algorithm::{AlgorithmRequest, AlgorithmResponse};
use crate::models::application_area::ApplicationAreaResponse;
use crate::models::publication::PublicationResponse;
use crate::models::shared::{PageQuery, Paged, ReferenceRequest};
use crate::service::algorithm::AlgorithmService;
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/",
    tag = "Algorithms",
    operation_id = "createAlgorithm",
    summary = "Create an algorithm",
    request_body = AlgorithmRequest,
    responses(
        (status = 201, description = "Algorithm created", body = AlgorithmResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(name = %payload.name))]
pub async fn create_algorithm(
    State(state): State<AppState>,
    AppJson(payload): AppJson<AlgorithmRequest>,
) -> Result<impl IntoResponse, AppError> {
    let model = AlgorithmService::new(&state.db).create(payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(AlgorithmResponse::new(model, &state.api_base())),
    ))
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Algorithms",
    operation_id = "listAlgorithms",
    summary = "List algorithms",
    params(PageQuery),
    responses((status = 200, description = "Page of algorithms", body = Paged<AlgorithmResponse>)),
)]
#[instrument(skip(state, query))]
pub async fn list_algorithms(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Paged<AlgorithmResponse>>, AppError> {
    let page = AlgorithmService::new(&state.db).find_all(query.try_into()?).await?;
    let base = state.api_base();
    let href = format!("{base}/algorithms");
    Ok(Json(Paged::from_page(page, &href, |m| {
        AlgorithmResponse::new(m, &base)
    })))
}

#[utoipa::path(
    get,
    path = "/{algorithm_id}",
    tag = "Algorithms",
    operation_id = "getAlgorithm",
    summary = "Get an algorithm",
    params(("algorithm_id" = Uuid, Path, description = "Algorithm ID")),
    responses(
        (status = 200, description = "Algorithm", body = AlgorithmResponse),
        (status = 404, description = "Algorithm not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id = %id))]
pub async fn get_algorithm(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<AlgorithmResponse>, AppError> {
    let model = AlgorithmService::new(&state.db).find_by_id(id).await?;
    Ok(Json(AlgorithmResponse::new(model, &state.api_base())))
}

#[utoipa::path(
    put,
    path = "/{algorithm_id}",
    tag = "Algorithms",
    operation_id = "updateAlgorithm",
    summary = "Update an algorithm",
    params(("algorithm_id" = Uuid, Path, description = "Algorithm ID")),
    request_body = AlgorithmRequest,
    responses(
        (status = 200, description = "Algorithm updated", body = AlgorithmResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Algorithm not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(id = %id))]
pub async fn update_algorithm(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
    AppJson(payload): AppJson<AlgorithmRequest>,
) -> Result<Json<AlgorithmResponse>, AppError> {
    let model = AlgorithmService::new(&state.db).update(id, payload).await?;
    Ok(Json(AlgorithmResponse::new(model, &state.api_base())))
}

#[utoipa::path(
    delete,
    path = "/{algorithm_id}",
    tag = "Algorithms",
    operation_id = "deleteAlgorithm",
    summary = "Delete an algorithm",
    description = "Fails with 409 while the algorithm still has implementations. \
        Publication and application-area links are removed.",
    params(("algorithm_id" = Uuid, Path, description = "Algorithm ID")),
    responses(
        (status = 204, description = "Algorithm deleted"),
        (status = 404, description = "Algorithm not found (NOT_FOUND)", body = ErrorBody),
        (status = 409, description = "Implementations exist (CONFLICT)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id = %id))]
pub async fn delete_algorithm(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    AlgorithmService::new(&state.db).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/{algorithm_id}/publications",
    tag = "Algorithms",
    operation_id = "listAlgorithmPublications",
    summary = "List the publications of an algorithm",
    params(("algorithm_id" = Uuid, Path, description = "Algorithm ID"), PageQuery),
    responses(
        (status = 200, description = "Page of publications", body = Paged<PublicationResponse>),
        (status = 404, description = "Algorithm not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, query), fields(id = %id))]
pub async fn list_algorithm_publications(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Paged<PublicationResponse>>, AppError> {
    let page = AlgorithmService::new(&state.db)
        .find_publications(id, query.try_into()?)
        .await?;
    let base = state.api_base();
    let href = format!("{}/publications", links::algorithm_href(&base, id));
    Ok(Json(Paged::from_page(page, &href, |m| {
        PublicationResponse::new(m, &base)
    })))
}

#[utoipa::path(
    post,
    path = "/{algorithm_id}/publications",
    tag = "Algorithms",
    operation_id = "linkAlgorithmPublication",
    summary = "Link a publication to an algorithm",
    description = "Linking an already linked publication is a no-op.",
    params(("algorithm_id" = Uuid, Path, description = "Algorithm ID")),
    request_body = ReferenceRequest,
    responses(
        (status = 204, description = "Publication linked"),
        (status = 404, description = "Algorithm or publication not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(id = %id, publication_id = %payload.id))]
pub async fn link_algorithm_publication(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
    AppJson(payload): AppJson<ReferenceRequest>,
) -> Result<impl IntoResponse, AppError> {
    AlgorithmService::new(&state.db)
        .link_publication(id, payload.id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    delete,
    path = "/{algorithm_id}/publications/{publication_id}",
    tag = "Algorithms",
    operation_id = "unlinkAlgorithmPublication",
    summary = "Unlink a publication from an algorithm",
    params(
        ("algorithm_id" = Uuid, Path, description = "Algorithm ID"),
        ("publication_id" = Uuid, Path, description = "Publication ID"),
    ),
    responses(
        (status = 204, description = "Publication unlinked"),
        (status = 404, description = "Algorithm or link not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id = %id, publication_id = %publication_id))]
pub async fn unlink_algorithm_publication(
    State(state): State<AppState>,
    AppPath((id, publication_id)): AppPath<(Uuid, Uuid)>,
) -> Result<impl IntoResponse, AppError> {
    AlgorithmService::new(&state.db)
        .unlink_publication(id, publication_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/{algorithm_id}/application-areas",
    tag = "Algorithms",
    operation_id = "listAlgorithmApplicationAreas",
    summary = "List the application areas of an algorithm",
    params(("algorithm_id" = Uuid, Path, description = "Algorithm ID"), PageQuery),
    responses(
        (status = 200, description = "Page of application areas", body = Paged<ApplicationAreaResponse>),
        (status = 404, description = "Algorithm not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, query), fields(id = %id))]
pub async fn list_algorithm_application_areas(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Paged<ApplicationAreaResponse>>, AppError> {
    let page = AlgorithmService::new(&state.db)
        .find_application_areas(id, query.try_into()?)
        .await?;
    let base = state.api_base();
    let href = format!("{}/application-areas", links::algorithm_href(&base, id));
    Ok(Json(Paged::from_page(page, &href, |m| {
        ApplicationAreaResponse::new(m, &base)
    })))
}

#[utoipa::path(
    post,
    path = "/{algorithm_id}/application-areas",
    tag = "Algorithms",
    operation_id = "linkAlgorithmApplicationArea",
    summary = "Link an application area to an algorithm",
    description = "Linking an already linked application area is a no-op.",
    params(("algorithm_id" = Uuid, Path, description = "Algorithm ID")),
    request_body = ReferenceRequest,
    responses(
        (status = 204, description = "Application area linked"),
        (status = 404, description = "Algorithm or application area not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(id = %id, application_area_id = %payload.id))]
pub async fn link_algorithm_application_area(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
    AppJson(payload): AppJson<ReferenceRequest>,
) -> Result<impl IntoResponse, AppError> {
    AlgorithmService::new(&state.db)
        .link_application_area(id, payload.id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    delete,
    path = "/{algorithm_id}/application-areas/{area_id}",
    tag = "Algorithms",
    operation_id = "unlinkAlgorithmApplicationArea",
    summary = "Unlink an application area from an algorithm",
    params(
        ("algorithm_id" = Uuid, Path, description = "Algorithm ID"),
        ("area_id" = Uuid, Path, description = "Application area ID"),
    ),
    responses(
        (status = 204, description = "Application area unlinked"),
        (status = 404, description = "Algorithm or link not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id = %id, area_id = %area_id))]
pub async fn unlink_algorithm_application_area(
    State(state): State<AppState>,
    AppPath((id, area_id)): AppPath<(Uuid, Uuid)>,
) -> Result<impl IntoResponse, AppError> {
    AlgorithmService::new(&state.db)
        .unlink_application_area(id, area_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
