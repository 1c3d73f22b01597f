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
use crate::models::implementation::{ImplementationRequest, ImplementationResponse};
use crate::models::publication::PublicationResponse;
use crate::models::shared::{PageQuery, Paged, ReferenceRequest};
use crate::service::implementation::ImplementationService;
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/{algorithm_id}/implementations",
    tag = "Implementations",
    operation_id = "createImplementation",
    summary = "Create an implementation of an algorithm",
    params(("algorithm_id" = Uuid, Path, description = "Algorithm ID")),
    request_body = ImplementationRequest,
    responses(
        (status = 201, description = "Implementation created", body = ImplementationResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Algorithm not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(algorithm_id = %algorithm_id))]
pub async fn create_implementation(
    State(state): State<AppState>,
    AppPath(algorithm_id): AppPath<Uuid>,
    AppJson(payload): AppJson<ImplementationRequest>,
) -> Result<impl IntoResponse, AppError> {
    let model = ImplementationService::new(&state.db)
        .create(algorithm_id, payload)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(ImplementationResponse::new(model, &state.api_base())),
    ))
}

#[utoipa::path(
    get,
    path = "/{algorithm_id}/implementations",
    tag = "Implementations",
    operation_id = "listAlgorithmImplementations",
    summary = "List the implementations of an algorithm",
    params(("algorithm_id" = Uuid, Path, description = "Algorithm ID"), PageQuery),
    responses(
        (status = 200, description = "Page of implementations", body = Paged<ImplementationResponse>),
        (status = 404, description = "Algorithm not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, query), fields(algorithm_id = %algorithm_id))]
pub async fn list_algorithm_implementations(
    State(state): State<AppState>,
    AppPath(algorithm_id): AppPath<Uuid>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Paged<ImplementationResponse>>, AppError> {
    let page = ImplementationService::new(&state.db)
        .find_by_algorithm(algorithm_id, query.try_into()?)
        .await?;
    let base = state.api_base();
    let href = format!("{}/implementations", links::algorithm_href(&base, algorithm_id));
    Ok(Json(Paged::from_page(page, &href, |m| {
        ImplementationResponse::new(m, &base)
    })))
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Implementations",
    operation_id = "listImplementations",
    summary = "List implementations of all algorithms",
    params(PageQuery),
    responses((status = 200, description = "Page of implementations", body = Paged<ImplementationResponse>)),
)]
#[instrument(skip(state, query))]
pub async fn list_implementations(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Paged<ImplementationResponse>>, AppError> {
    let page = ImplementationService::new(&state.db)
        .find_all(query.try_into()?)
        .await?;
    let base = state.api_base();
    let href = format!("{base}/implementations");
    Ok(Json(Paged::from_page(page, &href, |m| {
        ImplementationResponse::new(m, &base)
    })))
}

#[utoipa::path(
    get,
    path = "/{algorithm_id}/implementations/{id}",
    tag = "Implementations",
    operation_id = "getImplementation",
    summary = "Get an implementation",
    params(
        ("algorithm_id" = Uuid, Path, description = "Algorithm ID"),
        ("id" = Uuid, Path, description = "Implementation ID"),
    ),
    responses(
        (status = 200, description = "Implementation", body = ImplementationResponse),
        (status = 404, description = "Not found for this algorithm (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(algorithm_id = %algorithm_id, id = %id))]
pub async fn get_implementation(
    State(state): State<AppState>,
    AppPath((algorithm_id, id)): AppPath<(Uuid, Uuid)>,
) -> Result<Json<ImplementationResponse>, AppError> {
    let model = ImplementationService::new(&state.db)
        .find_in_algorithm(algorithm_id, id)
        .await?;
    Ok(Json(ImplementationResponse::new(model, &state.api_base())))
}

#[utoipa::path(
    put,
    path = "/{algorithm_id}/implementations/{id}",
    tag = "Implementations",
    operation_id = "updateImplementation",
    summary = "Update an implementation",
    description = "Replaces every scalar field; omitted optional fields are cleared.",
    params(
        ("algorithm_id" = Uuid, Path, description = "Algorithm ID"),
        ("id" = Uuid, Path, description = "Implementation ID"),
    ),
    request_body = ImplementationRequest,
    responses(
        (status = 200, description = "Implementation updated", body = ImplementationResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Not found for this algorithm (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(algorithm_id = %algorithm_id, id = %id))]
pub async fn update_implementation(
    State(state): State<AppState>,
    AppPath((algorithm_id, id)): AppPath<(Uuid, Uuid)>,
    AppJson(payload): AppJson<ImplementationRequest>,
) -> Result<Json<ImplementationResponse>, AppError> {
    let model = ImplementationService::new(&state.db)
        .update(algorithm_id, id, payload)
        .await?;
    Ok(Json(ImplementationResponse::new(model, &state.api_base())))
}

#[utoipa::path(
    delete,
    path = "/{algorithm_id}/implementations/{id}",
    tag = "Implementations",
    operation_id = "deleteImplementation",
    summary = "Delete an implementation",
    description = "Fails with 409 while the implementation still has packages.",
    params(
        ("algorithm_id" = Uuid, Path, description = "Algorithm ID"),
        ("id" = Uuid, Path, description = "Implementation ID"),
    ),
    responses(
        (status = 204, description = "Implementation deleted"),
        (status = 404, description = "Not found for this algorithm (NOT_FOUND)", body = ErrorBody),
        (status = 409, description = "Packages exist (CONFLICT)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(algorithm_id = %algorithm_id, id = %id))]
pub async fn delete_implementation(
    State(state): State<AppState>,
    AppPath((algorithm_id, id)): AppPath<(Uuid, Uuid)>,
) -> Result<impl IntoResponse, AppError> {
    ImplementationService::new(&state.db)
        .delete(algorithm_id, id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/{implementation_id}/publications",
    tag = "Implementations",
    operation_id = "listImplementationPublications",
    summary = "List the publications of an implementation",
    params(("implementation_id" = Uuid, Path, description = "Implementation ID"), PageQuery),
    responses(
        (status = 200, description = "Page of publications", body = Paged<PublicationResponse>),
        (status = 404, description = "Implementation not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, query), fields(id = %id))]
pub async fn list_implementation_publications(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Paged<PublicationResponse>>, AppError> {
    let page = ImplementationService::new(&state.db)
        .find_publications(id, query.try_into()?)
        .await?;
    let base = state.api_base();
    let href = format!("{base}/implementations/{id}/publications");
    Ok(Json(Paged::from_page(page, &href, |m| {
        PublicationResponse::new(m, &base)
    })))
}

#[utoipa::path(
    post,
    path = "/{implementation_id}/publications",
    tag = "Implementations",
    operation_id = "linkImplementationPublication",
    summary = "Link a publication to an implementation",
    description = "Linking an already linked publication is a no-op.",
    params(("implementation_id" = Uuid, Path, description = "Implementation ID")),
    request_body = ReferenceRequest,
    responses(
        (status = 204, description = "Publication linked"),
        (status = 404, description = "Implementation or publication not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(id = %id, publication_id = %payload.id))]
pub async fn link_implementation_publication(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
    AppJson(payload): AppJson<ReferenceRequest>,
) -> Result<impl IntoResponse, AppError> {
    ImplementationService::new(&state.db)
        .link_publication(id, payload.id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    delete,
    path = "/{implementation_id}/publications/{publication_id}",
    tag = "Implementations",
    operation_id = "unlinkImplementationPublication",
    summary = "Unlink a publication from an implementation",
    params(
        ("implementation_id" = Uuid, Path, description = "Implementation ID"),
        ("publication_id" = Uuid, Path, description = "Publication ID"),
    ),
    responses(
        (status = 204, description = "Publication unlinked"),
        (status = 404, description = "Implementation or link not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id = %id, publication_id = %publication_id))]
pub async fn unlink_implementation_publication(
    State(state): State<AppState>,
    AppPath((id, publication_id)): AppPath<(Uuid, Uuid)>,
) -> Result<impl IntoResponse, AppError> {
    ImplementationService::new(&state.db)
        .unlink_publication(id, publication_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
