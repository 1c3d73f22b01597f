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
use crate::models::algorithm::AlgorithmResponse;
use crate::models::implementation::ImplementationResponse;
use crate::models::publication::{PublicationRequest, PublicationResponse};
use crate::models::shared::{PageQuery, Paged};
use crate::service::publication::PublicationService;
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/",
    tag = "Publications",
    operation_id = "createPublication",
    summary = "Create a publication",
    request_body = PublicationRequest,
    responses(
        (status = 201, description = "Publication created", body = PublicationResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload))]
pub async fn create_publication(
    State(state): State<AppState>,
    AppJson(payload): AppJson<PublicationRequest>,
) -> Result<impl IntoResponse, AppError> {
    let model = PublicationService::new(&state.db).create(payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(PublicationResponse::new(model, &state.api_base())),
    ))
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Publications",
    operation_id = "listPublications",
    summary = "List publications",
    params(PageQuery),
    responses((status = 200, description = "Page of publications", body = Paged<PublicationResponse>)),
)]
#[instrument(skip(state, query))]
pub async fn list_publications(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Paged<PublicationResponse>>, AppError> {
    let page = PublicationService::new(&state.db)
        .find_all(query.try_into()?)
        .await?;
    let base = state.api_base();
    let href = format!("{base}/publications");
    Ok(Json(Paged::from_page(page, &href, |m| {
        PublicationResponse::new(m, &base)
    })))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Publications",
    operation_id = "getPublication",
    summary = "Get a publication",
    params(("id" = Uuid, Path, description = "Publication ID")),
    responses(
        (status = 200, description = "Publication", body = PublicationResponse),
        (status = 404, description = "Publication not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id = %id))]
pub async fn get_publication(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<PublicationResponse>, AppError> {
    let model = PublicationService::new(&state.db).find_by_id(id).await?;
    Ok(Json(PublicationResponse::new(model, &state.api_base())))
}

#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Publications",
    operation_id = "updatePublication",
    summary = "Update a publication",
    params(("id" = Uuid, Path, description = "Publication ID")),
    request_body = PublicationRequest,
    responses(
        (status = 200, description = "Publication updated", body = PublicationResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Publication not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(id = %id))]
pub async fn update_publication(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
    AppJson(payload): AppJson<PublicationRequest>,
) -> Result<Json<PublicationResponse>, AppError> {
    let model = PublicationService::new(&state.db)
        .update(id, payload)
        .await?;
    Ok(Json(PublicationResponse::new(model, &state.api_base())))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Publications",
    operation_id = "deletePublication",
    summary = "Delete a publication",
    description = "Also removes the publication from every algorithm and implementation citing it.",
    params(("id" = Uuid, Path, description = "Publication ID")),
    responses(
        (status = 204, description = "Publication deleted"),
        (status = 404, description = "Publication not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id = %id))]
pub async fn delete_publication(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    PublicationService::new(&state.db).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/{id}/algorithms",
    tag = "Publications",
    operation_id = "listPublicationAlgorithms",
    summary = "List the algorithms citing a publication",
    params(("id" = Uuid, Path, description = "Publication ID"), PageQuery),
    responses(
        (status = 200, description = "Page of algorithms", body = Paged<AlgorithmResponse>),
        (status = 404, description = "Publication not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, query), fields(id = %id))]
pub async fn list_publication_algorithms(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Paged<AlgorithmResponse>>, AppError> {
    let page = PublicationService::new(&state.db)
        .find_algorithms(id, query.try_into()?)
        .await?;
    let base = state.api_base();
    let href = format!("{}/algorithms", links::publication_href(&base, id));
    Ok(Json(Paged::from_page(page, &href, |m| {
        AlgorithmResponse::new(m, &base)
    })))
}

#[utoipa::path(
    get,
    path = "/{id}/implementations",
    tag = "Publications",
    operation_id = "listPublicationImplementations",
    summary = "List the implementations citing a publication",
    params(("id" = Uuid, Path, description = "Publication ID"), PageQuery),
    responses(
        (status = 200, description = "Page of implementations", body = Paged<ImplementationResponse>),
        (status = 404, description = "Publication not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, query), fields(id = %id))]
pub async fn list_publication_implementations(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Paged<ImplementationResponse>>, AppError> {
    let page = PublicationService::new(&state.db)
        .find_implementations(id, query.try_into()?)
        .await?;
    let base = state.api_base();
    let href = format!("{}/implementations", links::publication_href(&base, id));
    Ok(Json(Paged::from_page(page, &href, |m| {
        ImplementationResponse::new(m, &base)
    })))
}
