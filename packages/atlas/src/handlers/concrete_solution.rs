use axum::Json;
use axum::extract::{Multipart, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use tracing::instrument;
use uuid::Uuid;

use super::file::{content_response, read_upload};
use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::extractors::path::AppPath;
use crate::links;
use crate::models::concrete_solution::{
    ConcreteSolutionResponse, CreateConcreteSolutionRequest, UpdateConcreteSolutionRequest,
};
use crate::models::file::FileResponse;
use crate::models::shared::{PageQuery, Paged};
use crate::service::concrete_solution::ConcreteSolutionService;
use crate::service::file::FileService;
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/",
    tag = "Concrete Solutions",
    operation_id = "createConcreteSolution",
    summary = "Create a concrete solution of a pattern",
    description = "Creates a concrete solution owned by the pattern in the path. \
        A new solution never carries a file; upload one through the file endpoint.",
    params(("pattern_id" = Uuid, Path, description = "Pattern ID")),
    request_body = CreateConcreteSolutionRequest,
    responses(
        (status = 201, description = "Concrete solution created", body = ConcreteSolutionResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(pattern_id = %pattern_id))]
pub async fn create_concrete_solution(
    State(state): State<AppState>,
    AppPath(pattern_id): AppPath<Uuid>,
    AppJson(payload): AppJson<CreateConcreteSolutionRequest>,
) -> Result<impl IntoResponse, AppError> {
    let model = ConcreteSolutionService::new(&state.db)
        .create(pattern_id, payload)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(ConcreteSolutionResponse::new(model, &state.api_base())),
    ))
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Concrete Solutions",
    operation_id = "listPatternConcreteSolutions",
    summary = "List the concrete solutions of a pattern",
    params(("pattern_id" = Uuid, Path, description = "Pattern ID"), PageQuery),
    responses(
        (status = 200, description = "Page of concrete solutions", body = Paged<ConcreteSolutionResponse>),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, query), fields(pattern_id = %pattern_id))]
pub async fn list_pattern_concrete_solutions(
    State(state): State<AppState>,
    AppPath(pattern_id): AppPath<Uuid>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Paged<ConcreteSolutionResponse>>, AppError> {
    let page = ConcreteSolutionService::new(&state.db)
        .find_by_pattern(pattern_id, query.try_into()?)
        .await?;
    let base = state.api_base();
    let href = links::pattern_concrete_solutions_href(&base, pattern_id);
    Ok(Json(Paged::from_page(page, &href, |m| {
        ConcreteSolutionResponse::new(m, &base)
    })))
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Concrete Solutions",
    operation_id = "listConcreteSolutions",
    summary = "List concrete solutions of all patterns",
    params(PageQuery),
    responses(
        (status = 200, description = "Page of concrete solutions", body = Paged<ConcreteSolutionResponse>),
    ),
)]
#[instrument(skip(state, query))]
pub async fn list_concrete_solutions(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Paged<ConcreteSolutionResponse>>, AppError> {
    let page = ConcreteSolutionService::new(&state.db)
        .find_all(query.try_into()?)
        .await?;
    let base = state.api_base();
    let href = format!("{base}/concrete-solutions");
    Ok(Json(Paged::from_page(page, &href, |m| {
        ConcreteSolutionResponse::new(m, &base)
    })))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Concrete Solutions",
    operation_id = "getConcreteSolution",
    summary = "Get a concrete solution",
    params(
        ("pattern_id" = Uuid, Path, description = "Pattern ID"),
        ("id" = Uuid, Path, description = "Concrete solution ID"),
    ),
    responses(
        (status = 200, description = "Concrete solution", body = ConcreteSolutionResponse),
        (status = 404, description = "Not found in this pattern (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(pattern_id = %pattern_id, id = %id))]
pub async fn get_concrete_solution(
    State(state): State<AppState>,
    AppPath((pattern_id, id)): AppPath<(Uuid, Uuid)>,
) -> Result<Json<ConcreteSolutionResponse>, AppError> {
    let model = ConcreteSolutionService::new(&state.db)
        .find_in_pattern(pattern_id, id)
        .await?;
    Ok(Json(ConcreteSolutionResponse::new(model, &state.api_base())))
}

#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Concrete Solutions",
    operation_id = "updateConcreteSolution",
    summary = "Update a concrete solution",
    description = "Overwrites name, description and (optionally) the owning pattern. \
        The attached file and the solution type are never changed.",
    params(
        ("pattern_id" = Uuid, Path, description = "Pattern ID"),
        ("id" = Uuid, Path, description = "Concrete solution ID"),
    ),
    request_body = UpdateConcreteSolutionRequest,
    responses(
        (status = 200, description = "Concrete solution updated", body = ConcreteSolutionResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Not found in this pattern (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(pattern_id = %pattern_id, id = %id))]
pub async fn update_concrete_solution(
    State(state): State<AppState>,
    AppPath((pattern_id, id)): AppPath<(Uuid, Uuid)>,
    AppJson(payload): AppJson<UpdateConcreteSolutionRequest>,
) -> Result<Json<ConcreteSolutionResponse>, AppError> {
    let model = ConcreteSolutionService::new(&state.db)
        .update(pattern_id, id, payload)
        .await?;
    Ok(Json(ConcreteSolutionResponse::new(model, &state.api_base())))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Concrete Solutions",
    operation_id = "deleteConcreteSolution",
    summary = "Delete a concrete solution",
    description = "Deletes the solution and its attached file in one transaction.",
    params(
        ("pattern_id" = Uuid, Path, description = "Pattern ID"),
        ("id" = Uuid, Path, description = "Concrete solution ID"),
    ),
    responses(
        (status = 204, description = "Concrete solution deleted"),
        (status = 404, description = "Not found in this pattern (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(pattern_id = %pattern_id, id = %id))]
pub async fn delete_concrete_solution(
    State(state): State<AppState>,
    AppPath((pattern_id, id)): AppPath<(Uuid, Uuid)>,
) -> Result<impl IntoResponse, AppError> {
    let files = FileService::new(&*state.blob_store);
    ConcreteSolutionService::new(&state.db)
        .delete(&files, pattern_id, id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/{id}/file",
    tag = "Concrete Solutions",
    operation_id = "uploadConcreteSolutionFile",
    summary = "Upload the file of a concrete solution",
    description = "Stores the `file` multipart field and attaches it to the solution. \
        A previously attached file is deleted.",
    params(
        ("pattern_id" = Uuid, Path, description = "Pattern ID"),
        ("id" = Uuid, Path, description = "Concrete solution ID"),
    ),
    request_body(content_type = "multipart/form-data", description = "File upload"),
    responses(
        (status = 201, description = "File attached", body = FileResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Not found in this pattern (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, multipart), fields(pattern_id = %pattern_id, id = %id))]
pub async fn upload_concrete_solution_file(
    State(state): State<AppState>,
    AppPath((pattern_id, id)): AppPath<(Uuid, Uuid)>,
    multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let service = ConcreteSolutionService::new(&state.db);
    let solution = service.find_in_pattern(pattern_id, id).await?;

    let files = FileService::new(&*state.blob_store);
    let upload = read_upload(multipart, &files).await?;
    let file = service.add_file(&files, pattern_id, id, upload).await?;

    let owner = links::concrete_solution_href(&state.api_base(), &solution);
    Ok((StatusCode::CREATED, Json(FileResponse::new(file, &owner))))
}

#[utoipa::path(
    get,
    path = "/{id}/file",
    tag = "Concrete Solutions",
    operation_id = "getConcreteSolutionFile",
    summary = "Get the file metadata of a concrete solution",
    params(
        ("pattern_id" = Uuid, Path, description = "Pattern ID"),
        ("id" = Uuid, Path, description = "Concrete solution ID"),
    ),
    responses(
        (status = 200, description = "Attached file", body = FileResponse),
        (status = 404, description = "Solution or file not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(pattern_id = %pattern_id, id = %id))]
pub async fn get_concrete_solution_file(
    State(state): State<AppState>,
    AppPath((pattern_id, id)): AppPath<(Uuid, Uuid)>,
) -> Result<Json<FileResponse>, AppError> {
    let (solution, file) = ConcreteSolutionService::new(&state.db)
        .find_linked_file(pattern_id, id)
        .await?;

    let owner = links::concrete_solution_href(&state.api_base(), &solution);
    Ok(Json(FileResponse::new(file, &owner)))
}

#[utoipa::path(
    get,
    path = "/{id}/file/content",
    tag = "Concrete Solutions",
    operation_id = "downloadConcreteSolutionFile",
    summary = "Download the file content of a concrete solution",
    description = "Streams the content. Supports ETag-based caching via If-None-Match.",
    params(
        ("pattern_id" = Uuid, Path, description = "Pattern ID"),
        ("id" = Uuid, Path, description = "Concrete solution ID"),
    ),
    responses(
        (status = 200, description = "File content"),
        (status = 304, description = "Not Modified (ETag match)"),
        (status = 404, description = "Solution or file not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, headers), fields(pattern_id = %pattern_id, id = %id))]
pub async fn download_concrete_solution_file(
    State(state): State<AppState>,
    AppPath((pattern_id, id)): AppPath<(Uuid, Uuid)>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let (_, file) = ConcreteSolutionService::new(&state.db)
        .find_linked_file(pattern_id, id)
        .await?;
    content_response(&file, &headers, &FileService::new(&*state.blob_store)).await
}

#[utoipa::path(
    delete,
    path = "/{id}/file",
    tag = "Concrete Solutions",
    operation_id = "deleteConcreteSolutionFile",
    summary = "Delete the file of a concrete solution",
    params(
        ("pattern_id" = Uuid, Path, description = "Pattern ID"),
        ("id" = Uuid, Path, description = "Concrete solution ID"),
    ),
    responses(
        (status = 204, description = "File deleted"),
        (status = 404, description = "Solution or file not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(pattern_id = %pattern_id, id = %id))]
pub async fn delete_concrete_solution_file(
    State(state): State<AppState>,
    AppPath((pattern_id, id)): AppPath<(Uuid, Uuid)>,
) -> Result<impl IntoResponse, AppError> {
    let files = FileService::new(&*state.blob_store);
    ConcreteSolutionService::new(&state.db)
        .delete_file(&files, pattern_id, id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
