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
use crate::models::file::FileResponse;
use crate::models::implementation_package::{
    ImplementationPackageRequest, ImplementationPackageResponse,
};
use crate::models::shared::{PageQuery, Paged};
use crate::service::file::FileService;
use crate::service::implementation_package::ImplementationPackageService;
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/",
    tag = "Implementation Packages",
    operation_id = "createImplementationPackage",
    summary = "Create a package of an implementation",
    params(("implementation_id" = Uuid, Path, description = "Implementation ID")),
    request_body = ImplementationPackageRequest,
    responses(
        (status = 201, description = "Package created", body = ImplementationPackageResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Implementation not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(implementation_id = %implementation_id))]
pub async fn create_implementation_package(
    State(state): State<AppState>,
    AppPath(implementation_id): AppPath<Uuid>,
    AppJson(payload): AppJson<ImplementationPackageRequest>,
) -> Result<impl IntoResponse, AppError> {
    let model = ImplementationPackageService::new(&state.db)
        .create(implementation_id, payload)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(ImplementationPackageResponse::new(
            model,
            None,
            &state.api_base(),
        )),
    ))
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Implementation Packages",
    operation_id = "listImplementationPackages",
    summary = "List the packages of an implementation",
    params(("implementation_id" = Uuid, Path, description = "Implementation ID"), PageQuery),
    responses(
        (status = 200, description = "Page of packages", body = Paged<ImplementationPackageResponse>),
        (status = 404, description = "Implementation not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, query), fields(implementation_id = %implementation_id))]
pub async fn list_implementation_packages(
    State(state): State<AppState>,
    AppPath(implementation_id): AppPath<Uuid>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Paged<ImplementationPackageResponse>>, AppError> {
    let service = ImplementationPackageService::new(&state.db);
    let page = service
        .find_by_implementation(implementation_id, query.try_into()?)
        .await?;

    let mut file_ids = Vec::with_capacity(page.items.len());
    for package in &page.items {
        file_ids.push(service.file_id(package.id).await?);
    }

    let base = state.api_base();
    let href = links::implementation_packages_href(&base, implementation_id);
    let mut file_ids = file_ids.into_iter();
    Ok(Json(Paged::from_page(page, &href, |m| {
        ImplementationPackageResponse::new(m, file_ids.next().flatten(), &base)
    })))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Implementation Packages",
    operation_id = "getImplementationPackage",
    summary = "Get a package",
    params(
        ("implementation_id" = Uuid, Path, description = "Implementation ID"),
        ("id" = Uuid, Path, description = "Package ID"),
    ),
    responses(
        (status = 200, description = "Package", body = ImplementationPackageResponse),
        (status = 404, description = "Not found for this implementation (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(implementation_id = %implementation_id, id = %id))]
pub async fn get_implementation_package(
    State(state): State<AppState>,
    AppPath((implementation_id, id)): AppPath<(Uuid, Uuid)>,
) -> Result<Json<ImplementationPackageResponse>, AppError> {
    let service = ImplementationPackageService::new(&state.db);
    let model = service.find_in_implementation(implementation_id, id).await?;
    let file_id = service.file_id(id).await?;
    Ok(Json(ImplementationPackageResponse::new(
        model,
        file_id,
        &state.api_base(),
    )))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Implementation Packages",
    operation_id = "deleteImplementationPackage",
    summary = "Delete a package",
    description = "Deletes the package and its attached file in one transaction.",
    params(
        ("implementation_id" = Uuid, Path, description = "Implementation ID"),
        ("id" = Uuid, Path, description = "Package ID"),
    ),
    responses(
        (status = 204, description = "Package deleted"),
        (status = 404, description = "Not found for this implementation (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(implementation_id = %implementation_id, id = %id))]
pub async fn delete_implementation_package(
    State(state): State<AppState>,
    AppPath((implementation_id, id)): AppPath<(Uuid, Uuid)>,
) -> Result<impl IntoResponse, AppError> {
    let files = FileService::new(&*state.blob_store);
    ImplementationPackageService::new(&state.db)
        .delete(&files, implementation_id, id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/{id}/file",
    tag = "Implementation Packages",
    operation_id = "uploadImplementationPackageFile",
    summary = "Upload the file of a package",
    description = "Stores the `file` multipart field and attaches it to the package. \
        A previously attached file is deleted.",
    params(
        ("implementation_id" = Uuid, Path, description = "Implementation ID"),
        ("id" = Uuid, Path, description = "Package ID"),
    ),
    request_body(content_type = "multipart/form-data", description = "File upload"),
    responses(
        (status = 201, description = "File attached", body = FileResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Not found for this implementation (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, multipart), fields(implementation_id = %implementation_id, id = %id))]
pub async fn upload_implementation_package_file(
    State(state): State<AppState>,
    AppPath((implementation_id, id)): AppPath<(Uuid, Uuid)>,
    multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let service = ImplementationPackageService::new(&state.db);
    service.find_in_implementation(implementation_id, id).await?;

    let files = FileService::new(&*state.blob_store);
    let upload = read_upload(multipart, &files).await?;
    let file = service
        .add_file(&files, implementation_id, id, upload)
        .await?;

    let owner = links::implementation_package_href(&state.api_base(), implementation_id, id);
    Ok((StatusCode::CREATED, Json(FileResponse::new(file, &owner))))
}

#[utoipa::path(
    get,
    path = "/{id}/file",
    tag = "Implementation Packages",
    operation_id = "getImplementationPackageFile",
    summary = "Get the file metadata of a package",
    params(
        ("implementation_id" = Uuid, Path, description = "Implementation ID"),
        ("id" = Uuid, Path, description = "Package ID"),
    ),
    responses(
        (status = 200, description = "Attached file", body = FileResponse),
        (status = 404, description = "Package or file not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(implementation_id = %implementation_id, id = %id))]
pub async fn get_implementation_package_file(
    State(state): State<AppState>,
    AppPath((implementation_id, id)): AppPath<(Uuid, Uuid)>,
) -> Result<Json<FileResponse>, AppError> {
    let file = ImplementationPackageService::new(&state.db)
        .find_linked_file(implementation_id, id)
        .await?;
    let owner = links::implementation_package_href(&state.api_base(), implementation_id, id);
    Ok(Json(FileResponse::new(file, &owner)))
}

#[utoipa::path(
    get,
    path = "/{id}/file/content",
    tag = "Implementation Packages",
    operation_id = "downloadImplementationPackageFile",
    summary = "Download the file content of a package",
    description = "Streams the content. Supports ETag-based caching via If-None-Match.",
    params(
        ("implementation_id" = Uuid, Path, description = "Implementation ID"),
        ("id" = Uuid, Path, description = "Package ID"),
    ),
    responses(
        (status = 200, description = "File content"),
        (status = 304, description = "Not Modified (ETag match)"),
        (status = 404, description = "Package or file not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, headers), fields(implementation_id = %implementation_id, id = %id))]
pub async fn download_implementation_package_file(
    State(state): State<AppState>,
    AppPath((implementation_id, id)): AppPath<(Uuid, Uuid)>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let file = ImplementationPackageService::new(&state.db)
        .find_linked_file(implementation_id, id)
        .await?;
    content_response(&file, &headers, &FileService::new(&*state.blob_store)).await
}

#[utoipa::path(
    delete,
    path = "/{id}/file",
    tag = "Implementation Packages",
    operation_id = "deleteImplementationPackageFile",
    summary = "Delete the file of a package",
    params(
        ("implementation_id" = Uuid, Path, description = "Implementation ID"),
        ("id" = Uuid, Path, description = "Package ID"),
    ),
    responses(
        (status = 204, description = "File deleted"),
        (status = 404, description = "Package or file not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(implementation_id = %implementation_id, id = %id))]
pub async fn delete_implementation_package_file(
    State(state): State<AppState>,
    AppPath((implementation_id, id)): AppPath<(Uuid, Uuid)>,
) -> Result<impl IntoResponse, AppError> {
    let files = FileService::new(&*state.blob_store);
    ImplementationPackageService::new(&state.db)
        .delete_file(&files, implementation_id, id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
