//! File, image, and folder handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};

use filestash_core::types::PageRequest;

use crate::dto::request::{CreateFileBody, DataQuery, ListFilesQuery};
use crate::dto::response::FileResponse;
use crate::error::ApiError;
use crate::extractors::{AuthUser, JsonBody, MaybeAuthUser};
use crate::state::AppState;

/// POST /files
pub async fn create_file(
    State(state): State<AppState>,
    auth: AuthUser,
    JsonBody(body): JsonBody<CreateFileBody>,
) -> Result<(StatusCode, Json<FileResponse>), ApiError> {
    let record = state
        .file_service
        .create(Some(auth.context()), body.into())
        .await?;
    Ok((StatusCode::CREATED, Json(record.into())))
}

/// GET /files/{id}
pub async fn get_file(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<FileResponse>, ApiError> {
    let record = state.file_service.get_by_id(Some(auth.context()), &id).await?;
    Ok(Json(record.into()))
}

/// GET /files?parentId=...&page=...
pub async fn list_files(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<ListFilesQuery>,
) -> Result<Json<Vec<FileResponse>>, ApiError> {
    let page = PageRequest::from_query(query.page.as_deref());
    let records = state
        .file_service
        .list_by_parent(Some(auth.context()), query.parent_id.as_deref(), page)
        .await?;
    Ok(Json(records.into_iter().map(FileResponse::from).collect()))
}

/// GET /files/me?page=...
pub async fn list_my_files(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<ListFilesQuery>,
) -> Result<Json<Vec<FileResponse>>, ApiError> {
    let page = PageRequest::from_query(query.page.as_deref());
    let records = state
        .file_service
        .list_mine(Some(auth.context()), page)
        .await?;
    Ok(Json(records.into_iter().map(FileResponse::from).collect()))
}

/// PUT /files/{id}/publish
pub async fn publish_file(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<FileResponse>, ApiError> {
    let record = state
        .file_service
        .set_visibility(Some(auth.context()), &id, true)
        .await?;
    Ok(Json(record.into()))
}

/// PUT /files/{id}/unpublish
pub async fn unpublish_file(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<FileResponse>, ApiError> {
    let record = state
        .file_service
        .set_visibility(Some(auth.context()), &id, false)
        .await?;
    Ok(Json(record.into()))
}

/// DELETE /files/{id}
pub async fn delete_file(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.file_service.delete(Some(auth.context()), &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /files/{id}/data?size=...
pub async fn get_file_data(
    State(state): State<AppState>,
    caller: MaybeAuthUser,
    Path(id): Path<String>,
    Query(query): Query<DataQuery>,
) -> Result<Response, ApiError> {
    let result = state
        .download_service
        .get_data(caller.context(), &id, query.size.as_deref())
        .await?;

    Ok(([(header::CONTENT_TYPE, result.content_type)], result.data).into_response())
}
