use axum::{
    body::Body,
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use tokio_util::io::ReaderStream;
use tower_sessions::Session;

use crate::{
    model::{
        api::{IdBulkDestroyDto, MessageDto},
        datatable::ListResponseDto,
    },
    server::{
        controller::DOWNLOAD_TAG,
        datatable::ListParams,
        error::AppError,
        middleware::auth::AuthGuard,
        service::download::DownloadService,
        state::AppState,
    },
};

/// List export and import job records.
///
/// Records with an artifact carry a `link` to the download endpoint.
///
/// # Returns
/// - `200 OK` - Page of job records
/// - `401 Unauthorized` - User not authenticated
#[utoipa::path(
    get,
    path = "/api/dashboard/downloads/data",
    tag = DOWNLOAD_TAG,
    params(ListParams),
    responses(
        (status = 200, description = "Page of job records", body = ListResponseDto),
        (status = 401, description = "User not authenticated", body = MessageDto),
        (status = 500, description = "Internal server error", body = MessageDto)
    ),
)]
pub async fn data(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<ListParams>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let page = DownloadService::new(&state.db, &state.storage)
        .list(&params, &state.app_url)
        .await?;

    Ok((StatusCode::OK, Json(page.into_dto())))
}

/// Stream a job's artifact as an attachment.
///
/// # Returns
/// - `200 OK` - File body
/// - `401 Unauthorized` - User not authenticated
/// - `404 Not Found` - Unknown job, job without artifact, or file missing on disk
#[utoipa::path(
    get,
    path = "/api/dashboard/downloads/{id}/download",
    tag = DOWNLOAD_TAG,
    params(("id" = i32, Path, description = "Job record ID")),
    responses(
        (status = 200, description = "Artifact file"),
        (status = 401, description = "User not authenticated", body = MessageDto),
        (status = 404, description = "File not found", body = MessageDto)
    ),
)]
pub async fn download(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let artifact = DownloadService::new(&state.db, &state.storage)
        .artifact(id)
        .await?;

    let file = tokio::fs::File::open(&artifact.path).await?;
    let body = Body::from_stream(ReaderStream::new(file));

    let headers = [
        (
            header::CONTENT_TYPE,
            "application/octet-stream".to_string(),
        ),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", artifact.file_name),
        ),
    ];

    Ok((StatusCode::OK, headers, body))
}

/// Delete a job record and its artifact.
#[utoipa::path(
    delete,
    path = "/api/dashboard/downloads/{id}",
    tag = DOWNLOAD_TAG,
    params(("id" = i32, Path, description = "Job record ID")),
    responses(
        (status = 200, description = "Record deleted", body = MessageDto),
        (status = 401, description = "User not authenticated", body = MessageDto),
        (status = 404, description = "Download export not found", body = MessageDto)
    ),
)]
pub async fn destroy(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session).require(&[]).await?;

    DownloadService::new(&state.db, &state.storage)
        .destroy(id)
        .await?;

    Ok((
        StatusCode::OK,
        Json(MessageDto::new("Download deleted successfully")),
    ))
}

/// Delete several job records and their artifacts.
///
/// Fails with 404 and deletes nothing when any id is unknown.
#[utoipa::path(
    post,
    path = "/api/dashboard/downloads/bulk-destroy",
    tag = DOWNLOAD_TAG,
    request_body = IdBulkDestroyDto,
    responses(
        (status = 200, description = "Records deleted", body = MessageDto),
        (status = 400, description = "No IDs provided", body = MessageDto),
        (status = 401, description = "User not authenticated", body = MessageDto),
        (status = 404, description = "Download export not found", body = MessageDto)
    ),
)]
pub async fn bulk_destroy(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<IdBulkDestroyDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session).require(&[]).await?;

    DownloadService::new(&state.db, &state.storage)
        .bulk_destroy(&payload.ids)
        .await?;

    Ok((
        StatusCode::OK,
        Json(MessageDto::new("Downloads deleted successfully")),
    ))
}
