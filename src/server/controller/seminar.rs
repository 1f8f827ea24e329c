use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tower_sessions::Session;
use uuid::Uuid;

use crate::{
    model::{
        api::{ExportRequestDto, MessageDto, UuidBulkDestroyDto},
        datatable::ListResponseDto,
        payment::ImportFileDto,
        seminar::{SeminarDto, SeminarFormDto, SeminarStatusDto, SeminarStatusResponseDto},
    },
    server::{
        controller::{multipart::MultipartForm, SEMINAR_TAG},
        datatable::ListParams,
        error::{validation::ValidationErrors, AppError},
        jobs::JobTask,
        middleware::auth::AuthGuard,
        model::seminar::SeminarParams,
        service::{
            job::{export_headers, store_import, JobService},
            seminar::SeminarService,
        },
        state::AppState,
    },
};

/// List seminars.
///
/// Returns one page of live seminars projected to the dashboard columns: title,
/// description, schedule, created_by and is_active.
///
/// # Access Control
/// - Any authenticated user
///
/// # Arguments
/// - `state` - Application state containing the database connection
/// - `session` - User's session for authentication
/// - `params` - Search, ordering and pagination parameters
///
/// # Returns
/// - `200 OK` - Page of seminars with pagination metadata
/// - `401 Unauthorized` - User not authenticated
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    get,
    path = "/api/dashboard/seminars/data",
    tag = SEMINAR_TAG,
    params(ListParams),
    responses(
        (status = 200, description = "Page of seminars", body = ListResponseDto),
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

    let page = SeminarService::new(&state.db).list(&params).await?;

    Ok((StatusCode::OK, Json(page.into_dto())))
}

/// Create a seminar owned by the current user.
///
/// # Returns
/// - `201 Created` - Created seminar
/// - `401 Unauthorized` - User not authenticated
/// - `422 Unprocessable Entity` - Validation failed
#[utoipa::path(
    post,
    path = "/api/dashboard/seminars",
    tag = SEMINAR_TAG,
    request_body = SeminarFormDto,
    responses(
        (status = 201, description = "Created seminar", body = SeminarDto),
        (status = 401, description = "User not authenticated", body = MessageDto),
        (status = 422, description = "Validation failed", body = MessageDto)
    ),
)]
pub async fn store(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<SeminarFormDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let params = SeminarParams::from_dto(payload)?;
    let seminar = SeminarService::new(&state.db)
        .create(params, Some(user.id))
        .await?;

    Ok((StatusCode::CREATED, Json(seminar.into_dto())))
}

#[utoipa::path(
    get,
    path = "/api/dashboard/seminars/{id}",
    tag = SEMINAR_TAG,
    params(("id" = Uuid, Path, description = "Seminar ID")),
    responses(
        (status = 200, description = "Seminar", body = SeminarDto),
        (status = 401, description = "User not authenticated", body = MessageDto),
        (status = 404, description = "Seminar not found", body = MessageDto)
    ),
)]
pub async fn show(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let seminar = SeminarService::new(&state.db).show(id).await?;

    Ok((StatusCode::OK, Json(seminar.into_dto())))
}

/// Update a seminar.
///
/// `is_active` is left unchanged when omitted.
#[utoipa::path(
    put,
    path = "/api/dashboard/seminars/{id}",
    tag = SEMINAR_TAG,
    params(("id" = Uuid, Path, description = "Seminar ID")),
    request_body = SeminarFormDto,
    responses(
        (status = 200, description = "Updated seminar", body = SeminarDto),
        (status = 401, description = "User not authenticated", body = MessageDto),
        (status = 404, description = "Seminar not found", body = MessageDto),
        (status = 422, description = "Validation failed", body = MessageDto)
    ),
)]
pub async fn update(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<Uuid>,
    Json(payload): Json<SeminarFormDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let params = SeminarParams::from_dto(payload)?;
    let seminar = SeminarService::new(&state.db)
        .update(id, params, Some(user.id))
        .await?;

    Ok((StatusCode::OK, Json(seminar.into_dto())))
}

#[utoipa::path(
    delete,
    path = "/api/dashboard/seminars/{id}",
    tag = SEMINAR_TAG,
    params(("id" = Uuid, Path, description = "Seminar ID")),
    responses(
        (status = 200, description = "Seminar deleted", body = MessageDto),
        (status = 401, description = "User not authenticated", body = MessageDto),
        (status = 404, description = "Seminar not found", body = MessageDto)
    ),
)]
pub async fn destroy(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    SeminarService::new(&state.db)
        .destroy(id, Some(user.id))
        .await?;

    Ok((
        StatusCode::OK,
        Json(MessageDto::new("Seminar deleted successfully")),
    ))
}

/// Soft-delete several seminars.
///
/// # Returns
/// - `200 OK` - Named seminars deleted; unknown ids are ignored
/// - `400 Bad Request` - `ids` is empty
/// - `401 Unauthorized` - User not authenticated
#[utoipa::path(
    post,
    path = "/api/dashboard/seminars/bulk-destroy",
    tag = SEMINAR_TAG,
    request_body = UuidBulkDestroyDto,
    responses(
        (status = 200, description = "Seminars deleted", body = MessageDto),
        (status = 400, description = "No IDs provided", body = MessageDto),
        (status = 401, description = "User not authenticated", body = MessageDto)
    ),
)]
pub async fn bulk_destroy(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<UuidBulkDestroyDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    SeminarService::new(&state.db)
        .bulk_destroy(&payload.ids, Some(user.id))
        .await?;

    Ok((
        StatusCode::OK,
        Json(MessageDto::new("Seminars deleted successfully")),
    ))
}

#[utoipa::path(
    post,
    path = "/api/dashboard/seminars/{id}/update-status",
    tag = SEMINAR_TAG,
    params(("id" = Uuid, Path, description = "Seminar ID")),
    request_body = SeminarStatusDto,
    responses(
        (status = 200, description = "Status updated", body = SeminarStatusResponseDto),
        (status = 401, description = "User not authenticated", body = MessageDto),
        (status = 404, description = "Seminar not found", body = MessageDto),
        (status = 422, description = "Validation failed", body = MessageDto)
    ),
)]
pub async fn update_status(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<Uuid>,
    Json(payload): Json<SeminarStatusDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let Some(is_active) = payload.is_active else {
        return Err(
            ValidationErrors::single("is_active", "The is active field is required.").into(),
        );
    };

    let seminar = SeminarService::new(&state.db)
        .update_status(id, is_active, Some(user.id))
        .await?;

    Ok((
        StatusCode::OK,
        Json(SeminarStatusResponseDto {
            message: "Status updated successfully".to_string(),
            is_active: seminar.is_active,
        }),
    ))
}

/// Queue a spreadsheet export of every seminar.
///
/// The job record appears in the downloads list as "Seminar Download".
#[utoipa::path(
    post,
    path = "/api/dashboard/seminars/export",
    tag = SEMINAR_TAG,
    request_body = ExportRequestDto,
    responses(
        (status = 200, description = "Export queued", body = MessageDto),
        (status = 401, description = "User not authenticated", body = MessageDto),
        (status = 422, description = "Validation failed", body = MessageDto)
    ),
)]
pub async fn export(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<ExportRequestDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let headers = export_headers(payload.headers)?;
    JobService::new(&state.db, &state.jobs)
        .dispatch(JobTask::ExportSeminars { headers }, Some(user.id))
        .await?;

    Ok((
        StatusCode::OK,
        Json(MessageDto::new("Download request received successfully")),
    ))
}

/// Queue a spreadsheet import of seminars.
///
/// Columns: title, description, schedule, `active`/`inactive`. The first two rows
/// are skipped. Imported seminars are owned by the current user.
#[utoipa::path(
    post,
    path = "/api/dashboard/seminars/import",
    tag = SEMINAR_TAG,
    request_body(content = ImportFileDto, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Import queued", body = MessageDto),
        (status = 401, description = "User not authenticated", body = MessageDto),
        (status = 422, description = "Missing file or not xlsx/csv", body = MessageDto)
    ),
)]
pub async fn import(
    State(state): State<AppState>,
    session: Session,
    multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let mut form = MultipartForm::read(multipart).await?;
    let path = store_import(&state.storage, "seminars", form.take_file("file")).await?;

    JobService::new(&state.db, &state.jobs)
        .dispatch(
            JobTask::ImportSeminars {
                path,
                user_id: Some(user.id),
            },
            Some(user.id),
        )
        .await?;

    Ok((
        StatusCode::OK,
        Json(MessageDto::new("Import request received successfully")),
    ))
}
