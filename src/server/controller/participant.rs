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
        participant::{
            ParticipantDto, ParticipantFormDto, ParticipantStatusDto, ParticipantStatusResponseDto,
        },
        payment::ImportFileDto,
    },
    server::{
        controller::{multipart::MultipartForm, PARTICIPANT_TAG},
        datatable::ListParams,
        error::{validation::ValidationErrors, AppError},
        jobs::JobTask,
        middleware::auth::AuthGuard,
        model::participant::ParticipantParams,
        service::{
            job::{export_headers, store_import, JobService},
            participant::ParticipantService,
        },
        state::AppState,
    },
};

/// List participants with their seminar title.
#[utoipa::path(
    get,
    path = "/api/dashboard/participants/data",
    tag = PARTICIPANT_TAG,
    params(ListParams),
    responses(
        (status = 200, description = "Page of participants", body = ListResponseDto),
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

    let page = ParticipantService::new(&state.db).list(&params).await?;

    Ok((StatusCode::OK, Json(page.into_dto())))
}

/// Register a participant to a live seminar.
///
/// # Returns
/// - `201 Created` - Created participant
/// - `401 Unauthorized` - User not authenticated
/// - `422 Unprocessable Entity` - Validation failed or unknown seminar
#[utoipa::path(
    post,
    path = "/api/dashboard/participants",
    tag = PARTICIPANT_TAG,
    request_body = ParticipantFormDto,
    responses(
        (status = 201, description = "Created participant", body = ParticipantDto),
        (status = 401, description = "User not authenticated", body = MessageDto),
        (status = 422, description = "Validation failed", body = MessageDto)
    ),
)]
pub async fn store(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<ParticipantFormDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let params = ParticipantParams::from_dto(payload)?;
    let participant = ParticipantService::new(&state.db)
        .create(params, Some(user.id))
        .await?;

    Ok((StatusCode::CREATED, Json(participant.into_dto())))
}

#[utoipa::path(
    get,
    path = "/api/dashboard/participants/{id}",
    tag = PARTICIPANT_TAG,
    params(("id" = Uuid, Path, description = "Participant ID")),
    responses(
        (status = 200, description = "Participant", body = ParticipantDto),
        (status = 401, description = "User not authenticated", body = MessageDto),
        (status = 404, description = "Participant not found", body = MessageDto)
    ),
)]
pub async fn show(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let participant = ParticipantService::new(&state.db).show(id).await?;

    Ok((StatusCode::OK, Json(participant.into_dto())))
}

#[utoipa::path(
    put,
    path = "/api/dashboard/participants/{id}",
    tag = PARTICIPANT_TAG,
    params(("id" = Uuid, Path, description = "Participant ID")),
    request_body = ParticipantFormDto,
    responses(
        (status = 200, description = "Updated participant", body = ParticipantDto),
        (status = 401, description = "User not authenticated", body = MessageDto),
        (status = 404, description = "Participant not found", body = MessageDto),
        (status = 422, description = "Validation failed", body = MessageDto)
    ),
)]
pub async fn update(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<Uuid>,
    Json(payload): Json<ParticipantFormDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let params = ParticipantParams::from_dto(payload)?;
    let participant = ParticipantService::new(&state.db)
        .update(id, params, Some(user.id))
        .await?;

    Ok((StatusCode::OK, Json(participant.into_dto())))
}

#[utoipa::path(
    delete,
    path = "/api/dashboard/participants/{id}",
    tag = PARTICIPANT_TAG,
    params(("id" = Uuid, Path, description = "Participant ID")),
    responses(
        (status = 200, description = "Participant deleted", body = MessageDto),
        (status = 401, description = "User not authenticated", body = MessageDto),
        (status = 404, description = "Participant not found", body = MessageDto)
    ),
)]
pub async fn destroy(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    ParticipantService::new(&state.db)
        .destroy(id, Some(user.id))
        .await?;

    Ok((
        StatusCode::OK,
        Json(MessageDto::new("Participant deleted successfully")),
    ))
}

#[utoipa::path(
    post,
    path = "/api/dashboard/participants/bulk-destroy",
    tag = PARTICIPANT_TAG,
    request_body = UuidBulkDestroyDto,
    responses(
        (status = 200, description = "Participants deleted", body = MessageDto),
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

    ParticipantService::new(&state.db)
        .bulk_destroy(&payload.ids, Some(user.id))
        .await?;

    Ok((
        StatusCode::OK,
        Json(MessageDto::new("Participants deleted successfully")),
    ))
}

/// Confirm or unconfirm a participant.
#[utoipa::path(
    post,
    path = "/api/dashboard/participants/{id}/update-status",
    tag = PARTICIPANT_TAG,
    params(("id" = Uuid, Path, description = "Participant ID")),
    request_body = ParticipantStatusDto,
    responses(
        (status = 200, description = "Status updated", body = ParticipantStatusResponseDto),
        (status = 401, description = "User not authenticated", body = MessageDto),
        (status = 404, description = "Participant not found", body = MessageDto),
        (status = 422, description = "Validation failed", body = MessageDto)
    ),
)]
pub async fn update_status(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<Uuid>,
    Json(payload): Json<ParticipantStatusDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let Some(is_confirmed) = payload.is_confirmed else {
        return Err(ValidationErrors::single(
            "is_confirmed",
            "The is confirmed field is required.",
        )
        .into());
    };

    let participant = ParticipantService::new(&state.db)
        .update_status(id, is_confirmed, Some(user.id))
        .await?;

    Ok((
        StatusCode::OK,
        Json(ParticipantStatusResponseDto {
            message: "Status updated successfully".to_string(),
            is_confirmed: participant.is_confirmed.unwrap_or(false),
        }),
    ))
}

#[utoipa::path(
    post,
    path = "/api/dashboard/participants/export",
    tag = PARTICIPANT_TAG,
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
        .dispatch(JobTask::ExportParticipants { headers }, Some(user.id))
        .await?;

    Ok((
        StatusCode::OK,
        Json(MessageDto::new("Download request received successfully")),
    ))
}

/// Queue a spreadsheet import of participants.
///
/// Columns: seminar title (substring match), name, email, registration date,
/// confirmation (`yes`, anything else is unconfirmed). Rows naming an unknown seminar are skipped.
#[utoipa::path(
    post,
    path = "/api/dashboard/participants/import",
    tag = PARTICIPANT_TAG,
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
    let path = store_import(&state.storage, "participants", form.take_file("file")).await?;

    JobService::new(&state.db, &state.jobs)
        .dispatch(
            JobTask::ImportParticipants {
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
