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
        payment::{
            ImportFileDto, PaymentDto, PaymentFormDto, PaymentStatusDto, PaymentStatusResponseDto,
        },
    },
    server::{
        controller::{multipart::MultipartForm, PAYMENT_TAG},
        datatable::ListParams,
        error::{validation::ValidationErrors, AppError},
        jobs::JobTask,
        middleware::auth::AuthGuard,
        model::payment::PaymentParams,
        service::{
            job::{export_headers, store_import, JobService},
            payment::PaymentService,
        },
        state::AppState,
    },
};

/// List payments with participant name and receipt link.
///
/// The `file_path` column is rendered as a public URL under `/storage`.
///
/// # Access Control
/// - Any authenticated user
///
/// # Returns
/// - `200 OK` - Page of payments
/// - `401 Unauthorized` - User not authenticated
#[utoipa::path(
    get,
    path = "/api/dashboard/payments/data",
    tag = PAYMENT_TAG,
    params(ListParams),
    responses(
        (status = 200, description = "Page of payments", body = ListResponseDto),
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

    let page = PaymentService::new(&state.db, &state.storage)
        .list(&params, &state.app_url)
        .await?;

    Ok((StatusCode::OK, Json(page.into_dto())))
}

/// Record a payment with its PDF receipt.
///
/// Multipart fields: `participant_id`, `uploaded_at`, `is_verified`,
/// `metadata[<key>]` and the `file_path` file. The receipt is required and must
/// be a PDF between 100 and 500 KB.
///
/// # Returns
/// - `201 Created` - Created payment
/// - `401 Unauthorized` - User not authenticated
/// - `422 Unprocessable Entity` - Validation failed
#[utoipa::path(
    post,
    path = "/api/dashboard/payments",
    tag = PAYMENT_TAG,
    request_body(content = PaymentFormDto, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Created payment", body = PaymentDto),
        (status = 401, description = "User not authenticated", body = MessageDto),
        (status = 422, description = "Validation failed", body = MessageDto)
    ),
)]
pub async fn store(
    State(state): State<AppState>,
    session: Session,
    multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let form = MultipartForm::read(multipart).await?;
    let params = PaymentParams::from_form(form.into_payment_form(), true)?;

    let payment = PaymentService::new(&state.db, &state.storage)
        .create(params, Some(user.id))
        .await?;

    Ok((StatusCode::CREATED, Json(payment.into_dto(&state.app_url))))
}

#[utoipa::path(
    get,
    path = "/api/dashboard/payments/{id}",
    tag = PAYMENT_TAG,
    params(("id" = Uuid, Path, description = "Payment ID")),
    responses(
        (status = 200, description = "Payment", body = PaymentDto),
        (status = 401, description = "User not authenticated", body = MessageDto),
        (status = 404, description = "Payment not found", body = MessageDto)
    ),
)]
pub async fn show(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let payment = PaymentService::new(&state.db, &state.storage)
        .show(id)
        .await?;

    Ok((StatusCode::OK, Json(payment.into_dto(&state.app_url))))
}

/// Update a payment. The receipt is optional; a new one replaces the stored file.
#[utoipa::path(
    put,
    path = "/api/dashboard/payments/{id}",
    tag = PAYMENT_TAG,
    params(("id" = Uuid, Path, description = "Payment ID")),
    request_body(content = PaymentFormDto, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Updated payment", body = PaymentDto),
        (status = 401, description = "User not authenticated", body = MessageDto),
        (status = 404, description = "Payment not found", body = MessageDto),
        (status = 422, description = "Validation failed", body = MessageDto)
    ),
)]
pub async fn update(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<Uuid>,
    multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let form = MultipartForm::read(multipart).await?;
    let params = PaymentParams::from_form(form.into_payment_form(), false)?;

    let payment = PaymentService::new(&state.db, &state.storage)
        .update(id, params, Some(user.id))
        .await?;

    Ok((StatusCode::OK, Json(payment.into_dto(&state.app_url))))
}

#[utoipa::path(
    delete,
    path = "/api/dashboard/payments/{id}",
    tag = PAYMENT_TAG,
    params(("id" = Uuid, Path, description = "Payment ID")),
    responses(
        (status = 200, description = "Payment deleted", body = MessageDto),
        (status = 401, description = "User not authenticated", body = MessageDto),
        (status = 404, description = "Payment not found", body = MessageDto)
    ),
)]
pub async fn destroy(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    PaymentService::new(&state.db, &state.storage)
        .destroy(id, Some(user.id))
        .await?;

    Ok((
        StatusCode::OK,
        Json(MessageDto::new("Payment deleted successfully")),
    ))
}

#[utoipa::path(
    post,
    path = "/api/dashboard/payments/bulk-destroy",
    tag = PAYMENT_TAG,
    request_body = UuidBulkDestroyDto,
    responses(
        (status = 200, description = "Payments deleted", body = MessageDto),
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

    PaymentService::new(&state.db, &state.storage)
        .bulk_destroy(&payload.ids, Some(user.id))
        .await?;

    Ok((
        StatusCode::OK,
        Json(MessageDto::new("Payments deleted successfully")),
    ))
}

#[utoipa::path(
    post,
    path = "/api/dashboard/payments/{id}/update-status",
    tag = PAYMENT_TAG,
    params(("id" = Uuid, Path, description = "Payment ID")),
    request_body = PaymentStatusDto,
    responses(
        (status = 200, description = "Status updated", body = PaymentStatusResponseDto),
        (status = 401, description = "User not authenticated", body = MessageDto),
        (status = 404, description = "Payment not found", body = MessageDto),
        (status = 422, description = "Validation failed", body = MessageDto)
    ),
)]
pub async fn update_status(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<Uuid>,
    Json(payload): Json<PaymentStatusDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let Some(is_verified) = payload.is_verified else {
        return Err(
            ValidationErrors::single("is_verified", "The is verified field is required.").into(),
        );
    };

    let payment = PaymentService::new(&state.db, &state.storage)
        .update_status(id, is_verified, Some(user.id))
        .await?;

    Ok((
        StatusCode::OK,
        Json(PaymentStatusResponseDto {
            message: "Status updated successfully".to_string(),
            is_verified: payment.is_verified,
        }),
    ))
}

#[utoipa::path(
    post,
    path = "/api/dashboard/payments/export",
    tag = PAYMENT_TAG,
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
        .dispatch(JobTask::ExportPayments { headers }, Some(user.id))
        .await?;

    Ok((
        StatusCode::OK,
        Json(MessageDto::new("Download request received successfully")),
    ))
}

/// Queue a spreadsheet import of payments matched to participants by email.
#[utoipa::path(
    post,
    path = "/api/dashboard/payments/import",
    tag = PAYMENT_TAG,
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
    let path = store_import(&state.storage, "payments", form.take_file("file")).await?;

    JobService::new(&state.db, &state.jobs)
        .dispatch(
            JobTask::ImportPayments {
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
