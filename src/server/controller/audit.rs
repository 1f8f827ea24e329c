use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tower_sessions::Session;

use crate::{
    model::{api::MessageDto, datatable::ListResponseDto},
    server::{
        controller::AUDIT_TAG,
        datatable::ListParams,
        error::AppError,
        middleware::auth::AuthGuard,
        service::audit::AuditService,
        state::AppState,
    },
};

/// List audit entries across every target kind.
///
/// Entries written by the requesting user show `You` as the actor.
#[utoipa::path(
    get,
    path = "/api/dashboard/audits/data",
    tag = AUDIT_TAG,
    params(ListParams),
    responses(
        (status = 200, description = "Page of audit entries", body = ListResponseDto),
        (status = 401, description = "User not authenticated", body = MessageDto)
    ),
)]
pub async fn data(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<ListParams>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let page = AuditService::new(&state.db)
        .list(&params, None, None, user.id)
        .await?;

    Ok((StatusCode::OK, Json(page.into_dto())))
}

/// List audit entries of one target kind, e.g. `seminars`.
///
/// An unknown slug lists every kind.
#[utoipa::path(
    get,
    path = "/api/dashboard/audits/data/{slug}",
    tag = AUDIT_TAG,
    params(
        ("slug" = String, Path, description = "Target kind"),
        ListParams
    ),
    responses(
        (status = 200, description = "Page of audit entries", body = ListResponseDto),
        (status = 401, description = "User not authenticated", body = MessageDto)
    ),
)]
pub async fn data_by_target(
    State(state): State<AppState>,
    session: Session,
    Path(slug): Path<String>,
    Query(params): Query<ListParams>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let page = AuditService::new(&state.db)
        .list(&params, Some(&slug), None, user.id)
        .await?;

    Ok((StatusCode::OK, Json(page.into_dto())))
}

/// List audit entries of a single record.
#[utoipa::path(
    get,
    path = "/api/dashboard/audits/data/{slug}/{id}",
    tag = AUDIT_TAG,
    params(
        ("slug" = String, Path, description = "Target kind"),
        ("id" = String, Path, description = "Target record ID"),
        ListParams
    ),
    responses(
        (status = 200, description = "Page of audit entries", body = ListResponseDto),
        (status = 401, description = "User not authenticated", body = MessageDto)
    ),
)]
pub async fn data_by_record(
    State(state): State<AppState>,
    session: Session,
    Path((slug, id)): Path<(String, String)>,
    Query(params): Query<ListParams>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let page = AuditService::new(&state.db)
        .list(&params, Some(&slug), Some(&id), user.id)
        .await?;

    Ok((StatusCode::OK, Json(page.into_dto())))
}
