use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tower_sessions::Session;

use crate::{
    model::{
        api::{IdBulkDestroyDto, MessageDto},
        datatable::ListResponseDto,
        role::{RoleDto, RoleFormDto},
    },
    server::{
        controller::ROLE_TAG,
        datatable::ListParams,
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::role::RoleParams,
        service::role::RoleService,
        state::AppState,
    },
};

/// List roles.
///
/// # Access Control
/// - `Admin` - Only administrators can manage roles
///
/// # Returns
/// - `200 OK` - Page of roles
/// - `401 Unauthorized` - User not authenticated
/// - `403 Forbidden` - User is not an administrator
#[utoipa::path(
    get,
    path = "/api/dashboard/role-management/data",
    tag = ROLE_TAG,
    params(ListParams),
    responses(
        (status = 200, description = "Page of roles", body = ListResponseDto),
        (status = 401, description = "User not authenticated", body = MessageDto),
        (status = 403, description = "User is not an administrator", body = MessageDto)
    ),
)]
pub async fn data(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<ListParams>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let page = RoleService::new(&state.db).list(&params).await?;

    Ok((StatusCode::OK, Json(page.into_dto())))
}

/// Create a role. The slug is derived from the name.
#[utoipa::path(
    post,
    path = "/api/dashboard/role-management",
    tag = ROLE_TAG,
    request_body = RoleFormDto,
    responses(
        (status = 201, description = "Created role", body = RoleDto),
        (status = 401, description = "User not authenticated", body = MessageDto),
        (status = 403, description = "User is not an administrator", body = MessageDto),
        (status = 422, description = "Validation failed", body = MessageDto)
    ),
)]
pub async fn store(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<RoleFormDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let params = RoleParams::from_dto(payload)?;
    let role = RoleService::new(&state.db)
        .create(params, Some(user.id))
        .await?;

    Ok((StatusCode::CREATED, Json(role.into_dto())))
}

#[utoipa::path(
    get,
    path = "/api/dashboard/role-management/{id}",
    tag = ROLE_TAG,
    params(("id" = i32, Path, description = "Role ID")),
    responses(
        (status = 200, description = "Role", body = RoleDto),
        (status = 401, description = "User not authenticated", body = MessageDto),
        (status = 403, description = "User is not an administrator", body = MessageDto),
        (status = 404, description = "Role not found", body = MessageDto)
    ),
)]
pub async fn show(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let role = RoleService::new(&state.db).show(id).await?;

    Ok((StatusCode::OK, Json(role.into_dto())))
}

#[utoipa::path(
    put,
    path = "/api/dashboard/role-management/{id}",
    tag = ROLE_TAG,
    params(("id" = i32, Path, description = "Role ID")),
    request_body = RoleFormDto,
    responses(
        (status = 200, description = "Updated role", body = RoleDto),
        (status = 401, description = "User not authenticated", body = MessageDto),
        (status = 403, description = "User is not an administrator", body = MessageDto),
        (status = 404, description = "Role not found", body = MessageDto),
        (status = 422, description = "Validation failed", body = MessageDto)
    ),
)]
pub async fn update(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    Json(payload): Json<RoleFormDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let params = RoleParams::from_dto(payload)?;
    let role = RoleService::new(&state.db)
        .update(id, params, Some(user.id))
        .await?;

    Ok((StatusCode::OK, Json(role.into_dto())))
}

#[utoipa::path(
    delete,
    path = "/api/dashboard/role-management/{id}",
    tag = ROLE_TAG,
    params(("id" = i32, Path, description = "Role ID")),
    responses(
        (status = 200, description = "Role deleted", body = MessageDto),
        (status = 401, description = "User not authenticated", body = MessageDto),
        (status = 403, description = "User is not an administrator", body = MessageDto),
        (status = 404, description = "Role not found", body = MessageDto)
    ),
)]
pub async fn destroy(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    RoleService::new(&state.db)
        .destroy(id, Some(user.id))
        .await?;

    Ok((
        StatusCode::OK,
        Json(MessageDto::new("Role deleted successfully")),
    ))
}

#[utoipa::path(
    post,
    path = "/api/dashboard/role-management/bulk-destroy",
    tag = ROLE_TAG,
    request_body = IdBulkDestroyDto,
    responses(
        (status = 200, description = "Roles deleted", body = MessageDto),
        (status = 400, description = "No IDs provided", body = MessageDto),
        (status = 401, description = "User not authenticated", body = MessageDto),
        (status = 403, description = "User is not an administrator", body = MessageDto)
    ),
)]
pub async fn bulk_destroy(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<IdBulkDestroyDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    RoleService::new(&state.db)
        .bulk_destroy(&payload.ids, Some(user.id))
        .await?;

    Ok((
        StatusCode::OK,
        Json(MessageDto::new("Roles deleted successfully")),
    ))
}
