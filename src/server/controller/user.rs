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
        user::{UserDto, UserFormDto},
    },
    server::{
        controller::USER_TAG,
        datatable::ListParams,
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::user::UserParams,
        service::user::UserService,
        state::AppState,
    },
};

/// List users with their role name and relative creation time.
///
/// # Access Control
/// - `Admin` - Only administrators can manage users
///
/// # Returns
/// - `200 OK` - Page of users
/// - `401 Unauthorized` - User not authenticated
/// - `403 Forbidden` - User is not an administrator
#[utoipa::path(
    get,
    path = "/api/dashboard/users/data",
    tag = USER_TAG,
    params(ListParams),
    responses(
        (status = 200, description = "Page of users", body = ListResponseDto),
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

    let page = UserService::new(&state.db).list(&params).await?;

    Ok((StatusCode::OK, Json(page.into_dto())))
}

/// Create a user.
///
/// `password` and a matching `password_confirmation` are required; the email must
/// not belong to another live user.
#[utoipa::path(
    post,
    path = "/api/dashboard/users",
    tag = USER_TAG,
    request_body = UserFormDto,
    responses(
        (status = 201, description = "Created user", body = UserDto),
        (status = 401, description = "User not authenticated", body = MessageDto),
        (status = 403, description = "User is not an administrator", body = MessageDto),
        (status = 422, description = "Validation failed", body = MessageDto)
    ),
)]
pub async fn store(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<UserFormDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let params = UserParams::from_dto(payload, true)?;
    let account = UserService::new(&state.db)
        .create(params, Some(user.id))
        .await?;

    Ok((StatusCode::CREATED, Json(account.into_dto())))
}

#[utoipa::path(
    get,
    path = "/api/dashboard/users/{id}",
    tag = USER_TAG,
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "User", body = UserDto),
        (status = 401, description = "User not authenticated", body = MessageDto),
        (status = 403, description = "User is not an administrator", body = MessageDto),
        (status = 404, description = "User not found", body = MessageDto)
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

    let account = UserService::new(&state.db).show(id).await?;

    Ok((StatusCode::OK, Json(account.into_dto())))
}

/// Update a user. The stored password is kept when `password` is omitted.
#[utoipa::path(
    put,
    path = "/api/dashboard/users/{id}",
    tag = USER_TAG,
    params(("id" = i32, Path, description = "User ID")),
    request_body = UserFormDto,
    responses(
        (status = 200, description = "Updated user", body = UserDto),
        (status = 401, description = "User not authenticated", body = MessageDto),
        (status = 403, description = "User is not an administrator", body = MessageDto),
        (status = 404, description = "User not found", body = MessageDto),
        (status = 422, description = "Validation failed", body = MessageDto)
    ),
)]
pub async fn update(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    Json(payload): Json<UserFormDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let params = UserParams::from_dto(payload, false)?;
    let account = UserService::new(&state.db)
        .update(id, params, Some(user.id))
        .await?;

    Ok((StatusCode::OK, Json(account.into_dto())))
}

#[utoipa::path(
    delete,
    path = "/api/dashboard/users/{id}",
    tag = USER_TAG,
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "User deleted", body = MessageDto),
        (status = 401, description = "User not authenticated", body = MessageDto),
        (status = 403, description = "User is not an administrator", body = MessageDto),
        (status = 404, description = "User not found", body = MessageDto)
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

    UserService::new(&state.db)
        .destroy(id, Some(user.id))
        .await?;

    Ok((
        StatusCode::OK,
        Json(MessageDto::new("User deleted successfully")),
    ))
}

#[utoipa::path(
    post,
    path = "/api/dashboard/users/bulk-destroy",
    tag = USER_TAG,
    request_body = IdBulkDestroyDto,
    responses(
        (status = 200, description = "Users deleted", body = MessageDto),
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

    UserService::new(&state.db)
        .bulk_destroy(&payload.ids, Some(user.id))
        .await?;

    Ok((
        StatusCode::OK,
        Json(MessageDto::new("Users deleted successfully")),
    ))
}
