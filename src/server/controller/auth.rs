use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use tower_sessions::Session;

use crate::{
    model::{api::MessageDto, auth::LoginDto, user::UserDto},
    server::{
        controller::AUTH_TAG,
        error::{validation::ValidationErrors, AppError},
        middleware::{auth::AuthGuard, session::AuthSession},
        service::{auth::AuthService, user::UserService},
        state::AppState,
    },
};

/// Log in with email and password.
///
/// Stores the user id in a fresh session on success.
///
/// # Returns
/// - `200 OK` - Logged-in user
/// - `401 Unauthorized` - Unknown email or wrong password
/// - `422 Unprocessable Entity` - Email or password missing
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = AUTH_TAG,
    request_body = LoginDto,
    responses(
        (status = 200, description = "Logged-in user", body = UserDto),
        (status = 401, description = "Invalid credentials", body = MessageDto),
        (status = 422, description = "Validation failed", body = MessageDto)
    ),
)]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<LoginDto>,
) -> Result<impl IntoResponse, AppError> {
    let email = payload.email.filter(|e| !e.trim().is_empty());
    let password = payload.password.filter(|p| !p.is_empty());

    let (Some(email), Some(password)) = (email.as_deref(), password.as_deref()) else {
        let mut errors = ValidationErrors::new();
        if email.is_none() {
            errors.add("email", "The email field is required.");
        }
        if password.is_none() {
            errors.add("password", "The password field is required.");
        }
        return Err(errors.into());
    };

    let user = AuthService::new(&state.db).login(email, password).await?;

    AuthSession::new(&session).set_user_id(user.id).await?;

    Ok((StatusCode::OK, Json(user.into_dto())))
}

#[utoipa::path(
    get,
    path = "/api/auth/logout",
    tag = AUTH_TAG,
    responses(
        (status = 200, description = "Session cleared", body = MessageDto)
    ),
)]
pub async fn logout(session: Session) -> Result<impl IntoResponse, AppError> {
    AuthSession::new(&session).clear().await;

    Ok((StatusCode::OK, Json(MessageDto::new("Logged out successfully"))))
}

/// Returns the logged-in user.
#[utoipa::path(
    get,
    path = "/api/auth/user",
    tag = AUTH_TAG,
    responses(
        (status = 200, description = "Current user", body = UserDto),
        (status = 401, description = "User not authenticated", body = MessageDto)
    ),
)]
pub async fn get_user(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let user = UserService::new(&state.db).show(user.id).await?;

    Ok((StatusCode::OK, Json(user.into_dto())))
}
