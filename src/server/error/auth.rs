use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::MessageDto;

#[derive(Error, Debug)]
pub enum AuthError {
    /// No user id is stored in the session.
    #[error("User not found in session")]
    UserNotInSession,

    /// The session references a user that no longer exists or was soft-deleted.
    #[error("User {0} from session not found in database")]
    UserNotInDatabase(i32),

    /// Email or password did not match a live account.
    #[error("Invalid login credentials")]
    InvalidCredentials,

    /// The user lacks the permission required by the endpoint.
    ///
    /// # Fields
    /// - User id
    /// - Reason logged server-side
    #[error("User {0} denied access: {1}")]
    AccessDenied(i32, String),
}

/// Converts authentication errors into HTTP responses.
///
/// - `UserNotInSession` / `UserNotInDatabase` → 401 Unauthorized with "Unauthenticated."
/// - `InvalidCredentials` → 401 Unauthorized with a credentials message
/// - `AccessDenied` → 403 Forbidden
///
/// All errors are logged at debug level while client-facing messages stay generic.
impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        tracing::debug!("{}", self);

        let (status, message) = match self {
            Self::UserNotInSession | Self::UserNotInDatabase(_) => {
                (StatusCode::UNAUTHORIZED, "Unauthenticated.")
            }
            Self::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                "These credentials do not match our records.",
            ),
            Self::AccessDenied(_, _) => (StatusCode::FORBIDDEN, "This action is unauthorized."),
        };

        (
            status,
            Json(MessageDto {
                message: message.to_string(),
            }),
        )
            .into_response()
    }
}
