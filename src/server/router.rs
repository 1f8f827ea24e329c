//! Route table and OpenAPI document.
//!
//! Every handler is registered through `utoipa_axum::routes!` and collected into the
//! OpenAPI document. Swagger UI is served at `/swagger-ui`.

use axum::{extract::DefaultBodyLimit, Router};
use tower_http::services::ServeDir;
use utoipa::OpenApi;
use utoipa_axum::{router::OpenApiRouter, routes};
use utoipa_swagger_ui::SwaggerUi;

use crate::server::{
    controller::{audit, auth, download, participant, payment, role, seminar, user},
    state::AppState,
    storage::Disk,
};

/// Upper bound for request bodies; spreadsheets are the largest uploads.
const MAX_BODY_BYTES: usize = 20 * 1024 * 1024;

#[derive(OpenApi)]
#[openapi(
    info(title = "Seminar Office API"),
    tags(
        (name = "auth", description = "Session login and logout"),
        (name = "seminars", description = "Seminar management"),
        (name = "participants", description = "Participant management"),
        (name = "payments", description = "Payment receipts"),
        (name = "roles", description = "Role management (administrators)"),
        (name = "users", description = "User management (administrators)"),
        (name = "downloads", description = "Export and import job records"),
        (name = "audits", description = "Audit trail"),
    )
)]
pub struct ApiDoc;

pub fn router(state: &AppState) -> Router<AppState> {
    let (routes, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .routes(routes!(auth::login))
        .routes(routes!(auth::logout))
        .routes(routes!(auth::get_user))
        // seminars
        .routes(routes!(seminar::data))
        .routes(routes!(seminar::bulk_destroy))
        .routes(routes!(seminar::update_status))
        .routes(routes!(seminar::export))
        .routes(routes!(seminar::import))
        .routes(routes!(seminar::store))
        .routes(routes!(seminar::show, seminar::update, seminar::destroy))
        // participants
        .routes(routes!(participant::data))
        .routes(routes!(participant::bulk_destroy))
        .routes(routes!(participant::update_status))
        .routes(routes!(participant::export))
        .routes(routes!(participant::import))
        .routes(routes!(participant::store))
        .routes(routes!(participant::show, participant::update, participant::destroy))
        // payments
        .routes(routes!(payment::data))
        .routes(routes!(payment::bulk_destroy))
        .routes(routes!(payment::update_status))
        .routes(routes!(payment::export))
        .routes(routes!(payment::import))
        .routes(routes!(payment::store))
        .routes(routes!(payment::show, payment::update, payment::destroy))
        // roles
        .routes(routes!(role::data))
        .routes(routes!(role::bulk_destroy))
        .routes(routes!(role::store))
        .routes(routes!(role::show, role::update, role::destroy))
        // users
        .routes(routes!(user::data))
        .routes(routes!(user::bulk_destroy))
        .routes(routes!(user::store))
        .routes(routes!(user::show, user::update, user::destroy))
        // audits
        .routes(routes!(audit::data))
        .routes(routes!(audit::data_by_target))
        .routes(routes!(audit::data_by_record))
        // downloads
        .routes(routes!(download::data))
        .routes(routes!(download::download))
        .routes(routes!(download::destroy))
        .routes(routes!(download::bulk_destroy))
        .split_for_parts();

    routes
        .merge(SwaggerUi::new("/swagger-ui").url("/api/openapi.json", api))
        .nest_service("/storage", ServeDir::new(state.storage.disk_root(Disk::Public)))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
}
