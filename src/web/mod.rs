pub mod routes;

use axum::{
    routing::{get, post, put},
    Router,
};
use sqlx::SqlitePool;

use crate::web::routes::{activities, announcements, auth, directory};

/// The full application surface minus static assets; integration tests drive
/// this router directly.
pub fn router(pool: SqlitePool) -> Router {
    Router::new()
        .route("/", get(directory::directory_handler))
        .route("/activities", get(activities::list_activities_handler))
        .route("/activities/:name/signup", post(activities::signup_handler))
        .route(
            "/activities/:name/unregister",
            post(activities::unregister_handler),
        )
        .route(
            "/announcements",
            get(announcements::list_active_handler).post(announcements::create_handler),
        )
        .route("/announcements/manage", get(announcements::manage_handler))
        .route(
            "/announcements/:id",
            put(announcements::update_handler).delete(announcements::delete_handler),
        )
        .route("/auth/login", post(auth::login_handler))
        .route("/auth/check-session", get(auth::check_session_handler))
        .with_state(pool)
}
