use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use sqlx::SqlitePool;

use crate::error::AppError;
use crate::services::auth_service::{self, StaffIdentity};

#[derive(Debug, Deserialize)]
pub struct LoginParams {
    pub username: String,
    pub password: String,
}

pub async fn login_handler(
    Query(params): Query<LoginParams>,
    State(pool): State<SqlitePool>,
) -> Result<Json<StaffIdentity>, AppError> {
    let identity = auth_service::login(&pool, &params.username, &params.password).await?;
    Ok(Json(identity))
}

#[derive(Debug, Deserialize)]
pub struct SessionParams {
    pub username: String,
}

pub async fn check_session_handler(
    Query(params): Query<SessionParams>,
    State(pool): State<SqlitePool>,
) -> Result<Json<StaffIdentity>, AppError> {
    let identity = auth_service::check_session(&pool, &params.username).await?;
    Ok(Json(identity))
}
