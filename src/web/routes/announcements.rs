use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use sqlx::SqlitePool;

use crate::error::AppError;
use crate::services::announcements_service::{self, AnnouncementParams, AnnouncementView};

pub async fn list_active_handler(
    State(pool): State<SqlitePool>,
) -> Result<Json<Vec<AnnouncementView>>, AppError> {
    let announcements = announcements_service::list_active(&pool).await?;
    Ok(Json(announcements))
}

#[derive(Debug, Deserialize)]
pub struct ManageParams {
    pub teacher_username: Option<String>,
}

pub async fn manage_handler(
    Query(params): Query<ManageParams>,
    State(pool): State<SqlitePool>,
) -> Result<Json<Vec<AnnouncementView>>, AppError> {
    let announcements =
        announcements_service::list_for_management(&pool, params.teacher_username.as_deref())
            .await?;
    Ok(Json(announcements))
}

pub async fn create_handler(
    Query(params): Query<AnnouncementParams>,
    State(pool): State<SqlitePool>,
) -> Result<Json<AnnouncementView>, AppError> {
    let created = announcements_service::create(&pool, &params).await?;
    Ok(Json(created))
}

pub async fn update_handler(
    Path(id): Path<String>,
    Query(params): Query<AnnouncementParams>,
    State(pool): State<SqlitePool>,
) -> Result<Json<AnnouncementView>, AppError> {
    let updated = announcements_service::update(&pool, &id, &params).await?;
    Ok(Json(updated))
}

pub async fn delete_handler(
    Path(id): Path<String>,
    Query(params): Query<ManageParams>,
    State(pool): State<SqlitePool>,
) -> Result<Json<Value>, AppError> {
    announcements_service::delete(&pool, &id, params.teacher_username.as_deref()).await?;
    Ok(Json(json!({ "message": "Announcement deleted" })))
}
