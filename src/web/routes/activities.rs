use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use sqlx::SqlitePool;

use crate::error::AppError;
use crate::services::activities_service::{self, ActivitiesQuery, ActivityView};
use crate::services::roster_service;

pub async fn list_activities_handler(
    Query(query): Query<ActivitiesQuery>,
    State(pool): State<SqlitePool>,
) -> Result<Json<Vec<ActivityView>>, AppError> {
    let activities = activities_service::list_activities(&pool, &query).await?;
    Ok(Json(activities))
}

#[derive(Debug, Deserialize)]
pub struct RosterParams {
    pub email: String,
    pub teacher_username: Option<String>,
}

pub async fn signup_handler(
    Path(name): Path<String>,
    Query(params): Query<RosterParams>,
    State(pool): State<SqlitePool>,
) -> Result<Json<Value>, AppError> {
    let message = roster_service::signup(
        &pool,
        &name,
        &params.email,
        params.teacher_username.as_deref(),
    )
    .await?;
    Ok(Json(json!({ "message": message })))
}

pub async fn unregister_handler(
    Path(name): Path<String>,
    Query(params): Query<RosterParams>,
    State(pool): State<SqlitePool>,
) -> Result<Json<Value>, AppError> {
    let message = roster_service::unregister(
        &pool,
        &name,
        &params.email,
        params.teacher_username.as_deref(),
    )
    .await?;
    Ok(Json(json!({ "message": message })))
}
