use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::database::announcements_repo;
use crate::error::AppError;
use crate::models::AnnouncementRow;
use crate::services::auth_service;

const MAX_MESSAGE_CHARS: usize = 500;

/// Query parameters for create and update.
#[derive(Debug, Deserialize)]
pub struct AnnouncementParams {
    pub message: String,
    pub expires_at: String,
    pub starts_at: Option<String>,
    pub teacher_username: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AnnouncementView {
    pub id: String,
    pub message: String,
    pub starts_at: Option<String>,
    pub expires_at: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<AnnouncementRow> for AnnouncementView {
    fn from(row: AnnouncementRow) -> Self {
        AnnouncementView {
            id: row.id,
            message: row.message,
            starts_at: row.starts_at,
            expires_at: row.expires_at,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Active announcements for the public banner.
pub async fn list_active(pool: &SqlitePool) -> Result<Vec<AnnouncementView>, AppError> {
    let rows = announcements_repo::list_active(pool).await?;
    Ok(rows.into_iter().map(Into::into).collect())
}

/// Every announcement, expired or not, for the management view.
pub async fn list_for_management(
    pool: &SqlitePool,
    teacher_username: Option<&str>,
) -> Result<Vec<AnnouncementView>, AppError> {
    auth_service::require_staff(pool, teacher_username).await?;
    let rows = announcements_repo::list_all(pool).await?;
    Ok(rows.into_iter().map(Into::into).collect())
}

pub async fn create(
    pool: &SqlitePool,
    params: &AnnouncementParams,
) -> Result<AnnouncementView, AppError> {
    auth_service::require_staff(pool, params.teacher_username.as_deref()).await?;

    let message = validate_message(&params.message)?;
    let starts_at = parse_optional_instant(params.starts_at.as_deref(), "starts_at")?;
    let expires_at = parse_instant(&params.expires_at, "expires_at")?;
    ensure_window(starts_at, expires_at)?;

    let now = to_stored(Utc::now());
    let row = AnnouncementRow {
        id: Uuid::new_v4().to_string(),
        message,
        starts_at: starts_at.map(to_stored),
        expires_at: to_stored(expires_at),
        created_at: now.clone(),
        updated_at: now,
    };
    announcements_repo::insert(pool, &row).await?;
    tracing::info!("announcement {} created", row.id);

    Ok(row.into())
}

pub async fn update(
    pool: &SqlitePool,
    id: &str,
    params: &AnnouncementParams,
) -> Result<AnnouncementView, AppError> {
    auth_service::require_staff(pool, params.teacher_username.as_deref()).await?;

    let message = validate_message(&params.message)?;
    let starts_at = parse_optional_instant(params.starts_at.as_deref(), "starts_at")?;
    let expires_at = parse_instant(&params.expires_at, "expires_at")?;
    ensure_window(starts_at, expires_at)?;

    let id = validate_id(id)?;
    let touched = announcements_repo::update(
        pool,
        &id,
        &message,
        starts_at.map(to_stored).as_deref(),
        &to_stored(expires_at),
        &to_stored(Utc::now()),
    )
    .await?;
    if touched == 0 {
        return Err(AppError::NotFound("Announcement not found".to_string()));
    }

    let row = announcements_repo::fetch_by_id(pool, &id)
        .await?
        .ok_or_else(|| AppError::NotFound("Announcement not found".to_string()))?;
    Ok(row.into())
}

pub async fn delete(
    pool: &SqlitePool,
    id: &str,
    teacher_username: Option<&str>,
) -> Result<(), AppError> {
    auth_service::require_staff(pool, teacher_username).await?;

    let id = validate_id(id)?;
    let removed = announcements_repo::delete(pool, &id).await?;
    if removed == 0 {
        return Err(AppError::NotFound("Announcement not found".to_string()));
    }
    Ok(())
}

fn validate_message(raw: &str) -> Result<String, AppError> {
    let message = raw.trim();
    if message.is_empty() {
        return Err(AppError::Validation("Message is required".to_string()));
    }
    if message.chars().count() > MAX_MESSAGE_CHARS {
        return Err(AppError::Validation("Message is too long".to_string()));
    }
    Ok(message.to_string())
}

fn validate_id(raw: &str) -> Result<String, AppError> {
    match Uuid::parse_str(raw.trim()) {
        Ok(id) => Ok(id.to_string()),
        Err(e) => {
            tracing::warn!("invalid announcement id '{}': {}", raw, e);
            Err(AppError::Validation("Invalid announcement id".to_string()))
        }
    }
}

fn ensure_window(
    starts_at: Option<DateTime<Utc>>,
    expires_at: DateTime<Utc>,
) -> Result<(), AppError> {
    if let Some(starts_at) = starts_at {
        if starts_at >= expires_at {
            return Err(AppError::Validation(
                "Expiration must be after start date".to_string(),
            ));
        }
    }
    Ok(())
}

/// Parse an RFC 3339 instant into UTC. A value without an offset is taken as
/// already-UTC, matching how the stored columns are written.
fn parse_instant(value: &str, field: &str) -> Result<DateTime<Utc>, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::Validation(format!("{} is required", field)));
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(naive.and_utc());
        }
    }

    tracing::warn!("invalid {} value '{}'", field, trimmed);
    Err(AppError::Validation(format!("Invalid {} format", field)))
}

fn parse_optional_instant(
    value: Option<&str>,
    field: &str,
) -> Result<Option<DateTime<Utc>>, AppError> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        Some(v) => parse_instant(v, field).map(Some),
        None => Ok(None),
    }
}

fn to_stored(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Secs, true)
}
