use serde::Serialize;
use sqlx::SqlitePool;

use crate::database::teachers_repo;
use crate::error::AppError;
use crate::models::TeacherRow;

/// What a successful login or session check hands back. Never the password.
#[derive(Debug, Serialize)]
pub struct StaffIdentity {
    pub username: String,
    pub display_name: String,
}

impl From<TeacherRow> for StaffIdentity {
    fn from(row: TeacherRow) -> Self {
        StaffIdentity {
            username: row.username,
            display_name: row.display_name,
        }
    }
}

/// Unknown username and wrong password fail the same way; callers cannot
/// tell which record was missing.
pub async fn login(
    pool: &SqlitePool,
    username: &str,
    password: &str,
) -> Result<StaffIdentity, AppError> {
    let teacher = teachers_repo::fetch_by_username(pool, username.trim()).await?;
    match teacher {
        Some(row) if row.password == password => Ok(row.into()),
        _ => {
            tracing::warn!("failed login for '{}'", username.trim());
            Err(AppError::InvalidCredentials)
        }
    }
}

/// Re-validate a client-held identity: the username just has to still exist.
pub async fn check_session(pool: &SqlitePool, username: &str) -> Result<StaffIdentity, AppError> {
    teachers_repo::fetch_by_username(pool, username.trim())
        .await?
        .map(Into::into)
        .ok_or_else(|| AppError::NotFound("Teacher not found".to_string()))
}

/// Gate for management actions. The caller-supplied username only has to
/// match a stored account; there is no token to verify beyond that.
pub async fn require_staff(
    pool: &SqlitePool,
    teacher_username: Option<&str>,
) -> Result<StaffIdentity, AppError> {
    let Some(username) = teacher_username.map(str::trim).filter(|u| !u.is_empty()) else {
        return Err(AppError::AuthRequired);
    };

    teachers_repo::fetch_by_username(pool, username)
        .await?
        .map(Into::into)
        .ok_or(AppError::AuthRequired)
}
