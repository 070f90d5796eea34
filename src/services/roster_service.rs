use sqlx::SqlitePool;

use crate::database::{activities_repo, participants_repo, students_repo};
use crate::database::participants_repo::SignupOutcome;
use crate::error::AppError;
use crate::services::auth_service;

/// Enroll a student. Capacity is enforced by the conditional insert, so a
/// racing signup for the last spot loses cleanly instead of oversubscribing.
pub async fn signup(
    pool: &SqlitePool,
    activity_name: &str,
    email: &str,
    teacher_username: Option<&str>,
) -> Result<String, AppError> {
    auth_service::require_staff(pool, teacher_username).await?;
    let email = normalize_email(email)?;

    if activities_repo::fetch_by_name(pool, activity_name).await?.is_none() {
        return Err(AppError::NotFound("Activity not found".to_string()));
    }

    match participants_repo::signup_if_capacity(pool, activity_name, &email).await? {
        SignupOutcome::Added => {
            students_repo::ensure_student(pool, &email).await?;
            tracing::info!("signed up {} for {}", email, activity_name);
            Ok(format!("Signed up {} for {}", email, activity_name))
        }
        SignupOutcome::Full => Err(AppError::Conflict("Activity is full".to_string())),
        SignupOutcome::AlreadySignedUp => {
            Err(AppError::Conflict("Student is already signed up".to_string()))
        }
    }
}

pub async fn unregister(
    pool: &SqlitePool,
    activity_name: &str,
    email: &str,
    teacher_username: Option<&str>,
) -> Result<String, AppError> {
    auth_service::require_staff(pool, teacher_username).await?;
    let email = normalize_email(email)?;

    if activities_repo::fetch_by_name(pool, activity_name).await?.is_none() {
        return Err(AppError::NotFound("Activity not found".to_string()));
    }

    let removed = participants_repo::unregister(pool, activity_name, &email).await?;
    if removed == 0 {
        return Err(AppError::Conflict(
            "Student is not signed up for this activity".to_string(),
        ));
    }

    tracing::info!("unregistered {} from {}", email, activity_name);
    Ok(format!("Unregistered {} from {}", email, activity_name))
}

fn normalize_email(raw: &str) -> Result<String, AppError> {
    let email = raw.trim();
    let well_formed = email
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && !domain.is_empty());
    if !well_formed {
        return Err(AppError::Validation("Invalid email".to_string()));
    }
    Ok(email.to_string())
}
