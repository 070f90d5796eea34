use sqlx::SqlitePool;

use crate::models::AnnouncementRow;

const SQL_INSERT: &str = r#"
INSERT INTO announcements (id, message, starts_at, expires_at, created_at, updated_at)
VALUES (?, ?, ?, ?, ?, ?)
"#;

// Active means: not yet expired, and either unscheduled or already started.
const SQL_LIST_ACTIVE: &str = r#"
SELECT id, message, starts_at, expires_at, created_at, updated_at
FROM announcements
WHERE datetime(expires_at) > datetime('now')
  AND (starts_at IS NULL OR datetime(starts_at) <= datetime('now'))
ORDER BY datetime(expires_at) ASC
"#;

const SQL_LIST_ALL: &str = r#"
SELECT id, message, starts_at, expires_at, created_at, updated_at
FROM announcements
ORDER BY datetime(created_at) DESC
"#;

const SQL_FETCH_BY_ID: &str = r#"
SELECT id, message, starts_at, expires_at, created_at, updated_at
FROM announcements
WHERE id = ?1
LIMIT 1
"#;

const SQL_UPDATE: &str = r#"
UPDATE announcements
SET message = ?2, starts_at = ?3, expires_at = ?4, updated_at = ?5
WHERE id = ?1
"#;

const SQL_DELETE: &str = "DELETE FROM announcements WHERE id = ?1";

pub async fn insert(pool: &SqlitePool, row: &AnnouncementRow) -> sqlx::Result<()> {
    sqlx::query(SQL_INSERT)
        .bind(&row.id)
        .bind(&row.message)
        .bind(&row.starts_at)
        .bind(&row.expires_at)
        .bind(&row.created_at)
        .bind(&row.updated_at)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn list_active(pool: &SqlitePool) -> sqlx::Result<Vec<AnnouncementRow>> {
    sqlx::query_as::<_, AnnouncementRow>(SQL_LIST_ACTIVE)
        .fetch_all(pool)
        .await
}

pub async fn list_all(pool: &SqlitePool) -> sqlx::Result<Vec<AnnouncementRow>> {
    sqlx::query_as::<_, AnnouncementRow>(SQL_LIST_ALL)
        .fetch_all(pool)
        .await
}

pub async fn fetch_by_id(pool: &SqlitePool, id: &str) -> sqlx::Result<Option<AnnouncementRow>> {
    sqlx::query_as::<_, AnnouncementRow>(SQL_FETCH_BY_ID)
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Returns the number of rows touched; 0 means the id was unknown.
pub async fn update(
    pool: &SqlitePool,
    id: &str,
    message: &str,
    starts_at: Option<&str>,
    expires_at: &str,
    updated_at: &str,
) -> sqlx::Result<u64> {
    let res = sqlx::query(SQL_UPDATE)
        .bind(id)
        .bind(message)
        .bind(starts_at)
        .bind(expires_at)
        .bind(updated_at)
        .execute(pool)
        .await?;
    Ok(res.rows_affected())
}

pub async fn delete(pool: &SqlitePool, id: &str) -> sqlx::Result<u64> {
    let res = sqlx::query(SQL_DELETE).bind(id).execute(pool).await?;
    Ok(res.rows_affected())
}
