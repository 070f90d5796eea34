use sqlx::SqlitePool;

use crate::models::TeacherRow;

const SQL_FETCH_BY_USERNAME: &str = r#"
SELECT username, display_name, password
FROM teachers
WHERE username = ?1
LIMIT 1
"#;

const SQL_INSERT_TEACHER: &str = r#"
INSERT OR IGNORE INTO teachers (username, display_name, password)
VALUES (?, ?, ?)
"#;

pub async fn fetch_by_username(
    pool: &SqlitePool,
    username: &str,
) -> sqlx::Result<Option<TeacherRow>> {
    sqlx::query_as::<_, TeacherRow>(SQL_FETCH_BY_USERNAME)
        .bind(username)
        .fetch_optional(pool)
        .await
}

pub async fn insert_teacher(
    pool: &SqlitePool,
    username: &str,
    display_name: &str,
    password: &str,
) -> sqlx::Result<()> {
    sqlx::query(SQL_INSERT_TEACHER)
        .bind(username)
        .bind(display_name)
        .bind(password)
        .execute(pool)
        .await?;
    Ok(())
}
