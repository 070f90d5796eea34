use sqlx::SqlitePool;

const SQL_INSERT_STUDENT: &str = r#"
INSERT OR IGNORE INTO students (email, display_name, grade_level)
VALUES (?, ?, ?)
"#;

pub async fn insert_student(
    pool: &SqlitePool,
    email: &str,
    display_name: &str,
    grade_level: Option<i64>,
) -> sqlx::Result<()> {
    sqlx::query(SQL_INSERT_STUDENT)
        .bind(email)
        .bind(display_name)
        .bind(grade_level)
        .execute(pool)
        .await?;
    Ok(())
}

/// First signup creates the student record implicitly; the display name falls
/// back to the email local part and the grade stays unknown.
pub async fn ensure_student(pool: &SqlitePool, email: &str) -> sqlx::Result<()> {
    let local_part = email.split('@').next().unwrap_or(email);
    insert_student(pool, email, local_part, None).await
}
