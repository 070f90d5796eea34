use sqlx::SqlitePool;

/// What a conditional signup actually did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignupOutcome {
    Added,
    Full,
    AlreadySignedUp,
}

// Single-statement capacity check: the count and the insert happen in one
// write, so two racing signups cannot both take the last open spot.
const SQL_SIGNUP_IF_CAPACITY: &str = r#"
INSERT INTO activity_participants (activity_name, email, joined_at)
SELECT ?1, ?2, datetime('now')
WHERE (
  SELECT COUNT(*) FROM activity_participants WHERE activity_name = ?1
) < (
  SELECT max_participants FROM activities WHERE name = ?1
)
"#;

const SQL_UNREGISTER: &str = r#"
DELETE FROM activity_participants
WHERE activity_name = ?1 AND email = ?2
"#;

pub async fn signup_if_capacity(
    pool: &SqlitePool,
    activity_name: &str,
    email: &str,
) -> sqlx::Result<SignupOutcome> {
    let result = sqlx::query(SQL_SIGNUP_IF_CAPACITY)
        .bind(activity_name)
        .bind(email)
        .execute(pool)
        .await;

    match result {
        Ok(res) if res.rows_affected() == 0 => Ok(SignupOutcome::Full),
        Ok(_) => Ok(SignupOutcome::Added),
        // The (activity_name, email) primary key turns duplicate enrollment
        // into a constraint violation rather than a second read.
        Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
            Ok(SignupOutcome::AlreadySignedUp)
        }
        Err(e) => Err(e),
    }
}

/// Returns the number of rows removed; 0 means the email was not enrolled.
pub async fn unregister(
    pool: &SqlitePool,
    activity_name: &str,
    email: &str,
) -> sqlx::Result<u64> {
    let res = sqlx::query(SQL_UNREGISTER)
        .bind(activity_name)
        .bind(email)
        .execute(pool)
        .await?;
    Ok(res.rows_affected())
}
