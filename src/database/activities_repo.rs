use sqlx::SqlitePool;

use crate::models::ActivityRow;

/// Activity plus its enrolled emails, aggregated in enrollment order.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ActivityListRow {
    pub name: String,
    pub description: String,
    pub schedule: String,
    pub days: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub max_participants: i64,
    pub category: Option<String>,
    pub participants_json: Option<String>,
}

// Empty-string parameters mean "no filter". Rows without a structured
// schedule always pass, falling back to their display string.
const SQL_LIST: &str = r#"
SELECT
  a.name,
  a.description,
  a.schedule,
  a.days,
  a.start_time,
  a.end_time,
  a.max_participants,
  a.category,
  (
    SELECT json_group_array(email)
    FROM (
      SELECT ap.email
      FROM activity_participants ap
      WHERE ap.activity_name = a.name
      ORDER BY ap.joined_at ASC, ap.rowid ASC
    )
  ) AS participants_json
FROM activities a
WHERE
  (
    ?1 = ''
    OR a.days IS NULL
    OR EXISTS (
      SELECT 1 FROM json_each(a.days)
      WHERE lower(json_each.value) = lower(?1)
    )
  )
  AND (?2 = '' OR a.end_time IS NULL OR a.end_time >= ?2)
  AND (?3 = '' OR a.start_time IS NULL OR a.start_time <= ?3)
ORDER BY a.name ASC
"#;

const SQL_FETCH_BY_NAME: &str = r#"
SELECT name, description, schedule, days, start_time, end_time, max_participants, category
FROM activities
WHERE name = ?1
LIMIT 1
"#;

/// List activities whose day list contains `day` and whose time window
/// overlaps `[start_time, end_time]`. "HH:MM" strings compare correctly as
/// text, so the overlap test stays in SQL.
pub async fn list(
    pool: &SqlitePool,
    day: &str,
    start_time: &str,
    end_time: &str,
) -> sqlx::Result<Vec<ActivityListRow>> {
    sqlx::query_as::<_, ActivityListRow>(SQL_LIST)
        .bind(day)
        .bind(start_time)
        .bind(end_time)
        .fetch_all(pool)
        .await
}

pub async fn fetch_by_name(pool: &SqlitePool, name: &str) -> sqlx::Result<Option<ActivityRow>> {
    sqlx::query_as::<_, ActivityRow>(SQL_FETCH_BY_NAME)
        .bind(name)
        .fetch_optional(pool)
        .await
}
