#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ActivityRow {
    pub name: String,
    pub description: String,
    /// Human-readable schedule string, always present.
    pub schedule: String,
    /// JSON array of weekday names; NULL when only the display string exists.
    pub days: Option<String>,
    /// "HH:MM", 24h, zero-padded. NULL together with `days`.
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub max_participants: i64,
    pub category: Option<String>,
}
