// Instants are RFC 3339 UTC text; SQLite's datetime() understands them, so
// expiry checks stay in SQL next to the listing queries.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AnnouncementRow {
    pub id: String,
    pub message: String,
    pub starts_at: Option<String>,
    pub expires_at: String,
    pub created_at: String,
    pub updated_at: String,
}
