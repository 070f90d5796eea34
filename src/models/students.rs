#[allow(dead_code)]
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct StudentRow {
    pub email: String,
    pub display_name: String,
    pub grade_level: Option<i64>,
}
