// Enrollment rows; the (activity_name, email) primary key keeps signups unique.
#[allow(dead_code)]
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ParticipantRow {
    pub activity_name: String,
    pub email: String,
    pub joined_at: String,
}
