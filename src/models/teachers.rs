// Password is stored and compared as plain text; that is the stored format
// this portal inherited, not an invitation to add hashing here.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct TeacherRow {
    pub username: String,
    pub display_name: String,
    pub password: String,
}
