pub mod activities_repo;
pub mod announcements_repo;
pub mod participants_repo;
pub mod schema;
pub mod students_repo;
pub mod teachers_repo;
