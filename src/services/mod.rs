pub mod activities_service;
pub mod announcements_service;
pub mod auth_service;
pub mod roster_service;
