pub mod activities;
pub mod announcements;
pub mod participants;
pub mod students;
pub mod teachers;

pub use activities::ActivityRow;
pub use announcements::AnnouncementRow;
pub use participants::ParticipantRow;
pub use students::StudentRow;
pub use teachers::TeacherRow;
