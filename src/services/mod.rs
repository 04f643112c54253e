//! Services module
//!
//! Business logic per feature collection. Each service validates its
//! input payloads, talks to the store, and hands derived views to the
//! caller; rendering stays outside.

pub mod alarms;
pub mod expenses;
pub mod notes;
pub mod profile;
pub mod resources;
pub mod social;
pub mod subjects;
pub mod tasks;

pub use alarms::{AlarmScheduler, AlarmsService, Clock, SystemClock};
pub use expenses::ExpensesService;
pub use notes::NotesService;
pub use profile::ProfileService;
pub use resources::ResourcesService;
pub use social::SocialService;
pub use subjects::SubjectsService;
pub use tasks::TasksService;
