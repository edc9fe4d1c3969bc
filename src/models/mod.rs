//! Data models
//!
//! This module contains the data structures of the school backend:
//! - Login accounts (UserAccount, UserRole)
//! - School records (Teacher, Student, Schedule) with their request inputs
//! - Aggregated statistics

mod schedule;
mod stats;
mod student;
mod teacher;
mod user;

pub use schedule::{Schedule, ScheduleFilter, ScheduleInput};
pub use stats::SchoolStats;
pub use student::{Student, StudentFilter, StudentInput, GRADES};
pub use teacher::{Teacher, TeacherInput};
pub use user::{UserAccount, UserRole};

/// A record kept in an id-keyed in-memory table.
pub trait Record: Clone + Send + Sync + 'static {
    /// Request body the record is built from
    type Input: Send + Sync;

    /// Build the stored record from a server-assigned id and client input
    fn from_input(id: i64, input: Self::Input) -> Self;

    fn id(&self) -> i64;
}
