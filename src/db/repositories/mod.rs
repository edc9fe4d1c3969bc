//! Repositories
//!
//! Repository pattern implementations for data access.
//! Each repository handles CRUD operations for a specific entity.

pub mod record;
pub mod user;

pub use record::{MemoryRecordRepository, RecordRepository};
pub use user::{MemoryUserRepository, UserRepository};
