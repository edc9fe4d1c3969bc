//! Data layer
//!
//! All school data lives in memory and is gone when the process exits.
//! A `Database` owns one repository per collection; it is created once in
//! `main` (or per test) and handed to the services, so nothing is global.
//!
//! # Usage
//!
//! ```ignore
//! use maktab::db::{seed, Database};
//!
//! let db = Database::in_memory();
//! seed::seed_records(&db).await?;
//! let teachers = db.teachers.list().await?;
//! ```

pub mod repositories;
pub mod seed;
pub mod table;

use std::sync::Arc;

use crate::models::{Schedule, Student, Teacher};
use repositories::{MemoryRecordRepository, MemoryUserRepository, RecordRepository, UserRepository};

/// Handle to every collection of the backend
#[derive(Clone)]
pub struct Database {
    pub users: Arc<dyn UserRepository>,
    pub teachers: Arc<dyn RecordRepository<Teacher>>,
    pub students: Arc<dyn RecordRepository<Student>>,
    pub schedule: Arc<dyn RecordRepository<Schedule>>,
}

impl Database {
    /// Fresh, empty in-memory collections
    pub fn in_memory() -> Self {
        Self {
            users: MemoryUserRepository::boxed(),
            teachers: MemoryRecordRepository::<Teacher>::boxed(),
            students: MemoryRecordRepository::<Student>::boxed(),
            schedule: MemoryRecordRepository::<Schedule>::boxed(),
        }
    }
}
