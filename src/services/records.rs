//! School record service
//!
//! One `RecordService` per collection (teachers, students, lessons) wraps
//! the repository and turns missing ids into `RecordError::NotFound` with
//! the Uzbek message clients of the old service expect.

use crate::db::repositories::RecordRepository;
use crate::models::Record;
use anyhow::Context;
use std::fmt;
use std::sync::Arc;

/// Which collection a service manages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Teacher,
    Student,
    Lesson,
}

impl RecordKind {
    pub fn not_found_message(&self) -> &'static str {
        match self {
            RecordKind::Teacher => "O'qituvchi topilmadi",
            RecordKind::Student => "O'quvchi topilmadi",
            RecordKind::Lesson => "Dars topilmadi",
        }
    }

    pub fn deleted_message(&self) -> &'static str {
        match self {
            RecordKind::Teacher => "O'qituvchi o'chirildi",
            RecordKind::Student => "O'quvchi o'chirildi",
            RecordKind::Lesson => "Dars o'chirildi",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordKind::Teacher => write!(f, "teacher"),
            RecordKind::Student => write!(f, "student"),
            RecordKind::Lesson => write!(f, "lesson"),
        }
    }
}

/// Error types for record operations
#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    #[error("{}", .0.not_found_message())]
    NotFound(RecordKind),

    #[error("Internal error: {0}")]
    InternalError(#[from] anyhow::Error),
}

/// CRUD over one school collection
pub struct RecordService<T: Record> {
    repo: Arc<dyn RecordRepository<T>>,
    kind: RecordKind,
}

impl<T: Record> RecordService<T> {
    pub fn new(repo: Arc<dyn RecordRepository<T>>, kind: RecordKind) -> Self {
        Self { repo, kind }
    }

    pub fn kind(&self) -> RecordKind {
        self.kind
    }

    pub async fn list(&self) -> Result<Vec<T>, RecordError> {
        let records = self
            .repo
            .list()
            .await
            .with_context(|| format!("Failed to list {} records", self.kind))?;
        Ok(records)
    }

    /// List the records the predicate accepts, in id order
    pub async fn list_where<P>(&self, predicate: P) -> Result<Vec<T>, RecordError>
    where
        P: Fn(&T) -> bool + Send + Sync,
    {
        let records = self
            .repo
            .list_where(&predicate)
            .await
            .with_context(|| format!("Failed to list {} records", self.kind))?;
        Ok(records)
    }

    pub async fn get(&self, id: i64) -> Result<T, RecordError> {
        self.repo
            .get_by_id(id)
            .await
            .with_context(|| format!("Failed to get {} {}", self.kind, id))?
            .ok_or(RecordError::NotFound(self.kind))
    }

    /// Create a record under a fresh server-assigned id
    pub async fn create(&self, input: T::Input) -> Result<T, RecordError> {
        let record = self
            .repo
            .create(input)
            .await
            .with_context(|| format!("Failed to create {}", self.kind))?;
        tracing::debug!("Created {} {}", self.kind, record.id());
        Ok(record)
    }

    /// Replace every field of an existing record, keeping its id
    pub async fn update(&self, id: i64, input: T::Input) -> Result<T, RecordError> {
        self.repo
            .update(id, input)
            .await
            .with_context(|| format!("Failed to update {} {}", self.kind, id))?
            .ok_or(RecordError::NotFound(self.kind))
    }

    pub async fn delete(&self, id: i64) -> Result<(), RecordError> {
        let deleted = self
            .repo
            .delete(id)
            .await
            .with_context(|| format!("Failed to delete {} {}", self.kind, id))?;
        if !deleted {
            return Err(RecordError::NotFound(self.kind));
        }
        tracing::debug!("Deleted {} {}", self.kind, id);
        Ok(())
    }

    pub async fn count(&self) -> Result<usize, RecordError> {
        let count = self
            .repo
            .count()
            .await
            .with_context(|| format!("Failed to count {} records", self.kind))?;
        Ok(count)
    }
}
