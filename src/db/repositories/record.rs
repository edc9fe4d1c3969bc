//! School record repository
//!
//! Teachers, students and lessons share one storage shape: an id-keyed
//! collection with plain create, read, replace and delete. This module
//! provides:
//! - `RecordRepository<T>` trait defining the interface for record access
//! - `MemoryRecordRepository<T>` keeping records in an in-memory table

use crate::db::table::Table;
use crate::models::Record;
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// Record repository trait
#[async_trait]
pub trait RecordRepository<T: Record>: Send + Sync {
    /// Store a new record under the next free id
    async fn create(&self, input: T::Input) -> Result<T>;

    /// Get record by ID
    async fn get_by_id(&self, id: i64) -> Result<Option<T>>;

    /// List all records in id order
    async fn list(&self) -> Result<Vec<T>>;

    /// List records matching the predicate, in id order
    async fn list_where(&self, predicate: &(dyn for<'r> Fn(&'r T) -> bool + Send + Sync)) -> Result<Vec<T>>;

    /// Replace the record with the given id. Returns `None` if it does not exist.
    async fn update(&self, id: i64, input: T::Input) -> Result<Option<T>>;

    /// Delete a record. Returns `false` if it did not exist.
    async fn delete(&self, id: i64) -> Result<bool>;

    /// Count records
    async fn count(&self) -> Result<usize>;
}

/// In-memory record store
#[derive(Debug)]
pub struct MemoryRecordRepository<T> {
    table: Table<T>,
}

impl<T: Record> MemoryRecordRepository<T> {
    pub fn new() -> Self {
        Self { table: Table::new() }
    }

    /// Create a boxed repository for use with dependency injection
    pub fn boxed() -> Arc<dyn RecordRepository<T>> {
        Arc::new(Self::new())
    }
}

impl<T: Record> Default for MemoryRecordRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Record> RecordRepository<T> for MemoryRecordRepository<T> {
    async fn create(&self, input: T::Input) -> Result<T> {
        Ok(self.table.insert_with(|id| T::from_input(id, input)).await)
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<T>> {
        Ok(self.table.get(id).await)
    }

    async fn list(&self) -> Result<Vec<T>> {
        Ok(self.table.list().await)
    }

    async fn list_where(&self, predicate: &(dyn for<'r> Fn(&'r T) -> bool + Send + Sync)) -> Result<Vec<T>> {
        Ok(self.table.filter(predicate).await)
    }

    async fn update(&self, id: i64, input: T::Input) -> Result<Option<T>> {
        Ok(self.table.replace_with(id, |id| T::from_input(id, input)).await)
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        Ok(self.table.remove(id).await.is_some())
    }

    async fn count(&self) -> Result<usize> {
        Ok(self.table.len().await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Teacher, TeacherInput};

    fn input(ism: &str, fan: &str) -> TeacherInput {
        TeacherInput {
            ism: ism.to_string(),
            familiya: "Karimova".to_string(),
            fan: fan.to_string(),
            telefon: "+998901234567".to_string(),
            email: None,
        }
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let repo = MemoryRecordRepository::<Teacher>::new();
        let created = repo.create(input("Aziza", "Matematika")).await.unwrap();

        assert_eq!(created.id, 1);
        let fetched = repo.get_by_id(1).await.unwrap().unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn test_update_replaces_fields_keeps_id() {
        let repo = MemoryRecordRepository::<Teacher>::new();
        repo.create(input("Aziza", "Matematika")).await.unwrap();

        let updated = repo.update(1, input("Aziza", "Algebra")).await.unwrap().unwrap();
        assert_eq!(updated.id, 1);
        assert_eq!(updated.fan, "Algebra");
        assert!(repo.update(5, input("X", "Y")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_and_count() {
        let repo = MemoryRecordRepository::<Teacher>::new();
        repo.create(input("Aziza", "Matematika")).await.unwrap();
        repo.create(input("Jasur", "Fizika")).await.unwrap();

        assert!(repo.delete(1).await.unwrap());
        assert!(!repo.delete(1).await.unwrap());
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_list_where() {
        let repo = MemoryRecordRepository::<Teacher>::new();
        repo.create(input("Aziza", "Matematika")).await.unwrap();
        repo.create(input("Jasur", "Fizika")).await.unwrap();
        repo.create(input("Nodira", "Matematika")).await.unwrap();

        let maths = repo.list_where(&|t: &Teacher| t.fan == "Matematika").await.unwrap();
        let ids: Vec<i64> = maths.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }
}
