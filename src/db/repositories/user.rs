//! User account repository
//!
//! This module provides:
//! - `UserRepository` trait defining the interface for account data access
//! - `MemoryUserRepository` keeping accounts in an in-memory table

use crate::db::table::Table;
use crate::models::UserAccount;
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// User repository trait
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Store a new account and return it with its assigned id.
    ///
    /// Returns `Ok(None)` if the username is already taken. The uniqueness
    /// check and the insert are atomic.
    async fn create(&self, account: &UserAccount) -> Result<Option<UserAccount>>;

    /// Get account by ID
    async fn get_by_id(&self, id: i64) -> Result<Option<UserAccount>>;

    /// Get account by username
    async fn get_by_username(&self, username: &str) -> Result<Option<UserAccount>>;

    /// Count accounts
    async fn count(&self) -> Result<usize>;
}

/// In-memory account store
#[derive(Debug, Default)]
pub struct MemoryUserRepository {
    table: Table<UserAccount>,
}

impl MemoryUserRepository {
    pub fn new() -> Self {
        Self { table: Table::new() }
    }

    /// Create a boxed repository for use with dependency injection
    pub fn boxed() -> Arc<dyn UserRepository> {
        Arc::new(Self::new())
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn create(&self, account: &UserAccount) -> Result<Option<UserAccount>> {
        let created = self
            .table
            .insert_unique_with(
                |existing| existing.username == account.username,
                |id| UserAccount {
                    id,
                    ..account.clone()
                },
            )
            .await;
        Ok(created)
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<UserAccount>> {
        Ok(self.table.get(id).await)
    }

    async fn get_by_username(&self, username: &str) -> Result<Option<UserAccount>> {
        Ok(self.table.find(|account| account.username == username).await)
    }

    async fn count(&self) -> Result<usize> {
        Ok(self.table.len().await)
    }
}
