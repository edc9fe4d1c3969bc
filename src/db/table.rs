//! In-memory table
//!
//! A `Table` owns one collection of rows keyed by id. Rows live in a
//! `BTreeMap`, so listing returns them in id order, which is also insertion
//! order because ids only grow. Ids come from a per-table counter and are
//! never handed out twice, even after the row holding the highest id is
//! deleted.
//!
//! All access goes through a `tokio::sync::RwLock`; every mutation holds the
//! write lock for its whole read-modify-write.

use std::collections::BTreeMap;
use tokio::sync::RwLock;

#[derive(Debug)]
struct TableState<T> {
    rows: BTreeMap<i64, T>,
    next_id: i64,
}

/// Lock-protected, id-keyed row collection
#[derive(Debug)]
pub struct Table<T> {
    state: RwLock<TableState<T>>,
}

impl<T: Clone> Table<T> {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(TableState {
                rows: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }

    /// Insert a row built from the freshly assigned id
    pub async fn insert_with<F>(&self, build: F) -> T
    where
        F: FnOnce(i64) -> T,
    {
        let mut state = self.state.write().await;
        let id = state.next_id;
        state.next_id += 1;
        let row = build(id);
        state.rows.insert(id, row.clone());
        row
    }

    /// Insert a row unless an existing row conflicts with it.
    ///
    /// The conflict check and the insert happen under one write lock.
    /// Returns `None` when a conflicting row exists; no id is consumed then.
    pub async fn insert_unique_with<P, F>(&self, conflicts: P, build: F) -> Option<T>
    where
        P: Fn(&T) -> bool,
        F: FnOnce(i64) -> T,
    {
        let mut state = self.state.write().await;
        if state.rows.values().any(|row| conflicts(row)) {
            return None;
        }
        let id = state.next_id;
        state.next_id += 1;
        let row = build(id);
        state.rows.insert(id, row.clone());
        Some(row)
    }

    pub async fn get(&self, id: i64) -> Option<T> {
        self.state.read().await.rows.get(&id).cloned()
    }

    /// First row matching the predicate, in id order
    pub async fn find<P>(&self, predicate: P) -> Option<T>
    where
        P: Fn(&T) -> bool,
    {
        self.state
            .read()
            .await
            .rows
            .values()
            .find(|row| predicate(*row))
            .cloned()
    }

    /// All rows in id order
    pub async fn list(&self) -> Vec<T> {
        self.state.read().await.rows.values().cloned().collect()
    }

    /// Rows matching the predicate, in id order
    pub async fn filter<P>(&self, predicate: P) -> Vec<T>
    where
        P: Fn(&T) -> bool,
    {
        self.state
            .read()
            .await
            .rows
            .values()
            .filter(|row| predicate(*row))
            .cloned()
            .collect()
    }

    /// Replace the row with the given id, keeping the id.
    /// Returns `None` if no such row exists.
    pub async fn replace_with<F>(&self, id: i64, build: F) -> Option<T>
    where
        F: FnOnce(i64) -> T,
    {
        let mut state = self.state.write().await;
        let slot = state.rows.get_mut(&id)?;
        *slot = build(id);
        Some(slot.clone())
    }

    /// Remove a row, returning it if it existed
    pub async fn remove(&self, id: i64) -> Option<T> {
        self.state.write().await.rows.remove(&id)
    }

    pub async fn len(&self) -> usize {
        self.state.read().await.rows.len()
    }
}

impl<T: Clone> Default for Table<T> {
    fn default() -> Self {
        Self::new()
    }
}
