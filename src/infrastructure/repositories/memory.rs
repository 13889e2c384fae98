//! In-memory table shared by every repository implementation.

use std::hash::Hash;
use std::sync::atomic::{AtomicI64, Ordering};

use dashmap::DashMap;

use crate::infrastructure::simulation::ServerLink;
use crate::shared::error::RepositoryError;

/// A keyed collection standing in for a database table.
///
/// Every operation first passes through the table's [`ServerLink`]; when the
/// link refuses, the operation returns the error without reading or writing.
#[derive(Debug)]
pub struct MemoryTable<K, V>
where
    K: Eq + Hash,
{
    rows: DashMap<K, V>,
    sequence: AtomicI64,
    link: ServerLink,
}

impl<K, V> MemoryTable<K, V>
where
    K: Eq + Hash + Ord + Clone,
    V: Clone,
{
    pub fn new(link: ServerLink) -> Self {
        Self {
            rows: DashMap::new(),
            sequence: AtomicI64::new(0),
            link,
        }
    }

    pub fn link(&self) -> &ServerLink {
        &self.link
    }

    pub async fn get(&self, key: &K) -> Result<Option<V>, RepositoryError> {
        self.link.check().await?;
        Ok(self.rows.get(key).map(|row| row.value().clone()))
    }

    /// All rows ordered by key.
    pub async fn all(&self) -> Result<Vec<V>, RepositoryError> {
        self.filter(|_| true).await
    }

    /// Rows satisfying `predicate`, ordered by key.
    pub async fn filter<F>(&self, predicate: F) -> Result<Vec<V>, RepositoryError>
    where
        F: Fn(&V) -> bool,
    {
        self.link.check().await?;
        let mut rows: Vec<(K, V)> = self
            .rows
            .iter()
            .filter(|row| predicate(row.value()))
            .map(|row| (row.key().clone(), row.value().clone()))
            .collect();
        rows.sort_by(|(a, _), (b, _)| a.cmp(b));
        Ok(rows.into_iter().map(|(_, v)| v).collect())
    }

    /// First row (in key order) satisfying `predicate`.
    pub async fn find<F>(&self, predicate: F) -> Result<Option<V>, RepositoryError>
    where
        F: Fn(&V) -> bool,
    {
        Ok(self.filter(predicate).await?.into_iter().next())
    }

    /// Insert or overwrite. A second save under the same key replaces the row.
    pub async fn upsert(&self, key: K, value: V) -> Result<V, RepositoryError> {
        self.link.check().await?;
        self.rows.insert(key, value.clone());
        Ok(value)
    }

    pub async fn remove(&self, key: &K) -> Result<Option<V>, RepositoryError> {
        self.link.check().await?;
        Ok(self.rows.remove(key).map(|(_, v)| v))
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl<V> MemoryTable<i64, V>
where
    V: Clone,
{
    /// Next free id. Ids are never reused, even after deletes.
    pub async fn next_id(&self) -> Result<i64, RepositoryError> {
        self.link.check().await?;
        let floor = self.rows.iter().map(|row| *row.key()).max().unwrap_or(0);
        self.sequence.fetch_max(floor, Ordering::SeqCst);
        Ok(self.sequence.fetch_add(1, Ordering::SeqCst) + 1)
    }
}
