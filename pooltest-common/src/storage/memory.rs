//! In-process measurement store
//!
//! Same semantics as the relational store (monotonic ids from 1, listing in
//! id order) without touching disk. Nothing survives a restart.

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::MeasurementStore;
use crate::error::StorageError;
use crate::models::{Measurement, StoredMeasurement};

#[derive(Debug, Default)]
pub struct MemoryStore {
    rows: RwLock<Vec<StoredMeasurement>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.is_empty()
    }
}

#[async_trait]
impl MeasurementStore for MemoryStore {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn store(&self, measurement: &Measurement) -> Result<(), StorageError> {
        let mut rows = self.rows.write().await;
        let id = rows.last().map(|r| r.id + 1).unwrap_or(1);
        rows.push(StoredMeasurement {
            id,
            measurement: measurement.clone(),
        });
        Ok(())
    }

    fn supports_listing(&self) -> bool {
        true
    }

    async fn list_all(&self) -> Result<Vec<StoredMeasurement>, StorageError> {
        Ok(self.rows.read().await.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_ids_start_at_one_and_increase() {
        let store = MemoryStore::new();
        assert!(store.is_empty().await);

        store.store(&Measurement::default()).await.unwrap();
        store.store(&Measurement::default()).await.unwrap();

        let rows = store.list_all().await.unwrap();
        assert_eq!(rows.iter().map(|r| r.id).collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(store.len().await, 2);
    }
}
