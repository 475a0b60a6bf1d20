//! Storage backends for measurements
//!
//! One long-lived store is built at startup by [`open_store`] and shared by
//! every request handler through an `Arc<dyn MeasurementStore>`.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

use crate::config::{BackendKind, StorageLocation};
use crate::error::StorageError;
use crate::models::{Measurement, StoredMeasurement};

pub mod append_log;
pub mod memory;
pub mod sqlite;

pub use append_log::AppendLog;
pub use memory::MemoryStore;
pub use sqlite::RelationalStore;

/// Persistence contract shared by all backends
#[async_trait]
pub trait MeasurementStore: Send + Sync {
    /// Backend identifier for logs and health output
    fn backend_name(&self) -> &'static str;

    /// Durably persist one measurement
    ///
    /// Either the whole record is written or nothing is.
    async fn store(&self, measurement: &Measurement) -> Result<(), StorageError>;

    /// Whether [`MeasurementStore::list_all`] is available
    fn supports_listing(&self) -> bool {
        false
    }

    /// Every stored measurement, ordered by id
    async fn list_all(&self) -> Result<Vec<StoredMeasurement>, StorageError> {
        Err(StorageError::ListingUnsupported(self.backend_name()))
    }
}

/// Build the configured backend
///
/// For SQLite this also creates the `water_tests` table when missing.
pub async fn open_store(location: &StorageLocation) -> crate::Result<Arc<dyn MeasurementStore>> {
    let store: Arc<dyn MeasurementStore> = match location.backend {
        BackendKind::Sqlite => {
            let pool = crate::db::init_database(&location.path).await?;
            Arc::new(RelationalStore::new(pool))
        }
        BackendKind::AppendLog => Arc::new(AppendLog::open(&location.path)?),
        BackendKind::Memory => Arc::new(MemoryStore::new()),
    };

    info!(backend = store.backend_name(), path = %location.path.display(), "Storage ready");
    Ok(store)
}
