//! # pooltest common library
//!
//! Shared code for the pooltest webhook service:
//! - Measurement model and payload normalization
//! - Storage backends (append log, SQLite, in-memory)
//! - Database initialization for the `water_tests` table
//! - Configuration loading and storage location resolution

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod normalize;
pub mod storage;

pub use error::{Error, Result, StorageError};
pub use models::{Measurement, StoredMeasurement};
pub use normalize::{normalize, parse_payload};
pub use storage::{open_store, MeasurementStore};
