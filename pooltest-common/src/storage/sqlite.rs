//! SQLite-backed relational store

use async_trait::async_trait;
use sqlx::SqlitePool;

use super::MeasurementStore;
use crate::error::StorageError;
use crate::models::{Measurement, StoredMeasurement};

/// Store over the `water_tests` table
///
/// The pool must already be initialized with
/// [`init_database`](crate::db::init_database).
#[derive(Debug, Clone)]
pub struct RelationalStore {
    pool: SqlitePool,
}

impl RelationalStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

type WaterTestRow = (i64, String, f64, f64, Option<i64>, Option<i64>);

fn row_to_measurement(row: WaterTestRow) -> StoredMeasurement {
    let (id, test_date, chlorine, ph, acid_demand, total_alkalinity) = row;
    StoredMeasurement {
        id,
        measurement: Measurement {
            test_date,
            chlorine,
            ph,
            // Columns are nullable for rows written by other tools
            acid_demand: acid_demand.unwrap_or(0),
            total_alkalinity: total_alkalinity.unwrap_or(0),
        },
    }
}

#[async_trait]
impl MeasurementStore for RelationalStore {
    fn backend_name(&self) -> &'static str {
        "sqlite"
    }

    async fn store(&self, measurement: &Measurement) -> Result<(), StorageError> {
        sqlx::query(
            r#"
            INSERT INTO water_tests (testDate, chlorine, ph, acidDemand, totalAlkalinity)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(measurement.test_date.as_str())
        .bind(measurement.chlorine)
        .bind(measurement.ph)
        .bind(measurement.acid_demand)
        .bind(measurement.total_alkalinity)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    fn supports_listing(&self) -> bool {
        true
    }

    async fn list_all(&self) -> Result<Vec<StoredMeasurement>, StorageError> {
        let rows = sqlx::query_as::<_, WaterTestRow>(
            r#"
            SELECT id, testDate, chlorine, ph, acidDemand, totalAlkalinity
            FROM water_tests
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(row_to_measurement).collect())
    }
}
