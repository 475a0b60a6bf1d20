//! Measurement models

use serde::{Deserialize, Serialize};

/// One water-quality reading, as normalized from a webhook payload
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Measurement {
    /// Free-form date string, not validated
    pub test_date: String,
    pub chlorine: f64,
    pub ph: f64,
    pub acid_demand: i64,
    pub total_alkalinity: i64,
}

/// A measurement read back from a store that assigns identities
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredMeasurement {
    pub id: i64,
    #[serde(flatten)]
    pub measurement: Measurement,
}
