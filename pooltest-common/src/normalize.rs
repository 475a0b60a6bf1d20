//! Payload normalization
//!
//! Webhook senders are not trusted to send well-formed payloads. Every known
//! field is extracted with an explicit default, so normalization never fails.
//! Integer fields arrive as JSON numbers and are rounded to the nearest
//! integer (halves away from zero), never truncated.

use serde_json::{Map, Value};

use crate::models::Measurement;

/// A decoded webhook body
pub type Payload = Map<String, Value>;

/// Parse a request body into a JSON object
///
/// Valid JSON that is not an object (`[]`, `42`, `null`) is rejected.
pub fn parse_payload(body: &[u8]) -> Result<Payload, serde_json::Error> {
    serde_json::from_slice::<Payload>(body)
}

/// Build a measurement from a payload, defaulting anything missing or mistyped
pub fn normalize(payload: &Payload) -> Measurement {
    Measurement {
        test_date: string_field(payload, "testDate"),
        chlorine: float_field(payload, "chlorine"),
        ph: float_field(payload, "ph"),
        acid_demand: rounded_field(payload, "acidDemand"),
        total_alkalinity: rounded_field(payload, "totalAlkalinity"),
    }
}

/// String value of `key`, or `""`
pub fn string_field(payload: &Payload, key: &str) -> String {
    payload
        .get(key)
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_default()
}

/// Numeric value of `key` as `f64`, or `0.0`
///
/// Integers are accepted too; a JSON number is a number.
pub fn float_field(payload: &Payload, key: &str) -> f64 {
    payload.get(key).and_then(Value::as_f64).unwrap_or(0.0)
}

/// Numeric value of `key` rounded to the nearest integer, or `0`
pub fn rounded_field(payload: &Payload, key: &str) -> i64 {
    // `as` saturates on overflow
    float_field(payload, key).round() as i64
}
