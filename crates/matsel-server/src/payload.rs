//! Turning a `/predict` request body into a feature row.
//!
//! Checks run in a fixed order: the body must be a JSON object, every
//! feature column must be present, and every present value must coerce to a
//! float. The first failing check decides the error.
use std::fmt;

use serde_json::{Map, Value};

use matsel_classifiers::error::quoted_list;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PayloadError {
    InvalidJson,
    /// Missing names, in feature-column order.
    MissingFields(Vec<String>),
    NonNumeric,
}

impl fmt::Display for PayloadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PayloadError::InvalidJson => write!(f, "Invalid JSON payload."),
            PayloadError::MissingFields(fields) => {
                write!(f, "Missing fields: {}", quoted_list(fields))
            }
            PayloadError::NonNumeric => write!(f, "All feature values must be numeric."),
        }
    }
}

impl std::error::Error for PayloadError {}

/// Parse `body` and return one value per entry of `columns`, in that order.
/// Keys not named in `columns` are ignored.
pub fn extract_features(body: &[u8], columns: &[String]) -> Result<Vec<f64>, PayloadError> {
    let payload: Value = serde_json::from_slice(body).map_err(|_| PayloadError::InvalidJson)?;
    let object = payload.as_object().ok_or(PayloadError::InvalidJson)?;
    features_from_object(object, columns)
}

pub fn features_from_object(
    object: &Map<String, Value>,
    columns: &[String],
) -> Result<Vec<f64>, PayloadError> {
    let missing: Vec<String> = columns
        .iter()
        .filter(|name| !object.contains_key(name.as_str()))
        .cloned()
        .collect();
    if !missing.is_empty() {
        return Err(PayloadError::MissingFields(missing));
    }

    columns
        .iter()
        .map(|name| coerce_f64(&object[name.as_str()]).ok_or(PayloadError::NonNumeric))
        .collect()
}

/// Numbers pass through, booleans map to 1.0/0.0 and strings are parsed
/// after trimming. Null, arrays and objects never coerce, and neither does
/// anything that is not finite once narrowed to the model's f32 input.
fn coerce_f64(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }?;
    (parsed.is_finite() && (parsed as f32).is_finite()).then_some(parsed)
}
