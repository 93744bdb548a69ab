//! Raw response envelope handling for the content source.

use serde_json::Value;

/// Extracts the top-level `data` array from a collection response.
///
/// The content source wraps every collection in `{ "data": [...] }`, but a
/// missing, `null`, or non-array `data` has been observed in the wild and is
/// treated as an empty collection rather than an error.
pub(crate) fn extract_data_array(body: Value) -> Vec<Value> {
    match body {
        Value::Object(mut envelope) => match envelope.remove("data") {
            Some(Value::Array(records)) => records,
            _ => {
                tracing::debug!("collection response has no data array");
                Vec::new()
            }
        },
        _ => Vec::new(),
    }
}
