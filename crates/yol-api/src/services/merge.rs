//! JSON-level record construction and shallow merging

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{ApiError, ApiResult};
use crate::models::iso;

fn into_object(body: Value) -> ApiResult<Map<String, Value>> {
    match body {
        Value::Object(map) => Ok(map),
        _ => Err(ApiError::Validation(
            "Request body must be a JSON object".to_string(),
        )),
    }
}

fn decode<T: DeserializeOwned>(map: Map<String, Value>) -> ApiResult<T> {
    serde_json::from_value(Value::Object(map)).map_err(|e| ApiError::Validation(e.to_string()))
}

pub fn timestamp(now: DateTime<Utc>) -> Value {
    Value::String(iso::format(&now))
}

/// Overlay `synthesized` on the client-supplied `body` and decode the result
///
/// Server-side fields win over anything the client sent for the same key.
pub fn build_record<T: DeserializeOwned>(body: Value, synthesized: Map<String, Value>) -> ApiResult<T> {
    let mut map = into_object(body)?;
    map.extend(synthesized);
    decode(map)
}

/// Shallow merge of `patch` over `current`
///
/// The record keeps its `id` and gets `updated_at = now`.
pub fn merge_record<T: Serialize + DeserializeOwned>(
    current: &T,
    patch: Value,
    id: u64,
    now: DateTime<Utc>,
) -> ApiResult<T> {
    let patch = into_object(patch)?;
    let mut map = into_object(serde_json::to_value(current)?)?;
    map.extend(patch);
    map.insert("id".to_string(), Value::from(id));
    map.insert("updated_at".to_string(), timestamp(now));
    decode(map)
}
