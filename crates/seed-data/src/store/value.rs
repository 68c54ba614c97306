//! Conversion between plain JSON and Firestore's typed REST values.
//!
//! Firestore's REST surface wraps every value in a single-key object naming
//! its type, e.g. `{"stringValue": "culte"}` or
//! `{"mapValue": {"fields": {...}}}`. Integers travel as decimal strings.

use serde_json::{Map, Value, json};

use super::Fields;

/// Encodes document fields as a Firestore `fields` map.
pub fn encode_fields(fields: &Fields) -> Map<String, Value> {
    fields
        .iter()
        .map(|(key, value)| (key.clone(), encode_value(value)))
        .collect()
}

/// Encodes a single JSON value.
pub fn encode_value(value: &Value) -> Value {
    match value {
        Value::Null => json!({ "nullValue": null }),
        Value::Bool(b) => json!({ "booleanValue": b }),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                json!({ "integerValue": i.to_string() })
            } else if let Some(u) = n.as_u64() {
                // Beyond i64; Firestore integers are signed 64-bit.
                json!({ "doubleValue": u as f64 })
            } else {
                json!({ "doubleValue": n.as_f64().unwrap_or_default() })
            }
        }
        Value::String(s) => json!({ "stringValue": s }),
        Value::Array(items) => {
            let values: Vec<Value> = items.iter().map(encode_value).collect();
            json!({ "arrayValue": { "values": values } })
        }
        Value::Object(map) => json!({ "mapValue": { "fields": encode_fields(map) } }),
    }
}

/// Decodes a Firestore `fields` map back to plain JSON.
///
/// Returns `None` if any value has an unrecognized shape.
pub fn decode_fields(fields: &Map<String, Value>) -> Option<Fields> {
    fields
        .iter()
        .map(|(key, value)| decode_value(value).map(|v| (key.clone(), v)))
        .collect()
}

/// Decodes a single typed value.
pub fn decode_value(value: &Value) -> Option<Value> {
    let (kind, inner) = value.as_object()?.iter().next()?;

    match kind.as_str() {
        "nullValue" => Some(Value::Null),
        "booleanValue" => inner.as_bool().map(Value::Bool),
        "integerValue" => inner
            .as_str()
            .and_then(|s| s.parse::<i64>().ok())
            .or_else(|| inner.as_i64())
            .map(Value::from),
        "doubleValue" => inner.as_f64().map(Value::from),
        "stringValue" | "timestampValue" | "referenceValue" => {
            inner.as_str().map(|s| Value::String(s.to_string()))
        }
        "arrayValue" => {
            let values = match inner.get("values") {
                Some(values) => values
                    .as_array()?
                    .iter()
                    .map(decode_value)
                    .collect::<Option<Vec<_>>>()?,
                None => Vec::new(),
            };
            Some(Value::Array(values))
        }
        "mapValue" => {
            let fields = match inner.get("fields") {
                Some(fields) => decode_fields(fields.as_object()?)?,
                None => Map::new(),
            };
            Some(Value::Object(fields))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_scalars() {
        assert_eq!(encode_value(&json!(null)), json!({ "nullValue": null }));
        assert_eq!(encode_value(&json!(true)), json!({ "booleanValue": true }));
        assert_eq!(encode_value(&json!(5000)), json!({ "integerValue": "5000" }));
        assert_eq!(encode_value(&json!(0.0)), json!({ "doubleValue": 0.0 }));
        assert_eq!(encode_value(&json!("1080p")), json!({ "stringValue": "1080p" }));
    }

    #[test]
    fn test_encode_nested_document() {
        let fields = json!({
            "tags": ["culte", "louange"],
            "reminders": [],
            "host": { "id": "host1", "avatarUrl": "" }
        });
        let encoded = encode_fields(fields.as_object().unwrap());

        assert_eq!(
            encoded["tags"],
            json!({ "arrayValue": { "values": [
                { "stringValue": "culte" },
                { "stringValue": "louange" }
            ] } })
        );
        assert_eq!(encoded["reminders"], json!({ "arrayValue": { "values": [] } }));
        assert_eq!(
            encoded["host"]["mapValue"]["fields"]["id"],
            json!({ "stringValue": "host1" })
        );
    }

    #[test]
    fn test_decode_firestore_response() {
        // Firestore drops empty `values`/`fields` keys in responses.
        let response = json!({
            "bitrate": { "integerValue": "5000" },
            "isActive": { "booleanValue": true },
            "likes": { "arrayValue": {} },
            "stats": { "mapValue": { "fields": {
                "streakDays": { "integerValue": "0" }
            } } }
        });

        let decoded = decode_fields(response.as_object().unwrap()).unwrap();
        assert_eq!(
            Value::Object(decoded),
            json!({
                "bitrate": 5000,
                "isActive": true,
                "likes": [],
                "stats": { "streakDays": 0 }
            })
        );
    }

    #[test]
    fn test_decode_rejects_unknown_type() {
        assert!(decode_value(&json!({ "geoPointValue": { "latitude": 1.0 } })).is_none());
        assert!(decode_value(&json!("bare")).is_none());
    }
}
