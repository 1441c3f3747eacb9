//! Report payload parser
//!
//! Accepts the `getAllReports` response (`{"reports": [...]}`) or a bare array.
//! Individual fields are read leniently: a wrongly typed field is treated as
//! missing instead of failing the whole payload.

use serde_json::{Map, Value};

use crate::core::{Location, Report};

/// Parse a payload into reports. Only a non-JSON or wrongly shaped payload is
/// an error; non-object entries inside the array are skipped.
pub(crate) fn parse_payload(content: &str) -> Result<Vec<Report>, serde_json::Error> {
    let value: Value = serde_json::from_str(content)?;
    let entries = match value {
        Value::Array(entries) => entries,
        Value::Object(mut obj) => match obj.remove("reports") {
            Some(Value::Array(entries)) => entries,
            _ => {
                return Err(serde::de::Error::custom(
                    "expected a \"reports\" array or a top-level array",
                ));
            }
        },
        _ => {
            return Err(serde::de::Error::custom(
                "expected a \"reports\" array or a top-level array",
            ));
        }
    };

    Ok(entries
        .into_iter()
        .filter_map(|entry| match entry {
            Value::Object(obj) => Some(report_from_object(&obj)),
            _ => None,
        })
        .collect())
}

fn report_from_object(obj: &Map<String, Value>) -> Report {
    Report {
        id: id_field(obj),
        category: label_field(obj, "category"),
        status: label_field(obj, "status"),
        created_at: timestamp_field(obj.get("createdAt")),
        location: obj.get("location").and_then(location_field),
        description: obj
            .get("description")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        reported_by: label_field(obj, "reportedBy").or_else(|| label_field(obj, "userName")),
        files: obj
            .get("filesArray")
            .and_then(Value::as_array)
            .map(|files| {
                files
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default(),
    }
}

fn id_field(obj: &Map<String, Value>) -> String {
    for key in ["_id", "id"] {
        match obj.get(key) {
            Some(Value::String(s)) if !s.is_empty() => return s.clone(),
            Some(Value::Number(n)) => return n.to_string(),
            // Mongo extended JSON: {"$oid": "..."}
            Some(Value::Object(inner)) => {
                if let Some(oid) = inner.get("$oid").and_then(Value::as_str) {
                    return oid.to_string();
                }
            }
            _ => {}
        }
    }
    String::new()
}

/// Non-empty string or nothing
fn label_field(obj: &Map<String, Value>, key: &str) -> Option<String> {
    match obj.get(key) {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        _ => None,
    }
}

fn timestamp_field(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Object(inner) => inner.get("$date").and_then(|v| timestamp_field(Some(v))),
        _ => None,
    }
}

fn location_field(value: &Value) -> Option<Location> {
    let obj = value.as_object()?;
    let latitude = coordinate(obj.get("latitude")?)?;
    let longitude = coordinate(obj.get("longitude")?)?;
    Some(Location {
        latitude,
        longitude,
    })
}

fn coordinate(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|c| c.is_finite())
}
