//! Defines data structures for the location service.
//!
//! Includes structs for:
//! - Deserializing location records returned by the API (`Location`).
//! - Building request bodies for create/update from YAML input (`LocationPayload`).

use chrono::{Local, TimeZone};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

/// Format used when rendering `created_at` for humans.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A location record as stored by the server.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Location {
    /// Opaque database identifier.
    #[serde(rename = "_id")]
    pub db_id: String,
    /// Location identifier chosen by the operator.
    pub id: String,
    /// Creation time in Unix seconds. Integer in practice; fractional
    /// seconds are accepted and truncated for display.
    pub created_at: Number,
    /// Any descriptive fields supplied on create/update.
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

impl Location {
    /// Renders `created_at` in local time, falling back to the raw value when
    /// the timestamp is out of range.
    pub fn created_at_local(&self) -> String {
        let secs = self
            .created_at
            .as_i64()
            .or_else(|| self.created_at.as_f64().map(|f| f.trunc() as i64));

        secs.and_then(|secs| Local.timestamp_opt(secs, 0).single())
            .map(|t| t.format(TIMESTAMP_FORMAT).to_string())
            .unwrap_or_else(|| self.created_at.to_string())
    }
}

/// Request body for `POST /api/location` and `PUT /api/location/{id}`.
///
/// The fields are forwarded verbatim; the server validates them.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LocationPayload {
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl LocationPayload {
    /// Parses a YAML mapping into a payload.
    pub fn from_yaml(source: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(source)
    }

    /// The `id` field, when present and a string.
    pub fn id(&self) -> Option<&str> {
        self.fields.get("id").and_then(Value::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_location_keeps_extra_fields() {
        let location: Location = serde_json::from_value(json!({
            "_id": "65f0c1",
            "id": "loc1",
            "created_at": 1700000000,
            "region": "us-east",
        }))
        .unwrap();

        assert_eq!(location.db_id, "65f0c1");
        assert_eq!(location.id, "loc1");
        assert_eq!(location.details.get("region"), Some(&json!("us-east")));

        let back = serde_json::to_value(&location).unwrap();
        assert_eq!(back["_id"], json!("65f0c1"));
        assert_eq!(back["region"], json!("us-east"));
    }

    #[test]
    fn test_created_at_local_format() {
        let location = Location {
            db_id: "x".to_string(),
            id: "loc1".to_string(),
            created_at: Number::from(1700000000),
            details: Map::new(),
        };
        let expected = Local
            .timestamp_opt(1700000000, 0)
            .unwrap()
            .format("%Y-%m-%d %H:%M:%S")
            .to_string();
        assert_eq!(location.created_at_local(), expected);
        assert_eq!(location.created_at_local().len(), 19);
    }

    #[test]
    fn test_created_at_fractional_seconds() {
        let location: Location = serde_json::from_value(json!({
            "_id": "a1",
            "id": "flt",
            "created_at": 1700000000.75,
        }))
        .unwrap();
        let expected = Local
            .timestamp_opt(1700000000, 0)
            .unwrap()
            .format(TIMESTAMP_FORMAT)
            .to_string();
        assert_eq!(location.created_at_local(), expected);
    }

    #[test]
    fn test_created_at_out_of_range_shows_raw_value() {
        let location: Location = serde_json::from_value(json!({
            "_id": "a1",
            "id": "far",
            "created_at": 1e300,
        }))
        .unwrap();
        assert_eq!(location.created_at_local(), location.created_at.to_string());
    }

    #[test]
    fn test_payload_from_yaml_mapping() {
        let payload = LocationPayload::from_yaml("id: loc1\nregion: us-east\n").unwrap();
        assert_eq!(payload.id(), Some("loc1"));
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({"id": "loc1", "region": "us-east"})
        );
    }

    #[test]
    fn test_payload_nested_values() {
        let payload = LocationPayload::from_yaml(
            "id: edge-7\ncapacity: 12\ncoordinates:\n  lat: 52.1\n  lon: 4.3\ntags: [a, b]\n",
        )
        .unwrap();
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({
                "id": "edge-7",
                "capacity": 12,
                "coordinates": {"lat": 52.1, "lon": 4.3},
                "tags": ["a", "b"],
            })
        );
    }

    #[test]
    fn test_payload_rejects_scalar_document() {
        assert!(LocationPayload::from_yaml("just a string").is_err());
    }
}
