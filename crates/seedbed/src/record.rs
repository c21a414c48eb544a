//! Flat field-map records and natural keys
//!
//! A [`Record`] is the unit everything else operates on: an id, the
//! [`EntityKind`] it belongs to, and a flat field-name → JSON value map.
//! The schema itself lives elsewhere; this layer only carries values.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::entity::{EntityKind, EntityRef};

/// A human-meaningful unique field used for idempotency checks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NaturalKey {
    pub field: String,
    pub value: Value,
}

impl NaturalKey {
    pub fn new(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Display form used in log messages and errors
    pub fn describe(&self) -> String {
        match &self.value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

/// One seeded row: id, kind, and a flat attribute map
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Record {
    pub id: Uuid,
    pub kind: EntityKind,
    pub fields: Map<String, Value>,
}

impl Record {
    pub fn new(kind: EntityKind, id: Uuid) -> Self {
        Self {
            id,
            kind,
            fields: Map::new(),
        }
    }

    /// Set a field, consuming and returning self for chaining
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Set a typed reference field (stored as a tagged JSON object)
    pub fn with_ref(mut self, key: impl Into<String>, reference: EntityRef) -> Self {
        let value = serde_json::to_value(reference).unwrap_or(Value::Null);
        self.fields.insert(key.into(), value);
        self
    }

    /// Set a timestamp field in RFC 3339 form
    pub fn with_timestamp(self, key: impl Into<String>, at: DateTime<Utc>) -> Self {
        self.with(key, at.to_rfc3339())
    }

    /// Merge a prebuilt attribute map (fixture catalog entries)
    pub fn with_fields(mut self, fields: Map<String, Value>) -> Self {
        self.fields.extend(fields);
        self
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn str_field(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(Value::as_str)
    }

    pub fn i64_field(&self, key: &str) -> Option<i64> {
        self.fields.get(key).and_then(Value::as_i64)
    }

    pub fn f64_field(&self, key: &str) -> Option<f64> {
        self.fields.get(key).and_then(Value::as_f64)
    }

    pub fn bool_field(&self, key: &str) -> Option<bool> {
        self.fields.get(key).and_then(Value::as_bool)
    }

    pub fn datetime_field(&self, key: &str) -> Option<DateTime<Utc>> {
        self.str_field(key)
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|dt| dt.with_timezone(&Utc))
    }

    /// Decode a typed reference previously stored with [`Record::with_ref`]
    pub fn ref_field(&self, key: &str) -> Option<EntityRef> {
        self.fields
            .get(key)
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }

    /// Whether this record matches the given natural key
    pub fn matches_key(&self, key: &NaturalKey) -> bool {
        self.fields.get(&key.field) == Some(&key.value)
    }
}
