// ── Write payloads ──
//
// A payload is the JSON object sent on create/update. It is always built
// from a record's fields with the controller-assigned attributes removed.

use serde::Serialize;
use serde_json::{Map, Value};

use copylan_api::{Interface, StaticRoute};

/// Attributes the controller assigns and rejects on writes.
pub const READ_ONLY_FIELDS: &[&str] = &[
    "id",
    "_etag",
    "_schema",
    "_created_on_utc",
    "_updated_on_utc",
    "_content_length",
    "_status_code",
    "_request_id",
];

/// A record that can be matched across elements by a natural key.
pub trait Record {
    /// Controller-assigned id (differs between elements).
    fn id(&self) -> &str;
    /// User-meaningful identity used to pair source and destination.
    fn natural_key(&self) -> &str;
    /// The record's full field set as a JSON object.
    fn fields(&self) -> Map<String, Value>;
}

impl Record for Interface {
    fn id(&self) -> &str {
        Interface::id(self)
    }

    fn natural_key(&self) -> &str {
        self.name()
    }

    fn fields(&self) -> Map<String, Value> {
        self.as_map().clone()
    }
}

impl Record for StaticRoute {
    fn id(&self) -> &str {
        StaticRoute::id(self)
    }

    fn natural_key(&self) -> &str {
        self.destination_prefix()
    }

    fn fields(&self) -> Map<String, Value> {
        self.as_map().clone()
    }
}

/// A sanitized JSON object ready to send to the controller.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Payload(Map<String, Value>);

impl Payload {
    /// Build a payload from raw fields, stripping read-only attributes.
    pub fn from_fields(fields: Map<String, Value>) -> Self {
        Self(fields).sanitized()
    }

    /// Build a payload from a record.
    pub fn from_record(record: &impl Record) -> Self {
        Self::from_fields(record.fields())
    }

    /// Remove every read-only attribute. Idempotent.
    pub fn sanitized(mut self) -> Self {
        for key in READ_ONLY_FIELDS {
            self.0.remove(*key);
        }
        self
    }

    /// Overlay `top` onto `self`: keys in `top` win, keys only in `self` stay.
    pub fn overlay(mut self, top: Payload) -> Self {
        for (k, v) in top.0 {
            self.0.insert(k, v);
        }
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.0.get_mut(key)
    }

    pub fn set(&mut self, key: impl Into<String>, value: Value) {
        self.0.insert(key.into(), value);
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}
