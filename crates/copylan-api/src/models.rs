// Controller response types
//
// List endpoints wrap their payload in `{ "count": n, "items": [...] }`.
// Elements model the handful of fields this tool inspects. Interfaces
// and static routes keep the raw object so every field, null or unknown,
// survives a copy.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ── Envelopes ────────────────────────────────────────────────────────

/// Standard list envelope.
///
/// ```json
/// { "_etag": 1, "count": 2, "items": [...] }
/// ```
#[derive(Debug, Deserialize)]
pub struct ItemList<T> {
    #[serde(default)]
    pub count: Option<u64>,
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
}

/// Error body returned with non-2xx statuses.
///
/// ```json
/// { "_error": [{ "code": "...", "message": "..." }] }
/// ```
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    #[serde(rename = "_error", default)]
    pub errors: Vec<ErrorDetail>,
}

#[derive(Debug, Deserialize)]
pub struct ErrorDetail {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

// ── Auth ─────────────────────────────────────────────────────────────

/// OAuth2 client-credentials response.
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub expires_in: Option<u64>,
}

/// Session profile returned by `GET /sdwan/v2.1/api/profile`.
#[derive(Debug, Clone, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub tenant_id: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// ── Element ──────────────────────────────────────────────────────────

/// One managed appliance (ION).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Element {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub site_id: Option<String>,
    #[serde(default)]
    pub model_name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// ── Interface ────────────────────────────────────────────────────────

/// Read a string attribute from a raw controller object.
fn str_field<'a>(fields: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    fields.get(key).and_then(Value::as_str)
}

/// One logical interface on an element.
///
/// The controller object is kept whole, explicit nulls included, so a
/// record written back carries exactly what was read. Accessors cover
/// the attributes this tool inspects.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Interface {
    fields: Map<String, Value>,
}

impl Interface {
    /// Controller-assigned id, empty when absent.
    pub fn id(&self) -> &str {
        str_field(&self.fields, "id").unwrap_or_default()
    }

    /// Interface name, empty when absent or null.
    pub fn name(&self) -> &str {
        str_field(&self.fields, "name").unwrap_or_default()
    }

    /// `port`, `vlan`, `subinterface`, `bypasspair`, ...
    pub fn interface_type(&self) -> Option<&str> {
        str_field(&self.fields, "type")
    }

    /// Role: `lan`, `public`, `private`, ...
    pub fn used_for(&self) -> Option<&str> {
        str_field(&self.fields, "used_for")
    }

    /// Parent interface id (sub-interfaces only).
    pub fn parent(&self) -> Option<&str> {
        str_field(&self.fields, "parent")
    }

    /// The full controller object.
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.fields
    }
}

impl From<Map<String, Value>> for Interface {
    fn from(fields: Map<String, Value>) -> Self {
        Self { fields }
    }
}

// ── Static route ─────────────────────────────────────────────────────

/// One static routing entry on an element.
///
/// Next hops stay in the raw object (`nexthops: [{ nexthop_ip,
/// nexthop_interface_id, ... }]`) since their shape varies between
/// controller releases.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StaticRoute {
    fields: Map<String, Value>,
}

impl StaticRoute {
    pub fn id(&self) -> &str {
        str_field(&self.fields, "id").unwrap_or_default()
    }

    pub fn destination_prefix(&self) -> &str {
        str_field(&self.fields, "destination_prefix").unwrap_or_default()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.fields
    }
}

impl From<Map<String, Value>> for StaticRoute {
    fn from(fields: Map<String, Value>) -> Self {
        Self { fields }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn interface_keeps_unknown_fields() {
        let iface: Interface = serde_json::from_value(json!({
            "id": "1",
            "name": "vlan10",
            "type": "vlan",
            "used_for": "lan",
            "_etag": 3,
            "vlan_config": { "vlan_id": 10 },
        }))
        .unwrap();

        assert_eq!(iface.interface_type(), Some("vlan"));
        assert_eq!(iface.parent(), None);
        assert_eq!(iface.as_map()["vlan_config"]["vlan_id"], 10);
        assert_eq!(iface.as_map()["_etag"], 3);
        assert!(!iface.as_map().contains_key("parent"));
    }

    #[test]
    fn interface_keeps_explicit_nulls() {
        let iface: Interface = serde_json::from_value(json!({
            "id": "1",
            "name": null,
            "type": "vlan",
            "parent": null,
        }))
        .unwrap();

        assert_eq!(iface.name(), "");
        assert_eq!(iface.parent(), None);
        assert_eq!(iface.as_map()["parent"], Value::Null);
        assert_eq!(iface.as_map()["name"], Value::Null);
    }

    #[test]
    fn route_without_id_reads_empty() {
        let route: StaticRoute =
            serde_json::from_value(json!({ "destination_prefix": "10.0.0.0/8" })).unwrap();
        assert_eq!(route.id(), "");
        assert_eq!(route.destination_prefix(), "10.0.0.0/8");
    }

    #[test]
    fn item_list_tolerates_missing_items() {
        let list: ItemList<Element> = serde_json::from_value(json!({ "count": 0 })).unwrap();
        assert!(list.items.is_empty());
    }
}
