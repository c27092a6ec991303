// ── Element directory ──
//
// An in-memory index of every element visible to the tenant, built once
// per run. Users name elements; the controller addresses them by id and
// scopes every interface/route call by the owning site.

use std::collections::HashMap;

use copylan_api::Element;
use tracing::{debug, warn};

use crate::api::ElementApi;
use crate::classify::{InterfaceTaxonomy, classify};
use crate::error::CoreError;

/// Lookup tables for elements by name and by id.
#[derive(Debug, Clone, Default)]
pub struct Directory {
    name_to_id: HashMap<String, String>,
    id_to_name: HashMap<String, String>,
    id_to_site: HashMap<String, String>,
    id_to_model: HashMap<String, String>,
}

/// A fully resolved element: everything needed to address its resources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementRef {
    pub id: String,
    pub name: String,
    pub site_id: String,
    pub model: String,
}

impl ElementRef {
    pub fn taxonomy(&self) -> InterfaceTaxonomy {
        classify(&self.model)
    }
}

impl Directory {
    /// List all elements from the controller and index them.
    pub async fn fetch(api: &impl ElementApi) -> Result<Self, CoreError> {
        let elements = api.list_elements().await?;
        debug!(count = elements.len(), "indexed elements");
        Ok(Self::from_elements(elements))
    }

    /// Index an already-fetched element list.
    ///
    /// Unnamed elements are reachable by id only. When two elements share
    /// a name, the later one wins the name lookup.
    pub fn from_elements(elements: impl IntoIterator<Item = Element>) -> Self {
        let mut dir = Self::default();
        for element in elements {
            if let Some(name) = element.name.filter(|n| !n.is_empty()) {
                if let Some(previous) = dir.name_to_id.insert(name.clone(), element.id.clone()) {
                    warn!(
                        name = %name,
                        previous = %previous,
                        current = %element.id,
                        "duplicate element name; using the later element"
                    );
                }
                dir.id_to_name.insert(element.id.clone(), name);
            }
            if let Some(site) = element.site_id.filter(|s| !s.is_empty()) {
                dir.id_to_site.insert(element.id.clone(), site);
            }
            dir.id_to_model
                .insert(element.id, element.model_name.unwrap_or_default());
        }
        dir
    }

    pub fn id_for_name(&self, name: &str) -> Option<&str> {
        self.name_to_id.get(name).map(String::as_str)
    }

    pub fn name_for_id(&self, id: &str) -> Option<&str> {
        self.id_to_name.get(id).map(String::as_str)
    }

    pub fn site_for_id(&self, id: &str) -> Option<&str> {
        self.id_to_site.get(id).map(String::as_str)
    }

    pub fn model_for_id(&self, id: &str) -> Option<&str> {
        self.id_to_model.get(id).map(String::as_str)
    }

    /// Number of indexed elements.
    pub fn len(&self) -> usize {
        self.id_to_model.len()
    }

    pub fn is_empty(&self) -> bool {
        self.id_to_model.is_empty()
    }

    /// Resolve a user-supplied element name.
    pub fn resolve(&self, name: &str) -> Result<ElementRef, CoreError> {
        let id = self
            .id_for_name(name)
            .ok_or_else(|| CoreError::ElementNotFound { name: name.into() })?;
        let site_id = self
            .site_for_id(id)
            .ok_or_else(|| CoreError::ElementUnassigned { name: name.into() })?;

        Ok(ElementRef {
            id: id.to_owned(),
            name: name.to_owned(),
            site_id: site_id.to_owned(),
            model: self.model_for_id(id).unwrap_or_default().to_owned(),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    fn element(value: serde_json::Value) -> Element {
        serde_json::from_value(value).unwrap()
    }

    fn sample() -> Directory {
        Directory::from_elements([
            element(json!({ "id": "e1", "name": "branch-a", "site_id": "s1", "model_name": "ion 3000" })),
            element(json!({ "id": "e2", "name": "branch-b", "site_id": "s2", "model_name": "ion 3200" })),
            element(json!({ "id": "e3", "site_id": "s3", "model_name": "ion 1000" })),
            element(json!({ "id": "e4", "name": "spare", "model_name": "ion 2000" })),
        ])
    }

    #[test]
    fn resolves_named_element() {
        let dir = sample();
        let e = dir.resolve("branch-a").unwrap();
        assert_eq!(e.id, "e1");
        assert_eq!(e.site_id, "s1");
        assert_eq!(e.taxonomy(), InterfaceTaxonomy::SubInterface);
        assert_eq!(dir.resolve("branch-b").unwrap().taxonomy(), InterfaceTaxonomy::Svi);
    }

    #[test]
    fn unnamed_element_indexed_by_id_only() {
        let dir = sample();
        assert_eq!(dir.len(), 4);
        assert_eq!(dir.name_for_id("e3"), None);
        assert_eq!(dir.site_for_id("e3"), Some("s3"));
        assert_eq!(dir.model_for_id("e3"), Some("ion 1000"));
    }

    #[test]
    fn unknown_name_is_not_found() {
        let err = sample().resolve("nowhere").unwrap_err();
        assert!(matches!(err, CoreError::ElementNotFound { ref name } if name == "nowhere"));
    }

    #[test]
    fn element_without_site_is_unassigned() {
        let err = sample().resolve("spare").unwrap_err();
        assert!(matches!(err, CoreError::ElementUnassigned { .. }));
    }

    #[test]
    fn duplicate_name_keeps_later_element() {
        let dir = Directory::from_elements([
            element(json!({ "id": "e1", "name": "dup", "site_id": "s1" })),
            element(json!({ "id": "e2", "name": "dup", "site_id": "s2" })),
        ]);
        assert_eq!(dir.id_for_name("dup"), Some("e2"));
        assert_eq!(dir.resolve("dup").unwrap().model, "");
    }
}
