//! Instance records and instance payloads
//!
//! `InstancePayload` is what the form engine hands to the remote store when
//! an instance is created. `Instance` is the stored record as it comes back
//! in the instances listing.

use crate::field::FieldRecord;
use chrono::{DateTime, Utc};
use console_core::{FieldKey, Identifiable, InstanceId, LanguageSet, ModelId};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

// ============================================================================
// InstancePayload
// ============================================================================

/// Body of an instance creation request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstancePayload {
    pub title: String,

    /// Id of the model the instance conforms to
    pub parent_model: ModelId,

    /// One record per model field, in schema order
    pub data: IndexMap<FieldKey, FieldRecord>,
}

impl InstancePayload {
    /// Union of the language keys used by every field's name and value maps
    ///
    /// The backend stores this as the instance's `value_localization`.
    pub fn observed_languages(&self) -> LanguageSet {
        let mut languages = LanguageSet::new();
        for record in self.data.values() {
            for language in record.name.languages().iter() {
                languages.insert(language);
            }
            if let Some(text) = record.value.as_text() {
                for language in text.languages().iter() {
                    languages.insert(language);
                }
            }
        }
        languages
    }
}

// ============================================================================
// Instance
// ============================================================================

/// Parent model summary embedded in an instance listing entry
///
/// The backend embeds the whole model document; only its id and title are
/// read here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelSummary {
    #[serde(rename = "_id", alias = "id")]
    pub id: ModelId,
    #[serde(default)]
    pub title: String,
}

/// A stored instance as listed by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instance {
    #[serde(rename = "_id")]
    pub id: InstanceId,

    #[serde(default)]
    pub title: String,

    #[serde(default = "default_version")]
    pub version: u32,

    #[serde(default)]
    pub value_localization: LanguageSet,

    #[serde(default)]
    pub removed: bool,

    #[serde(default = "default_true")]
    pub is_active: bool,

    #[serde(default = "default_true")]
    pub is_last: bool,

    #[serde(default)]
    pub parent_model: Option<ModelSummary>,

    #[serde(default)]
    pub comment: Option<String>,

    #[serde(default)]
    pub data: IndexMap<FieldKey, FieldRecord>,

    #[serde(rename = "createdAt", default)]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(rename = "updatedAt", default)]
    pub updated_at: Option<DateTime<Utc>>,
}

fn default_version() -> u32 {
    1
}

fn default_true() -> bool {
    true
}

impl Instance {
    /// Title of the parent model, if the listing embedded one
    pub fn parent_title(&self) -> Option<&str> {
        self.parent_model.as_ref().map(|m| m.title.as_str())
    }
}

impl Identifiable for Instance {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Instances as fetched from the backend
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InstanceListing {
    instances: Vec<Instance>,
}

impl InstanceListing {
    pub fn new(instances: Vec<Instance>) -> Self {
        Self { instances }
    }

    /// Instances shown in the instances table (soft-deleted ones hidden)
    pub fn visible(&self) -> impl Iterator<Item = &Instance> {
        self.instances.iter().filter(|i| !i.removed)
    }

    /// Instances derived from the given model
    pub fn for_model<'a>(&'a self, model_id: &'a str) -> impl Iterator<Item = &'a Instance> {
        self.visible().filter(move |i| {
            i.parent_model
                .as_ref()
                .is_some_and(|m| m.id == model_id)
        })
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{FieldDefinition, FieldValue};
    use crate::localized::LocalizedText;
    use console_core::Language;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_observed_languages_is_union() {
        let mut data = IndexMap::new();
        data.insert(
            "color".to_string(),
            FieldRecord::new(
                &FieldDefinition::string(LocalizedText::new().with(Language::Ru, "Цвет"))
                    .with_access("a"),
                FieldValue::Text(
                    LocalizedText::new()
                        .with(Language::Ru, "Красный")
                        .with(Language::En, "Red"),
                ),
            ),
        );
        data.insert(
            "weight".to_string(),
            FieldRecord::new(
                &FieldDefinition::integer(LocalizedText::new().with(Language::Uz, "Og'irlik"))
                    .with_access("a"),
                FieldValue::Integer(Some(4)),
            ),
        );
        let payload = InstancePayload {
            title: "Red paint".into(),
            parent_model: "m-1".into(),
            data,
        };

        assert_eq!(
            payload.observed_languages(),
            LanguageSet::from(vec![Language::Ru, Language::En, Language::Uz])
        );
    }

    #[test]
    fn test_payload_wire_shape() {
        let mut data = IndexMap::new();
        data.insert(
            "weight".to_string(),
            FieldRecord::new(
                &FieldDefinition::integer(LocalizedText::new().with(Language::Ru, "Вес"))
                    .with_access("r1"),
                FieldValue::Integer(Some(0)),
            ),
        );
        let payload = InstancePayload {
            title: "Box".into(),
            parent_model: "m-2".into(),
            data,
        };

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "title": "Box",
                "parent_model": "m-2",
                "data": {
                    "weight": {
                        "name": {"ru": "Вес"},
                        "type": "integer",
                        "access": ["r1"],
                        "value": 0
                    }
                }
            })
        );
    }

    #[test]
    fn test_listing_filters() {
        let json = r#"[
            {"_id": "i1", "title": "One", "parent_model": {"_id": "m1", "title": "Paint", "data": {}}, "data": {}},
            {"_id": "i2", "title": "Two", "removed": true, "parent_model": {"_id": "m1", "title": "Paint"}},
            {"_id": "i3", "title": "Three", "parent_model": null}
        ]"#;
        let instances: Vec<Instance> = serde_json::from_str(json).unwrap();
        let listing = InstanceListing::new(instances);

        assert_eq!(listing.len(), 3);
        assert_eq!(listing.visible().count(), 2);
        let ids: Vec<_> = listing.for_model("m1").map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["i1"]);
        assert_eq!(listing.visible().next().unwrap().parent_title(), Some("Paint"));
    }
}
