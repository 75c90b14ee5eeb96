//! Model records
//!
//! A `Model` is a reusable schema: an ordered map of field keys to field
//! definitions plus the set of languages every localized map must cover.
//! Models are authored once and then only read by the console.

use crate::field::FieldDefinition;
use chrono::{DateTime, Utc};
use console_core::{
    ConsoleError, ConsoleResult, FieldKey, Identifiable, LanguageSet, ModelId, Validatable,
};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

// ============================================================================
// RecordRef
// ============================================================================

/// `{id, title}` pointer to another record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordRef {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub title: String,
}

// ============================================================================
// Model
// ============================================================================

/// A model definition as listed by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Model {
    /// Backend id
    #[serde(rename = "_id")]
    pub id: ModelId,

    /// Display title
    pub title: String,

    /// Active localization languages
    #[serde(rename = "value_localization")]
    pub languages: LanguageSet,

    /// Field definitions in schema order
    #[serde(rename = "data", default)]
    pub fields: IndexMap<FieldKey, FieldDefinition>,

    /// Schema generation, bumped by the backend for each new version
    #[serde(default = "default_generation")]
    pub generation: u32,

    #[serde(default = "default_true")]
    pub is_active: bool,

    /// Soft-delete flag
    #[serde(default)]
    pub removed: bool,

    #[serde(default)]
    pub parent_model: Option<RecordRef>,

    #[serde(default)]
    pub previous_model: Option<RecordRef>,

    #[serde(default)]
    pub publicised_date: Option<DateTime<Utc>>,

    #[serde(default)]
    pub comment: Option<String>,

    #[serde(rename = "createdAt", default)]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(rename = "updatedAt", default)]
    pub updated_at: Option<DateTime<Utc>>,
}

fn default_generation() -> u32 {
    1
}

fn default_true() -> bool {
    true
}

impl Model {
    /// Create an active, first-generation model with no fields
    pub fn new(id: impl Into<ModelId>, title: impl Into<String>, languages: LanguageSet) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            languages,
            fields: IndexMap::new(),
            generation: 1,
            is_active: true,
            removed: false,
            parent_model: None,
            previous_model: None,
            publicised_date: None,
            comment: None,
            created_at: None,
            updated_at: None,
        }
    }

    // ========================================================================
    // Builder methods
    // ========================================================================

    /// Append a field definition
    pub fn with_field(mut self, key: impl Into<FieldKey>, definition: FieldDefinition) -> Self {
        self.fields.insert(key.into(), definition);
        self
    }

    /// Mark the model as inactive
    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }

    /// Mark the model as soft-deleted
    pub fn removed(mut self) -> Self {
        self.removed = true;
        self
    }

    // ========================================================================
    // Utility methods
    // ========================================================================

    /// Whether the model may be picked as the parent of a new instance
    pub fn is_selectable(&self) -> bool {
        self.is_active && !self.removed
    }

    pub fn field(&self, key: &str) -> Option<&FieldDefinition> {
        self.fields.get(key)
    }

    pub fn has_field(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// `{id, title}` pointer to this model
    pub fn record_ref(&self) -> RecordRef {
        RecordRef {
            id: self.id.clone(),
            title: self.title.clone(),
        }
    }
}

impl Identifiable for Model {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Validatable for Model {
    fn validate(&self) -> ConsoleResult<()> {
        if self.id.trim().is_empty() {
            return Err(ConsoleError::validation("Model id cannot be empty"));
        }

        if self.languages.is_empty() {
            return Err(ConsoleError::EmptyLanguageSet);
        }

        for (key, definition) in &self.fields {
            definition.validate_for(key, &self.languages)?;
        }

        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::localized::LocalizedText;
    use console_core::{FieldType, Language};
    use pretty_assertions::assert_eq;

    fn colour_model() -> Model {
        Model::new("m-1", "Paint", LanguageSet::from(vec![Language::Ru, Language::En]))
            .with_field(
                "color",
                FieldDefinition::string(
                    LocalizedText::new()
                        .with(Language::Ru, "Цвет")
                        .with(Language::En, "Colour"),
                )
                .with_access("admin"),
            )
    }

    #[test]
    fn test_model_new_defaults() {
        let model = Model::new("m-1", "Paint", LanguageSet::from(vec![Language::Ru]));
        assert_eq!(model.generation, 1);
        assert!(model.is_active);
        assert!(!model.removed);
        assert!(model.is_selectable());
        assert_eq!(model.field_count(), 0);
    }

    #[test]
    fn test_selectable_flags() {
        assert!(!colour_model().inactive().is_selectable());
        assert!(!colour_model().removed().is_selectable());
    }

    #[test]
    fn test_model_validation() {
        assert!(colour_model().is_valid());

        let mut no_languages = colour_model();
        no_languages.languages = LanguageSet::new();
        assert!(matches!(
            no_languages.validate(),
            Err(ConsoleError::EmptyLanguageSet)
        ));

        let bad_field = colour_model().with_field(
            "weight",
            FieldDefinition::integer(LocalizedText::new().with(Language::Ru, "Вес"))
                .with_access("admin"),
        );
        assert!(!bad_field.is_valid());
    }

    #[test]
    fn test_deserialize_backend_listing_entry() {
        let json = r#"{
            "_id": "66a1",
            "title": "Paint",
            "value_localization": ["ru", "en"],
            "data": {
                "color": {
                    "name": {"ru": "Цвет", "en": "Colour"},
                    "value": {"ru": null, "en": null},
                    "type": "string",
                    "access": ["admin"]
                },
                "weight": {
                    "name": {"ru": "Вес", "en": "Weight"},
                    "value": {"ru": null, "en": null},
                    "type": "integer",
                    "access": ["admin"]
                }
            },
            "generation": 2,
            "is_active": true,
            "removed": false,
            "parent_model": {"id": "66a0", "title": "Paint"},
            "previous_model": null,
            "publicised_date": null,
            "comment": null,
            "createdAt": "2025-03-01T10:00:00Z",
            "updatedAt": "2025-03-02T10:00:00Z"
        }"#;

        let model: Model = serde_json::from_str(json).unwrap();
        assert_eq!(model.id, "66a1");
        assert_eq!(model.generation, 2);
        assert_eq!(
            model.fields.keys().cloned().collect::<Vec<_>>(),
            vec!["color".to_string(), "weight".to_string()]
        );
        assert_eq!(model.field("weight").unwrap().field_type, FieldType::Integer);
        assert_eq!(model.parent_model.unwrap().id, "66a0");
        assert!(model.created_at.is_some());
    }
}
