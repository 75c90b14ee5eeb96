//! Instance draft state
//!
//! `InstanceDraft` is the unsaved instance being composed in the creation
//! dialog. Every operation returns a new draft and leaves the receiver
//! untouched. Unchanged parts are shared through `Arc`, so a renderer can
//! detect changes by pointer identity (`shares_fields_with`, `shares_field`)
//! instead of deep comparison.

use console_core::{ConsoleError, ConsoleResult, FieldKey, FieldType, Language, LanguageSet, ModelId};
use console_ir::{FieldDefinition, FieldRecord, FieldValue, InstancePayload, ModelCatalog};
use indexmap::IndexMap;
use std::sync::Arc;
use tracing::{debug, warn};

// ============================================================================
// FieldInput
// ============================================================================

/// A value typed into one field's input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldInput {
    /// Text for one language of a `string` field
    Text(String),
    /// Replacement for an `integer` field; `None` clears it
    Integer(Option<i64>),
}

impl FieldInput {
    /// Interpret raw integer input the way the number box does
    ///
    /// An empty box clears the value, a non-negative integer sets it, anything
    /// else is ignored (`None`).
    pub fn parse_integer(raw: &str) -> Option<FieldInput> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Some(FieldInput::Integer(None));
        }
        match raw.parse::<i64>() {
            Ok(n) if n >= 0 => Some(FieldInput::Integer(Some(n))),
            _ => None,
        }
    }
}

// ============================================================================
// DraftField
// ============================================================================

/// One field of a draft: a snapshot of its definition and the current value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftField {
    definition: Arc<FieldDefinition>,
    value: FieldValue,
}

impl DraftField {
    fn new(definition: Arc<FieldDefinition>, value: FieldValue) -> Self {
        Self { definition, value }
    }

    pub fn definition(&self) -> &FieldDefinition {
        &self.definition
    }

    pub fn field_type(&self) -> &FieldType {
        &self.definition.field_type
    }

    pub fn value(&self) -> &FieldValue {
        &self.value
    }

    fn with_value(&self, value: FieldValue) -> Self {
        Self {
            definition: Arc::clone(&self.definition),
            value,
        }
    }

    fn to_record(&self) -> FieldRecord {
        FieldRecord::new(&self.definition, self.value.clone())
    }
}

// ============================================================================
// InstanceDraft
// ============================================================================

/// Unsaved instance being composed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstanceDraft {
    title: String,
    parent_model: Option<ModelId>,
    languages: LanguageSet,
    fields: Arc<IndexMap<FieldKey, Arc<DraftField>>>,
}

impl InstanceDraft {
    /// The empty draft: no title, no parent model, no fields
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn parent_model(&self) -> Option<&str> {
        self.parent_model.as_deref()
    }

    /// Active languages of the selected model (empty when none is selected)
    pub fn languages(&self) -> &LanguageSet {
        &self.languages
    }

    pub fn field(&self, key: &str) -> Option<&DraftField> {
        self.fields.get(key).map(Arc::as_ref)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &DraftField)> {
        self.fields.iter().map(|(k, f)| (k.as_str(), f.as_ref()))
    }

    pub fn field_keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// True for the initial/reset state
    pub fn is_empty(&self) -> bool {
        self.title.is_empty() && self.parent_model.is_none() && self.fields.is_empty()
    }

    // ========================================================================
    // Change detection
    // ========================================================================

    /// Whether both drafts hold the very same field map
    pub fn shares_fields_with(&self, other: &InstanceDraft) -> bool {
        Arc::ptr_eq(&self.fields, &other.fields)
    }

    /// Whether one field is the very same snapshot in both drafts
    pub fn shares_field(&self, other: &InstanceDraft, key: &str) -> bool {
        match (self.fields.get(key), other.fields.get(key)) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }

    // ========================================================================
    // Operations
    // ========================================================================

    /// Choose the parent model, rebuilding the field set from its schema
    ///
    /// Only models the catalog offers for selection resolve. An unresolved
    /// id clears the parent and every field; the title is kept.
    pub fn select_parent_model(&self, catalog: &ModelCatalog, model_id: &str) -> InstanceDraft {
        let Some(model) = catalog.get_selectable(model_id) else {
            warn!(model = %model_id, "parent model not selectable; clearing draft fields");
            return InstanceDraft {
                title: self.title.clone(),
                ..InstanceDraft::default()
            };
        };

        let fields = model
            .fields
            .iter()
            .map(|(key, definition)| {
                let value = definition.empty_value(&model.languages);
                let field = DraftField::new(Arc::new(definition.clone()), value);
                (key.clone(), Arc::new(field))
            })
            .collect();

        debug!(model = %model.id, fields = model.field_count(), "parent model selected");

        InstanceDraft {
            title: self.title.clone(),
            parent_model: Some(model.id.clone()),
            languages: model.languages.clone(),
            fields: Arc::new(fields),
        }
    }

    /// Replace the title
    pub fn set_title(&self, title: impl Into<String>) -> InstanceDraft {
        InstanceDraft {
            title: title.into(),
            ..self.clone()
        }
    }

    /// Write one field value
    ///
    /// For `string` fields `language` is required and only that language's
    /// entry changes. For `integer` fields `language` is ignored. Unknown
    /// keys, missing or inactive languages, input of the wrong kind and
    /// fields of an unsupported type leave the draft unchanged.
    pub fn set_field_value(
        &self,
        key: &str,
        language: Option<Language>,
        input: FieldInput,
    ) -> InstanceDraft {
        let Some(field) = self.fields.get(key) else {
            warn!(field = %key, "edit for a field not in the draft ignored");
            return self.clone();
        };

        let value = match (&field.value, language, input) {
            (FieldValue::Text(text), Some(language), FieldInput::Text(entry)) => {
                if !text.contains(language) {
                    warn!(field = %key, language = %language, "edit for an inactive language ignored");
                    return self.clone();
                }
                let mut text = text.clone();
                text.insert(language, entry);
                FieldValue::Text(text)
            }
            (FieldValue::Integer(_), _, FieldInput::Integer(n)) => FieldValue::Integer(n),
            (_, language, input) => {
                warn!(
                    field = %key,
                    field_type = %field.field_type(),
                    ?language,
                    ?input,
                    "edit does not fit the field type; ignored"
                );
                return self.clone();
            }
        };

        let mut fields = (*self.fields).clone();
        fields.insert(key.to_string(), Arc::new(field.with_value(value)));

        InstanceDraft {
            fields: Arc::new(fields),
            ..self.clone()
        }
    }

    /// Set one language of a `string` field
    pub fn set_text(&self, key: &str, language: Language, text: impl Into<String>) -> InstanceDraft {
        self.set_field_value(key, Some(language), FieldInput::Text(text.into()))
    }

    /// Set (or clear) an `integer` field
    pub fn set_integer(&self, key: &str, value: Option<i64>) -> InstanceDraft {
        self.set_field_value(key, None, FieldInput::Integer(value))
    }

    /// Back to the empty draft
    pub fn reset(&self) -> InstanceDraft {
        InstanceDraft::empty()
    }

    /// Build the submission payload
    ///
    /// Requires a selected parent model; completeness is not checked here.
    pub fn to_payload(&self) -> ConsoleResult<InstancePayload> {
        let parent_model = self
            .parent_model
            .clone()
            .ok_or_else(|| ConsoleError::validation("No parent model selected"))?;

        let data = self
            .fields
            .iter()
            .map(|(key, field)| (key.clone(), field.to_record()))
            .collect();

        Ok(InstancePayload {
            title: self.title.trim().to_string(),
            parent_model,
            data,
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
