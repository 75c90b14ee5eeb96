//! Field definitions and field values
//!
//! This module contains `FieldDefinition` (the schema of one model field),
//! `FieldValue` (the value a draft or record holds for it) and
//! `FieldRecord` (definition and value together, as stored on an instance).

use crate::localized::LocalizedText;
use console_core::{ConsoleError, ConsoleResult, FieldType, LanguageSet, RoleId};
use serde::{Deserialize, Serialize};

// ============================================================================
// FieldDefinition
// ============================================================================

/// Schema of a single model field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDefinition {
    /// Display name per active language
    pub name: LocalizedText,

    /// Type tag deciding the value shape
    #[serde(rename = "type")]
    pub field_type: FieldType,

    /// Access roles allowed to see and edit the field
    #[serde(default)]
    pub access: Vec<RoleId>,
}

impl FieldDefinition {
    /// Create a field definition
    pub fn new(name: LocalizedText, field_type: FieldType) -> Self {
        Self {
            name,
            field_type,
            access: Vec::new(),
        }
    }

    /// Create a `string` field definition
    pub fn string(name: LocalizedText) -> Self {
        Self::new(name, FieldType::String)
    }

    /// Create an `integer` field definition
    pub fn integer(name: LocalizedText) -> Self {
        Self::new(name, FieldType::Integer)
    }

    /// Grant access to a role (ignored if already granted)
    pub fn with_access(mut self, role: impl Into<RoleId>) -> Self {
        let role = role.into();
        if !self.access.contains(&role) {
            self.access.push(role);
        }
        self
    }

    /// Type-appropriate empty value for this field under `languages`
    pub fn empty_value(&self, languages: &LanguageSet) -> FieldValue {
        match self.field_type {
            FieldType::String => FieldValue::Text(LocalizedText::blank(languages)),
            FieldType::Integer => FieldValue::Integer(None),
            FieldType::Unknown(_) => FieldValue::Unsupported(serde_json::Value::Null),
        }
    }

    /// Check this definition against the owning model's languages
    pub fn validate_for(&self, key: &str, languages: &LanguageSet) -> ConsoleResult<()> {
        if key.trim().is_empty() {
            return Err(ConsoleError::validation("Field key cannot be empty"));
        }

        if !self.field_type.is_supported() {
            return Err(ConsoleError::field_validation(
                key,
                format!("Unsupported field type '{}'", self.field_type),
            ));
        }

        let missing = self.name.missing_for(languages);
        if !missing.is_empty() {
            let codes = missing.iter().map(|l| l.code()).collect::<Vec<_>>();
            return Err(ConsoleError::field_validation(
                key,
                format!("Name is missing for: {}", codes.join(", ")),
            ));
        }

        if self.access.is_empty() {
            return Err(ConsoleError::field_validation(
                key,
                "At least one access role is required",
            ));
        }

        Ok(())
    }
}

// ============================================================================
// FieldValue
// ============================================================================

/// Value held for a field, shaped by the field's type tag
///
/// Serialized untagged: a language map for text, a number or `null` for
/// integers. Anything else is kept as raw JSON under `Unsupported`, so a
/// stored record of an unrecognized type still lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// One string per active language
    Text(LocalizedText),
    /// Integer, `None` until entered
    Integer(Option<i64>),
    /// Raw value of an unrecognized field type
    Unsupported(serde_json::Value),
}

impl FieldValue {
    /// Whether this value has the shape `field_type` expects
    pub fn matches_type(&self, field_type: &FieldType) -> bool {
        matches!(
            (self, field_type),
            (FieldValue::Text(_), FieldType::String) | (FieldValue::Integer(_), FieldType::Integer)
        )
    }

    pub fn as_text(&self) -> Option<&LocalizedText> {
        match self {
            FieldValue::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            FieldValue::Integer(value) => *value,
            _ => None,
        }
    }

    /// Short rendering for tables and CLI output
    pub fn summary(&self) -> String {
        match self {
            FieldValue::Text(text) => text
                .iter()
                .map(|(l, t)| format!("{}={}", l.code(), t))
                .collect::<Vec<_>>()
                .join(", "),
            FieldValue::Integer(Some(v)) => v.to_string(),
            FieldValue::Integer(None) => "-".to_string(),
            FieldValue::Unsupported(raw) => format!("(unsupported) {}", raw),
        }
    }
}

// ============================================================================
// FieldRecord
// ============================================================================

/// Field definition together with its value, as submitted and stored
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldRecord {
    pub name: LocalizedText,

    #[serde(rename = "type")]
    pub field_type: FieldType,

    #[serde(default)]
    pub access: Vec<RoleId>,

    pub value: FieldValue,
}

impl FieldRecord {
    /// Pair a definition snapshot with a value
    pub fn new(definition: &FieldDefinition, value: FieldValue) -> Self {
        Self {
            name: definition.name.clone(),
            field_type: definition.field_type.clone(),
            access: definition.access.clone(),
            value,
        }
    }

    /// The definition part of this record
    pub fn definition(&self) -> FieldDefinition {
        FieldDefinition {
            name: self.name.clone(),
            field_type: self.field_type.clone(),
            access: self.access.clone(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
