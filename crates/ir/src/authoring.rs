//! Model authoring
//!
//! `ModelDraft` is the in-progress state of the model creation flow: a
//! title, the selected localization languages and the fields added so far.
//! Changing the language selection reshapes every field name through
//! [`reconcile_languages`], which works by language key so typed names are
//! never shifted onto another language.

use crate::access::AccessDirectory;
use crate::field::FieldDefinition;
use crate::localized::LocalizedText;
use crate::validation::{
    ValidationError, ValidationErrorCode, ValidationResult, ValidationRule, ValidationWarning,
    ValidationWarningCode, Validator,
};
use console_core::{
    ConsoleError, ConsoleResult, FieldKey, FieldType, Language, LanguageSet, RoleId,
};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

// ============================================================================
// Language reconciliation
// ============================================================================

/// Rebuild every field's name map so its keys are exactly `languages`
///
/// Field order, types and access lists are preserved. Names for languages
/// kept in the selection survive, new languages start empty, dropped ones
/// are discarded.
pub fn reconcile_languages(
    fields: &IndexMap<FieldKey, FieldDefinition>,
    languages: &LanguageSet,
) -> IndexMap<FieldKey, FieldDefinition> {
    fields
        .iter()
        .map(|(key, definition)| {
            let reconciled = FieldDefinition {
                name: definition.name.reconciled(languages),
                ..definition.clone()
            };
            (key.clone(), reconciled)
        })
        .collect()
}

// ============================================================================
// FieldSpec
// ============================================================================

/// A field as entered in the "add value" dialog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub key: FieldKey,

    pub name: LocalizedText,

    #[serde(rename = "type")]
    pub field_type: FieldType,

    #[serde(default)]
    pub access: Vec<RoleId>,
}

impl FieldSpec {
    pub fn new(key: impl Into<FieldKey>, field_type: FieldType) -> Self {
        Self {
            key: key.into(),
            name: LocalizedText::new(),
            field_type,
            access: Vec::new(),
        }
    }

    /// Set the display name for one language
    pub fn named(mut self, language: Language, name: impl Into<String>) -> Self {
        self.name.insert(language, name);
        self
    }

    /// Grant access to a role
    pub fn with_access(mut self, role: impl Into<RoleId>) -> Self {
        let role = role.into();
        if !self.access.contains(&role) {
            self.access.push(role);
        }
        self
    }

    /// Check the entered field against the languages currently selected for the model
    pub fn validate(&self, languages: &LanguageSet) -> ConsoleResult<()> {
        FieldDefinition {
            name: self.name.clone(),
            field_type: self.field_type.clone(),
            access: self.access.clone(),
        }
        .validate_for(&self.key, languages)
    }

    /// Definition with the name trimmed to exactly `languages`
    fn into_definition(self, languages: &LanguageSet) -> (FieldKey, FieldDefinition) {
        let key = self.key.trim().to_string();
        let definition = FieldDefinition {
            name: self.name.reconciled(languages),
            field_type: self.field_type,
            access: self.access,
        };
        (key, definition)
    }
}

// ============================================================================
// ModelDraft
// ============================================================================

/// In-progress model in the creation flow
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelDraft {
    title: String,
    languages: LanguageSet,
    fields: IndexMap<FieldKey, FieldDefinition>,
}

impl ModelDraft {
    /// Create an empty draft with the given initial language selection
    pub fn new(languages: LanguageSet) -> Self {
        Self {
            title: String::new(),
            languages,
            fields: IndexMap::new(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn languages(&self) -> &LanguageSet {
        &self.languages
    }

    pub fn fields(&self) -> &IndexMap<FieldKey, FieldDefinition> {
        &self.fields
    }

    pub fn field(&self, key: &str) -> Option<&FieldDefinition> {
        self.fields.get(key)
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// Replace the language selection and reshape every field name to match
    pub fn set_languages(&mut self, languages: LanguageSet) {
        if languages == self.languages {
            return;
        }
        debug!(
            from = %self.languages,
            to = %languages,
            fields = self.fields.len(),
            "reconciling field names to new language selection"
        );
        self.fields = reconcile_languages(&self.fields, &languages);
        self.languages = languages;
    }

    /// Check or uncheck one language
    pub fn toggle_language(&mut self, language: Language) {
        let mut languages = self.languages.clone();
        languages.toggle(language);
        self.set_languages(languages);
    }

    /// Add a new field
    pub fn add_field(&mut self, spec: FieldSpec) -> ConsoleResult<()> {
        spec.validate(&self.languages)?;
        let (key, definition) = spec.into_definition(&self.languages);
        if self.fields.contains_key(&key) {
            return Err(ConsoleError::DuplicateField(key));
        }
        debug!(field = %key, "field added to model draft");
        self.fields.insert(key, definition);
        Ok(())
    }

    /// Replace an existing field, renaming it in place if the key changed
    pub fn update_field(&mut self, original_key: &str, spec: FieldSpec) -> ConsoleResult<()> {
        let Some(index) = self.fields.get_index_of(original_key) else {
            return Err(ConsoleError::FieldNotFound {
                owner: "model draft".to_string(),
                field: original_key.to_string(),
            });
        };
        spec.validate(&self.languages)?;
        let (key, definition) = spec.into_definition(&self.languages);

        if key != original_key && self.fields.contains_key(&key) {
            return Err(ConsoleError::DuplicateField(key));
        }

        self.fields.shift_remove(original_key);
        self.fields.shift_insert(index, key, definition);
        Ok(())
    }

    /// Remove a field
    pub fn remove_field(&mut self, key: &str) -> Option<FieldDefinition> {
        self.fields.shift_remove(key)
    }

    /// Clear the draft back to an empty model with the given languages
    pub fn reset(&mut self, languages: LanguageSet) {
        *self = Self::new(languages);
    }

    /// Full diagnostic check of the draft
    pub fn validate(&self) -> ValidationResult {
        authoring_validator().validate(self)
    }

    /// Whether the draft may be submitted
    pub fn is_submittable(&self) -> bool {
        self.validate().valid
    }

    /// Warnings for access role ids the directory does not know
    pub fn check_access(&self, directory: &AccessDirectory) -> ValidationResult {
        let mut result = ValidationResult::ok();
        for (key, definition) in &self.fields {
            for id in directory.unknown(&definition.access) {
                result.add_warning(
                    ValidationWarning::new(
                        ValidationWarningCode::UnknownAccessRole,
                        format!("Access role '{}' is not known", id),
                    )
                    .with_path(format!("data.{}.access", key)),
                );
            }
        }
        result
    }

    /// Build the creation request body
    pub fn to_payload(&self) -> ModelCreatePayload {
        let data = self
            .fields
            .iter()
            .map(|(key, definition)| {
                let value = self.languages.iter().map(|l| (l, None)).collect();
                let field = ModelFieldPayload {
                    name: definition.name.clone(),
                    value,
                    field_type: definition.field_type.clone(),
                    access: definition.access.clone(),
                };
                (key.clone(), field)
            })
            .collect();

        ModelCreatePayload {
            title: self.title.trim().to_string(),
            value_localization: self.languages.clone(),
            data,
            generation: 1,
            is_active: true,
            removed: false,
        }
    }
}

impl Default for ModelDraft {
    fn default() -> Self {
        Self::new(LanguageSet::from(vec![Language::Ru]))
    }
}

// ============================================================================
// Authoring rules
// ============================================================================

/// Validator used for model drafts
pub fn authoring_validator() -> Validator<ModelDraft> {
    Validator::new()
        .with_rule(ModelTitleRule)
        .with_rule(ModelLanguagesRule)
        .with_rule(ModelFieldsRule)
}

/// Rule: the model needs a title
pub struct ModelTitleRule;

impl ValidationRule<ModelDraft> for ModelTitleRule {
    fn name(&self) -> &'static str {
        "model_title"
    }

    fn description(&self) -> &'static str {
        "Validates that the model title is not blank"
    }

    fn validate(&self, draft: &ModelDraft) -> ValidationResult {
        if draft.title.trim().is_empty() {
            return ValidationResult::error(
                ValidationError::new(
                    ValidationErrorCode::EmptyTitle,
                    "Model title cannot be empty",
                )
                .with_path("title"),
            );
        }
        ValidationResult::ok()
    }
}

/// Rule: at least one localization language
pub struct ModelLanguagesRule;

impl ValidationRule<ModelDraft> for ModelLanguagesRule {
    fn name(&self) -> &'static str {
        "model_languages"
    }

    fn description(&self) -> &'static str {
        "Validates that at least one localization language is selected"
    }

    fn validate(&self, draft: &ModelDraft) -> ValidationResult {
        if draft.languages.is_empty() {
            return ValidationResult::error(
                ValidationError::new(
                    ValidationErrorCode::NoLanguages,
                    "At least one language must be selected",
                )
                .with_path("value_localization"),
            );
        }
        ValidationResult::ok()
    }
}

/// Rule: fields are present, keyed, access-scoped and named in every language
pub struct ModelFieldsRule;

impl ValidationRule<ModelDraft> for ModelFieldsRule {
    fn name(&self) -> &'static str {
        "model_fields"
    }

    fn description(&self) -> &'static str {
        "Validates that the model has fields, each with access roles and a name per language"
    }

    fn validate(&self, draft: &ModelDraft) -> ValidationResult {
        let mut result = ValidationResult::ok();

        if draft.fields.is_empty() {
            result.add_error(
                ValidationError::new(ValidationErrorCode::NoFields, "Model has no fields")
                    .with_path("data"),
            );
            return result;
        }

        for (key, definition) in &draft.fields {
            let path = format!("data.{}", key);

            if key.trim().is_empty() {
                result.add_error(
                    ValidationError::new(
                        ValidationErrorCode::EmptyFieldKey,
                        "Field key cannot be empty",
                    )
                    .with_path(&path),
                );
            }

            if !definition.field_type.is_supported() {
                result.add_error(
                    ValidationError::new(
                        ValidationErrorCode::UnsupportedFieldType,
                        format!("Unsupported field type '{}'", definition.field_type),
                    )
                    .with_path(format!("{}.type", path)),
                );
            }

            if definition.access.is_empty() {
                result.add_error(
                    ValidationError::new(
                        ValidationErrorCode::NoAccess,
                        "At least one access role is required",
                    )
                    .with_path(format!("{}.access", path)),
                );
            }

            for language in definition.name.missing_for(&draft.languages) {
                result.add_error(
                    ValidationError::new(
                        ValidationErrorCode::EmptyFieldName,
                        format!("Name for {} cannot be empty", language.code()),
                    )
                    .with_path(format!("{}.name.{}", path, language.code())),
                );
            }
        }

        result
    }
}

// ============================================================================
// ModelCreatePayload
// ============================================================================

/// One field of a model creation request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelFieldPayload {
    pub name: LocalizedText,

    /// `{lang: null}` for every active language
    pub value: IndexMap<Language, Option<String>>,

    #[serde(rename = "type")]
    pub field_type: FieldType,

    pub access: Vec<RoleId>,
}

/// Body of a model creation request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelCreatePayload {
    pub title: String,
    pub value_localization: LanguageSet,
    pub data: IndexMap<FieldKey, ModelFieldPayload>,
    pub generation: u32,
    pub is_active: bool,
    pub removed: bool,
}

// ============================================================================
// ModelDraftDocument
// ============================================================================

/// File form of a model draft, for scripted authoring
#[derive(Debug, Clone, Deserialize)]
pub struct ModelDraftDocument {
    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub value_localization: Option<LanguageSet>,

    #[serde(default)]
    pub fields: Vec<FieldSpec>,
}

impl ModelDraftDocument {
    /// Replay the document through the authoring operations
    ///
    /// Fails on the first field the dialog would have rejected.
    pub fn into_draft(self, default_languages: &LanguageSet) -> ConsoleResult<ModelDraft> {
        let languages = self
            .value_localization
            .unwrap_or_else(|| default_languages.clone());
        let mut draft = ModelDraft::new(languages);
        draft.set_title(self.title);
        for spec in self.fields {
            draft.add_field(spec)?;
        }
        Ok(draft)
    }
}

// ============================================================================
// Tests
// ============================================================================
