//! Declarative instance schema
//!
//! The completeness predicates restated as validation rules over the
//! outgoing `InstancePayload`. This is the last check before a payload is
//! handed to the remote store, so a draft that reached submission without
//! going through the predicates (fields injected by other code, a stale
//! model) is still caught, with a path for every problem.

use console_core::{FieldKey, FieldType, LanguageSet, ModelId};
use console_ir::{
    FieldDefinition, FieldRecord, FieldValue, InstancePayload, Model, ValidationError,
    ValidationErrorCode, ValidationResult, ValidationRule, Validator,
};
use indexmap::IndexMap;

/// Rule set an instance payload must satisfy
pub struct InstanceSchema {
    validator: Validator<InstancePayload>,
}

impl InstanceSchema {
    /// Rules that need no model: title, parent, non-empty data, and every
    /// field complete for its own declared type
    pub fn generic() -> Self {
        Self {
            validator: Validator::new()
                .with_rule(TitleRule)
                .with_rule(ParentModelRule { expected: None })
                .with_rule(FieldsPresentRule)
                .with_rule(FieldValuesRule),
        }
    }

    /// Generic rules plus conformance to `model`: same parent id, exactly
    /// the model's field keys, matching definitions, and string values
    /// keyed by exactly the model's languages
    pub fn for_model(model: &Model) -> Self {
        Self {
            validator: Validator::new()
                .with_rule(TitleRule)
                .with_rule(ParentModelRule {
                    expected: Some(model.id.clone()),
                })
                .with_rule(FieldsPresentRule)
                .with_rule(FieldValuesRule)
                .with_rule(ModelConformanceRule {
                    languages: model.languages.clone(),
                    fields: model.fields.clone(),
                }),
        }
    }

    pub fn validate(&self, payload: &InstancePayload) -> ValidationResult {
        self.validator.validate(payload)
    }

    pub fn rule_names(&self) -> Vec<&'static str> {
        self.validator.rule_names()
    }
}

fn field_path(key: &str) -> String {
    format!("data.{}", key)
}

// ============================================================================
// Rules
// ============================================================================

/// Rule: the title is not blank
struct TitleRule;

impl ValidationRule<InstancePayload> for TitleRule {
    fn name(&self) -> &'static str {
        "instance_title"
    }

    fn description(&self) -> &'static str {
        "Validates that the instance title is not blank"
    }

    fn validate(&self, payload: &InstancePayload) -> ValidationResult {
        if payload.title.trim().is_empty() {
            return ValidationResult::error(
                ValidationError::new(ValidationErrorCode::EmptyTitle, "Title cannot be empty")
                    .with_path("title"),
            );
        }
        ValidationResult::ok()
    }
}

/// Rule: a parent model is set (and is the expected one, if known)
struct ParentModelRule {
    expected: Option<ModelId>,
}

impl ValidationRule<InstancePayload> for ParentModelRule {
    fn name(&self) -> &'static str {
        "instance_parent_model"
    }

    fn description(&self) -> &'static str {
        "Validates that the instance names its parent model"
    }

    fn validate(&self, payload: &InstancePayload) -> ValidationResult {
        if payload.parent_model.trim().is_empty() {
            return ValidationResult::error(
                ValidationError::new(
                    ValidationErrorCode::MissingParentModel,
                    "Parent model is required",
                )
                .with_path("parent_model"),
            );
        }

        match &self.expected {
            Some(expected) if *expected != payload.parent_model => ValidationResult::error(
                ValidationError::new(
                    ValidationErrorCode::MissingParentModel,
                    format!(
                        "Payload targets model '{}' but the schema is for '{}'",
                        payload.parent_model, expected
                    ),
                )
                .with_path("parent_model"),
            ),
            _ => ValidationResult::ok(),
        }
    }
}

/// Rule: at least one field
struct FieldsPresentRule;

impl ValidationRule<InstancePayload> for FieldsPresentRule {
    fn name(&self) -> &'static str {
        "instance_fields_present"
    }

    fn description(&self) -> &'static str {
        "Validates that the instance carries at least one field"
    }

    fn validate(&self, payload: &InstancePayload) -> ValidationResult {
        if payload.data.is_empty() {
            return ValidationResult::error(
                ValidationError::new(ValidationErrorCode::NoFields, "At least one field is required")
                    .with_path("data"),
            );
        }
        ValidationResult::ok()
    }
}

/// Rule: every field value is complete for its declared type
struct FieldValuesRule;

impl FieldValuesRule {
    fn check(key: &str, record: &FieldRecord, result: &mut ValidationResult) {
        let path = field_path(key);

        if record.access.is_empty() {
            result.add_error(
                ValidationError::new(ValidationErrorCode::NoAccess, "At least one access role is required")
                    .with_path(format!("{}.access", path)),
            );
        }

        match (&record.field_type, &record.value) {
            (FieldType::String, FieldValue::Text(text)) => {
                if text.is_empty() {
                    result.add_error(
                        ValidationError::new(ValidationErrorCode::IncompleteValue, "Value has no languages")
                            .with_path(format!("{}.value", path)),
                    );
                }
                for (language, entry) in text.iter() {
                    if entry.trim().is_empty() {
                        result.add_error(
                            ValidationError::new(
                                ValidationErrorCode::IncompleteValue,
                                format!("Value for {} cannot be empty", language.code()),
                            )
                            .with_path(format!("{}.value.{}", path, language.code())),
                        );
                    }
                }
            }
            (FieldType::Integer, FieldValue::Integer(Some(n))) => {
                if *n < 0 {
                    result.add_error(
                        ValidationError::new(ValidationErrorCode::NegativeValue, "Value must be zero or greater")
                            .with_path(format!("{}.value", path)),
                    );
                }
            }
            (FieldType::Integer, FieldValue::Integer(None)) => {
                result.add_error(
                    ValidationError::new(ValidationErrorCode::IncompleteValue, "Value is required")
                        .with_path(format!("{}.value", path)),
                );
            }
            (FieldType::Unknown(tag), _) => {
                result.add_error(
                    ValidationError::new(
                        ValidationErrorCode::UnsupportedFieldType,
                        format!("Unsupported field type '{}'", tag),
                    )
                    .with_path(format!("{}.type", path)),
                );
            }
            (field_type, _) => {
                result.add_error(
                    ValidationError::new(
                        ValidationErrorCode::TypeMismatch,
                        format!("Value does not match field type '{}'", field_type),
                    )
                    .with_path(format!("{}.value", path)),
                );
            }
        }
    }
}

impl ValidationRule<InstancePayload> for FieldValuesRule {
    fn name(&self) -> &'static str {
        "instance_field_values"
    }

    fn description(&self) -> &'static str {
        "Validates that every field value is complete for its type"
    }

    fn validate(&self, payload: &InstancePayload) -> ValidationResult {
        let mut result = ValidationResult::ok();
        for (key, record) in &payload.data {
            Self::check(key, record, &mut result);
        }
        result
    }
}

/// Rule: the payload matches the parent model's schema
struct ModelConformanceRule {
    languages: LanguageSet,
    fields: IndexMap<FieldKey, FieldDefinition>,
}

impl ValidationRule<InstancePayload> for ModelConformanceRule {
    fn name(&self) -> &'static str {
        "instance_model_conformance"
    }

    fn description(&self) -> &'static str {
        "Validates that the instance has exactly the model's fields and languages"
    }

    fn validate(&self, payload: &InstancePayload) -> ValidationResult {
        let mut result = ValidationResult::ok();

        for key in payload.data.keys().filter(|k| !self.fields.contains_key(*k)) {
            result.add_error(
                ValidationError::new(
                    ValidationErrorCode::UnknownField,
                    format!("Field '{}' is not part of the model", key),
                )
                .with_path(field_path(key)),
            );
        }

        for (key, definition) in &self.fields {
            let path = field_path(key);
            let Some(record) = payload.data.get(key) else {
                result.add_error(
                    ValidationError::new(
                        ValidationErrorCode::MissingField,
                        format!("Field '{}' is missing", key),
                    )
                    .with_path(path),
                );
                continue;
            };

            if record.definition() != *definition {
                result.add_error(
                    ValidationError::new(
                        ValidationErrorCode::DefinitionMismatch,
                        "Field definition differs from the model",
                    )
                    .with_path(&path),
                );
            }

            if let FieldValue::Text(text) = &record.value {
                if !text.languages().same_members(&self.languages) {
                    result.add_error(
                        ValidationError::new(
                            ValidationErrorCode::LanguageMismatch,
                            format!(
                                "Value languages {} do not match model languages {}",
                                text.languages(),
                                self.languages
                            ),
                        )
                        .with_path(format!("{}.value", path)),
                    );
                }
            }
        }

        result
    }
}

// ============================================================================
// Tests
// ============================================================================
