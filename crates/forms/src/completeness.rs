//! Completeness predicates
//!
//! Pure, infallible checks over a draft, cheap enough to recompute on every
//! keystroke (O(fields x languages)). Callers use `field_is_complete` to
//! flag fields that still need input and `form_is_submittable` to enable
//! the submit action.

use crate::draft::{DraftField, InstanceDraft};
use console_core::FieldType;
use console_ir::FieldValue;

/// Whether one field holds a complete value for its type
///
/// - `string`: every language entry is non-blank after trimming (an empty
///   map is incomplete)
/// - `integer`: a value is present and `>= 0`
/// - anything else, including a value of the wrong shape: incomplete
pub fn field_is_complete(field: &DraftField) -> bool {
    match (field.field_type(), field.value()) {
        (FieldType::String, FieldValue::Text(text)) => text.is_complete(),
        (FieldType::Integer, FieldValue::Integer(Some(n))) => *n >= 0,
        (FieldType::String | FieldType::Integer | FieldType::Unknown(_), _) => false,
    }
}

/// Whether the whole draft may be submitted
///
/// Requires a non-blank title, a selected parent model, at least one field,
/// and every field complete.
pub fn form_is_submittable(draft: &InstanceDraft) -> bool {
    !draft.title().trim().is_empty()
        && draft.parent_model().is_some()
        && draft.field_count() > 0
        && draft.fields().all(|(_, field)| field_is_complete(field))
}

/// Keys of the fields that still need input, in schema order
pub fn incomplete_fields(draft: &InstanceDraft) -> Vec<&str> {
    draft
        .fields()
        .filter(|(_, field)| !field_is_complete(field))
        .map(|(key, _)| key)
        .collect()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use console_core::{Language, LanguageSet};
    use console_ir::{FieldDefinition, LocalizedText, Model, ModelCatalog};
    use pretty_assertions::assert_eq;

    fn catalog() -> ModelCatalog {
        let languages = LanguageSet::from(vec![Language::Ru, Language::En]);
        let name = LocalizedText::new()
            .with(Language::Ru, "Имя")
            .with(Language::En, "Name");
        ModelCatalog::from_models(vec![
            Model::new("person", "Person", languages.clone())
                .with_field("greeting", FieldDefinition::string(name.clone()).with_access("r1"))
                .with_field("age", FieldDefinition::integer(name.clone()).with_access("r1")),
            Model::new("odd", "Odd", languages).with_field(
                "born",
                FieldDefinition::new(name, FieldType::from("date")).with_access("r1"),
            ),
        ])
    }

    fn person() -> InstanceDraft {
        InstanceDraft::empty().select_parent_model(&catalog(), "person")
    }

    #[test]
    fn test_string_field_needs_every_language() {
        let draft = person().set_text("greeting", Language::Ru, "Привет");
        assert!(!field_is_complete(draft.field("greeting").unwrap()));

        let draft = draft.set_text("greeting", Language::En, "");
        assert!(!field_is_complete(draft.field("greeting").unwrap()));

        let draft = draft.set_text("greeting", Language::En, "Hi");
        assert!(field_is_complete(draft.field("greeting").unwrap()));

        let draft = draft.set_text("greeting", Language::En, " \t ");
        assert!(!field_is_complete(draft.field("greeting").unwrap()));
    }

    #[test]
    fn test_integer_field_bounds() {
        let cases = [(None, false), (Some(-1), false), (Some(0), true), (Some(42), true)];
        for (value, expected) in cases {
            let draft = person().set_integer("age", value);
            assert_eq!(
                field_is_complete(draft.field("age").unwrap()),
                expected,
                "value {:?}",
                value
            );
        }
    }

    #[test]
    fn test_unknown_type_fails_closed() {
        let draft = InstanceDraft::empty()
            .select_parent_model(&catalog(), "odd")
            .set_title("Odd one");
        assert!(!field_is_complete(draft.field("born").unwrap()));
        assert!(!form_is_submittable(&draft));
    }

    fn filled() -> InstanceDraft {
        person()
            .set_title("Someone")
            .set_text("greeting", Language::Ru, "Привет")
            .set_text("greeting", Language::En, "Hi")
            .set_integer("age", Some(30))
    }

    #[test]
    fn test_form_submittable_when_all_complete() {
        assert!(form_is_submittable(&filled()));
        assert!(incomplete_fields(&filled()).is_empty());
    }

    #[test]
    fn test_whitespace_title_blocks_submission() {
        let draft = filled().set_title("   ");
        assert!(!form_is_submittable(&draft));
    }

    #[test]
    fn test_missing_parent_or_fields_blocks_submission() {
        assert!(!form_is_submittable(&InstanceDraft::empty().set_title("x")));

        let unresolved = filled().select_parent_model(&catalog(), "ghost");
        assert!(!form_is_submittable(&unresolved));
    }

    #[test]
    fn test_incomplete_fields_in_schema_order() {
        let draft = person().set_title("x");
        assert_eq!(incomplete_fields(&draft), vec!["greeting", "age"]);

        let draft = draft.set_integer("age", Some(1));
        assert_eq!(incomplete_fields(&draft), vec!["greeting"]);
    }
}
