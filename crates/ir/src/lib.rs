//! # Console IR (Intermediate Representation)
//!
//! This crate provides the data shapes Model Console works with: model
//! schemas, localized text maps, field definitions and values, access roles,
//! instance records and the payloads sent when creating models or instances.
//!
//! ## Core Concepts
//!
//! - **Model**: a reusable schema of typed, access-scoped, multilingual fields
//! - **Field**: one named datum of a model (`string` or `integer`)
//! - **LocalizedText**: a language-keyed string map, used for names and text values
//! - **Instance**: a record conforming to a model, one value per field
//! - **ModelDraft**: the model being authored, with language reconciliation
//!

// Module declarations
pub mod access;
pub mod authoring;
pub mod catalog;
pub mod field;
pub mod instance;
pub mod localized;
pub mod model;
pub mod serialization;
pub mod validation;

// Re-export commonly used types at crate root
pub use access::{AccessDirectory, AccessRole};
pub use authoring::{
    FieldSpec, ModelCreatePayload, ModelDraft, ModelDraftDocument, ModelFieldPayload,
    reconcile_languages,
};
pub use catalog::ModelCatalog;
pub use field::{FieldDefinition, FieldRecord, FieldValue};
pub use instance::{Instance, InstanceListing, InstancePayload, ModelSummary};
pub use localized::LocalizedText;
pub use model::{Model, RecordRef};
pub use serialization::{
    load_access_roles, load_instances, load_models, parse_access_roles, parse_instances,
    parse_models, save_models,
};
pub use validation::{
    Diagnostic, DiagnosticCode, ValidationError, ValidationErrorCode, ValidationResult,
    ValidationRule, ValidationWarning, ValidationWarningCode, Validator,
};

// Re-export core types that are commonly used with IR
pub use console_core::{
    ConsoleError, ConsoleResult, FieldKey, FieldType, Language, LanguageSet, ModelId, RoleId,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Prelude Module
// ============================================================================

/// Convenient re-exports for common usage
pub mod prelude {
    pub use crate::{
        AccessDirectory,
        AccessRole,
        // Re-exported from core
        ConsoleError,
        ConsoleResult,
        // Schema types
        FieldDefinition,
        FieldRecord,
        FieldSpec,
        FieldType,
        FieldValue,
        InstancePayload,
        Language,
        LanguageSet,
        LocalizedText,
        Model,
        ModelCatalog,
        ModelDraft,
        // Operations
        reconcile_languages,
    };
}
