//! Validation results and rule sets
//!
//! Structured, path-addressed diagnostics used where a caller needs to know
//! *what* is wrong, not just whether something is valid: model authoring and
//! the last-line instance schema check before submission.

use console_core::{ConsoleError, ConsoleResult};
use std::fmt;

// ============================================================================
// ValidationResult
// ============================================================================

/// Outcome of running one or more rules over a target.
///
/// `valid` flips to `false` as soon as any error is recorded and never flips
/// back; warnings leave it untouched.
#[derive(Debug, Clone)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    /// A passing result with nothing attached
    pub fn ok() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// A failing result carrying a single error
    pub fn error(error: ValidationError) -> Self {
        let mut result = Self::ok();
        result.add_error(error);
        result
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
        self.valid = false;
    }

    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    /// Fold `other` into `self`, keeping diagnostics in order
    pub fn merge(&mut self, other: ValidationResult) {
        self.valid &= other.valid;
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    pub fn has_code(&self, code: ValidationErrorCode) -> bool {
        self.errors.iter().any(|e| e.code == code)
    }

    /// Errors whose path starts with `prefix` (e.g. `data.color`)
    pub fn errors_at<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = &'a ValidationError> {
        self.errors.iter().filter(move |e| e.is_under(prefix))
    }

    /// Collapse into a `ConsoleResult`, joining every error message with `; `
    pub fn to_result(self) -> ConsoleResult<()> {
        if self.valid {
            return Ok(());
        }
        let joined = self
            .errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        Err(ConsoleError::validation(joined))
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::ok()
    }
}

// ============================================================================
// Diagnostics
// ============================================================================

/// Code families a [`Diagnostic`] can carry
pub trait DiagnosticCode: Copy + Eq + fmt::Debug {
    /// Printed between the path and the message, if any
    const LABEL: Option<&'static str>;
}

/// One path-addressed finding produced by a rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic<C> {
    pub code: C,
    pub message: String,
    /// Dotted location inside the target, e.g. `data.color.value.en`
    pub path: Option<String>,
}

pub type ValidationError = Diagnostic<ValidationErrorCode>;
pub type ValidationWarning = Diagnostic<ValidationWarningCode>;

impl<C: DiagnosticCode> Diagnostic<C> {
    pub fn new(code: C, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: None,
        }
    }

    pub fn with_path(self, path: impl Into<String>) -> Self {
        Self {
            path: Some(path.into()),
            ..self
        }
    }

    fn is_under(&self, prefix: &str) -> bool {
        self.path.as_deref().is_some_and(|p| p.starts_with(prefix))
    }
}

impl<C: DiagnosticCode> fmt::Display for Diagnostic<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(path) = &self.path {
            write!(f, "[{}] ", path)?;
        }
        if let Some(label) = C::LABEL {
            write!(f, "{}: ", label)?;
        }
        f.write_str(&self.message)
    }
}

/// What went wrong, for callers that branch on it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationErrorCode {
    // record
    EmptyTitle,
    MissingParentModel,
    NoLanguages,
    NoFields,

    // field definitions
    EmptyFieldKey,
    EmptyFieldName,
    NoAccess,
    UnsupportedFieldType,

    // field values
    UnknownField,
    MissingField,
    TypeMismatch,
    DefinitionMismatch,
    LanguageMismatch,
    IncompleteValue,
    NegativeValue,

    Custom,
}

impl DiagnosticCode for ValidationErrorCode {
    const LABEL: Option<&'static str> = None;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationWarningCode {
    UnknownAccessRole,
    Custom,
}

impl DiagnosticCode for ValidationWarningCode {
    const LABEL: Option<&'static str> = Some("Warning");
}

// ============================================================================
// ValidationRule Trait
// ============================================================================

/// A single named check over a target of type `T`
pub trait ValidationRule<T: ?Sized> {
    /// Stable identifier, used in logs and by `Validator::rule_names`
    fn name(&self) -> &'static str;

    /// One-line human summary of what the rule enforces
    fn description(&self) -> &'static str;

    fn validate(&self, target: &T) -> ValidationResult;
}

// ============================================================================
// Validator
// ============================================================================

/// Runs an ordered list of rules over a target and merges their results
pub struct Validator<T: ?Sized> {
    rules: Vec<Box<dyn ValidationRule<T>>>,
}

impl<T: ?Sized> Validator<T> {
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    pub fn add_rule(&mut self, rule: Box<dyn ValidationRule<T>>) {
        self.rules.push(rule);
    }

    pub fn with_rule(mut self, rule: impl ValidationRule<T> + 'static) -> Self {
        self.add_rule(Box::new(rule));
        self
    }

    /// Names of the registered rules, in run order
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Every rule runs; a failing rule does not short-circuit the rest
    pub fn validate(&self, target: &T) -> ValidationResult {
        self.rules
            .iter()
            .fold(ValidationResult::ok(), |mut acc, rule| {
                let outcome = rule.validate(target);
                if !outcome.valid {
                    tracing::debug!(
                        rule = rule.name(),
                        errors = outcome.errors.len(),
                        "validation rule failed"
                    );
                }
                acc.merge(outcome);
                acc
            })
    }

    pub fn validate_result(&self, target: &T) -> ConsoleResult<()> {
        self.validate(target).to_result()
    }
}

impl<T: ?Sized> Default for Validator<T> {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================
