//! Shared record traits
//!
//! Implemented by models, instances and access roles so lookups and
//! consistency checks read the same everywhere.

use crate::error::ConsoleResult;

// ============================================================================
// Validatable Trait
// ============================================================================

/// A record that can check its own internal consistency.
///
/// This is the cheap, first-problem-wins check. Callers that need every
/// problem with a path use the rule sets in `console_ir::validation`.
///
/// ```rust,ignore
/// impl Validatable for AccessRole {
///     fn validate(&self) -> ConsoleResult<()> {
///         if self.id.trim().is_empty() {
///             return Err(ConsoleError::validation("Access role id cannot be blank"));
///         }
///         Ok(())
///     }
/// }
/// ```
pub trait Validatable {
    fn validate(&self) -> ConsoleResult<()>;

    fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}

// ============================================================================
// Identifiable Trait
// ============================================================================

/// Records addressed by a backend-issued string id
pub trait Identifiable {
    fn id(&self) -> &str;

    fn matches_id(&self, id: &str) -> bool {
        self.id() == id
    }
}
