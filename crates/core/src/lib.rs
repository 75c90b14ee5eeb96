//! # Console Core
//!
//! Core types, traits, and error handling for Model Console.
//!
//! This crate provides the foundational building blocks shared by the
//! schema IR, the form engine and the command-line surface:
//!
//! - **Types**: localization languages, language sets, field type tags and ids
//! - **Traits**: `Validatable` for self-checking records
//! - **Errors**: unified error handling with `ConsoleError` and `ConsoleResult`
//!

pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used items at crate root
pub use error::{ConsoleError, ConsoleResult, ResultExt};
pub use traits::{Identifiable, Validatable};
pub use types::{FieldKey, FieldType, InstanceId, Language, LanguageSet, ModelId, RoleId};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
