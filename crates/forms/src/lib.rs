//! # Console Forms
//!
//! The form engine of Model Console: the instance draft and its operations,
//! completeness predicates, the declarative instance schema, and the
//! submission sessions that talk to a `RemoteStore`.
//!
//! ## Flow
//!
//! 1. Load the model catalog through a `ConsoleContext`
//! 2. Select a parent model on an `InstanceForm`, which rebuilds the draft
//! 3. Edit title and field values; `can_submit` follows completeness
//! 4. `submit` validates against the model's `InstanceSchema`, sends the
//!    payload, and resets the draft on success
//!

pub mod backend;
pub mod completeness;
pub mod context;
pub mod draft;
pub mod schema;
pub mod session;

pub use backend::RemoteStore;
pub use completeness::{field_is_complete, form_is_submittable, incomplete_fields};
pub use context::ConsoleContext;
pub use draft::{DraftField, FieldInput, InstanceDraft};
pub use schema::InstanceSchema;
pub use session::{InstanceForm, ModelForm, SubmissionTicket};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
