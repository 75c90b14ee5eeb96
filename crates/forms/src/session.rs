//! Form sessions
//!
//! A session owns one draft plus the submission state around it. At most
//! one submission is outstanding per form: `begin_submission` hands out a
//! `SubmissionTicket`, and only that ticket can complete it. A successful
//! completion resets the draft, a failed one keeps it for correction.
//!
//! `submit` runs the whole cycle against a `RemoteStore` and invalidates the
//! affected listing in the `ConsoleContext`.

use crate::backend::RemoteStore;
use crate::completeness::{form_is_submittable, incomplete_fields};
use crate::context::ConsoleContext;
use crate::draft::{FieldInput, InstanceDraft};
use crate::schema::InstanceSchema;
use console_core::{ConsoleError, ConsoleResult, Language, LanguageSet};
use console_ir::{Instance, InstancePayload, Model, ModelCatalog, ModelCreatePayload, ModelDraft};
use std::fmt;
use tracing::{info, warn};
use uuid::Uuid;

// ============================================================================
// SubmissionTicket
// ============================================================================

/// Handle for one outstanding submission
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SubmissionTicket {
    id: Uuid,
}

impl SubmissionTicket {
    fn new() -> Self {
        Self { id: Uuid::new_v4() }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }
}

impl fmt::Display for SubmissionTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

/// Single-slot guard for the outstanding ticket
#[derive(Debug, Default)]
struct SubmissionGate {
    pending: Option<SubmissionTicket>,
}

impl SubmissionGate {
    fn is_open(&self) -> bool {
        self.pending.is_none()
    }

    fn ensure_open(&self, form: &'static str) -> ConsoleResult<()> {
        match &self.pending {
            Some(ticket) => {
                warn!(form, ticket = %ticket, "submission already in progress");
                Err(ConsoleError::SubmissionInProgress)
            }
            None => Ok(()),
        }
    }

    fn issue(&mut self) -> SubmissionTicket {
        let ticket = SubmissionTicket::new();
        self.pending = Some(ticket.clone());
        ticket
    }

    fn close(&mut self, ticket: &SubmissionTicket) -> ConsoleResult<()> {
        if self.pending.as_ref() != Some(ticket) {
            return Err(ConsoleError::StaleSubmission(ticket.to_string()));
        }
        self.pending = None;
        Ok(())
    }

    fn clear(&mut self) {
        self.pending = None;
    }
}

// ============================================================================
// InstanceForm
// ============================================================================

/// Instance creation dialog state
#[derive(Debug, Default)]
pub struct InstanceForm {
    draft: InstanceDraft,
    gate: SubmissionGate,
}

impl InstanceForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draft(&self) -> &InstanceDraft {
        &self.draft
    }

    pub fn is_submitting(&self) -> bool {
        !self.gate.is_open()
    }

    /// Whether the submit action is enabled
    pub fn can_submit(&self) -> bool {
        self.gate.is_open() && form_is_submittable(&self.draft)
    }

    pub fn select_parent_model(&mut self, catalog: &ModelCatalog, model_id: &str) {
        self.draft = self.draft.select_parent_model(catalog, model_id);
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.draft = self.draft.set_title(title);
    }

    pub fn set_field_value(&mut self, key: &str, language: Option<Language>, input: FieldInput) {
        self.draft = self.draft.set_field_value(key, language, input);
    }

    pub fn set_text(&mut self, key: &str, language: Language, text: impl Into<String>) {
        self.draft = self.draft.set_text(key, language, text);
    }

    pub fn set_integer(&mut self, key: &str, value: Option<i64>) {
        self.draft = self.draft.set_integer(key, value);
    }

    /// Close the dialog: the draft is discarded and any outstanding ticket
    /// becomes stale
    pub fn cancel(&mut self) {
        self.draft = self.draft.reset();
        self.gate.clear();
    }

    /// Check the draft and open a submission
    ///
    /// Fails with `SubmissionInProgress` while another ticket is
    /// outstanding, and with a validation error when the draft is incomplete
    /// or the payload breaks `schema`. Nothing is sent by this call.
    pub fn begin_submission(
        &mut self,
        schema: &InstanceSchema,
    ) -> ConsoleResult<(SubmissionTicket, InstancePayload)> {
        self.gate.ensure_open("instance")?;

        if !form_is_submittable(&self.draft) {
            let missing = incomplete_fields(&self.draft);
            let message = if missing.is_empty() {
                "Title and parent model are required".to_string()
            } else {
                format!("Incomplete fields: {}", missing.join(", "))
            };
            return Err(ConsoleError::validation(message));
        }

        let payload = self.draft.to_payload()?;
        schema.validate(&payload).to_result()?;

        Ok((self.gate.issue(), payload))
    }

    /// Settle the outstanding submission
    ///
    /// On success the draft returns to the empty state; on failure it is
    /// kept as it was.
    pub fn complete_submission(
        &mut self,
        ticket: &SubmissionTicket,
        succeeded: bool,
    ) -> ConsoleResult<()> {
        self.gate.close(ticket)?;
        if succeeded {
            self.draft = self.draft.reset();
        }
        Ok(())
    }

    /// Validate, send, and settle in one call
    pub async fn submit<S: RemoteStore + ?Sized>(
        &mut self,
        ctx: &mut ConsoleContext,
        store: &S,
    ) -> ConsoleResult<Instance> {
        let catalog = ctx.models(store).await?;
        let schema = match self.draft.parent_model() {
            Some(id) => {
                let model = catalog.get_selectable(id).ok_or_else(|| {
                    warn!(model = %id, "parent model is no longer selectable");
                    ConsoleError::ModelNotFound(id.to_string())
                })?;
                InstanceSchema::for_model(model)
            }
            None => InstanceSchema::generic(),
        };

        let (ticket, payload) = self.begin_submission(&schema)?;
        match store.create_instance(&payload).await {
            Ok(instance) => {
                self.complete_submission(&ticket, true)?;
                ctx.invalidate_instances();
                info!(
                    instance = %instance.id,
                    model = %payload.parent_model,
                    title = %payload.title,
                    "instance created"
                );
                Ok(instance)
            }
            Err(err) => {
                self.complete_submission(&ticket, false)?;
                warn!(model = %payload.parent_model, error = %err, "instance creation failed");
                Err(err)
            }
        }
    }
}

// ============================================================================
// ModelForm
// ============================================================================

/// Model creation dialog state
#[derive(Debug)]
pub struct ModelForm {
    draft: ModelDraft,
    default_languages: LanguageSet,
    gate: SubmissionGate,
}

impl ModelForm {
    /// A form whose drafts start with `default_languages` selected
    pub fn new(default_languages: LanguageSet) -> Self {
        Self {
            draft: ModelDraft::new(default_languages.clone()),
            default_languages,
            gate: SubmissionGate::default(),
        }
    }

    /// Start from an existing draft
    pub fn with_draft(draft: ModelDraft, default_languages: LanguageSet) -> Self {
        Self {
            draft,
            default_languages,
            gate: SubmissionGate::default(),
        }
    }

    pub fn draft(&self) -> &ModelDraft {
        &self.draft
    }

    /// Mutable access for the authoring operations
    pub fn draft_mut(&mut self) -> &mut ModelDraft {
        &mut self.draft
    }

    pub fn is_submitting(&self) -> bool {
        !self.gate.is_open()
    }

    pub fn can_submit(&self) -> bool {
        self.gate.is_open() && self.draft.is_submittable()
    }

    pub fn cancel(&mut self) {
        self.draft.reset(self.default_languages.clone());
        self.gate.clear();
    }

    pub fn begin_submission(&mut self) -> ConsoleResult<(SubmissionTicket, ModelCreatePayload)> {
        self.gate.ensure_open("model")?;
        self.draft.validate().to_result()?;
        Ok((self.gate.issue(), self.draft.to_payload()))
    }

    pub fn complete_submission(
        &mut self,
        ticket: &SubmissionTicket,
        succeeded: bool,
    ) -> ConsoleResult<()> {
        self.gate.close(ticket)?;
        if succeeded {
            self.draft.reset(self.default_languages.clone());
        }
        Ok(())
    }

    /// Validate, send, and settle in one call; invalidates the catalog
    pub async fn submit<S: RemoteStore + ?Sized>(
        &mut self,
        ctx: &mut ConsoleContext,
        store: &S,
    ) -> ConsoleResult<Model> {
        let (ticket, payload) = self.begin_submission()?;
        match store.create_model(&payload).await {
            Ok(model) => {
                self.complete_submission(&ticket, true)?;
                ctx.invalidate_models();
                info!(model = %model.id, title = %model.title, fields = model.field_count(), "model created");
                Ok(model)
            }
            Err(err) => {
                self.complete_submission(&ticket, false)?;
                warn!(title = %payload.title, error = %err, "model creation failed");
                Err(err)
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
