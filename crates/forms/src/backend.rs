//! Remote store boundary
//!
//! Everything the console reads from or writes to the backend goes through
//! `RemoteStore`. The form engine never talks to a transport directly, so a
//! file-backed store, an HTTP client, or the in-memory store used by tests
//! can sit behind it.

use async_trait::async_trait;
use console_core::ConsoleResult;
use console_ir::{AccessRole, Instance, InstancePayload, Model, ModelCreatePayload};

/// Backend operations used by the console
#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// Every model, including inactive and soft-deleted ones
    async fn list_models(&self) -> ConsoleResult<Vec<Model>>;

    /// The access role directory
    async fn list_access_roles(&self) -> ConsoleResult<Vec<AccessRole>>;

    /// Every stored instance
    async fn list_instances(&self) -> ConsoleResult<Vec<Instance>>;

    /// Create a model and return the stored record
    async fn create_model(&self, payload: &ModelCreatePayload) -> ConsoleResult<Model>;

    /// Create an instance and return the stored record
    async fn create_instance(&self, payload: &InstancePayload) -> ConsoleResult<Instance>;

    /// Soft-delete a model and return the updated record
    async fn remove_model(&self, model_id: &str) -> ConsoleResult<Model>;
}

// ============================================================================
// In-memory store
// ============================================================================

#[cfg(test)]
pub(crate) mod memory {
    use super::*;
    use console_core::ConsoleError;
    use console_ir::ModelSummary;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Store holding everything in memory, with call counters and an
    /// optional forced failure for create operations
    #[derive(Default)]
    pub struct MemoryStore {
        pub models: Mutex<Vec<Model>>,
        pub roles: Mutex<Vec<AccessRole>>,
        pub instances: Mutex<Vec<Instance>>,
        pub list_models_calls: AtomicUsize,
        pub list_instances_calls: AtomicUsize,
        pub fail_creates: Mutex<Option<String>>,
    }

    impl MemoryStore {
        pub fn with_models(models: Vec<Model>) -> Self {
            Self {
                models: Mutex::new(models),
                ..Self::default()
            }
        }

        pub fn fail_creates_with(&self, message: &str) {
            *self.fail_creates.lock().unwrap() = Some(message.to_string());
        }

        pub fn recover(&self) {
            *self.fail_creates.lock().unwrap() = None;
        }

        fn check_failure(&self, operation: &str) -> ConsoleResult<()> {
            match self.fail_creates.lock().unwrap().as_ref() {
                Some(message) => Err(ConsoleError::remote(operation, message.clone())),
                None => Ok(()),
            }
        }
    }

    #[async_trait]
    impl RemoteStore for MemoryStore {
        async fn list_models(&self) -> ConsoleResult<Vec<Model>> {
            self.list_models_calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.models.lock().unwrap().clone())
        }

        async fn list_access_roles(&self) -> ConsoleResult<Vec<AccessRole>> {
            Ok(self.roles.lock().unwrap().clone())
        }

        async fn list_instances(&self) -> ConsoleResult<Vec<Instance>> {
            self.list_instances_calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.instances.lock().unwrap().clone())
        }

        async fn create_model(&self, payload: &ModelCreatePayload) -> ConsoleResult<Model> {
            self.check_failure("create model")?;
            let mut models = self.models.lock().unwrap();
            let mut model = Model::new(
                format!("m{}", models.len() + 1),
                payload.title.clone(),
                payload.value_localization.clone(),
            );
            for (key, field) in &payload.data {
                let definition = console_ir::FieldDefinition {
                    name: field.name.clone(),
                    field_type: field.field_type.clone(),
                    access: field.access.clone(),
                };
                model = model.with_field(key.clone(), definition);
            }
            models.push(model.clone());
            Ok(model)
        }

        async fn create_instance(&self, payload: &InstancePayload) -> ConsoleResult<Instance> {
            self.check_failure("create instance")?;
            let mut instances = self.instances.lock().unwrap();
            let instance = Instance {
                id: format!("i{}", instances.len() + 1),
                title: payload.title.clone(),
                version: 1,
                value_localization: payload.observed_languages(),
                removed: false,
                is_active: true,
                is_last: true,
                parent_model: Some(ModelSummary {
                    id: payload.parent_model.clone(),
                    title: String::new(),
                }),
                comment: None,
                data: payload.data.clone(),
                created_at: None,
                updated_at: None,
            };
            instances.push(instance.clone());
            Ok(instance)
        }

        async fn remove_model(&self, model_id: &str) -> ConsoleResult<Model> {
            let mut models = self.models.lock().unwrap();
            let model = models
                .iter_mut()
                .find(|m| m.id == model_id)
                .ok_or_else(|| ConsoleError::ModelNotFound(model_id.to_string()))?;
            model.removed = true;
            Ok(model.clone())
        }
    }
}
