//! File-backed remote store
//!
//! Listings are JSON arrays on disk, the same documents the backend serves.
//! Created models are written back to the models listing; writes edit the
//! listing as raw JSON so keys the console does not model are kept. Created instances
//! are appended to the outbox, one JSON record per line; the outbox is read
//! back as part of the instance listing. A missing file is an empty listing.

use async_trait::async_trait;
use chrono::Utc;
use console_core::{ConsoleError, ConsoleResult};
use console_forms::RemoteStore;
use console_ir::{
    AccessRole, FieldDefinition, Instance, InstancePayload, Model, ModelCreatePayload,
    ModelSummary, parse_access_roles, parse_instances, parse_models,
};
use serde_json::Value;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tracing::debug;
use uuid::Uuid;

use crate::config::ConsoleConfig;

#[derive(Debug, Clone)]
pub struct JsonFileStore {
    models_path: PathBuf,
    access_path: PathBuf,
    instances_path: PathBuf,
    outbox_path: PathBuf,
}

impl JsonFileStore {
    pub fn new(config: &ConsoleConfig) -> Self {
        Self {
            models_path: config.models_path.clone(),
            access_path: config.access_path.clone(),
            instances_path: config.instances_path.clone(),
            outbox_path: config.outbox_path.clone(),
        }
    }

    pub fn outbox_path(&self) -> &Path {
        &self.outbox_path
    }

    async fn read(path: &Path, operation: &str) -> ConsoleResult<Option<String>> {
        match tokio::fs::read_to_string(path).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "listing file missing; treating as empty");
                Ok(None)
            }
            Err(e) => Err(ConsoleError::remote(
                operation,
                format!("{}: {}", path.display(), e),
            )),
        }
    }

    async fn load_models(&self) -> ConsoleResult<Vec<Model>> {
        match Self::read(&self.models_path, "list models").await? {
            Some(content) => parse_models(&content),
            None => Ok(Vec::new()),
        }
    }

    /// Models listing as raw JSON, so keys the typed model does not carry
    /// are written back untouched
    async fn load_model_entries(&self, operation: &str) -> ConsoleResult<Vec<Value>> {
        match Self::read(&self.models_path, operation).await? {
            Some(content) => serde_json::from_str(&content)
                .map_err(|e| ConsoleError::InvalidListing(format!("models listing: {}", e))),
            None => Ok(Vec::new()),
        }
    }

    async fn save_model_entries(&self, entries: &[Value], operation: &str) -> ConsoleResult<()> {
        let json = serde_json::to_string_pretty(entries)?;
        let path = &self.models_path;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| ConsoleError::remote(operation, e.to_string()))?;
        }
        tokio::fs::write(path, json)
            .await
            .map_err(|e| ConsoleError::remote(operation, format!("{}: {}", path.display(), e)))
    }

    async fn load_outbox(&self) -> ConsoleResult<Vec<Instance>> {
        let Some(content) = Self::read(&self.outbox_path, "list instances").await? else {
            return Ok(Vec::new());
        };
        content
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| {
                serde_json::from_str(line)
                    .map_err(|e| ConsoleError::InvalidListing(format!("outbox: {}", e)))
            })
            .collect()
    }

    async fn append_outbox(&self, instance: &Instance) -> ConsoleResult<()> {
        let mut line = serde_json::to_string(instance)?;
        line.push('\n');

        let remote = |e: std::io::Error| ConsoleError::remote("create instance", e.to_string());
        if let Some(parent) = self.outbox_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(remote)?;
        }
        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.outbox_path)
            .await
            .map_err(remote)?;
        file.write_all(line.as_bytes()).await.map_err(remote)?;
        file.flush().await.map_err(remote)
    }
}

#[async_trait]
impl RemoteStore for JsonFileStore {
    async fn list_models(&self) -> ConsoleResult<Vec<Model>> {
        self.load_models().await
    }

    async fn list_access_roles(&self) -> ConsoleResult<Vec<AccessRole>> {
        match Self::read(&self.access_path, "list access roles").await? {
            Some(content) => parse_access_roles(&content),
            None => Ok(Vec::new()),
        }
    }

    async fn list_instances(&self) -> ConsoleResult<Vec<Instance>> {
        let mut instances = match Self::read(&self.instances_path, "list instances").await? {
            Some(content) => parse_instances(&content)?,
            None => Vec::new(),
        };
        instances.extend(self.load_outbox().await?);
        Ok(instances)
    }

    async fn create_model(&self, payload: &ModelCreatePayload) -> ConsoleResult<Model> {
        let mut entries = self.load_model_entries("create model").await?;
        let now = Utc::now();

        let mut model = Model::new(
            Uuid::new_v4().to_string(),
            payload.title.clone(),
            payload.value_localization.clone(),
        );
        for (key, field) in &payload.data {
            let definition = FieldDefinition {
                name: field.name.clone(),
                field_type: field.field_type.clone(),
                access: field.access.clone(),
            };
            model = model.with_field(key.clone(), definition);
        }
        model.generation = payload.generation;
        model.is_active = payload.is_active;
        model.removed = payload.removed;
        model.created_at = Some(now);
        model.updated_at = Some(now);

        // the stored entry keeps the request body's field shape (value maps included)
        let mut entry = serde_json::to_value(payload)?;
        if let (Some(stored), Value::Object(issued)) =
            (entry.as_object_mut(), serde_json::to_value(&model)?)
        {
            for (key, value) in issued {
                if key != "data" {
                    stored.insert(key, value);
                }
            }
        }

        entries.push(entry);
        self.save_model_entries(&entries, "create model").await?;
        Ok(model)
    }

    async fn create_instance(&self, payload: &InstancePayload) -> ConsoleResult<Instance> {
        let models = self.load_models().await?;
        let parent_title = models
            .iter()
            .find(|m| m.id == payload.parent_model)
            .map(|m| m.title.clone())
            .unwrap_or_default();
        let now = Utc::now();

        let instance = Instance {
            id: Uuid::new_v4().to_string(),
            title: payload.title.clone(),
            version: 1,
            value_localization: payload.observed_languages(),
            removed: false,
            is_active: true,
            is_last: true,
            parent_model: Some(ModelSummary {
                id: payload.parent_model.clone(),
                title: parent_title,
            }),
            comment: None,
            data: payload.data.clone(),
            created_at: Some(now),
            updated_at: Some(now),
        };

        self.append_outbox(&instance).await?;
        Ok(instance)
    }

    async fn remove_model(&self, model_id: &str) -> ConsoleResult<Model> {
        let mut entries = self.load_model_entries("remove model").await?;
        let entry = entries
            .iter_mut()
            .find(|e| e.get("_id").and_then(Value::as_str) == Some(model_id))
            .and_then(Value::as_object_mut)
            .ok_or_else(|| ConsoleError::ModelNotFound(model_id.to_string()))?;

        entry.insert("removed".into(), Value::Bool(true));
        entry.insert("updatedAt".into(), serde_json::to_value(Utc::now())?);
        let removed: Model = serde_json::from_value(Value::Object(entry.clone()))
            .map_err(|e| ConsoleError::InvalidListing(format!("models listing: {}", e)))?;

        self.save_model_entries(&entries, "remove model").await?;
        Ok(removed)
    }
}
