//! Shared console context
//!
//! Caches the model catalog, the access directory and the instance listing
//! so each is fetched once and reused by every form. Mutations invalidate the
//! affected listing; the next read refetches it.

use crate::backend::RemoteStore;
use console_core::ConsoleResult;
use console_ir::{AccessDirectory, InstanceListing, Model, ModelCatalog};
use std::sync::Arc;
use tracing::{debug, info};

/// Cached reference data shared by the forms
#[derive(Debug, Clone, Default)]
pub struct ConsoleContext {
    models: Option<Arc<ModelCatalog>>,
    access: Option<Arc<AccessDirectory>>,
    instances: Option<Arc<InstanceListing>>,
}

impl ConsoleContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// The model catalog, fetched on first use
    pub async fn models<S: RemoteStore + ?Sized>(
        &mut self,
        store: &S,
    ) -> ConsoleResult<Arc<ModelCatalog>> {
        if let Some(catalog) = &self.models {
            return Ok(Arc::clone(catalog));
        }
        let catalog = Arc::new(ModelCatalog::from_models(store.list_models().await?));
        debug!(models = catalog.len(), "model catalog loaded");
        self.models = Some(Arc::clone(&catalog));
        Ok(catalog)
    }

    /// The access directory, fetched on first use
    pub async fn access_roles<S: RemoteStore + ?Sized>(
        &mut self,
        store: &S,
    ) -> ConsoleResult<Arc<AccessDirectory>> {
        if let Some(directory) = &self.access {
            return Ok(Arc::clone(directory));
        }
        let directory = Arc::new(AccessDirectory::new(store.list_access_roles().await?));
        debug!(roles = directory.len(), "access directory loaded");
        self.access = Some(Arc::clone(&directory));
        Ok(directory)
    }

    /// The instance listing, fetched on first use
    pub async fn instances<S: RemoteStore + ?Sized>(
        &mut self,
        store: &S,
    ) -> ConsoleResult<Arc<InstanceListing>> {
        if let Some(listing) = &self.instances {
            return Ok(Arc::clone(listing));
        }
        let listing = Arc::new(InstanceListing::new(store.list_instances().await?));
        debug!(instances = listing.len(), "instance listing loaded");
        self.instances = Some(Arc::clone(&listing));
        Ok(listing)
    }

    /// The catalog if it has been loaded, without fetching
    pub fn cached_models(&self) -> Option<&ModelCatalog> {
        self.models.as_deref()
    }

    pub fn invalidate_models(&mut self) {
        self.models = None;
    }

    pub fn invalidate_access_roles(&mut self) {
        self.access = None;
    }

    pub fn invalidate_instances(&mut self) {
        self.instances = None;
    }

    /// Soft-delete a model and drop the cached catalog
    pub async fn remove_model<S: RemoteStore + ?Sized>(
        &mut self,
        store: &S,
        model_id: &str,
    ) -> ConsoleResult<Model> {
        let model = store.remove_model(model_id).await?;
        self.invalidate_models();
        info!(model = %model.id, title = %model.title, "model removed");
        Ok(model)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::memory::MemoryStore;
    use console_core::{Language, LanguageSet};
    use std::sync::atomic::Ordering;

    fn store() -> MemoryStore {
        let languages = LanguageSet::from(vec![Language::Ru]);
        MemoryStore::with_models(vec![
            Model::new("a", "Alpha", languages.clone()),
            Model::new("b", "Beta", languages),
        ])
    }

    #[tokio::test]
    async fn test_catalog_is_fetched_once() {
        let store = store();
        let mut ctx = ConsoleContext::new();
        assert!(ctx.cached_models().is_none());

        let first = ctx.models(&store).await.unwrap();
        let second = ctx.models(&store).await.unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(store.list_models_calls.load(Ordering::SeqCst), 1);
        assert_eq!(ctx.cached_models().map(ModelCatalog::len), Some(2));
    }

    #[tokio::test]
    async fn test_invalidate_refetches() {
        let store = store();
        let mut ctx = ConsoleContext::new();
        ctx.instances(&store).await.unwrap();
        ctx.invalidate_instances();
        ctx.instances(&store).await.unwrap();
        assert_eq!(store.list_instances_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_remove_model_invalidates_catalog() {
        let store = store();
        let mut ctx = ConsoleContext::new();
        ctx.models(&store).await.unwrap();

        let removed = ctx.remove_model(&store, "a").await.unwrap();
        assert!(removed.removed);
        assert!(ctx.cached_models().is_none());

        let catalog = ctx.models(&store).await.unwrap();
        assert!(catalog.get_selectable("a").is_none());
        assert_eq!(catalog.visible().count(), 1);
    }

    #[tokio::test]
    async fn test_remove_unknown_model_keeps_cache() {
        let store = store();
        let mut ctx = ConsoleContext::new();
        ctx.models(&store).await.unwrap();

        let err = ctx.remove_model(&store, "ghost").await.unwrap_err();
        assert!(err.is_not_found());
        assert!(ctx.cached_models().is_some());
    }
}
