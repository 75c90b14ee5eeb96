//! Read-through catalog of listed models
//!
//! The catalog is built from the backend's model listing and is never
//! mutated; a refresh replaces it wholesale.

use crate::model::Model;
use console_core::Identifiable;
use indexmap::IndexMap;

/// Models keyed by id, in listing order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModelCatalog {
    models: IndexMap<String, Model>,
}

impl ModelCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from a listing; a repeated id keeps the later record
    pub fn from_models(models: impl IntoIterator<Item = Model>) -> Self {
        let mut map = IndexMap::new();
        for model in models {
            map.insert(model.id().to_string(), model);
        }
        Self { models: map }
    }

    /// Look up any listed model, including inactive and removed ones
    pub fn get(&self, id: &str) -> Option<&Model> {
        self.models.get(id)
    }

    /// Look up a model only if it can be picked for a new instance
    pub fn get_selectable(&self, id: &str) -> Option<&Model> {
        self.get(id).filter(|m| m.is_selectable())
    }

    /// Models offered in the instance creation picker
    pub fn active(&self) -> impl Iterator<Item = &Model> {
        self.models.values().filter(|m| m.is_selectable())
    }

    /// Models shown in the models table (soft-deleted ones hidden)
    pub fn visible(&self) -> impl Iterator<Item = &Model> {
        self.models.values().filter(|m| !m.removed)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Model> {
        self.models.values()
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

impl FromIterator<Model> for ModelCatalog {
    fn from_iter<I: IntoIterator<Item = Model>>(iter: I) -> Self {
        Self::from_models(iter)
    }
}
