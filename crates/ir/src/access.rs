//! Access roles
//!
//! Roles are supplied by the backend and only read here. Fields refer to them
//! by id; the directory resolves ids to display names for badges and pickers.

use console_core::{Identifiable, RoleId};
use serde::{Deserialize, Serialize};

/// An access role as listed by the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessRole {
    #[serde(rename = "_id", alias = "id")]
    pub id: RoleId,

    /// Display name
    pub role: String,
}

impl AccessRole {
    pub fn new(id: impl Into<RoleId>, role: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            role: role.into(),
        }
    }
}

impl Identifiable for AccessRole {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Read-only list of known access roles
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccessDirectory {
    roles: Vec<AccessRole>,
}

impl AccessDirectory {
    pub fn new(roles: Vec<AccessRole>) -> Self {
        Self { roles }
    }

    pub fn get(&self, id: &str) -> Option<&AccessRole> {
        self.roles.iter().find(|r| r.matches_id(id))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Known roles among `ids`, in directory order
    pub fn filter<S: AsRef<str>>(&self, ids: &[S]) -> Vec<&AccessRole> {
        self.roles
            .iter()
            .filter(|r| ids.iter().any(|id| r.matches_id(id.as_ref())))
            .collect()
    }

    /// Ids among `ids` the directory does not know
    pub fn unknown<'a, S: AsRef<str>>(&self, ids: &'a [S]) -> Vec<&'a str> {
        ids.iter()
            .map(AsRef::as_ref)
            .filter(|id| !self.contains(id))
            .collect()
    }

    /// Display name for a role id, falling back to the raw id
    pub fn label_for<'a>(&'a self, id: &'a str) -> &'a str {
        self.get(id).map(|r| r.role.as_str()).unwrap_or(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &AccessRole> {
        self.roles.iter()
    }

    pub fn len(&self) -> usize {
        self.roles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }
}
