//! Reading and writing listing documents
//!
//! The backend hands out JSON arrays of models, access roles and instances.
//! This module parses those listings (from strings or files) and writes
//! model listings out, e.g. to seed a file-backed store.

use crate::access::AccessRole;
use crate::instance::Instance;
use crate::model::Model;
use console_core::{ConsoleError, ConsoleResult};
use serde::de::DeserializeOwned;
use std::path::Path;

// ============================================================================
// Parsing
// ============================================================================

fn parse_listing<T: DeserializeOwned>(json: &str, kind: &str) -> ConsoleResult<Vec<T>> {
    serde_json::from_str(json)
        .map_err(|e| ConsoleError::InvalidListing(format!("{} listing: {}", kind, e)))
}

/// Parse a models listing
pub fn parse_models(json: &str) -> ConsoleResult<Vec<Model>> {
    parse_listing(json, "models")
}

/// Parse an access roles listing
pub fn parse_access_roles(json: &str) -> ConsoleResult<Vec<AccessRole>> {
    parse_listing(json, "access")
}

/// Parse an instances listing
pub fn parse_instances(json: &str) -> ConsoleResult<Vec<Instance>> {
    parse_listing(json, "instances")
}

// ============================================================================
// Files
// ============================================================================

fn read_file(path: &Path) -> ConsoleResult<String> {
    std::fs::read_to_string(path).map_err(|e| ConsoleError::FileRead {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load a models listing from a file
pub fn load_models(path: impl AsRef<Path>) -> ConsoleResult<Vec<Model>> {
    parse_models(&read_file(path.as_ref())?)
}

/// Load an access roles listing from a file
pub fn load_access_roles(path: impl AsRef<Path>) -> ConsoleResult<Vec<AccessRole>> {
    parse_access_roles(&read_file(path.as_ref())?)
}

/// Load an instances listing from a file
pub fn load_instances(path: impl AsRef<Path>) -> ConsoleResult<Vec<Instance>> {
    parse_instances(&read_file(path.as_ref())?)
}

/// Serialize a models listing to pretty JSON
pub fn models_to_string(models: &[Model]) -> ConsoleResult<String> {
    Ok(serde_json::to_string_pretty(models)?)
}

/// Write a models listing to a file
pub fn save_models(models: &[Model], path: impl AsRef<Path>) -> ConsoleResult<()> {
    let path = path.as_ref();
    let json = models_to_string(models)?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent).map_err(|e| ConsoleError::FileWrite {
                path: parent.to_path_buf(),
                message: e.to_string(),
            })?;
        }
    }

    std::fs::write(path, json).map_err(|e| ConsoleError::FileWrite {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

// ============================================================================
// Tests
// ============================================================================
