//! Deserializable representation of the study catalog document.
//!
//! The types mirror `schema/study_catalog.schema.json` so the registry and
//! tests can reason about module metadata without ad-hoc JSON handling. Use
//! `ModuleCatalog` for validated lookups; use these structs when reading or
//! writing the document itself.

use crate::catalog::identity::{Category, EntryPoint, Level, ModuleId};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Schema version this crate reads and writes.
pub const CATALOG_SCHEMA_VERSION: &str = "study_catalog_v1";

#[derive(Clone, Debug, Serialize, Deserialize)]
/// Full catalog as stored on disk.
pub struct CatalogDocument {
    pub schema_version: String,
    pub title: String,
    pub modules: Vec<StudyModule>,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
/// One teachable unit of the catalog.
pub struct StudyModule {
    pub id: ModuleId,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub detail_description: String,
    pub level: Level,
    pub category: Category,
    #[serde(default)]
    pub prerequisites: Vec<ModuleId>,
    pub entry_point: EntryPoint,
}

/// Compact module view used for listings.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ModuleSummary {
    pub id: ModuleId,
    pub name: String,
    pub level: Level,
    pub category: Category,
}

impl StudyModule {
    pub fn summary(&self) -> ModuleSummary {
        ModuleSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            level: self.level,
            category: self.category,
        }
    }
}

/// Read and parse a catalog document from disk without schema validation.
pub fn load_document_from_path(path: &Path) -> Result<CatalogDocument> {
    let data = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let document: CatalogDocument =
        serde_json::from_str(&data).with_context(|| format!("parsing {}", path.display()))?;
    Ok(document)
}
