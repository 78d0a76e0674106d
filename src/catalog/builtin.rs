//! The catalog shipped with the crate.

use crate::catalog::index::{ModuleCatalog, PrerequisitePolicy};
use anyhow::Result;

/// Embedded copy of `catalog/study_modules.json`.
pub const BUILTIN_CATALOG_JSON: &str = include_str!("../../catalog/study_modules.json");

impl ModuleCatalog {
    /// Build the shipped catalog with the default prerequisite policy.
    ///
    /// Each call builds a fresh value; hosts build once and share it.
    pub fn builtin() -> Result<Self> {
        Self::builtin_with_policy(PrerequisitePolicy::default())
    }

    pub fn builtin_with_policy(policy: PrerequisitePolicy) -> Result<Self> {
        Self::from_json_str(BUILTIN_CATALOG_JSON, "built-in catalog", policy)
    }
}
