//! Shared library for the Compose study catalog.
//!
//! The crate exposes the study module catalog (typed ids, levels and
//! categories, the embedded document) and the read-only queries hosts run
//! against it: lookup by id, level and category, free-text search,
//! prerequisite resolution and aggregate counts. Presentation is left to a
//! `ContentHost`; the `study-catalog` binary is one such host.

pub mod catalog;
pub mod config;
pub mod integrity;
pub mod launcher;
pub mod logging;
pub mod query;
pub mod stats;

mod schema_loader;

pub use catalog::{
    BUILTIN_CATALOG_JSON, CATALOG_SCHEMA_VERSION, Category, CatalogDocument, EntryPoint, Level,
    ModuleCatalog, ModuleId, ModuleSummary, PrerequisitePolicy, StudyModule,
    load_document_from_path,
};
pub use config::CatalogConfig;
pub use integrity::{IntegrityIssue, check_catalog};
pub use launcher::{ContentHost, LaunchOutcome, launch};
pub use query::ModuleQuery;
pub use stats::{CatalogSummary, summarize, validate_summary};
