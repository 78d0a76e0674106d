//! Study module catalog.
//!
//! The catalog is a JSON document (`catalog/study_modules.json`, checked
//! against `schema/study_catalog.schema.json`) embedded into the crate.
//! Types here mirror the document; callers use `ModuleCatalog` for lookups
//! and keep one instance for the life of the process.

pub mod builtin;
pub mod identity;
pub mod index;
pub mod model;

pub use builtin::BUILTIN_CATALOG_JSON;
pub use identity::{Category, EntryPoint, Level, ModuleId};
pub use index::{ModuleCatalog, PrerequisitePolicy};
pub use model::{
    CATALOG_SCHEMA_VERSION, CatalogDocument, ModuleSummary, StudyModule, load_document_from_path,
};
