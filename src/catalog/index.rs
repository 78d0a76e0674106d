//! Indexed, read-only view of a study catalog.
//!
//! `ModuleCatalog` is built once (from the embedded document, a file, or
//! values assembled in code) and never mutated afterwards. Construction is
//! strict about ids and schema versions; queries are infallible and report
//! absence as `None` or an empty list. The value is `Send + Sync`, so hosts
//! share one instance behind an `Arc` instead of a global.

use crate::catalog::identity::{Category, Level, ModuleId};
use crate::catalog::model::{CATALOG_SCHEMA_VERSION, CatalogDocument, StudyModule};
use crate::integrity::check_catalog;
use crate::query::{ModuleQuery, TextNeedle};
use crate::schema_loader::catalog_schema;
use anyhow::{Context, Result, bail};
use log::{debug, info, warn};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

/// How construction treats prerequisite ids that fail integrity checks.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum PrerequisitePolicy {
    /// Keep the catalog; unresolved ids are dropped at query time.
    #[default]
    Lenient,
    /// Refuse to build a catalog with any integrity issue.
    Strict,
}

#[derive(Clone, Debug)]
/// Study modules in catalog order plus an id index.
pub struct ModuleCatalog {
    title: String,
    modules: Vec<StudyModule>,
    by_id: BTreeMap<ModuleId, usize>,
}

impl ModuleCatalog {
    /// Load, schema-validate and index a catalog file.
    pub fn load(path: &Path, policy: PrerequisitePolicy) -> Result<Self> {
        debug!("loading catalog from {}", path.display());
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading catalog {}", path.display()))?;
        Self::from_json_str(&text, &format!("catalog {}", path.display()), policy)
    }

    /// Same as [`ModuleCatalog::load`] for a document already in memory.
    ///
    /// `label` names the source in error messages.
    pub fn from_json_str(text: &str, label: &str, policy: PrerequisitePolicy) -> Result<Self> {
        let value: Value =
            serde_json::from_str(text).with_context(|| format!("parsing {label}"))?;
        catalog_schema()?.validate(&value, label)?;
        let document: CatalogDocument =
            serde_json::from_value(value).with_context(|| format!("decoding {label}"))?;
        Self::from_document(document, policy)
    }

    pub fn from_document(document: CatalogDocument, policy: PrerequisitePolicy) -> Result<Self> {
        validate_schema_version(&document.schema_version)?;
        Self::from_modules(document.title, document.modules, policy)
    }

    /// Build a catalog from modules assembled in code.
    ///
    /// Rejects empty catalogs, blank ids or names, and duplicate ids. Under
    /// [`PrerequisitePolicy::Strict`] any integrity issue is also fatal;
    /// otherwise each issue is logged once.
    pub fn from_modules(
        title: impl Into<String>,
        modules: Vec<StudyModule>,
        policy: PrerequisitePolicy,
    ) -> Result<Self> {
        let title = title.into();
        if title.trim().is_empty() {
            bail!("catalog title must not be empty");
        }
        let by_id = build_index(&modules)?;
        let catalog = Self {
            title,
            modules,
            by_id,
        };

        let issues = check_catalog(&catalog);
        if !issues.is_empty() {
            if policy == PrerequisitePolicy::Strict {
                let details = issues
                    .iter()
                    .map(|issue| issue.to_string())
                    .collect::<Vec<_>>()
                    .join("\n");
                bail!("catalog '{}' failed integrity checks:\n{}", catalog.title, details);
            }
            for issue in &issues {
                warn!("{}: {}", catalog.title, issue);
            }
        }

        info!(
            "built catalog '{}' with {} modules across {} levels",
            catalog.title,
            catalog.modules.len(),
            catalog.levels().len()
        );
        Ok(catalog)
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Every module in catalog order.
    pub fn modules(&self) -> &[StudyModule] {
        &self.modules
    }

    /// Resolve a module by id; absence is a valid empty result.
    pub fn get_by_id(&self, id: &str) -> Option<&StudyModule> {
        self.by_id.get(id).map(|&position| &self.modules[position])
    }

    pub fn get_by_level(&self, level: u8) -> Vec<&StudyModule> {
        self.modules
            .iter()
            .filter(|module| module.level.value() == level)
            .collect()
    }

    pub fn get_by_category(&self, category: Category) -> Vec<&StudyModule> {
        self.modules
            .iter()
            .filter(|module| module.category == category)
            .collect()
    }

    /// Case-insensitive substring search over name and description.
    ///
    /// A blank query returns the whole catalog in order.
    pub fn search(&self, query: &str) -> Vec<&StudyModule> {
        match TextNeedle::new(query) {
            Some(needle) => self
                .modules
                .iter()
                .filter(|module| needle.matches(module))
                .collect(),
            None => self.modules.iter().collect(),
        }
    }

    /// Modules matching every criterion set on `query`.
    pub fn select(&self, query: &ModuleQuery) -> Vec<&StudyModule> {
        self.modules
            .iter()
            .filter(|module| query.matches(module))
            .collect()
    }

    /// Direct prerequisites of `module`, in declared order.
    ///
    /// Ids that do not resolve are skipped.
    pub fn get_prerequisites(&self, module: &StudyModule) -> Vec<&StudyModule> {
        module
            .prerequisites
            .iter()
            .filter_map(|id| self.get_by_id(id.as_str()))
            .collect()
    }

    /// Transitive prerequisites of `module`, deepest first.
    ///
    /// Each module appears once and never `module` itself; cycles and
    /// unresolved ids are tolerated.
    pub fn prerequisite_closure(&self, module: &StudyModule) -> Vec<&StudyModule> {
        let mut visited = BTreeSet::new();
        visited.insert(module.id.clone());
        let mut ordered = Vec::new();
        // (module, index of the next prerequisite to follow)
        let mut frames: Vec<(&StudyModule, usize)> = Vec::new();
        for id in &module.prerequisites {
            self.enter_prerequisite(id.as_str(), &mut visited, &mut frames);
            while let Some(frame) = frames.last_mut() {
                let (current, next) = *frame;
                frame.1 += 1;
                match current.prerequisites.get(next) {
                    Some(id) => self.enter_prerequisite(id.as_str(), &mut visited, &mut frames),
                    None => {
                        frames.pop();
                        ordered.push(current);
                    }
                }
            }
        }
        ordered
    }

    fn enter_prerequisite<'a>(
        &'a self,
        id: &str,
        visited: &mut BTreeSet<ModuleId>,
        frames: &mut Vec<(&'a StudyModule, usize)>,
    ) {
        if let Some(found) = self.get_by_id(id) {
            if visited.insert(found.id.clone()) {
                frames.push((found, 0));
            }
        }
    }

    /// Modules that list `id` as a direct prerequisite.
    pub fn dependents(&self, id: &str) -> Vec<&StudyModule> {
        self.modules
            .iter()
            .filter(|module| module.prerequisites.iter().any(|p| p.as_str() == id))
            .collect()
    }

    pub fn module_count(&self) -> usize {
        self.modules.len()
    }

    pub fn module_count_by_level(&self) -> BTreeMap<Level, usize> {
        let mut counts = BTreeMap::new();
        for module in &self.modules {
            *counts.entry(module.level).or_insert(0) += 1;
        }
        counts
    }

    pub fn module_count_by_category(&self) -> BTreeMap<Category, usize> {
        let mut counts = BTreeMap::new();
        for module in &self.modules {
            *counts.entry(module.category).or_insert(0) += 1;
        }
        counts
    }

    /// Distinct levels present, ascending.
    pub fn levels(&self) -> Vec<Level> {
        self.module_count_by_level().into_keys().collect()
    }

    /// Distinct categories present, in enumeration order.
    pub fn categories(&self) -> Vec<Category> {
        self.module_count_by_category().into_keys().collect()
    }
}

fn validate_schema_version(schema_version: &str) -> Result<()> {
    if schema_version.is_empty() {
        bail!("schema_version must not be empty");
    }
    if schema_version != CATALOG_SCHEMA_VERSION {
        bail!(
            "schema_version '{}' not supported (expected '{}')",
            schema_version,
            CATALOG_SCHEMA_VERSION
        );
    }
    Ok(())
}

fn build_index(modules: &[StudyModule]) -> Result<BTreeMap<ModuleId, usize>> {
    if modules.is_empty() {
        bail!("catalog contains no modules");
    }

    let mut map = BTreeMap::new();
    for (position, module) in modules.iter().enumerate() {
        if module.id.0.trim().is_empty() {
            bail!("encountered module with no id at position {position}");
        }
        if module.name.trim().is_empty() {
            bail!("module {} has an empty name", module.id);
        }
        if map.insert(module.id.clone(), position).is_some() {
            bail!("duplicate module id {}", module.id);
        }
    }
    Ok(map)
}
