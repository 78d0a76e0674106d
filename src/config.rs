//! Environment-driven configuration for catalog consumers.
//!
//! Settings come from `STUDY_*` variables so the CLI and embedding hosts
//! resolve the same catalog. `from_lookup` takes any key lookup, which keeps
//! tests away from the process environment.

use crate::catalog::{ModuleCatalog, PrerequisitePolicy};
use anyhow::{Result, anyhow};
use log::{LevelFilter, debug};
use std::env;
use std::path::PathBuf;

/// Catalog file to load instead of the built-in catalog.
pub const CATALOG_PATH_ENV: &str = "STUDY_CATALOG_PATH";
/// Non-empty and not `0` selects `PrerequisitePolicy::Strict`.
pub const STRICT_ENV: &str = "STUDY_CATALOG_STRICT";
pub const LOG_LEVEL_ENV: &str = "STUDY_LOG";

const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Warn;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CatalogConfig {
    pub catalog_path: Option<PathBuf>,
    pub policy: PrerequisitePolicy,
    pub log_level: LevelFilter,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            catalog_path: None,
            policy: PrerequisitePolicy::default(),
            log_level: DEFAULT_LOG_LEVEL,
        }
    }
}

impl CatalogConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let catalog_path = non_empty(CATALOG_PATH_ENV).map(PathBuf::from);
        let policy = if non_empty(STRICT_ENV).is_some_and(|value| value.trim() != "0") {
            PrerequisitePolicy::Strict
        } else {
            PrerequisitePolicy::Lenient
        };
        let log_level = match non_empty(LOG_LEVEL_ENV) {
            Some(raw) => raw
                .trim()
                .parse::<LevelFilter>()
                .map_err(|_| anyhow!("invalid {LOG_LEVEL_ENV} value '{raw}'"))?,
            None => DEFAULT_LOG_LEVEL,
        };

        Ok(Self {
            catalog_path,
            policy,
            log_level,
        })
    }

    /// Build the configured catalog: the override file when set, otherwise
    /// the built-in one.
    pub fn open_catalog(&self) -> Result<ModuleCatalog> {
        match &self.catalog_path {
            Some(path) => {
                debug!("using catalog override {}", path.display());
                ModuleCatalog::load(path, self.policy)
            }
            None => ModuleCatalog::builtin_with_policy(self.policy),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: BTreeMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = CatalogConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, CatalogConfig::default());
        assert_eq!(config.log_level, LevelFilter::Warn);
        assert_eq!(config.policy, PrerequisitePolicy::Lenient);
    }

    #[test]
    fn reads_overrides() {
        let config = CatalogConfig::from_lookup(lookup_from(&[
            (CATALOG_PATH_ENV, "/tmp/catalog.json"),
            (STRICT_ENV, "1"),
            (LOG_LEVEL_ENV, "DEBUG"),
        ]))
        .unwrap();
        assert_eq!(config.catalog_path, Some(PathBuf::from("/tmp/catalog.json")));
        assert_eq!(config.policy, PrerequisitePolicy::Strict);
        assert_eq!(config.log_level, LevelFilter::Debug);
    }

    #[test]
    fn strict_flag_follows_zero_convention() {
        for (raw, expected) in [
            ("0", PrerequisitePolicy::Lenient),
            ("  ", PrerequisitePolicy::Lenient),
            ("yes", PrerequisitePolicy::Strict),
        ] {
            let config = CatalogConfig::from_lookup(lookup_from(&[(STRICT_ENV, raw)])).unwrap();
            assert_eq!(config.policy, expected, "value {raw:?}");
        }
    }

    #[test]
    fn invalid_log_level_is_an_error() {
        let err = CatalogConfig::from_lookup(lookup_from(&[(LOG_LEVEL_ENV, "loud")])).unwrap_err();
        assert!(err.to_string().contains("invalid STUDY_LOG value 'loud'"));
    }

    #[test]
    fn open_catalog_defaults_to_builtin() {
        let catalog = CatalogConfig::default().open_catalog().unwrap();
        assert!(catalog.get_by_id("preview").is_some());
    }
}
