//! Aggregate counts over a catalog.
//!
//! The summary feeds the `stats` command and tests that check every module
//! is accounted for exactly once on both classification axes.

use crate::catalog::{Category, Level, ModuleCatalog};
use anyhow::{Result, bail};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize)]
/// Module totals per level and per category.
pub struct CatalogSummary {
    pub title: String,
    pub module_count: usize,
    pub by_level: BTreeMap<Level, usize>,
    pub by_category: BTreeMap<Category, usize>,
}

pub fn summarize(catalog: &ModuleCatalog) -> CatalogSummary {
    CatalogSummary {
        title: catalog.title().to_string(),
        module_count: catalog.module_count(),
        by_level: catalog.module_count_by_level(),
        by_category: catalog.module_count_by_category(),
    }
}

/// Check that both breakdowns add up to the total.
pub fn validate_summary(summary: &CatalogSummary) -> Result<()> {
    let level_total: usize = summary.by_level.values().sum();
    if level_total != summary.module_count {
        bail!(
            "level breakdown covers {} modules, catalog has {}",
            level_total,
            summary.module_count
        );
    }
    let category_total: usize = summary.by_category.values().sum();
    if category_total != summary.module_count {
        bail!(
            "category breakdown covers {} modules, catalog has {}",
            category_total,
            summary.module_count
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::index::tests::fixture;
    use serde_json::json;

    #[test]
    fn summary_serializes_with_string_keys() {
        let summary = summarize(&fixture());
        validate_summary(&summary).unwrap();
        let value = serde_json::to_value(&summary).unwrap();
        assert_eq!(
            value,
            json!({
                "title": "fixture",
                "module_count": 5,
                "by_level": {"0": 1, "1": 2, "3": 1, "4": 1},
                "by_category": {"basics": 3, "state": 2}
            })
        );
    }

    #[test]
    fn mismatched_breakdown_is_rejected() {
        let mut summary = summarize(&fixture());
        summary.module_count += 1;
        let err = validate_summary(&summary).unwrap_err();
        assert!(err.to_string().contains("level breakdown covers 5 modules"));
    }
}
