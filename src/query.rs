//! Filters shared by the catalog's search and multi-criteria selection.

use crate::catalog::{Category, StudyModule};

/// Case-folded search term; `None` when the query is blank.
pub(crate) struct TextNeedle(String);

impl TextNeedle {
    pub(crate) fn new(query: &str) -> Option<Self> {
        if query.trim().is_empty() {
            None
        } else {
            Some(TextNeedle(fold_case(query)))
        }
    }

    pub(crate) fn matches(&self, module: &StudyModule) -> bool {
        fold_case(&module.name).contains(&self.0)
            || fold_case(&module.description).contains(&self.0)
    }
}

/// Per-character lowercase, independent of the surrounding text.
///
/// `str::to_lowercase` picks final sigma from context, so a prefix of a
/// word would not match the word itself; both sigma forms fold to `σ`.
fn fold_case(text: &str) -> String {
    text.chars()
        .flat_map(char::to_lowercase)
        .map(|c| if c == 'ς' { 'σ' } else { c })
        .collect()
}

/// Conjunctive filter over level, category and free text.
///
/// Unset criteria match everything, so `ModuleQuery::default()` selects the
/// whole catalog.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ModuleQuery {
    pub level: Option<u8>,
    pub category: Option<Category>,
    pub text: Option<String>,
}

impl ModuleQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn level(mut self, level: u8) -> Self {
        self.level = Some(level);
        self
    }

    pub fn category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn matches(&self, module: &StudyModule) -> bool {
        if let Some(level) = self.level {
            if module.level.value() != level {
                return false;
            }
        }
        if let Some(category) = self.category {
            if module.category != category {
                return false;
            }
        }
        match self.text.as_deref().and_then(TextNeedle::new) {
            Some(needle) => needle.matches(module),
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::index::tests::{fixture, module};
    use crate::catalog::{ModuleCatalog, PrerequisitePolicy};

    #[test]
    fn needle_is_case_insensitive_over_name_and_description() {
        let preview = module("preview", "Preview", 1, Category::Basics, &[]);
        assert!(TextNeedle::new("preview").unwrap().matches(&preview));
        assert!(TextNeedle::new("PREVIEW").unwrap().matches(&preview));
        assert!(TextNeedle::new("descr").unwrap().matches(&preview));
        assert!(!TextNeedle::new("pager").unwrap().matches(&preview));
        assert!(TextNeedle::new(" \n").is_none());
    }

    #[test]
    fn needle_matches_non_ascii_text() {
        let basics = module("kotlin_basics", "Kotlin 기초", 0, Category::Basics, &[]);
        assert!(TextNeedle::new("기초").unwrap().matches(&basics));
        assert!(TextNeedle::new("KOTLIN 기").unwrap().matches(&basics));
    }

    #[test]
    fn needle_folds_greek_sigma_regardless_of_position() {
        let greek = module("greek", "ΟΔΟΣΑ", 1, Category::Basics, &[]);
        assert!(TextNeedle::new("ΟΔΟΣ").unwrap().matches(&greek));
        assert!(TextNeedle::new("οδοσ").unwrap().matches(&greek));
        assert!(TextNeedle::new("οδος").unwrap().matches(&greek));

        let catalog =
            ModuleCatalog::from_modules("greek", vec![greek], PrerequisitePolicy::Lenient).unwrap();
        assert_eq!(catalog.search("ΟΔΟΣ").len(), catalog.search("οδοσ").len());
        assert_eq!(catalog.search("ΟΔΟΣ").len(), 1);
    }

    #[test]
    fn criteria_combine_conjunctively() {
        let catalog = fixture();
        assert_eq!(catalog.select(&ModuleQuery::new()).len(), catalog.module_count());

        let basics_level_one = ModuleQuery::new().level(1).category(Category::Basics);
        let ids: Vec<_> = catalog
            .select(&basics_level_one)
            .iter()
            .map(|m| m.id.as_str())
            .collect();
        assert_eq!(ids, ["composable_function", "preview"]);

        let narrowed = basics_level_one.text("preview");
        let ids: Vec<_> = catalog.select(&narrowed).iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, ["preview"]);

        let empty = ModuleQuery::new().level(1).category(Category::State);
        assert!(catalog.select(&empty).is_empty());
    }

    #[test]
    fn blank_text_criterion_is_ignored() {
        let catalog = fixture();
        let query = ModuleQuery::new().category(Category::State).text("   ");
        assert_eq!(catalog.select(&query).len(), 2);
    }
}
