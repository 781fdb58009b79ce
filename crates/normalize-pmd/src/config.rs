//! Adapter configuration.
//!
//! Loaded from `.normalize/pmd.toml` under the project root. Missing or
//! unreadable files fall back to defaults.
//!
//! Example:
//! ```toml
//! command = "/opt/pmd/bin/pmd"
//! subcommand = "check"          # PMD 7
//! categories = ["bestpractices", "errorprone"]
//! ruleset = "config/pmd-ruleset.xml"
//! ruleset_name = "my-project"
//! ```

use crate::rules::Category;
use crate::ruleset::RulesetOptions;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PmdConfig {
    /// PMD executable (name on PATH or absolute path).
    pub command: String,
    /// Inserted before the flags, e.g. `check` for PMD 7. None for PMD 6.
    pub subcommand: Option<String>,
    /// Category slugs passed via `-rulesets`. Unknown slugs are ignored.
    pub categories: Vec<String>,
    /// Maintained ruleset file, relative to the project root.
    pub ruleset: PathBuf,
    pub ruleset_name: Option<String>,
    pub ruleset_description: Option<String>,
}

impl Default for PmdConfig {
    fn default() -> Self {
        Self {
            command: "pmd".to_string(),
            subcommand: None,
            categories: Category::ALL.iter().map(|c| c.slug().to_string()).collect(),
            ruleset: PathBuf::from("pmd-ruleset.xml"),
            ruleset_name: None,
            ruleset_description: None,
        }
    }
}

impl PmdConfig {
    /// Load configuration for a project root.
    pub fn load(root: &Path) -> Self {
        let path = root.join(".normalize").join("pmd.toml");
        Self::load_file(&path).unwrap_or_default()
    }

    fn load_file(path: &Path) -> Option<Self> {
        let content = std::fs::read_to_string(path).ok()?;
        match toml::from_str(&content) {
            Ok(config) => Some(config),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "invalid pmd config, using defaults");
                None
            }
        }
    }

    /// Configured categories that exist in the catalog.
    pub fn resolved_categories(&self) -> Vec<Category> {
        self.categories
            .iter()
            .filter_map(|slug| {
                let category = Category::from_slug(slug.trim());
                if category.is_none() {
                    tracing::warn!(category = %slug, "unknown PMD category");
                }
                category
            })
            .collect()
    }

    pub fn ruleset_options(&self) -> RulesetOptions {
        let defaults = RulesetOptions::default();
        RulesetOptions {
            name: self.ruleset_name.clone().unwrap_or(defaults.name),
            description: self
                .ruleset_description
                .clone()
                .unwrap_or(defaults.description),
        }
    }
}
