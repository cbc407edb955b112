//! Catalog manifest types and loading
//!
//! The template root carries a `features.yaml` manifest listing the mandatory
//! features, the optional feature catalog, and the available themes. Catalog
//! loading and feature application are separate phases so the merge logic can
//! be exercised against in-memory catalogs in tests.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the catalog manifest inside the template root
pub const CATALOG_FILE: &str = "features.yaml";

/// Subdirectory of the template root holding the base template tree
pub const BASE_DIR: &str = "base";

/// Subdirectory of the template root holding feature overlay directories
pub const FEATURES_DIR: &str = "features";

/// Subdirectory of the template root holding theme stylesheets
pub const THEMES_DIR: &str = "themes";

/// Subdirectory of the template root holding SEO fragments
pub const SEO_DIR: &str = "seo";

/// Environment variable overriding the template root location
pub const TEMPLATES_DIR_ENV: &str = "SHOPFORGE_TEMPLATES_DIR";

/// Default template root, relative to the working directory
pub const DEFAULT_TEMPLATES_DIR: &str = "templates";

/// Errors surfaced while loading or validating the catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog manifest not found at {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to read {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("unknown theme '{0}'")]
    UnknownTheme(String),

    #[error("feature '{key}' has no overlay directory at {}", .path.display())]
    MissingFeatureDir { key: String, path: PathBuf },
}

/// A single selectable feature overlay
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureDescriptor {
    /// Identifier; doubles as the overlay directory name under `features/`
    pub key: String,

    /// Display label for the multiselect prompt
    pub label: String,

    /// One-line hint shown next to the label
    #[serde(default)]
    pub hint: String,

    /// Features that must be included whenever this one is selected
    #[serde(default)]
    pub requires: Vec<String>,
}

/// A selectable theme, backed by `themes/<key>.css`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemeDescriptor {
    pub key: String,
    pub label: String,
}

/// Root catalog manifest (`<template root>/features.yaml`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalog {
    /// Semver version for CLI compatibility checking
    pub version: String,

    /// Features applied to every project, in application order
    #[serde(default)]
    pub mandatory: Vec<String>,

    /// Optional features offered in the multiselect
    #[serde(default)]
    pub features: Vec<FeatureDescriptor>,

    /// Available themes
    #[serde(default)]
    pub themes: Vec<ThemeDescriptor>,
}

impl Catalog {
    /// Load the catalog manifest from a template root
    pub fn load(root: &Path) -> Result<Self, CatalogError> {
        let path = root.join(CATALOG_FILE);
        if !path.exists() {
            return Err(CatalogError::NotFound(path));
        }
        let content = std::fs::read_to_string(&path).map_err(|source| CatalogError::Io {
            path: path.clone(),
            source,
        })?;
        serde_yaml::from_str(&content).map_err(|source| CatalogError::Parse { path, source })
    }

    /// Look up an optional feature by key
    pub fn feature(&self, key: &str) -> Option<&FeatureDescriptor> {
        self.features.iter().find(|f| f.key == key)
    }

    /// Look up a theme by key
    pub fn theme(&self, key: &str) -> Result<&ThemeDescriptor, CatalogError> {
        self.themes
            .iter()
            .find(|t| t.key == key)
            .ok_or_else(|| CatalogError::UnknownTheme(key.to_string()))
    }

    /// The requires-map consumed by the dependency resolver
    pub fn requires_map(&self) -> HashMap<String, Vec<String>> {
        self.features
            .iter()
            .map(|f| (f.key.clone(), f.requires.clone()))
            .collect()
    }

    /// Feature application order: mandatory features first, in their listed
    /// order, then the resolved selection in resolution order. A mandatory
    /// feature re-listed in the selection is applied once, in its mandatory
    /// slot.
    pub fn apply_order(&self, resolved: &[String]) -> Vec<String> {
        let mut order: Vec<String> = Vec::new();
        for key in self.mandatory.iter().chain(resolved.iter()) {
            if !order.iter().any(|k| k == key) {
                order.push(key.clone());
            }
        }
        order
    }
}

/// Resolve the template root: explicit flag, then environment variable, then
/// the default `templates` directory.
pub fn resolve_template_root(flag: Option<PathBuf>) -> PathBuf {
    match flag {
        Some(path) => path,
        None => std::env::var(TEMPLATES_DIR_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_TEMPLATES_DIR)),
    }
}

/// Overlay directory for a feature
pub fn feature_dir(root: &Path, key: &str) -> PathBuf {
    root.join(FEATURES_DIR).join(key)
}

/// Ensure every feature in the apply order has an overlay directory
pub fn verify_feature_dirs(root: &Path, keys: &[String]) -> Result<(), CatalogError> {
    for key in keys {
        let path = feature_dir(root, key);
        if !path.is_dir() {
            return Err(CatalogError::MissingFeatureDir {
                key: key.clone(),
                path,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_catalog() -> Catalog {
        serde_yaml::from_str(
            r#"
version: "0.1.0"
mandatory:
  - middleware
  - shadcn
features:
  - key: auth
    label: Authentication
  - key: stripe
    label: Stripe payments
    hint: Checkout and webhooks
    requires:
      - auth
themes:
  - key: default
    label: Default
"#,
        )
        .unwrap()
    }

    #[test]
    fn parses_manifest() {
        let catalog = test_catalog();
        assert_eq!(catalog.version, "0.1.0");
        assert_eq!(catalog.mandatory, vec!["middleware", "shadcn"]);
        assert_eq!(catalog.features.len(), 2);
        assert!(catalog.feature("auth").unwrap().requires.is_empty());
        assert_eq!(catalog.feature("stripe").unwrap().requires, vec!["auth"]);
    }

    #[test]
    fn requires_map_covers_all_features() {
        let map = test_catalog().requires_map();
        assert_eq!(map.len(), 2);
        assert_eq!(map["stripe"], vec!["auth"]);
        assert!(map["auth"].is_empty());
    }

    #[test]
    fn apply_order_puts_mandatory_first() {
        let catalog = test_catalog();
        let order = catalog.apply_order(&["stripe".into(), "auth".into()]);
        assert_eq!(order, vec!["middleware", "shadcn", "stripe", "auth"]);
    }

    #[test]
    fn apply_order_skips_relisted_mandatory() {
        let catalog = test_catalog();
        let order = catalog.apply_order(&["shadcn".into(), "auth".into()]);
        assert_eq!(order, vec!["middleware", "shadcn", "auth"]);
    }

    #[test]
    fn apply_order_with_empty_selection_is_mandatory_only() {
        let catalog = test_catalog();
        assert_eq!(catalog.apply_order(&[]), vec!["middleware", "shadcn"]);
    }

    #[test]
    fn unknown_theme_is_an_error() {
        let catalog = test_catalog();
        assert!(catalog.theme("default").is_ok());
        assert!(matches!(
            catalog.theme("neon"),
            Err(CatalogError::UnknownTheme(_))
        ));
    }

    #[test]
    fn load_reports_missing_manifest() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            Catalog::load(dir.path()),
            Err(CatalogError::NotFound(_))
        ));
    }

    #[test]
    fn verify_feature_dirs_reports_missing_overlay() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("features/auth")).unwrap();

        assert!(verify_feature_dirs(dir.path(), &["auth".into()]).is_ok());
        let err = verify_feature_dirs(dir.path(), &["auth".into(), "stripe".into()]);
        assert!(matches!(
            err,
            Err(CatalogError::MissingFeatureDir { key, .. }) if key == "stripe"
        ));
    }
}
