//! Feature catalog and dependency resolution
//!
//! This module provides:
//! - Catalog manifest types (Catalog, FeatureDescriptor, ThemeDescriptor)
//! - Template-root resolution and feature directory discovery
//! - Transitive expansion of a feature selection

pub mod catalog;
pub mod resolver;

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::PathBuf;

pub use catalog::{
    resolve_template_root, Catalog, CatalogError, FeatureDescriptor, ThemeDescriptor,
};
pub use resolver::{resolve, AutoAdded, Resolution};

/// Print the catalog of features and themes available in a template root
pub fn list_features(templates_dir: &Option<PathBuf>) -> Result<()> {
    let root = resolve_template_root(templates_dir.clone());

    if !root.exists() {
        anyhow::bail!("Template directory not found: {}", root.display());
    }

    let catalog = Catalog::load(&root).context("Failed to load feature catalog")?;

    println!(
        "{}",
        format!("Features in {}", root.display()).cyan().bold()
    );
    println!();

    for key in &catalog.mandatory {
        println!("  {} {} {}", "*".blue(), key, "(always included)".dimmed());
    }
    for feature in &catalog.features {
        if feature.requires.is_empty() {
            println!("  {} {} {}", "-".blue(), feature.key, feature.label.dimmed());
        } else {
            println!(
                "  {} {} {} {}",
                "-".blue(),
                feature.key,
                feature.label.dimmed(),
                format!("(requires {})", feature.requires.join(", ")).yellow()
            );
        }
    }

    println!();
    println!("{}", "Themes".cyan().bold());
    println!();
    for theme in &catalog.themes {
        println!("  {} {} {}", "-".blue(), theme.key, theme.label.dimmed());
    }

    Ok(())
}
