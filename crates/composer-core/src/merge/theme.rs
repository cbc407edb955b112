//! Theme token merging
//!
//! A theme is a block of CSS custom properties appended to the generated
//! global stylesheet. Later custom-property redeclarations win at the cascade
//! level, so existing declarations are left in place.

use crate::features::catalog;
use anyhow::{Context, Result};
use std::path::Path;

/// Global stylesheet inside the generated project
pub const STYLESHEET_FILE: &str = "app/globals.css";

/// Append the selected theme's token block to the target stylesheet under a
/// banner comment. The stylesheet must already exist (the base template
/// provides it).
pub fn apply_theme(root: &Path, target_dir: &Path, theme_key: &str) -> Result<()> {
    let css_path = root
        .join(catalog::THEMES_DIR)
        .join(format!("{}.css", theme_key));
    let theme_css = std::fs::read_to_string(&css_path)
        .with_context(|| format!("failed to read theme {}", css_path.display()))?;

    let sheet_path = target_dir.join(STYLESHEET_FILE);
    let existing = std::fs::read_to_string(&sheet_path)
        .with_context(|| format!("failed to read {}", sheet_path.display()))?;

    let mut merged = existing;
    if !merged.is_empty() && !merged.ends_with('\n') {
        merged.push('\n');
    }
    merged.push('\n');
    merged.push_str(&format!("/* ==== theme colors: {} ==== */\n", theme_key));
    merged.push_str(&theme_css);
    if !theme_css.ends_with('\n') {
        merged.push('\n');
    }

    std::fs::write(&sheet_path, merged)
        .with_context(|| format!("failed to write {}", sheet_path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appends_theme_under_banner() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("templates");
        let target = dir.path().join("demo");
        std::fs::create_dir_all(root.join("themes")).unwrap();
        std::fs::create_dir_all(target.join("app")).unwrap();

        let base_css = ":root {\n  --background: #fff;\n}\n";
        std::fs::write(target.join(STYLESHEET_FILE), base_css).unwrap();
        std::fs::write(
            root.join("themes/midnight.css"),
            ":root {\n  --background: #0b0f1a;\n}\n",
        )
        .unwrap();

        apply_theme(&root, &target, "midnight").unwrap();

        let merged = std::fs::read_to_string(target.join(STYLESHEET_FILE)).unwrap();
        assert!(merged.starts_with(base_css));
        assert!(merged.contains("/* ==== theme colors: midnight ==== */"));
        // Both declarations survive; the later one wins in the cascade
        assert_eq!(merged.matches("--background:").count(), 2);
    }

    #[test]
    fn missing_theme_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("templates");
        let target = dir.path().join("demo");
        std::fs::create_dir_all(target.join("app")).unwrap();
        std::fs::write(target.join(STYLESHEET_FILE), "").unwrap();

        assert!(apply_theme(&root, &target, "neon").is_err());
    }
}
