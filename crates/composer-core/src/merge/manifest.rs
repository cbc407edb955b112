//! Package manifest merging
//!
//! The generated project gets exactly one `package.json`: the base template's
//! manifest with every feature's dependency fragment overlaid onto it. The
//! overlay is shallow and last-feature-wins per dependency name; no semantic
//! version resolution is attempted.

use crate::features::catalog;
use anyhow::{Context, Result};
use serde_json::Value;
use std::path::Path;

/// Manifest file name, in features and in the generated project
pub const MANIFEST_FILE: &str = "package.json";

/// Dependency sections a feature fragment may contribute
const DEPENDENCY_SECTIONS: &[&str] = &["dependencies", "devDependencies"];

/// Overlay one fragment's dependency maps onto the accumulator manifest
pub fn overlay_fragment(manifest: &mut Value, fragment: &Value) {
    let Some(root) = manifest.as_object_mut() else {
        return;
    };

    for section in DEPENDENCY_SECTIONS {
        let Some(deps) = fragment.get(*section).and_then(Value::as_object) else {
            continue;
        };

        let entry = root
            .entry(section.to_string())
            .or_insert_with(|| Value::Object(Default::default()));
        let Some(target) = entry.as_object_mut() else {
            continue;
        };
        for (name, version) in deps {
            target.insert(name.clone(), version.clone());
        }
    }
}

/// Merge the base manifest with every feature fragment, in application order,
/// and write the combined manifest back to the target. Features without a
/// `package.json` fragment are skipped silently. The project name is stamped
/// into the manifest while we are here.
pub fn merge_manifest(
    root: &Path,
    target_dir: &Path,
    project_name: &str,
    features: &[String],
) -> Result<()> {
    let manifest_path = target_dir.join(MANIFEST_FILE);
    let content = std::fs::read_to_string(&manifest_path)
        .with_context(|| format!("failed to read {}", manifest_path.display()))?;
    let mut manifest: Value = serde_json::from_str(&content)
        .with_context(|| format!("invalid JSON in {}", manifest_path.display()))?;

    if let Some(obj) = manifest.as_object_mut() {
        obj.insert("name".to_string(), Value::String(project_name.to_string()));
    }

    for key in features {
        let fragment_path = catalog::feature_dir(root, key).join(MANIFEST_FILE);
        let fragment_content = match std::fs::read_to_string(&fragment_path) {
            Ok(content) => content,
            Err(_) => continue,
        };
        let fragment: Value = serde_json::from_str(&fragment_content)
            .with_context(|| format!("invalid package.json fragment in feature '{}'", key))?;
        overlay_fragment(&mut manifest, &fragment);
    }

    let mut out = serde_json::to_string_pretty(&manifest).context("failed to serialize manifest")?;
    out.push('\n');
    std::fs::write(&manifest_path, out)
        .with_context(|| format!("failed to write {}", manifest_path.display()))
}
