//! SEO metadata injection
//!
//! Opt-in stage: a metadata fragment is concatenated after the root layout
//! file, and the robots/sitemap route descriptors are copied into the app
//! directory. The layout is not parsed; if it already exports metadata the
//! duplicate export surfaces as a build error in the generated project.

use crate::features::catalog;
use anyhow::{Context, Result};
use std::path::Path;

/// Root layout entry point inside the generated project
pub const LAYOUT_FILE: &str = "app/layout.tsx";

/// Metadata fragment appended to the layout
pub const METADATA_FRAGMENT: &str = "metadata.ts";

/// Route descriptors copied verbatim into the app directory
pub const ROUTE_FILES: &[&str] = &["robots.ts", "sitemap.ts"];

/// Routing directory of the generated project
const APP_DIR: &str = "app";

/// Inject SEO metadata into the layout and copy the auxiliary route files
pub fn apply_seo(root: &Path, target_dir: &Path) -> Result<()> {
    let seo_dir = root.join(catalog::SEO_DIR);

    let fragment_path = seo_dir.join(METADATA_FRAGMENT);
    let fragment = std::fs::read_to_string(&fragment_path)
        .with_context(|| format!("failed to read {}", fragment_path.display()))?;

    let layout_path = target_dir.join(LAYOUT_FILE);
    let existing = std::fs::read_to_string(&layout_path)
        .with_context(|| format!("failed to read {}", layout_path.display()))?;

    let mut merged = existing;
    if !merged.is_empty() && !merged.ends_with('\n') {
        merged.push('\n');
    }
    merged.push('\n');
    merged.push_str(&fragment);
    if !fragment.ends_with('\n') {
        merged.push('\n');
    }
    std::fs::write(&layout_path, merged)
        .with_context(|| format!("failed to write {}", layout_path.display()))?;

    for file in ROUTE_FILES {
        let source = seo_dir.join(file);
        let dest = target_dir.join(APP_DIR).join(file);
        std::fs::copy(&source, &dest)
            .with_context(|| format!("failed to copy {}", source.display()))?;
    }

    Ok(())
}
