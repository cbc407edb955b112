//! Append-only Prisma schema merging

use anyhow::{Context, Result};
use std::io::ErrorKind;
use std::path::Path;

/// Feature subdirectory whose contents are merged instead of copied
pub const PRISMA_DIR: &str = "prisma";

/// Canonical schema file inside the Prisma directory
pub const SCHEMA_FILE: &str = "schema.prisma";

/// Append a schema fragment to the target schema file, preceded by a comment
/// header naming the source file and separated by a blank line. Existing
/// content is never rewritten; the file is created if the base template
/// shipped without one.
pub fn append_fragment(schema_path: &Path, source_name: &str, fragment: &str) -> Result<()> {
    let existing = match std::fs::read_to_string(schema_path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => String::new(),
        Err(e) => {
            return Err(e).with_context(|| format!("failed to read {}", schema_path.display()))
        }
    };

    if let Some(parent) = schema_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }

    let mut merged = existing;
    if !merged.is_empty() && !merged.ends_with('\n') {
        merged.push('\n');
    }
    if !merged.is_empty() {
        merged.push('\n');
    }
    merged.push_str(&format!("// ---- {} ----\n", source_name));
    merged.push_str(fragment);
    if !fragment.ends_with('\n') {
        merged.push('\n');
    }

    std::fs::write(schema_path, merged)
        .with_context(|| format!("failed to write {}", schema_path.display()))
}
