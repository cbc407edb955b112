//! Base template and feature overlay copying
//!
//! The base template is copied once into a fresh target directory. Feature
//! overlays are then applied in order with overwrite-allowed semantics for
//! ordinary files, so a later feature's file at the same relative path
//! replaces an earlier one. Three entries are routed to the mergers instead
//! of being copied: `package.json`, `env.example`, and `.prisma` files under
//! the feature's `prisma/` directory.

use crate::features::catalog;
use crate::merge::{env, manifest, schema};
use anyhow::{Context, Result};
use std::path::Path;
use tokio::fs;
use walkdir::WalkDir;

/// What one feature contributed to the target
#[derive(Debug, Default)]
pub struct AppliedFeature {
    /// Ordinary files copied (overwrites included)
    pub files: usize,
    /// Schema fragments appended to the target schema
    pub schema_fragments: usize,
    /// Whether an env fragment was appended to the target `.env`
    pub env_fragment: bool,
}

/// Copy the base template tree into a not-yet-existing target directory.
/// Returns the number of files copied.
pub async fn copy_base(root: &Path, target_dir: &Path) -> Result<usize> {
    let base = root.join(catalog::BASE_DIR);
    if !base.is_dir() {
        anyhow::bail!("base template not found at {}", base.display());
    }
    if target_dir.exists() {
        anyhow::bail!("target directory already exists: {}", target_dir.display());
    }
    copy_tree(&base, target_dir).await
}

/// Apply one feature overlay to the target directory
pub async fn apply_feature(root: &Path, target_dir: &Path, key: &str) -> Result<AppliedFeature> {
    let feature_dir = catalog::feature_dir(root, key);
    let mut report = AppliedFeature::default();

    let mut entries = fs::read_dir(&feature_dir)
        .await
        .with_context(|| format!("failed to read {}", feature_dir.display()))?;

    while let Some(entry) = entries
        .next_entry()
        .await
        .with_context(|| format!("failed to read {}", feature_dir.display()))?
    {
        let name = entry.file_name();
        let name_str = name.to_string_lossy().to_string();
        let path = entry.path();
        let file_type = entry
            .file_type()
            .await
            .with_context(|| format!("failed to stat {}", path.display()))?;

        if file_type.is_dir() {
            if name_str == schema::PRISMA_DIR {
                apply_prisma_dir(&path, target_dir, key, &mut report).await?;
            } else {
                report.files += copy_tree(&path, &target_dir.join(&name)).await?;
            }
        } else if name_str == manifest::MANIFEST_FILE {
            // Dependency fragment; the manifest merge stage picks it up
        } else if name_str == env::ENV_FRAGMENT_FILE {
            let fragment = fs::read_to_string(&path)
                .await
                .with_context(|| format!("failed to read {}", path.display()))?;
            env::append_fragment(&target_dir.join(env::ENV_FILE), key, &fragment)?;
            report.env_fragment = true;
        } else {
            fs::copy(&path, &target_dir.join(&name))
                .await
                .with_context(|| format!("failed to copy {}", path.display()))?;
            report.files += 1;
        }
    }

    Ok(report)
}

/// A feature's `prisma/` directory is never bulk-overwritten: `.prisma`
/// files (the canonical `schema.prisma` included) become schema fragments,
/// everything else (migrations, seed scripts) is copied with overwrite
/// allowed.
async fn apply_prisma_dir(
    src: &Path,
    target_dir: &Path,
    feature_key: &str,
    report: &mut AppliedFeature,
) -> Result<()> {
    let target_prisma = target_dir.join(schema::PRISMA_DIR);
    let schema_path = target_prisma.join(schema::SCHEMA_FILE);

    let mut entries = fs::read_dir(src)
        .await
        .with_context(|| format!("failed to read {}", src.display()))?;

    while let Some(entry) = entries
        .next_entry()
        .await
        .with_context(|| format!("failed to read {}", src.display()))?
    {
        let name = entry.file_name();
        let name_str = name.to_string_lossy().to_string();
        let path = entry.path();
        let file_type = entry
            .file_type()
            .await
            .with_context(|| format!("failed to stat {}", path.display()))?;

        if file_type.is_dir() {
            report.files += copy_tree(&path, &target_prisma.join(&name)).await?;
        } else if name_str.ends_with(".prisma") {
            let fragment = fs::read_to_string(&path)
                .await
                .with_context(|| format!("failed to read {}", path.display()))?;
            let source_name = format!("{}/{}/{}", feature_key, schema::PRISMA_DIR, name_str);
            schema::append_fragment(&schema_path, &source_name, &fragment)?;
            report.schema_fragments += 1;
        } else {
            fs::create_dir_all(&target_prisma)
                .await
                .with_context(|| format!("failed to create {}", target_prisma.display()))?;
            fs::copy(&path, &target_prisma.join(&name))
                .await
                .with_context(|| format!("failed to copy {}", path.display()))?;
            report.files += 1;
        }
    }

    Ok(())
}

/// Recursively copy a directory tree, creating directories as needed.
/// Existing files at the destination are overwritten.
async fn copy_tree(src: &Path, dst: &Path) -> Result<usize> {
    let mut copied = 0;

    for entry in WalkDir::new(src) {
        let entry = entry.with_context(|| format!("failed to walk {}", src.display()))?;
        let rel = entry
            .path()
            .strip_prefix(src)
            .context("walked entry outside the copy root")?;
        if rel.as_os_str().is_empty() {
            continue;
        }

        let target_path = dst.join(rel);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target_path)
                .await
                .with_context(|| format!("failed to create {}", target_path.display()))?;
        } else {
            if let Some(parent) = target_path.parent() {
                fs::create_dir_all(parent)
                    .await
                    .with_context(|| format!("failed to create {}", parent.display()))?;
            }
            fs::copy(entry.path(), &target_path)
                .await
                .with_context(|| format!("failed to copy {}", entry.path().display()))?;
            copied += 1;
        }
    }

    Ok(copied)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn write(path: PathBuf, content: &str) {
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    #[tokio::test]
    async fn copy_base_preserves_structure() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("templates");
        let target = dir.path().join("demo");
        write(root.join("base/package.json"), "{}");
        write(root.join("base/app/layout.tsx"), "layout");
        write(root.join("base/.env"), "DATABASE_URL=\n");

        let copied = copy_base(&root, &target).await.unwrap();

        assert_eq!(copied, 3);
        assert_eq!(
            std::fs::read_to_string(target.join("app/layout.tsx")).unwrap(),
            "layout"
        );
        assert!(target.join(".env").exists());
    }

    #[tokio::test]
    async fn copy_base_refuses_existing_target() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("templates");
        let target = dir.path().join("demo");
        write(root.join("base/package.json"), "{}");
        std::fs::create_dir_all(&target).unwrap();

        assert!(copy_base(&root, &target).await.is_err());
    }

    #[tokio::test]
    async fn copy_base_fails_without_base_template() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("templates");
        let target = dir.path().join("demo");
        std::fs::create_dir_all(&root).unwrap();

        assert!(copy_base(&root, &target).await.is_err());
        assert!(!target.exists());
    }

    #[tokio::test]
    async fn later_feature_overwrites_earlier_file() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("templates");
        let target = dir.path().join("demo");
        std::fs::create_dir_all(&target).unwrap();
        write(root.join("features/a/lib/flags.ts"), "from a");
        write(root.join("features/b/lib/flags.ts"), "from b");

        apply_feature(&root, &target, "a").await.unwrap();
        apply_feature(&root, &target, "b").await.unwrap();

        assert_eq!(
            std::fs::read_to_string(target.join("lib/flags.ts")).unwrap(),
            "from b"
        );
    }

    #[tokio::test]
    async fn manifest_fragment_is_not_copied() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("templates");
        let target = dir.path().join("demo");
        std::fs::create_dir_all(&target).unwrap();
        write(
            root.join("features/auth/package.json"),
            r#"{"dependencies": {}}"#,
        );
        write(root.join("features/auth/lib/auth.ts"), "auth");

        let report = apply_feature(&root, &target, "auth").await.unwrap();

        assert_eq!(report.files, 1);
        assert!(!target.join("package.json").exists());
        assert!(target.join("lib/auth.ts").exists());
    }

    #[tokio::test]
    async fn env_fragment_is_merged_not_copied() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("templates");
        let target = dir.path().join("demo");
        std::fs::create_dir_all(&target).unwrap();
        std::fs::write(target.join(".env"), "DATABASE_URL=\n").unwrap();
        write(root.join("features/auth/env.example"), "AUTH_SECRET=\n");

        let report = apply_feature(&root, &target, "auth").await.unwrap();

        assert!(report.env_fragment);
        assert!(!target.join("env.example").exists());
        let env = std::fs::read_to_string(target.join(".env")).unwrap();
        assert!(env.starts_with("DATABASE_URL=\n"));
        assert!(env.contains("AUTH_SECRET="));
    }

    #[tokio::test]
    async fn prisma_dir_merges_schema_and_copies_the_rest() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("templates");
        let target = dir.path().join("demo");
        write(target.join("prisma/schema.prisma"), "model Product {}\n");
        write(root.join("features/auth/prisma/auth.prisma"), "model User {}\n");
        write(root.join("features/auth/prisma/seed.ts"), "// seed");
        write(
            root.join("features/auth/prisma/migrations/0001_init/migration.sql"),
            "CREATE TABLE users;",
        );

        let report = apply_feature(&root, &target, "auth").await.unwrap();

        assert_eq!(report.schema_fragments, 1);
        let merged = std::fs::read_to_string(target.join("prisma/schema.prisma")).unwrap();
        assert!(merged.starts_with("model Product {}\n"));
        assert!(merged.contains("// ---- auth/prisma/auth.prisma ----"));
        assert!(target.join("prisma/seed.ts").exists());
        assert!(target
            .join("prisma/migrations/0001_init/migration.sql")
            .exists());
        // The fragment is merged, never copied as its own file
        assert!(!target.join("prisma/auth.prisma").exists());
    }
}
