//! Pipeline orchestration
//!
//! This module provides:
//! - The [`ComposeRequest`] configuration threaded through every stage
//! - [`compose_project`], the strictly sequential stage pipeline
//! - [`StageEvent`] notifications so a UI can render per-stage progress
//!
//! Stages run top to bottom; each one consumes the filesystem state left by
//! the previous one. Base copy, feature application, manifest merge, and
//! install failures abort the run with no rollback of already-applied
//! changes. Theme and SEO failures are reported as warnings and the pipeline
//! continues.

pub mod copier;
pub mod install;

use crate::merge::{manifest, seo, theme};
use crate::runtime::PackageManager;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

pub use copier::{apply_feature, copy_base, AppliedFeature};
pub use install::install_dependencies;

/// Pipeline stages, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    CopyBase,
    ApplyFeatures,
    MergeManifest,
    ApplyTheme,
    SeoSetup,
    Install,
}

impl Stage {
    /// Progress label shown while the stage runs
    pub fn label(&self) -> &'static str {
        match self {
            Stage::CopyBase => "Copying base template",
            Stage::ApplyFeatures => "Applying features",
            Stage::MergeManifest => "Merging package manifest",
            Stage::ApplyTheme => "Applying theme",
            Stage::SeoSetup => "Setting up SEO",
            Stage::Install => "Installing dependencies",
        }
    }
}

/// Progress notifications emitted while the pipeline runs
#[derive(Debug, Clone)]
pub enum StageEvent {
    Started(Stage),
    Completed { stage: Stage, summary: String },
    Skipped { stage: Stage, reason: String },
    Warning { stage: Stage, message: String },
}

/// Everything the pipeline needs to generate one project. Built once from
/// the user's answers and never mutated by the stages.
#[derive(Debug, Clone)]
pub struct ComposeRequest {
    pub project_name: String,
    pub target_dir: PathBuf,
    /// Features in application order: mandatory first, then the resolved
    /// selection
    pub features: Vec<String>,
    pub theme: String,
    pub seo: bool,
    pub install: bool,
    pub package_manager: PackageManager,
}

/// What the pipeline did, including the warnings from non-fatal stages
#[derive(Debug, Default)]
pub struct ComposeReport {
    pub files_copied: usize,
    pub features_applied: usize,
    pub schema_fragments: usize,
    pub warnings: Vec<String>,
}

/// Run every stage against the template root. `notify` receives one
/// [`StageEvent`] per stage transition so callers can render progress;
/// headless callers pass `|_| {}`.
pub async fn compose_project(
    root: &Path,
    request: &ComposeRequest,
    mut notify: impl FnMut(StageEvent),
) -> Result<ComposeReport> {
    let mut report = ComposeReport::default();

    notify(StageEvent::Started(Stage::CopyBase));
    report.files_copied = copy_base(root, &request.target_dir)
        .await
        .context("base template copy failed")?;
    notify(StageEvent::Completed {
        stage: Stage::CopyBase,
        summary: format!("Copied base template ({} files)", report.files_copied),
    });

    notify(StageEvent::Started(Stage::ApplyFeatures));
    for key in &request.features {
        let applied = apply_feature(root, &request.target_dir, key)
            .await
            .with_context(|| format!("failed to apply feature '{}'", key))?;
        report.files_copied += applied.files;
        report.schema_fragments += applied.schema_fragments;
        report.features_applied += 1;
    }
    notify(StageEvent::Completed {
        stage: Stage::ApplyFeatures,
        summary: format!("Applied {} features", report.features_applied),
    });

    notify(StageEvent::Started(Stage::MergeManifest));
    manifest::merge_manifest(
        root,
        &request.target_dir,
        &request.project_name,
        &request.features,
    )
    .context("package manifest merge failed")?;
    notify(StageEvent::Completed {
        stage: Stage::MergeManifest,
        summary: "Merged package manifest".to_string(),
    });

    notify(StageEvent::Started(Stage::ApplyTheme));
    match theme::apply_theme(root, &request.target_dir, &request.theme) {
        Ok(()) => notify(StageEvent::Completed {
            stage: Stage::ApplyTheme,
            summary: format!("Applied theme '{}'", request.theme),
        }),
        Err(e) => {
            let message = format!("theme '{}' was not applied: {:#}", request.theme, e);
            report.warnings.push(message.clone());
            notify(StageEvent::Warning {
                stage: Stage::ApplyTheme,
                message,
            });
        }
    }

    if request.seo {
        notify(StageEvent::Started(Stage::SeoSetup));
        match seo::apply_seo(root, &request.target_dir) {
            Ok(()) => notify(StageEvent::Completed {
                stage: Stage::SeoSetup,
                summary: "SEO metadata added".to_string(),
            }),
            Err(e) => {
                let message = format!("SEO setup failed: {:#}", e);
                report.warnings.push(message.clone());
                notify(StageEvent::Warning {
                    stage: Stage::SeoSetup,
                    message,
                });
            }
        }
    } else {
        notify(StageEvent::Skipped {
            stage: Stage::SeoSetup,
            reason: "SEO setup (declined)".to_string(),
        });
    }

    if request.install {
        notify(StageEvent::Started(Stage::Install));
        install_dependencies(&request.target_dir, request.package_manager)
            .await
            .context("dependency installation failed")?;
        notify(StageEvent::Completed {
            stage: Stage::Install,
            summary: format!("Installed dependencies with {}", request.package_manager),
        });
    } else {
        notify(StageEvent::Skipped {
            stage: Stage::Install,
            reason: "dependency installation".to_string(),
        });
    }

    Ok(report)
}
