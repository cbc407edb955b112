//! Composer Core - Shared library for the Shopforge project generator
//!
//! This library assembles a new application from a base template plus a set
//! of feature overlays. Each feature is a directory that can contribute
//! ordinary files, Prisma schema fragments, environment-variable fragments,
//! `package.json` dependency fragments, and CSS theme tokens; the composer
//! reconciles all of them into one coherent generated project.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Layer 1: Core Operations** - Catalog loading, dependency resolution,
//!   fragment mergers, and the overlay copier
//! - **Layer 2: Workflow Orchestration** - [`ComposeRequest`] and
//!   [`compose_project`], a strictly sequential stage pipeline
//! - **Layer 3: CLI/TUI Interface** - Optional cliclack-based prompts
//!   (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based TUI prompts module
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use composer_core::{features, compose};
//!
//! let catalog = features::Catalog::load(&root)?;
//! let resolution = features::resolve(&selected, &catalog.requires_map());
//! let request = compose::ComposeRequest { /* ... */ };
//! compose::compose_project(&root, &request, |_| {}).await?;
//! ```

pub mod compose;
pub mod features;
pub mod merge;
pub mod runtime;
pub mod version;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use compose::{compose_project, ComposeReport, ComposeRequest, Stage, StageEvent};
pub use features::{resolve, Catalog, CatalogError, FeatureDescriptor, Resolution};
pub use runtime::{check_node, PackageManager, RuntimeInfo};

#[cfg(feature = "tui")]
pub use tui::run;

/// CLI version - used for catalog compatibility checking
/// The binary should pass its own version, but this provides a fallback
pub const DEFAULT_CLI_VERSION: &str = "0.1.0";
