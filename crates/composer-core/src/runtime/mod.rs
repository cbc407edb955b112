//! Host environment detection
//!
//! This module provides:
//! - Node.js runtime detection (the generated project needs it)
//! - Package manager detection for the install stage

pub mod check;
pub mod pm;

pub use check::{check_node, RuntimeInfo, NODE_DOWNLOAD_URL};
pub use pm::PackageManager;
