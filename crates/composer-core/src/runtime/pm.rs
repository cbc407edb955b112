//! Package manager detection

use std::fmt;
use std::process::Command;

/// Supported package managers in order of preference
const PREFERENCE: &[PackageManager] = &[
    PackageManager::Bun,
    PackageManager::Pnpm,
    PackageManager::Npm,
];

/// A JavaScript package manager available on the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageManager {
    Bun,
    Pnpm,
    Npm,
}

impl PackageManager {
    /// Binary name on PATH
    pub fn command(&self) -> &'static str {
        match self {
            PackageManager::Bun => "bun",
            PackageManager::Pnpm => "pnpm",
            PackageManager::Npm => "npm",
        }
    }

    /// Arguments for installing a project's dependencies
    pub fn install_args(&self) -> &'static [&'static str] {
        &["install"]
    }

    /// Package runner command for the next-steps hints
    pub fn exec_command(&self) -> &'static str {
        match self {
            PackageManager::Bun => "bunx",
            PackageManager::Pnpm => "pnpm dlx",
            PackageManager::Npm => "npx",
        }
    }

    /// Check if this package manager responds on the host
    pub fn is_available(&self) -> bool {
        Command::new(self.command())
            .arg("--version")
            .output()
            .is_ok_and(|o| o.status.success())
    }

    /// Detect the preferred available package manager, falling back to npm
    /// (the install stage will then fail with npm's own error if even that
    /// is missing)
    pub fn detect() -> PackageManager {
        PREFERENCE
            .iter()
            .copied()
            .find(|pm| pm.is_available())
            .unwrap_or(PackageManager::Npm)
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.command())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detect_returns_a_preference_member() {
        let pm = PackageManager::detect();
        assert!(PREFERENCE.contains(&pm));
    }

    #[test]
    fn install_args_spell_install() {
        for pm in PREFERENCE {
            assert_eq!(pm.install_args(), &["install"]);
        }
    }
}
