//! Append-only environment file merging

use anyhow::{Context, Result};
use std::io::ErrorKind;
use std::path::Path;

/// Environment file in the generated project
pub const ENV_FILE: &str = ".env";

/// Fragment file a feature contributes instead of a literal `.env`
pub const ENV_FRAGMENT_FILE: &str = "env.example";

/// Append a feature's env fragment to the target `.env`, preceded by a
/// comment naming the contributing feature. Duplicate variable names across
/// features are kept as-is; which one wins is the dotenv parser's business.
pub fn append_fragment(env_path: &Path, feature_key: &str, fragment: &str) -> Result<()> {
    let existing = match std::fs::read_to_string(env_path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => String::new(),
        Err(e) => return Err(e).with_context(|| format!("failed to read {}", env_path.display())),
    };

    let mut merged = existing;
    if !merged.is_empty() && !merged.ends_with('\n') {
        merged.push('\n');
    }
    if !merged.is_empty() {
        merged.push('\n');
    }
    merged.push_str(&format!("# ---- feature: {} ----\n", feature_key));
    merged.push_str(fragment);
    if !fragment.ends_with('\n') {
        merged.push('\n');
    }

    std::fs::write(env_path, merged)
        .with_context(|| format!("failed to write {}", env_path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appends_after_existing_content() {
        let dir = tempfile::tempdir().unwrap();
        let env = dir.path().join(ENV_FILE);
        std::fs::write(&env, "DATABASE_URL=postgres://localhost/shop\n").unwrap();

        append_fragment(&env, "auth", "AUTH_SECRET=\n").unwrap();

        let merged = std::fs::read_to_string(&env).unwrap();
        assert!(merged.starts_with("DATABASE_URL=postgres://localhost/shop\n"));
        assert!(merged.contains("# ---- feature: auth ----"));
        assert!(merged.ends_with("AUTH_SECRET=\n"));
    }

    #[test]
    fn creates_env_when_missing() {
        let dir = tempfile::tempdir().unwrap();
        let env = dir.path().join(ENV_FILE);

        append_fragment(&env, "stripe", "STRIPE_KEY=sk_test\n").unwrap();

        let merged = std::fs::read_to_string(&env).unwrap();
        assert!(merged.starts_with("# ---- feature: stripe ----"));
    }

    #[test]
    fn duplicate_variables_are_kept() {
        let dir = tempfile::tempdir().unwrap();
        let env = dir.path().join(ENV_FILE);

        append_fragment(&env, "auth", "SMTP_HOST=mail.one\n").unwrap();
        append_fragment(&env, "newsletter", "SMTP_HOST=mail.two\n").unwrap();

        let merged = std::fs::read_to_string(&env).unwrap();
        assert_eq!(merged.matches("SMTP_HOST=").count(), 2);
        // The later occurrence sits below the earlier one
        assert!(merged.find("mail.one").unwrap() < merged.find("mail.two").unwrap());
    }
}
