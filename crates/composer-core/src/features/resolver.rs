//! Transitive expansion of a feature selection
//!
//! A selected feature can declare that it requires other features. The
//! resolver closes the selection under that relation so every requirement,
//! direct or transitive, ends up in the set exactly once.

use std::collections::HashMap;

/// A feature pulled in because another feature requires it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutoAdded {
    pub feature: String,
    pub required_by: String,
}

/// Result of closing a selection under the requires relation
#[derive(Debug, Clone)]
pub struct Resolution {
    /// Deduplicated features: selection order first, auto-added requirements
    /// after, in discovery order
    pub features: Vec<String>,

    /// One entry per requirement that was not in the original selection;
    /// callers surface these as informational notices
    pub auto_added: Vec<AutoAdded>,
}

/// Expand `selected` to its fixed point under `requires`.
///
/// Iterative expansion: scan the current set, add any declared requirement
/// not already present, repeat until a full pass adds nothing. Termination is
/// guaranteed because each pass either grows the set by a key drawn from the
/// finite requires-map or stops; a cyclic requires-map therefore cannot loop.
/// Duplicates in the input are tolerated; unknown keys pass through untouched.
pub fn resolve(selected: &[String], requires: &HashMap<String, Vec<String>>) -> Resolution {
    let mut features: Vec<String> = Vec::new();
    for key in selected {
        if !features.iter().any(|f| f == key) {
            features.push(key.clone());
        }
    }

    let mut auto_added: Vec<AutoAdded> = Vec::new();
    loop {
        let mut added = false;
        for i in 0..features.len() {
            let key = features[i].clone();
            let Some(reqs) = requires.get(&key) else {
                continue;
            };
            for req in reqs {
                if !features.iter().any(|f| f == req) {
                    features.push(req.clone());
                    auto_added.push(AutoAdded {
                        feature: req.clone(),
                        required_by: key.clone(),
                    });
                    added = true;
                }
            }
        }
        if !added {
            break;
        }
    }

    Resolution {
        features,
        auto_added,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn requires(pairs: &[(&str, &[&str])]) -> HashMap<String, Vec<String>> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.iter().map(|s| s.to_string()).collect()))
            .collect()
    }

    fn keys(keys: &[&str]) -> Vec<String> {
        keys.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn adds_direct_requirement() {
        let map = requires(&[("stripe", &["auth"])]);
        let resolution = resolve(&keys(&["stripe"]), &map);

        assert_eq!(resolution.features, keys(&["stripe", "auth"]));
        assert_eq!(
            resolution.auto_added,
            vec![AutoAdded {
                feature: "auth".into(),
                required_by: "stripe".into(),
            }]
        );
    }

    #[test]
    fn adds_transitive_requirements() {
        let map = requires(&[("checkout", &["stripe"]), ("stripe", &["auth"])]);
        let resolution = resolve(&keys(&["checkout"]), &map);
        assert_eq!(resolution.features, keys(&["checkout", "stripe", "auth"]));
    }

    #[test]
    fn closure_is_idempotent() {
        let map = requires(&[("stripe", &["auth"])]);
        let once = resolve(&keys(&["stripe"]), &map);
        let twice = resolve(&once.features, &map);

        assert_eq!(once.features, twice.features);
        assert!(twice.auto_added.is_empty());
    }

    #[test]
    fn tolerates_duplicate_selection() {
        let map = requires(&[("stripe", &["auth"])]);
        let resolution = resolve(&keys(&["stripe", "stripe", "auth"]), &map);
        assert_eq!(resolution.features, keys(&["stripe", "auth"]));
        assert!(resolution.auto_added.is_empty());
    }

    #[test]
    fn unknown_keys_pass_through() {
        let map = requires(&[("stripe", &["auth"])]);
        let resolution = resolve(&keys(&["blog"]), &map);
        assert_eq!(resolution.features, keys(&["blog"]));
    }

    #[test]
    fn cyclic_requires_map_terminates() {
        let map = requires(&[("a", &["b"]), ("b", &["a"])]);
        let resolution = resolve(&keys(&["a"]), &map);
        assert_eq!(resolution.features, keys(&["a", "b"]));
    }

    #[test]
    fn self_requirement_terminates() {
        let map = requires(&[("a", &["a"])]);
        let resolution = resolve(&keys(&["a"]), &map);
        assert_eq!(resolution.features, keys(&["a"]));
        assert!(resolution.auto_added.is_empty());
    }

    #[test]
    fn empty_selection_stays_empty() {
        let map = requires(&[("stripe", &["auth"])]);
        let resolution = resolve(&[], &map);
        assert!(resolution.features.is_empty());
        assert!(resolution.auto_added.is_empty());
    }
}
