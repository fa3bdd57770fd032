//! Environment overlay for child processes
//!
//! The enabled entries become an override table; the child's environment is
//! the inherited environment with those keys replaced.

use std::collections::HashMap;

use super::EnvVar;

/// Key/value overrides applied on top of an inherited environment
#[derive(Debug, Clone, Default)]
pub struct EnvOverlay {
    /// Overrides in entry order
    overrides: Vec<(String, String)>,
    /// Key -> index into `overrides`
    index: HashMap<String, usize>,
}

impl EnvOverlay {
    /// Build the override table from the enabled entries
    pub fn from_entries(vars: &[EnvVar]) -> Self {
        let mut overlay = Self::default();
        for var in vars.iter().filter(|v| v.enabled) {
            overlay.insert(var.key.clone(), var.value.clone());
        }
        overlay
    }

    /// Add or replace one override
    pub fn insert(&mut self, key: String, value: String) {
        match self.index.get(&key) {
            Some(&i) => self.overrides[i].1 = value,
            None => {
                self.index.insert(key.clone(), self.overrides.len());
                self.overrides.push((key, value));
            }
        }
    }

    /// Number of overrides
    pub fn len(&self) -> usize {
        self.overrides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.overrides.is_empty()
    }

    /// Check whether a key is overridden
    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Merge onto an inherited environment
    ///
    /// Inherited pairs whose key is not overridden come first, in their
    /// original order, followed by every override in entry order.
    pub fn materialize<I>(&self, inherited: I) -> Vec<(String, String)>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut merged: Vec<(String, String)> = inherited
            .into_iter()
            .filter(|(key, _)| !self.contains(key))
            .collect();
        merged.extend(self.overrides.iter().cloned());
        merged
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(k: &str, v: &str) -> (String, String) {
        (k.to_string(), v.to_string())
    }

    #[test]
    fn test_override_beats_inherited() {
        let vars = vec![EnvVar::new("PATH_EXTRA", "/opt"), EnvVar::new("HOME", "/tmp/h")];
        let overlay = EnvOverlay::from_entries(&vars);

        let merged = overlay.materialize(vec![pair("HOME", "/root"), pair("USER", "me")]);
        assert_eq!(
            merged,
            vec![
                pair("USER", "me"),
                pair("PATH_EXTRA", "/opt"),
                pair("HOME", "/tmp/h"),
            ]
        );
    }

    #[test]
    fn test_disabled_entries_are_not_applied() {
        let mut vars = vec![EnvVar::new("A", "1"), EnvVar::new("B", "2")];
        vars[0].enabled = false;
        let overlay = EnvOverlay::from_entries(&vars);

        assert_eq!(overlay.len(), 1);
        assert!(!overlay.contains("A"));

        let merged = overlay.materialize(vec![pair("A", "inherited")]);
        assert_eq!(merged, vec![pair("A", "inherited"), pair("B", "2")]);
    }

    #[test]
    fn test_similar_prefix_is_not_removed() {
        let overlay = EnvOverlay::from_entries(&[EnvVar::new("KEY", "new")]);
        let merged = overlay.materialize(vec![pair("KEY_OTHER", "keep"), pair("KEY", "old")]);
        assert_eq!(merged, vec![pair("KEY_OTHER", "keep"), pair("KEY", "new")]);
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let mut overlay = EnvOverlay::default();
        overlay.insert("A".into(), "1".into());
        overlay.insert("B".into(), "2".into());
        overlay.insert("A".into(), "3".into());

        assert_eq!(
            overlay.materialize(Vec::new()),
            vec![pair("A", "3"), pair("B", "2")]
        );
    }

    #[test]
    fn test_empty_overlay_passes_through() {
        let overlay = EnvOverlay::default();
        assert!(overlay.is_empty());
        assert_eq!(overlay.materialize(vec![pair("X", "1")]), vec![pair("X", "1")]);
    }
}
