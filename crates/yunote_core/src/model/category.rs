//! Category registry.
//!
//! # Responsibility
//! - Track user-added category names on top of the fixed default set.
//!
//! # Invariants
//! - The default set is hard-coded and can never be removed.
//! - The custom list is order-preserving and duplicate-free.
//! - A default name never appears in the custom list, including after a
//!   reload from storage.

/// Fixed category names available for both notes and todos.
pub const DEFAULT_CATEGORIES: [&str; 5] = ["Personal", "Work", "Shopping", "Education", "Other"];

/// User-extensible category list layered over [`DEFAULT_CATEGORIES`].
///
/// One registry exists per entity type; notes and todos do not share custom
/// names. Removing a name does not cascade to entities still referencing it;
/// they keep the stale category value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryRegistry {
    custom: Vec<String>,
}

impl CategoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the fixed default set.
    pub fn defaults() -> &'static [&'static str] {
        &DEFAULT_CATEGORIES
    }

    /// Returns the user-added names in insertion order.
    pub fn custom(&self) -> &[String] {
        &self.custom
    }

    /// Returns defaults followed by custom names.
    pub fn all(&self) -> Vec<String> {
        DEFAULT_CATEGORIES
            .iter()
            .map(|name| (*name).to_string())
            .chain(self.custom.iter().cloned())
            .collect()
    }

    /// Whether `name` is a known category (default or custom).
    pub fn contains(&self, name: &str) -> bool {
        Self::is_default(name) || self.custom.iter().any(|c| c == name)
    }

    /// Whether `name` belongs to the fixed default set.
    pub fn is_default(name: &str) -> bool {
        DEFAULT_CATEGORIES.contains(&name)
    }

    /// Adds a custom name. Returns `false` (list unchanged) when the name is
    /// already present or shadows a default.
    pub fn add_custom(&mut self, name: &str) -> bool {
        if self.contains(name) {
            return false;
        }
        self.custom.push(name.to_string());
        true
    }

    /// Removes a custom name. Returns `false` (list unchanged) when the name
    /// is a default or is not in the custom list.
    pub fn remove_custom(&mut self, name: &str) -> bool {
        if Self::is_default(name) {
            return false;
        }
        let before = self.custom.len();
        self.custom.retain(|c| c != name);
        self.custom.len() != before
    }

    /// Replaces the custom list from a persisted blob, dropping duplicates
    /// and any default names so the registry invariants hold even for blobs
    /// written by older app versions.
    pub fn set_custom(&mut self, names: Vec<String>) {
        self.custom.clear();
        for name in names {
            if !self.contains(&name) {
                self.custom.push(name);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_custom_is_idempotent() {
        let mut registry = CategoryRegistry::new();
        assert!(registry.add_custom("Fitness"));
        assert!(!registry.add_custom("Fitness"));
        assert_eq!(registry.custom(), ["Fitness"]);
    }

    #[test]
    fn defaults_cannot_enter_or_leave_the_custom_list() {
        let mut registry = CategoryRegistry::new();
        assert!(!registry.add_custom("Work"));
        assert!(!registry.remove_custom("Work"));
        assert!(registry.custom().is_empty());
    }

    #[test]
    fn remove_absent_custom_is_a_no_op() {
        let mut registry = CategoryRegistry::new();
        registry.add_custom("Travel");
        assert!(!registry.remove_custom("Fitness"));
        assert_eq!(registry.custom(), ["Travel"]);
    }

    #[test]
    fn set_custom_filters_defaults_and_duplicates() {
        let mut registry = CategoryRegistry::new();
        registry.set_custom(vec![
            "Travel".to_string(),
            "Work".to_string(),
            "Travel".to_string(),
            "Fitness".to_string(),
        ]);
        assert_eq!(registry.custom(), ["Travel", "Fitness"]);
    }

    #[test]
    fn all_lists_defaults_before_custom() {
        let mut registry = CategoryRegistry::new();
        registry.add_custom("Travel");
        let all = registry.all();
        assert_eq!(all.len(), DEFAULT_CATEGORIES.len() + 1);
        assert_eq!(all[0], "Personal");
        assert_eq!(all.last().map(String::as_str), Some("Travel"));
    }
}
