use std::collections::BTreeSet;

use tracing::debug;

use crate::dataset::Catalog;

/// Set of selected canonical country names.
///
/// Membership is always a subset of the catalog the store was built from;
/// names outside it are ignored by every operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionStore {
    universe: BTreeSet<String>,
    selected: BTreeSet<String>,
}

impl SelectionStore {
    /// Starts with every country selected.
    pub fn new(catalog: &Catalog) -> Self {
        let universe: BTreeSet<String> = catalog.country_names().map(str::to_string).collect();
        Self {
            selected: universe.clone(),
            universe,
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.selected.contains(name)
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.selected.iter().map(String::as_str)
    }

    /// Adds `name` if absent, removes it if present.
    ///
    /// Returns `false` without touching the set when `name` is unknown.
    pub fn toggle(&mut self, name: &str) -> bool {
        if !self.universe.contains(name) {
            debug!(country = name, "ignoring toggle for unknown country");
            return false;
        }
        if !self.selected.remove(name) {
            self.selected.insert(name.to_string());
        }
        true
    }

    /// Checkbox state is authoritative: add when checked, remove otherwise.
    pub fn set_checked(&mut self, name: &str, checked: bool) -> bool {
        if !self.universe.contains(name) {
            debug!(country = name, "ignoring checkbox for unknown country");
            return false;
        }
        if checked {
            self.selected.insert(name.to_string());
        } else {
            self.selected.remove(name);
        }
        true
    }

    pub fn select_all(&mut self) {
        self.selected = self.universe.clone();
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::CountryRecord;

    fn store() -> SelectionStore {
        let catalog = Catalog::normalize(
            ["Brazil", "Japan", "Peru"]
                .into_iter()
                .map(|name| CountryRecord {
                    country: name.to_string(),
                    continent: None,
                    videos: Vec::new(),
                })
                .collect(),
        );
        SelectionStore::new(&catalog)
    }

    #[test]
    fn starts_fully_selected() {
        let store = store();
        assert_eq!(store.len(), 3);
        assert_eq!(store.iter().collect::<Vec<_>>(), vec!["Brazil", "Japan", "Peru"]);
    }

    #[test]
    fn toggle_twice_restores_membership() {
        let mut store = store();
        let before = store.clone();
        assert!(store.toggle("Japan"));
        assert!(!store.contains("Japan"));
        assert!(store.toggle("Japan"));
        assert_eq!(store, before);
    }

    #[test]
    fn unknown_names_are_ignored() {
        let mut store = store();
        assert!(!store.toggle("Atlantis"));
        assert!(!store.set_checked("Atlantis", true));
        assert!(!store.contains("Atlantis"));
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn checkbox_state_is_authoritative() {
        let mut store = store();
        assert!(store.set_checked("Peru", true));
        assert!(store.contains("Peru"));
        store.set_checked("Peru", false);
        store.set_checked("Peru", false);
        assert!(!store.contains("Peru"));
    }

    #[test]
    fn bulk_operations() {
        let mut store = store();
        store.clear();
        assert!(store.is_empty());
        store.select_all();
        assert_eq!(store.len(), 3);
    }
}
