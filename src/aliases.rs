use std::collections::{HashMap, HashSet};
use std::path::Path;

use tracing::info;

use crate::dataset::Catalog;
use crate::errors::{AppError, AppResult};
use crate::selection::SelectionStore;

const BUILTIN_ALIASES: &[(&str, &str)] = &[
    ("United States of America", "United States"),
    ("Russian Federation", "Russia"),
    ("Czechia", "Czech Republic"),
    ("Côte d'Ivoire", "Ivory Coast"),
    ("Democratic Republic of the Congo", "DR Congo"),
    ("Republic of the Congo", "Congo"),
    ("Viet Nam", "Vietnam"),
    ("Lao People's Democratic Republic", "Laos"),
    ("Bolivia (Plurinational State of)", "Bolivia"),
    ("Iran (Islamic Republic of)", "Iran"),
    ("Syrian Arab Republic", "Syria"),
    ("Türkiye", "Turkey"),
];

/// External boundary name variant -> canonical dataset country name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasTable {
    entries: HashMap<String, String>,
}

impl AliasTable {
    pub fn builtin() -> Self {
        Self {
            entries: BUILTIN_ALIASES
                .iter()
                .map(|(external, canonical)| (external.to_string(), canonical.to_string()))
                .collect(),
        }
    }

    /// Reads a JSON object of `{"external": "canonical"}` pairs.
    pub fn from_json(bytes: &[u8]) -> AppResult<Self> {
        let entries: HashMap<String, String> = serde_json::from_slice(bytes)
            .map_err(|err| AppError::Parse(format!("invalid alias table: {err}")))?;
        Ok(Self { entries })
    }

    /// Built-in entries overlaid with the file at `path`, when given.
    pub fn load(path: Option<&Path>) -> AppResult<Self> {
        let mut table = Self::builtin();
        if let Some(path) = path {
            let bytes = std::fs::read(path).map_err(|err| {
                AppError::Config(format!("cannot read alias file {}: {err}", path.display()))
            })?;
            let overrides = Self::from_json(&bytes)?;
            info!(
                path = %path.display(),
                entries = overrides.len(),
                "loaded alias overrides"
            );
            table.merge(overrides);
        }
        Ok(table)
    }

    pub fn merge(&mut self, other: AliasTable) {
        self.entries.extend(other.entries);
    }

    pub fn get(&self, external: &str) -> Option<&str> {
        self.entries.get(external).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for AliasTable {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Reconciles boundary-dataset feature names with dataset country names.
#[derive(Debug, Clone)]
pub struct AliasResolver {
    known: HashSet<String>,
    table: AliasTable,
}

impl AliasResolver {
    pub fn new(catalog: &Catalog, table: AliasTable) -> Self {
        let known = catalog.country_names().map(str::to_string).collect();
        Self { known, table }
    }

    pub fn resolve_canonical(&self, external: &str) -> Option<&str> {
        if let Some(known) = self.known.get(external) {
            return Some(known.as_str());
        }
        self.table
            .get(external)
            .and_then(|canonical| self.known.get(canonical))
            .map(String::as_str)
    }

    pub fn is_visited_by_alias(&self, external: &str, selection: &SelectionStore) -> bool {
        self.resolve_canonical(external)
            .map(|canonical| selection.contains(canonical))
            .unwrap_or(false)
    }
}
