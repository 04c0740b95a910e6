//! Tables keyed by source, in load order.

use crate::ids::SourceKey;
use crate::table::Table;

/// One table per source key. Iteration follows insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceTables {
    entries: Vec<(SourceKey, Table)>,
}

impl SourceTables {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a table, replacing any previous table for the same key in place.
    pub fn insert(&mut self, key: SourceKey, table: Table) {
        match self.entries.iter_mut().find(|(existing, _)| *existing == key) {
            Some((_, slot)) => *slot = table,
            None => self.entries.push((key, table)),
        }
    }

    pub fn get(&self, key: &SourceKey) -> Option<&Table> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, table)| table)
    }

    /// Lookup by plain string key.
    pub fn get_str(&self, key: &str) -> Option<&Table> {
        self.entries
            .iter()
            .find(|(existing, _)| existing.as_str() == key)
            .map(|(_, table)| table)
    }

    pub fn contains(&self, key: &SourceKey) -> bool {
        self.get(key).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&SourceKey, &Table)> {
        self.entries.iter().map(|(key, table)| (key, table))
    }

    pub fn keys(&self) -> impl Iterator<Item = &SourceKey> {
        self.entries.iter().map(|(key, _)| key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Applies `f` to every table, keeping keys and order.
    #[must_use]
    pub fn map_tables(self, mut f: impl FnMut(Table) -> Table) -> Self {
        Self {
            entries: self
                .entries
                .into_iter()
                .map(|(key, table)| (key, f(table)))
                .collect(),
        }
    }
}

impl FromIterator<(SourceKey, Table)> for SourceTables {
    fn from_iter<I: IntoIterator<Item = (SourceKey, Table)>>(iter: I) -> Self {
        let mut tables = Self::new();
        for (key, table) in iter {
            tables.insert(key, table);
        }
        tables
    }
}
