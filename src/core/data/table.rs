use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

/// Flattened key → value lookup table for one locale file.
///
/// Keys are dotted paths (`"greeting.hello"`), values are the stringified
/// leaves of the locale tree. A table is immutable once built: a reload
/// builds a fresh table and swaps it in as a whole.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocaleTable {
    /// All entries, keyed by dotted path.
    entries: HashMap<String, String>,
    /// Locale file the table was built from. `None` for the empty table.
    source: Option<PathBuf>,
}

impl LocaleTable {
    /// The defined empty state: no file, no entries.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn new(entries: HashMap<String, String>, source: impl Into<PathBuf>) -> Self {
        Self {
            entries,
            source: Some(source.into()),
        }
    }

    /// Exact dotted-key lookup. No prefix matching.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.entries.keys()
    }

    pub fn entries(&self) -> &HashMap<String, String> {
        &self.entries
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for LocaleTable
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            source: None,
        }
    }
}
