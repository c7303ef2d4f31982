//! The cached lookup table and its reload discipline.
//!
//! The current table is an `ArcSwap<LocaleTable>`. A reload parses into a
//! brand-new table first and only then swaps the `Arc` in one atomic store,
//! so a reader holding a snapshot sees either the old table or the new one,
//! never a mix. Reads never block a reload.

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use arc_swap::{ArcSwap, ArcSwapOption};

use crate::core::{LocaleTable, parsers::json::parse_locale_file};
use crate::error::LensError;

#[derive(Debug)]
pub struct LocaleStore {
    current: ArcSwap<LocaleTable>,
    /// Most recent load failure, kept for diagnostics only.
    last_error: ArcSwapOption<LensError>,
}

impl Default for LocaleStore {
    fn default() -> Self {
        Self {
            current: ArcSwap::from_pointee(LocaleTable::empty()),
            last_error: ArcSwapOption::empty(),
        }
    }
}

impl LocaleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load `path` and replace the table.
    ///
    /// Never fails: a read or parse error swaps in the empty table and is
    /// recorded in [`last_error`](Self::last_error). Returns the snapshot
    /// that is now current.
    pub fn load(&self, path: &Path) -> Arc<LocaleTable> {
        match parse_locale_file(path) {
            Ok(table) => {
                tracing::debug!(path = %path.display(), keys = table.len(), "loaded locale file");
                self.last_error.store(None);
                self.replace(table)
            }
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "locale file unusable, clearing translations");
                self.last_error.store(Some(Arc::new(err)));
                self.replace(LocaleTable::empty())
            }
        }
    }

    /// Swap in the empty table (no locale file available).
    pub fn clear(&self) -> Arc<LocaleTable> {
        self.last_error.store(None);
        self.replace(LocaleTable::empty())
    }

    /// Swap in an already-built table.
    pub fn replace(&self, table: LocaleTable) -> Arc<LocaleTable> {
        let table = Arc::new(table);
        self.current.store(Arc::clone(&table));
        table
    }

    /// Current table. Cheap: clones an `Arc`.
    pub fn snapshot(&self) -> Arc<LocaleTable> {
        self.current.load_full()
    }

    /// Exact-key lookup against the current table.
    pub fn get(&self, key: &str) -> Option<String> {
        self.current.load().get(key).map(str::to_string)
    }

    /// Path of the file the current table was loaded from.
    pub fn source(&self) -> Option<PathBuf> {
        self.current.load().source().map(Path::to_path_buf)
    }

    pub fn len(&self) -> usize {
        self.current.load().len()
    }

    pub fn is_empty(&self) -> bool {
        self.current.load().is_empty()
    }

    pub fn last_error(&self) -> Option<Arc<LensError>> {
        self.last_error.load_full()
    }
}
