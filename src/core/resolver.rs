//! Picks the locale file to preview.
//!
//! A configured `localePath` that exists wins. Otherwise the workspace is
//! searched for files named like `en*.json`, skipping build and dependency
//! directories, and the first hit is used. Walking is depth-first with
//! entries sorted by name, so the choice is deterministic.

use std::path::{Path, PathBuf};

use glob::Pattern;
use walkdir::{DirEntry, WalkDir};

/// Locale codes recognized at the start of a discoverable file name.
pub const LOCALE_CODES: &[&str] = &["en", "es", "fr", "de", "it", "pt", "ja", "zh", "ru"];

/// Directory names never searched during discovery.
pub const EXCLUDED_DIRS: &[&str] = &["node_modules", ".git", ".next", "build", "dist", "out"];

/// Discovery stops after this many candidates.
pub const MAX_CANDIDATES: usize = 5;

#[derive(Debug, Clone)]
pub struct LocaleResolver {
    file_patterns: Vec<Pattern>,
    max_candidates: usize,
}

impl Default for LocaleResolver {
    fn default() -> Self {
        Self::new(MAX_CANDIDATES)
    }
}

impl LocaleResolver {
    pub fn new(max_candidates: usize) -> Self {
        let file_patterns = LOCALE_CODES
            .iter()
            .filter_map(|code| Pattern::new(&format!("{}*.json", code)).ok())
            .collect();
        Self {
            file_patterns,
            max_candidates,
        }
    }

    /// Resolve the locale file for `root`.
    ///
    /// `manual` is a workspace-relative override. It is used when it points at
    /// an existing file; otherwise discovery runs. `None` means no translations
    /// are available, which is not an error.
    pub fn resolve(&self, root: &Path, manual: Option<&str>) -> Option<PathBuf> {
        if let Some(manual) = manual.filter(|m| !m.trim().is_empty()) {
            let path = root.join(manual);
            if path.is_file() {
                tracing::debug!(path = %path.display(), "using configured locale file");
                return Some(path);
            }
            tracing::debug!(path = %path.display(), "configured locale file missing, falling back to discovery");
        }

        let found = self.discover(root).into_iter().next();
        match &found {
            Some(path) => tracing::debug!(path = %path.display(), "discovered locale file"),
            None => tracing::debug!(root = %root.display(), "no locale file found"),
        }
        found
    }

    /// Candidate locale files under `root`, in discovery order.
    pub fn discover(&self, root: &Path) -> Vec<PathBuf> {
        WalkDir::new(root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || !is_excluded_dir(entry))
            .filter_map(Result::ok)
            .filter(|entry| entry.file_type().is_file() && self.matches_name(entry.path()))
            .take(self.max_candidates)
            .map(DirEntry::into_path)
            .collect()
    }

    /// Whether `path` would be picked up by discovery under `root`.
    pub fn is_candidate(&self, root: &Path, path: &Path) -> bool {
        let relative = path.strip_prefix(root).unwrap_or(path);
        self.matches_name(path)
            && !relative.components().any(|c| {
                c.as_os_str()
                    .to_str()
                    .is_some_and(|name| EXCLUDED_DIRS.contains(&name))
            })
    }

    fn matches_name(&self, path: &Path) -> bool {
        path.file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| self.file_patterns.iter().any(|p| p.matches(name)))
    }
}

fn is_excluded_dir(entry: &DirEntry) -> bool {
    entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| EXCLUDED_DIRS.contains(&name))
}
