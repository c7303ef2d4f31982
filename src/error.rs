//! Error taxonomy for the annotation pipeline.
//!
//! None of these errors ever reach the host: every failure degrades to
//! "show no annotations". They exist so failures can be logged and kept
//! around as diagnostics (see [`LocaleStore::last_error`]).
//!
//! [`LocaleStore::last_error`]: crate::core::LocaleStore::last_error

use std::{io, path::PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LensError {
    /// No workspace root could be resolved; the engine stays inert.
    #[error("no workspace root available")]
    NoWorkspace,

    #[error("locale file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("failed to read locale file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse locale file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The document parsed, but its top level is not an object.
    #[error("locale file {} must contain a JSON object at the top level", .0.display())]
    NotAnObject(PathBuf),

    #[error("file watcher error: {0}")]
    Watch(#[from] notify::Error),

    #[error("failed to rebind watcher to {}: {reason}", path.display())]
    WatcherRebindFailure { path: PathBuf, reason: String },
}

pub type LensResult<T> = Result<T, LensError>;
