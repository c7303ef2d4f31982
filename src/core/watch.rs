//! File-change subscription.
//!
//! The engine talks to a [`FileWatcher`] only to bind and release; events
//! come back as [`FileEvent`]s that the host feeds into
//! [`Engine::handle`](crate::core::Engine::handle). [`NotifyWatcher`] is the
//! real implementation and forwards `notify` events through a channel.

use std::{
    ffi::{OsStr, OsString},
    path::{Path, PathBuf},
};

use notify::{
    Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher,
    event::{ModifyKind, RenameMode},
};
use tokio::sync::mpsc::UnboundedSender;

use crate::error::{LensError, LensResult};

/// What a watcher is bound to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatchTarget {
    /// The resolved locale file.
    File(PathBuf),
    /// No locale file yet: watch the workspace for one to appear.
    Discovery(PathBuf),
}

impl WatchTarget {
    pub fn path(&self) -> &Path {
        match self {
            WatchTarget::File(path) | WatchTarget::Discovery(path) => path,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileEvent {
    Created(PathBuf),
    Modified(PathBuf),
    Removed(PathBuf),
}

impl FileEvent {
    pub fn path(&self) -> &Path {
        match self {
            FileEvent::Created(path) | FileEvent::Modified(path) | FileEvent::Removed(path) => path,
        }
    }
}

pub trait FileWatcher {
    /// Start delivering events for `target`. Callers release any previous
    /// binding first.
    fn bind(&mut self, target: &WatchTarget) -> LensResult<()>;

    /// Stop delivering events. Releasing an unbound watcher is a no-op.
    fn release(&mut self) -> LensResult<()>;
}

/// Watcher that never reports anything, for one-shot rendering.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullWatcher;

impl FileWatcher for NullWatcher {
    fn bind(&mut self, _target: &WatchTarget) -> LensResult<()> {
        Ok(())
    }

    fn release(&mut self) -> LensResult<()> {
        Ok(())
    }
}

/// [`FileWatcher`] backed by the platform watcher from `notify`.
///
/// A locale file is watched through its parent directory so that deletes
/// and atomic saves (write to temp + rename) are still observed.
pub struct NotifyWatcher {
    sender: UnboundedSender<FileEvent>,
    active: Option<(RecommendedWatcher, PathBuf)>,
}

impl NotifyWatcher {
    pub fn new(sender: UnboundedSender<FileEvent>) -> Self {
        Self {
            sender,
            active: None,
        }
    }

    pub fn is_bound(&self) -> bool {
        self.active.is_some()
    }
}

impl FileWatcher for NotifyWatcher {
    fn bind(&mut self, target: &WatchTarget) -> LensResult<()> {
        let sender = self.sender.clone();
        let (watch_path, mode, filter) = match target {
            WatchTarget::File(path) => {
                let parent = path
                    .parent()
                    .filter(|p| !p.as_os_str().is_empty())
                    .unwrap_or(Path::new("."))
                    .to_path_buf();
                let name = path.file_name().map(OsStr::to_os_string);
                (parent, RecursiveMode::NonRecursive, EventFilter::FileName(name))
            }
            WatchTarget::Discovery(root) => {
                (root.clone(), RecursiveMode::Recursive, EventFilter::Json)
            }
        };

        let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| match res {
            Ok(event) => {
                for file_event in translate_event(event) {
                    if filter.accepts(file_event.path()) {
                        // The receiver is gone once the host loop has exited.
                        let _ = sender.send(file_event);
                    }
                }
            }
            Err(err) => tracing::warn!(error = %err, "file watcher error"),
        })?;
        watcher.watch(&watch_path, mode)?;

        tracing::debug!(path = %watch_path.display(), ?mode, "watcher bound");
        self.active = Some((watcher, watch_path));
        Ok(())
    }

    fn release(&mut self) -> LensResult<()> {
        if let Some((mut watcher, path)) = self.active.take() {
            tracing::debug!(path = %path.display(), "watcher released");
            watcher.unwatch(&path).map_err(LensError::from)?;
        }
        Ok(())
    }
}

/// Which forwarded paths a binding cares about.
enum EventFilter {
    /// Siblings in the parent directory are ignored.
    FileName(Option<OsString>),
    /// Discovery only ever picks `.json` files.
    Json,
}

impl EventFilter {
    fn accepts(&self, path: &Path) -> bool {
        match self {
            EventFilter::FileName(name) => path.file_name() == name.as_deref(),
            EventFilter::Json => path.extension().is_some_and(|ext| ext == "json"),
        }
    }
}

/// Map a raw `notify` event onto create/modify/remove.
///
/// Renames become a removal of the old name and a creation of the new one;
/// access and metadata-only events are dropped.
pub fn translate_event(event: Event) -> Vec<FileEvent> {
    let Event { kind, paths, .. } = event;
    match kind {
        EventKind::Create(_) => paths.into_iter().map(FileEvent::Created).collect(),
        EventKind::Remove(_) => paths.into_iter().map(FileEvent::Removed).collect(),
        EventKind::Modify(ModifyKind::Name(RenameMode::From)) => {
            paths.into_iter().map(FileEvent::Removed).collect()
        }
        EventKind::Modify(ModifyKind::Name(RenameMode::To)) => {
            paths.into_iter().map(FileEvent::Created).collect()
        }
        EventKind::Modify(ModifyKind::Name(RenameMode::Both)) => {
            let mut paths = paths.into_iter();
            let mut events = Vec::new();
            if let Some(from) = paths.next() {
                events.push(FileEvent::Removed(from));
            }
            events.extend(paths.map(FileEvent::Created));
            events
        }
        EventKind::Modify(ModifyKind::Metadata(_)) => Vec::new(),
        EventKind::Modify(_) => paths.into_iter().map(FileEvent::Modified).collect(),
        _ => Vec::new(),
    }
}

/// Whether two paths name the same file, tolerating relative vs absolute
/// spellings. Works for files that no longer exist.
pub fn same_file(a: &Path, b: &Path) -> bool {
    if a == b {
        return true;
    }
    if a.file_name() != b.file_name() {
        return false;
    }
    match (canonical_parent(a), canonical_parent(b)) {
        (Some(pa), Some(pb)) => pa == pb,
        _ => false,
    }
}

fn canonical_parent(path: &Path) -> Option<PathBuf> {
    let parent = path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or(Path::new("."));
    parent.canonicalize().ok()
}
